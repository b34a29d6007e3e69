use std::process::ExitCode;

use chrono::Utc;

use cashier_order::models::{OrderErrorEvent, OrderSession, OrderStatusEvent, PaymentStatus, WatchPhase};
use cashier_order::services::ConfigService;
use cashier_order::state::AppState;
use cashier_order::utils::{logger, time_utils};

/// 支付指引文案模板,占位符由订单快照填充
const PAYMENT_HINT_TEMPLATE: &str =
    "请使用 {chainName} 网络向 {address} 转入 {quantity} {tokenName}";

#[tokio::main]
async fn main() -> ExitCode {
    // .env 可缺省,环境变量直接注入同样有效
    let _ = dotenvy::dotenv();

    // 初始化日志系统
    logger::init().expect("日志系统初始化失败");

    let config = match ConfigService::load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "配置加载失败");
            return ExitCode::from(2);
        }
    };
    let params = ConfigService::order_params();

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "应用状态初始化失败");
            return ExitCode::from(2);
        }
    };

    let handle = state.watcher.start(params.clone());
    state
        .session_manager
        .set_current_watch(params.order_id.clone(), handle.cancellation_token())
        .await;

    if handle.session().phase == WatchPhase::Idle {
        tracing::warn!("订单参数未配置 (CASHIER_ORDER_ID / CASHIER_ACCESS_TOKEN),收银台保持空闲");
        return ExitCode::from(2);
    }

    let mut updates = handle.subscribe();
    let mut hint_logged = false;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("收到退出信号,停止轮询");
                handle.stop();
            }
            changed = updates.changed() => {
                // 发送端关闭说明轮询任务已退出
                if changed.is_err() {
                    break;
                }
                let session = updates.borrow_and_update().clone();
                report_session(&session, &mut hint_logged);
                if session.phase == WatchPhase::Stopped {
                    break;
                }
            }
        }
    }

    let final_session = handle.wait().await;
    state.session_manager.cancel_current_watch().await;

    match final_session.status {
        PaymentStatus::Completed => {
            tracing::info!(订单ID = %final_session.order_id, "支付完成,退出");
            ExitCode::SUCCESS
        }
        PaymentStatus::Error => {
            report_failure(&final_session);
            ExitCode::from(1)
        }
        // 被取消或参数缺失,未达终态
        _ => ExitCode::from(2),
    }
}

/// 推送状态事件 (展示层接入点: 事件以JSON整体落入日志管道)
fn report_session(session: &OrderSession, hint_logged: &mut bool) {
    let event = OrderStatusEvent::from_session(session);
    match serde_json::to_string(&event) {
        Ok(payload) => tracing::info!(event = %payload, "订单状态事件"),
        Err(e) => tracing::error!(error = %e, "状态事件序列化失败"),
    }

    if let Some(snapshot) = &session.snapshot {
        let now_ms = Utc::now().timestamp_millis();
        tracing::info!(
            订单ID = %session.order_id,
            状态 = ?session.status,
            过期时间 = %time_utils::format_timestamp(snapshot.expired_time, time_utils::DEFAULT_TIME_PATTERN),
            剩余时间 = %session.remaining_display(now_ms),
            "订单状态更新"
        );

        // 支付指引只在首次待支付快照时输出一次
        if !*hint_logged && session.status == PaymentStatus::Pending {
            tracing::info!(
                提示 = %snapshot.fill_payment_hint(PAYMENT_HINT_TEMPLATE),
                "支付指引"
            );
            *hint_logged = true;
        }
    }
}

/// 推送订单失败事件
fn report_failure(session: &OrderSession) {
    let event = OrderErrorEvent::new(
        session.order_id.clone(),
        "order_failed".to_string(),
        "订单支付失败".to_string(),
    );
    match serde_json::to_string(&event) {
        Ok(payload) => tracing::error!(event = %payload, "订单错误事件"),
        Err(e) => tracing::error!(error = %e, "错误事件序列化失败"),
    }
}
