//! 订单状态轮询
//!
//! 核心职责:
//! - 以固定节奏重复查询订单状态,直到到达终态
//! - 每次成功查询整体替换会话快照,失败查询不触碰既有快照
//! - 通过watch通道向展示层发布最新会话,读写无部分状态
//! - 参数缺失时保持空闲,不产生任何网络活动

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::models::{OrderSession, QueryOrderParams};
use crate::services::cashier_api::OrderQuery;
use crate::utils::string_utils::is_valid_string;

/// 订单状态轮询器
///
/// 只依赖 `OrderQuery` 接口与轮询间隔,便于注入Mock实现独立测试。
pub struct OrderWatcher {
    api: Arc<dyn OrderQuery>,
    poll_interval: Duration,
}

/// 轮询句柄
///
/// 持有轮询任务的观察通道与取消令牌。
/// 消费方废弃句柄前必须调用 `stop()`,避免遗留周期任务。
pub struct WatchHandle {
    updates: watch::Receiver<OrderSession>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl WatchHandle {
    /// 当前会话快照
    pub fn session(&self) -> OrderSession {
        self.updates.borrow().clone()
    }

    /// 订阅会话更新
    ///
    /// 轮询任务结束后发送端关闭,`changed()` 返回Err,
    /// 消费方以此感知流的自然终结。
    pub fn subscribe(&self) -> watch::Receiver<OrderSession> {
        self.updates.clone()
    }

    /// 停止轮询
    ///
    /// 立即取消挂起的定时等待;在途请求不被中断,
    /// 但其迟到的结果会被丢弃而非落入会话。
    /// 幂等,重复调用与对空闲句柄调用均安全。
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// 取消令牌的副本 (交由会话管理器统一看护)
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 等待轮询任务结束,返回最终会话
    ///
    /// 终态、取消均会使任务退出;空闲句柄立即返回。
    pub async fn wait(mut self) -> OrderSession {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        self.updates.borrow().clone()
    }
}

impl OrderWatcher {
    /// 创建新的轮询器
    ///
    /// # 参数
    /// - `api`: 订单查询协作者
    /// - `poll_interval`: 轮询间隔,默认值见 `DEFAULT_POLL_INTERVAL_MS`
    pub fn new(api: Arc<dyn OrderQuery>, poll_interval: Duration) -> Self {
        Self { api, poll_interval }
    }

    /// 启动订单状态轮询
    ///
    /// 立即发出首次查询,此后每个间隔一次,结果落地后若派生状态
    /// 已是终态 (Completed/Error) 则停止调度,同一会话不会再产生
    /// 新的定时器。
    ///
    /// # 前置条件
    /// 订单号或授权值为空时不产生任何网络活动,返回的句柄
    /// 停留在 `WatchPhase::Idle`。这是约定的静默行为,不是错误。
    ///
    /// # 并发约定
    /// 查询串行化: 下一次调度永远在上一次结果落地之后,慢响应
    /// 顺延下一拍而不是与之重叠。
    pub fn start(&self, params: QueryOrderParams) -> WatchHandle {
        if !is_valid_string(Some(&params.order_id)) || !is_valid_string(Some(&params.access_token))
        {
            tracing::warn!(
                订单ID = %params.order_id,
                "订单参数缺失,轮询保持空闲"
            );
            let (_tx, updates) = watch::channel(OrderSession::idle(params.order_id));
            return WatchHandle {
                updates,
                cancel: CancellationToken::new(),
                task: None,
            };
        }

        let session = OrderSession::new(params.order_id.clone());
        let (tx, updates) = watch::channel(session.clone());
        let cancel = CancellationToken::new();

        let api = Arc::clone(&self.api);
        let token = cancel.clone();
        let interval = self.poll_interval;
        let task = tokio::spawn(async move {
            poll_loop(api, params, session, tx, token, interval).await;
        });

        WatchHandle {
            updates,
            cancel,
            task: Some(task),
        }
    }
}

/// 轮询主循环
///
/// 生命周期: Polling -> Stopped,退出路径只有两条:
/// 派生状态到达终态,或取消令牌生效。
async fn poll_loop(
    api: Arc<dyn OrderQuery>,
    params: QueryOrderParams,
    mut session: OrderSession,
    tx: watch::Sender<OrderSession>,
    cancel: CancellationToken,
    interval: Duration,
) {
    tracing::info!(
        订单ID = %params.order_id,
        会话ID = %session.session_id,
        间隔毫秒 = %interval.as_millis(),
        "订单状态轮询启动"
    );

    loop {
        // 在途请求与取消竞争: stop()后迟到的响应被丢弃,不再落入会话
        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = api.query_order(&params) => result,
        };

        match result {
            Ok(snapshot) => {
                session.apply_snapshot(snapshot);
                let reached_final = session.is_final();
                if reached_final {
                    session.mark_stopped();
                }
                let _ = tx.send(session.clone());

                if reached_final {
                    tracing::info!(
                        订单ID = %session.order_id,
                        最终状态 = ?session.status,
                        "订单到达终态,停止轮询"
                    );
                    return;
                }

                tracing::debug!(
                    订单ID = %session.order_id,
                    状态 = ?session.status,
                    "订单状态已更新"
                );
            }
            Err(e) => {
                // 瞬时失败: 快照与派生状态保持原样,按节奏继续重试
                tracing::warn!(
                    订单ID = %params.order_id,
                    error = %e,
                    "订单查询失败,保留既有快照"
                );
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    session.mark_stopped();
    let _ = tx.send(session.clone());
    tracing::info!(订单ID = %session.order_id, "订单状态轮询已取消");
}
