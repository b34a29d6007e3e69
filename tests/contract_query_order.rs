//! 订单查询契约测试
//!
//! 验证订单查询接口符合线上契约,包括:
//! - 请求参数的线上字段名 (orderId / e)
//! - 订单快照的完整字段集与宽松反序列化
//! - 状态码到支付状态的派生映射 (含未定义取值的兜底)
//! - 失败与快照可区分,不会以空快照冒充成功
//!
//! 注意: 本文件使用 Mock 实现验证契约,不依赖真实收银台后端

mod common;

use common::{snapshot_with_status, MockCashierApi};

use cashier_order::models::{ApiError, OrderSnapshot, PaymentStatus, QueryOrderParams};
use cashier_order::services::OrderQuery;

/// 测试查询参数的线上字段名
///
/// 契约要求:
/// 1. 订单号序列化为 "orderId"
/// 2. 授权值序列化为 "e" (线上接口的历史字段名)
/// 3. 不携带多余字段
#[test]
fn test_query_params_wire_contract() {
    let params = QueryOrderParams::new("00001413410001ABa".to_string(), "e_token_abc".to_string());
    let json = serde_json::to_value(&params).unwrap();

    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["orderId"], "00001413410001ABa");
    assert_eq!(object["e"], "e_token_abc");
}

/// 测试完整快照载荷的反序列化
///
/// 契约要求:
/// 1. 所有线上字段按camelCase解析
/// 2. tokenPrice 兼容数字与字符串两种形态
#[test]
fn test_snapshot_full_payload() {
    let raw = r#"{
        "chainName": "BNB Smart Chain",
        "address": "0xCF1439F146F9D9C53bb9A65Dfd0AF5A7b8418AFb",
        "quantity": "100.01",
        "tokenId": 1,
        "orderId": "00001413410001ABa",
        "partnerName": "SkyPay",
        "tokenName": "USDT",
        "contractAddress": "0x55d398326f99059fF775485246999027B3197955",
        "remark": "",
        "expiredTime": 1770000000000,
        "chainId": 56,
        "outOrderId": "ext-42",
        "logo": "https://example.com/logo.png",
        "lang": "zh-CN",
        "txHash": 0,
        "status": 0,
        "tokenPrice": 1.0002
    }"#;

    let snapshot: OrderSnapshot = serde_json::from_str(raw).unwrap();
    assert_eq!(snapshot.order_id, "00001413410001ABa");
    assert_eq!(snapshot.chain_id, Some(56));
    assert_eq!(snapshot.quantity, "100.01");
    assert_eq!(snapshot.expired_time, Some(1_770_000_000_000));

    // tokenPrice数字形态
    assert_eq!(snapshot.token_price, Some(serde_json::Value::from(1.0002)));

    // tokenPrice字符串形态同样可解析
    let raw_string_price = raw.replace("1.0002", "\"1.0002\"");
    let snapshot: OrderSnapshot = serde_json::from_str(&raw_string_price).unwrap();
    assert_eq!(
        snapshot.token_price,
        Some(serde_json::Value::from("1.0002"))
    );
}

/// 测试状态码派生映射
///
/// 契约要求 (对每次更新应用同一规则):
/// - 1 -> Completed, 2 -> Confirming, -1 -> Error
/// - 其余任意整数 (含0与未定义取值) -> Pending
#[test]
fn test_status_derivation_table() {
    let cases = [
        (1, PaymentStatus::Completed),
        (2, PaymentStatus::Confirming),
        (-1, PaymentStatus::Error),
        (0, PaymentStatus::Pending),
        (3, PaymentStatus::Pending),
        (7, PaymentStatus::Pending),
        (-2, PaymentStatus::Pending),
        (-99, PaymentStatus::Pending),
        (i64::MAX, PaymentStatus::Pending),
        (i64::MIN, PaymentStatus::Pending),
    ];

    for (code, expected) in cases {
        assert_eq!(
            PaymentStatus::from_code(code),
            expected,
            "状态码 {} 的派生结果不符",
            code
        );
    }
}

/// 测试失败与快照可区分
///
/// 契约要求:
/// 网络失败必须以 Err 形态返回,与"订单尚未到达终态"的
/// 正常快照可区分,调用方据此保留上一份快照重试
#[tokio::test]
async fn test_failure_distinguishable_from_snapshot() {
    let api = MockCashierApi::new();
    api.push_error(ApiError::NetworkFailed("连接超时".to_string()))
        .await;
    api.push_status(0).await;

    let params = QueryOrderParams::new("order_1".to_string(), "token".to_string());

    let first = api.query_order(&params).await;
    assert!(matches!(first, Err(ApiError::NetworkFailed(_))));

    let second = api.query_order(&params).await.unwrap();
    assert_eq!(second.status, 0);
    assert_eq!(api.call_count(), 2);
}

/// 测试业务失败的错误分类
///
/// 契约要求:
/// code非0的响应以 BusinessFailed 形态交付,携带后端的code与msg
#[tokio::test]
async fn test_business_failure_carries_code_and_msg() {
    let api = MockCashierApi::new();
    api.push_error(ApiError::BusinessFailed {
        code: 1001,
        msg: "订单不存在".to_string(),
    })
    .await;

    let params = QueryOrderParams::new("order_missing".to_string(), "token".to_string());
    let result = api.query_order(&params).await;

    match result {
        Err(ApiError::BusinessFailed { code, msg }) => {
            assert_eq!(code, 1001);
            assert_eq!(msg, "订单不存在");
        }
        other => panic!("预期业务失败,实际: {:?}", other.map(|s| s.order_id)),
    }
}

/// 测试快照的派生状态与原始状态码一致
#[test]
fn test_snapshot_status_roundtrip() {
    for code in [-1, 0, 1, 2, 5] {
        let snapshot = snapshot_with_status(code);
        assert_eq!(snapshot.status, code);
    }
}
