use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::utils::string_utils::template_replace;

/// 订单查询参数
///
/// 订单号与查询授权值均来自托管页URL的查询参数。
/// 授权值是与登录凭证无关的不透明参数,线上接口的字段名即为 `e`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOrderParams {
    /// 订单号
    #[serde(rename = "orderId")]
    pub order_id: String,

    /// 查询授权值
    #[serde(rename = "e")]
    pub access_token: String,
}

impl QueryOrderParams {
    pub fn new(order_id: String, access_token: String) -> Self {
        Self {
            order_id,
            access_token,
        }
    }
}

/// 订单快照
///
/// 收银台后端返回的订单最新状态,每次轮询整体替换,不做增量合并。
/// 除 `status` 与 `expired_time` 参与控制流外,其余字段均为
/// 支付指引的透传展示数据,本核心不解释其内容。
/// 字段使用camelCase以对齐线上接口。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    /// 订单号 (会话期内稳定)
    pub order_id: String,

    /// 原始状态码
    ///
    /// 语义: 0=等待支付, 2=已检测到支付/确认中, 1=已完成, -1=失败。
    /// 其余取值按待支付处理,映射见 `PaymentStatus::from_code`。
    pub status: i64,

    /// 订单过期时间 (epoch毫秒)
    ///
    /// 仅用于倒计时展示,本核心不做过期判定
    #[serde(default)]
    pub expired_time: Option<i64>,

    /// 收款地址
    pub address: String,

    /// 链名称 (如 "BNB Smart Chain")
    pub chain_name: String,

    /// 链ID
    #[serde(default)]
    pub chain_id: Option<i64>,

    /// 代币ID
    #[serde(default)]
    pub token_id: Option<i64>,

    /// 代币名称 (如 "USDT")
    pub token_name: String,

    /// 代币合约地址
    pub contract_address: String,

    /// 支付数量
    pub quantity: String,

    /// 代币单价
    ///
    /// 线上接口可能返回数字或字符串,原样透传
    #[serde(default)]
    pub token_price: Option<Value>,

    /// 商户名称
    #[serde(default)]
    pub partner_name: Option<String>,

    /// 订单备注
    #[serde(default)]
    pub remark: Option<String>,

    /// 外部订单号
    #[serde(default)]
    pub out_order_id: Option<String>,

    /// 商户Logo地址
    #[serde(default)]
    pub logo: Option<String>,

    /// 语言标识
    #[serde(default)]
    pub lang: Option<String>,

    /// 交易哈希 (线上接口为数字类型)
    #[serde(default)]
    pub tx_hash: Option<i64>,
}

impl OrderSnapshot {
    /// 填充支付指引文案
    ///
    /// 模板由展示层提供,占位符取值于快照的支付指引字段:
    /// `{orderId}` `{chainName}` `{tokenName}` `{quantity}` `{address}`。
    /// 未识别的占位符原样保留,交由展示层兜底。
    pub fn fill_payment_hint(&self, template: &str) -> String {
        let variables = HashMap::from([
            ("orderId".to_string(), self.order_id.clone()),
            ("chainName".to_string(), self.chain_name.clone()),
            ("tokenName".to_string(), self.token_name.clone()),
            ("quantity".to_string(), self.quantity.clone()),
            ("address".to_string(), self.address.clone()),
        ]);
        template_replace(template, &variables)
    }
}
