//! 加密货币支付收银台 - 订单状态轮询核心
//!
//! 给定订单号与查询授权值,以固定节奏查询收银台后端的订单状态,
//! 从原始状态码派生四态支付状态 (待支付/确认中/已完成/失败),
//! 到达终态后停止调度,并通过watch通道向展示层发布最新订单快照。
//!
//! 展示层 (二维码渲染、倒计时、复制支付信息) 消费本核心的输出,
//! 不在本crate职责范围内。

pub mod models;
pub mod services;
pub mod state;
pub mod utils;
