//! 工具模块
//!
//! 无状态的纯函数工具:
//! - `logger`: 日志系统初始化
//! - `time_utils`: 时间戳格式化与倒计时计算
//! - `string_utils`: 模板占位符替换与字符串校验

pub mod logger;
pub mod string_utils;
pub mod time_utils;
