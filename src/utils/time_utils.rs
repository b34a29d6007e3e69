use chrono::{DateTime, Datelike, Timelike, Utc};

/// 时间缺省占位符
///
/// 时间戳缺失、为0或超出可表示范围时的统一展示值
pub const TIME_PLACEHOLDER: &str = "--";

/// 默认时间展示格式
pub const DEFAULT_TIME_PATTERN: &str = "YYYY-MM-DD HH:mm:ss";

/// 格式化毫秒时间戳为可读时间 (UTC)
///
/// 模式语言: `YYYY` 四位年份, `MM` `DD` `HH` `mm` `ss` 两位补零。
/// 时间戳缺失或为0时返回 "--",任何输入都不会panic。
///
/// 例: format_timestamp(Some(1770000000000), "YYYY-MM-DD HH:mm:ss")
///     → "2026-02-02 02:40:00"
pub fn format_timestamp(timestamp_ms: Option<i64>, pattern: &str) -> String {
    let ts = match timestamp_ms {
        Some(t) if t != 0 => t,
        _ => return TIME_PLACEHOLDER.to_string(),
    };

    let dt = match DateTime::<Utc>::from_timestamp_millis(ts) {
        Some(dt) => dt,
        // 超出chrono可表示范围的极端值同样按缺省处理
        None => return TIME_PLACEHOLDER.to_string(),
    };

    pattern
        .replace("YYYY", &format!("{:04}", dt.year()))
        .replace("MM", &format!("{:02}", dt.month()))
        .replace("DD", &format!("{:02}", dt.day()))
        .replace("HH", &format!("{:02}", dt.hour()))
        .replace("mm", &format!("{:02}", dt.minute()))
        .replace("ss", &format!("{:02}", dt.second()))
}

/// 计算距离目标时刻的剩余秒数
///
/// `max(0, floor((timestamp - now) / 1000))`,永不为负。
/// 用于前端倒计时展示。
pub fn remaining_seconds(timestamp_ms: i64, now_ms: i64) -> i64 {
    ((timestamp_ms - now_ms) / 1000).max(0)
}

/// 格式化秒数为 "HH:MM:SS"
///
/// 小时不设上限,不做按天折算。
pub fn format_duration(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// 剩余时间的倒计时展示
///
/// `format_duration(remaining_seconds(t, now))` 的组合;
/// 时间戳缺失或为0时返回 "--"。
pub fn remaining_duration(timestamp_ms: Option<i64>, now_ms: i64) -> String {
    let ts = match timestamp_ms {
        Some(t) if t != 0 => t,
        _ => return TIME_PLACEHOLDER.to_string(),
    };
    format_duration(remaining_seconds(ts, now_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_default_pattern() {
        // 2026-02-02 02:40:00 UTC
        let formatted = format_timestamp(Some(1_770_000_000_000), DEFAULT_TIME_PATTERN);
        assert_eq!(formatted, "2026-02-02 02:40:00");
    }

    #[test]
    fn test_format_timestamp_pads_single_digits() {
        // 2025-01-05 09:00:07 UTC
        let formatted = format_timestamp(Some(1_736_067_607_000), DEFAULT_TIME_PATTERN);
        assert_eq!(formatted, "2025-01-05 09:00:07");
    }

    #[test]
    fn test_format_timestamp_partial_pattern() {
        let formatted = format_timestamp(Some(1_770_000_000_000), "HH:mm");
        assert_eq!(formatted, "02:40");
    }

    #[test]
    fn test_format_timestamp_absent_returns_placeholder() {
        assert_eq!(format_timestamp(None, DEFAULT_TIME_PATTERN), "--");
        assert_eq!(format_timestamp(Some(0), DEFAULT_TIME_PATTERN), "--");
    }

    #[test]
    fn test_format_timestamp_out_of_range_returns_placeholder() {
        assert_eq!(format_timestamp(Some(i64::MAX), DEFAULT_TIME_PATTERN), "--");
    }

    #[test]
    fn test_remaining_seconds_positive() {
        assert_eq!(remaining_seconds(10_000, 4_000), 6);
        // 向下取整
        assert_eq!(remaining_seconds(10_999, 4_000), 6);
    }

    #[test]
    fn test_remaining_seconds_never_negative() {
        assert_eq!(remaining_seconds(4_000, 10_000), 0);
        assert_eq!(remaining_seconds(10_000, 10_000), 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(0), "00:00:00");
    }

    #[test]
    fn test_format_duration_unbounded_hours() {
        // 100小时,不折算为天
        assert_eq!(format_duration(360_000), "100:00:00");
    }

    #[test]
    fn test_remaining_duration_composition() {
        assert_eq!(remaining_duration(Some(3_661_000), 0), "01:01:01");
        assert_eq!(remaining_duration(None, 0), "--");
        assert_eq!(remaining_duration(Some(0), 0), "--");
    }

    #[test]
    fn test_remaining_duration_expired_shows_zero() {
        assert_eq!(remaining_duration(Some(1_000), 99_000), "00:00:00");
    }
}
