use chrono::{DateTime, SecondsFormat, Utc};

/// 转换为对外输出的 ISO-8601 时间字符串（UTC，毫秒精度）
pub fn to_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_iso8601() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 5).unwrap();
        assert_eq!(to_iso8601(&dt), "2025-03-01T08:30:05.000Z");
    }
}
