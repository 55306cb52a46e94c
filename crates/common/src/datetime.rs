/// Unix timestamp in seconds
pub type UnixDateTime = i64;

pub const DAY_SECONDS: i64 = 86400;

pub struct DateTime;

impl DateTime {
    pub fn now() -> UnixDateTime {
        chrono::Utc::now().timestamp()
    }
    pub fn now_millis() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Durations are configured in whole days, stored in seconds
pub fn days_to_seconds(days: u32) -> i64 {
    days as i64 * DAY_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_to_seconds() {
        assert_eq!(days_to_seconds(0), 0);
        assert_eq!(days_to_seconds(3), 259200);
        assert_eq!(days_to_seconds(30), 2592000);
    }
}
