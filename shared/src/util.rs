/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Prefix of every order number
pub const ORDER_NUMBER_PREFIX: &str = "PB";

/// Build an order number from an epoch-millis timestamp.
///
/// Keeps the last 6 digits of the timestamp; numbers repeat every 1000
/// seconds and are not checked for uniqueness.
pub fn order_number_at(millis: i64) -> String {
    let digits = millis.to_string();
    let start = digits.len().saturating_sub(6);
    format!("{}{}", ORDER_NUMBER_PREFIX, &digits[start..])
}

/// Time-derived identifier (epoch millis as a string)
pub fn time_id() -> String {
    now_millis().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_keeps_last_six_digits() {
        assert_eq!(order_number_at(1_760_617_234_567), "PB234567");
        assert_eq!(order_number_at(1_000_000_000_042), "PB000042");
    }

    #[test]
    fn test_order_number_short_timestamp() {
        assert_eq!(order_number_at(1234), "PB1234");
    }

    #[test]
    fn test_order_number_for_now_shape() {
        let n = order_number_at(now_millis());
        assert!(n.starts_with("PB"));
        assert_eq!(n.len(), 8);
        assert!(n[2..].chars().all(|c| c.is_ascii_digit()));
    }
}
