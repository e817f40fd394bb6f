//! Human-readable byte counts for error messages.

const UNITS: [&str; 9] = ["bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Formats a byte count using base-1024 units.
///
/// The unit is `floor(log1024(bytes))`, clamped to the unit table. The scaled value is
/// rounded to `decimals` places, halves away from zero, and trailing zeros are dropped,
/// so `1024` formats as
/// `"1 KB"` and `1536` as `"1.5 KB"`. Zero formats as `"0 bytes"`.
pub fn eval_size(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 bytes".to_string();
    }

    // Integer division keeps exact powers of 1024 on the right unit.
    let mut exponent = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && exponent < UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }

    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    // Ties round up (1.125 -> 1.13); `format!` alone would round them to even.
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    let formatted = format!("{rounded:.decimals$}");
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    format!("{} {}", trimmed, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(eval_size(0, 2), "0 bytes");
    }

    #[test]
    fn test_below_one_kilobyte() {
        assert_eq!(eval_size(1, 2), "1 bytes");
        assert_eq!(eval_size(1023, 2), "1023 bytes");
    }

    #[test]
    fn test_exact_units() {
        assert_eq!(eval_size(1024, 2), "1 KB");
        assert_eq!(eval_size(1024 * 1024, 2), "1 MB");
        assert_eq!(eval_size(1024u64.pow(3), 2), "1 GB");
        assert_eq!(eval_size(1024u64.pow(6), 2), "1 EB");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(eval_size(1536, 2), "1.5 KB");
        assert_eq!(eval_size(1500, 2), "1.46 KB");
        assert_eq!(eval_size(1500, 0), "1 KB");
        assert_eq!(eval_size(5 * 1024 * 1024 + 512 * 1024, 1), "5.5 MB");
    }

    #[test]
    fn test_ties_round_up() {
        assert_eq!(eval_size(1152, 2), "1.13 KB");
        assert_eq!(eval_size(1664, 2), "1.63 KB");
        assert_eq!(eval_size(2560, 0), "3 KB");
    }

    #[test]
    fn test_size_message_uses_tie_rounding() {
        let error = crate::ValidationError::SizeExceeded {
            index: 0,
            max_size: 1152,
            value: 2048,
        };
        assert_eq!(error.message(), "The size should be less than 1.13 KB!");
    }

    #[test]
    fn test_largest_value() {
        assert_eq!(eval_size(u64::MAX, 2), "16 EB");
    }
}
