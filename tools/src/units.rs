//! Human-readable byte sizes for listings.

use anyhow::Result;

const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * MB;

/// Format a byte count in MB, or GB from 1 GB up, with three
/// significant digits below 100 and whole units from 100 up.
pub fn bytes_to_human_units(bytes: i64) -> Result<String> {
    if bytes < 0 {
        anyhow::bail!("byte count can't be negative: {bytes}");
    }

    let bytes = bytes as f64;
    let (value, unit) = if bytes >= GB { (bytes / GB, "GB") } else { (bytes / MB, "MB") };

    let decimals = if value == 0.0 {
        2
    } else if value >= 100.0 {
        0
    } else if value >= 10.0 {
        1
    } else if value >= 1.0 {
        2
    } else {
        (2 - value.log10().floor() as i32) as usize
    };
    Ok(format!("{value:.decimals$} {unit}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb(n: f64) -> i64 {
        (n * MB) as i64
    }

    fn gb(n: f64) -> i64 {
        (n * GB) as i64
    }

    fn human(bytes: i64) -> String {
        bytes_to_human_units(bytes).expect("non-negative input")
    }

    #[test]
    fn small_sizes_keep_three_significant_digits() {
        assert_eq!(human(0), "0.00 MB");
        assert_eq!(human(5237), "0.00499 MB");
        assert_eq!(human(5242), "0.00500 MB");
        assert_eq!(human(mb(0.998)), "0.998 MB");
    }

    #[test]
    fn megabytes_round_by_magnitude() {
        assert_eq!(human(mb(1.001)), "1.00 MB");
        assert_eq!(human(mb(1.006)), "1.01 MB");
        assert_eq!(human(mb(2.10)), "2.10 MB");
        assert_eq!(human(mb(23.7)), "23.7 MB");
        assert_eq!(human(mb(100.49)), "100 MB");
        assert_eq!(human(mb(100.51)), "101 MB");
        assert_eq!(human(mb(1023.0)), "1023 MB");
    }

    #[test]
    fn gigabytes_from_one_gb_up() {
        assert_eq!(human(gb(1.0)), "1.00 GB");
        assert_eq!(human(gb(10.0)), "10.0 GB");
        assert_eq!(human(gb(1234.4)), "1234 GB");
        assert_eq!(human(gb(123456.0)), "123456 GB");
    }

    #[test]
    fn negative_sizes_are_rejected() {
        assert!(bytes_to_human_units(-1).is_err());
    }
}
