use crate::models::MediaNode;

/// Rounds to the nearest integer with halves going up (`2.5 -> 3`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Mean `uptime_percent` across `nodes`, rounded to an integer. Empty input yields 0.
pub fn average_uptime(nodes: &[MediaNode]) -> i64 {
    if nodes.is_empty() {
        return 0;
    }
    let total: f64 = nodes.iter().map(|n| n.uptime_percent).sum();
    round_half_up(total / nodes.len() as f64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_uptime(uptime_percent: f64) -> MediaNode {
        MediaNode {
            uptime_percent,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_set_averages_to_zero() {
        assert_eq!(average_uptime(&[]), 0);
    }

    #[test]
    fn test_average_is_rounded_mean() {
        assert_eq!(average_uptime(&[with_uptime(80.0), with_uptime(100.0)]), 90);
        assert_eq!(average_uptime(&[with_uptime(99.4), with_uptime(99.7)]), 100);
        assert_eq!(average_uptime(&[with_uptime(0.0), with_uptime(1.0)]), 1);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }
}
