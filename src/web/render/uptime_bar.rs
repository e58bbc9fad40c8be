use serde::Serialize;

use crate::services::aggregate::round_half_up;

/// Fill at or above this percentage is drawn as healthy. Deliberately
/// independent of the 95% online threshold.
pub const HEALTHY_THRESHOLD: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarTone {
    Healthy,
    Degraded,
}

/// Horizontal percentage track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UptimeBar {
    pub percent: u8,
    pub tone: BarTone,
    pub label: String,
}

/// `round(clamp(p, 0, 100))`, with NaN drawn as an empty track.
pub fn display_percent(percent: f64) -> u8 {
    if percent.is_nan() {
        return 0;
    }
    round_half_up(percent.clamp(0.0, 100.0)) as u8
}

impl UptimeBar {
    pub fn new(percent: f64, locale: &str) -> Self {
        let percent = display_percent(percent);
        let tone = if percent >= HEALTHY_THRESHOLD {
            BarTone::Healthy
        } else {
            BarTone::Degraded
        };
        Self {
            percent,
            tone,
            label: t!("bar.label", locale = locale, value = percent).into_owned(),
        }
    }
}
