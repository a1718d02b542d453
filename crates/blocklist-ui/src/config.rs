//! UI timing configuration.

use crate::toast::DEFAULT_TOAST_DURATION;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// How long a toast stays visible
    #[serde(default = "default_toast_duration", with = "humantime_serde")]
    pub toast_duration: Duration,

    /// Delay between a successful block and the list refresh
    #[serde(default = "default_refresh_delay", with = "humantime_serde")]
    pub refresh_delay: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration: default_toast_duration(),
            refresh_delay: default_refresh_delay(),
        }
    }
}

fn default_toast_duration() -> Duration {
    DEFAULT_TOAST_DURATION
}

fn default_refresh_delay() -> Duration {
    Duration::from_millis(800)
}
