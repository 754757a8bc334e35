use std::time::Duration;

use crate::color_match::{decode_hex, Rgb};

pub const ENV_COLOR: &str = "HUECATCH_COLOR";
pub const ENV_TOAST_MS: &str = "HUECATCH_TOAST_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub initial_color: Rgb,
    pub toast_duration: Duration,
    /// `RUST_LOG` 未设置时使用
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Huecatch".into(),
            window_size: [420.0, 640.0],
            initial_color: Rgb::new(0x3b, 0x82, 0xf6),
            toast_duration: Duration::from_secs(2),
            log_filter: "info".into(),
        }
    }
}

impl AppConfig {
    /// 默认值 + 环境变量覆盖；非法值记录警告后忽略
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(hex) = lookup(ENV_COLOR) {
            match decode_hex(hex.trim()) {
                Ok(rgb) => self.initial_color = rgb,
                Err(e) => tracing::warn!(var = ENV_COLOR, value = %hex, error = %e, "ignoring override"),
            }
        }
        if let Some(ms) = lookup(ENV_TOAST_MS) {
            match ms.trim().parse::<u64>() {
                Ok(ms) => self.toast_duration = Duration::from_millis(ms),
                Err(e) => tracing::warn!(var = ENV_TOAST_MS, value = %ms, error = %e, "ignoring override"),
            }
        }
        self
    }
}
