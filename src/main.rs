#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use eframe::{egui, NativeOptions};
use tracing_subscriber::EnvFilter;

mod app;
mod color_match;
mod config;
mod error;
mod palette;
mod toast;

use config::AppConfig;

/// 程序入口：基于 eframe/egui 的取色匹配窗口
fn main() -> eframe::Result<()> {
    // RUST_LOG 优先，否则使用默认过滤级别
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(AppConfig::default().log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    let title = config.title.clone();
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.as_str())
            .with_inner_size(config.window_size),
        ..Default::default()
    };
    tracing::info!(color = %config.initial_color.to_hex(), toast_ms = config.toast_duration.as_millis() as u64, "starting");
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Box::new(app::MatchApp::new(cc, config))),
    )
}
