use std::time::Instant;

use eframe::egui::{self, Color32, Context, CursorIcon, RichText, Sense, Stroke};
use egui_extras::{Column, TableBuilder};

use crate::color_match::{decode_hex, match_palette, MatchedColor, Rgb};
use crate::config::AppConfig;
use crate::error::PaletteError;
use crate::palette::Palette;
use crate::toast::Toast;

/// 颜色从哪个输入框来：来源自身的内容不被回写，避免编辑中途被规范化
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ColorSource {
    Picker,
    HexField,
    Startup,
}

pub struct MatchApp {
    pub palette: Palette,
    pub current: Rgb,
    // UI state
    pub picker: [u8; 3],
    pub hex_text: String,
    pub hex_error: Option<String>,
    pub matches: Vec<MatchedColor>,
    pub toast: Toast,
    pub status: String,
}

impl MatchApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        setup_theme(&cc.egui_ctx);
        Self::from_loaded(Palette::builtin(), &config)
    }

    /// 加载失败时以空调色板继续运行，错误写入状态栏
    pub fn from_loaded(loaded: Result<Palette, PaletteError>, config: &AppConfig) -> Self {
        let (palette, status) = match loaded {
            Ok(p) => {
                let degraded = p.validate();
                let status = if degraded.is_empty() {
                    format!("{} colors", p.len())
                } else {
                    format!("{} colors ({} without a usable hex value)", p.len(), degraded.len())
                };
                (p, status)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load builtin palette");
                (Palette::default(), format!("Failed to load palette: {}", e))
            }
        };
        let mut app = Self::with_palette(palette, config);
        app.status = status;
        app
    }

    pub fn with_palette(palette: Palette, config: &AppConfig) -> Self {
        let mut app = Self {
            palette,
            current: config.initial_color,
            picker: config.initial_color.to_array(),
            hex_text: String::new(),
            hex_error: None,
            matches: Vec::new(),
            toast: Toast::new(config.toast_duration),
            status: String::new(),
        };
        app.set_color(config.initial_color, ColorSource::Startup);
        app
    }

    /// 唯一的设色入口：同步两个输入控件并重新排序
    pub fn set_color(&mut self, rgb: Rgb, source: ColorSource) {
        self.current = rgb;
        if source != ColorSource::Picker {
            self.picker = rgb.to_array();
        }
        if source != ColorSource::HexField {
            self.hex_text = rgb.to_hex();
        }
        self.hex_error = None;
        self.matches = match_palette(rgb, &self.palette);
        tracing::debug!(color = %rgb.to_hex(), ?source, "color updated");
    }

    /// 十六进制输入框变更；无法解码时保留当前颜色。用户输入先去掉首尾空白
    pub fn on_hex_edited(&mut self) {
        match decode_hex(self.hex_text.trim()) {
            Ok(rgb) => self.set_color(rgb, ColorSource::HexField),
            Err(e) => self.hex_error = Some(e.to_string()),
        }
    }

    /// 选中第 `idx` 条结果：弹出提示并返回要写入剪贴板的名字
    pub fn copy_match(&mut self, idx: usize, now: Instant) -> Option<String> {
        let name = self.matches.get(idx)?.name.clone();
        self.toast.show(format!("Copied \"{}\" to the clipboard", name), now);
        tracing::debug!(%name, "copied color name");
        Some(name)
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if egui::color_picker::color_edit_button_srgb(ui, &mut self.picker).changed() {
                self.set_color(Rgb::from(self.picker), ColorSource::Picker);
            }
            let resp = ui.add(egui::TextEdit::singleline(&mut self.hex_text).desired_width(96.0).hint_text("#rrggbb"));
            if resp.changed() {
                self.on_hex_edited();
            }
            if resp.lost_focus() && self.hex_error.is_none() {
                // 失焦后规范化为 #rrggbb
                self.hex_text = self.current.to_hex();
            }
        });
        if let Some(err) = &self.hex_error {
            ui.label(RichText::new(err).small().color(Color32::from_rgb(220, 120, 120)));
        }
    }

    // 返回被点击的行号
    fn ui_matches(&self, ui: &mut egui::Ui) -> Option<usize> {
        let mut clicked = None;
        let row_height = 28.0;
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::exact(32.0))
            .column(Column::remainder().at_least(120.0))
            .column(Column::auto().at_least(64.0))
            .column(Column::auto().at_least(72.0))
            .header(20.0, |mut header| {
                header.col(|_| {});
                header.col(|ui| { ui.strong("Name"); });
                header.col(|ui| { ui.strong("Match"); });
                header.col(|ui| { ui.strong("Hex"); });
            })
            .body(|body| {
                body.rows(row_height, self.matches.len(), |mut row| {
                    let idx = row.index();
                    let m = &self.matches[idx];
                    row.col(|ui| {
                        if swatch(ui, m).clicked() { clicked = Some(idx); }
                    });
                    row.col(|ui| {
                        let resp = ui.add(egui::Label::new(m.name.as_str()).sense(Sense::click()))
                            .on_hover_cursor(CursorIcon::Copy)
                            .on_hover_text("Click to copy the name");
                        if resp.clicked() { clicked = Some(idx); }
                    });
                    row.col(|ui| { ui.label(format!("{:.2}%", m.percentage)); });
                    row.col(|ui| { ui.monospace(m.hex.as_str()); });
                });
            });
        clicked
    }

    fn ui_toast(&self, ctx: &Context) {
        egui::Area::new("toast".into())
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -32.0])
            .interactable(true)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    // 可选中文本：剪贴板不可用时可以手动复制
                    ui.add(egui::Label::new(self.toast.message.as_str()).selectable(true));
                });
            });
    }
}

fn swatch(ui: &mut egui::Ui, m: &MatchedColor) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(22.0, 22.0), Sense::click());
    let painter = ui.painter();
    let border = Stroke::new(2.0, Color32::from_gray(50));
    if m.valid {
        painter.rect_filled(rect, 2.0, Color32::from(m.rgb));
    } else {
        // hex 无法解码：画叉
        let cross = Stroke::new(1.5, Color32::from_rgb(200, 60, 60));
        painter.line_segment([rect.left_top(), rect.right_bottom()], cross);
        painter.line_segment([rect.right_top(), rect.left_bottom()], cross);
    }
    painter.rect_stroke(rect, 2.0, border);
    response.on_hover_cursor(CursorIcon::Copy)
}

fn setup_theme(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals::dark());
}

impl eframe::App for MatchApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        egui::TopBottomPanel::top("inputs").show(ctx, |ui| {
            ui.add_space(6.0);
            self.ui_inputs(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                if let Some(best) = self.matches.first() {
                    ui.separator();
                    ui.label(format!("Closest: {}", best.label()));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.palette.is_empty() {
                ui.centered_and_justified(|ui| { ui.label("No palette colors to match against"); });
                return;
            }
            if let Some(idx) = self.ui_matches(ui) {
                if let Some(name) = self.copy_match(idx, now) {
                    ctx.output_mut(|o| o.copied_text = name);
                }
            }
        });

        // 提示框计时：仅在可见期间安排一次到期重绘
        if self.toast.tick(now) {
            self.ui_toast(ctx);
            if let Some(left) = self.toast.remaining(now) {
                ctx.request_repaint_after(left);
            }
        }
    }
}
