use std::time::{Duration, Instant};

/// 短暂提示：再次 `show` 会取消上一次的自动消失并重新计时
pub struct Toast {
    pub message: String,
    pub duration: Duration,
    shown_at: Option<Instant>,
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self { message: String::new(), duration, shown_at: None }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.message = message.into();
        self.shown_at = Some(now);
    }

    pub fn dismiss(&mut self) {
        self.shown_at = None;
    }

    /// 距离自动消失还剩多久；已消失返回 None
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let shown = self.shown_at?;
        let elapsed = now.saturating_duration_since(shown);
        self.duration.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.remaining(now).is_some()
    }

    /// 过期后清理状态，返回当前是否可见
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.shown_at.is_some() && !self.is_visible(now) {
            self.dismiss();
        }
        self.shown_at.is_some()
    }
}
