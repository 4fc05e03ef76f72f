//! Transient user notifications

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A message shown to the user for a short while
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(message.into(), ToastKind::Success, duration)
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self::new(message.into(), ToastKind::Error, duration)
    }

    fn new(message: String, kind: ToastKind, duration: Duration) -> Self {
        match kind {
            ToastKind::Success => log::info!("{message}"),
            ToastKind::Error => log::warn!("{message}"),
        }
        Self {
            message,
            kind,
            shown_at: Instant::now(),
            duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= self.duration
    }
}
