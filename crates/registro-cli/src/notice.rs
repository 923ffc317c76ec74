//! Transient notifications shown over the status bar.

use std::time::{Duration, Instant};

/// How long a notification stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Success,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub kind:   NoticeKind,
  pub text:   String,
  pub posted: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Notices {
  items: Vec<Notice>,
}

impl Notices {
  pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>, now: Instant) {
    tracing::debug!(?kind, "notice posted");
    self.items.push(Notice { kind, text: text.into(), posted: now });
  }

  pub fn success(&mut self, text: impl Into<String>) { self.push(NoticeKind::Success, text, Instant::now()); }

  pub fn error(&mut self, text: impl Into<String>) { self.push(NoticeKind::Error, text, Instant::now()); }

  /// Drop every notice older than [`NOTICE_TTL`].
  pub fn prune(&mut self, now: Instant) {
    self.items.retain(|n| now.saturating_duration_since(n.posted) < NOTICE_TTL);
  }

  /// The most recent notice, if any is still live.
  pub fn latest(&self) -> Option<&Notice> { self.items.last() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}
