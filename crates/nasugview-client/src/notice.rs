//! What screens show the user after a gesture: blocking alerts and
//! short-lived status lines.

use std::time::Duration;

use tokio::time::Instant;

use nasugview_shared::constants::STATUS_NOTICE_MS;

pub const STATUS_LIFETIME: Duration = Duration::from_millis(STATUS_NOTICE_MS);

pub const TITLE_ERROR: &str = "Error";
pub const TITLE_SUCCESS: &str = "Success";
pub const TITLE_FAILED: &str = "Failed";
pub const TITLE_LOGIN_FAILED: &str = "Login Failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Modal; stays until acknowledged.
    Alert { title: String, message: String },
    /// Inline; hidden once [`STATUS_LIFETIME`] has passed.
    Status(StatusNotice),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub message: String,
    pub shown_at: Instant,
}

impl StatusNotice {
    pub fn expires_at(&self) -> Instant {
        self.shown_at + STATUS_LIFETIME
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at()
    }
}

impl Notice {
    pub fn alert(title: &str, message: impl Into<String>) -> Self {
        Notice::Alert {
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn status(message: impl Into<String>) -> Self {
        Notice::Status(StatusNotice {
            message: message.into(),
            shown_at: Instant::now(),
        })
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Alert { message, .. } => message,
            Notice::Status(status) => &status.message,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, Notice::Alert { .. })
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        match self {
            Notice::Alert { .. } => true,
            Notice::Status(status) => status.is_visible_at(now),
        }
    }
}

/// The single notice slot each screen owns.
#[derive(Debug, Clone, Default)]
pub struct NoticeSlot {
    current: Option<Notice>,
}

impl NoticeSlot {
    pub fn show(&mut self, notice: Notice) {
        tracing::debug!(message = notice.message(), blocking = notice.is_blocking(), "notice");
        self.current = Some(notice);
    }

    /// The notice still on screen, if any.
    pub fn visible(&self) -> Option<&Notice> {
        let now = Instant::now();
        self.current.as_ref().filter(|n| n.is_visible_at(now))
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
