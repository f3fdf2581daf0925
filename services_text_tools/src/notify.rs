//! # Notifications
//!
//! Structured "toast" notifications and a status line for the text tool.
//!
//! Clipboard and export outcomes are reported here instead of being
//! printed. Time is logical: the tool advances the clock by one step per
//! applied action, and toasts expire after a number of steps.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of notifications to keep in history
const MAX_NOTIFICATION_HISTORY: usize = 50;

/// Unique identifier for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notif:{}", self.0)
    }
}

/// Notification severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationLevel::Info => write!(f, "INFO"),
            NotificationLevel::Success => write!(f, "SUCCESS"),
            NotificationLevel::Warning => write!(f, "WARNING"),
            NotificationLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A toast notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub level: NotificationLevel,
    pub message: String,
    /// Action that produced the notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Logical step at which the notification was created
    pub created_at: u64,
    /// Steps until the toast expires (0 means never)
    pub ttl_steps: u64,
    pub dismissed: bool,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        let ttl_steps = match level {
            NotificationLevel::Info | NotificationLevel::Success => 3,
            NotificationLevel::Warning => 5,
            NotificationLevel::Error => 10,
        };

        Self {
            id: NotificationId::new(),
            level,
            message: message.into(),
            source: None,
            created_at: 0,
            ttl_steps,
            dismissed: false,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_ttl(mut self, ttl_steps: u64) -> Self {
        self.ttl_steps = ttl_steps;
        self
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.ttl_steps != 0 && now >= self.created_at.saturating_add(self.ttl_steps)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Notification history plus the status line
#[derive(Debug)]
pub struct NotificationCenter {
    notifications: VecDeque<Notification>,
    status: String,
    now: u64,
    enabled: bool,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            status: String::from("Ready"),
            now: 0,
            enabled: true,
        }
    }

    /// A center that drops every toast (the status line still updates)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advances the logical clock by one step and expires old toasts
    pub fn tick(&mut self) {
        self.now += 1;
        let now = self.now;
        self.notifications.retain(|n| !n.is_expired(now));
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Records a notification, returning its id when it was kept
    pub fn notify(&mut self, mut notification: Notification) -> Option<NotificationId> {
        if !self.enabled {
            return None;
        }

        notification.created_at = self.now;
        let id = notification.id;
        self.notifications.push_back(notification);

        while self.notifications.len() > MAX_NOTIFICATION_HISTORY {
            self.notifications.pop_front();
        }
        Some(id)
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Active (non-dismissed, non-expired) toasts, oldest first
    pub fn active(&self) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| !n.dismissed && !n.is_expired(self.now))
            .collect()
    }

    /// Most recent notifications, newest first
    pub fn recent(&self, limit: usize) -> Vec<&Notification> {
        self.notifications.iter().rev().take(limit).collect()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    pub fn by_level(&self, level: NotificationLevel) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.level == level)
            .collect()
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.dismissed = true;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
