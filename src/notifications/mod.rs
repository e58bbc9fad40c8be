//! Transient user-facing notifications ("toasts").
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    LoadFailed,
}

impl ToastKind {
    fn text(&self, locale: &str) -> (String, String) {
        match self {
            ToastKind::LoadFailed => (
                t!("toast.load_failed.title", locale = locale).into_owned(),
                t!("toast.load_failed.description", locale = locale).into_owned(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(kind: ToastKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            created_at: Utc::now(),
        }
    }

    /// Resolves the toast text for `locale`.
    pub fn localize(&self, locale: &str) -> ToastView {
        let (title, description) = self.kind.text(locale);
        ToastView {
            id: self.id,
            kind: self.kind,
            title,
            description,
            created_at: self.created_at,
        }
    }
}

/// A toast with its text resolved, ready for a template or the API.
#[derive(Debug, Clone, Serialize)]
pub struct ToastView {
    pub id: Uuid,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Pending toasts. Each one is handed out exactly once.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind) {
        self.pending.push(Toast::new(kind));
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
