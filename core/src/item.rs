//! The to-do item entity.
//!
//! # Design
//! `id` is private so it cannot change after construction; every other field
//! is public and mutated by direct assignment. Construction never fails:
//! anything not supplied gets a default (fresh UUID, current time, `normal`
//! priority, `000000FF` colour).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Colour assigned when none is supplied (opaque black, RGBA).
pub const DEFAULT_COLOR_HEX: &str = "000000FF";

/// Urgency of a to-do item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    id: String,
    pub text: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub is_done: bool,
    pub creation_date: DateTime<Utc>,
    pub modify_date: Option<DateTime<Utc>>,
    pub color_hex: String,
}

impl TodoItem {
    /// Item with a generated id, created now, every optional field defaulted.
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self::builder(text, priority).build()
    }

    pub fn builder(text: impl Into<String>, priority: Priority) -> TodoItemBuilder {
        TodoItemBuilder::new(text, priority)
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Builder for a [`TodoItem`] with any subset of fields overridden.
#[derive(Debug, Clone)]
pub struct TodoItemBuilder {
    id: Option<String>,
    text: String,
    priority: Priority,
    deadline: Option<DateTime<Utc>>,
    is_done: bool,
    creation_date: Option<DateTime<Utc>>,
    modify_date: Option<DateTime<Utc>>,
    color_hex: Option<String>,
}

impl TodoItemBuilder {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: None,
            text: text.into(),
            priority,
            deadline: None,
            is_done: false,
            creation_date: None,
            modify_date: None,
            color_hex: None,
        }
    }

    /// Uses `id` instead of generating a fresh UUID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn done(mut self, is_done: bool) -> Self {
        self.is_done = is_done;
        self
    }

    /// Overrides the creation time, which otherwise is taken at `build()`.
    pub fn creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.creation_date = Some(creation_date);
        self
    }

    pub fn modify_date(mut self, modify_date: Option<DateTime<Utc>>) -> Self {
        self.modify_date = modify_date;
        self
    }

    pub fn color_hex(mut self, color_hex: impl Into<String>) -> Self {
        self.color_hex = Some(color_hex.into());
        self
    }

    pub fn build(self) -> TodoItem {
        TodoItem {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            text: self.text,
            priority: self.priority,
            deadline: self.deadline,
            is_done: self.is_done,
            creation_date: self.creation_date.unwrap_or_else(Utc::now),
            modify_date: self.modify_date,
            color_hex: self
                .color_hex
                .unwrap_or_else(|| DEFAULT_COLOR_HEX.to_string()),
        }
    }
}
