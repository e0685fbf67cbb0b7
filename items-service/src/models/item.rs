//! The `Item` entity and its lifecycle status

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{ItemPatch, ValidationError, ValidationErrorKind};

/// Lifecycle status of an item
///
/// Parsing is case-sensitive: only the lowercase spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Default status for newly created items
    #[default]
    Active,
    /// Item is disabled
    Inactive,
    /// Item is awaiting activation
    Pending,
}

impl ItemStatus {
    /// All accepted statuses, in display order
    pub const ALL: [ItemStatus; 3] = [Self::Active, Self::Inactive, Self::Pending];

    /// Wire representation of the status
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::new(ValidationErrorKind::InvalidStatus))
    }
}

/// A stored item
///
/// `id` is immutable once assigned. `created_at` and `updated_at` are set by
/// the service, never by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (UUIDv4 when generated by the service)
    pub id: String,
    /// Display name, 1 to 100 characters
    pub name: String,
    /// Free-form description, up to 500 characters
    #[serde(default)]
    pub description: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: ItemStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new active item with no id assigned yet
    ///
    /// Both timestamps are set to the same instant. The storage adapter
    /// assigns an id on create when `id` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use items_service::models::{Item, ItemStatus};
    ///
    /// let item = Item::new("Widget", "A small widget");
    /// assert_eq!(item.status, ItemStatus::Active);
    /// assert_eq!(item.created_at, item.updated_at);
    /// assert!(item.id.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            status: ItemStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set an explicit id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Apply the provided fields of a patch and refresh `updated_at`
    ///
    /// Fields absent from the patch are left untouched.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.touch();
    }

    /// Refresh `updated_at` to a timestamp strictly after the previous one
    pub fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }
}

/// Current time, bumped by one microsecond if the clock has not advanced past `previous`
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
