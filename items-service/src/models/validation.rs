//! Request shapes and validation rules
//!
//! Validation is pure: every check returns a typed [`ValidationError`] whose
//! [`ValidationErrorKind`] travels unchanged to the API layer, where it selects
//! the error code. Emptiness is judged after trimming whitespace; length limits
//! count raw characters, whitespace included.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemStatus};

/// Maximum number of characters in an item name
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum number of characters in an item description
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Maximum number of characters in a caller-chosen item id
pub const MAX_ID_CHARS: usize = 128;

/// The rule a request violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// Name is missing or blank
    EmptyName,
    /// Name is longer than [`MAX_NAME_CHARS`]
    NameTooLong,
    /// Description was supplied but is blank
    EmptyDescription,
    /// Description is longer than [`MAX_DESCRIPTION_CHARS`]
    DescriptionTooLong,
    /// Status is not one of `active`, `inactive`, `pending`
    InvalidStatus,
    /// Caller-chosen id cannot be addressed as a single path segment
    InvalidId,
}

impl ValidationErrorKind {
    /// Client-facing message for this kind
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "name cannot be empty",
            Self::NameTooLong => "name cannot exceed 100 characters",
            Self::EmptyDescription => "description cannot be empty",
            Self::DescriptionTooLong => "description cannot exceed 500 characters",
            Self::InvalidStatus => "status must be one of: active, inactive, pending",
            Self::InvalidId => {
                "id cannot exceed 128 characters or contain '/' or control characters"
            }
        }
    }

    /// Name of the request field the kind refers to
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong => "name",
            Self::EmptyDescription | Self::DescriptionTooLong => "description",
            Self::InvalidStatus => "status",
            Self::InvalidId => "id",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "empty_name"),
            Self::NameTooLong => write!(f, "name_too_long"),
            Self::EmptyDescription => write!(f, "empty_description"),
            Self::DescriptionTooLong => write!(f, "description_too_long"),
            Self::InvalidStatus => write!(f, "invalid_status"),
            Self::InvalidId => write!(f, "invalid_id"),
        }
    }
}

/// A failed validation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    /// Which rule failed
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Create a validation error of the given kind
    pub const fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }

    /// Client-facing message
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl From<ValidationErrorKind> for ValidationError {
    fn from(kind: ValidationErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Body of `POST /items`
///
/// Unknown fields are ignored. A missing `name` deserializes to the empty
/// string and is reported as [`ValidationErrorKind::EmptyName`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    /// Caller-chosen identifier; blank means "generate one"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Item name
    #[serde(default)]
    pub name: String,
    /// Item description
    #[serde(default)]
    pub description: String,
}

impl CreateItemRequest {
    /// Check the requested id, name and description
    ///
    /// # Example
    ///
    /// ```rust
    /// use items_service::models::{CreateItemRequest, ValidationErrorKind};
    ///
    /// let request = CreateItemRequest {
    ///     name: "   ".to_string(),
    ///     ..Default::default()
    /// };
    /// let err = request.validate().unwrap_err();
    /// assert_eq!(err.kind, ValidationErrorKind::EmptyName);
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(id) = self.requested_id() {
            check_id(id)?;
        }
        check_name(&self.name)?;
        check_description(&self.description)
    }

    /// Requested id, if one was supplied and is not blank
    #[must_use]
    pub fn requested_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Build the item this request describes
    ///
    /// Call [`validate`](Self::validate) first.
    #[must_use]
    pub fn into_item(self) -> Item {
        let id = self.requested_id().map(str::to_owned);
        let item = Item::new(self.name, self.description);
        match id {
            Some(id) => item.with_id(id),
            None => item,
        }
    }
}

/// Body of `PUT /items/{id}`
///
/// Every field is optional. Absent fields and empty strings both mean
/// "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status, as its wire spelling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateItemRequest {
    /// Validate the provided fields and produce a typed patch
    ///
    /// # Example
    ///
    /// ```rust
    /// use items_service::models::{ItemStatus, UpdateItemRequest, ValidationErrorKind};
    ///
    /// let request = UpdateItemRequest {
    ///     status: Some("inactive".to_string()),
    ///     ..Default::default()
    /// };
    /// let patch = request.validate().unwrap();
    /// assert_eq!(patch.status, Some(ItemStatus::Inactive));
    /// assert!(patch.name.is_none());
    ///
    /// let bad = UpdateItemRequest {
    ///     status: Some("invalid_status".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(bad.validate().unwrap_err().kind, ValidationErrorKind::InvalidStatus);
    /// ```
    pub fn validate(&self) -> Result<ItemPatch, ValidationError> {
        let name = provided(&self.name);
        let description = provided(&self.description);
        let status = provided(&self.status);

        if let Some(name) = name {
            check_name(name)?;
        }
        if let Some(description) = description {
            check_description(description)?;
        }
        let status = status.map(str::parse::<ItemStatus>).transpose()?;

        Ok(ItemPatch {
            name: name.map(str::to_owned),
            description: description.map(str::to_owned),
            status,
        })
    }
}

/// A validated partial update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// Replacement name
    pub name: Option<String>,
    /// Replacement description
    pub description: Option<String>,
    /// Replacement status
    pub status: Option<ItemStatus>,
}

impl ItemPatch {
    /// True when no field would change
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

impl Item {
    /// Run the create checks against a fully built item
    ///
    /// Status is typed, so it is always one of the accepted values here.
    /// An empty id is allowed, since stores assign one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.id.is_empty() {
            check_id(&self.id)?;
        }
        check_name(&self.name)?;
        check_description(&self.description)
    }
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

// Ids travel as one `/items/{id}` path segment.
fn check_id(id: &str) -> Result<(), ValidationError> {
    if id.chars().count() > MAX_ID_CHARS || id.chars().any(|c| c == '/' || c.is_control()) {
        return Err(ValidationErrorKind::InvalidId.into());
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationErrorKind::EmptyName.into());
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationErrorKind::NameTooLong.into());
    }
    Ok(())
}

// An empty description is allowed; a whitespace-only one is not.
fn check_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() {
        return Ok(());
    }
    if description.trim().is_empty() {
        return Err(ValidationErrorKind::EmptyDescription.into());
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationErrorKind::DescriptionTooLong.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, description: &str) -> CreateItemRequest {
        CreateItemRequest {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    fn kind_of(result: Result<(), ValidationError>) -> Option<ValidationErrorKind> {
        result.err().map(|e| e.kind)
    }

    #[test]
    fn test_create_accepts_boundaries() {
        assert!(create("a", "").validate().is_ok());
        assert!(create(&"n".repeat(100), &"d".repeat(500)).validate().is_ok());
    }

    #[test]
    fn test_create_rejects_blank_name() {
        assert_eq!(
            kind_of(create("", "d").validate()),
            Some(ValidationErrorKind::EmptyName)
        );
        assert_eq!(
            kind_of(create(" \t\n", "d").validate()),
            Some(ValidationErrorKind::EmptyName)
        );
    }

    #[test]
    fn test_create_rejects_long_fields() {
        assert_eq!(
            kind_of(create(&"n".repeat(101), "d").validate()),
            Some(ValidationErrorKind::NameTooLong)
        );
        assert_eq!(
            kind_of(create("name", &"d".repeat(501)).validate()),
            Some(ValidationErrorKind::DescriptionTooLong)
        );
    }

    #[test]
    fn test_length_counts_whitespace_and_chars() {
        // 99 visible characters padded to 101 with spaces
        let padded = format!(" {} ", "x".repeat(99));
        assert_eq!(
            kind_of(create(&padded, "").validate()),
            Some(ValidationErrorKind::NameTooLong)
        );

        // multi-byte characters count once each
        let accented = "é".repeat(100);
        assert!(accented.len() > 100);
        assert!(create(&accented, "").validate().is_ok());
    }

    #[test]
    fn test_create_rejects_whitespace_description() {
        assert_eq!(
            kind_of(create("name", "   ").validate()),
            Some(ValidationErrorKind::EmptyDescription)
        );
    }

    #[test]
    fn test_requested_id_ignores_blank() {
        let mut request = create("name", "");
        assert_eq!(request.requested_id(), None);
        request.id = Some("  ".to_string());
        assert_eq!(request.requested_id(), None);
        request.id = Some("item-1".to_string());
        assert_eq!(request.requested_id(), Some("item-1"));
        assert_eq!(request.into_item().id, "item-1");
    }

    #[test]
    fn test_requested_id_must_be_addressable() {
        let with_id = |id: &str| CreateItemRequest {
            id: Some(id.to_string()),
            ..create("name", "")
        };

        let long = "i".repeat(MAX_ID_CHARS + 1);
        for bad in ["a/b", "/", "line\nbreak", "tab\there", long.as_str()] {
            assert_eq!(
                kind_of(with_id(bad).validate()),
                Some(ValidationErrorKind::InvalidId),
                "{bad:?}"
            );
        }
        assert!(with_id(&"i".repeat(MAX_ID_CHARS)).validate().is_ok());
        assert!(with_id("item-1.v2_ok").validate().is_ok());
        assert!(with_id("  ").validate().is_ok());

        let item = Item::new("Widget", "").with_id("x/y");
        assert_eq!(
            item.validate().unwrap_err().kind,
            ValidationErrorKind::InvalidId
        );
    }

    #[test]
    fn test_create_request_ignores_unknown_fields() {
        let request: CreateItemRequest =
            serde_json::from_str(r#"{"name":"Widget","color":"blue"}"#).unwrap();
        assert_eq!(request.name, "Widget");
        assert!(request.description.is_empty());
    }

    #[test]
    fn test_update_empty_strings_are_not_provided() {
        let request = UpdateItemRequest {
            name: Some(String::new()),
            description: Some(String::new()),
            status: Some(String::new()),
        };
        let patch = request.validate().unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_update_checks_provided_fields() {
        let request = UpdateItemRequest {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            request.validate().unwrap_err().kind,
            ValidationErrorKind::EmptyName
        );

        let request = UpdateItemRequest {
            description: Some("d".repeat(501)),
            ..Default::default()
        };
        assert_eq!(
            request.validate().unwrap_err().kind,
            ValidationErrorKind::DescriptionTooLong
        );

        let request = UpdateItemRequest {
            status: Some("Active".to_string()),
            ..Default::default()
        };
        assert_eq!(
            request.validate().unwrap_err().kind,
            ValidationErrorKind::InvalidStatus
        );
    }

    #[test]
    fn test_update_builds_patch() {
        let request = UpdateItemRequest {
            name: Some("New name".to_string()),
            description: None,
            status: Some("pending".to_string()),
        };
        let patch = request.validate().unwrap();
        assert_eq!(patch.name.as_deref(), Some("New name"));
        assert_eq!(patch.description, None);
        assert_eq!(patch.status, Some(ItemStatus::Pending));
    }

    #[test]
    fn test_item_validate_matches_create_rules() {
        let item = Item::new("Widget", "");
        assert!(item.validate().is_ok());

        let item = Item::new("", "d");
        assert_eq!(
            item.validate().unwrap_err().kind,
            ValidationErrorKind::EmptyName
        );
    }

    #[test]
    fn test_messages_and_fields() {
        assert_eq!(
            ValidationErrorKind::InvalidStatus.message(),
            "status must be one of: active, inactive, pending"
        );
        assert_eq!(ValidationErrorKind::NameTooLong.field(), "name");
        assert_eq!(
            ValidationError::new(ValidationErrorKind::EmptyDescription).to_string(),
            "description cannot be empty"
        );
    }
}
