//! Item entity and request validation
//!
//! Pure types with no I/O. Handlers validate requests here before any
//! storage call is made.

mod item;
mod validation;

pub use item::{Item, ItemStatus};
pub use validation::{
    CreateItemRequest, ItemPatch, UpdateItemRequest, ValidationError, ValidationErrorKind,
    MAX_DESCRIPTION_CHARS, MAX_ID_CHARS, MAX_NAME_CHARS,
};

