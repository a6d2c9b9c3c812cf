//! Entity field values.
//!
//! LDtk entities carry typed custom fields (`fieldInstances`). They are
//! converted once at spawn time into [`FieldValue`]s, stored in the
//! [`LdtkFields`] component, and read back into Rust types through
//! [`FromFieldValue`] or `#[derive(LdtkFields)]`.

mod convert;
mod value;

pub use convert::{FieldError, FromFieldValue, FromLdtkFields};
pub use value::{EntityRef, FieldValue, LdtkFields, TileRect};
