//! Conversion from field values to Rust types.

use bevy::prelude::*;
use serde_json::Value;
use thiserror::Error;

use super::value::{EntityRef, FieldValue, LdtkFields, TileRect};
use crate::geometry::parse_hex_color;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("Missing required field '{0}'")]
    Missing(String),

    #[error("Field '{field}' is {found}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("Value {value} does not match LDtk type '{type_tag}'")]
    InvalidJson { type_tag: String, value: String },
}

impl FieldError {
    pub(crate) fn mismatch(type_tag: &str, json: &Value) -> Self {
        Self::InvalidJson {
            type_tag: type_tag.to_string(),
            value: json.to_string(),
        }
    }
}

/// Trait for types that can be read from a single field value.
///
/// This trait is used by the `#[derive(LdtkFields)]` macro to convert each
/// struct field. Implement it for your own types to use them as field types.
///
/// # Example
///
/// ```
/// use bevy_ldtkmap_core::fields::{FieldValue, FromFieldValue};
///
/// let value = FieldValue::Int(3);
/// assert_eq!(f32::from_field_value(&value), Some(3.0));
/// assert_eq!(bool::from_field_value(&value), None);
/// ```
pub trait FromFieldValue: Sized {
    /// Returns `None` if the value can't be represented as `Self`.
    fn from_field_value(value: &FieldValue) -> Option<Self>;
}

/// Trait for types built from all the fields of an entity.
///
/// Usually derived:
///
/// ```ignore
/// #[derive(Component, LdtkFields)]
/// #[ldtk(entity = "Door")]
/// struct Door {
///     locked: bool,
///     #[ldtk(name = "key_id")]
///     key: Option<i32>,
/// }
/// ```
pub trait FromLdtkFields: Sized {
    fn from_ldtk_fields(fields: &LdtkFields) -> Result<Self, FieldError>;
}

// Primitive type implementations

impl FromFieldValue for bool {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromFieldValue for i32 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        i64::from_field_value(value).and_then(|i| i32::try_from(i).ok())
    }
}

impl FromFieldValue for u32 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        i64::from_field_value(value).and_then(|i| u32::try_from(i).ok())
    }
}

impl FromFieldValue for usize {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        i64::from_field_value(value).and_then(|i| usize::try_from(i).ok())
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromFieldValue for f32 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        f64::from_field_value(value).map(|f| f as f32)
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::String(s) | FieldValue::Enum(s) => Some(s.clone()),
            _ => None,
        }
    }
}

// Bevy type implementations

impl FromFieldValue for Color {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Color(color) => Some(*color),
            // Untyped exports keep colors as "#RRGGBB" strings
            FieldValue::String(s) => parse_hex_color(s),
            _ => None,
        }
    }
}

impl FromFieldValue for IVec2 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Point(point) => Some(*point),
            _ => None,
        }
    }
}

impl FromFieldValue for UVec2 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        let point = IVec2::from_field_value(value)?;
        (point.x >= 0 && point.y >= 0).then(|| point.as_uvec2())
    }
}

impl FromFieldValue for Vec2 {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        IVec2::from_field_value(value).map(|point| point.as_vec2())
    }
}

impl FromFieldValue for EntityRef {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::EntityRef(r) => Some(r.clone()),
            _ => None,
        }
    }
}

impl FromFieldValue for TileRect {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Tile(tile) => Some(*tile),
            _ => None,
        }
    }
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        Some(value.clone())
    }
}

// Container implementations

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Null => Some(None),
            other => T::from_field_value(other).map(Some),
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    fn from_field_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Array(items) => items.iter().map(T::from_field_value).collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy_ldtkmap_macros::{LdtkEnum, LdtkFields};

    use super::*;

    #[derive(LdtkEnum, Debug, Clone, Copy, PartialEq)]
    enum Loot {
        Gold,
        #[ldtk(name = "Health_potion")]
        Potion,
    }

    #[derive(LdtkFields, Debug, PartialEq)]
    struct Door {
        locked: bool,
        #[ldtk(name = "key_id")]
        key: Option<i32>,
        #[ldtk(default = 1.5)]
        open_time: f32,
        #[ldtk(default)]
        loot: Vec<Loot>,
        #[ldtk(skip)]
        opened: bool,
    }

    #[derive(LdtkFields, Debug, PartialEq)]
    struct Marker;

    fn door_fields() -> LdtkFields {
        let mut fields = LdtkFields::default();
        fields.insert("locked", FieldValue::Bool(true));
        fields.insert("open_time", FieldValue::Null);
        fields.insert(
            "loot",
            FieldValue::Array(vec![
                FieldValue::Enum("Gold".into()),
                FieldValue::Enum("Health_potion".into()),
            ]),
        );
        fields
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(i32::from_field_value(&FieldValue::Int(-4)), Some(-4));
        assert_eq!(u32::from_field_value(&FieldValue::Int(-4)), None);
        assert_eq!(f32::from_field_value(&FieldValue::Int(2)), Some(2.0));
        assert_eq!(i32::from_field_value(&FieldValue::Float(2.0)), None);
    }

    #[test]
    fn test_string_accepts_enums() {
        let value = FieldValue::Enum("Gold".into());
        assert_eq!(String::from_field_value(&value), Some("Gold".to_string()));
    }

    #[test]
    fn test_color_from_string() {
        let value = FieldValue::String("#0000FF".into());
        assert_eq!(Color::from_field_value(&value), Some(Color::srgb(0.0, 0.0, 1.0)));
        assert_eq!(Color::from_field_value(&FieldValue::String("blue".into())), None);
    }

    #[test]
    fn test_points() {
        let value = FieldValue::Point(IVec2::new(3, 5));
        assert_eq!(Vec2::from_field_value(&value), Some(Vec2::new(3.0, 5.0)));
        assert_eq!(
            UVec2::from_field_value(&FieldValue::Point(IVec2::new(-1, 0))),
            None
        );
    }

    #[test]
    fn test_option_and_vec() {
        assert_eq!(Option::<i32>::from_field_value(&FieldValue::Null), Some(None));
        assert_eq!(Option::<i32>::from_field_value(&FieldValue::Int(1)), Some(Some(1)));
        assert_eq!(Option::<i32>::from_field_value(&FieldValue::Bool(true)), None);

        let array = FieldValue::Array(vec![FieldValue::Int(1), FieldValue::Int(2)]);
        assert_eq!(Vec::<i32>::from_field_value(&array), Some(vec![1, 2]));

        let mixed = FieldValue::Array(vec![FieldValue::Int(1), FieldValue::Bool(false)]);
        assert_eq!(Vec::<i32>::from_field_value(&mixed), None);
    }

    #[test]
    fn test_derive_reads_fields() {
        let door = Door::from_ldtk_fields(&door_fields()).unwrap();

        assert_eq!(
            door,
            Door {
                locked: true,
                key: None,
                open_time: 1.5,
                loot: vec![Loot::Gold, Loot::Potion],
                opened: false,
            }
        );
    }

    #[test]
    fn test_derive_renamed_and_optional_fields() {
        let mut fields = door_fields();
        fields.insert("key_id", FieldValue::Int(7));
        fields.insert("open_time", FieldValue::Float(0.25));

        let door = Door::from_ldtk_fields(&fields).unwrap();
        assert_eq!(door.key, Some(7));
        assert_eq!(door.open_time, 0.25);
    }

    #[test]
    fn test_derive_errors() {
        let mut fields = door_fields();
        fields.insert("locked", FieldValue::Int(1));
        assert!(matches!(
            Door::from_ldtk_fields(&fields),
            Err(FieldError::TypeMismatch { ref field, .. }) if field == "locked"
        ));

        assert_eq!(
            Door::from_ldtk_fields(&LdtkFields::default()),
            Err(FieldError::Missing("locked".to_string()))
        );
        assert_eq!(Marker::from_ldtk_fields(&LdtkFields::default()), Ok(Marker));
    }

    #[test]
    fn test_enum_from_string() {
        assert_eq!(
            Loot::from_field_value(&FieldValue::String("Gold".into())),
            Some(Loot::Gold)
        );
        assert_eq!(Loot::from_field_value(&FieldValue::Enum("Potion".into())), None);
    }
}
