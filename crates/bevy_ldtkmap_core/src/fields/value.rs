use std::collections::BTreeMap;

use bevy::prelude::*;
use bevy_ldtkmap_assets::json::FieldInstance;
use serde_json::Value;

use super::convert::{FieldError, FromFieldValue};
use crate::geometry::parse_hex_color;

/// Reference to another entity instance (`EntityRef` fields).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityRef {
    pub entity_iid: String,
    pub layer_iid: String,
    pub level_iid: String,
    pub world_iid: String,
}

/// Rectangle in a tileset atlas (`Tile` fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileRect {
    pub tileset_uid: i32,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// A single converted field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    /// `String`, `Multilines` and `FilePath` fields
    String(String),
    Color(Color),
    /// Grid cell `(cx, cy)`, row 0 at the top
    Point(IVec2),
    EntityRef(EntityRef),
    /// Variant name of a local or external enum
    Enum(String),
    Tile(TileRect),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Convert a raw JSON value according to its LDtk `__type` tag.
    pub fn from_instance(type_tag: &str, json: &Value) -> Result<Self, FieldError> {
        if json.is_null() {
            return Ok(Self::Null);
        }

        if let Some(inner) = type_tag
            .strip_prefix("Array<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            let items = json
                .as_array()
                .ok_or_else(|| FieldError::mismatch(type_tag, json))?;
            return items
                .iter()
                .map(|item| Self::from_instance(inner, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Array);
        }

        if type_tag.starts_with("LocalEnum.") || type_tag.starts_with("ExternEnum.") {
            return json
                .as_str()
                .map(|variant| Self::Enum(variant.to_string()))
                .ok_or_else(|| FieldError::mismatch(type_tag, json));
        }

        let value = match type_tag {
            "Int" => json.as_i64().map(Self::Int),
            "Float" => json.as_f64().map(Self::Float),
            "Bool" => json.as_bool().map(Self::Bool),
            "String" | "Multilines" | "FilePath" => {
                json.as_str().map(|s| Self::String(s.to_string()))
            }
            "Color" => json.as_str().and_then(parse_hex_color).map(Self::Color),
            "Point" => point_from_json(json),
            "EntityRef" => entity_ref_from_json(json),
            "Tile" => tile_from_json(json),
            _ => {
                debug!("Unknown LDtk field type '{}', converting untyped", type_tag);
                Some(Self::from_untyped(json))
            }
        };

        value.ok_or_else(|| FieldError::mismatch(type_tag, json))
    }

    /// Convert a JSON value without type information.
    ///
    /// Used for the "super simple export", whose `customFields` drop the LDtk
    /// type tags. Colors come through as strings and are parsed on demand by
    /// `FromFieldValue for Color`.
    pub fn from_untyped(json: &Value) -> Self {
        match json {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from_untyped).collect()),
            Value::Object(_) => point_from_json(json)
                .or_else(|| entity_ref_from_json(json))
                .or_else(|| tile_from_json(json))
                .unwrap_or_else(|| Self::String(json.to_string())),
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Bool(_) => "Bool",
            Self::String(_) => "String",
            Self::Color(_) => "Color",
            Self::Point(_) => "Point",
            Self::EntityRef(_) => "EntityRef",
            Self::Enum(_) => "Enum",
            Self::Tile(_) => "Tile",
            Self::Array(_) => "Array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

fn point_from_json(json: &Value) -> Option<FieldValue> {
    let cx = json.get("cx")?.as_i64()?;
    let cy = json.get("cy")?.as_i64()?;
    Some(FieldValue::Point(IVec2::new(cx as i32, cy as i32)))
}

fn entity_ref_from_json(json: &Value) -> Option<FieldValue> {
    let text = |key: &str| {
        json.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    json.get("entityIid")?;
    Some(FieldValue::EntityRef(EntityRef {
        entity_iid: text("entityIid"),
        layer_iid: text("layerIid"),
        level_iid: text("levelIid"),
        world_iid: text("worldIid"),
    }))
}

fn tile_from_json(json: &Value) -> Option<FieldValue> {
    let int = |key: &str| json.get(key).and_then(Value::as_i64).map(|v| v as i32);
    Some(FieldValue::Tile(TileRect {
        tileset_uid: int("tilesetUid")?,
        x: int("x")?,
        y: int("y")?,
        w: int("w")?,
        h: int("h")?,
    }))
}

/// Custom field values of an LDtk entity or level, by field identifier.
///
/// Attached to every spawned entity. Raw access for fields that have no
/// dedicated component:
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::prelude::*;
/// fn read_health(query: Query<&LdtkFields, Added<LdtkFields>>) {
///     for fields in &query {
///         if let Ok(health) = fields.get_as::<i32>("health") {
///             info!("health = {health}");
///         }
///     }
/// }
/// ```
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct LdtkFields {
    values: BTreeMap<String, FieldValue>,
}

impl LdtkFields {
    /// Convert `fieldInstances`, skipping (and logging) fields that don't match their type.
    pub fn from_instances(instances: &[FieldInstance]) -> Self {
        let mut fields = Self::default();
        for instance in instances {
            match FieldValue::from_instance(&instance.field_type, &instance.value) {
                Ok(value) => fields.insert(instance.identifier.clone(), value),
                Err(e) => warn!("Skipping field '{}': {}", instance.identifier, e),
            }
        }
        fields
    }

    /// Convert an untyped `customFields` object.
    pub fn from_untyped(map: &serde_json::Map<String, Value>) -> Self {
        Self {
            values: map
                .iter()
                .map(|(key, value)| (key.clone(), FieldValue::from_untyped(value)))
                .collect(),
        }
    }

    pub fn insert(&mut self, identifier: impl Into<String>, value: FieldValue) {
        self.values.insert(identifier.into(), value);
    }

    pub fn get(&self, identifier: &str) -> Option<&FieldValue> {
        self.values.get(identifier)
    }

    /// Read a field as `T`.
    pub fn get_as<T: FromFieldValue>(&self, identifier: &str) -> Result<T, FieldError> {
        let value = self
            .get(identifier)
            .ok_or_else(|| FieldError::Missing(identifier.to_string()))?;
        T::from_field_value(value).ok_or_else(|| FieldError::TypeMismatch {
            field: identifier.to_string(),
            expected: std::any::type_name::<T>(),
            found: value.kind().to_string(),
        })
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.values.contains_key(identifier)
    }

    /// Iterate `(identifier, value)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
