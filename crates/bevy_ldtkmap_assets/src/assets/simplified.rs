use std::fmt;

use bevy::prelude::*;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::csv::IntGridCsv;

/// Contents of a `data.json` file from LDtk's "super simple export".
///
/// Each level gets its own folder with this file, a flattened
/// `_composite.png` and one CSV per int-grid layer.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SimplifiedLevelData {
    pub identifier: String,
    /// LDtk spells it this way in the export.
    pub unique_identifer: String,
    /// Level position in the world, in pixels.
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub bg_color: String,
    pub custom_fields: serde_json::Map<String, Value>,
    /// PNG files exported for this level, one per layer.
    pub layers: Vec<String>,
    /// Entity instances grouped by entity identifier, in the order the
    /// groups appear in the file.
    #[serde(deserialize_with = "deserialize_entity_groups")]
    pub entities: Vec<(String, Vec<SimplifiedEntity>)>,
}

impl SimplifiedLevelData {
    /// Parse `data.json` bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// All entities in export order: group by group, then by position in
    /// each group.
    pub fn entities_in_export_order(&self) -> impl Iterator<Item = &SimplifiedEntity> {
        self.entities.iter().flat_map(|(_, group)| group.iter())
    }

    /// Instances of one entity identifier.
    pub fn entities_of(&self, identifier: &str) -> &[SimplifiedEntity] {
        self.entities
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, group)| group.as_slice())
            .unwrap_or_default()
    }
}

fn deserialize_entity_groups<'de, D>(
    deserializer: D,
) -> Result<Vec<(String, Vec<SimplifiedEntity>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct GroupsVisitor;

    impl<'de> Visitor<'de> for GroupsVisitor {
        type Value = Vec<(String, Vec<SimplifiedEntity>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of entity identifiers to entity lists")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((identifier, group)) = map.next_entry()? {
                groups.push((identifier, group));
            }
            Ok(groups)
        }
    }

    deserializer.deserialize_map(GroupsVisitor)
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SimplifiedEntity {
    /// Entity identifier (e.g. `"Player"`).
    pub id: String,
    pub iid: String,
    /// Layer the entity was placed on.
    pub layer: String,
    /// Position relative to the level, in pixels.
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: i64,
    pub custom_fields: serde_json::Map<String, Value>,
}

/// Bevy asset for one level of a "super simple export" folder.
#[derive(TypePath, Asset, Debug)]
pub struct LdtkSimplifiedLevelAsset {
    /// Parsed `data.json`
    pub data: SimplifiedLevelData,

    /// `_composite.png` next to `data.json`
    ///
    /// Loading fails (and the handle never resolves) if the export was made
    /// without the composite image.
    pub composite: Handle<Image>,

    /// Parsed `Collisions.csv`, if the file exists
    pub collisions: Option<IntGridCsv>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r##"{
        "identifier": "Level_1",
        "uniqueIdentifer": "5a6f1d60-66b0-11ec-9cd7-7b5fe17ef8d8",
        "x": 256, "y": 0, "width": 128, "height": 64,
        "bgColor": "#40465B",
        "neighbourLevels": [{ "levelIid": "x", "dir": "w" }],
        "customFields": { "music": "cave" },
        "layers": ["Bg_textures.png", "Collisions.png"],
        "entities": {
            "Player": [{ "id": "Player", "iid": "p", "layer": "Entities", "x": 16, "y": 48,
                         "width": 16, "height": 16, "color": 16711680, "customFields": {} }],
            "Chest": [
                { "id": "Chest", "iid": "c1", "layer": "Entities", "x": 80, "y": 48,
                  "width": 16, "height": 16, "color": 255, "customFields": { "gold": 5 } },
                { "id": "Chest", "iid": "c2", "layer": "Entities", "x": 96, "y": 48,
                  "width": 16, "height": 16, "color": 255, "customFields": {} }
            ]
        }
    }"##;

    #[test]
    fn test_parse_data_json() {
        let data = SimplifiedLevelData::from_slice(DATA.as_bytes()).unwrap();

        assert_eq!(data.identifier, "Level_1");
        assert_eq!(data.x, 256);
        assert_eq!(data.width, 128);
        assert_eq!(data.layers.len(), 2);
        assert_eq!(data.custom_fields["music"], "cave");
        assert_eq!(data.entities_of("Chest").len(), 2);
        assert_eq!(data.entities_of("Chest")[0].custom_fields["gold"], 5);
        assert!(data.entities_of("Door").is_empty());
    }

    #[test]
    fn test_entities_keep_export_order() {
        let data = SimplifiedLevelData::from_slice(DATA.as_bytes()).unwrap();
        let iids: Vec<&str> = data
            .entities_in_export_order()
            .map(|e| e.iid.as_str())
            .collect();

        // "Player" is first in the file even though it sorts after "Chest"
        assert_eq!(iids, vec!["p", "c1", "c2"]);
    }

    #[test]
    fn test_missing_entities_is_empty() {
        let data = SimplifiedLevelData::from_slice(br#"{ "identifier": "Empty" }"#).unwrap();

        assert!(data.entities.is_empty());
        assert_eq!(data.entities_in_export_order().count(), 0);
    }
}
