//! Serde mirror of the LDtk JSON export format.
//!
//! Only the parts of the schema that the importer reads are modelled. Every
//! field that LDtk may omit (or that older exports lack) is `#[serde(default)]`
//! so a well-formed file from any recent LDtk version parses.
//!
//! Field names follow LDtk: camelCase, with `__`-prefixed fields being values
//! LDtk pre-computes for convenience (cell counts, pixel offsets, ...).

use serde::Deserialize;
use serde_json::Value;

/// Root of a `.ldtk` project file.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LdtkJson {
    pub json_version: String,
    pub iid: String,
    pub default_grid_size: i32,
    pub bg_color: String,
    /// When `true`, each level's layers live in a separate `.ldtkl` file.
    pub external_levels: bool,
    pub world_layout: Option<WorldLayout>,
    pub defs: Definitions,
    pub levels: Vec<Level>,
}

impl LdtkJson {
    /// Parse a project from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Find a tileset definition by uid.
    pub fn tileset(&self, uid: i32) -> Option<&TilesetDefinition> {
        self.defs.tilesets.iter().find(|t| t.uid == uid)
    }

    /// Find a layer definition by uid.
    pub fn layer_def(&self, uid: i32) -> Option<&LayerDefinition> {
        self.defs.layers.iter().find(|l| l.uid == uid)
    }

    /// Find an entity definition by identifier.
    pub fn entity_def(&self, identifier: &str) -> Option<&EntityDefinition> {
        self.defs.entities.iter().find(|e| e.identifier == identifier)
    }

    /// Find a level by identifier.
    pub fn level(&self, identifier: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.identifier == identifier)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldLayout {
    Free,
    GridVania,
    LinearHorizontal,
    LinearVertical,
}

/// Project-wide definitions shared by every level.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Definitions {
    pub layers: Vec<LayerDefinition>,
    pub entities: Vec<EntityDefinition>,
    pub tilesets: Vec<TilesetDefinition>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerDefinition {
    pub identifier: String,
    pub uid: i32,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub grid_size: i32,
    pub int_grid_values: Vec<IntGridValueDefinition>,
}

impl LayerDefinition {
    /// Look up the identifier LDtk gave an int-grid value (e.g. `"walls"`).
    pub fn int_grid_identifier(&self, value: i32) -> Option<&str> {
        self.int_grid_values
            .iter()
            .find(|v| v.value == value)
            .and_then(|v| v.identifier.as_deref())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IntGridValueDefinition {
    pub value: i32,
    pub identifier: Option<String>,
    pub color: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityDefinition {
    pub identifier: String,
    pub uid: i32,
    pub width: i32,
    pub height: i32,
    pub color: String,
    pub pivot_x: f32,
    pub pivot_y: f32,
    pub tags: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TilesetDefinition {
    pub identifier: String,
    pub uid: i32,
    /// Image path relative to the project file. `None` for embedded atlases.
    pub rel_path: Option<String>,
    pub px_wid: i32,
    pub px_hei: i32,
    pub tile_grid_size: i32,
    pub spacing: i32,
    pub padding: i32,
    #[serde(rename = "__cWid")]
    pub c_wid: i32,
    #[serde(rename = "__cHei")]
    pub c_hei: i32,
}

/// A single level. Also the root of a `.ldtkl` external level file.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Level {
    pub identifier: String,
    pub iid: String,
    pub uid: i32,
    pub world_x: i32,
    pub world_y: i32,
    pub world_depth: i32,
    pub px_wid: i32,
    pub px_hei: i32,
    #[serde(rename = "__bgColor")]
    pub bg_color: Option<String>,
    pub field_instances: Vec<FieldInstance>,
    /// `None` when the project stores levels externally.
    pub layer_instances: Option<Vec<LayerInstance>>,
    /// Path of the `.ldtkl` file, relative to the project.
    pub external_rel_path: Option<String>,
}

impl Level {
    /// Parse a standalone level (`.ldtkl`) from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// The layer type tag LDtk writes in `__type`.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayerType {
    Entities,
    IntGrid,
    Tiles,
    AutoLayer,
    /// Any tag this importer does not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerInstance {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    #[serde(rename = "__type")]
    pub layer_type: LayerType,
    #[serde(rename = "__cWid")]
    pub c_wid: i32,
    #[serde(rename = "__cHei")]
    pub c_hei: i32,
    #[serde(rename = "__gridSize")]
    pub grid_size: i32,
    #[serde(rename = "__opacity", default = "one")]
    pub opacity: f32,
    #[serde(rename = "__pxTotalOffsetX")]
    pub px_total_offset_x: i32,
    #[serde(rename = "__pxTotalOffsetY")]
    pub px_total_offset_y: i32,
    #[serde(rename = "__tilesetDefUid")]
    pub tileset_def_uid: Option<i32>,
    #[serde(rename = "__tilesetRelPath")]
    pub tileset_rel_path: Option<String>,
    pub iid: String,
    pub layer_def_uid: i32,
    #[serde(default = "yes")]
    pub visible: bool,
    /// Flat, row-major cell values. `0` means empty.
    pub int_grid_csv: Vec<i32>,
    pub grid_tiles: Vec<TileInstance>,
    pub auto_layer_tiles: Vec<TileInstance>,
    pub entity_instances: Vec<EntityInstance>,
}

impl LayerInstance {
    /// Tiles to draw for this layer, whichever list LDtk filled.
    pub fn tiles(&self) -> &[TileInstance] {
        match self.layer_type {
            LayerType::Tiles => &self.grid_tiles,
            _ => &self.auto_layer_tiles,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityInstance {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    pub iid: String,
    pub def_uid: i32,
    /// Pivot position in pixels, relative to the layer.
    pub px: [i32; 2],
    #[serde(rename = "__grid")]
    pub grid: [i32; 2],
    #[serde(rename = "__pivot")]
    pub pivot: [f32; 2],
    pub width: i32,
    pub height: i32,
    #[serde(rename = "__tags")]
    pub tags: Vec<String>,
    #[serde(rename = "__worldX")]
    pub world_x: Option<i32>,
    #[serde(rename = "__worldY")]
    pub world_y: Option<i32>,
    pub field_instances: Vec<FieldInstance>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldInstance {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    /// LDtk type tag, e.g. `Int`, `Array<Point>`, `LocalEnum.Item`.
    #[serde(rename = "__type")]
    pub field_type: String,
    #[serde(rename = "__value")]
    pub value: Value,
    pub def_uid: i32,
}

/// One tile placement in a tile or auto layer.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct TileInstance {
    /// Destination pixel position in the layer.
    pub px: [i32; 2],
    /// Source pixel position in the tileset atlas.
    pub src: [i32; 2],
    /// Tile id in the tileset.
    pub t: i32,
    /// Flip bits: `1` = X, `2` = Y.
    pub f: i32,
    #[serde(default = "one")]
    pub a: f32,
}

impl TileInstance {
    pub fn flip_x(&self) -> bool {
        self.f & 1 != 0
    }

    pub fn flip_y(&self) -> bool {
        self.f & 2 != 0
    }
}

fn one() -> f32 {
    1.0
}

fn yes() -> bool {
    true
}
