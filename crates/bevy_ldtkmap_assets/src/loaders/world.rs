use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
    tasks::ConditionalSendFuture,
};
use thiserror::Error;

use crate::assets::simplified::LdtkSimplifiedLevelAsset;
use crate::assets::world::{LdtkSimplifiedWorldAsset, SimplifiedWorldLevel};
use crate::json::LdtkJson;
use crate::loaders::{InvalidPathError, resolve_relative_path};

/// Folder LDtk writes the "super simple export" to, inside `<project>/`.
pub const SIMPLIFIED_DIRECTORY: &str = "simplified";

/// Name of the level data file in each simplified level folder.
pub const DATA_FILENAME: &str = "data.json";

/// Asset loader for a whole "super simple export" world.
///
/// Reads the `.ldtk` project to list its levels, then loads
/// `<project>/simplified/<level>/data.json` for each one as a dependency.
/// The `.ldtk` extension belongs to [`LdtkProjectLoader`](super::project::LdtkProjectLoader),
/// so this loader registers none and is picked from the asset type:
///
/// ```rust,ignore
/// let handle: Handle<LdtkSimplifiedWorldAsset> = asset_server.load("maps/world.ldtk");
/// ```
#[derive(Default)]
pub struct LdtkSimplifiedWorldLoader;

#[derive(Debug, Error)]
pub enum WorldLoaderError {
    #[error("Failed to parse LDtk project: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),
}

impl AssetLoader for LdtkSimplifiedWorldLoader {
    type Asset = LdtkSimplifiedWorldAsset;
    type Settings = ();
    type Error = WorldLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let project = LdtkJson::from_slice(&bytes)?;

            let asset_path = load_context.asset_path().path().to_path_buf();

            let mut levels = Vec::with_capacity(project.levels.len());
            for level in &project.levels {
                let data_path = simplified_level_path(&asset_path, &level.identifier)?;
                let handle: Handle<LdtkSimplifiedLevelAsset> = load_context.load(data_path);
                levels.push(SimplifiedWorldLevel {
                    identifier: level.identifier.clone(),
                    handle,
                });
            }

            debug!(
                "Loaded simplified world {:?}: {} levels",
                asset_path,
                levels.len()
            );

            Ok(LdtkSimplifiedWorldAsset { levels })
        }
    }

    fn extensions(&self) -> &[&str] {
        &[]
    }
}

/// Asset path of a level's `data.json`, next to the project that owns it.
pub fn simplified_level_path(
    project_path: &std::path::Path,
    level_identifier: &str,
) -> Result<String, InvalidPathError> {
    let stem = project_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| InvalidPathError(format!("No file name in {:?}", project_path)))?;

    resolve_relative_path(
        project_path,
        &format!("{stem}/{SIMPLIFIED_DIRECTORY}/{level_identifier}/{DATA_FILENAME}"),
    )
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_simplified_level_path() {
        let path = simplified_level_path(Path::new("maps/world.ldtk"), "Level_0").unwrap();
        assert_eq!(path, "maps/world/simplified/Level_0/data.json");

        let path = simplified_level_path(Path::new("dungeon.ldtk"), "Boss").unwrap();
        assert_eq!(path, "dungeon/simplified/Boss/data.json");
    }

    #[test]
    fn test_claims_no_extension() {
        assert!(LdtkSimplifiedWorldLoader.extensions().is_empty());
    }
}
