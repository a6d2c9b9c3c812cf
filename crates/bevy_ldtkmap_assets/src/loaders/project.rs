use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    platform::collections::HashMap,
    prelude::*,
    tasks::ConditionalSendFuture,
};
use thiserror::Error;

use crate::assets::{level::LdtkLevelAsset, project::LdtkProjectAsset};
use crate::json::LdtkJson;
use crate::loaders::{InvalidPathError, resolve_relative_path};

/// Asset loader for LDtk projects (.ldtk files)
///
/// This loader handles all project dependencies:
/// - Tileset atlas images
/// - External level files (.ldtkl) when the project saves levels separately
#[derive(Default)]
pub struct LdtkProjectLoader;

#[derive(Debug, Error)]
pub enum ProjectLoaderError {
    #[error("Failed to parse LDtk project: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),
}

impl AssetLoader for LdtkProjectLoader {
    type Asset = LdtkProjectAsset;
    type Settings = ();
    type Error = ProjectLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            // 1. Parse the project JSON
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let project = LdtkJson::from_slice(&bytes)?;

            let asset_path = load_context.asset_path().path().to_path_buf();

            // 2. Load tileset images as dependencies
            let mut tileset_images = HashMap::default();
            for tileset in &project.defs.tilesets {
                let Some(rel_path) = &tileset.rel_path else {
                    // Internal LDtk icon atlases have no image on disk
                    continue;
                };
                let image_path = resolve_relative_path(&asset_path, rel_path)?;
                let handle: Handle<Image> = load_context.load(image_path);
                tileset_images.insert(tileset.uid, handle);
            }

            // 3. Load external levels as dependencies
            let mut external_levels = HashMap::default();
            if project.external_levels {
                for level in &project.levels {
                    let Some(rel_path) = &level.external_rel_path else {
                        warn!(
                            "Level '{}' has no externalRelPath in a project with external levels",
                            level.identifier
                        );
                        continue;
                    };
                    let level_path = resolve_relative_path(&asset_path, rel_path)?;
                    let handle: Handle<LdtkLevelAsset> = load_context.load(level_path);
                    external_levels.insert(level.iid.clone(), handle);
                }
            }

            debug!(
                "Loaded LDtk project {:?}: {} levels, {} tilesets, {} external levels",
                asset_path,
                project.levels.len(),
                tileset_images.len(),
                external_levels.len()
            );

            Ok(LdtkProjectAsset {
                project,
                tileset_images,
                external_levels,
            })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["ldtk"]
    }
}
