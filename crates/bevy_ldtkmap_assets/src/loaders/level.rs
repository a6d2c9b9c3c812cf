use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    tasks::ConditionalSendFuture,
};
use thiserror::Error;

use crate::assets::level::LdtkLevelAsset;
use crate::json::Level;

/// Asset loader for external LDtk levels (.ldtkl files)
#[derive(Default)]
pub struct LdtkLevelLoader;

#[derive(Debug, Error)]
pub enum LevelLoaderError {
    #[error("Failed to parse LDtk level: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssetLoader for LdtkLevelLoader {
    type Asset = LdtkLevelAsset;
    type Settings = ();
    type Error = LevelLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let level = Level::from_slice(&bytes)?;

            Ok(LdtkLevelAsset { level })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["ldtkl"]
    }
}
