use bevy::{
    asset::{
        AssetLoader, LoadContext, ReadAssetBytesError,
        io::{AssetReaderError, Reader},
    },
    prelude::*,
    tasks::ConditionalSendFuture,
};
use thiserror::Error;

use crate::assets::simplified::{LdtkSimplifiedLevelAsset, SimplifiedLevelData};
use crate::csv::{CsvError, IntGridCsv, parse_int_grid_csv};
use crate::loaders::{InvalidPathError, resolve_relative_path};

/// Name of the flattened level image LDtk writes next to `data.json`.
pub const COMPOSITE_FILENAME: &str = "_composite.png";

/// Name of the collision grid CSV LDtk writes for an int-grid layer named "Collisions".
pub const COLLISIONS_FILENAME: &str = "Collisions.csv";

/// Asset loader for LDtk "super simple export" levels (`data.json`).
///
/// The loader registers no extension: `.json` is far too generic to claim.
/// Bevy picks it from the asset type, so load these with an explicit type:
///
/// ```rust,ignore
/// let handle: Handle<LdtkSimplifiedLevelAsset> =
///     asset_server.load("levels/simplified/Level_0/data.json");
/// ```
///
/// The composite image is loaded as a dependency. `Collisions.csv` is read
/// during loading; when it doesn't exist the level simply has no collisions.
/// Any other read failure fails the load.
#[derive(Default)]
pub struct LdtkSimplifiedLevelLoader;

#[derive(Debug, Error)]
pub enum SimplifiedLoaderError {
    #[error("Failed to parse data.json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse {COLLISIONS_FILENAME}: {0}")]
    Csv(#[from] CsvError),

    #[error("{COLLISIONS_FILENAME} is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {COLLISIONS_FILENAME}: {0}")]
    Read(#[from] ReadAssetBytesError),

    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),
}

impl AssetLoader for LdtkSimplifiedLevelLoader {
    type Asset = LdtkSimplifiedLevelAsset;
    type Settings = ();
    type Error = SimplifiedLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let data = SimplifiedLevelData::from_slice(&bytes)?;

            let asset_path = load_context.asset_path().path().to_path_buf();

            let composite_path = resolve_relative_path(&asset_path, COMPOSITE_FILENAME)?;
            let composite: Handle<Image> = load_context.load(composite_path);

            let collisions_path = resolve_relative_path(&asset_path, COLLISIONS_FILENAME)?;
            let collisions = collisions_from_read(
                load_context.read_asset_bytes(collisions_path).await,
                &data.identifier,
            )?;

            Ok(LdtkSimplifiedLevelAsset {
                data,
                composite,
                collisions,
            })
        }
    }

    fn extensions(&self) -> &[&str] {
        &[]
    }
}

/// Turn the result of reading `Collisions.csv` into the parsed grid.
///
/// Only a missing file means "no collisions".
fn collisions_from_read(
    read: Result<Vec<u8>, ReadAssetBytesError>,
    level_identifier: &str,
) -> Result<Option<IntGridCsv>, SimplifiedLoaderError> {
    match read {
        Ok(csv_bytes) => {
            let text = String::from_utf8(csv_bytes)?;
            Ok(Some(parse_int_grid_csv(&text)?))
        }
        Err(ReadAssetBytesError::AssetReaderError(AssetReaderError::NotFound(_))) => {
            info!(
                "No {} for level '{}', skipping collisions",
                COLLISIONS_FILENAME, level_identifier
            );
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_missing_collisions_is_absent() {
        let read = Err(ReadAssetBytesError::AssetReaderError(
            AssetReaderError::NotFound(PathBuf::from("Level_0/Collisions.csv")),
        ));

        assert!(collisions_from_read(read, "Level_0").unwrap().is_none());
    }

    #[test]
    fn test_collisions_read_error_fails_load() {
        let read = Err(ReadAssetBytesError::AssetReaderError(AssetReaderError::Io(
            Arc::new(io::Error::from(io::ErrorKind::PermissionDenied)),
        )));

        let err = collisions_from_read(read, "Level_0").unwrap_err();
        assert!(matches!(err, SimplifiedLoaderError::Read(_)));
    }

    #[test]
    fn test_collisions_are_parsed() {
        let grid = collisions_from_read(Ok(b"0,1,\n1,1,\n".to_vec()), "Level_0")
            .unwrap()
            .unwrap();

        assert_eq!(grid.width, 2);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.values, vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_claims_no_extension() {
        assert!(LdtkSimplifiedLevelLoader.extensions().is_empty());
    }
}
