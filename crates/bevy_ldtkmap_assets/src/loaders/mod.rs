use normalize_path::NormalizePath;
use thiserror::Error;

pub mod level;
pub mod project;
pub mod simplified;
pub mod world;

/// Failure to turn a path found in an LDtk file into a Bevy asset path.
#[derive(Debug, Error)]
#[error("Invalid path: {0}")]
pub struct InvalidPathError(pub String);

/// Resolve a path relative to an LDtk file into a Bevy asset path.
///
/// LDtk stores paths like `../atlas/tiles.png` relative to the `.ldtk` file,
/// but Bevy's asset system expects asset-root-relative paths like
/// `atlas/tiles.png`.
///
/// This function:
/// 1. Normalizes path separators (Windows `\` → `/`)
/// 2. Joins the relative path to the parent directory of `asset_path`
/// 3. Resolves `..` and `.` components
///
/// # Arguments
/// * `asset_path` - Asset-root-relative path of the file that holds the reference
/// * `relative_path` - The path as written in the LDtk file
pub fn resolve_relative_path(
    asset_path: &std::path::Path,
    relative_path: &str,
) -> Result<String, InvalidPathError> {
    let relative_path = relative_path.replace('\\', "/");

    let parent = asset_path.parent().unwrap_or_else(|| std::path::Path::new(""));
    let parent_str = parent
        .to_str()
        .ok_or_else(|| InvalidPathError(format!("Invalid UTF-8 in path: {:?}", parent)))?
        .replace('\\', "/");

    // Join with forward slash (avoid Path::join which has platform-specific behavior)
    let full_path = if parent_str.is_empty() {
        relative_path
    } else {
        format!("{}/{}", parent_str, relative_path)
    };

    let normalized = std::path::Path::new(&full_path).normalize();

    normalized
        .to_str()
        .map(|s| s.replace('\\', "/"))
        .ok_or_else(|| InvalidPathError(format!("Invalid UTF-8 in path: {:?}", normalized)))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_resolve_sibling() {
        let path = resolve_relative_path(Path::new("levels/world.ldtk"), "tiles.png").unwrap();
        assert_eq!(path, "levels/tiles.png");
    }

    #[test]
    fn test_resolve_parent_dir() {
        let path =
            resolve_relative_path(Path::new("levels/world.ldtk"), "../atlas/tiles.png").unwrap();
        assert_eq!(path, "atlas/tiles.png");
    }

    #[test]
    fn test_resolve_backslashes_at_root() {
        let path = resolve_relative_path(Path::new("world.ldtk"), "world\\Level_0.ldtkl").unwrap();
        assert_eq!(path, "world/Level_0.ldtkl");
    }
}
