//! The slice of package.json the generator cares about.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::metadata::MetadataError;

/// File the compiler writes its JSX type namespace to.
pub const GENERATED_DTS: &str = "components.d.ts";

const DEFAULT_TYPES: &str = "dist/types/index.d.ts";

/// Fields of package.json used to locate generated types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageJson {
    #[serde(default)]
    pub types: Option<String>,
}

impl PackageJson {
    /// Absolute path of the generated `components.d.ts`, next to the
    /// package's `types` entry.
    pub fn components_dts(&self, root_dir: &Path) -> PathBuf {
        let types = Path::new(self.types.as_deref().unwrap_or(DEFAULT_TYPES));
        let types_dir = types.parent().unwrap_or_else(|| Path::new(""));
        root_dir.join(types_dir).join(GENERATED_DTS)
    }
}

/// Read `package.json` from `root_dir`. A missing file yields defaults.
pub fn read_package_json(root_dir: &Path) -> Result<PackageJson, MetadataError> {
    let path = root_dir.join("package.json");
    if !path.exists() {
        tracing::debug!("No package.json in {}, using default types path", root_dir.display());
        return Ok(PackageJson::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| MetadataError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| MetadataError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn locates_dts_next_to_types_entry() {
        let pkg = PackageJson {
            types: Some("dist/types/index.d.ts".into()),
        };

        assert_eq!(
            pkg.components_dts(Path::new("/app")),
            PathBuf::from("/app/dist/types/components.d.ts")
        );
    }

    #[test]
    fn reads_types_field() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "name": "my-lib", "types": "build/index.d.ts" }"#,
        )
        .unwrap();

        let pkg = read_package_json(temp.path()).unwrap();

        assert_eq!(pkg.types.as_deref(), Some("build/index.d.ts"));
    }

    #[test]
    fn missing_package_json_uses_defaults() {
        let temp = tempdir().unwrap();

        let pkg = read_package_json(temp.path()).unwrap();

        assert!(pkg.types.is_none());
    }
}
