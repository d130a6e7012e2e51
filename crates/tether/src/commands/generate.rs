//! Proxy generation command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tether_codegen::{generate_project, GeneratedOutput, OutputTargetConfig, StdSys};

/// Configuration file structure (tether.toml).
#[derive(Debug, Deserialize)]
struct ConfigFile {
    root_dir: Option<PathBuf>,
    #[serde(default = "default_metadata")]
    metadata: PathBuf,
    package_json: Option<PathBuf>,
    #[serde(default)]
    targets: Vec<OutputTargetConfig>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            root_dir: None,
            metadata: default_metadata(),
            package_json: None,
            targets: Vec::new(),
        }
    }
}

fn default_metadata() -> PathBuf {
    PathBuf::from("components.json")
}

/// Load configuration from the config file if it exists.
/// Returns an error if the file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Run the generate command.
pub async fn run(config_path: PathBuf, metadata: Option<PathBuf>, root: Option<PathBuf>) -> Result<()> {
    tracing::info!("Generating wrapper proxies...");

    let outputs = generate(&config_path, metadata, root)?;
    if outputs.is_empty() {
        tracing::warn!("No targets configured in {}", config_path.display());
        return Ok(());
    }

    let components: usize = outputs.iter().map(|o| o.components).sum();
    tracing::info!(
        "Generated {} wrappers across {} targets",
        components,
        outputs.len()
    );

    Ok(())
}

fn generate(
    config_path: &Path,
    metadata: Option<PathBuf>,
    root: Option<PathBuf>,
) -> Result<Vec<GeneratedOutput>> {
    let config = load_config(config_path)?;
    if config.targets.is_empty() {
        return Ok(Vec::new());
    }

    // Relative paths in the config are relative to the config file.
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let root_dir = match root.or(config.root_dir) {
        Some(root) => resolve(config_dir, &root),
        None => config_dir.to_path_buf(),
    };
    let metadata = match metadata {
        Some(path) => path,
        None => resolve(&root_dir, &config.metadata),
    };
    let package_dir = match &config.package_json {
        Some(path) => resolve(&root_dir, path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root_dir.clone()),
        None => root_dir.clone(),
    };

    tracing::debug!(
        "Root {}, metadata {}",
        root_dir.display(),
        metadata.display()
    );

    generate_project(&StdSys, &root_dir, &config.targets, &metadata, &package_dir)
        .context("Failed to generate proxies")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const METADATA: &str = r#"[
        { "tagName": "ion-button", "properties": [{ "name": "color" }] },
        { "tagName": "ion-avatar" }
    ]"#;

    fn write_project(dir: &Path, config: &str) -> PathBuf {
        fs::write(dir.join("components.json"), METADATA).unwrap();
        let config_path = dir.join("tether.toml");
        fs::write(&config_path, config).unwrap();
        config_path
    }

    #[test]
    fn generates_from_config_file() {
        let temp = tempdir().unwrap();
        let config_path = write_project(
            temp.path(),
            r#"
[[targets]]
framework = "react"
proxies_file = "src/components.ts"
component_core_package = "@ionic/core"
exclude_components = ["ion-avatar"]
"#,
        );

        tokio_test::block_on(run(config_path, None, None)).unwrap();

        let proxies = fs::read_to_string(temp.path().join("src/components.ts")).unwrap();
        assert!(proxies.contains("export const IonButton"));
        assert!(!proxies.contains("IonAvatar"));
        assert!(temp.path().join("src/react-component-lib/index.js").exists());
    }

    #[test]
    fn conflicting_flags_write_nothing() {
        let temp = tempdir().unwrap();
        let config_path = write_project(
            temp.path(),
            r#"
[[targets]]
framework = "kdu"
proxies_file = "src/proxies.ts"
include_import_custom_elements = true
include_define_custom_elements = true
"#,
        );

        let err = tokio_test::block_on(run(config_path, None, None)).unwrap_err();

        assert!(format!("{err:#}").contains("includeDefineCustomElements"));
        assert!(!temp.path().join("src").exists());
    }

    #[test]
    fn missing_config_is_a_no_op() {
        let temp = tempdir().unwrap();

        let outputs = generate(&temp.path().join("tether.toml"), None, None).unwrap();

        assert!(outputs.is_empty());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("tether.toml");
        fs::write(&config_path, "[[targets]]\nframework = 42\n").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[test]
    fn metadata_override_wins() {
        let temp = tempdir().unwrap();
        let config_path = write_project(
            temp.path(),
            "[[targets]]\nframework = \"kdu\"\nproxies_file = \"out/proxies.ts\"\n",
        );
        let other = temp.path().join("other.json");
        fs::write(&other, r#"[{ "tagName": "my-card" }]"#).unwrap();

        let outputs = generate(&config_path, Some(other), None).unwrap();

        assert_eq!(outputs[0].components, 1);
        let proxies = fs::read_to_string(temp.path().join("out/proxies.ts")).unwrap();
        assert!(proxies.contains("'my-card'"));
    }
}
