//! Write a starter configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: PathBuf, yes: bool) -> Result<()> {
    tracing::info!("Initializing tether...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'tether generate' to write wrapper proxies.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Tether Configuration

# Project root; relative paths below resolve against it
root_dir = "."

# Compiler metadata: a JSON file or a directory of JSON files
metadata = "components.json"

# package.json whose `types` entry locates components.d.ts
package_json = "package.json"

[[targets]]
framework = "react"
proxies_file = "../my-lib-react/src/components.ts"
component_core_package = "my-lib"
exclude_components = []

[[targets]]
framework = "kdu"
proxies_file = "../my-lib-kdu/src/proxies.ts"
component_core_package = "my-lib"

# Two-way binding for form elements
[[targets.component_models]]
elements = ["my-input"]
event = "myInput"
target_attr = "value"
external_event = "myChange"
"#;
