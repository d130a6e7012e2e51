//! Generating and writing every configured target.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::{ConfigError, OutputTarget, OutputTargetConfig};
use crate::generator::{filter_components, generate_proxies};
use crate::metadata::{load_metadata, ComponentMeta, MetadataError};
use crate::package::{read_package_json, PackageJson};
use crate::targets::target_for;

/// File-system capabilities the generator needs from its host.
pub trait OutputSys {
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Whether runtime resources can be copied next to generated output.
    fn supports_copy(&self) -> bool {
        true
    }
}

/// Writes straight to disk, creating parent directories.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdSys;

impl OutputSys for StdSys {
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("the output system cannot copy runtime resources; it is not properly initialized")]
    CopyUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Invalid component: {0}")]
    Descriptor(#[from] tether_bridge::DescriptorError),

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

/// What was written for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    pub proxies_file: PathBuf,
    pub components: usize,
    pub runtime_files: Vec<PathBuf>,
}

struct Rendered {
    target: OutputTarget,
    text: String,
    components: usize,
}

/// Normalize all target configurations, failing on the first invalid one.
pub fn normalize_targets(
    configs: &[OutputTargetConfig],
    root_dir: Option<&Path>,
) -> Result<Vec<OutputTarget>, ConfigError> {
    configs.iter().map(|c| c.normalize(root_dir)).collect()
}

/// Generate and write proxies plus runtime resources for every target.
///
/// Every target is rendered before the first write, so an invalid component
/// or a missing capability leaves the output tree untouched.
pub fn generate_all(
    sys: &dyn OutputSys,
    targets: &[OutputTarget],
    components: &[ComponentMeta],
    package: &PackageJson,
) -> Result<Vec<GeneratedOutput>, GenerateError> {
    if !sys.supports_copy() {
        return Err(EnvironmentError::CopyUnavailable.into());
    }

    let rendered: Result<Vec<Rendered>, GenerateError> = targets
        .par_iter()
        .map(|target| -> Result<Rendered, GenerateError> {
            let descriptors = filter_components(components, target)
                .into_iter()
                .map(|meta| meta.to_descriptor(&target.component_models))
                .collect::<Result<Vec<_>, _>>()?;
            let dts = package.components_dts(&target.root_dir);

            Ok(Rendered {
                target: target.clone(),
                text: generate_proxies(&descriptors, target, &dts),
                components: descriptors.len(),
            })
        })
        .collect();

    rendered?
        .into_iter()
        .map(|r| write_target(sys, r))
        .collect()
}

/// Full pipeline for a project: validate configuration, load metadata and
/// package.json, then generate every target.
///
/// `package_dir` is the directory holding `package.json`, usually the root.
pub fn generate_project(
    sys: &dyn OutputSys,
    root_dir: &Path,
    configs: &[OutputTargetConfig],
    metadata: &Path,
    package_dir: &Path,
) -> Result<Vec<GeneratedOutput>, GenerateError> {
    let targets = normalize_targets(configs, Some(root_dir))?;
    let components = load_metadata(metadata)?;
    let package = read_package_json(package_dir)?;

    tracing::info!(
        "Loaded {} components for {} targets",
        components.len(),
        targets.len()
    );

    generate_all(sys, &targets, &components, &package)
}

fn write_target(sys: &dyn OutputSys, rendered: Rendered) -> Result<GeneratedOutput, GenerateError> {
    let Rendered {
        target,
        text,
        components,
    } = rendered;
    let framework = target_for(target.framework);

    write(sys, &target.proxies_file, &text)?;

    let runtime_dir = target
        .proxies_file
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(framework.runtime_dir());
    let mut runtime_files = Vec::new();
    for file in framework.runtime_files() {
        let path = runtime_dir.join(file.path);
        write(sys, &path, file.contents)?;
        runtime_files.push(path);
    }

    tracing::info!(
        "Wrote {} {} wrappers to {}",
        components,
        framework.name(),
        target.proxies_file.display()
    );

    Ok(GeneratedOutput {
        proxies_file: target.proxies_file,
        components,
        runtime_files,
    })
}

fn write(sys: &dyn OutputSys, path: &Path, contents: &str) -> Result<(), GenerateError> {
    sys.write_file(path, contents).map_err(|e| GenerateError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
