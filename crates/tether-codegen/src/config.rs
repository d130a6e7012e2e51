//! Output target configuration and validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::utils::{clean_path, normalize_path};

const DEFAULT_LOADER_DIR: &str = "/dist/loader";
const DEFAULT_CUSTOM_ELEMENTS_DIR: &str = "components";

/// Target framework for generated wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Kdu,
}

/// A string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s.clone()],
            OneOrMany::Many(v) => v.clone(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            OneOrMany::One(s) => s == value,
            OneOrMany::Many(v) => v.iter().any(|s| s == value),
        }
    }
}

/// Model binding override for a group of elements.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentModelConfig {
    /// Tag names this model applies to
    pub elements: OneOrMany,

    /// DOM event(s) that signal a model change
    pub event: OneOrMany,

    /// Element property bound by the model
    #[serde(alias = "targetAttr")]
    pub target_attr: String,

    /// Event the wrapper re-emits after the model is updated
    #[serde(default, alias = "externalEvent")]
    pub external_event: Option<String>,
}

/// Output target options as written in the config file.
///
/// Flags are kept optional so validation can tell an explicit setting from a
/// default.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputTargetConfig {
    pub framework: Framework,

    #[serde(default, alias = "proxiesFile")]
    pub proxies_file: Option<PathBuf>,

    #[serde(default, alias = "componentCorePackage")]
    pub component_core_package: Option<String>,

    #[serde(default, alias = "excludeComponents")]
    pub exclude_components: Vec<String>,

    #[serde(default, alias = "componentModels")]
    pub component_models: Vec<ComponentModelConfig>,

    #[serde(default, alias = "includePolyfills")]
    pub include_polyfills: Option<bool>,

    #[serde(default, alias = "includeDefineCustomElements")]
    pub include_define_custom_elements: Option<bool>,

    #[serde(default, alias = "includeImportCustomElements")]
    pub include_import_custom_elements: Option<bool>,

    #[serde(default, alias = "customElementsDir")]
    pub custom_elements_dir: Option<String>,

    #[serde(default, alias = "loaderDir")]
    pub loader_dir: Option<String>,
}

impl OutputTargetConfig {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            proxies_file: None,
            component_core_package: None,
            exclude_components: Vec::new(),
            component_models: Vec::new(),
            include_polyfills: None,
            include_define_custom_elements: None,
            include_import_custom_elements: None,
            custom_elements_dir: None,
            loader_dir: None,
        }
    }

    /// Validate and apply defaults.
    ///
    /// A relative `proxies_file` is resolved against `root_dir`.
    pub fn normalize(&self, root_dir: Option<&Path>) -> Result<OutputTarget, ConfigError> {
        let root_dir = root_dir.ok_or(ConfigError::MissingRootDir)?;
        let proxies_file = self
            .proxies_file
            .as_ref()
            .ok_or(ConfigError::MissingProxiesFile)?;

        let import = self.include_import_custom_elements.unwrap_or(false);
        if import && self.include_define_custom_elements == Some(true) {
            return Err(ConfigError::DefineWithImport);
        }
        if import && self.include_polyfills == Some(true) {
            return Err(ConfigError::PolyfillsWithImport);
        }

        // Eager imports register elements themselves, so the lazy-loading
        // defaults flip off with them.
        let include_define_custom_elements = self.include_define_custom_elements.unwrap_or(!import);
        let include_polyfills = self.include_polyfills.unwrap_or(!import);

        let proxies_file = if proxies_file.is_absolute() {
            proxies_file.clone()
        } else {
            clean_path(&root_dir.join(proxies_file))
        };

        Ok(OutputTarget {
            framework: self.framework,
            root_dir: root_dir.to_path_buf(),
            proxies_file,
            component_core_package: self.component_core_package.clone(),
            exclude_components: self.exclude_components.clone(),
            component_models: self.component_models.clone(),
            include_polyfills,
            include_define_custom_elements,
            include_import_custom_elements: import,
            custom_elements_dir: self.custom_elements_dir.clone(),
            loader_dir: self.loader_dir.clone(),
        })
    }
}

/// A validated output target.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    pub framework: Framework,
    pub root_dir: PathBuf,
    pub proxies_file: PathBuf,
    pub component_core_package: Option<String>,
    pub exclude_components: Vec<String>,
    pub component_models: Vec<ComponentModelConfig>,
    pub include_polyfills: bool,
    pub include_define_custom_elements: bool,
    pub include_import_custom_elements: bool,
    pub custom_elements_dir: Option<String>,
    pub loader_dir: Option<String>,
}

/// How generated wrappers get their custom elements registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Import and call each element's `defineCustomElement` (tree-shakeable).
    DefineCustomElement,
    /// Lazy loader, bootstrapped through `applyPolyfills`.
    LazyWithPolyfills,
    /// Lazy loader without polyfills.
    Lazy,
    /// The consumer registers elements itself.
    None,
}

impl OutputTarget {
    pub fn import_strategy(&self) -> ImportStrategy {
        if self.include_import_custom_elements && self.component_core_package.is_some() {
            ImportStrategy::DefineCustomElement
        } else if self.include_define_custom_elements && self.include_polyfills {
            ImportStrategy::LazyWithPolyfills
        } else if self.include_define_custom_elements {
            ImportStrategy::Lazy
        } else {
            ImportStrategy::None
        }
    }

    pub fn custom_elements_dir(&self) -> &str {
        self.custom_elements_dir
            .as_deref()
            .unwrap_or(DEFAULT_CUSTOM_ELEMENTS_DIR)
    }

    /// Module specifier of the lazy loader.
    pub fn loader_path(&self) -> String {
        let base = self.component_core_package.as_deref().unwrap_or("");
        let loader_dir = self.loader_dir.as_deref().unwrap_or(DEFAULT_LOADER_DIR);
        let joined = match (base.is_empty(), loader_dir.starts_with('/')) {
            (true, _) => loader_dir.to_string(),
            (false, true) => format!("{base}{loader_dir}"),
            (false, false) => format!("{base}/{loader_dir}"),
        };
        normalize_path(&joined)
    }

    /// Whether a tag is excluded from generation.
    pub fn is_excluded(&self, tag_name: &str) -> bool {
        self.exclude_components.iter().any(|t| t == tag_name)
    }

    /// The model override for a tag, if any.
    pub fn model_for(&self, tag_name: &str) -> Option<&ComponentModelConfig> {
        self.component_models
            .iter()
            .find(|m| m.elements.contains(tag_name))
    }
}

/// Fatal configuration errors, raised before anything is generated.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rootDir is not set and it should be set by the build tool")]
    MissingRootDir,

    #[error("proxiesFile is required")]
    MissingProxiesFile,

    #[error(
        "includeDefineCustomElements cannot be used at the same time as includeImportCustomElements \
         since includeDefineCustomElements is used for lazy loading components. \
         Set `include_define_custom_elements = false` to resolve this."
    )]
    DefineWithImport,

    #[error(
        "includePolyfills cannot be used at the same time as includeImportCustomElements. \
         Set `include_polyfills = false` to resolve this."
    )]
    PolyfillsWithImport,
}
