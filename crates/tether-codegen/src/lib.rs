//! Wrapper proxy generation for custom element libraries.
//!
//! Takes the compiler's component metadata and an output-target
//! configuration, and emits one source file of framework wrappers per target
//! along with the runtime library those wrappers import.

pub mod config;
pub mod generator;
pub mod metadata;
pub mod output;
pub mod package;
pub mod runtime;
pub mod targets;
pub mod utils;

pub use config::{ComponentModelConfig, ConfigError, Framework, ImportStrategy, OutputTarget, OutputTargetConfig};
pub use generator::{filter_components, generate_proxies};
pub use metadata::{load_metadata, parse_metadata, ComponentMeta, MetadataError};
pub use output::{
    generate_all, generate_project, normalize_targets, EnvironmentError, GenerateError,
    GeneratedOutput, OutputSys, StdSys,
};
pub use package::{read_package_json, PackageJson};
pub use targets::{target_for, FrameworkTarget};
