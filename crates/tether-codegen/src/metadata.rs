//! Compiler metadata: the component records emitted by the component compiler.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use tether_bridge::{ComponentDescriptor, DescriptorError};

use crate::config::ComponentModelConfig;

/// A named member (property or event) of a compiled component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberMeta {
    pub name: String,
}

/// One compiled component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    /// Custom element tag name
    pub tag_name: String,

    /// Declared properties, in declaration order
    #[serde(default)]
    pub properties: Vec<MemberMeta>,

    /// Declared events, in declaration order
    #[serde(default)]
    pub events: Vec<MemberMeta>,

    /// Internal components are never wrapped
    #[serde(default)]
    pub internal: bool,
}

impl ComponentMeta {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Vec::new(),
            events: Vec::new(),
            internal: false,
        }
    }

    /// Wrapper prop names: properties, then events, without duplicates.
    pub fn declared_props(&self) -> Vec<String> {
        let mut props: Vec<String> = Vec::new();
        for member in self.properties.iter().chain(&self.events) {
            if !props.contains(&member.name) {
                props.push(member.name.clone());
            }
        }
        props
    }

    /// The wrapper descriptor, with the model override applied if one
    /// matches this tag.
    pub fn to_descriptor(
        &self,
        models: &[ComponentModelConfig],
    ) -> Result<ComponentDescriptor, DescriptorError> {
        let mut descriptor = ComponentDescriptor::new(&self.tag_name).with_props(self.declared_props());

        if let Some(model) = models.iter().find(|m| m.elements.contains(&self.tag_name)) {
            descriptor = descriptor.with_model(&model.target_attr, model.event.to_vec());
            if let Some(external) = &model.external_event {
                descriptor = descriptor.with_secondary_event(external);
            }
        }

        descriptor.validate()?;
        Ok(descriptor)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MetadataDocument {
    List(Vec<ComponentMeta>),
    Document { components: Vec<ComponentMeta> },
}

/// Parse a metadata document: either a list of components or an object with
/// a `components` list.
pub fn parse_metadata(source: &str) -> Result<Vec<ComponentMeta>, MetadataError> {
    let document: MetadataDocument =
        serde_json::from_str(source).map_err(|e| MetadataError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;

    Ok(match document {
        MetadataDocument::List(components) => components,
        MetadataDocument::Document { components } => components,
    })
}

/// Load metadata from a JSON file, or from every `.json` file under a
/// directory.
pub fn load_metadata(path: &Path) -> Result<Vec<ComponentMeta>, MetadataError> {
    if !path.exists() {
        return Err(MetadataError::NotFound(path.display().to_string()));
    }

    if path.is_file() {
        return load_file(path);
    }

    let mut components = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file = entry.path();
        if file.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        components.extend(load_file(file)?);
    }

    tracing::debug!(
        "Loaded {} component records from {}",
        components.len(),
        path.display()
    );

    Ok(components)
}

fn load_file(path: &Path) -> Result<Vec<ComponentMeta>, MetadataError> {
    let source = fs::read_to_string(path).map_err(|e| MetadataError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    parse_metadata(&source).map_err(|e| match e {
        MetadataError::Parse { message, .. } => MetadataError::Parse {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })
}

/// Errors loading compiler metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Component metadata not found: {0}")]
    NotFound(String),

    #[error("Failed to read component metadata: {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse component metadata: {path}: {message}")]
    Parse { path: String, message: String },
}
