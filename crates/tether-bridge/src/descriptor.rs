//! Component descriptors: the wrapper configuration for one custom element.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// Lowercase, starts with a letter, contains a hyphen.
static TAG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9._]*-[a-z0-9._-]*$").expect("Invalid tag name regex")
});

/// Everything a wrapper needs to know about its custom element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Custom element tag name (e.g., "ion-input")
    pub tag_name: String,

    /// Declared prop names, in declaration order
    #[serde(default)]
    pub props: Vec<String>,

    /// Property that two-way binding reads and writes (e.g., "value")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_prop: Option<String>,

    /// DOM events that signal a model change (e.g., "ionInput")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub model_update_events: Vec<String>,

    /// Event re-emitted by the wrapper once the model has been updated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_event: Option<String>,
}

impl ComponentDescriptor {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }

    pub fn with_props<I, S>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.props = props.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_model<I, S>(mut self, prop: impl Into<String>, update_events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model_prop = Some(prop.into());
        self.model_update_events = update_events.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_secondary_event(mut self, event: impl Into<String>) -> Self {
        self.secondary_event = Some(event.into());
        self
    }

    /// Check the tag name and prop uniqueness.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if !is_valid_tag_name(&self.tag_name) {
            return Err(DescriptorError::InvalidTagName(self.tag_name.clone()));
        }

        let mut seen = HashSet::new();
        for prop in &self.props {
            if !seen.insert(prop.as_str()) {
                return Err(DescriptorError::DuplicateProp {
                    tag_name: self.tag_name.clone(),
                    prop: prop.clone(),
                });
            }
        }

        if self.model_prop.is_none() && !self.model_update_events.is_empty() {
            return Err(DescriptorError::EventsWithoutModel(self.tag_name.clone()));
        }

        Ok(())
    }
}

/// Whether a string is a usable custom element name.
pub fn is_valid_tag_name(tag_name: &str) -> bool {
    TAG_NAME_RE.is_match(tag_name)
}

/// Errors in a component descriptor.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Invalid custom element name: {0:?} (must be lowercase and contain a hyphen)")]
    InvalidTagName(String),

    #[error("Duplicate prop {prop:?} on <{tag_name}>")]
    DuplicateProp { tag_name: String, prop: String },

    #[error("<{0}> declares model update events without a model prop")]
    EventsWithoutModel(String),
}
