//! React proxies.

use tether_bridge::ComponentDescriptor;

use crate::config::ImportStrategy;
use crate::runtime::{RuntimeFile, REACT_RUNTIME};
use crate::targets::{define_fn_name, FrameworkTarget, IMPORT_TYPES};
use crate::utils::{dash_to_pascal_case, escape_string};

/// Emits `createReactComponent` wrappers.
#[derive(Debug, Default)]
pub struct ReactTarget;

impl FrameworkTarget for ReactTarget {
    fn name(&self) -> &'static str {
        "react"
    }

    fn runtime_dir(&self) -> &'static str {
        "react-component-lib"
    }

    fn runtime_files(&self) -> &'static [RuntimeFile] {
        REACT_RUNTIME
    }

    fn runtime_import(&self) -> String {
        format!("import {{ createReactComponent }} from './{}';", self.runtime_dir())
    }

    fn component_definition(
        &self,
        descriptor: &ComponentDescriptor,
        strategy: ImportStrategy,
    ) -> String {
        let pascal = dash_to_pascal_case(&descriptor.tag_name);
        let tag_name = escape_string(&descriptor.tag_name);

        let define = match strategy {
            ImportStrategy::DefineCustomElement => {
                format!(", undefined, undefined, {}", define_fn_name(&descriptor.tag_name))
            }
            _ => String::new(),
        };

        format!(
            "export const {pascal} = /*@__PURE__*/createReactComponent<{IMPORT_TYPES}.{pascal}, HTML{pascal}Element>('{tag_name}'{define});"
        )
    }
}
