//! Kdu proxies.

use tether_bridge::ComponentDescriptor;

use crate::config::ImportStrategy;
use crate::runtime::{RuntimeFile, KDU_RUNTIME};
use crate::targets::{define_fn_name, FrameworkTarget, IMPORT_TYPES};
use crate::utils::{dash_to_pascal_case, escape_string};

/// Emits `defineContainer` wrappers with model and router support.
#[derive(Debug, Default)]
pub struct KduTarget;

impl FrameworkTarget for KduTarget {
    fn name(&self) -> &'static str {
        "kdu"
    }

    fn runtime_dir(&self) -> &'static str {
        "kdu-component-lib"
    }

    fn runtime_files(&self) -> &'static [RuntimeFile] {
        KDU_RUNTIME
    }

    fn runtime_import(&self) -> String {
        format!("import {{ defineContainer }} from './{}/utils';", self.runtime_dir())
    }

    fn component_definition(
        &self,
        descriptor: &ComponentDescriptor,
        strategy: ImportStrategy,
    ) -> String {
        let pascal = dash_to_pascal_case(&descriptor.tag_name);
        let tag_name = escape_string(&descriptor.tag_name);

        let define = match strategy {
            ImportStrategy::DefineCustomElement => define_fn_name(&descriptor.tag_name),
            _ => "undefined".to_string(),
        };

        let model_type = descriptor
            .model_prop
            .as_ref()
            .map(|prop| format!(", {IMPORT_TYPES}.{pascal}[\"{prop}\"]"))
            .unwrap_or_default();

        let mut out = format!(
            "export const {pascal} = /*@__PURE__*/ defineContainer<{IMPORT_TYPES}.{pascal}{model_type}>('{tag_name}', {define}"
        );

        if !descriptor.props.is_empty() {
            let props = descriptor
                .props
                .iter()
                .map(|p| format!("  '{}'", escape_string(p)))
                .collect::<Vec<_>>()
                .join(",\n");
            out.push_str(&format!(", [\n{props}\n]"));
        } else if descriptor.model_prop.is_some() {
            out.push_str(", []");
        }

        if let Some(prop) = &descriptor.model_prop {
            let events = match descriptor.model_update_events.as_slice() {
                [] => "undefined".to_string(),
                [one] => quote(one),
                many => format!(
                    "[{}]",
                    many.iter().map(|e| quote(e)).collect::<Vec<_>>().join(", ")
                ),
            };
            let external = descriptor
                .secondary_event
                .as_deref()
                .map(quote)
                .unwrap_or_else(|| "undefined".to_string());
            out.push_str(&format!(",\n{}, {events}, {external}", quote(prop)));
        }

        out.push_str(");\n");
        out
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", escape_string(s))
}
