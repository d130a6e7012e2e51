//! Proxy file assembly.

use std::path::Path;

use tether_bridge::ComponentDescriptor;

use crate::config::{ImportStrategy, OutputTarget};
use crate::metadata::ComponentMeta;
use crate::targets::{define_fn_name, target_for, IMPORT_TYPES};
use crate::utils::{normalize_path, relative_import};

const APPLY_POLYFILLS: &str = "applyPolyfills";
const REGISTER_CUSTOM_ELEMENTS: &str = "defineCustomElements";

/// Components to wrap for a target: sorted by tag, minus excluded and
/// internal ones.
pub fn filter_components<'a>(
    components: &'a [ComponentMeta],
    target: &OutputTarget,
) -> Vec<&'a ComponentMeta> {
    let mut filtered: Vec<&ComponentMeta> = components
        .iter()
        .filter(|c| !target.is_excluded(&c.tag_name) && !c.internal)
        .collect();
    filtered.sort_by(|a, b| a.tag_name.cmp(&b.tag_name));
    filtered
}

/// Build the complete proxies file for one target.
///
/// # Arguments
/// * `descriptors` - Wrappers to emit, in output order
/// * `target` - Normalized output target
/// * `components_dts` - Absolute path of the compiler's generated
///   `components.d.ts`, used when no core package is configured
pub fn generate_proxies(
    descriptors: &[ComponentDescriptor],
    target: &OutputTarget,
    components_dts: &Path,
) -> String {
    let framework = target_for(target.framework);
    let strategy = target.import_strategy();

    let header = format!(
        "/* eslint-disable */\n/* tslint:disable */\n/* auto-generated {} proxies */\n{}\n",
        framework.name(),
        framework.runtime_import()
    );

    let type_import = type_import(target, components_dts);

    let (source_imports, register) = match strategy {
        ImportStrategy::DefineCustomElement => {
            let package = normalize_path(target.component_core_package.as_deref().unwrap_or(""));
            let imports = descriptors
                .iter()
                .map(|d| {
                    format!(
                        "import {{ defineCustomElement as {} }} from '{}/{}/{}.js';",
                        define_fn_name(&d.tag_name),
                        package,
                        target.custom_elements_dir(),
                        d.tag_name
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            (imports, String::new())
        }
        ImportStrategy::LazyWithPolyfills => (
            format!(
                "import {{ {APPLY_POLYFILLS}, {REGISTER_CUSTOM_ELEMENTS} }} from '{}';\n",
                target.loader_path()
            ),
            format!("{APPLY_POLYFILLS}().then(() => {REGISTER_CUSTOM_ELEMENTS}());"),
        ),
        ImportStrategy::Lazy => (
            format!(
                "import {{ {REGISTER_CUSTOM_ELEMENTS} }} from '{}';\n",
                target.loader_path()
            ),
            format!("{REGISTER_CUSTOM_ELEMENTS}();"),
        ),
        ImportStrategy::None => (String::new(), String::new()),
    };

    let definitions = descriptors
        .iter()
        .map(|d| framework.component_definition(d, strategy))
        .collect::<Vec<_>>()
        .join("\n");

    tracing::debug!(
        "Generated {} {} wrappers ({:?})",
        descriptors.len(),
        framework.name(),
        strategy
    );

    [header, type_import, source_imports, register, definitions].join("\n") + "\n"
}

fn type_import(target: &OutputTarget, components_dts: &Path) -> String {
    match &target.component_core_package {
        Some(package) => {
            let dir = if target.include_import_custom_elements {
                format!("/{}", target.custom_elements_dir())
            } else {
                String::new()
            };
            format!(
                "import type {{ {IMPORT_TYPES} }} from '{}{dir}';\n",
                normalize_path(package)
            )
        }
        None => {
            let relative = relative_import(&target.proxies_file, components_dts, ".d.ts");
            format!("import type {{ {IMPORT_TYPES} }} from '{relative}';\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Framework, OutputTargetConfig};
    use pretty_assertions::assert_eq;

    fn target(framework: Framework, configure: impl FnOnce(&mut OutputTargetConfig)) -> OutputTarget {
        let mut config = OutputTargetConfig::new(framework);
        config.proxies_file = Some("src/proxies.ts".into());
        configure(&mut config);
        config.normalize(Some(Path::new("/app"))).unwrap()
    }

    fn dts() -> &'static Path {
        Path::new("/app/dist/types/components.d.ts")
    }

    #[test]
    fn excluded_components_are_not_generated() {
        let target = target(Framework::React, |c| {
            c.exclude_components = vec!["ion-avatar".into()];
        });
        let metas = vec![ComponentMeta::new("ion-button"), ComponentMeta::new("ion-avatar")];

        let descriptors: Vec<_> = filter_components(&metas, &target)
            .into_iter()
            .map(|m| m.to_descriptor(&target.component_models).unwrap())
            .collect();
        let text = generate_proxies(&descriptors, &target, dts());

        assert_eq!(text.matches("createReactComponent<").count(), 1);
        assert!(text.contains("export const IonButton"));
        assert!(!text.contains("IonAvatar"));
    }

    #[test]
    fn filter_sorts_and_drops_internal() {
        let target = target(Framework::Kdu, |_| {});
        let mut internal = ComponentMeta::new("ion-ripple");
        internal.internal = true;
        let metas = vec![ComponentMeta::new("ion-toggle"), internal, ComponentMeta::new("ion-badge")];

        let tags: Vec<_> = filter_components(&metas, &target)
            .into_iter()
            .map(|m| m.tag_name.as_str())
            .collect();

        assert_eq!(tags, vec!["ion-badge", "ion-toggle"]);
    }

    #[test]
    fn lazy_loading_with_polyfills() {
        let target = target(Framework::Kdu, |c| {
            c.component_core_package = Some("@ionic/core".into());
        });
        let descriptors = vec![ComponentDescriptor::new("ion-badge")];

        let text = generate_proxies(&descriptors, &target, dts());

        assert_eq!(
            text,
            "/* eslint-disable */\n\
             /* tslint:disable */\n\
             /* auto-generated kdu proxies */\n\
             import { defineContainer } from './kdu-component-lib/utils';\n\
             \n\
             import type { JSX } from '@ionic/core';\n\
             \n\
             import { applyPolyfills, defineCustomElements } from '@ionic/core/dist/loader';\n\
             \n\
             applyPolyfills().then(() => defineCustomElements());\n\
             export const IonBadge = /*@__PURE__*/ defineContainer<JSX.IonBadge>('ion-badge', undefined);\n\
             \n"
        );
    }

    #[test]
    fn eager_imports_define_functions() {
        let target = target(Framework::React, |c| {
            c.component_core_package = Some("@ionic/core".into());
            c.include_import_custom_elements = Some(true);
        });
        let descriptors = vec![ComponentDescriptor::new("ion-button")];

        let text = generate_proxies(&descriptors, &target, dts());

        assert!(text.contains("import type { JSX } from '@ionic/core/components';"));
        assert!(text.contains(
            "import { defineCustomElement as defineIonButton } from '@ionic/core/components/ion-button.js';"
        ));
        assert!(text.contains(", undefined, undefined, defineIonButton);"));
        assert!(!text.contains("defineCustomElements"));
    }

    #[test]
    fn types_resolve_relative_without_core_package() {
        let target = target(Framework::React, |c| {
            c.include_define_custom_elements = Some(false);
        });

        let text = generate_proxies(&[], &target, dts());

        assert!(text.contains("import type { JSX } from '../dist/types/components';"));
        assert!(!text.contains("applyPolyfills"));
    }

    #[test]
    fn lazy_without_polyfills() {
        let target = target(Framework::React, |c| {
            c.component_core_package = Some("my-lib".into());
            c.include_polyfills = Some(false);
            c.loader_dir = Some("loader".into());
        });

        let text = generate_proxies(&[], &target, dts());

        assert!(text.contains("import { defineCustomElements } from 'my-lib/loader';\n"));
        assert!(text.contains("\ndefineCustomElements();\n"));
    }
}
