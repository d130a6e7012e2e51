//! Per-framework proxy emitters.

pub mod kdu;
pub mod react;

use tether_bridge::ComponentDescriptor;

use crate::config::{Framework, ImportStrategy};
use crate::runtime::RuntimeFile;

pub use kdu::KduTarget;
pub use react::ReactTarget;

/// Type namespace imported by every generated file.
pub const IMPORT_TYPES: &str = "JSX";

/// Emits wrapper source for one host framework.
pub trait FrameworkTarget: Send + Sync {
    /// Framework identifier (e.g., "react", "kdu")
    fn name(&self) -> &'static str;

    /// Directory the runtime library is written to, next to the proxies file
    fn runtime_dir(&self) -> &'static str;

    /// Files of the runtime library
    fn runtime_files(&self) -> &'static [RuntimeFile];

    /// Import statement that brings the runtime entry point into scope
    fn runtime_import(&self) -> String;

    /// One wrapper definition.
    ///
    /// # Arguments
    /// * `descriptor` - The component to wrap
    /// * `strategy` - How custom elements are registered; the eager strategy
    ///   passes each element's define function to the wrapper
    fn component_definition(
        &self,
        descriptor: &ComponentDescriptor,
        strategy: ImportStrategy,
    ) -> String;
}

static REACT: ReactTarget = ReactTarget;
static KDU: KduTarget = KduTarget;

/// The emitter for a framework.
pub fn target_for(framework: Framework) -> &'static dyn FrameworkTarget {
    match framework {
        Framework::React => &REACT,
        Framework::Kdu => &KDU,
    }
}

/// Local name of an element's eager define function (`defineIonButton`).
pub fn define_fn_name(tag_name: &str) -> String {
    format!("define{}", crate::utils::dash_to_pascal_case(tag_name))
}
