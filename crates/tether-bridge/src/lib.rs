//! Runtime interop bridge between framework wrappers and custom elements.
//!
//! A generated wrapper owns one custom element and, on every mount and update,
//! pushes its props onto that element, forwards the element's events back to
//! the host framework, and keeps two-way model bindings in sync.
//!
//! The bridge is host-agnostic: anything implementing [`HostElement`] can be
//! driven by it. [`VirtualElement`] is an in-memory host used by tests and by
//! tooling that needs to observe what a wrapper would do to the DOM.

pub mod case;
pub mod classes;
pub mod classify;
pub mod descriptor;
pub mod element;
pub mod events;
pub mod model;
pub mod navigation;
pub mod props;
pub mod reconcile;
pub mod wrapper;

pub use classify::{attribute_value, classify, read_attribute, AttributeKind, Binding};
pub use descriptor::{ComponentDescriptor, DescriptorError};
pub use element::{Event, HostElement, Listener, ListenerId, VirtualElement};
pub use events::{attach_event_bridge, EventBinding, EventBridge, HostEvents};
pub use model::{Emitted, Emitter, ModelBinding, MODEL_VALUE, UPDATE_VALUE_EVENT};
pub use navigation::{NavManager, NavigationOutcome, NavigationPayload, WrapperContext};
pub use props::{supplied, Callback, PropSnapshot, PropValue, EMPTY_PROP};
pub use reconcile::{apply, reconcile, Mutation};
pub use wrapper::kdu::{define_container, Container, ContainerDefinition};
pub use wrapper::react::{create_react_component, ReactComponent, ReactComponentDef, RenderedElement};
pub use wrapper::{BridgeError, ElementRef};
