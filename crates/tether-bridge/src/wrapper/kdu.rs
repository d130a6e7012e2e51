//! Kdu-style container wrapper.
//!
//! Every declared prop defaults to the sentinel, so "not supplied" is
//! detected the same way whether or not the host materializes unused props.
//! The container supports a two-way model binding and click-to-navigate
//! through an injected navigation manager.

use std::cell::RefCell;
use std::rc::Rc;

use crate::classes::ClassTracker;
use crate::descriptor::{ComponentDescriptor, DescriptorError};
use crate::element::{Event, HostElement, Listener};
use crate::events::{attach_event_bridge, callback_prop_name, EventBridge, HostEvents};
use crate::model::{Emitter, ModelBinding, MODEL_VALUE, UPDATE_VALUE_EVENT};
use crate::navigation::{handle_click, NavManager, WrapperContext, ROUTER_LINK};
use crate::props::{supplied, PropSnapshot, PropValue, EMPTY_PROP};
use crate::reconcile::{apply, reconcile};
use crate::wrapper::BridgeError;

/// A defined container component, ready to be instantiated.
#[derive(Debug, Clone)]
pub struct ContainerDefinition {
    descriptor: Rc<ComponentDescriptor>,
}

/// Define a container for a custom element.
///
/// `define_custom_element` registers the element eagerly when the wrapper is
/// defined instead of relying on a lazy loader.
pub fn define_container(
    descriptor: ComponentDescriptor,
    define_custom_element: Option<fn()>,
) -> Result<ContainerDefinition, DescriptorError> {
    descriptor.validate()?;

    if let Some(define) = define_custom_element {
        define();
    }

    Ok(ContainerDefinition {
        descriptor: Rc::new(descriptor),
    })
}

impl ContainerDefinition {
    pub fn display_name(&self) -> &str {
        &self.descriptor.tag_name
    }

    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    /// Props the container declares: `routerLink`, the element's props, and
    /// `modelValue` when it has a model.
    pub fn prop_names(&self) -> Vec<String> {
        let mut names = vec![ROUTER_LINK.to_string()];
        names.extend(self.descriptor.props.iter().cloned());
        if self.descriptor.model_prop.is_some() {
            names.push(MODEL_VALUE.to_string());
        }
        names
    }

    /// Every declared prop set to the sentinel.
    pub fn default_props(&self) -> PropSnapshot {
        self.prop_names()
            .into_iter()
            .map(|name| (name, EMPTY_PROP))
            .collect()
    }

    /// Signals the container may emit.
    pub fn emits(&self) -> Vec<String> {
        declared_emits(&self.descriptor)
    }

    pub fn instantiate(&self, ctx: WrapperContext, emit: Emitter) -> Container {
        Container {
            model: ModelBinding::for_descriptor(&self.descriptor),
            descriptor: Rc::clone(&self.descriptor),
            ctx,
            emit,
            props: Rc::new(RefCell::new(PropSnapshot::new())),
            applied: PropSnapshot::new(),
            classes: ClassTracker::new(),
            element: None,
            bridge: None,
        }
    }
}

fn declared_emits(descriptor: &ComponentDescriptor) -> Vec<String> {
    if descriptor.model_prop.is_none() {
        return Vec::new();
    }
    let mut emits = vec![UPDATE_VALUE_EVENT.to_string()];
    emits.extend(descriptor.secondary_event.iter().cloned());
    emits
}

/// One live container instance.
pub struct Container {
    descriptor: Rc<ComponentDescriptor>,
    ctx: WrapperContext,
    emit: Emitter,
    model: Option<ModelBinding>,
    /// Latest props, shared with the click listener so it never sees a
    /// stale render.
    props: Rc<RefCell<PropSnapshot>>,
    /// What was last pushed onto the element.
    applied: PropSnapshot,
    classes: ClassTracker,
    element: Option<Rc<dyn HostElement>>,
    bridge: Option<EventBridge>,
}

impl Container {
    /// Take ownership of the element, attach listeners, and render.
    pub fn mount(
        &mut self,
        element: Rc<dyn HostElement>,
        props: PropSnapshot,
    ) -> Result<(), BridgeError> {
        if self.element.is_some() {
            return Err(BridgeError::AlreadyMounted(self.descriptor.tag_name.clone()));
        }

        let mut bridge = attach_event_bridge(
            Rc::clone(&element),
            &self.descriptor,
            self.model.as_ref(),
            &self.emit,
        );
        bridge.listen("click", self.click_listener());

        self.element = Some(element);
        self.bridge = Some(bridge);
        self.render(props);
        Ok(())
    }

    /// Re-render with new props.
    pub fn update(&mut self, props: PropSnapshot) -> Result<(), BridgeError> {
        if self.element.is_none() {
            return Err(BridgeError::NotMounted(self.descriptor.tag_name.clone()));
        }
        self.render(props);
        Ok(())
    }

    /// Detach every listener and release the element.
    pub fn unmount(&mut self) {
        if let Some(mut bridge) = self.bridge.take() {
            bridge.detach();
        }
        self.element = None;
        self.applied.clear();
        self.props.borrow_mut().clear();
        self.model = ModelBinding::for_descriptor(&self.descriptor);
        self.classes = ClassTracker::new();
    }

    pub fn element(&self) -> Option<&Rc<dyn HostElement>> {
        self.element.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.element.is_some()
    }

    fn click_listener(&self) -> Listener {
        let props = Rc::clone(&self.props);
        let ctx = self.ctx.clone();

        Rc::new(move |event: &Event| {
            // Clone so the user's handler may trigger a re-render.
            let snapshot = props.borrow().clone();
            let nav: Option<&dyn NavManager> = ctx.nav_manager().map(|n| &**n);
            handle_click(event, &snapshot, nav);
        })
    }

    fn render(&mut self, props: PropSnapshot) {
        let Some(element) = self.element.clone() else {
            return;
        };

        let mut next: PropSnapshot = props
            .iter()
            .filter(|(key, value)| !value.is_empty() && key.as_str() != MODEL_VALUE)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some(model) = &self.model {
            match model.resolve(&props) {
                Some(value) => {
                    next.insert(model.prop().to_string(), value);
                }
                None => {
                    next.remove(model.prop());
                }
            }
        }

        apply(element.as_ref(), &reconcile(&self.applied, &next));

        if let Some(bridge) = self.bridge.as_mut() {
            // onClick runs through the click listener, ahead of navigation.
            // Declared emits reach their consumers through `emit` only.
            let mut callbacks = props.clone();
            callbacks.remove("onClick");
            for name in declared_emits(&self.descriptor) {
                callbacks.remove(&callback_prop_name(&name));
            }
            bridge.sync_callbacks(&callbacks, &HostEvents::none());
        }

        let class_prop = supplied(&props, "class").and_then(PropValue::as_str);
        self.classes.record(class_prop);
        let live = element.class_list();
        let class_name = self.classes.class_name(&live, class_prop);
        if class_name != live.join(" ") {
            element.set_class_name(&class_name);
        }

        self.applied = next;
        *self.props.borrow_mut() = props;
    }
}
