//! React-style component wrapper.
//!
//! The host renders the element with primitive props as attributes and the
//! callbacks its synthetic event system covers. After mount and after every
//! update the wrapper reconciles the remaining props directly onto the
//! element and syncs the uncovered callbacks as DOM listeners.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::case::{camel_to_dash_case, dash_to_pascal_case};
use crate::classes::merge_class_names;
use crate::classify::attribute_value;
use crate::descriptor::{is_valid_tag_name, DescriptorError};
use crate::element::HostElement;
use crate::events::{callback_event_name, EventBridge, HostEvents};
use crate::props::{supplied, PropSnapshot, PropValue};
use crate::reconcile::{apply, is_element_prop, reconcile};
use crate::wrapper::{merge_refs, BridgeError, ElementRef};

/// A defined React-style component.
#[derive(Debug, Clone)]
pub struct ReactComponentDef {
    tag_name: String,
    display_name: String,
    host_events: HostEvents,
}

/// What the host framework should render for the element.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedElement {
    pub tag_name: String,
    /// Primitive props as kebab-case attributes.
    pub attributes: BTreeMap<String, String>,
    /// Callback props handed to the host's own event system.
    pub callbacks: Vec<String>,
    pub style: Option<String>,
}

/// Define a component for a custom element.
pub fn create_react_component(
    tag_name: &str,
    define_custom_element: Option<fn()>,
) -> Result<ReactComponentDef, DescriptorError> {
    if !is_valid_tag_name(tag_name) {
        return Err(DescriptorError::InvalidTagName(tag_name.to_string()));
    }

    if let Some(define) = define_custom_element {
        define();
    }

    Ok(ReactComponentDef {
        tag_name: tag_name.to_string(),
        display_name: dash_to_pascal_case(tag_name),
        host_events: HostEvents::standard(),
    })
}

impl ReactComponentDef {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Replace the set of events the host dispatches itself.
    pub fn with_host_events(mut self, host_events: HostEvents) -> Self {
        self.host_events = host_events;
        self
    }

    pub fn instantiate(&self, forwarded_ref: Option<ElementRef>) -> ReactComponent {
        ReactComponent {
            def: self.clone(),
            element_ref: ElementRef::new(),
            forwarded_ref,
            bridge: None,
            applied: PropSnapshot::new(),
            class_prop: None,
        }
    }
}

/// One live component instance.
pub struct ReactComponent {
    def: ReactComponentDef,
    element_ref: ElementRef,
    forwarded_ref: Option<ElementRef>,
    bridge: Option<EventBridge>,
    applied: PropSnapshot,
    class_prop: Option<String>,
}

impl ReactComponent {
    /// The host render output for these props.
    pub fn render(&self, props: &PropSnapshot) -> RenderedElement {
        let mut attributes = BTreeMap::new();
        let mut callbacks = Vec::new();

        for (name, value) in props {
            if let Some(event_name) = callback_event_name(name) {
                if self.def.host_events.covers(&event_name) && value.as_callback().is_some() {
                    callbacks.push(name.clone());
                }
            } else if is_element_prop(name) {
                // Only primitives render as attributes; the rest is synced
                // as properties after mount.
                if let Some(attr) = attribute_value(value) {
                    attributes.insert(camel_to_dash_case(name), attr);
                }
            }
        }

        RenderedElement {
            tag_name: self.def.tag_name.clone(),
            attributes,
            callbacks,
            style: supplied(props, "style")
                .and_then(PropValue::as_str)
                .map(str::to_string),
        }
    }

    /// Store the element in every ref and push the initial props.
    pub fn did_mount(
        &mut self,
        element: Rc<dyn HostElement>,
        props: &PropSnapshot,
    ) -> Result<(), BridgeError> {
        if self.element_ref.is_set() {
            return Err(BridgeError::AlreadyMounted(self.def.tag_name.clone()));
        }

        let mut refs = vec![&self.element_ref];
        refs.extend(self.forwarded_ref.as_ref());
        merge_refs(&refs, Some(Rc::clone(&element)));

        self.bridge = Some(EventBridge::new(element));
        self.attach_props(props);
        Ok(())
    }

    /// Push the difference between the last applied props and these.
    pub fn did_update(&mut self, props: &PropSnapshot) -> Result<(), BridgeError> {
        if !self.element_ref.is_set() {
            return Err(BridgeError::NotMounted(self.def.tag_name.clone()));
        }
        self.attach_props(props);
        Ok(())
    }

    /// Detach listeners and clear every ref.
    pub fn will_unmount(&mut self) {
        if let Some(mut bridge) = self.bridge.take() {
            bridge.detach();
        }
        let mut refs = vec![&self.element_ref];
        refs.extend(self.forwarded_ref.as_ref());
        merge_refs(&refs, None);
        self.applied.clear();
        self.class_prop = None;
    }

    pub fn element(&self) -> Option<Rc<dyn HostElement>> {
        self.element_ref.get()
    }

    fn attach_props(&mut self, props: &PropSnapshot) {
        let Some(element) = self.element_ref.get() else {
            return;
        };

        let class_prop = supplied(props, "className")
            .or_else(|| supplied(props, "class"))
            .and_then(PropValue::as_str)
            .map(str::to_string);
        let live = element.class_list();
        let class_name = merge_class_names(&live, class_prop.as_deref(), self.class_prop.as_deref());
        if class_name != live.join(" ") {
            element.set_class_name(&class_name);
        }
        self.class_prop = class_prop;

        if let Some(bridge) = self.bridge.as_mut() {
            bridge.sync_callbacks(props, &self.def.host_events);
        }

        apply(element.as_ref(), &reconcile(&self.applied, props));
        self.applied = props.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Event, VirtualElement};
    use crate::props::Callback;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::Cell;

    fn props(entries: &[(&str, PropValue)]) -> PropSnapshot {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn display_name_is_pascal_case() {
        let def = create_react_component("ion-button", None).unwrap();

        assert_eq!(def.display_name(), "IonButton");
        assert!(create_react_component("button", None).is_err());
    }

    #[test]
    fn renders_primitives_and_covered_callbacks() {
        let def = create_react_component("ion-button", None).unwrap();
        let component = def.instantiate(None);
        let rendered = component.render(&props(&[
            ("color", "primary".into()),
            ("strong", true.into()),
            ("expand", false.into()),
            ("routerOptions", PropValue::Json(json!({"replace": true}))),
            ("onClick", Callback::new(|_| {}).into()),
            ("onIonFocus", Callback::new(|_| {}).into()),
            ("style", "margin: 0".into()),
        ]));

        assert_eq!(
            rendered.attributes,
            BTreeMap::from([
                ("color".to_string(), "primary".to_string()),
                ("strong".to_string(), String::new()),
            ])
        );
        assert_eq!(rendered.callbacks, vec!["onClick".to_string()]);
        assert_eq!(rendered.style.as_deref(), Some("margin: 0"));
    }

    #[test]
    fn mount_syncs_uncovered_events_and_properties() {
        let def = create_react_component("ion-select", None).unwrap();
        let el = VirtualElement::new("ion-select");
        let mut component = def.instantiate(None);
        let changes = Rc::new(Cell::new(0));

        let c = Rc::clone(&changes);
        let p = props(&[
            ("interfaceOptions", PropValue::Json(json!({"header": "Pick"}))),
            ("onIonChange", Callback::new(move |_| c.set(c.get() + 1)).into()),
            ("onClick", Callback::new(|_| {}).into()),
        ]);
        component.did_mount(el.handle(), &p).unwrap();
        el.dispatch(&Event::new("ionChange"));

        assert_eq!(
            el.property("interfaceOptions"),
            PropValue::Json(json!({"header": "Pick"}))
        );
        assert_eq!(changes.get(), 1);
        assert_eq!(el.listener_count("click"), 0);
    }

    #[test]
    fn update_with_same_props_adds_nothing() {
        let def = create_react_component("ion-select", None).unwrap();
        let el = VirtualElement::new("ion-select");
        let mut component = def.instantiate(None);
        let p = props(&[
            ("value", "a".into()),
            ("className", "wide".into()),
            ("onIonChange", Callback::new(|_| {}).into()),
        ]);

        component.did_mount(el.handle(), &p).unwrap();
        let mutations = el.mutation_count();
        component.did_update(&p).unwrap();
        component.did_update(&p).unwrap();

        assert_eq!(el.mutation_count(), mutations);
        assert_eq!(el.listener_count("ionChange"), 1);
    }

    #[test]
    fn class_name_keeps_element_owned_classes() {
        let def = create_react_component("ion-item", None).unwrap();
        let el = VirtualElement::new("ion-item");
        el.set_class_name("hydrated");
        let mut component = def.instantiate(None);

        component
            .did_mount(el.handle(), &props(&[("className", "first".into())]))
            .unwrap();
        component
            .did_update(&props(&[("className", "second".into())]))
            .unwrap();

        assert_eq!(el.class_list(), vec!["hydrated", "second"]);
    }

    #[test]
    fn forwarded_ref_is_set_and_cleared() {
        let def = create_react_component("ion-input", None).unwrap();
        let el = VirtualElement::new("ion-input");
        let forwarded = ElementRef::new();
        let mut component = def.instantiate(Some(forwarded.clone()));

        component.did_mount(el.handle(), &PropSnapshot::new()).unwrap();
        assert_eq!(forwarded.get().map(|e| e.tag_name()), Some("ion-input".to_string()));

        component.will_unmount();
        assert!(!forwarded.is_set());
        assert!(component.element().is_none());
    }

    #[test]
    fn unmount_removes_synced_listeners() {
        let def = create_react_component("ion-input", None).unwrap();
        let el = VirtualElement::new("ion-input");
        let mut component = def.instantiate(None);
        component
            .did_mount(el.handle(), &props(&[("onIonBlur", Callback::new(|_| {}).into())]))
            .unwrap();

        component.will_unmount();

        assert_eq!(el.total_listeners(), 0);
    }
}
