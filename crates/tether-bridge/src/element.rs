//! Host element abstraction and an in-memory implementation.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::props::PropValue;

/// A DOM event listener.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Handle returned by [`HostElement::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The subset of the DOM element contract the bridge relies on.
///
/// Methods take `&self`: like a DOM node, an element is shared and mutated
/// through interior mutability.
pub trait HostElement {
    fn tag_name(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    /// Read an instance property. Unknown properties read as `Undefined`.
    fn property(&self, name: &str) -> PropValue;
    fn set_property(&self, name: &str, value: PropValue);
    fn clear_property(&self, name: &str);

    fn class_list(&self) -> Vec<String>;
    fn set_class_name(&self, class_name: &str);

    fn add_event_listener(&self, event_name: &str, listener: Listener) -> ListenerId;
    fn remove_event_listener(&self, event_name: &str, id: ListenerId);
}

struct EventInner {
    name: String,
    target: RefCell<Option<Rc<dyn HostElement>>>,
    default_prevented: Cell<bool>,
}

/// A dispatched DOM event. Clones share state, so `prevent_default` is
/// visible to every holder.
#[derive(Clone)]
pub struct Event {
    inner: Rc<EventInner>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(EventInner {
                name: name.into(),
                target: RefCell::new(None),
                default_prevented: Cell::new(false),
            }),
        }
    }

    pub fn with_target(self, target: Rc<dyn HostElement>) -> Self {
        self.set_target(target);
        self
    }

    pub fn set_target(&self, target: Rc<dyn HostElement>) {
        *self.inner.target.borrow_mut() = Some(target);
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn target(&self) -> Option<Rc<dyn HostElement>> {
        self.inner.target.borrow().clone()
    }

    pub fn prevent_default(&self) {
        self.inner.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.inner.default_prevented.get()
    }

    /// Whether two handles refer to the same dispatched event.
    pub fn same_event(&self, other: &Event) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.inner.name)
            .field("default_prevented", &self.inner.default_prevented.get())
            .finish()
    }
}

#[derive(Default)]
struct VirtualInner {
    tag_name: String,
    attributes: BTreeMap<String, String>,
    properties: BTreeMap<String, PropValue>,
    classes: Vec<String>,
    listeners: Vec<(String, ListenerId, Listener)>,
    next_listener: u64,
    mutations: usize,
}

/// An in-memory element that records everything done to it.
#[derive(Clone, Default)]
pub struct VirtualElement {
    inner: Rc<RefCell<VirtualInner>>,
}

impl VirtualElement {
    pub fn new(tag_name: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VirtualInner {
                tag_name: tag_name.to_string(),
                ..Default::default()
            })),
        }
    }

    /// This element as a shared host handle.
    pub fn handle(&self) -> Rc<dyn HostElement> {
        Rc::new(self.clone())
    }

    /// Dispatch an event to every listener registered for its name.
    ///
    /// Returns `false` when a listener called `prevent_default`.
    pub fn dispatch(&self, event: &Event) -> bool {
        if event.target().is_none() {
            event.set_target(self.handle());
        }

        // Listeners may touch this element, so release the borrow first.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(name, _, _)| name == event.name())
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event);
        }

        !event.default_prevented()
    }

    pub fn listener_count(&self, event_name: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(name, _, _)| name == event_name)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of attribute, property and class writes so far.
    pub fn mutation_count(&self) -> usize {
        self.inner.borrow().mutations
    }

    /// Whether a property has been assigned and not cleared.
    pub fn has_property(&self, name: &str) -> bool {
        self.inner.borrow().properties.contains_key(name)
    }
}

impl HostElement for VirtualElement {
    fn tag_name(&self) -> String {
        self.inner.borrow().tag_name.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.attributes.insert(name.to_string(), value.to_string());
        inner.mutations += 1;
    }

    fn remove_attribute(&self, name: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.attributes.remove(name);
        inner.mutations += 1;
    }

    fn property(&self, name: &str) -> PropValue {
        self.inner
            .borrow()
            .properties
            .get(name)
            .cloned()
            .unwrap_or(PropValue::Undefined)
    }

    fn set_property(&self, name: &str, value: PropValue) {
        let mut inner = self.inner.borrow_mut();
        inner.properties.insert(name.to_string(), value);
        inner.mutations += 1;
    }

    fn clear_property(&self, name: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.properties.remove(name);
        inner.mutations += 1;
    }

    fn class_list(&self) -> Vec<String> {
        self.inner.borrow().classes.clone()
    }

    fn set_class_name(&self, class_name: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.classes = class_name.split_whitespace().map(str::to_string).collect();
        inner.mutations += 1;
    }

    fn add_event_listener(&self, event_name: &str, listener: Listener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener += 1;
        let id = ListenerId(inner.next_listener);
        inner.listeners.push((event_name.to_string(), id, listener));
        id
    }

    fn remove_event_listener(&self, event_name: &str, id: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(name, lid, _)| !(name == event_name && *lid == id));
    }
}
