//! Two-way model binding.
//!
//! One element property is paired with one or more update events. When an
//! update event fires, the wrapper reads the property off the event target,
//! remembers it, tells the host the value changed, and only then re-emits the
//! secondary event. Consumers of the secondary event therefore always see the
//! updated model.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::descriptor::ComponentDescriptor;
use crate::element::{Event, Listener};
use crate::props::{supplied, PropSnapshot, PropValue};

/// Prop carrying an explicitly bound model value.
pub const MODEL_VALUE: &str = "modelValue";

/// Host signal name for a model change.
pub const UPDATE_VALUE_EVENT: &str = "update:modelValue";

/// A signal a wrapper sends to its host framework.
#[derive(Clone)]
pub enum Emitted {
    /// The model value changed.
    UpdateModelValue(PropValue),
    /// A named event re-emitted from the wrapper.
    Event { name: String, event: Event },
}

impl Emitted {
    /// The host-facing signal name.
    pub fn name(&self) -> &str {
        match self {
            Emitted::UpdateModelValue(_) => UPDATE_VALUE_EVENT,
            Emitted::Event { name, .. } => name,
        }
    }
}

impl fmt::Debug for Emitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emitted::UpdateModelValue(value) => f.debug_tuple("UpdateModelValue").field(value).finish(),
            Emitted::Event { name, .. } => f.debug_struct("Event").field("name", name).finish(),
        }
    }
}

/// Sink for signals emitted by a wrapper.
pub type Emitter = Rc<dyn Fn(Emitted)>;

/// Model state for one wrapper instance.
pub struct ModelBinding {
    prop: String,
    secondary_event: Option<String>,
    /// Last value seen from an update event, or the static prop value.
    tracked: Rc<RefCell<PropValue>>,
    /// Static model prop value at the previous render.
    last_static: RefCell<PropValue>,
}

impl ModelBinding {
    /// Build the binding for a descriptor; `None` when it has no model prop.
    pub fn for_descriptor(descriptor: &ComponentDescriptor) -> Option<Self> {
        let prop = descriptor.model_prop.clone()?;
        Some(Self {
            prop,
            secondary_event: descriptor.secondary_event.clone(),
            tracked: Rc::new(RefCell::new(PropValue::Empty)),
            last_static: RefCell::new(PropValue::Empty),
        })
    }

    pub fn prop(&self) -> &str {
        &self.prop
    }

    /// The value last observed from an update event.
    pub fn tracked(&self) -> PropValue {
        self.tracked.borrow().clone()
    }

    /// The value to push for the model prop on this render.
    ///
    /// An explicit `modelValue` always wins. Otherwise the tracked value is
    /// used; it follows the static model prop whenever that prop changes and
    /// update events in between.
    pub fn resolve(&self, props: &PropSnapshot) -> Option<PropValue> {
        let static_value = supplied(props, &self.prop).cloned().unwrap_or_default();
        if *self.last_static.borrow() != static_value {
            *self.tracked.borrow_mut() = static_value.clone();
            *self.last_static.borrow_mut() = static_value;
        }

        if let Some(explicit) = supplied(props, MODEL_VALUE) {
            return Some(explicit.clone());
        }

        let tracked = self.tracked.borrow();
        (!tracked.is_empty()).then(|| tracked.clone())
    }

    /// Listener for one update event.
    pub fn update_listener(&self, emit: Emitter) -> Listener {
        let prop = self.prop.clone();
        let secondary = self.secondary_event.clone();
        let tracked = Rc::clone(&self.tracked);

        Rc::new(move |event: &Event| {
            let value = event
                .target()
                .map(|target| target.property(&prop))
                .unwrap_or(PropValue::Undefined);
            *tracked.borrow_mut() = value.clone();

            emit(Emitted::UpdateModelValue(value));

            // Re-emitted here rather than by the element so the model is
            // already updated when this fires.
            if let Some(name) = &secondary {
                emit(Emitted::Event {
                    name: name.clone(),
                    event: event.clone(),
                });
            }
        })
    }
}
