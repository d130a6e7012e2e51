//! Event bridge: DOM listeners on the element, owned by the wrapper.
//!
//! Listeners are attached once at mount and removed at unmount. Callback
//! props are synchronized with replace semantics, so each event name has at
//! most one bridge listener per element no matter how often it re-renders.

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use crate::case::dash_to_pascal_case;
use crate::descriptor::ComponentDescriptor;
use crate::element::{Event, HostElement, Listener, ListenerId};
use crate::model::{Emitter, ModelBinding};
use crate::props::{Callback, PropSnapshot, PropValue};

/// Events the DOM dispatches natively, which host frameworks already wire
/// up through their own event systems.
const STANDARD_EVENTS: &[&str] = &[
    "abort", "animationend", "animationiteration", "animationstart", "blur", "change", "click",
    "compositionend", "compositionstart", "compositionupdate", "contextmenu", "copy", "cut",
    "dblclick", "drag", "dragend", "dragenter", "dragleave", "dragover", "dragstart", "drop",
    "error", "focus", "focusin", "focusout", "input", "invalid", "keydown", "keypress", "keyup",
    "load", "mousedown", "mouseenter", "mouseleave", "mousemove", "mouseout", "mouseover",
    "mouseup", "paste", "pointercancel", "pointerdown", "pointerenter", "pointerleave",
    "pointermove", "pointerout", "pointerover", "pointerup", "reset", "scroll", "select",
    "submit", "touchcancel", "touchend", "touchmove", "touchstart", "transitionend", "wheel",
];

/// The callback prop name for a DOM event (`ionChange` -> `onIonChange`).
pub fn callback_prop_name(event_name: &str) -> String {
    format!("on{}", dash_to_pascal_case(event_name))
}

/// The DOM event behind a callback prop (`onIonChange` -> `ionChange`).
///
/// Only `on` followed by an uppercase letter counts; `one` or `online` are
/// ordinary props.
pub fn callback_event_name(prop: &str) -> Option<String> {
    let rest = prop.strip_prefix("on")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    Some(first.to_ascii_lowercase().to_string() + chars.as_str())
}

/// The set of event names a host framework dispatches itself.
#[derive(Debug, Clone)]
pub struct HostEvents {
    covered: HashSet<String>,
}

impl HostEvents {
    /// A host whose synthetic event system covers the standard DOM events.
    pub fn standard() -> Self {
        Self {
            covered: STANDARD_EVENTS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// A host that leaves every event to the bridge.
    pub fn none() -> Self {
        Self {
            covered: HashSet::new(),
        }
    }

    pub fn with_event(mut self, event_name: &str) -> Self {
        self.covered.insert(event_name.to_ascii_lowercase());
        self
    }

    /// Whether the host already dispatches this event.
    pub fn covers(&self, event_name: &str) -> bool {
        let lower = event_name.to_ascii_lowercase();
        let lower = if lower == "doubleclick" {
            "dblclick".to_string()
        } else {
            lower
        };
        self.covered.contains(&lower)
    }
}

impl Default for HostEvents {
    fn default() -> Self {
        Self::standard()
    }
}

/// One attached listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
    pub event_name: String,
    id: ListenerId,
}

struct SyncedListener {
    binding: EventBinding,
    handler: Callback,
}

/// All listeners a wrapper has attached to its element.
///
/// Dropping the bridge detaches everything.
pub struct EventBridge {
    element: Rc<dyn HostElement>,
    bindings: Vec<EventBinding>,
    synced: BTreeMap<String, SyncedListener>,
}

impl EventBridge {
    pub fn new(element: Rc<dyn HostElement>) -> Self {
        Self {
            element,
            bindings: Vec::new(),
            synced: BTreeMap::new(),
        }
    }

    /// Attach a listener that lives until [`EventBridge::detach`].
    pub fn listen(&mut self, event_name: &str, listener: Listener) {
        let id = self.element.add_event_listener(event_name, listener);
        tracing::debug!(event = event_name, "Attached listener");
        self.bindings.push(EventBinding {
            event_name: event_name.to_string(),
            id,
        });
    }

    /// Point the listener for `event_name` at `handler`, replacing any
    /// previous one. `None` removes it. An unchanged handler is a no-op.
    pub fn sync(&mut self, event_name: &str, handler: Option<&Callback>) {
        if let (Some(existing), Some(handler)) = (self.synced.get(event_name), handler) {
            if existing.handler == *handler {
                return;
            }
        }

        if let Some(old) = self.synced.remove(event_name) {
            self.element
                .remove_event_listener(&old.binding.event_name, old.binding.id);
        }

        if let Some(handler) = handler {
            let target = handler.clone();
            let id = self
                .element
                .add_event_listener(event_name, Rc::new(move |e: &Event| target.call(e)));
            self.synced.insert(
                event_name.to_string(),
                SyncedListener {
                    binding: EventBinding {
                        event_name: event_name.to_string(),
                        id,
                    },
                    handler: handler.clone(),
                },
            );
        }
    }

    /// Synchronize every `onXxx` callback prop the host does not cover.
    ///
    /// Returns the callback prop names the host handles itself, so they can
    /// be passed through to its render output.
    pub fn sync_callbacks(&mut self, props: &PropSnapshot, host: &HostEvents) -> Vec<String> {
        let mut passed_through = Vec::new();
        let mut wanted: BTreeMap<String, &Callback> = BTreeMap::new();

        for (key, value) in props {
            let Some(event_name) = callback_event_name(key) else {
                continue;
            };
            let PropValue::Callback(handler) = value else {
                continue;
            };
            if host.covers(&event_name) {
                passed_through.push(key.clone());
            } else {
                wanted.insert(event_name, handler);
            }
        }

        let stale: Vec<String> = self
            .synced
            .keys()
            .filter(|name| !wanted.contains_key(*name))
            .cloned()
            .collect();
        for name in stale {
            self.sync(&name, None);
        }

        for (name, handler) in wanted {
            self.sync(&name, Some(handler));
        }

        passed_through
    }

    /// Every listener currently attached through this bridge.
    pub fn bindings(&self) -> Vec<&EventBinding> {
        self.bindings
            .iter()
            .chain(self.synced.values().map(|s| &s.binding))
            .collect()
    }

    /// Remove every listener from the element.
    pub fn detach(&mut self) {
        for binding in self.bindings.drain(..) {
            self.element
                .remove_event_listener(&binding.event_name, binding.id);
        }
        for (_, synced) in std::mem::take(&mut self.synced) {
            self.element
                .remove_event_listener(&synced.binding.event_name, synced.binding.id);
        }
        tracing::debug!(tag = %self.element.tag_name(), "Detached listeners");
    }
}

impl Drop for EventBridge {
    fn drop(&mut self) {
        if !self.bindings.is_empty() || !self.synced.is_empty() {
            self.detach();
        }
    }
}

/// Attach the model-update listeners a descriptor asks for.
///
/// Each update event is matched by its lowercased DOM name, so `ionInput`
/// listens for `ioninput`.
pub fn attach_event_bridge(
    element: Rc<dyn HostElement>,
    descriptor: &ComponentDescriptor,
    model: Option<&ModelBinding>,
    emit: &Emitter,
) -> EventBridge {
    let mut bridge = EventBridge::new(element);

    if let Some(model) = model {
        for event_name in &descriptor.model_update_events {
            bridge.listen(&event_name.to_lowercase(), model.update_listener(Rc::clone(emit)));
        }
    }

    bridge
}
