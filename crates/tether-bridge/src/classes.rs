//! Class list merging.
//!
//! The element's class list is shared between the wrapper and whatever else
//! touches the element (the custom element itself adds state classes). The
//! wrapper must only add and remove the classes it owns.

use std::collections::HashSet;

/// Split a space-separated class string.
pub fn split_classes(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Merge the live class list with the incoming and outgoing class props.
///
/// Live classes survive unless the previous prop owned them; classes from the
/// new prop are added once.
pub fn merge_class_names(live: &[String], new_prop: Option<&str>, old_prop: Option<&str>) -> String {
    let mut incoming: Vec<String> = split_classes(new_prop);
    let outgoing: HashSet<String> = split_classes(old_prop).into_iter().collect();
    let mut result: Vec<String> = Vec::new();

    for class in live {
        if let Some(pos) = incoming.iter().position(|c| c == class) {
            result.push(incoming.remove(pos));
        } else if !outgoing.contains(class) && !result.contains(class) {
            result.push(class.clone());
        }
    }

    for class in incoming {
        if !result.contains(&class) {
            result.push(class);
        }
    }

    result.join(" ")
}

/// Tracks every class a container has ever received through its `class` prop.
#[derive(Debug, Default)]
pub struct ClassTracker {
    component_classes: HashSet<String>,
}

impl ClassTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the classes of the current `class` prop.
    pub fn record(&mut self, class_prop: Option<&str>) {
        self.component_classes.extend(split_classes(class_prop));
    }

    /// Classes the element carries that did not come from the `class` prop.
    pub fn element_classes(&self, live: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for class in live {
            if !self.component_classes.contains(class) && !out.contains(class) {
                out.push(class.clone());
            }
        }
        out
    }

    /// The full class string: foreign element classes followed by the prop's.
    pub fn class_name(&self, live: &[String], class_prop: Option<&str>) -> String {
        let mut classes = self.element_classes(live);
        for class in split_classes(class_prop) {
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
        classes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(s: &str) -> Vec<String> {
        split_classes(Some(s))
    }

    #[test]
    fn keeps_foreign_classes_and_adds_new_ones() {
        let live = list("hydrated ion-focused");
        let merged = merge_class_names(&live, Some("primary"), None);

        assert_eq!(merged, "hydrated ion-focused primary");
    }

    #[test]
    fn drops_classes_removed_from_prop() {
        let live = list("hydrated primary large");
        let merged = merge_class_names(&live, Some("large"), Some("primary large"));

        assert_eq!(merged, "hydrated large");
    }

    #[test]
    fn tracker_replaces_prop_classes() {
        let mut tracker = ClassTracker::new();
        tracker.record(Some("a b"));
        let live = list("hydrated a b");

        tracker.record(Some("c"));
        let name = tracker.class_name(&live, Some("c"));

        assert_eq!(name, "hydrated c");
    }
}
