//! Wrapper lifecycles for the supported host frameworks.
//!
//! Both variants own their element from mount to unmount and drop every
//! reference to it on unmount.

pub mod kdu;
pub mod react;

use std::cell::RefCell;
use std::rc::Rc;

use crate::descriptor::DescriptorError;
use crate::element::HostElement;

/// A shared, nullable reference to a mounted element.
#[derive(Clone, Default)]
pub struct ElementRef(Rc<RefCell<Option<Rc<dyn HostElement>>>>);

impl ElementRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Rc<dyn HostElement>> {
        self.0.borrow().clone()
    }

    pub fn set(&self, element: Option<Rc<dyn HostElement>>) {
        *self.0.borrow_mut() = element;
    }

    pub fn is_set(&self) -> bool {
        self.0.borrow().is_some()
    }
}

/// Write one element into several refs.
pub fn merge_refs(refs: &[&ElementRef], element: Option<Rc<dyn HostElement>>) {
    for r in refs {
        r.set(element.clone());
    }
}

/// Errors raised by wrapper lifecycles.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("<{0}> is already mounted")]
    AlreadyMounted(String),

    #[error("<{0}> is not mounted")]
    NotMounted(String),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}
