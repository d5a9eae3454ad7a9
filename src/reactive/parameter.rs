//! Observable, version-tracked parameters.

use super::widget::{Widget, WidgetInner};
use crate::dataset::Value;
use log::trace;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback = dyn Fn(&Value);

pub(crate) struct ParamInner {
    name: String,
    value: RefCell<Value>,
    version: Cell<u64>,
    owner: RefCell<Option<Weak<WidgetInner>>>,
    subscribers: RefCell<Vec<Weak<Callback>>>,
}

/// A named reactive value.
///
/// Clones share the same value. Setting an equal value is a no-op; any other
/// change bumps the version once and notifies subscribers in registration
/// order.
#[derive(Clone)]
pub struct Parameter(Rc<ParamInner>);

/// Keeps a subscriber alive. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Rc<Callback>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self(Rc::new(ParamInner {
            name: name.into(),
            value: RefCell::new(value.into()),
            version: Cell::new(0),
            owner: RefCell::new(None),
            subscribers: RefCell::new(Vec::new()),
        }))
    }

    pub(crate) fn owned_by(name: String, value: Value, owner: Weak<WidgetInner>) -> Self {
        let param = Self::new(name, value);
        *param.0.owner.borrow_mut() = Some(owner);
        param
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn get(&self) -> Value {
        self.0.value.borrow().clone()
    }

    pub fn version(&self) -> u64 {
        self.0.version.get()
    }

    /// Sets the value and notifies subscribers if it changed.
    pub fn set(&self, value: impl Into<Value>) {
        let value = value.into();
        if *self.0.value.borrow() == value {
            return;
        }
        *self.0.value.borrow_mut() = value.clone();
        self.0.version.set(self.0.version.get() + 1);
        trace!("parameter '{}' changed to {}", self.0.name, value);
        self.notify(&value);
    }

    fn notify(&self, value: &Value) {
        // Callbacks may subscribe or set other parameters, so none run under the borrow.
        let callbacks: Vec<Rc<Callback>> = {
            let mut subscribers = self.0.subscribers.borrow_mut();
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in callbacks {
            callback(value);
        }
    }

    /// Registers `callback` to run after every change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Value) + 'static,
    {
        let callback: Rc<Callback> = Rc::new(callback);
        self.0.subscribers.borrow_mut().push(Rc::downgrade(&callback));
        Subscription {
            _callback: callback,
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.0
            .subscribers
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// The widget owning this parameter, if any.
    pub fn owner(&self) -> Option<Widget> {
        self.0
            .owner
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Widget::from_inner)
    }

    pub fn ptr_eq(&self, other: &Parameter) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.0.name)
            .field("value", &*self.0.value.borrow())
            .field("version", &self.0.version.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_value_is_noop() {
        let p = Parameter::new("n", 1);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let _sub = p.subscribe(move |_| counter.set(counter.get() + 1));
        p.set(1);
        assert_eq!(p.version(), 0);
        p.set(2);
        assert_eq!(p.version(), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let p = Parameter::new("n", 1);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let sub = p.subscribe(move |_| counter.set(counter.get() + 1));
        drop(sub);
        p.set(5);
        assert_eq!(hits.get(), 0);
        assert_eq!(p.subscriber_count(), 0);
    }

    #[test]
    fn test_registration_order() {
        let p = Parameter::new("n", 0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = log.clone();
        let second = log.clone();
        let _a = p.subscribe(move |_| first.borrow_mut().push("a"));
        let _b = p.subscribe(move |_| second.borrow_mut().push("b"));
        p.set(1);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_plain_parameter_has_no_owner() {
        assert!(Parameter::new("x", 1).owner().is_none());
    }
}
