//! The source value shared by every node of a pipeline.

use crate::dataset::Value;
use crate::error::InteractiveResult;
use crate::reactive::{ReactiveFunction, Subscription};
use log::{info, warn};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Holds the pipeline's source value.
///
/// A fixed source never changes. A driven source re-runs its driver whenever
/// one of the driver's dependencies changes and replaces the value in place,
/// so every node built from it sees the new value on its next evaluation.
/// A failed driver run is stored and returned by [`SharedSource::value`].
pub struct SharedSource {
    value: RefCell<InteractiveResult<Value>>,
    driver: Option<ReactiveFunction<Value>>,
    subscriptions: RefCell<Vec<Subscription>>,
    refreshes: Cell<u64>,
}

impl SharedSource {
    pub fn fixed(value: Value) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(Ok(value)),
            driver: None,
            subscriptions: RefCell::new(Vec::new()),
            refreshes: Cell::new(0),
        })
    }

    /// Runs `driver` once for the initial value, then follows its dependencies.
    pub fn driven(driver: ReactiveFunction<Value>) -> Rc<Self> {
        let initial = driver.call();
        if let Err(e) = &initial {
            warn!("⚠️ Driver failed while building the source: {}", e);
        }
        let source = Rc::new(Self {
            value: RefCell::new(initial),
            driver: Some(driver.clone()),
            subscriptions: RefCell::new(Vec::new()),
            refreshes: Cell::new(0),
        });
        let weak = Rc::downgrade(&source);
        let subscriptions = driver.watch(move |result| {
            if let Some(source) = weak.upgrade() {
                source.replace(result);
            }
        });
        *source.subscriptions.borrow_mut() = subscriptions;
        source
    }

    fn replace(&self, result: InteractiveResult<Value>) {
        match &result {
            Ok(value) => info!("🔄 Source refreshed with a new {}", value.type_name()),
            Err(e) => warn!("⚠️ Driver failed, keeping the error for the next evaluation: {}", e),
        }
        *self.value.borrow_mut() = result;
        self.refreshes.set(self.refreshes.get() + 1);
    }

    /// The current source value, or the stored driver failure.
    pub fn value(&self) -> InteractiveResult<Value> {
        self.value.borrow().clone()
    }

    pub fn driver(&self) -> Option<&ReactiveFunction<Value>> {
        self.driver.as_ref()
    }

    /// Number of times a driver run replaced the value.
    pub fn refreshes(&self) -> u64 {
        self.refreshes.get()
    }
}

impl fmt::Debug for SharedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSource")
            .field("driver", &self.driver)
            .field("refreshes", &self.refreshes.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InteractiveError;
    use crate::reactive::Parameter;

    #[test]
    fn test_driven_source_follows_dependency() {
        let n = Parameter::new("n", 1);
        let read = n.clone();
        let driver = ReactiveFunction::depends(vec![n.clone()], move || Ok(read.get()));
        let source = SharedSource::driven(driver);
        assert_eq!(source.value().unwrap(), Value::from(1));
        n.set(2);
        assert_eq!(source.value().unwrap(), Value::from(2));
        assert_eq!(source.refreshes(), 1);
    }

    #[test]
    fn test_driver_failure_is_stored() {
        let n = Parameter::new("n", 1);
        let read = n.clone();
        let driver = ReactiveFunction::depends(vec![n.clone()], move || {
            match read.get().as_f64() {
                Some(v) if v < 0.0 => Err(InteractiveError::evaluation("negative", "driver")),
                _ => Ok(read.get()),
            }
        });
        let source = SharedSource::driven(driver);
        n.set(-1);
        assert!(source.value().is_err());
        n.set(3);
        assert_eq!(source.value().unwrap(), Value::from(3));
    }
}
