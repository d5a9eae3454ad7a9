//! Functions with declared parameter dependencies.

use super::parameter::{Parameter, Subscription};
use crate::error::InteractiveResult;
use std::fmt;
use std::rc::Rc;

/// A zero-argument function that declares which parameters it reads.
///
/// Watching the function re-runs it whenever one of the dependencies changes.
pub struct ReactiveFunction<T> {
    deps: Vec<Parameter>,
    func: Rc<dyn Fn() -> InteractiveResult<T>>,
}

impl<T> Clone for ReactiveFunction<T> {
    fn clone(&self) -> Self {
        Self {
            deps: self.deps.clone(),
            func: self.func.clone(),
        }
    }
}

impl<T: 'static> ReactiveFunction<T> {
    /// Declares `func` as depending on `deps`.
    pub fn depends<F>(deps: Vec<Parameter>, func: F) -> Self
    where
        F: Fn() -> InteractiveResult<T> + 'static,
    {
        Self {
            deps,
            func: Rc::new(func),
        }
    }

    pub fn dependencies(&self) -> &[Parameter] {
        &self.deps
    }

    pub fn call(&self) -> InteractiveResult<T> {
        (self.func)()
    }

    /// Runs the function after each dependency change and hands the result to
    /// `on_change`. The returned subscriptions keep the watch alive.
    pub fn watch<F>(&self, on_change: F) -> Vec<Subscription>
    where
        F: Fn(InteractiveResult<T>) + 'static,
    {
        let on_change = Rc::new(on_change);
        self.deps
            .iter()
            .map(|param| {
                let func = self.func.clone();
                let on_change = on_change.clone();
                param.subscribe(move |_| on_change(func()))
            })
            .collect()
    }

    pub fn ptr_eq(&self, other: &ReactiveFunction<T>) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl<T> fmt::Debug for ReactiveFunction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveFunction")
            .field("deps", &self.deps.iter().map(Parameter::name).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use std::cell::RefCell;

    #[test]
    fn test_watch_reruns_on_change() {
        let p = Parameter::new("n", 1);
        let source = p.clone();
        let doubled = ReactiveFunction::depends(vec![p.clone()], move || {
            Ok(source.get().as_f64().unwrap_or(0.0) * 2.0)
        });
        assert_eq!(doubled.call().unwrap(), 2.0);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _watch = doubled.watch(move |result| sink.borrow_mut().push(result.unwrap()));
        p.set(Value::from(4));
        assert_eq!(*seen.borrow(), vec![8.0]);
    }
}
