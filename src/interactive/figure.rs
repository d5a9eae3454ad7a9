//! The last-figure slot used by the `plot` method.
//!
//! Each evaluation of a `plot` call builds a fresh figure through the `ax`
//! provider and records it here; the callback then returns that figure. The
//! slot is per thread, matching the single-threaded pipeline model.

use crate::dataset::{Figure, Value};
use crate::reactive::ReactiveFunction;
use log::debug;
use std::cell::RefCell;

/// Keyword under which the axes provider is injected.
pub const AXIS_KWARG: &str = "ax";

/// Name of the axes-drawing method.
pub const PLOT_METHOD: &str = "plot";

thread_local! {
    static LAST_FIGURE: RefCell<Option<Figure>> = const { RefCell::new(None) };
}

pub fn store_figure(figure: Figure) {
    LAST_FIGURE.with(|slot| *slot.borrow_mut() = Some(figure));
}

/// The most recently stored figure, if any.
pub fn current_figure() -> Option<Figure> {
    LAST_FIGURE.with(|slot| slot.borrow().clone())
}

pub fn clear_figure() {
    LAST_FIGURE.with(|slot| *slot.borrow_mut() = None);
}

/// A dependency-free function that creates a figure, stores it in the slot,
/// and returns its axes.
pub fn axis_provider() -> ReactiveFunction<Value> {
    ReactiveFunction::depends(Vec::new(), || {
        let figure = Figure::new();
        debug!("new figure {} for plot", figure.id());
        store_figure(figure.clone());
        Ok(Value::Axes(figure.axes()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_stores_figure() {
        clear_figure();
        let axes = axis_provider().call().unwrap();
        let figure = current_figure().expect("figure stored");
        match axes {
            Value::Axes(ax) => assert_eq!(ax.figure(), figure),
            other => panic!("expected axes, got {:?}", other),
        }
    }
}
