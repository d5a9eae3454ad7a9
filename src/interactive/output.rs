//! Output objects that present the callback's result.

use super::callback::Rendered;
use super::node::Interactive;
use crate::error::InteractiveResult;
use crate::kwargs::Kwargs;
use crate::dataset::Value;
use crate::reactive::{ReactiveFunction, Subscription};
use log::{debug, warn};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Renders on demand by running the callback.
#[derive(Debug, Clone)]
pub struct DynamicMap {
    callback: ReactiveFunction<Rendered>,
}

impl DynamicMap {
    pub fn new(callback: ReactiveFunction<Rendered>) -> Self {
        Self { callback }
    }

    pub fn render(&self) -> InteractiveResult<Rendered> {
        self.callback.call()
    }

    pub fn callback(&self) -> &ReactiveFunction<Rendered> {
        &self.callback
    }
}

struct PanelState {
    latest: InteractiveResult<Rendered>,
    renders: u64,
}

/// Holds the latest render and re-renders whenever a dependency changes.
#[derive(Clone)]
pub struct Panel {
    callback: ReactiveFunction<Rendered>,
    options: Kwargs<Value>,
    state: Rc<RefCell<PanelState>>,
    _subscriptions: Rc<Vec<Subscription>>,
}

impl Panel {
    /// Renders once, then subscribes to the callback's dependencies.
    pub fn new(callback: ReactiveFunction<Rendered>, options: Kwargs<Value>) -> Self {
        let state = Rc::new(RefCell::new(PanelState {
            latest: callback.call(),
            renders: 1,
        }));
        let weak = Rc::downgrade(&state);
        let subscriptions = callback.watch(move |result| {
            if let Some(state) = weak.upgrade() {
                if let Err(e) = &result {
                    warn!("⚠️ Panel render failed: {}", e);
                }
                let mut state = state.borrow_mut();
                state.latest = result;
                state.renders += 1;
                debug!("panel re-rendered ({} renders)", state.renders);
            }
        });
        Self {
            callback,
            options,
            state,
            _subscriptions: Rc::new(subscriptions),
        }
    }

    /// The result of the most recent render.
    pub fn latest(&self) -> InteractiveResult<Rendered> {
        self.state.borrow().latest.clone()
    }

    /// How many times the panel has rendered.
    pub fn renders(&self) -> u64 {
        self.state.borrow().renders
    }

    /// Renders again without waiting for a change.
    pub fn refresh(&self) -> InteractiveResult<Rendered> {
        let result = self.callback.call();
        let mut state = self.state.borrow_mut();
        state.latest = result.clone();
        state.renders += 1;
        result
    }

    pub fn options(&self) -> &Kwargs<Value> {
        &self.options
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("renders", &self.renders())
            .field("options", &self.options)
            .finish()
    }
}

/// The output chosen by the node's `dmap` option.
#[derive(Debug, Clone)]
pub enum Output {
    DynamicMap(DynamicMap),
    Panel(Panel),
}

impl Output {
    /// Runs the dynamic map, or returns the panel's latest render.
    pub fn render(&self) -> InteractiveResult<Rendered> {
        match self {
            Output::DynamicMap(dmap) => dmap.render(),
            Output::Panel(panel) => panel.latest(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Output::DynamicMap(_) => "DynamicMap",
            Output::Panel(_) => "Panel",
        }
    }
}

impl Interactive {
    /// A dynamic map when `dmap` is set, a panel otherwise.
    pub fn output(&self) -> Output {
        if self.options.dmap {
            Output::DynamicMap(self.dmap())
        } else {
            Output::Panel(self.panel(Kwargs::new()))
        }
    }

    /// The pipeline as a dynamic map, re-evaluated on every render.
    pub fn holoviews(&self) -> DynamicMap {
        self.dmap()
    }

    pub fn dmap(&self) -> DynamicMap {
        DynamicMap::new(self.callback())
    }

    /// A panel with the node's output options plus `kwargs`.
    pub fn panel(&self, kwargs: Kwargs<Value>) -> Panel {
        Panel::new(self.callback(), self.options.kwargs.merged(&kwargs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Frame;
    use crate::reactive::Widget;

    #[test]
    fn test_panel_rerenders_on_widget_change() {
        let frame = Frame::new(vec![("A", vec![1.into(), 2.into(), 3.into()])]).unwrap();
        let w = Interactive::new(frame).unwrap();
        let n = Widget::int_slider("n", 0, 10, 1).unwrap();
        let shifted = w.attr("A").unwrap().attr("max").unwrap().invoke().unwrap() + &n;
        let panel = shifted.panel(Kwargs::new());
        assert_eq!(panel.renders(), 1);
        assert_eq!(panel.latest().unwrap().as_value(), Some(&Value::from(4)));
        n.set_value(5).unwrap();
        assert_eq!(panel.renders(), 2);
        assert_eq!(panel.latest().unwrap().as_value(), Some(&Value::from(8)));
    }

    #[test]
    fn test_output_follows_dmap_option() {
        let frame = Frame::new(vec![("A", vec![1.into()])]).unwrap();
        let w = Interactive::new(frame).unwrap();
        assert_eq!(w.output().kind(), "Panel");
        let hv = w.hvplot().call(vec![], Kwargs::new()).unwrap();
        assert_eq!(hv.output().kind(), "DynamicMap");
    }

    #[test]
    fn test_holoviews_follows_widget_change() {
        let frame = Frame::new(vec![("A", vec![1.into(), 2.into(), 3.into()])]).unwrap();
        let w = Interactive::new(frame).unwrap();
        let n = Widget::int_slider("n", 0, 10, 1).unwrap();
        let node = w.attr("A").unwrap().attr("max").unwrap().invoke().unwrap() + &n;
        let hv = node.holoviews();
        assert_eq!(hv.render().unwrap().as_value(), Some(&Value::from(4)));

        n.set_value(5).unwrap();
        assert_eq!(hv.render().unwrap().as_value(), Some(&Value::from(8)));
        // eval() keeps the value from when the node was built.
        assert_eq!(node.eval().unwrap(), Value::from(4));
    }
}
