//! Finds the widgets a pipeline depends on.

use super::node::Interactive;
use crate::reactive::{Widget, WidgetBox};
use crate::transform::{Arg, Operation};

/// Widgets referenced by one operation's arguments, including those nested in
/// lists and sub-expressions. A parameter counts through its owning widget.
pub fn discover_widgets(operation: &Operation) -> Vec<Widget> {
    let mut found = Vec::new();
    for (_, arg) in operation.all_args() {
        collect(arg, &mut found);
    }
    found
}

fn collect(arg: &Arg, found: &mut Vec<Widget>) {
    match arg {
        Arg::Widget(widget) => push_unique(found, widget.clone()),
        Arg::Param(param) => {
            if let Some(owner) = param.owner() {
                push_unique(found, owner);
            }
        }
        Arg::List(items) => {
            for item in items {
                collect(item, found);
            }
        }
        Arg::Expr(expr) => {
            for operation in &expr.ops {
                for widget in discover_widgets(operation) {
                    push_unique(found, widget);
                }
            }
        }
        Arg::Literal(_) | Arg::Function(_) => {}
    }
}

fn push_unique(found: &mut Vec<Widget>, widget: Widget) {
    if !found.iter().any(|w| w.ptr_eq(&widget)) {
        found.push(widget);
    }
}

impl Interactive {
    /// Widgets owning the driver's dependencies, then widgets found in the
    /// expression, each once in first-seen order.
    pub fn widgets(&self) -> WidgetBox {
        let mut found = Vec::new();
        if let Some(driver) = self.source.driver() {
            for param in driver.dependencies() {
                if let Some(owner) = param.owner() {
                    push_unique(&mut found, owner);
                }
            }
        }
        for operation in &self.transform.ops {
            for widget in discover_widgets(operation) {
                push_unique(&mut found, widget);
            }
        }
        WidgetBox::new(found)
    }
}
