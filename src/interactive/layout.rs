//! Arranges the widget box and the output.

use super::node::Interactive;
use super::options::Location;
use super::output::Output;
use crate::dataset::Value;
use crate::kwargs::Kwargs;
use crate::reactive::WidgetBox;

/// A tree of layout containers.
#[derive(Debug, Clone)]
pub enum Layout {
    Row {
        children: Vec<Layout>,
        options: Kwargs<Value>,
    },
    Column(Vec<Layout>),
    HSpacer,
    VSpacer,
    Widgets(WidgetBox),
    Output(Output),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

fn side(loc: Location) -> Side {
    match loc {
        Location::Left | Location::LeftTop | Location::LeftBottom => Side::Left,
        Location::Right | Location::RightTop | Location::RightBottom => Side::Right,
        Location::Top | Location::TopLeft | Location::TopRight => Side::Top,
        Location::Bottom | Location::BottomLeft | Location::BottomRight => Side::Bottom,
    }
}

fn row(children: Vec<Layout>) -> Layout {
    Layout::Row {
        children,
        options: Kwargs::new(),
    }
}

impl Layout {
    /// Places `widgets` around `output` according to `loc`, optionally
    /// centering the output between spacers. `options` go on the outer row.
    pub fn compose(
        loc: Location,
        center: bool,
        widgets: WidgetBox,
        output: Output,
        options: Kwargs<Value>,
    ) -> Layout {
        let panel = Layout::Output(output);
        if widgets.is_empty() {
            let children = if center {
                vec![Layout::HSpacer, panel, Layout::HSpacer]
            } else {
                vec![panel]
            };
            return Layout::Row { children, options };
        }

        let boxed = Layout::Widgets(widgets);
        let placed = match loc {
            Location::Left | Location::Right => {
                Layout::Column(vec![Layout::VSpacer, boxed, Layout::VSpacer])
            }
            Location::Top | Location::Bottom => row(vec![Layout::HSpacer, boxed, Layout::HSpacer]),
            Location::TopLeft | Location::BottomLeft => row(vec![boxed, Layout::HSpacer]),
            Location::TopRight | Location::BottomRight => row(vec![Layout::HSpacer, boxed]),
            Location::LeftTop | Location::RightTop => Layout::Column(vec![boxed, Layout::VSpacer]),
            Location::LeftBottom | Location::RightBottom => {
                Layout::Column(vec![Layout::VSpacer, boxed])
            }
        };

        let children = match (side(loc), center) {
            (Side::Left, true) => vec![placed, Layout::HSpacer, panel, Layout::HSpacer],
            (Side::Right, true) => vec![Layout::HSpacer, panel, Layout::HSpacer, placed],
            (Side::Top, true) => vec![
                Layout::HSpacer,
                Layout::Column(vec![placed, row(vec![Layout::HSpacer, panel, Layout::HSpacer])]),
                Layout::HSpacer,
            ],
            (Side::Bottom, true) => vec![
                Layout::HSpacer,
                Layout::Column(vec![row(vec![Layout::HSpacer, panel, Layout::HSpacer]), placed]),
                Layout::HSpacer,
            ],
            (Side::Left, false) => vec![placed, panel],
            (Side::Right, false) => vec![panel, placed],
            (Side::Top, false) => vec![Layout::Column(vec![placed, panel])],
            (Side::Bottom, false) => vec![Layout::Column(vec![panel, placed])],
        };
        Layout::Row { children, options }
    }

    pub fn children(&self) -> &[Layout] {
        match self {
            Layout::Row { children, .. } | Layout::Column(children) => children,
            _ => &[],
        }
    }

    /// The first output in the tree.
    pub fn output(&self) -> Option<&Output> {
        match self {
            Layout::Output(output) => Some(output),
            _ => self.children().iter().find_map(Layout::output),
        }
    }

    /// A compact outline of the tree, e.g. `Row(Widgets(n), Panel)`.
    pub fn describe(&self) -> String {
        let nested = |name: &str, children: &[Layout]| {
            let inner: Vec<String> = children.iter().map(Layout::describe).collect();
            format!("{}({})", name, inner.join(", "))
        };
        match self {
            Layout::Row { children, .. } => nested("Row", children.as_slice()),
            Layout::Column(children) => nested("Column", children.as_slice()),
            Layout::HSpacer => "HSpacer".to_string(),
            Layout::VSpacer => "VSpacer".to_string(),
            Layout::Widgets(widgets) => format!("Widgets({})", widgets.names().join(", ")),
            Layout::Output(output) => output.kind().to_string(),
        }
    }
}

impl Interactive {
    /// The widgets and output arranged by the node's `loc` and `center`.
    pub fn layout(&self, kwargs: Kwargs<Value>) -> Layout {
        Layout::compose(
            self.options.loc,
            self.options.center,
            self.widgets(),
            self.output(),
            kwargs,
        )
    }
}
