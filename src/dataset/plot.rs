//! Plot kinds, declarative plots and the figure/axes model.

use super::value::Value;
use crate::kwargs::Kwargs;
use serde_json::{json, Value as JsonValue};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Kinds accepted by the `hvplot` accessor.
pub const HVPLOT_KINDS: &[&str] = &[
    "area",
    "bar",
    "barh",
    "bivariate",
    "box",
    "contour",
    "contourf",
    "dataset",
    "density",
    "errorbars",
    "heatmap",
    "hexbin",
    "hist",
    "image",
    "kde",
    "labels",
    "line",
    "ohlc",
    "paths",
    "points",
    "polygons",
    "quadmesh",
    "rgb",
    "scatter",
    "step",
    "table",
    "vectorfield",
    "violin",
];

/// Kinds accepted by the axes-drawing `plot` method.
pub const PLOT_KINDS: &[&str] = &[
    "area", "bar", "barh", "box", "density", "hexbin", "hist", "kde", "line", "pie", "scatter",
];

pub const DEFAULT_KIND: &str = "line";

pub fn is_hvplot_kind(kind: &str) -> bool {
    HVPLOT_KINDS.contains(&kind)
}

pub fn is_plot_kind(kind: &str) -> bool {
    PLOT_KINDS.contains(&kind)
}

/// A declarative plot: the data plus what to draw from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub kind: String,
    pub data: Box<Value>,
    pub x: Option<String>,
    pub y: Option<Box<Value>>,
    pub options: Kwargs<Value>,
}

impl PlotSpec {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data: Box::new(data),
            x: None,
            y: None,
            options: Kwargs::new(),
        }
    }

    /// Returns a copy with `options` merged over the current ones.
    pub fn with_options(&self, options: &Kwargs<Value>) -> Self {
        let mut plot = self.clone();
        plot.options = self.options.merged(options);
        plot
    }

    pub fn to_json(&self) -> JsonValue {
        let options: serde_json::Map<String, JsonValue> = self
            .options
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect();
        json!({
            "kind": self.kind,
            "x": self.x,
            "y": self.y.as_ref().map(|y| y.to_json()),
            "options": options,
            "data": self.data.to_json(),
        })
    }
}

/// One thing drawn on a set of axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub kind: String,
    pub label: Option<String>,
    pub points: usize,
}

#[derive(Debug, Default)]
struct AxesState {
    figure: Uuid,
    title: Option<String>,
    artists: Vec<Artist>,
}

/// Shared, mutable axes. Clones refer to the same axes.
#[derive(Clone)]
pub struct Axes(Rc<RefCell<AxesState>>);

impl Axes {
    fn new(figure: Uuid) -> Self {
        Self(Rc::new(RefCell::new(AxesState {
            figure,
            ..AxesState::default()
        })))
    }

    pub fn figure_id(&self) -> Uuid {
        self.0.borrow().figure
    }

    /// The figure these axes belong to.
    pub fn figure(&self) -> Figure {
        Figure {
            id: self.figure_id(),
            axes: self.clone(),
        }
    }

    pub fn title(&self) -> Option<String> {
        self.0.borrow().title.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.0.borrow_mut().title = Some(title.into());
    }

    pub fn draw(&self, artist: Artist) {
        self.0.borrow_mut().artists.push(artist);
    }

    pub fn artists(&self) -> Vec<Artist> {
        self.0.borrow().artists.clone()
    }

    pub fn ptr_eq(&self, other: &Axes) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn to_json(&self) -> JsonValue {
        let state = self.0.borrow();
        json!({
            "figure": state.figure.to_string(),
            "title": state.title,
            "artists": state.artists.iter().map(|a| json!({
                "kind": a.kind,
                "label": a.label,
                "points": a.points,
            })).collect::<Vec<_>>(),
        })
    }
}

impl PartialEq for Axes {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.borrow();
        f.debug_struct("Axes")
            .field("figure", &state.figure)
            .field("artists", &state.artists.len())
            .finish()
    }
}

/// A figure with a single set of axes.
#[derive(Clone)]
pub struct Figure {
    id: Uuid,
    axes: Axes,
}

impl Figure {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            axes: Axes::new(id),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn axes(&self) -> Axes {
        self.axes.clone()
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "id": self.id.to_string(),
            "axes": self.axes.to_json(),
        })
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Figure {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure").field("id", &self.id).finish()
    }
}
