//! # Interactive Pipeline Library
//!
//! Deferred-evaluation pipelines over in-memory tabular data. Wrapping a frame
//! or a named series in an [`Interactive`] node records every attribute
//! access, method call, operator and index as a symbolic expression. Any
//! argument may be a widget or reactive parameter; when one changes, the
//! pipeline re-evaluates and its outputs re-render.
//!
//! ## Core Components
//!
//! * `dataset` - values, series, frames, member tables and plots
//! * `transform` - the expression AST and its interpreter
//! * `reactive` - parameters, widgets and reactive functions
//! * `interactive` - pipeline nodes, callbacks, outputs and layouts
//! * `config` - TOML configuration with environment overrides
//! * `logging` - `env_logger` setup
//! * `error` - error types and handling
//!
//! ## Example
//!
//! ```
//! use interactive_pipeline::{Frame, Interactive, Kwargs, Widget};
//!
//! let frame = Frame::new(vec![("A", vec![1.into(), 2.into(), 3.into()])]).unwrap();
//! let w = Interactive::new(frame).unwrap();
//! let n = Widget::int_slider("n", 0, 10, 1).unwrap();
//! let shifted = w.attr("A").unwrap().attr("max").unwrap().invoke().unwrap() + &n;
//!
//! let panel = shifted.panel(Kwargs::new());
//! n.set_value(4).unwrap();
//! assert_eq!(panel.renders(), 2);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod interactive;
pub mod kwargs;
pub mod logging;
pub mod reactive;
pub mod transform;

// Re-export main types for convenience
pub use config::{DisplayConfig, InteractiveConfig, LoggingConfig};
pub use dataset::{Dataset, Frame, Series, Value};
pub use error::{InteractiveError, InteractiveResult};
pub use interactive::{
    DisplayOptions, DynamicMap, Interactive, Layout, Location, Output, Panel, Rendered,
};
pub use kwargs::Kwargs;
pub use logging::LoggingSystem;
pub use reactive::{Parameter, ReactiveFunction, Widget, WidgetBox};
pub use transform::{Arg, DimExpr};
