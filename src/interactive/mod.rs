//! # Interactive pipelines
//!
//! An [`Interactive`] node wraps a data source and records everything done to
//! it as a [`DimExpr`](crate::transform::DimExpr): attribute access, method
//! calls, operators and indexing. Arguments may be widgets or parameters, in
//! which case the pipeline re-evaluates whenever they change.
//!
//! * `node` - the node itself, member resolution and calls
//! * `operators` - arithmetic, comparison and unary operators
//! * `widgets` - widget discovery
//! * `callback` - the render function and its results
//! * `output` / `layout` - dynamic maps, panels and their arrangement
//! * `hvplot` - the declarative plotting accessor
//! * `source` - the value shared by every node of a pipeline
//! * `variant` - how a source kind maps to an identity expression
//! * `figure` - the last-figure slot used by `plot`
//! * `options` - display options

pub mod callback;
pub mod figure;
pub mod hvplot;
pub mod layout;
pub mod node;
pub mod operators;
pub mod options;
pub mod output;
pub mod source;
pub mod variant;
pub mod widgets;

pub use callback::{make_callback, Rendered, TablePane};
pub use hvplot::{HvPlotAccessor, KindAccessor};
pub use layout::Layout;
pub use node::{Builtin, Interactive, Member};
pub use options::{DisplayOptions, Location};
pub use output::{DynamicMap, Output, Panel};
pub use source::SharedSource;
pub use variant::{SourceKind, VariantRegistry};
pub use widgets::discover_widgets;
