//! # Reactive layer
//!
//! Single-threaded change propagation for interactive pipelines.
//!
//! * [`Parameter`] - a named, version-tracked value with subscribers
//! * [`Subscription`] - RAII guard; dropping it unsubscribes
//! * [`Widget`] - a control whose `value` parameter it owns
//! * [`ReactiveFunction`] - a function with declared parameter dependencies
//!
//! Subscribers are held weakly and pruned during notification. They run in
//! registration order, after the new value is stored.

pub mod function;
pub mod parameter;
pub mod widget;

pub use function::ReactiveFunction;
pub use parameter::{Parameter, Subscription};
pub use widget::{Widget, WidgetBox, WidgetKind};
