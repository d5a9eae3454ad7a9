//! The interactive pipeline node.

use super::figure::{axis_provider, AXIS_KWARG, PLOT_METHOD};
use super::options::DisplayOptions;
use super::source::SharedSource;
use super::variant::{SourceKind, VariantRegistry};
use crate::dataset::{self, ApplyOptions, Dataset, Value};
use crate::error::{InteractiveError, InteractiveResult};
use crate::kwargs::Kwargs;
use crate::reactive::{Parameter, ReactiveFunction};
use crate::transform::{Arg, DimExpr};
use log::{debug, trace, warn};
use std::fmt;
use std::rc::Rc;

/// Operations provided by the pipeline itself rather than by the data.
///
/// A data member with one of these names is masked by the built-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Dmap,
    Eval,
    Holoviews,
    Hvplot,
    Layout,
    Output,
    Panel,
    Widgets,
    Dir,
    Doc,
}

impl Builtin {
    pub const ALL: [Builtin; 10] = [
        Builtin::Dmap,
        Builtin::Eval,
        Builtin::Holoviews,
        Builtin::Hvplot,
        Builtin::Layout,
        Builtin::Output,
        Builtin::Panel,
        Builtin::Widgets,
        Builtin::Dir,
        Builtin::Doc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Dmap => "dmap",
            Builtin::Eval => "eval",
            Builtin::Holoviews => "holoviews",
            Builtin::Hvplot => "hvplot",
            Builtin::Layout => "layout",
            Builtin::Output => "output",
            Builtin::Panel => "panel",
            Builtin::Widgets => "widgets",
            Builtin::Dir => "dir",
            Builtin::Doc => "doc",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.iter().copied().find(|b| b.name() == name)
    }
}

/// What a name resolved to on a node.
#[derive(Debug, Clone)]
pub enum Member {
    /// A data member; the node records it as its pending method
    Data(Interactive),
    /// One of the pipeline's own operations
    Builtin(Builtin),
}

/// A node of an interactive pipeline.
///
/// Attribute access, calls, operators and indexing each return a new node
/// whose expression extends this one. The expression is applied to the
/// shared source when the node is built, for introspection, and again every
/// time the callback runs.
#[derive(Clone)]
pub struct Interactive {
    pub(super) source: Rc<SharedSource>,
    pub(super) transform: DimExpr,
    pub(super) pending_method: Option<String>,
    pub(super) depth: usize,
    pub(super) options: DisplayOptions,
    pub(super) variant: SourceKind,
    current: Rc<InteractiveResult<Value>>,
    doc: Option<String>,
}

impl Interactive {
    /// Wraps `source` with default display options.
    pub fn new(source: impl Into<Value>) -> InteractiveResult<Self> {
        Self::with_options(source, DisplayOptions::default())
    }

    pub fn with_options(source: impl Into<Value>, options: DisplayOptions) -> InteractiveResult<Self> {
        Self::with_registry(source, options, &VariantRegistry::default())
    }

    /// Wraps `source`, choosing the identity expression through `registry`.
    pub fn with_registry(
        source: impl Into<Value>,
        options: DisplayOptions,
        registry: &VariantRegistry,
    ) -> InteractiveResult<Self> {
        Self::root(SharedSource::fixed(source.into()), options, registry)
    }

    /// Wraps the value produced by `driver`. The source is replaced whenever
    /// one of the driver's dependencies changes.
    pub fn from_driver(driver: ReactiveFunction<Value>, options: DisplayOptions) -> InteractiveResult<Self> {
        Self::root(SharedSource::driven(driver), options, &VariantRegistry::default())
    }

    fn root(
        source: Rc<SharedSource>,
        options: DisplayOptions,
        registry: &VariantRegistry,
    ) -> InteractiveResult<Self> {
        let value = source.value()?;
        let variant = registry.resolve(&value);
        let transform = variant.identity(&value)?;
        Ok(Self::build(source, transform, None, 0, options, variant, None))
    }

    fn build(
        source: Rc<SharedSource>,
        transform: DimExpr,
        pending_method: Option<String>,
        depth: usize,
        options: DisplayOptions,
        variant: SourceKind,
        doc: Option<String>,
    ) -> Self {
        let current = source.value().and_then(|data| {
            Dataset::new(data).apply(
                &transform,
                ApplyOptions {
                    keep_index: true,
                    eager: false,
                },
            )
        });
        match &current {
            Ok(value) => debug!("node depth {} {} -> {}", depth, transform, value.type_name()),
            Err(e) => warn!("⚠️ node depth {} {} failed: {}", depth, transform, e),
        }
        Self {
            source,
            transform,
            pending_method,
            depth,
            options,
            variant,
            current: Rc::new(current),
            doc,
        }
    }

    /// A new node with `transform`, the pending method cleared and `plot`
    /// sticky once set.
    pub(super) fn derive(&self, transform: DimExpr, plot: bool, inherit_kwargs: Kwargs<Arg>) -> Self {
        let mut options = self.options.clone();
        options.plot = self.options.plot || plot;
        options.inherit_kwargs = inherit_kwargs;
        Self::build(
            self.source.clone(),
            transform,
            None,
            self.depth + 1,
            options,
            self.variant,
            None,
        )
    }

    /// A new node with the same expression and pending state.
    fn copy(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    pub fn transform(&self) -> &DimExpr {
        &self.transform
    }

    pub fn pending_method(&self) -> Option<&str> {
        self.pending_method.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn variant(&self) -> SourceKind {
        self.variant
    }

    pub fn source(&self) -> &Rc<SharedSource> {
        &self.source
    }

    /// Documentation copied from the data member this node refers to.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The expression with the pending method, if any, appended as an accessor.
    pub fn resolved_transform(&self) -> DimExpr {
        match &self.pending_method {
            Some(method) => self.transform.accessor(method),
            None => self.transform.clone(),
        }
    }

    /// The introspection value narrowed by the pending method.
    fn narrowed(&self) -> InteractiveResult<Value> {
        let current = (*self.current).clone()?;
        match &self.pending_method {
            Some(method) => dataset::get_attr(&current, method),
            None => Ok(current),
        }
    }

    /// Records the pending method into the expression.
    pub fn resolve_accessor(&self) -> Interactive {
        let method = match &self.pending_method {
            None => return self.copy(),
            Some(method) => method,
        };
        trace!("resolving accessor '{}'", method);
        let mut inherit_kwargs = Kwargs::new();
        if method == PLOT_METHOD {
            inherit_kwargs.insert(AXIS_KWARG, Arg::Function(axis_provider()));
        }
        self.derive(self.transform.accessor(method), false, inherit_kwargs)
    }

    /// Resolves `name` against the data first, then the built-ins.
    pub fn member(&self, name: &str) -> InteractiveResult<Member> {
        if let Some(builtin) = Builtin::from_name(name) {
            return Ok(Member::Builtin(builtin));
        }
        if name.starts_with('_') {
            return Err(InteractiveError::attribute_not_found(name, "Interactive"));
        }
        let current = self.narrowed()?;
        if !dataset::members(&current).iter().any(|m| m == name) {
            return Err(InteractiveError::attribute_not_found(name, "Interactive"));
        }
        let mut node = self.resolve_accessor();
        trace!("'{}' resolved on {}", name, current.type_name());
        node.pending_method = Some(name.to_string());
        node.doc = dataset::member_doc(&current, name);
        Ok(Member::Data(node))
    }

    /// Data member access, as `w.name`. Built-in names are not data members.
    pub fn attr(&self, name: &str) -> InteractiveResult<Interactive> {
        match self.member(name)? {
            Member::Data(node) => Ok(node),
            Member::Builtin(_) => Err(InteractiveError::attribute_not_found(name, "Interactive")),
        }
    }

    /// Calls the pending method. On an unchained root this instead returns a
    /// node with display options updated from `kwargs`.
    pub fn call(&self, args: Vec<Arg>, kwargs: Kwargs<Arg>) -> InteractiveResult<Interactive> {
        let method = match &self.pending_method {
            Some(method) => method.clone(),
            None if self.depth == 0 => return self.configured(args, &kwargs),
            None => {
                return Err(InteractiveError::not_callable(format!(
                    "'{}' has no pending method to call",
                    self.transform
                )))
            }
        };
        let mut kwargs = kwargs;
        if method == PLOT_METHOD {
            kwargs.insert(AXIS_KWARG, Arg::Function(axis_provider()));
        }
        let kwargs = self.options.inherit_kwargs.merged(&kwargs);
        let transform = self.transform.call_accessor(&method, args, kwargs);
        Ok(self.derive(transform, method == PLOT_METHOD, Kwargs::new()))
    }

    /// Calls the pending method without arguments.
    pub fn invoke(&self) -> InteractiveResult<Interactive> {
        self.call(Vec::new(), Kwargs::new())
    }

    fn configured(&self, args: Vec<Arg>, kwargs: &Kwargs<Arg>) -> InteractiveResult<Interactive> {
        if !args.is_empty() {
            return Err(InteractiveError::invalid_argument(
                "an interactive pipeline is configured with keyword arguments only",
            ));
        }
        let mut options = self.options.updated(kwargs)?;
        options.inherit_kwargs = Kwargs::new();
        Ok(Self::build(
            self.source.clone(),
            self.transform.clone(),
            None,
            self.depth + 1,
            options,
            self.variant,
            None,
        ))
    }

    /// The current value of the pipeline.
    pub fn eval(&self) -> InteractiveResult<Value> {
        let current = (*self.current).clone()?;
        Ok(match &self.pending_method {
            Some(method) => match dataset::get_attr(&current, method) {
                Ok(value) => value,
                Err(_) => current,
            },
            None => current,
        })
    }

    /// Built-ins plus the members of the current value, sorted.
    pub fn dir(&self) -> Vec<String> {
        let mut names: Vec<String> = Builtin::ALL.iter().map(|b| b.name().to_string()).collect();
        if let Ok(current) = self.narrowed() {
            names.extend(dataset::members(&current));
        }
        names.sort();
        names.dedup();
        names
    }

    /// Reactive parameters the pipeline depends on: the driver's first, then
    /// those recorded in the expression. The `ax` provider is excluded.
    pub fn params(&self) -> Vec<Parameter> {
        let mut params: Vec<Parameter> = self
            .source
            .driver()
            .map(|driver| driver.dependencies().to_vec())
            .unwrap_or_default();
        for (key, param) in self.transform.params() {
            if key == AXIS_KWARG || params.iter().any(|p| p.ptr_eq(&param)) {
                continue;
            }
            params.push(param);
        }
        params
    }
}

impl fmt::Debug for Interactive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactive")
            .field("transform", &self.transform.to_string())
            .field("pending_method", &self.pending_method)
            .field("depth", &self.depth)
            .field("variant", &self.variant)
            .finish()
    }
}

impl fmt::Display for Interactive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interactive({})", self.resolved_transform())
    }
}

impl From<&Interactive> for Arg {
    fn from(node: &Interactive) -> Self {
        Arg::Expr(node.resolved_transform())
    }
}

impl From<Interactive> for Arg {
    fn from(node: Interactive) -> Self {
        Arg::from(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Frame, Series};

    fn frame() -> Value {
        Value::Frame(
            Frame::new(vec![
                ("A", vec![1.into(), 2.into(), 3.into()]),
                ("B", vec![4.into(), 5.into(), 6.into()]),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_attribute_sets_pending_method() {
        let w = Interactive::new(frame()).unwrap();
        let a = w.attr("A").unwrap();
        assert_eq!(a.pending_method(), Some("A"));
        assert!(a.transform().ops.is_empty());
        assert_eq!(a.doc(), Some("Column 'A' as a Series."));
        let max = a.attr("max").unwrap();
        assert_eq!(max.transform().ops.len(), 1);
        assert_eq!(max.pending_method(), Some("max"));
    }

    #[test]
    fn test_builtin_masks_data_member() {
        let w = Interactive::new(frame()).unwrap();
        assert!(matches!(w.member("hvplot").unwrap(), Member::Builtin(Builtin::Hvplot)));
        assert!(w.attr("eval").is_err());
    }

    #[test]
    fn test_private_and_unknown_names() {
        let w = Interactive::new(frame()).unwrap();
        assert!(matches!(
            w.member("_private"),
            Err(InteractiveError::AttributeNotFound { .. })
        ));
        assert!(matches!(
            w.member("nope"),
            Err(InteractiveError::AttributeNotFound { .. })
        ));
    }

    #[test]
    fn test_call_without_method_past_root() {
        let w = Interactive::new(frame()).unwrap();
        let negated = -&w.attr("A").unwrap();
        assert!(matches!(negated.invoke(), Err(InteractiveError::NotCallable { .. })));
    }

    #[test]
    fn test_unnamed_series_rejected() {
        let err = Interactive::new(Series::unnamed(vec![1.into()])).unwrap_err();
        assert!(matches!(err, InteractiveError::Configuration { .. }));
    }

    #[test]
    fn test_failure_is_stored_until_eval() {
        let w = Interactive::new(frame()).unwrap();
        let bad = w.index("missing");
        assert!(bad.eval().unwrap_err().is_evaluation());
        assert!(bad.eval().is_err());
    }
}
