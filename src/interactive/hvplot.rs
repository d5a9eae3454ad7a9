//! The `hvplot` accessor of a pipeline node.

use super::node::Interactive;
use crate::dataset::plot::{is_hvplot_kind, HVPLOT_KINDS};
use crate::dataset::Value;
use crate::error::{InteractiveError, InteractiveResult};
use crate::kwargs::Kwargs;
use crate::transform::Arg;
use log::debug;

const HVPLOT_METHOD: &str = "hvplot";

/// Builds declarative plots from a node.
///
/// The resulting node renders through a dynamic map unless the plot kind is
/// a fixed string.
#[derive(Debug, Clone)]
pub struct HvPlotAccessor {
    node: Interactive,
}

impl HvPlotAccessor {
    pub(super) fn new(node: Interactive) -> Self {
        Self { node }
    }

    pub fn call(&self, args: Vec<Arg>, kwargs: Kwargs<Arg>) -> InteractiveResult<Interactive> {
        self.plot(None, args, kwargs)
    }

    /// The accessor for one plot kind, as `w.hvplot.scatter`.
    pub fn kind(&self, name: &str) -> InteractiveResult<KindAccessor> {
        if !is_hvplot_kind(name) {
            return Err(InteractiveError::attribute_not_found(name, "hvplot"));
        }
        Ok(KindAccessor {
            accessor: self.clone(),
            kind: name.to_string(),
        })
    }

    pub fn kinds() -> &'static [&'static str] {
        HVPLOT_KINDS
    }

    pub fn line(&self) -> KindAccessor {
        self.fixed_kind("line")
    }

    pub fn scatter(&self) -> KindAccessor {
        self.fixed_kind("scatter")
    }

    pub fn bar(&self) -> KindAccessor {
        self.fixed_kind("bar")
    }

    pub fn hist(&self) -> KindAccessor {
        self.fixed_kind("hist")
    }

    pub fn area(&self) -> KindAccessor {
        self.fixed_kind("area")
    }

    pub fn table(&self) -> KindAccessor {
        self.fixed_kind("table")
    }

    fn fixed_kind(&self, kind: &str) -> KindAccessor {
        KindAccessor {
            accessor: self.clone(),
            kind: kind.to_string(),
        }
    }

    fn plot(&self, kind: Option<&str>, args: Vec<Arg>, mut kwargs: Kwargs<Arg>) -> InteractiveResult<Interactive> {
        if let Some(kind) = kind {
            if kwargs.contains("kind") {
                return Err(InteractiveError::invalid_argument_named(
                    format!("{}() got an unexpected keyword argument 'kind'", kind),
                    "kind",
                ));
            }
            kwargs.insert("kind", Arg::from(kind));
        }
        let dmap = !matches!(kwargs.get("kind"), Some(Arg::Literal(Value::String(_))));
        debug!("hvplot call with dmap={}", dmap);
        let transform = self
            .node
            .resolved_transform()
            .call_accessor(HVPLOT_METHOD, args, kwargs);
        let mut node = self.node.derive(transform, false, Kwargs::new());
        node.options.dmap = dmap;
        Ok(node)
    }
}

/// `w.hvplot.<kind>`, which calls `hvplot` with `kind` set.
#[derive(Debug, Clone)]
pub struct KindAccessor {
    accessor: HvPlotAccessor,
    kind: String,
}

impl KindAccessor {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn call(&self, args: Vec<Arg>, kwargs: Kwargs<Arg>) -> InteractiveResult<Interactive> {
        self.accessor.plot(Some(self.kind.as_str()), args, kwargs)
    }

    pub fn invoke(&self) -> InteractiveResult<Interactive> {
        self.call(Vec::new(), Kwargs::new())
    }
}

impl Interactive {
    pub fn hvplot(&self) -> HvPlotAccessor {
        HvPlotAccessor::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Frame;
    use crate::reactive::Widget;

    fn node() -> Interactive {
        let frame = Frame::new(vec![
            ("x", vec![1.into(), 2.into()]),
            ("y", vec![3.into(), 4.into()]),
        ])
        .unwrap();
        Interactive::new(frame).unwrap()
    }

    #[test]
    fn test_fixed_kind_renders_without_dmap() {
        let plot = node().hvplot().scatter().invoke().unwrap();
        assert!(!plot.options().dmap);
        assert_eq!(
            plot.transform().to_string(),
            "df_dim('*').hvplot(kind='scatter')"
        );
    }

    #[test]
    fn test_widget_kind_uses_dmap() {
        let kind = Widget::select("kind", vec!["line".into(), "bar".into()], "line").unwrap();
        let plot = node()
            .hvplot()
            .call(vec![], Kwargs::new().with("kind", &kind))
            .unwrap();
        assert!(plot.options().dmap);
        assert_eq!(plot.widgets().len(), 1);
    }

    #[test]
    fn test_kind_twice_rejected() {
        let err = node()
            .hvplot()
            .line()
            .call(vec![], Kwargs::new().with("kind", "bar"))
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("line() got an unexpected keyword argument 'kind'"));
        assert!(node().hvplot().kind("nope").is_err());
    }
}
