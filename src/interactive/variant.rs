//! Picks how a source is wrapped, based on what kind of value it is.

use crate::dataset::Value;
use crate::error::{InteractiveError, InteractiveResult};
use crate::transform::DimExpr;

/// The category of a pipeline's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A frame of named columns
    Tabular,
    /// A one-dimensional array that must carry a name
    NamedArray,
    /// Anything else
    Generic,
}

impl SourceKind {
    /// The identity expression for a source of this kind.
    pub fn identity(&self, source: &Value) -> InteractiveResult<DimExpr> {
        match self {
            SourceKind::Tabular => Ok(DimExpr::frame()),
            SourceKind::Generic => Ok(DimExpr::generic()),
            SourceKind::NamedArray => match source {
                Value::Series(s) => s.name().map(DimExpr::named).ok_or_else(|| {
                    InteractiveError::configuration_with_key(
                        "Cannot use interactive API on an array without name",
                        "name",
                        "Assign a name to the array and try again",
                    )
                }),
                _ => Ok(DimExpr::generic()),
            },
        }
    }
}

type Predicate = fn(&Value) -> bool;

/// Ordered predicate-to-kind table. The last matching entry wins, so later
/// registrations specialise earlier ones.
#[derive(Clone)]
pub struct VariantRegistry {
    entries: Vec<(Predicate, SourceKind)>,
}

impl VariantRegistry {
    /// A registry with no entries; everything resolves to `Generic`.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, predicate: Predicate, kind: SourceKind) {
        self.entries.push((predicate, kind));
    }

    pub fn resolve(&self, value: &Value) -> SourceKind {
        self.entries
            .iter()
            .rev()
            .find(|(applies, _)| applies(value))
            .map(|(_, kind)| *kind)
            .unwrap_or(SourceKind::Generic)
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(|v| matches!(v, Value::Frame(_)), SourceKind::Tabular);
        registry.register(|v| matches!(v, Value::Series(_)), SourceKind::NamedArray);
        registry
    }
}

impl std::fmt::Debug for VariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("entries", &self.entries.iter().map(|(_, k)| k).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Series;

    #[test]
    fn test_last_match_wins() {
        let mut registry = VariantRegistry::default();
        assert_eq!(registry.resolve(&Value::from(1)), SourceKind::Generic);
        registry.register(|v| matches!(v, Value::Number(_)), SourceKind::Tabular);
        assert_eq!(registry.resolve(&Value::from(1)), SourceKind::Tabular);
    }

    #[test]
    fn test_unnamed_array_rejected() {
        let series = Value::Series(Series::unnamed(vec![1.into()]));
        let err = SourceKind::NamedArray.identity(&series).unwrap_err();
        assert!(matches!(err, InteractiveError::Configuration { .. }));
    }
}
