mod test_helpers;

use interactive_pipeline::dataset::Value;
use interactive_pipeline::interactive::figure::{current_figure, AXIS_KWARG};
use interactive_pipeline::interactive::{Member, Rendered};
use interactive_pipeline::transform::Ufunc;
use interactive_pipeline::{
    Arg, DisplayOptions, Interactive, InteractiveConfig, InteractiveError, Kwargs, Location,
    Series,
};
use test_helpers::{flags, numbers, sample_frame, sample_node};

#[test]
fn test_column_max() {
    let w = sample_node();
    let max = w.attr("A").unwrap().attr("max").unwrap().invoke().unwrap();
    assert_eq!(max.eval().unwrap(), Value::from(3));
}

#[test]
fn test_comparison_gives_mask() {
    let w = sample_node();
    let mask = w.attr("A").unwrap().gt(1);
    assert_eq!(mask.eval().unwrap(), flags("A", &[false, true, true]));
}

#[test]
fn test_boolean_indexing_filters_rows() {
    let w = sample_node();
    let mask = w.attr("A").unwrap().gt(1);
    let filtered = match w.index(&mask).eval().unwrap() {
        Value::Frame(frame) => frame,
        other => panic!("expected a frame, got {:?}", other),
    };
    assert_eq!(filtered.n_rows(), 2);
    assert_eq!(
        filtered.column("A").unwrap().values().to_vec(),
        vec![Value::from(2), Value::from(3)]
    );
}

#[test]
fn test_chain_matches_direct_application() {
    let w = sample_node();
    let chained = w.attr("A").unwrap() * 2 + 1;
    assert_eq!(chained.eval().unwrap(), numbers("A", &[3.0, 5.0, 7.0]));

    let direct = sample_frame().column("A").unwrap().head(2);
    let head = w
        .attr("A")
        .unwrap()
        .attr("head")
        .unwrap()
        .call(vec![Arg::from(2)], Kwargs::new())
        .unwrap();
    assert_eq!(head.eval().unwrap(), Value::Series(direct));
}

#[test]
fn test_eval_is_repeatable() {
    let w = sample_node();
    let node = (w.attr("A").unwrap() + 10).ufunc(Ufunc::Sqrt);
    assert_eq!(node.eval().unwrap(), node.eval().unwrap());
}

#[test]
fn test_reflected_operator_negates() {
    let w = sample_node();
    let a = w.attr("A").unwrap();
    let forward = &a - 1;
    let reflected = 1_i64 - &a;
    assert_eq!((-&forward).eval().unwrap(), reflected.eval().unwrap());
}

#[test]
fn test_unnamed_series_rejected_eagerly() {
    let err = Interactive::new(Series::unnamed(vec![1.into(), 2.into()])).unwrap_err();
    match err {
        InteractiveError::Configuration { config_key, .. } => {
            assert_eq!(config_key.as_deref(), Some("name"))
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_named_series_source() {
    let w = Interactive::new(Series::from_f64("x", vec![1.0, 4.0, 9.0])).unwrap();
    assert_eq!(w.transform().to_string(), "xr_dim('x')");
    let root = w.ufunc(Ufunc::Sqrt);
    assert_eq!(root.eval().unwrap(), numbers("x", &[1.0, 2.0, 3.0]));
}

#[test]
fn test_root_call_updates_options() {
    let w = sample_node();
    let configured = w
        .call(
            vec![],
            Kwargs::new()
                .with("loc", Arg::from("left"))
                .with("max_rows", Arg::from(5))
                .with("width", Arg::from(400)),
        )
        .unwrap();
    assert_eq!(configured.options().loc, Location::Left);
    assert_eq!(configured.options().max_rows, 5);
    assert_eq!(configured.options().kwargs.get("width"), Some(&Value::from(400)));
    assert_eq!(configured.transform(), w.transform());

    let err = w
        .call(vec![], Kwargs::new().with("loc", Arg::from("middle")))
        .unwrap_err();
    assert!(matches!(err, InteractiveError::InvalidArgument { .. }));

    assert!(matches!(
        configured.invoke(),
        Err(InteractiveError::NotCallable { .. })
    ));
}

#[test]
fn test_options_from_config() {
    let mut config = InteractiveConfig::default();
    config.display.loc = Location::Bottom;
    config.display.max_rows = 2;
    let w = Interactive::with_options(sample_frame(), DisplayOptions::from_config(&config)).unwrap();
    assert_eq!(w.options().loc, Location::Bottom);
    let rendered = w.callback().call().unwrap();
    assert_eq!(rendered.as_table().unwrap().visible().n_rows(), 2);
}

#[test]
fn test_hvplot_kind_collision() {
    let w = sample_node();
    let err = w
        .hvplot()
        .line()
        .call(vec![], Kwargs::new().with("kind", Arg::from("bar")))
        .unwrap_err();
    assert!(matches!(err, InteractiveError::InvalidArgument { .. }));
    assert!(matches!(
        w.hvplot().kind("not_a_kind"),
        Err(InteractiveError::AttributeNotFound { .. })
    ));
}

#[test]
fn test_hvplot_renders_plot_spec() {
    let w = sample_node();
    let plot = w
        .hvplot()
        .kind("scatter")
        .unwrap()
        .call(vec![Arg::from("A")], Kwargs::new().with("title", Arg::from("t")))
        .unwrap();
    match plot.eval().unwrap() {
        Value::Plot(spec) => {
            assert_eq!(spec.kind, "scatter");
            assert_eq!(spec.x.as_deref(), Some("A"));
            assert_eq!(spec.options.get("title"), Some(&Value::from("t")));
        }
        other => panic!("expected a plot, got {:?}", other),
    }
}

#[test]
fn test_plot_injects_axes_and_renders_figure() {
    let w = sample_node();
    let plot = w.attr("A").unwrap().attr("plot").unwrap().invoke().unwrap();
    assert!(plot.options().plot);
    let last = plot.transform().ops.last().unwrap();
    assert!(last.kwargs.contains(AXIS_KWARG));
    assert!(plot.params().is_empty());

    let rendered = plot.callback().call().unwrap();
    let figure = match rendered {
        Rendered::Figure(Some(figure)) => figure,
        other => panic!("expected a figure, got {:?}", other),
    };
    assert_eq!(Some(figure.clone()), current_figure());
    let artists = figure.axes().artists();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].label.as_deref(), Some("A"));
}

#[test]
fn test_dir_lists_builtins_members_and_columns() {
    let w = sample_node();
    let names = w.dir();
    for expected in ["A", "B", "eval", "head", "layout", "widgets"] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names, sorted);
}

#[test]
fn test_member_resolution() {
    let w = sample_node();
    assert!(matches!(w.member("widgets").unwrap(), Member::Builtin(_)));
    let head = w.attr("head").unwrap();
    assert_eq!(head.doc(), Some("Return the first `n` rows."));
    assert!(matches!(
        w.attr("missing"),
        Err(InteractiveError::AttributeNotFound { .. })
    ));
}

#[test]
fn test_failure_surfaces_from_eval() {
    let w = sample_node();
    let broken = w.index("missing");
    let err = broken.eval().unwrap_err();
    assert!(err.is_evaluation());
    assert!(broken.callback().call().is_err());
}
