mod test_helpers;

use interactive_pipeline::dataset::Value;
use interactive_pipeline::{
    DisplayOptions, Interactive, InteractiveError, Kwargs, Parameter, ReactiveFunction, Widget,
};
use test_helpers::{init_logging, numbers, sample_frame, sample_node};

/// A driver returning the first `rows` rows of the sample frame; negative
/// row counts fail.
fn head_driver(rows: &Parameter) -> ReactiveFunction<Value> {
    let read = rows.clone();
    ReactiveFunction::depends(vec![rows.clone()], move || {
        match read.get().as_i64() {
            Some(n) if n >= 0 => Ok(Value::Frame(sample_frame().head(n as usize))),
            _ => Err(InteractiveError::evaluation("row count must be non-negative", "driver")),
        }
    })
}

fn row_count(rows: &Parameter) -> Interactive {
    init_logging();
    let w = Interactive::from_driver(head_driver(rows), DisplayOptions::default()).unwrap();
    w.attr("A").unwrap().attr("count").unwrap().invoke().unwrap()
}

/// A driver returning a series whose name is the current value of `column`.
fn named_series_driver(column: &Parameter) -> ReactiveFunction<Value> {
    let read = column.clone();
    ReactiveFunction::depends(vec![column.clone()], move || {
        let name = read.get();
        match name.as_str() {
            Some("a") => Ok(numbers("a", &[1.0, 2.0])),
            Some(other) => Ok(numbers(other, &[1.0, 2.0, 30.0])),
            None => Err(InteractiveError::evaluation("column must be a string", "driver")),
        }
    })
}

#[test]
fn test_driver_change_reaches_callback() {
    let rows = Parameter::new("rows", 2);
    let count = row_count(&rows);
    let callback = count.callback();
    assert_eq!(callback.call().unwrap().as_value(), Some(&Value::from(2)));

    rows.set(3);
    assert_eq!(callback.call().unwrap().as_value(), Some(&Value::from(3)));
    assert_eq!(count.source().refreshes(), 1);
}

#[test]
fn test_driver_dependencies_come_first_in_params() {
    let rows = Parameter::new("rows", 2);
    let scale = Parameter::new("scale", 10);
    let node = row_count(&rows) * &scale;
    let params = node.params();
    assert_eq!(params.len(), 2);
    assert!(params[0].ptr_eq(&rows));
    assert!(params[1].ptr_eq(&scale));
}

#[test]
fn test_panel_follows_driver() {
    let rows = Parameter::new("rows", 1);
    let panel = row_count(&rows).panel(Kwargs::new());
    assert_eq!(panel.renders(), 1);

    rows.set(3);
    assert_eq!(panel.renders(), 2);
    assert_eq!(panel.latest().unwrap().as_value(), Some(&Value::from(3)));

    // Setting the same value is not a change.
    rows.set(3);
    assert_eq!(panel.renders(), 2);
}

#[test]
fn test_unrelated_parameter_does_not_rerender() {
    let w = sample_node();
    let factor = Widget::int_slider("factor", 1, 5, 1).unwrap();
    let other = Widget::int_slider("other", 1, 5, 1).unwrap();
    let scaled = w.attr("A").unwrap().attr("sum").unwrap().invoke().unwrap() * &factor;
    let panel = scaled.panel(Kwargs::new());

    other.set_value(4).unwrap();
    assert_eq!(panel.renders(), 1);

    factor.set_value(2).unwrap();
    assert_eq!(panel.renders(), 2);
    assert_eq!(panel.latest().unwrap().as_value(), Some(&Value::from(12)));
}

#[test]
fn test_driver_failure_is_reported_then_recovers() {
    let rows = Parameter::new("rows", 2);
    let count = row_count(&rows);
    let panel = count.panel(Kwargs::new());

    rows.set(-1);
    assert!(count.callback().call().is_err());
    assert!(panel.latest().is_err());

    rows.set(1);
    assert_eq!(panel.latest().unwrap().as_value(), Some(&Value::from(1)));
}

#[test]
fn test_initial_driver_failure_is_raised() {
    let rows = Parameter::new("rows", -1);
    let result = Interactive::from_driver(head_driver(&rows), DisplayOptions::default());
    assert!(result.is_err());
}

#[test]
fn test_widgets_found_once_in_order() {
    let w = sample_node();
    let first = Widget::int_slider("first", 0, 10, 1).unwrap();
    let second = Widget::float_slider("second", 0.0, 1.0, 0.5).unwrap();
    let node = ((w.attr("A").unwrap() * &first) + &second) - first.param();
    let names = node.widgets().names();
    assert_eq!(names, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn test_driver_widgets_listed_first() {
    init_logging();
    let rows = Widget::int_slider("rows", 0, 3, 2).unwrap();
    let offset = Widget::int_slider("offset", 0, 3, 0).unwrap();
    let w = Interactive::from_driver(head_driver(&rows.param()), DisplayOptions::default()).unwrap();
    let node = w.attr("A").unwrap() + &offset;
    assert_eq!(node.widgets().names(), vec!["rows".to_string(), "offset".to_string()]);

    rows.set_value(3).unwrap();
    match node.callback().call().unwrap().as_value() {
        Some(Value::Series(s)) => assert_eq!(s.len(), 3),
        other => panic!("expected a series, got {:?}", other),
    }
    // eval() reads the snapshot taken when the node was built.
    match node.eval().unwrap() {
        Value::Series(s) => assert_eq!(s.len(), 2),
        other => panic!("expected a series, got {:?}", other),
    }
}

#[test]
fn test_dropped_panel_stops_rendering() {
    let rows = Parameter::new("rows", 1);
    let count = row_count(&rows);
    let panel = count.panel(Kwargs::new());
    let subscribers = rows.subscriber_count();
    drop(panel);
    rows.set(2);
    assert!(rows.subscriber_count() < subscribers);
}

#[test]
fn test_renamed_series_source_rebinds_callback() {
    init_logging();
    let column = Parameter::new("column", "a");
    let w = Interactive::from_driver(named_series_driver(&column), DisplayOptions::default()).unwrap();
    let max = w.attr("max").unwrap().invoke().unwrap();
    let callback = max.callback();
    assert_eq!(callback.call().unwrap().as_value(), Some(&Value::from(2)));

    column.set("b");
    assert_eq!(callback.call().unwrap().as_value(), Some(&Value::from(30)));
    assert_eq!(max.dmap().render().unwrap().as_value(), Some(&Value::from(30)));
}
