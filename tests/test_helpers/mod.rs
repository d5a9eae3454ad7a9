#![allow(dead_code)]

use interactive_pipeline::{Frame, Interactive, LoggingConfig, LoggingSystem, Series, Value};

/// Installs a quiet logger once; later calls are no-ops.
pub fn init_logging() {
    if !LoggingSystem::is_initialized() {
        let config = LoggingConfig {
            level: "WARN".to_string(),
            ..LoggingConfig::default()
        };
        let _ = LoggingSystem::init_with_config(&config);
    }
}

/// `A = [1, 2, 3]`, `B = ["x", "y", "z"]`.
pub fn sample_frame() -> Frame {
    Frame::new(vec![
        ("A", vec![1.into(), 2.into(), 3.into()]),
        ("B", vec!["x".into(), "y".into(), "z".into()]),
    ])
    .expect("valid sample frame")
}

/// A root node over [`sample_frame`].
pub fn sample_node() -> Interactive {
    init_logging();
    Interactive::new(sample_frame()).expect("sample frame is wrappable")
}

pub fn numbers(name: &str, values: &[f64]) -> Value {
    Value::Series(Series::from_f64(name, values.iter().copied()))
}

pub fn flags(name: &str, values: &[bool]) -> Value {
    Value::Series(Series::named(
        name,
        values.iter().map(|b| Value::from(*b)).collect(),
    ))
}
