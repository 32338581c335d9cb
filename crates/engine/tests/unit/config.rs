//! Configuration tests.

use pretty_assertions::assert_eq;

use fpsim_core::Config;
use fpsim_core::config::DivideByZeroPolicy;

#[test]
fn defaults_are_saturating_and_quiet() {
    let config = Config::default();
    assert!(!config.sim.trace);
    assert_eq!(config.divider.divide_by_zero, DivideByZeroPolicy::Saturate);
}

#[test]
fn empty_document_is_all_defaults() {
    let Ok(config) = Config::from_json("{}") else {
        panic!("empty object did not parse");
    };
    assert!(!config.sim.trace);
    assert_eq!(config.divider.divide_by_zero, DivideByZeroPolicy::Saturate);
}

#[test]
fn full_document_parses() {
    let json = r#"{
        "sim": { "trace": true },
        "divider": { "divide_by_zero": "Zero" }
    }"#;
    let Ok(config) = Config::from_json(json) else {
        panic!("full document did not parse");
    };
    assert!(config.sim.trace);
    assert_eq!(config.divider.divide_by_zero, DivideByZeroPolicy::Zero);
}

#[test]
fn partial_document_keeps_other_defaults() {
    let Ok(config) = Config::from_json(r#"{ "sim": { "trace": true } }"#) else {
        panic!("partial document did not parse");
    };
    assert!(config.sim.trace);
    assert_eq!(config.divider.divide_by_zero, DivideByZeroPolicy::Saturate);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(Config::from_json("not json").is_err());
    assert!(Config::from_json(r#"{ "divider": { "divide_by_zero": "Wrap" } }"#).is_err());
}

#[test]
fn error_display_names_the_configuration() {
    let Err(err) = Config::from_json("{") else {
        panic!("truncated document parsed");
    };
    assert!(err.to_string().starts_with("invalid configuration"));
}
