use std::collections::HashMap;
use std::time::Duration;

use cdms_gateway_stub::domain::{DelayConfig, DelayConfigError, RawDelay};

fn raw(entries: &[(&str, RawDelay)]) -> HashMap<String, RawDelay> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn given_configured_path_when_looking_up_then_returns_delay() {
    let config = DelayConfig::from_millis([("/orders", 500), ("/health", 0)]).unwrap();

    assert_eq!(config.lookup("GET", "/orders"), Duration::from_millis(500));
    assert_eq!(config.lookup("POST", "/orders"), Duration::from_millis(500));
    assert_eq!(config.lookup("GET", "/health"), Duration::ZERO);
}

#[test]
fn given_unconfigured_path_when_looking_up_then_returns_zero() {
    let config = DelayConfig::from_millis([("/orders", 500)]).unwrap();

    assert_eq!(config.lookup("GET", "/orders/42"), Duration::ZERO);
    assert_eq!(config.lookup("GET", "/"), Duration::ZERO);
}

#[test]
fn given_route_and_path_entries_when_looking_up_then_route_takes_precedence() {
    let config = DelayConfig::from_millis([("/orders", 100), ("POST /orders", 900)]).unwrap();

    assert_eq!(config.lookup("POST", "/orders"), Duration::from_millis(900));
    assert_eq!(config.lookup("GET", "/orders"), Duration::from_millis(100));
}

#[test]
fn given_route_only_entry_when_method_differs_then_returns_zero() {
    let config = DelayConfig::from_millis([("POST /orders", 900)]).unwrap();

    assert_eq!(config.lookup("GET", "/orders"), Duration::ZERO);
}

#[test]
fn given_request_path_in_other_case_when_looking_up_then_matches() {
    let config = DelayConfig::from_millis([("get /Orders", 250)]).unwrap();

    assert_eq!(config.lookup("get", "/ORDERS/"), Duration::from_millis(250));
}

#[test]
fn given_numeric_text_when_building_then_parses_milliseconds() {
    let config = DelayConfig::from_raw(&raw(&[("/orders", RawDelay::Text(" 750 ".into()))])).unwrap();

    assert_eq!(config.lookup("GET", "/orders"), Duration::from_millis(750));
}

#[test]
fn given_negative_delay_when_building_then_fails() {
    let result = DelayConfig::from_raw(&raw(&[("/orders", RawDelay::Millis(-5))]));

    assert_eq!(
        result,
        Err(DelayConfigError::Negative {
            key: "/orders".to_string(),
            value: -5,
        })
    );
}

#[test]
fn given_negative_text_delay_when_building_then_fails() {
    let result = DelayConfig::from_raw(&raw(&[("/orders", RawDelay::Text("-10".into()))]));

    assert!(matches!(result, Err(DelayConfigError::Negative { value: -10, .. })));
}

#[test]
fn given_non_numeric_delay_when_building_then_fails() {
    let result = DelayConfig::from_raw(&raw(&[("/orders", RawDelay::Text("slow".into()))]));

    assert!(matches!(
        result,
        Err(DelayConfigError::NotANumber { ref value, .. }) if value == "slow"
    ));
}

#[test]
fn given_fractional_text_delay_when_building_then_fails() {
    let result = DelayConfig::from_raw(&raw(&[("/orders", RawDelay::Text("1.5".into()))]));

    assert!(matches!(result, Err(DelayConfigError::NotANumber { .. })));
}

#[test]
fn given_invalid_key_when_building_then_fails() {
    let result = DelayConfig::from_millis([("orders", 100)]);

    assert!(matches!(result, Err(DelayConfigError::InvalidKey { ref key, .. }) if key == "orders"));
}

#[test]
fn given_keys_equal_after_normalization_when_building_then_fails() {
    let result = DelayConfig::from_millis([("/orders", 100), ("/Orders/", 200)]);

    assert!(matches!(result, Err(DelayConfigError::DuplicateKey { .. })));
}

#[test]
fn given_no_entries_when_building_then_config_is_empty() {
    let config = DelayConfig::from_raw(&HashMap::new()).unwrap();

    assert!(config.is_empty());
    assert_eq!(config, DelayConfig::empty());
    assert_eq!(config.lookup("GET", "/anything"), Duration::ZERO);
}
