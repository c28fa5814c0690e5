use cdms_gateway_stub::domain::{DelayKey, DelayKeyError, normalize_path};

#[test]
fn given_bare_path_when_parsing_then_key_has_no_method() {
    let key: DelayKey = "/orders".parse().unwrap();

    assert_eq!(key.method(), None);
    assert_eq!(key.path(), "/orders");
}

#[test]
fn given_method_and_path_when_parsing_then_method_is_uppercased() {
    let key: DelayKey = "post /alvs-cds/submit".parse().unwrap();

    assert_eq!(key.method(), Some("POST"));
    assert_eq!(key.path(), "/alvs-cds/submit");
}

#[test]
fn given_mixed_case_path_with_trailing_slash_when_parsing_then_path_is_normalized() {
    let key: DelayKey = "  GET   /Orders/  ".parse().unwrap();

    assert_eq!(key, DelayKey::for_route("GET", "/orders"));
}

#[test]
fn given_root_path_when_normalizing_then_slash_is_kept() {
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("//"), "/");
}

#[test]
fn given_empty_key_when_parsing_then_returns_empty_error() {
    let result = "   ".parse::<DelayKey>();

    assert_eq!(result, Err(DelayKeyError::Empty));
}

#[test]
fn given_path_without_leading_slash_when_parsing_then_returns_relative_path_error() {
    let result = "orders".parse::<DelayKey>();

    assert!(matches!(result, Err(DelayKeyError::RelativePath(p)) if p == "orders"));
}

#[test]
fn given_invalid_method_token_when_parsing_then_returns_invalid_method_error() {
    let result = "GE(T /orders".parse::<DelayKey>();

    assert!(matches!(result, Err(DelayKeyError::InvalidMethod(m)) if m == "GE(T"));
}

#[test]
fn given_key_when_displayed_then_matches_normalized_form() {
    let with_method: DelayKey = "delete /Orders/42".parse().unwrap();
    let path_only: DelayKey = "/health/".parse().unwrap();

    assert_eq!(with_method.to_string(), "DELETE /orders/42");
    assert_eq!(path_only.to_string(), "/health");
}
