use super::*;

#[test]
fn with_origin_trims_trailing_slash() {
    let config = ClientConfig::with_origin("http://api.example.com/");
    assert_eq!(config.api_origin, "http://api.example.com");
}

#[test]
fn with_origin_falls_back_to_default_when_blank() {
    let config = ClientConfig::with_origin("   ");
    assert_eq!(config.api_origin, DEFAULT_API_ORIGIN);
}

#[test]
fn url_joins_paths_with_and_without_leading_slash() {
    let config = ClientConfig::with_origin("http://localhost:8080");
    assert_eq!(config.url("/api/courses"), "http://localhost:8080/api/courses");
    assert_eq!(config.url("login"), "http://localhost:8080/login");
}
