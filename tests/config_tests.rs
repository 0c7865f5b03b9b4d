//! Configuration tests
//!
//! These verify the properties parsing, the lookup precedence, and the
//! never-raising fallback semantics of the typed getters.

use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use shopcheck::config::Settings;

const PROPERTIES: &str = r#"
# storefront under test
base.url=https://shop.example.com
api.base.url = https://api.example.com

browser=chromium
slow.mo=250
headless.mode=TRUE
default.timeout=6
long.timeout=21
results.dir=artifacts

not-a-pair
bad.int=four
bad.bool=yep
"#;

#[test]
fn parses_properties_with_comments_and_whitespace() {
    let settings = Settings::from_properties(PROPERTIES);
    assert_eq!(settings.base_url().unwrap(), "https://shop.example.com");
    assert_eq!(settings.api_base_url().unwrap(), "https://api.example.com");
    assert_eq!(settings.browser(), "chromium");
    assert_eq!(settings.results_dir(), PathBuf::from("artifacts"));
}

#[test]
fn typed_accessors_resolve_durations() {
    let settings = Settings::from_properties(PROPERTIES);
    assert_eq!(settings.slow_mo(), Duration::from_millis(250));
    assert_eq!(settings.default_timeout(), Duration::from_secs(6));
    assert_eq!(settings.long_timeout(), Duration::from_secs(21));
}

#[test]
fn boolean_values_are_case_insensitive() {
    let settings = Settings::from_properties(PROPERTIES);
    assert!(settings.headless());
}

#[test]
fn parse_failures_fall_back_without_raising() {
    let settings = Settings::from_properties(PROPERTIES);
    assert_eq!(settings.get_int("bad.int", 11), 11);
    assert!(!settings.get_bool("bad.bool", false));
    assert!(settings.get_bool("bad.bool", true));
}

#[test]
fn absent_keys_fall_back_to_defaults() {
    let settings = Settings::from_properties("base.url=https://shop.example.com\n");
    assert_eq!(settings.slow_mo(), Duration::from_millis(500));
    assert_eq!(settings.default_timeout(), Duration::from_secs(10));
    assert_eq!(settings.long_timeout(), Duration::from_secs(30));
    assert_eq!(settings.api_timeout(), Duration::from_secs(15));
    assert!(!settings.headless());
    assert_eq!(settings.browser(), "chrome");
    assert_eq!(settings.username(), "standard_user");
    assert_eq!(settings.password(), "secret_sauce");
}

#[test]
fn missing_required_urls_error_descriptively() {
    let settings = Settings::default();
    assert!(settings
        .base_url()
        .unwrap_err()
        .to_string()
        .contains("base.url"));
    assert!(settings
        .api_base_url()
        .unwrap_err()
        .to_string()
        .contains("api.base.url"));
}

#[test]
fn cli_override_beats_file_value() {
    let mut settings = Settings::from_properties(PROPERTIES);
    settings.set("slow.mo", "0");
    assert_eq!(settings.slow_mo(), Duration::ZERO);
}

#[test]
fn environment_beats_file_value() {
    // Key chosen so no other test in this binary reads it
    std::env::set_var("SHOPCHECK_BROWSER_PATH", "/opt/other-chrome");
    let settings = Settings::from_properties("browser.path=/usr/bin/chrome\n");
    assert_eq!(
        settings.get("browser.path"),
        Some("/opt/other-chrome".to_string())
    );
    std::env::remove_var("SHOPCHECK_BROWSER_PATH");
}

#[test]
fn loading_a_missing_file_still_yields_defaults() {
    let settings = Settings::load_from(std::path::Path::new("does/not/exist.properties"));
    assert_eq!(settings.default_timeout(), Duration::from_secs(10));
}
