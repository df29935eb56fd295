use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_all_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(config.log_level, "info");
    assert_eq!(config.max_concurrent_brands, 0);
    assert_eq!(config.brand_load_timeout_secs, 300);
    assert!((config.brand_fuzzy_threshold - 0.85).abs() < f64::EPSILON);
    assert_eq!(config.cache_ttl_secs, 7200);
}

#[test]
fn build_app_config_overrides() {
    let mut map = HashMap::new();
    map.insert("SIPARIS_LOG_LEVEL", "debug");
    map.insert("SIPARIS_MAX_CONCURRENT_BRANDS", "4");
    map.insert("SIPARIS_BRAND_LOAD_TIMEOUT_SECS", "60");
    map.insert("SIPARIS_BRAND_FUZZY_THRESHOLD", "0.9");
    map.insert("SIPARIS_CACHE_TTL_SECS", "120");

    let config = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.max_concurrent_brands, 4);
    assert_eq!(config.brand_load_timeout_secs, 60);
    assert!((config.brand_fuzzy_threshold - 0.9).abs() < f64::EPSILON);
    assert_eq!(config.cache_ttl_secs, 120);
}

#[test]
fn build_app_config_rejects_unparseable_concurrency() {
    let mut map = HashMap::new();
    map.insert("SIPARIS_MAX_CONCURRENT_BRANDS", "many");

    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "SIPARIS_MAX_CONCURRENT_BRANDS"
        ),
        "expected InvalidEnvVar, got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_out_of_range_threshold() {
    let mut map = HashMap::new();
    map.insert("SIPARIS_BRAND_FUZZY_THRESHOLD", "1.5");

    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SIPARIS_BRAND_FUZZY_THRESHOLD"
        ),
        "expected InvalidEnvVar, got: {result:?}"
    );
}

#[test]
fn explicit_concurrency_wins_over_auto() {
    let mut map = HashMap::new();
    map.insert("SIPARIS_MAX_CONCURRENT_BRANDS", "3");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.effective_brand_concurrency(), 3);
}

#[test]
fn auto_concurrency_is_bounded() {
    let map: HashMap<&str, &str> = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    let effective = config.effective_brand_concurrency();
    assert!((1..=8).contains(&effective));
}
