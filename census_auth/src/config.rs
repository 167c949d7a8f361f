//! Central configuration for the census-auth crate
//!
//! All values are read once from the environment into LazyLock statics.
//! The original deployment's hierarchical config keys map to flat
//! CENSUS_* variable names.

use chrono::{Datelike, Utc};
use std::env;
use std::sync::LazyLock;

/// URL template used for every tenant-scoped URL.
///
/// Contains the literal tokens SCHEME, SUB, DOMAIN and PATH.
/// Default: "SCHEME://SUB.DOMAIN/PATH"
pub static URL_TEMPLATE: LazyLock<String> = LazyLock::new(|| {
    env::var("CENSUS_URL_TEMPLATE").unwrap_or_else(|_| "SCHEME://SUB.DOMAIN/PATH".to_string())
});

/// Scheme used when building provider callback URLs
pub static CONNECTION_SCHEME: LazyLock<String> =
    LazyLock::new(|| env::var("CENSUS_CONNECTION_SCHEME").unwrap_or_else(|_| "https".to_string()));

/// Base domain shared by all tenants
pub static BASE_DOMAIN: LazyLock<String> =
    LazyLock::new(|| env::var("CENSUS_BASE_DOMAIN").unwrap_or_else(|_| "localhost".to_string()));

/// Subdomain hosting the authentication endpoints
pub static AUTH_SUBDOMAIN: LazyLock<String> =
    LazyLock::new(|| env::var("CENSUS_AUTH_SUBDOMAIN").unwrap_or_else(|_| "auth".to_string()));

/// Subdomain hosting the system administration pages
pub static SYSTEM_SUBDOMAIN: LazyLock<String> =
    LazyLock::new(|| env::var("CENSUS_SYSTEM_SUBDOMAIN").unwrap_or_else(|_| "system".to_string()));

/// Supported locale codes, comma separated; the first entry is the default
pub static LOCALES: LazyLock<Vec<String>> = LazyLock::new(|| {
    let raw = env::var("CENSUS_LOCALES").unwrap_or_else(|_| "en".to_string());
    let locales: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if locales.is_empty() {
        vec!["en".to_string()]
    } else {
        locales
    }
});

/// System administrator identifier, exposed to templates
pub static SYS_ADMIN: LazyLock<Option<String>> =
    LazyLock::new(|| env::var("CENSUS_SYS_ADMIN").ok());

/// Discussion forum reference, exposed to templates
pub static DISCUSSION_FORUM: LazyLock<Option<String>> =
    LazyLock::new(|| env::var("CENSUS_DISCUSSION_FORUM").ok());

/// Survey year; later pipeline stages may override the per-request value
pub static SURVEY_YEAR: LazyLock<i32> = LazyLock::new(|| {
    env::var("CENSUS_SURVEY_YEAR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| Utc::now().year())
});

/// Test-harness escape hatch: when true, requests without an authenticated
/// user run as TEST_USER. Never enable in production.
pub static TESTING: LazyLock<bool> = LazyLock::new(|| {
    env::var("CENSUS_TESTING")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(false)
});

/// JSON-encoded user substituted when TESTING is enabled
pub static TEST_USER: LazyLock<Option<String>> =
    LazyLock::new(|| env::var("CENSUS_TEST_USER").ok());
