//! Process-wide settings, read once from the environment on first use.

use lazy_static::lazy_static;
use std::env;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8080/careContext";
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;
/// 1 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;

lazy_static! {
    pub static ref BIND_ADDR: String = string_or("FHIR_GATE_BIND", DEFAULT_BIND);
    pub static ref UPSTREAM_URL: String = string_or("FHIR_UPSTREAM_URL", DEFAULT_UPSTREAM_URL);
    pub static ref UPSTREAM_TOKEN: Option<String> = env::var("FHIR_UPSTREAM_TOKEN")
        .ok()
        .filter(|t| !t.is_empty());
    pub static ref UPSTREAM_TIMEOUT_MS: u64 =
        parsed_or("FHIR_UPSTREAM_TIMEOUT_MS", DEFAULT_UPSTREAM_TIMEOUT_MS);
    pub static ref MAX_BODY_BYTES: usize = parsed_or("FHIR_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES);
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_vars_fall_back() {
        assert_eq!(string_or("FHIR_CONFIG_TEST_UNSET_STR", "x"), "x");
        assert_eq!(parsed_or("FHIR_CONFIG_TEST_UNSET_NUM", 7u64), 7);
    }

    #[test]
    fn unparsable_number_falls_back() {
        env::set_var("FHIR_CONFIG_TEST_BAD_NUM", "ten");
        assert_eq!(parsed_or("FHIR_CONFIG_TEST_BAD_NUM", 10usize), 10);
        env::set_var("FHIR_CONFIG_TEST_GOOD_NUM", "42");
        assert_eq!(parsed_or("FHIR_CONFIG_TEST_GOOD_NUM", 10usize), 42);
    }
}
