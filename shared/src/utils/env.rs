// Helpers for reading typed configuration from environment variables
use std::env;
use std::str::FromStr;

// Read a variable, falling back to a default when unset
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

// Read an optional variable; blank values count as unset
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Parse a variable into T, falling back to a default when unset
pub fn env_parse_or<T: FromStr>(key: &str, default: T) -> Result<T, String> {
    match env_opt(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("{} has an invalid value: {}", key, raw)),
        None => Ok(default),
    }
}

// Boolean flag: "1", "true", "yes" (any case) are true
pub fn env_flag(key: &str) -> bool {
    env_opt(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

// Comma separated list, falling back to defaults when unset or empty
pub fn env_list_or(key: &str, default: &[&str]) -> Vec<String> {
    let parsed: Vec<String> = env_opt(key)
        .map(|raw| split_list(&raw))
        .unwrap_or_default();

    if parsed.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_skips_blanks() {
        assert_eq!(
            split_list(" gemini-1.5-flash , ,gemini-1.5-pro-latest,"),
            vec!["gemini-1.5-flash".to_string(), "gemini-1.5-pro-latest".to_string()]
        );
    }

    #[test]
    fn test_env_parse_or_default_and_invalid() {
        std::env::remove_var("VS_TEST_UNSET_NUMBER");
        assert_eq!(env_parse_or("VS_TEST_UNSET_NUMBER", 42u32).unwrap(), 42);

        std::env::set_var("VS_TEST_BAD_NUMBER", "forty-two");
        assert!(env_parse_or::<u32>("VS_TEST_BAD_NUMBER", 1).is_err());
    }

    #[test]
    fn test_env_flag() {
        std::env::set_var("VS_TEST_FLAG_ON", "TRUE");
        std::env::set_var("VS_TEST_FLAG_OFF", "no");
        assert!(env_flag("VS_TEST_FLAG_ON"));
        assert!(!env_flag("VS_TEST_FLAG_OFF"));
        assert!(!env_flag("VS_TEST_FLAG_MISSING"));
    }
}
