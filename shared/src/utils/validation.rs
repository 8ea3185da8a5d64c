use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_CHAT_MESSAGE_CHARS: usize = 4000;
pub const MAX_TTS_TEXT_CHARS: usize = 5000;
pub const MAX_FIELD_CHARS: usize = 500;

static SLUG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug regex is valid")
});

// Chat message must carry text and stay under the prompt budget
pub fn is_valid_chat_message(message: &str) -> bool {
    let trimmed = message.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_CHAT_MESSAGE_CHARS
}

// Category/document slug (lowercase words joined by dashes)
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

// Fee filter must be a positive amount in INR
pub fn is_valid_fee(fee: f64) -> bool {
    fee.is_finite() && fee > 0.0
}

// ISO date (YYYY-MM-DD) as used on documents
pub fn is_valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

// Trim and cut a user value to at most `max_chars` characters
pub fn clamp_text(input: &str, max_chars: usize) -> String {
    input.trim().chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_validation() {
        assert!(is_valid_chat_message("How do I register a rent agreement?"));
        assert!(is_valid_chat_message("किराया समझौता"));
        assert!(!is_valid_chat_message("   "));
        assert!(!is_valid_chat_message(&"a".repeat(MAX_CHAT_MESSAGE_CHARS + 1)));
        // limit counts characters, not bytes
        assert!(is_valid_chat_message(&"क".repeat(MAX_CHAT_MESSAGE_CHARS)));
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("income-declaration"));
        assert!(is_valid_slug("ipr"));
        assert!(!is_valid_slug("Income"));
        assert!(!is_valid_slug("-land"));
        assert!(!is_valid_slug("../etc"));
    }

    #[test]
    fn test_fee_validation() {
        assert!(is_valid_fee(1500.0));
        assert!(!is_valid_fee(0.0));
        assert!(!is_valid_fee(-10.0));
        assert!(!is_valid_fee(f64::NAN));
    }

    #[test]
    fn test_date_validation() {
        assert!(is_valid_date("2025-03-31"));
        assert!(!is_valid_date("31-03-2025"));
        assert!(!is_valid_date("2025-02-30"));
    }

    #[test]
    fn test_clamp_text() {
        assert_eq!(clamp_text("  Hyderabad  ", 100), "Hyderabad");
        assert_eq!(clamp_text("तेलंगाना", 3).chars().count(), 3);
    }
}
