// Reply-language resolution for chat and speech
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const DEFAULT_LANG: &str = "en-IN";

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LangOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// Options offered by the language picker, in display order
pub static LANG_OPTIONS: &[LangOption] = &[
    LangOption { code: "auto", label: "Auto" },
    LangOption { code: "en-IN", label: "English" },
    LangOption { code: "hi-IN", label: "हिंदी" },
    LangOption { code: "te-IN", label: "తెలుగు" },
    LangOption { code: "ta-IN", label: "தமிழ்" },
    LangOption { code: "bn-IN", label: "বাংলা" },
    LangOption { code: "ml-IN", label: "മലയാളം" },
    LangOption { code: "kn-IN", label: "ಕನ್ನಡ" },
    LangOption { code: "gu-IN", label: "ગુજરાતી" },
    LangOption { code: "pa-IN", label: "ਪੰਜਾਬੀ" },
    LangOption { code: "mr-IN", label: "मराठी" },
    LangOption { code: "ur-IN", label: "اردو" },
];

static LANG_NAMES: &[(&str, &str)] = &[
    ("hi-IN", "Hindi"),
    ("te-IN", "Telugu"),
    ("ta-IN", "Tamil"),
    ("bn-IN", "Bengali"),
    ("ml-IN", "Malayalam"),
    ("kn-IN", "Kannada"),
    ("mr-IN", "Marathi"),
    ("gu-IN", "Gujarati"),
    ("pa-IN", "Punjabi"),
    ("ur-IN", "Urdu"),
    ("en-IN", "English"),
];

// First matching block wins; Devanagari covers both Hindi and Marathi
static SCRIPT_RANGES: &[(char, char, &str)] = &[
    ('\u{0900}', '\u{097F}', "hi-IN"),
    ('\u{0C00}', '\u{0C7F}', "te-IN"),
    ('\u{0B80}', '\u{0BFF}', "ta-IN"),
    ('\u{0980}', '\u{09FF}', "bn-IN"),
    ('\u{0D00}', '\u{0D7F}', "ml-IN"),
    ('\u{0C80}', '\u{0CFF}', "kn-IN"),
    ('\u{0A80}', '\u{0AFF}', "gu-IN"),
    ('\u{0A00}', '\u{0A7F}', "pa-IN"),
    ('\u{0600}', '\u{06FF}', "ur-IN"),
];

static EXPLICIT_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\btelugu\b|\btelugu\s*lo\b|\btelugu\s*లో|తెలుగులో", "te-IN"),
        (r"\bhindi\b|\bhindi\s*mein\b|\bhindi\s*me\b|\bhindi\s*mai\b|\bhindi\s*main\b|हिंदी\s*में", "hi-IN"),
        (r"\btamil\b|\btamil\s*la\b|\btamil\s*il\b|\btamizh\b", "ta-IN"),
        (r"\bbengali\b|\bbangla\b|\bbengali\s*te\b", "bn-IN"),
        (r"\bmalayalam\b|\bmalayalam\s*il\b|\bmalayaalam\b", "ml-IN"),
        (r"\bkannada\b|\bkannada\s*alli\b|\bkannad\b", "kn-IN"),
        (r"\bgujarati\b|\bgujarati\s*ma\b|\bgujrati\b", "gu-IN"),
        (r"\bpunjabi\b|\bpanjabi\b|\bpunjabi\s*vich\b", "pa-IN"),
        (r"\bmarathi\b|\bmarathi\s*madhe\b|\bmarathi\s*me\b", "mr-IN"),
        (r"\burdu\b|\burdu\s*mein\b", "ur-IN"),
        (r"\bin\s*english\b|\breply\s*in\s*english\b", "en-IN"),
    ]
    .into_iter()
    .filter_map(|(pattern, code)| match Regex::new(&format!("(?i){}", pattern)) {
        Ok(re) => Some((re, code)),
        Err(e) => {
            tracing::error!("Invalid language pattern for {}: {}", code, e);
            None
        }
    })
    .collect()
});

/// Guess the language from the Unicode script the text is written in
pub fn detect_lang_from_script(text: &str) -> &'static str {
    SCRIPT_RANGES
        .iter()
        .find(|(lo, hi, _)| text.chars().any(|c| (*lo..=*hi).contains(&c)))
        .map(|(_, _, code)| *code)
        .unwrap_or(DEFAULT_LANG)
}

/// Detect a request such as "explain in Telugu" or "hindi mein batao"
pub fn detect_explicit_lang(text: &str) -> Option<&'static str> {
    EXPLICIT_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, code)| *code)
}

pub fn is_supported_lang(code: &str) -> bool {
    LANG_NAMES.iter().any(|(c, _)| *c == code)
}

/// Pick the reply language: picker choice, then an explicit request, then script
pub fn resolve_language(text: &str, client_lang: Option<&str>) -> &'static str {
    if let Some(code) = client_lang.map(str::trim).filter(|c| *c != "auto") {
        if let Some((supported, _)) = LANG_NAMES.iter().find(|(c, _)| *c == code) {
            return supported;
        }
        tracing::debug!("Ignoring unsupported client language '{}'", code);
    }

    detect_explicit_lang(text).unwrap_or_else(|| detect_lang_from_script(text))
}

/// English name of a language code, e.g. "te-IN" -> "Telugu"
pub fn lang_name(code: &str) -> &'static str {
    LANG_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("English")
}
