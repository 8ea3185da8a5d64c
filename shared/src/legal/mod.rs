// Static legal knowledge base: categories, guidance, languages and matching
pub mod categories;
pub mod guidance;
pub mod language;
pub mod matcher;

pub use categories::{find_category, Category, CATEGORIES};
pub use guidance::{guidance_for, Guidance};
pub use language::{lang_name, resolve_language, LangOption, DEFAULT_LANG, LANG_OPTIONS};
pub use matcher::{match_category, search_categories, CategoryMatch};
