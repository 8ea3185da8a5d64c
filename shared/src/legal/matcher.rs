// Keyword scoring that maps free text to a legal category
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;

use super::categories::{Category, CATEGORIES};
use super::guidance::guidance_for;

const NAME_SCORE: u32 = 3;
const KEYWORD_SCORE: u32 = 1;
const PHRASE_SCORE: u32 = 2;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategoryMatch {
    pub category: &'static Category,
    pub score: u32,
}

struct CompiledCategory {
    category: &'static Category,
    names: Vec<Regex>,
    keywords: Vec<(Regex, u32)>,
}

// Whole-word match that also accepts a trailing "s"/"es"
fn term_pattern(term: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}(?:s|es)?\b", regex::escape(term))).ok()
}

// Multi-word phrases are more specific than single words
fn keyword_weight(term: &str) -> u32 {
    if term.contains(' ') {
        PHRASE_SCORE
    } else {
        KEYWORD_SCORE
    }
}

static COMPILED: Lazy<Vec<CompiledCategory>> = Lazy::new(|| {
    CATEGORIES
        .iter()
        .map(|category| {
            let slug_words = category.slug.replace('-', " ");
            let mut names: Vec<Regex> = [category.name, slug_words.as_str()]
                .iter()
                .filter_map(|term| term_pattern(term))
                .collect();
            names.dedup_by(|a, b| a.as_str() == b.as_str());

            CompiledCategory {
                category,
                names,
                keywords: category
                    .keywords
                    .iter()
                    .filter_map(|kw| term_pattern(kw).map(|re| (re, keyword_weight(kw))))
                    .collect(),
            }
        })
        .collect()
});

// Keyword score of one category and the text spans its keywords matched
fn keyword_hits(compiled: &CompiledCategory, text: &str) -> (u32, Vec<Range<usize>>) {
    let mut score = 0;
    let mut spans = Vec::new();

    for (re, weight) in &compiled.keywords {
        let before = spans.len();
        spans.extend(re.find_iter(text).map(|m| m.range()));
        if spans.len() > before {
            score += weight;
        }
    }

    (score, spans)
}

/// Best category for a chat message, or None when nothing scores.
///
/// A category name only counts where it is not part of another category's
/// keyword phrase, so "rent agreement" credits Rental and not Agreement.
pub fn match_category(text: &str) -> Option<CategoryMatch> {
    let hits: Vec<(u32, Vec<Range<usize>>)> =
        COMPILED.iter().map(|compiled| keyword_hits(compiled, text)).collect();

    let mut best: Option<CategoryMatch> = None;

    for (index, compiled) in COMPILED.iter().enumerate() {
        let claimed_elsewhere = |range: Range<usize>| {
            hits.iter().enumerate().any(|(other, (_, spans))| {
                other != index
                    && spans
                        .iter()
                        .any(|span| span.start <= range.start && range.end <= span.end)
            })
        };

        let named = compiled
            .names
            .iter()
            .any(|re| re.find_iter(text).any(|m| !claimed_elsewhere(m.range())));

        let mut score = hits[index].0;
        if named {
            score += NAME_SCORE;
        }

        // strict comparison keeps the earlier category on ties
        if score > 0 && best.map_or(true, |b| score > b.score) {
            best = Some(CategoryMatch {
                category: compiled.category,
                score,
            });
        }
    }

    best
}

/// Category search used by the search page
pub fn search_categories(query: &str) -> Vec<&'static Category> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return CATEGORIES.iter().collect();
    }

    let by_name: Vec<&'static Category> = CATEGORIES
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&q) || c.slug.contains(&q))
        .collect();
    if !by_name.is_empty() {
        return by_name;
    }

    CATEGORIES
        .iter()
        .filter(|c| guidance_for(c.slug).is_some_and(|g| g.haystack().contains(&q)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug_of(text: &str) -> Option<&'static str> {
        match_category(text).map(|m| m.category.slug)
    }

    #[test]
    fn test_name_plus_keywords_wins() {
        let m = match_category("I need a rental agreement for my flat").unwrap();
        assert_eq!(m.category.slug, "rental");
        assert_eq!(m.score, NAME_SCORE + PHRASE_SCORE);
    }

    #[test]
    fn test_specific_agreements_beat_generic_name() {
        assert_eq!(slug_of("I need a rent agreement"), Some("rental"));
        assert_eq!(slug_of("lease agreement for my shop"), Some("rental"));
        assert_eq!(slug_of("tenant agreement format"), Some("rental"));
        assert_eq!(slug_of("house rent agreement in Hyderabad"), Some("rental"));
        assert_eq!(slug_of("sale agreement for a plot"), Some("land"));
        assert_eq!(slug_of("Rent Agreement"), Some("rental"));
    }

    #[test]
    fn test_plain_agreement_still_matches() {
        assert_eq!(slug_of("please draft an agreement with my client"), Some("agreement"));
        let m = match_category("service agreement for a web project").unwrap();
        assert_eq!(m.category.slug, "agreement");
        assert_eq!(m.score, NAME_SCORE + PHRASE_SCORE);
    }

    #[test]
    fn test_phrases_outweigh_single_words() {
        let m = match_category("need a security deposit refund").unwrap();
        assert_eq!(m.category.slug, "rental");
        assert_eq!(m.score, PHRASE_SCORE);
    }

    #[test]
    fn test_keywords_only() {
        assert_eq!(slug_of("someone copied my song and put it online"), Some("copyright"));
        assert_eq!(slug_of("my landlord is keeping my deposit after I vacate"), Some("rental"));
        assert_eq!(slug_of("how to file a trademark for my logo"), Some("ipr"));
    }

    #[test]
    fn test_slug_with_dash_matches_as_words() {
        assert_eq!(slug_of("help with an income declaration"), Some("income-declaration"));
        assert_eq!(slug_of("need design patents info"), Some("design-patents"));
    }

    #[test]
    fn test_plural_and_word_boundaries() {
        assert_eq!(slug_of("what are affidavits used for"), Some("affidavit"));
        // "rent" inside "parent" is not a match
        assert_eq!(slug_of("my parents"), None);
    }

    #[test]
    fn test_tie_prefers_catalogue_order() {
        let m = match_category("agreement or mou").unwrap();
        assert_eq!(m.category.slug, "agreement");
    }

    #[test]
    fn test_no_match() {
        assert!(match_category("hello, how are you?").is_none());
        assert!(match_category("").is_none());
    }

    #[test]
    fn test_search_empty_returns_all() {
        assert_eq!(search_categories("  ").len(), CATEGORIES.len());
    }

    #[test]
    fn test_search_by_name_then_guidance() {
        let by_name: Vec<_> = search_categories("Rent").iter().map(|c| c.slug).collect();
        assert_eq!(by_name, vec!["rental"]);

        let by_guidance: Vec<_> = search_categories("notary").iter().map(|c| c.slug).collect();
        assert!(by_guidance.contains(&"affidavit"));
        assert!(by_guidance.contains(&"rental"));
        assert!(!by_guidance.contains(&"land"));

        assert!(search_categories("zzzz-nothing").is_empty());
    }
}
