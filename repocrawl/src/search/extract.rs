//! Pattern-based extraction of result links and language statistics.
//!
//! Search pages embed each result's metadata as HTML-attribute-encoded JSON,
//! so a result contributes a fragment like
//! `&quot;url&quot;:&quot;https://github.com/owner/repo&quot;`.
//! Repository landing pages label each segment of the language bar with
//! `aria-label="<Name> <Percent>%"` right after a `...color` class value.
//!
//! Neither extractor needs well-formed markup; both scan raw text.

use regex::Regex;
use std::sync::LazyLock;

use super::models::LanguageStats;
use super::protocols::{LanguageExtractor, LinkExtractor};
use crate::errors::{CrawlerResult, ParseAnomalyError};

/// Entity-escaped `"url":"` followed by the shortest run up to the next escaped quote.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&quot;url&quot;:&quot;(.*?)&quot;").expect("link pattern is valid")
});

/// `color" aria-label="` (quotes literal or entity-escaped), captured up to the next `%`.
static LANGUAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"color(?:"|&quot;) aria-label=(?:"|&quot;)(.*?)%"#)
        .expect("language pattern is valid")
});

/// Extracts result links from a search page.
///
/// Links come back raw, in order of appearance, duplicates included. After a
/// match the scan resumes right after the captured URL, so the closing
/// quote entity can open the next fragment.
#[must_use]
pub fn extract_links(text: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut start = 0;

    while let Some(url) = LINK_PATTERN
        .captures_at(text, start)
        .and_then(|caps| caps.get(1))
    {
        links.push(url.as_str().to_string());
        start = url.end();
    }

    links
}

/// Extracts the language breakdown from a repository landing page.
///
/// A page without language markers yields an empty mapping.
pub fn extract_language_stats(text: &str) -> CrawlerResult<LanguageStats> {
    let mut stats = LanguageStats::new();

    for caps in LANGUAGE_PATTERN.captures_iter(text) {
        let fragment = caps.get(1).map_or("", |m| m.as_str());
        let (name, percent) = parse_language_fragment(fragment)?;
        stats.insert(name, percent);
    }

    Ok(stats)
}

/// Splits `"Jupyter Notebook 12.5"` into `("Jupyter Notebook", 12.5)`.
fn parse_language_fragment(fragment: &str) -> CrawlerResult<(String, f64)> {
    let mut tokens: Vec<&str> = fragment.split_whitespace().collect();
    let Some(last) = tokens.pop() else {
        return Err(ParseAnomalyError::new(fragment, "empty language label").into());
    };

    let percent = last.parse::<f64>().map_err(|e| {
        ParseAnomalyError::new(fragment, format!("percentage '{last}' is not a number: {e}"))
    })?;
    if !percent.is_finite() {
        return Err(
            ParseAnomalyError::new(fragment, format!("percentage '{last}' is not finite")).into(),
        );
    }

    Ok((tokens.join(" "), percent))
}

/// Regex-backed [`LinkExtractor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternLinkExtractor;

impl LinkExtractor for PatternLinkExtractor {
    fn extract_links(&self, text: &str) -> Vec<String> {
        extract_links(text)
    }
}

/// Regex-backed [`LanguageExtractor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternLanguageExtractor;

impl LanguageExtractor for PatternLanguageExtractor {
    fn extract_language_stats(&self, text: &str) -> CrawlerResult<LanguageStats> {
        extract_language_stats(text)
    }
}
