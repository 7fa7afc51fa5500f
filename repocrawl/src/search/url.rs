//! Search URL construction.

use super::models::SearchType;
use crate::errors::CrawlerResult;

/// Encodes a query component, turning spaces into `+`.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through; every other
/// byte of the UTF-8 encoding is percent-escaped.
#[must_use]
pub fn quote_plus(value: &str) -> String {
    value
        .split(' ')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("+")
}

/// Builds the search URL for the given keywords and result type.
///
/// The result type must be one of `""`, `"Repositories"`, `"Issues"` or
/// `"Wikis"`; anything else is rejected with an invalid argument error.
pub fn build_search_url<S: AsRef<str>>(
    host: &str,
    keywords: &[S],
    result_type: &str,
) -> CrawlerResult<String> {
    let search_type: SearchType = result_type.parse()?;
    let query = keywords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");

    Ok(format!(
        "https://{host}/search?q={}&type={}",
        quote_plus(&query),
        quote_plus(search_type.as_str())
    ))
}
