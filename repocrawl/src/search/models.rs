//! Data models for search requests and their results.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{CrawlerError, InvalidArgumentError};

/// Category of search results to retrieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchType {
    /// No filter; the site defaults to repositories.
    #[default]
    Default,
    /// Repository results.
    Repositories,
    /// Issue and pull request results.
    Issues,
    /// Wiki page results.
    Wikis,
}

impl SearchType {
    /// All recognized search types.
    pub const ALL: [Self; 4] = [Self::Default, Self::Repositories, Self::Issues, Self::Wikis];

    /// The value sent in the `type` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Repositories => "Repositories",
            Self::Issues => "Issues",
            Self::Wikis => "Wikis",
        }
    }

    /// Whether results of this type are repositories with a landing page.
    #[must_use]
    pub const fn is_repository(self) -> bool {
        matches!(self, Self::Default | Self::Repositories)
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = CrawlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                InvalidArgumentError::new(
                    "result_type",
                    s,
                    "Unrecognized search type, expected one of \"\", \"Repositories\", \"Issues\", \"Wikis\"",
                )
                .into()
            })
    }
}

/// A search to run against the site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    /// Search terms, joined with single spaces.
    pub keywords: Vec<String>,
    /// Result category filter. Validated when the URL is built.
    #[serde(default, alias = "type")]
    pub result_type: String,
    /// Proxy candidates; one is picked for the crawler's lifetime.
    #[serde(default)]
    pub proxies: Vec<String>,
}

impl SearchRequest {
    /// Creates a request with the default result type.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Sets the result type.
    #[must_use]
    pub fn with_result_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_type = result_type.into();
        self
    }

    /// Sets the proxy candidates.
    #[must_use]
    pub fn with_proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxies = proxies.into_iter().map(Into::into).collect();
        self
    }

    /// Parses the result type.
    pub fn search_type(&self) -> Result<SearchType, CrawlerError> {
        self.result_type.parse()
    }
}

/// Language name to percentage, in order of first appearance on the page.
///
/// Inserting a name that is already present replaces its value without
/// moving it. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct LanguageStats {
    entries: Vec<(String, f64)>,
}

impl LanguageStats {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a language's percentage.
    pub fn insert(&mut self, name: impl Into<String>, percent: f64) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = percent;
        } else {
            self.entries.push((name, percent));
        }
    }

    /// Percentage for a language.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
    }

    /// Number of languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no languages were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, percent)` pairs in page order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), *p))
    }

    /// Language names in page order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Converts to an unordered map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, f64> {
        self.entries.iter().cloned().collect()
    }
}

impl PartialEq for LanguageStats {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(name, percent)| other.get(name) == Some(*percent))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for LanguageStats {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut stats = Self::new();
        for (name, percent) in iter {
            stats.insert(name, percent);
        }
        stats
    }
}

impl Serialize for LanguageStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, percent) in &self.entries {
            map.serialize_entry(name, percent)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageStats {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatsVisitor;

        impl<'de> Visitor<'de> for StatsVisitor {
            type Value = LanguageStats;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language names to percentages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut stats = LanguageStats::new();
                while let Some((name, percent)) = access.next_entry::<String, f64>()? {
                    stats.insert(name, percent);
                }
                Ok(stats)
            }
        }

        deserializer.deserialize_map(StatsVisitor)
    }
}

/// Owner and language breakdown of a repository result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RepositoryDetails {
    /// Account or organization owning the repository.
    pub owner: String,
    /// Language breakdown from the landing page.
    pub language_stats: LanguageStats,
}

/// One search result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchRecord {
    /// Result link as it appears on the search page.
    pub url: String,
    /// Repository details, present only on enriched repository results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<RepositoryDetails>,
}

impl SearchRecord {
    /// Creates a plain record.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: None,
        }
    }

    /// Attaches repository details.
    #[must_use]
    pub fn with_details(mut self, owner: impl Into<String>, language_stats: LanguageStats) -> Self {
        self.extra = Some(RepositoryDetails {
            owner: owner.into(),
            language_stats,
        });
        self
    }

    /// Owner, if the record was enriched.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.extra.as_ref().map(|d| d.owner.as_str())
    }

    /// Language breakdown, if the record was enriched.
    #[must_use]
    pub fn language_stats(&self) -> Option<&LanguageStats> {
        self.extra.as_ref().map(|d| &d.language_stats)
    }
}
