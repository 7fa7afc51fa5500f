//! Testing utilities for crawler code.
//!
//! This module provides:
//! - Deterministic fetchers that record every request
//! - Page fixtures shaped like the site's search and repository markup

mod fixtures;
mod mocks;

pub use fixtures::{repository_page, search_page};
pub use mocks::{FailingFetcher, RecordedFetch, StaticFetcher};
