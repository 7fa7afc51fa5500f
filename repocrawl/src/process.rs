//! Line-oriented request framing for running the crawler as a process.
//!
//! A request is JSON spread over one or more lines and ends at the first line
//! containing `}`. Results are written back as JSON indented by four spaces.

use serde::Serialize;
use std::io::BufRead;

use crate::errors::{CrawlerError, CrawlerResult};
use crate::search::{SearchRecord, SearchRequest};

/// Reads one request, consuming lines up to and including the first that contains `}`.
pub fn read_request<R: BufRead>(reader: R) -> CrawlerResult<SearchRequest> {
    let mut lines = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let done = line.contains('}');
        lines.push(line);
        if done {
            let text = lines.join("\n");
            return serde_json::from_str(&text)
                .map_err(|e| CrawlerError::InvalidRequest(e.to_string()));
        }
    }

    Err(CrawlerError::InvalidRequest(
        "input ended before the closing '}'".to_string(),
    ))
}

/// Renders records as JSON indented by four spaces.
pub fn render_records(records: &[SearchRecord]) -> CrawlerResult<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| CrawlerError::Serialization(e.to_string()))
}
