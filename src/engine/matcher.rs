//! Keyword matching on names and on raw file contents. Plain, case-sensitive substring containment.

use crate::pipeline::Counters;
use crate::{EntryInfo, MatchKind, MatchResult};

/// Byte-for-byte containment of `keyword` in `content`. No decoding, no binary heuristics.
pub fn content_contains(content: &[u8], keyword: &[u8]) -> bool {
    if keyword.is_empty() {
        return true;
    }
    content.windows(keyword.len()).any(|w| w == keyword)
}

/// Containment of `keyword` in an entry's base name.
pub fn name_contains(name: &str, keyword: &str) -> bool {
    name.contains(keyword)
}

/// Name pipeline: always yields one result; bumps the file or folder match counter on a hit.
pub fn match_name(entry: &EntryInfo, keyword: &str, counters: &Counters) -> MatchResult {
    let matched = name_contains(&entry.name, keyword);
    if matched && entry.claim_match() {
        counters.record_match(entry.is_dir);
    }
    entry.to_result(MatchKind::Name, matched)
}

/// Content pipeline, after the file was read: one result; bumps the file match counter on a hit.
pub fn match_content(
    entry: &EntryInfo,
    content: &[u8],
    keyword: &str,
    counters: &Counters,
) -> MatchResult {
    let matched = content_contains(content, keyword.as_bytes());
    if matched && entry.claim_match() {
        counters.record_match(false);
    }
    entry.to_result(MatchKind::Content, matched)
}
