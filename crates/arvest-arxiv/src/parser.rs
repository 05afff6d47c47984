//! Streaming Atom feed parser for arXiv query responses.
//!
//! Event-driven quick-xml loop: each `<entry>` is parsed independently, so
//! one malformed entry is skipped without aborting the rest of the feed.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesText, Event};

use arvest_core::Record;

use crate::error::ParseError;

/// Timestamp layout used by the source, e.g. `2024-01-20T15:30:00Z`
const UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Outcome of parsing one feed
#[derive(Debug, Default)]
pub struct ParsedFeed {
    /// Records in feed order, ids unique within the feed
    pub records: Vec<Record>,
    /// Entries dropped by the per-entry parse policy
    pub skipped: usize,
}

/// Parse an Atom feed body into records.
///
/// Entries missing a required element, carrying an empty id or title,
/// with an unparseable `updated` timestamp, or repeating an id already
/// seen in this feed are logged and counted in `skipped`. XML that is
/// malformed outside any entry fails the whole parse.
pub fn parse_feed(xml: &str) -> Result<ParsedFeed, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = ParsedFeed::default();
    let mut seen = HashSet::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"entry" => {
                match parse_entry(&mut reader) {
                    Ok(record) => {
                        if seen.insert(record.id.clone()) {
                            feed.records.push(record);
                        } else {
                            log::warn!("Skipping entry with duplicate id {}", record.id);
                            feed.skipped += 1;
                        }
                    }
                    Err(e) => {
                        log::warn!("Skipping entry: {e}");
                        feed.skipped += 1;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(feed)
}

/// Parse one `<entry>` element into a record.
///
/// Feed-specific extras (`published`, `link`, `category`, `arxiv:*`) are
/// skipped; author affiliations are ignored.
fn parse_entry(reader: &mut Reader<&[u8]>) -> Result<Record, ParseError> {
    let mut id = None;
    let mut title = None;
    let mut summary = None;
    let mut updated = None;
    let mut authors = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"id" => id = Some(read_text(reader)?),
                b"title" => title = Some(read_text_content(reader, b"title")?),
                b"summary" => summary = Some(read_text_content(reader, b"summary")?),
                b"updated" => updated = Some(read_text(reader)?),
                b"author" => authors.extend(parse_author(reader)?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"entry" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let id = id.ok_or(ParseError::MissingField { field: "id" })?;
    let title = title.ok_or(ParseError::MissingField { field: "title" })?;
    let summary = summary.ok_or(ParseError::MissingField { field: "summary" })?;
    let updated = updated.ok_or(ParseError::MissingField { field: "updated" })?;

    let id = derive_id(&id).to_string();
    if id.is_empty() {
        return Err(ParseError::EmptyField { field: "id" });
    }
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(ParseError::EmptyField { field: "title" });
    }

    Ok(Record {
        id,
        title,
        summary: summary.trim().to_string(),
        authors,
        updated: parse_updated(updated.trim())?,
    })
}

/// Author names arrive as `<author><name>...</name></author>`, sometimes
/// with an affiliation element alongside the name.
fn parse_author(reader: &mut Reader<&[u8]>) -> Result<Option<String>, ParseError> {
    let mut name = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"name" => {
                name = Some(read_text(reader)?);
            }
            Event::End(e) if e.name().as_ref() == b"author" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()))
}

/// The entry id is a URI like `http://arxiv.org/abs/2401.12345v2`; the
/// stable identifier is its trailing path segment.
fn derive_id(raw: &str) -> &str {
    let raw = raw.trim();
    raw.rsplit('/').next().unwrap_or(raw)
}

fn parse_updated(value: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(value, UPDATED_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|_| ParseError::InvalidTimestamp {
            value: value.to_string(),
        })
}

fn unescape_text(e: &BytesText) -> Result<String, ParseError> {
    let text = e.unescape().map_err(quick_xml::Error::from)?;
    Ok(text.into_owned())
}

/// Read text content until the element just opened closes.
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, ParseError> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&unescape_text(&e)?),
            Event::Start(_) => text.push_str(&read_text(reader)?),
            Event::End(_) | Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Read text up to the matching `end_tag`, flattening any nested markup
/// into plain text.
fn read_text_content(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<String, ParseError> {
    let mut text = String::new();
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&unescape_text(&e)?),
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query?search_query=all:attention" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=all:attention</title>
  <id>http://arxiv.org/api/cHxbiOdZaP56ODnBPIenZhzg5f8</id>
  <updated>2024-01-21T00:00:00-05:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">1000</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/2401.12345v2</id>
    <updated>2024-01-20T15:30:00Z</updated>
    <published>2024-01-18T09:00:00Z</published>
    <title>Sparse Attention for Long Documents</title>
    <summary>  We study sparse attention patterns &amp; their effect on
  retrieval quality.</summary>
    <author>
      <name>Ada Lovelace</name>
      <arxiv:affiliation xmlns:arxiv="http://arxiv.org/schemas/atom">Analytical Engines</arxiv:affiliation>
    </author>
    <author>
      <name>Charles Babbage</name>
    </author>
    <arxiv:comment xmlns:arxiv="http://arxiv.org/schemas/atom">12 pages</arxiv:comment>
    <link href="http://arxiv.org/abs/2401.12345v2" rel="alternate" type="text/html"/>
    <category term="cs.IR" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2312.00001v1</id>
    <updated>2024-01-19T08:05:10Z</updated>
    <title>A Second Paper</title>
    <summary>Short summary.</summary>
    <author><name>Grace Hopper</name></author>
  </entry>
</feed>
"#;

    fn entry(id: &str, title: &str, updated: &str) -> String {
        format!(
            "<entry><id>{id}</id><updated>{updated}</updated>\
             <title>{title}</title><summary>s</summary>\
             <author><name>A</name></author></entry>"
        )
    }

    fn feed(entries: &str) -> String {
        format!(r#"<feed xmlns="http://www.w3.org/2005/Atom">{entries}</feed>"#)
    }

    #[test]
    fn parse_sample_feed() {
        let parsed = parse_feed(SAMPLE_FEED).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped, 0);

        let first = &parsed.records[0];
        assert_eq!(first.id, "2401.12345v2");
        assert_eq!(first.title, "Sparse Attention for Long Documents");
        assert!(first.summary.starts_with("We study sparse attention patterns &"));
        assert!(first.summary.ends_with("retrieval quality."));
        assert_eq!(first.authors, vec!["Ada Lovelace", "Charles Babbage"]);
        assert_eq!(first.updated, "2024-01-20T15:30:00Z".parse::<DateTime<Utc>>().unwrap());

        assert_eq!(parsed.records[1].id, "2312.00001v1");
        assert_eq!(parsed.records[1].authors, vec!["Grace Hopper"]);
    }

    #[test]
    fn parse_empty_feed() {
        let parsed = parse_feed(&feed("")).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn missing_title_skips_entry() {
        let bad = "<entry><id>http://arxiv.org/abs/1</id>\
                   <updated>2024-01-19T08:05:10Z</updated>\
                   <summary>s</summary></entry>";
        let good = entry("http://arxiv.org/abs/2", "Good", "2024-01-19T08:05:10Z");
        let parsed = parse_feed(&feed(&format!("{bad}{good}"))).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].id, "2");
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn missing_summary_skips_entry() {
        let bad = "<entry><id>http://arxiv.org/abs/1</id>\
                   <updated>2024-01-19T08:05:10Z</updated>\
                   <title>T</title></entry>";
        let parsed = parse_feed(&feed(bad)).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn whitespace_title_skips_entry() {
        let bad = entry("http://arxiv.org/abs/1", "   ", "2024-01-19T08:05:10Z");
        let parsed = parse_feed(&feed(&bad)).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn malformed_updated_skips_entry_only() {
        let bad = entry("http://arxiv.org/abs/1", "T1", "2024-01-19 08:05:10");
        let good = entry("http://arxiv.org/abs/2", "T2", "2024-01-19T08:05:10Z");
        let parsed = parse_feed(&feed(&format!("{good}{bad}"))).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].id, "2");
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn trailing_slash_id_skips_entry() {
        let bad = entry("http://arxiv.org/abs/", "T", "2024-01-19T08:05:10Z");
        let parsed = parse_feed(&feed(&bad)).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn bare_id_used_verbatim() {
        let parsed = parse_feed(&feed(&entry("2401.99999v1", "T", "2024-01-19T08:05:10Z")))
            .unwrap();
        assert_eq!(parsed.records[0].id, "2401.99999v1");
    }

    #[test]
    fn duplicate_id_kept_once() {
        let a = entry("http://arxiv.org/abs/1v1", "First", "2024-01-19T08:05:10Z");
        let b = entry("http://arxiv.org/abs/1v1", "Second", "2024-01-19T08:05:10Z");
        let parsed = parse_feed(&feed(&format!("{a}{b}"))).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].title, "First");
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn no_authors_is_valid() {
        let e = "<entry><id>http://arxiv.org/abs/1</id>\
                 <updated>2024-01-19T08:05:10Z</updated>\
                 <title>T</title><summary>s</summary></entry>";
        let parsed = parse_feed(&feed(e)).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.records[0].authors.is_empty());
    }

    #[test]
    fn truncated_feed_skips_partial_entry() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry>
            <id>http://arxiv.org/abs/2401.1v1</id>
            <updated>2024-01-19T08:05:10Z</updated>"#;
        let parsed = parse_feed(xml).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn mismatched_tags_outside_entries_fail() {
        let err = parse_feed("<feed><title></oops></feed>").unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn derive_id_takes_trailing_segment() {
        assert_eq!(derive_id("http://arxiv.org/abs/2401.12345v2"), "2401.12345v2");
        assert_eq!(derive_id(" http://arxiv.org/abs/hep-th/9901001v1 "), "9901001v1");
        assert_eq!(derive_id("2401.12345v2"), "2401.12345v2");
        assert_eq!(derive_id("http://arxiv.org/abs/"), "");
    }

    #[test]
    fn parse_updated_formats() {
        assert!(parse_updated("2024-01-20T15:30:00Z").is_ok());
        assert!(parse_updated("2024-01-20T15:30:00").is_err());
        assert!(parse_updated("2024-01-20").is_err());
        assert!(parse_updated("20 Jan 2024").is_err());
    }
}
