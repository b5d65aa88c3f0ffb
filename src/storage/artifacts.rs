use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::core::schema::{ArtifactRecord, ArtifactsPage, TraceListing};
use crate::{TraceError, TraceResult};

/// Read artifact records from `path`, or from stdin when `path` is `-`.
///
/// `.jsonl` files hold one record per line; anything else is parsed as JSON
/// and its shape detected from the content.
pub fn load_artifacts(path: &Path) -> TraceResult<Vec<ArtifactRecord>> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return parse_artifacts_json(&buf);
    }

    if !path.exists() {
        return Err(TraceError::Message(format!(
            "artifact list not found: {}",
            path.display()
        )));
    }

    if path.extension().is_some_and(|ext| ext == "jsonl") {
        let file = std::fs::File::open(path)?;
        return parse_artifacts_jsonl(BufReader::new(file));
    }

    let s = std::fs::read_to_string(path)?;
    parse_artifacts_json(&s)
}

/// Parse a JSON artifact list.
///
/// # Accepted shapes
/// - `{"items": [...], "next_page_token": ...}` (CircleCI artifacts page)
/// - `{"traces": [...], "all": [...], ...}` (trace listing; `all` is used)
/// - `[...]` (bare list of records)
pub fn parse_artifacts_json(s: &str) -> TraceResult<Vec<ArtifactRecord>> {
    let value: Value = serde_json::from_str(s)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }
    if value.get("items").is_some() {
        let page: ArtifactsPage = serde_json::from_value(value)?;
        return Ok(page.items);
    }
    if value.get("all").is_some() {
        let listing: TraceListing = serde_json::from_value(value)?;
        return Ok(listing.all);
    }
    Err(TraceError::Message(
        "unrecognised artifact list: expected an array, an `items` page or an `all` listing"
            .to_string(),
    ))
}

/// Parse JSONL, one record per line. Blank lines are skipped.
pub fn parse_artifacts_jsonl<R: BufRead>(reader: R) -> TraceResult<Vec<ArtifactRecord>> {
    let mut records = Vec::new();
    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ArtifactRecord = serde_json::from_str(&line).map_err(|e| {
            TraceError::Message(format!("failed to parse line {}: {e}", line_num + 1))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Write `value` as pretty JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> TraceResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_page() {
        let records = parse_artifacts_json(
            r#"{"items":[{"path":"a/trace.zip","node_index":0,"url":"u"}],"next_page_token":null}"#,
        )
        .unwrap();
        assert_eq!(records, vec![ArtifactRecord::new("a/trace.zip", "u", 0)]);
    }

    #[test]
    fn test_parse_listing_uses_all() {
        let records = parse_artifacts_json(
            r#"{"traces":[],"all":[{"path":"log.txt","url":"u","node_index":1}],"job":"1","project":"gh/a/b"}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "log.txt");
    }

    #[test]
    fn test_parse_bare_array_with_camel_case() {
        let records =
            parse_artifacts_json(r#"[{"path":"p/trace.zip","url":"u","nodeIndex":2}]"#).unwrap();
        assert_eq!(records[0].node_index, 2);
    }

    #[test]
    fn test_parse_unknown_object_is_error() {
        let err = parse_artifacts_json(r#"{"foo":1}"#).unwrap_err();
        assert!(err.to_string().contains("unrecognised artifact list"));
    }

    #[test]
    fn test_parse_jsonl_reports_line_number() {
        let input = "{\"path\":\"a\",\"url\":\"u\"}\n\n{not json}\n";
        let err = parse_artifacts_jsonl(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifacts(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
