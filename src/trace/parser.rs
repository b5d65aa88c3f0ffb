//! Artifact path parser.
//!
//! Playwright writes one directory per test run, named after the spec file and
//! the test title, e.g.
//! `settings/avatar-severity-1-5148f-close-avatar-drop-down-menu-local-retry1/trace.zip`.
//! The convention is lossy, so parsing is best-effort and total.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// File name used when a path has no real segments at all.
pub const DEFAULT_FILE_NAME: &str = "trace.zip";

/// Test name used when neither the test title nor the directory give anything.
pub const FALLBACK_TEST_NAME: &str = "Trace";

/// Directories CI runners collect artifacts under; never part of a suite path.
const OUTPUT_ROOTS: &[&str] = &[
    "test-results",
    "playwright-report",
    "blob-report",
    "results",
    "artifacts",
    "traces",
];

/// Titles shorter than this are considered noise.
const MIN_TEST_NAME_CHARS: usize = 3;

static RETRY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[-_](retry[0-9]+)$").expect("retry suffix pattern"));
static SEVERITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)severity-([0-9]+)").expect("severity pattern"));
static SEVERITY_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[-_]severity[-_]").expect("severity boundary pattern"));
static HASHED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)severity-[0-9]+-[0-9a-f]{4,6}-(.+)$").expect("hashed test name pattern")
});
static LOCAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[-_]local$").expect("local suffix pattern"));
static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_]+").expect("separator pattern"));

/// Closed vocabulary of test categories recognised in path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Functional,
    Integration,
    E2e,
    Unit,
    Smoke,
    Regression,
}

impl TestType {
    pub const ALL: [TestType; 6] = [
        TestType::Functional,
        TestType::Integration,
        TestType::E2e,
        TestType::Unit,
        TestType::Smoke,
        TestType::Regression,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Functional => "functional",
            TestType::Integration => "integration",
            TestType::E2e => "e2e",
            TestType::Unit => "unit",
            TestType::Smoke => "smoke",
            TestType::Regression => "regression",
        }
    }

    /// Case-insensitive exact match of a whole path segment.
    pub fn from_segment(segment: &str) -> Option<TestType> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(segment))
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured metadata derived from a single artifact path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceInfo {
    /// Human-readable title, never empty
    pub test_name: String,

    /// Spec file the test lives in, e.g. `settings/avatar.spec.ts`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_suite: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_type: Option<TestType>,

    /// Digits of a `severity-<N>` marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// `retry<N>` exactly as found in the path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_label: Option<String>,

    /// 0 for the original run
    pub retry_number: u32,

    pub file_name: String,

    /// Join key folding an original run and its retries together
    pub group_key: String,
}

impl TraceInfo {
    pub fn is_retry(&self) -> bool {
        self.retry_number > 0
    }
}

/// Parse an artifact path into [`TraceInfo`].
///
/// Never fails: paths outside the naming convention fall back to the
/// directory name, and finally to [`FALLBACK_TEST_NAME`].
pub fn parse(path: &str) -> TraceInfo {
    let mut segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();
    let file_name = segments.pop().unwrap_or(DEFAULT_FILE_NAME).to_string();

    let test_type = segments.iter().find_map(|s| TestType::from_segment(s));

    let last_dir = segments.last().copied().unwrap_or("");
    let parent_dir = segments
        .len()
        .checked_sub(2)
        .map(|i| segments[i])
        .filter(|dir| TestType::from_segment(dir).is_none())
        .filter(|dir| !OUTPUT_ROOTS.iter().any(|root| root.eq_ignore_ascii_case(dir)));

    let (test_part, retry_label, retry_number) = split_retry(last_dir);

    let severity = SEVERITY
        .captures(test_part)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let mut test_suite = None;
    let mut name_source = last_dir.to_string();
    if severity.is_some() {
        test_suite = SEVERITY_BOUNDARY
            .find(test_part)
            .and_then(|boundary| suite_from_prefix(&test_part[..boundary.start()], parent_dir));

        if let Some(rest) = HASHED_NAME.captures(test_part).and_then(|c| c.get(1)) {
            name_source = LOCAL_SUFFIX.replace(rest.as_str(), "").into_owned();
        }
    }

    let mut test_name = title_case(&name_source);
    if test_name.chars().count() < MIN_TEST_NAME_CHARS {
        test_name = title_case(last_dir);
    }
    if test_name.is_empty() {
        test_name = FALLBACK_TEST_NAME.to_string();
    }

    TraceInfo {
        test_name,
        test_suite,
        test_type,
        severity,
        retry_label: retry_label.map(str::to_string),
        retry_number,
        file_name,
        group_key: test_part.to_lowercase(),
    }
}

/// Split a trailing `-retryN` / `_retryN` off a directory name.
fn split_retry(dir: &str) -> (&str, Option<&str>, u32) {
    match RETRY_SUFFIX.captures(dir).and_then(|c| c.get(1)) {
        Some(label) => {
            // "retry" is ASCII, digits follow it
            let number = label.as_str()["retry".len()..]
                .parse()
                .unwrap_or(u32::MAX);
            // one-byte separator precedes the label
            (&dir[..label.start() - 1], Some(label.as_str()), number)
        }
        None => (dir, None, 0),
    }
}

/// `settings-avatar` -> `settings/avatar.spec.ts`.
///
/// Only the last hyphen token becomes the file stem; everything before it is
/// kept hyphen-joined as the directory. A single token borrows the enclosing
/// directory when there is one.
fn suite_from_prefix(prefix: &str, parent_dir: Option<&str>) -> Option<String> {
    let tokens: Vec<&str> = prefix.split('-').filter(|t| !t.is_empty()).collect();
    match tokens.as_slice() {
        [] => None,
        [stem] => Some(match parent_dir {
            Some(dir) => format!("{dir}/{stem}.spec.ts"),
            None => format!("{stem}.spec.ts"),
        }),
        [dirs @ .., stem] => Some(format!("{}/{stem}.spec.ts", dirs.join("-"))),
    }
}

/// `close-avatar_menu` -> `Close Avatar Menu`.
pub fn title_case(raw: &str) -> String {
    let spaced = SEPARATOR_RUN.replace_all(raw, " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVATAR: &str =
        "settings/avatar-severity-1-5148f-close-avatar-drop-down-menu-local/trace.zip";
    const AVATAR_RETRY: &str =
        "settings/avatar-severity-1-5148f-close-avatar-drop-down-menu-local-retry1/trace.zip";

    #[test]
    fn test_parse_full_convention() {
        let info = parse(AVATAR);
        assert_eq!(info.test_suite.as_deref(), Some("settings/avatar.spec.ts"));
        assert_eq!(info.severity.as_deref(), Some("1"));
        assert_eq!(info.test_name, "Close Avatar Drop Down Menu");
        assert_eq!(info.retry_number, 0);
        assert!(info.retry_label.is_none());
        assert_eq!(info.file_name, "trace.zip");
        assert_eq!(
            info.group_key,
            "avatar-severity-1-5148f-close-avatar-drop-down-menu-local"
        );
    }

    #[test]
    fn test_parse_retry_shares_group_key() {
        let original = parse(AVATAR);
        let retry = parse(AVATAR_RETRY);
        assert_eq!(retry.retry_label.as_deref(), Some("retry1"));
        assert_eq!(retry.retry_number, 1);
        assert!(retry.is_retry());
        assert_eq!(retry.group_key, original.group_key);
        assert_eq!(retry.test_name, original.test_name);
        assert_eq!(retry.test_suite, original.test_suite);
    }

    #[test]
    fn test_parse_retry_label_keeps_case() {
        let info = parse("a/Suite-Case_RETRY12/trace.zip");
        assert_eq!(info.retry_label.as_deref(), Some("RETRY12"));
        assert_eq!(info.retry_number, 12);
        assert_eq!(info.group_key, "suite-case");
    }

    #[test]
    fn test_parse_bare_file_name() {
        let info = parse("trace.zip");
        assert_eq!(info.file_name, "trace.zip");
        assert!(info.test_suite.is_none());
        assert!(info.test_type.is_none());
        assert!(info.severity.is_none());
        assert_eq!(info.test_name, FALLBACK_TEST_NAME);
        assert_eq!(info.group_key, "");
    }

    #[test]
    fn test_parse_no_real_segments() {
        for path in ["", "/", "./..//.", "../"] {
            let info = parse(path);
            assert_eq!(info.file_name, DEFAULT_FILE_NAME, "path {path:?}");
            assert_eq!(info.test_name, FALLBACK_TEST_NAME, "path {path:?}");
            assert_eq!(info.retry_number, 0);
        }
    }

    #[test]
    fn test_parse_ignores_dot_segments() {
        let info = parse("./settings/../avatar-severity-2-abcd-open-menu/./trace.zip/");
        assert_eq!(info.file_name, "trace.zip");
        assert_eq!(info.test_name, "Open Menu");
        assert_eq!(info.severity.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_test_type_first_match_case_insensitive() {
        let info = parse("results/Smoke/e2e/login-severity-1-abcd-sign-in/trace.zip");
        assert_eq!(info.test_type, Some(TestType::Smoke));

        let info = parse("functionalish/E2E/x/trace.zip");
        assert_eq!(info.test_type, Some(TestType::E2e));
    }

    #[test]
    fn test_parse_test_type_not_taken_from_file_name() {
        let info = parse("artifacts/unit");
        assert_eq!(info.file_name, "unit");
        assert!(info.test_type.is_none());
    }

    #[test]
    fn test_parse_without_severity_uses_directory() {
        let info = parse("test-results/checkout-flow-works/trace.zip");
        assert!(info.severity.is_none());
        assert!(info.test_suite.is_none());
        assert_eq!(info.test_name, "Checkout Flow Works");
    }

    #[test]
    fn test_parse_severity_without_hash_falls_back_to_directory() {
        let info = parse("out/cart-severity-3-zz/trace.zip");
        assert_eq!(info.severity.as_deref(), Some("3"));
        assert_eq!(info.test_suite.as_deref(), Some("out/cart.spec.ts"));
        assert_eq!(info.test_name, "Cart Severity 3 Zz");
    }

    #[test]
    fn test_parse_multi_token_suite_keeps_last_token_as_stem() {
        let info = parse("a-b-c-severity-1-abcd-does-things/trace.zip");
        assert_eq!(info.test_suite.as_deref(), Some("a-b/c.spec.ts"));
        assert_eq!(info.test_name, "Does Things");
    }

    #[test]
    fn test_parse_single_token_suite_without_parent() {
        let info = parse("avatar-severity-1-abcd-open/trace.zip");
        assert_eq!(info.test_suite.as_deref(), Some("avatar.spec.ts"));
    }

    #[test]
    fn test_parse_single_token_suite_skips_type_directory() {
        let info = parse("functional/avatar-severity-1-abcd-open/trace.zip");
        assert_eq!(info.test_suite.as_deref(), Some("avatar.spec.ts"));
        assert_eq!(info.test_type, Some(TestType::Functional));
    }

    #[test]
    fn test_parse_single_token_suite_skips_output_root() {
        let info = parse("test-results/avatar-severity-1-abcd-open/trace.zip");
        assert_eq!(info.test_suite.as_deref(), Some("avatar.spec.ts"));
        let info = parse("Playwright-Report/avatar-severity-1-abcd-open/trace.zip");
        assert_eq!(info.test_suite.as_deref(), Some("avatar.spec.ts"));
        let info = parse("test-results/settings/avatar-severity-1-abcd-open/trace.zip");
        assert_eq!(info.test_suite.as_deref(), Some("settings/avatar.spec.ts"));
    }

    #[test]
    fn test_parse_non_ascii_digits_are_not_markers() {
        let info = parse("a/foo-retry\u{663}/trace.zip");
        assert!(info.retry_label.is_none());
        assert_eq!(info.retry_number, 0);
        assert_eq!(info.group_key, "foo-retry\u{663}");

        let info = parse("a/cart-severity-\u{663}-abcd-add-item/trace.zip");
        assert!(info.severity.is_none());
        assert!(info.test_suite.is_none());
    }

    #[test]
    fn test_parse_short_name_falls_back_to_directory() {
        let info = parse("x/severity-2-abcd-ab/trace.zip");
        assert_eq!(info.test_name, "Severity 2 Abcd Ab");
        assert!(info.test_suite.is_none());
    }

    #[test]
    fn test_parse_is_deterministic() {
        for path in [AVATAR, AVATAR_RETRY, "trace.zip", "", "a/b/c"] {
            assert_eq!(parse(path), parse(path));
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("close-avatar__drop--down"), "Close Avatar Drop Down");
        assert_eq!(title_case("-leading-and-trailing-"), "Leading And Trailing");
        assert_eq!(title_case("already Title"), "Already Title");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_test_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TestType::E2e).unwrap(), "\"e2e\"");
        assert_eq!(TestType::Regression.to_string(), "regression");
    }
}
