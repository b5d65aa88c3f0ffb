//! CircleCI conventions: trace selection, project slugs, artifact URLs and
//! the trace viewer link.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ViewerConfig;
use crate::core::schema::ArtifactRecord;
use crate::{TraceError, TraceResult};

static PROJECT_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^gh/[A-Za-z0-9_-]+/[A-Za-z0-9_-]+$").expect("project slug pattern"));
static JOB_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("job number pattern"));

/// Playwright trace archive: a zip mentioning `trace` or `playwright`.
pub fn is_trace_artifact(path: &str) -> bool {
    path.ends_with(".zip") && (path.contains("trace") || path.contains("playwright"))
}

pub fn select_traces(records: &[ArtifactRecord]) -> Vec<ArtifactRecord> {
    records
        .iter()
        .filter(|r| is_trace_artifact(&r.path))
        .cloned()
        .collect()
}

/// Accepts `gh/org/repo` or `github/org/repo`, returns the `gh/` form.
pub fn normalize_project_slug(project: &str) -> TraceResult<String> {
    let slug = match project.strip_prefix("github/") {
        Some(rest) => format!("gh/{rest}"),
        None => project.to_string(),
    };
    if !PROJECT_SLUG.is_match(&slug) {
        return Err(TraceError::InvalidProject(project.to_string()));
    }
    Ok(slug)
}

pub fn validate_job_number(job: &str) -> TraceResult<&str> {
    if !JOB_NUMBER.is_match(job) {
        return Err(TraceError::InvalidJobNumber(job.to_string()));
    }
    Ok(job)
}

/// `<api_base>/project/<slug>/<job>/artifacts`
pub fn artifacts_api_url(api_base: &str, project: &str, job: &str) -> TraceResult<String> {
    let slug = normalize_project_slug(project)?;
    let job = validate_job_number(job)?;
    Ok(format!(
        "{}/project/{}/{}/artifacts",
        api_base.trim_end_matches('/'),
        slug,
        job
    ))
}

/// Parse `trace_url` and check its host against `allowed` (suffix match).
pub fn check_allowed_host(trace_url: &str, allowed: &[String]) -> TraceResult<url::Url> {
    let parsed =
        url::Url::parse(trace_url).map_err(|_| TraceError::InvalidUrl(trace_url.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| TraceError::InvalidUrl(trace_url.to_string()))?;
    if !allowed.iter().any(|h| host.ends_with(h.as_str())) {
        return Err(TraceError::HostNotAllowed {
            host: host.to_string(),
            allowed: allowed.to_vec(),
        });
    }
    Ok(parsed)
}

/// `<origin>/api/proxy?url=<encoded trace url>`
pub fn proxy_url(origin: &str, trace_url: &str) -> String {
    format!(
        "{}/api/proxy?url={}",
        origin.trim_end_matches('/'),
        urlencoding::encode(trace_url)
    )
}

/// Trace viewer link for an artifact URL.
///
/// Routes through the proxy when one is configured, since the viewer fetches
/// the archive cross-origin.
pub fn viewer_url(config: &ViewerConfig, trace_url: &str) -> TraceResult<String> {
    check_allowed_host(trace_url, &config.allowed_hosts)?;
    let target = match config.proxy_origin.as_deref() {
        Some(origin) => proxy_url(origin, trace_url),
        None => trace_url.to_string(),
    };
    Ok(format!(
        "{}?trace={}",
        config.viewer_url,
        urlencoding::encode(&target)
    ))
}
