//! Log Redaction Layer
//!
//! Scrubs URL credentials and bearer tokens from strings prior to logging.
//! Transport errors from the HTTP client echo the full upstream URL, which
//! may carry `user:password@` if the operator put it there.

use regex::Regex;
use std::sync::LazyLock;

static URL_USERINFO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<scheme>[a-zA-Z][a-zA-Z0-9+.\-]*://)[^/@\s]+@").unwrap());
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = URL_USERINFO_RE.replace_all(input, "${scheme}[REDACTED]@");
    BEARER_RE.replace_all(&redacted, "Bearer [REDACTED_TOKEN]").to_string()
}
