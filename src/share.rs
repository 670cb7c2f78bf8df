//! Shareable links: `?url=...&expires=...` on the app's own address.
//!
//! `expires` is informational; nothing reads it back.

use url::Url;

use crate::commands::AuditRequest;

/// Seven days in milliseconds.
pub const SHARE_LINK_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Build the share link for `domain` on top of `base` (the current page
/// address). Existing query parameters on `base` are dropped.
pub fn build_share_link(base: &str, domain: &str, now_ms: u64) -> Result<String, url::ParseError> {
    let mut link = Url::parse(base)?;
    link.set_query(None);
    link.set_fragment(None);

    let domain = domain.trim();
    let target = if domain.starts_with("http") {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    };

    link.query_pairs_mut()
        .append_pair("url", &target)
        .append_pair("expires", &(now_ms + SHARE_LINK_TTL_MS).to_string());
    Ok(link.into())
}

/// Read a request from a query string (with or without the leading `?`).
/// Without a non-empty `url` parameter there is nothing to submit.
pub fn parse_shared_request(query: &str) -> Option<AuditRequest> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let (mut target, mut industry, mut goal) = (None, None, None);
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "url" => target = Some(value.into_owned()),
            "industry" => industry = Some(value.into_owned()),
            "goal" => goal = Some(value.into_owned()),
            _ => {}
        }
    }
    AuditRequest::from_form(
        &target?,
        industry.as_deref().unwrap_or_default(),
        goal.as_deref().unwrap_or_default(),
    )
}
