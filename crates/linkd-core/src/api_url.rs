//! Base URL normalisation for the alumni API.
//!
//! Deployed API hosts are only reachable over TLS, so a configured `http://`
//! URL for anything other than a local development host is upgraded to
//! `https://`. Trailing slashes are stripped so that endpoint paths can be
//! appended with a single `/`.

/// Hosts that keep their scheme as configured.
///
/// `10.0.2.2` is the Android emulator's alias for the host loopback.
const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "[::1]", "10.0.2.2"];

/// Normalise a configured API base URL.
///
/// Returns `None` when the value is blank or does not start with `http://`
/// or `https://`.
#[must_use]
pub fn normalize_api_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("https://") {
        return (!rest.is_empty()).then(|| trimmed.to_owned());
    }

    let rest = trimmed.strip_prefix("http://")?;
    if rest.is_empty() {
        return None;
    }

    if is_local_host(rest) {
        Some(trimmed.to_owned())
    } else {
        Some(format!("https://{rest}"))
    }
}

/// Returns `true` if the authority at the start of `rest` names a local host.
fn is_local_host(rest: &str) -> bool {
    let authority = rest.split('/').next().unwrap_or(rest);
    let host = if authority.starts_with('[') {
        // IPv6 literal: keep the brackets, drop any port after them.
        authority
            .find(']')
            .map_or(authority, |end| &authority[..=end])
    } else {
        authority.split(':').next().unwrap_or(authority)
    };
    LOCAL_HOSTS.iter().any(|local| host.eq_ignore_ascii_case(local))
}
