//! Request target normalization.
//!
//! # Responsibilities
//! - Reduce an absolute URL to its path component
//! - Strip query string and fragment from bare paths
//!
//! # Design Decisions
//! - No trailing-slash or case normalization: lookups are exact
//! - A target that merely looks absolute but fails to parse is treated as a path

use url::Url;

/// Path component of `target`, without query or fragment.
pub fn normalize(target: &str) -> &str {
    if is_absolute(target) {
        if let Ok(url) = Url::parse(target) {
            if url.has_host() {
                return absolute_path(target, &url);
            }
        }
    }
    strip_query(target)
}

fn is_absolute(target: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        target
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Slice of `target` holding the path `url` parsed out of it.
///
/// The parsed URL only locates the authority boundary; the result borrows
/// from `target`.
fn absolute_path<'a>(target: &'a str, url: &Url) -> &'a str {
    let after_scheme = &target[url.scheme().len() + 3..];
    let path_start = after_scheme
        .find(['/', '?', '#'])
        .unwrap_or(after_scheme.len());
    let path = strip_query(&after_scheme[path_start..]);
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

fn strip_query(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}
