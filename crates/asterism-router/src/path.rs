/// Path normalization utilities.
///
/// All functions are pure: given the same input, they always produce the
/// same output with no side effects.
use std::borrow::Cow;

/// Checks whether a path is already in canonical form.
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain a query (`?`) or fragment (`#`)
/// - Must not end with `/` (except root `/`)
/// - Must not end with a `.html` suffix (any case)
/// - Must not end with an `index` segment (any case)
///
/// # Examples
///
/// ```
/// use asterism_router::is_normalized;
///
/// assert!(is_normalized("/"));
/// assert!(is_normalized("/about"));
/// assert!(is_normalized("/users/123"));
///
/// assert!(!is_normalized(""));
/// assert!(!is_normalized("/about/"));
/// assert!(!is_normalized("/about.html"));
/// assert!(!is_normalized("/docs/index"));
/// assert!(!is_normalized("/about?tab=1"));
/// ```
pub fn is_normalized(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains(['?', '#']) {
        return false;
    }

    if path == "/" {
        return true;
    }

    if path.ends_with('/') {
        return false;
    }

    if ends_with_ignore_case(path, ".html") {
        return false;
    }

    let last = path.rsplit('/').next().unwrap_or("");
    !last.eq_ignore_ascii_case("index")
}

/// Normalizes a URL path to canonical form.
///
/// Zero-copy: returns `Cow::Borrowed` when the input is already canonical,
/// and allocates only when normalization is actually needed.
///
/// Applied in order:
/// 1. Empty input yields `/`.
/// 2. Query and fragment are stripped.
/// 3. Trailing slashes are collapsed (except root `/`).
/// 4. A trailing `.html` suffix is stripped (case-insensitive).
/// 5. A trailing `/index` segment is collapsed into its parent
///    (case-insensitive), so `/docs/index` becomes `/docs`.
/// 6. Trailing slashes exposed by step 5 are stripped again.
/// 7. A leading `/` is ensured.
///
/// Steps 3-6 repeat until the path stops changing: stripping one suffix
/// can expose another (`/a.html.html`, `/docs/index/index`), and the
/// result must itself be canonical so that normalization is idempotent.
///
/// # Examples
///
/// ```
/// use asterism_router::normalize;
/// use std::borrow::Cow;
///
/// // Canonical paths: zero allocations
/// assert!(matches!(normalize("/about"), Cow::Borrowed("/about")));
///
/// assert_eq!(normalize(""), "/");
/// assert_eq!(normalize("/docs/"), "/docs");
/// assert_eq!(normalize("/docs/index.html"), "/docs");
/// assert_eq!(normalize("/about?tab=1#top"), "/about");
/// ```
pub fn normalize(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }

    let mut p = match path.find(['?', '#']) {
        Some(i) => &path[..i],
        None => path,
    };

    loop {
        let before = p;

        if p.len() > 1 {
            p = p.trim_end_matches('/');
        }

        if p != "/" {
            if let Some(stripped) = strip_suffix_ignore_case(p, ".html") {
                p = stripped;
            }
        }

        if let Some(stripped) = strip_suffix_ignore_case(p, "/index") {
            p = stripped;
        } else if p.eq_ignore_ascii_case("index") {
            // A bare relative "index" collapses to the root the same way.
            p = "";
        }

        if p.len() > 1 {
            p = p.trim_end_matches('/');
        }

        if p == before {
            break;
        }
    }

    if p.is_empty() {
        Cow::Borrowed("/")
    } else if p.starts_with('/') {
        Cow::Owned(p.to_string())
    } else {
        Cow::Owned(format!("/{p}"))
    }
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    if ends_with_ignore_case(s, suffix) {
        Some(&s[..s.len() - suffix.len()])
    } else {
        None
    }
}
