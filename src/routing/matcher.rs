//! Route matching logic.
//!
//! # Responsibilities
//! - Match a request path against exact, prefix, or image-extension rules
//! - Prefix matches cover the bare prefix, a trailing slash, and sub-paths
//!
//! # Design Decisions
//! - Path matching is case-sensitive; image extensions are not
//! - No regex, plain string scans keep matching O(path length)

/// Image extensions served from the object store.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// A single route condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatch {
    /// The path must equal this string.
    Exact(&'static str),
    /// The path is the prefix itself or any sub-path under it.
    Prefix(&'static str),
    /// The path ends in a known image extension.
    ImageExt,
}

impl PathMatch {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatch::Exact(expected) => path == *expected,
            PathMatch::Prefix(prefix) => {
                path == *prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            PathMatch::ImageExt => has_image_extension(path),
        }
    }
}

/// True if the path ends in an image extension, case-insensitive.
pub fn has_image_extension(path: &str) -> bool {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|candidate| ext.eq_ignore_ascii_case(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let m = PathMatch::Exact("/post-quantum");
        assert!(m.matches("/post-quantum"));
        assert!(!m.matches("/post-quantum/"));
        assert!(!m.matches("/post-quantum-x"));
    }

    #[test]
    fn test_prefix_matcher() {
        let m = PathMatch::Prefix("/deal-negotiator");
        assert!(m.matches("/deal-negotiator"));
        assert!(m.matches("/deal-negotiator/"));
        assert!(m.matches("/deal-negotiator/api/calculate"));
        // A longer segment sharing the prefix text is a different route.
        assert!(!m.matches("/deal-negotiators"));
    }

    #[test]
    fn test_image_matcher() {
        let m = PathMatch::ImageExt;
        assert!(m.matches("/logos/nexum.png"));
        assert!(m.matches("/hero.JPEG"));
        assert!(m.matches("/a/b/c.webp"));
        assert!(!m.matches("/style.css"));
        assert!(!m.matches("/no-extension"));
    }
}
