//! Path pattern matching module
//!
//! Implements segment-exact matching of request paths against registered
//! patterns, with `{param}` placeholders bound from path segments.

/// One segment of a parsed path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Must compare equal to the path segment
    Literal(String),
    /// Binds any single non-empty path segment under the given name
    Param(String),
}

/// A parsed path pattern, e.g. `/items` or `/items/{name}`
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string into segments
    ///
    /// A segment written as `{name}` becomes a parameter; anything else is
    /// matched literally. There are no wildcards and no prefix matching.
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .into_iter()
            .map(|seg| {
                seg.strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .map_or_else(|| Segment::Literal(seg.to_string()), |name| {
                        Segment::Param(name.to_string())
                    })
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// The pattern string this was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request path against this pattern
    ///
    /// Returns the bound parameters on a match, `None` otherwise. Matching
    /// is segment-exact: same segment count, literals equal, and every
    /// parameter bound to a non-empty segment. A trailing slash produces an
    /// extra empty segment, so `/items/` does not match `/items`.
    pub fn matches<'p>(&self, path: &'p str) -> Option<PathParams<'p>> {
        let parts = split_path(path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.0.push((name.clone(), part));
                }
            }
        }

        Some(params)
    }
}

/// Parameters bound from path segments during a match
#[derive(Debug, Default)]
pub struct PathParams<'p>(Vec<(String, &'p str)>);

impl<'p> PathParams<'p> {
    /// Get a bound parameter value by name
    pub fn get(&self, name: &str) -> Option<&'p str> {
        self.0
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split a path into segments, dropping only the leading slash
fn split_path(path: &str) -> Vec<&str> {
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let pattern = PathPattern::parse("/items");
        assert!(pattern.matches("/items").is_some());
        assert!(pattern.matches("/items/").is_none());
        assert!(pattern.matches("/item").is_none());
        assert!(pattern.matches("/items/item1").is_none());
    }

    #[test]
    fn test_param_binding() {
        let pattern = PathPattern::parse("/items/{name}");
        let params = pattern.matches("/items/item1").expect("should match");
        assert_eq!(params.get("name"), Some("item1"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_param_requires_non_empty_segment() {
        let pattern = PathPattern::parse("/items/{name}");
        assert!(pattern.matches("/items/").is_none());
        assert!(pattern.matches("/items").is_none());
    }

    #[test]
    fn test_no_partial_match() {
        let pattern = PathPattern::parse("/items/{name}");
        assert!(pattern.matches("/items/item1/extra").is_none());
        assert!(pattern.matches("/other/item1").is_none());
    }

    #[test]
    fn test_param_binds_arbitrary_segment() {
        let pattern = PathPattern::parse("/items/{name}");
        let params = pattern.matches("/items/bogus").expect("should match");
        assert_eq!(params.get("name"), Some("bogus"));
        assert_eq!(params.get("other"), None);
    }

    #[test]
    fn test_root_path_does_not_match() {
        let pattern = PathPattern::parse("/items");
        assert!(pattern.matches("/").is_none());
        assert!(pattern.matches("").is_none());
    }

    #[test]
    fn test_pattern_round_trips_raw_string() {
        let pattern = PathPattern::parse("/items/{name}");
        assert_eq!(pattern.as_str(), "/items/{name}");
    }
}
