//! Text redaction for secured messages
//!
//! A `Replacer` is an ordered list of literal from/to rewrite rules applied to
//! the fully formatted line, after truncation. Typical use is masking
//! passwords or tokens that would otherwise land in the log file.

/// Ordered literal text-rewrite rules.
///
/// # Example
///
/// ```
/// use facility_logger::Replacer;
///
/// let replacer = Replacer::new().rule("hunter2", "******");
/// assert_eq!(replacer.apply("password is hunter2"), "password is ******");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Replacer {
    rules: Vec<(String, String)>,
}

impl Replacer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rewrite rule. Rules are applied in insertion order, each
    /// replacing every occurrence of `from`.
    #[must_use = "builder methods return a new value"]
    pub fn rule(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.rules.push((from.into(), to.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to `text` and return the rewritten string.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (from, to) in &self.rules {
            if !from.is_empty() {
                out = out.replace(from.as_str(), to);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_in_order() {
        let replacer = Replacer::new().rule("secret", "***").rule("***x", "#");
        assert_eq!(replacer.apply("a secretx b"), "a # b");
    }

    #[test]
    fn test_empty_replacer_is_identity() {
        let replacer = Replacer::new();
        assert!(replacer.is_empty());
        assert_eq!(replacer.apply("unchanged"), "unchanged");
    }

    #[test]
    fn test_empty_from_is_ignored() {
        let replacer = Replacer::new().rule("", "x");
        assert_eq!(replacer.apply("abc"), "abc");
    }
}
