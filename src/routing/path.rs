//! Auth-exempt path classification.
//!
//! Substring matching is the compatible default: an entry exempts any path
//! that contains it anywhere. Prefix matching is available for deployments
//! that want the stricter rule.

use crate::config::schema::ExemptMatch;

/// Decides whether a path bypasses session checks.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    entries: Vec<String>,
    mode: ExemptMatch,
}

impl PathClassifier {
    pub fn new(entries: &[String], mode: ExemptMatch) -> Self {
        Self {
            entries: entries.iter().filter(|e| !e.is_empty()).cloned().collect(),
            mode,
        }
    }

    /// Returns true if `path` is exempt from session checks.
    pub fn is_exempt(&self, path: &str) -> bool {
        match self.mode {
            ExemptMatch::Substring => self.entries.iter().any(|e| path.contains(e.as_str())),
            ExemptMatch::Prefix => self.entries.iter().any(|e| path.starts_with(e.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<String> {
        vec!["/signin".into(), "/reset-password".into(), "/terms".into()]
    }

    #[test]
    fn test_substring_match() {
        let classifier = PathClassifier::new(&entries(), ExemptMatch::Substring);
        assert!(classifier.is_exempt("/signin"));
        assert!(classifier.is_exempt("/reset-password?token=abc"));
        assert!(classifier.is_exempt("/docs/terms"));
        assert!(!classifier.is_exempt("/dashboard"));
    }

    #[test]
    fn test_prefix_match() {
        let classifier = PathClassifier::new(&entries(), ExemptMatch::Prefix);
        assert!(classifier.is_exempt("/terms"));
        assert!(classifier.is_exempt("/signin/callback"));
        assert!(!classifier.is_exempt("/docs/terms"));
    }

    #[test]
    fn test_empty_entries_ignored() {
        let classifier = PathClassifier::new(&[String::new()], ExemptMatch::Substring);
        assert!(!classifier.is_exempt("/dashboard"));
    }
}
