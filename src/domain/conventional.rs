use crate::domain::version::VersionBump;
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!?):\s*(.*)").expect("valid commit header regex")
    })
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits format
    ///
    /// Supports `type(scope)!: description`, `type(scope): description`,
    /// `type!: description` and `type: description`. Anything else is
    /// treated as a non-conventional `chore`.
    pub fn parse(message: &str) -> Self {
        let footer_breaking =
            message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:");

        if let Some(captures) = header_regex().captures(message) {
            let r#type = captures
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            let scope = captures.get(2).map(|m| m.as_str().to_string());
            let has_exclamation = captures.get(3).map(|m| m.as_str()) == Some("!");
            let description = captures
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            return ParsedCommit {
                r#type,
                scope,
                description,
                is_breaking_change: has_exclamation || footer_breaking,
            };
        }

        ParsedCommit {
            r#type: "chore".to_string(),
            scope: None,
            description: message.to_string(),
            is_breaking_change: false,
        }
    }
}

/// Classify commit messages into the bump they call for
///
/// Returns `None` when there is nothing to classify.
pub fn classify<'a, I>(messages: I) -> Option<VersionBump>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen_any = false;
    let mut has_features = false;

    for message in messages {
        seen_any = true;
        let parsed = ParsedCommit::parse(message);
        trace!(
            kind = %parsed.r#type,
            scope = parsed.scope.as_deref().unwrap_or("-"),
            description = %parsed.description,
            breaking = parsed.is_breaking_change,
            "classified commit"
        );

        if parsed.is_breaking_change {
            return Some(VersionBump::Major);
        }
        if matches!(parsed.r#type.as_str(), "feat" | "feature") {
            has_features = true;
        }
    }

    if !seen_any {
        None
    } else if has_features {
        Some(VersionBump::Minor)
    } else {
        Some(VersionBump::Patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_scope() {
        let commit = ParsedCommit::parse("feat(auth): add login");
        assert_eq!(commit.r#type, "feat");
        assert_eq!(commit.scope, Some("auth".to_string()));
        assert_eq!(commit.description, "add login");
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_parse_with_breaking_marker() {
        let commit = ParsedCommit::parse("feat(auth)!: redesign login");
        assert_eq!(commit.r#type, "feat");
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_parse_breaking_without_scope() {
        let commit = ParsedCommit::parse("feat!: redesign");
        assert_eq!(commit.scope, None);
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_parse_non_conventional() {
        let commit = ParsedCommit::parse("Random commit message");
        assert_eq!(commit.r#type, "chore");
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_parse_breaking_change_footer() {
        let commit = ParsedCommit::parse("fix: something\n\nBREAKING CHANGE: desc");
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            classify(["feat: a", "fix(core)!: b", "fix: c"]),
            Some(VersionBump::Major)
        );
        assert_eq!(classify(["fix: a", "feat: b"]), Some(VersionBump::Minor));
        assert_eq!(
            classify(["docs: readme", "Fixed things"]),
            Some(VersionBump::Patch)
        );
    }

    #[test]
    fn test_classify_nothing() {
        assert_eq!(classify(std::iter::empty()), None);
    }
}
