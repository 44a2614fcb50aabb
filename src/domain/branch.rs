use crate::domain::strategy::BumpStrategy;
use crate::error::{FlexVersionError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Syntax a branch pattern is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSyntax {
    /// Regular expression, unanchored unless the pattern anchors itself
    #[default]
    Regex,
    /// Shell-style glob over the whole name: `*` stays within one path
    /// segment, `**` crosses segments, `?` is one non-`/` character
    Glob,
}

/// Compiled branch-name pattern
#[derive(Debug, Clone)]
pub struct BranchPattern {
    pub source: String,
    pub syntax: PatternSyntax,
    regex: Regex,
}

impl BranchPattern {
    /// Compile a pattern; a malformed pattern is a configuration error
    pub fn compile(source: &str, syntax: PatternSyntax, case_insensitive: bool) -> Result<Self> {
        let expression = match syntax {
            PatternSyntax::Regex => source.to_string(),
            PatternSyntax::Glob => glob_to_regex(source),
        };

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| {
                FlexVersionError::config(format!("invalid branch pattern '{}': {}", source, e))
            })?;

        Ok(BranchPattern {
            source: source.to_string(),
            syntax,
            regex,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len() + 8);
    out.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                out.push_str(".*");
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
        }
    }

    out.push('$');
    out
}

/// One entry of the ordered branch rule list
#[derive(Debug, Clone)]
pub struct BranchRule {
    pub pattern: BranchPattern,
    pub strategy: BumpStrategy,
    /// Template for the pre-release label, used by `prerelease`
    pub label: Option<String>,
}

impl BranchRule {
    /// Whether the rule applies to either the full or the short branch name
    pub fn matches(&self, branch_name: &str, short_name: &str) -> bool {
        self.pattern.matches(branch_name) || self.pattern.matches(short_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_single_segment() {
        let p = BranchPattern::compile("release/*", PatternSyntax::Glob, false).unwrap();
        assert!(p.matches("release/2.0"));
        assert!(!p.matches("release/2.0/hotfix"));
        assert!(!p.matches("prerelease/2.0"));
    }

    #[test]
    fn test_glob_double_star() {
        let p = BranchPattern::compile("feature/**", PatternSyntax::Glob, false).unwrap();
        assert!(p.matches("feature/a/b"));
    }

    #[test]
    fn test_glob_escapes_regex_metacharacters() {
        let p = BranchPattern::compile("v1.0", PatternSyntax::Glob, false).unwrap();
        assert!(p.matches("v1.0"));
        assert!(!p.matches("v1x0"));
    }

    #[test]
    fn test_regex_is_case_sensitive_by_default() {
        let p = BranchPattern::compile("^main$", PatternSyntax::Regex, false).unwrap();
        assert!(p.matches("main"));
        assert!(!p.matches("Main"));
    }

    #[test]
    fn test_case_insensitive() {
        let p = BranchPattern::compile("^main$", PatternSyntax::Regex, true).unwrap();
        assert!(p.matches("MAIN"));
    }

    #[test]
    fn test_malformed_pattern_is_config_error() {
        let err = BranchPattern::compile("feature/(", PatternSyntax::Regex, false).unwrap_err();
        assert!(matches!(err, FlexVersionError::ConfigurationInvalid(_)));
    }

    #[test]
    fn test_rule_matches_short_name() {
        let rule = BranchRule {
            pattern: BranchPattern::compile("^foo$", PatternSyntax::Regex, false).unwrap(),
            strategy: BumpStrategy::Prerelease,
            label: None,
        };
        assert!(rule.matches("feature/foo", "foo"));
        assert!(!rule.matches("feature/bar", "bar"));
    }
}
