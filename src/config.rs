use crate::domain::{BranchPattern, BranchRule, BumpStrategy, PatternSyntax};
use crate::engine::anchor::AnchorRule;
use crate::engine::renderer::{CleanRule, OutputTemplate};
use crate::error::{FlexVersionError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "flexver.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".flexver.toml";

/// Represents the complete configuration document for git-flexver.
///
/// Holds the anchor rule, the ordered branch rules, output templates and
/// clean-output rules. Turn it into a [`RuleSet`] with [`Config::validate`]
/// before handing it to the engine.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_baseline")]
    pub baseline: String,

    #[serde(default = "default_strategy")]
    pub default_strategy: BumpStrategy,

    #[serde(default)]
    pub anchor: AnchorConfig,

    #[serde(default = "default_branches")]
    pub branches: Vec<BranchRuleConfig>,

    #[serde(default = "default_outputs")]
    pub outputs: Vec<OutputConfig>,

    #[serde(default)]
    pub clean_output: Vec<CleanOutputConfig>,
}

/// Which commits count as the version source
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    /// First commit carrying a tag that matches `pattern`
    Tag,
    /// First commit whose message matches `pattern`
    Message,
    /// First commit whose hash starts with `hash`
    Commit,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnchorConfig {
    pub kind: AnchorKind,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub hash: Option<String>,
}

/// Default tag pattern: `v1.2.3`, `V1.2.3` or `1.2.3`
fn default_tag_pattern() -> String {
    r"^[vV]?(?P<version>\d+\.\d+\.\d+)$".to_string()
}

impl Default for AnchorConfig {
    fn default() -> Self {
        AnchorConfig {
            kind: AnchorKind::Tag,
            pattern: Some(default_tag_pattern()),
            hash: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchRuleConfig {
    pub pattern: String,

    #[serde(default)]
    pub syntax: PatternSyntax,

    pub strategy: BumpStrategy,

    /// Matching is case-sensitive unless this is set
    #[serde(default)]
    pub case_insensitive: bool,

    #[serde(default)]
    pub label: Option<String>,
}

impl BranchRuleConfig {
    pub fn new(pattern: impl Into<String>, syntax: PatternSyntax, strategy: BumpStrategy) -> Self {
        BranchRuleConfig {
            pattern: pattern.into(),
            syntax,
            strategy,
            case_insensitive: false,
            label: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub name: String,
    pub template: String,
}

impl OutputConfig {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        OutputConfig {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// Defines how cleaning of an output should be performed.
///
/// A rule takes effect only when all three fields are non-blank; a
/// partially filled rule is ignored rather than rejected.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct CleanOutputConfig {
    /// Regex matching the characters to replace. Must not match the
    /// empty string.
    #[serde(default)]
    pub invalid_pattern: String,

    /// Regex matched against the whole output name
    #[serde(default)]
    pub output_match: String,

    /// Literal text substituted for every invalid match
    #[serde(default)]
    pub replacement: String,
}

impl CleanOutputConfig {
    pub fn is_configured(&self) -> bool {
        !self.invalid_pattern.trim().is_empty()
            && !self.output_match.trim().is_empty()
            && !self.replacement.trim().is_empty()
    }
}

fn default_baseline() -> String {
    "0.1.0".to_string()
}

fn default_strategy() -> BumpStrategy {
    BumpStrategy::Patch
}

fn default_branches() -> Vec<BranchRuleConfig> {
    vec![
        BranchRuleConfig::new("^(main|master)$", PatternSyntax::Regex, BumpStrategy::Patch),
        BranchRuleConfig::new("release/*", PatternSyntax::Glob, BumpStrategy::Minor),
        BranchRuleConfig::new("feature/**", PatternSyntax::Glob, BumpStrategy::Prerelease),
    ]
}

fn default_outputs() -> Vec<OutputConfig> {
    vec![
        OutputConfig::new("semver", "{semver}"),
        OutputConfig::new("informational", "{semver}+{count}.{short_sha}"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            baseline: default_baseline(),
            default_strategy: default_strategy(),
            anchor: AnchorConfig::default(),
            branches: default_branches(),
            outputs: default_outputs(),
            clean_output: Vec::new(),
        }
    }
}

/// Validated, compiled configuration handed to the engine.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub baseline: String,
    pub default_strategy: BumpStrategy,
    pub anchor: AnchorRule,
    pub branches: Vec<BranchRule>,
    pub outputs: Vec<OutputTemplate>,
    pub clean_rules: Vec<CleanRule>,
}

fn compile_regex(what: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| FlexVersionError::config(format!("invalid {} '{}': {}", what, pattern, e)))
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate the document and compile every pattern in it.
    ///
    /// Fails with `ConfigurationInvalid` on a malformed pattern, a duplicate
    /// output name, an incomplete anchor rule, or when more than one
    /// configured clean rule applies to the same output.
    pub fn validate(&self) -> Result<RuleSet> {
        let anchor = self.compile_anchor()?;

        let branches = self
            .branches
            .iter()
            .map(|rule| -> Result<BranchRule> {
                Ok(BranchRule {
                    pattern: BranchPattern::compile(
                        &rule.pattern,
                        rule.syntax,
                        rule.case_insensitive,
                    )?,
                    strategy: rule.strategy,
                    label: rule.label.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        let mut outputs = Vec::with_capacity(self.outputs.len());
        for output in &self.outputs {
            if output.name.trim().is_empty() {
                return Err(FlexVersionError::config("output name must not be blank"));
            }
            if !seen.insert(output.name.as_str()) {
                return Err(FlexVersionError::config(format!(
                    "duplicate output name '{}'",
                    output.name
                )));
            }
            outputs.push(OutputTemplate::new(&output.name, &output.template));
        }

        let mut clean_rules = Vec::new();
        for rule in self.clean_output.iter().filter(|r| r.is_configured()) {
            let invalid = compile_regex("clean-output pattern", &rule.invalid_pattern)?;
            // The replacement would land between every character
            if invalid.is_match("") {
                return Err(FlexVersionError::config(format!(
                    "clean-output pattern '{}' matches the empty string",
                    rule.invalid_pattern
                )));
            }
            clean_rules.push(CleanRule {
                invalid,
                output_match: compile_regex(
                    "clean-output match",
                    &format!("^(?:{})$", rule.output_match),
                )?,
                output_match_source: rule.output_match.clone(),
                replacement: rule.replacement.clone(),
            });
        }

        for output in &outputs {
            let applicable: Vec<&str> = clean_rules
                .iter()
                .filter(|rule| rule.applies_to(&output.name))
                .map(|rule| rule.output_match_source.as_str())
                .collect();
            if applicable.len() > 1 {
                return Err(FlexVersionError::config(format!(
                    "output '{}' is governed by more than one clean-output rule ({})",
                    output.name,
                    applicable.join(", ")
                )));
            }
        }

        debug!(
            branches = branches.len(),
            outputs = outputs.len(),
            clean_rules = clean_rules.len(),
            "configuration validated"
        );

        Ok(RuleSet {
            baseline: self.baseline.clone(),
            default_strategy: self.default_strategy,
            anchor,
            branches,
            outputs,
            clean_rules,
        })
    }

    fn compile_anchor(&self) -> Result<AnchorRule> {
        let required_pattern = || {
            self.anchor
                .pattern
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| {
                    FlexVersionError::config(format!(
                        "anchor kind '{:?}' requires a pattern",
                        self.anchor.kind
                    ))
                })
        };

        match self.anchor.kind {
            AnchorKind::Tag => Ok(AnchorRule::Tag(compile_regex(
                "anchor pattern",
                required_pattern()?,
            )?)),
            AnchorKind::Message => Ok(AnchorRule::Message(compile_regex(
                "anchor pattern",
                required_pattern()?,
            )?)),
            AnchorKind::Commit => {
                let hash = self
                    .anchor
                    .hash
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .ok_or_else(|| FlexVersionError::config("anchor kind 'commit' requires a hash"))?;
                Ok(AnchorRule::Commit(hash.to_lowercase()))
            }
        }
    }
}

/// Locate the configuration file to use, if any.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `flexver.toml` in the current directory
/// 3. `.flexver.toml` in the user config directory
pub fn find_config_file(config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file was found but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match find_config_file(config_path) {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            let text = fs::read_to_string(&path)?;
            Config::from_toml_str(&text)
        }
        None => {
            debug!("no configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let rules = Config::default().validate().unwrap();
        assert_eq!(rules.branches.len(), 3);
        assert_eq!(rules.outputs[0].name, "semver");
        assert!(rules.clean_rules.is_empty());
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let mut config = Config::default();
        config.outputs.push(OutputConfig::new("semver", "{major}"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate output name 'semver'"));
    }

    #[test]
    fn test_malformed_branch_pattern_rejected() {
        let mut config = Config::default();
        config.branches.push(BranchRuleConfig::new(
            "hotfix/[",
            PatternSyntax::Regex,
            BumpStrategy::Patch,
        ));
        assert!(matches!(
            config.validate(),
            Err(FlexVersionError::ConfigurationInvalid(_))
        ));
    }

    #[test]
    fn test_partial_clean_rule_is_ignored() {
        let mut config = Config::default();
        config.clean_output.push(CleanOutputConfig {
            invalid_pattern: "[".to_string(),
            output_match: "semver".to_string(),
            replacement: "  ".to_string(),
        });
        let rules = config.validate().unwrap();
        assert!(rules.clean_rules.is_empty());
    }

    #[test]
    fn test_overlapping_clean_rules_rejected() {
        let mut config = Config::default();
        for output_match in ["semver", "sem.*"] {
            config.clean_output.push(CleanOutputConfig {
                invalid_pattern: "[^0-9.]".to_string(),
                output_match: output_match.to_string(),
                replacement: "-".to_string(),
            });
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than one clean-output rule"));
    }

    #[test]
    fn test_empty_matching_clean_pattern_rejected() {
        for pattern in ["x*", "a?", "(?:)"] {
            let mut config = Config::default();
            config.clean_output.push(CleanOutputConfig {
                invalid_pattern: pattern.to_string(),
                output_match: "semver".to_string(),
                replacement: "-".to_string(),
            });
            let err = config.validate().unwrap_err();
            assert!(
                err.to_string().contains("matches the empty string"),
                "expected '{}' to be rejected, got: {}",
                pattern,
                err
            );
        }
    }

    #[test]
    fn test_anchor_message_requires_pattern() {
        let mut config = Config::default();
        config.anchor = AnchorConfig {
            kind: AnchorKind::Message,
            pattern: None,
            hash: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_anchor_commit_requires_hash() {
        let mut config = Config::default();
        config.anchor = AnchorConfig {
            kind: AnchorKind::Commit,
            pattern: None,
            hash: Some("  ".to_string()),
        };
        assert!(config.validate().is_err());
    }
}
