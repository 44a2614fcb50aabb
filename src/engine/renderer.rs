//! Output rendering: placeholder substitution followed by optional cleaning.

use crate::diagnostics::Diagnostic;
use crate::domain::commit::short_hash;
use crate::domain::RepositoryContext;
use crate::engine::calculator::ResolvedVersion;
use crate::error::Result;
use chrono::SecondsFormat;
use regex::{NoExpand, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A named output and the template it is rendered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    pub name: String,
    pub template: String,
}

impl OutputTemplate {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        OutputTemplate {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// A fully configured clean-output rule
#[derive(Debug, Clone)]
pub struct CleanRule {
    pub invalid: Regex,
    /// Anchored expression selecting the outputs this rule governs
    pub output_match: Regex,
    pub output_match_source: String,
    pub replacement: String,
}

impl CleanRule {
    pub fn applies_to(&self, output_name: &str) -> bool {
        self.output_match.is_match(output_name)
    }

    /// Replace every invalid match, leftmost-first and non-overlapping.
    /// The replacement is literal; `$` is not a group reference.
    pub fn clean(&self, text: &str) -> String {
        self.invalid
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned()
    }
}

/// One rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub name: String,
    pub value: String,
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex")
    })
}

/// Values available to templates, keyed by placeholder name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: BTreeMap<&'static str, String>,
}

impl Placeholders {
    /// Values derived from the repository alone (usable in pre-release labels)
    pub fn from_context(
        ctx: &RepositoryContext<'_>,
        anchor_hash: &str,
        commits_since_anchor: usize,
    ) -> Result<Self> {
        let head = ctx.head()?;
        let mut values = BTreeMap::new();

        values.insert("branch", ctx.branch_name.clone());
        values.insert("short_branch", ctx.short_branch_name().to_string());
        values.insert("count", commits_since_anchor.to_string());
        values.insert("sha", head.hash.clone());
        values.insert("short_sha", head.short_hash().to_string());
        values.insert("anchor_sha", short_hash(anchor_hash).to_string());
        values.insert("author", head.author.clone());
        values.insert(
            "date",
            head.date.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        values.insert("path", ctx.path.clone());

        Ok(Placeholders { values })
    }

    /// Add the version components of a resolved version
    pub fn with_version(mut self, resolved: &ResolvedVersion) -> Self {
        self.values.insert("major", resolved.version.major.to_string());
        self.values.insert("minor", resolved.version.minor.to_string());
        self.values.insert("patch", resolved.version.patch.to_string());
        self.values.insert(
            "prerelease",
            resolved.pre_release.clone().unwrap_or_default(),
        );
        self.values.insert("semver", resolved.semver());
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    /// Substitute every known `{token}` in `template`.
    ///
    /// Unknown tokens stay verbatim and are reported, once each, under
    /// `template_name`.
    pub fn substitute(
        &self,
        template_name: &str,
        template: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> String {
        let regex = placeholder_regex();
        let mut out = String::with_capacity(template.len());
        let mut last = 0;
        let mut unknown: Vec<&str> = Vec::new();

        for captures in regex.captures_iter(template) {
            let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            out.push_str(&template[last..whole.start()]);
            match self.get(token.as_str()) {
                Some(value) => out.push_str(value),
                None => {
                    out.push_str(whole.as_str());
                    if !unknown.contains(&token.as_str()) {
                        unknown.push(token.as_str());
                    }
                }
            }
            last = whole.end();
        }
        out.push_str(&template[last..]);

        diagnostics.extend(unknown.into_iter().map(|token| {
            Diagnostic::UnmatchedPlaceholder {
                template: template_name.to_string(),
                token: token.to_string(),
            }
        }));

        out
    }
}

/// Render every output template, in declared order, and clean the results
/// with the clean-output rule governing each output (if any).
pub fn render_outputs(
    resolved: &ResolvedVersion,
    ctx: &RepositoryContext<'_>,
    outputs: &[OutputTemplate],
    clean_rules: &[CleanRule],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<RenderedOutput>> {
    let placeholders =
        Placeholders::from_context(ctx, &resolved.anchor_hash, resolved.commits_since_anchor)?
            .with_version(resolved);

    Ok(outputs
        .iter()
        .map(|output| {
            let rendered = placeholders.substitute(&output.name, &output.template, diagnostics);
            let value = match clean_rules.iter().find(|rule| rule.applies_to(&output.name)) {
                Some(rule) => rule.clean(&rendered),
                None => rendered,
            };
            RenderedOutput {
                name: output.name.clone(),
                value,
            }
        })
        .collect())
}
