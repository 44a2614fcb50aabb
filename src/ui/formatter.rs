//! Pure formatting functions for console output.
//!
//! Rendered outputs go to stdout so they can be captured by build scripts;
//! everything meant for a human goes to stderr.

use crate::diagnostics::Diagnostic;
use crate::domain::commit::short_hash;
use crate::engine::{RenderedOutput, ResolvedVersion};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal diagnostic as a warning.
pub fn display_diagnostic(diagnostic: &Diagnostic) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), diagnostic);
}

/// Display how the version was derived.
///
/// # Arguments
/// * `version` - The resolved version
/// * `branch_name` - The branch the version was resolved for
pub fn display_resolution_summary(version: &ResolvedVersion, branch_name: &str) {
    let anchor = short_hash(&version.anchor_hash);
    let anchor = if version.anchor_assumed {
        format!("{} (assumed)", anchor)
    } else {
        anchor.to_string()
    };

    eprintln!(
        "{} {} on '{}' via {} ({} commits since {})",
        style("✓").green(),
        style(version.semver()).bold(),
        branch_name,
        version.strategy,
        version.commits_since_anchor,
        anchor
    );
}

/// Format outputs as lines: the bare value when a single output was
/// explicitly selected, `name=value` otherwise.
pub fn format_outputs(outputs: &[&RenderedOutput], explicit: bool) -> Vec<String> {
    match outputs {
        [single] if explicit => vec![single.value.clone()],
        many => many
            .iter()
            .map(|o| format!("{}={}", o.name, o.value))
            .collect(),
    }
}

/// Format outputs as a JSON object, keys in declared order.
pub fn format_json(outputs: &[&RenderedOutput]) -> serde_json::Result<String> {
    let object: serde_json::Map<String, serde_json::Value> = outputs
        .iter()
        .map(|o| (o.name.clone(), serde_json::Value::String(o.value.clone())))
        .collect();
    serde_json::to_string_pretty(&object)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(name: &str, value: &str) -> RenderedOutput {
        RenderedOutput {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_format_selected_single_output_is_bare() {
        let a = output("semver", "1.2.3");
        assert_eq!(format_outputs(&[&a], true), vec!["1.2.3".to_string()]);
    }

    #[test]
    fn test_format_sole_declared_output_keeps_name() {
        let a = output("semver", "1.2.3");
        assert_eq!(format_outputs(&[&a], false), vec!["semver=1.2.3".to_string()]);
    }

    #[test]
    fn test_format_many_outputs() {
        let a = output("semver", "1.2.3");
        let b = output("docker", "1.2.3-foo");
        assert_eq!(
            format_outputs(&[&a, &b], true),
            vec!["semver=1.2.3".to_string(), "docker=1.2.3-foo".to_string()]
        );
    }

    #[test]
    fn test_format_json_keeps_order() {
        let a = output("zeta", "1");
        let b = output("alpha", "2");
        let json = format_json(&[&a, &b]).unwrap();
        let zeta = json.find("zeta").unwrap();
        let alpha = json.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }
}
