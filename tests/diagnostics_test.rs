use git_flexver::Diagnostic;

// ============================================================================
// Diagnostic Display Tests
// ============================================================================

#[test]
fn test_anchor_assumed_display() {
    let diagnostic = Diagnostic::AnchorAssumed {
        hash: "abc1234def5678".to_string(),
    };

    let display_msg = diagnostic.to_string();
    assert!(
        display_msg.contains("No version source found"),
        "Message should mention the missing version source, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("abc1234") && !display_msg.contains("abc1234d"),
        "Message should contain shortened commit hash 'abc1234', got: {}",
        display_msg
    );
}

#[test]
fn test_unmatched_placeholder_display() {
    let diagnostic = Diagnostic::UnmatchedPlaceholder {
        template: "docker".to_string(),
        token: "build_id".to_string(),
    };

    let display_msg = diagnostic.to_string();
    assert!(
        display_msg.contains("{build_id}"),
        "Message should contain the token in braces, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("docker"),
        "Message should contain the output name, got: {}",
        display_msg
    );
}

#[test]
fn test_short_hash_shorter_than_abbreviation() {
    let diagnostic = Diagnostic::AnchorAssumed {
        hash: "abc".to_string(),
    };
    assert!(diagnostic.to_string().ends_with("abc"));
}
