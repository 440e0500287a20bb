use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AudiogramError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        AudiogramError::fetch("x")
            .to_string()
            .contains("fetch error:")
    );
    assert!(
        AudiogramError::measure("x")
            .to_string()
            .contains("measure error:")
    );
    assert!(
        AudiogramError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        AudiogramError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn parse_error_reports_line() {
    let err = AudiogramError::parse(7, "missing timing line");
    assert_eq!(
        err.to_string(),
        "parse error at line 7: missing timing line"
    );
    assert!(matches!(err, AudiogramError::Parse { line: 7, .. }));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AudiogramError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
