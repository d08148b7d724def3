//! Tests for log levels

use crate::level::Level;

// =============================================================================
// Severity table
// =============================================================================

#[test]
fn test_severity_keyword_table() {
    let expected = [
        (Level::Trace, "debug"),
        (Level::Debug, "debug"),
        (Level::Info, "info"),
        (Level::Warn, "warn"),
        (Level::Error, "err"),
        (Level::Fatal, "alert"),
        (Level::Panic, "emerg"),
    ];
    for (level, keyword) in expected {
        assert_eq!(level.severity_keyword(), keyword, "keyword for {level}");
    }
}

#[test]
fn test_severity_code_table() {
    let expected = [
        (Level::Trace, 7),
        (Level::Debug, 7),
        (Level::Info, 6),
        (Level::Warn, 4),
        (Level::Error, 3),
        (Level::Fatal, 1),
        (Level::Panic, 0),
    ];
    for (level, code) in expected {
        assert_eq!(level.severity_code(), code, "code for {level}");
    }
}

#[test]
fn test_trace_and_debug_collide() {
    assert_eq!(
        Level::Trace.severity_keyword(),
        Level::Debug.severity_keyword()
    );
    assert_eq!(Level::Trace.severity_code(), Level::Debug.severity_code());
}

#[test]
fn test_codes_decrease_with_severity() {
    for pair in Level::ALL.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(pair[0].severity_code() >= pair[1].severity_code());
    }
}

// =============================================================================
// Index and parsing
// =============================================================================

#[test]
fn test_index_matches_table_position() {
    for (position, level) in Level::ALL.into_iter().enumerate() {
        assert_eq!(level.index(), position);
    }
    assert_eq!(Level::ALL.len(), Level::COUNT);
}

#[test]
fn test_parse_levels() {
    assert_eq!("trace".parse::<Level>().unwrap(), Level::Trace);
    assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("Panic".parse::<Level>().unwrap(), Level::Panic);
}

#[test]
fn test_parse_unknown_level() {
    let err = "notice".parse::<Level>().unwrap_err();
    assert!(err.to_string().contains("notice"));
}

#[test]
fn test_display_and_default() {
    assert_eq!(Level::Warn.to_string(), "warn");
    assert_eq!(Level::default(), Level::Info);
}

#[test]
fn test_serde_lowercase() {
    let json = serde_json::to_string(&Level::Fatal).unwrap();
    assert_eq!(json, "\"fatal\"");
    let level: Level = serde_json::from_str("\"error\"").unwrap();
    assert_eq!(level, Level::Error);
}
