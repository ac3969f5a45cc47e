use gdlog_core::errors::{DiagError, DiagErrorKind};
use gdlog_core::{context_scope, get_active_logger, LoggerId, Severity};

#[test]
fn test_no_active_logger_verifiable_by_kind() {
    let err = get_active_logger().unwrap_err();

    assert_eq!(err.kind(), DiagErrorKind::NoActiveLogger);
    assert_eq!(err.code(), "ERR_NO_ACTIVE_LOGGER");
    assert!(err.to_string().contains("no active logger"));
}

#[test]
fn test_context_scope_without_logger_reports_kind() {
    let err = context_scope("anything").unwrap_err();
    assert_eq!(err.kind(), DiagErrorKind::NoActiveLogger);
}

#[test]
fn test_unknown_severity_from_parse() {
    let err: DiagError = "verbose".parse::<Severity>().unwrap_err().into();

    assert_eq!(err.kind(), DiagErrorKind::UnknownSeverity);
    assert_eq!(err.code(), "ERR_UNKNOWN_SEVERITY");
    assert_eq!(err.to_string(), "unknown severity 'verbose'");
}

#[test]
fn test_context_out_of_order_message() {
    let err = DiagError::ContextOutOfOrder {
        expected: "a".to_string(),
        found: "a, b".to_string(),
    };

    assert_eq!(err.code(), "ERR_CONTEXT_OUT_OF_ORDER");
    assert!(err.to_string().contains("expected 'a', found 'a, b'"));
}

#[test]
fn test_out_of_order_release_without_top() {
    let err = DiagError::OutOfOrderRelease {
        logger_id: LoggerId::next(),
        top: None,
    };

    assert_eq!(err.kind(), DiagErrorKind::OutOfOrderRelease);
    assert!(err.to_string().ends_with("(top was none)"));
}
