use recap_core::RecapError;

#[test]
fn error_variants_render() {
    let errors = vec![
        RecapError::InvalidBudget("test".into()),
        RecapError::Transient("test".into()),
        RecapError::NonRetryable("test".into()),
        RecapError::Precondition("test".into()),
        RecapError::Cache("test".into()),
        RecapError::Config("test".into()),
        RecapError::Parsing("test".into()),
    ];
    for err in &errors {
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn call_failed_reports_attempts_and_cause() {
    let err = RecapError::CallFailed {
        attempts: 3,
        cause: "rate limited".into(),
    };
    let rendered = err.to_string();
    assert!(rendered.contains('3'));
    assert!(rendered.contains("rate limited"));
}
