//! End-to-end tests for the policy-gated masking engine

use piiguard::masking::{
    AuditContext, LogCategory, MaskingConfig, MaskingEngine, MaskingLevel,
};
use std::fs;
use std::thread;
use tempfile::TempDir;

const MESSAGE: &str = "예약자 연락처 010-1234-5678, 메일 jane.doe@example.com, 여권 M12345678";

fn enabled_config() -> MaskingConfig {
    let mut config = MaskingConfig::default();
    config.policy.enabled = true;
    config
}

fn ctx() -> AuditContext {
    AuditContext::new("agent-42", "outbound chat")
}

#[test]
fn test_disabled_policy_passes_text_through() {
    let engine = MaskingEngine::new(MaskingConfig::default()).unwrap();

    let outcome = engine.process(MESSAGE, &ctx()).unwrap();
    assert!(!outcome.applied);
    assert_eq!(outcome.result.masked_text, MESSAGE);
    assert!(outcome.result.detections.is_empty());
    assert!(engine.audit_log().is_empty());
}

#[test]
fn test_enabled_policy_masks_and_records_each_detection() {
    let engine = MaskingEngine::new(enabled_config()).unwrap();

    let outcome = engine.process(MESSAGE, &ctx()).unwrap();
    assert!(outcome.applied);
    assert_eq!(
        outcome.result.masked_text,
        "예약자 연락처 010-****-5678, 메일 j***@example.com, 여권 M****5678"
    );

    let categories: Vec<LogCategory> = outcome
        .logged
        .iter()
        .map(|e| e.original_category())
        .collect();
    assert_eq!(
        categories,
        vec![LogCategory::Phone, LogCategory::Email, LogCategory::Passport]
    );

    // The log itself is newest first
    let latest = engine.audit_log().latest().unwrap();
    assert_eq!(latest.original_category(), LogCategory::Passport);
    assert_eq!(latest.masked_value(), "M****5678");
    assert_eq!(latest.agent_id(), "agent-42");
    assert_eq!(latest.context(), "outbound chat");
}

#[test]
fn test_toggling_policy_switches_behaviour() {
    let mut engine = MaskingEngine::new(MaskingConfig::default()).unwrap();
    assert!(!engine.process(MESSAGE, &ctx()).unwrap().applied);

    assert!(engine.policy_mut().toggle_enabled());
    assert!(engine.process(MESSAGE, &ctx()).unwrap().applied);

    assert!(!engine.policy_mut().toggle_enabled());
    assert!(!engine.process(MESSAGE, &ctx()).unwrap().applied);
}

#[test]
fn test_level_is_reported_but_does_not_change_masking() {
    let mut engine = MaskingEngine::new(enabled_config()).unwrap();
    let basic = engine.process(MESSAGE, &ctx()).unwrap();

    engine.policy_mut().set_level(MaskingLevel::Maximum);
    let maximum = engine.process(MESSAGE, &ctx()).unwrap();

    assert_eq!(maximum.level, MaskingLevel::Maximum);
    assert_eq!(basic.result.masked_text, maximum.result.masked_text);
}

#[test]
fn test_blank_agent_falls_back_to_default() {
    let mut config = enabled_config();
    config.audit.default_agent_id = "chatbot".to_string();
    let engine = MaskingEngine::new(config).unwrap();

    let outcome = engine
        .process("call 010-1234-5678", &AuditContext::new("  ", ""))
        .unwrap();
    assert_eq!(outcome.logged[0].agent_id(), "chatbot");
    assert_eq!(outcome.logged[0].context(), "");
}

#[test]
fn test_record_detections_off_keeps_log_empty() {
    let mut config = enabled_config();
    config.audit.record_detections = false;
    let engine = MaskingEngine::new(config).unwrap();

    let outcome = engine.process(MESSAGE, &ctx()).unwrap();
    assert_eq!(outcome.result.detections.len(), 3);
    assert!(outcome.logged.is_empty());
    assert!(engine.audit_log().is_empty());
}

#[test]
fn test_preview_never_logs() {
    let engine = MaskingEngine::new(MaskingConfig::default()).unwrap();
    let result = engine.preview(MESSAGE);
    assert_eq!(result.detections.len(), 3);
    assert!(engine.audit_log().is_empty());
}

#[test]
fn test_persisted_audit_log_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut config = enabled_config();
    config.audit.persist = true;
    config.audit.log_path = dir.path().join("masking.jsonl");

    let first_ids: Vec<_> = {
        let engine = MaskingEngine::new(config.clone()).unwrap();
        engine.process(MESSAGE, &ctx()).unwrap();
        engine.audit_log().entries().iter().map(|e| e.id()).collect()
    };
    assert_eq!(first_ids.len(), 3);

    let engine = MaskingEngine::new(config).unwrap();
    let restored: Vec<_> = engine.audit_log().entries().iter().map(|e| e.id()).collect();
    assert_eq!(restored, first_ids);

    engine.process("card 1234-5678-9012-3456", &ctx()).unwrap();
    assert_eq!(engine.audit_log().len(), 4);
    assert_eq!(
        engine.audit_log().latest().unwrap().original_category(),
        LogCategory::Card
    );

    // Raw values never reach the file
    let contents = fs::read_to_string(dir.path().join("masking.jsonl")).unwrap();
    assert!(!contents.contains("1234-5678-9012-3456"));
    assert!(!contents.contains("jane.doe"));
}

#[test]
fn test_prune_without_window_is_noop() {
    let engine = MaskingEngine::new(enabled_config()).unwrap();
    engine.process(MESSAGE, &ctx()).unwrap();
    assert_eq!(engine.prune_audit(None).unwrap(), 0);
    assert_eq!(engine.audit_log().len(), 3);
}

#[test]
fn test_pattern_library_from_config() {
    let dir = TempDir::new().unwrap();
    let library = dir.path().join("custom.toml");
    fs::write(
        &library,
        r#"
[patterns.no_passports]
category = "passport"
enabled = false
"#,
    )
    .unwrap();

    let mut config = enabled_config();
    config.pipeline.pattern_library = Some(library);
    let engine = MaskingEngine::new(config).unwrap();

    let outcome = engine.process(MESSAGE, &ctx()).unwrap();
    assert!(outcome.result.masked_text.ends_with("여권 M12345678"));
    assert_eq!(outcome.logged.len(), 2);
}

#[test]
fn test_missing_pattern_library_rejected() {
    let mut config = enabled_config();
    config.pipeline.pattern_library = Some("/nonexistent/patterns.toml".into());
    assert!(MaskingEngine::new(config).is_err());
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = MaskingEngine::new(enabled_config()).unwrap();

    thread::scope(|scope| {
        for worker in 0..4 {
            let engine = &engine;
            scope.spawn(move || {
                let ctx = AuditContext::new(format!("agent-{worker}"), "load");
                for _ in 0..10 {
                    engine.process("call 010-1234-5678", &ctx).unwrap();
                }
            });
        }
    });

    let entries = engine.audit_log().entries();
    assert_eq!(entries.len(), 40);
    for pair in entries.windows(2) {
        assert!(pair[0].timestamp() >= pair[1].timestamp());
    }
}
