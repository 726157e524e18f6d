//! Health report analysis against the sample in `samples/`

use std::path::PathBuf;

use nvim_wizard::health::{analyze, count, Severity, GENERAL};

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples").join(name)
}

#[test]
fn test_sample_report_counts() {
    let text = std::fs::read_to_string(sample("checkhealth.txt")).expect("read sample report");
    let issues = analyze(&text);

    assert_eq!(count(&issues, Severity::Error), 2);
    assert_eq!(count(&issues, Severity::Warning), 3);
    assert_eq!(count(&issues, Severity::Ok), 2);
}

#[test]
fn test_sample_report_suggestions() {
    let text = std::fs::read_to_string(sample("checkhealth.txt")).expect("read sample report");
    let issues = analyze(&text);

    let python = issues
        .iter()
        .find(|issue| issue.severity == Severity::Error && issue.message.starts_with("Python"))
        .expect("python provider error");
    assert_eq!(python.category, GENERAL);
    assert!(python.suggestion.as_deref().unwrap().contains("pynvim"));

    let rg = issues
        .iter()
        .find(|issue| issue.message.starts_with("rg:"))
        .expect("missing executable error");
    assert_eq!(rg.category, "Checking external dependencies");
    assert!(rg.suggestion.as_deref().unwrap().starts_with("Install ripgrep "));

    let fzf = issues
        .iter()
        .find(|issue| issue.message.contains("fzf"))
        .expect("config warning");
    assert_eq!(fzf.severity, Severity::Warning);
    assert_eq!(fzf.category, "===== Installed extensions =====");
    assert!(fzf.suggestion.as_deref().unwrap().contains("configuration"));
}
