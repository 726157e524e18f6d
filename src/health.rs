//! `:checkhealth` output analysis
//!
//! Pasted health-check text is scanned line by line. Section headers set the
//! category for the lines below them; lines carrying an ERROR, WARNING or OK
//! marker become [`HealthIssue`]s, with a suggested fix for the common
//! failures.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Category used before the first section header
pub const GENERAL: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Ok,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Ok];

    fn marker(self) -> &'static Regex {
        match self {
            Severity::Error => error_regex(),
            Severity::Warning => warning_regex(),
            Severity::Ok => ok_regex(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Ok => "ok",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthIssue {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub suggestion: Option<String>,
}

// ============================================================================
// Patterns
// ============================================================================

static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
static ERROR_REGEX: OnceLock<Regex> = OnceLock::new();
static WARNING_REGEX: OnceLock<Regex> = OnceLock::new();
static OK_REGEX: OnceLock<Regex> = OnceLock::new();
static LEAD_REGEX: OnceLock<Regex> = OnceLock::new();
static TOOL_REGEX: OnceLock<Regex> = OnceLock::new();

/// `health#nvim#check` style or `## section` headers
fn header_regex() -> &'static Regex {
    HEADER_REGEX.get_or_init(|| {
        Regex::new(r"^(?:.*health#|#{2,})\s*(.*?)[\s#]*$")
            .expect("Failed to compile header regex")
    })
}

fn error_regex() -> &'static Regex {
    ERROR_REGEX.get_or_init(|| {
        Regex::new(r"(?:[✗❌]\s*)?\bERROR\b:?|[✗❌]").expect("Failed to compile error regex")
    })
}

fn warning_regex() -> &'static Regex {
    WARNING_REGEX.get_or_init(|| {
        Regex::new(r"(?:⚠\u{FE0F}?\s*)?\bWARNING\b:?|⚠\u{FE0F}?")
            .expect("Failed to compile warning regex")
    })
}

fn ok_regex() -> &'static Regex {
    OK_REGEX.get_or_init(|| {
        Regex::new(r"(?:[✓✅]\s*)?\bOK\b:?|✓").expect("Failed to compile ok regex")
    })
}

/// List bullets and status emoji left in front of the message
fn lead_regex() -> &'static Regex {
    LEAD_REGEX.get_or_init(|| {
        Regex::new(r"^[\s\-*•❌✅\u{FE0F}]*").expect("Failed to compile lead regex")
    })
}

/// First backquoted name, as in ``executable not found: `rg` ``
fn tool_regex() -> &'static Regex {
    TOOL_REGEX.get_or_init(|| Regex::new(r"`([^`]+)`").expect("Failed to compile tool regex"))
}

// ============================================================================
// Analysis
// ============================================================================

/// Classify every marked line of a health-check report
pub fn analyze(text: &str) -> Vec<HealthIssue> {
    let mut issues = Vec::new();
    let mut category = GENERAL.to_string();

    for line in text.lines() {
        let line = line.trim();

        if line.contains("health#") || line.starts_with("##") {
            category = header_regex()
                .captures(line)
                .map(|caps| caps[1].trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| GENERAL.to_string());
            continue;
        }

        let Some(severity) = Severity::ALL
            .into_iter()
            .find(|severity| severity.marker().is_match(line))
        else {
            continue;
        };

        let stripped = severity.marker().replacen(line, 1, "");
        let message = lead_regex().replace(stripped.trim(), "").trim().to_string();
        if message.is_empty() {
            continue;
        }

        let suggestion = match severity {
            Severity::Error => error_suggestion(&message),
            Severity::Warning => warning_suggestion(&message),
            Severity::Ok => None,
        };

        issues.push(HealthIssue {
            severity,
            category: category.clone(),
            message,
            suggestion,
        });
    }

    tracing::debug!("Analyzed health report: {} issues", issues.len());
    issues
}

fn error_suggestion(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    let provider = |name: &str| lower.contains(name) && lower.contains("provider");

    let suggestion = if lower.contains("executable not found") || lower.contains("not installed") {
        let tool = tool_regex()
            .captures(message)
            .map(|caps| caps[1].to_string())
            .unwrap_or_else(|| "the tool".to_string());
        format!("Install {} using your package manager or from its official website", tool)
    } else if provider("python") {
        "Install the pynvim package: pip install pynvim".to_string()
    } else if provider("ruby") {
        "Install the neovim gem: gem install neovim".to_string()
    } else if provider("node") {
        "Install the neovim npm package: npm install -g neovim".to_string()
    } else if lower.contains("clipboard") {
        "Install a clipboard tool such as xclip or wl-clipboard (Linux) or use pbcopy (macOS)"
            .to_string()
    } else {
        return None;
    };
    Some(suggestion)
}

fn warning_suggestion(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    if lower.contains("version") {
        Some("Update to the latest version for better compatibility".to_string())
    } else if lower.contains("config") {
        Some("Review your configuration for deprecated or incorrect settings".to_string())
    } else {
        None
    }
}

/// Number of issues with the given severity
pub fn count(issues: &[HealthIssue], severity: Severity) -> usize {
    issues.iter().filter(|issue| issue.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
health#nvim#check
========================================================================
## Configuration
  - OK: no issues found

## Performance
  - OK: Build type: Release

health#provider#check
========================================================================
## Clipboard (optional)
  - WARNING: No clipboard tool found. Clipboard registers will not work.
  - ERROR: clipboard: No clipboard tool found

## Python 3 provider (optional)
  - ERROR: No Python executable found that can `import neovim`. python provider disabled.

## Node.js provider (optional)
  - WARNING: Node.js version 14.0 is outdated
  - ERROR: Missing \"neovim\" npm package. node provider disabled.

## telescope
  - ERROR: executable not found: `rg`
";

    #[test]
    fn test_classifies_each_marked_line() {
        let issues = analyze(REPORT);
        assert_eq!(count(&issues, Severity::Ok), 2);
        assert_eq!(count(&issues, Severity::Warning), 2);
        assert_eq!(count(&issues, Severity::Error), 4);
    }

    #[test]
    fn test_headers_set_category() {
        let issues = analyze(REPORT);
        assert_eq!(issues[0].category, "Configuration");
        assert_eq!(issues[0].message, "no issues found");
        let rg = issues.last().unwrap();
        assert_eq!(rg.category, "telescope");
        assert_eq!(rg.message, "executable not found: `rg`");
    }

    #[test]
    fn test_lines_before_any_header_are_general() {
        let issues = analyze("- ERROR: something broke\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, GENERAL);
        assert_eq!(issues[0].suggestion, None);
    }

    #[test]
    fn test_bare_health_header_falls_back_to_general() {
        let issues = analyze("## x\nhealth#\n- OK fine\n");
        assert_eq!(issues[0].category, GENERAL);
    }

    #[test]
    fn test_error_suggestions() {
        let issues = analyze(REPORT);
        let suggestion = |needle: &str| {
            issues
                .iter()
                .find(|issue| issue.severity == Severity::Error && issue.message.contains(needle))
                .and_then(|issue| issue.suggestion.clone())
                .unwrap()
        };

        assert!(suggestion("executable not found").starts_with("Install rg "));
        assert!(suggestion("python provider").contains("pip install pynvim"));
        assert!(suggestion("node provider").contains("npm install -g neovim"));
        assert!(suggestion("clipboard").contains("xclip"));

        let issues = analyze("ERROR: ruby provider not found\n");
        assert!(issues[0].suggestion.as_deref().unwrap().contains("gem install neovim"));

        let issues = analyze("✗ fd is not installed\n");
        assert_eq!(issues[0].message, "fd is not installed");
        assert!(issues[0].suggestion.as_deref().unwrap().starts_with("Install the tool "));
    }

    #[test]
    fn test_warning_suggestions() {
        let issues = analyze("⚠ outdated version of tree-sitter\n⚠ check your config\n⚠ slow startup\n");
        assert!(issues[0].suggestion.as_deref().unwrap().contains("latest version"));
        assert!(issues[1].suggestion.as_deref().unwrap().contains("configuration"));
        assert_eq!(issues[2].suggestion, None);
        assert_eq!(issues[2].message, "slow startup");
    }

    #[test]
    fn test_emoji_markers_and_bullets_are_stripped() {
        let issues = analyze("- ✅ OK Neovim version 0.10\n- ❌ ERROR Failed to run healthcheck\n");
        assert_eq!(issues[0].severity, Severity::Ok);
        assert_eq!(issues[0].message, "Neovim version 0.10");
        assert_eq!(issues[1].severity, Severity::Error);
        assert_eq!(issues[1].message, "Failed to run healthcheck");
    }

    #[test]
    fn test_error_marker_wins_over_ok() {
        let issues = analyze("ERROR: OK button missing\n");
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].message, "OK button missing");
    }

    #[test]
    fn test_unmarked_and_empty_lines_are_skipped() {
        assert!(analyze("").is_empty());
        assert!(analyze("plain text\n  - INFO: nothing\nLOOKUP table\n").is_empty());
        assert!(analyze("- OK:\n").is_empty());
    }
}
