use crate::models::BuildResult;
use regex::Regex;

/// Case-insensitive substrings that mark a compiler line as an error
pub const ERROR_TOKENS: &[&str] = &[
    "error",
    "fatal error",
    "undefined symbol",
    "cannot find",
    "not found",
];

/// Case-insensitive substrings that mark a compiler line as a warning
pub const WARNING_TOKENS: &[&str] = &["warning", "note", "suggestion"];

/// Sorts raw compiler output into error and warning lines.
///
/// pawncc has no structured diagnostics format, so lines are classified by
/// surface pattern only:
///
/// - `error_pattern`: any of [`ERROR_TOKENS`], case-insensitive
///   - Example match: "gm.pwn(12) : error 017: undefined symbol \"x\""
/// - `warning_pattern`: any of [`WARNING_TOKENS`], case-insensitive
///   - Example match: "gm.pwn(40) : warning 203: symbol is never used: \"y\""
///
/// Errors are checked first, so a line matching both sets is an error only.
/// Lines matching neither are dropped.
pub struct OutputClassifier {
    error_pattern: Regex,
    warning_pattern: Regex,
}

impl OutputClassifier {
    /// Create a classifier with compiled patterns
    pub fn new() -> Self {
        Self {
            error_pattern: token_pattern(ERROR_TOKENS).expect("Invalid error regex"),
            warning_pattern: token_pattern(WARNING_TOKENS).expect("Invalid warning regex"),
        }
    }

    /// Classify captured compiler output.
    ///
    /// `stdout` lines come before `stderr` lines in both result sequences.
    pub fn classify_streams(&self, stdout: &str, stderr: &str) -> BuildResult {
        self.classify(&format!("{stdout}\n{stderr}"))
    }

    /// Classify a combined output blob. Pure and total.
    pub fn classify(&self, output: &str) -> BuildResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for line in output.lines() {
            if self.error_pattern.is_match(line) {
                errors.push(line.trim().to_string());
            } else if self.warning_pattern.is_match(line) {
                warnings.push(line.trim().to_string());
            }
        }

        tracing::debug!(
            "Classified compiler output - errors: {}, warnings: {}",
            errors.len(),
            warnings.len()
        );

        BuildResult::new(errors, warnings)
    }
}

impl Default for OutputClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn token_pattern(tokens: &[&str]) -> Result<Regex, regex::Error> {
    let alternation: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
    Regex::new(&format!("(?i)({})", alternation.join("|")))
}
