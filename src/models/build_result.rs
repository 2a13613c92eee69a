/// Outcome of one compiler run, as classified from its text output.
///
/// Constructed only from the classified line sequences, so `success` always
/// equals "no error lines". Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    success: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl BuildResult {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// One-line console summary of the build
    pub fn summary(&self) -> String {
        if !self.success {
            format!(
                "Build failed with {} errors and {} warnings.",
                self.errors.len(),
                self.warnings.len()
            )
        } else if !self.warnings.is_empty() {
            format!("Build completed with {} warnings.", self.warnings.len())
        } else {
            "Build completed successfully with 0 errors and 0 warnings.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_tracks_errors() {
        let clean = BuildResult::new(vec![], vec!["warning: unused".to_string()]);
        assert!(clean.success());

        let failed = BuildResult::new(vec!["error 017".to_string()], vec![]);
        assert!(!failed.success());
    }

    #[test]
    fn test_summary() {
        let failed = BuildResult::new(
            vec!["error 017: undefined symbol".to_string()],
            vec!["warning 203: symbol is never used".to_string()],
        );
        assert_eq!(failed.summary(), "Build failed with 1 errors and 1 warnings.");

        let warned = BuildResult::new(vec![], vec!["warning 219".to_string()]);
        assert_eq!(warned.summary(), "Build completed with 1 warnings.");

        let clean = BuildResult::new(vec![], vec![]);
        assert!(clean.summary().contains("0 errors and 0 warnings"));
    }
}
