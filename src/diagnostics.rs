// ABOUTME: Diagnostics accumulator for non-fatal warnings during a pipeline run.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be shown to users.

/// Collects non-fatal warnings during a run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a warning for an unset credential variable.
    pub fn missing_credential(var: &str) -> Self {
        Self {
            kind: WarningKind::MissingCredential,
            message: format!("{var} not set"),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// A deploy credential variable was absent; deployment is still attempted.
    MissingCredential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_starts_empty() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn diagnostics_collects_warnings() {
        let mut diag = Diagnostics::default();

        diag.warn(Warning::missing_credential("CLOUDFLARE_API_TOKEN"));
        diag.warn(Warning::missing_credential("CLOUDFLARE_ACCOUNT_ID"));

        assert!(diag.has_warnings());
        assert_eq!(diag.warnings().len(), 2);
        assert_eq!(diag.into_warnings()[1].message, "CLOUDFLARE_ACCOUNT_ID not set");
    }

    #[test]
    fn missing_credential_sets_kind() {
        let warning = Warning::missing_credential("CLOUDFLARE_API_TOKEN");
        assert_eq!(warning.kind, WarningKind::MissingCredential);
    }
}
