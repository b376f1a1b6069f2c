//! Deletion outcomes and the final summary.

use std::fmt::Write as _;

use console::style;

use crate::api::Identity;

/// Result of one deletion attempt. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub repository: String,
    pub succeeded: bool,
    pub error: Option<String>,
}

impl DeletionOutcome {
    pub fn success(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            succeeded: true,
            error: None,
        }
    }

    pub fn failure(repository: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            succeeded: false,
            error: Some(error.into()),
        }
    }
}

/// Ordered log of deletion outcomes for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    outcomes: Vec<DeletionOutcome>,
}

impl DeletionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: DeletionOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[DeletionOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded).count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Render the end-of-run summary.
    pub fn render(&self, identity: &Identity) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", style("Deletion Complete!").magenta().bold());

        if self.outcomes.is_empty() {
            let _ = writeln!(out, "{}", style("No repositories were deleted.").cyan());
            return out;
        }

        let _ = writeln!(out, "{}", style(format!("User: {}", identity.login)).cyan());
        let _ = writeln!(out, "{}", style("Deletion Results:").cyan());
        for outcome in &self.outcomes {
            if outcome.succeeded {
                let _ = writeln!(out, "  ✅ {} - Successfully deleted", outcome.repository);
            } else {
                let _ = writeln!(
                    out,
                    "  ❌ {} - Failed: {}",
                    outcome.repository,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            style(format!(
                "✅ Successfully deleted: {} repositories",
                self.success_count()
            ))
            .green()
            .bold()
        );
        if self.has_failures() {
            let _ = writeln!(
                out,
                "{}",
                style(format!(
                    "❌ Failed to delete: {} repositories",
                    self.failure_count()
                ))
                .red()
                .bold()
            );
        }
        out
    }
}
