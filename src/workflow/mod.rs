//! Selection workflow: list → select → double-confirm → delete sequentially.
//!
//! Each stage receives what it needs explicitly and hands an owned snapshot to
//! the next; nothing is kept in process-wide state.

pub mod prompt;

pub use prompt::{parse_selection, PlainPrompter, PromptError, Prompter};

#[cfg(feature = "cli")]
pub use prompt::TerminalPrompter;

use std::io::Write;
use std::time::Duration;

use crate::api::{Identity, Repository, RepositoryApi};
use crate::auth::AccessToken;
use crate::config::PurgeConfig;
use crate::error::{PurgeError, Result};
use crate::report::{DeletionOutcome, DeletionReport};
use crate::ui;

/// Phrase the user must type before anything is deleted.
pub const CONFIRMATION_PHRASE: &str = "delete";

/// Tunables for a workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub delete_delay: Duration,
    pub include_private: bool,
    pub confirmation_phrase: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self::from(&PurgeConfig::default())
    }
}

impl From<&PurgeConfig> for WorkflowSettings {
    fn from(config: &PurgeConfig) -> Self {
        Self {
            delete_delay: config.delete_delay,
            include_private: config.include_private,
            confirmation_phrase: CONFIRMATION_PHRASE.to_string(),
        }
    }
}

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The user picked nothing; no delete calls were made.
    NothingSelected,
    Completed(DeletionReport),
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub identity: Identity,
    pub outcome: RunOutcome,
}

impl RunSummary {
    /// 0 on success or empty selection, 2 when any deletion failed.
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            RunOutcome::Completed(report) if report.has_failures() => 2,
            _ => 0,
        }
    }
}

/// One purge run against a repository API, driven through a prompter.
pub struct PurgeWorkflow<'a, A: ?Sized, P: ?Sized> {
    api: &'a A,
    prompter: &'a mut P,
    settings: WorkflowSettings,
}

impl<'a, A, P> PurgeWorkflow<'a, A, P>
where
    A: RepositoryApi + ?Sized,
    P: Prompter + ?Sized,
{
    pub fn new(api: &'a A, prompter: &'a mut P, settings: WorkflowSettings) -> Self {
        Self {
            api,
            prompter,
            settings,
        }
    }

    /// Run every stage after authentication.
    pub async fn run(&mut self, token: &AccessToken) -> Result<RunSummary> {
        let identity = self.api.fetch_identity(token).await?;
        crate::success!("Authenticated as {}", identity.display());

        let repositories = self.load_repositories(token).await?;
        let selection = self.select(&repositories)?;
        if selection.is_empty() {
            crate::info!("No repositories selected for deletion.");
            return Ok(RunSummary {
                identity,
                outcome: RunOutcome::NothingSelected,
            });
        }

        self.confirm(&repositories, &selection)?;
        let report = self.delete_all(token, &selection).await;
        Ok(RunSummary {
            identity,
            outcome: RunOutcome::Completed(report),
        })
    }

    /// Fetch the full listing, applying the visibility filter.
    pub async fn load_repositories(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<Repository>> {
        crate::info!("Fetching your repositories...");
        let mut repositories = self.api.list_repositories(token).await?;
        if !self.settings.include_private {
            repositories.retain(|repo| !repo.is_private);
        }
        if repositories.is_empty() {
            return Err(PurgeError::NoResourcesFound);
        }
        crate::success!("Found {} repositories", repositories.len());
        Ok(repositories)
    }

    /// Ask which repositories to delete; returns full names in the order the
    /// prompter reported them.
    pub fn select(&mut self, repositories: &[Repository]) -> Result<Vec<String>> {
        let labels: Vec<String> = repositories.iter().map(Repository::label).collect();
        let prompt = format!(
            "Select repositories to DELETE. WARNING: selected repositories will be PERMANENTLY DELETED! ({} available)",
            repositories.len()
        );
        let picked = self.prompter.multi_select(&prompt, &labels)?;
        Ok(picked
            .into_iter()
            .filter_map(|index| repositories.get(index))
            .map(|repo| repo.full_name.clone())
            .collect())
    }

    /// Yes/no confirmation naming the count, then the typed phrase.
    ///
    /// Declining the first step aborts with [`PurgeError::UserCancelled`].
    /// Any typed answer other than the exact phrase is rejected and asked again.
    pub fn confirm(
        &mut self,
        repositories: &[Repository],
        selection: &[String],
    ) -> Result<()> {
        eprintln!();
        eprintln!("{}", ui::danger("DANGER ZONE"));
        eprintln!(
            "{}",
            ui::danger("The following repositories will be PERMANENTLY DELETED:")
        );
        for (i, full_name) in selection.iter().enumerate() {
            let visibility = repositories
                .iter()
                .find(|repo| &repo.full_name == full_name)
                .map_or("Unknown", Repository::visibility);
            eprintln!("  {}. [{visibility}] {full_name}", i + 1);
        }

        let question = format!(
            "Are you absolutely sure? This will permanently delete {} repositories. This action cannot be undone!",
            selection.len()
        );
        if !self.prompter.confirm(&question, false)? {
            return Err(PurgeError::UserCancelled);
        }

        let phrase = self.settings.confirmation_phrase.clone();
        loop {
            let typed = self.prompter.input(&format!("Type '{phrase}' to confirm"))?;
            if typed == phrase {
                return Ok(());
            }
            crate::warning!("You must type '{phrase}' exactly");
        }
    }

    /// Delete each repository in order, pausing after every attempt.
    ///
    /// A failure is recorded and the batch moves on.
    pub async fn delete_all(&self, token: &AccessToken, selection: &[String]) -> DeletionReport {
        let mut report = DeletionReport::new();
        let total = selection.len();
        eprintln!();
        eprintln!("{}", ui::danger("Starting deletion process..."));

        for (i, full_name) in selection.iter().enumerate() {
            eprint!("Deleting {}/{total}: {full_name}... ", i + 1);
            let _ = std::io::stderr().flush();

            let outcome = match self.api.delete_repository(token, full_name).await {
                Ok(()) => {
                    eprintln!("{}", console::style("SUCCESS").green().bold());
                    DeletionOutcome::success(full_name.clone())
                }
                Err(error) => {
                    eprintln!("{}", console::style("FAILED").red().bold());
                    crate::detail!("Error: {error}");
                    DeletionOutcome::failure(full_name.clone(), error.to_string())
                }
            };
            report.record(outcome);

            tokio::time::sleep(self.settings.delete_delay).await;
        }
        report
    }
}
