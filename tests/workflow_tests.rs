mod common;

use std::time::Duration;

use gh_purge::error::PurgeError;
use gh_purge::report::DeletionOutcome;
use gh_purge::workflow::{PurgeWorkflow, RunOutcome, WorkflowSettings};
use pretty_assertions::assert_eq;

use common::{repo, token, Answer, FakeApi, ScriptedPrompter};

fn settings() -> WorkflowSettings {
    WorkflowSettings::default()
}

fn three_repos() -> FakeApi {
    FakeApi::new(vec![
        repo("octocat", "alpha", false),
        repo("octocat", "beta", true),
        repo("octocat", "gamma", false),
    ])
}

fn confirm_all() -> Vec<Answer> {
    vec![Answer::Confirm(true), Answer::Input("delete".into())]
}

#[tokio::test(start_paused = true)]
async fn empty_selection_makes_no_delete_calls() {
    let api = three_repos();
    let mut prompter = ScriptedPrompter::new(vec![Answer::Select(vec![])]);

    let summary = PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await
        .expect("run");

    assert_eq!(summary.outcome, RunOutcome::NothingSelected);
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(summary.identity.login, "octocat");
    assert!(api.delete_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn deletes_in_selection_order() {
    let api = three_repos();
    let mut answers = vec![Answer::Select(vec![2, 0])];
    answers.extend(confirm_all());
    let mut prompter = ScriptedPrompter::new(answers);

    let summary = PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await
        .expect("run");

    assert_eq!(api.delete_calls(), vec!["octocat/gamma", "octocat/alpha"]);
    let RunOutcome::Completed(report) = summary.outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(
        report.outcomes(),
        &[
            DeletionOutcome::success("octocat/gamma"),
            DeletionOutcome::success("octocat/alpha"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn failed_item_does_not_abort_batch() {
    let api = three_repos().failing_on("octocat/beta");
    let mut answers = vec![Answer::Select(vec![0, 1, 2])];
    answers.extend(confirm_all());
    let mut prompter = ScriptedPrompter::new(answers);

    let summary = PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await
        .expect("run");

    assert_eq!(
        api.delete_calls(),
        vec!["octocat/alpha", "octocat/beta", "octocat/gamma"]
    );
    assert_eq!(summary.exit_code(), 2);
    let RunOutcome::Completed(report) = summary.outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(report.len(), 3);
    assert_eq!(report.success_count(), 2);
    let failed = &report.outcomes()[1];
    assert_eq!(failed.repository, "octocat/beta");
    assert!(!failed.succeeded);
    assert!(failed
        .error
        .as_deref()
        .is_some_and(|e| e.contains("403") && e.contains("admin rights")));
    assert!(report.outcomes()[2].succeeded);
}

#[tokio::test(start_paused = true)]
async fn waits_between_deletions() {
    let api = three_repos();
    let mut answers = vec![Answer::Select(vec![0, 1, 2])];
    answers.extend(confirm_all());
    let mut prompter = ScriptedPrompter::new(answers);

    PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await
        .expect("run");

    let times = api.delete_times();
    for pair in times.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_millis(500));
    }
}

#[tokio::test(start_paused = true)]
async fn empty_listing_is_no_resources_found() {
    let api = FakeApi::new(vec![]);
    let mut prompter = ScriptedPrompter::new(vec![]);

    let result = PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await;

    assert!(matches!(result, Err(PurgeError::NoResourcesFound)));
    assert!(prompter.prompts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn listing_error_is_fatal() {
    let api = three_repos().with_listing_error(500, "boom");
    let mut prompter = ScriptedPrompter::new(vec![]);

    let result = PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await;

    assert!(matches!(result, Err(PurgeError::Remote { status: 500, .. })));
}

#[tokio::test(start_paused = true)]
async fn declining_first_confirmation_cancels_without_deleting() {
    let api = three_repos();
    let mut prompter =
        ScriptedPrompter::new(vec![Answer::Select(vec![0]), Answer::Confirm(false)]);

    let result = PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await;

    assert!(matches!(result, Err(PurgeError::UserCancelled)));
    assert!(api.delete_calls().is_empty());
    assert!(prompter.prompts[1].contains("permanently delete 1 repositories"));
}

#[tokio::test(start_paused = true)]
async fn phrase_gate_reprompts_until_exact_match() {
    let api = three_repos();
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Select(vec![1]),
        Answer::Confirm(true),
        Answer::Input("DELETE".into()),
        Answer::Input("delete ".into()),
        Answer::Input("yes".into()),
        Answer::Input("delete".into()),
    ]);

    PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await
        .expect("run");

    let phrase_prompts = prompter
        .prompts
        .iter()
        .filter(|p| p.contains("Type 'delete'"))
        .count();
    assert_eq!(phrase_prompts, 4);
    assert_eq!(api.delete_calls(), vec!["octocat/beta"]);
    assert_eq!(prompter.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn phrase_gate_never_proceeds_on_wrong_input() {
    let api = three_repos();
    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Select(vec![0]),
        Answer::Confirm(true),
        Answer::Input("nope".into()),
    ]);

    let result = PurgeWorkflow::new(&api, &mut prompter, settings())
        .run(&token())
        .await;

    // the script runs dry on the re-prompt
    assert!(matches!(result, Err(PurgeError::Prompt(_))));
    assert!(api.delete_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn public_only_hides_private_repositories() {
    let api = three_repos();
    let mut answers = vec![Answer::Select(vec![1])];
    answers.extend(confirm_all());
    let mut prompter = ScriptedPrompter::new(answers);
    let settings = WorkflowSettings {
        include_private: false,
        ..settings()
    };

    PurgeWorkflow::new(&api, &mut prompter, settings)
        .run(&token())
        .await
        .expect("run");

    assert_eq!(
        prompter.offered,
        vec![
            "alpha (Public) - No description".to_string(),
            "gamma (Public) - No description".to_string(),
        ]
    );
    assert_eq!(api.delete_calls(), vec!["octocat/gamma"]);
}
