//! Shared test fakes: scripted authority, in-memory API and prompter.
#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use gh_purge::api::{Identity, Repository, RepositoryApi};
use gh_purge::auth::{AccessToken, AuthError, DeviceAuthority, DeviceAuthorization, TokenPoll};
use gh_purge::error::PurgeError;
use gh_purge::workflow::{PromptError, Prompter};

pub fn repo(owner: &str, name: &str, private: bool) -> Repository {
    Repository {
        id: name.bytes().map(u64::from).sum(),
        name: name.to_string(),
        full_name: format!("{owner}/{name}"),
        description: None,
        is_private: private,
        url: format!("https://github.com/{owner}/{name}"),
    }
}

pub fn token() -> AccessToken {
    AccessToken::new("gho_test")
}

/// Device authority answering polls from a script; repeats the last entry
/// once the script runs out.
pub struct ScriptedAuthority {
    authorization: DeviceAuthorization,
    script: Mutex<VecDeque<Result<TokenPoll, AuthError>>>,
    last: Mutex<Option<TokenPoll>>,
    poll_times: Mutex<Vec<Instant>>,
    requests: AtomicUsize,
}

impl ScriptedAuthority {
    pub fn new(
        expires_in: i64,
        interval: i64,
        script: Vec<Result<TokenPoll, AuthError>>,
    ) -> Self {
        Self {
            authorization: DeviceAuthorization::new(
                "device-123",
                "ABCD-EFGH",
                "https://github.com/login/device",
                Some(expires_in),
                Some(interval),
            )
            .expect("valid authorization"),
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            poll_times: Mutex::new(Vec::new()),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn authorization(&self) -> &DeviceAuthorization {
        &self.authorization
    }

    /// Number of device-code requests made.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn poll_count(&self) -> usize {
        self.poll_times.lock().expect("poll lock").len()
    }

    pub fn poll_times(&self) -> Vec<Instant> {
        self.poll_times.lock().expect("poll lock").clone()
    }
}

#[async_trait]
impl DeviceAuthority for ScriptedAuthority {
    async fn request_device_code(&self) -> Result<DeviceAuthorization, AuthError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.authorization.clone())
    }

    async fn poll_token(&self, device_code: &str) -> Result<TokenPoll, AuthError> {
        assert_eq!(device_code, "device-123");
        self.poll_times.lock().expect("poll lock").push(Instant::now());
        let next = self.script.lock().expect("script lock").pop_front();
        match next {
            Some(Ok(poll)) => {
                *self.last.lock().expect("last lock") = Some(poll.clone());
                Ok(poll)
            }
            Some(Err(error)) => Err(error),
            None => Ok(self
                .last
                .lock()
                .expect("last lock")
                .clone()
                .unwrap_or(TokenPoll::Pending)),
        }
    }
}

/// In-memory repository API recording delete calls.
pub struct FakeApi {
    repositories: Vec<Repository>,
    failing: HashSet<String>,
    listing_error: Option<(u16, String)>,
    deleted: Mutex<Vec<String>>,
    delete_times: Mutex<Vec<Instant>>,
}

impl FakeApi {
    pub fn new(repositories: Vec<Repository>) -> Self {
        Self {
            repositories,
            failing: HashSet::new(),
            listing_error: None,
            deleted: Mutex::new(Vec::new()),
            delete_times: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, full_name: &str) -> Self {
        self.failing.insert(full_name.to_string());
        self
    }

    pub fn with_listing_error(mut self, status: u16, body: &str) -> Self {
        self.listing_error = Some((status, body.to_string()));
        self
    }

    /// Every delete attempt, in call order.
    pub fn delete_calls(&self) -> Vec<String> {
        self.deleted.lock().expect("delete lock").clone()
    }

    pub fn delete_times(&self) -> Vec<Instant> {
        self.delete_times.lock().expect("delete lock").clone()
    }
}

#[async_trait]
impl RepositoryApi for FakeApi {
    async fn fetch_identity(&self, _token: &AccessToken) -> Result<Identity, PurgeError> {
        Ok(Identity {
            login: "octocat".to_string(),
            display_name: Some("The Octocat".to_string()),
        })
    }

    async fn list_repositories(&self, _token: &AccessToken) -> Result<Vec<Repository>, PurgeError> {
        match &self.listing_error {
            Some((status, body)) => Err(PurgeError::remote(*status, body.clone())),
            None => Ok(self.repositories.clone()),
        }
    }

    async fn delete_repository(&self, _token: &AccessToken, full_name: &str) -> Result<(), PurgeError> {
        self.deleted
            .lock()
            .expect("delete lock")
            .push(full_name.to_string());
        self.delete_times
            .lock()
            .expect("delete lock")
            .push(Instant::now());
        if self.failing.contains(full_name) {
            return Err(PurgeError::remote(403, "Must have admin rights to Repository."));
        }
        Ok(())
    }
}

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Input(String),
    Secret(String),
    Select(Vec<usize>),
}

/// Prompter replaying scripted answers and recording what it was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
    pub offered: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool, PromptError> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Confirm(answer)) => Ok(answer),
            _ => Err(PromptError::Closed),
        }
    }

    fn input(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Input(answer)) => Ok(answer),
            _ => Err(PromptError::Closed),
        }
    }

    fn secret(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Secret(answer)) => Ok(answer),
            _ => Err(PromptError::Closed),
        }
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> Result<Vec<usize>, PromptError> {
        self.prompts.push(prompt.to_string());
        self.offered = items.to_vec();
        match self.answers.pop_front() {
            Some(Answer::Select(picked)) => Ok(picked),
            _ => Err(PromptError::Closed),
        }
    }
}
