//! Shared create/edit/delete/import modal flow:
//! collecting input → submitting → result.

use std::future::Future;

use crate::error::FlowError;
use crate::provider::{CollectionSource, RemoteCollection};

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState<O> {
    Collecting,
    Submitting,
    Succeeded(O),
    /// User-visible message.
    Failed(String),
}

#[derive(Clone)]
pub struct MutationFlow<O> {
    state: FlowState<O>,
    failure_message: String,
    format_success: fn(&O) -> String,
}

impl<O> MutationFlow<O> {
    /// `failure_message` is what the user sees when the submission fails;
    /// `format_success` renders the result screen.
    pub fn new(failure_message: impl Into<String>, format_success: fn(&O) -> String) -> Self {
        Self {
            state: FlowState::Collecting,
            failure_message: failure_message.into(),
            format_success,
        }
    }

    pub fn state(&self) -> &FlowState<O> {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FlowState::Submitting)
    }

    /// Message for the result screen, once there is one.
    pub fn result_message(&self) -> Option<String> {
        match &self.state {
            FlowState::Succeeded(output) => Some((self.format_success)(output)),
            FlowState::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Enters `Submitting`. A failed flow may be resubmitted; a succeeded one
    /// has to be reset first.
    pub fn begin(&mut self) -> Result<(), FlowError> {
        match self.state {
            FlowState::Collecting | FlowState::Failed(_) => {
                self.state = FlowState::Submitting;
                Ok(())
            }
            FlowState::Submitting => Err(FlowError::AlreadySubmitting),
            FlowState::Succeeded(_) => Err(FlowError::AlreadyFinished),
        }
    }

    pub fn complete(&mut self, result: anyhow::Result<O>) {
        self.state = match result {
            Ok(output) => FlowState::Succeeded(output),
            Err(e) => {
                tracing::warn!(error = %e, message = %self.failure_message, "submission failed");
                FlowState::Failed(self.failure_message.clone())
            }
        };
    }

    /// Moves straight to the result screen without submitting, e.g. when the
    /// chosen file cannot be read.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.state = FlowState::Failed(message.into());
    }

    pub fn reset(&mut self) {
        self.state = FlowState::Collecting;
    }

    pub async fn submit<F, Fut>(&mut self, submit: F) -> Result<&FlowState<O>, FlowError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<O>>,
    {
        self.begin()?;
        let result = submit().await;
        self.complete(result);
        Ok(&self.state)
    }

    /// Submits and, on success, refetches `collection` so the list reflects
    /// the change.
    pub async fn submit_and_refresh<F, Fut, T, S>(
        &mut self,
        collection: &RemoteCollection<T, S>,
        submit: F,
    ) -> Result<&FlowState<O>, FlowError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<O>>,
        T: Send + Sync,
        S: CollectionSource<T>,
    {
        self.submit(submit).await?;
        if matches!(self.state, FlowState::Succeeded(_)) {
            collection.refetch().await;
        }
        Ok(&self.state)
    }
}
