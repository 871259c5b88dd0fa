//! Question answering flow
//!
//! Questions go out one at a time. Answered turns are appended to a
//! [`ConversationHistory`] in the order they were asked. A failed question
//! is never appended; it stays visible as a [`FailedQuestion`] and its text
//! goes back into the input so it can be sent again by hand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::DocQueryApi;
use crate::types::{AppError, AskRequest, AskResponse, Result};

pub const MSG_EMPTY_QUESTION: &str = "Please enter a question.";
pub const MSG_NO_ANSWER: &str = "Failed to retrieve an answer.";
pub const MSG_ASK_FAILED: &str = "An error occurred.";
const MSG_IN_FLIGHT: &str = "A question is already being answered.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

/// Append-only transcript of answered questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

impl<'a> IntoIterator for &'a ConversationHistory {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

/// A question that did not get an answer, shown in place of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedQuestion {
    pub question: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Text in the question box.
    pub input: String,
    history: ConversationHistory,
    pending: Option<(String, DateTime<Utc>)>,
    failed: Option<FailedQuestion>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Question currently awaiting its answer.
    pub fn pending_question(&self) -> Option<&str> {
        self.pending.as_ref().map(|(q, _)| q.as_str())
    }

    pub fn failed(&self) -> Option<&FailedQuestion> {
        self.failed.as_ref()
    }

    pub fn can_send(&self) -> bool {
        !self.is_loading() && !self.input.trim().is_empty()
    }

    /// Take the question out of the input, as typed, and enter the loading
    /// state. Whitespace only matters for the emptiness check.
    pub fn begin_ask(&mut self) -> Result<AskRequest> {
        if self.is_loading() {
            return Err(AppError::Validation(MSG_IN_FLIGHT.into()));
        }
        if self.input.trim().is_empty() {
            return Err(AppError::Validation(MSG_EMPTY_QUESTION.into()));
        }

        let question = std::mem::take(&mut self.input);
        self.failed = None;
        self.pending = Some((question.clone(), Utc::now()));
        Ok(AskRequest { question })
    }

    /// Record the answer to the pending question. Returns the new turn on
    /// success.
    pub fn finish(&mut self, outcome: Result<AskResponse>) -> Result<&Turn> {
        let Some((question, asked_at)) = self.pending.take() else {
            return Err(AppError::Validation("No question is pending.".into()));
        };

        let answer = match outcome {
            Ok(AskResponse {
                success: true,
                answer,
            }) => answer,
            Ok(_) => {
                return Err(self.fail(question, AppError::Validation(MSG_NO_ANSWER.into())));
            }
            Err(e) => {
                let message = e.message_or(MSG_ASK_FAILED);
                tracing::warn!("Question failed: {}", e);
                return Err(self.fail_with(question, message, e));
            }
        };

        tracing::debug!(turns = self.history.len() + 1, "Question answered");
        self.history.push(Turn {
            question,
            answer,
            asked_at,
        });
        self.history
            .last()
            .ok_or_else(|| AppError::Validation("History is empty".into()))
    }

    fn fail(&mut self, question: String, error: AppError) -> AppError {
        let message = error.to_string();
        self.fail_with(question, message, error)
    }

    fn fail_with(&mut self, question: String, message: String, error: AppError) -> AppError {
        if self.input.trim().is_empty() {
            self.input = question.clone();
        }
        self.failed = Some(FailedQuestion {
            question,
            error: message,
        });
        error
    }

    /// Ask whatever is in the input box and wait for the answer.
    pub async fn ask<A>(&mut self, api: &A) -> Result<Turn>
    where
        A: DocQueryApi + ?Sized,
    {
        let request = self.begin_ask()?;
        let outcome = api.ask(&request).await;
        self.finish(outcome).cloned()
    }
}
