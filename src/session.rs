//! Explicit state for results, history and the busy flag.
//!
//! Every change goes through [`SessionState::apply`], which never mutates the
//! current state and either returns the next one or rejects the event.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{ClassificationResult, EmailItem, HistoryEntry, ResultOrigin};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub results: Vec<ClassificationResult>,
    /// Newest batch first.
    pub history: Vec<HistoryEntry>,
    pub busy: bool,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    BatchStarted,
    BatchCompleted {
        items: Vec<EmailItem>,
        results: Vec<ClassificationResult>,
        origin: ResultOrigin,
        completed_at: DateTime<Utc>,
    },
    BatchAborted,
    ReplyEdited {
        id: String,
        reply: String,
    },
    Cleared,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("a batch is already being processed")]
    BatchInFlight,
    #[error("no batch is being processed")]
    NoBatchInFlight,
    #[error("no result with id {0}")]
    UnknownResult(String),
}

impl SessionState {
    pub fn apply(&self, event: SessionEvent) -> Result<SessionState, TransitionError> {
        match event {
            SessionEvent::BatchStarted => {
                if self.busy {
                    return Err(TransitionError::BatchInFlight);
                }
                Ok(SessionState {
                    busy: true,
                    ..self.clone()
                })
            }
            SessionEvent::BatchCompleted {
                items,
                results,
                origin,
                completed_at,
            } => {
                if !self.busy {
                    return Err(TransitionError::NoBatchInFlight);
                }
                let mut history: Vec<HistoryEntry> = results
                    .iter()
                    .map(|result| {
                        let item = items.iter().find(|item| item.id == result.id);
                        HistoryEntry {
                            result: result.clone(),
                            name: item.map(|i| i.name.clone()).unwrap_or_default(),
                            text: item.map(|i| i.text.clone()).unwrap_or_default(),
                            origin,
                            recorded_at: completed_at,
                        }
                    })
                    .collect();
                history.extend(self.history.iter().cloned());
                Ok(SessionState {
                    results,
                    history,
                    busy: false,
                })
            }
            SessionEvent::BatchAborted => Ok(SessionState {
                busy: false,
                ..self.clone()
            }),
            SessionEvent::ReplyEdited { id, reply } => {
                let mut next = self.clone();
                let result = next
                    .results
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or(TransitionError::UnknownResult(id))?;
                result.reply = reply;
                Ok(next)
            }
            SessionEvent::Cleared => Ok(SessionState {
                results: Vec::new(),
                ..self.clone()
            }),
        }
    }
}
