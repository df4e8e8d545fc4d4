//! # Stories State Machine
//!
//! ```text
//! Idle ──FETCH_INIT──▶ Loading ──FETCH_SUCCESS──▶ Success ◀─┐
//!                         │                          │      │ REMOVE_STORY
//!                         └──FETCH_FAILURE──▶ Failure └──────┘
//! ```
//!
//! `stories_reducer` is the only way `StoriesState` changes. It is pure:
//! same state + same action = same result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::Story;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoriesState {
    pub data: Vec<Story>,
    pub is_loading: bool,
    pub is_error: bool,
}

/// A stories transition. The serde form is the logged/replayable wire shape:
/// `{"type": "STORIES_FETCH_SUCCESS", "payload": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum StoriesAction {
    #[serde(rename = "STORIES_FETCH_INIT")]
    FetchInit,
    #[serde(rename = "STORIES_FETCH_SUCCESS")]
    FetchSuccess(Vec<Story>),
    #[serde(rename = "STORIES_FETCH_FAILURE")]
    FetchFailure,
    #[serde(rename = "REMOVE_STORY")]
    RemoveStory(Story),
}

const KNOWN_KINDS: [&str; 4] = [
    "STORIES_FETCH_INIT",
    "STORIES_FETCH_SUCCESS",
    "STORIES_FETCH_FAILURE",
    "REMOVE_STORY",
];

/// Rejection of a serialized action.
#[derive(Debug)]
pub enum ActionError {
    /// The `type` tag names no known transition.
    Unknown(String),
    /// Known tag, but the envelope or payload does not decode.
    Malformed(serde_json::Error),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Unknown(kind) => write!(f, "unknown stories action: {kind}"),
            ActionError::Malformed(e) => write!(f, "malformed stories action: {e}"),
        }
    }
}

impl std::error::Error for ActionError {}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
}

impl StoriesAction {
    /// The wire tag, e.g. `"REMOVE_STORY"`.
    pub fn kind(&self) -> &'static str {
        match self {
            StoriesAction::FetchInit => KNOWN_KINDS[0],
            StoriesAction::FetchSuccess(_) => KNOWN_KINDS[1],
            StoriesAction::FetchFailure => KNOWN_KINDS[2],
            StoriesAction::RemoveStory(_) => KNOWN_KINDS[3],
        }
    }

    /// Decodes an action from its wire form. Unrecognized kinds are an error,
    /// never silently ignored.
    ///
    /// The app itself never decodes actions: `StoriesAction` is a closed enum,
    /// so inside the process an unknown kind cannot exist. This is the entry
    /// point for replaying logged or externally produced actions.
    pub fn from_json(json: &str) -> Result<Self, ActionError> {
        let envelope: Envelope = serde_json::from_str(json).map_err(ActionError::Malformed)?;
        if !KNOWN_KINDS.contains(&envelope.kind.as_str()) {
            return Err(ActionError::Unknown(envelope.kind));
        }
        serde_json::from_str(json).map_err(ActionError::Malformed)
    }

    /// Short log form: the kind plus the payload size, not the payload.
    pub fn summary(&self) -> String {
        match self {
            StoriesAction::FetchSuccess(hits) => format!("{} ({} hits)", self.kind(), hits.len()),
            StoriesAction::RemoveStory(story) => format!("{} ({})", self.kind(), story.object_id),
            _ => self.kind().to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        // Story and Vec<Story> always serialize.
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"type\":\"{}\"}}", self.kind()))
    }
}

pub fn stories_reducer(state: StoriesState, action: StoriesAction) -> StoriesState {
    match action {
        StoriesAction::FetchInit => StoriesState {
            is_loading: true,
            is_error: false,
            ..state
        },
        StoriesAction::FetchSuccess(payload) => StoriesState {
            data: payload,
            is_loading: false,
            is_error: false,
        },
        StoriesAction::FetchFailure => StoriesState {
            is_loading: false,
            is_error: true,
            ..state
        },
        StoriesAction::RemoveStory(item) => StoriesState {
            data: state
                .data
                .into_iter()
                .filter(|story| story.object_id != item.object_id)
                .collect(),
            ..state
        },
    }
}
