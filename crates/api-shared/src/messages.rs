//! JSON request and response bodies.

use assist_core::{Mode, Reply, SamplePrompt};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Caller persona as it appears on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ModeDto {
    #[default]
    Patient,
    Doctor,
    Researcher,
}

impl From<ModeDto> for Mode {
    fn from(value: ModeDto) -> Self {
        match value {
            ModeDto::Patient => Mode::Patient,
            ModeDto::Doctor => Mode::Doctor,
            ModeDto::Researcher => Mode::Researcher,
        }
    }
}

impl From<Mode> for ModeDto {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Patient => ModeDto::Patient,
            Mode::Doctor => ModeDto::Doctor,
            Mode::Researcher => ModeDto::Researcher,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QueryReq {
    pub query: String,
    /// Defaults to `patient` when omitted.
    #[serde(default)]
    pub mode: ModeDto,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QueryRes {
    pub request_id: String,
    pub response: String,
    /// One of `local_sample`, `local_symptom`, `local_clinical`, `local_research`,
    /// `remote_answered` or `remote_failed`.
    pub resolution: String,
    pub mode: ModeDto,
}

impl QueryRes {
    pub fn from_reply(reply: Reply, mode: Mode) -> Self {
        Self {
            request_id: reply.request_id.to_string(),
            response: reply.text,
            resolution: reply.resolution.as_str().to_string(),
            mode: mode.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GreetingRes {
    pub mode: ModeDto,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SamplePromptRes {
    pub question: String,
    pub answer: String,
}

impl From<&SamplePrompt> for SamplePromptRes {
    fn from(value: &SamplePrompt) -> Self {
        Self {
            question: value.question.to_string(),
            answer: value.answer.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SamplesRes {
    pub samples: Vec<SamplePromptRes>,
}
