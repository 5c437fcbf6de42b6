//! # Assist Core
//!
//! Query resolution for the role-aware healthcare assistant.
//!
//! A free-text question plus a [`Mode`] is answered by:
//! - scanning the mode's local tables in order (keyword containment, first match wins)
//! - pausing for the configured thinking delay and returning the formatted local answer
//! - otherwise making one call to the remote inference service
//!
//! [`Responder::query`] never fails. Remote errors and timeouts become a user-facing message.
//!
//! **No API concerns**: HTTP servers and the CLI live in `api-rest` and `assist-cli`.

pub mod config;
pub mod constants;
pub mod delay;
mod error;
pub mod formatter;
pub mod matcher;
pub mod mode;
pub mod remote;
pub mod responder;

pub use config::AssistConfig;
pub use delay::ThinkingDelay;
pub use error::{AssistError, AssistResult, RemoteError};
pub use mode::Mode;
pub use remote::{HttpRemote, RemoteAssistant};
pub use responder::{Reply, Resolution, Responder};

pub use knowledge::{KnowledgeBase, SamplePrompt};
