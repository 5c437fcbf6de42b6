//! Constants used throughout the assist core crate.
//!
//! Fixed response text, defaults for startup configuration, and the remote endpoint path.

/// Suffix appended to every symptom answer.
pub const SYMPTOM_DISCLAIMER: &str = "\n\n⚠️ *This is general guidance only for minor symptoms. It does not replace a doctor's advice. If symptoms worsen, persist, or involve children, elderly, pregnant women, or chronic illness — consult a doctor immediately.*";

/// Footer appended to clinical Q&A answers.
pub const CLINICAL_FOOTER: &str = "\n\n*📋 Apply clinical judgment to individual cases.*";

/// Footer appended to research Q&A answers.
pub const RESEARCH_FOOTER: &str =
    "\n\n*📊 For research reference only — validate against current literature.*";

/// Example patient queries offered when nothing could answer the question.
pub const RETRY_HINTS: &[&str] = &[
    "What are the symptoms of diabetes?",
    "I have a fever and sore throat",
    "What causes high blood pressure?",
    "I feel dizzy and nauseous",
    "What is asthma and how is it treated?",
];

pub const PATIENT_GREETING: &str = "👋 Hello Sir/Madam! I am your Medical AI Assistant. How can I help you today? Feel free to describe your symptoms, ask about a medical condition, or seek health guidance — for example, try asking about \"fever\", \"diabetes\", \"chest pain\", or any concern you have.";

pub const DOCTOR_GREETING: &str = "I am your Clinical Decision Support Assistant. I can help with guidelines, drug interactions, and latest research. How can I assist you today?";

pub const RESEARCHER_GREETING: &str =
    "I am your Research Assistant. Ready for pharmaceutical research analysis. What is your query?";

/// Default base URL of the remote inference service.
pub const DEFAULT_REMOTE_URL: &str = "http://localhost:8000";

/// Path of the remote query operation, appended to the base URL.
pub const REMOTE_QUERY_PATH: &str = "/agents/query";

/// Default bound on a single remote call.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 15;

/// Largest accepted remote timeout.
pub const MAX_REMOTE_TIMEOUT_SECS: u64 = 120;

/// Default lower bound of the thinking delay.
pub const DEFAULT_THINKING_DELAY_MIN_MS: u64 = 1_500;

/// Default upper bound of the thinking delay.
pub const DEFAULT_THINKING_DELAY_MAX_MS: u64 = 2_500;

/// Largest accepted thinking delay bound.
pub const MAX_THINKING_DELAY_MS: u64 = 30_000;

/// Default REST listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
