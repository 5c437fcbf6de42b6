//! Query dispatch: local tables first, then one remote attempt.

use crate::constants::{DOCTOR_GREETING, PATIENT_GREETING, RESEARCHER_GREETING, RETRY_HINTS};
use crate::formatter::{format_qa, format_symptom};
use crate::matcher::{exact_question, first_match, normalise_query};
use crate::mode::{LocalTable, Mode};
use crate::remote::{HttpRemote, RemoteAssistant};
use crate::{AssistConfig, AssistResult, RemoteError, ThinkingDelay};
use knowledge::{Keyed, KnowledgeBase, QaAudience, SamplePrompt};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// How a reply was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    LocalSample,
    LocalSymptom,
    LocalClinical,
    LocalResearch,
    RemoteAnswered,
    RemoteFailed,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::LocalSample => "local_sample",
            Resolution::LocalSymptom => "local_symptom",
            Resolution::LocalClinical => "local_clinical",
            Resolution::LocalResearch => "local_research",
            Resolution::RemoteAnswered => "remote_answered",
            Resolution::RemoteFailed => "remote_failed",
        }
    }

    /// True when the answer came from the in-process tables.
    pub fn is_local(self) -> bool {
        matches!(
            self,
            Resolution::LocalSample
                | Resolution::LocalSymptom
                | Resolution::LocalClinical
                | Resolution::LocalResearch
        )
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer to one query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub request_id: Uuid,
    pub text: String,
    pub resolution: Resolution,
}

/// Resolves free-text questions against the local tables and the remote service.
///
/// Cheap to share: the knowledge base and remote are behind `Arc`. Dropping a dispatch future
/// abandons it, including any in-flight remote call.
#[derive(Clone)]
pub struct Responder {
    knowledge: Arc<KnowledgeBase>,
    remote: Arc<dyn RemoteAssistant>,
    delay: ThinkingDelay,
    remote_timeout: Duration,
}

impl Responder {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        remote: Arc<dyn RemoteAssistant>,
        delay: ThinkingDelay,
        remote_timeout: Duration,
    ) -> Self {
        Self {
            knowledge,
            remote,
            delay,
            remote_timeout,
        }
    }

    /// Loads the knowledge tables and builds the HTTP remote described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tables fail to load or validate, or the HTTP client cannot be
    /// built.
    pub fn from_config(config: &AssistConfig) -> AssistResult<Self> {
        let knowledge = KnowledgeBase::load(config.knowledge_dir())?;
        let remote = HttpRemote::new(config.remote_base_url(), config.remote_timeout())?;

        tracing::info!(
            "++ Responder ready (remote {}, timeout {:?})",
            remote.url(),
            config.remote_timeout()
        );

        Ok(Self::new(
            Arc::new(knowledge),
            Arc::new(remote),
            config.thinking_delay(),
            config.remote_timeout(),
        ))
    }

    /// Answers `text` as `mode`. Never fails; failures become a user-facing message.
    pub async fn query(&self, text: &str, mode: Mode) -> String {
        self.resolve(text, mode).await.text
    }

    /// Answers `text` as `mode` and reports how the answer was produced.
    pub async fn resolve(&self, text: &str, mode: Mode) -> Reply {
        let request_id = Uuid::new_v4();

        let (answer, resolution) = match self.lookup(text, mode) {
            Some(local) => {
                self.delay.pause().await;
                local
            }
            None => self.ask_remote(request_id, text, mode).await,
        };

        tracing::info!(
            "query {request_id} mode={mode} resolution={resolution} local={}",
            resolution.is_local()
        );

        Reply {
            request_id,
            text: answer,
            resolution,
        }
    }

    /// Consults only the local tables for `mode`, with no pause and no network.
    pub fn local_answer(&self, text: &str, mode: Mode) -> Option<Reply> {
        self.lookup(text, mode).map(|(text, resolution)| Reply {
            request_id: Uuid::new_v4(),
            text,
            resolution,
        })
    }

    pub fn greeting(&self, mode: Mode) -> &'static str {
        match mode {
            Mode::Patient => PATIENT_GREETING,
            Mode::Doctor => DOCTOR_GREETING,
            Mode::Researcher => RESEARCHER_GREETING,
        }
    }

    /// Suggested prompts for doctors.
    pub fn samples(&self) -> &[SamplePrompt] {
        self.knowledge.samples()
    }

    /// Example patient queries.
    pub fn retry_hints(&self) -> &'static [&'static str] {
        RETRY_HINTS
    }

    async fn ask_remote(&self, request_id: Uuid, text: &str, mode: Mode) -> (String, Resolution) {
        let call = tokio::time::timeout(self.remote_timeout, self.remote.ask(text));
        let outcome = match call.await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(self.remote_timeout)),
        };

        match outcome {
            Ok(answer) => (answer, Resolution::RemoteAnswered),
            Err(e) => {
                tracing::warn!("query {request_id} mode={mode} remote failed: {e}");
                (self.failure_message(text, mode), Resolution::RemoteFailed)
            }
        }
    }

    fn lookup(&self, text: &str, mode: Mode) -> Option<(String, Resolution)> {
        let normalised = normalise_query(text)?;

        for table in mode.tables() {
            let hit = match table {
                LocalTable::Sample => {
                    exact_question(&normalised, self.knowledge.samples()).map(|s| {
                        (s.question.as_str(), s.answer.to_string(), Resolution::LocalSample)
                    })
                }
                LocalTable::Symptom => first_match(&normalised, self.knowledge.symptoms())
                    .map(|e| (e.label(), format_symptom(e), Resolution::LocalSymptom)),
                LocalTable::Clinical => self.qa_hit(&normalised, QaAudience::Clinical),
                LocalTable::Research => self.qa_hit(&normalised, QaAudience::Research),
            };

            if let Some((label, answer, resolution)) = hit {
                tracing::debug!("local match '{label}' in {table:?} table");
                return Some((answer, resolution));
            }
        }
        None
    }

    fn qa_hit(
        &self,
        normalised: &str,
        audience: QaAudience,
    ) -> Option<(&str, String, Resolution)> {
        let table = self.knowledge.qa(audience);
        let resolution = match table.audience() {
            QaAudience::Clinical => Resolution::LocalClinical,
            QaAudience::Research => Resolution::LocalResearch,
        };
        first_match(normalised, table.items())
            .map(|item| (item.label(), format_qa(item, table.audience()), resolution))
    }

    /// The text returned when neither the local tables nor the remote produced an answer.
    fn failure_message(&self, query: &str, mode: Mode) -> String {
        let base = format!(
            "No answer found for \"{query}\". The knowledge service is currently unavailable."
        );

        match mode {
            Mode::Patient => {
                let hint = self
                    .retry_hints()
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or_default();
                format!(
                    "👋 Hello Sir/Madam! {base}\n\n\
                     Could you try rephrasing your question with more specific keywords?\n\n\
                     💡 *Try asking:* \"{hint}\"\n\n\
                     Feel free to ask a different question and I'll do my best to help!"
                )
            }
            Mode::Doctor => format!(
                "System Error: {base} Unable to reach the clinical agent service. Please verify backend connection."
            ),
            Mode::Researcher => format!(
                "System Error: {base} Unable to reach the research agent service. Please verify backend connection."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CLINICAL_FOOTER, RESEARCH_FOOTER, SYMPTOM_DISCLAIMER};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct Unreachable {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RemoteAssistant for Unreachable {
        async fn ask(&self, _query: &str) -> Result<String, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RemoteError::Status {
                status: 503,
                body: "down".into(),
            })
        }
    }

    struct Echo {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RemoteAssistant for Echo {
        async fn ask(&self, query: &str) -> Result<String, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("remote says: {query}"))
        }
    }

    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    struct Hanging {
        started: Arc<AtomicBool>,
        dropped: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RemoteAssistant for Hanging {
        async fn ask(&self, _query: &str) -> Result<String, RemoteError> {
            let _guard = SetOnDrop(self.dropped.clone());
            self.started.store(true, Ordering::SeqCst);
            std::future::pending::<Result<String, RemoteError>>().await
        }
    }

    fn knowledge() -> Arc<KnowledgeBase> {
        Arc::new(KnowledgeBase::embedded().expect("embedded tables"))
    }

    fn responder_with(remote: Arc<dyn RemoteAssistant>) -> Responder {
        Responder::new(
            knowledge(),
            remote,
            ThinkingDelay::none(),
            Duration::from_secs(15),
        )
    }

    fn offline() -> (Responder, Arc<Unreachable>) {
        let remote = Arc::new(Unreachable {
            calls: AtomicUsize::new(0),
        });
        (responder_with(remote.clone()), remote)
    }

    fn echo() -> (Responder, Arc<Echo>) {
        let remote = Arc::new(Echo {
            calls: AtomicUsize::new(0),
        });
        (responder_with(remote.clone()), remote)
    }

    #[tokio::test]
    async fn patient_fever_gets_full_symptom_block() {
        let (responder, remote) = offline();
        let reply = responder
            .resolve("I have a fever and sore throat", Mode::Patient)
            .await;

        assert_eq!(reply.resolution, Resolution::LocalSymptom);
        assert!(!reply.text.contains("Cough (Dry or Mild)"));
        for section in [
            "Fever (Mild)",
            "Possible Cause",
            "Home Care",
            "OTC Medication",
            "See a Doctor If",
        ] {
            assert!(reply.text.contains(section), "missing {section}");
        }
        assert!(reply.text.ends_with(SYMPTOM_DISCLAIMER));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn researcher_study_design_question_is_answered_locally() {
        let (responder, remote) = offline();
        let reply = responder
            .resolve("cohort vs case control", Mode::Researcher)
            .await;

        assert_eq!(reply.resolution, Resolution::LocalResearch);
        assert!(reply.text.starts_with("🔬"));
        assert!(reply.text.ends_with(RESEARCH_FOOTER));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn doctor_clinical_hit_uses_clinical_footer() {
        let (responder, _) = offline();
        let reply = responder
            .resolve("What is the PARACETAMOL DOSE for adults?", Mode::Doctor)
            .await;

        assert_eq!(reply.resolution, Resolution::LocalClinical);
        assert!(reply.text.ends_with(CLINICAL_FOOTER));
    }

    #[tokio::test]
    async fn doctor_suggested_prompt_is_answered_locally() {
        let (responder, remote) = offline();
        let reply = responder
            .resolve("when is IVABRADINE indicated in heart failure?  ", Mode::Doctor)
            .await;

        assert_eq!(reply.resolution, Resolution::LocalSample);
        assert_eq!(
            reply.text,
            "In sinus rhythm, LVEF ≤35%, HR ≥70 bpm despite maximally tolerated beta-blocker, to reduce HF hospitalizations."
        );
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn suggested_prompts_are_doctor_only() {
        let (responder, remote) = offline();
        let reply = responder
            .resolve("When is ivabradine indicated in heart failure?", Mode::Patient)
            .await;

        assert_eq!(reply.resolution, Resolution::RemoteFailed);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn suggested_prompt_waits_for_thinking_delay() {
        let remote = Arc::new(Unreachable {
            calls: AtomicUsize::new(0),
        });
        let responder = Responder::new(
            knowledge(),
            remote,
            ThinkingDelay::new(Duration::from_millis(1_500), Duration::from_millis(1_500))
                .expect("band"),
            Duration::from_secs(15),
        );

        let start = tokio::time::Instant::now();
        let reply = responder
            .resolve("When is ivabradine indicated in heart failure?", Mode::Doctor)
            .await;

        assert_eq!(reply.resolution, Resolution::LocalSample);
        assert!(start.elapsed() >= Duration::from_millis(1_500));
    }

    #[tokio::test]
    async fn doctor_unknown_query_fails_gracefully_naming_input() {
        let (responder, remote) = offline();
        let reply = responder
            .resolve("xyzzyunrelatedgarbage", Mode::Doctor)
            .await;

        assert_eq!(reply.resolution, Resolution::RemoteFailed);
        assert!(reply.text.contains("\"xyzzyunrelatedgarbage\""));
        assert!(reply.text.contains("unavailable"));
        assert!(reply.text.contains("verify backend connection"));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn patient_failure_offers_a_retry_hint() {
        let (responder, _) = offline();
        let reply = responder.resolve("xyzzy", Mode::Patient).await;

        assert_eq!(reply.resolution, Resolution::RemoteFailed);
        assert!(reply.text.contains("rephrasing"));
        assert!(RETRY_HINTS
            .iter()
            .any(|hint| reply.text.contains(&format!("\"{hint}\""))));
    }

    #[tokio::test]
    async fn researcher_never_sees_symptom_content() {
        let (responder, remote) = echo();

        let reply = responder.resolve("runny nose", Mode::Researcher).await;
        assert_eq!(reply.resolution, Resolution::RemoteAnswered);
        assert_eq!(reply.text, "remote says: runny nose");
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);

        let fever = responder.resolve("fever", Mode::Researcher).await;
        assert_eq!(fever.resolution, Resolution::LocalResearch);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
        assert!(!fever.text.contains("Possible Cause"));
        assert!(!fever.text.contains(SYMPTOM_DISCLAIMER));
    }

    #[tokio::test]
    async fn doctor_falls_through_to_symptoms() {
        let (responder, remote) = offline();
        let reply = responder.resolve("I have a headache", Mode::Doctor).await;

        assert_eq!(reply.resolution, Resolution::LocalSymptom);
        assert!(reply.text.contains("Headache (Mild)"));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn local_answers_are_deterministic() {
        let (responder, _) = offline();
        let first = responder.query("My stomach has acidity", Mode::Patient).await;
        let second = responder.query("My stomach has acidity", Mode::Patient).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn matching_ignores_case() {
        let (responder, _) = offline();
        assert_eq!(
            responder.query("FEVER", Mode::Patient).await,
            responder.query("fever", Mode::Patient).await
        );
    }

    #[tokio::test]
    async fn empty_query_does_not_fail() {
        let (responder, remote) = offline();
        let reply = responder.resolve("", Mode::Patient).await;
        assert_eq!(reply.resolution, Resolution::RemoteFailed);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);

        let (responder, _) = echo();
        let reply = responder.resolve("   ", Mode::Doctor).await;
        assert_eq!(reply.resolution, Resolution::RemoteAnswered);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_remote_times_out() {
        let started = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicBool::new(false));
        let responder = Responder::new(
            knowledge(),
            Arc::new(Hanging {
                started: started.clone(),
                dropped: dropped.clone(),
            }),
            ThinkingDelay::none(),
            Duration::from_secs(15),
        );

        let start = tokio::time::Instant::now();
        let reply = responder.resolve("xyzzy", Mode::Doctor).await;

        assert_eq!(reply.resolution, Resolution::RemoteFailed);
        assert!(start.elapsed() >= Duration::from_secs(15));
        assert!(start.elapsed() < Duration::from_secs(16));
        assert!(started.load(Ordering::SeqCst));
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_future_abandons_the_remote_call() {
        let started = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicBool::new(false));
        let responder = Responder::new(
            knowledge(),
            Arc::new(Hanging {
                started: started.clone(),
                dropped: dropped.clone(),
            }),
            ThinkingDelay::none(),
            Duration::from_secs(15),
        );

        let abandoned = tokio::time::timeout(
            Duration::from_millis(50),
            responder.resolve("xyzzy", Mode::Patient),
        )
        .await;

        assert!(abandoned.is_err());
        assert!(started.load(Ordering::SeqCst));
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn thinking_delay_applies_to_local_matches_only() {
        let remote = Arc::new(Echo {
            calls: AtomicUsize::new(0),
        });
        let responder = Responder::new(
            knowledge(),
            remote,
            ThinkingDelay::new(Duration::from_millis(1_500), Duration::from_millis(2_500))
                .expect("band"),
            Duration::from_secs(15),
        );

        let start = tokio::time::Instant::now();
        responder.resolve("fever", Mode::Patient).await;
        let local_elapsed = start.elapsed();
        assert!(local_elapsed >= Duration::from_millis(1_500));
        assert!(local_elapsed <= Duration::from_millis(2_600));

        let start = tokio::time::Instant::now();
        let reply = responder.resolve("xyzzy", Mode::Patient).await;
        assert_eq!(reply.resolution, Resolution::RemoteAnswered);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn local_answer_skips_network() {
        let (responder, remote) = offline();
        let hit = responder
            .local_answer("I sneeze all day", Mode::Patient)
            .expect("local hit");
        assert_eq!(hit.resolution, Resolution::LocalSymptom);
        assert!(responder.local_answer("xyzzy", Mode::Patient).is_none());
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn greeting_and_samples() {
        let (responder, _) = offline();
        assert!(responder.greeting(Mode::Patient).starts_with("👋 Hello Sir/Madam!"));
        assert!(responder.greeting(Mode::Doctor).contains("Clinical Decision Support"));
        assert!(responder.greeting(Mode::Researcher).contains("Research Assistant"));
        assert_eq!(responder.samples().len(), 20);
        assert_eq!(responder.retry_hints().len(), 5);
    }

    #[test]
    fn resolution_serialises_snake_case() {
        let json = serde_json::to_string(&Resolution::RemoteFailed).expect("serialise");
        assert_eq!(json, "\"remote_failed\"");
        assert!(Resolution::LocalClinical.is_local());
        assert!(Resolution::LocalSample.is_local());
        assert!(!Resolution::RemoteAnswered.is_local());
    }
}
