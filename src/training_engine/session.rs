//! Study session: topic selection, concurrent generation, and the state a
//! practice screen reads from.
//!
//! Each `generate` call is tagged with a fresh [`RequestTag`]. When both
//! requests complete, the result is committed only if that tag is still the
//! current one; a newer selection made in the meantime supersedes it.
//! Dropping a pending `generate` future clears its tag the same way.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::{rngs::StdRng, RngCore, SeedableRng};
use tracing::{debug, info, warn};

use crate::content_service::ContentService;
use crate::training_engine::{
    error::GenerationError,
    mastery::{MasteryRecord, MasteryStore, MasteryTracker},
    models::{
        BlueprintOutput, MasteryStatus, Part, RequestTag, SampleQuestion, SampleSeries, StatTopic,
        Verdict,
    },
    sampler, topics,
};

/// What a committed generation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub tag: RequestTag,
    pub question_count: usize,
    /// Mastery for the topic after the increment.
    pub mastery: u8,
}

struct SessionState<M: MasteryStore> {
    /// Tag of the in-flight round trip, if any.
    current: Option<RequestTag>,
    selected: Option<StatTopic>,
    blueprint: Option<BlueprintOutput>,
    questions: Vec<SampleQuestion>,
    tracker: MasteryTracker<M>,
}

/// Marks a round trip in flight. Dropping it before [`InFlight::settle`]
/// (the `generate` future was cancelled) clears the tag if it is still the
/// current one.
struct InFlight<'a, M: MasteryStore> {
    state: &'a Mutex<SessionState<M>>,
    tag: Option<RequestTag>,
}

impl<M: MasteryStore> InFlight<'_, M> {
    fn settle(mut self) {
        self.tag = None;
    }
}

impl<M: MasteryStore> Drop for InFlight<'_, M> {
    fn drop(&mut self) {
        let Some(tag) = self.tag.take() else {
            return;
        };
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.current.as_ref() == Some(&tag) {
            state.current = None;
            debug!(request = %tag, "generation cancelled");
        }
    }
}

pub struct StudySession<S: ContentService, M: MasteryStore> {
    service: S,
    state: Mutex<SessionState<M>>,
    rng: Mutex<StdRng>,
}

/// Generate a request tag: paper prefix plus 8 hex digits.
fn make_request_tag(topic: StatTopic, rng: &mut impl RngCore) -> RequestTag {
    RequestTag {
        topic,
        id: format!("{}-{:08X}", topic.paper(), rng.next_u32()),
    }
}

impl<S: ContentService, M: MasteryStore> StudySession<S, M> {
    pub fn new(service: S, tracker: MasteryTracker<M>) -> Self {
        Self::with_rng(service, tracker, StdRng::from_entropy())
    }

    /// Deterministic request ids, for tests and replays.
    pub fn with_seed(service: S, tracker: MasteryTracker<M>, seed: u64) -> Self {
        Self::with_rng(service, tracker, StdRng::seed_from_u64(seed))
    }

    fn with_rng(service: S, tracker: MasteryTracker<M>, rng: StdRng) -> Self {
        StudySession {
            service,
            state: Mutex::new(SessionState {
                current: None,
                selected: None,
                blueprint: None,
                questions: Vec::new(),
                tracker,
            }),
            rng: Mutex::new(rng),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState<M>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Select `topic` and request a blueprint and a question set for it.
    ///
    /// Both requests run concurrently. Nothing is committed unless both
    /// succeed and no later `generate` call has started in the meantime.
    pub async fn generate(&self, topic: StatTopic) -> Result<Generated, GenerationError> {
        let tag = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            make_request_tag(topic, &mut *rng)
        };
        {
            let mut state = self.state();
            state.selected = Some(topic);
            state.current = Some(tag.clone());
        }
        let in_flight = InFlight { state: &self.state, tag: Some(tag.clone()) };
        info!(request = %tag, "generation started");

        let objectives = topics::objectives(topic);
        let (blueprint, questions) = tokio::join!(
            self.service.blueprint(topic),
            self.service.sample_questions(topic, objectives),
        );
        in_flight.settle();

        let mut state = self.state();
        if state.current.as_ref() != Some(&tag) {
            info!(request = %tag, "discarding superseded result");
            return Err(GenerationError::Superseded { topic });
        }
        state.current = None;

        let (blueprint, questions) = match (blueprint, questions) {
            (Ok(b), Ok(q)) => (b, q),
            (Err(e), _) | (_, Err(e)) => {
                warn!(request = %tag, kind = ?e.kind(), error = %e, "generation failed");
                return Err(e);
            }
        };

        let question_count = questions.len();
        state.blueprint = Some(blueprint);
        state.questions = questions;
        let mastery = state.tracker.on_generation_success(topic.id());
        info!(request = %tag, question_count, mastery, "generation committed");

        Ok(Generated { tag, question_count, mastery })
    }

    /// Check `candidate` against part `part` of question `question_id`.
    /// `None` when the current set has no such sub-question.
    pub fn grade(&self, question_id: &str, part: Part, candidate: &str) -> Option<Verdict> {
        let state = self.state();
        let question = state.questions.iter().find(|q| q.id == question_id)?;
        let sub = question.sub_questions.iter().find(|s| s.part == part)?;
        Some(sub.check(candidate))
    }

    /// Chart series for a question, `None` when it has nothing to plot.
    pub fn chart(&self, question_id: &str) -> Option<SampleSeries> {
        let state = self.state();
        let question = state.questions.iter().find(|q| q.id == question_id)?;
        let series = sampler::sample_params(question.dist_params.as_ref()?);
        (!series.is_empty()).then_some(series)
    }

    pub fn selected(&self) -> Option<StatTopic> {
        self.state().selected
    }

    /// True while a round trip started by the latest `generate` is pending.
    pub fn is_generating(&self) -> bool {
        self.state().current.is_some()
    }

    pub fn blueprint(&self) -> Option<BlueprintOutput> {
        self.state().blueprint.clone()
    }

    pub fn questions(&self) -> Vec<SampleQuestion> {
        self.state().questions.clone()
    }

    pub fn mastery(&self, topic: StatTopic) -> u8 {
        self.state().tracker.value(topic.id())
    }

    pub fn mastery_status(&self, topic: StatTopic) -> MasteryStatus {
        self.state().tracker.status(topic.id())
    }

    pub fn mastery_record(&self) -> MasteryRecord {
        self.state().tracker.record().clone()
    }
}
