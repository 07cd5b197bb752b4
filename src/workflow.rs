use crate::credential::{load_credential, validate_credential, CredentialStore};
use crate::error::QuizError;
use crate::logger;
use crate::models::{AiRequest, Answers, FeedbackItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    AwaitingCredential,
    AwaitingSource,
    Generating,
    Generated,
    Answering,
    Graded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    CredentialAccepted,
    GenerationStarted,
    GenerationSucceeded,
    GenerationFailed,
    DoneStudying,
    GradingSucceeded,
    GradingFailed,
    StartOver,
}

/// The only legal moves between screens. Anything else returns `None`.
pub fn transition(state: WorkflowState, event: WorkflowEvent) -> Option<WorkflowState> {
    use WorkflowEvent as E;
    use WorkflowState as S;

    match (state, event) {
        (S::AwaitingCredential, E::CredentialAccepted) => Some(S::AwaitingSource),
        (S::AwaitingSource, E::GenerationStarted) => Some(S::Generating),
        (S::Generating, E::GenerationSucceeded) => Some(S::Generated),
        (S::Generating, E::GenerationFailed) => Some(S::AwaitingSource),
        (S::Generated, E::DoneStudying) => Some(S::Answering),
        (S::Answering, E::GradingSucceeded) => Some(S::Graded),
        (S::Answering, E::GradingFailed) => Some(S::Answering),
        (S::Graded, E::StartOver) => Some(S::AwaitingSource),
        _ => None,
    }
}

/// Everything the workflow owns: the current screen plus the data it gates.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub state: WorkflowState,
    pub credential: Option<String>,
    pub source_text: String,
    pub questions: Vec<String>,
    pub answers: Answers,
    pub feedback: Vec<FeedbackItem>,
    pub grading_in_progress: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::AwaitingCredential,
            credential: None,
            source_text: String::new(),
            questions: Vec::new(),
            answers: Answers::new(),
            feedback: Vec::new(),
            grading_in_progress: false,
        }
    }

    /// Start a session, skipping the credential screen when a key was saved earlier.
    pub fn load(store: &dyn CredentialStore) -> Result<Self, QuizError> {
        let mut session = Self::new();
        if let Some(credential) = load_credential(store)? {
            logger::log("Loaded stored API key");
            session.credential = Some(credential);
            session.apply(WorkflowEvent::CredentialAccepted);
        }
        Ok(session)
    }

    fn apply(&mut self, event: WorkflowEvent) -> bool {
        match transition(self.state, event) {
            Some(next) => {
                logger::log(&format!("Workflow {:?} --{:?}--> {:?}", self.state, event, next));
                self.state = next;
                true
            }
            None => {
                logger::log(&format!("Ignored {:?} in state {:?}", event, self.state));
                false
            }
        }
    }

    /// Validate and persist a key, then move on to source entry.
    ///
    /// A blank key fails without touching the store or the state.
    pub fn submit_credential(
        &mut self,
        store: &mut dyn CredentialStore,
        candidate: &str,
    ) -> Result<bool, QuizError> {
        if self.state != WorkflowState::AwaitingCredential {
            return Ok(false);
        }
        let credential = validate_credential(candidate)?;
        store.save(credential)?;
        self.credential = Some(credential.to_string());
        Ok(self.apply(WorkflowEvent::CredentialAccepted))
    }

    pub fn set_source_text(&mut self, text: String) {
        if self.state == WorkflowState::AwaitingSource {
            self.source_text = text;
        }
    }

    pub fn begin_generation(&mut self) -> Option<AiRequest> {
        if !self.apply(WorkflowEvent::GenerationStarted) {
            return None;
        }
        Some(AiRequest::Generate {
            source_text: self.source_text.clone(),
        })
    }

    /// Apply the generator's result. New questions replace any stale answers and feedback.
    pub fn finish_generation(
        &mut self,
        result: Result<Vec<String>, QuizError>,
    ) -> Result<(), QuizError> {
        if self.state != WorkflowState::Generating {
            return Ok(());
        }

        match result {
            Ok(questions) if !questions.is_empty() => {
                self.questions = questions;
                self.answers.clear();
                self.feedback.clear();
                self.apply(WorkflowEvent::GenerationSucceeded);
                Ok(())
            }
            Ok(_) => {
                self.apply(WorkflowEvent::GenerationFailed);
                Err(QuizError::NoQuestions)
            }
            Err(e) => {
                self.apply(WorkflowEvent::GenerationFailed);
                Err(e)
            }
        }
    }

    pub fn done_studying(&mut self) -> bool {
        self.apply(WorkflowEvent::DoneStudying)
    }

    pub fn answer(&self, index: usize) -> &str {
        self.answers.get(&index).map(String::as_str).unwrap_or("")
    }

    pub fn set_answer(&mut self, index: usize, value: String) {
        if self.state == WorkflowState::Answering && index < self.questions.len() {
            self.answers.insert(index, value);
        }
    }

    /// Returns the grading request, or `None` if grading isn't possible right now.
    pub fn begin_grading(&mut self) -> Option<AiRequest> {
        if self.state != WorkflowState::Answering || self.grading_in_progress {
            return None;
        }
        self.grading_in_progress = true;
        Some(AiRequest::Grade {
            source_text: self.source_text.clone(),
            questions: self.questions.clone(),
            answers: self.answers.clone(),
        })
    }

    pub fn finish_grading(
        &mut self,
        result: Result<Vec<FeedbackItem>, QuizError>,
    ) -> Result<(), QuizError> {
        if !self.grading_in_progress {
            return Ok(());
        }
        self.grading_in_progress = false;

        match result {
            Ok(feedback) => {
                self.feedback = feedback;
                self.apply(WorkflowEvent::GradingSucceeded);
                Ok(())
            }
            Err(e) => {
                self.apply(WorkflowEvent::GradingFailed);
                Err(e)
            }
        }
    }

    /// Back to source entry. Keeps the credential and source text.
    pub fn start_over(&mut self) -> bool {
        if !self.apply(WorkflowEvent::StartOver) {
            return false;
        }
        self.questions.clear();
        self.answers.clear();
        self.feedback.clear();
        true
    }

    pub fn is_busy(&self) -> bool {
        self.state == WorkflowState::Generating || self.grading_in_progress
    }
}
