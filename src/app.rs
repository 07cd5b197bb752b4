use crate::ai::{ChatBackend, OpenRouterClient};
use crate::ai_worker::spawn_ai_worker;
use crate::config::AppConfig;
use crate::credential::CredentialStore;
use crate::error::QuizError;
use crate::input::TextInput;
use crate::logger;
use crate::models::{AiRequest, AiResponse, FeedbackItem};
use crate::pdf;
use crate::workflow::{QuizSession, WorkflowState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

/// Which field on the source screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    Text,
    PdfPath,
    StartPage,
    EndPage,
}

impl SourceField {
    pub fn next(self) -> Self {
        match self {
            SourceField::Text => SourceField::PdfPath,
            SourceField::PdfPath => SourceField::StartPage,
            SourceField::StartPage => SourceField::EndPage,
            SourceField::EndPage => SourceField::Text,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SourceField::Text => SourceField::EndPage,
            SourceField::PdfPath => SourceField::Text,
            SourceField::StartPage => SourceField::PdfPath,
            SourceField::EndPage => SourceField::StartPage,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Popup {
    Intro,
    Alert { title: String, message: String },
}

pub struct App {
    pub session: QuizSession,
    pub config: AppConfig,
    pub credential_input: TextInput,
    pub source_input: TextInput,
    pub pdf_path_input: TextInput,
    pub start_page_input: TextInput,
    pub end_page_input: TextInput,
    pub source_focus: SourceField,
    pub current_question: usize,
    pub answer_input: TextInput,
    pub feedback_scroll: u16,
    pub popup: Option<Popup>,
    pub notice: Option<String>,
    pub should_quit: bool,
    store: Box<dyn CredentialStore>,
    ai_tx: Option<Sender<AiRequest>>,
    ai_rx: Option<Receiver<AiResponse>>,
}

impl App {
    pub fn new(session: QuizSession, store: Box<dyn CredentialStore>, config: AppConfig) -> Self {
        let mut source_input = TextInput::multiline();
        source_input.set_text(session.source_text.clone());

        Self {
            session,
            config,
            credential_input: TextInput::new(),
            source_input,
            pdf_path_input: TextInput::new(),
            start_page_input: TextInput::numeric(1),
            end_page_input: TextInput::numeric(1),
            source_focus: SourceField::Text,
            current_question: 0,
            answer_input: TextInput::new(),
            feedback_scroll: 0,
            popup: Some(Popup::Intro),
            notice: None,
            should_quit: false,
            store,
            ai_tx: None,
            ai_rx: None,
        }
    }

    /// Wire the app to an already running worker (or to plain channels in tests).
    pub fn with_ai_channels(mut self, tx: Sender<AiRequest>, rx: Receiver<AiResponse>) -> Self {
        self.ai_tx = Some(tx);
        self.ai_rx = Some(rx);
        self
    }

    pub fn has_worker(&self) -> bool {
        self.ai_tx.is_some()
    }

    /// Start the AI worker once a credential is known. No-op if it's already running.
    pub fn ensure_worker(&mut self) {
        if self.ai_tx.is_some() {
            return;
        }
        let Some(credential) = self.session.credential.clone() else {
            return;
        };
        match OpenRouterClient::new(&credential, &self.config.base_url, self.config.model.clone()) {
            Ok(client) => self.start_worker(Arc::new(client)),
            Err(e) => {
                logger::log(&format!("Failed to create AI client: {}", e));
                self.alert("AI client error", &e.to_string());
            }
        }
    }

    pub fn start_worker(&mut self, backend: Arc<dyn ChatBackend>) {
        let (req_tx, req_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        match spawn_ai_worker(backend, resp_tx, req_rx) {
            Ok(_handle) => {
                self.ai_tx = Some(req_tx);
                self.ai_rx = Some(resp_rx);
            }
            Err(e) => {
                logger::log(&format!("Failed to spawn AI worker: {}", e));
                self.alert("AI worker error", &e.to_string());
            }
        }
    }

    pub fn alert(&mut self, title: &str, message: &str) {
        logger::log(&format!("Alert: {} - {}", title, message));
        self.popup = Some(Popup::Alert {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn send(&mut self, request: AiRequest) -> Result<(), QuizError> {
        let tx = self.ai_tx.as_ref().ok_or(QuizError::WorkerUnavailable)?;
        tx.send(request).map_err(|_| {
            logger::log("AI worker channel closed");
            QuizError::WorkerUnavailable
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.popup.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.popup = None;
            }
            return;
        }

        match self.session.state {
            WorkflowState::AwaitingCredential => self.handle_credential_key(key),
            WorkflowState::AwaitingSource => self.handle_source_key(key),
            WorkflowState::Generating => {}
            WorkflowState::Generated => match key.code {
                KeyCode::Enter => self.done_studying(),
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            WorkflowState::Answering => self.handle_answer_key(key),
            WorkflowState::Graded => self.handle_feedback_key(key),
        }
    }

    fn handle_credential_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_credential(),
            KeyCode::Esc => self.should_quit = true,
            _ => {
                self.credential_input.handle_key(key);
            }
        }
    }

    pub fn submit_credential(&mut self) {
        let candidate = self.credential_input.text().to_string();
        match self.session.submit_credential(self.store.as_mut(), &candidate) {
            Ok(true) => {
                self.credential_input.clear();
                self.ensure_worker();
            }
            Ok(false) => {}
            Err(e) => self.alert("Invalid API key", &e.to_string()),
        }
    }

    fn handle_source_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('g') if ctrl => self.generate_test(),
            KeyCode::Char('p') if ctrl => self.extract_pdf(),
            KeyCode::Tab => self.source_focus = self.source_focus.next(),
            KeyCode::BackTab => self.source_focus = self.source_focus.prev(),
            KeyCode::Enter if self.source_focus != SourceField::Text => self.extract_pdf(),
            _ => {
                let edited = match self.source_focus {
                    SourceField::Text => self.source_input.handle_key(key),
                    SourceField::PdfPath => self.pdf_path_input.handle_key(key),
                    SourceField::StartPage => self.start_page_input.handle_key(key),
                    SourceField::EndPage => self.end_page_input.handle_key(key),
                };
                if edited && self.source_focus == SourceField::Text {
                    self.session
                        .set_source_text(self.source_input.text().to_string());
                }
            }
        }
    }

    /// Replace the source text with pages from the selected PDF.
    /// Does nothing until a file path has been entered.
    pub fn extract_pdf(&mut self) {
        if self.pdf_path_input.is_blank() {
            return;
        }
        let path = self.pdf_path_input.text().trim().to_string();
        let start = self.start_page_input.as_number();
        let end = self.end_page_input.as_number();

        match pdf::extract_from_file(Path::new(&path), start, end) {
            Ok(extraction) => {
                self.source_input.set_text(extraction.text.clone());
                self.session.set_source_text(extraction.text);
                self.notice = Some(format!(
                    "Extracted pages {}-{} of {} from {}",
                    start, end, extraction.page_count, path
                ));
            }
            Err(e) => self.alert("Error extracting text from PDF", &e.to_string()),
        }
    }

    pub fn generate_test(&mut self) {
        self.ensure_worker();
        if !self.has_worker() {
            return;
        }
        self.notice = None;
        let Some(request) = self.session.begin_generation() else {
            return;
        };
        if let Err(e) = self.send(request) {
            self.apply_questions(Err(e));
        }
    }

    fn done_studying(&mut self) {
        if self.session.done_studying() {
            self.select_question(0);
        }
    }

    pub fn select_question(&mut self, index: usize) {
        if self.session.questions.is_empty() {
            return;
        }
        self.current_question = index.min(self.session.questions.len() - 1);
        let answer = self.session.answer(self.current_question).to_string();
        self.answer_input.set_text(answer);
    }

    fn handle_answer_key(&mut self, key: KeyEvent) {
        if self.session.grading_in_progress {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('g') if ctrl => self.check_answers(),
            KeyCode::Up | KeyCode::BackTab => {
                self.select_question(self.current_question.saturating_sub(1))
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
                self.select_question(self.current_question + 1)
            }
            _ => {
                if self.answer_input.handle_key(key) {
                    self.session
                        .set_answer(self.current_question, self.answer_input.text().to_string());
                }
            }
        }
    }

    pub fn check_answers(&mut self) {
        let Some(request) = self.session.begin_grading() else {
            return;
        };
        if let Err(e) = self.send(request) {
            self.apply_feedback(Err(e));
        }
    }

    fn handle_feedback_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.feedback_scroll = self.feedback_scroll.saturating_sub(1),
            KeyCode::Down => self.feedback_scroll = self.feedback_scroll.saturating_add(1),
            KeyCode::PageUp => self.feedback_scroll = self.feedback_scroll.saturating_sub(10),
            KeyCode::PageDown => self.feedback_scroll = self.feedback_scroll.saturating_add(10),
            KeyCode::Char('r') => self.start_over(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    pub fn start_over(&mut self) {
        if self.session.start_over() {
            self.current_question = 0;
            self.answer_input.clear();
            self.feedback_scroll = 0;
            self.source_focus = SourceField::Text;
            self.source_input.set_text(self.session.source_text.clone());
        }
    }

    /// Apply every response the worker has finished since the last call.
    pub fn poll_ai_responses(&mut self) {
        loop {
            let Some(rx) = self.ai_rx.as_ref() else {
                return;
            };
            match rx.try_recv() {
                Ok(response) => self.handle_ai_response(response),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    logger::log("AI worker disconnected");
                    self.ai_tx = None;
                    self.ai_rx = None;
                    if self.session.state == WorkflowState::Generating {
                        self.apply_questions(Err(QuizError::WorkerUnavailable));
                    }
                    if self.session.grading_in_progress {
                        self.apply_feedback(Err(QuizError::WorkerUnavailable));
                    }
                    return;
                }
            }
        }
    }

    pub fn handle_ai_response(&mut self, response: AiResponse) {
        match response {
            AiResponse::Questions(result) => self.apply_questions(result),
            AiResponse::Feedback(result) => self.apply_feedback(result),
        }
    }

    fn apply_questions(&mut self, result: Result<Vec<String>, QuizError>) {
        match self.session.finish_generation(result) {
            Ok(()) => {
                self.current_question = 0;
                self.answer_input.clear();
                self.feedback_scroll = 0;
            }
            Err(e) => self.alert(
                "Error generating questions",
                &format!("{}. {}", e, generation_hint(&e)),
            ),
        }
    }

    fn apply_feedback(&mut self, result: Result<Vec<FeedbackItem>, QuizError>) {
        match self.session.finish_grading(result) {
            Ok(()) => self.feedback_scroll = 0,
            Err(e) => self.alert(
                "Error checking answers",
                &format!("{}. Please try again.", e),
            ),
        }
    }
}

fn generation_hint(error: &QuizError) -> &'static str {
    match error {
        QuizError::Remote(_) => "Please check your API key and try again.",
        QuizError::NoQuestions => "Try again with more source text.",
        QuizError::WorkerUnavailable => "Restart TestMe and try again.",
        _ => "Please try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::MockChatBackend;
    use crate::credential::MemoryCredentialStore;
    use std::time::{Duration, Instant};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app_in(state: WorkflowState) -> (App, Receiver<AiRequest>, Sender<AiResponse>) {
        let mut session = QuizSession::new();
        if state != WorkflowState::AwaitingCredential {
            session.credential = Some("sk-test".to_string());
        }
        session.state = state;

        let (req_tx, req_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let mut app = App::new(
            session,
            Box::new(MemoryCredentialStore::default()),
            AppConfig::default(),
        )
        .with_ai_channels(req_tx, resp_rx);
        app.popup = None;
        (app, req_rx, resp_tx)
    }

    fn answering_app(questions: &[&str]) -> (App, Receiver<AiRequest>, Sender<AiResponse>) {
        let (mut app, req_rx, resp_tx) = app_in(WorkflowState::Generated);
        app.session.source_text = "Source".to_string();
        app.session.questions = questions.iter().map(|q| q.to_string()).collect();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.state, WorkflowState::Answering);
        (app, req_rx, resp_tx)
    }

    #[test]
    fn test_intro_popup_blocks_input_until_dismissed() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::AwaitingCredential);
        app.popup = Some(Popup::Intro);

        type_text(&mut app, "abc");
        assert_eq!(app.credential_input.text(), "");

        app.handle_key(key(KeyCode::Esc));
        assert!(app.popup.is_none());
        assert!(!app.should_quit);

        type_text(&mut app, "abc");
        assert_eq!(app.credential_input.text(), "abc");
    }

    #[test]
    fn test_blank_credential_shows_alert() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::AwaitingCredential);
        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.session.state, WorkflowState::AwaitingCredential);
        assert!(matches!(app.popup, Some(Popup::Alert { .. })));
    }

    #[test]
    fn test_credential_submission_advances() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::AwaitingCredential);
        type_text(&mut app, "sk-or-v1-abc");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.session.state, WorkflowState::AwaitingSource);
        assert_eq!(app.session.credential.as_deref(), Some("sk-or-v1-abc"));
        assert_eq!(app.store.load().unwrap().as_deref(), Some("sk-or-v1-abc"));
        assert!(app.popup.is_none());
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::Generating);
        app.popup = Some(Popup::Intro);
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_source_typing_and_generation_request() {
        let (mut app, req_rx, _tx) = app_in(WorkflowState::AwaitingSource);
        type_text(&mut app, "Line one");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Line two");
        assert_eq!(app.session.source_text, "Line one\nLine two");

        app.handle_key(ctrl('g'));
        assert_eq!(app.session.state, WorkflowState::Generating);
        match req_rx.try_recv().unwrap() {
            AiRequest::Generate { source_text } => assert_eq!(source_text, "Line one\nLine two"),
            other => panic!("unexpected request {:?}", other),
        }

        // Keys are ignored while generating
        type_text(&mut app, "zzz");
        assert_eq!(app.session.source_text, "Line one\nLine two");
    }

    #[test]
    fn test_generation_failure_returns_to_source() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::AwaitingSource);
        type_text(&mut app, "Some notes");
        app.handle_key(ctrl('g'));

        app.handle_ai_response(AiResponse::Questions(Err(QuizError::Remote(
            "401".to_string(),
        ))));
        assert_eq!(app.session.state, WorkflowState::AwaitingSource);
        assert_eq!(app.session.source_text, "Some notes");
        assert_eq!(app.source_input.text(), "Some notes");
        match &app.popup {
            Some(Popup::Alert { title, .. }) => assert_eq!(title, "Error generating questions"),
            other => panic!("expected alert, got {:?}", other),
        }
    }

    #[test]
    fn test_generation_alert_hint_matches_error() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::AwaitingSource);
        type_text(&mut app, "Some notes");

        app.handle_key(ctrl('g'));
        app.handle_ai_response(AiResponse::Questions(Ok(vec![])));
        match &app.popup {
            Some(Popup::Alert { message, .. }) => {
                assert!(message.contains("more source text"));
                assert!(!message.contains("API key"));
            }
            other => panic!("expected alert, got {:?}", other),
        }

        app.popup = None;
        app.handle_key(ctrl('g'));
        app.handle_ai_response(AiResponse::Questions(Err(QuizError::Remote(
            "401".to_string(),
        ))));
        match &app.popup {
            Some(Popup::Alert { message, .. }) => assert!(message.contains("API key")),
            other => panic!("expected alert, got {:?}", other),
        }
    }

    #[test]
    fn test_closed_worker_fails_generation() {
        let (mut app, req_rx, _tx) = app_in(WorkflowState::AwaitingSource);
        drop(req_rx);
        app.handle_key(ctrl('g'));
        assert_eq!(app.session.state, WorkflowState::AwaitingSource);
        assert!(matches!(app.popup, Some(Popup::Alert { .. })));
    }

    #[test]
    fn test_focus_cycles_and_page_fields_take_digits() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::AwaitingSource);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.source_focus, SourceField::PdfPath);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.source_focus, SourceField::StartPage);
        app.handle_key(key(KeyCode::Backspace));
        type_text(&mut app, "3a");
        assert_eq!(app.start_page_input.as_number(), 3);
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.source_focus, SourceField::Text);
    }

    #[test]
    fn test_extract_without_file_does_nothing() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::AwaitingSource);
        type_text(&mut app, "typed");
        app.handle_key(ctrl('p'));
        assert!(app.popup.is_none());
        assert_eq!(app.session.source_text, "typed");
    }

    #[test]
    fn test_extract_with_bad_range_keeps_source() {
        let (mut app, _rx, _tx) = app_in(WorkflowState::AwaitingSource);
        type_text(&mut app, "typed");
        app.pdf_path_input.set_text("/nonexistent/notes.pdf".to_string());
        app.start_page_input.set_text("5".to_string());
        app.end_page_input.set_text("2".to_string());

        app.handle_key(ctrl('p'));
        match &app.popup {
            Some(Popup::Alert { message, .. }) => assert!(message.contains("5-2")),
            other => panic!("expected alert, got {:?}", other),
        }
        assert_eq!(app.session.source_text, "typed");
    }

    #[test]
    fn test_answering_navigation_and_answers() {
        let (mut app, _rx, _tx) = answering_app(&["Q1", "Q2", "Q3"]);

        type_text(&mut app, "first");
        app.handle_key(key(KeyCode::Down));
        type_text(&mut app, "second");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.current_question, 2);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.current_question, 2, "stays on last question");

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.answer_input.text(), "second");
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.session.answer(0), "first");
        assert_eq!(app.session.answer(1), "secon");
        assert!(!app.session.answers.contains_key(&2));
    }

    #[test]
    fn test_check_answers_and_feedback_flow() {
        let (mut app, req_rx, _tx) = answering_app(&["Q1", "Q2"]);
        type_text(&mut app, "A1");

        app.handle_key(ctrl('g'));
        assert!(app.session.grading_in_progress);
        match req_rx.try_recv().unwrap() {
            AiRequest::Grade {
                questions, answers, ..
            } => {
                assert_eq!(questions, vec!["Q1", "Q2"]);
                assert_eq!(answers.get(&0).map(String::as_str), Some("A1"));
            }
            other => panic!("unexpected request {:?}", other),
        }

        // Editing is locked while grading
        type_text(&mut app, "x");
        assert_eq!(app.session.answer(0), "A1");

        app.handle_ai_response(AiResponse::Feedback(Ok(vec![
            FeedbackItem {
                question: "Q1".to_string(),
                answer: "A1".to_string(),
                feedback: "<p>Good</p>".to_string(),
            },
            FeedbackItem {
                question: "Q2".to_string(),
                answer: String::new(),
                feedback: "<p>Missing</p>".to_string(),
            },
        ])));
        assert_eq!(app.session.state, WorkflowState::Graded);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.feedback_scroll, 1);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.session.state, WorkflowState::AwaitingSource);
        assert_eq!(app.session.source_text, "Source");
        assert!(app.session.questions.is_empty());
        assert!(app.session.feedback.is_empty());
        assert_eq!(app.session.credential.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_grading_failure_stays_on_answers() {
        let (mut app, _rx, _tx) = answering_app(&["Q1"]);
        type_text(&mut app, "A1");
        app.handle_key(ctrl('g'));

        app.handle_ai_response(AiResponse::Feedback(Err(QuizError::Remote(
            "rate limited".to_string(),
        ))));
        assert_eq!(app.session.state, WorkflowState::Answering);
        assert!(app.session.feedback.is_empty());
        assert!(!app.session.grading_in_progress);
        assert_eq!(app.session.answer(0), "A1");
        assert!(matches!(app.popup, Some(Popup::Alert { .. })));
    }

    #[test]
    fn test_poll_responses_from_channel() {
        let (mut app, _rx, resp_tx) = app_in(WorkflowState::AwaitingSource);
        app.handle_key(ctrl('g'));
        resp_tx
            .send(AiResponse::Questions(Ok(vec!["Q1".to_string()])))
            .unwrap();

        app.poll_ai_responses();
        assert_eq!(app.session.state, WorkflowState::Generated);
    }

    #[test]
    fn test_disconnected_worker_fails_pending_grading() {
        let (mut app, _rx, resp_tx) = answering_app(&["Q1"]);
        app.handle_key(ctrl('g'));
        drop(resp_tx);

        app.poll_ai_responses();
        assert!(!app.has_worker());
        assert!(!app.session.grading_in_progress);
        assert_eq!(app.session.state, WorkflowState::Answering);
    }

    #[test]
    fn test_end_to_end_with_mock_worker() {
        let backend = Arc::new(
            MockChatBackend::replying("<ul><li>Well done</li></ul>")
                .on("Generate 1 or more", 20, Ok("What is a cell?\n\nWhat is DNA?")),
        );
        let mut app = App::new(
            QuizSession::new(),
            Box::new(MemoryCredentialStore::default()),
            AppConfig::default(),
        );
        app.popup = None;
        app.start_worker(backend);

        type_text(&mut app, "sk-key");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Cells contain DNA.");
        app.handle_key(ctrl('g'));

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.session.state == WorkflowState::Generating && Instant::now() < deadline {
            app.poll_ai_responses();
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(app.session.state, WorkflowState::Generated);
        assert_eq!(app.session.questions, vec!["What is a cell?", "What is DNA?"]);

        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "A unit of life");
        app.handle_key(ctrl('g'));

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.session.grading_in_progress && Instant::now() < deadline {
            app.poll_ai_responses();
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(app.session.state, WorkflowState::Graded);
        assert_eq!(app.session.feedback.len(), 2);
        assert_eq!(app.session.feedback[0].answer, "A unit of life");
        assert_eq!(app.session.feedback[1].answer, "");
    }
}
