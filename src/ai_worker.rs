use crate::ai::{generate_questions, grade_answers, ChatBackend};
use crate::error::QuizError;
use crate::logger;
use crate::models::{AiRequest, AiResponse};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Run AI requests on a dedicated thread with its own tokio runtime.
///
/// The thread exits when the request channel is closed.
pub fn spawn_ai_worker(
    backend: Arc<dyn ChatBackend>,
    ai_tx: Sender<AiResponse>,
    ai_rx: Receiver<AiRequest>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("testme::ai_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Failed to start AI runtime: {}", e));
                    drain_with_error(&ai_tx, &ai_rx, &e.to_string());
                    return;
                }
            };

            while let Ok(request) = ai_rx.recv() {
                let response = rt.block_on(handle_request(backend.as_ref(), request));
                if ai_tx.send(response).is_err() {
                    break;
                }
            }
            logger::log("Worker channel disconnected, exiting");
        })
}

pub async fn handle_request(backend: &dyn ChatBackend, request: AiRequest) -> AiResponse {
    match request {
        AiRequest::Generate { source_text } => {
            logger::log("Worker received generation request");
            AiResponse::Questions(generate_questions(backend, &source_text).await)
        }
        AiRequest::Grade {
            source_text,
            questions,
            answers,
        } => {
            logger::log(&format!(
                "Worker received grading request for {} questions",
                questions.len()
            ));
            AiResponse::Feedback(grade_answers(backend, &source_text, &questions, &answers).await)
        }
    }
}

fn drain_with_error(ai_tx: &Sender<AiResponse>, ai_rx: &Receiver<AiRequest>, error: &str) {
    while let Ok(request) = ai_rx.recv() {
        let err = QuizError::Remote(format!("AI runtime unavailable: {}", error));
        let response = match request {
            AiRequest::Generate { .. } => AiResponse::Questions(Err(err)),
            AiRequest::Grade { .. } => AiResponse::Feedback(Err(err)),
        };
        if ai_tx.send(response).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::MockChatBackend;
    use crate::models::Answers;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_worker_round_trip() {
        let backend = Arc::new(
            MockChatBackend::replying("feedback").on("Generate 1 or more", 0, Ok("Q1\n\nQ2")),
        );
        let (req_tx, req_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_ai_worker(backend, resp_tx, req_rx).unwrap();

        req_tx
            .send(AiRequest::Generate {
                source_text: "text".to_string(),
            })
            .unwrap();
        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AiResponse::Questions(Ok(questions)) => assert_eq!(questions, vec!["Q1", "Q2"]),
            other => panic!("unexpected response {:?}", other),
        }

        req_tx
            .send(AiRequest::Grade {
                source_text: "text".to_string(),
                questions: vec!["Q1".to_string(), "Q2".to_string()],
                answers: Answers::new(),
            })
            .unwrap();
        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AiResponse::Feedback(Ok(items)) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].question, "Q2");
            }
            other => panic!("unexpected response {:?}", other),
        }

        drop(req_tx);
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_handle_request_reports_failure() {
        let backend = MockChatBackend::replying("x").on("Question: Q1", 0, Err("bad key"));
        let response = handle_request(
            &backend,
            AiRequest::Grade {
                source_text: "s".to_string(),
                questions: vec!["Q1".to_string()],
                answers: Answers::new(),
            },
        )
        .await;
        assert!(matches!(response, AiResponse::Feedback(Err(QuizError::Remote(_)))));
    }
}
