use crate::ai::ChatBackend;
use crate::error::QuizError;
use crate::logger;
use crate::models::{Answers, ChatTurn, FeedbackItem};
use futures::future::try_join_all;

const GRADER_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that evaluates answers to test questions based on given text.";

fn evaluation_prompt(source_text: &str, question: &str, answer: &str) -> String {
    format!(
        "Based on the following text:\n\n{}\n\nQuestion: {}\nStudent's answer: {}\n\n\
Evaluate the student's answer. Provide brief feedback on what they got right and what they might \
have missed. Be encouraging but point out any inaccuracies. You're talking to the student directly, \
so use a conversational tone. Use bullet points to list the key points and feedback. You can \
structure the reply as HTML. Just give the evaluation, nothing else.",
        source_text, question, answer
    )
}

async fn grade_one(
    backend: &dyn ChatBackend,
    source_text: &str,
    index: usize,
    question: &str,
    answer: &str,
) -> Result<FeedbackItem, QuizError> {
    let messages = vec![
        ChatTurn::system(GRADER_SYSTEM_PROMPT),
        ChatTurn::user(evaluation_prompt(source_text, question, answer)),
    ];
    let feedback = backend.complete(messages).await.inspect_err(|e| {
        logger::log(&format!("Grading question {} failed: {}", index + 1, e));
    })?;

    Ok(FeedbackItem {
        question: question.to_string(),
        answer: answer.to_string(),
        feedback,
    })
}

/// Grade every answer with one concurrent request per question.
///
/// Results come back in question order. If any request fails the whole batch fails
/// and no feedback is returned.
pub async fn grade_answers(
    backend: &dyn ChatBackend,
    source_text: &str,
    questions: &[String],
    answers: &Answers,
) -> Result<Vec<FeedbackItem>, QuizError> {
    logger::log(&format!("Grading {} answers", questions.len()));

    let requests = questions.iter().enumerate().map(|(index, question)| {
        let answer = answers.get(&index).map(String::as_str).unwrap_or("");
        grade_one(backend, source_text, index, question, answer)
    });

    let feedback = try_join_all(requests).await?;
    logger::log("Grading batch complete");
    Ok(feedback)
}
