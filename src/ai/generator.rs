use crate::ai::ChatBackend;
use crate::error::QuizError;
use crate::logger;
use crate::models::ChatTurn;

const GENERATOR_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates test questions based on given text.";

fn generation_prompt(source_text: &str) -> String {
    format!(
        "Generate 1 or more (depending on length of text) open-ended questions (relatively small in size) \
with short answers and based on the following text. The questions should require minimal prompting \
and test understanding of the key concepts. Only return the questions, no need for answers or \
explanations:\n\n{}",
        source_text
    )
}

/// One question per non-blank line, in order.
pub fn parse_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ask the model for questions about `source_text`.
///
/// An empty result is reported as [`QuizError::NoQuestions`].
pub async fn generate_questions(
    backend: &dyn ChatBackend,
    source_text: &str,
) -> Result<Vec<String>, QuizError> {
    logger::log(&format!(
        "Generating questions from {} chars of source text",
        source_text.len()
    ));

    let messages = vec![
        ChatTurn::system(GENERATOR_SYSTEM_PROMPT),
        ChatTurn::user(generation_prompt(source_text)),
    ];
    let response = backend.complete(messages).await?;
    let questions = parse_questions(&response);

    logger::log(&format!("Model returned {} questions", questions.len()));
    if questions.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    Ok(questions)
}
