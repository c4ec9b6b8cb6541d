//! Prompt texts for the retrieval chain and the learner.

use super::{Message, Role};

pub const GREETING: &str = "What do you want to learn about? Here are some suggested prompts: ";

const CONDENSE_PREAMBLE: &str = "Given the following conversation and a follow up question, \
rephrase the follow up question to be a standalone question, in its original language.";

const ANSWER_SYSTEM_TEMPLATE: &str = "Use the following pieces of context to answer the user's \
question. \nIf you don't know the answer, just say that you don't know, don't try to make up an \
answer.\n----------------\n{context}";

/// The four starter questions offered for a song.
pub fn suggested_prompts(title: &str, artist: &str) -> [String; 4] {
    [
        format!("What is the meaning of the song {} by {}?", title, artist),
        format!(
            "What is the most difficult English grammar point in the song {} by {}? Can you explain it?",
            title, artist
        ),
        format!(
            "What is the most common English word in the song {} by {} (excluding stopwords)? Can you give some example sentences using that word?",
            title, artist
        ),
        format!(
            "What is the most worth learning English phrase in the song {} by {}? Can you explain it and provide practical example using the phrase?",
            title, artist
        ),
    ]
}

/// `Human:`/`Assistant:` transcript of the buffer memory.
pub fn format_history(history: &[Message]) -> String {
    history
        .iter()
        .filter_map(|m| match m.role {
            Role::User => Some(format!("\nHuman: {}", m.content)),
            Role::Assistant => Some(format!("\nAssistant: {}", m.content)),
            Role::System => None,
        })
        .collect()
}

/// Prompt asking the model to rewrite `question` as a standalone question.
///
/// History and question are inserted verbatim, braces included.
pub fn condense_question(history: &[Message], question: &str) -> String {
    format!(
        "{}\n\nChat History:\n{}\nFollow Up Input: {}\nStandalone question:",
        CONDENSE_PREAMBLE,
        format_history(history),
        question
    )
}

pub fn answer_messages(context: &[&str], question: &str) -> Vec<Message> {
    vec![
        Message::system(ANSWER_SYSTEM_TEMPLATE.replace("{context}", &context.join("\n\n"))),
        Message::user(question),
    ]
}
