//! Grounded prompt construction.

use crate::config::PersonaConfig;
use crate::models::ChatTurn;

/// Heading placed before the retrieved excerpts in the system turn.
pub const CONTEXT_HEADING: &str = "Relevant CV information:";

/// Build the built-in persona for `owner`.
pub fn default_persona(owner: &str) -> String {
    format!(
        "You are a helpful AI assistant answering questions about {owner}'s CV and \
         professional background.\n\n\
         Your role is to:\n\
         - Provide accurate information based on the CV documents\n\
         - Be professional and concise\n\
         - Highlight {owner}'s key strengths and qualifications\n\
         - Answer questions about experience, education, skills, and availability\n\
         - If you don't know something, politely say so instead of making up information\n\n\
         Always be helpful, professional, and accurate in your responses."
    )
}

/// The persona text to use for a configuration.
pub fn persona_for(config: &PersonaConfig) -> String {
    match &config.system_prompt {
        Some(prompt) if !prompt.trim().is_empty() => prompt.clone(),
        _ => default_persona(&config.owner_name),
    }
}

/// Compose the two-turn request: persona plus context, then the question.
///
/// The context section is always present, even when `context` is empty.
pub fn compose(persona: &str, context: &str, question: &str) -> Vec<ChatTurn> {
    vec![
        ChatTurn::system(format!("{persona}\n\n{CONTEXT_HEADING}\n{context}")),
        ChatTurn::user(question),
    ]
}
