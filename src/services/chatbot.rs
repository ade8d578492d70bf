// src/services/chatbot.rs
//
// Pure helpers for the chat endpoint: credential resolution and the
// fixed prompt template wrapped around every user message.

/// Returned in the response body when neither the request nor the
/// environment supplies an API key.
pub const MISSING_KEY_MESSAGE: &str =
    "Please provide a valid Gemini API key to use the chat feature.";

/// Pick the API key for a call: the request's own key wins when it's
/// non-blank, otherwise the configured default (also required non-blank).
pub fn resolve_api_key(request_key: Option<&str>, default_key: Option<&str>) -> Option<String> {
    request_key
        .filter(|k| !k.trim().is_empty())
        .or(default_key.filter(|k| !k.trim().is_empty()))
        .map(str::to_string)
}

/// Wrap the raw user message in the assistant framing sent downstream.
/// The message is embedded verbatim, whatever it contains.
pub fn build_prompt(message: &str) -> String {
    format!(
        "You are an AI assistant built for social good. \
         Your responses should be helpful, ethical, and focused on positive impact.\n\n\
         User message: {message}\n\n\
         Please provide a thoughtful and helpful response."
    )
}
