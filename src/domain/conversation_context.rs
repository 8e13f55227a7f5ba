use super::ChatMessage;

const SEED_PREFIX: &str = "this is pdf text: ";
const USER_PROMPT_PREFIX: &str = "user prompt: ";
const ASSISTANT_REPLY_PREFIX: &str = "assistant reply: ";

/// Accumulated text of one chat session. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContext {
    text: String,
}

impl ConversationContext {
    pub fn seeded(seed_text: &str) -> Self {
        let mut text = String::with_capacity(SEED_PREFIX.len() + seed_text.len() + 1);
        text.push_str(SEED_PREFIX);
        text.push_str(seed_text);
        text.push('\n');
        Self { text }
    }

    pub fn push_user_prompt(&mut self, prompt: &str) {
        self.text.push_str(USER_PROMPT_PREFIX);
        self.text.push_str(prompt);
    }

    pub fn push_assistant_reply(&mut self, reply: &str) {
        self.text.push_str(ASSISTANT_REPLY_PREFIX);
        self.text.push_str(reply);
        self.text.push('\n');
    }

    /// The whole context as the single user turn sent for completion.
    pub fn as_messages(&self) -> Vec<ChatMessage> {
        vec![ChatMessage::user(self.text.clone())]
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn size_bytes(&self) -> usize {
        self.text.len()
    }

}
