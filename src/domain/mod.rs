mod chat_message;
mod conversation_context;
mod document;
mod extracted_text;
mod message_role;
mod user_profile;

pub use chat_message::ChatMessage;
pub use conversation_context::ConversationContext;
pub use document::{ContentType, UploadValidationError, UploadedFile};
pub use extracted_text::ExtractedText;
pub use message_role::MessageRole;
pub use user_profile::{UserId, UserIdError, UserProfile};
