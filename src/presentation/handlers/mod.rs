mod chat_ws;
mod error;
mod health;
mod learn;
mod users;

pub use chat_ws::chat_ws_handler;
pub use error::ErrorResponse;
pub use health::health_handler;
pub use learn::{LearnResponse, learn_handler};
pub use users::{
    UpsertProfileRequest, get_profile_handler, missing_user_id_handler, upsert_profile_handler,
};
