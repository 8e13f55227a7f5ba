use serde::{Deserialize, Serialize};

/// Only user turns are ever sent; the whole conversation travels in one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}
