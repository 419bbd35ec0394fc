//! Shared response bodies

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Plain confirmation or informational message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
