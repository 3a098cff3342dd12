#![allow(async_fn_in_trait)]

mod adapter;
mod context;
mod service;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::user::SelfAssessment;

pub use adapter::Model;
pub use context::{calendar_context, date_context};
pub use service::QueryService;

#[cfg(test)]
pub use service::tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default, rename = "chatHistory")]
    pub chat_history: Option<Vec<ChatMessage>>,
    #[serde(default)]
    pub memory_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReply {
    pub success: bool,
    pub response: String,
    pub memory_confirmation_needed: bool,
    pub memory_data: Option<serde_json::Value>,
}

/// Payload of the model service's `/ask` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskRequest {
    pub query: String,
    #[serde(rename = "selfAssessment")]
    pub self_assessment: SelfAssessment,
    pub username: String,
    pub name: String,
    pub own_model: bool,
    #[serde(rename = "chatHistory")]
    pub chat_history: Vec<ChatMessage>,
    pub memory_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub memory_confirmation_needed: bool,
    #[serde(default)]
    pub memory_data: Option<serde_json::Value>,
    #[serde(default, rename = "expandedQuery")]
    pub expanded_query: Option<String>,
    #[serde(default, rename = "documentsRetrieved")]
    pub documents_retrieved: Option<u32>,
}

pub trait ModelBackend {
    async fn ask(&self, request: &AskRequest) -> anyhow::Result<AskResponse>;
}

#[derive(Debug, Display, Error)]
pub enum QueryError {
    #[display("Query cannot be empty")]
    EmptyQuery,

    #[display("User not found")]
    UserNotFound,

    #[display("User self-assessment data not found")]
    MissingSelfAssessment,

    #[display("Error in model processing")]
    ModelUnavailable(#[error(not(source))] anyhow::Error),

    #[display("Invalid response from model")]
    InvalidModelResponse,
}
