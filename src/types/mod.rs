//! Core data types

pub mod document;
pub mod query;
pub mod response;

pub use document::Chunk;
pub use query::{AskRequest, IngestRequest};
pub use response::{AnswerOutcome, AskResponse, IngestResponse};
