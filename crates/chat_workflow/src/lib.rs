//! chat_workflow - Request submission workflow for the chat/upload client
//!
//! This crate owns the draft message and file selection of a chat session,
//! decides whether a submission is a text chat or a multi-file upload, drives
//! the transport and normalizes every outcome into one displayable string.

pub mod config;
pub mod error;
pub mod files;
pub mod request;
pub mod state;
pub mod transport;
pub mod workflow;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, FileReadError, TransportError, WorkflowFailure};
pub use files::FileHandle;
pub use request::{
    classify, ChatReply, FileReply, Submission, SubmissionKind, TextRequest, UploadReply,
    UploadRequest,
};
pub use state::{WorkflowEvent, WorkflowPhase, WorkflowSnapshot};
pub use transport::{HttpTransport, TransportClient};
pub use workflow::{RequestWorkflow, SubmitOutcome, PROMPT_FOR_INPUT};
