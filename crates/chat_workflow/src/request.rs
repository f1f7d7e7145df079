//! Typed requests and replies exchanged with the chat service.

use serde::{Deserialize, Serialize};

use crate::files::FileHandle;

/// Body of a text-only chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRequest {
    pub message: String,
}

/// A multi-file upload. The draft travels alongside the files as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub files: Vec<FileHandle>,
    pub message: String,
}

impl UploadRequest {
    /// Sent to the service as the redundant `fileCount` field.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// What a submission turns into, decided from the draft and file selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Text,
    Upload,
    Empty,
}

/// Any file selection wins over the draft; a blank draft with no files is `Empty`.
pub fn classify(draft: &str, files: &[FileHandle]) -> SubmissionKind {
    if !files.is_empty() {
        SubmissionKind::Upload
    } else if !draft.trim().is_empty() {
        SubmissionKind::Text
    } else {
        SubmissionKind::Empty
    }
}

/// A request ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Text(TextRequest),
    Upload(UploadRequest),
}

impl Submission {
    /// Returns `None` when there is nothing to send.
    ///
    /// Only emptiness is checked on the trimmed draft; the message itself is
    /// forwarded raw in both variants.
    pub fn build(draft: &str, files: &[FileHandle]) -> Option<Self> {
        match classify(draft, files) {
            SubmissionKind::Text => Some(Self::Text(TextRequest {
                message: draft.to_string(),
            })),
            SubmissionKind::Upload => Some(Self::Upload(UploadRequest {
                files: files.to_vec(),
                message: draft.to_string(),
            })),
            SubmissionKind::Empty => None,
        }
    }

    pub fn kind(&self) -> SubmissionKind {
        match self {
            Self::Text(_) => SubmissionKind::Text,
            Self::Upload(_) => SubmissionKind::Upload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReply {
    pub filename: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReply {
    pub responses: Vec<FileReply>,
}

impl UploadReply {
    /// `filename: response` pairs separated by a blank line, in service order.
    pub fn render(&self) -> String {
        self.responses
            .iter()
            .map(|reply| format!("{}: {}", reply.filename, reply.response))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileHandle {
        FileHandle::guessed(name, name.as_bytes().to_vec())
    }

    #[test]
    fn classify_covers_all_three_branches() {
        assert_eq!(classify("Hello", &[]), SubmissionKind::Text);
        assert_eq!(classify("", &[file("a.txt")]), SubmissionKind::Upload);
        assert_eq!(classify("describe", &[file("a.txt")]), SubmissionKind::Upload);
        assert_eq!(classify("", &[]), SubmissionKind::Empty);
        assert_eq!(classify(" \t\n ", &[]), SubmissionKind::Empty);
    }

    #[test]
    fn text_submission_keeps_raw_message() {
        let submission = Submission::build("  Hello  ", &[]).expect("submission");
        assert_eq!(
            submission,
            Submission::Text(TextRequest {
                message: "  Hello  ".to_string()
            })
        );
    }

    #[test]
    fn submission_kind_matches_classification() {
        let files = vec![file("a.txt")];
        let text = Submission::build("Hello", &[]).expect("text");
        let upload = Submission::build("Hello", &files).expect("upload");

        assert_eq!(text.kind(), classify("Hello", &[]));
        assert_eq!(upload.kind(), classify("Hello", &files));
        assert_eq!(upload.kind(), SubmissionKind::Upload);
    }

    #[test]
    fn upload_submission_forwards_blank_draft() {
        let files = vec![file("a.txt"), file("b.txt")];
        let Some(Submission::Upload(upload)) = Submission::build("   ", &files) else {
            panic!("expected an upload submission");
        };
        assert_eq!(upload.message, "   ");
        assert_eq!(upload.file_count(), 2);
        assert_eq!(upload.files, files);
    }

    #[test]
    fn empty_state_builds_nothing() {
        assert!(Submission::build("", &[]).is_none());
    }

    #[test]
    fn upload_reply_renders_pairs_in_order() {
        let reply: UploadReply = serde_json::from_value(serde_json::json!({
            "responses": [
                {"filename": "b.txt", "response": "second"},
                {"filename": "a.txt", "response": "first"}
            ]
        }))
        .expect("reply");

        assert_eq!(reply.render(), "b.txt: second\n\na.txt: first");
    }

    #[test]
    fn upload_reply_with_no_entries_renders_empty() {
        let reply = UploadReply { responses: vec![] };
        assert_eq!(reply.render(), "");
    }

    #[test]
    fn text_request_serializes_message_field() {
        let body = serde_json::to_value(TextRequest {
            message: "Hi".to_string(),
        })
        .expect("json");
        assert_eq!(body, serde_json::json!({"message": "Hi"}));
    }
}
