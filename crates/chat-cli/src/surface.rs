//! Terminal presentation surface
//!
//! Turns input lines into workflow intents and renders workflow snapshots.
//! Nothing here holds state of its own.

use std::path::PathBuf;

use chat_workflow::WorkflowSnapshot;
use colored::Colorize;

pub const OUTPUT_PLACEHOLDER: &str = "Output";
pub const NO_FILES_LABEL: &str = "Select Files";

pub const HELP: &str = "\
Type a message and press Enter to send it.
  /attach <path>...  select files to upload (replaces the current selection);
                     quote paths that contain spaces
  /attach            clear the file selection
  /say <text>        send <text> as-is, even if it looks like a command
  //<text>           send /<text>
  /send              submit the current message and files
  /clear             clear message, files and response
  /status            show the current state
  /help              show this help
  /quit, exit, quit  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A plain line: replaces the draft and submits.
    Message(String),
    Attach(Vec<PathBuf>),
    Send,
    Clear,
    Status,
    Help,
    Quit,
    Unknown(String),
    /// A command whose arguments could not be parsed.
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();

    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        return Command::Quit;
    }

    if !trimmed.starts_with('/') {
        return Command::Message(line.to_string());
    }

    // `//text` escapes a leading slash.
    if trimmed.starts_with("//") {
        return Command::Message(line.replacen('/', "", 1));
    }

    let (command, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    match command {
        "/say" => Command::Message(say_text(line).to_string()),
        "/attach" => match shlex::split(rest) {
            Some(paths) => Command::Attach(paths.into_iter().map(PathBuf::from).collect()),
            None => Command::Invalid("Unbalanced quotes in /attach".to_string()),
        },
        "/send" => Command::Send,
        "/clear" => Command::Clear,
        "/status" => Command::Status,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Everything after `/say ` on the raw line.
fn say_text(line: &str) -> &str {
    let after = line.trim_start().trim_start_matches("/say");
    after.strip_prefix(char::is_whitespace).unwrap_or(after)
}

pub fn files_label(snapshot: &WorkflowSnapshot) -> String {
    if snapshot.has_files() {
        format!("Files: {}", snapshot.joined_file_names())
    } else {
        NO_FILES_LABEL.to_string()
    }
}

/// Submission is refused while a request is in flight.
pub fn can_submit(snapshot: &WorkflowSnapshot) -> bool {
    snapshot.phase().accepts_user_input()
}

pub fn send_label(snapshot: &WorkflowSnapshot) -> &'static str {
    if can_submit(snapshot) {
        "Send"
    } else {
        "Sending..."
    }
}

pub fn response_text(snapshot: &WorkflowSnapshot) -> &str {
    snapshot.visible_response().unwrap_or(OUTPUT_PLACEHOLDER)
}

pub fn print_response(snapshot: &WorkflowSnapshot) {
    let text = response_text(snapshot);
    if snapshot.visible_response().is_some() {
        println!("{}", text);
    } else {
        println!("{}", text.dimmed());
    }
}

pub fn print_status(snapshot: &WorkflowSnapshot) {
    let draft = if snapshot.draft.is_empty() {
        "(empty)".dimmed().to_string()
    } else {
        snapshot.draft.clone()
    };
    println!("{} {}", "Message:".cyan(), draft);
    println!("{} {}", "Files:".cyan(), files_label(snapshot));
    println!("{} {}", "State:".cyan(), snapshot.phase().description());
    println!("{} [{}]", "Action:".cyan(), send_label(snapshot));
    print_response(snapshot);
}
