use std::io::{self, Write};
use std::path::PathBuf;

use chat_workflow::{
    FileHandle, FileReadError, RequestWorkflow, SubmitOutcome, TransportClient, WorkflowSnapshot,
};
use colored::Colorize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::surface::{self, Command};

/// Print a notice whenever the workflow starts waiting on the service.
fn spawn_busy_indicator(mut snapshots: watch::Receiver<WorkflowSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut was_busy = snapshots.borrow().busy;
        while snapshots.changed().await.is_ok() {
            let busy = snapshots.borrow_and_update().busy;
            if busy && !was_busy {
                eprintln!("{}", "⏳ Waiting for response...".dimmed());
            }
            was_busy = busy;
        }
    })
}

pub async fn load_files(paths: &[PathBuf]) -> Result<Vec<FileHandle>, FileReadError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(FileHandle::from_path(path).await?);
    }
    Ok(files)
}

async fn submit<T: TransportClient>(workflow: &mut RequestWorkflow<T>) -> SubmitOutcome {
    let outcome = workflow.submit_request().await;
    if let SubmitOutcome::Failed(failure) = outcome {
        println!("{}", format!("❌ {}", failure).red());
    } else {
        surface::print_response(&workflow.snapshot());
    }
    outcome
}

/// Submit a single message and/or set of files, then print the result.
pub async fn send_once<T: TransportClient>(
    workflow: &mut RequestWorkflow<T>,
    message: String,
    paths: &[PathBuf],
) -> anyhow::Result<SubmitOutcome> {
    let files = load_files(paths).await?;
    workflow.update_draft_message(message);
    workflow.update_selected_files(files);

    let indicator = spawn_busy_indicator(workflow.subscribe());
    let outcome = submit(workflow).await;
    indicator.abort();

    Ok(outcome)
}

pub async fn run_interactive_chat<T: TransportClient>(
    workflow: &mut RequestWorkflow<T>,
    server_url: &str,
) -> anyhow::Result<()> {
    println!("{}", "🤖 Chat & Upload".cyan().bold());
    println!("{}", format!("Service: {}", server_url).dimmed());
    println!("{}", "Type /help for commands, /quit to leave".dimmed());
    println!();

    let indicator = spawn_busy_indicator(workflow.subscribe());

    loop {
        let snapshot = workflow.snapshot();
        print!(
            "{} {} ",
            format!("[{}]", surface::files_label(&snapshot)).dimmed(),
            "You:".cyan().bold()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match surface::parse_line(&input) {
            Command::Message(text) => {
                workflow.update_draft_message(text);
                submit(workflow).await;
            }
            Command::Send => {
                submit(workflow).await;
            }
            Command::Attach(paths) => match load_files(&paths).await {
                Ok(files) => {
                    workflow.update_selected_files(files);
                    println!("{}", surface::files_label(&workflow.snapshot()).green());
                }
                Err(e) => {
                    log::debug!("Attach failed: {:?}", e);
                    println!("{}", format!("❌ {}", e).red());
                }
            },
            Command::Clear => {
                workflow.reset();
                println!("{}", "Cleared".dimmed());
            }
            Command::Status => surface::print_status(&workflow.snapshot()),
            Command::Help => println!("{}", surface::HELP),
            Command::Unknown(command) => {
                println!("{}", format!("Unknown command: {}", command).red());
            }
            Command::Invalid(reason) => println!("{}", format!("❌ {}", reason).red()),
            Command::Quit => {
                println!("{}", "👋 Goodbye!".cyan());
                break;
            }
        }

        println!();
    }

    indicator.abort();
    Ok(())
}
