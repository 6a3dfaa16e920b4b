//! `quicknote` command-line front end.
//!
//! Each subcommand is a short sequence of [`UiEvent`]s against a
//! [`NotesController`], followed by a plain-text render of the view.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail};
use clap::{Parser, Subcommand};

use quicknote_core::{defaults, parse_note_id};

use crate::api::NotesApi;
use crate::controller::{NotesController, UiEvent};
use crate::view::{error_message, CONFIRM_PROMPT};

#[derive(Debug, Parser)]
#[command(name = "quicknote")]
#[command(author, version, about = "Add, list and delete quick notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the quicknote API
    #[arg(long, env = "QUICKNOTE_URL", default_value = defaults::CLIENT_BASE_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = defaults::CLIENT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// List all notes, most recent first
    List,

    /// Add a note
    Add {
        /// Note text
        text: String,
    },

    /// Delete a note by id
    Delete {
        /// Note id as shown by `list`
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Run one subcommand. Prompts are read from `input`; everything the user
/// sees is written to `output`.
pub async fn run<A, R, W>(
    controller: &NotesController<A>,
    command: Commands,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()>
where
    A: NotesApi,
    R: BufRead,
    W: Write,
{
    match command {
        Commands::List => {
            controller.dispatch(UiEvent::Load).await;
        }
        Commands::Add { text } => {
            controller.dispatch(UiEvent::DraftChanged(text)).await;
            match controller.submit().await {
                None => bail!("note text must not be blank"),
                Some(Ok(_)) => controller.dispatch(UiEvent::Load).await,
                Some(Err(_)) => {}
            }
        }
        Commands::Delete { id, yes } => {
            let id = parse_note_id(&id)?;
            controller.dispatch(UiEvent::Load).await;
            if let Some(last) = controller.snapshot().await.last_error {
                bail!(error_message(&last));
            }

            if !controller.request_delete(id).await {
                bail!("no note with id {}", id);
            }

            let confirmed = yes || ask(CONFIRM_PROMPT, input, output)?;
            if !confirmed {
                controller.dispatch(UiEvent::DeleteCancelled).await;
                writeln!(output, "Cancelled")?;
                return Ok(());
            }

            if let Some(Ok(false)) = controller.confirm_delete().await {
                writeln!(output, "Note {} was already deleted", id)?;
            }
        }
    }

    fail_on_error(controller, output).await
}

/// Render the view; turn a recorded error into the command's failure.
async fn fail_on_error<A: NotesApi, W: Write>(
    controller: &NotesController<A>,
    output: &mut W,
) -> anyhow::Result<()> {
    let state = controller.snapshot().await;
    match &state.last_error {
        Some(last) => Err(anyhow!(error_message(last))),
        None => {
            write!(output, "{}", controller.view().await)?;
            Ok(())
        }
    }
}

fn ask<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> anyhow::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delete_with_yes() {
        let cli = Cli::try_parse_from(["quicknote", "delete", "abc", "--yes"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Delete {
                id: "abc".into(),
                yes: true
            }
        );
    }

    #[test]
    fn test_url_flag_overrides_default() {
        let cli =
            Cli::try_parse_from(["quicknote", "--url", "http://notes.local:8080", "list"]).unwrap();
        assert_eq!(cli.url, "http://notes.local:8080");
        assert_eq!(cli.command, Commands::List);
    }

    #[test]
    fn test_add_requires_text() {
        assert!(Cli::try_parse_from(["quicknote", "add"]).is_err());
    }

    #[test]
    fn test_ask_accepts_yes_variants() {
        for (answer, expected) in [("y\n", true), ("YES\n", true), ("\n", false), ("no\n", false)] {
            let mut input = answer.as_bytes();
            let mut output = Vec::new();
            assert_eq!(ask("Delete?", &mut input, &mut output).unwrap(), expected);
            assert_eq!(String::from_utf8(output).unwrap(), "Delete? [y/N] ");
        }
    }
}
