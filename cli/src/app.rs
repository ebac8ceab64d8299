use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use mars_core::{AnalysisView, MarsBackend, RagView};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::output::{
    render_analysis, render_history, render_ingest_status, render_message, RenderOptions,
};

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Analysis screen: one run, then print the outcome
pub async fn run_analysis(backend: &dyn MarsBackend, options: &RenderOptions) -> Result<()> {
    let mut view = AnalysisView::new();

    let spinner = spinner("Analyzing Mars data...");
    view.run_analysis(backend).await;
    spinner.finish_and_clear();

    println!("{}", render_analysis(&view, options));
    Ok(())
}

async fn ingest_with_spinner(backend: &dyn MarsBackend, view: &mut RagView) {
    let spinner = spinner("Ingesting...");
    view.run_ingest(backend).await;
    spinner.finish_and_clear();
    println!("{}", render_ingest_status(view));
}

pub async fn run_ingest(backend: &dyn MarsBackend) -> Result<()> {
    let mut view = RagView::new();
    ingest_with_spinner(backend, &mut view).await;
    Ok(())
}

/// Ask one question and print the resulting exchange
pub async fn run_single_question(
    question: String,
    backend: &dyn MarsBackend,
    options: &RenderOptions,
) -> Result<()> {
    info!("Asking single question: {}", question);
    let mut view = RagView::new();
    view.set_input(question);

    if view.ask_question(backend).await.is_none() {
        println!("Nothing to ask: the question is empty.");
        return Ok(());
    }

    println!("{}", render_history(view.history(), options));
    Ok(())
}

/// What a line typed at the chat prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Exit,
    Ingest,
    History,
    Question(String),
}

impl ChatInput {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            ChatInput::Exit
        } else if trimmed.eq_ignore_ascii_case("/ingest") {
            ChatInput::Ingest
        } else if trimmed.eq_ignore_ascii_case("/history") {
            ChatInput::History
        } else {
            ChatInput::Question(line.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

/// Ingest + chat screen as an interactive prompt
pub async fn run_interactive_chat(
    backend: &dyn MarsBackend,
    options: &RenderOptions,
    ingest_first: bool,
) -> Result<()> {
    let mut view = RagView::new();

    println!("Ask questions about the ingested Mars data.");
    println!("Type '/ingest' to ingest data, '/history' to show the conversation, 'exit' or 'quit' to leave.");
    println!();

    if ingest_first {
        ingest_with_spinner(backend, &mut view).await;
        println!();
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}: ", "You".green().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let line = match lines.next() {
            Some(line) => line.context("Failed to read input")?,
            None => break,
        };

        match ChatInput::parse(&line) {
            ChatInput::Exit => {
                println!("Exiting chat session.");
                break;
            }
            ChatInput::Ingest => ingest_with_spinner(backend, &mut view).await,
            ChatInput::History => println!("{}", render_history(view.history(), options)),
            ChatInput::Question(question) => {
                view.set_input(question);
                debug!("Submitting question, {} messages so far", view.history().len());
                if let Some(reply) = view.ask_question(backend).await {
                    println!("{}", render_message(reply, options));
                }
            }
        }

        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_input() {
        assert_eq!(ChatInput::parse("exit\n"), ChatInput::Exit);
        assert_eq!(ChatInput::parse("  QUIT "), ChatInput::Exit);
        assert_eq!(ChatInput::parse("/ingest"), ChatInput::Ingest);
        assert_eq!(ChatInput::parse("/history"), ChatInput::History);
        assert_eq!(
            ChatInput::parse("Did you find water?\r\n"),
            ChatInput::Question("Did you find water?".to_string())
        );
    }

    #[test]
    fn test_blank_line_is_a_blank_question() {
        assert_eq!(ChatInput::parse("   "), ChatInput::Question("   ".to_string()));
    }
}
