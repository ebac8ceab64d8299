use colored::*;
use mars_core::{AnalysisView, ChatMessage, RagView, RequestState, Role};
use pulldown_cmark::{
    CodeBlockKind, Event as MdEvent, HeadingLevel, Options, Parser as MdParser, Tag,
};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

/// How analysis and chat text is turned into terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub snippet_length: usize,
    pub full_raw_data: bool,
    pub markdown: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            snippet_length: mars_core::DEFAULT_SNIPPET_LENGTH,
            full_raw_data: false,
            markdown: false,
        }
    }
}

fn body_text(text: &str, options: &RenderOptions) -> String {
    if options.markdown {
        render_markdown(text)
    } else {
        text.to_string()
    }
}

fn error_line(message: &str) -> String {
    format!("{} {}", "Error:".red().bold(), message)
}

/// Render the analysis screen for its current state
pub fn render_analysis(view: &AnalysisView, options: &RenderOptions) -> String {
    match view.state() {
        RequestState::Idle => String::new(),
        RequestState::Loading => "Loading...".to_string(),
        RequestState::Failed(message) => error_line(message),
        RequestState::Succeeded(result) => {
            let raw = if options.full_raw_data {
                result.nasa_raw_data.clone()
            } else {
                result.raw_data_snippet(options.snippet_length)
            };
            let raw_heading = if options.full_raw_data {
                "🛰️ Raw NASA Data:"
            } else {
                "🛰️ Raw NASA Data (Snippet):"
            };

            format!(
                "{}\n{}\n\n{}\n{}\n",
                "🤖 GPT Analysis:".bright_cyan().bold(),
                body_text(&result.gpt_analysis, options),
                raw_heading.bright_cyan().bold(),
                raw
            )
        }
    }
}

/// Ingest status line, empty before the first ingest
pub fn render_ingest_status(view: &RagView) -> String {
    match (view.ingest_state(), view.status()) {
        (_, None) => String::new(),
        (RequestState::Failed(_), Some(status)) => status.red().to_string(),
        (_, Some(status)) => format!("{} {}", "Status:".yellow().bold(), status),
    }
}

pub fn render_message(message: &ChatMessage, options: &RenderOptions) -> String {
    match message.role {
        Role::User => format!("{}: {}", "You".green().bold(), message.content),
        Role::Bot => format!(
            "{}: {}",
            "Bot".blue().bold(),
            body_text(&message.content, options)
        ),
    }
}

pub fn render_history(history: &[ChatMessage], options: &RenderOptions) -> String {
    history
        .iter()
        .map(|message| render_message(message, options))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Show usage instructions when no subcommand is provided
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "mars-cli analyze".green().bold());
    println!("    Fetch NASA data and show the GPT analysis");
    println!();
    println!("  {}", "mars-cli ingest".green().bold());
    println!("    Ingest Mars imagery into the backend's vector store");
    println!();
    println!("  {}", "mars-cli chat [--ingest]".green().bold());
    println!("    Ask questions about ingested data interactively");
    println!();
    println!("  {}", "mars-cli ask \"your question\"".green().bold());
    println!("    Ask a single question");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --backend-url <URL>  Backend address (default http://localhost:8080)");
    println!("  --config <PATH>      Config file path");
    println!("  --markdown           Render answers as markdown");
    println!("  --help               Show this help message");
    println!();
}

/// Render markdown in the terminal with syntax highlighting
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = MdParser::new_ext(markdown, options);

    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let theme = theme_set
        .themes
        .get("base16-ocean.dark")
        .or_else(|| theme_set.themes.values().next());

    let mut in_code_block = false;
    let mut code_block_lang = String::new();
    let mut code_block_content = String::new();
    let mut output = String::new();

    for event in parser {
        match event {
            MdEvent::Start(Tag::Heading(level, ..)) => match level {
                HeadingLevel::H1 | HeadingLevel::H2 => {
                    output.push_str(&format!("\n{} ", "#".bright_cyan().bold()))
                }
                _ => output.push('\n'),
            },
            MdEvent::End(Tag::Heading(..)) => output.push('\n'),
            MdEvent::Start(Tag::Paragraph) => {
                if !output.is_empty() && !output.ends_with('\n') {
                    output.push_str("\n\n");
                }
            }
            MdEvent::End(Tag::Paragraph) => output.push('\n'),
            MdEvent::Start(Tag::CodeBlock(info)) => {
                in_code_block = true;
                code_block_lang = match info {
                    CodeBlockKind::Fenced(lang) => lang.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code_block_content.clear();
                output.push('\n');
            }
            MdEvent::End(Tag::CodeBlock(_)) => {
                in_code_block = false;
                output.push_str(&"─".repeat(40).dimmed().to_string());
                output.push('\n');

                match theme {
                    Some(theme) => {
                        let syntax = syntax_set
                            .find_syntax_by_token(&code_block_lang)
                            .unwrap_or_else(|| syntax_set.find_syntax_plain_text());
                        let mut highlighter = HighlightLines::new(syntax, theme);
                        for line in LinesWithEndings::from(&code_block_content) {
                            let highlighted = highlighter
                                .highlight_line(line, &syntax_set)
                                .unwrap_or_default();
                            output.push_str(&as_24_bit_terminal_escaped(&highlighted, false));
                        }
                        output.push_str("\x1b[0m");
                    }
                    None => output.push_str(&code_block_content),
                }

                output.push_str(&"─".repeat(40).dimmed().to_string());
                output.push('\n');
            }
            MdEvent::Start(Tag::List(_)) | MdEvent::End(Tag::List(_)) => output.push('\n'),
            MdEvent::Start(Tag::Item) => output.push_str(&format!("{}  ", "•".yellow())),
            MdEvent::End(Tag::Item) => output.push('\n'),
            MdEvent::Code(code) => output.push_str(&format!("`{}`", code)),
            MdEvent::Text(text) => {
                if in_code_block {
                    code_block_content.push_str(&text);
                } else {
                    output.push_str(&text);
                }
            }
            MdEvent::SoftBreak => output.push(' '),
            MdEvent::HardBreak => output.push('\n'),
            _ => {}
        }
    }

    output.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars_core::{AnalysisResult, MarsError};

    fn plain() {
        colored::control::set_override(false);
    }

    fn analyzed(raw: String) -> AnalysisView {
        let mut view = AnalysisView::new();
        view.begin_analysis();
        view.finish_analysis(Ok(AnalysisResult {
            gpt_analysis: "No water detected".to_string(),
            nasa_raw_data: raw,
        }));
        view
    }

    #[test]
    fn test_analysis_shows_gpt_text_and_500_char_snippet() {
        plain();
        let raw: String = ('a'..='z').cycle().take(501).collect();
        let view = analyzed(raw.clone());

        let rendered = render_analysis(&view, &RenderOptions::default());
        let expected_snippet = format!("{}...", &raw[..500]);

        assert!(rendered.contains("No water detected"));
        assert!(rendered.contains(&expected_snippet));
        assert!(!rendered.contains(&raw));
    }

    #[test]
    fn test_full_raw_data_option() {
        plain();
        let raw = "r".repeat(700);
        let view = analyzed(raw.clone());

        let options = RenderOptions {
            full_raw_data: true,
            ..Default::default()
        };
        let rendered = render_analysis(&view, &options);
        assert!(rendered.contains(&raw));
        assert!(!rendered.contains("(Snippet)"));
    }

    #[test]
    fn test_analysis_error_and_loading() {
        plain();
        let mut view = AnalysisView::new();
        assert_eq!(render_analysis(&view, &RenderOptions::default()), "");

        view.begin_analysis();
        assert_eq!(render_analysis(&view, &RenderOptions::default()), "Loading...");

        view.finish_analysis(Err(MarsError::HttpError { status_code: 500 }));
        assert_eq!(
            render_analysis(&view, &RenderOptions::default()),
            "Error: HTTP error! status: 500"
        );
    }

    #[test]
    fn test_ingest_status_line() {
        plain();
        let mut view = RagView::new();
        assert_eq!(render_ingest_status(&view), "");

        view.begin_ingest();
        view.finish_ingest(Ok("Ingested 3 images".to_string()));
        assert_eq!(render_ingest_status(&view), "Status: Ingested 3 images");
    }

    #[test]
    fn test_history_rendering() {
        plain();
        let history = vec![
            ChatMessage::user("Did you find water?".to_string()),
            ChatMessage::bot("Yes, ice deposits found at pole.".to_string()),
        ];
        assert_eq!(
            render_history(&history, &RenderOptions::default()),
            "You: Did you find water?\nBot: Yes, ice deposits found at pole."
        );
    }

    #[test]
    fn test_markdown_rendering() {
        plain();
        let rendered = render_markdown("# Findings\n\nSome *ice* found.\n\n- north pole\n- crater");
        assert!(rendered.contains("Findings"));
        assert!(rendered.contains("Some ice found."));
        assert!(rendered.contains("•  north pole"));
    }
}
