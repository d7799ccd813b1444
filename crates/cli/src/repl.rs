//! Interactive review of generated notes before export.

use crate::read_input;
use anyhow::Result;
use notes_ai::TextGenerator;
use notes_core::text::preview;
use notes_core::{ProcessingState, SlideRecord};
use notes_pipeline::Pipeline;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};

/// A parsed review command. Slide numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    List,
    Show(usize),
    Sources(usize),
    Edit(usize),
    Set(usize, String),
    Export(Option<String>),
    Open(PathBuf),
    Reset,
    Status,
    Help,
    Quit,
}

/// Parse one line of input.
pub fn parse_command(line: &str) -> std::result::Result<ReplCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "list" | "ls" => Ok(ReplCommand::List),
        "show" => slide_number(rest).map(ReplCommand::Show),
        "sources" => slide_number(rest).map(ReplCommand::Sources),
        "edit" => slide_number(rest).map(ReplCommand::Edit),
        "set" => {
            let (number, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "Usage: set <slide> <notes>".to_string())?;
            Ok(ReplCommand::Set(slide_number(number)?, text.trim().to_string()))
        }
        "export" => Ok(ReplCommand::Export(
            Some(rest.to_string()).filter(|name| !name.is_empty()),
        )),
        "open" if !rest.is_empty() => Ok(ReplCommand::Open(PathBuf::from(rest))),
        "open" => Err("Usage: open <path>".to_string()),
        "reset" => Ok(ReplCommand::Reset),
        "status" => Ok(ReplCommand::Status),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        _ => Err(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            word
        )),
    }
}

fn slide_number(text: &str) -> std::result::Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Expected a slide number, got '{}'", text.trim())),
    }
}

/// Run the review prompt until the user quits.
pub async fn run_review<G: TextGenerator>(pipeline: &Pipeline<G>, output_dir: &Path) -> Result<()> {
    println!("Review mode - type 'help' for commands, 'quit' to exit");

    let mut editor = DefaultEditor::new()
        .map_err(|e| anyhow::anyhow!("Failed to initialize editor: {}", e))?;

    loop {
        let prompt = format!("notes ({})> ", pipeline.snapshot().state);
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("Use 'quit' to exit");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(line).ok();

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        if command == ReplCommand::Quit {
            break;
        }
        if let Err(e) = execute(command, pipeline, output_dir, &mut editor).await {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

async fn execute<G: TextGenerator>(
    command: ReplCommand,
    pipeline: &Pipeline<G>,
    output_dir: &Path,
    editor: &mut DefaultEditor,
) -> Result<()> {
    match command {
        ReplCommand::List => {
            let slides = pipeline.slides();
            if slides.is_empty() {
                println!("No slides loaded.");
            }
            for slide in &slides {
                println!(
                    "{:>3}  {:<40}  {}",
                    slide.slide_number,
                    preview(&slide.original_text, 40),
                    preview(&slide.speaker_notes, 60)
                );
            }
        }
        ReplCommand::Show(n) => {
            let slide = slide_at(pipeline, n)?;
            print_slide(&slide);
        }
        ReplCommand::Sources(n) => {
            let slide = slide_at(pipeline, n)?;
            if slide.sources.is_empty() {
                println!("No sources for slide {}.", n);
            }
            for (i, source) in slide.sources.iter().enumerate() {
                println!("{}. {}\n   {}", i + 1, source.title, source.uri);
            }
        }
        ReplCommand::Edit(n) => {
            slide_at(pipeline, n)?;
            println!("Enter new notes for slide {}; finish with a line containing only '.'", n);
            if let Some(notes) = read_multiline(editor)? {
                pipeline.edit_notes(n - 1, notes)?;
                println!("Updated notes for slide {}.", n);
            } else {
                println!("Edit cancelled.");
            }
        }
        ReplCommand::Set(n, notes) => {
            pipeline.edit_notes(n - 1, notes)?;
            println!("Updated notes for slide {}.", n);
        }
        ReplCommand::Export(name) => {
            let path = pipeline.export(output_dir, name.as_deref()).await?;
            println!("Wrote {}", path.display());
        }
        ReplCommand::Open(path) => {
            let input = read_input(&path)?;
            let count = pipeline.process(input).await?;
            println!("Generated notes for {} slides.", count);
        }
        ReplCommand::Reset => {
            pipeline.reset();
            println!("Session cleared.");
        }
        ReplCommand::Status => {
            let snapshot = pipeline.snapshot();
            println!("State:  {}", snapshot.state);
            if let Some(name) = &snapshot.file_name {
                println!("File:   {}", name);
            }
            println!("Slides: {}", snapshot.slide_count);
            if snapshot.progress.total > 0 {
                println!(
                    "Progress: {}/{} ({:.0}%)",
                    snapshot.progress.current,
                    snapshot.progress.total,
                    snapshot.progress.fraction() * 100.0
                );
            }
            if let Some(error) = &snapshot.error {
                println!("Error:  {}", error);
            }
            if snapshot.state == ProcessingState::Error {
                println!("Use 'reset' or 'open <path>' to start over.");
            }
        }
        ReplCommand::Help => print_help(),
        ReplCommand::Quit => {}
    }
    Ok(())
}

fn slide_at<G: TextGenerator>(pipeline: &Pipeline<G>, n: usize) -> Result<SlideRecord> {
    let slides = pipeline.slides();
    let len = slides.len();
    slides
        .into_iter()
        .nth(n - 1)
        .ok_or_else(|| anyhow::anyhow!("Slide {} does not exist (deck has {} slides)", n, len))
}

/// Read lines until a lone `.`; `None` when interrupted.
fn read_multiline(editor: &mut DefaultEditor) -> Result<Option<String>> {
    let mut lines = Vec::new();
    loop {
        match editor.readline("... ") {
            Ok(line) if line.trim_end() == "." => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(anyhow::anyhow!("Failed to read input: {}", err)),
        }
    }
    Ok(Some(lines.join("\n")))
}

/// Print a slide's text, notes and sources.
pub fn print_slide(slide: &SlideRecord) {
    println!("=== Slide {} ===", slide.slide_number);
    if slide.has_preview() {
        println!("[page image]");
    }
    println!("{}", slide.original_text);
    println!("--- Speaker notes ---");
    println!("{}", slide.speaker_notes);
    if !slide.sources.is_empty() {
        println!("--- Sources ---");
        for source in &slide.sources {
            println!("{} <{}>", source.title, source.uri);
        }
    }
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  list               List slides with a preview of their notes");
    println!("  show <n>           Show slide n with its full notes");
    println!("  sources <n>        Show the web sources cited for slide n");
    println!("  edit <n>           Rewrite the notes of slide n (end with '.')");
    println!("  set <n> <text>     Replace the notes of slide n with one line");
    println!("  export [name]      Write the presentation with notes");
    println!("  open <path>        Process another file");
    println!("  reset              Clear the current session");
    println!("  status             Show the session state");
    println!("  help               Show this help");
    println!("  quit               Exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("list"), Ok(ReplCommand::List));
        assert_eq!(parse_command("  status "), Ok(ReplCommand::Status));
        assert_eq!(parse_command("reset"), Ok(ReplCommand::Reset));
        assert_eq!(parse_command("q"), Ok(ReplCommand::Quit));
        assert_eq!(parse_command("?"), Ok(ReplCommand::Help));
    }

    #[test]
    fn test_parse_slide_commands() {
        assert_eq!(parse_command("show 3"), Ok(ReplCommand::Show(3)));
        assert_eq!(parse_command("sources 1"), Ok(ReplCommand::Sources(1)));
        assert_eq!(parse_command("edit 2"), Ok(ReplCommand::Edit(2)));
        assert!(parse_command("show 0").is_err());
        assert!(parse_command("show two").is_err());
        assert!(parse_command("edit").is_err());
    }

    #[test]
    fn test_parse_set_keeps_text() {
        assert_eq!(
            parse_command("set 2 Spend two minutes here.  Then pause."),
            Ok(ReplCommand::Set(2, "Spend two minutes here.  Then pause.".to_string()))
        );
        assert!(parse_command("set 2").is_err());
    }

    #[test]
    fn test_parse_export_and_open() {
        assert_eq!(parse_command("export"), Ok(ReplCommand::Export(None)));
        assert_eq!(
            parse_command("export handout"),
            Ok(ReplCommand::Export(Some("handout".to_string())))
        );
        assert_eq!(
            parse_command("open talks/My Deck.pptx"),
            Ok(ReplCommand::Open(PathBuf::from("talks/My Deck.pptx")))
        );
        assert!(parse_command("open").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = parse_command("frobnicate").unwrap_err();
        assert!(err.starts_with("Unknown command: frobnicate"));
    }
}
