//! Line-oriented terminal front-end over an [`ArtSession`].

use std::path::{Path, PathBuf};

use artdx_chat::{templates, ArtSession, Attachment, TurnOutcome};
use artdx_core::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(PathBuf),
    /// Zero-based suggestion index.
    Chip(usize),
    Reset,
    Quit,
    Say(String),
    Invalid(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Say(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name {
            "upload" if !arg.is_empty() => Command::Upload(PathBuf::from(arg)),
            "upload" => Command::Invalid("usage: /upload <path>".to_string()),
            "chip" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Chip(n - 1),
                _ => Command::Invalid("usage: /chip <n> (n starts at 1)".to_string()),
            },
            "reset" => Command::Reset,
            "quit" | "exit" => Command::Quit,
            _ => Command::Invalid(format!("unknown command '/{}'", name)),
        }
    }
}

/// Upload the image at `path` and print the confirmation.
pub fn upload(session: &mut ArtSession, path: &Path) -> Result<()> {
    let attachment = Attachment::from_path(path)?;
    let name = attachment.name().to_string();
    session.upload(attachment)?;
    println!("{}", templates::upload_ready(&name));
    Ok(())
}

/// Send one message and print the rendered answer and suggestion chips.
pub async fn ask(session: &mut ArtSession, text: &str) -> Result<TurnOutcome> {
    println!("… {}", session.progress_text_for(text));
    let outcome = session.handle_message(text).await?;
    println!("\n{}\n", outcome.display);
    print_suggestions(&outcome.suggestions);
    Ok(outcome)
}

fn print_suggestions(suggestions: &[String]) {
    for (i, s) in suggestions.iter().enumerate() {
        println!("  [{}] {}", i + 1, s);
    }
}

/// Read commands from stdin until `/quit` or end of input.
pub async fn run(session: &mut ArtSession) -> std::io::Result<()> {
    for message in session.render() {
        println!("{}\n", message.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Reset => match session.reset() {
                Ok(()) => {
                    for message in session.render() {
                        println!("{}\n", message.text);
                    }
                }
                Err(e) => eprintln!("{}", e),
            },
            Command::Upload(path) => {
                if let Err(e) = upload(session, &path) {
                    eprintln!("{}", e);
                }
            }
            Command::Chip(index) => match session.suggestion(index) {
                Some(text) => {
                    println!("> {}", text);
                    if let Err(e) = ask(session, &text).await {
                        eprintln!("{}", e);
                    }
                }
                None => eprintln!("no suggestion #{}", index + 1),
            },
            Command::Say(text) => {
                if let Err(e) = ask(session, &text).await {
                    eprintln!("{}", e);
                }
            }
            Command::Invalid(msg) => eprintln!("{}", msg),
        }
    }
    Ok(())
}
