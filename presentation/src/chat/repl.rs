//! REPL (Read-Eval-Print Loop) for chatting with a document

use crate::progress::reporter::RequestSpinner;
use colored::Colorize;
use debate_application::AskDocumentUseCase;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use tracing::debug;

/// A classified line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Exit,
    Help,
    Document,
    Unknown(String),
    Question(String),
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => ReplInput::Empty,
            "exit" | "quit" | "/exit" | "/quit" | "/q" => ReplInput::Exit,
            "/help" | "/h" | "/?" => ReplInput::Help,
            "/document" | "/doc" => ReplInput::Document,
            cmd if cmd.starts_with('/') => ReplInput::Unknown(cmd.to_string()),
            question => ReplInput::Question(question.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: AskDocumentUseCase,
    show_progress: bool,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(use_case: AskDocumentUseCase) -> Self {
        Self {
            use_case,
            show_progress: true,
            history_path: dirs::data_dir().map(|p| p.join("doc-debate").join("history.txt")),
        }
    }

    /// Set whether to show a spinner while waiting for answers
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Override the history file location
    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_path = path;
        }
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if rl.load_history(path).is_err() {
                debug!("No chat history at {}", path.display());
            }
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => match ReplInput::parse(&line) {
                    ReplInput::Empty => continue,
                    ReplInput::Exit => {
                        println!("Bye!");
                        break;
                    }
                    ReplInput::Help => Self::print_help(),
                    ReplInput::Document => {
                        let document = self.use_case.document();
                        println!(
                            "\n{} ({} bytes)\n",
                            document.name(),
                            document.content().len()
                        );
                    }
                    ReplInput::Unknown(cmd) => {
                        println!("Unknown command: {}", cmd);
                        println!("Type /help for available commands");
                    }
                    ReplInput::Question(question) => {
                        let _ = rl.add_history_entry(question.as_str());
                        self.process_question(&question).await;
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           doc-debate - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Document: {}", self.use_case.document().name());
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?          - Show this help");
        println!("  /document              - Show the loaded document");
        println!("  exit, quit, /quit, /q  - Exit chat");
        println!();
    }

    async fn process_question(&self, question: &str) {
        let answer = {
            let _spinner = self
                .show_progress
                .then(|| RequestSpinner::start("Answer Agent", "thinking..."));
            self.use_case.ask(question).await
        };

        let label = if answer.starts_with("Error:") {
            "Answer:".red().bold()
        } else {
            "Answer:".green().bold()
        };
        println!("\n{} {}\n", label, answer);
    }
}
