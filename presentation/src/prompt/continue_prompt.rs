//! Asks the operator whether the follow-up loop should move on

use async_trait::async_trait;
use debate_application::ContinuePrompt;
use std::io::{self, BufRead, Write};

pub const CONTINUE_QUESTION: &str = "Continue with the next initial question? (y/n): ";

/// Ask until the answer is `y` or `n`; end of input counts as `n`.
pub fn ask_to_continue(input: &mut impl BufRead, output: &mut impl Write) -> bool {
    loop {
        let _ = write!(output, "\n{CONTINUE_QUESTION}");
        let _ = output.flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                let _ = writeln!(output, "\nDetected EOF. Exiting interaction loop.");
                return false;
            }
            Ok(_) => {}
        }

        match line.trim().to_lowercase().as_str() {
            "y" => return true,
            "n" => {
                let _ = writeln!(output, "Exiting interaction loop.");
                return false;
            }
            _ => {
                let _ = writeln!(output, "Invalid input. Please enter 'y' or 'n'.");
            }
        }
    }
}

/// [`ContinuePrompt`] reading from the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveContinuePrompt;

#[async_trait]
impl ContinuePrompt for InteractiveContinuePrompt {
    async fn should_continue(&self, _next: usize, _total: usize) -> bool {
        tokio::task::spawn_blocking(|| {
            let stdin = io::stdin();
            let stdout = io::stdout();
            ask_to_continue(&mut stdin.lock(), &mut stdout.lock())
        })
        .await
        .unwrap_or(false)
    }
}
