//! Terminal adapters for the chooser and notifier ports.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use archiver_core::ports::{Chooser, Notifier};

/// Lists numbered labels on stderr and reads a 1-based choice from stdin.
/// Blank or invalid input cancels.
pub struct PromptChooser;

#[async_trait]
impl Chooser for PromptChooser {
    async fn choose(&self, placeholder: &str, labels: &[String]) -> Option<usize> {
        let mut menu = format!("{placeholder}:\n");
        for (index, label) in labels.iter().enumerate() {
            menu.push_str(&format!("  {}. {label}\n", index + 1));
        }
        menu.push_str("> ");

        let mut stderr = tokio::io::stderr();
        stderr.write_all(menu.as_bytes()).await.ok()?;
        stderr.flush().await.ok()?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .ok()?;
        parse_selection(&line, labels.len())
    }
}

fn parse_selection(input: &str, count: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

/// Prints notifications on stdout.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
    }
}
