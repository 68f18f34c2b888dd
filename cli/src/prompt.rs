//! Terminal implementations of the store's UI collaborators.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Mutex;
use todo_core::{Confirm, Decision, Navigator, TodoItem};

/// There is no detail screen in a terminal; dismissal is only recorded.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn dismiss_detail(&self) {
        tracing::debug!("detail view dismissed");
    }
}

/// Asks on stderr and reads the answer from `input` until it is one of the
/// two choices. End of input counts as Cancel.
pub struct PromptConfirm<R> {
    assume_yes: bool,
    input: Mutex<R>,
}

impl<R> PromptConfirm<R> {
    pub fn new(input: R, assume_yes: bool) -> Self {
        Self {
            assume_yes,
            input: Mutex::new(input),
        }
    }
}

impl<R> Confirm for PromptConfirm<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn confirm_delete(&self, item: &TodoItem) -> Decision {
        if self.assume_yes {
            return Decision::Delete;
        }

        let mut input = self.input.lock().await;
        loop {
            eprint!(
                "Item deleting\nAre you sure you wanna delete \"{}\"? [Cancel/Delete] ",
                item.title
            );
            let mut line = String::new();
            match input.read_line(&mut line).await {
                Ok(0) => return Decision::Cancel,
                Ok(_) => {
                    if let Some(decision) = parse_decision(&line) {
                        return decision;
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "could not read answer");
                    return Decision::Cancel;
                }
            }
        }
    }
}

fn parse_decision(answer: &str) -> Option<Decision> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "c" | "cancel" => Some(Decision::Cancel),
        "d" | "delete" => Some(Decision::Delete),
        _ => None,
    }
}
