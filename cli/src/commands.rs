//! One function per subcommand, all driving a single `TodoStore`.
//!
//! Every command starts from a fresh fetch so that the local collection
//! holds the items the command refers to, then prints the resulting
//! collection. A container error ends the command with a non-zero exit.

use color_eyre::eyre::Result;
use tokio::io::AsyncBufRead;
use todo_core::{
    validate_title, Navigator, RemoveOutcome, RequestClient, ReqwestTransport, StoreError,
    TodoItem, TodoStore, Transport,
};

use crate::config::{Cli, Command};
use crate::prompt::{LogNavigator, PromptConfirm};

pub async fn run(cli: Cli) -> Result<()> {
    let transport = match cli.timeout() {
        Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
        None => ReqwestTransport::new()?,
    };
    let assume_yes = matches!(cli.command, Command::Remove { yes: true, .. });
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let store = TodoStore::new(
        RequestClient::new(&cli.base_url, transport),
        LogNavigator,
        PromptConfirm::new(input, assume_yes),
    );
    tracing::debug!(base_url = %cli.base_url, "store ready");

    let todos = execute(&store, cli.command).await?;
    print!("{}", render(&todos));
    Ok(())
}

/// Run `command` against `store` and return the collection afterwards.
pub async fn execute<T, N, R>(
    store: &TodoStore<T, N, PromptConfirm<R>>,
    command: Command,
) -> Result<Vec<TodoItem>>
where
    T: Transport,
    N: Navigator,
    R: AsyncBufRead + Unpin + Send,
{
    if let Command::Add { title } | Command::Update { title, .. } = &command {
        validate_title(title)?;
    }

    eprintln!("Loading...");
    let fetched = store.fetch_todos().await;
    check(store, fetched.map_err(StoreError::from)).await?;

    match command {
        Command::List => {}
        Command::Add { title } => {
            let added = store.add_todo(&title).await;
            check(store, added.map_err(StoreError::from)).await?;
        }
        Command::Update { id, title } => {
            let updated = store.update_todo(&id, &title).await;
            check(store, updated.map_err(StoreError::from)).await?;
        }
        Command::Remove { id, .. } => {
            match check(store, store.remove_todo(&id).await).await? {
                RemoveOutcome::Removed(item) => tracing::info!(id = %item.id, "deleted"),
                RemoveOutcome::Cancelled => eprintln!("Cancelled."),
            }
        }
    }

    Ok(store.todos().await)
}

/// Surface the container error the way the list screen would, then fail.
async fn check<T, N, R, V>(
    store: &TodoStore<T, N, PromptConfirm<R>>,
    result: std::result::Result<V, StoreError>,
) -> Result<V>
where
    T: Transport,
    N: Navigator,
    R: AsyncBufRead + Unpin + Send,
{
    match result {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Some(message) = store.error().await {
                eprintln!("{message}");
            }
            Err(err.into())
        }
    }
}

pub fn render(todos: &[TodoItem]) -> String {
    if todos.is_empty() {
        return "No todos yet.\n".to_string();
    }
    todos
        .iter()
        .map(|todo| format!("{}\t{}\n", todo.id, todo.title))
        .collect()
}
