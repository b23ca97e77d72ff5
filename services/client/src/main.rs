use anyhow::Context;
use directory_client::terminal::{self, Command, HELP};
use directory_client::{Config, DirectoryView, HttpDirectoryApi};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the rendered screen, logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let api = HttpDirectoryApi::new(&config.api_url).context("invalid DIRECTORY_API_URL")?;
    tracing::info!(url = %config.api_url, "directory client starting");

    let mut view = DirectoryView::new(api);
    view.load().await;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(terminal::render(&view).as_bytes()).await?;
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        match Command::parse(&line) {
            Ok(Command::Help) => {
                stdout.write_all(format!("{HELP}\n").as_bytes()).await?;
            }
            Ok(command) => {
                if !terminal::apply(&mut view, command).await {
                    break;
                }
            }
            Err(error) => {
                stdout
                    .write_all(format!("{error}\n{HELP}\n").as_bytes())
                    .await?;
            }
        }
    }
    Ok(())
}
