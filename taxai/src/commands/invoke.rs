use anyhow::Context;
use taxai_api_rest::FunctionEvent;
use taxai_config::Config;
use taxai_di::Provides;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::environment::{types::ContactFunction, Provider};

/// Read a single function event as json from stdin, handle it and print the
/// response to stdout.
pub async fn invoke(config: Config) -> anyhow::Result<()> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read event from stdin")?;
    let event = serde_json::from_str::<FunctionEvent>(&input).context("Failed to parse event")?;

    let mut provider = Provider::new(&config)?;
    let function: ContactFunction = provider.provide();
    let response = function.handle(event).await;

    let mut output = serde_json::to_vec_pretty(&response)?;
    output.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&output).await?;
    stdout.flush().await?;

    Ok(())
}
