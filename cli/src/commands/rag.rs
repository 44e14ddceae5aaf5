//! RAG subcommands: models, ask, history.

use crate::error::{CliError, Result};
use crate::formatter::OutputFormatter;
use trainify_link::TrainifyClient;

pub async fn models(client: &TrainifyClient, formatter: &OutputFormatter) -> Result<()> {
    let models = client.rag().model_names().await?;
    println!("{}", formatter.models(&models));
    Ok(())
}

pub async fn ask(
    client: &TrainifyClient,
    formatter: &OutputFormatter,
    dataset: &str,
    model: Option<String>,
    query: &str,
) -> Result<()> {
    let model = match model {
        Some(model) => model,
        None => client
            .rag()
            .model_names()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CliError::Input("No models available".into()))?,
    };

    let answer = client.rag().ask(dataset, &model, query).await?;
    println!("{}", formatter.answer(&answer));
    Ok(())
}

pub async fn history(client: &TrainifyClient, formatter: &OutputFormatter) -> Result<()> {
    let history = client.rag().history().await?;
    println!("{}", formatter.history(&history));
    Ok(())
}
