use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use engine::{
    OpenAiImages, PosterWorkflow,
    poster::{ArtStyle, Model},
    workflow::FieldUpdate,
};

#[derive(clap::Parser)]
struct Arg {
    model: Model,
    style: ArtStyle,
    key: String,
    title: String,

    /// Save the poster into this directory
    #[arg(long)]
    download: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();
    let Arg {
        model,
        style,
        key,
        title,
        download,
    } = Arg::parse();

    let mut workflow = PosterWorkflow::new(Box::new(OpenAiImages::default()), None);
    workflow.update_field(FieldUpdate::Title(title));
    workflow.update_field(FieldUpdate::Style(style));
    workflow.update_field(FieldUpdate::Model(model));
    workflow.update_field(FieldUpdate::Credential(key));
    if let Some(prompt) = workflow.prompt() {
        println!("Prompt: {prompt}");
    }

    let result = workflow.submit()?.await;
    let notification = workflow.finish(result)?;
    println!("{}: {}", notification.title, notification.description);

    let url = workflow
        .result()
        .ok_or(eyre!("No poster was generated"))?;
    println!("{url}");

    if let Some(dir) = download
        && let Some(save) = workflow.download(&dir)
    {
        let path = save.await?;
        println!("Saved poster to {}", path.display());
    }

    Ok(())
}
