use anyhow::Result;
use flowcheck::cli::App;

#[tokio::main]
async fn main() -> Result<()> {
    let mut app = App::from_args().await?;
    let args = flowcheck::cli::Args::parse_args();

    app.run(args).await?;

    Ok(())
}
