use clap::Parser;
use propedge::cli::{dispatch, output, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = dispatch(cli).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
