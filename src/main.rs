//! Assisto CLI binary entry point.

use assisto::cli::{chat, Cli, Commands};
use assisto::config::AssistoConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match AssistoConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Ask(args) => chat::handle_ask(&config, args).await,
        Commands::Chat(args) => chat::handle_chat(&config, args).await,
        Commands::Render(args) => match chat::read_stdin().await {
            Ok(input) => {
                println!("{}", chat::handle_render(&config, args, &input));
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("assisto=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
