use clap::Parser;
use taskdeck::cli::commands::Cli;
use taskdeck::cli::handlers;
use taskdeck::io::paths;
use taskdeck::logging;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            logging::init_tui(&paths::log_path(), cli.verbose);
            let result = handlers::connect(cli.api_url.as_deref())
                .and_then(|(client, config)| taskdeck::tui::run(client, &config));
            if let Err(e) = result {
                tracing::error!(error = %e, "tui exited with error");
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            logging::init_cli(cli.verbose);
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
