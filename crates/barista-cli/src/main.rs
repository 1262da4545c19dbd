//! CLI entry point - the composition root.
//!
//! Parses arguments, bootstraps a `CliContext` and dispatches to handlers.
//! Failures are printed once and mapped to an exit code.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use barista_cli::{
    BeanCommand, Cli, CliConfig, CliError, Commands, ShotCommand, bootstrap, handlers,
};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}

/// `RUST_LOG` wins unless `-v` asks for debug output.
fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::with_defaults(cli.db.as_deref())?;
    let ctx = bootstrap(config);

    match command {
        Commands::Bean { command } => match command {
            BeanCommand::Add { name, roaster } => handlers::bean::add(&ctx, name, roaster).await?,
            BeanCommand::List => handlers::bean::list(&ctx).await?,
        },
        Commands::Shot { command } => match command {
            ShotCommand::Add(args) => handlers::shot::add(&ctx, args).await?,
            ShotCommand::List { bean, min_rating } => {
                handlers::shot::list(&ctx, bean, min_rating).await?;
            }
        },
        Commands::Stats { json } => handlers::stats::execute(&ctx, json).await?,
        Commands::Export { out } => handlers::export::execute(&ctx, out).await?,
        Commands::Paths => handlers::paths::execute(&ctx)?,
    }

    Ok(())
}
