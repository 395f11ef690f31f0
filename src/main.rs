use clap::Parser;
use mysql_script_runner::config::defaults::ConnectionDefaults;
use mysql_script_runner::utils::logger;
use mysql_script_runner::{CliConfig, ConsoleFrontend, MySqlServer, RunOutcome, ScriptRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting mysql-script-runner");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let defaults = ConnectionDefaults::load(&cli.config)?;
    let check_only = cli.check;
    let settings = cli.resolve(defaults);

    let server = MySqlServer::new(&settings.host, &settings.user, &settings.password);
    let frontend = ConsoleFrontend::new(settings.assume_yes);
    let mut runner = ScriptRunner::new(server, frontend);

    if check_only {
        if let Err(e) = runner.test_connection().await {
            tracing::error!("Connection test failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
        println!("✅ Connection test passed.");
        return Ok(());
    }

    match runner.run(&settings.run_config()).await {
        Ok(RunOutcome::Completed(_)) => {
            tracing::info!("Script execution completed for database '{}'", settings.database);
            println!(
                "✅ Scripts execution completed for database '{}'.",
                settings.database
            );
        }
        Ok(RunOutcome::NoScripts) => {
            tracing::warn!("Nothing to do: manifest contained no scripts");
        }
        Ok(RunOutcome::Cancelled) => {
            tracing::info!("Run cancelled by operator");
            println!("Run cancelled.");
        }
        Err(e) => {
            tracing::error!("Error occurred: {}", e);
            eprintln!("❌ An error occurred: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
