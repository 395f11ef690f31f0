pub mod defaults;

use crate::core::runner::RunConfig;
use clap::Parser;
use defaults::ConnectionDefaults;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "mysql-script-runner")]
#[command(about = "Runs MySQL migration/seed scripts in the order given by a manifest file")]
pub struct CliConfig {
    #[arg(long, help = "MySQL server host (defaults file / localhost)")]
    pub host: Option<String>,

    #[arg(long, help = "MySQL user (defaults file / root)")]
    pub user: Option<String>,

    #[arg(long, help = "MySQL password")]
    pub password: Option<String>,

    #[arg(long, help = "Target database name")]
    pub database: Option<String>,

    #[arg(long, default_value = "scripts")]
    pub script_root: PathBuf,

    #[arg(long, default_value = "files.txt", help = "Execution order file")]
    pub manifest: PathBuf,

    #[arg(long, default_value = "runner.toml", help = "Connection defaults file")]
    pub config: PathBuf,

    #[arg(long, help = "Only test the server connection, run nothing")]
    pub check: bool,

    #[arg(long, help = "Continue without asking when scripts are missing")]
    pub yes: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Fully resolved settings for one invocation: CLI flags take precedence,
/// the defaults file fills the rest.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub script_root: PathBuf,
    pub manifest: PathBuf,
    pub assume_yes: bool,
}

impl CliConfig {
    pub fn resolve(self, defaults: ConnectionDefaults) -> Settings {
        Settings {
            host: self.host.unwrap_or(defaults.host),
            user: self.user.unwrap_or(defaults.user),
            password: self.password.unwrap_or(defaults.password),
            database: self.database.unwrap_or(defaults.database),
            script_root: self.script_root,
            manifest: self.manifest,
            assume_yes: self.yes,
        }
    }
}

impl Settings {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            database: self.database.clone(),
            script_root: self.script_root.clone(),
            manifest_path: self.manifest.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "mysql-script-runner",
            "--host",
            "db.example",
            "--database",
            "target",
        ]);
        let settings = cli.resolve(ConnectionDefaults::default());

        assert_eq!(settings.host, "db.example");
        assert_eq!(settings.database, "target");
        assert_eq!(settings.user, "root");
        assert_eq!(settings.script_root, PathBuf::from("scripts"));
        assert_eq!(settings.manifest, PathBuf::from("files.txt"));
    }

    #[test]
    fn defaults_fill_unset_flags() {
        let cli = CliConfig::parse_from(["mysql-script-runner"]);
        let defaults = ConnectionDefaults {
            host: "10.0.0.5".to_string(),
            user: "migrator".to_string(),
            password: "secret".to_string(),
            database: "warehouse".to_string(),
        };
        let settings = cli.resolve(defaults);

        assert_eq!(settings.host, "10.0.0.5");
        assert_eq!(settings.user, "migrator");
        assert_eq!(settings.password, "secret");
        assert_eq!(settings.database, "warehouse");
    }
}
