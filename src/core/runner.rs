use crate::core::{executor, manifest, preprocess, resolve};
use crate::domain::model::{ExecutionPlan, RunOutcome, RunSummary, ScriptOutcome};
use crate::domain::ports::{DbServer, Frontend, SqlSession};
use crate::utils::error::{Result, RunnerError};
use std::path::PathBuf;

/// Operator-supplied parameters for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub database: String,
    pub script_root: PathBuf,
    pub manifest_path: PathBuf,
}

/// Per-run execution state, owned by the runner for the duration of one
/// invocation and dropped at the end. Nothing here survives a run.
struct RunContext<S: SqlSession> {
    session: S,
    database: String,
}

/// Sequences a run: ensure database → connect → parse manifest → validate
/// → confirm on missing → execute in order → summarize. One connection,
/// strictly sequential; a failed script never stops the loop.
pub struct ScriptRunner<D: DbServer, F: Frontend> {
    server: D,
    frontend: F,
}

impl<D: DbServer, F: Frontend> ScriptRunner<D, F> {
    pub fn new(server: D, frontend: F) -> Self {
        Self { server, frontend }
    }

    /// Connectivity check only: reaches the server and reports the result.
    pub async fn test_connection(&self) -> Result<()> {
        tracing::info!("Testing MySQL server connection");
        self.server.ping().await?;
        tracing::info!("MySQL server connection successful");
        self.frontend
            .notice("Successfully connected to MySQL server!");
        Ok(())
    }

    pub async fn run(&mut self, config: &RunConfig) -> Result<RunOutcome> {
        tracing::info!("Starting script execution by order");
        tracing::info!(
            "Database: {}, Script root: {}, Order file: {}",
            config.database,
            config.script_root.display(),
            config.manifest_path.display()
        );

        // Checked up front so a bad manifest path aborts before any
        // database work happens.
        if !config.manifest_path.exists() {
            return Err(RunnerError::ManifestNotFound(config.manifest_path.clone()));
        }

        self.ensure_database(&config.database).await?;

        let session = self.server.connect(&config.database).await?;
        tracing::info!("Connected to database '{}' successfully", config.database);
        self.frontend.notice(&format!(
            "Connected to database '{}' successfully.",
            config.database
        ));

        let mut context = RunContext {
            session,
            database: config.database.clone(),
        };

        // The session drops (and the connection closes) when `context`
        // goes out of scope, on every exit path below.
        let entries = manifest::parse_manifest(&config.manifest_path)?;

        if entries.is_empty() {
            tracing::warn!("No scripts found in the order file");
            self.frontend.notice("No scripts found in the order file.");
            return Ok(RunOutcome::NoScripts);
        }

        let plan = resolve::validate_scripts(&config.script_root, entries);
        self.frontend.show_plan(&plan);

        if !plan.missing.is_empty() {
            tracing::warn!("Found {} missing scripts", plan.missing.len());
            let question = format!(
                "{} scripts are missing.\nContinue with available scripts?",
                plan.missing.len()
            );
            if !self.frontend.confirm(&question) {
                tracing::info!("User chose to cancel due to missing scripts");
                return Ok(RunOutcome::Cancelled);
            }
        }

        tracing::info!("Starting script execution");
        self.frontend.notice("\n=== Starting Script Execution ===");

        let outcomes = self.execute_all(&mut context, &plan).await;

        let summary = summarize(&plan, outcomes);
        log_summary(&summary);
        self.frontend.show_summary(&summary);

        Ok(RunOutcome::Completed(summary))
    }

    /// Creates the target database if the server does not have it yet.
    async fn ensure_database(&self, database: &str) -> Result<()> {
        tracing::info!("Checking if database '{}' exists", database);
        let databases = self.server.list_databases().await?;

        if databases.iter().any(|name| name == database) {
            tracing::info!("Database '{}' already exists", database);
            self.frontend
                .notice(&format!("Database '{}' already exists.", database));
        } else {
            tracing::info!("Creating database '{}'", database);
            self.server.create_database(database).await?;
            tracing::info!("Database '{}' created successfully", database);
            self.frontend
                .notice(&format!("Database '{}' created successfully.", database));
        }

        Ok(())
    }

    /// Runs every found script in manifest order. Preprocessing and
    /// statement errors mark the script failed; the loop always advances.
    async fn execute_all(
        &self,
        context: &mut RunContext<D::Session>,
        plan: &ExecutionPlan,
    ) -> Vec<ScriptOutcome> {
        let total = plan.found.len();
        let mut outcomes = Vec::with_capacity(total);

        for (i, script) in plan.found.iter().enumerate() {
            let name = script.script_name();
            tracing::info!("Executing {}/{}: [{}] {}", i + 1, total, script.group, name);
            self.frontend.notice(&format!(
                "Executing {}/{}: [{}] {}",
                i + 1,
                total,
                script.group,
                name
            ));

            let result = match preprocess::rewrite_script(&script.path, &context.database) {
                Ok(text) => {
                    executor::execute_script(&mut context.session, &script.path, &text).await
                }
                Err(e) => Err(e),
            };

            let succeeded = match result {
                Ok(()) => {
                    tracing::info!("Executed {} successfully", name);
                    true
                }
                Err(e) => {
                    tracing::warn!(
                        "Skipping {} due to error, continuing with next script: {}",
                        name,
                        e
                    );
                    false
                }
            };

            self.frontend.script_finished(&name, succeeded);
            outcomes.push(ScriptOutcome { name, succeeded });
        }

        outcomes
    }
}

fn summarize(plan: &ExecutionPlan, outcomes: Vec<ScriptOutcome>) -> RunSummary {
    let mut successful = Vec::new();
    let mut failed = Vec::new();

    for outcome in outcomes {
        if outcome.succeeded {
            successful.push(outcome.name);
        } else {
            failed.push(outcome.name);
        }
    }

    RunSummary {
        total_in_order: plan.entries.len(),
        found: plan.found.len(),
        missing: plan.missing.len(),
        successful,
        failed,
    }
}

fn log_summary(summary: &RunSummary) {
    tracing::info!("Execution Summary:");
    tracing::info!("Total scripts in order: {}", summary.total_in_order);
    tracing::info!("Scripts found: {}", summary.found);
    tracing::info!("Scripts missing: {}", summary.missing);
    tracing::info!("Scripts executed successfully: {}", summary.successful.len());
    tracing::info!("Scripts failed: {}", summary.failed.len());
}
