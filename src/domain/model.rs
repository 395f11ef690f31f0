use std::path::PathBuf;

/// One line of the manifest after parsing: the folder the script is
/// resolved under and its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub group: String,
    pub filename: String,
}

/// A manifest entry whose file was located on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundScript {
    pub group: String,
    pub path: PathBuf,
}

impl FoundScript {
    pub fn script_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The validated plan for one run: the full ordered entry list plus its
/// found/missing partition. Both partitions preserve manifest order.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub entries: Vec<ManifestEntry>,
    pub found: Vec<FoundScript>,
    pub missing: Vec<ManifestEntry>,
}

impl ExecutionPlan {
    pub fn is_missing(&self, entry: &ManifestEntry) -> bool {
        self.missing.contains(entry)
    }
}

/// Outcome of executing one found script.
#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    pub name: String,
    pub succeeded: bool,
}

/// Final tally for a run. Produced once, never persisted.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub total_in_order: usize,
    pub found: usize,
    pub missing: usize,
    pub successful: Vec<String>,
    pub failed: Vec<String>,
}

/// How a run ended when no fatal error occurred.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// All found scripts were attempted; the summary holds the tally.
    Completed(RunSummary),
    /// The manifest parsed to zero entries.
    NoScripts,
    /// The operator declined to continue with missing scripts.
    Cancelled,
}
