use crate::domain::model::{ExecutionPlan, FoundScript, ManifestEntry};
use std::path::Path;

/// Checks every manifest entry against `<script_root>/<group>/<filename>`
/// and partitions the list into found and missing, both in manifest order.
pub fn validate_scripts(script_root: &Path, entries: Vec<ManifestEntry>) -> ExecutionPlan {
    tracing::info!("Scanning and validating scripts in: {}", script_root.display());

    let mut found = Vec::new();
    let mut missing = Vec::new();

    for entry in &entries {
        let script_path = script_root.join(&entry.group).join(&entry.filename);

        if script_path.exists() {
            tracing::debug!("Found script: [{}] {}", entry.group, entry.filename);
            found.push(FoundScript {
                group: entry.group.clone(),
                path: script_path,
            });
        } else {
            tracing::warn!("Missing script: [{}] {}", entry.group, entry.filename);
            missing.push(entry.clone());
        }
    }

    tracing::info!(
        "Validation complete: {} found, {} missing",
        found.len(),
        missing.len()
    );

    ExecutionPlan {
        entries,
        found,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn entry(group: &str, filename: &str) -> ManifestEntry {
        ManifestEntry {
            group: group.to_string(),
            filename: filename.to_string(),
        }
    }

    fn write_script(root: &Path, group: &str, filename: &str) {
        let dir = root.join(group);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(filename), "SELECT 1;").unwrap();
    }

    #[test]
    fn partitions_found_and_missing_in_manifest_order() {
        let root = tempdir().unwrap();
        write_script(root.path(), "a", "x.sql");
        write_script(root.path(), "a", "y.sql");

        let entries = vec![entry("a", "x.sql"), entry("a", "y.sql"), entry("b", "z.sql")];
        let plan = validate_scripts(root.path(), entries);

        assert_eq!(plan.found.len(), 2);
        assert_eq!(plan.found[0].path, root.path().join("a").join("x.sql"));
        assert_eq!(plan.found[1].path, root.path().join("a").join("y.sql"));
        assert_eq!(plan.missing, vec![entry("b", "z.sql")]);
    }

    #[test]
    fn partitions_are_disjoint_and_cover_all_entries() {
        let root = tempdir().unwrap();
        write_script(root.path(), "g1", "a.sql");
        write_script(root.path(), "g2", "c.sql");

        let entries = vec![
            entry("g1", "a.sql"),
            entry("g1", "b.sql"),
            entry("g2", "c.sql"),
            entry("g3", "d.sql"),
        ];
        let plan = validate_scripts(root.path(), entries.clone());

        assert_eq!(plan.found.len() + plan.missing.len(), entries.len());

        // Interleaving found and missing by original position reconstructs
        // the input sequence.
        let mut found_iter = plan.found.iter();
        let mut missing_iter = plan.missing.iter();
        for original in &entries {
            if plan.missing.contains(original) {
                assert_eq!(missing_iter.next().unwrap(), original);
            } else {
                let next = found_iter.next().unwrap();
                assert_eq!(next.group, original.group);
                assert!(next.path.ends_with(
                    Path::new(&original.group).join(&original.filename)
                ));
            }
        }
    }

    #[test]
    fn all_missing_when_root_does_not_exist() {
        let plan = validate_scripts(
            Path::new("/nonexistent/root"),
            vec![entry("a", "x.sql")],
        );
        assert!(plan.found.is_empty());
        assert_eq!(plan.missing.len(), 1);
    }

    #[test]
    fn empty_entry_list_yields_empty_plan() {
        let root = tempdir().unwrap();
        let plan = validate_scripts(root.path(), Vec::new());
        assert!(plan.entries.is_empty());
        assert!(plan.found.is_empty());
        assert!(plan.missing.is_empty());
    }
}
