use crate::domain::model::{ExecutionPlan, RunSummary};
use crate::domain::ports::Frontend;
use std::io::{self, BufRead, Write};

/// Interactive console front-end: prints the plan, prompts y/n on missing
/// scripts, and reports per-script and final results. `--yes` turns the
/// prompt into an automatic accept for non-interactive use.
pub struct ConsoleFrontend {
    assume_yes: bool,
}

impl ConsoleFrontend {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Frontend for ConsoleFrontend {
    fn notice(&self, message: &str) {
        println!("{}", message);
    }

    fn show_plan(&self, plan: &ExecutionPlan) {
        println!(
            "\n=== Execution Plan - {} scripts total ===",
            plan.entries.len()
        );

        for (i, entry) in plan.entries.iter().enumerate() {
            let status = if plan.is_missing(entry) { "❌" } else { "✅" };
            println!("{:3}. [{}] {} {}", i + 1, entry.group, entry.filename, status);
        }

        if !plan.missing.is_empty() {
            println!("\n⚠️ Missing scripts ({}):", plan.missing.len());
            for entry in plan.missing.iter().take(5) {
                println!("   ❌ [{}] {}", entry.group, entry.filename);
            }
            if plan.missing.len() > 5 {
                println!("   ... and {} more", plan.missing.len() - 5);
            }
        }
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            println!("{} [y/N] y", question);
            return true;
        }

        print!("{} [y/N] ", question);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn script_finished(&self, name: &str, succeeded: bool) {
        if succeeded {
            println!("✅ Executed {} successfully.", name);
        } else {
            println!("⚠️ Skipping {} due to error, continuing with next script.", name);
        }
    }

    fn show_summary(&self, summary: &RunSummary) {
        println!("\n=== Execution Summary ===");
        println!("📋 Total scripts in order: {}", summary.total_in_order);
        println!("📁 Scripts found: {}", summary.found);
        println!("❌ Scripts missing: {}", summary.missing);
        println!("✅ Scripts executed successfully: {}", summary.successful.len());
        println!("⚠️ Scripts failed: {}", summary.failed.len());

        if !summary.failed.is_empty() {
            println!("\nFailed scripts:");
            for name in &summary.failed {
                println!("   ⚠️ {}", name);
            }
        }
    }
}
