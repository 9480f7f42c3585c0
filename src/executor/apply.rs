use crate::catalogue::Action;
use crate::error::RigupError;
use crate::executor::{ExecutionPlan, Phase};
use crate::utils::{files, interrupt, Executor};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Lines of command output kept for the summary
const OUTPUT_TAIL_LINES: usize = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    pub dry_run: bool,
    pub fail_fast: bool,
}

/// Tracks failures during apply execution
#[derive(Debug, Default)]
struct ApplyErrors {
    phase_failures: Vec<PhaseFailure>,
}

#[derive(Debug)]
struct PhaseFailure {
    phase: String,
    action: String,
    reason: String,
    output_tail: Option<String>,
    skipped_actions: usize,
}

impl ApplyErrors {
    fn has_failures(&self) -> bool {
        !self.phase_failures.is_empty()
    }
}

/// Whether an error must stop the run regardless of `fail_fast`
fn is_fatal(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<RigupError>()
        .map_or(false, RigupError::is_fatal)
}

fn output_tail(error: &anyhow::Error) -> Option<String> {
    match error.downcast_ref::<RigupError>() {
        Some(RigupError::CommandFailure { output, .. }) if !output.trim().is_empty() => {
            let lines: Vec<&str> = output.lines().collect();
            let start = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
            Some(lines[start..].join("\n"))
        }
        _ => None,
    }
}

pub fn apply_plan(plan: &ExecutionPlan, executor: &Executor, options: ApplyOptions) -> Result<()> {
    let mut errors = ApplyErrors::default();

    println!("{}", "=".repeat(50).bright_blue());
    println!("{}", "Starting rigup".bright_blue().bold());
    println!("{}", "=".repeat(50).bright_blue());
    println!();

    if options.dry_run {
        println!("{}", "[DRY RUN MODE]".yellow().bold());
        println!();
    }

    for phase in &plan.phases {
        println!("{}", format!("▸ {}...", phase.label).bright_cyan().bold());

        if phase.actions.is_empty() {
            println!("  ⊘ Nothing to do on this platform");
            println!();
            continue;
        }

        if options.dry_run {
            for action in &phase.actions {
                println!("    → Would {}", action);
            }
            println!();
            continue;
        }

        match apply_phase(phase, executor) {
            Ok(None) => println!("  ✓ {}", phase.name.green()),
            Ok(Some(failure)) => {
                println!("  ✗ {} failed: {}", phase.name.red(), failure.reason);
                errors.phase_failures.push(failure);

                if options.fail_fast {
                    print_summary(&errors);
                    bail!("Aborting: phase '{}' failed (fail_fast enabled)", phase.name);
                }
            }
            Err(error) => {
                if errors.has_failures() {
                    print_summary(&errors);
                }
                return Err(error);
            }
        }
        println!();
    }

    if errors.has_failures() {
        print_summary(&errors);
        bail!("rigup completed with errors");
    }

    println!("{}", "=".repeat(50).bright_green());
    if options.dry_run {
        println!("{}", "✓ rigup dry run completed!".bright_green().bold());
    } else {
        println!("{}", "✓ rigup completed!".bright_green().bold());
    }
    println!("{}", "=".repeat(50).bright_green());

    Ok(())
}

/// Run a phase's actions in order, stopping at the first failure.
///
/// A recorded failure comes back as `Ok(Some(_))`; fatal errors are returned
/// as `Err` so the whole run stops.
fn apply_phase(phase: &Phase, executor: &Executor) -> Result<Option<PhaseFailure>> {
    for (index, action) in phase.actions.iter().enumerate() {
        if let Err(error) = apply_action(action, executor) {
            if is_fatal(&error) {
                return Err(error);
            }
            log::warn!("{} failed at '{}': {:#}", phase.name, action, error);
            return Ok(Some(PhaseFailure {
                phase: phase.name.clone(),
                action: action.to_string(),
                reason: format!("{:#}", error),
                output_tail: output_tail(&error),
                skipped_actions: phase.actions.len() - index - 1,
            }));
        }
    }
    Ok(None)
}

fn apply_action(action: &Action, executor: &Executor) -> Result<()> {
    if interrupt::is_interrupted() {
        return Err(RigupError::Interrupted.into());
    }

    match action {
        Action::Run(command) => {
            executor.execute(command)?.check(command)?;
        }
        Action::AppendLine {
            path,
            marker,
            line,
            elevated,
        } => {
            let _guard = if *elevated {
                Some(executor.privileges().elevate()?)
            } else {
                None
            };
            create_parent(path)?;
            let written = files::ensure_line_appended(path, marker, line)
                .with_context(|| format!("Failed to update {}", path.display()))?;
            if written {
                println!("  → Appended {} to {}", line.cyan(), path.display());
            } else {
                println!("  ⊘ {} already set in {}", marker, path.display());
            }
        }
        Action::MakeDir { path, elevated } => {
            let _guard = if *elevated {
                Some(executor.privileges().elevate()?)
            } else {
                None
            };
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            log::debug!("Ensured directory {}", path.display());
        }
        Action::EnablePacmanRepo { path, repo } => {
            let _guard = executor.privileges().elevate()?;
            if files::enable_pacman_repo(path, repo)
                .with_context(|| format!("Failed to update {}", path.display()))?
            {
                println!("  → Enabled [{}] in {}", repo.cyan(), path.display());
            }
        }
        Action::CopyDotfiles { source, home } => {
            let copied = files::copy_symlink_files(source, home)?;
            println!("  → Copied {} dotfiles", copied.len());
        }
        Action::Notice(text) => {
            println!("  ℹ️  {}", text.yellow());
        }
    }
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Print comprehensive summary at end of a run with failures
fn print_summary(errors: &ApplyErrors) {
    println!();
    println!("{}", "=".repeat(50).yellow());
    println!("{}", "⚠️  rigup completed with issues".yellow().bold());
    println!("{}", "=".repeat(50).yellow());
    println!();

    println!("{}", "Failed phases:".red().bold());
    for failure in &errors.phase_failures {
        println!("  ❌ {}", failure.phase.red());
        println!("     Step: {}", failure.action);
        println!("     Reason: {}", failure.reason);
        if failure.skipped_actions > 0 {
            println!(
                "     Skipped {} remaining step(s) of this phase",
                failure.skipped_actions
            );
        }
        if let Some(tail) = &failure.output_tail {
            println!("     Output (last lines):");
            for line in tail.lines() {
                println!("       {}", line.dimmed());
            }
        }
        println!();
    }

    println!(
        "💡 {}",
        "Run rigup again after fixing the issues.".bright_yellow()
    );
    println!("   Package managers skip what is already installed.");
    println!();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::utils::privilege::Privileges;
    use crate::utils::{Command, ExecOptions};
    use tempfile::TempDir;

    fn executor() -> Executor {
        Executor::new(
            Privileges::inherit(),
            ExecOptions {
                echo: false,
                timeout: None,
            },
        )
    }

    fn phase(name: &str, actions: Vec<Action>) -> Phase {
        Phase {
            name: name.to_string(),
            label: name.to_string(),
            actions,
        }
    }

    fn make_dir(path: &Path) -> Action {
        Action::MakeDir {
            path: path.to_path_buf(),
            elevated: false,
        }
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("bin");
        let plan = ExecutionPlan {
            phases: vec![phase(
                "user-bin",
                vec![make_dir(&target), Action::Run(Command::new(["false"]))],
            )],
        };

        let options = ApplyOptions {
            dry_run: true,
            fail_fast: true,
        };
        apply_plan(&plan, &executor(), options).unwrap();

        assert!(!target.exists());
    }

    #[test]
    fn test_failed_phase_skips_rest_and_run_continues() {
        let dir = TempDir::new().unwrap();
        let skipped = dir.path().join("skipped");
        let later = dir.path().join("later");
        let plan = ExecutionPlan {
            phases: vec![
                phase(
                    "broken",
                    vec![Action::Run(Command::new(["false"])), make_dir(&skipped)],
                ),
                phase("fine", vec![make_dir(&later)]),
            ],
        };

        let err = apply_plan(&plan, &executor(), ApplyOptions::default()).unwrap_err();

        assert!(err.to_string().contains("completed with errors"));
        assert!(!skipped.exists());
        assert!(later.exists());
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let later = dir.path().join("later");
        let plan = ExecutionPlan {
            phases: vec![
                phase("broken", vec![Action::Run(Command::new(["false"]))]),
                phase("fine", vec![make_dir(&later)]),
            ],
        };

        let options = ApplyOptions {
            dry_run: false,
            fail_fast: true,
        };
        let err = apply_plan(&plan, &executor(), options).unwrap_err();

        assert!(err.to_string().contains("fail_fast"));
        assert!(!later.exists());
    }

    #[test]
    fn test_append_line_creates_parent_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf.d/99-test.conf");
        let append = Action::AppendLine {
            path: path.clone(),
            marker: "vm.max_map_count".to_string(),
            line: "vm.max_map_count=262144".to_string(),
            elevated: false,
        };
        let plan = ExecutionPlan {
            phases: vec![phase("settings", vec![append.clone(), append])],
        };

        apply_plan(&plan, &executor(), ApplyOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "vm.max_map_count=262144\n"
        );
    }

    #[test]
    fn test_output_tail_keeps_last_lines() {
        let output: String = (1..=15).map(|i| format!("line {}\n", i)).collect();
        let error: anyhow::Error = RigupError::CommandFailure {
            command: "make".to_string(),
            code: 2,
            output,
        }
        .into();

        let tail = output_tail(&error).unwrap();
        assert_eq!(tail.lines().count(), OUTPUT_TAIL_LINES);
        assert!(tail.starts_with("line 6"));
        assert!(tail.ends_with("line 15"));
        assert!(!is_fatal(&error));
    }

    #[test]
    fn test_interrupted_is_fatal() {
        let error: anyhow::Error = RigupError::Interrupted.into();
        assert!(is_fatal(&error));
    }
}
