use crate::catalogue::RenderContext;
use crate::cli::Cli;
use crate::config::{load_config_auto, validate_config};
use crate::executor::{apply_plan, create_execution_plan, ApplyOptions, Selection};
use crate::system;
use crate::utils::privilege::{self, Privileges};
use crate::utils::{ExecOptions, Executor};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, IsTerminal};

pub fn run(cli: &Cli) -> Result<()> {
    let privileges = Privileges::detect();
    let invoking = privileges.invoking();

    // Load config
    let (path, config) = load_config_auto(cli.config.as_deref(), Some(&invoking.home))?;
    if let Some(path) = &path {
        log::info!("Loaded config from: {}", path.display());
    }

    // Validate config
    validate_config(&config)?;

    let profile = system::resolve_current()?;
    log::info!("→ Using {} profile", profile.kind());

    if !cli.dry_run {
        privilege::require_superuser(&privileges)?;
    }
    privileges.drop_to_invoking()?;

    let ctx = RenderContext {
        home: invoking.home.clone(),
        user: invoking.name.clone(),
        git: config.git.clone(),
        hardware: system::hardware::detect(),
    };

    // Create execution plan
    let selection = Selection {
        bundles: cli.selected_bundles(),
        desktops: cli.selected_desktops(),
        cli_only: cli.cli_only,
    };
    let plan = create_execution_plan(&config, profile.as_ref(), &selection, &ctx)?;

    if !cli.yes && !cli.dry_run && io::stdin().is_terminal() {
        let question = format!(
            "Run {} phases ({} steps) on {}?",
            plan.phases.len(),
            plan.action_count(),
            profile.kind()
        );
        let confirmed = inquire::Confirm::new(&question)
            .with_default(true)
            .prompt()?;

        if !confirmed {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        }
    }

    let executor = Executor::new(
        privileges,
        ExecOptions {
            echo: config.settings.echo_output,
            timeout: config.settings.command_timeout(),
        },
    );

    // Apply plan
    apply_plan(
        &plan,
        &executor,
        ApplyOptions {
            dry_run: cli.dry_run,
            fail_fast: cli.fail_fast || config.settings.fail_fast,
        },
    )
}
