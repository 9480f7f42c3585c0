use crate::catalogue::{
    self, Action, Bundle, Capability, Desktop, RenderContext, BASE_CAPABILITIES,
};
use crate::config::Config;
use crate::error::RigupError;
use crate::system::SystemProfile;
use anyhow::Result;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub phases: Vec<Phase>,
}

/// One capability rendered for the current profile
#[derive(Debug, Clone)]
pub struct Phase {
    pub name: String,
    pub label: String,
    pub actions: Vec<Action>,
}

impl ExecutionPlan {
    pub fn action_count(&self) -> usize {
        self.phases.iter().map(|p| p.actions.len()).sum()
    }
}

/// What the user asked for on the command line
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub bundles: Vec<Bundle>,
    pub desktops: Vec<Desktop>,
    pub cli_only: bool,
}

/// Ordered capability names: base phases, requested desktops, then each bundle
/// with its configured extras
fn capability_names(config: &Config, selection: &Selection) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    let requested = BASE_CAPABILITIES
        .iter()
        .map(|n| n.to_string())
        .chain(selection.desktops.iter().map(|d| d.capability().to_string()))
        .chain(selection.bundles.iter().flat_map(|bundle| {
            bundle
                .capabilities()
                .iter()
                .map(|n| n.to_string())
                .chain(config.bundle_extras(bundle.name()).iter().cloned())
        }));

    for name in requested {
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}

pub fn create_execution_plan(
    config: &Config,
    profile: &dyn SystemProfile,
    selection: &Selection,
    ctx: &RenderContext,
) -> Result<ExecutionPlan> {
    let mut phases = vec![];

    for name in capability_names(config, selection) {
        let capability = Capability::get_by_name(&name)
            .ok_or_else(|| RigupError::UnknownCapability(name.clone()))?;

        if selection.cli_only && capability.gui {
            log::debug!("Skipping {} (GUI application)", name);
            continue;
        }

        phases.push(Phase {
            name: capability.name.to_string(),
            label: capability.label.to_string(),
            actions: catalogue::actions_for(profile, &name, ctx)?,
        });
    }

    // Dotfiles always run last
    if let Some(dotfiles) = &config.dotfiles {
        phases.push(Phase {
            name: "dotfiles".to_string(),
            label: "Copying dotfiles".to_string(),
            actions: vec![Action::CopyDotfiles {
                source: dotfiles.source.clone(),
                home: ctx.home.clone(),
            }],
        });
    }

    log::debug!(
        "Planned {} phases with {} actions for {}",
        phases.len(),
        phases.iter().map(|p| p.actions.len()).sum::<usize>(),
        profile.kind()
    );

    Ok(ExecutionPlan { phases })
}
