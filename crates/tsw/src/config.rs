//! Resolution of the active profile plus CLI flag overrides into an
//! `AdapterConfig`.

use clap::ValueEnum;
use tracing::warn;

use tsw_config::{Config, Profile};
use tsw_core::AdapterConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Determine the active profile name from flags, config default, or "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill in `--output` from `defaults.output` when the flag was not given.
pub fn apply_output_default(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_some() {
        return;
    }
    match OutputFormat::from_str(&cfg.defaults.output, true) {
        Ok(format) => global.output = Some(format),
        Err(_) => warn!(
            output = %cfg.defaults.output,
            "unknown output format in config defaults, using table"
        ),
    }
}

/// Build the adapter configuration from the active profile and CLI
/// overrides. Without a profile, `--host` and `--login` alone are enough.
pub fn build_adapter_config(global: &GlobalOpts, cfg: &Config) -> Result<AdapterConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        None if global.host.is_none() => {
            return Err(CliError::NoConfig {
                path: tsw_config::config_path().display().to_string(),
            });
        }
        None => Profile::default(),
    };

    apply_overrides(&mut profile, global);
    Ok(tsw_config::profile_to_adapter_config(
        &profile,
        &profile_name,
        &cfg.defaults,
    )?)
}

fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if global.port.is_some() {
        profile.port = global.port;
    }
    if global.login.is_some() {
        profile.login.clone_from(&global.login);
    }
    if global.groups.is_some() {
        profile.groups.clone_from(&global.groups);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
