//! Config subcommand handlers.

use std::fmt::Write as _;

use tsw_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&tsw_config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = tsw_config::load_config()?;
            output::print_output(&show(&cfg)?, global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = tsw_config::load_config()?;
            let active = active_profile_name(global, &cfg);
            let mut out = String::new();
            for (name, profile) in &cfg.profiles {
                let marker = if *name == active { "*" } else { " " };
                let _ = writeln!(out, "{marker} {name}\t{}", profile.host);
            }
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = tsw_config::load_config()?;
            let name = active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
                    name,
                });
            }

            let password = rpassword::prompt_password(format!("Password for '{name}': "))?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            tsw_config::store_password(&name, &password)?;
            if !global.quiet {
                eprintln!("Password for '{name}' stored in system keyring");
            }
            Ok(())
        }
    }
}

/// Render the config as TOML with plaintext passwords masked.
fn show(cfg: &Config) -> Result<String, CliError> {
    let mut masked = cfg.clone();
    for profile in masked.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("********".into());
        }
    }
    toml::to_string_pretty(&masked).map_err(|e| CliError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::BTreeMap;

    use tsw_config::{Defaults, Profile};

    use super::*;

    #[test]
    fn show_masks_plaintext_password() {
        let cfg = Config {
            default_profile: Some("lobby".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::from([(
                "lobby".to_owned(),
                Profile {
                    host: "10.0.0.5".into(),
                    login: Some("admin".into()),
                    password: Some("hunter2".into()),
                    ..Profile::default()
                },
            )]),
        };

        let rendered = show(&cfg).unwrap();
        assert!(rendered.contains("10.0.0.5"));
        assert!(rendered.contains("********"));
        assert!(!rendered.contains("hunter2"));
    }
}
