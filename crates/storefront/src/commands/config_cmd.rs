//! Config subcommand handlers.

use dialoguer::{Confirm, Input};
use secrecy::SecretString;
use serde::Serialize;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// What `config show` prints: the file plus the resolved active profile.
#[derive(Serialize)]
struct ShownConfig<'a> {
    path: String,
    active_profile: String,
    #[serde(flatten)]
    config: &'a Config,
}

fn show_detail(shown: &ShownConfig<'_>) -> String {
    let mut lines = vec![
        format!("Config file:    {}", shown.path),
        format!("Active profile: {}", shown.active_profile),
        format!(
            "Defaults:       output={} color={} timeout={}s insecure={}",
            shown.config.defaults.output,
            shown.config.defaults.color,
            shown.config.defaults.timeout,
            shown.config.defaults.insecure
        ),
    ];
    let mut names: Vec<&String> = shown.config.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &shown.config.profiles[name];
        lines.push(format!(
            "  [{name}] {} email={} password={}",
            p.api_url,
            util::or_dash(p.email.as_deref()),
            if p.password.is_some() { "<plaintext>" } else { "-" }
        ));
    }
    lines.join("\n")
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("storefront configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("API URL")
                .default("http://localhost:5000/api".into())
                .interact_text()
                .map_err(prompt_err)?;
            storefront_config::parse_api_url(&api_url)?;

            let email: String = Input::new()
                .with_prompt("Account email")
                .interact_text()
                .map_err(prompt_err)?;

            let store_password = Confirm::new()
                .with_prompt("Store the password in the system keyring?")
                .default(true)
                .interact()
                .map_err(prompt_err)?;
            if store_password {
                let password = util::prompt_password("Password: ", &profile_name)?;
                storefront_config::store_password(&profile_name, &password)?;
                eprintln!("   Password stored in system keyring");
            }

            let mut cfg = config::load_config_or_default();
            cfg.default_profile = Some(profile_name.clone());
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    api_url,
                    email: Some(email),
                    ..Profile::default()
                },
            );
            config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Next: storefront login");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let shown = ShownConfig {
                path: config::config_path().display().to_string(),
                active_profile: config::active_profile_name(global, &cfg),
                config: &cfg,
            };
            let out = output::render_single(&global.output, &shown, show_detail, |s| {
                s.active_profile.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Keyring ─────────────────────────────────────────────────
        ConfigCommand::SetPassword => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let password: SecretString = util::prompt_password(
                &format!("Password for profile '{profile_name}': "),
                &profile_name,
            )?;
            storefront_config::store_password(&profile_name, &password)?;
            output::notice(
                &format!("Password stored in system keyring for '{profile_name}'"),
                global.quiet,
            );
            Ok(())
        }
    }
}
