//! Session command handlers: login, register, logout, whoami, profile.

use secrecy::{ExposeSecret, SecretString};

use storefront_config::{FileCredentialStore, resolve_password};
use storefront_core::{CredentialStore, ProfileUpdate, Registration, User, clear_session};

use crate::cli::{GlobalOpts, LoginArgs, ProfileArgs, ProfileCommand, RegisterArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

fn user_detail(user: &User) -> String {
    let mut permissions: Vec<&str> = user.permissions.iter().map(String::as_str).collect();
    permissions.sort_unstable();
    [
        format!("ID:          {}", user.id),
        format!("Name:        {}", user.name),
        format!("Email:       {}", user.email),
        format!("Role:        {}", util::or_dash(user.role.as_deref())),
        format!(
            "Permissions: {}",
            if permissions.is_empty() {
                "-".to_owned()
            } else {
                permissions.join(", ")
            }
        ),
    ]
    .join("\n")
}

fn render_user(user: &User, ctx: &Context<'_>) {
    let out = output::render_single(&ctx.global.output, user, user_detail, |u| u.email.clone());
    output::print_output(&out, ctx.global.quiet);
}

/// Password from env / keyring / profile, else an interactive prompt.
fn password(ctx: &Context<'_>) -> Result<SecretString, CliError> {
    match resolve_password(&ctx.profile, &ctx.profile_name) {
        Ok(pw) => Ok(pw),
        Err(_) => util::prompt_password("Password: ", &ctx.profile_name),
    }
}

pub async fn login(args: LoginArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let email = args
        .email
        .or_else(|| ctx.profile.email.clone())
        .ok_or_else(|| CliError::Validation {
            field: "email".into(),
            reason: "pass --email or set `email` in the profile".into(),
        })?;
    let password = password(ctx)?;

    let auth = ctx.store.auth();
    ctx.settled(auth.login(&email, &password).await)?;

    if let Some(user) = auth.state().user {
        output::notice(&format!("Signed in as {}", user.name), ctx.global.quiet);
        render_user(&user, ctx);
    }
    Ok(())
}

pub async fn register(args: RegisterArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let password = password(ctx)?;
    let registration = Registration {
        name: args.name,
        email: args.email,
        password: password.expose_secret().to_owned(),
    };

    let auth = ctx.store.auth();
    ctx.settled(auth.register(&registration).await)?;

    if let Some(user) = auth.state().user {
        output::notice(&format!("Account created for {}", user.email), ctx.global.quiet);
        render_user(&user, ctx);
    }
    Ok(())
}

/// Forget the stored session for the active profile. Never contacts the
/// server, so it works without a configured API URL.
pub fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let store = FileCredentialStore::new(config::credentials_path(&profile_name));

    let was_signed_in = store.token().is_some();
    clear_session(&store)?;

    let message = if was_signed_in {
        format!("Signed out of profile '{profile_name}'")
    } else {
        format!("Profile '{profile_name}' was not signed in")
    };
    output::notice(&message, global.quiet);
    Ok(())
}

pub async fn whoami(ctx: &Context<'_>) -> Result<(), CliError> {
    ctx.require("/account", None)?;
    let user = ctx.store.profile().await?;
    render_user(&user, ctx);
    Ok(())
}

pub async fn profile(args: ProfileArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    match args.command {
        ProfileCommand::Show => whoami(ctx).await,
        ProfileCommand::Update { name, email } => {
            if name.is_none() && email.is_none() {
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: "nothing to update; pass --name and/or --email".into(),
                });
            }
            ctx.require("/account", None)?;
            let user = ctx
                .store
                .update_profile(&ProfileUpdate {
                    name,
                    email,
                    password: None,
                })
                .await?;
            output::notice("Profile updated", ctx.global.quiet);
            render_user(&user, ctx);
            Ok(())
        }
    }
}
