//! Command dispatch: bridges CLI args -> slice operations -> output formatting.

pub mod access;
pub mod addresses;
pub mod brands;
pub mod cart;
pub mod categories;
pub mod config_cmd;
pub mod orders;
pub mod products;
pub mod session;
pub mod util;

use storefront_core::{Access, LOGIN_PATH, Settlement, Storefront};
use tracing::debug;

use crate::cli::{Command, GlobalOpts};
use crate::config::Profile;
use crate::error::CliError;
use crate::output;

/// Everything a handler needs: the wired storefront plus the flags and
/// profile it was built from.
pub struct Context<'a> {
    pub store: Storefront,
    pub global: &'a GlobalOpts,
    pub profile_name: String,
    pub profile: Profile,
    pub color: bool,
}

impl<'a> Context<'a> {
    pub fn new(
        store: Storefront,
        global: &'a GlobalOpts,
        profile_name: String,
        profile: Profile,
    ) -> Self {
        Self {
            store,
            global,
            color: output::should_color(&global.color),
            profile_name,
            profile,
        }
    }

    /// Turn a slice settlement into a command result.
    pub fn settled(&self, settlement: Settlement) -> Result<(), CliError> {
        match settlement {
            Settlement::Applied => Ok(()),
            Settlement::Failed(failure) => Err(CliError::from_failure(failure, &self.profile_name)),
            Settlement::Superseded => {
                debug!("settlement superseded by a newer dispatch");
                Ok(())
            }
        }
    }

    /// Pass the route guard for `destination` or explain why not.
    pub fn require(&self, destination: &str, permission: Option<&str>) -> Result<(), CliError> {
        access_result(
            &self.store.visit(destination, permission),
            destination,
            permission,
            &self.profile_name,
        )
    }
}

/// Map a guard decision onto a command result.
pub fn access_result(
    access: &Access,
    destination: &str,
    permission: Option<&str>,
    profile: &str,
) -> Result<(), CliError> {
    match access {
        Access::Allow => Ok(()),
        Access::Redirect { to, .. } if *to == LOGIN_PATH => Err(CliError::LoginRequired {
            profile: profile.into(),
        }),
        Access::Redirect { .. } => Err(CliError::PermissionDenied {
            path: destination.into(),
            permission: permission.unwrap_or_default().into(),
        }),
    }
}

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => session::login(args, ctx).await,
        Command::Register(args) => session::register(args, ctx).await,
        Command::Whoami => session::whoami(ctx).await,
        Command::Profile(args) => session::profile(args, ctx).await,
        Command::Products(args) => products::handle(args, ctx).await,
        Command::Cart(args) => cart::handle(args, ctx).await,
        Command::Orders(args) => orders::handle(args, ctx).await,
        Command::Brands(args) => brands::handle(args, ctx).await,
        Command::Addresses(args) => addresses::handle(args, ctx).await,
        Command::Categories => categories::handle(ctx).await,
        // Handled before a storefront is built
        Command::Logout | Command::Access(_) | Command::Config(_) | Command::Completions(_) => {
            Err(CliError::Internal("command dispatched out of order".into()))
        }
    }
}
