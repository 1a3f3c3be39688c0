//! `access`: ask the route guard about a destination using only the
//! stored credential.

use std::sync::Arc;

use storefront_config::FileCredentialStore;
use storefront_core::{Access, RouteGuard};

use crate::cli::{AccessArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

fn describe(access: &Access) -> String {
    match access {
        Access::Allow => "allow".into(),
        Access::Redirect {
            to,
            return_to: Some(back),
        } => format!("redirect {to} (return to {back})"),
        Access::Redirect { to, .. } => format!("redirect {to}"),
    }
}

pub fn handle(args: &AccessArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let guard = RouteGuard::new(Arc::new(FileCredentialStore::new(
        config::credentials_path(&profile_name),
    )));

    let permission = args.permission.as_deref();
    let access = guard.authorize(&args.path, permission);

    let out = output::render_single(&global.output, &access, describe, describe);
    output::print_output(&out, global.quiet);

    super::access_result(&access, &args.path, permission, &profile_name)
}
