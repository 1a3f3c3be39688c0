//! Saved address handlers. Addresses have no slice; these are ad-hoc
//! queries through the storefront facade.

use tabled::Tabled;

use storefront_core::{Address, NewAddress};

use crate::cli::{AddressesArgs, AddressesCommand};
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct AddressRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Default")]
    default: &'static str,
}

impl From<&Address> for AddressRow {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id.clone(),
            name: a.full_name.clone(),
            address: one_line(a),
            default: if a.is_default { "yes" } else { "" },
        }
    }
}

fn one_line(a: &Address) -> String {
    let mut parts = vec![a.street.clone(), a.city.clone()];
    parts.extend(a.state.clone());
    parts.push(a.postal_code.clone());
    parts.push(a.country.clone());
    parts.join(", ")
}

pub async fn handle(args: AddressesArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    ctx.require("/addresses", None)?;
    match args.command {
        AddressesCommand::List => {
            let addresses = ctx.store.list_addresses().await?;
            let out = output::render_list(
                &ctx.global.output,
                &addresses,
                |a| AddressRow::from(a),
                |a| a.id.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }

        AddressesCommand::Add {
            full_name,
            street,
            city,
            state,
            postal_code,
            country,
            phone,
            default,
        } => {
            let address = ctx
                .store
                .add_address(&NewAddress {
                    full_name,
                    street,
                    city,
                    state,
                    postal_code,
                    country,
                    phone,
                    is_default: default,
                })
                .await?;
            output::notice("Address saved", ctx.global.quiet);
            let out = output::render_single(&ctx.global.output, &address, one_line, |a| {
                a.id.clone()
            });
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }
    }
}
