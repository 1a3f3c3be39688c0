//! Brand management handlers.

use tabled::Tabled;

use storefront_core::{Brand, BrandInput};

use crate::cli::{BrandsArgs, BrandsCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

/// Permission guarding brand mutations.
const MANAGE_BRANDS: &str = "brands.manage";
const ADMIN_BRANDS_PATH: &str = "/admin/brands";

#[derive(Tabled)]
struct BrandRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl BrandRow {
    fn new(b: &Brand, color: bool) -> Self {
        Self {
            id: b.id.clone(),
            name: b.name.clone(),
            slug: b.slug.clone().unwrap_or_default(),
            status: output::active_label(b.is_active, color),
        }
    }
}

fn render_brands(ctx: &Context<'_>) {
    let state = ctx.store.brands().state();
    let out = output::render_list(
        &ctx.global.output,
        &state.items,
        |b| BrandRow::new(b, ctx.color),
        |b| b.id.clone(),
    );
    output::print_output(&out, ctx.global.quiet);
}

pub async fn handle(args: BrandsArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let brands = ctx.store.brands();
    match args.command {
        BrandsCommand::List => {
            ctx.settled(brands.fetch_brands().await)?;
            render_brands(ctx);
            Ok(())
        }

        BrandsCommand::Create {
            name,
            description,
            logo,
        } => {
            ctx.require(ADMIN_BRANDS_PATH, Some(MANAGE_BRANDS))?;
            let input = BrandInput {
                name: Some(name),
                description,
                logo,
                is_active: None,
            };
            ctx.settled(brands.create_brand(&input).await)?;
            output::notice("Brand created", ctx.global.quiet);
            render_brands(ctx);
            Ok(())
        }

        BrandsCommand::Update {
            id,
            name,
            description,
            logo,
            active,
        } => {
            ctx.require(ADMIN_BRANDS_PATH, Some(MANAGE_BRANDS))?;
            let input = BrandInput {
                name,
                description,
                logo,
                is_active: active,
            };
            if input.name.is_none()
                && input.description.is_none()
                && input.logo.is_none()
                && input.is_active.is_none()
            {
                return Err(CliError::Validation {
                    field: "brand".into(),
                    reason: "nothing to update".into(),
                });
            }
            ctx.settled(brands.update_brand(&id, &input).await)?;
            output::notice("Brand updated", ctx.global.quiet);
            render_brands(ctx);
            Ok(())
        }

        BrandsCommand::Delete { id } => {
            ctx.require(ADMIN_BRANDS_PATH, Some(MANAGE_BRANDS))?;
            if !util::confirm(&format!("Delete brand '{id}'?"), ctx.global.yes)? {
                return Ok(());
            }
            ctx.settled(brands.delete_brand(&id).await)?;
            output::notice("Brand deleted", ctx.global.quiet);
            Ok(())
        }
    }
}
