//! Category listing.

use tabled::Tabled;

use storefront_core::Category;

use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            slug: c.slug.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(ctx: &Context<'_>) -> Result<(), CliError> {
    let categories = ctx.store.list_categories().await?;
    let out = output::render_list(
        &ctx.global.output,
        &categories,
        |c| CategoryRow::from(c),
        |c| c.id.clone(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}
