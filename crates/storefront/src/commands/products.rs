//! Product catalog handlers.

use tabled::Tabled;

use storefront_core::{Product, ProductQuery};

use crate::cli::{OutputFormat, ProductListArgs, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            price: output::money(p.price),
            stock: p.stock.map(|s| s.to_string()).unwrap_or_default(),
            rating: p.rating.map(|r| format!("{r:.1}")).unwrap_or_default(),
        }
    }
}

fn detail(p: &Product) -> String {
    [
        format!("ID:          {}", p.id),
        format!("Name:        {}", p.name),
        format!("Price:       {}", output::money(p.price)),
        format!(
            "Stock:       {}",
            p.stock.map_or_else(|| "-".to_owned(), |s| s.to_string())
        ),
        format!("Category:    {}", util::or_dash(p.category.as_deref())),
        format!("Brand:       {}", util::or_dash(p.brand.as_deref())),
        format!("Description: {}", util::or_dash(p.description.as_deref())),
    ]
    .join("\n")
}

impl From<ProductListArgs> for ProductQuery {
    fn from(args: ProductListArgs) -> Self {
        Self {
            page: Some(args.page),
            limit: args.limit,
            search: args.search,
            category: args.category,
            brand: args.brand,
            sort: args.sort,
            min_price: args.min_price,
            max_price: args.max_price,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ProductsArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let products = ctx.store.products();
    match args.command {
        ProductsCommand::List(list) => {
            let query = ProductQuery::from(list);
            ctx.settled(products.fetch_products(&query).await)?;

            let state = products.state();
            let out = output::render_list(
                &ctx.global.output,
                &state.items,
                |p| ProductRow::from(p),
                |p| p.id.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            if matches!(ctx.global.output, OutputFormat::Table) {
                output::notice(
                    &format!(
                        "Page {} of {} ({} products)",
                        state.page, state.pages, state.total
                    ),
                    ctx.global.quiet,
                );
            }
            Ok(())
        }

        ProductsCommand::Show { id } => {
            ctx.settled(products.fetch_product_by_id(&id).await)?;
            let Some(product) = products.state().selected else {
                return Err(CliError::NotFound {
                    message: format!("Product '{id}' not found"),
                });
            };
            let out =
                output::render_single(&ctx.global.output, &product, detail, |p| p.id.clone());
            output::print_output(&out, ctx.global.quiet);
            Ok(())
        }
    }
}
