//! Cart handlers. Every mutation re-renders the cart from slice state.

use tabled::Tabled;

use storefront_core::{CartItem, CartState};

use crate::cli::{CartArgs, CartCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct CartRow {
    #[tabled(rename = "Product")]
    product_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Line total")]
    total: String,
}

impl From<&CartItem> for CartRow {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            quantity: item.quantity,
            total: output::money(item.total_price),
        }
    }
}

fn render(state: &CartState, ctx: &Context<'_>) {
    if matches!(ctx.global.output, OutputFormat::Table) {
        if state.items.is_empty() {
            output::print_output("Cart is empty", ctx.global.quiet);
            return;
        }
        let table = output::render_list(
            &ctx.global.output,
            &state.items,
            |i| CartRow::from(i),
            |i| i.product.id.clone(),
        );
        output::print_output(
            &format!(
                "{table}\n{} item(s), total {}",
                state.total_items,
                output::money(state.total_price)
            ),
            ctx.global.quiet,
        );
        return;
    }
    let out = output::render_single(
        &ctx.global.output,
        state,
        |_| String::new(),
        |s| {
            s.items
                .iter()
                .map(|i| i.product.id.clone())
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, ctx.global.quiet);
}

pub async fn handle(args: CartArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    ctx.require("/cart", None)?;
    let cart = ctx.store.cart();

    let settlement = match args.command {
        CartCommand::Show => cart.fetch_cart().await,
        CartCommand::Add {
            product_id,
            quantity,
        } => cart.add_to_cart(&product_id, quantity).await,
        CartCommand::Update {
            product_id,
            quantity,
        } => cart.update_cart_item(&product_id, quantity).await,
        CartCommand::Remove { product_id } => {
            // The line list comes from the server; removal patches it locally.
            ctx.settled(cart.fetch_cart().await)?;
            cart.remove_from_cart(&product_id).await
        }
    };
    ctx.settled(settlement)?;

    render(&cart.state(), ctx);
    Ok(())
}
