//! Order handlers: the customer's history, the admin order listing,
//! checkout and ratings.

use chrono::Local;
use tabled::Tabled;

use storefront_core::{NewOrder, Order, OrderQuery, OrderRating};

use crate::cli::{OrdersArgs, OrdersCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{Context, util};

/// Permission guarding the shop-wide order listing.
const MANAGE_ORDERS: &str = "orders.manage";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Placed")]
    placed: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl OrderRow {
    fn new(o: &Order, color: bool) -> Self {
        Self {
            id: o.id.clone(),
            placed: o
                .created_at
                .map(|t| {
                    t.with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                })
                .unwrap_or_default(),
            customer: o.customer().unwrap_or_default(),
            items: o.items.len(),
            total: output::money(o.total_price),
            status: output::status_label(o.status, color),
            rating: o
                .rating
                .as_ref()
                .map(|r| "*".repeat(usize::from(r.rating)))
                .unwrap_or_default(),
        }
    }
}

fn detail(o: &Order, color: bool) -> String {
    let mut lines = vec![
        format!("ID:       {}", o.id),
        format!("Status:   {}", output::status_label(o.status, color)),
        format!("Total:    {}", output::money(o.total_price)),
        format!("Payment:  {}", util::or_dash(o.payment_method.as_deref())),
    ];
    if let Some(placed) = o.created_at {
        lines.push(format!("Placed:   {}", placed.to_rfc3339()));
    }
    for item in &o.items {
        lines.push(format!(
            "  {} x{} @ {}",
            item.product.name,
            item.quantity,
            output::money(item.price)
        ));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: OrdersArgs, ctx: &Context<'_>) -> Result<(), CliError> {
    let orders = ctx.store.orders();
    match args.command {
        OrdersCommand::List {
            all,
            status,
            page,
            limit,
        } => {
            let query = OrderQuery {
                page: Some(page),
                limit,
                status,
            };
            let settlement = if all {
                ctx.require("/admin/orders", Some(MANAGE_ORDERS))?;
                orders.fetch_all_orders(&query).await
            } else {
                ctx.require("/orders", None)?;
                orders.fetch_orders(&query).await
            };
            ctx.settled(settlement)?;

            let state = orders.state();
            let out = output::render_list(
                &ctx.global.output,
                &state.items,
                |o| OrderRow::new(o, ctx.color),
                |o| o.id.clone(),
            );
            output::print_output(&out, ctx.global.quiet);
            if matches!(ctx.global.output, OutputFormat::Table) {
                output::notice(
                    &format!(
                        "Page {} of {} ({} orders)",
                        state.page, state.pages, state.total
                    ),
                    ctx.global.quiet,
                );
            }
            Ok(())
        }

        OrdersCommand::Create { address, payment } => {
            ctx.require("/checkout", None)?;
            ctx.settled(
                orders
                    .create_order(&NewOrder {
                        shipping_address: address,
                        payment_method: payment,
                    })
                    .await,
            )?;
            if let Some(order) = orders.state().items.first() {
                output::notice("Order placed", ctx.global.quiet);
                let out = output::render_single(
                    &ctx.global.output,
                    order,
                    |o| detail(o, ctx.color),
                    |o| o.id.clone(),
                );
                output::print_output(&out, ctx.global.quiet);
            }
            Ok(())
        }

        OrdersCommand::Rate {
            id,
            rating,
            comment,
        } => {
            ctx.require("/orders", None)?;
            ctx.settled(
                orders
                    .rate_order(&id, &OrderRating { rating, comment })
                    .await,
            )?;
            output::notice(&format!("Rated order {id}"), ctx.global.quiet);
            Ok(())
        }
    }
}
