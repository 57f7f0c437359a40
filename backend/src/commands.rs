//! Command implementations for the `cbp` binary
//!
//! Each command writes its output to the given writer so it can be captured in tests.

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use shared::forms::PlanForm;

use crate::error::AppResult;
use crate::models::{OrderRecord, OrderRequest, PlanRequest};
use crate::services::OrderService;

/// Read and parse a JSON file
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

/// Calculate a plan and print the result as JSON
///
/// With `form` set the file holds raw form fields instead of typed values.
pub async fn plan(
    service: &OrderService,
    path: &Path,
    form: bool,
    out: &mut impl Write,
) -> AppResult<()> {
    let input = if form {
        read_json::<PlanForm>(path).await?.into_input()
    } else {
        service.resolve(read_json::<PlanRequest>(path).await?)
    };
    let result = service.quote(&input)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    Ok(())
}

/// Price and store an order, then print the stored record
pub async fn order(service: &OrderService, path: &Path, out: &mut impl Write) -> AppResult<()> {
    let request: OrderRequest = read_json(path).await?;
    let record = service.place_order(request).await?;
    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
    Ok(())
}

fn summary_line(order: &OrderRecord) -> String {
    let summary = &order.result.box_summary;
    format!(
        "{}  {}  {:<20} {:<12} {:>3} days  {:>6.0} g dry  {:>3} wet  {:>10}",
        order.order_number,
        order.created_at.format("%Y-%m-%d %H:%M"),
        order.customer_name,
        order.cat_name,
        summary.duration_days,
        summary.dry_grams,
        summary.wet_units_billed,
        order.result.cost.total_cost,
    )
}

/// List stored orders, one line each
pub async fn orders(service: &OrderService, out: &mut impl Write) -> AppResult<()> {
    let orders = service.list_orders().await?;
    if orders.is_empty() {
        writeln!(out, "No orders yet.")?;
        return Ok(());
    }
    for order in &orders {
        writeln!(out, "{}", summary_line(order))?;
    }
    Ok(())
}

/// Print one stored order as JSON
pub async fn show(service: &OrderService, order_number: &str, out: &mut impl Write) -> AppResult<()> {
    let record = service.get_order(order_number).await?;
    writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
    Ok(())
}

/// Print the active box catalog as JSON
pub fn catalog(service: &OrderService, out: &mut impl Write) -> AppResult<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(service.catalog())?)?;
    Ok(())
}
