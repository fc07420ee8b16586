//! `stockdesk` command line entry point.
//!
//! ```text
//! stockdesk list [search]
//! stockdesk show <productId>
//! stockdesk adjust <productId> <add|remove> <quantity> [sku]
//! ```
//!
//! Configuration comes from `STOCKDESK_*` environment variables.

use anyhow::{Context, Result, bail};

use stockdesk_client::{ClientConfig, InventoryClient};
use stockdesk_core::{ProductId, Sku};
use stockdesk_inventory::{
    AdjustmentType, InventorySummary, Product, StockAdjustment, StockAdjustmentRequest,
    StockThresholds,
};

const USAGE: &str = "usage: stockdesk list [search] | show <productId> | adjust <productId> <add|remove> <quantity> [sku]";

#[tokio::main]
async fn main() -> Result<()> {
    stockdesk_observability::init();

    let config = ClientConfig::from_env().context("invalid configuration")?;
    tracing::info!(api_url = %config.api_url, "Starting stockdesk");
    let client = InventoryClient::from_config(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let outcome = match args.as_slice() {
        ["list"] => list(&client, None).await,
        ["list", search] => list(&client, Some(*search)).await,
        ["show", id] => show(&client, id).await,
        ["adjust", id, kind, qty] => adjust(&client, id, kind, qty, None).await,
        ["adjust", id, kind, qty, sku] => adjust(&client, id, kind, qty, Some(*sku)).await,
        _ => bail!(USAGE),
    };

    if let Err(err) = outcome {
        if let Some(client_err) = err.downcast_ref::<stockdesk_client::ClientError>() {
            eprintln!("{}", client_err.user_message());
        }
        return Err(err);
    }
    Ok(())
}

async fn list(client: &InventoryClient, search: Option<&str>) -> Result<()> {
    let mut query = client.default_query();
    if let Some(term) = search {
        query = query.search(term);
    }

    let page = client.list_inventory(&query).await?;
    let thresholds = client.thresholds();

    for product in &page.products {
        print_product_line(product, thresholds);
    }

    let summary = InventorySummary::from_products(&page.products, thresholds);
    println!(
        "page {}/{} ({} products total): {} in stock, {} low, {} out, {} units",
        page.pagination.page,
        page.pagination.total_pages,
        page.pagination.total,
        summary.in_stock,
        summary.low_stock,
        summary.out_of_stock,
        summary.total_units
    );
    Ok(())
}

async fn show(client: &InventoryClient, id: &str) -> Result<()> {
    let id: ProductId = id.parse()?;
    let product = client.get_product(&id).await?;
    let thresholds = client.thresholds();

    print_product_line(&product, thresholds);
    for variant in &product.variants {
        println!(
            "  {:<20} {:>6}  {:<12} {:>10.2}  {}",
            variant.sku,
            variant.stock(),
            thresholds.classify(variant.stock()).label(),
            variant.price,
            variant.attribute_label()
        );
    }
    Ok(())
}

async fn adjust(
    client: &InventoryClient,
    id: &str,
    kind: &str,
    quantity: &str,
    sku: Option<&str>,
) -> Result<()> {
    let id: ProductId = id.parse()?;
    let kind: AdjustmentType = kind.parse()?;
    let quantity: u64 = quantity
        .parse()
        .with_context(|| format!("quantity must be a positive integer, got `{quantity}`"))?;
    let sku = sku.map(str::parse::<Sku>).transpose()?;

    let adjustment = StockAdjustment::new(kind, quantity)?;
    let request = StockAdjustmentRequest::new(id.clone(), sku, adjustment)
        .with_reason("manual adjustment (cli)");

    let product = client.get_product(&id).await?;
    let (update, refreshed) = client.adjust_and_refresh(&product, &request).await?;

    if let Some(message) = &update.message {
        println!("{message}");
    }
    print_product_line(&refreshed, client.thresholds());
    Ok(())
}

fn print_product_line(product: &Product, thresholds: &StockThresholds) {
    let total = product.total_stock();
    println!(
        "{:<26} {:<32} {:>6}  {}",
        product.id,
        product.title,
        total,
        thresholds.classify(total).label()
    );
}
