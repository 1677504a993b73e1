//! One-shot commands

use anyhow::{Context, Result};
use chrono::Local;
use shared::models::{
    Overview, PriceUpdate, ProductDraft, ProductStatus, RawProduct, SaleRecord,
    normalize_products, sales_total,
};
use till_client::{ClientError, Credential, CredentialStorage, DateRange, TillClient};

use crate::cli::{ProductArgs, ProductCommand, ReportArgs, SalesArgs};

/// Backend failure as shown to the operator: code, then the backend's message
fn client_error(e: ClientError) -> anyhow::Error {
    anyhow::anyhow!("[{}] {}", e.code(), e.user_message())
}

pub async fn login(
    client: &TillClient,
    storage: &CredentialStorage,
    email: &str,
    password: &str,
) -> Result<()> {
    let credential = client
        .login(email, password)
        .await
        .map_err(client_error)?;
    storage
        .save(&credential)
        .with_context(|| format!("Failed to store credential at {}", storage.path().display()))?;
    println!("Logged in as {email}");
    Ok(())
}

pub fn logout(storage: &CredentialStorage) -> Result<()> {
    if storage.exists() {
        storage.delete().context("Failed to remove stored credential")?;
    }
    println!("Logged out");
    Ok(())
}

pub fn render_overview(overview: &Overview) -> String {
    format!(
        "Units in stock:  {}\nStock value:     {:.2}\nUnits sold:      {}\nOut of stock:    {}",
        overview.total_units, overview.stock_value, overview.units_sold, overview.out_of_stock
    )
}

pub async fn overview(client: &TillClient, credential: &Credential) -> Result<()> {
    let overview = client.overview(credential).await.map_err(client_error)?;
    println!("{}", render_overview(&overview));
    Ok(())
}

pub async fn low_stock(client: &TillClient, credential: &Credential, threshold: u32) -> Result<()> {
    let raw: Vec<RawProduct> = client
        .low_stock(threshold, credential)
        .await
        .map_err(client_error)?;
    let products = normalize_products(&raw);
    if products.is_empty() {
        println!("No products at or below {threshold}");
        return Ok(());
    }
    for p in products {
        println!(
            "  {:<12} {:<24} {:<14} {:>6}",
            p.id, p.name, p.category, p.available_quantity
        );
    }
    Ok(())
}

pub fn render_sales(sales: &[SaleRecord]) -> String {
    let mut out = String::new();
    for sale in sales {
        out.push_str(&format!(
            "  {:<20} {:<14} {:>5} x {:>8.2} = {:>9.2}\n",
            sale.sale_date.as_deref().unwrap_or("-"),
            sale.barcode.as_deref().unwrap_or("-"),
            sale.quantity,
            sale.selling_price,
            sale.line_total()
        ));
    }
    out.push_str(&format!(
        "{} sale(s), total {:.2}",
        sales.len(),
        sales_total(sales)
    ));
    out
}

pub async fn sales(client: &TillClient, credential: &Credential, args: &SalesArgs) -> Result<()> {
    let sales = match args.date {
        Some(date) => client.sales_on(date, credential).await.map_err(client_error)?,
        None => {
            client
                .sales_between(&DateRange::new(args.from, args.to), credential)
                .await
                .map_err(client_error)?
        }
    };
    println!("{}", render_sales(&sales));
    Ok(())
}

pub async fn delete_sale(client: &TillClient, credential: &Credential, id: &str) -> Result<()> {
    client.delete_sale(id, credential).await.map_err(client_error)?;
    println!("Sale {id} deleted");
    Ok(())
}

pub async fn report(client: &TillClient, credential: &Credential, args: &ReportArgs) -> Result<()> {
    let report = args.report(Local::now().date_naive());
    let table = client
        .report(report, credential)
        .await
        .map_err(client_error)?;
    println!("{}", table.render_text());
    Ok(())
}

fn draft(args: &ProductArgs) -> ProductDraft {
    ProductDraft::new(&args.name, &args.category, args.barcode.as_deref())
        .with_prices(args.cost, args.price)
        .with_quantity(args.quantity)
        .with_dates(args.purchased, args.expires)
}

pub async fn product(
    client: &TillClient,
    credential: &Credential,
    command: &ProductCommand,
) -> Result<()> {
    match command {
        ProductCommand::Add(args) => {
            let draft = draft(args);
            client.create_product(&draft, credential).await.map_err(client_error)?;
            println!("Product {} added ({})", draft.name, draft.barcode);
        }
        ProductCommand::Edit { id, product } => {
            client
                .update_product(id, &draft(product), credential)
                .await
                .map_err(client_error)?;
            println!("Product {id} updated");
        }
        ProductCommand::Restock { id, quantity } => {
            client.update_quantity(id, *quantity, credential).await.map_err(client_error)?;
            println!("Product {id} stock set to {quantity}");
        }
        ProductCommand::Price { id, cost, price } => {
            let prices = PriceUpdate {
                cost_price: *cost,
                selling_price: *price,
            };
            client.update_price(id, &prices, credential).await.map_err(client_error)?;
            println!("Product {id} priced {cost:.2} / {price:.2}");
        }
        ProductCommand::Status { id, status } => {
            let status: ProductStatus = (*status).into();
            client.update_status(id, status, credential).await.map_err(client_error)?;
            println!("Product {id} is now {}", status.as_str());
        }
        ProductCommand::Delete { id } => {
            client.delete_product(id, credential).await.map_err(client_error)?;
            println!("Product {id} deleted");
        }
    }
    Ok(())
}
