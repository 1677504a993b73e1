//! Interactive sale loop
//!
//! Plain lines are barcodes, the way a scan gun types them. Lines starting
//! with `:` are operator commands.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::TryRecvError;

use shared::ErrorCode;
use till_client::{Credential, TillClient};
use till_sale::{CategoryFilter, ResolveResult, SaleSession, SessionEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SellCommand {
    /// Raw scan input, resolved line by line
    Scan(String),
    List,
    Categories,
    Filter(CategoryFilter),
    Toggle(String),
    Quantity { id: String, requested: String },
    Show,
    Submit,
    Cancel,
    Reload,
    Help,
    Quit,
    Unknown(String),
}

impl SellCommand {
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.trim().strip_prefix(':') else {
            return SellCommand::Scan(line.to_string());
        };
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();
        match (name, args.as_slice()) {
            ("list" | "ls", []) => SellCommand::List,
            ("cats" | "categories", []) => SellCommand::Categories,
            ("cat" | "filter", []) => SellCommand::Filter(CategoryFilter::All),
            ("cat" | "filter", rest) => SellCommand::Filter(CategoryFilter::parse(&rest.join(" "))),
            ("toggle" | "t", [id]) => SellCommand::Toggle(id.to_string()),
            ("qty" | "q", [id, requested]) => SellCommand::Quantity {
                id: id.to_string(),
                requested: requested.to_string(),
            },
            // An empty quantity field coerces to 1
            ("qty" | "q", [id]) => SellCommand::Quantity {
                id: id.to_string(),
                requested: String::new(),
            },
            ("show" | "s", []) => SellCommand::Show,
            ("submit" | "ok", []) => SellCommand::Submit,
            ("cancel" | "c", []) => SellCommand::Cancel,
            ("reload", []) => SellCommand::Reload,
            ("help" | "h" | "?", []) => SellCommand::Help,
            ("quit" | "exit", []) => SellCommand::Quit,
            _ => SellCommand::Unknown(command.to_string()),
        }
    }
}

const HELP: &str = "\
  <barcode>            add one unit of the scanned product
  :list                products in the current category
  :cats                categories
  :cat [NAME|ALL]      filter by category
  :toggle ID           select / deselect a product
  :qty ID N            set quantity (bounded by stock)
  :show                pending sale
  :submit              record the sale
  :cancel              drop the pending sale
  :reload              fetch a fresh catalog
  :quit";

/// Operator line for a rejected action, prefixed with its code
fn coded(code: ErrorCode, message: impl std::fmt::Display) -> String {
    format!("[{code}] {message}")
}

fn scan_line(result: &ResolveResult) -> Option<String> {
    let message = result.message()?;
    Some(match result.code() {
        Some(code) => coded(code, message),
        None => message,
    })
}

fn print_products(session: &SaleSession<TillClient>) {
    let selection = session.selection();
    println!("[{}]", session.filter());
    for entry in session.visible_entries() {
        let marker = selection
            .iter()
            .find(|s| s.catalog_entry_id == entry.id)
            .map(|s| format!("x{}", s.quantity))
            .unwrap_or_default();
        println!(
            "  {:<12} {:<14} {:<24} {:>6} {:>10.2} {}",
            entry.id,
            entry.barcode,
            entry.name,
            entry.available_quantity,
            entry.selling_price,
            marker
        );
    }
}

fn print_selection(session: &SaleSession<TillClient>) {
    let catalog = session.catalog();
    let selection = session.selection();
    if selection.is_empty() {
        println!("Nothing selected");
        return;
    }
    for selected in &selection {
        let name = catalog
            .get(&selected.catalog_entry_id)
            .map(|e| e.name.as_str())
            .unwrap_or_default();
        println!("  {:<12} {:<24} x{}", selected.catalog_entry_id, name, selected.quantity);
    }
    println!("Total: {:.2}", session.pending_total());
}

/// Run the sale loop on stdin until `:quit` or end of input
pub async fn run(client: TillClient, credential: Credential) -> Result<()> {
    let session = Arc::new(SaleSession::open(Arc::new(client), credential).await);
    let mut events = session.subscribe();

    if let Some(notice) = session.notice() {
        println!("{}", coded(ErrorCode::CatalogUnavailable, notice));
    } else {
        println!("{} products loaded. :help for commands", session.catalog().len());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match SellCommand::parse(&line) {
            SellCommand::Scan(input) => {
                let results = session.scan(&format!("{input}\n"));
                for message in results.iter().filter_map(scan_line) {
                    println!("{message}");
                }
            }
            SellCommand::List => print_products(&session),
            SellCommand::Categories => {
                for category in session.categories() {
                    println!("  {category}");
                }
            }
            SellCommand::Filter(filter) => {
                session.set_filter(filter);
                print_products(&session);
            }
            SellCommand::Toggle(id) => match session.toggle(&id) {
                Ok(true) => println!("Selected {id}"),
                Ok(false) => println!("Removed {id}"),
                Err(e) => println!("{}", coded(e.code(), &e)),
            },
            SellCommand::Quantity { id, requested } => {
                match session.set_quantity(&id, &requested) {
                    Ok(quantity) => println!("{id} x{quantity}"),
                    Err(e) => println!("{}", coded(e.code(), &e)),
                }
            }
            SellCommand::Show => print_selection(&session),
            SellCommand::Submit => match session.confirm().await {
                Ok(batch) => match batch.summary() {
                    Some(summary) => println!("{}", coded(ErrorCode::SalePartiallyFailed, summary)),
                    None => println!("Sale recorded: {:.2}", batch.total()),
                },
                Err(e) => println!("{}", coded(e.code(), &e)),
            },
            SellCommand::Cancel => {
                session.cancel();
                println!("Sale cancelled");
            }
            SellCommand::Reload => {
                session.reload().await;
                if let Some(notice) = session.notice() {
                    println!("{}", coded(ErrorCode::CatalogUnavailable, notice));
                }
            }
            SellCommand::Help => println!("{HELP}"),
            SellCommand::Quit => break,
            SellCommand::Unknown(command) => println!("Unknown command: {command}"),
        }

        // Recorded sales change stock; refresh the snapshot once per completed sale
        loop {
            match events.try_recv() {
                Ok(SessionEvent::SaleCompleted { lines, total }) => {
                    tracing::info!(lines, %total, "Sale completed");
                    session.reload().await;
                }
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    tracing::info!("Sale session closed");
    Ok(())
}
