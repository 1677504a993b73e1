//! Command-line interface

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use shared::models::ProductStatus;
use till_client::{DateRange, Report};

use crate::config::{CONFIG_FILE, TerminalConfig};

/// Till - sale terminal for the inventory backend
#[derive(Debug, Parser)]
#[command(name = "till")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "TILL_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token; overrides the stored credential
    #[arg(long, env = "TILL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file
    #[arg(long, env = "TILL_CONFIG", default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Log directory (default: <data dir>/logs)
    #[arg(long, env = "TILL_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Apply flag overrides on top of the file config
    pub fn apply(&self, mut config: TerminalConfig) -> TerminalConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config
    }

    pub fn log_dir(&self, config: &TerminalConfig) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| config.log_dir())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive sale session (default)
    Sell,
    /// Log in and store the credential
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TILL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored credential
    Logout,
    /// Stock and sales figures
    Overview,
    /// Products at or below a stock threshold
    LowStock {
        #[arg(default_value_t = 5)]
        threshold: u32,
    },
    /// Sales history
    Sales(SalesArgs),
    /// Delete a recorded sale
    DeleteSale { id: String },
    /// Tabular reports
    Report(ReportArgs),
    /// Product maintenance
    #[command(subcommand)]
    Product(ProductCommand),
    /// Write the effective config to the config file
    SaveConfig,
}

#[derive(Debug, Args)]
pub struct SalesArgs {
    /// Sales of a single day
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    MostSelling,
    Expired,
    StockValue,
    DailyProfit,
    Profit,
    Summary,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    pub kind: ReportKind,
    /// Day for the daily profit report (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub from: Option<NaiveDate>,
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl ReportArgs {
    pub fn report(&self, today: NaiveDate) -> Report {
        let range = DateRange::new(self.from, self.to);
        match self.kind {
            ReportKind::MostSelling => Report::MostSellingProducts(range),
            ReportKind::Expired => Report::ExpiredProducts,
            ReportKind::StockValue => Report::StockValue,
            ReportKind::DailyProfit => Report::DailyProfit(self.date.unwrap_or(today)),
            ReportKind::Profit => Report::ProfitRange(range),
            ReportKind::Summary => Report::SalesSummary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for ProductStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Active => ProductStatus::Active,
            StatusArg::Inactive => ProductStatus::Inactive,
        }
    }
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub category: String,
    /// Generated from the clock when omitted
    #[arg(long)]
    pub barcode: Option<String>,
    #[arg(long, default_value = "0")]
    pub cost: Decimal,
    #[arg(long, default_value = "0")]
    pub price: Decimal,
    #[arg(long, default_value_t = 0)]
    pub quantity: u32,
    #[arg(long)]
    pub purchased: Option<NaiveDate>,
    #[arg(long)]
    pub expires: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Create a product
    Add(ProductArgs),
    /// Replace a product's details
    Edit {
        id: String,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Set the stock on hand
    Restock { id: String, quantity: u32 },
    /// Set cost and selling price
    Price {
        id: String,
        cost: Decimal,
        price: Decimal,
    },
    /// Activate or deactivate
    Status { id: String, status: StatusArg },
    Delete { id: String },
}
