use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use upi_pos::application::order_service::DEFAULT_BASE_ORDER_NUMBER;
use upi_pos::config::{DEFAULT_ORDERS_FILE, DEFAULT_PAYEE_NAME, DEFAULT_PAYEE_VPA, PosConfig};
use upi_pos::domain::order::{LineItem, NewOrder};
use upi_pos::domain::payment::Payee;
use upi_pos::interfaces::api::{self, Confirmation, PaymentQr, PaymentQrRequest};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Orders file (JSON array, oldest first)
    #[arg(long, global = true, env = "POS_ORDERS_FILE", default_value = DEFAULT_ORDERS_FILE)]
    orders_file: PathBuf,

    /// Number given to the first order of an empty store
    #[arg(long, global = true, env = "POS_BASE_ORDER_NUMBER", default_value_t = DEFAULT_BASE_ORDER_NUMBER)]
    base_order_number: u64,

    /// UPI address payments are requested to
    #[arg(long, global = true, env = "POS_PAYEE_VPA", default_value = DEFAULT_PAYEE_VPA)]
    payee_vpa: String,

    /// Merchant name shown in the buyer's payment app
    #[arg(long, global = true, env = "POS_PAYEE_NAME", default_value = DEFAULT_PAYEE_NAME)]
    payee_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty orders file if none exists
    Init,
    /// Record a paid order
    AddOrder {
        /// Line items as a JSON array of objects
        #[arg(long)]
        items: String,
        #[arg(long)]
        total: Decimal,
        #[arg(long, default_value = "")]
        payment_method: String,
    },
    /// Print the order history, newest first
    Orders {
        #[arg(long)]
        oldest_first: bool,
    },
    /// Generate a UPI payment QR code
    Qr {
        #[arg(long)]
        total: Decimal,
        /// Defaults to the next order number
        #[arg(long)]
        order_number: Option<u64>,
        /// Also write the PNG here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete the whole order history
    Clear,
}

impl Cli {
    fn config(&self) -> PosConfig {
        PosConfig {
            orders_file: self.orders_file.clone(),
            base_order_number: self.base_order_number,
            payee: Payee {
                vpa: self.payee_vpa.clone(),
                name: self.payee_name.clone(),
            },
        }
    }
}

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).into_diagnostic()?;
    writeln!(out).into_diagnostic()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    let service = config.order_service();

    match cli.command {
        Command::Init => {
            let created = config.repository().initialize()?;
            if created {
                info!(path = %config.orders_file.display(), "Created empty orders file");
            }
            print_json(&Confirmation {
                message: if created {
                    "Orders file created".to_string()
                } else {
                    "Orders file already exists".to_string()
                },
            })?;
        }
        Command::AddOrder {
            items,
            total,
            payment_method,
        } => {
            let items: Vec<LineItem> = serde_json::from_str(&items).into_diagnostic()?;
            let saved =
                api::submit_order(&service, NewOrder::new(items, total, payment_method)).await?;
            print_json(&saved)?;
        }
        Command::Orders { oldest_first } => {
            let orders = if oldest_first {
                service.list_orders(false).await?
            } else {
                api::fetch_orders(&service).await?
            };
            print_json(&orders)?;
        }
        Command::Qr {
            total,
            order_number,
            out,
        } => {
            let request = PaymentQrRequest {
                total,
                order_number,
            };
            let payment =
                api::payment_request_for(&service, &config.payment_builder(), request).await?;
            if let Some(path) = out {
                std::fs::write(&path, &payment.png).into_diagnostic()?;
                info!(path = %path.display(), uri = %payment.uri, "Wrote payment QR");
            }
            print_json(&PaymentQr::from(payment))?;
        }
        Command::Clear => {
            let confirmation = api::clear_history(&service).await?;
            print_json(&confirmation)?;
        }
    }

    Ok(())
}
