mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use shop_remote::{ShopClient, ShopEvent};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Storefront client for a remote document store.
#[derive(Parser)]
#[command(name = "shop", version, about = "Storefront client for a remote document store")]
struct Cli {
    /// Base URL of the remote store (or SHOP_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// User whose orders are read and written (or SHOP_USER_ID, default u1)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Auth token passed to the store (or SHOP_AUTH_TOKEN)
    #[arg(long, global = true)]
    auth_token: Option<String>,

    /// TOML config file with a [store] section
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the user's orders
    Orders,

    /// Place an order
    Order {
        /// JSON file holding an array of cart line items
        #[arg(long)]
        items: PathBuf,
        /// Order total (default: sum of the items' `sum` fields)
        #[arg(long)]
        total: Option<f64>,
    },

    /// List all products
    Products,

    /// Create or edit a product through the edit form
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// Create a new product
    Add {
        /// Form input as name=value (title, imageUrl, description, price)
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// Edit an existing product (price cannot change)
    Edit {
        /// Id of the product to edit
        id: String,
        /// Form input as name=value (title, imageUrl, description)
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let file = match cli.config.as_deref() {
        Some(path) => match config::read_config_file(path) {
            Ok(file) => file,
            Err(msg) => {
                report_error(&format!("error: {}", msg), cli.output, cli.quiet);
                process::exit(1);
            }
        },
        None => config::FileConfig::default(),
    };

    let overrides = config::Overrides {
        base_url: cli.base_url,
        user_id: cli.user,
        auth_token: cli.auth_token,
    };
    let remote = match config::resolve(overrides, |key| std::env::var(key).ok(), file) {
        Ok(remote) => remote,
        Err(msg) => {
            report_error(&format!("error: {}", msg), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("error: failed to create tokio runtime: {}", e),
                cli.output,
                cli.quiet,
            );
            process::exit(1);
        }
    };

    let client = ShopClient::http(remote);
    match cli.command {
        Commands::Orders => {
            commands::orders::cmd_orders(&rt, &client, cli.output, cli.quiet);
        }
        Commands::Order { items, total } => {
            commands::orders::cmd_order(&rt, &client, &items, total, cli.output, cli.quiet);
        }
        Commands::Products => {
            commands::products::cmd_products(&rt, &client, cli.output, cli.quiet);
        }
        Commands::Product { command } => match command {
            ProductCommands::Add { fields } => {
                commands::products::cmd_product_add(&rt, &client, &fields, cli.output, cli.quiet);
            }
            ProductCommands::Edit { id, fields } => {
                commands::products::cmd_product_edit(
                    &rt, &client, &id, &fields, cli.output, cli.quiet,
                );
            }
        },
    }
}

/// Log to stderr. `RUST_LOG` overrides the default level.
fn init_logging(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Collect every event an action emitted. Call after the sender is dropped.
pub(crate) fn drain(mut rx: UnboundedReceiver<ShopEvent>) -> Vec<ShopEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

pub(crate) fn print_json(value: &serde_json::Value) {
    let pretty =
        serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}
