//! Thimble CLI - storefront client for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! thimble products list
//! thimble products list -c dresses
//! thimble products show 64f1c0ffee
//!
//! # Manage the cart (works signed out; syncs when signed in)
//! thimble cart add 64f1c0ffee -s M -c Black -q 2
//! thimble cart show
//! thimble cart update 64f1c0ffee-M-Black -q 3
//! thimble cart clear
//!
//! # Account session
//! thimble auth login -e jane@example.com -p hunter2
//! thimble auth whoami
//! thimble auth logout
//!
//! # Orders
//! thimble orders create -n "Jane Doe" --phone 5551234 -a "1 Main St"
//! thimble orders list
//! ```
//!
//! # Environment Variables
//!
//! - `THIMBLE_API_URL` - Base URL of the backend API (required)
//! - `THIMBLE_DATA_DIR` - Directory for the local store (default: `.thimble`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "thimble")]
#[command(author, version, about = "Thimble storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the account session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the favorites list
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Submit and review orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account and log into it
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Contact phone
        #[arg(long)]
        phone: Option<String>,

        /// Shipping address
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Log out, discarding the stored session token
    Logout,
    /// Show the signed-in account
    Whoami,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered by category slug
    List {
        /// Category slug to filter by
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product in detail
    Show {
        /// Product identifier
        id: String,
    },
    /// List categories
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart's lines, count, and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product identifier
        product: String,

        /// Size variant
        #[arg(short, long)]
        size: String,

        /// Color variant
        #[arg(short, long)]
        color: String,

        /// Units to add (defaults to one)
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Change a line's quantity (zero or less removes the line)
    Update {
        /// Line item identifier (`<product>-<size>-<color>`)
        item: String,

        /// New quantity
        #[arg(short, long)]
        quantity: i64,
    },
    /// Remove a line from the cart
    Remove {
        /// Line item identifier (`<product>-<size>-<color>`)
        item: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorite products
    List,
    /// Add a product to the favorites
    Add {
        /// Product identifier
        product: String,
    },
    /// Flip a product's favorite status
    Toggle {
        /// Product identifier
        product: String,
    },
    /// Remove a product from the favorites
    Remove {
        /// Product identifier
        product: String,
    },
    /// Empty the favorites list
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Submit the current cart as an order
    Create {
        /// Recipient name
        #[arg(short, long)]
        name: String,

        /// Contact phone
        #[arg(long)]
        phone: String,

        /// Shipping address
        #[arg(short, long)]
        address: String,
    },
    /// List the signed-in account's orders
    List,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("thimble=info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&email, &password).await?;
            }
            AuthAction::Register {
                name,
                email,
                password,
                phone,
                address,
            } => {
                commands::auth::register(name, email, password, phone, address).await?;
            }
            AuthAction::Logout => commands::auth::logout().await?,
            AuthAction::Whoami => commands::auth::whoami().await?,
        },
        Commands::Products { action } => match action {
            ProductsAction::List { category } => {
                commands::products::list(category.as_deref()).await?;
            }
            ProductsAction::Show { id } => commands::products::show(&id).await?,
            ProductsAction::Categories => commands::products::categories().await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show().await?,
            CartAction::Add {
                product,
                size,
                color,
                quantity,
            } => commands::cart::add(&product, &size, &color, quantity).await?,
            CartAction::Update { item, quantity } => {
                commands::cart::update(&item, quantity).await?;
            }
            CartAction::Remove { item } => commands::cart::remove(&item).await?,
            CartAction::Clear => commands::cart::clear().await?,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list()?,
            FavoritesAction::Add { product } => commands::favorites::add(&product).await?,
            FavoritesAction::Toggle { product } => commands::favorites::toggle(&product).await?,
            FavoritesAction::Remove { product } => commands::favorites::remove(&product)?,
            FavoritesAction::Clear => commands::favorites::clear()?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::Create {
                name,
                phone,
                address,
            } => commands::orders::create(name, phone, address).await?,
            OrdersAction::List => commands::orders::list().await?,
        },
    }
    Ok(())
}
