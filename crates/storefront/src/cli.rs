//! Clap derive structures for the `storefront` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use storefront_core::OrderStatus;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// storefront -- shop catalog, cart, orders and brand management
#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    version,
    about = "Browse the catalog, manage your cart and orders, administer brands",
    long_about = "A command-line client for a storefront REST API.\n\n\
        Sign in once with `storefront login`; the session is kept on disk\n\
        per profile until `storefront logout` or until the server rejects it.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile to use
    #[arg(long, short = 'p', env = "STOREFRONT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, short = 'u', env = "STOREFRONT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOREFRONT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "STOREFRONT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "STOREFRONT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and keep the session for this profile
    Login(LoginArgs),

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Forget the stored session (no server call)
    Logout,

    /// Show the signed-in user's profile
    Whoami,

    /// View or edit the account profile
    Profile(ProfileArgs),

    /// Browse the product catalog
    #[command(alias = "p")]
    Products(ProductsArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Place, list and rate orders
    Orders(OrdersArgs),

    /// Manage brands (admin)
    Brands(BrandsArgs),

    /// Manage saved shipping addresses
    Addresses(AddressesArgs),

    /// List product categories
    Categories,

    /// Check whether the stored session may open a route
    Access(AccessArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (defaults to the profile's `email`)
    #[arg(long, short = 'e')]
    pub email: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Account email
    #[arg(long, short = 'e')]
    pub email: String,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the account profile
    Show,

    /// Update name or email
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products, one page at a time
    #[command(alias = "ls")]
    List(ProductListArgs),

    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ProductListArgs {
    /// Page number (1-indexed)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Free-text search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Category ID
    #[arg(long)]
    pub category: Option<String>,

    /// Brand ID
    #[arg(long)]
    pub brand: Option<String>,

    /// Sort key understood by the server (e.g. `price`, `-createdAt`)
    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,
}

// ── Cart ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart
    Show,

    /// Add a product
    Add {
        /// Product ID
        product_id: String,
        #[arg(long, short = 'n', default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },

    /// Change a line's quantity
    Update {
        /// Product ID
        product_id: String,
        #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },

    /// Remove a line
    #[command(alias = "rm")]
    Remove {
        /// Product ID
        product_id: String,
    },
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List your orders, or every order with --all
    #[command(alias = "ls")]
    List {
        /// Every order in the shop (requires `orders.manage`)
        #[arg(long, short = 'a')]
        all: bool,

        /// Only orders in this status
        #[arg(long)]
        status: Option<OrderStatus>,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, short = 'l')]
        limit: Option<u32>,
    },

    /// Place an order from the current cart
    Create {
        /// Saved address ID to ship to
        #[arg(long)]
        address: String,

        /// Payment method
        #[arg(long, default_value = "card")]
        payment: String,
    },

    /// Rate a delivered order
    Rate {
        /// Order ID
        id: String,

        /// Stars, 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        #[arg(long)]
        comment: Option<String>,
    },
}

// ── Brands ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BrandsArgs {
    #[command(subcommand)]
    pub command: BrandsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BrandsCommand {
    /// List brands
    #[command(alias = "ls")]
    List,

    /// Create a brand (requires `brands.manage`)
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        logo: Option<String>,
    },

    /// Edit a brand (requires `brands.manage`)
    Update {
        /// Brand ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        logo: Option<String>,
        /// Mark the brand active or inactive
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a brand (requires `brands.manage`)
    #[command(alias = "rm")]
    Delete {
        /// Brand ID
        id: String,
    },
}

// ── Addresses ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddressesArgs {
    #[command(subcommand)]
    pub command: AddressesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AddressesCommand {
    /// List saved addresses
    #[command(alias = "ls")]
    List,

    /// Save a new address
    Add {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        postal_code: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        phone: Option<String>,
        /// Make this the default shipping address
        #[arg(long)]
        default: bool,
    },
}

// ── Access ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AccessArgs {
    /// Route to check, e.g. `/admin/orders`
    pub path: String,

    /// Permission the route requires
    #[arg(long)]
    pub permission: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Store the profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
