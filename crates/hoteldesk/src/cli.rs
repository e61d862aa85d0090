//! Clap derive structures for the `hoteldesk` CLI.
//!
//! Only depends on clap and clap_complete so `build.rs` can include it for
//! man page generation.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hoteldesk -- front desk administration from the command line
#[derive(Debug, Parser)]
#[command(
    name = "hoteldesk",
    version,
    about = "Manage hotel rooms, guests, and bookings from the command line",
    long_about = "Administer a hotel management REST API: list, create, update, and delete\n\
        rooms, guests, and bookings, and view the front desk dashboard.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "HOTELDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "HOTELDESK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "HOTELDESK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, env = "HOTELDESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoomTypeArg {
    Single,
    Double,
    Suite,
    Deluxe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoomStatusArg {
    Available,
    Occupied,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentArg {
    Pending,
    Paid,
    Partial,
    Refunded,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether the API is reachable
    Status,

    /// Show room and booking counts plus alerts
    #[command(alias = "dash")]
    Dashboard,

    /// Manage rooms
    #[command(alias = "r")]
    Rooms(RoomsArgs),

    /// Manage guests
    #[command(alias = "g")]
    Guests(GuestsArgs),

    /// Manage bookings
    #[command(alias = "b")]
    Bookings(BookingsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROOMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// List rooms
    #[command(alias = "ls")]
    List {
        /// Only rooms with this status
        #[arg(long)]
        status: Option<RoomStatusArg>,

        /// Only rooms of this type
        #[arg(long = "type")]
        room_type: Option<RoomTypeArg>,
    },

    /// Show one room
    Get {
        /// Room ID
        id: String,
    },

    /// Create a room
    Create(RoomFields),

    /// Update a room; unset fields keep their current value
    Update {
        /// Room ID
        id: String,

        #[command(flatten)]
        fields: RoomUpdate,
    },

    /// Delete a room
    #[command(alias = "rm")]
    Delete {
        /// Room ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct RoomFields {
    /// Room number, e.g. 101
    #[arg(long, required = true)]
    pub number: String,

    #[arg(long = "type", default_value = "single")]
    pub room_type: RoomTypeArg,

    /// Nightly price
    #[arg(long, required = true)]
    pub price: String,

    /// Maximum number of guests
    #[arg(long, required = true)]
    pub capacity: String,

    #[arg(long, default_value = "available")]
    pub status: RoomStatusArg,

    /// Amenity (repeatable or comma-separated)
    #[arg(long = "amenity", value_delimiter = ',')]
    pub amenities: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RoomUpdate {
    #[arg(long)]
    pub number: Option<String>,

    #[arg(long = "type")]
    pub room_type: Option<RoomTypeArg>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub capacity: Option<String>,

    #[arg(long)]
    pub status: Option<RoomStatusArg>,

    /// Replace the amenity list (repeatable or comma-separated)
    #[arg(long = "amenity", value_delimiter = ',')]
    pub amenities: Option<Vec<String>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GUESTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GuestsArgs {
    #[command(subcommand)]
    pub command: GuestsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GuestsCommand {
    /// List guests
    #[command(alias = "ls")]
    List,

    /// Show one guest
    Get {
        /// Guest ID
        id: String,
    },

    /// Register a guest
    Create(GuestFields),

    /// Update a guest; unset fields keep their current value
    Update {
        /// Guest ID
        id: String,

        #[command(flatten)]
        fields: GuestUpdate,
    },

    /// Delete a guest
    #[command(alias = "rm")]
    Delete {
        /// Guest ID
        id: String,
    },

    /// List a guest's bookings
    Bookings {
        /// Guest ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct GuestFields {
    #[arg(long, required = true)]
    pub name: String,

    #[arg(long, required = true)]
    pub email: String,

    #[arg(long, required = true)]
    pub phone: String,

    /// Identity document type
    #[arg(
        long,
        default_value = "passport",
        value_parser = ["passport", "drivers-license", "national-id", "other"]
    )]
    pub id_proof: String,

    /// Identity document number
    #[arg(long, required = true)]
    pub id_number: String,

    #[arg(long, default_value = "")]
    pub street: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub country: String,
}

#[derive(Debug, Args)]
pub struct GuestUpdate {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, value_parser = ["passport", "drivers-license", "national-id", "other"])]
    pub id_proof: Option<String>,

    #[arg(long)]
    pub id_number: Option<String>,

    #[arg(long)]
    pub street: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub country: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List bookings
    #[command(alias = "ls")]
    List,

    /// Show one booking
    Get {
        /// Booking ID
        id: String,
    },

    /// Create a booking (status is always confirmed)
    Create {
        /// Guest ID
        #[arg(long, required = true)]
        guest: String,

        /// Room ID
        #[arg(long, required = true)]
        room: String,

        /// Check-in date, YYYY-MM-DD [default: today]
        #[arg(long)]
        check_in: Option<String>,

        /// Check-out date, YYYY-MM-DD [default: day after check-in]
        #[arg(long)]
        check_out: Option<String>,

        /// Number of guests
        #[arg(long = "guests", default_value = "1")]
        number_of_guests: String,

        #[arg(long, default_value = "pending")]
        payment: PaymentArg,

        /// Special requests
        #[arg(long, default_value = "")]
        requests: String,
    },

    /// Compute nights and total for a stay without booking it
    Quote {
        /// Room ID
        #[arg(long, required = true)]
        room: String,

        /// Check-in date, YYYY-MM-DD
        #[arg(long, required = true)]
        check_in: String,

        /// Check-out date, YYYY-MM-DD
        #[arg(long, required = true)]
        check_out: String,
    },

    /// Delete a booking
    #[command(alias = "rm")]
    Delete {
        /// Booking ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set the API URL of a profile, creating it if needed
    SetUrl {
        /// API base URL
        url: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
