use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use slate_core::{NoteStatus, SortOrder, StatusFilter, View};

use crate::utils::date_target::DateTarget;

#[derive(Parser, Debug)]
#[command(
    name = "slate",
    version,
    about,
    long_about = "Command-line client for the Slate note board"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,

    /// Backend base URL
    #[arg(long, env = "SLATE_API_URL", default_value = "http://localhost:5000", global = true)]
    pub api_url: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login(LoginArgs),
    /// Create a new account
    Signup(SignupArgs),
    /// Clear the stored session
    Logout,
    /// Notes subcommands
    #[clap(subcommand)]
    Note(NoteCommand),
    /// Labels subcommands
    #[clap(subcommand)]
    Label(LabelCommand),
    /// App settings subcommands
    #[clap(subcommand)]
    Settings(SettingsCommand),
    /// User profile subcommands
    #[clap(subcommand)]
    Profile(ProfileCommand),
    /// Admin portal subcommands (requires the admin role)
    #[clap(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, short, env = "SLATE_EMAIL")]
    pub email: String,
    #[arg(long, short, env = "SLATE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long, short)]
    pub name: String,
    #[arg(long, short)]
    pub email: String,
    #[arg(long, short)]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Creates a new note.
    Add(NoteAddArgs),
    /// Lists notes for a view.
    List(NoteListArgs),
    /// Edits an existing note.
    Edit(NoteEditArgs),
    /// Moves notes to the trash.
    Delete(NoteIdsArgs),
    /// Restores notes from the trash.
    Restore(NoteIdsArgs),
    /// Permanently deletes notes.
    Purge(NotePurgeArgs),
    /// Archives (or unarchives) a note.
    Archive(NoteFlagArgs),
    /// Pins (or unpins) a note.
    Pin(NoteFlagArgs),
    /// Moves a note to another note's position in the cached listing.
    Reorder(NoteReorderArgs),
}

#[derive(Debug, Args)]
pub struct NoteAddArgs {
    /// Note title
    pub title: Option<String>,

    /// Note content; '\n' separates lines
    #[arg(long, short)]
    pub content: Option<String>,

    /// Labels to attach (can be specified multiple times or comma-separated)
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub label: Vec<String>,

    /// Initial status
    #[arg(long, value_enum, default_value_t = StatusArg::Open)]
    pub status: StatusArg,

    /// Pin the note
    #[arg(long)]
    pub pin: bool,

    /// Create directly into the archive
    #[arg(long)]
    pub archive: bool,

    /// Attach files (can be specified multiple times)
    #[arg(long, value_name = "PATH")]
    pub attach: Vec<std::path::PathBuf>,
}

#[derive(Debug, Args)]
pub struct NoteListArgs {
    /// Which view to list
    #[arg(long, value_enum, default_value_t = ViewArg::Notes)]
    pub view: ViewArg,

    /// Show only non-trashed notes carrying this label
    #[arg(long)]
    pub label: Option<String>,

    /// Filter by status
    #[arg(long, value_enum, default_value_t = StatusFilterArg::All)]
    pub status: StatusFilterArg,

    /// Case-insensitive search over title and content
    #[arg(long, short)]
    pub search: Option<String>,

    /// Filter by a named day or range (e.g. "today", "last week", "2024-03-16")
    #[arg(long, value_name = "DATE", value_parser = parse_date_target)]
    pub date: Option<DateTarget>,

    /// Range start (YYYY-MM-DD); overrides --date
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD); defaults to the start day
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Sort by creation date; omitted keeps the current order mode
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// List from the local snapshot without contacting the backend
    #[arg(long)]
    pub cached: bool,

    /// Lay notes out round-robin across N columns
    #[arg(long, default_value_t = 1)]
    pub columns: usize,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct NoteEditArgs {
    /// Note ID to edit
    pub id: String,

    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub content: Option<String>,

    /// Replace the whole label set
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub label: Option<Vec<String>>,

    /// Add labels without touching the rest
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub add_label: Vec<String>,

    /// Remove labels without touching the rest
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub remove_label: Vec<String>,

    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Attach files (can be specified multiple times)
    #[arg(long, value_name = "PATH")]
    pub attach: Vec<std::path::PathBuf>,

    /// Delete existing attachments by filename
    #[arg(long, value_name = "FILENAME")]
    pub remove_attachment: Vec<String>,
}

#[derive(Debug, Args)]
pub struct NoteIdsArgs {
    /// Note ID(s)
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

#[derive(Debug, Args)]
pub struct NotePurgeArgs {
    /// Note ID(s)
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct NoteFlagArgs {
    /// Note ID
    pub id: String,

    /// Clear the flag instead of setting it
    #[arg(long)]
    pub undo: bool,
}

#[derive(Debug, Args)]
pub struct NoteReorderArgs {
    /// Note to move
    pub source: String,
    /// Note whose position it takes
    pub dest: String,
}

#[derive(Debug, Subcommand)]
pub enum LabelCommand {
    /// Lists labels (persisted and note-derived).
    List(LabelListArgs),
    /// Creates a label.
    Add { name: String },
    /// Renames a label.
    Rename { name: String, new_name: String },
    /// Deletes a label everywhere.
    Delete { name: String },
}

#[derive(Debug, Args)]
pub struct LabelListArgs {
    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Prints current settings.
    Show,
    /// Changes settings.
    Set(SettingsSetArgs),
}

#[derive(Debug, Args)]
pub struct SettingsSetArgs {
    /// Place newly created notes at the bottom of the list
    #[arg(long)]
    pub add_new_at_bottom: Option<bool>,

    /// Color theme: "system" or "dark"
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Fetches and prints the user profile.
    Show,
    /// Updates the display name.
    SetName { name: String },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Board-wide counters.
    Stats,
    /// Lists all users.
    Users,
    /// Lists all todos.
    Todos,
    /// Activates or deactivates a user.
    ToggleStatus { id: String },
    /// Promotes a user to admin (or back).
    ToggleRole { id: String },
    /// Deletes a user.
    DeleteUser { id: String },
    /// Deletes a todo.
    DeleteTodo { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ViewArg {
    Notes,
    Archive,
    Trash,
}

impl ViewArg {
    pub fn to_view(self) -> View {
        match self {
            ViewArg::Notes => View::Notes,
            ViewArg::Archive => View::Archive,
            ViewArg::Trash => View::Trash,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StatusArg {
    Open,
    InProgress,
    Completed,
}

impl StatusArg {
    pub fn to_status(self) -> NoteStatus {
        match self {
            StatusArg::Open => NoteStatus::Open,
            StatusArg::InProgress => NoteStatus::InProgress,
            StatusArg::Completed => NoteStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StatusFilterArg {
    All,
    InProgress,
    Completed,
}

impl StatusFilterArg {
    pub fn to_filter(self) -> StatusFilter {
        match self {
            StatusFilterArg::All => StatusFilter::All,
            StatusFilterArg::InProgress => StatusFilter::InProgress,
            StatusFilterArg::Completed => StatusFilter::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SortArg {
    Asc,
    Desc,
}

impl SortArg {
    pub fn to_order(self) -> SortOrder {
        match self {
            SortArg::Asc => SortOrder::Asc,
            SortArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Plain,
    Json,
}

pub fn parse_date_target(s: &str) -> anyhow::Result<DateTarget> {
    s.parse()
}
