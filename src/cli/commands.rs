use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - your todo list, from the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// API base URL (overrides config.toml)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to an existing account
    Login(AuthArgs),
    /// Create an account and log in
    Register(AuthArgs),
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show task counts (total, to do, done, overdue)
    Dashboard,
    /// List tasks
    List(ListArgs),
    /// Create a task
    Add(AddArgs),
    /// Set a task's status
    Status(StatusArgs),
    /// Mark a task done (shortcut for status <ID> Done)
    Done(IdArg),
    /// Mark a task to do (shortcut for status <ID> "To Do")
    Todo(IdArg),
    /// Delete a task
    Delete(DeleteArgs),
    /// Import tasks from a JSON array file
    Import(ImportArgs),
    /// Export the current task list to todos_<date>.json
    Export(ExportArgs),
    /// Print the current task list as JSON
    Json(ListArgs),
}

// ---------------------------------------------------------------------------
// Args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AuthArgs {
    /// Username
    pub username: String,
    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Only tasks whose title contains this text
    #[arg(long)]
    pub search: Option<String>,
    /// Only tasks with this status ("To Do", "Done")
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Longer description
    #[arg(long, short)]
    pub description: Option<String>,
    /// Category
    #[arg(long, short, default_value = "General")]
    pub category: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Task ID
    pub id: i64,
    /// New status (sent as-is)
    pub status: String,
}

#[derive(Args)]
pub struct IdArg {
    /// Task ID
    pub id: i64,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to a .json file holding an array of todos
    pub file: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write into (default: current directory)
    #[arg(long)]
    pub dir: Option<String>,
    #[command(flatten)]
    pub filter: ListArgs,
}
