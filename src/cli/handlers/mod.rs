use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{AuthAction, HttpApi};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::client::Client;
use crate::io::config_io;
use crate::io::session_store::SessionStore;
use crate::model::{ClientConfig, TaskFields, TaskFilter, TaskStatus};
use crate::ops::import;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Read config.toml, apply the `--api-url` override, and build a controller
/// with its session hydrated from storage.
pub fn connect(api_url: Option<&str>) -> Result<(Client<HttpApi>, ClientConfig), Box<dyn std::error::Error>> {
    let mut config = config_io::read_config()?;
    if let Some(url) = api_url {
        config.api_url = url.to_string();
    }
    let timeout = config.request_timeout_secs.map(Duration::from_secs);
    let api = HttpApi::new(&config.api_url, timeout)?;
    tracing::debug!(api_url = %api.base_url(), "client configured");
    let client = Client::new(api, SessionStore::default_location());
    Ok((client, config))
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Ok(());
    };
    let (mut client, _config) = connect(cli.api_url.as_deref())?;

    match command {
        // Session
        Commands::Login(args) => cmd_auth(&mut client, AuthAction::Login, args),
        Commands::Register(args) => cmd_auth(&mut client, AuthAction::Register, args),
        Commands::Logout => cmd_logout(&mut client),
        Commands::Whoami => cmd_whoami(&client, json),

        // Read commands
        Commands::Dashboard => cmd_dashboard(&mut client, json),
        Commands::List(args) => cmd_list(&mut client, args, json),
        Commands::Json(args) => cmd_json(&mut client, args),

        // Write commands
        Commands::Add(args) => cmd_add(&mut client, args),
        Commands::Status(args) => cmd_status(&mut client, args.id, TaskStatus::from(args.status)),
        Commands::Done(args) => cmd_status(&mut client, args.id, TaskStatus::Done),
        Commands::Todo(args) => cmd_status(&mut client, args.id, TaskStatus::Todo),
        Commands::Delete(args) => cmd_delete(&mut client, args),

        // Bulk
        Commands::Import(args) => cmd_import(&mut client, args),
        Commands::Export(args) => cmd_export(&mut client, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn filter_from_args(args: &ListArgs) -> TaskFilter {
    TaskFilter {
        search: args.search.clone().unwrap_or_default(),
        status: args
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(TaskStatus::from),
    }
}

/// Print `message` and read one line from stdin, without the newline
fn prompt_line(message: &str) -> Result<String, io::Error> {
    eprint!("{}", message);
    io::stderr().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\n', '\r']).to_string())
}

fn confirm(message: &str) -> bool {
    prompt_line(&format!("{} [y/N] ", message))
        .map(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

fn cmd_auth(client: &mut Client<HttpApi>, action: AuthAction, args: AuthArgs) -> CmdResult {
    let password = match args.password {
        Some(p) => p,
        None => prompt_line("Password: ")?,
    };
    client.authenticate(action, &args.username, &password)?;
    if let Some(session) = client.session() {
        println!("logged in as {}", session.username);
    }
    Ok(())
}

fn cmd_logout(client: &mut Client<HttpApi>) -> CmdResult {
    client.logout()?;
    println!("logged out");
    Ok(())
}

fn cmd_whoami(client: &Client<HttpApi>, json: bool) -> CmdResult {
    let session = client.session().ok_or("not logged in")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&whoami_to_json(session))?);
    } else {
        println!("{} (id {})", session.username, session.user_id);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read handlers
// ---------------------------------------------------------------------------

/// Load with the given filter; errors when logged out rather than printing nothing
fn load(client: &mut Client<HttpApi>, filter: TaskFilter) -> CmdResult {
    if !client.is_logged_in() {
        return Err(crate::client::ClientError::NotLoggedIn.into());
    }
    client.filter = filter;
    client.load_data()?;
    Ok(())
}

fn cmd_dashboard(client: &mut Client<HttpApi>, json: bool) -> CmdResult {
    load(client, TaskFilter::default())?;
    let summary = client.dashboard();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", format_dashboard(&summary));
    }
    Ok(())
}

fn cmd_list(client: &mut Client<HttpApi>, args: ListArgs, json: bool) -> CmdResult {
    load(client, filter_from_args(&args))?;
    if json {
        println!("{}", client.tasks_json()?);
    } else {
        println!("{}", format_task_list(client.todos()));
    }
    Ok(())
}

fn cmd_json(client: &mut Client<HttpApi>, args: ListArgs) -> CmdResult {
    load(client, filter_from_args(&args))?;
    println!("{}", client.tasks_json()?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write handlers
// ---------------------------------------------------------------------------

fn cmd_add(client: &mut Client<HttpApi>, args: AddArgs) -> CmdResult {
    let fields = TaskFields {
        title: args.title,
        description: args.description.unwrap_or_default(),
        category: args.category,
        due_date: args.due.unwrap_or_default(),
    };
    client.create_task(&fields)?;
    println!("created \"{}\"", fields.title.trim());
    Ok(())
}

fn cmd_status(client: &mut Client<HttpApi>, id: i64, status: TaskStatus) -> CmdResult {
    client.update_task_status(id, &status)?;
    println!("#{} -> {}", id, status);
    Ok(())
}

fn cmd_delete(client: &mut Client<HttpApi>, args: DeleteArgs) -> CmdResult {
    let yes = args.yes;
    let deleted = client.delete_task(args.id, || {
        yes || confirm("Are you sure you want to delete this task?")
    })?;
    if deleted {
        println!("deleted #{}", args.id);
    } else {
        println!("cancelled");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Bulk handlers
// ---------------------------------------------------------------------------

fn cmd_import(client: &mut Client<HttpApi>, args: ImportArgs) -> CmdResult {
    let text = import::read_import_file(&PathBuf::from(&args.file))?;
    let count = client.import_tasks(&text)?;
    println!("Successfully imported {} todos!", count);
    Ok(())
}

fn cmd_export(client: &mut Client<HttpApi>, args: ExportArgs) -> CmdResult {
    load(client, filter_from_args(&args.filter))?;
    let dir = match args.dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    let path = client.export_tasks(&dir, chrono::Utc::now().date_naive())?;
    println!("exported {} tasks to {}", client.todos().len(), path.display());
    Ok(())
}
