mod app;
mod ui;

use anyhow::{Context, Result};
use app::{Action, App};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jiraform_core::models::Config;
use jiraform_core::storage::{init_config_dir, ConfigStorage};
use jiraform_jira::{IssueWorkflow, JiraAuth, JiraClient};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::time::Duration;
use tracing::info;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Parser, Debug)]
#[command(name = "jiraform")]
#[command(about = "Create a Jira issue and its sub-tasks from a terminal form", long_about = None)]
struct Args {
    /// Config file (defaults to <config dir>/jiraform/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Read an API token from stdin, save it to the OS keyring and exit
    #[arg(long)]
    store_token: bool,
}

fn setup_logging(level: &str) -> Result<PathBuf> {
    let mut log_path = std::env::temp_dir();
    log_path.push("jiraform.log");

    let log_file = std::fs::File::create(&log_path)?;
    let filter = format!(
        "jiraform={level},jiraform_jira={level},jiraform_core={level}",
        level = level
    );
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(filter)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(log_path)
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        let _ = crossterm::execute!(std::io::stdout(), crossterm::cursor::Show);

        tracing::error!(?panic_info, "Application panicked");

        eprintln!("A fatal error occurred: {}", panic_info);

        original_hook(panic_info);
    }));
}

fn load_config(args: &Args) -> Result<(Config, PathBuf)> {
    let storage = match &args.config {
        Some(path) => ConfigStorage::from_file(path.clone()),
        None => ConfigStorage::new(init_config_dir()?),
    };
    let path = storage.path().to_path_buf();

    let mut config = storage
        .load()
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;

    Ok((config, path))
}

fn store_token(username: &str) -> Result<()> {
    eprint!("API token for {}: ", username);
    io::stderr().flush()?;

    let mut token = String::new();
    io::stdin().read_line(&mut token)?;
    JiraAuth::store(username, &token)?;

    eprintln!("Token saved to the OS keyring");
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    workflow: &IssueWorkflow<JiraClient>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            break;
        }

        tokio::time::sleep(Duration::from_millis(16)).await;

        if !event::poll(Duration::from_millis(0))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match app.handle_key(key.code, key.modifiers) {
                Action::Quit => app.should_quit = true,
                Action::Submit => match app.build_request() {
                    Ok(request) => {
                        info!(issue_type = %request.issue_type, "Submitting issue");
                        app.status_message = "Submitting...".to_string();
                        terminal.draw(|f| ui::draw(f, app))?;

                        let result = workflow.create_issue(&request).await;
                        app.record_result(result);
                    }
                    Err(e) => {
                        app.status_message = e.to_string();
                    }
                },
                Action::None => {}
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, config_path) = load_config(&args)?;

    if args.store_token {
        return store_token(&config.jira.username);
    }

    let log_path = setup_logging(&config.logging.level)?;
    setup_panic_hook();
    info!("jiraform starting up");
    info!("Config file: {}", config_path.display());
    info!("Log file: {}", log_path.display());

    let auth = JiraAuth::resolve(&config.jira.username)?;
    let client = JiraClient::new(&config.jira, &auth)?;

    match client.verify_credentials().await {
        Ok(user) => info!("Authenticated as {}", user.display_name),
        Err(e) => {
            eprintln!("✗ Could not connect to {}: {}", config.jira.server_url, e);
            std::process::exit(1);
        }
    }

    let mut app = App::new(&config);
    let workflow = IssueWorkflow::new(client, config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &workflow).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    for report in &app.created {
        print!("{}", report);
    }

    info!("jiraform shutting down");
    result
}
