//! codewiki: terminal client for a code-documentation server.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use codewiki::add::{AddError, AddRepoFlow};
use codewiki::cache::{self, RecentRepos, RecentStore};
use codewiki::client::{BackendApi, HttpBackend, repo_page_url};
use codewiki::config::Config;
use codewiki::constants;
use codewiki::env::Env;
use codewiki::progress::LoadingIndicator;
use codewiki::share::{self, ClipboardSink, CommandShare, PlatformShare, SharePayload, SystemClipboard};
use codewiki::view::{View, grid};
use codewiki::wiki::{WikiError, WikiSession};

use std::io::IsTerminal;
use std::path::Path;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::args::{AddSource, CacheAction, Cli, Command, OutputFormat};

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `CODEWIKI_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Everything a command needs, built once from config.
struct App {
    config: Config,
    format: OutputFormat,
    cache: RecentRepos,
}

impl App {
    fn backend(&self) -> Result<HttpBackend> {
        HttpBackend::from_config(&self.config.server).context("failed to create backend client")
    }

    fn print(&self, view: &View) {
        print!("{}", self.format.renderer().render(view));
    }

    fn print_grid(&self, repos: &[codewiki::models::RepoDescriptor]) {
        self.print(&grid::render_grid(repos, &self.config.server.url));
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let env = Env::real();
    let cwd = std::env::current_dir().ok();
    let config = Config::load(cwd.as_deref(), &env)
        .context("failed to load configuration")?
        .with_server_override(cli.server);
    tracing::debug!(server = %config.server.url, "configuration loaded");

    let app = App {
        cache: RecentRepos::new(RecentStore::from_config(&config.recent)),
        config,
        format: cli.format,
    };

    match cli.command {
        Command::List => run_list(&app),
        Command::Search { query } => run_search(&app, &query),
        Command::Add { source } => run_add(&app, source).await,
        Command::Remove { id, yes } => run_remove(&app, &id, yes).await,
        Command::Open { id } => run_open(&app, &id).await,
        Command::Review { id } => run_review(&app, &id).await,
        Command::File { id, path } => run_file(&app, &id, &path).await,
        Command::Graph { id, output } => run_graph(&app, &id, output.as_deref()).await,
        Command::Share => run_share(&app).await,
        Command::Cache { action } => run_cache(&app, action),
        Command::Version => run_version(),
    }
}

/// Print version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

fn run_list(app: &App) -> Result<()> {
    app.print_grid(&app.cache.list());
    Ok(())
}

fn run_search(app: &App, query: &str) -> Result<()> {
    let hits = cache::filter_repos(&app.cache.list(), query);
    app.print_grid(&hits);
    Ok(())
}

async fn run_add(app: &App, source: AddSource) -> Result<()> {
    let backend = app.backend()?;
    let indicator = LoadingIndicator::new(std::io::stderr().is_terminal());
    let flow = AddRepoFlow::new(&backend, &app.cache, &indicator);

    let added = match &source {
        AddSource::Local { dir } => flow.add_local_folder(dir).await,
        AddSource::Git { url } => flow.add_git_url(url).await,
    };

    let repo = match added {
        Ok(repo) => repo,
        Err(e @ (AddError::Analyze(_) | AddError::EmptyGitUrl)) => {
            cli::alert(&e.to_string());
            bail!("repository was not added");
        }
        Err(e) => return Err(e).context("failed to add repository"),
    };

    cli::notice(&format!("Added {} ({})", repo.name, repo.id));
    app.print_grid(&app.cache.list());

    // Navigate to the new repository's page.
    cli::hint(&repo_page_url(backend.base_url(), &repo.id));
    open_wiki(app, &backend, &repo.id).await
}

async fn run_remove(app: &App, id: &str, yes: bool) -> Result<()> {
    let list = app.cache.list();
    let Some(repo) = list.iter().find(|r| r.id == id) else {
        bail!("no repository with id '{id}' in the recent list");
    };

    if !yes {
        let question = grid::delete_prompt(&repo.name);
        let stdin = std::io::stdin();
        let confirmed = cli::confirm(&question, stdin.lock(), std::io::stderr())
            .context("failed to read confirmation")?;
        if !confirmed {
            return Ok(());
        }
    }

    let backend = app.backend()?;
    let remaining = app
        .cache
        .remove(id, &backend)
        .await
        .context("failed to update the recent list")?;
    app.print_grid(&remaining);
    Ok(())
}

async fn run_open(app: &App, id: &str) -> Result<()> {
    let backend = app.backend()?;
    cli::hint(&repo_page_url(backend.base_url(), id));
    open_wiki(app, &backend, id).await
}

/// Initial wiki page: file tree, then the AI review.
async fn open_wiki(app: &App, backend: &dyn BackendApi, id: &str) -> Result<()> {
    let mut session = WikiSession::new(backend, id);
    let opened = session.open().await;

    let mut page = session.sidebar().clone();
    page.extend(session.content().clone());
    app.print(&page);

    opened.context("failed to load repository structure")
}

async fn run_review(app: &App, id: &str) -> Result<()> {
    let backend = app.backend()?;
    let mut session = WikiSession::new(&backend, id);
    session.load_review().await;
    app.print(session.content());
    Ok(())
}

async fn run_file(app: &App, id: &str, path: &str) -> Result<()> {
    let backend = app.backend()?;
    let mut session = WikiSession::new(&backend, id);
    session
        .open_file(path)
        .await
        .with_context(|| format!("failed to load {path}"))?;
    app.print(session.content());
    Ok(())
}

async fn run_graph(app: &App, id: &str, output: Option<&Path>) -> Result<()> {
    let backend = app.backend()?;
    let mut session = WikiSession::new(&backend, id);
    match session.show_graph().await {
        Ok(()) => {}
        Err(WikiError::Alert(message)) => {
            cli::alert(&message);
            bail!("graph is not available");
        }
        Err(e) => return Err(e).context("failed to load graph"),
    }

    match output {
        Some(path) => {
            let svg = session.diagram().unwrap_or_default();
            tokio::fs::write(path, svg)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            cli::notice(&format!("Saved graph to {}", path.display()));
        }
        None => app.print(session.content()),
    }
    Ok(())
}

async fn run_share(app: &App) -> Result<()> {
    let payload = SharePayload::app_link(app.config.share_url());

    let platform = match app.config.share.command.as_deref() {
        Some(template) => Some(CommandShare::from_template(template).context("invalid share command")?),
        None => None,
    };
    let mut clipboard = match SystemClipboard::new() {
        Ok(clipboard) => Some(clipboard),
        Err(e) => {
            tracing::debug!(error = %e, "clipboard unavailable");
            None
        }
    };

    let outcome = share::share_link(
        &payload,
        platform.as_ref().map(|p| p as &dyn PlatformShare),
        clipboard.as_mut().map(|c| c as &mut dyn ClipboardSink),
    )
    .await;

    print_share_outcome(&outcome);

    if share::HOLDS_CLIPBOARD && matches!(outcome, share::ShareOutcome::Copied(_)) {
        cli::hint(&format!(
            "Keeping the link on the clipboard for up to {}s; press Ctrl-C once pasted.",
            share::CLIPBOARD_HOLD.as_secs()
        ));
        let held = share::hold_copied(
            outcome,
            clipboard.as_mut().map(|c| c as &mut dyn ClipboardSink),
            Instant::now() + share::CLIPBOARD_HOLD,
        );
        if matches!(held, share::ShareOutcome::Manual(_)) {
            print_share_outcome(&held);
        }
    }
    Ok(())
}

fn print_share_outcome(outcome: &share::ShareOutcome) {
    if let Some(message) = outcome.message() {
        match outcome {
            share::ShareOutcome::Manual(_) => println!("{message}"),
            _ => cli::notice(&message),
        }
    }
}

fn run_cache(app: &App, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Path => {
            match app.cache.path() {
                Some(path) => println!("{}", path.display()),
                None => bail!("no config directory available"),
            }
            Ok(())
        }
        CacheAction::Clear => {
            let removed = app.cache.clear().context("failed to clear the recent list")?;
            if removed {
                cli::notice("Recent repository list cleared.");
            } else {
                cli::hint("Recent repository list is already empty.");
            }
            Ok(())
        }
    }
}
