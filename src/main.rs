//! SearchView — presentation and session-sync layer for a personal search engine.
//!
//! Entry point: renders a page location against the configured server (or the
//! in-process demo services) and prints it. With the `gui` feature and
//! `--window`, the page is shown in a WebView instead.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::error;

use searchview::app::App;
use searchview::services::loopback::LoopbackTransport;
use searchview::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use searchview::types::record::SearchHit;
use searchview::types::settings::ClientSettings;
use searchview::types::view::View;
use searchview::ui::html::{render_html, render_text};
use searchview::ui::view_model::ItemId;

#[derive(Parser, Debug)]
#[command(name = "searchview", version, about = "Render search, history, visited and favorites views")]
struct Cli {
    /// Page location, e.g. `/?q=cats` or `/?view=favorites`.
    #[arg(default_value = "/")]
    location: String,

    /// Settings file (JSON).
    #[arg(long)]
    settings: Option<String>,

    /// Use in-process demo services instead of a live server.
    #[arg(long)]
    demo: bool,

    /// Print HTML instead of text.
    #[arg(long)]
    html: bool,

    /// Activate an item after rendering (repeatable), e.g. `--click item-0`.
    #[arg(long = "click")]
    clicks: Vec<String>,

    /// Open a window instead of printing.
    #[cfg(feature = "gui")]
    #[arg(long)]
    window: bool,
}

fn demo_index() -> Vec<SearchHit> {
    let hit = |location: &str, title: &str, count: u64, score: f64| SearchHit {
        location: location.to_string(),
        title: title.to_string(),
        count,
        score,
        timestamp: chrono::Utc::now().timestamp_millis(),
    };
    vec![
        hit("https://en.wikipedia.org/wiki/Cat", "Cat - Wikipedia", 42, 0.4567),
        hit("https://www.rust-lang.org/", "Rust Programming Language", 17, 0.2301),
        hit("https://docs.rs/", "", 3, 0.051),
    ]
}

async fn build_app(cli: &Cli) -> Result<App, Box<dyn std::error::Error>> {
    let mut engine = SettingsEngine::new(cli.settings.clone());
    let settings: ClientSettings = engine.load()?;

    if !cli.demo {
        return Ok(App::connect(settings)?);
    }

    let loopback = Arc::new(LoopbackTransport::new(settings.clone()).with_index(demo_index()));
    let app = App::new(settings, loopback);
    // Seed the session so every view has something to show.
    let mut seeded = app.open("/?q=rust").await?;
    if let Some(item) = seeded.page.items().first().map(|i| i.id) {
        seeded.handlers.click(&mut seeded.page, item).await;
    }
    let mut history = app.open(&format!("/?view={}", View::History)).await?;
    history.handlers.click(&mut history.page, ItemId(0)).await;
    Ok(app)
}

async fn render(app: &App, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut open = app.open(&cli.location).await?;
    for click in &cli.clicks {
        match ItemId::parse(click) {
            Some(item) => {
                if !open.handlers.click(&mut open.page, item).await {
                    eprintln!("{} has no active control", click);
                }
            }
            None => eprintln!("not an item id: {}", click),
        }
    }

    let output = if cli.html {
        render_html(&open.page)
    } else {
        render_text(&open.page)
    };
    println!("{}", output);
    for location in &open.page.navigations {
        println!("→ navigate to {}", location);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let app = runtime.block_on(build_app(&cli))?;

    #[cfg(feature = "gui")]
    if cli.window {
        // The window owns its own runtime.
        drop(runtime);
        return searchview::ui::webview_app::run(app, &cli.location);
    }

    runtime.block_on(render(&app, &cli))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("searchview: {}", e);
            ExitCode::FAILURE
        }
    }
}
