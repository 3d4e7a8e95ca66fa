use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use clap::{Parser, ValueEnum};

use sift::surface::Screens;
use sift::{courses, jobs, AppEvent, Application, Tab};
use sift_core::config::Config;
use sift_feeds::{Archiver, CompanyArchiver, CourseArchiver};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Catalog {
    Jobs,
    Courses,
}

#[derive(Parser)]
#[command(name = "sift", about = "Faceted search over job and course listings")]
struct Cli {
    /// Which catalog the data file holds.
    #[arg(long, value_enum)]
    catalog: Catalog,

    /// JSON feed to search.
    #[arg(long)]
    data: PathBuf,

    /// Query string of a shared URL, e.g. `center=50.45,30.52,12&vacancy-query=rust`.
    #[arg(long, default_value = "")]
    url: String,

    /// Pick a company (jobs: or a city) or a school (courses) by its display
    /// name before searching, as the autocomplete does. Repeatable.
    #[arg(long = "pick", value_name = "NAME")]
    picks: Vec<String>,

    /// Config file (defaults to ~/.config/sift/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/sift-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/sift-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("sift debug log started: tail -f /tmp/sift-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(&cli, &config))
}

async fn dispatch(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let screens = Screens::default();
    match cli.catalog {
        Catalog::Jobs => {
            let wiring = jobs::wire(config, &cli.url)?;
            let widgets = wiring.widgets.clone();
            let index = Arc::new(Mutex::new(None));
            let hook_index = Arc::clone(&index);
            let hook_widgets = widgets.clone();
            let app = Application::new(CompanyArchiver, wiring, jobs::surfaces(config, &screens))
                .with_on_data(move |companies| {
                    let autocomplete = hook_widgets.populate(companies);
                    *hook_index.lock().unwrap_or_else(PoisonError::into_inner) = Some(autocomplete);
                });
            let pick = |name: &str| {
                let index = index.lock().unwrap_or_else(PoisonError::into_inner);
                index.as_ref().is_some_and(|index| {
                    widgets.pick_company(index, name) || widgets.pick_city(index, name)
                })
            };
            run(app, cli, config, &screens, pick).await
        }
        Catalog::Courses => {
            let wiring = courses::wire(config, &cli.url)?;
            let widgets = wiring.widgets.clone();
            let index = Arc::new(Mutex::new(None));
            let hook_index = Arc::clone(&index);
            let hook_widgets = widgets.clone();
            let app = Application::new(CourseArchiver, wiring, courses::surfaces(config, &screens))
                .with_on_data(move |courses| {
                    let autocomplete = hook_widgets.populate(courses);
                    *hook_index.lock().unwrap_or_else(PoisonError::into_inner) = Some(autocomplete);
                });
            let pick = |name: &str| {
                let index = index.lock().unwrap_or_else(PoisonError::into_inner);
                index
                    .as_ref()
                    .is_some_and(|index| widgets.pick_school(index, name))
            };
            run(app, cli, config, &screens, pick).await
        }
    }
}

/// Load the feed, apply `--pick` names, run the search and print the list,
/// the counters and the URL that would be persisted.
async fn run<A: Archiver + 'static>(
    mut app: Application<A>,
    cli: &Cli,
    config: &Config,
    screens: &Screens,
    pick: impl Fn(&str) -> bool,
) -> anyhow::Result<()> {
    let persisted = Arc::new(Mutex::new(None::<String>));
    let sink = Arc::clone(&persisted);
    app.url_state_mut().attach(config.url.debounce(), move |url: &str| {
        *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(url.to_string());
    });

    match sift_feeds::load(&cli.data).await {
        Ok(blob) => app.handle(AppEvent::DataLoaded(blob)),
        Err(err) => {
            app.handle(AppEvent::DataFailed(err.to_string()));
            return Err(err.into());
        }
    };
    app.handle(AppEvent::MapReady);
    if !app.is_loaded() {
        anyhow::bail!("{} could not be decoded", cli.data.display());
    }

    for name in &cli.picks {
        if !pick(name) {
            anyhow::bail!("nothing named {name:?} to pick");
        }
        tracing::debug!(name = %name, "picked");
    }

    app.handle(AppEvent::SelectTab(Tab::List));
    app.handle(AppEvent::Submit);
    app.url_state_mut().flush().await;

    for line in screens.list.lines() {
        println!("{line}");
    }
    for line in screens.stats.lines() {
        println!("{line}");
    }

    let url = persisted
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .unwrap_or_else(|| app.url_state().url());
    println!("{url}");
    Ok(())
}
