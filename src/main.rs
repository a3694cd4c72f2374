use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;

use ranktop::app::App;
use ranktop::config::{Config, load_config, load_config_from_path};
use ranktop::event::{Event, EventHandler};
use ranktop::headless::run_headless;
use ranktop::scheduler::Scheduler;
use ranktop::system::guard;
use ranktop::{logging, ui};

#[derive(Parser)]
#[command(
    name = "ranktop",
    version,
    about = "Terminal system monitor with a ranked process table"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Number of processes to show
    #[arg(long)]
    limit: Option<usize>,

    /// Sort criterion: cpu, memory, pid, name
    #[arg(long)]
    sort: Option<String>,

    /// Sort ascending instead of descending
    #[arg(long, default_value_t = false)]
    ascending: bool,

    /// Write logs here instead of the default cache location
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run this many refresh ticks without a terminal, printing each
    /// snapshot as JSON, then exit.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    ticks: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = load_config_for_cli(&cli);
    logging::init(&config.logging, &config.log_path())?;
    tracing::info!(
        interval_ms = config.refresh_interval().as_millis() as u64,
        limit = config.general.process_limit,
        sort = config.rank_options().criterion.label(),
        "starting ranktop"
    );

    if let Some(ticks) = cli.ticks {
        guard::silence_caught_panics();
        let mut app = App::new(&config);
        let mut out = stdout().lock();
        return run_headless(&mut app, config.refresh_interval(), ticks, &mut out).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
    // Outermost, so caught metric panics never reach the restore above.
    guard::silence_caught_panics();

    let result = run(&mut terminal, config).await;

    ratatui::restore();
    tracing::info!("ranktop exiting");

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let mut app = App::new(&config);
    let mut scheduler = Scheduler::new(config.refresh_interval());
    let mut events = EventHandler::new();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        tokio::select! {
            at = scheduler.next_tick() => {
                app.on_tick(at);
                scheduler.rearm();
            }
            event = events.next() => match event {
                Some(Event::Key(key)) => {
                    if key.kind == KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Some(Event::Resize) => {}
                None => {
                    tracing::warn!("terminal event stream closed");
                    app.running = false;
                }
            },
            signal = &mut ctrl_c => {
                if let Err(err) = signal {
                    tracing::error!(error = %err, "failed to listen for interrupt");
                }
                tracing::info!("interrupt received");
                app.running = false;
            }
        }

        if app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(limit) = cli.limit {
        config.general.process_limit = limit;
    }
    if let Some(ref sort) = cli.sort {
        config.general.default_sort = sort.clone();
    }
    if cli.ascending {
        config.general.ascending = true;
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = Some(path.clone());
    }

    config
}
