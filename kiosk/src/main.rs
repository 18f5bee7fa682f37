use brasa_kiosk::flow::table_entry_url;
use brasa_kiosk::{App, KioskConfig, OrderSubmitter, ProfileStore, print_banner, setup_environment};
use brasa_link::{AnyOpener, DryRunOpener, SystemOpener};
use clap::Parser;
use std::time::Instant;

/// Terminal ordering kiosk for Pollería La Brasa
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the profile database and logs
    #[arg(long, env = "WORK_DIR")]
    work_dir: Option<String>,

    /// Entry URL, as scanned from a table QR code (e.g. "https://brasa.pe/?mesa=4")
    #[arg(long)]
    entry_url: Option<String>,

    /// Table number; shorthand for an entry URL with `?mesa=<N>`
    #[arg(long, conflicts_with = "entry_url")]
    table: Option<String>,

    /// Log order links instead of opening them
    #[arg(long)]
    dry_run: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, config, logging)
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = KioskConfig::from_env();
    if let Some(work_dir) = args.work_dir {
        config.work_dir = work_dir;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(table) = args.table {
        config.entry_url = Some(table_entry_url(&table));
    } else if args.entry_url.is_some() {
        config.entry_url = args.entry_url;
    }
    config.dry_run |= args.dry_run;

    print_banner();
    setup_environment(&config)?;

    tracing::info!(
        work_dir = %config.work_dir,
        dry_run = config.dry_run,
        "🔥 Brasa kiosk starting..."
    );

    // 2. Profile store and link opener
    let store = ProfileStore::open(config.database_path())?;
    let opener = if config.dry_run {
        AnyOpener::DryRun(DryRunOpener)
    } else {
        AnyOpener::System(SystemOpener::new())
    };
    let submitter = OrderSubmitter::from_config(&config, store.clone(), opener)?;

    // 3. Run the TUI
    let mut app = App::new(&config, store);
    app.enter(config.entry_url.as_deref(), Instant::now());

    if let Err(e) = brasa_kiosk::ui::run(&mut app, &submitter).await {
        tracing::error!(error = %e, "Kiosk stopped with an error");
        return Err(e.into());
    }

    tracing::info!("Kiosk closed");
    Ok(())
}
