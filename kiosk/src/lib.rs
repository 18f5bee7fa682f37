//! Brasa Kiosk - terminal ordering kiosk for Pollería La Brasa
//!
//! # Overview
//!
//! The customer picks dine-in or delivery, browses the menu, builds a cart
//! and fills a short form. The order leaves the kiosk as a chat deep link
//! carrying a formatted message; nothing is sent to a server.
//!
//! - **Catalog** (`catalog`): built-in menu and categories
//! - **Orders** (`orders`): cart, money math, message composition
//! - **Flow** (`flow`): screen state machine, order form, submission
//! - **Profile** (`profile`): customer profile persisted in redb
//! - **UI** (`ui`): ratatui screens and key handling
//!
//! # Module layout
//!
//! ```text
//! kiosk/src/
//! ├── catalog/       # Menu data
//! ├── core/          # Config, errors
//! ├── flow/          # Screens, form, submitter
//! ├── orders/        # Cart, composer, money
//! ├── profile/       # Profile storage
//! ├── ui/            # Terminal front end
//! └── utils/         # Logger
//! ```

pub mod catalog;
pub mod core;
pub mod flow;
pub mod orders;
pub mod profile;
pub mod ui;
pub mod utils;

// Re-exports
pub use catalog::Catalog;
pub use core::{KioskConfig, KioskError, KioskResult};
pub use flow::{OrderFlow, OrderForm, OrderSubmitter, Screen, SubmittedOrder};
pub use orders::{Cart, ComposeOptions, compose_order_message};
pub use profile::ProfileStore;
pub use ui::App;

pub use utils::logger::{cleanup_old_logs, init_tui_logger};

/// Days of rotated log files kept in the work directory
pub const LOG_RETENTION_DAYS: i64 = 14;

/// Prepare the work directory and logging for a kiosk session
///
/// Logs go to the TUI panel, and to daily files under `<work_dir>/logs`
/// when file logging is on.
pub fn setup_environment(config: &KioskConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;

    if config.log_to_file {
        let log_dir = config.log_dir();
        init_tui_logger(&config.log_level, Some(&log_dir))?;
        match cleanup_old_logs(&log_dir, LOG_RETENTION_DAYS) {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed, "Removed old log files"),
            Err(e) => tracing::warn!(error = %e, "Failed to clean old log files"),
        }
    } else {
        init_tui_logger(&config.log_level, None)?;
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____
   / __ )_________ __________ _
  / __  / ___/ __ `/ ___/ __ `/
 / /_/ / /  / /_/ (__  ) /_/ /
/_____/_/   \__,_/____/\__,_/
    __ __ _           __
   / //_/(_)___  _____/ /__
  / ,<  / / __ \/ ___/ //_/
 / /| |/ / /_/ (__  ) ,<
/_/ |_/_/\____/____/_/|_|
    "#
    );
}
