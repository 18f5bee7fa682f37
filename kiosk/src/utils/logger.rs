//! Logging Infrastructure
//!
//! The TUI owns the terminal, so in kiosk mode events go to the in-app log
//! panel (tui-logger) and optionally to a daily rotated file.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Prefix of rotated log files (`kiosk.YYYY-MM-DD`)
const LOG_FILE_PREFIX: &str = "kiosk";

/// Initialize logging for the TUI
///
/// # Arguments
/// * `level` - filter used when `RUST_LOG` is unset (e.g. "info", "debug")
/// * `log_dir` - directory for the rotated file; `None` keeps logs in the panel only
pub fn init_tui_logger(level: &str, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tui_logger::tracing_subscriber_layer());

    match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let file = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
            let file_layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .with_filter(EnvFilter::new(level));
            registry.with(file_layer).try_init()?;
        }
        None => registry.try_init()?,
    }

    // Dependencies that still log through the `log` crate
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    Ok(())
}

/// Delete rotated log files older than `days`
///
/// Returns how many files were removed.
pub fn cleanup_old_logs(log_dir: &Path, days: i64) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(days);
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        // Match kiosk.YYYY-MM-DD
        if let Some(date_part) = name
            .strip_prefix(LOG_FILE_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_only_old_kiosk_logs() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("kiosk.2001-01-01");
        let today = dir
            .path()
            .join(format!("kiosk.{}", chrono::Local::now().format("%Y-%m-%d")));
        let other = dir.path().join("notes.2001-01-01");
        for p in [&old, &today, &other] {
            fs::write(p, b"x").unwrap();
        }

        let removed = cleanup_old_logs(dir.path(), 14).unwrap();

        assert_eq!(removed, 1);
        assert!(!old.exists());
        assert!(today.exists());
        assert!(other.exists());
    }

    #[test]
    fn test_cleanup_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(&dir.path().join("nope"), 14).unwrap(), 0);
    }
}
