use std::path::PathBuf;
use std::time::Duration;

/// Kiosk configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first):
///
/// | Env var | Default | Meaning |
/// |----------|--------|------|
/// | WORK_DIR | ./brasa-data | Holds `customer.redb` and `logs/` |
/// | LOG_LEVEL | info | Filter used when RUST_LOG is unset |
/// | LOG_TO_FILE | true | Daily rotated file under WORK_DIR/logs |
/// | RESTAURANT_NAME | POLLERÍA LA BRASA | Message header |
/// | WHATSAPP_NUMBER | 51936684281 | Deep-link destination |
/// | MESSAGING_BASE_URL | https://wa.me | Deep-link base |
/// | QR_AUTO_ADVANCE_MS | 2000 | Delay before a QR table session opens the menu |
/// | SUBMIT_DELAY_MS | 1000 | Pause shown while "sending" |
/// | ENTRY_URL | (unset) | Simulated entry URL, e.g. `https://brasa.pe/?mesa=4` |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/tmp/brasa ENTRY_URL='https://brasa.pe/?mesa=4' cargo run -p brasa-kiosk
/// ```
#[derive(Debug, Clone)]
pub struct KioskConfig {
    /// Working directory
    pub work_dir: String,
    pub log_level: String,
    pub log_to_file: bool,
    pub restaurant_name: String,
    /// Destination number, digits only
    pub whatsapp_number: String,
    pub messaging_base_url: String,
    pub qr_auto_advance: Duration,
    pub submit_delay: Duration,
    pub entry_url: Option<String>,
    /// Log links instead of opening them
    pub dry_run: bool,
}

impl KioskConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./brasa-data".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_to_file: std::env::var("LOG_TO_FILE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            restaurant_name: std::env::var("RESTAURANT_NAME")
                .unwrap_or_else(|_| "POLLERÍA LA BRASA".into()),
            whatsapp_number: std::env::var("WHATSAPP_NUMBER")
                .unwrap_or_else(|_| "51936684281".into()),
            messaging_base_url: std::env::var("MESSAGING_BASE_URL")
                .unwrap_or_else(|_| "https://wa.me".into()),
            qr_auto_advance: Duration::from_millis(
                std::env::var("QR_AUTO_ADVANCE_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2000),
            ),
            submit_delay: Duration::from_millis(
                std::env::var("SUBMIT_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            ),
            entry_url: std::env::var("ENTRY_URL").ok().filter(|v| !v.trim().is_empty()),
            dry_run: false,
        }
    }

    /// Override the working directory, keeping everything else from the environment
    ///
    /// Mostly used by tests.
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("customer.redb")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
