//! Link opener adapters
//!
//! Supports:
//! - System URL handler (`xdg-open`, `open`, `url.dll` on Windows)
//! - Dry run (log only)
//! - Recording (keeps every URL, for tests and previews)

use crate::error::{LinkError, LinkResult};
use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::{info, instrument, warn};

/// Trait for link opener adapters
///
/// Opening is fire-and-forget: success means the handler was launched, not
/// that the message was delivered. Implementations must not wait for the
/// handler to exit.
#[allow(async_fn_in_trait)]
pub trait LinkOpener {
    async fn open(&self, url: &str) -> LinkResult<()>;
}

/// Platform URL handler
#[derive(Debug, Clone)]
pub struct SystemOpener {
    program: String,
    args: Vec<String>,
}

impl SystemOpener {
    /// Opener using the platform default handler
    pub fn new() -> Self {
        if cfg!(target_os = "windows") {
            Self::with_args("rundll32", &["url.dll,FileProtocolHandler"])
        } else if cfg!(target_os = "macos") {
            Self::with_program("open")
        } else {
            Self::with_program("xdg-open")
        }
    }

    /// Opener using a specific program, called as `<program> <url>`
    pub fn with_program(program: &str) -> Self {
        Self::with_args(program, &[])
    }

    /// Opener called as `<program> <args...> <url>`
    pub fn with_args(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkOpener for SystemOpener {
    #[instrument(skip(url), fields(program = %self.program, url_len = url.len()))]
    async fn open(&self, url: &str) -> LinkResult<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()?;

        info!("URL handler launched");

        // Some handlers stay attached until the browser closes; reap in the background
        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if !status.success() => {
                    warn!(%program, %status, "URL handler exited with failure");
                }
                Err(e) => warn!(%program, error = %e, "Failed to wait for URL handler"),
                Ok(_) => {}
            }
        });

        Ok(())
    }
}

/// Opener that only logs the URL
#[derive(Debug, Clone, Default)]
pub struct DryRunOpener;

impl LinkOpener for DryRunOpener {
    async fn open(&self, url: &str) -> LinkResult<()> {
        info!(url = %url, "Dry run: link not opened");
        Ok(())
    }
}

/// Opener that records every URL it is asked to open
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recording opener whose `open` always fails (after recording)
    pub fn failing() -> Self {
        Self {
            opened: Arc::default(),
            fail: true,
        }
    }

    /// URLs opened so far, oldest first
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|urls| urls.clone())
            .unwrap_or_default()
    }
}

impl LinkOpener for RecordingOpener {
    async fn open(&self, url: &str) -> LinkResult<()> {
        if let Ok(mut urls) = self.opened.lock() {
            urls.push(url.to_string());
        }
        if self.fail {
            return Err(LinkError::Handler("recording opener set to fail".to_string()));
        }
        Ok(())
    }
}

/// Runtime-selected opener
#[derive(Debug, Clone)]
pub enum AnyOpener {
    System(SystemOpener),
    DryRun(DryRunOpener),
    Recording(RecordingOpener),
}

impl LinkOpener for AnyOpener {
    async fn open(&self, url: &str) -> LinkResult<()> {
        match self {
            Self::System(o) => o.open(url).await,
            Self::DryRun(o) => o.open(url).await,
            Self::Recording(o) => o.open(url).await,
        }
    }
}
