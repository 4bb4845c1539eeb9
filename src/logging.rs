//! File logging.
//!
//! The dashboard owns stdout: a log line written there would shift the
//! frame and break the redraw line count. Logs therefore go to a file only.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install a global subscriber appending to `path`.
///
/// The level comes from `RUST_LOG`, defaulting to `info`. Returns an error
/// if the log file cannot be opened; installing twice is silently ignored.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = std::env::temp_dir().join(format!("vmdash-log-{}", std::process::id()));
        let path = dir.join("nested").join("vmdash.log");

        init(&path).unwrap();
        tracing::info!("logging initialised");
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
