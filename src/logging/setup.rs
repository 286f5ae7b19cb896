use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

/// Path of a new timestamped log file inside `log_dir`
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    log_dir.join(format!("dataset_splitter_{}.log", timestamp))
}

/// Install the global subscriber: bracketed stdout logging at `info` (or
/// whatever `RUST_LOG` asks for), plus a plain-text log file when `log_dir`
/// is given.
///
/// Returns the log file path, if one was created.
pub fn setup_logging(log_dir: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(std::io::stdout);

    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;
            let log_path = log_file_path(dir);
            let file = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_path)
                .with_context(|| format!("Failed to create log file {:?}", log_path))?;

            let layer = fmt::layer()
                .event_format(BracketedFormatter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false);
            (Some(layer), Some(log_path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(path) = &log_path {
        info!("Log file created at: {:?}", path);
    }

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_is_timestamped() {
        let path = log_file_path(Path::new("logs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(path.starts_with("logs"));
        assert!(name.starts_with("dataset_splitter_"));
        assert!(name.ends_with(".log"));
        // dataset_splitter_YYYYmmdd_HHMMSS.log
        assert_eq!(name.len(), "dataset_splitter_".len() + 15 + ".log".len());
    }
}
