use crate::app_dirs::AppDirs;
use crate::error::AppError;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LOG_FILE: &str = "endgame.log";

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogTarget {
    dir: PathBuf,
    file_name: String,
    rotation: Rotation,
}

impl LogTarget {
    /// An explicit path is written as-is; the default location rolls daily
    /// into `endgame.log.YYYY-MM-DD`.
    fn resolve(custom_path: Option<&Path>) -> Self {
        match custom_path {
            Some(path) => {
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new("."));
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(DEFAULT_LOG_FILE);
                Self {
                    dir: dir.to_path_buf(),
                    file_name: file_name.to_string(),
                    rotation: Rotation::NEVER,
                }
            }
            None => Self {
                dir: AppDirs::log_dir(),
                file_name: DEFAULT_LOG_FILE.to_string(),
                rotation: Rotation::DAILY,
            },
        }
    }

    /// The file when it never rotates, otherwise the directory holding the dated files
    fn location(&self) -> PathBuf {
        if self.rotation == Rotation::NEVER {
            self.dir.join(&self.file_name)
        } else {
            self.dir.clone()
        }
    }
}

/// Sets up file logging for the TUI.
///
/// The terminal is owned by the game screen, so logs never go to stdout.
/// Lines go through a non-blocking writer; the returned guard must stay
/// alive for the duration of the program so the writer can flush on exit.
/// The returned path is the log file, or the log directory when rolling daily.
pub fn setup_logging(custom_path: Option<&Path>) -> Result<(PathBuf, WorkerGuard), AppError> {
    let target = LogTarget::resolve(custom_path);

    std::fs::create_dir_all(&target.dir).map_err(|e| {
        AppError::log_setup_error(format!("Failed to create log directory: {e}"))
    })?;

    let file_appender =
        RollingFileAppender::new(target.rotation.clone(), &target.dir, &target.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::from_default_env().add_directive(
        "endgame=info"
            .parse()
            .map_err(|e| AppError::log_setup_error(format!("Bad log directive: {e}")))?,
    );

    tracing_subscriber::registry()
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|e| AppError::log_setup_error(e.to_string()))?;

    Ok((target.location(), guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_custom_path_is_not_rotated() {
        let target = LogTarget::resolve(Some(Path::new("/tmp/logs/game.log")));

        assert_eq!(target.rotation, Rotation::NEVER);
        assert_eq!(target.location(), PathBuf::from("/tmp/logs/game.log"));

        let bare = LogTarget::resolve(Some(Path::new("game.log")));
        assert_eq!(bare.location(), PathBuf::from("./game.log"));
    }

    #[test]
    fn test_default_location_is_the_log_dir() {
        let target = LogTarget::resolve(None);

        assert_eq!(target.rotation, Rotation::DAILY);
        assert_eq!(target.file_name, DEFAULT_LOG_FILE);
        assert_eq!(target.location(), AppDirs::log_dir());
    }

    #[test]
    fn test_logs_land_in_reported_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("run.log");

        let (reported, guard) = setup_logging(Some(&path)).unwrap();
        tracing::info!("countdown armed");
        drop(guard);

        assert_eq!(reported, path);
        let contents = std::fs::read_to_string(&reported).unwrap();
        assert!(contents.contains("countdown armed"), "{contents:?}");
    }
}
