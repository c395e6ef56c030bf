use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "dev-server.log";
const MAX_LOG_FILES: usize = 14; // keep roughly two weeks of daily logs

/// Setup logging to stdout and a daily-rotated file in `log_dir`
/// (default `~/.ragask/dev-server.log`).
///
/// # Errors
/// Returns an error if the log directory cannot be created or logging fails to initialize.
pub fn setup_logging(log_dir: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => dirs_next::home_dir()
            .ok_or("Cannot find home directory")?
            .join(".ragask"),
    };

    fs::create_dir_all(&log_dir)?;

    // Prune before initializing tracing so later issues are logged normally.
    cleanup_old_logs(&log_dir, MAX_LOG_FILES);

    let file_appender = rolling::daily(&log_dir, LOG_FILE);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_appender))
        .with(
            EnvFilter::from_default_env()
                .add_directive("ragask_dev_server=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .try_init()?;

    tracing::info!(
        "Logging initialized to {:?}/{} (daily rotation)",
        log_dir,
        LOG_FILE
    );

    Ok(())
}

/// Delete all but the `max_files` most recently modified log files.
fn cleanup_old_logs(log_dir: &Path, max_files: usize) {
    let Ok(entries) = fs::read_dir(log_dir) else {
        eprintln!("log retention: failed to read log dir {log_dir:?}");
        return;
    };

    let mut logs: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .filter(|entry| entry.file_name().to_string_lossy().contains(LOG_FILE))
        .map(|entry| {
            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
            (entry.path(), modified)
        })
        .collect();

    // newest first; files without a timestamp sort last
    logs.sort_by(|a, b| match (a.1, b.1) {
        (Some(a_time), Some(b_time)) => b_time.cmp(&a_time),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for (path, _) in logs.into_iter().skip(max_files) {
        if let Err(err) = fs::remove_file(&path) {
            eprintln!("log retention: failed to remove {path:?}: {err:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "ragask-log-test-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_cleanup_keeps_newest_logs() {
        let dir = scratch_dir("retention");
        let now = SystemTime::now();
        for day in 0..5u64 {
            let path = dir.join(format!("{LOG_FILE}.2026-01-0{}", day + 1));
            fs::write(&path, "log").unwrap();
            let file = fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(now - Duration::from_secs(86_400 * (5 - day)))
                .unwrap();
        }
        fs::write(dir.join("unrelated.txt"), "keep").unwrap();

        cleanup_old_logs(&dir, 2);

        let mut remaining: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        remaining.sort();
        assert_eq!(
            remaining,
            vec![
                format!("{LOG_FILE}.2026-01-04"),
                format!("{LOG_FILE}.2026-01-05"),
                "unrelated.txt".to_string(),
            ]
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_cleanup_tolerates_missing_dir() {
        cleanup_old_logs(Path::new("/nonexistent/ragask/logs"), 3);
    }
}
