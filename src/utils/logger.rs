use crate::shared::constants;
use lazy_static::lazy_static;
use std::backtrace::Backtrace;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The frame log gets every line; the error log only panic reports, so a
/// crash is findable without scrolling through per-frame noise.
struct LogFiles {
    debug: PathBuf,
    error: PathBuf,
}

lazy_static! {
    static ref FILES: Mutex<Option<LogFiles>> = Mutex::new(None);
}

fn append(path: &Path, line: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

/// Initialize logging in the working directory and install a panic hook
/// that records the crash before restoring the terminal.
pub fn init() {
    init_at(&std::env::current_dir().unwrap_or_default());
}

pub fn init_at(dir: &Path) {
    let files = LogFiles {
        debug: dir.join(constants::DEBUG_LOG_FILE),
        error: dir.join(constants::ERROR_LOG_FILE),
    };

    for path in [&files.debug, &files.error] {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
        {
            let _ = writeln!(
                file,
                "=== {} started: {} ===",
                constants::APP_NAME,
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    let debug_path = files.debug.clone();
    let error_path = files.error.clone();
    *FILES.lock().unwrap() = Some(files);

    panic::set_hook(Box::new(move |info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("Box<Any>");
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let report = format!(
            "\nPANIC at {}: {}\nBacktrace:\n{:?}\n",
            location,
            payload,
            Backtrace::capture()
        );
        append(&error_path, &report);
        append(&debug_path, &report);

        // The hook may fire mid-frame with the alternate screen active;
        // restore the whole terminal, not just raw mode.
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        eprintln!(
            "{} crashed. See {} for details.",
            constants::APP_NAME,
            error_path.display()
        );
    }));
}

fn log(level: &str, msg: &str) {
    if let Some(files) = FILES.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        append(&files.debug, &format!("[{}][{}] {}", timestamp, level, msg));
    }
}

pub fn info(msg: &str) {
    log("INFO", msg);
}

pub fn debug(msg: &str) {
    log("DEBUG", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_init_truncates_and_routes_lines() {
        let dir = std::env::temp_dir().join("letterglitch_logger_test");
        fs::create_dir_all(&dir).unwrap();

        init_at(&dir);
        info("starting up");
        debug("frame detail");

        let debug_log = fs::read_to_string(dir.join(constants::DEBUG_LOG_FILE)).unwrap();
        assert!(debug_log.starts_with(&format!("=== {} started:", constants::APP_NAME)));
        assert!(debug_log.contains("[INFO] starting up"));
        assert!(debug_log.contains("[DEBUG] frame detail"));

        // The error log is reserved for panic reports: header only here.
        let error_log = fs::read_to_string(dir.join(constants::ERROR_LOG_FILE)).unwrap();
        assert!(!error_log.contains("starting up"));
        assert!(error_log.starts_with("==="));

        // Re-init truncates rather than appending across runs.
        init_at(&dir);
        let debug_log = fs::read_to_string(dir.join(constants::DEBUG_LOG_FILE)).unwrap();
        assert!(!debug_log.contains("starting up"));
    }
}
