use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;
use chrono::Local;
use std::sync::Mutex;

struct LogState {
    file: Option<PathBuf>,
    debug_mode: bool,
}

lazy_static::lazy_static! {
    static ref LOG_STATE: Mutex<LogState> = Mutex::new(LogState {
        file: None,
        debug_mode: false,
    });
}

/// Start logging to a fresh file under the user's cache directory.
pub fn init_logging(debug_mode: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("linear-embed")
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!("linear-embed-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
    init_logging_to(log_file.clone(), debug_mode);

    Ok(log_file)
}

pub fn init_logging_to(log_file: PathBuf, debug_mode: bool) {
    if let Ok(mut state) = LOG_STATE.lock() {
        state.file = Some(log_file.clone());
        state.debug_mode = debug_mode;
    }

    log_info(&format!("Logging initialized to: {}", log_file.display()));
}

pub fn set_debug_mode(enabled: bool) {
    if let Ok(mut state) = LOG_STATE.lock() {
        state.debug_mode = enabled;
    }
}

pub fn is_debug_mode() -> bool {
    LOG_STATE.lock().map(|state| state.debug_mode).unwrap_or(false)
}

pub fn log_error(message: &str) {
    log_with_level("ERROR", message);
}

pub fn log_warn(message: &str) {
    log_with_level("WARN", message);
}

pub fn log_info(message: &str) {
    log_with_level("INFO", message);
}

/// Debug lines are dropped unless debug mode is on.
pub fn log_debug(message: &str) {
    if is_debug_mode() {
        log_with_level("DEBUG", message);
    }
}

fn log_with_level(level: &str, message: &str) {
    let path = match LOG_STATE.lock() {
        Ok(state) => state.file.clone(),
        Err(_) => None,
    };

    if let Some(log_file) = path {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
        {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] {} - {}", timestamp, level, message);
        }
    }
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_STATE.lock().ok().and_then(|state| state.file.clone())
}
