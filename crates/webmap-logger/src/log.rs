use crate::severity::LogSeverity;
use crate::systime::now;
use once_cell::sync::OnceCell;

static MIN_SEVERITY: OnceCell<LogSeverity> = OnceCell::new();

/// Sets the lowest severity that gets printed. Only the first call has an effect; returns false
/// if the level was already fixed.
pub fn set_min_severity(severity: LogSeverity) -> bool {
    MIN_SEVERITY.set(severity).is_ok()
}

/// Returns true if a message of this severity would be printed
pub fn enabled(severity: LogSeverity) -> bool {
    severity >= *MIN_SEVERITY.get().unwrap_or(&LogSeverity::Info)
}

pub fn log(msg: String, log_severity: LogSeverity) {
    if !enabled(log_severity) {
        return;
    }
    let line = format!("[{}] {} {}", log_severity, now(), msg);
    if log_severity.is_failure() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}
