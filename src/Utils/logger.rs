//! Installs the terminal (and optionally file) logger of the binary.
use chrono::Local;
use simplelog::*;
use std::fs::File;

/// "off"/"none" give None, known levels give the filter, the rest is an error
pub fn parse_loglevel(loglevel: &str) -> Result<Option<LevelFilter>, String> {
    match loglevel.trim().to_lowercase().as_str() {
        "off" | "none" => Ok(None),
        "debug" => Ok(Some(LevelFilter::Debug)),
        "info" => Ok(Some(LevelFilter::Info)),
        "warn" => Ok(Some(LevelFilter::Warn)),
        "error" => Ok(Some(LevelFilter::Error)),
        other => Err(format!(
            "loglevel must be debug, info, warn, error or off, got '{}'",
            other
        )),
    }
}

/// log_2025-01-31_12-00-00.txt
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Installs the global logger. `loglevel` defaults to info; with `log_file` the records are
/// also written to that file. A logger installed earlier stays in place.
pub fn init_logger(loglevel: Option<&str>, log_file: Option<&str>) -> Result<(), String> {
    let Some(level) = parse_loglevel(loglevel.unwrap_or("info"))? else {
        return Ok(());
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(name) = log_file {
        let file = File::create(name)
            .map_err(|err| format!("can't create log file {}: {}", name, err))?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    // the second initialization fails, the first logger keeps working
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loglevel() {
        assert_eq!(parse_loglevel("off"), Ok(None));
        assert_eq!(parse_loglevel("None"), Ok(None));
        assert_eq!(parse_loglevel("debug"), Ok(Some(LevelFilter::Debug)));
        assert_eq!(parse_loglevel(" warn "), Ok(Some(LevelFilter::Warn)));
        assert_eq!(parse_loglevel("error"), Ok(Some(LevelFilter::Error)));
        assert!(parse_loglevel("verbose").is_err());
    }

    #[test]
    fn test_log_name() {
        let name = timestamped_log_name();
        assert!(name.starts_with("log_"));
        assert!(name.ends_with(".txt"));
        assert_eq!(name.len(), "log_2025-01-31_12-00-00.txt".len());
    }

    #[test]
    fn test_init_twice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quadrature.log");
        let path = path.to_str().unwrap();
        assert!(init_logger(Some("info"), Some(path)).is_ok());
        assert!(init_logger(Some("debug"), None).is_ok());
        assert!(init_logger(Some("off"), None).is_ok());
        assert!(init_logger(Some("chatty"), None).is_err());
    }
}
