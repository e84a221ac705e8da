use parking_lot::Mutex;
/// Logging bridge for tabs-extra
///
/// Routes every `log::info!()`, `log::debug!()`, etc. to a debug log file:
/// /tmp/tabs_extra_debug.log on Unix/macOS, %TEMP%\tabs_extra_debug.log on
/// Windows. When RUST_LOG is set, lines are mirrored to stderr as well.
///
/// Level precedence: the `--log-level` CLI flag, then RUST_LOG, then `Info`.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record};

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp/tabs_extra_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("tabs_extra_debug.log");
    path
}

struct LogSink {
    file: Option<File>,
    mirror_stderr: bool,
}

impl LogSink {
    fn open(mirror_stderr: bool) -> Self {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            // Without a log file, logging still reaches stderr when mirrored
            .ok();
        Self {
            file,
            mirror_stderr,
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }
}

static SINK: OnceLock<Mutex<LogSink>> = OnceLock::new();

struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S%.3f").to_string()
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(sink) = SINK.get() else {
            return;
        };
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        sink.lock().write_line(&line);
    }

    fn flush(&self) {
        if let Some(sink) = SINK.get()
            && let Some(ref mut file) = sink.lock().file
        {
            let _ = file.flush();
        }
    }
}

/// Resolve the effective level from the CLI flag and RUST_LOG
pub fn effective_level(cli_level: Option<LevelFilter>, rust_log: Option<&str>) -> LevelFilter {
    cli_level
        .or_else(|| rust_log.and_then(|v| v.trim().parse::<LevelFilter>().ok()))
        .unwrap_or(LevelFilter::Info)
}

/// Install the log bridge. Later calls are ignored.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = effective_level(cli_level, rust_log.as_deref());

    let sink = SINK.get_or_init(|| Mutex::new(LogSink::open(rust_log.is_some())));
    if log::set_logger(&BRIDGE).is_err() {
        return;
    }
    log::set_max_level(level);

    sink.lock().write_line(&format!(
        "\n{}\ntabs-extra session started at {} (level={})\n{}\n",
        "=".repeat(80),
        timestamp(),
        level,
        "=".repeat(80)
    ));
}
