use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const MAX_LOG_SIZE: u64 = 2 * 1024 * 1024;
const KEEP_SIZE: u64 = 512 * 1024;

pub const LOG_FILE_NAME: &str = "finsight.log";

const TRIM_MARKER: &[u8] = b"--- earlier entries trimmed ---\n";

/// Cut `log_path` down to its newest `keep` bytes once it is larger than
/// `max`, starting at a line boundary. Returns whether the file was trimmed.
fn trim_log(log_path: &Path, max: u64, keep: u64) -> io::Result<bool> {
    let mut file = match File::open(log_path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    let len = file.metadata()?.len();
    if len <= max {
        return Ok(false);
    }

    file.seek(SeekFrom::End(-(keep.min(len) as i64)))?;
    let mut tail = Vec::with_capacity(keep as usize);
    file.read_to_end(&mut tail)?;

    let first_full_line = tail.iter().position(|&b| b == b'\n').map_or(0, |i| i + 1);
    let mut trimmed = TRIM_MARKER.to_vec();
    trimmed.extend_from_slice(&tail[first_full_line..]);
    fs::write(log_path, trimmed)?;
    Ok(true)
}

/// Hands out writers that share one log file
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl LogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("finsight={level}")))
}

/// Initialize logging.
///
/// Logs go to stderr so they never mix with report output on stdout. With
/// `to_file` they are appended to `{data_dir}/finsight.log` instead, trimmed
/// once the file passes 2 MB. `RUST_LOG` overrides `level`.
pub fn init_logging(data_dir: &Path, level: &str, to_file: bool) -> color_eyre::Result<()> {
    if !to_file {
        tracing_subscriber::registry()
            .with(env_filter(level))
            .with(fmt::layer().with_writer(io::stderr).with_target(false))
            .init();
        return Ok(());
    }

    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE_NAME);

    if let Err(e) = trim_log(&log_path, MAX_LOG_SIZE, KEEP_SIZE) {
        eprintln!("Warning: could not trim {}: {e}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let writer_factory = LogWriterFactory {
        file: Arc::new(Mutex::new(file)),
    };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_writer(writer_factory)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "Logging initialized");
    Ok(())
}
