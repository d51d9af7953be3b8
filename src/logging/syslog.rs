//! syslog(3) writer for hosts without a journal

use std::fs;
use std::io;
use std::os::unix::fs::FileTypeExt;
use std::path::Path;

use nix::syslog::{syslog, Facility, Priority, Severity};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Where local syslog daemons listen (Linux and BSDs, macOS, FreeBSD).
pub const SYSLOG_SOCKETS: &[&str] = &["/dev/log", "/var/run/syslog", "/var/run/log"];

/// First candidate that is a socket.
pub fn find_socket<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Option<&'a Path> {
    candidates.into_iter().find(|path| {
        fs::metadata(path)
            .map(|meta| meta.file_type().is_socket())
            .unwrap_or(false)
    })
}

/// Hands each formatted record to syslog(3) under the daemon facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct Syslog;

/// Buffers one record; sent when dropped.
pub struct SyslogWriter {
    severity: Severity,
    buf: Vec<u8>,
}

impl<'a> MakeWriter<'a> for Syslog {
    type Writer = SyslogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SyslogWriter::new(Severity::LOG_INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        SyslogWriter::new(severity(*meta.level()))
    }
}

impl SyslogWriter {
    fn new(severity: Severity) -> Self {
        Self {
            severity,
            buf: Vec::new(),
        }
    }
}

impl io::Write for SyslogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for SyslogWriter {
    fn drop(&mut self) {
        let record = String::from_utf8_lossy(&self.buf);
        let record = record.trim_end();
        if !record.is_empty() {
            // nowhere left to report a failed log write
            let _ = syslog(Priority::new(self.severity, Facility::LOG_DAEMON), record);
        }
    }
}

fn severity(level: Level) -> Severity {
    match level {
        Level::ERROR => Severity::LOG_ERR,
        Level::WARN => Severity::LOG_WARNING,
        Level::INFO => Severity::LOG_INFO,
        Level::DEBUG | Level::TRACE => Severity::LOG_DEBUG,
    }
}
