//! Tracing events emitted by the padding writer.
//!
//! Run with:
//!   cargo test -p ftui-padding --test tracing_events

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use ftui_padding::{Filler, PaddingConfig, PaddingWriter};
use tracing::Level;

#[derive(Clone, Default)]
struct SharedWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    fn snapshot(&self) -> String {
        let bytes = self.inner.lock().expect("writer lock").clone();
        String::from_utf8(bytes).unwrap_or_default()
    }
}

impl io::Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().expect("writer lock");
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber capturing events at `level` and above.
fn capture(level: Level, f: impl FnOnce()) -> String {
    let logs = SharedWriter::default();
    let make_writer = {
        let logs = logs.clone();
        move || logs.clone()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(make_writer)
        .with_max_level(level)
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.snapshot()
}

#[test]
fn overlong_escape_sequence_warns_once() {
    let logs = capture(Level::WARN, || {
        let config = PaddingConfig::new(10).escape_warn_len(8);
        let mut writer = PaddingWriter::with_config(config);
        writer.write_all(b"ok\x1b[").unwrap();
        writer.write_all(&[b'1'; 40]).unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.bytes().len(), 2 + 2 + 40 + 8);
    });
    assert_eq!(logs.matches("escape sequence still unterminated").count(), 1, "{logs}");
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("line_width=2"), "{logs}");
}

#[test]
fn each_long_sequence_warns_separately() {
    let logs = capture(Level::WARN, || {
        let config = PaddingConfig::new(0).escape_warn_len(4);
        let mut writer = PaddingWriter::with_config(config);
        writer.write_all(b"\x1b[1;2;3;4m \x1b[5;6;7;8m").unwrap();
        writer.flush().unwrap();
    });
    assert_eq!(logs.matches("escape sequence still unterminated").count(), 2, "{logs}");
}

#[test]
fn short_sequences_do_not_warn() {
    let logs = capture(Level::WARN, || {
        let mut writer = PaddingWriter::new(6, Filler::Spaces);
        writer.write_all(b"\x1b[38;5;196mred\x1b[0m\n").unwrap();
        writer.flush().unwrap();
    });
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn zero_threshold_disables_warning() {
    let logs = capture(Level::WARN, || {
        let config = PaddingConfig::new(4).escape_warn_len(0);
        let mut writer = PaddingWriter::with_config(config);
        writer.write_all(b"\x1b[").unwrap();
        writer.write_all(&[b';'; 1000]).unwrap();
        writer.flush().unwrap();
    });
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn line_fill_traced() {
    let logs = capture(Level::TRACE, || {
        let mut writer = PaddingWriter::new(5, Filler::Spaces);
        writer.write_all(b"ab\n").unwrap();
        writer.flush().unwrap();
    });
    assert!(logs.contains("filling line"), "{logs}");
    assert!(logs.contains("shortfall=3"), "{logs}");
    assert!(logs.contains("padding flushed"), "{logs}");
}
