//! End-to-end padding scenarios.
//!
//! Covers the layouts the padder exists for: styled table cells, mixed-width
//! scripts, chained writers and streaming input that arrives in arbitrary
//! pieces.

use std::io::{self, Write};

use ftui_padding::{Filler, PaddingConfig, PaddingWriter, pad_bytes, pad_str};

// =============================================================================
// Helpers
// =============================================================================

/// Remove escape sequences (ESC through the first ASCII letter).
fn strip_escapes(text: &str) -> String {
    let mut out = String::new();
    let mut in_seq = false;
    for c in text.chars() {
        if c == '\x1b' {
            in_seq = true;
        } else if in_seq {
            in_seq = !c.is_ascii_alphabetic();
        } else {
            out.push(c);
        }
    }
    out
}

fn visible_width(line: &str) -> usize {
    use unicode_width::UnicodeWidthChar;
    strip_escapes(line)
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

// =============================================================================
// Documented scenarios
// =============================================================================

#[test]
fn plain_line_padded_with_spaces() {
    assert_eq!(pad_str("hi\n", 10), "hi        \n");
}

#[test]
fn colored_line_keeps_escapes_and_pads_after_them() {
    assert_eq!(pad_str("\x1b[31mhi\x1b[0m\n", 5), "\x1b[31mhi\x1b[0m   \n");
}

#[test]
fn zero_width_copies_input() {
    let input = "one\n\x1b[1mtwo\x1b[0m\nthree";
    assert_eq!(pad_str(input, 0), input);
}

#[test]
fn unterminated_final_line_padded_at_flush() {
    assert_eq!(pad_str("ab", 4), "ab  ");
}

// =============================================================================
// Table layout
// =============================================================================

#[test]
fn styled_table_column_lines_up() {
    let cells = [
        "\x1b[1mName\x1b[0m",
        "\x1b[32mok\x1b[0m",
        "東京",
        "\x1b[38;5;196mfailed\x1b[0m",
        "e\u{0301}te\u{0301}",
    ];
    let column = cells.join("\n") + "\n";
    let padded = pad_str(&column, 8);

    let lines: Vec<&str> = padded.lines().collect();
    assert_eq!(lines.len(), cells.len());
    for line in lines {
        assert_eq!(visible_width(line), 8, "line {line:?}");
    }
}

#[test]
fn overlong_cells_are_left_alone() {
    let input = "\x1b[4mthis cell is wider\x1b[0m\nok\n";
    let padded = pad_str(input, 6);
    assert_eq!(padded, "\x1b[4mthis cell is wider\x1b[0m\nok    \n");
}

#[test]
fn padding_twice_adds_nothing() {
    let input = "\x1b[31mred\nplain\n中文\nend";
    let once = pad_str(input, 7);
    assert_eq!(pad_str(&once, 7), once);
}

#[test]
fn wide_glyph_costs_two_columns() {
    let narrow = pad_str("a\n", 6);
    let wide = pad_str("中\n", 6);
    let filler = |s: &str| s.chars().filter(|&c| c == ' ').count();
    assert_eq!(filler(&narrow) - filler(&wide), 1);
    assert_eq!(filler(&wide), 4);
}

// =============================================================================
// Streaming
// =============================================================================

#[test]
fn byte_at_a_time_matches_single_write() {
    let input = "\x1b[1;33mwarn\x1b[0m: 日本語\nnext\u{1F600}\nlast".as_bytes();
    let expected = pad_bytes(input, 12);

    let mut writer = PaddingWriter::new(12, Filler::Spaces);
    for byte in input {
        writer.write_all(std::slice::from_ref(byte)).unwrap();
    }
    writer.flush().unwrap();
    assert_eq!(writer.bytes(), expected.as_slice());
}

#[test]
fn std_io_copy_into_pipe_writer() {
    let mut source = io::Cursor::new("a\nbb\n".as_bytes());
    let mut writer = PaddingWriter::pipe(Vec::new(), 3, Filler::Spaces);
    io::copy(&mut source, &mut writer).unwrap();
    writer.flush().unwrap();
    assert_eq!(writer.into_inner().unwrap(), b"a  \nbb \n");
}

#[test]
fn chained_writers_pad_in_stages() {
    // The outer writer pads to 4 with dots, the inner one widens to 6 with dashes.
    let inner = PaddingWriter::pipe(Vec::new(), 6, Filler::repeat('-'));
    let mut outer = PaddingWriter::pipe(inner, 4, Filler::repeat('.'));
    outer.write_all(b"ab\nc\n").unwrap();
    outer.flush().unwrap();

    let mut inner = outer.into_inner().unwrap();
    inner.flush().unwrap();
    assert_eq!(inner.into_inner().unwrap(), b"ab..--\nc...--\n");
}

#[test]
fn styled_custom_filler() {
    let config = PaddingConfig::new(4).filler(Filler::custom(|w| w.write_all(b"\x1b[2m.\x1b[0m")));
    let mut writer = PaddingWriter::with_config(config);
    writer.write_all(b"ab\n").unwrap();
    writer.flush().unwrap();

    let out = writer.as_str().into_owned();
    assert_eq!(out, "ab\x1b[2m.\x1b[0m\x1b[2m.\x1b[0m\n");
    assert_eq!(visible_width(out.trim_end_matches('\n')), 4);
}

#[test]
fn writer_reused_across_flushes() {
    let mut writer = PaddingWriter::new(3, Filler::Spaces);
    writer.write_all(b"a\n").unwrap();
    writer.flush().unwrap();
    assert_eq!(writer.as_str(), "a  \n");

    writer.write_all(b"bc").unwrap();
    writer.close().unwrap();
    assert_eq!(writer.as_str(), "bc ");
}

// =============================================================================
// Failure propagation
// =============================================================================

/// Accepts a fixed number of bytes, then fails.
struct LimitedWriter {
    written: Vec<u8>,
    limit: usize,
}

impl Write for LimitedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written.len() + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::StorageFull, "limit reached"));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_during_fill_is_returned() {
    let sink = LimitedWriter {
        written: Vec::new(),
        limit: 3,
    };
    let mut writer = PaddingWriter::pipe(sink, 10, Filler::Spaces);
    let err = writer.write_all(b"abc\n").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::StorageFull);
    assert_eq!(writer.get_ref().unwrap().written, b"abc");
}
