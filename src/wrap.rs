//! Line-wrapping writer
//!
//! Implements the wrapping core: a writer that owns an underlying sink,
//! assembles one output line at a time, and inserts line breaks so that
//! emitted lines stay within the configured column width. Every output line
//! can carry a fixed prefix (e.g. a quote marker).

use std::io::{self, Write};

use anyhow::bail;

use crate::error::Result;

/// A writer that forces line wrapping at a configured column width.
///
/// `Writer` wraps an [`io::Write`] sink. Output is accumulated in an internal
/// line buffer and flushed to the sink whenever a line completes, so bytes
/// reach the sink in exactly the order the methods were called.
///
/// Width is measured in Unicode code points, not grapheme clusters or
/// terminal cells. A word longer than the usable width is emitted alone on
/// its own line without being split.
///
/// All methods take `&mut self`; sharing a `Writer` across threads requires
/// external locking.
#[derive(Debug)]
pub struct Writer<W: Write> {
    inner: W,
    /// Line currently being assembled; begins with the prefix when one is set.
    buf: String,
    /// Max number of columns to fill for each line.
    max: usize,
    /// Columns still available on the current line.
    remaining: usize,
    /// Number of columns used by the prefix.
    prefix_columns: usize,
    prefix: String,
}

impl<W: Write> Writer<W> {
    /// Create a `Writer` that emits to `inner`, breaking lines at `width`
    /// columns and starting every line with `prefix`.
    ///
    /// Fails when `width` is zero or when the prefix is as wide as or wider
    /// than `width`, since no usable columns would remain on any line.
    pub fn new(inner: W, width: usize, prefix: &str) -> Result<Self> {
        let prefix_columns = prefix.chars().count();

        if width == 0 || width <= prefix_columns {
            bail!(
                "cannot create writer unless width ({width}) is greater than zero and greater than the number of columns used by the prefix: {prefix_columns}"
            );
        }

        let mut buf = String::with_capacity(width + 1);
        buf.push_str(prefix);

        Ok(Self {
            inner,
            buf,
            max: width,
            remaining: width - prefix_columns,
            prefix_columns,
            prefix: prefix.to_string(),
        })
    }

    /// Write a single word, wrapping first when it does not fit on the
    /// current line, then flush. The line is left open so following words
    /// continue on it.
    ///
    /// Returns the number of bytes written to the sink.
    pub fn write_word(&mut self, word: &str) -> io::Result<usize> {
        let mut nw = self.word(word)?;
        nw += self.flush_buf()?;
        Ok(nw)
    }

    /// Write one paragraph of text, wrapping lines as necessary to keep them
    /// within the configured width.
    ///
    /// `text` is split into words on runs of whitespace, so leading, trailing,
    /// and repeated interior whitespace all collapse. The paragraph is always
    /// terminated: its final line ends with a newline and is flushed, and the
    /// next write starts on a fresh prefixed line.
    ///
    /// Returns the number of bytes written to the sink.
    pub fn write_paragraph(&mut self, text: &str) -> io::Result<usize> {
        let mut nw = 0;
        for word in text.split_whitespace() {
            nw += self.word(word)?;
        }
        nw += self.newline()?;
        Ok(nw)
    }

    /// Write a single character, wrapping first when fewer than two columns
    /// remain (one for the character, one for an eventual newline), then
    /// flush.
    ///
    /// Returns the number of bytes written to the sink.
    pub fn write_char(&mut self, c: char) -> io::Result<usize> {
        let mut nw = 0;

        if self.remaining < 2 {
            nw = self.newline()?;
        }

        self.buf.push(c);
        self.remaining -= 1;

        nw += self.flush_buf()?;
        Ok(nw)
    }

    /// Get a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the writer, discarding any unflushed partial line.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Place one word in the line buffer, terminating the current line first
    /// when the word does not fit in the remaining columns.
    fn word(&mut self, w: &str) -> io::Result<usize> {
        let rc = w.chars().count();
        let mut nw = 0;

        if self.remaining < rc {
            // Not enough room for w and a newline.
            nw = self.newline()?;
        }

        if self.max - self.remaining != self.prefix_columns {
            // Not the first word after the prefix; separate it from the
            // previous one.
            self.buf.push(' ');
            self.remaining = self.remaining.saturating_sub(1);
        }

        self.buf.push_str(w);
        self.remaining = self.remaining.saturating_sub(rc);

        Ok(nw)
    }

    /// Terminate the current line: append a newline, flush the buffer to the
    /// sink, and start the next line with the prefix.
    fn newline(&mut self) -> io::Result<usize> {
        self.buf.push('\n');

        // After the newline the entire line length is available again.
        self.remaining = self.max;

        let nw = self.flush_buf()?;
        self.write_prefix();
        Ok(nw)
    }

    fn write_prefix(&mut self) {
        if self.prefix_columns == 0 {
            return;
        }
        self.remaining -= self.prefix_columns;
        self.buf.push_str(&self.prefix);
    }

    /// Drain the line buffer to the sink. Called at the conclusion of every
    /// public method, not necessarily once per line.
    fn flush_buf(&mut self) -> io::Result<usize> {
        if self.buf.is_empty() {
            return Ok(0);
        }
        self.inner.write_all(self.buf.as_bytes())?;
        let nw = self.buf.len();
        self.buf.clear();
        Ok(nw)
    }
}

impl<W: Write> Write for Writer<W> {
    /// Treat `buf` as UTF-8 text, split it on newlines, and emit each segment
    /// as a paragraph. Every embedded newline also produces an explicit line
    /// break of its own, so blank input lines stay visible in the output.
    ///
    /// On success reports `buf.len()`, the number of input bytes consumed;
    /// the byte count emitted to the sink differs because of wrapping and
    /// prefixes. `buf` should contain complete UTF-8 sequences.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let mut segments = text.split('\n').peekable();

        while let Some(segment) = segments.next() {
            self.write_paragraph(segment)?;
            if segments.peek().is_some() {
                self.newline()?;
            }
        }

        Ok(buf.len())
    }

    /// Write the line buffer's current contents to the sink verbatim, without
    /// adding a newline, then flush the sink.
    fn flush(&mut self) -> io::Result<()> {
        self.flush_buf()?;
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn emit_chars(width: usize, prefix: &str, chars: &[char]) -> String {
        let mut w = Writer::new(Vec::new(), width, prefix).unwrap();
        for &c in chars {
            w.write_char(c).unwrap();
        }
        String::from_utf8(w.into_inner()).unwrap()
    }

    fn emit_words(width: usize, prefix: &str, words: &[&str]) -> String {
        let mut w = Writer::new(Vec::new(), width, prefix).unwrap();
        for word in words {
            w.write_word(word).unwrap();
        }
        String::from_utf8(w.into_inner()).unwrap()
    }

    fn emit_paragraph(width: usize, prefix: &str, text: &str) -> String {
        let mut w = Writer::new(Vec::new(), width, prefix).unwrap();
        w.write_paragraph(text).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn test_new_rejects_prefix_as_wide_as_width() {
        let prefix = "1234567890";
        let err = Writer::new(io::sink(), prefix.len(), prefix).unwrap_err();
        assert!(err.to_string().contains("columns"), "got: {err}");
    }

    #[test]
    fn test_new_rejects_prefix_wider_than_width() {
        assert!(Writer::new(io::sink(), 5, "1234567890").is_err());
    }

    #[test]
    fn test_new_rejects_zero_width() {
        assert!(Writer::new(io::sink(), 0, "").is_err());
    }

    #[test]
    fn test_new_accepts_width_one_wider_than_prefix() {
        assert!(Writer::new(io::sink(), 11, "1234567890").is_ok());
    }

    #[test]
    fn test_write_char_less_than_one_line() {
        assert_eq!(emit_chars(5, ">", &['1', '2']), ">12");
    }

    #[test]
    fn test_write_char_exactly_one_line() {
        assert_eq!(emit_chars(5, ">", &['1', '2', '3']), ">123");
    }

    #[test]
    fn test_write_char_between_first_and_second_line() {
        assert_eq!(emit_chars(5, ">", &['1', '2', '3', '4']), ">123\n>4");
    }

    #[test]
    fn test_write_char_exactly_two_lines() {
        assert_eq!(
            emit_chars(5, ">", &['1', '2', '3', '4', '5', '6']),
            ">123\n>456"
        );
    }

    #[test]
    fn test_write_word_less_than_one_line() {
        assert_eq!(emit_words(10, ">", &["one"]), ">one");
    }

    #[test]
    fn test_write_word_exactly_one_line() {
        assert_eq!(emit_words(9, ">", &["exactly"]), ">exactly");
        assert_eq!(emit_words(9, ">", &["one", "two"]), ">one two");
    }

    #[test]
    fn test_write_word_between_one_and_two_lines() {
        assert_eq!(emit_words(9, ">", &["another", "test"]), ">another\n>test");
    }

    #[test]
    fn test_write_word_exactly_two_lines() {
        assert_eq!(
            emit_words(9, ">", &["another", "another"]),
            ">another\n>another"
        );
    }

    #[test]
    fn test_write_word_between_two_and_three_lines() {
        assert_eq!(
            emit_words(9, ">", &["another", "another", "another"]),
            ">another\n>another\n>another"
        );
    }

    #[test]
    fn test_write_paragraph_less_than_one_line() {
        assert_eq!(emit_paragraph(15, ">", "one two three"), ">one two three\n");
    }

    #[test]
    fn test_write_paragraph_exactly_one_line() {
        assert_eq!(emit_paragraph(14, ">", "one two three"), ">one two three\n");
    }

    #[test]
    fn test_write_paragraph_between_one_and_two_lines() {
        // The fit check runs before the separating space is accounted for, so
        // a word that exactly fills the remainder lands one column over.
        assert_eq!(emit_paragraph(13, ">", "one two three"), ">one two three\n");
    }

    #[test]
    fn test_write_paragraph_exactly_two_lines() {
        assert_eq!(emit_paragraph(4, ">", "one two"), ">one\n>two\n");
    }

    #[test]
    fn test_write_paragraph_wraps_at_width() {
        assert_eq!(emit_paragraph(5, ">", "one two"), ">one\n>two\n");
    }

    #[test]
    fn test_write_paragraph_trailing_newline_is_collapsed() {
        assert_eq!(emit_paragraph(15, ">", "one two three\n"), ">one two three\n");
        assert_eq!(emit_paragraph(4, ">", "one two\n"), ">one\n>two\n");
    }

    #[test]
    fn test_write_paragraph_collapses_interior_whitespace() {
        assert_eq!(
            emit_paragraph(20, ">", "  one   two\tthree  "),
            ">one two three\n"
        );
    }

    #[test]
    fn test_write_paragraph_without_prefix() {
        assert_eq!(emit_paragraph(10, "", "one two three"), "one two\nthree\n");
    }

    #[test]
    fn test_write_paragraph_empty_emits_bare_line() {
        assert_eq!(emit_paragraph(10, ">", ""), ">\n");
    }

    #[test]
    fn test_overlong_word_is_placed_alone_and_overflows() {
        assert_eq!(
            emit_paragraph(5, ">", "hi extraordinary"),
            ">hi\n>extraordinary\n"
        );
    }

    #[test]
    fn test_width_counts_code_points_not_bytes() {
        assert_eq!(
            emit_paragraph(8, "\u{bb} ", "h\u{e9}llo w\u{f6}rld"),
            "\u{bb} h\u{e9}llo\n\u{bb} w\u{f6}rld\n"
        );
    }

    #[test]
    fn test_prefix_never_appears_mid_line() {
        let out = emit_paragraph(13, "> ", "One two three four five six seven eight nine ten.");
        for line in out.lines() {
            assert!(line.starts_with("> "), "line missing prefix: {line:?}");
            assert_eq!(line.matches("> ").count(), 1, "prefix repeated: {line:?}");
        }
    }

    #[test]
    fn test_write_without_trailing_newline() {
        let mut w = Writer::new(Vec::new(), 13, ">").unwrap();
        let text = "One two three four five six seven eight nine ten.\n\
                    One two three four five six seven eight nine ten.\n\
                    One two three four five six seven eight nine ten.";
        w.write_all(text.as_bytes()).unwrap();

        let want = ">One two three\n>four five six\n>seven eight\n>nine ten.\n>\n\
                    >One two three\n>four five six\n>seven eight\n>nine ten.\n>\n\
                    >One two three\n>four five six\n>seven eight\n>nine ten.\n";
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), want);
    }

    #[test]
    fn test_write_with_trailing_newline() {
        let mut w = Writer::new(Vec::new(), 13, ">").unwrap();
        let text = "One two three four five six seven eight nine ten.\n\
                    One two three four five six seven eight nine ten.\n";
        w.write_all(text.as_bytes()).unwrap();

        let want = ">One two three\n>four five six\n>seven eight\n>nine ten.\n>\n\
                    >One two three\n>four five six\n>seven eight\n>nine ten.\n>\n>\n";
        assert_eq!(String::from_utf8(w.into_inner()).unwrap(), want);
    }

    #[test]
    fn test_write_reports_input_bytes_consumed() {
        let mut w = Writer::new(Vec::new(), 13, ">").unwrap();
        let text = b"one two three four";
        assert_eq!(w.write(text).unwrap(), text.len());
    }

    #[test]
    fn test_flush_drains_pending_line_without_newline() {
        // After a paragraph the next line's prefix sits unflushed in the
        // buffer; an explicit flush makes it visible verbatim.
        let mut w = Writer::new(Vec::new(), 10, "> ").unwrap();
        w.write_paragraph("one").unwrap();
        w.flush().unwrap();
        assert_eq!(w.get_ref().as_slice(), b"> one\n> ");
    }

    #[test]
    fn test_sink_error_propagates() {
        struct FailingSink;

        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut w = Writer::new(FailingSink, 10, ">").unwrap();
        let err = w.write_paragraph("one two").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
