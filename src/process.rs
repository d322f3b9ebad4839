//! Reflow pipeline
//!
//! Drives the wrapping writer from an input stream. Two modes:
//! - line mode: every input line is reflowed as its own paragraph
//! - fill mode: paragraphs are separated by blank lines and reflowed as units

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::wrap::Writer;

/// Reflow input line by line: each input line is emitted as one paragraph,
/// wrapped to the writer's width. Blank input lines produce blank (prefixed)
/// output lines.
pub fn reflow_lines<R: BufRead, W: Write>(reader: R, writer: &mut Writer<W>) -> Result<()> {
    for line in reader.lines() {
        writer.write_paragraph(&line?)?;
    }
    Ok(())
}

/// Reflow whole paragraphs: `text` is split on blank lines, and each
/// paragraph is rewrapped as a single unit regardless of how its words were
/// distributed over input lines.
pub fn fill_paragraphs<W: Write>(text: &str, writer: &mut Writer<W>) -> Result<()> {
    for paragraph in text.split("\n\n") {
        writer.write_paragraph(paragraph)?;
    }
    Ok(())
}
