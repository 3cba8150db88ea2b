//! Compact binary backend.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! count          u64
//! array          u64 length, then elements
//! integer        i64
//! number         f64 (IEEE-754 bits)
//! text           u64 byte length, then UTF-8 bytes
//! ```
//!
//! Field names are not written; the stream is purely positional.

use super::stream::{GraphSink, GraphSource};
use crate::error::{CodecError, Result};
use log::trace;
use std::io::{self, Read, Write};

/// Longest text scalar accepted by [`BinarySource`], in bytes.
pub const MAX_TEXT_LEN: u64 = 1 << 30;

/// Writes a graph stream as little-endian binary.
#[derive(Debug)]
pub struct BinarySink<W: Write> {
    writer: W,
    remaining: Option<u64>,
    finished: bool,
}

impl<W: Write> BinarySink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            remaining: None,
            finished: false,
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .map_err(|e| CodecError::io("Failed to write binary stream", Some(e)))
    }

    fn check_field(&self, name: &str) -> Result<()> {
        if self.finished {
            return Err(CodecError::InvalidOperation {
                message: format!("field '{name}' written after finish"),
            });
        }
        if self.remaining.is_some() {
            return Err(CodecError::InvalidOperation {
                message: format!("field '{name}' written inside an open array"),
            });
        }
        Ok(())
    }

    fn take_slot(&mut self) -> Result<()> {
        match self.remaining {
            Some(n) if n > 0 => {
                self.remaining = Some(n - 1);
                Ok(())
            }
            Some(_) => Err(CodecError::InvalidOperation {
                message: "more elements written than the array declared".to_string(),
            }),
            None => Err(CodecError::InvalidOperation {
                message: "element written outside an array".to_string(),
            }),
        }
    }
}

impl<W: Write> GraphSink for BinarySink<W> {
    fn write_count(&mut self, name: &str, count: u64) -> Result<()> {
        self.check_field(name)?;
        trace!("binary: count {name} = {count}");
        self.put(&count.to_le_bytes())
    }

    fn begin_array(&mut self, name: &str, len: u64) -> Result<()> {
        self.check_field(name)?;
        trace!("binary: array {name} [{len}]");
        self.remaining = Some(len);
        self.put(&len.to_le_bytes())
    }

    fn write_integer(&mut self, value: i64) -> Result<()> {
        self.take_slot()?;
        self.put(&value.to_le_bytes())
    }

    fn write_number(&mut self, value: f64) -> Result<()> {
        self.take_slot()?;
        self.put(&value.to_bits().to_le_bytes())
    }

    fn write_text(&mut self, value: &str) -> Result<()> {
        self.take_slot()?;
        let bytes = value.as_bytes();
        self.put(&(bytes.len() as u64).to_le_bytes())?;
        self.put(bytes)
    }

    fn end_array(&mut self) -> Result<()> {
        match self.remaining.take() {
            Some(0) => Ok(()),
            Some(n) => Err(CodecError::InvalidOperation {
                message: format!("array closed with {n} elements missing"),
            }),
            None => Err(CodecError::InvalidOperation {
                message: "no array is open".to_string(),
            }),
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.check_field("<finish>")?;
        self.finished = true;
        self.writer
            .flush()
            .map_err(|e| CodecError::io("Failed to flush binary stream", Some(e)))
    }
}

/// Reads a graph stream written by [`BinarySink`].
#[derive(Debug)]
pub struct BinarySource<R: Read> {
    reader: R,
    remaining: Option<u64>,
}

impl<R: Read> BinarySource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            remaining: None,
        }
    }

    fn read_u64(&mut self, what: &str) -> Result<u64> {
        let mut raw = [0u8; 8];
        self.reader
            .read_exact(&mut raw)
            .map_err(|e| read_error(e, what))?;
        Ok(u64::from_le_bytes(raw))
    }

    fn check_field(&self, name: &str) -> Result<()> {
        if self.remaining.is_some() {
            return Err(CodecError::InvalidOperation {
                message: format!("field '{name}' read inside an open array"),
            });
        }
        Ok(())
    }

    fn take_slot(&mut self) -> Result<()> {
        match self.remaining {
            Some(n) if n > 0 => {
                self.remaining = Some(n - 1);
                Ok(())
            }
            Some(_) => Err(CodecError::corrupt("read past the end of an array")),
            None => Err(CodecError::InvalidOperation {
                message: "element read outside an array".to_string(),
            }),
        }
    }
}

fn read_error(error: io::Error, what: &str) -> CodecError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        CodecError::corrupt(format!("unexpected end of stream while reading {what}"))
    } else {
        CodecError::io(format!("Failed to read {what}"), Some(error))
    }
}

impl<R: Read> GraphSource for BinarySource<R> {
    fn read_count(&mut self, name: &str) -> Result<u64> {
        self.check_field(name)?;
        let count = self.read_u64(name)?;
        trace!("binary: count {name} = {count}");
        Ok(count)
    }

    fn begin_array(&mut self, name: &str) -> Result<u64> {
        self.check_field(name)?;
        let len = self.read_u64(name)?;
        trace!("binary: array {name} [{len}]");
        self.remaining = Some(len);
        Ok(len)
    }

    fn read_integer(&mut self) -> Result<i64> {
        self.take_slot()?;
        let mut raw = [0u8; 8];
        self.reader
            .read_exact(&mut raw)
            .map_err(|e| read_error(e, "integer"))?;
        Ok(i64::from_le_bytes(raw))
    }

    fn read_number(&mut self) -> Result<f64> {
        self.take_slot()?;
        let bits = self.read_u64("number")?;
        Ok(f64::from_bits(bits))
    }

    fn read_text(&mut self) -> Result<String> {
        self.take_slot()?;
        let len = self.read_u64("text length")?;
        if len > MAX_TEXT_LEN {
            return Err(CodecError::corrupt(format!(
                "text of {len} bytes exceeds the {MAX_TEXT_LEN} byte limit"
            )));
        }

        let mut bytes = Vec::new();
        (&mut self.reader)
            .take(len)
            .read_to_end(&mut bytes)
            .map_err(|e| read_error(e, "text"))?;
        if bytes.len() as u64 != len {
            return Err(CodecError::corrupt(
                "unexpected end of stream while reading text",
            ));
        }
        String::from_utf8(bytes).map_err(|_| CodecError::corrupt("text is not valid UTF-8"))
    }

    fn end_array(&mut self) -> Result<()> {
        match self.remaining.take() {
            Some(0) => Ok(()),
            Some(n) => Err(CodecError::InvalidOperation {
                message: format!("array closed with {n} elements unread"),
            }),
            None => Err(CodecError::InvalidOperation {
                message: "no array is open".to_string(),
            }),
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.check_field("<finish>")?;
        let mut extra = [0u8; 1];
        loop {
            match self.reader.read(&mut extra) {
                Ok(0) => return Ok(()),
                Ok(_) => return Err(CodecError::corrupt("trailing bytes after the last field")),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(CodecError::io("Failed to read end of stream", Some(e))),
            }
        }
    }
}
