use crate::level::Level;
use std::fmt::{self, Write};

pub const HEADER_CAPACITY: usize = 128;
pub const BODY_CAPACITY: usize = 1024;
pub const LINE_CAPACITY: usize = HEADER_CAPACITY + BODY_CAPACITY;

/// A rendered log line: header followed by the (possibly truncated) body.
#[derive(Debug)]
pub struct Line {
    level: Level,
    text: String,
    body_len: usize,
    complete: bool,
}

impl Line {
    /// Formats `args` after the header. A `Display` impl that returns an
    /// error stops the body where it failed; the partial line is kept and
    /// `is_complete` reports false.
    pub fn render(timestamp: &str, level: Level, args: fmt::Arguments) -> Line {
        let mut text = String::with_capacity(LINE_CAPACITY);

        let mut header = Capped::new(&mut text, HEADER_CAPACITY);
        let _ = write!(header, "{timestamp} [{level:<8}] ");

        let limit = text.len() + BODY_CAPACITY;
        let mut body = Capped::new(&mut text, limit);
        let complete = body.write_fmt(args).is_ok();
        let body_len = body.wanted;

        Line {
            level,
            text,
            body_len,
            complete,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length the body would have had without truncation.
    pub fn body_len(&self) -> usize {
        self.body_len
    }

    pub fn is_truncated(&self) -> bool {
        truncated(self.body_len)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Whether a body length returned by a log call was cut to fit the line.
pub fn truncated(body_len: usize) -> bool {
    body_len > BODY_CAPACITY
}

// Appends until `limit` bytes are in the buffer, then drops the rest while
// still counting how much was asked for.
struct Capped<'a> {
    buf: &'a mut String,
    limit: usize,
    wanted: usize,
}

impl<'a> Capped<'a> {
    fn new(buf: &'a mut String, limit: usize) -> Capped<'a> {
        Capped {
            buf,
            limit,
            wanted: 0,
        }
    }
}

impl Write for Capped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.wanted += s.len();
        let room = self.limit.saturating_sub(self.buf.len());
        if s.len() <= room {
            self.buf.push_str(s);
        } else {
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.buf.push_str(&s[..end]);
        }
        Ok(())
    }
}
