use std::collections::VecDeque;
use std::io::{self, BufRead};

use crate::Error;

/// Reads source text one line at a time. A line ends at `\n`, `\r`, or `\r\n`; the
/// terminator is not part of the line, and a terminator at the very end of the input
/// does not start another line.
pub struct SourceLines<R> {
    reader: R,
    buf: Vec<u8>,
    /// Lines already split out of the last chunk read
    pending: VecDeque<String>,
    done: bool,
}

impl<R: BufRead> SourceLines<R> {
    pub fn new(reader: R) -> SourceLines<R> {
        SourceLines {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Split the chunk in `buf`, which holds at most one `\n` at its end, into lines
    fn split_chunk(&mut self) -> Result<(), Error> {
        let mut chunk: &[u8] = &self.buf;
        let terminated = chunk.last() == Some(&b'\n');
        if terminated {
            chunk = &chunk[..chunk.len() - 1];
            if chunk.last() == Some(&b'\r') {
                chunk = &chunk[..chunk.len() - 1];
            }
        }

        let text =
            std::str::from_utf8(chunk).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut lines: Vec<&str> = text.split('\r').collect();
        // a lone `\r` ending the input terminates the line before it
        if !terminated && lines.len() > 1 && lines.last() == Some(&"") {
            lines.pop();
        }
        self.pending.extend(lines.into_iter().map(str::to_string));
        Ok(())
    }
}

impl<R: BufRead> Iterator for SourceLines<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            if self.done {
                return None;
            }

            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    if let Err(e) = self.split_chunk() {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
