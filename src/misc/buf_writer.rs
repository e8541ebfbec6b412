//! Simple buffered writer.

use std::io::Write;

/// Buffered writer.
/// Wont flush automatically, you will need to call `flush` manually.
/// The console renderer queues a whole frame into one of these so the terminal never shows half a grid.
pub struct BufWriter<T: Write> {
    inner: T,
    buf: Vec<u8>,
}

impl<T: Write> BufWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: Vec::new(),
        }
    }

    /// Bytes queued since the last flush.
    #[cfg(test)]
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }
}

impl<T: Write> Write for BufWriter<T> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.write_all(&self.buf)?;
        self.buf.clear();
        self.inner.flush()
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::BufWriter;

    #[test]
    fn test_buf_writer_holds_until_flush() {
        let mut out = Vec::new();
        {
            let mut writer = BufWriter::new(&mut out);
            write!(writer, "frame {}", 1).unwrap();
            assert_eq!(writer.pending(), b"frame 1");
            writer.flush().unwrap();
            assert!(writer.pending().is_empty());
        }

        assert_eq!(out, b"frame 1");
    }
}
