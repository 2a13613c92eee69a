//! Fan-out writer for child process output.
//!
//! Verbose and quiet builds share one code path: both capture into a buffer,
//! and verbose builds additionally attach a mirror (the console).

use std::io::{self, Write};
use tokio::io::{AsyncRead, AsyncReadExt};

const READ_CHUNK: usize = 8 * 1024;

/// A sink that captures every write and optionally forwards it to a mirror.
#[derive(Debug)]
pub struct TeeWriter<W: Write> {
    capture: Vec<u8>,
    mirror: Option<W>,
}

impl<W: Write> TeeWriter<W> {
    /// Capture only
    pub fn capture_only() -> Self {
        Self {
            capture: Vec::new(),
            mirror: None,
        }
    }

    /// Capture and forward to `mirror`
    pub fn with_mirror(mirror: W) -> Self {
        Self {
            capture: Vec::new(),
            mirror: Some(mirror),
        }
    }

    pub fn captured(&self) -> &[u8] {
        &self.capture
    }

    /// Captured bytes as text; invalid UTF-8 is replaced, not rejected
    pub fn captured_text(&self) -> String {
        String::from_utf8_lossy(&self.capture).into_owned()
    }

    pub fn into_parts(self) -> (Vec<u8>, Option<W>) {
        (self.capture, self.mirror)
    }
}

impl<W: Write> Write for TeeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.write_all(buf)?;
        }
        self.capture.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.mirror.as_mut() {
            Some(mirror) => mirror.flush(),
            None => Ok(()),
        }
    }
}

/// Drain `reader` into `sink` until EOF.
///
/// Each chunk is written to the mirror and the capture buffer in the order it
/// was read, and the mirror is flushed per chunk so output appears live.
pub async fn pump<R, W>(mut reader: R, mut sink: TeeWriter<W>) -> io::Result<TeeWriter<W>>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n])?;
        sink.flush()?;
    }
    Ok(sink)
}
