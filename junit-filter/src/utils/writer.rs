use std::fs::File;
use std::io::{Error, ErrorKind, Stderr, Stdout, Write};

/// Output of a command: a main stream for results and a second one for
/// diagnostics. Commands write through this instead of stdout/stderr so tests
/// can capture both.
pub struct Writer {
    buffer: WriteBuffer,
    err: WriteBuffer,
}

impl Writer {
    pub fn new(buffer: WriteBuffer, err: WriteBuffer) -> Self {
        Self { buffer, err }
    }

    pub fn write_err(&mut self, message: String) -> std::io::Result<()> {
        writeln!(self.err, "{message}")
    }

    /// Captured main output with ANSI colors removed.
    pub fn stripped(&self) -> std::io::Result<String> {
        self.buffer.stripped()
    }

    /// Captured diagnostics with ANSI colors removed.
    pub fn err_stripped(&self) -> std::io::Result<String> {
        self.err.stripped()
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.buffer.flush()
    }
}

pub enum WriteBuffer {
    Stdout(Stdout),
    Stderr(Stderr),
    Vec(Vec<u8>),
    File(File),
}

impl WriteBuffer {
    fn stripped(&self) -> std::io::Result<String> {
        match self {
            WriteBuffer::Vec(vec) => String::from_utf8(strip_ansi_escapes::strip(vec)?)
                .map_err(|e| Error::new(ErrorKind::InvalidData, e)),
            _ => Err(Error::new(
                ErrorKind::Unsupported,
                "only in-memory output can be read back",
            )),
        }
    }
}

impl Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.write(buf),
            WriteBuffer::Stderr(stderr) => stderr.write(buf),
            WriteBuffer::Vec(vec) => vec.write(buf),
            WriteBuffer::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.flush(),
            WriteBuffer::Stderr(stderr) => stderr.flush(),
            WriteBuffer::Vec(vec) => vec.flush(),
            WriteBuffer::File(file) => file.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_both_streams_without_colors() -> std::io::Result<()> {
        let mut writer = Writer::new(WriteBuffer::Vec(vec![]), WriteBuffer::Vec(vec![]));
        write!(writer, "\x1b[32mSUCCESS\x1b[0m merged")?;
        writer.write_err(String::from("problem"))?;

        assert_eq!(writer.stripped()?, "SUCCESS merged");
        assert_eq!(writer.err_stripped()?, "problem\n");
        Ok(())
    }

    #[test]
    fn terminal_output_cannot_be_read_back() {
        let writer = Writer::new(
            WriteBuffer::Stdout(std::io::stdout()),
            WriteBuffer::Stderr(std::io::stderr()),
        );
        assert!(writer.stripped().is_err());
    }
}
