use std::io::{self, Read, Seek, SeekFrom, Write};
use tempfile::NamedTempFile;

const TEST_FILE_CONTENT: &str = "+[-[<<[+[--->]-[<<<]]]>>>-]";
// writeln! adds a trailing newline, which is a comment as far as the
// compiler is concerned
pub const TEST_FILE_NUM_INSTRUCTIONS: usize = TEST_FILE_CONTENT.len();

/// The canonical program printing `Hello World!` and a newline.
pub const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
pub const HELLO_WORLD_OUTPUT: &[u8] = b"Hello World!\n";

/// Copies input to output until end of input.
pub const CAT: &str = ",[.,]";

pub struct TestFile {
    file: NamedTempFile,
}

impl TestFile {
    pub fn new() -> io::Result<Self> {
        Self::with_content(TEST_FILE_CONTENT)
    }

    pub fn with_content(content: &str) -> io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", content)?;

        // Seek to the start of the file after writing
        file.seek(SeekFrom::Start(0))?;
        Ok(TestFile { file })
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl Read for TestFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Need to borrow it mutably to perform reads
        self.file.as_file_mut().read(buf)
    }
}

pub struct NullWriter;

impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Pretend everything's okay and we wrote the whole buffer.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer that refuses every write, for exercising output failures.
pub struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
