use crate::disk::disk_reader::DiskReader;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

/// Positional reader over a disk image file or raw device node.
///
/// Uses the OS positional-read primitives (`pread` on Unix, `seek_read` on
/// Windows) so no file cursor is shared between threads.
#[derive(Debug)]
pub struct FileDiskReader {
    file: File,
    path: PathBuf,
}

impl FileDiskReader {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        debug!(path = %path.display(), "Opened image for positional reads");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total length of the backing image in bytes.
    pub fn len(&self) -> io::Result<u64> {
        self.file.metadata().map(|m| m.len())
    }
}

impl DiskReader for FileDiskReader {
    #[cfg(unix)]
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        use std::os::unix::fs::FileExt;
        self.file.read_at(buf, offset)
    }

    #[cfg(windows)]
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        use std::os::windows::fs::FileExt;
        self.file.seek_read(buf, offset)
    }
}
