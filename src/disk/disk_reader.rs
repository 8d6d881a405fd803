use std::io;

/// Random-access byte source over a disk image or physical device.
///
/// Implementations must be positional: `read_at` may not move any shared
/// cursor, so concurrent reads from multiple threads are safe. Dropping the
/// reader closes the underlying handle.
pub trait DiskReader: Send + Sync {
    /// Read up to `buf.len()` bytes at the absolute byte `offset`.
    /// A short return value indicates end-of-image.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;

    /// Fill `buf` completely from `offset`, or fail.
    ///
    /// Running past the end of the image yields `ErrorKind::UnexpectedEof`.
    fn read_exact_at(&self, mut offset: u64, mut buf: &mut [u8]) -> io::Result<()> {
        while !buf.is_empty() {
            match self.read_at(offset, buf) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "reached end of image before filling the buffer",
                    ));
                }
                Ok(n) => {
                    buf = &mut buf[n..];
                    offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
