use crate::disk::disk_reader::DiskReader;
use crate::mft::mft_location::MftLocationOnDisk;
use std::io;

/// The NTFS boot sector: the volume geometry needed to find the MFT and to
/// turn cluster numbers into byte offsets.
pub struct NtfsBootSector {
    pub data: [u8; 512],
}

impl NtfsBootSector {
    pub fn try_from_reader(reader: &dyn DiskReader) -> io::Result<Self> {
        let mut data = [0u8; 512];
        reader.read_exact_at(0, &mut data)?;
        Ok(Self { data })
    }

    pub fn oem_id(&self) -> &[u8] {
        &self.data[0x03..0x0B]
    }

    pub fn is_ntfs(&self) -> bool {
        self.oem_id() == b"NTFS    "
    }

    pub fn bytes_per_sector(&self) -> u16 {
        u16::from_le_bytes([self.data[0x0B], self.data[0x0C]])
    }

    pub fn sectors_per_cluster_raw(&self) -> u8 {
        self.data[0x0D]
    }

    /// Values above 0x80 encode the cluster size as 2^(256 - raw).
    pub fn sectors_per_cluster(&self) -> u64 {
        let raw = self.sectors_per_cluster_raw();
        if raw <= 0x80 {
            raw as u64
        } else {
            1u64.checked_shl(256 - raw as u32).unwrap_or(0)
        }
    }

    pub fn mft_cluster_number(&self) -> u64 {
        u64::from_le_bytes([
            self.data[0x30],
            self.data[0x31],
            self.data[0x32],
            self.data[0x33],
            self.data[0x34],
            self.data[0x35],
            self.data[0x36],
            self.data[0x37],
        ])
    }

    pub fn bytes_per_cluster(&self) -> u64 {
        self.bytes_per_sector() as u64 * self.sectors_per_cluster()
    }

    pub fn mft_location(&self) -> MftLocationOnDisk {
        self.into()
    }
}

impl std::fmt::Debug for NtfsBootSector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NtfsBootSector")
            .field("oem_id", &String::from_utf8_lossy(self.oem_id()))
            .field("bytes_per_sector", &self.bytes_per_sector())
            .field("sectors_per_cluster", &self.sectors_per_cluster())
            .field("mft_cluster_number", &self.mft_cluster_number())
            .finish()
    }
}
