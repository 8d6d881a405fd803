use crate::disk::file_disk_reader::FileDiskReader;
use crate::mft::mft_location::MftLocationOnDisk;
use crate::ntfs::ntfs_boot_sector::NtfsBootSector;
use eyre::WrapErr;
use std::path::PathBuf;
use tracing::info;
use tracing::warn;

/// Fallback cluster size when the image carries no readable boot sector.
const DEFAULT_CLUSTER_SIZE: u64 = 4096;

/// Where the image is and how to interpret it. Shared by every command.
#[derive(clap::Args, Debug)]
pub struct ImageArgs {
    /// Path to the disk image or raw device
    pub image: PathBuf,

    /// Byte offset of the MFT start. Defaults to the boot sector's value,
    /// or 0 for a bare MFT dump.
    #[arg(long)]
    pub mft_offset: Option<u64>,

    /// Cluster size in bytes. Defaults to the boot sector's value.
    #[arg(long)]
    pub cluster_size: Option<u64>,
}

pub struct ImageGeometry {
    pub mft_location: MftLocationOnDisk,
    pub cluster_size: u64,
    pub image_len: u64,
}

impl ImageArgs {
    /// Open the image and settle geometry: explicit flags win, then the boot
    /// sector, then bare-MFT defaults.
    pub fn open(&self) -> eyre::Result<(FileDiskReader, ImageGeometry)> {
        let reader = FileDiskReader::open(&self.image)
            .wrap_err_with(|| format!("Failed to open image {}", self.image.display()))?;
        let image_len = reader
            .len()
            .wrap_err_with(|| format!("Failed to stat image {}", self.image.display()))?;

        let boot = NtfsBootSector::try_from_reader(&reader)
            .ok()
            .filter(NtfsBootSector::is_ntfs);
        if boot.is_none() && (self.mft_offset.is_none() || self.cluster_size.is_none()) {
            warn!(
                "No NTFS boot sector found; treating {} as a bare MFT dump",
                self.image.display()
            );
        }

        let mft_location = match self.mft_offset {
            Some(offset) => MftLocationOnDisk::new(offset),
            None => boot
                .as_ref()
                .map(NtfsBootSector::mft_location)
                .unwrap_or_default(),
        };
        let cluster_size = self
            .cluster_size
            .or_else(|| boot.as_ref().map(NtfsBootSector::bytes_per_cluster))
            .filter(|&size| size > 0)
            .unwrap_or(DEFAULT_CLUSTER_SIZE);

        info!(
            mft_offset = *mft_location,
            cluster_size, image_len, "Image geometry settled"
        );
        Ok((
            reader,
            ImageGeometry {
                mft_location,
                cluster_size,
                image_len,
            },
        ))
    }
}

impl ImageGeometry {
    /// How many whole record slots fit between the MFT start and the end of
    /// the image.
    pub fn available_slots(&self) -> u64 {
        self.image_len.saturating_sub(*self.mft_location) / crate::mft::mft_record::MFT_RECORD_SIZE as u64
    }
}
