pub mod ntfs_boot_sector;

pub use ntfs_boot_sector::NtfsBootSector;
