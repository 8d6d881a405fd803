//! Full-pipeline test over a synthetic NTFS volume image: boot sector →
//! slot scan → record parse → range read.

use ntfs_salvage::disk::memory_disk_reader::MemoryDiskReader;
use ntfs_salvage::mft::mft_record_parser::MftRecordParser;
use ntfs_salvage::ntfs::ntfs_boot_sector::NtfsBootSector;
use ntfs_salvage::read::range_reader::read_range;
use ntfs_salvage::scan::mft_scanner::MftScanner;

const BYTES_PER_SECTOR: u16 = 512;
const SECTORS_PER_CLUSTER: u8 = 2;
const CLUSTER_SIZE: u64 = 1024;
const MFT_CLUSTER: u64 = 4;
const MFT_OFFSET: usize = (MFT_CLUSTER * CLUSTER_SIZE) as usize;

fn resident_attr(attr_type: u32, content: &[u8]) -> Vec<u8> {
    let total = (24 + content.len() + 7) & !7;
    let mut raw = vec![0u8; total];
    raw[0..4].copy_from_slice(&attr_type.to_le_bytes());
    raw[4..8].copy_from_slice(&(total as u32).to_le_bytes());
    raw[16..20].copy_from_slice(&(content.len() as u32).to_le_bytes());
    raw[20..22].copy_from_slice(&24u16.to_le_bytes());
    raw[24..24 + content.len()].copy_from_slice(content);
    raw
}

fn file_name_attr(name: &str, namespace: u8) -> Vec<u8> {
    let units: Vec<u16> = name.encode_utf16().collect();
    let mut content = vec![0u8; 0x42 + units.len() * 2];
    content[0..8].copy_from_slice(&5u64.to_le_bytes()); // parent: root
    content[0x40] = units.len() as u8;
    content[0x41] = namespace;
    for (i, unit) in units.iter().enumerate() {
        content[0x42 + i * 2..0x42 + i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    resident_attr(0x30, &content)
}

fn non_resident_data_attr(real_size: u64, runlist: &[u8]) -> Vec<u8> {
    let total = (0x40 + runlist.len() + 7) & !7;
    let mut raw = vec![0u8; total];
    raw[0..4].copy_from_slice(&0x80u32.to_le_bytes());
    raw[4..8].copy_from_slice(&(total as u32).to_le_bytes());
    raw[8] = 1;
    raw[0x20..0x22].copy_from_slice(&0x40u16.to_le_bytes());
    raw[0x30..0x38].copy_from_slice(&real_size.to_le_bytes());
    raw[0x38..0x40].copy_from_slice(&real_size.to_le_bytes());
    raw[0x40..0x40 + runlist.len()].copy_from_slice(runlist);
    raw
}

fn mft_record(flags: u16, attrs: &[Vec<u8>]) -> [u8; 1024] {
    let mut data = [0u8; 1024];
    data[0..4].copy_from_slice(b"FILE");
    data[0x10..0x12].copy_from_slice(&1u16.to_le_bytes());
    data[0x12..0x14].copy_from_slice(&1u16.to_le_bytes());
    data[0x14..0x16].copy_from_slice(&48u16.to_le_bytes());
    data[0x16..0x18].copy_from_slice(&flags.to_le_bytes());
    data[0x1C..0x20].copy_from_slice(&1024u32.to_le_bytes());
    let mut pos = 48;
    for attr in attrs {
        data[pos..pos + attr.len()].copy_from_slice(attr);
        pos += attr.len();
    }
    data[pos..pos + 4].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
    data[0x18..0x1C].copy_from_slice(&((pos + 8) as u32).to_le_bytes());
    data
}

/// A small volume: boot sector, MFT at cluster 4 with three slots, file
/// content at clusters 8..=9.
fn build_volume() -> (Vec<u8>, Vec<u8>) {
    let mut image = vec![0u8; 12 * CLUSTER_SIZE as usize];
    image[0x03..0x0B].copy_from_slice(b"NTFS    ");
    image[0x0B..0x0D].copy_from_slice(&BYTES_PER_SECTOR.to_le_bytes());
    image[0x0D] = SECTORS_PER_CLUSTER;
    image[0x30..0x38].copy_from_slice(&MFT_CLUSTER.to_le_bytes());

    // Record 0: the $MFT record itself.
    let mft_own = mft_record(
        0x01,
        &[
            file_name_attr("$MFT", 3),
            non_resident_data_attr(3 * 1024, &[0x11, 0x03, 0x04]),
        ],
    );
    image[MFT_OFFSET..MFT_OFFSET + 1024].copy_from_slice(&mft_own);

    // Record 1: a deleted file whose content survives at clusters 8..=9.
    let mut content = Vec::new();
    while content.len() < 1500 {
        content.extend_from_slice(b"Hello from a recovered file!\n");
    }
    content.truncate(1500);
    let report = mft_record(
        0x00,
        &[
            file_name_attr("report.txt", 1),
            non_resident_data_attr(1500, &[0x11, 0x02, 0x08]),
        ],
    );
    image[MFT_OFFSET + 1024..MFT_OFFSET + 2048].copy_from_slice(&report);

    // Record 2: a tiny note held resident.
    let note = mft_record(
        0x01,
        &[
            file_name_attr("note.txt", 1),
            resident_attr(0x80, b"remember the milk"),
        ],
    );
    image[MFT_OFFSET + 2048..MFT_OFFSET + 3072].copy_from_slice(&note);

    let data_start = 8 * CLUSTER_SIZE as usize;
    image[data_start..data_start + 1500].copy_from_slice(&content);
    // Slack in the last cluster that must never leak into the output.
    for byte in &mut image[data_start + 1500..data_start + 2048] {
        *byte = 0xEE;
    }

    (image, content)
}

#[test]
fn scan_and_recover_a_deleted_file() -> eyre::Result<()> {
    let (image, content) = build_volume();
    let reader = MemoryDiskReader::from(image);

    let boot = NtfsBootSector::try_from_reader(&reader)?;
    assert!(boot.is_ntfs());
    assert_eq!(boot.bytes_per_cluster(), CLUSTER_SIZE);

    let records = MftScanner::new(&reader)
        .with_mft_location(boot.mft_location())
        .scan(3);
    assert_eq!(records.len(), 3);

    let report = records
        .iter()
        .find(|r| r.name == "report.txt")
        .expect("deleted file should still be listed");
    assert!(!report.is_in_use());
    assert_eq!(report.size, 1500);
    assert_eq!(report.allocated_bytes(CLUSTER_SIZE), 2048);

    let mut recovered = vec![0u8; report.size as usize];
    read_range(&reader, report, 0, &mut recovered, CLUSTER_SIZE)?;
    assert_eq!(recovered, content);
    Ok(())
}

#[test]
fn resident_files_come_back_without_touching_the_data_area() {
    let (image, _) = build_volume();
    let reader = MemoryDiskReader::from(image);
    let boot = NtfsBootSector::try_from_reader(&reader).unwrap();

    let parser = MftRecordParser::new(&reader).with_mft_location(boot.mft_location());
    let offset = boot.mft_location().record_offset(2).unwrap();
    let note = parser.parse_record(offset).unwrap();
    assert_eq!(note.name, "note.txt");
    assert_eq!(note.size, 17);

    let mut recovered = vec![0u8; 17];
    read_range(&reader, &note, 0, &mut recovered, CLUSTER_SIZE).unwrap();
    assert_eq!(&recovered, b"remember the milk");
}

#[test]
fn slack_bytes_never_leak_past_eof() {
    let (image, content) = build_volume();
    let reader = MemoryDiskReader::from(image);
    let boot = NtfsBootSector::try_from_reader(&reader).unwrap();

    let parser = MftRecordParser::new(&reader).with_mft_location(boot.mft_location());
    let offset = boot.mft_location().record_offset(1).unwrap();
    let report = parser.parse_record(offset).unwrap();

    // Ask for more than the file holds: the tail must be zeros, not the
    // 0xEE slack the image plants after EOF.
    let mut recovered = vec![0xFFu8; 2048];
    read_range(&reader, &report, 0, &mut recovered, CLUSTER_SIZE).unwrap();
    assert_eq!(&recovered[..1500], &content[..]);
    assert!(recovered[1500..].iter().all(|&b| b == 0));
}
