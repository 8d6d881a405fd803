use crate::mft::le_read::read_u32;
use crate::mft::le_read::read_u64;
use crate::mft::mft_record_attribute::MftRecordAttribute;
use crate::mft::mft_record_reference::MftRecordReference;
use crate::mft::utf16;

/// Which naming convention a `$FILE_NAME` attribute carries. A record can
/// hold several names for the same file (hard links, DOS 8.3 shadows); the
/// ranking below decides which one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileNameNamespace {
    Posix,
    Win32,
    Dos,
    Win32AndDos,
    Other(u8),
}

impl FileNameNamespace {
    #[must_use]
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Posix,
            1 => Self::Win32,
            2 => Self::Dos,
            3 => Self::Win32AndDos,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn to_raw(self) -> u8 {
        match self {
            Self::Posix => 0,
            Self::Win32 => 1,
            Self::Dos => 2,
            Self::Win32AndDos => 3,
            Self::Other(other) => other,
        }
    }

    /// Win32 > Win32AndDos > POSIX > DOS. Lower is better.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Win32 => 0,
            Self::Win32AndDos => 1,
            Self::Posix => 2,
            Self::Dos => 3,
            Self::Other(_) => 4,
        }
    }
}

impl Default for FileNameNamespace {
    fn default() -> Self {
        Self::Posix
    }
}

impl std::fmt::Display for FileNameNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Win32 => write!(f, "win32"),
            Self::Dos => write!(f, "dos"),
            Self::Win32AndDos => write!(f, "win32+dos"),
            Self::Other(raw) => write!(f, "other({raw})"),
        }
    }
}

/// Resident `$FILE_NAME` (0x30) content view.
///
/// Content layout: parent reference (8), four FILETIMEs (32), allocated size
/// (8), real size (8), flags (4), reparse (4), name length in UTF-16 code
/// units (1), namespace (1), then the UTF-16LE name bytes.
#[derive(Clone, Copy, Debug)]
pub struct MftRecordX30FileName<'a> {
    content: &'a [u8],
}

impl<'a> MftRecordX30FileName<'a> {
    /// Offset of the name length byte; the name itself starts two bytes later.
    const NAME_LENGTH_OFFSET: usize = 0x40;
    const NAME_OFFSET: usize = 0x42;

    pub fn new(attribute: &MftRecordAttribute<'a>) -> Option<Self> {
        if attribute.attr_type() != MftRecordAttribute::TYPE_FILE_NAME {
            return None;
        }
        let content = attribute.resident_content()?;
        if content.len() < Self::NAME_OFFSET {
            return None;
        }
        Some(Self { content })
    }

    #[must_use]
    pub fn parent_reference(&self) -> MftRecordReference {
        MftRecordReference::from_raw(read_u64(self.content, 0).unwrap_or(0))
    }

    #[must_use]
    pub fn file_flags(&self) -> u32 {
        read_u32(self.content, 0x38).unwrap_or(0)
    }

    #[must_use]
    pub fn namespace(&self) -> FileNameNamespace {
        FileNameNamespace::from_raw(self.content[Self::NAME_LENGTH_OFFSET + 1])
    }

    /// Raw UTF-16LE name bytes, or `None` when the declared length does not
    /// fit inside the content area.
    pub fn name_utf16_bytes(&self) -> Option<&'a [u8]> {
        let units = self.content[Self::NAME_LENGTH_OFFSET] as usize;
        let end = Self::NAME_OFFSET.checked_add(units.checked_mul(2)?)?;
        self.content.get(Self::NAME_OFFSET..end)
    }

    /// Decoded UTF-8 name, truncated to 255 bytes on a char boundary.
    /// Malformed UTF-16 becomes U+FFFD, never an invalid string.
    pub fn name(&self) -> Option<String> {
        let mut name = utf16::decode_utf16le(self.name_utf16_bytes()?);
        utf16::truncate_to_byte_boundary(&mut name, 255);
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_name_attr_raw(name_units: &[u16], namespace: u8, parent: u64) -> Vec<u8> {
        let content_len = 0x42 + name_units.len() * 2;
        let total = (24 + content_len + 7) & !7;
        let mut raw = vec![0u8; total];
        raw[0..4].copy_from_slice(&0x30u32.to_le_bytes());
        raw[4..8].copy_from_slice(&(total as u32).to_le_bytes());
        raw[16..20].copy_from_slice(&(content_len as u32).to_le_bytes());
        raw[20..22].copy_from_slice(&24u16.to_le_bytes());
        raw[24..32].copy_from_slice(&parent.to_le_bytes());
        raw[24 + 0x40] = name_units.len() as u8;
        raw[24 + 0x41] = namespace;
        for (i, unit) in name_units.iter().enumerate() {
            raw[24 + 0x42 + i * 2..24 + 0x42 + i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }
        raw
    }

    #[test]
    fn decodes_ascii_name() {
        let raw = file_name_attr_raw(
            &"report.txt".encode_utf16().collect::<Vec<_>>(),
            1,
            MftRecordReference::from_parts(5, 2).to_raw(),
        );
        let attr = MftRecordAttribute::from_raw(&raw).unwrap();
        let file_name = MftRecordX30FileName::new(&attr).unwrap();
        assert_eq!(file_name.name().unwrap(), "report.txt");
        assert_eq!(file_name.namespace(), FileNameNamespace::Win32);
        assert_eq!(file_name.parent_reference().record_number(), 5);
    }

    #[test]
    fn decodes_non_ascii_name() {
        let units = [0x6587u16, 0x4EF6, 0x002E, 0x0074, 0x0078, 0x0074];
        let raw = file_name_attr_raw(&units, 3, 0);
        let attr = MftRecordAttribute::from_raw(&raw).unwrap();
        let file_name = MftRecordX30FileName::new(&attr).unwrap();
        assert_eq!(file_name.name().unwrap(), "文件.txt");
        assert_eq!(file_name.namespace(), FileNameNamespace::Win32AndDos);
    }

    #[test]
    fn declared_name_length_past_content_is_refused() {
        let mut raw = file_name_attr_raw(&"a.txt".encode_utf16().collect::<Vec<_>>(), 1, 0);
        raw[24 + 0x40] = 200;
        let attr = MftRecordAttribute::from_raw(&raw).unwrap();
        let file_name = MftRecordX30FileName::new(&attr).unwrap();
        assert!(file_name.name_utf16_bytes().is_none());
        assert!(file_name.name().is_none());
    }

    #[test]
    fn namespace_ranking_prefers_win32() {
        assert!(FileNameNamespace::Win32.rank() < FileNameNamespace::Win32AndDos.rank());
        assert!(FileNameNamespace::Win32AndDos.rank() < FileNameNamespace::Posix.rank());
        assert!(FileNameNamespace::Posix.rank() < FileNameNamespace::Dos.rank());
    }
}
