use chrono::DateTime;
use chrono::Utc;
use core::fmt;

/// Windows FILETIME: 100-nanosecond intervals since 1601-01-01 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Filetime(u64);

impl Filetime {
    /// 100-ns intervals between 1601-01-01 and the Unix epoch.
    const UNIX_EPOCH_DELTA: i64 = 116_444_736_000_000_000;

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert to a calendar timestamp. `None` for values chrono cannot
    /// represent (far-future garbage from corrupted records).
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let relative = i64::try_from(self.0).ok()?.checked_sub(Self::UNIX_EPOCH_DELTA)?;
        let secs = relative.div_euclid(10_000_000);
        let nanos = (relative.rem_euclid(10_000_000) * 100) as u32;
        DateTime::from_timestamp(secs, nanos)
    }
}

impl From<u64> for Filetime {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Filetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) if !self.is_zero() => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            _ => write!(f, "-"),
        }
    }
}
