//! The region model: one contiguous virtual-memory mapping.
//!
//! A `Region` can only be built through [`Region::new`], which validates
//! the raw fields and assigns the classification, so a constructed value
//! never holds contradictory state (`start >= end`, a malformed
//! permission string, a stale size).

use crate::classification::{classify, SegmentClass};
use crate::domain::{ParseErrorReason, Pathname, Permissions};
use std::fmt;

/// One mapping from `/proc/<pid>/maps`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    start: u64,
    end: u64,
    permissions: Permissions,
    file_offset: u64,
    device: (u32, u32),
    inode: u64,
    pathname: Pathname,
    classification: SegmentClass,
}

impl Region {
    /// Build a region from the raw maps-line fields.
    ///
    /// The classification is computed here and never changes afterwards.
    ///
    /// # Errors
    /// - `InvalidRange` when `start >= end`
    /// - `InvalidPermissions` when the permission string is not exactly
    ///   `[r-][w-][x-][ps]`
    pub fn new(
        start: u64,
        end: u64,
        permissions: &str,
        file_offset: u64,
        device: (u32, u32),
        inode: u64,
        pathname: Pathname,
    ) -> Result<Self, ParseErrorReason> {
        if start >= end {
            return Err(ParseErrorReason::InvalidRange);
        }
        let permissions =
            Permissions::parse(permissions).ok_or(ParseErrorReason::InvalidPermissions)?;
        let classification = classify(&permissions, &pathname);
        Ok(Self { start, end, permissions, file_offset, device, inode, pathname, classification })
    }

    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Region size in bytes. Always `end - start`.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    #[must_use]
    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    #[must_use]
    pub fn file_offset(&self) -> u64 {
        self.file_offset
    }

    #[must_use]
    pub fn device(&self) -> (u32, u32) {
        self.device
    }

    #[must_use]
    pub fn inode(&self) -> u64 {
        self.inode
    }

    #[must_use]
    pub fn pathname(&self) -> &Pathname {
        &self.pathname
    }

    #[must_use]
    pub fn class(&self) -> SegmentClass {
        self.classification
    }

    /// Check if an address falls within this region (end exclusive).
    #[must_use]
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.end
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.permissions.read
    }

    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.permissions.write
    }

    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.permissions.exec
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self.permissions.sharing, crate::domain::Sharing::Private)
    }

    #[must_use]
    pub fn is_shared(&self) -> bool {
        !self.is_private()
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(self.pathname, Pathname::Anonymous)
    }

    #[must_use]
    pub fn is_file_backed(&self) -> bool {
        matches!(self.pathname, Pathname::FileBacked(_))
    }

    #[must_use]
    pub fn is_pseudo(&self) -> bool {
        matches!(self.pathname, Pathname::Pseudo(_))
    }
}

impl fmt::Display for Region {
    /// Kernel maps-line form, fields separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:x}-{:x} {} {:08x} {:02x}:{:02x} {}",
            self.start,
            self.end,
            self.permissions,
            self.file_offset,
            self.device.0,
            self.device.1,
            self.inode
        )?;
        if !matches!(self.pathname, Pathname::Anonymous) {
            write!(f, " {}", self.pathname)?;
        }
        Ok(())
    }
}
