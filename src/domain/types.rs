//! Core value types shared across the crate.

use std::fmt;

/// Process identifier, as used by `/proc/<pid>/maps`.
///
/// Newtype over `i32` so a PID can't be confused with other integer
/// parameters in function signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pid(pub i32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sharing mode of a mapping, the fourth permission slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sharing {
    Private,
    Shared,
}

/// Permission record of one mapping.
///
/// Serialized form is exactly four characters: `[r-][w-][x-][ps]`.
/// Anything outside that alphabet is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub exec: bool,
    pub sharing: Sharing,
}

impl Permissions {
    /// Parse the four-character kernel permission string.
    ///
    /// Returns `None` when the length or alphabet is wrong; the caller
    /// decides how to report that.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() != 4 {
            return None;
        }
        let slot = |c: u8, on: u8| -> Option<bool> {
            match c {
                c if c == on => Some(true),
                b'-' => Some(false),
                _ => None,
            }
        };
        let read = slot(b[0], b'r')?;
        let write = slot(b[1], b'w')?;
        let exec = slot(b[2], b'x')?;
        let sharing = match b[3] {
            b'p' => Sharing::Private,
            b's' => Sharing::Shared,
            _ => return None,
        };
        Some(Self { read, write, exec, sharing })
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.read { 'r' } else { '-' },
            if self.write { 'w' } else { '-' },
            if self.exec { 'x' } else { '-' },
            match self.sharing {
                Sharing::Private => 'p',
                Sharing::Shared => 's',
            }
        )
    }
}

/// Backing of a mapping, taken verbatim from the maps line.
///
/// Pseudo names are the bracketed labels the kernel emits (`[heap]`,
/// `[stack]`, `[vdso]`, ...). Paths are preserved without truncation,
/// embedded spaces included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pathname {
    FileBacked(String),
    Pseudo(String),
    Anonymous,
}

impl Pathname {
    /// Interpret the trimmed pathname field of a maps line.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Pathname::Anonymous
        } else if trimmed.starts_with('[') {
            Pathname::Pseudo(trimmed.to_string())
        } else {
            Pathname::FileBacked(trimmed.to_string())
        }
    }

    /// The filesystem path, when this mapping is file-backed.
    #[must_use]
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Pathname::FileBacked(p) => Some(p),
            _ => None,
        }
    }

    /// Human-facing label: the path or pseudo name, `[anon]` for
    /// anonymous mappings.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Pathname::FileBacked(p) => p,
            Pathname::Pseudo(n) => n,
            Pathname::Anonymous => "[anon]",
        }
    }
}

impl fmt::Display for Pathname {
    /// Verbatim form as it appears on a maps line; empty for anonymous.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pathname::FileBacked(p) => f.write_str(p),
            Pathname::Pseudo(n) => f.write_str(n),
            Pathname::Anonymous => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_parse_roundtrip() {
        for s in ["r-xp", "rw-p", "rwxs", "---p", "--xs"] {
            let perms = Permissions::parse(s).unwrap();
            assert_eq!(perms.to_string(), s);
        }
    }

    #[test]
    fn test_permissions_rejects_bad_alphabet() {
        assert!(Permissions::parse("rwx").is_none());
        assert!(Permissions::parse("rwxpp").is_none());
        assert!(Permissions::parse("rwx?").is_none());
        assert!(Permissions::parse("xwrp").is_none());
        assert!(Permissions::parse("r-x ").is_none());
        assert!(Permissions::parse("R-XP").is_none());
    }

    #[test]
    fn test_pathname_from_raw() {
        assert_eq!(Pathname::from_raw(""), Pathname::Anonymous);
        assert_eq!(Pathname::from_raw("   "), Pathname::Anonymous);
        assert_eq!(Pathname::from_raw("[heap]"), Pathname::Pseudo("[heap]".into()));
        assert_eq!(
            Pathname::from_raw("  /usr/bin/amxrt  "),
            Pathname::FileBacked("/usr/bin/amxrt".into())
        );
    }

    #[test]
    fn test_pathname_preserves_embedded_spaces() {
        let p = Pathname::from_raw("/opt/My App/bin/server");
        assert_eq!(p.as_path(), Some("/opt/My App/bin/server"));
    }

    #[test]
    fn test_pathname_label() {
        assert_eq!(Pathname::Anonymous.label(), "[anon]");
        assert_eq!(Pathname::from_raw("[stack]").label(), "[stack]");
        assert_eq!(Pathname::from_raw("/lib/libc.so.6").label(), "/lib/libc.so.6");
    }
}
