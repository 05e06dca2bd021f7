//! Semantic classification of memory regions.
//!
//! Assigns each mapping a role (code, data, heap, stack, ...) from its
//! permissions and pathname alone. The kernel's pseudo names win over
//! permission bits: an executable `[vdso]` is vdso, not code.
//!
//! Classification is a pure function of `(permissions, pathname)` - the
//! same pair always yields the same class, independent of neighboring
//! regions. Anonymous writable regions stay `Anon`; telling true BSS
//! apart would require looking at adjacent file-backed mappings.

use crate::domain::{Pathname, Permissions};

/// Semantic role of one memory region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentClass {
    /// Executable file-backed region.
    Code,
    /// Read-only, non-executable, file-backed.
    Rodata,
    /// Writable, non-executable, file-backed.
    Data,
    /// The `[heap]` pseudo mapping.
    Heap,
    /// `[stack]`, or `[stack:<tid>]` for non-main threads.
    Stack,
    /// Kernel-provided mappings: vdso, vvar, vsyscall, sigpage, vectors.
    Vdso,
    /// Anonymous mapping not otherwise classified.
    Anon,
    /// No rule matched.
    Unknown,
}

impl SegmentClass {
    /// Every class, in display order.
    pub const ALL: [SegmentClass; 8] = [
        SegmentClass::Code,
        SegmentClass::Rodata,
        SegmentClass::Data,
        SegmentClass::Heap,
        SegmentClass::Stack,
        SegmentClass::Vdso,
        SegmentClass::Anon,
        SegmentClass::Unknown,
    ];

    /// Upper-case label used by the text and HTML reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SegmentClass::Code => "CODE",
            SegmentClass::Rodata => "RODATA",
            SegmentClass::Data => "DATA",
            SegmentClass::Heap => "HEAP",
            SegmentClass::Stack => "STACK",
            SegmentClass::Vdso => "VDSO",
            SegmentClass::Anon => "ANON",
            SegmentClass::Unknown => "UNKNOWN",
        }
    }
}

/// Pseudo names the kernel uses for its own mappings.
const VDSO_NAMES: &[&str] = &["[vdso]", "[vvar]", "[vsyscall]", "[sigpage]", "[vectors]"];

/// `[stack]` for the main thread, `[stack:<tid>]` for others.
fn is_stack_name(name: &str) -> bool {
    if name == "[stack]" {
        return true;
    }
    name.strip_prefix("[stack:")
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|tid| !tid.is_empty() && tid.bytes().all(|b| b.is_ascii_digit()))
}

/// Classify one region. First matching rule wins.
#[must_use]
pub fn classify(permissions: &Permissions, pathname: &Pathname) -> SegmentClass {
    if let Pathname::Pseudo(name) = pathname {
        if name == "[heap]" {
            return SegmentClass::Heap;
        }
        if is_stack_name(name) {
            return SegmentClass::Stack;
        }
        if VDSO_NAMES.contains(&name.as_str()) {
            return SegmentClass::Vdso;
        }
        return SegmentClass::Unknown;
    }

    match pathname {
        Pathname::FileBacked(_) => {
            if permissions.exec {
                SegmentClass::Code
            } else if permissions.read && !permissions.write {
                SegmentClass::Rodata
            } else if permissions.write {
                SegmentClass::Data
            } else {
                SegmentClass::Unknown
            }
        }
        Pathname::Anonymous => SegmentClass::Anon,
        Pathname::Pseudo(_) => unreachable!("pseudo names handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perms(s: &str) -> Permissions {
        Permissions::parse(s).unwrap()
    }

    fn file(p: &str) -> Pathname {
        Pathname::FileBacked(p.to_string())
    }

    #[test]
    fn test_pseudo_names_win_over_permissions() {
        assert_eq!(classify(&perms("rw-p"), &Pathname::from_raw("[heap]")), SegmentClass::Heap);
        assert_eq!(classify(&perms("rw-p"), &Pathname::from_raw("[stack]")), SegmentClass::Stack);
        // Executable vdso is still vdso, not code
        assert_eq!(classify(&perms("r-xp"), &Pathname::from_raw("[vdso]")), SegmentClass::Vdso);
    }

    #[test]
    fn test_thread_stack_names() {
        assert_eq!(classify(&perms("rw-p"), &Pathname::from_raw("[stack:1234]")), SegmentClass::Stack);
        assert_eq!(classify(&perms("rw-p"), &Pathname::from_raw("[stack:]")), SegmentClass::Unknown);
        assert_eq!(classify(&perms("rw-p"), &Pathname::from_raw("[stack:12a]")), SegmentClass::Unknown);
        assert_eq!(classify(&perms("rw-p"), &Pathname::from_raw("[stacks]")), SegmentClass::Unknown);
    }

    #[test]
    fn test_full_vdso_set() {
        for name in ["[vdso]", "[vvar]", "[vsyscall]", "[sigpage]", "[vectors]"] {
            assert_eq!(classify(&perms("r-xp"), &Pathname::from_raw(name)), SegmentClass::Vdso);
        }
    }

    #[test]
    fn test_file_backed_rules() {
        assert_eq!(classify(&perms("r-xp"), &file("/usr/bin/amxrt")), SegmentClass::Code);
        assert_eq!(classify(&perms("r--p"), &file("/lib/libc.so.6")), SegmentClass::Rodata);
        assert_eq!(classify(&perms("rw-p"), &file("/lib/libc.so.6")), SegmentClass::Data);
        // Writable and executable file mapping still counts as code
        assert_eq!(classify(&perms("rwxp"), &file("/usr/bin/myapp")), SegmentClass::Code);
        // Inaccessible guard mapping of a file matches no rule
        assert_eq!(classify(&perms("---p"), &file("/lib/libc.so.6")), SegmentClass::Unknown);
    }

    #[test]
    fn test_anonymous_is_anon() {
        assert_eq!(classify(&perms("rw-p"), &Pathname::Anonymous), SegmentClass::Anon);
        assert_eq!(classify(&perms("---p"), &Pathname::Anonymous), SegmentClass::Anon);
        assert_eq!(classify(&perms("rwxp"), &Pathname::Anonymous), SegmentClass::Anon);
    }

    #[test]
    fn test_unrecognized_pseudo_is_unknown() {
        assert_eq!(
            classify(&perms("rw-p"), &Pathname::from_raw("[anon:libc_malloc]")),
            SegmentClass::Unknown
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let p = perms("r-xp");
        let path = file("/usr/bin/amxrt");
        assert_eq!(classify(&p, &path), classify(&p, &path));
    }
}
