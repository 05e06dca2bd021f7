//! Parser for the `/proc/<pid>/maps` line format.
//!
//! One mapping per line:
//!
//! ```text
//! <start>-<end> <perms> <offset> <major>:<minor> <inode> [<pathname>]
//! 0098b000-0098c000 r-xp 00000000 b3:04 6081 /usr/bin/amxrt
//! ```
//!
//! Addresses, offset and device numbers are unprefixed hex (either
//! case); the inode is decimal. The pathname is everything after the
//! fifth whitespace run, trimmed - it may be absent (anonymous), a
//! bracketed pseudo name, or a filesystem path with embedded spaces.

use crate::domain::{ParseError, ParseErrorReason, Pathname};
use crate::maps::AddressSpace;
use crate::region::Region;
use log::info;

/// Parse a full maps snapshot.
///
/// # Errors
/// Fails on the first malformed line, inverted range, bad permission
/// string, out-of-order start, or overlap, with the 1-based line
/// number. No partial address space is produced.
pub fn parse_str(text: &str) -> Result<AddressSpace, ParseError> {
    parse_lines(text.lines())
}

/// Parse a stream of maps lines without materializing the whole input.
///
/// Empty (or whitespace-only) lines are skipped but still counted for
/// error reporting. Regions must arrive in ascending, non-overlapping
/// order, as the kernel emits them.
///
/// # Errors
/// See [`parse_str`].
pub fn parse_lines<'a, I>(lines: I) -> Result<AddressSpace, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut regions: Vec<Region> = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let region =
            parse_line(line).map_err(|reason| ParseError { line_number, reason })?;

        if let Some(prev) = regions.last() {
            let reason = if region.start() < prev.start() {
                Some(ParseErrorReason::OutOfOrder)
            } else if region.start() < prev.end() {
                Some(ParseErrorReason::OverlapsPrevious)
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ParseError { line_number, reason });
            }
        }

        regions.push(region);
    }

    let space = AddressSpace::from_validated(regions);
    info!("parsed {} regions, {} bytes mapped", space.len(), space.total_size());
    Ok(space)
}

/// Split off the five whitespace-delimited fields; the remainder (which
/// may contain spaces) is the raw pathname.
fn split_fields(line: &str) -> Option<([&str; 5], &str)> {
    let mut rest = line;
    let mut fields = [""; 5];
    for field in &mut fields {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        *field = &rest[..end];
        rest = &rest[end..];
    }
    Some((fields, rest))
}

fn parse_line(line: &str) -> Result<Region, ParseErrorReason> {
    let (fields, raw_pathname) =
        split_fields(line).ok_or(ParseErrorReason::MalformedLine)?;
    let [range, perms, offset, device, inode] = fields;

    let (start, end) = range.split_once('-').ok_or(ParseErrorReason::MalformedLine)?;
    let start = parse_hex(start)?;
    let end = parse_hex(end)?;

    let file_offset = parse_hex(offset)?;

    let (major, minor) = device.split_once(':').ok_or(ParseErrorReason::MalformedLine)?;
    let major =
        u32::from_str_radix(major, 16).map_err(|_| ParseErrorReason::MalformedLine)?;
    let minor =
        u32::from_str_radix(minor, 16).map_err(|_| ParseErrorReason::MalformedLine)?;

    let inode: u64 = inode.parse().map_err(|_| ParseErrorReason::MalformedLine)?;

    Region::new(start, end, perms, file_offset, (major, minor), inode, Pathname::from_raw(raw_pathname))
}

/// Unprefixed hex, either case. Values that do not fit in 64 bits are
/// rejected with the whole line.
fn parse_hex(token: &str) -> Result<u64, ParseErrorReason> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseErrorReason::MalformedLine);
    }
    u64::from_str_radix(token, 16).map_err(|_| ParseErrorReason::MalformedLine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::SegmentClass;
    use crate::domain::Sharing;

    #[test]
    fn test_parse_file_backed_line() {
        let space =
            parse_str("0098b000-0098c000 r-xp 00000000 b3:04 6081 /usr/bin/amxrt").unwrap();
        assert_eq!(space.len(), 1);

        let region = &space.regions()[0];
        assert_eq!(region.start(), 0x0098b000);
        assert_eq!(region.end(), 0x0098c000);
        assert_eq!(region.size(), 4096);
        assert!(region.is_readable() && region.is_executable() && !region.is_writable());
        assert_eq!(region.permissions().sharing, Sharing::Private);
        assert_eq!(region.file_offset(), 0);
        assert_eq!(region.device(), (0xb3, 0x04));
        assert_eq!(region.inode(), 6081);
        assert_eq!(region.pathname().as_path(), Some("/usr/bin/amxrt"));
        assert_eq!(region.class(), SegmentClass::Code);
    }

    #[test]
    fn test_parse_heap_line_with_wide_padding() {
        let space = parse_str(
            "0214f000-0218a000 rw-p 00000000 00:00 0                                  [heap]",
        )
        .unwrap();
        let region = &space.regions()[0];
        assert_eq!(region.class(), SegmentClass::Heap);
        assert!(region.is_pseudo());
        assert_eq!(region.pathname().label(), "[heap]");
    }

    #[test]
    fn test_anonymous_when_pathname_absent_or_blank() {
        let space = parse_str("0214f000-0218a000 rw-p 00000000 00:00 0").unwrap();
        assert!(space.regions()[0].is_anonymous());

        let space = parse_str("0214f000-0218a000 rw-p 00000000 00:00 0      ").unwrap();
        assert!(space.regions()[0].is_anonymous());
    }

    #[test]
    fn test_pathname_with_embedded_spaces_preserved() {
        let space =
            parse_str("1000-2000 r--p 00000000 08:01 42 /opt/My App/data file.bin").unwrap();
        assert_eq!(space.regions()[0].pathname().as_path(), Some("/opt/My App/data file.bin"));
    }

    #[test]
    fn test_uppercase_hex_accepted() {
        let space = parse_str("F79E0000-F79E6000 r-xp 0001B000 B3:04 4096 /lib/libubus.so").unwrap();
        let region = &space.regions()[0];
        assert_eq!(region.start(), 0xf79e_0000);
        assert_eq!(region.file_offset(), 0x1b000);
        assert_eq!(region.device(), (0xb3, 0x04));
    }

    #[test]
    fn test_empty_lines_skipped_but_counted() {
        let text = "\n1000-2000 rw-p 00000000 00:00 0\n\nnot-a-mapping-line\n";
        let err = parse_str(text).unwrap_err();
        assert_eq!(err.line_number, 4);
        assert_eq!(err.reason, ParseErrorReason::MalformedLine);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let space = parse_str("").unwrap();
        assert!(space.is_empty());
    }

    #[test]
    fn test_malformed_line_rejected() {
        for bad in [
            "not-a-mapping-line",
            "1000-2000 rw-p",
            "1000_2000 rw-p 00000000 00:00 0",
            "1000-2000 rw-p 00000000 0000 0",
            "1000-2000 rw-p 00000000 00:00 abc",
            "1000-0x2000 rw-p 00000000 00:00 0",
        ] {
            let err = parse_str(bad).unwrap_err();
            assert_eq!(err.reason, ParseErrorReason::MalformedLine, "input: {bad}");
            assert_eq!(err.line_number, 1);
        }
    }

    #[test]
    fn test_address_too_wide_for_u64_rejected() {
        let err = parse_str("10000000000000000-20000000000000000 rw-p 00000000 00:00 0")
            .unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::MalformedLine);
    }

    #[test]
    fn test_invalid_range_and_permissions_reported_as_such() {
        let err = parse_str("2000-1000 rw-p 00000000 00:00 0").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::InvalidRange);

        let err = parse_str("1000-2000 rwzp 00000000 00:00 0").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::InvalidPermissions);
    }

    #[test]
    fn test_out_of_order_detected_on_second_line() {
        let text = "4000-5000 rw-p 00000000 00:00 0\n1000-2000 rw-p 00000000 00:00 0";
        let err = parse_str(text).unwrap_err();
        assert_eq!(err.line_number, 2);
        assert_eq!(err.reason, ParseErrorReason::OutOfOrder);
    }

    #[test]
    fn test_overlap_detected_on_second_line() {
        let text = "1000-3000 rw-p 00000000 00:00 0\n2000-4000 rw-p 00000000 00:00 0";
        let err = parse_str(text).unwrap_err();
        assert_eq!(err.line_number, 2);
        assert_eq!(err.reason, ParseErrorReason::OverlapsPrevious);

        // A duplicated start is an overlap, not merely out of order
        let text = "1000-3000 rw-p 00000000 00:00 0\n1000-2000 rw-p 00000000 00:00 0";
        let err = parse_str(text).unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::OverlapsPrevious);
    }

    #[test]
    fn test_adjacent_regions_are_valid() {
        let text = "1000-2000 rw-p 00000000 00:00 0\n2000-3000 r--p 00000000 00:00 0";
        let space = parse_str(text).unwrap();
        assert_eq!(space.len(), 2);
    }

    #[test]
    fn test_region_line_roundtrip() {
        let lines = [
            "98b000-98c000 r-xp 00000000 b3:04 6081 /usr/bin/amxrt",
            "214f000-218a000 rw-p 00000000 00:00 0",
            "f79e0000-f79e6000 r--s 0001b000 b3:04 4096 /opt/My App/data file.bin",
        ];
        for line in lines {
            let space = parse_str(line).unwrap();
            let region = &space.regions()[0];
            let reparsed = parse_str(&region.to_string()).unwrap();
            assert_eq!(reparsed.regions()[0], *region);
        }
    }
}
