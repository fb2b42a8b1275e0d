//! HTTP Range request parsing module
//!
//! Single-range byte parsing for static asset serving (RFC 7233).

/// Parsed byte range within a known file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    /// Inclusive end position
    pub end: usize,
}

impl ByteRange {
    /// Byte count of the range (for test validation only)
    #[cfg(test)]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Range header parse result
#[derive(Debug)]
pub enum RangeParseResult {
    /// Valid range, clamped to the file size
    Valid(ByteRange),
    /// Out of bounds, respond 416
    NotSatisfiable,
    /// Absent or malformed header, serve the full content
    None,
}

/// Parse an HTTP Range header against a known file size.
///
/// Supports `bytes=start-end`, `bytes=start-` and `bytes=-suffix`.
/// Multi-range requests and non-bytes units fall back to full content.
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeParseResult {
    let Some(value) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeParseResult::None;
    };

    if value.contains(',') {
        return RangeParseResult::None;
    }

    let Some((start_str, end_str)) = value.split_once('-') else {
        return RangeParseResult::None;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        // Suffix form: last N bytes
        return match end_str.parse::<usize>() {
            Ok(0) => RangeParseResult::NotSatisfiable,
            Ok(suffix) if file_size > 0 => RangeParseResult::Valid(ByteRange {
                start: file_size.saturating_sub(suffix),
                end: file_size - 1,
            }),
            Ok(_) => RangeParseResult::NotSatisfiable,
            Err(_) => RangeParseResult::None,
        };
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeParseResult::None;
    };
    if start >= file_size {
        return RangeParseResult::NotSatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeParseResult::None;
        };
        if end < start {
            return RangeParseResult::NotSatisfiable;
        }
        end.min(file_size - 1)
    };

    RangeParseResult::Valid(ByteRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_valid(header: &str, file_size: usize) -> ByteRange {
        match parse_range_header(Some(header), file_size) {
            RangeParseResult::Valid(r) => r,
            other => panic!("expected valid range for {header}, got {other:?}"),
        }
    }

    #[test]
    fn test_absent_header() {
        assert!(matches!(
            parse_range_header(None, 100),
            RangeParseResult::None
        ));
    }

    #[test]
    fn test_fixed_range() {
        let r = expect_valid("bytes=0-9", 100);
        assert_eq!((r.start, r.end), (0, 9));
        assert_eq!(r.len(), 10);
    }

    #[test]
    fn test_open_ended_range() {
        let r = expect_valid("bytes=50-", 100);
        assert_eq!((r.start, r.end), (50, 99));
    }

    #[test]
    fn test_suffix_range() {
        let r = expect_valid("bytes=-20", 100);
        assert_eq!((r.start, r.end), (80, 99));
    }

    #[test]
    fn test_suffix_larger_than_file() {
        let r = expect_valid("bytes=-500", 100);
        assert_eq!((r.start, r.end), (0, 99));
    }

    #[test]
    fn test_end_clamped_to_file_size() {
        let r = expect_valid("bytes=90-500", 100);
        assert_eq!((r.start, r.end), (90, 99));
    }

    #[test]
    fn test_not_satisfiable() {
        assert!(matches!(
            parse_range_header(Some("bytes=100-"), 100),
            RangeParseResult::NotSatisfiable
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=-0"), 100),
            RangeParseResult::NotSatisfiable
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=9-5"), 100),
            RangeParseResult::NotSatisfiable
        ));
    }

    #[test]
    fn test_malformed_falls_back_to_full_content() {
        assert!(matches!(
            parse_range_header(Some("bytes=a-b"), 100),
            RangeParseResult::None
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=0-9,20-29"), 100),
            RangeParseResult::None
        ));
        assert!(matches!(
            parse_range_header(Some("items=0-9"), 100),
            RangeParseResult::None
        ));
    }
}
