//! Byte-string scans with C string semantics.
//!
//! A string is a byte slice whose logical content ends at the first NUL,
//! or at the end of the slice when it holds no NUL. `None` stands in for
//! a NULL pointer and is tolerated everywhere, unlike the C library.

/// Logical content of `s`: everything before the first NUL.
pub fn terminated(s: &[u8]) -> &[u8] {
    &s[..strlen(Some(s))]
}

/// Number of bytes before the first NUL.
///
/// Returns 0 for `None`. C `strlen(NULL)` is undefined behavior; callers
/// of this crate rely on NULL-tolerant scanning, so we diverge here.
pub fn strlen(s: Option<&[u8]>) -> usize {
    match s {
        Some(s) => s.iter().position(|&b| b == 0).unwrap_or(s.len()),
        None => 0,
    }
}

/// Offset of the first occurrence of `c` in `s`.
///
/// The terminator is part of the searchable string, so looking for 0
/// always succeeds with the offset of the terminator, `strlen(s)`.
pub fn strchr(s: Option<&[u8]>, c: u8) -> Option<usize> {
    let s = s?;
    let len = strlen(Some(s));
    if c == 0 {
        return Some(len);
    }
    s[..len].iter().position(|&b| b == c)
}

/// POSIX `basename`: the final component of `path`.
///
/// Trailing slashes are ignored, a path made only of slashes yields
/// `"/"`, and an empty or missing path yields `"."`.
pub fn basename(path: Option<&[u8]>) -> &[u8] {
    let path = match path {
        Some(p) => terminated(p),
        None => return b".",
    };
    if path.is_empty() {
        return b".";
    }

    let end = match path.iter().rposition(|&b| b != b'/') {
        Some(last) => last + 1,
        None => return b"/",
    };
    let trimmed = &path[..end];

    match trimmed.iter().rposition(|&b| b == b'/') {
        Some(slash) => &trimmed[slash + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strlen_table() {
        let tests: &[(Option<&[u8]>, usize)] = &[
            (None, 0),
            (Some(b""), 0),
            (Some(b"\0"), 0),
            (Some(b"a"), 1),
            (Some(b"a\0b"), 1),
            (Some(b"."), 1),
            (Some(b"\t"), 1),
            (Some(b"\n"), 1),
            (Some(b"   "), 3),
            (Some(b"\t\n\n"), 3),
            (Some(b"a b"), 3),
            (Some(b"a\nb"), 3),
            (Some(b"hello, world"), 12),
        ];
        for (s, len) in tests {
            assert_eq!(strlen(*s), *len, "strlen({:?})", s);
        }
    }

    #[test]
    fn strchr_finds_terminator() {
        assert_eq!(strchr(Some(b"b"), 0), Some(1));
        assert_eq!(strchr(Some(b"foo"), 0), Some(3));
        // Explicit terminator inside the slice.
        assert_eq!(strchr(Some(b"foo\0bar"), 0), Some(3));
    }

    #[test]
    fn strchr_misses() {
        assert_eq!(strchr(None, 0), None);
        assert_eq!(strchr(None, b'a'), None);
        assert_eq!(strchr(Some(b"wibble"), b'z'), None);
        assert_eq!(strchr(Some(b"wibble"), u8::MAX), None);
        // Bytes past the terminator are not part of the string.
        assert_eq!(strchr(Some(b"ab\0c"), b'c'), None);
    }

    #[test]
    fn strchr_first_occurrence() {
        assert_eq!(strchr(Some(b"wibble"), b'b'), Some(2));
        assert_eq!(strchr(Some(b"wibble"), b'w'), Some(0));
    }

    #[test]
    fn basename_table() {
        let tests: &[(Option<&str>, &str)] = &[
            (None, "."),
            (Some(""), "."),
            (Some("/"), "/"),
            (Some("/ "), " "),
            (Some("/ /"), " "),
            (Some("/// /////"), " "),
            (Some("///foo/////"), "foo"),
            (Some("/usr/lib"), "lib"),
            (Some("/usr/"), "usr"),
            (Some("usr"), "usr"),
            (Some("."), "."),
            (Some(".."), ".."),
            (Some("/."), "."),
            (Some("../"), ".."),
            (Some("/../"), ".."),
            (Some("/.."), ".."),
            (Some("./../"), ".."),
            (Some("./."), "."),
            (Some("./.."), ".."),
            (Some("..."), "..."),
            (Some("....."), "....."),
            (Some("a"), "a"),
            (Some("az"), "az"),
            (Some("  "), "  "),
            (Some("////"), "/"),
        ];
        for (path, expected) in tests {
            let got = basename(path.map(str::as_bytes));
            assert_eq!(got, expected.as_bytes(), "basename({:?})", path);
        }
    }

    #[test]
    fn basename_stops_at_nul() {
        assert_eq!(basename(Some(b"/usr/lib\0/ignored")), b"lib");
        assert_eq!(basename(Some(b"\0/x")), b".");
    }
}
