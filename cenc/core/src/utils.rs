/**
    Const-compatible byte slice equality.
*/
pub(crate) const fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/**
    Decode a single ASCII hex digit to its 4-bit value.
*/
pub(crate) const fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/**
    Parse exactly 16 bytes from hex text.

    Hyphens are skipped anywhere, so both UUID form
    (`edef8ba9-79d6-4ace-a3c8-27dcd51d21ed`) and plain form
    (`edef8ba979d64acea3c827dcd51d21ed`) are accepted. Surrounding ASCII
    whitespace is ignored and hex digits are case-insensitive.
*/
pub const fn parse_hex16(s: &[u8]) -> Option<[u8; 16]> {
    let s = s.trim_ascii();
    let mut bytes = [0u8; 16];
    let mut bi = 0; // index into bytes
    let mut si = 0; // index into s

    while si < s.len() {
        if s[si] == b'-' {
            si += 1;
            continue;
        }
        if bi >= 16 || si + 1 >= s.len() {
            return None;
        }
        let hi = match hex_digit(s[si]) {
            Some(v) => v,
            None => return None,
        };
        let lo = match hex_digit(s[si + 1]) {
            Some(v) => v,
            None => return None,
        };
        bytes[bi] = (hi << 4) | lo;
        bi += 1;
        si += 2;
    }

    if bi != 16 {
        return None;
    }
    Some(bytes)
}
