//! Brightness to character mapping.

#[inline]
fn pick(b: u8, charset: &[char], invert: bool) -> char {
    let b = if invert { 255 - b } else { b };
    charset[(b as usize * (charset.len() - 1)) / 255]
}

/// Map brightness values (0-255) to characters from `charset`, which is
/// ordered darkest to brightest. An empty charset yields spaces.
pub fn map_to_chars(brightness: &[u8], charset: &[char], invert: bool) -> Vec<char> {
    let mut out = Vec::new();
    map_to_chars_into(brightness, charset, invert, &mut out);
    out
}

/// Allocation-free version of [`map_to_chars`] writing into `buffer`.
pub fn map_to_chars_into(
    brightness: &[u8],
    charset: &[char],
    invert: bool,
    buffer: &mut Vec<char>,
) -> usize {
    buffer.clear();

    if charset.is_empty() {
        buffer.resize(brightness.len(), ' ');
        return brightness.len();
    }

    buffer.extend(brightness.iter().map(|&b| pick(b, charset, invert)));
    buffer.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::STANDARD_CHARSET;

    #[test]
    fn test_map_extremes() {
        let chars = map_to_chars(&[0, 255], STANDARD_CHARSET, false);
        assert_eq!(chars, vec![' ', '@']);
    }

    #[test]
    fn test_map_inverted() {
        let chars = map_to_chars(&[0, 255], STANDARD_CHARSET, true);
        assert_eq!(chars, vec!['@', ' ']);
    }

    #[test]
    fn test_map_empty_charset() {
        assert_eq!(map_to_chars(&[10, 20], &[], false), vec![' ', ' ']);
    }

    #[test]
    fn test_map_into_reuses_buffer() {
        let mut buffer = vec!['x'; 8];
        assert_eq!(map_to_chars_into(&[128], &[' ', '#'], false, &mut buffer), 1);
        assert_eq!(buffer, vec![' ']);
    }
}
