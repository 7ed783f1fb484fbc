//! Automatic naming of new components and diagrams.
//!
//! A prefix such as `Class` produces `Class1`, `Class2`, ... and takes the
//! first name not yet in use. A prefix starting with [`WILDCARD`] switches to
//! the letter scheme: `A` to `Z`, then `A1` to `Z1`, `A2` and so on.

/// Prefix marker selecting the letter scheme.
pub const WILDCARD: char = '*';

const ALPHABET_LEN: usize = 26;

/// Name at position `index` (zero based) of the sequence for `prefix`.
pub fn nth_name(prefix: &str, index: usize) -> String {
    match prefix.strip_prefix(WILDCARD) {
        Some(rest) => {
            let letter = (b'A' + (index % ALPHABET_LEN) as u8) as char;
            let round = index / ALPHABET_LEN;
            if round == 0 {
                format!("{}{}", rest, letter)
            } else {
                format!("{}{}{}", rest, letter, round)
            }
        }
        None => format!("{}{}", prefix, index + 1),
    }
}

/// First name of the sequence for `prefix` for which `taken` is false.
pub fn next_free_name(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    (0..)
        .map(|i| nth_name(prefix, i))
        .find(|name| !taken(name))
        .unwrap_or_default()
}
