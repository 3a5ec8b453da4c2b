//! Access codes for anonymous report tracking.
//!
//! 12 symbols from a 32-letter alphabet (60 bits). Look-alike characters
//! (0/O, 1/I) are excluded so codes survive being read aloud or copied by hand.

use rand::Rng;

const ALPHABET: &[u8; 32] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Length of a generated access code.
pub const ACCESS_CODE_LEN: usize = 12;

/// Generate a fresh access code from the thread-local CSPRNG.
pub fn generate() -> String {
    let mut rng = rand::rng();
    (0..ACCESS_CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_length_and_alphabet() {
        let code = generate();
        assert_eq!(code.len(), ACCESS_CODE_LEN);
        assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_is_not_repetitive() {
        let codes: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(codes.len(), 1000);
    }
}
