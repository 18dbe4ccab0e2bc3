use rand::Rng;

/// Alphabet for room codes. 32 symbols; visually confusable glyphs
/// (0/O, 1/I) are excluded so codes survive being read off a screen
/// and typed on a phone.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Draws each character independently and uniformly from [`CODE_ALPHABET`].
/// Makes no uniqueness guarantee; collision checks against active rooms are
/// the registry's job.
pub fn generate_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
