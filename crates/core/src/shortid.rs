//! Short-string identifier and slug generation.
//!
//! Invitation uids and board slug disambiguators are short random strings,
//! collision-free within practical volume. Randomness is sourced from a v4
//! UUID so no dedicated RNG dependency is needed.

use uuid::Uuid;

/// Alphabet without visually ambiguous characters (0/O, 1/I/l).
const ALPHABET: &[u8] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz";

/// Generate a random short identifier of `len` characters.
pub fn short_uid(len: usize) -> String {
    let mut out = String::with_capacity(len);
    let mut bytes = Vec::new();
    while bytes.len() < len {
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    }
    for b in bytes.into_iter().take(len) {
        out.push(ALPHABET[b as usize % ALPHABET.len()] as char);
    }
    out
}

/// Turn a title into a URL-safe slug: lowercase alphanumerics separated by
/// single hyphens, everything else dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
    }
    slug
}

/// Slug plus a random disambiguator, e.g. `"roadmap-Qf3kPd"`.
///
/// Generated once at creation time and never regenerated, so URLs stay stable.
pub fn slug_with_suffix(title: &str, suffix_len: usize) -> String {
    format!("{}-{}", slugify(title), short_uid(suffix_len))
}
