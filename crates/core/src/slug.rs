//! Slug codec: stable, URL-safe per-job identifiers.
//!
//! A slug is the normalized job title followed by a truncated hex digest of
//! the job's canonical source URL, hyphen-separated. The trailing segment
//! (the "hash suffix") doubles as the job cache key.

use sha2::{Digest, Sha256};

/// Length of the hex digest appended to every slug.
const HASH_LEN: usize = 10;

/// Placeholder token used when a title normalizes to nothing.
const EMPTY_TITLE_TOKEN: &str = "job";

/// Derive a slug from a job title and its canonical source URL.
///
/// The same (title, url) pair always yields the same slug. Different URLs
/// overwhelmingly yield different suffixes, though the 10-hex-char
/// truncation (~40 bits) makes collisions possible in principle.
pub fn make_slug(title: &str, url: &str) -> String {
    let token = slugify(title);
    let token = if token.is_empty() { EMPTY_TITLE_TOKEN } else { token.as_str() };
    format!("{token}-{}", url_digest(url))
}

/// Return the hash suffix of a slug: everything after the final hyphen.
///
/// No validation is performed; any malformed slug's trailing segment is
/// accepted as a lookup key, and a slug without hyphens is returned whole.
pub fn extract_hash(slug: &str) -> &str {
    match slug.rfind('-') {
        Some(idx) => &slug[idx + 1..],
        None => slug,
    }
}

/// Lowercase and transliterate a title into a hyphenated alphanumeric token.
///
/// Non-word characters are stripped; whitespace, underscore and hyphen runs
/// collapse to a single hyphen; leading and trailing hyphens are trimmed.
fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut gap = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(c);
        } else {
            let folded = fold(c);
            if folded.is_empty() {
                // Separators break the word; other punctuation is dropped in place.
                if c.is_whitespace() || c == '_' || c == '-' {
                    gap = true;
                }
            } else {
                if gap && !out.is_empty() {
                    out.push('-');
                }
                gap = false;
                out.push_str(folded);
            }
        }
    }
    out
}

/// ASCII fold for the accented characters common in job titles.
fn fold(c: char) -> &'static str {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        _ => "",
    }
}

/// First [`HASH_LEN`] hex characters of the SHA-256 digest of the URL.
fn url_digest(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..HASH_LEN].to_string()
}
