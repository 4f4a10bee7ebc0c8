//! Object keys and public URLs for uploaded cat photos.
//!
//! Keys look like `<prefix>/<token><extension>`, where `token` is six hex
//! characters of a random UUID and `extension` is the original filename's
//! suffix starting at the last `.`. The public URL is a plain concatenation
//! of the storage base URL, the bucket name, and the key.

use uuid::Uuid;

/// Number of hex characters in the random part of a key.
pub const TOKEN_LENGTH: usize = 6;

/// Maximum stored URL length (`photos.url` column width).
pub const MAX_URL_LENGTH: usize = 200;

/// Return the suffix of `filename` starting at its last `.`, or `""`.
///
/// A dot that belongs to a directory component does not count.
///
/// ```
/// use catcollector_core::photos::file_extension;
///
/// assert_eq!(file_extension("franklin.png"), ".png");
/// assert_eq!(file_extension("archive.tar.gz"), ".gz");
/// assert_eq!(file_extension("README"), "");
/// assert_eq!(file_extension("photos.v2/scan"), "");
/// ```
pub fn file_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if !filename[idx..].contains(['/', '\\']) => &filename[idx..],
        _ => "",
    }
}

/// A short random token for a new object key.
pub fn random_token() -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(TOKEN_LENGTH);
    hex
}

/// Build an object key from a prefix, token, and original filename.
pub fn build_key(prefix: &str, token: &str, filename: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    format!("{prefix}/{token}{}", file_extension(filename))
}

/// Build a fresh random object key for an uploaded file.
pub fn new_photo_key(prefix: &str, filename: &str) -> String {
    build_key(prefix, &random_token(), filename)
}

/// The public URL of an object: `<base_url><bucket>/<key>`.
pub fn public_url(base_url: &str, bucket: &str, key: &str) -> String {
    format!("{base_url}{bucket}/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_keeps_extension() {
        let key = build_key("catcollector", "a1b2c3", "franklin.png");
        assert_eq!(key, "catcollector/a1b2c3.png");
    }

    #[test]
    fn key_without_extension() {
        assert_eq!(build_key("catcollector/", "a1b2c3", "scan"), "catcollector/a1b2c3");
    }

    #[test]
    fn random_keys_have_expected_shape() {
        let key = new_photo_key("catcollector", "franklin.jpeg");
        let rest = key.strip_prefix("catcollector/").unwrap();
        let token = rest.strip_suffix(".jpeg").unwrap();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn random_tokens_differ() {
        assert_ne!(random_token(), random_token());
    }

    #[test]
    fn url_is_concatenation() {
        assert_eq!(
            public_url("https://s3.us-east-2.amazonaws.com/", "cats", "catcollector/abc123.png"),
            "https://s3.us-east-2.amazonaws.com/cats/catcollector/abc123.png"
        );
    }
}
