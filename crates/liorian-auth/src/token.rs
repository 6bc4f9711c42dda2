//! Opaque token generation.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Generate a random alphanumeric token of `length` characters.
pub fn generate_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
