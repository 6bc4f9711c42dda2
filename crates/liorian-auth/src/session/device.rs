//! Device session ids.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;

const RANDOM_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 9;
const USER_AGENT_PREFIX: usize = 50;

/// Build the id stamped into a window at login:
/// base64 of `"{timestamp_ms}-{random}-{first 50 chars of the user agent}"`.
pub fn generate_device_session_id(now_ms: i64, user_agent: &str) -> String {
    let mut rng = rand::thread_rng();
    let random: String = (0..RANDOM_LEN)
        .map(|_| RANDOM_ALPHABET[rng.gen_range(0..RANDOM_ALPHABET.len())] as char)
        .collect();
    let agent: String = user_agent.chars().take(USER_AGENT_PREFIX).collect();
    STANDARD.encode(format!("{now_ms}-{random}-{agent}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120";
        let id = generate_device_session_id(1_700_000_000_000, ua);
        let decoded = String::from_utf8(STANDARD.decode(&id).unwrap()).unwrap();

        let mut parts = decoded.splitn(3, '-');
        assert_eq!(parts.next(), Some("1700000000000"));
        let random = parts.next().unwrap();
        assert_eq!(random.len(), RANDOM_LEN);
        assert_eq!(parts.next().unwrap(), &ua[..50]);
    }

    #[test]
    fn test_ids_differ_within_one_millisecond() {
        let a = generate_device_session_id(1, "agent");
        let b = generate_device_session_id(1, "agent");
        assert_ne!(a, b);
    }
}
