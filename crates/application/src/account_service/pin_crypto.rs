use rand::Rng;

use servir_domain::PIN_LENGTH;

/// Generates a random PIN of [`PIN_LENGTH`] digits, leading zeros included.
pub(super) fn generate_pin() -> String {
    let value: u32 = rand::thread_rng().gen_range(0..10_u32.pow(PIN_LENGTH as u32));
    format!("{value:0width$}", width = PIN_LENGTH)
}

/// Computes the SHA-256 hash of a PIN for storage and lookup.
pub(super) fn hash_pin(pin: &str) -> String {
    use sha2::{Digest, Sha256};
    use std::fmt::Write;

    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    let result = hasher.finalize();

    result
        .iter()
        .fold(String::with_capacity(64), |mut acc, byte| {
            let _ = write!(acc, "{byte:02x}");
            acc
        })
}
