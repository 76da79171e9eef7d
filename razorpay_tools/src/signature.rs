//! Payment signature verification.
//!
//! After a checkout completes, the gateway hands the client a signature binding the gateway order id to the
//! payment id:
//!
//! ```text
//!     signature = hex( HMAC-SHA256( key_secret, "{order_id}|{payment_id}" ) )
//! ```
//!
//! The store recomputes the signature from its own copy of the secret and compares it to the one the client
//! submitted. The comparison runs in constant time and the expected value is never logged or echoed back, so a
//! mismatching caller learns nothing beyond "invalid".

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded payment signature for the given order and payment ids.
pub fn payment_signature(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Recomputes the signature and compares it to the claimed one in constant time.
pub fn verify_payment_signature(key_secret: &str, order_id: &str, payment_id: &str, claimed: &str) -> bool {
    let expected = payment_signature(key_secret, order_id, payment_id);
    constant_time_eq(&expected, claimed)
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut res = 0u8;
    for (x, y) in a.as_bytes().iter().zip(b.as_bytes()) {
        res |= x ^ y;
    }
    res == 0
}
