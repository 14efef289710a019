use anyhow::anyhow;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "hmac-sha256";
const SALT_LEN: usize = 16;

/// Encodes as `hmac-sha256$<salt hex>$<mac hex>` with a fresh random salt as the key.
pub fn encode(raw: &str) -> anyhow::Result<String> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill(&mut salt);
    let mac = keyed(&salt, raw).ok_or_else(|| anyhow!("hmac rejected a {SALT_LEN} byte key"))?;
    Ok(format!(
        "{SCHEME}${}${}",
        hex::encode(salt),
        hex::encode(mac.finalize().into_bytes())
    ))
}

pub fn matches(raw: &str, encoded: &str) -> bool {
    let mut parts = encoded.splitn(3, '$');
    let (Some(SCHEME), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt), hex::decode(expected)) else {
        return false;
    };
    let Some(mac) = keyed(&salt, raw) else {
        return false;
    };
    // constant time
    mac.verify_slice(&expected).is_ok()
}

fn keyed(salt: &[u8], raw: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(salt).ok()?;
    mac.update(raw.as_bytes());
    Some(mac)
}
