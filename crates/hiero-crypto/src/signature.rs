//! secp256k1 signing material
//!
//! Schedule signatures and HIP-632 authorization checks both consume a
//! 65-byte `r || s || v` blob over a Keccak-256 digest; this module produces
//! and checks those blobs.

use hiero_primitives::{Address, ScheduleId, H256};
use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};

use crate::{keccak256, CryptoError};

/// Public key
pub type PublicKey = VerifyingKey;

/// Private key
pub type PrivateKey = SigningKey;

/// Recoverable ECDSA signature
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// r component
    pub r: [u8; 32],
    /// s component (always low-s)
    pub s: [u8; 32],
    /// 27 or 28
    pub v: u8,
}

impl Signature {
    /// Recovery id (0 or 1)
    pub fn recovery_id(&self) -> u8 {
        if self.v >= 27 {
            self.v - 27
        } else {
            self.v
        }
    }

    /// `r || s || v`
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }

    /// Parse `r || s || v`
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self { r, s, v: bytes[64] }
    }
}

/// Parse a hex-encoded private key (with or without 0x prefix)
pub fn parse_private_key(s: &str) -> Result<PrivateKey, CryptoError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
    SigningKey::from_slice(&bytes).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))
}

/// Sign a 32-byte digest. The result is normalized to low-s.
pub fn sign_prehash(digest: &H256, key: &PrivateKey) -> Result<Signature, CryptoError> {
    let (mut signature, mut recovery_id) = key
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
        recovery_id = RecoveryId::from_byte(recovery_id.to_byte() ^ 1)
            .ok_or_else(|| CryptoError::SigningFailed("recovery id out of range".to_string()))?;
    }

    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);

    Ok(Signature {
        r,
        s,
        v: recovery_id.to_byte() + 27,
    })
}

/// Recover the signer's address from a digest and signature
pub fn recover_address(digest: &H256, signature: &Signature) -> Result<Address, CryptoError> {
    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(&signature.r);
    rs[32..].copy_from_slice(&signature.s);
    let sig = K256Signature::from_slice(&rs)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;

    let recovery_id = RecoveryId::from_byte(signature.recovery_id())
        .ok_or(CryptoError::InvalidRecoveryId(signature.v))?;

    let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    Ok(public_key_to_address(&key))
}

/// EVM address of a public key: last 20 bytes of keccak(uncompressed x || y)
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(bytes)
}

/// Digest signed when authorizing a schedule: keccak256 of the packed
/// 24-byte schedule id.
pub fn schedule_digest(schedule_id: &ScheduleId) -> H256 {
    keccak256(&schedule_id.to_bytes())
}

/// Sign a schedule id
pub fn sign_schedule(key: &PrivateKey, schedule_id: &ScheduleId) -> Result<Signature, CryptoError> {
    sign_prehash(&schedule_digest(schedule_id), key)
}

/// 65-byte signature blob over `keccak256(message)`, as passed to the
/// account service's `isAuthorizedRaw`.
pub fn authorization_blob(key: &PrivateKey, message: &[u8]) -> Result<[u8; 65], CryptoError> {
    sign_prehash(&keccak256(message), key).map(|sig| sig.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    // Hardhat / anvil account #0
    const KNOWN_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_known_key_address() {
        let key = parse_private_key(KNOWN_KEY).unwrap();
        assert_eq!(
            public_key_to_address(key.verifying_key()).to_hex(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_sign_and_recover() {
        let key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"hip-632");
        let sig = sign_prehash(&digest, &key).unwrap();
        assert!(sig.v == 27 || sig.v == 28);
        assert_eq!(
            recover_address(&digest, &sig).unwrap(),
            public_key_to_address(key.verifying_key())
        );
    }

    #[test]
    fn test_schedule_signature_recovers_signer() {
        let key = parse_private_key(&format!("0x{}", KNOWN_KEY)).unwrap();
        let id = ScheduleId::new(0, 0, 1002);
        let sig = sign_schedule(&key, &id).unwrap();
        assert_eq!(
            recover_address(&schedule_digest(&id), &sig).unwrap().to_hex(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_schedule_digest_depends_on_every_field() {
        let base = schedule_digest(&ScheduleId::new(0, 0, 1002));
        assert_ne!(base, schedule_digest(&ScheduleId::new(1, 0, 1002)));
        assert_ne!(base, schedule_digest(&ScheduleId::new(0, 1, 1002)));
        assert_ne!(base, schedule_digest(&ScheduleId::new(0, 0, 1003)));
    }

    #[test]
    fn test_authorization_blob_layout() {
        let key = SigningKey::random(&mut OsRng);
        let blob = authorization_blob(&key, b"message").unwrap();
        let sig = Signature::from_bytes(&blob);
        assert_eq!(sig.to_bytes(), blob);
        assert_eq!(
            recover_address(&keccak256(b"message"), &sig).unwrap(),
            public_key_to_address(key.verifying_key())
        );
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(parse_private_key("0x1234").is_err());
        assert!(parse_private_key("zz").is_err());
    }
}
