//! EIP-55 mixed-case address checksums

use hiero_primitives::Address;

use crate::keccak256;

/// Encode an address with EIP-55 mixed-case checksum
pub fn to_checksum(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());
    let hash = hash.as_bytes();

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> if i % 2 == 0 { 4 } else { 0 }) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// True when `s` parses as an address and is either single-case or a
/// correct EIP-55 checksum
pub fn is_checksum_valid(s: &str) -> bool {
    let Ok(address) = Address::from_hex(s) else {
        return false;
    };
    let body = s.strip_prefix("0x").unwrap_or(s);
    let all_lower = !body.chars().any(|c| c.is_ascii_uppercase());
    let all_upper = !body.chars().any(|c| c.is_ascii_lowercase());
    if all_lower || all_upper {
        return true;
    }
    to_checksum(&address)[2..] == *body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eip55_vectors() {
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let addr = Address::from_hex(expected).unwrap();
            assert_eq!(to_checksum(&addr), expected);
        }
    }

    #[test]
    fn test_checksum_validation() {
        assert!(is_checksum_valid("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(is_checksum_valid("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!is_checksum_valid("0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(!is_checksum_valid("0x1234"));
    }
}
