//! EIP-7702 delegation designator

use crate::Address;

/// Code written to an EOA's code slot by an EIP-7702 authorization:
/// `0xef0100 || delegate`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DelegationDesignator(pub Address);

impl DelegationDesignator {
    /// Designator prefix
    pub const PREFIX: [u8; 3] = [0xef, 0x01, 0x00];

    /// Encoded length (prefix + address)
    pub const LEN: usize = 23;

    /// Delegate address
    pub fn delegate(&self) -> Address {
        self.0
    }

    /// Encode as account code
    pub fn to_code(&self) -> [u8; 23] {
        let mut code = [0u8; 23];
        code[..3].copy_from_slice(&Self::PREFIX);
        code[3..].copy_from_slice(self.0.as_bytes());
        code
    }

    /// Parse account code. Anything other than exactly a designator
    /// (empty code, regular contract bytecode) yields `None`.
    pub fn from_code(code: &[u8]) -> Option<Self> {
        if code.len() != Self::LEN || code[..3] != Self::PREFIX {
            return None;
        }
        Address::from_slice(&code[3..]).ok().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designator_code() {
        let delegate = Address::from_bytes([0x42; 20]);
        let code = DelegationDesignator(delegate).to_code();
        assert_eq!(&code[..3], &[0xef, 0x01, 0x00]);
        assert_eq!(DelegationDesignator::from_code(&code), Some(DelegationDesignator(delegate)));
    }

    #[test]
    fn test_regular_code_is_not_designator() {
        assert_eq!(DelegationDesignator::from_code(&[]), None);
        assert_eq!(DelegationDesignator::from_code(&[0x60, 0x80, 0x60, 0x40]), None);

        let mut code = DelegationDesignator(Address::ZERO).to_code().to_vec();
        code.push(0x00);
        assert_eq!(DelegationDesignator::from_code(&code), None);

        let mut wrong_prefix = DelegationDesignator(Address::ZERO).to_code();
        wrong_prefix[2] = 0x01;
        assert_eq!(DelegationDesignator::from_code(&wrong_prefix), None);
    }
}
