//! Selectors and topics used by the HTS ERC facades

use hiero_crypto::{event_topic, function_selector, keccak256};

#[test]
fn test_selector_is_topic_prefix() {
    for signature in ["approve(address,uint256)", "Transfer(address,address,uint256)"] {
        let topic = event_topic(signature);
        assert_eq!(topic, keccak256(signature.as_bytes()));
        assert_eq!(function_selector(signature)[..], topic.as_bytes()[..4]);
    }
}

#[test]
fn test_erc_facade_selectors() {
    assert_eq!(function_selector("approve(address,uint256)"), [0x09, 0x5e, 0xa7, 0xb3]);
    assert_eq!(
        function_selector("transferFrom(address,address,uint256)"),
        [0x23, 0xb8, 0x72, 0xdd]
    );
    assert_eq!(function_selector("totalSupply()"), [0x18, 0x16, 0x0d, 0xdd]);
}
