//! # Ethereum Signed-Message Digests
//!
//! Nodes that sign through `eth_sign` sign
//! `keccak256("\x19Ethereum Signed Message:\n32" || keccak256(payload))`
//! and ship the signature as a hex string with `v` in 27/28.

#[cfg(test)]
mod tests {
    use crate::fixtures::TestNode;
    use sc_01_signature_verification::{
        block_digest, eth_signed_message_hash, keccak256, recover_signer, DigestScheme,
        EcdsaSignature, SignatureVerificationApi, SignatureVerificationService,
    };
    use sc_02_node_registry::NodeRegistry;
    use sc_04_block_validation::{BlockValidator, ValidationConfig};
    use shared_types::MAIN_CHAIN;

    fn eth_chain(node: &TestNode) -> BlockValidator {
        let config = ValidationConfig {
            digest_scheme: DigestScheme::EthSignedMessage,
            ..ValidationConfig::default()
        };
        BlockValidator::new(MAIN_CHAIN, NodeRegistry::new([node.address]).unwrap(), config)
    }

    #[test]
    fn test_recover_signer_deadbeef() {
        let node = TestNode::new(1);
        let signature = node.sign_with(b"deadbeef", DigestScheme::EthSignedMessage);

        let digest = eth_signed_message_hash(&keccak256(b"deadbeef"));
        assert_eq!(digest, block_digest(b"deadbeef", DigestScheme::EthSignedMessage));
        assert_eq!(recover_signer(&digest, &signature), Ok(node.address));
    }

    #[test]
    fn test_hex_encoded_signature_accepted() {
        let node = TestNode::new(2);
        let chain = eth_chain(&node);
        let payload = b"0123456789abcdef0123456789abcdef";

        let hex_sig = format!(
            "0x{}",
            hex::encode(node.sign_with(payload, DigestScheme::EthSignedMessage))
        );
        let signature = EcdsaSignature::from_hex(&hex_sig).unwrap();
        assert!(signature.v == 27 || signature.v == 28);

        let accepted = chain.submit(payload, &signature.to_bytes(), 1).unwrap();
        assert_eq!(accepted.signer, node.address);
    }

    #[test]
    fn test_v_zero_one_equivalent() {
        let node = TestNode::new(3);
        let service = SignatureVerificationService::new(DigestScheme::EthSignedMessage);
        let digest = service.digest(b"payload");

        let mut signature = node.sign_with(b"payload", DigestScheme::EthSignedMessage);
        signature[64] -= 27;
        assert_eq!(service.recover_signer(&digest, &signature), Ok(node.address));
    }

    #[test]
    fn test_plain_keccak_signature_rejected_by_eth_chain() {
        let node = TestNode::new(4);
        let chain = eth_chain(&node);

        let plain = node.sign_with(b"payload", DigestScheme::Keccak256);
        assert!(chain.submit(b"payload", &plain, 1).is_err());
        assert_eq!(chain.current_block_id(), 0);
    }
}
