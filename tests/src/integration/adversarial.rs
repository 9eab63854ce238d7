//! # Adversarial Submissions
//!
//! Replayed blocks, malleated signatures, tampered payloads and garbage
//! input. None of them may move the chain.

#[cfg(test)]
mod tests {
    use crate::fixtures::{nodes, TestNode};
    use sc_01_signature_verification::test_helpers::invert_s;
    use sc_01_signature_verification::EcdsaSignature;
    use sc_02_node_registry::NodeRegistry;
    use sc_04_block_validation::{BlockValidator, ValidationConfig};
    use shared_types::{ChainError, ChainState, PayloadFault, MAIN_CHAIN};

    fn chain(main: &[TestNode]) -> BlockValidator {
        let registry = NodeRegistry::new(main.iter().map(|n| n.address)).unwrap();
        BlockValidator::new(MAIN_CHAIN, registry, ValidationConfig::for_testing())
    }

    #[test]
    fn test_replayed_block_rejected() {
        let main = nodes(2);
        let chain = chain(&main);
        let sig = main[0].sign(b"transfer");

        chain.submit(b"transfer", &sig, 1).unwrap();
        let after_first = chain.state();

        // Same bytes, same signature, next id: the chain accepts it as a new
        // block because the digest binds the payload only.
        assert!(chain.submit(b"transfer", &sig, 2).is_ok());

        // Same id again is always refused.
        assert!(matches!(
            chain.submit(b"transfer", &sig, 2),
            Err(ChainError::StaleOrFutureBlock { .. })
        ));
        assert_ne!(chain.state(), after_first);
        assert_eq!(chain.current_block_id(), 2);
    }

    #[test]
    fn test_malleated_signature_rejected() {
        let main = nodes(1);
        let chain = chain(&main);

        let original = EcdsaSignature::from_bytes(&main[0].sign(b"block")).unwrap();
        let malleated = EcdsaSignature {
            r: original.r,
            s: invert_s(&original.s),
            v: if original.v == 27 { 28 } else { 27 },
        };

        let err = chain.submit(b"block", &malleated.to_bytes(), 1).unwrap_err();
        assert_eq!(err.kind(), "invalid_signature_format");
        assert_eq!(chain.state(), ChainState::genesis());
    }

    #[test]
    fn test_tampered_payload_not_attributed_to_member() {
        let main = nodes(3);
        let chain = chain(&main);
        let sig = main[1].sign(b"pay alice 10");

        let result = chain.submit(b"pay mallory 10", &sig, 1);
        assert!(result.is_err());
        assert_ne!(result.unwrap_err(), ChainError::Unauthorized(main[1].address));
        assert_eq!(chain.current_block_id(), 0);
    }

    #[test]
    fn test_garbage_signatures() {
        let main = nodes(1);
        let chain = chain(&main);

        let mut bad_v = main[0].sign(b"x");
        bad_v[64] = 5;

        for sig in [vec![], vec![0u8; 65], vec![0xffu8; 65], vec![1u8; 66], bad_v] {
            let err = chain.submit(b"x", &sig, 1).unwrap_err();
            assert!(
                matches!(
                    err,
                    ChainError::InvalidSignatureFormat(_) | ChainError::Unauthorized(_)
                ),
                "unexpected {err:?}"
            );
        }
        assert_eq!(chain.state(), ChainState::genesis());
    }

    #[test]
    fn test_payload_bounds() {
        let main = nodes(1);
        let chain = chain(&main);
        let limit = ValidationConfig::for_testing().max_payload_bytes;

        assert_eq!(
            chain.submit(b"", &main[0].sign(b""), 1),
            Err(ChainError::InvalidPayload(PayloadFault::Empty))
        );

        let big = vec![7u8; limit + 1];
        assert_eq!(
            chain.submit(&big, &main[0].sign(&big), 1),
            Err(ChainError::InvalidPayload(PayloadFault::TooLarge {
                size: limit + 1,
                max: limit
            }))
        );

        let exact = vec![7u8; limit];
        assert!(chain.submit(&exact, &main[0].sign(&exact), 1).is_ok());
    }

    #[test]
    fn test_outsider_rejected_before_sequencing() {
        let main = nodes(1);
        let chain = chain(&main);
        let outsider = TestNode::new(77);

        // A future id from an outsider reports the authorization failure.
        assert_eq!(
            chain.submit(b"x", &outsider.sign(b"x"), 99),
            Err(ChainError::Unauthorized(outsider.address))
        );
    }
}
