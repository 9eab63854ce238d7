//! # Main Chain Flow (v1)
//!
//! Five main nodes fixed at deployment take turns submitting blocks; an
//! auditor replays the payloads and must arrive at the same hash.

#[cfg(test)]
mod tests {
    use crate::fixtures::{nodes, TestNode};
    use sc_02_node_registry::NodeRegistry;
    use sc_03_hash_chain::{chain_step, replay, sha256};
    use sc_04_block_validation::{BlockValidator, ValidationConfig};
    use shared_types::{ChainError, ChainState, GENESIS_HASH, MAIN_CHAIN};

    fn deploy(main: &[TestNode]) -> BlockValidator {
        let registry = NodeRegistry::new(main.iter().map(|n| n.address)).unwrap();
        BlockValidator::new(MAIN_CHAIN, registry, ValidationConfig::default())
    }

    #[test]
    fn test_deploys_with_five_main_nodes() {
        let main = nodes(5);
        let chain = deploy(&main);

        assert_eq!(chain.node_count(), 5);
        for (i, node) in main.iter().enumerate() {
            assert_eq!(chain.get_node(i), Ok(node.address));
        }
        assert_eq!(chain.state(), ChainState::genesis());
    }

    #[test]
    fn test_round_robin_blocks_replay() {
        let main = nodes(5);
        let chain = deploy(&main);
        let mut payloads = Vec::new();

        for id in 1..=20u64 {
            let node = &main[(id as usize) % main.len()];
            let payload = format!("block-{id:04}-{}", hex::encode(node.address)).into_bytes();
            let accepted = chain.submit(&payload, &node.sign(&payload), id).unwrap();
            assert_eq!(accepted.signer, node.address);
            payloads.push(payload);
        }

        assert_eq!(chain.current_block_id(), 20);
        assert_eq!(replay(GENESIS_HASH, &payloads), chain.current_hash());
        assert_eq!(chain.audit(&payloads), None);

        // Every recorded hash matches a step-by-step recomputation.
        let mut hash = GENESIS_HASH;
        for (record, payload) in chain.blocks(1, 21).iter().zip(&payloads) {
            hash = chain_step(&hash, payload);
            assert_eq!(record.chain_hash, hash);
            assert_eq!(record.payload_hash, sha256(payload));
        }
    }

    #[test]
    fn test_outsider_cannot_submit() {
        let main = nodes(5);
        let chain = deploy(&main);
        let outsider = TestNode::new(42);

        assert_eq!(
            chain.submit(b"deadbeef", &outsider.sign(b"deadbeef"), 1),
            Err(ChainError::Unauthorized(outsider.address))
        );
        assert_eq!(chain.current_block_id(), 0);
    }

    #[test]
    fn test_main_node_adds_member() {
        let main = nodes(5);
        let chain = deploy(&main);
        let newcomer = TestNode::random();

        assert_eq!(chain.add_node(main[0].address, newcomer.address), Ok(5));
        assert!(chain.is_member(&newcomer.address));
        assert!(chain
            .submit(b"from newcomer", &newcomer.sign(b"from newcomer"), 1)
            .is_ok());
    }

    #[test]
    fn test_stale_block_leaves_state() {
        let main = nodes(2);
        let chain = deploy(&main);
        chain.submit(b"a", &main[0].sign(b"a"), 1).unwrap();
        chain.submit(b"b", &main[1].sign(b"b"), 2).unwrap();
        let before = chain.state();

        for claimed in [0, 1, 2, 4, u64::MAX] {
            assert!(matches!(
                chain.submit(b"c", &main[0].sign(b"c"), claimed),
                Err(ChainError::StaleOrFutureBlock { expected: 3, .. })
            ));
        }
        assert_eq!(chain.state(), before);
    }
}
