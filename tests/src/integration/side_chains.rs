//! # Side Chain Flow (v2)
//!
//! The deployer is the only initial node. It adds a second main node, then
//! creates a side chain for two other accounts.

#[cfg(test)]
mod tests {
    use crate::fixtures::TestNode;
    use sc_02_node_registry::NodeRegistry;
    use sc_03_hash_chain::replay;
    use sc_04_block_validation::ValidationConfig;
    use sc_05_sharding::{ShardManager, ShardingApi};
    use shared_bus::InMemoryEventBus;
    use shared_types::{ChainError, GENESIS_HASH, MAIN_CHAIN};
    use std::sync::Arc;

    struct Deployment {
        admin: TestNode,
        manager: ShardManager<InMemoryEventBus>,
    }

    fn deploy() -> Deployment {
        let admin = TestNode::new(1);
        let registry = NodeRegistry::with_admin(admin.address, [admin.address]).unwrap();
        let manager = ShardManager::new(
            registry,
            ValidationConfig::default(),
            Arc::new(InMemoryEventBus::new()),
        );
        Deployment { admin, manager }
    }

    #[tokio::test]
    async fn test_initializes_with_admin() {
        let d = deploy();
        let main = d.manager.main_chain().unwrap();

        assert_eq!(main.node_count(), 1);
        assert_eq!(main.get_node(0), Ok(d.admin.address));
    }

    #[tokio::test]
    async fn test_add_main_node() {
        let d = deploy();
        let second = TestNode::new(2);

        d.manager
            .add_node(MAIN_CHAIN, d.admin.address, second.address)
            .await
            .unwrap();
        assert_eq!(d.manager.main_chain().unwrap().node_count(), 2);
    }

    #[tokio::test]
    async fn test_add_side_chain_and_submit() {
        let d = deploy();
        let (a2, a3) = (TestNode::new(2), TestNode::new(3));

        let shard = d
            .manager
            .add_side_chain(d.admin.address, vec![a2.address, a3.address], vec![6001, 6002])
            .await
            .unwrap();

        assert_eq!(d.manager.current_hash(shard), Ok(GENESIS_HASH));
        assert_eq!(d.manager.block_id(shard), Ok(0));

        let payloads: Vec<Vec<u8>> = (1..=6u8).map(|i| vec![0xde, 0xad, i]).collect();
        for (i, payload) in payloads.iter().enumerate() {
            let signer = if i % 2 == 0 { &a2 } else { &a3 };
            d.manager
                .route(shard, payload, &signer.sign(payload), i as u64 + 1)
                .await
                .unwrap();
        }

        assert_eq!(d.manager.block_id(shard), Ok(6));
        assert_eq!(
            d.manager.current_hash(shard),
            Ok(replay(GENESIS_HASH, &payloads))
        );
        assert_eq!(d.manager.main_block_id(), Ok(0));
        assert_eq!(d.manager.main_current_hash(), Ok(GENESIS_HASH));

        let info = d.manager.side_chain_info(shard).unwrap();
        assert_eq!(info.metadata, vec![6001, 6002]);
        assert_eq!(info.state.block_id, 6);
        assert_eq!(
            d.manager.validator(shard).unwrap().audit(&payloads),
            None
        );
    }

    #[tokio::test]
    async fn test_shards_have_separate_sequences() {
        let d = deploy();
        let member = TestNode::new(2);
        let shard = d
            .manager
            .add_side_chain(d.admin.address, vec![member.address], vec![])
            .await
            .unwrap();

        d.manager
            .submit_main(b"m1", &d.admin.sign(b"m1"), 1)
            .await
            .unwrap();
        d.manager
            .submit_main(b"m2", &d.admin.sign(b"m2"), 2)
            .await
            .unwrap();

        // The side chain still expects block 1.
        assert!(matches!(
            d.manager.route(shard, b"s", &member.sign(b"s"), 3).await,
            Err(ChainError::StaleOrFutureBlock {
                expected: 1,
                claimed: 3
            })
        ));
        assert!(d
            .manager
            .route(shard, b"s", &member.sign(b"s"), 1)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_added_main_node_may_create_side_chain() {
        let d = deploy();
        let second = TestNode::new(2);
        let outsider = TestNode::new(9);

        assert_eq!(
            d.manager
                .add_side_chain(second.address, vec![outsider.address], vec![])
                .await,
            Err(ChainError::Unauthorized(second.address))
        );

        d.manager
            .add_node(MAIN_CHAIN, d.admin.address, second.address)
            .await
            .unwrap();
        assert_eq!(
            d.manager
                .add_side_chain(second.address, vec![outsider.address], vec![])
                .await,
            Ok(1)
        );
        assert_eq!(d.manager.shard_ids(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_unknown_shard_routing() {
        let d = deploy();
        assert_eq!(
            d.manager.route(3, b"x", &d.admin.sign(b"x"), 1).await,
            Err(ChainError::UnknownShard(3))
        );
        assert_eq!(d.manager.snapshot(3), Err(ChainError::UnknownShard(3)));
    }
}
