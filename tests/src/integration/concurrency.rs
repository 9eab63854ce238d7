//! # Concurrency
//!
//! Several nodes racing for the same block id: exactly one wins and the
//! chain stays a single line.

#[cfg(test)]
mod tests {
    use crate::fixtures::{nodes, TestNode};
    use sc_02_node_registry::NodeRegistry;
    use sc_04_block_validation::{BlockValidator, ValidationConfig};
    use sc_05_sharding::{ShardManager, ShardingApi};
    use shared_bus::InMemoryEventBus;
    use shared_types::{ChainError, MAIN_CHAIN};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_racing_submissions_single_winner_per_height() {
        let main = Arc::new(nodes(8));
        let registry = NodeRegistry::new(main.iter().map(|n| n.address)).unwrap();
        let chain = Arc::new(BlockValidator::new(
            MAIN_CHAIN,
            registry,
            ValidationConfig::default(),
        ));

        for height in 1..=5u64 {
            let handles: Vec<_> = (0..main.len())
                .map(|i| {
                    let chain = Arc::clone(&chain);
                    let main = Arc::clone(&main);
                    thread::spawn(move || {
                        let payload = format!("h{height}-n{i}").into_bytes();
                        chain.submit(&payload, &main[i].sign(&payload), height)
                    })
                })
                .collect();

            let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
            assert_eq!(winners.len(), 1, "height {height}");
            assert_eq!(winners[0].block_id, height);

            for err in results.iter().filter_map(|r| r.as_ref().err()) {
                assert_eq!(
                    *err,
                    ChainError::StaleOrFutureBlock {
                        expected: height + 1,
                        claimed: height
                    }
                );
            }
        }

        assert_eq!(chain.current_block_id(), 5);
        assert_eq!(chain.blocks(1, 6).len(), 5);
    }

    #[test]
    fn test_add_node_races_with_submission() {
        let founder = TestNode::new(1);
        let joiner = Arc::new(TestNode::new(2));
        let registry = NodeRegistry::new([founder.address]).unwrap();
        let chain = Arc::new(BlockValidator::new(
            MAIN_CHAIN,
            registry,
            ValidationConfig::default(),
        ));

        let submitter = {
            let chain = Arc::clone(&chain);
            let joiner = Arc::clone(&joiner);
            thread::spawn(move || chain.submit(b"join", &joiner.sign(b"join"), 1))
        };
        chain.add_node(founder.address, joiner.address).unwrap();

        // Either ordering is valid; the chain never half-applies.
        match submitter.join().unwrap() {
            Ok(accepted) => assert_eq!(chain.current_hash(), accepted.hash),
            Err(err) => {
                assert_eq!(err, ChainError::Unauthorized(joiner.address));
                assert_eq!(chain.current_block_id(), 0);
            }
        }
        assert!(chain.is_member(&joiner.address));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_side_chains_advance_independently() {
        let admin = TestNode::new(1);
        let registry = NodeRegistry::with_admin(admin.address, [admin.address]).unwrap();
        let manager = Arc::new(ShardManager::new(
            registry,
            ValidationConfig::default(),
            Arc::new(InMemoryEventBus::new()),
        ));

        let mut shards = Vec::new();
        for seed in 10..14u8 {
            let member = TestNode::new(seed);
            let shard = manager
                .add_side_chain(admin.address, vec![member.address], vec![seed as u64])
                .await
                .unwrap();
            shards.push((shard, member));
        }

        let tasks: Vec<_> = shards
            .into_iter()
            .map(|(shard, member)| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move {
                    for id in 1..=25u64 {
                        let payload = format!("shard{shard}-{id}").into_bytes();
                        manager
                            .route(shard, &payload, &member.sign(&payload), id)
                            .await
                            .unwrap();
                    }
                    shard
                })
            })
            .collect();

        for task in tasks {
            let shard = task.await.unwrap();
            assert_eq!(manager.block_id(shard), Ok(25));
        }
        assert_eq!(manager.main_block_id(), Ok(0));
        assert_eq!(manager.shard_count(), 5);
    }
}
