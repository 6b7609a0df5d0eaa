//! Property tests: create→get roundtrip, usage monotonicity, search liveness.

use chrono::Utc;
use proptest::prelude::*;

use lore_core::traits::ILearningStore;
use lore_core::Learning;
use lore_storage::StorageEngine;

proptest! {
    #[test]
    fn prop_create_get_roundtrip(
        content in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,99}",
        keywords in prop::collection::vec("[a-z]{1,8}", 0..5),
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let learning = Learning::new(content.clone()).with_keywords(keywords);
        engine.create(&learning).unwrap();
        let got = engine.get(&learning.id).unwrap().unwrap();
        prop_assert_eq!(got.content, content);
        prop_assert_eq!(got.keywords, learning.keywords);
    }

    #[test]
    fn prop_usage_count_never_decreases(rounds in prop::collection::vec(0usize..3, 1..10)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let ids: Vec<String> = (0..3).map(|i| format!("L{i}")).collect();
        for id in &ids {
            engine.create(&Learning::new(format!("fact {id}")).with_id(id.clone())).unwrap();
        }
        let mut last = vec![0u64; 3];
        for pick in rounds {
            engine.record_usage(&ids[pick..pick + 1], Utc::now()).unwrap();
            for (i, id) in ids.iter().enumerate() {
                let count = engine.get(id).unwrap().unwrap().usage_count;
                prop_assert!(count >= last[i]);
                last[i] = count;
            }
        }
    }

    #[test]
    fn prop_search_never_returns_hidden(flags in prop::collection::vec((any::<bool>(), any::<bool>()), 1..8)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        for (i, (active, deleted)) in flags.iter().enumerate() {
            let id = format!("L{i}");
            engine.create(&Learning::new("common needle").with_id(id.clone())).unwrap();
            if !active {
                engine.set_active(&id, false).unwrap();
            }
            if *deleted {
                engine.soft_delete(&id).unwrap();
            }
        }
        let hits = engine.lexical_search("needle", 100).unwrap();
        let visible = flags.iter().filter(|(a, d)| *a && !*d).count();
        prop_assert_eq!(hits.len(), visible);
        for (i, hit) in hits.iter().enumerate() {
            prop_assert_eq!(hit.rank, i + 1);
        }
    }
}
