use std::collections::HashMap;

use eventual_map::collect::{collect, collect_reconciling};
use eventual_map::reconcile;
use eventual_map::EventualMap;
use futures::executor::block_on;
use futures::future::join_all;
use futures::stream;
use proptest::prelude::*;

fn first_values(entries: &[(u8, u16)]) -> HashMap<u8, u16> {
    collect_reconciling(entries.iter().copied(), reconcile::first::<u8, u16>())
}

fn arbitrary_entries(keys: u8) -> impl Strategy<Value = Vec<(u8, u16)>> {
    proptest::collection::vec((0..keys, any::<u16>()), 0..64)
}

proptest! {
    #[test]
    fn eventual_map_keeps_first_writes(entries in arbitrary_entries(16)) {
        let expected = first_values(&entries);

        let finished: HashMap<u8, u16> = block_on(async {
            let (map, ingestion) = EventualMap::from_stream(stream::iter(entries.clone()));
            ingestion.await;
            map.final_map().await
        });

        prop_assert_eq!(expected, finished);
    }

    #[test]
    fn queries_before_ingestion_see_first_writes(entries in arbitrary_entries(16)) {
        let expected = first_values(&entries);

        let answers = block_on(async {
            let (map, ingestion) = EventualMap::from_stream(stream::iter(entries.clone()));
            let queries: Vec<_> = (0u8..20).map(|key| map.get(&key)).collect();
            ingestion.await;
            join_all(queries).await
        });

        for (key, answer) in (0u8..20).zip(answers) {
            prop_assert_eq!(expected.get(&key).copied(), answer);
        }
    }

    #[test]
    fn collect_keeps_last_writes(entries in arbitrary_entries(16)) {
        let collected: HashMap<u8, u16> = collect(entries.iter().copied());
        let overwritten: HashMap<u8, u16> =
            collect_reconciling(entries.iter().copied(), reconcile::default::<u8, u16>());

        for (key, _) in &entries {
            let last = entries
                .iter()
                .rev()
                .find(|(other, _)| other == key)
                .map(|(_, value)| *value);
            prop_assert_eq!(last, collected.get(key).copied());
        }
        prop_assert_eq!(collected, overwritten);
    }

    #[test]
    fn count_matches_occurrences(entries in arbitrary_entries(8)) {
        let counted: HashMap<u8, usize> =
            collect_reconciling(entries.iter().copied(), reconcile::count::<u8, u16>());

        for (key, count) in &counted {
            prop_assert_eq!(entries.iter().filter(|(other, _)| other == key).count(), *count);
        }
        prop_assert_eq!(entries.len(), counted.values().sum::<usize>());
    }
}
