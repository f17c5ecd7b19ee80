use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::{criterion_group, criterion_main};
use tokio::runtime::Builder;

use eventual_map::EventualMap;
use futures::channel::mpsc;
use std::sync::Arc;

// Feeds `entries` into a fresh map while `size` tasks query it, half of them for keys that never
// arrive.
async fn do_something(size: usize, entries: Arc<Vec<(String, String)>>) {
    let (sender, receiver) = mpsc::unbounded();
    let map = EventualMap::spawn(receiver);

    let mut handles = Vec::new();

    for task in 0..size {
        let map = map.clone();
        let entries = entries.clone();

        handles.push(tokio::task::spawn(async move {
            for step in 0..10 {
                let (key, value) = &entries[(step * 7 + task) % entries.len()];

                if task % 2 == 0 {
                    assert_eq!(Some(value.clone()), map.get(key).await);
                } else {
                    let missing = format!("{}-missing", key);
                    assert_eq!(None, map.get(&missing).await);
                }
            }
        }));
    }

    for entry in entries.iter() {
        if sender.unbounded_send(entry.clone()).is_err() {
            panic!("Ingestion stopped early");
        }
    }
    drop(sender);

    for handle in handles {
        if handle.await.is_err() {
            panic!("Query task failed");
        }
    }
}

fn from_elem(c: &mut Criterion) {
    let size: usize = 256;

    let keys = vec![
        "one".to_owned(),
        "two".to_owned(),
        "three".to_owned(),
        "four".to_owned(),
        "five".to_owned(),
        "six".to_owned(),
        "seven".to_owned(),
        "eight".to_owned(),
        "nine".to_owned(),
        "ten".to_owned(),
    ];

    let mut entries: Vec<(String, String)> = Vec::new();

    for i in 0..10 {
        entries.extend(
            keys.iter()
                .map(|text| text.clone() + &i.to_string())
                .map(|key| {
                    let value = format!("Valu: {}", key);
                    (key, value)
                }),
        );
    }

    let entries = Arc::new(entries);
    let entries_ref = &entries;
    c.bench_with_input(BenchmarkId::new("eventual", size), &size, move |b, &s| {
        let runtime = Builder::new_multi_thread()
            .worker_threads(3)
            .thread_name("benchmark")
            .thread_stack_size(3 * 1024 * 1024)
            .build()
            .unwrap();
        // Insert a call to `to_async` to convert the bencher to async mode.
        // The timing loops are the same as with the normal bencher.
        b.to_async(runtime)
            .iter(|| do_something(s, entries_ref.clone()));
    });
}

criterion_group!(benches, from_elem);
criterion_main!(benches);
