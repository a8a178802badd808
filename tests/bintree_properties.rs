mod common;

use rand::Rng;

use geotopo::geometry::Interval;
use geotopo::index::Bintree;

#[test]
fn queries_have_no_false_negatives() {
    common::init_tracing();
    let mut rng = common::rng(9);
    let mut tree = Bintree::new();
    let mut items = Vec::new();
    for id in 0..500usize {
        let min = rng.gen_range(-1000.0..1000.0);
        let width = if id % 10 == 0 { 0.0 } else { rng.gen_range(0.0..50.0) };
        let interval = Interval::new(min, min + width);
        tree.insert(interval, id);
        items.push(interval);
    }
    assert_eq!(tree.size(), items.len());

    for _ in 0..200 {
        let min = rng.gen_range(-1100.0..1100.0);
        let query = Interval::new(min, min + rng.gen_range(0.0..100.0));
        let found: Vec<usize> = tree.query(&query).into_iter().copied().collect();
        for (id, interval) in items.iter().enumerate() {
            if interval.overlaps(&query) {
                assert!(found.contains(&id), "missed {id} for {query:?}");
            }
        }
    }
}

#[test]
fn removed_items_are_not_returned() {
    let mut tree = Bintree::new();
    tree.insert(Interval::new(0.0, 1.0), "a");
    tree.insert(Interval::new(0.5, 2.0), "b");
    assert!(tree.remove(&Interval::new(0.0, 1.0), &"a"));
    let found = tree.query(&Interval::new(0.0, 3.0));
    assert!(found.contains(&&"b"));
    assert!(!found.contains(&&"a"));
}
