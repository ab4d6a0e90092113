use bmssp_core::BlockStructure;
use ordered_float::OrderedFloat;

type V = OrderedFloat<f64>;

fn v(x: f64) -> V {
    OrderedFloat(x)
}

#[test]
fn insert_and_pull_basic() {
    // S5: M=3, B=100. Insert (a,5),(b,9),(c,2),(d,7).
    // pull() returns the three smallest {c,a,d}; separator x = 9.
    let mut bs: BlockStructure<&str, V> = BlockStructure::new(3, v(100.0));
    bs.insert("a", v(5.0));
    bs.insert("b", v(9.0));
    bs.insert("c", v(2.0));
    bs.insert("d", v(7.0));
    assert_eq!(bs.len(), 4);

    let (keys, separator) = bs.pull();
    assert_eq!(keys.len(), 3);
    assert!(keys.contains(&"a"));
    assert!(keys.contains(&"c"));
    assert!(keys.contains(&"d"));
    assert_eq!(separator, v(9.0));
    assert_eq!(bs.len(), 1);
    assert_eq!(bs.get(&"b"), Some(v(9.0)));
}

#[test]
fn batch_prepend_then_pull() {
    // S6: M=2, B=100. Insert (a,50),(b,60).
    // batch_prepend([(p,1),(q,2),(r,3)]). pull() returns {p,q}; separator x = 3.
    let mut bs: BlockStructure<&str, V> = BlockStructure::new(2, v(100.0));
    bs.insert("a", v(50.0));
    bs.insert("b", v(60.0));
    bs.batch_prepend(vec![("p", v(1.0)), ("q", v(2.0)), ("r", v(3.0))]);
    assert_eq!(bs.len(), 5);

    let (keys, separator) = bs.pull();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&"p"));
    assert!(keys.contains(&"q"));
    assert_eq!(separator, v(3.0));
}

#[test]
fn pull_on_empty_returns_bound() {
    let mut bs: BlockStructure<&str, V> = BlockStructure::new(4, v(42.0));
    let (keys, separator) = bs.pull();
    assert!(keys.is_empty());
    assert_eq!(separator, v(42.0));
}

#[test]
fn idempotent_insert_with_equal_value() {
    let mut bs: BlockStructure<&str, V> = BlockStructure::new(4, v(100.0));
    bs.insert("a", v(10.0));
    bs.insert("a", v(10.0));
    assert_eq!(bs.len(), 1);
    assert_eq!(bs.get(&"a"), Some(v(10.0)));
}

#[test]
fn shadowing_insert_only_accepts_smaller_value() {
    let mut bs: BlockStructure<&str, V> = BlockStructure::new(4, v(100.0));
    bs.insert("a", v(10.0));
    // larger value: no-op
    bs.insert("a", v(20.0));
    assert_eq!(bs.get(&"a"), Some(v(10.0)));
    // smaller value: replaces
    bs.insert("a", v(5.0));
    assert_eq!(bs.get(&"a"), Some(v(5.0)));
    assert_eq!(bs.len(), 1);
}

#[test]
fn key_uniqueness_after_split() {
    // Force a split by inserting more than M items into one bound region.
    let mut bs: BlockStructure<u32, V> = BlockStructure::new(2, v(1000.0));
    for i in 0..10u32 {
        bs.insert(i, v((10 - i) as f64));
    }
    assert_eq!(bs.len(), 10);

    // Pull everything out in batches of <= M and confirm strictly increasing
    // separators and no duplicate keys across pulls.
    let mut seen = std::collections::HashSet::new();
    let mut last_sep = v(-1.0);
    loop {
        let (keys, sep) = bs.pull();
        if keys.is_empty() {
            assert_eq!(sep, v(1000.0));
            break;
        }
        for k in &keys {
            assert!(seen.insert(*k), "key {k} returned twice");
        }
        assert!(sep >= last_sep);
        last_sep = sep;
    }
    assert_eq!(seen.len(), 10);
}

#[test]
fn delete_removes_key_and_reports_absence() {
    let mut bs: BlockStructure<&str, V> = BlockStructure::new(4, v(100.0));
    bs.insert("a", v(10.0));
    assert!(bs.delete(&"a"));
    assert_eq!(bs.get(&"a"), None);
    assert!(!bs.delete(&"a"));
}

#[test]
fn pull_separates_extracted_from_remaining() {
    // Keys double as their own values, so the M smallest are simply 0..M.
    let mut bs: BlockStructure<u32, V> = BlockStructure::new(3, v(1000.0));
    for i in 0..20u32 {
        bs.insert(i, v(i as f64));
    }
    let (mut keys, x) = bs.pull();
    keys.sort();
    assert_eq!(keys, vec![0, 1, 2]);
    assert_eq!(x, v(3.0));
}
