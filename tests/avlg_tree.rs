use std::collections::BTreeSet;

use avlg_tree::{AvlgTree, Error, MaxImbalance};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

fn tolerance_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        4 => 1u32..=4,
        1 => 5u32..=32,
        1 => 10_000u32..=u32::MAX,
    ]
}

fn keys_of(tree: &AvlgTree<i64>) -> Vec<i64> {
    tree.iter().copied().collect()
}

fn assert_invariants<T: Ord>(tree: &AvlgTree<T>) {
    assert!(tree.is_bst(), "search-tree order violated");
    assert!(tree.is_balanced(), "a node exceeds {}", tree.max_imbalance());
    assert!(tree.is_height_consistent(), "stale height or balance");
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn zero_tolerance_is_invalid() {
    assert_eq!(AvlgTree::<i64>::new(0).err(), Some(Error::InvalidParameter));
    assert_eq!(MaxImbalance::new(0), Err(Error::InvalidParameter));
}

#[test]
fn new_tree_is_empty() {
    for g in [1, 2, 7, u32::MAX] {
        let tree: AvlgTree<i64> = AvlgTree::new(g).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.max_imbalance().get(), g);
        assert_eq!(tree.rotation_count(), 0);
        assert_invariants(&tree);
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn single_key_has_height_zero() {
    let mut tree = AvlgTree::new(1).unwrap();
    tree.insert(42);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.root(), Ok(&42));
    assert_eq!(tree.len(), 1);
}

#[test]
fn ascending_triple_rotates_left_once() {
    let mut tree = AvlgTree::new(1).unwrap();
    for key in [10, 20, 30] {
        tree.insert(key);
    }

    assert_eq!(tree.rotation_count(), 1);
    assert_eq!(tree.root(), Ok(&20));
    assert_eq!(tree.height(), 1);
    assert_eq!(keys_of(&tree), vec![10, 20, 30]);
    assert_invariants(&tree);
}

#[test]
fn deleting_root_of_triple() {
    let mut tree = AvlgTree::new(1).unwrap();
    for key in [10, 20, 30] {
        tree.insert(key);
    }

    assert_eq!(tree.delete(&20), Ok(Some(20)));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.search(&20), Ok(None));
    assert_eq!(keys_of(&tree), vec![10, 30]);
    assert_invariants(&tree);
}

#[test]
fn delete_on_empty_tree_is_an_error() {
    let mut tree: AvlgTree<i64> = AvlgTree::new(1).unwrap();
    assert_eq!(tree.delete(&10), Err(Error::EmptyTree));
    assert_eq!(tree.search(&10), Err(Error::EmptyTree));
    assert_eq!(tree.root(), Err(Error::EmptyTree));
    assert_eq!(tree.len(), 0);
}

#[test]
fn deleting_last_key_empties_tree() {
    let mut tree = AvlgTree::new(3).unwrap();
    tree.insert(1);
    assert_eq!(tree.delete(&1), Ok(Some(1)));
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
    assert_eq!(tree.delete(&1), Err(Error::EmptyTree));
}

#[test]
fn missing_key_is_not_an_error() {
    let mut tree = AvlgTree::new(2).unwrap();
    tree.extend([5, 3, 8]);
    assert_eq!(tree.delete(&4), Ok(None));
    assert_eq!(tree.search(&4), Ok(None));
    assert_eq!(tree.len(), 3);
}

#[test]
fn duplicate_insert_keeps_count() {
    let mut tree = AvlgTree::new(1).unwrap();
    assert!(tree.insert(7));
    assert!(!tree.insert(7));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.delete(&7), Ok(Some(7)));
    assert_eq!(tree.search(&7), Err(Error::EmptyTree));
}

#[test]
fn clear_keeps_tolerance() {
    let mut tree = AvlgTree::new(3).unwrap();
    tree.extend(0..1_000);
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
    assert_eq!(tree.max_imbalance().get(), 3);
    assert_eq!(tree.root(), Err(Error::EmptyTree));

    tree.extend([2, 1]);
    assert_eq!(keys_of(&tree), vec![1, 2]);
    assert_invariants(&tree);
}

#[test]
fn borrowed_lookups() {
    let mut tree = AvlgTree::new(2).unwrap();
    for word in ["pear", "apple", "fig", "kiwi"] {
        tree.insert(String::from(word));
    }

    assert_eq!(tree.search("fig").unwrap().map(String::as_str), Some("fig"));
    assert!(tree.contains("kiwi"));
    assert_eq!(tree.delete("apple"), Ok(Some(String::from("apple"))));
    assert!(!tree.contains("apple"));
    assert_invariants(&tree);
}

#[test]
fn avl_bound_holds_for_sorted_runs() {
    let mut tree = AvlgTree::new(1).unwrap();
    for key in 0..4_096 {
        tree.insert(key);
        assert!(tree.is_balanced());
    }
    // A perfect tree of 4095 keys has height 11; AVL-1 stays close to it.
    assert!(tree.height() <= 13, "height {}", tree.height());

    for key in (0..4_096).step_by(2) {
        assert_eq!(tree.delete(&key), Ok(Some(key)));
        assert!(tree.is_balanced());
    }
    assert_eq!(tree.len(), 2_048);
    assert_invariants(&tree);
}

#[test]
fn wider_tolerance_rotates_less_on_sorted_input() {
    let rotations = |g: u32| {
        let mut tree = AvlgTree::new(g).unwrap();
        tree.extend(0..2_000);
        assert_invariants(&tree);
        tree.rotation_count()
    };

    assert!(rotations(8) < rotations(1));
}

#[test]
fn tall_tolerance_allows_tall_trees() {
    let mut tree = AvlgTree::new(10).unwrap();
    tree.extend((0..11).rev());
    assert_eq!(tree.rotation_count(), 0);
    assert_eq!(tree.height(), 10);

    // The eleventh level tips the root past the bound.
    tree.insert(-1);
    assert!(tree.rotation_count() > 0);
    assert!(tree.height() < 11);
    assert_invariants(&tree);
}

#[test]
fn sorted_chain_of_ten_thousand_keys() {
    let mut tree = AvlgTree::new(20_000).unwrap();
    tree.extend(0..10_000i64);
    assert_eq!(tree.len(), 10_000);
    assert_eq!(tree.height(), 9_999);
    assert_eq!(tree.rotation_count(), 0);
    assert_invariants(&tree);

    let mut spliced = tree.clone();

    // Each reverse delete walks to the bottom of the chain.
    for key in (0..10_000i64).rev() {
        assert_eq!(tree.delete(&key), Ok(Some(key)));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
    assert_invariants(&tree);

    // Splicing the root moves its successor up without reshaping the chain.
    assert_eq!(spliced.delete(&0), Ok(Some(0)));
    assert_eq!(spliced.root(), Ok(&1));
    assert_eq!(spliced.height(), 9_998);
    assert_invariants(&spliced);
    for key in 1..10_000i64 {
        assert_eq!(spliced.delete(&key), Ok(Some(key)));
    }
    assert!(spliced.is_empty());
    assert_eq!(spliced.delete(&0), Err(Error::EmptyTree));
}

// ─── Randomized properties ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Delete(i64),
    Search(i64),
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => value_strategy().prop_map(TreeOp::Insert),
        4 => value_strategy().prop_map(TreeOp::Delete),
        2 => value_strategy().prop_map(TreeOp::Search),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Replays random insert/delete/search sequences against `BTreeSet` and
    /// checks every invariant after every step.
    #[test]
    fn ops_match_btreeset(
        g in tolerance_strategy(),
        ops in proptest::collection::vec(tree_op_strategy(), 0..TEST_SIZE),
    ) {
        let mut tree: AvlgTree<i64> = AvlgTree::new(g).unwrap();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(v) => {
                    prop_assert_eq!(tree.insert(v), model.insert(v), "insert({})", v);
                }
                TreeOp::Delete(v) => {
                    let expected = if model.is_empty() { Err(Error::EmptyTree) } else { Ok(model.take(&v)) };
                    prop_assert_eq!(tree.delete(&v), expected, "delete({})", v);
                }
                TreeOp::Search(v) => {
                    let expected = if model.is_empty() { Err(Error::EmptyTree) } else { Ok(model.get(&v)) };
                    prop_assert_eq!(tree.search(&v), expected, "search({})", v);
                }
            }

            prop_assert!(tree.is_bst(), "not a BST after {:?}", op);
            prop_assert!(tree.is_balanced(), "G = {} violated after {:?}", g, op);
            prop_assert!(tree.is_height_consistent(), "stale heights after {:?}", op);
            prop_assert_eq!(tree.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(tree.is_empty(), model.is_empty());
        }

        let tree_keys = keys_of(&tree);
        let model_keys: Vec<i64> = model.iter().copied().collect();
        prop_assert_eq!(tree_keys, model_keys);
    }

    /// Every distinct insertion keeps both invariants and bumps the count.
    #[test]
    fn distinct_inserts_stay_balanced(
        g in tolerance_strategy(),
        keys in proptest::collection::hash_set(value_strategy(), 0..2_000),
    ) {
        let mut tree = AvlgTree::new(g).unwrap();

        for (inserted, &key) in keys.iter().enumerate() {
            prop_assert!(tree.insert(key));
            prop_assert!(tree.is_bst());
            prop_assert!(tree.is_balanced());
            prop_assert_eq!(tree.len(), inserted + 1);
        }

        for &key in &keys {
            prop_assert_eq!(tree.search(&key).ok().flatten(), Some(&key));
        }
    }

    /// Draining a tree in random order rebalances every ancestor of each
    /// splice point.
    #[test]
    fn draining_in_random_order(
        g in tolerance_strategy(),
        keys in proptest::collection::vec(value_strategy(), 1..2_000).prop_shuffle(),
        order in any::<prop::sample::Index>(),
    ) {
        let mut tree = AvlgTree::new(g).unwrap();
        tree.extend(keys.iter().copied());
        let mut remaining: Vec<i64> = keys_of(&tree);
        let mut cursor = order.index(remaining.len());

        while !remaining.is_empty() {
            cursor %= remaining.len();
            let key = remaining.swap_remove(cursor);
            prop_assert_eq!(tree.delete(&key), Ok(Some(key)));
            prop_assert_eq!(tree.search(&key).ok().flatten(), None);
            prop_assert!(tree.is_bst());
            prop_assert!(tree.is_balanced());
            prop_assert!(tree.is_height_consistent());
            cursor = cursor.wrapping_mul(31).wrapping_add(7);
        }

        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.height(), -1);
    }

    /// Inserting a fresh key and deleting it again leaves the same key set.
    #[test]
    fn insert_then_delete_restores_keys(
        g in tolerance_strategy(),
        keys in proptest::collection::btree_set(value_strategy(), 1..1_000),
        extra in value_strategy(),
    ) {
        prop_assume!(!keys.contains(&extra));

        let mut tree = AvlgTree::new(g).unwrap();
        tree.extend(keys.iter().copied());
        let before = keys_of(&tree);

        prop_assert!(tree.insert(extra));
        prop_assert_eq!(tree.delete(&extra), Ok(Some(extra)));

        prop_assert_eq!(keys_of(&tree), before);
        prop_assert!(tree.is_bst());
        prop_assert!(tree.is_balanced());
        prop_assert!(tree.is_height_consistent());
    }

    /// The classic AVL bound holds at every node for `G = 1`.
    #[test]
    fn avl_one_never_exceeds_one(
        ops in proptest::collection::vec(tree_op_strategy(), 0..2_000),
    ) {
        let mut tree = AvlgTree::with_max_imbalance(MaxImbalance::AVL);
        for op in ops {
            match op {
                TreeOp::Insert(v) => {
                    tree.insert(v);
                }
                TreeOp::Delete(v) | TreeOp::Search(v) => {
                    let _ = tree.delete(&v);
                }
            }
            prop_assert!(tree.is_balanced());
        }
    }
}
