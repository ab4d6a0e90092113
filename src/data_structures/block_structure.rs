use num_traits::{Float, Zero};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt::Debug;

/// Which sequence currently owns a key: D0 (batch-prepended, always smaller
/// than anything in D1) or D1 (point-inserted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    D0,
    D1,
}

/// A block of up to `M` key/value pairs, kept sorted by `(value, key)`.
#[derive(Debug)]
struct Block<K, V> {
    id: u64,
    pairs: Vec<(K, V)>,
    /// Upper bound on values this block may hold. Only meaningful for D1
    /// blocks; D0 blocks never consult it. Updated monotonically upward on
    /// insertion, never recomputed on deletion (an over-approximation is
    /// still a valid upper bound).
    bound: V,
}

impl<K, V: Copy> Block<K, V> {
    fn min_value(&self) -> Option<V> {
        self.pairs.first().map(|(_, v)| *v)
    }

    fn max_value(&self) -> Option<V> {
        self.pairs.last().map(|(_, v)| *v)
    }
}

/// Descriptor of where a key currently lives: its value, owning block, and
/// which sequence that block belongs to.
#[derive(Debug, Clone, Copy)]
struct KeyEntry<V> {
    value: V,
    block_id: u64,
    side: Side,
}

/// The two-sequence block-based priority structure of Lemma 3.3: supports
/// ordinary `insert`, `batch_prepend` of values known to be smaller than
/// everything currently stored, and `pull` of the `M` smallest entries with
/// a separator bounding the remainder from below.
#[derive(Debug)]
pub struct BlockStructure<K, V>
where
    K: Eq + std::hash::Hash + Copy + Ord + Debug,
    V: Float + Zero + Debug + Copy + Ord,
{
    m: usize,
    bound: V,
    blocks: HashMap<u64, Block<K, V>>,
    d0_order: VecDeque<u64>,
    d1_order: VecDeque<u64>,
    /// Ordered index over D1 block bounds, `(bound, block_id)` so ties
    /// between equal bounds are broken deterministically by block identity.
    bound_index: BTreeSet<(V, u64)>,
    key_map: HashMap<K, KeyEntry<V>>,
    next_id: u64,
}

impl<K, V> BlockStructure<K, V>
where
    K: Eq + std::hash::Hash + Copy + Ord + Debug,
    V: Float + Zero + Debug + Copy + Ord,
{
    /// Creates an empty structure: D0 empty, D1 holding one empty block
    /// bounded by `bound`.
    pub fn new(block_size: usize, bound: V) -> Self {
        assert!(block_size >= 1, "block size M must be >= 1");

        let mut blocks = HashMap::new();
        let mut d1_order = VecDeque::new();
        let mut bound_index = BTreeSet::new();

        blocks.insert(
            0,
            Block {
                id: 0,
                pairs: Vec::new(),
                bound,
            },
        );
        d1_order.push_back(0);
        bound_index.insert((bound, 0));

        BlockStructure {
            m: block_size,
            bound,
            blocks,
            d0_order,
            d1_order,
            bound_index,
            key_map: HashMap::new(),
            next_id: 1,
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.key_map.len()
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.key_map.is_empty()
    }

    /// Current value for `key`, if stored.
    pub fn get(&self, key: &K) -> Option<V> {
        self.key_map.get(key).map(|e| e.value)
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Inserts `(key, value)`. If `key` is already stored with a value `<=
    /// value`, this is a no-op; if the stored value is strictly larger, the
    /// key is moved to its new position.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(entry) = self.key_map.get(&key) {
            if value >= entry.value {
                return;
            }
            self.remove_key(&key);
        }

        self.ensure_d1_block_exists();
        let block_id = self.find_d1_block_for_value(value);
        let pos = {
            let block = self.blocks.get(&block_id).expect("block exists");
            block
                .pairs
                .binary_search_by(|(k, v)| (*v, *k).cmp(&(value, key)))
                .unwrap_or_else(|p| p)
        };
        let block = self.blocks.get_mut(&block_id).expect("block exists");
        block.pairs.insert(pos, (key, value));
        self.key_map.insert(
            key,
            KeyEntry {
                value,
                block_id,
                side: Side::D1,
            },
        );

        let block = self.blocks.get_mut(&block_id).expect("block exists");
        let max_value = block.max_value().expect("just inserted one pair");
        if max_value > block.bound {
            let old_bound = block.bound;
            self.bound_index.remove(&(old_bound, block_id));
            block.bound = max_value;
            self.bound_index.insert((max_value, block_id));
        }

        if self.blocks[&block_id].pairs.len() > self.m {
            self.split_block(block_id);
        }
    }

    /// Recreates the sentinel empty D1 block if every D1 block has been
    /// destroyed (e.g. after `pull` drained the structure).
    fn ensure_d1_block_exists(&mut self) {
        if self.d1_order.is_empty() {
            let id = self.alloc_id();
            self.blocks.insert(
                id,
                Block {
                    id,
                    pairs: Vec::new(),
                    bound: self.bound,
                },
            );
            self.d1_order.push_back(id);
            self.bound_index.insert((self.bound, id));
        }
    }

    /// Locates the D1 block whose bound is the smallest bound `>= value`;
    /// falls back to the rightmost D1 block if none qualifies.
    fn find_d1_block_for_value(&self, value: V) -> u64 {
        match self.bound_index.range((value, u64::MIN)..).next() {
            Some(&(_, id)) => id,
            None => *self.d1_order.back().expect("D1 always has a block"),
        }
    }

    /// Splits an over-full D1 block at its median index into two blocks.
    fn split_block(&mut self, block_id: u64) {
        let mut block = self.blocks.remove(&block_id).expect("block exists");
        let pos = self
            .d1_order
            .iter()
            .position(|&id| id == block_id)
            .expect("block is in D1");
        self.d1_order.remove(pos);
        self.bound_index.remove(&(block.bound, block_id));

        let median_idx = block.pairs.len() / 2;
        let right_pairs = block.pairs.split_off(median_idx);
        let left_pairs = block.pairs;

        let left_bound = left_pairs.last().map(|(_, v)| *v).unwrap_or(block.bound);
        let right_bound = block.bound;

        let left_id = self.alloc_id();
        let right_id = self.alloc_id();

        for (k, v) in &left_pairs {
            self.key_map.insert(
                *k,
                KeyEntry {
                    value: *v,
                    block_id: left_id,
                    side: Side::D1,
                },
            );
        }
        for (k, v) in &right_pairs {
            self.key_map.insert(
                *k,
                KeyEntry {
                    value: *v,
                    block_id: right_id,
                    side: Side::D1,
                },
            );
        }

        self.blocks.insert(
            left_id,
            Block {
                id: left_id,
                pairs: left_pairs,
                bound: left_bound,
            },
        );
        self.blocks.insert(
            right_id,
            Block {
                id: right_id,
                pairs: right_pairs,
                bound: right_bound,
            },
        );

        self.d1_order.insert(pos, right_id);
        self.d1_order.insert(pos, left_id);
        self.bound_index.insert((left_bound, left_id));
        self.bound_index.insert((right_bound, right_id));
    }

    /// Bulk-inserts `pairs`, every value of which must be strictly less than
    /// every value currently stored; the caller is responsible for this
    /// precondition (checked with `debug_assert` since verifying it is not
    /// free).
    pub fn batch_prepend(&mut self, pairs: Vec<(K, V)>) {
        if pairs.is_empty() {
            return;
        }

        if let Some(current_min) = self.current_min() {
            debug_assert!(
                pairs.iter().all(|&(_, v)| v < current_min),
                "batch_prepend precondition violated: a value is not strictly less than the current minimum"
            );
        }

        let mut smallest_per_key: HashMap<K, V> = HashMap::new();
        for (key, value) in pairs {
            smallest_per_key
                .entry(key)
                .and_modify(|existing| {
                    if value < *existing {
                        *existing = value;
                    }
                })
                .or_insert(value);
        }

        let mut survivors: Vec<(K, V)> = Vec::with_capacity(smallest_per_key.len());
        for (key, value) in smallest_per_key {
            if let Some(entry) = self.key_map.get(&key) {
                if value >= entry.value {
                    continue;
                }
                self.remove_key(&key);
            }
            survivors.push((key, value));
        }
        if survivors.is_empty() {
            return;
        }
        survivors.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));

        let new_blocks: Vec<Vec<(K, V)>> = if survivors.len() <= self.m {
            vec![survivors]
        } else {
            let chunk_size = self.m.div_ceil(2).max(1);
            survivors
                .chunks(chunk_size)
                .map(|c| c.to_vec())
                .collect()
        };

        // Prepend in reverse so the smallest-valued chunk ends up leftmost.
        for chunk in new_blocks.into_iter().rev() {
            let id = self.alloc_id();
            let bound = chunk.last().map(|(_, v)| *v).unwrap_or(self.bound);
            for (k, v) in &chunk {
                self.key_map.insert(
                    *k,
                    KeyEntry {
                        value: *v,
                        block_id: id,
                        side: Side::D0,
                    },
                );
            }
            self.blocks.insert(id, Block { id, pairs: chunk, bound });
            self.d0_order.push_front(id);
        }
    }

    /// Scans D0 then D1 from the left for the smallest remaining value.
    fn current_min(&self) -> Option<V> {
        for &id in self.d0_order.iter() {
            if let Some(v) = self.blocks[&id].min_value() {
                return Some(v);
            }
        }
        for &id in self.d1_order.iter() {
            if let Some(v) = self.blocks[&id].min_value() {
                return Some(v);
            }
        }
        None
    }

    /// Removes and returns up to `M` key/value pairs with the smallest
    /// values, plus a separator `x` such that every returned value is `< x`
    /// and every remaining value is `>= x` (or `x == B` if nothing remains).
    pub fn pull(&mut self) -> (Vec<K>, V) {
        let mut candidates: Vec<(K, V, u64)> = Vec::new();
        let mut count = 0usize;

        for &id in self.d0_order.iter() {
            if count >= self.m {
                break;
            }
            let block = &self.blocks[&id];
            count += block.pairs.len();
            candidates.extend(block.pairs.iter().map(|&(k, v)| (k, v, id)));
        }
        for &id in self.d1_order.iter() {
            if count >= self.m {
                break;
            }
            let block = &self.blocks[&id];
            count += block.pairs.len();
            candidates.extend(block.pairs.iter().map(|&(k, v)| (k, v, id)));
        }

        if candidates.is_empty() {
            return (Vec::new(), self.bound);
        }

        let selected: Vec<(K, V, u64)> = if candidates.len() <= self.m {
            candidates
        } else {
            candidates.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));
            candidates.truncate(self.m);
            candidates
        };

        let mut keys = Vec::with_capacity(selected.len());
        for (key, value, block_id) in &selected {
            if let Some(block) = self.blocks.get_mut(block_id) {
                if let Ok(pos) = block
                    .pairs
                    .binary_search_by(|(k, v)| (*v, *k).cmp(&(*value, *key)))
                {
                    block.pairs.remove(pos);
                }
            }
            self.key_map.remove(key);
            keys.push(*key);
        }

        self.garbage_collect_empty_blocks();

        let x = self.current_min().unwrap_or(self.bound);
        (keys, x)
    }

    /// Removes `key` if present and reports whether it was found.
    pub fn delete(&mut self, key: &K) -> bool {
        if self.key_map.contains_key(key) {
            self.remove_key(key);
            true
        } else {
            false
        }
    }

    /// Removes `key` from its owning block and from `key_map`, destroying
    /// the block if it becomes empty (blocks are destroyed on becoming
    /// empty after either `pull` or `delete`, regardless of sequence).
    fn remove_key(&mut self, key: &K) {
        let Some(entry) = self.key_map.remove(key) else {
            return;
        };
        if let Some(block) = self.blocks.get_mut(&entry.block_id) {
            if let Ok(pos) = block
                .pairs
                .binary_search_by(|(k, v)| (*v, *k).cmp(&(entry.value, *key)))
            {
                block.pairs.remove(pos);
            }
            if block.pairs.is_empty() {
                self.destroy_block(entry.block_id, entry.side);
            }
        }
    }

    fn destroy_block(&mut self, block_id: u64, side: Side) {
        if let Some(block) = self.blocks.remove(&block_id) {
            match side {
                Side::D0 => {
                    if let Some(pos) = self.d0_order.iter().position(|&id| id == block_id) {
                        self.d0_order.remove(pos);
                    }
                }
                Side::D1 => {
                    if let Some(pos) = self.d1_order.iter().position(|&id| id == block_id) {
                        self.d1_order.remove(pos);
                    }
                    self.bound_index.remove(&(block.bound, block_id));
                }
            }
        }
    }

    fn garbage_collect_empty_blocks(&mut self) {
        let empty_d0: Vec<u64> = self
            .d0_order
            .iter()
            .copied()
            .filter(|id| self.blocks[id].pairs.is_empty())
            .collect();
        for id in empty_d0 {
            self.destroy_block(id, Side::D0);
        }
        let empty_d1: Vec<u64> = self
            .d1_order
            .iter()
            .copied()
            .filter(|id| self.blocks[id].pairs.is_empty())
            .collect();
        for id in empty_d1 {
            self.destroy_block(id, Side::D1);
        }
    }
}
