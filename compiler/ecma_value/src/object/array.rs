//! Array element storage.
//!
//! Elements live in a dense prefix plus a sparse tail keyed by index. A
//! write lands in the dense prefix only when it extends the prefix by at most
//! [`MAX_DENSE_GAP`] slots; anything further out goes to the sparse map, so
//! `a[4294967294] = 1` or `a.length = 4e9` never allocates per index.
//!
//! Invariants: `dense.len() <= length`, and every sparse key is at least
//! `dense.len()` and below `length`.

use std::collections::BTreeMap;

use crate::value::Value;

/// Largest number of slots one write may add to the dense prefix.
pub const MAX_DENSE_GAP: usize = 1024;

/// Largest valid array length, `2^32 - 1`.
pub const MAX_ARRAY_LENGTH: u32 = u32::MAX;

#[derive(Clone, Debug, Default)]
pub struct ArrayElements {
    dense: Vec<Value>,
    sparse: BTreeMap<u32, Value>,
    length: u32,
}

impl ArrayElements {
    pub fn new(dense: Vec<Value>) -> Self {
        // Literals never reach 2^32 elements.
        let length = u32::try_from(dense.len()).unwrap_or(MAX_ARRAY_LENGTH);
        ArrayElements {
            dense,
            sparse: BTreeMap::new(),
            length,
        }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of slots held in the dense prefix.
    #[inline]
    pub fn dense_len(&self) -> usize {
        self.dense.len()
    }

    /// Element at `index`, or `None` for a hole or an index past the end.
    pub fn get(&self, index: u32) -> Option<&Value> {
        self.dense
            .get(index as usize)
            .or_else(|| self.sparse.get(&index))
    }

    pub fn contains(&self, index: u32) -> bool {
        (index as usize) < self.dense.len() || self.sparse.contains_key(&index)
    }

    /// Write `value` at `index`, growing `length` past it.
    pub fn set(&mut self, index: u32, value: Value) {
        let slot = index as usize;
        if slot < self.dense.len() {
            self.dense[slot] = value;
        } else if slot - self.dense.len() < MAX_DENSE_GAP {
            self.grow_dense(slot + 1);
            self.dense[slot] = value;
        } else {
            self.sparse.insert(index, value);
        }
        if index >= self.length {
            self.length = index + 1;
        }
    }

    /// Set `length`, dropping every element at or past it.
    pub fn set_len(&mut self, length: u32) {
        if (length as usize) < self.dense.len() {
            self.dense.truncate(length as usize);
        }
        self.sparse.split_off(&length);
        self.length = length;
    }

    /// Extend the dense prefix to `len` slots, pulling in sparse entries
    /// that now fall inside it. Holes read as `undefined`.
    fn grow_dense(&mut self, len: usize) {
        self.dense.resize(len, Value::Undefined);
        let boundary = u32::try_from(len).unwrap_or(MAX_ARRAY_LENGTH);
        let tail = self.sparse.split_off(&boundary);
        for (index, value) in std::mem::replace(&mut self.sparse, tail) {
            self.dense[index as usize] = value;
        }
    }

    /// Every element from `0` to `length`, holes as `undefined`.
    ///
    /// Allocates `length` slots; callers bound `length` first.
    pub fn to_vec(&self) -> Vec<Value> {
        let mut out = self.dense.clone();
        out.resize(self.length as usize, Value::Undefined);
        for (index, value) in &self.sparse {
            out[*index as usize] = value.clone();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn far_index_stays_sparse() {
        let mut elements = ArrayElements::default();
        elements.set(4_294_967_294, Value::Int(1));
        assert_eq!(elements.len(), MAX_ARRAY_LENGTH);
        assert_eq!(elements.dense_len(), 0);
        assert_eq!(elements.get(4_294_967_294), Some(&Value::Int(1)));
        assert_eq!(elements.get(7), None);
        assert!(!elements.contains(7));
    }

    #[test]
    fn near_index_extends_dense_prefix() {
        let mut elements = ArrayElements::new(vec![Value::Int(0)]);
        elements.set(3, Value::Int(3));
        assert_eq!(elements.dense_len(), 4);
        assert_eq!(elements.len(), 4);
        assert_eq!(elements.get(2), Some(&Value::Undefined));
    }

    #[test]
    fn growing_dense_absorbs_sparse_entries() {
        let mut elements = ArrayElements::default();
        elements.set(1500, Value::Int(15));
        assert_eq!(elements.dense_len(), 0);
        for i in 0..1000 {
            elements.set(i, Value::Int(0));
        }
        elements.set(1200, Value::Int(12));
        assert_eq!(elements.dense_len(), 1201);
        elements.set(1400, Value::Int(14));
        assert_eq!(elements.dense_len(), 1401);
        elements.set(1600, Value::Int(16));
        assert_eq!(elements.dense_len(), 1601);
        assert_eq!(elements.get(1500), Some(&Value::Int(15)));
        assert_eq!(elements.len(), 1601);
    }

    #[test]
    fn set_len_truncates_both_stores() {
        let mut elements = ArrayElements::new(vec![Value::Int(0), Value::Int(1)]);
        elements.set(5000, Value::Int(5));
        elements.set_len(1);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements.get(1), None);
        assert_eq!(elements.get(5000), None);

        elements.set_len(4_000_000_000);
        assert_eq!(elements.len(), 4_000_000_000);
        assert_eq!(elements.dense_len(), 1);
    }

    #[test]
    fn to_vec_fills_holes() {
        let mut elements = ArrayElements::new(vec![Value::Int(0)]);
        elements.set(2000, Value::Int(2));
        let all = elements.to_vec();
        assert_eq!(all.len(), 2001);
        assert_eq!(all[2000], Value::Int(2));
        assert_eq!(all[1000], Value::Undefined);
    }
}
