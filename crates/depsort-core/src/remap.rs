//! Offset remapping for a computed permutation.
//!
//! Members sit in slots: their ranges, sorted by start. Reordering puts the
//! `k`-th declaration of the permutation into slot `k` while the text between
//! slots stays where it is. A position inside a member travels with it; a
//! position between members shifts by however much the slots before it grew
//! or shrank.

use std::ops::Range;

use crate::error::{Error, Result};

/// One-directional map from original offsets to offsets after reordering.
#[derive(Debug, Clone)]
pub struct PositionRemap {
    /// Original ranges in slot (textual) order.
    slots: Vec<Range<usize>>,
    /// Declaration index occupying each slot before reordering.
    slot_owner: Vec<usize>,
    /// Start offset of each declaration after reordering.
    new_start: Vec<usize>,
    /// `shift[k]`: length change accumulated over slots `0..k`.
    shift: Vec<isize>,
}

impl PositionRemap {
    /// Build the remap.
    ///
    /// `ranges[i]` is the source range of declaration `i`; `permutation` is
    /// what [`compute_order`](crate::compute_order) returned for the same batch.
    pub fn new(ranges: &[Range<usize>], permutation: &[usize]) -> Result<Self> {
        let n = ranges.len();
        if permutation.len() != n {
            return Err(Error::InvalidInput(format!(
                "permutation has {} entries for {} ranges",
                permutation.len(),
                n
            )));
        }
        let mut seen = vec![false; n];
        for &idx in permutation {
            if idx >= n || std::mem::replace(&mut seen[idx], true) {
                return Err(Error::InvalidInput(format!(
                    "permutation entry {} is out of range or repeated",
                    idx
                )));
            }
        }

        let mut slot_owner: Vec<usize> = (0..n).collect();
        slot_owner.sort_by_key(|&i| (ranges[i].start, ranges[i].end));
        let slots: Vec<Range<usize>> = slot_owner.iter().map(|&i| ranges[i].clone()).collect();

        for (k, slot) in slots.iter().enumerate() {
            if slot.start > slot.end {
                return Err(Error::InvalidInput(format!("range {:?} is reversed", slot)));
            }
            if k > 0 && slots[k - 1].end > slot.start {
                return Err(Error::InvalidInput(format!(
                    "ranges {:?} and {:?} overlap",
                    slots[k - 1],
                    slot
                )));
            }
        }

        let mut shift = Vec::with_capacity(n + 1);
        let mut new_start = vec![0; n];
        let mut acc: isize = 0;
        for (k, slot) in slots.iter().enumerate() {
            shift.push(acc);
            let placed = permutation[k];
            new_start[placed] = offset_by(slot.start, acc);
            acc += ranges[placed].len() as isize - slot.len() as isize;
        }
        shift.push(acc);

        Ok(Self {
            slots,
            slot_owner,
            new_start,
            shift,
        })
    }

    /// Where `offset` ends up after reordering.
    pub fn remap(&self, offset: usize) -> usize {
        // Number of slots starting at or before `offset`.
        let k = self.slots.partition_point(|s| s.start <= offset);
        if k > 0 {
            let slot = &self.slots[k - 1];
            if slot.contains(&offset) {
                let owner = self.slot_owner[k - 1];
                return self.new_start[owner] + (offset - slot.start);
            }
        }
        offset_by(offset, self.shift[k])
    }

    /// Range of declaration `decl` after reordering.
    #[cfg(test)]
    pub(crate) fn new_range(&self, decl: usize) -> Range<usize> {
        let len = self
            .slot_owner
            .iter()
            .position(|&owner| owner == decl)
            .map(|k| self.slots[k].len())
            .unwrap_or(0);
        self.new_start[decl]..self.new_start[decl] + len
    }
}

fn offset_by(offset: usize, delta: isize) -> usize {
    offset.saturating_add_signed(delta)
}
