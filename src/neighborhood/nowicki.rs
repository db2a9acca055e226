//! Nowicki-Smutnicki block neighborhood.
//!
//! The makespan of a schedule equals the length of its critical path, so
//! only moves that rearrange the critical path can improve it. The critical
//! path is decomposed into *blocks*: maximal runs of operations that are
//! contiguous both on one machine's sequence and on the critical path
//! itself. For each block, only the first two and last two positions are
//! swapped; interior swaps of a block can never shorten the path.

use std::collections::HashMap;

use crate::encoding::ResourceOrder;
use crate::instance::Task;

use super::Neighborhood;

/// A maximal run of critical-path-contiguous positions on one machine.
///
/// `first < last` always: a block spans at least two positions. Blocks are
/// recomputed from a decoded schedule on every neighborhood evaluation and
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Machine whose sequence contains the block.
    pub machine: usize,
    /// Position of the first operation of the block.
    pub first: usize,
    /// Position of the last operation of the block.
    pub last: usize,
}

/// An exchange of two positions within one machine's sequence.
///
/// `p1 < p2` by construction, so structurally equal swaps compare equal
/// regardless of argument order; this equality is what the tabu list keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Swap {
    /// Machine on which to perform the swap.
    pub machine: usize,
    /// Earlier of the two positions.
    pub p1: usize,
    /// Later of the two positions.
    pub p2: usize,
}

impl Swap {
    /// Creates a swap, normalizing the positions so that `p1 < p2`.
    pub fn new(machine: usize, p1: usize, p2: usize) -> Self {
        if p1 <= p2 {
            Self { machine, p1, p2 }
        } else {
            Self {
                machine,
                p1: p2,
                p2: p1,
            }
        }
    }

    /// Returns a new order with the swap applied. The original is not
    /// touched.
    pub fn apply(&self, original: &ResourceOrder) -> ResourceOrder {
        let mut result = original.clone();
        result.swap(self.machine, self.p1, self.p2);
        result
    }
}

/// The Nowicki-Smutnicki neighborhood over the resource-order encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nowicki;

impl Nowicki {
    /// Creates the neighborhood.
    pub fn new() -> Self {
        Self
    }

    /// Decomposes the critical path of `order` into machine blocks.
    ///
    /// Each machine's sequence is scanned left to right; a run grows while
    /// the next operation is the critical-path successor of the previous
    /// one. Two operations on the same machine can both lie on the critical
    /// path without the edge between them being critical (the path may
    /// detour over another machine in between); such runs are split. Runs
    /// of a single position are discarded.
    ///
    /// Returns an empty list when `order` does not decode.
    pub fn blocks(&self, order: &ResourceOrder) -> Vec<Block> {
        let Some(schedule) = order.decode() else {
            return Vec::new();
        };
        let critical = schedule.critical_path();
        let position: HashMap<Task, usize> = critical
            .iter()
            .enumerate()
            .map(|(i, &t)| (t, i))
            .collect();

        let mut blocks = Vec::new();
        for machine in 0..order.instance().num_machines() {
            let sequence = order.sequence(machine);
            let mut run_start: Option<usize> = None;
            for (pos, task) in sequence.iter().enumerate() {
                let cp_pos = position.get(task);
                let extends = match (run_start, cp_pos) {
                    (Some(_), Some(&cp)) => {
                        position.get(&sequence[pos - 1]) == Some(&(cp.wrapping_sub(1)))
                    }
                    _ => false,
                };
                if extends {
                    continue;
                }
                if let Some(first) = run_start.take() {
                    if pos - 1 > first {
                        blocks.push(Block {
                            machine,
                            first,
                            last: pos - 1,
                        });
                    }
                }
                if cp_pos.is_some() {
                    run_start = Some(pos);
                }
            }
            if let Some(first) = run_start {
                if sequence.len() - 1 > first {
                    blocks.push(Block {
                        machine,
                        first,
                        last: sequence.len() - 1,
                    });
                }
            }
        }
        blocks
    }

    /// The candidate swaps of one block: the single swap of a two-wide
    /// block, otherwise the first-edge and last-edge swaps.
    pub fn swaps_of(&self, block: &Block) -> Vec<Swap> {
        if block.last == block.first + 1 {
            vec![Swap::new(block.machine, block.first, block.last)]
        } else {
            vec![
                Swap::new(block.machine, block.first, block.first + 1),
                Swap::new(block.machine, block.last - 1, block.last),
            ]
        }
    }

    /// All candidate swaps of `order`, in a reproducible order: machines
    /// ascending, blocks in discovery order, first-edge swap before
    /// last-edge swap.
    pub fn all_swaps(&self, order: &ResourceOrder) -> Vec<Swap> {
        self.blocks(order)
            .iter()
            .flat_map(|block| self.swaps_of(block))
            .collect()
    }
}

impl Neighborhood for Nowicki {
    fn generate_neighbors(&self, current: &ResourceOrder) -> Vec<ResourceOrder> {
        self.all_swaps(current)
            .iter()
            .map(|swap| swap.apply(current))
            .collect()
    }
}
