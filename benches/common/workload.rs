//! Operation streams for dispatcher benchmarks.
//!
//! Streams are generated up front from a seeded `SmallRng` so every
//! iteration replays the same sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use lazydispatch::dispatcher::Dispatcher;
use lazydispatch::tie_break::TieBreak;

#[derive(Debug, Clone, Copy)]
pub enum Op {
    Add { key: u64, priority: u32 },
    Edit { key: u64, priority: u32 },
    Remove { key: u64 },
    Pop,
}

/// Relative weights of each operation kind.
#[derive(Debug, Clone, Copy)]
pub struct Mix {
    pub add: u32,
    pub edit: u32,
    pub remove: u32,
    pub pop: u32,
}

impl Mix {
    /// Scheduler-like traffic: mostly adds and pops.
    pub const BALANCED: Mix = Mix {
        add: 4,
        edit: 2,
        remove: 1,
        pop: 3,
    };

    /// Re-prioritisation storm: stale snapshots pile up.
    pub const EDIT_HEAVY: Mix = Mix {
        add: 1,
        edit: 8,
        remove: 1,
        pop: 1,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub priorities: u32,
    pub mix: Mix,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn ops(self, count: usize) -> Vec<Op> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let total = self.mix.add + self.mix.edit + self.mix.remove + self.mix.pop;
        (0..count)
            .map(|_| {
                let roll = rng.gen_range(0..total);
                let key = rng.gen_range(0..self.universe.max(1));
                let priority = rng.gen_range(0..self.priorities.max(1));
                if roll < self.mix.add {
                    Op::Add { key, priority }
                } else if roll < self.mix.add + self.mix.edit {
                    Op::Edit { key, priority }
                } else if roll < self.mix.add + self.mix.edit + self.mix.remove {
                    Op::Remove { key }
                } else {
                    Op::Pop
                }
            })
            .collect()
    }
}

/// Replays `ops`, returning how many pops found a live entry.
pub fn replay<T: TieBreak<u64>>(d: &mut Dispatcher<u64, u32, u64, T>, ops: &[Op]) -> usize {
    let mut found = 0;
    for op in ops {
        match *op {
            Op::Add { key, priority } => {
                d.add(key, priority, key);
            },
            Op::Edit { key, priority } => {
                d.edit(&key, priority);
            },
            Op::Remove { key } => {
                d.remove(&key);
            },
            Op::Pop => {
                if d.pop_top().is_some() {
                    found += 1;
                }
            },
        }
    }
    found
}
