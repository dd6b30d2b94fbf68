// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behaviour every tie-break policy must share. These span the dispatcher,
// the policies and the builder, so they live here rather than in any single
// source file.

use std::collections::HashSet;

use lazydispatch::builder::DispatcherBuilder;
use lazydispatch::dispatcher::Dispatcher;
use lazydispatch::tie_break::{HigherKeyFirst, LowerKeyFirst, NewestFirst, OldestFirst, TieBreak};
use lazydispatch::traits::PriorityDispatch;

type BoxedDispatch = Box<dyn PriorityDispatch<u32, u32, u32>>;

/// One empty dispatcher per tie-break policy.
fn all_policies() -> Vec<BoxedDispatch> {
    let mut out: Vec<BoxedDispatch> = Vec::new();
    out.push(Box::new(Dispatcher::<u32, u32, u32, OldestFirst>::new()));
    out.push(Box::new(Dispatcher::<u32, u32, u32, NewestFirst>::new()));
    out.push(Box::new(Dispatcher::<u32, u32, u32, HigherKeyFirst>::new()));
    out.push(Box::new(Dispatcher::<u32, u32, u32, LowerKeyFirst>::new()));
    out
}

// ==============================================
// Stale Discard
// ==============================================
//
// After add(k, p1) and edit(k, p2), k is never returned at p1 and is
// returned exactly once at p2.

mod stale_discard {
    use super::*;

    #[test]
    fn edited_key_surfaces_once_at_new_priority() {
        for mut d in all_policies() {
            d.add(1, 10, 100);
            d.add(2, 5, 200);
            d.edit(&1, 1);
            d.edit(&2, 7);

            assert_eq!(d.pop_top(), Some((2, 7, 200)));
            assert_eq!(d.pop_top(), Some((1, 1, 100)));
            assert_eq!(d.pop_top(), None);
        }
    }

    #[test]
    fn repeated_edits_leave_one_live_snapshot() {
        for mut d in all_policies() {
            d.add(3, 0, 0);
            for p in 1..=50 {
                d.edit(&3, p);
            }
            assert_eq!(d.pop_top(), Some((3, 50, 0)));
            assert_eq!(d.pop_top(), None);
        }
    }
}

// ==============================================
// Lazy Removal
// ==============================================

mod lazy_removal {
    use super::*;

    #[test]
    fn removed_keys_never_pop() {
        for mut d in all_policies() {
            for k in 0..20 {
                d.add(k, k, k);
            }
            for k in (0..20).step_by(2) {
                d.remove(&k);
            }
            let mut seen = HashSet::new();
            while let Some((k, _, _)) = d.pop_top() {
                assert_eq!(k % 2, 1, "removed key {} was dispatched", k);
                assert!(seen.insert(k));
            }
            assert_eq!(seen.len(), 10);
        }
    }

    #[test]
    fn remove_then_readd_dispatches_new_entry() {
        for mut d in all_policies() {
            d.add(1, 9, 1);
            d.remove(&1);
            d.add(1, 2, 2);
            assert_eq!(d.pop_top(), Some((1, 2, 2)));
            assert_eq!(d.pop_top(), None);
        }
    }
}

// ==============================================
// Max-Extraction Order and Empty-on-Drain
// ==============================================

mod ordering {
    use super::*;

    fn drain_priorities<T: TieBreak<u32>>() -> Vec<u32> {
        let mut d: Dispatcher<u32, u32, (), T> = Dispatcher::new();
        for k in 0..64u32 {
            d.add(k, (k * 37) % 11, ());
        }
        for k in (0..64u32).step_by(5) {
            d.edit(&k, (k * 13) % 11);
        }
        let out: Vec<u32> = d.drain_ordered().map(|(_, p, _)| p).collect();
        assert_eq!(d.pop_top(), None);
        assert_eq!(d.pop_top(), None);
        out
    }

    #[test]
    fn priorities_are_non_increasing_for_every_policy() {
        for priorities in [
            drain_priorities::<OldestFirst>(),
            drain_priorities::<NewestFirst>(),
            drain_priorities::<HigherKeyFirst>(),
            drain_priorities::<LowerKeyFirst>(),
        ] {
            assert_eq!(priorities.len(), 64);
            assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn empty_dispatcher_stays_empty() {
        for mut d in all_policies() {
            assert!(d.is_empty());
            for _ in 0..3 {
                assert_eq!(d.pop_top(), None);
            }
        }
    }
}

// ==============================================
// Compaction
// ==============================================
//
// Compaction is an optimisation only: draining a compacted dispatcher must
// yield exactly what draining an uncompacted clone yields.

mod compaction {
    use super::*;

    fn churned<T: TieBreak<u32>>() -> Dispatcher<u32, u32, u32, T> {
        let mut d = Dispatcher::new();
        for round in 0..10u32 {
            for k in 0..30u32 {
                d.add(k, (k + round) % 4, round);
            }
            for k in (0..30u32).step_by(7) {
                d.remove(&k);
            }
        }
        d
    }

    fn assert_compaction_transparent<T: TieBreak<u32>>() {
        let plain = churned::<T>();
        let mut compacted = plain.clone();
        compacted.compact();
        assert_eq!(compacted.heap_len(), compacted.len());
        compacted.check_invariants().unwrap();
        assert_eq!(plain.into_sorted_vec(), compacted.into_sorted_vec());
    }

    #[test]
    fn compaction_preserves_dispatch_order() {
        assert_compaction_transparent::<OldestFirst>();
        assert_compaction_transparent::<NewestFirst>();
        assert_compaction_transparent::<HigherKeyFirst>();
        assert_compaction_transparent::<LowerKeyFirst>();
    }

    #[test]
    fn builder_auto_compaction_matches_manual() {
        let mut auto = DispatcherBuilder::new()
            .compact_factor(2)
            .build::<u32, u32, u32>();
        let mut manual: Dispatcher<u32, u32, u32> = Dispatcher::new();
        for i in 0..500u32 {
            let key = i % 13;
            auto.add(key, i % 5, i);
            manual.add(key, i % 5, i);
            assert!(auto.heap_len() <= auto.len().max(1) * 2);
        }
        assert!(manual.heap_len() > manual.len() * 2);
        assert_eq!(auto.into_sorted_vec(), manual.into_sorted_vec());
    }
}
