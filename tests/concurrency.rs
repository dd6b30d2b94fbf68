// ==============================================
// CONCURRENT DISPATCHER TESTS (integration)
// ==============================================
//
// Pop-and-validate must be atomic with respect to edit/remove on other
// threads. These require multi-threaded execution and cannot live inline.

#![cfg(feature = "concurrency")]

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use lazydispatch::concurrent::ConcurrentDispatcher;
use lazydispatch::tie_break::HigherKeyFirst;

// ==============================================
// Remove racing pop
// ==============================================
//
// A key removed by one thread while another drains must be returned at most
// once, and never after the remover observed a successful removal.

mod remove_vs_pop {
    use super::*;

    #[test]
    fn each_key_is_removed_or_popped_exactly_once() {
        for _ in 0..50 {
            let d: Arc<ConcurrentDispatcher<u32, u32, (), HigherKeyFirst>> =
                Arc::new(ConcurrentDispatcher::new());
            for k in 0..200 {
                d.add(k, k % 5, ());
            }
            let barrier = Arc::new(Barrier::new(2));

            let remover = {
                let d = Arc::clone(&d);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    (0..200)
                        .filter(|k| d.remove(k).is_some())
                        .collect::<Vec<u32>>()
                })
            };
            let popper = {
                let d = Arc::clone(&d);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut got = Vec::new();
                    while let Some((k, _, _)) = d.pop_top() {
                        got.push(k);
                    }
                    got
                })
            };

            let removed = remover.join().unwrap();
            let popped = popper.join().unwrap();
            let removed_set: HashSet<u32> = removed.iter().copied().collect();
            let popped_set: HashSet<u32> = popped.iter().copied().collect();

            assert_eq!(removed.len(), removed_set.len());
            assert_eq!(popped.len(), popped_set.len());
            assert!(removed_set.is_disjoint(&popped_set));
            // Leftovers are possible if the popper finished first.
            let leftover = d.len();
            assert_eq!(removed.len() + popped.len() + leftover, 200);
        }
    }
}

// ==============================================
// Edit racing pop
// ==============================================

mod edit_vs_pop {
    use super::*;

    #[test]
    fn popped_priority_is_a_value_the_key_actually_held() {
        let d: Arc<ConcurrentDispatcher<u32, u32, ()>> = Arc::new(ConcurrentDispatcher::new());
        for k in 0..100 {
            d.add(k, 0, ());
        }
        let barrier = Arc::new(Barrier::new(2));

        let editor = {
            let d = Arc::clone(&d);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for k in 0..100 {
                    d.edit(&k, 1000 + k);
                }
            })
        };
        let popper = {
            let d = Arc::clone(&d);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                std::iter::from_fn(|| d.pop_top()).collect::<Vec<_>>()
            })
        };

        editor.join().unwrap();
        let mut popped = popper.join().unwrap();
        popped.extend(std::iter::from_fn(|| d.pop_top()));

        assert_eq!(popped.len(), 100);
        for (k, p, ()) in popped {
            assert!(p == 0 || p == 1000 + k, "key {} popped at {}", k, p);
        }
        assert!(d.is_empty());
    }
}
