#![no_main]

use libfuzzer_sys::fuzz_target;
use lazydispatch::dispatcher::Dispatcher;

// Fuzz arbitrary operation sequences on Dispatcher
//
// Random sequences of add, edit, remove, pop_top, peek_top, compact and
// clear, checking bookkeeping after every step.
fuzz_target!(|data: &[u8]| {
    let mut d: Dispatcher<u8, u8, u32> = Dispatcher::new();

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 7;
        let key = data[idx + 1] % 32;
        let priority = data[idx + 2];

        match op {
            0 => {
                // add
                d.add(key, priority, idx as u32);
                assert_eq!(d.priority_of(&key), Some(&priority));
            }
            1 => {
                // edit
                let was_live = d.contains(&key);
                let previous = d.edit(&key, priority);
                assert_eq!(previous.is_some(), was_live);
                if was_live {
                    assert_eq!(d.priority_of(&key), Some(&priority));
                }
            }
            2 => {
                // remove
                let old_len = d.len();
                if d.remove(&key).is_some() {
                    assert_eq!(d.len(), old_len - 1);
                }
                assert!(!d.contains(&key));
            }
            3 => {
                // pop_top
                let old_len = d.len();
                match d.pop_top() {
                    Some((k, _, _)) => {
                        assert_eq!(d.len(), old_len - 1);
                        assert!(!d.contains(&k));
                    }
                    None => assert!(d.is_empty()),
                }
            }
            4 => {
                // peek_top
                let old_len = d.len();
                let peeked = d.peek_top().map(|(k, p, _)| (*k, *p));
                assert_eq!(d.len(), old_len);
                assert_eq!(peeked.is_none(), d.is_empty());
            }
            5 => {
                // compact
                let old_len = d.len();
                d.compact();
                assert_eq!(d.len(), old_len);
                assert_eq!(d.heap_len(), d.len());
            }
            6 => {
                // clear
                d.clear();
                assert!(d.is_empty());
                assert_eq!(d.heap_len(), 0);
            }
            _ => unreachable!(),
        }

        assert!(d.heap_len() >= d.len());
        assert!(d.check_invariants().is_ok());
        idx += 3;
    }
});
