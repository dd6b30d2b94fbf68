#![no_main]

use libfuzzer_sys::fuzz_target;
use lazydispatch::apps::Router;

// Fuzz arbitrary add/forward/count sequences on Router
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let limit = usize::from(data[0] % 8) + 1;
    let mut router = Router::new(limit);

    for chunk in data[1..].chunks_exact(4) {
        let src = i32::from(chunk[1] % 4);
        let dst = i32::from(chunk[2] % 4);
        let ts = i32::from(chunk[3]);
        match chunk[0] % 3 {
            0 => {
                router.add_packet(src, dst, ts);
                assert!(router.len() <= limit);
            }
            1 => {
                let old_len = router.len();
                if router.forward_packet().is_some() {
                    assert_eq!(router.len(), old_len - 1);
                }
            }
            2 => {
                let total: usize = (0..4).map(|d| router.get_count(d, i32::MIN, i32::MAX)).sum();
                assert_eq!(total, router.len());
            }
            _ => unreachable!(),
        }
    }
});
