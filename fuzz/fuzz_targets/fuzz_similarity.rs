#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz pair scoring.
///
/// The input is split at the first newline into two part numbers; the
/// score must stay in [0, 1].
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (a, b) = s.split_once('\n').unwrap_or((s, s));
        let score = mpn_tools::similarity(a, b);
        assert!((0.0..=1.0).contains(&score), "{a:?} vs {b:?}: {score}");
    }
});
