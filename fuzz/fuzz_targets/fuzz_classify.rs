#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz normalization and classification.
///
/// Any string must classify without panicking, and classifying the
/// normalized form must give the same answer.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let matcher = mpn_tools::default_matcher();
        let part = matcher.classify(s);
        assert_eq!(matcher.classify(part.mpn.as_str()), part);
    }
});
