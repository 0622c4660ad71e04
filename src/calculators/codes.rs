//! Ordering-code tables shared by several decoders.

/// Tolerance letter to percent (`F` is ±1 %, `J` ±5 %).
///
/// `B`, `C` and `D` are read as percent here; capacitor decoders convert
/// them from picofarads first when the value is small.
pub(crate) fn tolerance_percent(letter: &str) -> Option<f64> {
    Some(match letter {
        "A" => 0.05,
        "B" => 0.1,
        "C" => 0.25,
        "D" => 0.5,
        "F" => 1.0,
        "G" => 2.0,
        "J" => 5.0,
        "K" => 10.0,
        "M" => 20.0,
        "Z" => 80.0,
        _ => return None,
    })
}

/// Absolute capacitance tolerance letters in picofarads.
pub(crate) fn tolerance_picofarads(letter: &str) -> Option<f64> {
    Some(match letter {
        "B" => 0.1,
        "C" => 0.25,
        "D" => 0.5,
        _ => return None,
    })
}

/// Two-character EIA rated-voltage code (`1H` is 50 V).
pub(crate) fn eia_voltage(code: &str) -> Option<f64> {
    Some(match code {
        "0E" => 2.5,
        "0G" => 4.0,
        "0J" => 6.3,
        "1A" => 10.0,
        "1C" => 16.0,
        "1E" => 25.0,
        "1V" => 35.0,
        "1H" => 50.0,
        "1J" => 63.0,
        "1K" => 80.0,
        "2A" => 100.0,
        "2C" => 160.0,
        "2D" => 200.0,
        "2E" => 250.0,
        "2V" => 350.0,
        "2G" => 400.0,
        "2W" => 450.0,
        "2J" => 630.0,
        "3A" => 1000.0,
        _ => return None,
    })
}

/// Metric chip size to the imperial code used as the package key.
pub(crate) fn metric_to_imperial(metric: &str) -> Option<&'static str> {
    Some(match metric {
        "0603" => "0201",
        "1005" => "0402",
        "1608" => "0603",
        "2012" => "0805",
        "3216" => "1206",
        "3225" => "1210",
        "4532" => "1812",
        "5750" => "2220",
        _ => return None,
    })
}

/// Interned imperial chip size.
pub(crate) fn imperial(size: &str) -> Option<&'static str> {
    Some(match size {
        "0201" => "0201",
        "0402" => "0402",
        "0603" => "0603",
        "0805" => "0805",
        "1206" => "1206",
        "1210" => "1210",
        "1812" => "1812",
        "2010" => "2010",
        "2220" => "2220",
        "2512" => "2512",
        _ => return None,
    })
}

/// Typical thick-film power rating of a chip size in watts.
pub(crate) fn chip_power_rating(size: &str) -> Option<f64> {
    Some(match size {
        "0201" => 0.05,
        "0402" => 0.0625,
        "0603" => 0.1,
        "0805" => 0.125,
        "1206" => 0.25,
        "1210" => 0.5,
        "1812" | "2010" => 0.75,
        "2512" => 1.0,
        _ => return None,
    })
}

/// First package whose suffix code starts `suffix`, in table order.
pub(crate) fn suffix_package(suffix: &str, table: &[(&str, &'static str)]) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| suffix.starts_with(code))
        .map(|(_, package)| *package)
}
