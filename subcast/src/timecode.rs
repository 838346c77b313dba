/// Parse a transcript timestamp into seconds.
///
/// Accepts `MM:SS`, `MM:SS.ss`, `HH:MM:SS` and `HH:MM:SS.ss`; a comma works
/// as the decimal separator, so SRT-style `00:01:02,500` parses too. Lenient
/// by design: anything unparseable (or negative, or non-finite) yields `0.0`.
/// Callers that need strict validation pre-filter with the detection
/// patterns.
pub fn parse_seconds(timestamp: &str) -> f64 {
    let normalized = timestamp.trim().replace(',', ".");
    let fields: Vec<f64> = normalized
        .split(':')
        .map(str::parse)
        .collect::<Result<_, _>>()
        .unwrap_or_default();

    let seconds = match fields.as_slice() {
        [m, s] => m * 60.0 + s,
        [h, m, s] => h * 3600.0 + m * 60.0 + s,
        _ => 0.0,
    };
    if seconds.is_finite() && seconds >= 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Parse a bare Zencastr stamp (`M:SS.cc` or `H:MM:SS.cc`) into centiseconds.
///
/// Strict companion to [`parse_seconds`] for input already vetted against
/// [`ZENCASTR_STAMP`](crate::detect::ZENCASTR_STAMP); returns `None` on any
/// shape mismatch instead of guessing.
pub fn parse_centis(stamp: &str) -> Option<u64> {
    let (clock, frac) = stamp.trim().split_once('.')?;
    if frac.len() != 2 {
        return None;
    }
    let centis: u64 = frac.parse().ok()?;

    let fields: Vec<u64> = clock
        .split(':')
        .map(|part| part.parse().ok())
        .collect::<Option<_>>()?;
    let clock_secs = match fields.as_slice() {
        [m, s] => m * 60 + s,
        [h, m, s] => h * 3600 + m * 60 + s,
        _ => return None,
    };
    Some(clock_secs * 100 + centis)
}

/// Format centiseconds as zero-padded `HH:MM:SS,mmm`.
///
/// Hours are unbounded and never wrap.
pub fn format_centis(centis: u64) -> String {
    let h = centis / 360_000;
    let m = (centis % 360_000) / 6_000;
    let s = (centis % 6_000) / 100;
    let ms = (centis % 100) * 10;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_minutes_shape() {
        assert_eq!(parse_seconds("0:30"), 30.0);
        assert_eq!(parse_seconds("2:05"), 125.0);
        assert_eq!(parse_seconds("90:00"), 5400.0);
        assert_eq!(parse_seconds("0:00.29"), 0.29);
    }

    #[test]
    fn test_parse_seconds_hours_shape() {
        assert_eq!(parse_seconds("1:30:00"), 5400.0);
        assert_eq!(parse_seconds("0:02:05"), 125.0);
        assert_eq!(parse_seconds("10:00:00.50"), 36000.5);
    }

    #[test]
    fn test_parse_seconds_comma_decimal() {
        assert_eq!(parse_seconds("00:01:02,500"), 62.5);
        assert_eq!(parse_seconds(" 0:05,25 "), 5.25);
    }

    #[test]
    fn test_parse_seconds_unparseable_yields_zero() {
        assert_eq!(parse_seconds(""), 0.0);
        assert_eq!(parse_seconds("hello"), 0.0);
        assert_eq!(parse_seconds("42"), 0.0);
        assert_eq!(parse_seconds("1:2:3:4"), 0.0);
        assert_eq!(parse_seconds("12:xx"), 0.0);
    }

    #[test]
    fn test_parse_seconds_rejects_negative_and_non_finite() {
        assert_eq!(parse_seconds("0:-30"), 0.0);
        assert_eq!(parse_seconds("-1:30:00"), 0.0);
        assert_eq!(parse_seconds("inf:00"), 0.0);
        assert_eq!(parse_seconds("NaN:00"), 0.0);
    }

    #[test]
    fn test_parse_centis() {
        assert_eq!(parse_centis("0:00.29"), Some(29));
        assert_eq!(parse_centis("00:00.29"), Some(29));
        assert_eq!(parse_centis("12:34.56"), Some(75456));
        assert_eq!(parse_centis("1:02:03.45"), Some(372345));
    }

    #[test]
    fn test_parse_centis_rejects_malformed() {
        assert_eq!(parse_centis("0:00"), None);
        assert_eq!(parse_centis("0:00.2"), None);
        assert_eq!(parse_centis("0:00.299"), None);
        assert_eq!(parse_centis("a:00.29"), None);
        assert_eq!(parse_centis("1:2:3:4.00"), None);
        assert_eq!(parse_centis("29"), None);
    }

    #[test]
    fn test_format_centis() {
        assert_eq!(format_centis(0), "00:00:00,000");
        assert_eq!(format_centis(29), "00:00:00,290");
        assert_eq!(format_centis(529), "00:00:05,290");
        assert_eq!(format_centis(359_999), "00:59:59,990");
        assert_eq!(format_centis(360_000), "01:00:00,000");
    }

    #[test]
    fn test_format_centis_hours_unbounded() {
        assert_eq!(format_centis(90 * 360_000), "90:00:00,000");
        assert_eq!(format_centis(100 * 360_000 + 123), "100:00:01,230");
    }

    #[test]
    fn test_round_trip_centis_through_parse() {
        for c in [0u64, 1, 29, 99, 100, 529, 836, 359_999, 360_000, 12_345_678] {
            let rendered = format_centis(c);
            let back = (parse_seconds(&rendered) * 100.0).round() as u64;
            assert_eq!(back, c, "round trip failed for {rendered}");
        }
    }
}
