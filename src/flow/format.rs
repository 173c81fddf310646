use std::borrow::Cow;

/// Label length used when the caller has no preference.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 20;

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_length` characters, ending in `"..."`.
///
/// `None` stays `None`; text that already fits is borrowed unchanged.
pub fn truncate(text: Option<&str>, max_length: usize) -> Option<Cow<'_, str>> {
	let text = text?;
	if text.chars().count() <= max_length {
		return Some(Cow::Borrowed(text));
	}
	let keep = max_length.saturating_sub(ELLIPSIS.len());
	let mut out: String = text.chars().take(keep).collect();
	out.push_str(ELLIPSIS);
	Some(Cow::Owned(out))
}

/// Compact magnitude: `500`, `1.5K`, `1.5M`, `1.5B`. Below 1000 the value is
/// rounded half away from zero.
pub fn format_magnitude(value: f64, decimals: usize) -> String {
	const SUFFIXES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

	match SUFFIXES.iter().find(|(scale, _)| value.abs() >= *scale) {
		Some((scale, suffix)) => format!("{:.*}{}", decimals, value / scale, suffix),
		None => format!("{}", value.round()),
	}
}

/// `value` as a percentage of `total`; `"0%"` when total is zero.
pub fn percentage_of(value: f64, total: f64, decimals: usize) -> String {
	if total == 0.0 || !total.is_finite() {
		return "0%".to_string();
	}
	format!("{:.*}%", decimals, value / total * 100.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_truncate_boundaries() {
		assert_eq!(truncate(Some("Short"), DEFAULT_TRUNCATE_LENGTH).as_deref(), Some("Short"));
		assert_eq!(
			truncate(Some("This is a very long text that should be truncated"), 10).as_deref(),
			Some("This is...")
		);
		assert_eq!(truncate(None, 10), None);
		assert_eq!(truncate(Some(""), 10).as_deref(), Some(""));
	}

	#[test]
	fn test_truncate_exact_length_is_kept() {
		assert_eq!(truncate(Some("0123456789"), 10).as_deref(), Some("0123456789"));
		assert_eq!(truncate(Some("01234567890"), 10).as_deref(), Some("0123456..."));
	}

	#[test]
	fn test_truncate_counts_chars() {
		assert_eq!(truncate(Some("Ni–Co–Mn cathode"), 8).as_deref(), Some("Ni–Co..."));
	}

	#[test]
	fn test_truncate_borrows_when_unchanged() {
		assert!(matches!(truncate(Some("Tesla"), 20), Some(Cow::Borrowed(_))));
	}

	#[test]
	fn test_format_magnitude_breakpoints() {
		assert_eq!(format_magnitude(500.0, 1), "500");
		assert_eq!(format_magnitude(1500.0, 1), "1.5K");
		assert_eq!(format_magnitude(1_500_000.0, 1), "1.5M");
		assert_eq!(format_magnitude(1_500_000_000.0, 1), "1.5B");
		assert_eq!(format_magnitude(1000.0, 2), "1.00K");
		assert_eq!(format_magnitude(999.0, 1), "999");
	}

	#[test]
	fn test_format_magnitude_rounds_half_away_from_zero() {
		assert_eq!(format_magnitude(12.5, 1), "13");
		assert_eq!(format_magnitude(13.5, 1), "14");
		assert_eq!(format_magnitude(12.4, 1), "12");
	}

	#[test]
	fn test_percentage_of() {
		assert_eq!(percentage_of(10.0, 0.0, 1), "0%");
		assert_eq!(percentage_of(1.0, 4.0, 1), "25.0%");
		assert_eq!(percentage_of(1.0, 3.0, 2), "33.33%");
		assert_eq!(percentage_of(5.0, f64::NAN, 1), "0%");
	}
}
