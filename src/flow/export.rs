use std::fmt::{self, Write};

use super::category::classify;
use super::types::FlowLink;

/// Header row of the CSV export. Downstream tooling keys on it.
pub const CSV_HEADER: &str = "Source,Target,Value,Source Category,Target Category";

/// Serializes `links` as CSV, one row per link after the header.
///
/// Returns an empty string when there is nothing to export.
pub fn links_to_csv(links: &[FlowLink]) -> String {
	if links.is_empty() {
		return String::new();
	}
	let mut csv = String::from(CSV_HEADER);
	// writing into a String cannot fail
	let _ = write_rows(&mut csv, links);
	csv
}

fn write_rows(csv: &mut String, links: &[FlowLink]) -> fmt::Result {
	for link in links {
		write!(
			csv,
			"\n{},{},{},{},{}",
			quoted(&link.source),
			quoted(&link.target),
			link.value,
			quoted(classify(&link.source).label()),
			quoted(classify(&link.target).label()),
		)?;
	}
	Ok(())
}

fn quoted(field: &str) -> String {
	format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_links_export_nothing() {
		assert_eq!(links_to_csv(&[]), "");
	}

	#[test]
	fn test_single_link_shape() {
		let csv = links_to_csv(&[FlowLink::new("Lithium", "CATL", 100.0)]);
		let lines: Vec<&str> = csv.lines().collect();
		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0], CSV_HEADER);
		assert!(lines[1].contains("\"Lithium\""));
		assert!(lines[1].contains("\"CATL\""));
		assert!(lines[1].contains(",100,"));
		assert_eq!(lines[1], "\"Lithium\",\"CATL\",100,\"Lithium\",\"Other\"");
	}

	#[test]
	fn test_fractional_values_and_quotes() {
		let csv = links_to_csv(&[
			FlowLink::new("Cobalt \"DRC\"", "Panasonic", 12.5),
			FlowLink::new("Nickel", "Tesla", 0.0),
		]);
		let lines: Vec<&str> = csv.split('\n').collect();
		assert_eq!(lines.len(), 3);
		assert_eq!(lines[1], "\"Cobalt \"\"DRC\"\"\",\"Panasonic\",12.5,\"Cobalt\",\"Other\"");
		assert_eq!(lines[2], "\"Nickel\",\"Tesla\",0,\"Nickel\",\"Other\"");
		assert!(!csv.ends_with('\n'));
	}
}
