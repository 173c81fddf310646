use std::fmt;

use serde::{Deserialize, Serialize};

/// Material classification derived from a node name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
	/// Lithium and lithium compounds.
	Lithium,
	/// Cobalt.
	Cobalt,
	/// Nickel.
	Nickel,
	/// Anything that is not one of the named materials.
	Other,
}

/// The named materials, in classification and tie-break priority order.
pub const MATERIAL_CATEGORIES: [Category; 3] = [Category::Lithium, Category::Cobalt, Category::Nickel];

impl Category {
	/// Display label, also the substring the classifier looks for.
	pub const fn label(self) -> &'static str {
		match self {
			Category::Lithium => "Lithium",
			Category::Cobalt => "Cobalt",
			Category::Nickel => "Nickel",
			Category::Other => "Other",
		}
	}

	/// sRGB hex color used for nodes of this category.
	pub const fn color(self) -> &'static str {
		match self {
			Category::Lithium => "#4f9dde",
			Category::Cobalt => "#7c5cd6",
			Category::Nickel => "#3fb68b",
			Category::Other => "#9aa3ad",
		}
	}

	/// True for the three named materials.
	pub const fn is_material(self) -> bool {
		!matches!(self, Category::Other)
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Maps a node name to its category. Case-sensitive, first match wins.
pub fn classify(name: &str) -> Category {
	MATERIAL_CATEGORIES
		.into_iter()
		.find(|c| name.contains(c.label()))
		.unwrap_or(Category::Other)
}

/// Color for a node name or a category label. Unknown input gets the
/// `Other` color.
pub fn color_for(name_or_category: &str) -> &'static str {
	classify(name_or_category).color()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classify_exact_and_contained() {
		assert_eq!(classify("Lithium"), Category::Lithium);
		assert_eq!(classify("Lithium Carbonate"), Category::Lithium);
		assert_eq!(classify("Refined Cobalt"), Category::Cobalt);
		assert_eq!(classify("Nickel Sulfate"), Category::Nickel);
		assert_eq!(classify("CATL"), Category::Other);
	}

	#[test]
	fn test_classify_is_case_sensitive() {
		assert_eq!(classify("lithium"), Category::Other);
		assert_eq!(classify("COBALT"), Category::Other);
	}

	#[test]
	fn test_classify_first_match_wins() {
		assert_eq!(classify("Nickel-Cobalt-Lithium blend"), Category::Lithium);
		assert_eq!(classify("Nickel Cobalt"), Category::Cobalt);
	}

	#[test]
	fn test_classify_total() {
		for name in ["", " ", "Other", "🔋", "Tesla", "Nickelodeon"] {
			let c = classify(name);
			assert!(matches!(
				c,
				Category::Lithium | Category::Cobalt | Category::Nickel | Category::Other
			));
		}
		assert_eq!(classify(""), Category::Other);
	}

	#[test]
	fn test_color_for_names_and_labels() {
		assert_eq!(color_for("Lithium Hydroxide"), Category::Lithium.color());
		assert_eq!(color_for("Cobalt"), Category::Cobalt.color());
		assert_eq!(color_for("Other"), Category::Other.color());
		assert_eq!(color_for("unknown"), Category::Other.color());
		assert!(color_for("Nickel").starts_with('#'));
	}
}
