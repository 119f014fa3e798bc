use regex::Regex;

// Grouped thousands first so "1,234.5" is not read as "1".
const AMOUNT_PATTERN: &str = r"\(?-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?\)?";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParsedNumber {
	Found(f64),
	NotFound,
}
impl ParsedNumber {
	pub fn value(self) -> Option<f64> {
		match self {
			Self::Found(value) => Some(value),
			Self::NotFound => None,
		}
	}
}

/// Extracts the first number embedded in free text.
///
/// Thousands separators are accepted, and an amount wrapped in parentheses is read as negative,
/// following statement convention.
pub fn parse_amount(text: &str) -> ParsedNumber {
	let Some(re) = Regex::new(AMOUNT_PATTERN).ok() else {
		return ParsedNumber::NotFound;
	};
	let Some(found) = re.find(text) else {
		return ParsedNumber::NotFound;
	};
	let raw = found.as_str();
	let negative_parens = raw.starts_with('(') && raw.ends_with(')');
	let digits: String =
		raw.chars().filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-')).collect();

	match digits.parse::<f64>() {
		Ok(value) if negative_parens => ParsedNumber::Found(-value.abs()),
		Ok(value) => ParsedNumber::Found(value),
		Err(_) => ParsedNumber::NotFound,
	}
}
