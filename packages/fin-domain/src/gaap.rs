const GAAP_KEYS: [(&str, &str); 9] = [
	("total current assets", "CURRENT_ASSETS"),
	("current assets", "CURRENT_ASSETS"),
	("total current liabilities", "CURRENT_LIABILITIES"),
	("current liabilities", "CURRENT_LIABILITIES"),
	("total assets", "TOTAL_ASSETS"),
	("total liabilities", "TOTAL_LIABILITIES"),
	("total shareholders' equity", "TOTAL_EQUITY"),
	("net income", "NET_INCOME"),
	("revenue", "REVENUE"),
];

/// Maps a statement line label to its canonical GAAP key, or returns the label unchanged.
pub fn normalize_gaap_label(label: &str) -> &str {
	let key = label.trim().to_lowercase();

	GAAP_KEYS
		.iter()
		.find(|(name, _)| *name == key)
		.map(|(_, canonical)| *canonical)
		.unwrap_or(label)
}
