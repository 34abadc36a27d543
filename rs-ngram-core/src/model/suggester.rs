use super::frequency_table::FrequencyTable;

/// Number of prefixes offered to the user.
pub const MAX_SUGGESTIONS: usize = 10;

/// Renders the most frequent contexts of `table` as space-joined strings.
///
/// Ranked by descending count, ties in first-seen order, at most
/// `MAX_SUGGESTIONS` entries.
pub fn top_prefixes(table: &FrequencyTable) -> Vec<String> {
	table
		.most_common(MAX_SUGGESTIONS)
		.into_iter()
		.map(|(ngram, _)| ngram.join(" "))
		.collect()
}

/// Suggests the most frequent `n-1` word prefixes of `tokens`.
///
/// Returns an empty list for `n < 2`, without counting anything.
pub fn suggest_prefixes(tokens: &[String], n: usize) -> Vec<String> {
	if n < 2 {
		return Vec::new();
	}
	// n - 1 >= 1, counting cannot fail
	FrequencyTable::count(tokens, n - 1)
		.map(|table| top_prefixes(&table))
		.unwrap_or_default()
}
