//! Fuzzy text search over node names, descriptions, ids, labels and archetypes.
//!
//! A term matches a field when it is a subsequence of it (skim scoring), or,
//! failing that, when it is within a small edit distance of the whole field
//! or one of its words. Edit-distance hits rank below every subsequence hit.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use log::debug;
use strsim::normalized_damerau_levenshtein;

use super::types::GraphNode;

/// Maximum number of results a query returns.
pub const SEARCH_LIMIT: usize = 20;

/// Lowest normalized Damerau-Levenshtein similarity accepted as a typo match.
pub const TYPO_SIMILARITY: f64 = 0.7;

/// Searchable field of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchField {
	/// `properties.name`
	Name,
	/// `properties.description`
	Description,
	/// Node id.
	Id,
	/// Node label.
	Label,
	/// `properties.archetype`
	Archetype,
}

impl SearchField {
	/// Descriptions are long enough to contain almost any short subsequence,
	/// so their matches count for half.
	fn weight(self) -> i64 {
		match self {
			SearchField::Description => 1,
			_ => 2,
		}
	}
}

/// How a hit matched. Subsequence hits sort first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
	/// Every character of the term appears in order in the field.
	Subsequence,
	/// The term is a near miss of the field or one of its words.
	Approximate,
}

/// A single ranked result.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchHit {
	/// Position of the node in the indexed slice.
	pub position: usize,
	/// Id of the matched node.
	pub id: String,
	/// Weighted relevance; higher is better.
	pub score: i64,
	/// Field that produced the best score.
	pub field: SearchField,
	/// Whether the hit is a subsequence or a typo match.
	pub kind: MatchKind,
}

#[derive(Clone, Debug)]
struct Entry {
	id: String,
	fields: Vec<(SearchField, String)>,
}

/// Prebuilt search structure. Build once per dataset.
#[derive(Clone, Debug)]
pub struct SearchIndex {
	entries: Vec<Entry>,
	limit: usize,
}

impl SearchIndex {
	/// Indexes the textual fields of every node. Absent fields are skipped.
	pub fn new(nodes: &[GraphNode]) -> Self {
		let entries = nodes
			.iter()
			.map(|node| {
				let mut fields = Vec::with_capacity(5);
				if let Some(name) = node.name() {
					fields.push((SearchField::Name, name.to_string()));
				}
				if let Some(description) = node.text("description") {
					fields.push((SearchField::Description, description.to_string()));
				}
				fields.push((SearchField::Id, node.id.clone()));
				fields.push((SearchField::Label, node.label.as_str().to_string()));
				if let Some(archetype) = node.archetype() {
					fields.push((SearchField::Archetype, archetype.to_string()));
				}
				Entry {
					id: node.id.clone(),
					fields,
				}
			})
			.collect();

		Self {
			entries,
			limit: SEARCH_LIMIT,
		}
	}

	/// Overrides the result cap.
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = limit;
		self
	}

	/// Number of indexed nodes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether nothing was indexed.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Ranked fuzzy search. An empty term (after trimming) or an empty index
	/// yields no results. Equal scores keep dataset order.
	pub fn query(&self, term: &str) -> Vec<SearchHit> {
		let term = term.trim();
		if term.is_empty() || self.entries.is_empty() {
			return Vec::new();
		}

		let matcher = SkimMatcherV2::default();
		let folded = term.to_lowercase();
		let mut hits: Vec<SearchHit> = self
			.entries
			.iter()
			.enumerate()
			.filter_map(|(position, entry)| {
				let best = |kind: MatchKind, scorer: &dyn Fn(&str) -> Option<i64>| {
					entry
						.fields
						.iter()
						.filter_map(|(field, text)| {
							scorer(text).map(|score| (score * field.weight(), *field))
						})
						.max_by_key(|(score, _)| *score)
						.map(|(score, field)| SearchHit {
							position,
							id: entry.id.clone(),
							score,
							field,
							kind,
						})
				};
				best(MatchKind::Subsequence, &|text: &str| score(&matcher, text, term))
					.or_else(|| best(MatchKind::Approximate, &|text: &str| typo_score(text, &folded)))
			})
			.collect();

		hits.sort_by(|a, b| a.kind.cmp(&b.kind).then(b.score.cmp(&a.score)));
		hits.truncate(self.limit);
		debug!("search {:?}: {} hits", term, hits.len());
		hits
	}
}

fn score(matcher: &SkimMatcherV2, text: &str, term: &str) -> Option<i64> {
	matcher
		.fuzzy_match(text, term)
		.or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &term.to_lowercase()))
}

/// Similarity in percent against the whole field or its best word, if it
/// clears [`TYPO_SIMILARITY`]. `term` is already lower-cased.
fn typo_score(text: &str, term: &str) -> Option<i64> {
	let text = text.to_lowercase();
	let best = text
		.split(|c: char| !c.is_alphanumeric())
		.filter(|word| !word.is_empty())
		.chain(std::iter::once(text.as_str()))
		.map(|candidate| normalized_damerau_levenshtein(candidate, term))
		.fold(0.0, f64::max);
	(best >= TYPO_SIMILARITY).then_some((best * 100.0).round() as i64)
}
