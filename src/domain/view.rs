//! View Projector
//!
//! Pure projection of the working set into an ordered display list.
//! No state, no I/O; preference sets are only read.
//!
//! Search matches text, author and category, case-insensitively.

use rand::seq::SliceRandom;

use super::preferences::PreferenceSet;
use super::quote::{Quote, SortMode};

/// Ephemeral view parameters, reset on every run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub search_query: String,
    pub sort_mode: SortMode,
}

/// One row of the display list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayQuote {
    pub quote: Quote,
    pub is_liked: bool,
    pub is_bookmarked: bool,
}

/// Whether `quote` passes the search filter
pub fn matches_query(quote: &Quote, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    quote.text.to_lowercase().contains(&needle)
        || quote.author.to_lowercase().contains(&needle)
        || quote.category.to_lowercase().contains(&needle)
}

/// Filter, then order, then annotate with preference membership.
///
/// `Random` order is a fresh unseeded shuffle, so two projections of the same
/// inputs may differ.
pub fn project(
    working_set: &[Quote],
    params: &ViewParams,
    liked: &PreferenceSet,
    bookmarked: &PreferenceSet,
) -> Vec<DisplayQuote> {
    let mut rows: Vec<DisplayQuote> = working_set
        .iter()
        .filter(|q| matches_query(q, &params.search_query))
        .map(|q| DisplayQuote {
            quote: q.clone(),
            is_liked: liked.contains(q.identity()),
            is_bookmarked: bookmarked.contains(q.identity()),
        })
        .collect();

    match params.sort_mode {
        SortMode::Recent => {}
        SortMode::Popular => rows = stable_partition(rows, |row| row.is_liked),
        SortMode::Random => rows.shuffle(&mut rand::thread_rng()),
    }

    rows
}

/// Elements matching `pred` first; each group keeps its relative order.
fn stable_partition<T>(items: Vec<T>, pred: impl Fn(&T) -> bool) -> Vec<T> {
    let (mut head, tail): (Vec<T>, Vec<T>) = items.into_iter().partition(|item| pred(item));
    head.extend(tail);
    head
}

#[cfg(test)]
mod tests {
    use super::*;

    fn working_set() -> Vec<Quote> {
        vec![
            Quote::new("The only way out is through.", "Robert Frost", "life"),
            Quote::new("Simplicity is the ultimate sophistication.", "Leonardo da Vinci", "wisdom"),
            Quote::new("Laughter is the best medicine.", "Proverb", "humor"),
            Quote::new("Know thyself.", "Socrates", "wisdom"),
            Quote::new("Love all, trust a few.", "William Shakespeare", "love"),
        ]
    }

    fn texts(rows: &[DisplayQuote]) -> Vec<&str> {
        rows.iter().map(|r| r.quote.text.as_str()).collect()
    }

    fn params(query: &str, sort_mode: SortMode) -> ViewParams {
        ViewParams {
            search_query: query.to_string(),
            sort_mode,
        }
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let set = working_set();
        let rows = project(&set, &ViewParams::default(), &PreferenceSet::new(), &PreferenceSet::new());
        let expected: Vec<&str> = set.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts(&rows), expected);
    }

    #[test]
    fn test_filter_matches_text_author_and_category() {
        let set = working_set();
        let none = PreferenceSet::new();

        let by_text = project(&set, &params("MEDICINE", SortMode::Recent), &none, &none);
        assert_eq!(texts(&by_text), vec!["Laughter is the best medicine."]);

        let by_author = project(&set, &params("socr", SortMode::Recent), &none, &none);
        assert_eq!(texts(&by_author), vec!["Know thyself."]);

        let by_category = project(&set, &params("Wisdom", SortMode::Recent), &none, &none);
        assert_eq!(
            texts(&by_category),
            vec!["Simplicity is the ultimate sophistication.", "Know thyself."]
        );
    }

    #[test]
    fn test_filter_is_exact_iff_relation() {
        let set = working_set();
        let none = PreferenceSet::new();
        for query in ["", "the", "wis", "zzz", "Love", " "] {
            let rows = project(&set, &params(query, SortMode::Recent), &none, &none);
            for quote in &set {
                let q = query.to_lowercase();
                let expected = q.is_empty()
                    || quote.text.to_lowercase().contains(&q)
                    || quote.author.to_lowercase().contains(&q)
                    || quote.category.to_lowercase().contains(&q);
                let present = rows.iter().any(|r| &r.quote == quote);
                assert_eq!(present, expected, "query {:?} quote {:?}", query, quote.text);
            }
        }
    }

    #[test]
    fn test_recent_is_filtered_subsequence() {
        let set = working_set();
        let none = PreferenceSet::new();
        let rows = project(&set, &params("t", SortMode::Recent), &none, &none);
        let expected: Vec<&str> = set
            .iter()
            .filter(|q| matches_query(q, "t"))
            .map(|q| q.text.as_str())
            .collect();
        assert_eq!(texts(&rows), expected);
    }

    #[test]
    fn test_popular_is_stable_partition() {
        let set = working_set();
        let liked: PreferenceSet = ["Know thyself.", "Simplicity is the ultimate sophistication."]
            .into_iter()
            .collect();
        let rows = project(&set, &params("", SortMode::Popular), &liked, &PreferenceSet::new());

        assert_eq!(
            texts(&rows),
            vec![
                "Simplicity is the ultimate sophistication.",
                "Know thyself.",
                "The only way out is through.",
                "Laughter is the best medicine.",
                "Love all, trust a few.",
            ]
        );
        assert!(rows[0].is_liked && rows[1].is_liked);
        assert!(rows[2..].iter().all(|r| !r.is_liked));
    }

    #[test]
    fn test_popular_without_likes_keeps_order() {
        let set = working_set();
        let none = PreferenceSet::new();
        let recent = project(&set, &params("", SortMode::Recent), &none, &none);
        let popular = project(&set, &params("", SortMode::Popular), &none, &none);
        assert_eq!(recent, popular);
    }

    #[test]
    fn test_random_preserves_multiset() {
        let set = working_set();
        let none = PreferenceSet::new();
        for _ in 0..20 {
            let rows = project(&set, &params("", SortMode::Random), &none, &none);
            assert_eq!(rows.len(), set.len());
            let mut got = texts(&rows);
            let mut expected: Vec<&str> = set.iter().map(|q| q.text.as_str()).collect();
            got.sort();
            expected.sort();
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_flags_follow_membership() {
        let set = working_set();
        let liked: PreferenceSet = ["Know thyself."].into_iter().collect();
        let bookmarked: PreferenceSet = ["Know thyself.", "Love all, trust a few."].into_iter().collect();
        let rows = project(&set, &ViewParams::default(), &liked, &bookmarked);

        let know = rows.iter().find(|r| r.quote.text == "Know thyself.").unwrap();
        assert!(know.is_liked && know.is_bookmarked);
        let love = rows.iter().find(|r| r.quote.text == "Love all, trust a few.").unwrap();
        assert!(!love.is_liked && love.is_bookmarked);
        assert_eq!(liked.len(), 1);
    }

    #[test]
    fn test_duplicate_wording_shares_preference_state() {
        let set = vec![
            Quote::new("Carpe diem.", "Horace", "life"),
            Quote::new("Carpe diem.", "Anonymous", "motivation"),
        ];
        let liked: PreferenceSet = ["Carpe diem."].into_iter().collect();
        let rows = project(&set, &ViewParams::default(), &liked, &PreferenceSet::new());
        assert!(rows.iter().all(|r| r.is_liked));
    }
}
