use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern compiles"));

/// Normalise free-form tag input: split on commas, strip all whitespace from
/// each segment, rejoin with commas.
///
/// Empty segments survive so a trailing comma typed mid-edit is not eaten;
/// use [`split_tags`] to get the final list.
pub fn normalize_tag_input(raw: &str) -> String {
    raw.split(',')
        .map(|segment| WHITESPACE.replace_all(segment.trim(), "").into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Normalised, non-empty tags in input order.
pub fn split_tags(raw: &str) -> Vec<String> {
    normalize_tag_input(raw)
        .split(',')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Union of tag lists, keeping first-seen order.
pub fn collect_vocabulary<'a, I>(tag_lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen = HashSet::new();
    let mut vocabulary = Vec::new();
    for tags in tag_lists {
        for tag in tags {
            if seen.insert(tag.as_str()) {
                vocabulary.push(tag.clone());
            }
        }
    }
    vocabulary
}
