//! Tag search and selection for the announcement board.
//!
//! Search is purely client-side over the known vocabulary; the selected tag
//! is what scopes the server-side announcement fetch.

/// How many tags get a direct button before the rest spill into "More Tags".
pub const QUICK_FILTER_LIMIT: usize = 5;

/// Tags whose lowercase form contains the lowercase search text, in their
/// original order. Blank search text matches nothing.
pub fn compute_visible(tags: &[String], search_text: &str) -> Vec<String> {
    if search_text.trim().is_empty() {
        return Vec::new();
    }
    let needle = search_text.to_lowercase();
    tags.iter()
        .filter(|tag| tag.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFilter {
    pub tag: String,
    pub active: bool,
}

/// Layout of the filter buttons above the announcement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFilterBar {
    /// The "All" button is highlighted
    pub all_active: bool,
    /// First [`QUICK_FILTER_LIMIT`] tags
    pub direct: Vec<QuickFilter>,
    /// Everything after the direct buttons
    pub overflow: Vec<QuickFilter>,
    /// Selected tag not among the direct buttons, shown as an extra
    /// removable button so the active filter never hides in the overflow
    pub pinned: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    search_text: String,
    dropdown_open: bool,
    selected_tag: Option<String>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.dropdown_open = !self.search_text.trim().is_empty();
    }

    /// Re-open the results when the search box regains focus.
    pub fn focus_search(&mut self) {
        if !self.search_text.trim().is_empty() {
            self.dropdown_open = true;
        }
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    pub fn clear_search(&mut self) {
        self.search_text.clear();
        self.dropdown_open = false;
    }

    pub fn dropdown_visible(&self) -> bool {
        self.dropdown_open && !self.search_text.trim().is_empty()
    }

    pub fn visible_tags(&self, tags: &[String]) -> Vec<String> {
        compute_visible(tags, &self.search_text)
    }

    /// "Found 2 tags" / "No tags found matching "x"", or `None` while the
    /// dropdown is hidden.
    pub fn result_summary(&self, tags: &[String]) -> Option<String> {
        if !self.dropdown_visible() {
            return None;
        }
        let found = self.visible_tags(tags).len();
        Some(match found {
            0 => format!("No tags found matching \"{}\"", self.search_text),
            1 => "Found 1 tag".to_string(),
            n => format!("Found {} tags", n),
        })
    }

    pub fn selected_tag(&self) -> Option<&str> {
        self.selected_tag.as_deref()
    }

    pub fn is_all_active(&self) -> bool {
        self.selected_tag.is_none()
    }

    /// Select `tag` as the active filter and reset the search box. An empty
    /// tag clears the selection. Returns whether the selection changed.
    pub fn select(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        self.clear_search();
        if tag.is_empty() {
            return self.clear_selection();
        }
        if self.selected_tag.as_deref() == Some(tag.as_str()) {
            return false;
        }
        self.selected_tag = Some(tag);
        true
    }

    /// Use whatever was typed as the filter, known tag or not.
    pub fn apply_search_text(&mut self) -> bool {
        let typed = self.search_text.trim().to_string();
        if typed.is_empty() {
            return false;
        }
        self.select(typed)
    }

    /// Back to "All". Returns whether a tag was selected before.
    pub fn clear_selection(&mut self) -> bool {
        self.selected_tag.take().is_some()
    }

    pub fn quick_filters(&self, tags: &[String]) -> QuickFilterBar {
        let selected = self.selected_tag();
        let to_filter = |tag: &String| QuickFilter {
            tag: tag.clone(),
            active: selected == Some(tag.as_str()),
        };

        let split = tags.len().min(QUICK_FILTER_LIMIT);
        let (head, tail) = tags.split_at(split);

        let pinned = selected
            .filter(|s| !head.iter().any(|t| t == s))
            .map(str::to_string);

        QuickFilterBar {
            all_active: selected.is_none(),
            direct: head.iter().map(to_filter).collect(),
            overflow: tail.iter().map(to_filter).collect(),
            pinned,
        }
    }

    /// Placeholder text for an empty announcement list.
    pub fn empty_message(&self) -> String {
        match self.selected_tag() {
            Some(tag) => format!("No announcements found with tag \"{}\"", tag),
            None => "No announcements yet".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|t| t.to_string()).collect()
    }

    #[rstest]
    #[case("urg", &["urgent"])]
    #[case("URG", &["urgent"])]
    #[case("s", &["News", "sports", "class"])]
    #[case("e", &["News", "urgent", "event"])]
    #[case("zzz", &[])]
    fn test_compute_visible(#[case] search: &str, #[case] expected: &[&str]) {
        let all = tags(&["News", "urgent", "sports", "event", "class"]);
        assert_eq!(compute_visible(&all, search), tags(expected));
    }

    #[test]
    fn test_blank_search_matches_nothing() {
        let all = tags(&["a", "b"]);
        assert!(compute_visible(&all, "").is_empty());
        assert!(compute_visible(&all, "   ").is_empty());

        let mut filter = TagFilter::new();
        filter.set_search_text("  ");
        assert!(!filter.dropdown_visible());
        assert_eq!(filter.result_summary(&all), None);
    }

    #[test]
    fn test_result_is_subsequence_of_vocabulary() {
        let all = tags(&["alpha", "Beta", "alphabet", "gamma", "ALPS"]);
        let visible = compute_visible(&all, "Alp");
        assert_eq!(visible, tags(&["alpha", "alphabet", "ALPS"]));

        // order preserved
        let positions: Vec<usize> = visible
            .iter()
            .map(|v| all.iter().position(|t| t == v).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_select_clears_search_and_reports_change() {
        let mut filter = TagFilter::new();
        filter.set_search_text("urg");
        assert!(filter.dropdown_visible());

        assert!(filter.select("urgent"));
        assert_eq!(filter.selected_tag(), Some("urgent"));
        assert_eq!(filter.search_text(), "");
        assert!(!filter.dropdown_visible());

        assert!(!filter.select("urgent"));
        assert!(filter.select(""));
        assert!(filter.is_all_active());
    }

    #[test]
    fn test_apply_search_text_selects_typed_value() {
        let mut filter = TagFilter::new();
        filter.set_search_text("  brand-new ");
        assert!(filter.apply_search_text());
        assert_eq!(filter.selected_tag(), Some("brand-new"));

        filter.set_search_text(" ");
        assert!(!filter.apply_search_text());
        assert_eq!(filter.selected_tag(), Some("brand-new"));
    }

    #[test]
    fn test_result_summary() {
        let all = tags(&["news", "newsletter", "sports"]);
        let mut filter = TagFilter::new();

        filter.set_search_text("news");
        assert_eq!(filter.result_summary(&all), Some("Found 2 tags".to_string()));

        filter.set_search_text("sport");
        assert_eq!(filter.result_summary(&all), Some("Found 1 tag".to_string()));

        filter.set_search_text("xyz");
        assert_eq!(
            filter.result_summary(&all),
            Some("No tags found matching \"xyz\"".to_string())
        );

        filter.close_dropdown();
        assert_eq!(filter.result_summary(&all), None);
        filter.focus_search();
        assert!(filter.dropdown_visible());
    }

    #[test]
    fn test_quick_filters_with_few_tags() {
        let filter = TagFilter::new();
        let bar = filter.quick_filters(&tags(&["a", "b"]));

        assert!(bar.all_active);
        assert_eq!(bar.direct.len(), 2);
        assert!(bar.overflow.is_empty());
        assert_eq!(bar.pinned, None);
    }

    #[test]
    fn test_quick_filters_pin_selected_overflow_tag() {
        let all = tags(&["t1", "t2", "t3", "t4", "t5", "t6", "t7"]);
        let mut filter = TagFilter::new();
        filter.select("t7");

        let bar = filter.quick_filters(&all);
        assert!(!bar.all_active);
        assert_eq!(bar.direct.len(), QUICK_FILTER_LIMIT);
        assert!(bar.direct.iter().all(|f| !f.active));
        assert_eq!(
            bar.overflow,
            vec![
                QuickFilter { tag: "t6".to_string(), active: false },
                QuickFilter { tag: "t7".to_string(), active: true },
            ]
        );
        assert_eq!(bar.pinned.as_deref(), Some("t7"));
    }

    #[test]
    fn test_quick_filters_direct_selection_is_not_pinned() {
        let all = tags(&["t1", "t2", "t3", "t4", "t5", "t6"]);
        let mut filter = TagFilter::new();
        filter.select("t3");

        let bar = filter.quick_filters(&all);
        assert!(bar.direct[2].active);
        assert_eq!(bar.pinned, None);
    }

    #[test]
    fn test_unknown_selected_tag_is_pinned() {
        let mut filter = TagFilter::new();
        filter.set_search_text("typed");
        filter.apply_search_text();

        let bar = filter.quick_filters(&tags(&["a"]));
        assert_eq!(bar.pinned.as_deref(), Some("typed"));
        assert_eq!(
            filter.empty_message(),
            "No announcements found with tag \"typed\""
        );
    }
}
