use crate::core::VocabEntry;

/// Drill-down level of the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Category,
    Word,
    Detail,
}

/// What the browser wants fetched next. The sequence number ties the
/// eventual response back to the request; anything older is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Categories { seq: u64 },
    Entries { seq: u64, category: String, keyword: Option<String> },
}

/// Navigation state machine for the category → word → detail browser. Pure
/// state; the page module renders it and forwards the fetch requests.
pub struct BrowserState {
    pub mode: ViewMode,
    pub categories: Vec<String>,
    pub entries: Vec<VocabEntry>,
    pub selected_category: Option<String>,
    pub selected_entry: Option<VocabEntry>,
    pub search_keyword: String,
    pub loading: bool,
    pub error: Option<String>,
    seq: u64,
}

impl BrowserState {
    pub fn new() -> Self {
        Self {
            mode: ViewMode::Category,
            categories: Vec::new(),
            entries: Vec::new(),
            selected_category: None,
            selected_entry: None,
            search_keyword: String::new(),
            loading: false,
            error: None,
            seq: 0,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn begin_fetch(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.next_seq()
    }

    /// Initial or refresh load of the category level. The list is always
    /// re-derived from the table; it is never cached across visits.
    pub fn request_categories(&mut self) -> FetchRequest {
        FetchRequest::Categories { seq: self.begin_fetch() }
    }

    /// Category click: drill into word mode and load its entries.
    pub fn select_category(&mut self, category: &str) -> FetchRequest {
        self.mode = ViewMode::Word;
        self.selected_category = Some(category.to_string());
        self.selected_entry = None;
        self.search_keyword.clear();
        self.entries.clear();

        FetchRequest::Entries {
            seq: self.begin_fetch(),
            category: category.to_string(),
            keyword: None,
        }
    }

    /// Submitted search within the selected category. An empty keyword
    /// re-fetches the plain category list instead of an empty result.
    pub fn submit_search(&mut self) -> Option<FetchRequest> {
        let category = self.selected_category.clone()?;
        let keyword = Some(self.search_keyword.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Some(FetchRequest::Entries { seq: self.begin_fetch(), category, keyword })
    }

    /// Live-input hook: clearing the box goes straight back to the full
    /// list for the category.
    pub fn search_cleared(&mut self) -> Option<FetchRequest> {
        if !self.search_keyword.trim().is_empty() {
            return None;
        }
        let category = self.selected_category.clone()?;

        Some(FetchRequest::Entries { seq: self.begin_fetch(), category, keyword: None })
    }

    pub fn open_entry(&mut self, entry: VocabEntry) {
        self.selected_entry = Some(entry);
        self.mode = ViewMode::Detail;
    }

    /// Detail → word keeps the loaded list; no re-fetch.
    pub fn back_to_words(&mut self) {
        self.selected_entry = None;
        self.mode = ViewMode::Word;
    }

    /// Word → category clears the drill-down state and re-derives the
    /// category list.
    pub fn back_to_categories(&mut self) -> FetchRequest {
        self.mode = ViewMode::Category;
        self.selected_category = None;
        self.selected_entry = None;
        self.search_keyword.clear();
        self.entries.clear();

        self.request_categories()
    }

    /// Apply a finished category fetch; stale responses are dropped.
    pub fn apply_categories(&mut self, seq: u64, result: Result<Vec<String>, String>) {
        if seq != self.seq {
            return;
        }

        self.loading = false;
        match result {
            Ok(categories) => self.categories = categories,
            Err(e) => self.error = Some(e),
        }
    }

    /// Apply a finished entry fetch. Failures leave the current list in
    /// place with loading off; stale responses are dropped.
    pub fn apply_entries(&mut self, seq: u64, result: Result<Vec<VocabEntry>, String>) {
        if seq != self.seq {
            return;
        }

        self.loading = false;
        match result {
            Ok(entries) => self.entries = entries,
            Err(e) => self.error = Some(e),
        }
    }
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(id: i64, word: &str) -> VocabEntry {
        VocabEntry {
            id,
            word: word.to_string(),
            meaning: format!("meaning of {}", word),
            category: "Animals".to_string(),
            audio_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_select_category_enters_word_mode() {
        let mut state = BrowserState::new();

        let request = state.select_category("Animals");
        assert_eq!(state.mode, ViewMode::Word);
        assert!(state.loading);
        match request {
            FetchRequest::Entries { category, keyword, .. } => {
                assert_eq!(category, "Animals");
                assert!(keyword.is_none());
            }
            other => panic!("expected entries request, got {:?}", other),
        }
    }

    #[test]
    fn test_back_to_words_preserves_list() {
        let mut state = BrowserState::new();

        let request = state.select_category("Animals");
        let seq = match request {
            FetchRequest::Entries { seq, .. } => seq,
            other => panic!("unexpected {:?}", other),
        };
        state.apply_entries(seq, Ok(vec![entry(1, "cat"), entry(2, "dog")]));

        state.open_entry(entry(1, "cat"));
        assert_eq!(state.mode, ViewMode::Detail);

        state.back_to_words();
        assert_eq!(state.mode, ViewMode::Word);
        assert_eq!(state.entries.len(), 2);
        assert_eq!(state.selected_category.as_deref(), Some("Animals"));
    }

    #[test]
    fn test_back_to_categories_clears_drilldown() {
        let mut state = BrowserState::new();

        let request = state.select_category("Animals");
        let seq = match request {
            FetchRequest::Entries { seq, .. } => seq,
            other => panic!("unexpected {:?}", other),
        };
        state.apply_entries(seq, Ok(vec![entry(1, "cat")]));
        state.search_keyword = "ca".to_string();

        let request = state.back_to_categories();
        assert!(matches!(request, FetchRequest::Categories { .. }));
        assert_eq!(state.mode, ViewMode::Category);
        assert!(state.selected_category.is_none());
        assert!(state.entries.is_empty());
        assert!(state.search_keyword.is_empty());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = BrowserState::new();

        let first = match state.select_category("Animals") {
            FetchRequest::Entries { seq, .. } => seq,
            other => panic!("unexpected {:?}", other),
        };
        let second = match state.select_category("Food") {
            FetchRequest::Entries { seq, .. } => seq,
            other => panic!("unexpected {:?}", other),
        };

        // Late response for the abandoned request must not land.
        state.apply_entries(first, Ok(vec![entry(1, "cat")]));
        assert!(state.entries.is_empty());
        assert!(state.loading);

        state.apply_entries(second, Ok(vec![entry(3, "bread")]));
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.entries[0].word, "bread");
        assert!(!state.loading);
    }

    #[test]
    fn test_blank_search_refetches_category_list() {
        let mut state = BrowserState::new();
        state.select_category("Animals");

        state.search_keyword = "   ".to_string();
        let request = state.submit_search().unwrap();
        match request {
            FetchRequest::Entries { keyword, category, .. } => {
                assert!(keyword.is_none());
                assert_eq!(category, "Animals");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_search_cleared_only_fires_when_empty() {
        let mut state = BrowserState::new();
        state.select_category("Animals");

        state.search_keyword = "dog".to_string();
        assert!(state.search_cleared().is_none());

        state.search_keyword.clear();
        assert!(state.search_cleared().is_some());
    }

    #[test]
    fn test_fetch_failure_keeps_list_and_stops_loading() {
        let mut state = BrowserState::new();

        let seq = match state.select_category("Animals") {
            FetchRequest::Entries { seq, .. } => seq,
            other => panic!("unexpected {:?}", other),
        };
        state.apply_entries(seq, Ok(vec![entry(1, "cat")]));

        let seq = match state.submit_search() {
            Some(FetchRequest::Entries { seq, .. }) => seq,
            other => panic!("unexpected {:?}", other),
        };
        state.apply_entries(seq, Err("connection reset".to_string()));

        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("connection reset"));
        assert_eq!(state.entries.len(), 1);
    }
}
