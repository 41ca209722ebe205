//! Keyboard navigation for a search box's suggestion list.

/// A suggestion offered under the search box.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestion {
    pub label: String,
    pub value: Option<String>,
    pub description: Option<String>,
}

impl Suggestion {
    /// A plain suggestion whose text is its label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the value used when the label is empty.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the secondary description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text written into the input when this suggestion is chosen.
    pub fn text(&self) -> &str {
        if self.label.is_empty() {
            self.value.as_deref().unwrap_or("")
        } else {
            &self.label
        }
    }
}

/// Keys the suggestion list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// Open/highlight state of the suggestion dropdown.
#[derive(Debug, Clone, Default)]
pub struct Suggestions {
    items: Vec<Suggestion>,
    highlighted: Option<usize>,
    open: bool,
    enabled: bool,
}

impl Suggestions {
    /// Creates the list. When `enabled` is false it never opens.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Replaces the suggestions and clears the highlight.
    pub fn set_items(&mut self, items: Vec<Suggestion>) {
        self.items = items;
        self.highlighted = None;
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    /// Index of the highlighted suggestion.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// `true` when the dropdown is drawn.
    pub fn is_open(&self) -> bool {
        self.open && !self.items.is_empty()
    }

    /// Input changed or gained focus: open only for non-empty input.
    pub fn on_input(&mut self, input: &str) {
        self.open = self.enabled && !input.is_empty();
    }

    /// Mouse hover highlights an item.
    pub fn hover(&mut self, index: usize) {
        if index < self.items.len() {
            self.highlighted = Some(index);
        }
    }

    /// Closes the dropdown (e.g. click outside).
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Handles a navigation key. Returns the suggestion chosen by Enter.
    ///
    /// Keys are ignored while the dropdown is closed.
    pub fn handle_key(&mut self, key: SuggestionKey) -> Option<Suggestion> {
        if !self.is_open() {
            return None;
        }
        let last = self.items.len() - 1;

        match key {
            SuggestionKey::Down => {
                self.highlighted = match self.highlighted {
                    Some(i) if i < last => Some(i + 1),
                    _ => Some(0),
                };
                None
            }
            SuggestionKey::Up => {
                self.highlighted = match self.highlighted {
                    Some(i) if i > 0 => Some(i - 1),
                    _ => Some(last),
                };
                None
            }
            SuggestionKey::Enter => self.highlighted.and_then(|i| self.select(i)),
            SuggestionKey::Escape => {
                self.open = false;
                self.highlighted = None;
                None
            }
        }
    }

    /// Chooses the suggestion at `index` and closes the dropdown.
    pub fn select(&mut self, index: usize) -> Option<Suggestion> {
        let chosen = self.items.get(index).cloned()?;
        self.open = false;
        self.highlighted = None;
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_list() -> Suggestions {
        let mut list = Suggestions::new(true);
        list.set_items(vec![
            Suggestion::new("Arroz con pollo"),
            Suggestion::new("Ajiaco").with_description("Sopa"),
            Suggestion::new("").with_value("arepa"),
        ]);
        list.on_input("a");
        list
    }

    #[test]
    fn test_opens_only_when_enabled_and_input_non_empty() {
        let mut list = open_list();
        assert!(list.is_open());

        list.on_input("");
        assert!(!list.is_open());

        let mut disabled = Suggestions::new(false);
        disabled.set_items(vec![Suggestion::new("x")]);
        disabled.on_input("x");
        assert!(!disabled.is_open());
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let mut list = open_list();
        list.handle_key(SuggestionKey::Down);
        assert_eq!(list.highlighted(), Some(0));
        list.handle_key(SuggestionKey::Up);
        assert_eq!(list.highlighted(), Some(2));
        list.handle_key(SuggestionKey::Down);
        assert_eq!(list.highlighted(), Some(0));

        let mut list = open_list();
        list.handle_key(SuggestionKey::Up);
        assert_eq!(list.highlighted(), Some(2));
    }

    #[test]
    fn test_enter_selects_highlighted() {
        let mut list = open_list();
        assert_eq!(list.handle_key(SuggestionKey::Enter), None);

        list.hover(2);
        let chosen = list.handle_key(SuggestionKey::Enter).unwrap();
        assert_eq!(chosen.text(), "arepa");
        assert!(!list.is_open());
        assert_eq!(list.highlighted(), None);
    }

    #[test]
    fn test_escape_closes() {
        let mut list = open_list();
        list.handle_key(SuggestionKey::Down);
        list.handle_key(SuggestionKey::Escape);
        assert!(!list.is_open());
        assert_eq!(list.highlighted(), None);
        assert_eq!(list.handle_key(SuggestionKey::Down), None);
        assert_eq!(list.highlighted(), None);
    }

    #[test]
    fn test_new_items_reset_highlight() {
        let mut list = open_list();
        list.hover(1);
        list.set_items(vec![Suggestion::new("Bandeja")]);
        assert_eq!(list.highlighted(), None);
    }
}
