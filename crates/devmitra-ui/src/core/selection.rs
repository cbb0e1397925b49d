//! Searchable multi-select used for attaching skills to a project.

/// Selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOption {
    /// Option name; also the submitted value.
    pub name: String,
    /// Icon class rendered beside the name.
    pub icon: String,
}

/// Option row ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow<'a> {
    /// Underlying option.
    pub option: &'a TagOption,
    /// Whether the row matches the search text.
    pub visible: bool,
    /// Whether the option is selected.
    pub selected: bool,
}

/// Tag selector state: options, search text and the selected set in pick order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelector {
    options: Vec<TagOption>,
    search: String,
    selected: Vec<String>,
    open: bool,
}

impl TagSelector {
    /// Selector over `options` with `preselected` names already chosen.
    #[must_use]
    pub fn new(options: Vec<TagOption>, preselected: &[String]) -> Self {
        let selected = preselected
            .iter()
            .filter(|name| options.iter().any(|option| &option.name == *name))
            .cloned()
            .collect();
        Self {
            options,
            search: String::new(),
            selected,
            open: false,
        }
    }

    /// Whether the option list is expanded.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Expand or collapse the option list (focus / outside click).
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Update the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Flip selection of `name`. Returns the new selected state, or `None` for unknown names.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        if !self.options.iter().any(|option| option.name == name) {
            return None;
        }
        if let Some(position) = self.selected.iter().position(|picked| picked == name) {
            self.selected.remove(position);
            Some(false)
        } else {
            self.selected.push(name.to_string());
            Some(true)
        }
    }

    /// Deselect `name` (the chip's remove button).
    pub fn remove(&mut self, name: &str) {
        self.selected.retain(|picked| picked != name);
    }

    /// Selected options in pick order.
    #[must_use]
    pub fn selected(&self) -> Vec<&TagOption> {
        self.selected
            .iter()
            .filter_map(|name| self.options.iter().find(|option| &option.name == name))
            .collect()
    }

    /// Option rows with search visibility and selection flags.
    #[must_use]
    pub fn rows(&self) -> Vec<OptionRow<'_>> {
        let needle = self.search.to_lowercase();
        self.options
            .iter()
            .map(|option| OptionRow {
                option,
                visible: option.name.to_lowercase().contains(&needle),
                selected: self.selected.contains(&option.name),
            })
            .collect()
    }

    /// Comma-separated value written to the hidden form field.
    #[must_use]
    pub fn form_value(&self) -> String {
        self.selected.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> TagSelector {
        let options = ["Rust", "Python", "TypeScript"]
            .into_iter()
            .map(|name| TagOption {
                name: name.to_string(),
                icon: format!("fab fa-{}", name.to_lowercase()),
            })
            .collect();
        TagSelector::new(options, &["Python".to_string(), "Cobol".to_string()])
    }

    #[test]
    fn search_hides_non_matching_rows() {
        let mut selector = selector();
        selector.set_search("SCRIPT");
        let visible: Vec<_> = selector
            .rows()
            .into_iter()
            .filter(|row| row.visible)
            .map(|row| row.option.name.as_str())
            .collect();
        assert_eq!(visible, vec!["TypeScript"]);
    }

    #[test]
    fn toggle_flips_selection_and_keeps_pick_order() {
        let mut selector = selector();
        assert_eq!(selector.toggle("Rust"), Some(true));
        assert_eq!(selector.form_value(), "Python,Rust");
        assert_eq!(selector.toggle("Python"), Some(false));
        assert_eq!(selector.toggle("Go"), None);
        selector.remove("Rust");
        assert!(selector.selected().is_empty());
    }

    #[test]
    fn open_state_follows_focus() {
        let mut selector = selector();
        assert!(!selector.is_open());
        selector.set_open(true);
        assert!(selector.is_open());
    }
}
