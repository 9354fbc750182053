use std::fmt;
use utils::indent;

/// Unit label used when a tree is built without an explicit one.
pub const DEFAULT_UNIT: &str = "Element";

/// A single verification message at one structural level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry(String);

impl ErrorEntry {
    pub fn new(text: impl Into<String>) -> Self {
        ErrorEntry(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<String> for ErrorEntry {
    fn from(text: String) -> Self {
        ErrorEntry(text)
    }
}

impl From<&str> for ErrorEntry {
    fn from(text: &str) -> Self {
        ErrorEntry(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorItem {
    Entry(ErrorEntry),
    Nested(ErrorTree),
}

/// Nested collection of verification messages.
///
/// Each node holds its own messages plus one nested tree per sub-component
/// that was visited. The `unit` names what the nested trees represent and is
/// used for the `"<unit> <index>:"` headings of the rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTree {
    unit: Option<String>,
    items: Vec<ErrorItem>,
}

impl Default for ErrorTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::with_unit(DEFAULT_UNIT)
    }

    pub fn with_unit(unit: impl Into<String>) -> Self {
        ErrorTree {
            unit: Some(unit.into()),
            items: Vec::new(),
        }
    }

    /// A tree whose nested children are rendered without headings.
    pub fn unlabelled() -> Self {
        ErrorTree {
            unit: None,
            items: Vec::new(),
        }
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn items(&self) -> &[ErrorItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing at all was collected, not even empty sub-trees.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, entry: impl Into<ErrorEntry>) {
        self.items.push(ErrorItem::Entry(entry.into()));
    }

    pub fn nest(&mut self, tree: ErrorTree) {
        self.items.push(ErrorItem::Nested(tree));
    }

    /// Render the tree as an indented report starting at `shift` levels.
    ///
    /// Direct messages always come first, followed by the nested trees in
    /// order. The heading index counts every nested tree, including those
    /// that render to nothing.
    pub fn render(&self, shift: usize) -> String {
        let mut result = String::new();

        for item in &self.items {
            if let ErrorItem::Entry(entry) = item {
                result.push_str(&indent(entry.text(), shift));
                result.push('\n');
            }
        }

        let unit = self.unit.as_deref().filter(|unit| !unit.is_empty());
        let mut element = 0;
        for item in &self.items {
            if let ErrorItem::Nested(tree) = item {
                let rendered = tree.render(shift + 1);

                if !rendered.trim().is_empty() {
                    if let Some(unit) = unit {
                        result.push_str(&indent(&format!("{} {}:\n", unit, element), shift));
                    }
                    result.push_str(&rendered);
                }
                element += 1;
            }
        }

        result
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}
