//! Menu model types - the output of the streaming parser.

use serde::{Deserialize, Serialize};

/// A single dish detected on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Dish name as it appears on the menu
    pub name: String,

    /// Price in the menu's currency (0.0 when the field failed to parse)
    pub price: f64,

    /// Optional description line under the dish name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Detection confidence, 0-100, supplied by the upstream job
    pub confidence: u8,
}

/// A menu section (e.g. "Starters", "Mains") and the items found under it.
///
/// Sections are appended to as items arrive and never mutated once a later
/// section has been opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading
    pub name: String,

    /// Detection confidence, 0-100
    pub confidence: u8,

    /// Items found while this section was current
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: impl Into<String>, confidence: u8) -> Self {
        Self {
            name: name.into(),
            confidence,
            items: Vec::new(),
        }
    }
}

/// Read-only snapshot of the menu accumulated so far.
///
/// `items` is the flat list of every item in discovery order, including
/// items that arrived before any section was opened; such items appear
/// only here and in no section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDraft {
    pub sections: Vec<Section>,
    pub items: Vec<Item>,
}

impl MenuDraft {
    /// Items in the flat list that were never assigned to a section.
    pub fn unsectioned_count(&self) -> usize {
        let sectioned: usize = self.sections.iter().map(|s| s.items.len()).sum();
        self.items.len() - sectioned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsectioned_count_accounts_for_preamble_items() {
        let orphan = Item {
            name: "Bread".to_string(),
            price: 2.0,
            description: None,
            confidence: 70,
        };
        let steak = Item {
            name: "Steak".to_string(),
            price: 24.5,
            description: Some("Grilled".to_string()),
            confidence: 95,
        };

        let mut mains = Section::new("Mains", 90);
        mains.items.push(steak.clone());

        let draft = MenuDraft {
            sections: vec![mains],
            items: vec![orphan, steak],
        };

        assert_eq!(draft.unsectioned_count(), 1);
    }
}
