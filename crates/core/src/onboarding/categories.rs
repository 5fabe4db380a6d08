//! Service category catalogue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Maquiagem,
    Cabelo,
    Unhas,
    Massagem,
    Sobrancelha,
    Depilacao,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Maquiagem,
        Self::Cabelo,
        Self::Unhas,
        Self::Massagem,
        Self::Sobrancelha,
        Self::Depilacao,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Maquiagem => "maquiagem",
            Self::Cabelo => "cabelo",
            Self::Unhas => "unhas",
            Self::Massagem => "massagem",
            Self::Sobrancelha => "sobrancelha",
            Self::Depilacao => "depilacao",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Maquiagem => "Maquiagem",
            Self::Cabelo => "Cabelo",
            Self::Unhas => "Unhas",
            Self::Massagem => "Massagem",
            Self::Sobrancelha => "Sobrancelha",
            Self::Depilacao => "Depilação",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Maquiagem => "💄",
            Self::Cabelo => "👩‍🦱",
            Self::Unhas => "💅",
            Self::Massagem => "💆‍♀️",
            Self::Sobrancelha => "🤨",
            Self::Depilacao => "🪒",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Categories picked in the last onboarding step, in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySelection {
    selected: Vec<Category>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `category`, or deselect it when already selected
    pub fn toggle(&mut self, category: Category) {
        if let Some(pos) = self.selected.iter().position(|c| *c == category) {
            self.selected.remove(pos);
        } else {
            self.selected.push(category);
        }
    }

    pub fn contains(&self, category: Category) -> bool {
        self.selected.contains(&category)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The wizard can only finish with at least one category
    pub fn can_continue(&self) -> bool {
        !self.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.selected.iter().copied()
    }

    /// Counter shown under the grid
    pub fn summary(&self) -> String {
        match self.len() {
            1 => "1 categoria selecionada".to_string(),
            n => format!("{n} categorias selecionadas"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_ids_parse_back() {
        for category in Category::ALL {
            assert_eq!(category.id().parse::<Category>(), Ok(category));
        }
        assert_eq!(Category::Depilacao.to_string(), "🪒 Depilação");
    }

    #[test]
    fn toggle_tracks_selection() {
        let mut selection = CategorySelection::new();
        assert!(!selection.can_continue());
        assert_eq!(selection.summary(), "0 categorias selecionadas");

        selection.toggle(Category::Unhas);
        selection.toggle(Category::Cabelo);
        assert!(selection.can_continue());
        assert_eq!(selection.summary(), "2 categorias selecionadas");

        selection.toggle(Category::Unhas);
        assert!(!selection.contains(Category::Unhas));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![Category::Cabelo]);
        assert_eq!(selection.summary(), "1 categoria selecionada");
    }

    #[test]
    fn selection_serializes_as_id_list() {
        let mut selection = CategorySelection::new();
        selection.toggle(Category::Massagem);
        assert_eq!(serde_json::to_string(&selection).unwrap(), "[\"massagem\"]");
    }
}
