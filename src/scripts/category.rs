//! Script categories
//!
//! The set of categories is fixed: each one maps to a folder in the
//! remote repository. `CategoryFilter::All` is a selection, not a category,
//! so a record can never be tagged with it.

use std::fmt;
use std::str::FromStr;

use crate::error::BrowserError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Attractive,
    CustomGames,
    Utility,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 3] = [Category::Attractive, Category::CustomGames, Category::Utility];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Attractive => "Attractive",
            Category::CustomGames => "Custom Games",
            Category::Utility => "Utility",
        }
    }

    /// Path segment of the category folder in the repository
    pub fn folder_name(self) -> &'static str {
        match self {
            Category::Attractive => "attractive",
            Category::CustomGames => "custom_games",
            Category::Utility => "utility",
        }
    }

    pub fn from_folder_name(folder: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.folder_name().eq_ignore_ascii_case(folder))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for Category {
    type Err = BrowserError;

    /// Accepts a folder name ("custom_games") or display name ("Custom Games")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::from_folder_name(trimmed)
            .or_else(|| {
                Category::ALL
                    .into_iter()
                    .find(|c| c.display_name().eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| BrowserError::UnknownCategory(trimmed.to_string()))
    }
}

/// Category selection used when filtering
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every record regardless of its category
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn display_name(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.display_name(),
        }
    }

    /// The selections a category picker offers, `All` first
    pub fn choices() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for CategoryFilter {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}
