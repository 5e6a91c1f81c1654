use super::{Category, Verb};

/// Result of handling one command, before it is rendered for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Menu,

    /// Every category: populated ones with their entries, then the empty ones
    AllLists {
        populated: Vec<(Category, Vec<String>)>,
        empty: Vec<Category>,
    },
    CategoryList { category: Category, entries: Vec<String> },
    CategoryEmpty(Category),
    /// Unknown category when listing or picking
    InvalidOption,
    /// Unknown category when adding or removing
    InvalidCategory,
    Picked { category: Category, name: String },

    Added { category: Category, name: String },
    AlreadyExists { category: Category, name: String },
    Blacklisted { name: String },
    Removed { category: Category, name: String },
    NotInCategory { category: Category, name: String },

    BlacklistAdded(String),
    BlacklistExists(String),
    BlacklistRemoved(String),
    NotInBlacklist(String),
    BlacklistListing(Vec<String>),
    BlacklistEmpty,

    Usage(Verb),
    StorageUnavailable,
}

impl Outcome {
    /// Whether the command changed persisted state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Outcome::Added { .. }
                | Outcome::Removed { .. }
                | Outcome::BlacklistAdded(_)
                | Outcome::BlacklistRemoved(_)
        )
    }
}
