use std::fmt;

/// Restaurant list partitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    EatOut,
    Delivery,
    FineDining,
    Drinks,
}

/// Storage key of the keyword blacklist
pub const BLACKLIST_KEY: &str = "blacklist";

/// Category table: label shown to users and storage key of the backing list.
/// Both the load and the save path go through this table.
static CATEGORY_TABLE: [(Category, &str, &str); Category::COUNT] = [
    (Category::EatOut, "簡單出去吃", "easy"),
    (Category::Delivery, "外送", "delivery"),
    (Category::FineDining, "吃點好的", "great"),
    (Category::Drinks, "喝點飲料", "drink"),
];

impl Category {
    pub const COUNT: usize = 4;

    /// All categories in display order
    pub const ALL: [Category; Self::COUNT] = [
        Category::EatOut,
        Category::Delivery,
        Category::FineDining,
        Category::Drinks,
    ];

    fn row(&self) -> &'static (Category, &'static str, &'static str) {
        // CATEGORY_TABLE is indexed in declaration order
        &CATEGORY_TABLE[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.row().1
    }

    pub fn storage_key(&self) -> &'static str {
        self.row().2
    }

    /// Look up a category by its user-facing label (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORY_TABLE
            .iter()
            .find(|(_, l, _)| *l == label)
            .map(|(c, _, _)| *c)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_line_up_with_variants() {
        for category in Category::ALL {
            assert_eq!(category.row().0, category);
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Category::from_label("外送"), Some(Category::Delivery));
        assert_eq!(Category::from_label("喝點飲料"), Some(Category::Drinks));
        assert_eq!(Category::from_label("全部"), None);
        assert_eq!(Category::from_label(" 外送"), None);
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let mut keys: Vec<&str> = Category::ALL.iter().map(|c| c.storage_key()).collect();
        keys.push(BLACKLIST_KEY);
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 5);
    }
}
