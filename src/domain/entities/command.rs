/// Command verbs understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    ShowMenu,
    ListCategory,
    PickRandom,
    AddEntry,
    RemoveEntry,
    AddBlacklist,
    RemoveBlacklist,
    ListBlacklist,
}

impl Verb {
    /// Keyword the message text has to start with (or equal, for exact verbs)
    pub fn keyword(&self) -> &'static str {
        match self {
            Verb::ShowMenu => "我要點餐",
            Verb::ListCategory => "列出清單",
            Verb::PickRandom => "選擇",
            Verb::AddEntry => "新增店家",
            Verb::RemoveEntry => "刪除店家",
            Verb::AddBlacklist => "新增黑名單",
            Verb::RemoveBlacklist => "移除黑名單",
            Verb::ListBlacklist => "列出黑名單",
        }
    }

    /// Expected format, shown when the arguments don't fit
    pub fn usage(&self) -> Option<&'static str> {
        match self {
            Verb::AddEntry => Some("新增店家 <類別> <店名>"),
            Verb::RemoveEntry => Some("刪除店家 <類別> <店名>"),
            Verb::AddBlacklist => Some("新增黑名單 <店名>"),
            Verb::RemoveBlacklist => Some("移除黑名單 <店名>"),
            _ => None,
        }
    }
}

/// A parsed bot command. Built per incoming message and consumed right away.
///
/// Category arguments are kept as raw text; validation happens in the
/// interpreter so that an unknown category gets its own reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowMenu,
    ListCategory { category: String },
    PickRandom { category: String },
    AddEntry { category: String, name: String },
    RemoveEntry { category: String, name: String },
    AddBlacklist { name: String },
    RemoveBlacklist { name: String },
    ListBlacklist,
    /// Verb recognised but the argument count is wrong
    Malformed(Verb),
}

impl Command {
    pub fn verb(&self) -> Verb {
        match self {
            Command::ShowMenu => Verb::ShowMenu,
            Command::ListCategory { .. } => Verb::ListCategory,
            Command::PickRandom { .. } => Verb::PickRandom,
            Command::AddEntry { .. } => Verb::AddEntry,
            Command::RemoveEntry { .. } => Verb::RemoveEntry,
            Command::AddBlacklist { .. } => Verb::AddBlacklist,
            Command::RemoveBlacklist { .. } => Verb::RemoveBlacklist,
            Command::ListBlacklist => Verb::ListBlacklist,
            Command::Malformed(verb) => *verb,
        }
    }

    /// Arguments in the order they were typed
    pub fn args(&self) -> Vec<&str> {
        match self {
            Command::ListCategory { category } | Command::PickRandom { category } => {
                vec![category.as_str()]
            }
            Command::AddEntry { category, name } | Command::RemoveEntry { category, name } => {
                vec![category.as_str(), name.as_str()]
            }
            Command::AddBlacklist { name } | Command::RemoveBlacklist { name } => {
                vec![name.as_str()]
            }
            Command::ShowMenu | Command::ListBlacklist | Command::Malformed(_) => Vec::new(),
        }
    }
}
