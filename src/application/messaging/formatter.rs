//! Reply formatter - Renders command outcomes for the transport

use crate::domain::entities::{Category, MenuButton, MenuPayload, OutboundMessage, Outcome};

const INVALID_OPTION: &str = "無效的選項，請重新選擇。";
const INVALID_CATEGORY: &str = "無效的類別，請重新選擇。";
const STORAGE_UNAVAILABLE: &str = "暫時無法存取清單，請稍後再試。";

const MENU_ALT_TEXT: &str = "該吃晚餐囉 請選擇晚餐方式";
const MENU_TITLE: &str = "該決定晚餐要吃什麼了";
const MENU_SUBTITLE: &str = "目前有以下選擇";

fn button_color(category: Category) -> &'static str {
    match category {
        Category::EatOut => "#FFA07A",
        Category::Delivery => "#98FB98",
        Category::FineDining => "#87CEFA",
        Category::Drinks => "#E7FA87",
    }
}

/// Renders outcomes into plain text or the category menu
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplyFormatter;

impl ReplyFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(&self, outcome: &Outcome) -> OutboundMessage {
        match self.text(outcome) {
            Some(text) => OutboundMessage::Text(text),
            None => OutboundMessage::Menu(self.menu()),
        }
    }

    /// The category menu: one button per category, each sending `選擇<label>`
    pub fn menu(&self) -> MenuPayload {
        MenuPayload {
            alt_text: MENU_ALT_TEXT.to_string(),
            title: MENU_TITLE.to_string(),
            subtitle: MENU_SUBTITLE.to_string(),
            buttons: Category::ALL
                .iter()
                .map(|category| MenuButton {
                    label: category.label().to_string(),
                    text: format!("選擇{}", category.label()),
                    color: button_color(*category).to_string(),
                })
                .collect(),
        }
    }

    /// Plain-text rendering; `None` for the menu
    fn text(&self, outcome: &Outcome) -> Option<String> {
        let text = match outcome {
            Outcome::Menu => return None,
            Outcome::AllLists { populated, empty } => all_lists(populated, empty),
            Outcome::CategoryList { category, entries } => {
                format!("{}的店家清單：\n{}", category, bullets(entries))
            }
            Outcome::CategoryEmpty(category) => format!("目前 '{}' 選項中沒有店家", category),
            Outcome::InvalidOption => INVALID_OPTION.to_string(),
            Outcome::InvalidCategory => INVALID_CATEGORY.to_string(),
            Outcome::Picked { category, name } => {
                format!("根據 '{}' 的選擇，抽中的是：{}", category, name)
            }
            Outcome::Added { category, name } => {
                format!("店家 '{}' 已新增到類別 '{}'。", name, category)
            }
            Outcome::AlreadyExists { category, name } => {
                format!("店家 '{}' 已存在於類別 '{}'。", name, category)
            }
            Outcome::Blacklisted { name } => {
                format!("店家 '{}' 含有黑名單中的關鍵字，無法新增。", name)
            }
            Outcome::Removed { category, name } => {
                format!("店家 '{}' 已從類別'{}'刪除。", name, category)
            }
            Outcome::NotInCategory { category, name } => {
                format!("店家 '{}' 不在類別'{}'中。", name, category)
            }
            Outcome::BlacklistAdded(name) => format!("店家 '{}' 已新增到黑名單。", name),
            Outcome::BlacklistExists(name) => format!("店家 '{}' 已存在於黑名單中。", name),
            Outcome::BlacklistRemoved(name) => format!("店家 '{}' 已從黑名單中移除。", name),
            Outcome::NotInBlacklist(name) => format!("店家 '{}' 不在黑名單中。", name),
            Outcome::BlacklistListing(patterns) => {
                format!("黑名單中的店家有：\n{}", bullets(patterns))
            }
            Outcome::BlacklistEmpty => "黑名單是空的。".to_string(),
            Outcome::Usage(verb) => {
                format!("請使用格式：{}", verb.usage().unwrap_or(verb.keyword()))
            }
            Outcome::StorageUnavailable => STORAGE_UNAVAILABLE.to_string(),
        };
        Some(text)
    }
}

fn bullets(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| format!("- {}", entry))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Populated categories in table order, then the empty ones on one line.
/// Every populated block but the one for the last category gets a trailing
/// newline.
fn all_lists(populated: &[(Category, Vec<String>)], empty: &[Category]) -> String {
    let last = Category::ALL[Category::COUNT - 1];
    let mut message = "目前所有的店家選項：\n".to_string();

    for (category, entries) in populated {
        message.push_str(&format!("\n{}：\n", category));
        message.push_str(&bullets(entries));
        if *category != last {
            message.push('\n');
        }
    }

    if !empty.is_empty() {
        let labels: Vec<&str> = empty.iter().map(|c| c.label()).collect();
        message.push_str("\n\n以下類別目前沒有店家：\n");
        message.push_str(&labels.join(", "));
    }
    message
}
