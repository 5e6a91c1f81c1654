//! LINE message objects for outbound replies

use serde_json::{json, Value};

use crate::domain::entities::{MenuPayload, OutboundMessage};

/// LINE rejects text messages longer than this many characters
pub const MAX_TEXT_CHARS: usize = 5000;

pub fn to_line_message(message: &OutboundMessage) -> Value {
    match message {
        OutboundMessage::Text(text) => json!({
            "type": "text",
            "text": truncate(text, MAX_TEXT_CHARS),
        }),
        OutboundMessage::Menu(menu) => flex_menu(menu),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            tracing::warn!("Truncating reply of {} chars", text.chars().count());
            text[..idx].to_string()
        }
        None => text.to_string(),
    }
}

/// Bubble with a bold title, a subtitle, a separator and a column of buttons
pub fn flex_menu(menu: &MenuPayload) -> Value {
    let buttons: Vec<Value> = menu
        .buttons
        .iter()
        .map(|button| {
            json!({
                "type": "button",
                "style": "secondary",
                "color": button.color,
                "action": {
                    "type": "message",
                    "label": button.label,
                    "text": button.text,
                }
            })
        })
        .collect();

    json!({
        "type": "flex",
        "altText": menu.alt_text,
        "contents": {
            "type": "bubble",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    {
                        "type": "text",
                        "text": menu.title,
                        "weight": "bold",
                        "size": "xl",
                        "align": "center"
                    },
                    {
                        "type": "text",
                        "text": menu.subtitle,
                        "size": "md",
                        "align": "center",
                        "margin": "md"
                    },
                    {
                        "type": "separator",
                        "margin": "xxl"
                    },
                    {
                        "type": "box",
                        "layout": "vertical",
                        "margin": "xxl",
                        "spacing": "sm",
                        "contents": buttons
                    }
                ]
            }
        }
    })
}
