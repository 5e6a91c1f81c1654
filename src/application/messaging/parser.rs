//! Command parser - Turns raw message text into bot commands

use crate::domain::entities::{Command, Verb};

/// A matcher looks at the raw text and yields a command if its verb applies
pub(crate) type Matcher = fn(&str) -> Option<Command>;

/// Parses incoming text into commands.
///
/// Every matcher is checked independently, in order. A text that matches
/// more than one verb yields one command per match.
pub struct CommandParser {
    matchers: Vec<Matcher>,
}

impl CommandParser {
    pub fn new() -> Self {
        Self::with_matchers(vec![
            match_show_menu,
            match_list_category,
            match_pick_random,
            match_add_entry,
            match_remove_entry,
            match_add_blacklist,
            match_remove_blacklist,
            match_list_blacklist,
        ])
    }

    pub(crate) fn with_matchers(matchers: Vec<Matcher>) -> Self {
        Self { matchers }
    }

    /// Every command found in `text`, in matcher order
    pub fn parse(&self, text: &str) -> Vec<Command> {
        let commands: Vec<Command> = self
            .matchers
            .iter()
            .filter_map(|matcher| matcher(text))
            .collect();

        if commands.len() > 1 {
            let verbs: Vec<Verb> = commands.iter().map(Command::verb).collect();
            tracing::debug!("Text matched several verbs: {:?}", verbs);
        }
        commands
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments end up as single trimmed lines in flat files, so they are
/// trimmed here too and must not be empty afterwards
fn normalize_arg(arg: &str) -> Option<String> {
    let arg = arg.trim();
    (!arg.is_empty() && !arg.contains(['\n', '\r'])).then(|| arg.to_string())
}

/// Split on single spaces and require exactly `arity` arguments after the verb
fn split_args(text: &str, verb: Verb, arity: usize) -> Option<Result<Vec<String>, Verb>> {
    if !text.starts_with(verb.keyword()) {
        return None;
    }

    let parts: Vec<&str> = text.split(' ').collect();
    if parts.len() != arity + 1 {
        return Some(Err(verb));
    }
    let args: Option<Vec<String>> = parts[1..].iter().map(|p| normalize_arg(p)).collect();
    Some(args.ok_or(verb))
}

fn match_show_menu(text: &str) -> Option<Command> {
    (text == Verb::ShowMenu.keyword()).then_some(Command::ShowMenu)
}

fn match_list_category(text: &str) -> Option<Command> {
    let rest = text.strip_prefix(Verb::ListCategory.keyword())?;
    // one separator character sits between the verb and the category
    let mut chars = rest.chars();
    chars.next();
    Some(Command::ListCategory {
        category: chars.as_str().to_string(),
    })
}

fn match_pick_random(text: &str) -> Option<Command> {
    let rest = text.strip_prefix(Verb::PickRandom.keyword())?;
    Some(Command::PickRandom {
        category: rest.to_string(),
    })
}

fn match_add_entry(text: &str) -> Option<Command> {
    Some(match split_args(text, Verb::AddEntry, 2)? {
        Ok(mut args) => {
            let name = args.pop().unwrap_or_default();
            let category = args.pop().unwrap_or_default();
            Command::AddEntry { category, name }
        }
        Err(verb) => Command::Malformed(verb),
    })
}

fn match_remove_entry(text: &str) -> Option<Command> {
    Some(match split_args(text, Verb::RemoveEntry, 2)? {
        Ok(mut args) => {
            let name = args.pop().unwrap_or_default();
            let category = args.pop().unwrap_or_default();
            Command::RemoveEntry { category, name }
        }
        Err(verb) => Command::Malformed(verb),
    })
}

fn match_add_blacklist(text: &str) -> Option<Command> {
    Some(match split_args(text, Verb::AddBlacklist, 1)? {
        Ok(mut args) => Command::AddBlacklist {
            name: args.pop().unwrap_or_default(),
        },
        Err(verb) => Command::Malformed(verb),
    })
}

fn match_remove_blacklist(text: &str) -> Option<Command> {
    Some(match split_args(text, Verb::RemoveBlacklist, 1)? {
        Ok(mut args) => Command::RemoveBlacklist {
            name: args.pop().unwrap_or_default(),
        },
        Err(verb) => Command::Malformed(verb),
    })
}

fn match_list_blacklist(text: &str) -> Option<Command> {
    (text == Verb::ListBlacklist.keyword()).then_some(Command::ListBlacklist)
}
