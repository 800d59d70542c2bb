//! Usage lines
//!
//! This module models parser actions, generates usage lines
//! from them, and maps a rendered usage line back to per-action spans.

pub mod action;
pub mod format;
pub mod resolver;

// Re-export main types
pub use action::*;
pub use format::*;
pub use resolver::*;

/// One top-level element of the optionals part of a usage line
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UsageItem<'a> {
    /// An option outside any mutually exclusive group
    Optional(&'a ActionDescriptor),
    /// A mutually exclusive group and its visible members, in order
    Group(usize, Vec<&'a ActionDescriptor>),
}

/// Split visible actions into optionals items (mutex groups folded in where
/// their first member appears) and the trailing positionals
pub(crate) fn partition<'a, I>(actions: I) -> (Vec<UsageItem<'a>>, Vec<&'a ActionDescriptor>)
where
    I: IntoIterator<Item = &'a ActionDescriptor>,
{
    let mut items: Vec<UsageItem<'a>> = Vec::new();
    let mut positionals = Vec::new();

    for action in actions.into_iter().filter(|a| !a.suppressed) {
        if let Some(group) = action.mutex_group {
            let existing = items.iter_mut().find_map(|item| match item {
                UsageItem::Group(id, members) if *id == group => Some(members),
                _ => None,
            });
            match existing {
                Some(members) => members.push(action),
                None => items.push(UsageItem::Group(group, vec![action])),
            }
        } else if action.is_positional() {
            positionals.push(action);
        } else {
            items.push(UsageItem::Optional(action));
        }
    }

    (items, positionals)
}
