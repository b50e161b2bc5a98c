//! Isolating the opponent's newest tokens from two cumulative histories.

use crate::errors::DecodeError;
use crate::player::{parse_tokens, Action};

/// Returns the part of `current` the opponent added after the client's own
/// `last_sent` token.
///
/// The common prefix with `previous` is removed, then a trailing street
/// delimiter, then the client's echoed token together with the delimiter it
/// may have closed a street with. If nothing but the echo is new, the result
/// is empty.
///
/// # Examples
///
/// ```
/// use actline_engine::diff::opponent_tokens;
///
/// // client checked, opponent checked behind
/// assert_eq!(opponent_tokens("b200c/", "b200c/kk/", "k"), "k");
/// // client called, opponent led out on the next street
/// assert_eq!(opponent_tokens("b300", "b300c/b500", "c"), "b500");
/// // the opponent acted first in a new hand
/// assert_eq!(opponent_tokens("", "b200", ""), "b200");
/// ```
pub fn opponent_tokens<'a>(previous: &str, current: &'a str, last_sent: &str) -> &'a str {
    let appended = &current[common_prefix_len(previous, current)..];
    let appended = appended.strip_suffix('/').unwrap_or(appended);
    if last_sent.is_empty() {
        return appended;
    }
    match appended.strip_prefix(last_sent) {
        // a bet amount that merely starts with the sent digits is not an echo
        Some(rest) if !rest.starts_with(|c: char| c.is_ascii_digit()) => {
            rest.strip_prefix('/').unwrap_or(rest)
        }
        _ => appended,
    }
}

/// [`opponent_tokens`] split into actions.
pub fn opponent_actions(
    previous: &str,
    current: &str,
    last_sent: &str,
) -> Result<Vec<Action>, DecodeError> {
    parse_tokens(opponent_tokens(previous, current, last_sent))
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}
