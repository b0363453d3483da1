//! Splitting a free-text display name into Zoom's first/last name fields

use shared::{NameParts, NameSplitMode};

/// Placeholders used when the form leaves the name empty
pub const EMPTY_FIRST_NAME: &str = "Prénom";
pub const EMPTY_LAST_NAME: &str = "Nom";

/// Placeholder surname for single-word names
pub const MISSING_LAST_NAME: &str = "Nom de famille";

/// Split `name` into first and last name
///
/// Never fails: empty input gets placeholders, a single word gets a
/// placeholder surname. With three or more words the legacy mode glues the
/// second and third words together and drops the rest, which is what Zoom
/// has been receiving so far.
pub fn normalize(name: &str, mode: NameSplitMode) -> NameParts {
    let tokens: Vec<&str> = name.split_whitespace().collect();

    match tokens.as_slice() {
        [] => NameParts::new(EMPTY_FIRST_NAME, EMPTY_LAST_NAME),
        [first] => NameParts::new(*first, MISSING_LAST_NAME),
        [first, last] => NameParts::new(*first, *last),
        [first, second, third, rest @ ..] => match mode {
            NameSplitMode::Legacy => NameParts::new(*first, format!("{second}{third}")),
            NameSplitMode::Joined => {
                let mut last = vec![*second, *third];
                last.extend_from_slice(rest);
                NameParts::new(*first, last.join(" "))
            }
        },
    }
}
