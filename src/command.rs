//! Free-text command recognition.
//!
//! Chat messages are matched case-insensitively against a small fixed
//! grammar:
//!
//! | pattern                                        | command      |
//! |------------------------------------------------|--------------|
//! | `I challenge @(\w+) to a wizard'?’?s'?’? duel!` | `Challenge`  |
//! | `I accept @(\w+)'?’?s challenge`               | `Accept`     |
//! | `I yield to @(\w+)`                            | `Yield`      |
//! | `dueling rules`                                | `Rules`      |
//! | `list spells`                                  | `ListSpells` |
//! | `list effects`                                 | `ListEffects`|
//! | `duel status`                                  | `Status`     |
//! | `^<incantation>(\sself)?!`                     | `Cast`       |
//!
//! Incantations must start the message; the other commands may appear
//! anywhere in it. Handles keep the case they were typed with.
//!
//! The patterns are compiled once per spell book by [`CommandParser::new`].

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::error::CatalogResult;
use crate::spells::SpellBook;

/// A recognised player command.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Challenge { challengee: String },
    Accept { challenger: String },
    Yield { opponent: String },
    Rules,
    ListSpells,
    ListEffects,
    Status,
    Cast { incantation: String, on_self: bool },
}

/// Compiled command grammar for one spell book.
#[derive(Clone, Debug)]
pub struct CommandParser {
    /// `None` when the spell book is empty.
    cast: Option<Regex>,
    /// Lower-cased incantation to the spell book's spelling.
    incantations: FxHashMap<String, String>,
    challenge: Regex,
    accept: Regex,
    yield_to: Regex,
    listings: Vec<(Regex, Command)>,
}

impl CommandParser {
    /// Compile the grammar, with one cast alternative per spell.
    pub fn new(spells: &SpellBook) -> CatalogResult<Self> {
        let mut incantations: Vec<&str> = spells.incantations().collect();
        // Longest first, so "caseum foetidum!" is not read as "caseum".
        incantations.sort_by_key(|incantation| std::cmp::Reverse(incantation.len()));

        let cast = if incantations.is_empty() {
            None
        } else {
            let alternatives: Vec<String> =
                incantations.iter().map(|i| regex::escape(i)).collect();
            Some(Regex::new(&format!(
                r"(?i)^({})(\sself)?!",
                alternatives.join("|")
            ))?)
        };

        let listings = [
            (r"(?i)dueling rules", Command::Rules),
            (r"(?i)list spells", Command::ListSpells),
            (r"(?i)list effects", Command::ListEffects),
            (r"(?i)duel status", Command::Status),
        ]
        .into_iter()
        .map(|(pattern, command)| -> CatalogResult<(Regex, Command)> {
            Ok((Regex::new(pattern)?, command))
        })
        .collect::<CatalogResult<Vec<_>>>()?;

        Ok(Self {
            cast,
            incantations: incantations
                .iter()
                .map(|i| (i.to_lowercase(), (*i).to_string()))
                .collect(),
            challenge: Regex::new(r"(?i)I challenge @(\w+) to a wizard'?’?s'?’? duel!")?,
            accept: Regex::new(r"(?i)I accept @(\w+)'?’?s challenge")?,
            yield_to: Regex::new(r"(?i)I yield to @(\w+)")?,
            listings,
        })
    }

    /// Recognise `text`, or `None` if it is not a duel command.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<Command> {
        if let Some(command) = self.parse_cast(text) {
            return Some(command);
        }

        if let Some(challengee) = handle(&self.challenge, text) {
            return Some(Command::Challenge { challengee });
        }
        if let Some(challenger) = handle(&self.accept, text) {
            return Some(Command::Accept { challenger });
        }
        if let Some(opponent) = handle(&self.yield_to, text) {
            return Some(Command::Yield { opponent });
        }

        self.listings
            .iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, command)| command.clone())
    }

    fn parse_cast(&self, text: &str) -> Option<Command> {
        let captures = self.cast.as_ref()?.captures(text)?;
        let typed = captures.get(1)?.as_str().to_lowercase();
        let incantation = self.incantations.get(&typed)?.clone();

        Some(Command::Cast {
            incantation,
            on_self: captures.get(2).is_some(),
        })
    }
}

/// The handle captured by `pattern`'s first group.
fn handle(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|handle| handle.as_str().to_string())
}
