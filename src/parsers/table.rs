use crate::errors::{Error, Result};
use crate::grammar::{Production, Symbols};
use crate::lexer::END_MARKER;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Transport representation of the tables. State columns are 1-based, since
/// column 1 corresponds to the first row after the table generator's header.
#[derive(Debug, Deserialize)]
struct Transport {
    action_table: BTreeMap<String, BTreeMap<String, Option<String>>>,
    goto_table: BTreeMap<String, BTreeMap<String, Option<String>>>,
}

// Cell keywords used by tables exported from the web front end
const EXPORTED_ERROR: &str = "ERRO!";
const EXPORTED_ACCEPT: &str = "ACEITO";
const EXPORTED_SHIFT: &str = "EMPILHAR";
const EXPORTED_REDUCE: &str = "REDUZIR";

/// Returns the trimmed text between the brackets of a cell such as
/// "EMPILHAR[ 3 ]", if the cell starts with the keyword
fn bracketed<'a>(cell: &'a str, keyword: &str) -> Option<&'a str> {
    cell.strip_prefix(keyword)?
        .trim()
        .strip_prefix('[')?
        .strip_suffix(']')
        .map(str::trim)
}

#[derive(Debug, PartialEq, Eq, Clone)]
/// An entry in an LR action table
pub enum Action {
    Shift(usize),
    Reduce(Production),
    Accept,
    Error,
}

impl Action {
    /// Parses an action cell: "s3" shifts to state 3, "r(E -> E + T)" or
    /// "r E -> E + T" reduces by a production, "acc" accepts, and a blank
    /// cell or "err" is an error. The exported forms "EMPILHAR[ 3 ]",
    /// "REDUZIR[ E -> E + T ]", "ACEITO" and "ERRO!" are accepted too.
    pub fn parse_cell(cell: &str) -> Result<Action> {
        let cell = cell.trim();
        let invalid = || Error::InvalidCell {
            table: "action",
            cell: cell.to_string(),
        };

        if cell.is_empty() || cell.eq_ignore_ascii_case("err") || cell == EXPORTED_ERROR {
            return Ok(Action::Error);
        }

        if cell.eq_ignore_ascii_case("acc") || cell == EXPORTED_ACCEPT {
            return Ok(Action::Accept);
        }

        if let Some(state) = bracketed(cell, EXPORTED_SHIFT) {
            return state.parse().map(Action::Shift).map_err(|_| invalid());
        }

        if let Some(rule) = bracketed(cell, EXPORTED_REDUCE) {
            return rule.parse().map(Action::Reduce).map_err(|_| invalid());
        }

        if let Some(state) = cell.strip_prefix('s') {
            return state
                .trim()
                .parse()
                .map(Action::Shift)
                .map_err(|_| invalid());
        }

        if let Some(rule) = cell.strip_prefix('r') {
            let rule = rule.trim();
            let rule = rule
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
                .unwrap_or(rule);
            return rule.parse().map(Action::Reduce).map_err(|_| invalid());
        }

        Err(invalid())
    }

    /// Returns true unless this is an error entry
    pub fn is_valid(&self) -> bool {
        !matches!(self, Action::Error)
    }
}

impl fmt::Display for Action {
    /// Formats the action in the same notation accepted by parse_cell
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Reduce(p) => write!(f, "r({})", p),
            Action::Accept => write!(f, "acc"),
            Action::Error => write!(f, "err"),
        }
    }
}

impl Serialize for Action {
    /// Serializes the action as its cell text, with error cells left blank
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Action::Error => serializer.serialize_str(""),
            _ => serializer.collect_str(self),
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
/// Terminal × state → action, with states indexed from 0
pub struct ActionTable {
    entries: BTreeMap<String, BTreeMap<usize, Action>>,
}

impl ActionTable {
    /// Returns true if the terminal has a column in the table at all
    pub fn contains(&self, terminal: &str) -> bool {
        self.entries.contains_key(terminal)
    }

    /// Returns the action for a terminal in a state, if the table has one
    pub fn action(&self, terminal: &str, state: usize) -> Option<&Action> {
        self.entries.get(terminal)?.get(&state)
    }

    /// Returns the action for a terminal in a state, or an error if the
    /// table has no such entry
    pub fn lookup(&self, terminal: &str, state: usize) -> Result<&Action> {
        self.action(terminal, state)
            .ok_or_else(|| Error::MissingAction {
                terminal: terminal.to_string(),
                state,
            })
    }

    /// Returns an iterator over the terminals in the table, in sorted order
    pub fn terminals(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sets the action for a terminal in a state
    pub fn insert(&mut self, terminal: &str, state: usize, action: Action) {
        self.entries
            .entry(terminal.to_string())
            .or_default()
            .insert(state, action);
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
/// Non-terminal × state → state, with states indexed from 0
pub struct GotoTable {
    entries: BTreeMap<String, BTreeMap<usize, usize>>,
}

impl GotoTable {
    /// Returns the state to go to from a state on a non-terminal
    pub fn goto(&self, non_terminal: &str, state: usize) -> Result<usize> {
        self.entries
            .get(non_terminal)
            .and_then(|column| column.get(&state))
            .copied()
            .ok_or_else(|| Error::MissingGoto {
                non_terminal: non_terminal.to_string(),
                state,
            })
    }

    /// Returns an iterator over the non-terminals in the table, in sorted
    /// order
    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sets the state to go to from a state on a non-terminal
    pub fn insert(&mut self, non_terminal: &str, state: usize, next: usize) {
        self.entries
            .entry(non_terminal.to_string())
            .or_default()
            .insert(state, next);
    }

    /// Parses a goto cell, either "3", "s3" or "EMPILHAR[ 3 ]". Blank cells
    /// have no entry.
    fn parse_cell(cell: &str) -> Result<Option<usize>> {
        let cell = cell.trim();
        if cell.is_empty() {
            return Ok(None);
        }

        bracketed(cell, EXPORTED_SHIFT)
            .or_else(|| cell.strip_prefix('s'))
            .unwrap_or(cell)
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| Error::InvalidCell {
                table: "goto",
                cell: cell.to_string(),
            })
    }
}

#[derive(Debug, Default, Serialize)]
/// The action and goto tables for a grammar, ready for parsing
pub struct Tables {
    #[serde(rename = "terminals_nonterminals")]
    pub symbols: Symbols,
    #[serde(rename = "action_table")]
    pub action: ActionTable,
    #[serde(rename = "goto_table")]
    pub goto: GotoTable,
}

impl Tables {
    /// Creates tables from their JSON transport representation. The grammar
    /// symbols are taken from the table keys.
    pub fn from_json(input: &str) -> Result<Tables> {
        let transport: Transport = serde_json::from_str(input)?;
        let mut tables = Tables::default();

        for (terminal, column) in &transport.action_table {
            for (key, cell) in column {
                let state = state_from_column(key)?;
                let action = Action::parse_cell(cell.as_deref().unwrap_or(""))?;
                tables.action.insert(terminal, state, action);
            }
        }

        for (non_terminal, column) in &transport.goto_table {
            for (key, cell) in column {
                let state = state_from_column(key)?;
                if let Some(next) = GotoTable::parse_cell(cell.as_deref().unwrap_or(""))? {
                    tables.goto.insert(non_terminal, state, next);
                }
            }
        }

        tables.symbols = Symbols {
            terminals: transport
                .action_table
                .keys()
                .filter(|t| *t != END_MARKER)
                .cloned()
                .collect(),
            nonterminals: transport.goto_table.keys().cloned().collect(),
        };

        Ok(tables)
    }

    /// Creates tables from a table generator's grid. The first row is a
    /// header naming the symbol of each column, and every following row is
    /// a state. The first column holds state labels and is ignored, as are
    /// columns naming neither a grammar symbol nor the end marker.
    pub fn from_grid(rows: &[Vec<String>], symbols: &Symbols) -> Result<Tables> {
        let Some((header, states)) = rows.split_first() else {
            return Err(Error::EmptyGrid);
        };

        let mut tables = Tables {
            symbols: symbols.clone(),
            ..Tables::default()
        };

        for (j, name) in header.iter().enumerate().skip(1) {
            let name = name.trim();
            let terminal = symbols.is_terminal(name);
            if !terminal && !symbols.is_non_terminal(name) {
                continue;
            }

            for (state, row) in states.iter().enumerate() {
                let cell = row.get(j).map(String::as_str).unwrap_or("");
                if terminal {
                    tables.action.insert(name, state, Action::parse_cell(cell)?);
                } else if let Some(next) = GotoTable::parse_cell(cell)? {
                    tables.goto.insert(name, state, next);
                }
            }
        }

        Ok(tables)
    }
}

/// Converts a 1-based transport column key to a state index
fn state_from_column(key: &str) -> Result<usize> {
    match key.trim().parse::<usize>() {
        Ok(column) if column > 0 => Ok(column - 1),
        _ => Err(Error::InvalidColumn(key.to_string())),
    }
}
