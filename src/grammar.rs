use crate::errors::{Error, Result};
use crate::lexer::{self, END_MARKER};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The production symbol separating a rule's head from its body
pub const PRODUCTION_SYMBOL: &str = "->";

/// Separates alternative bodies within a single rule
const ALTERNATIVE: &str = "|";

static SPACED_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([()\[\]{}+*\-/&|;=])").expect("spacer regex is valid"));
static SPLIT_ARROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*>").expect("arrow regex is valid"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("space regex is valid"));

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// The kind of table a grammar is analyzed with
pub enum AnalysisKind {
    Ll1,
    Lr0,
    Slr1,
    Lalr1,
    Lr1,
}

impl AnalysisKind {
    /// Returns the identifier used when requesting tables from a generator
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Ll1 => "ll1",
            AnalysisKind::Lr0 => "lr0",
            AnalysisKind::Slr1 => "slr1",
            AnalysisKind::Lalr1 => "lalr1",
            AnalysisKind::Lr1 => "lr1",
        }
    }
}

impl FromStr for AnalysisKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<AnalysisKind> {
        match s.trim().to_lowercase().as_str() {
            "ll1" => Ok(AnalysisKind::Ll1),
            "lr0" => Ok(AnalysisKind::Lr0),
            "slr1" => Ok(AnalysisKind::Slr1),
            "lalr1" => Ok(AnalysisKind::Lalr1),
            "lr1" => Ok(AnalysisKind::Lr1),
            _ => Err(Error::UnknownAnalysisKind(s.to_string())),
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
/// A context-free grammar production, as named by a reduce action
pub struct Production {
    pub head: String,
    pub body: Vec<String>,
}

impl Production {
    /// Returns the number of symbols in the production body
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true if this is an ϵ-production
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl FromStr for Production {
    type Err = Error;

    /// Parses a rule of the form "head -> body". An empty body, or a body
    /// consisting only of ϵ, yields an ϵ-production.
    fn from_str(s: &str) -> Result<Production> {
        let Some((head, body)) = s.split_once(PRODUCTION_SYMBOL) else {
            return Err(Error::InvalidRule(s.to_string()));
        };

        let head = head.trim();
        if head.is_empty() || head.contains(char::is_whitespace) {
            return Err(Error::InvalidRule(s.to_string()));
        }

        Ok(Production {
            head: head.to_string(),
            body: body
                .split_whitespace()
                .filter(|s| !matches!(*s, "ϵ" | "ε"))
                .map(String::from)
                .collect(),
        })
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "{} {} ϵ", self.head, PRODUCTION_SYMBOL)
        } else {
            write!(f, "{} {} {}", self.head, PRODUCTION_SYMBOL, self.body.join(" "))
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize)]
/// The terminal and non-terminal names of a grammar, each sorted
pub struct Symbols {
    pub terminals: Vec<String>,
    pub nonterminals: Vec<String>,
}

impl Symbols {
    /// Extracts the symbols of a normalized grammar. Rule heads are
    /// non-terminals, and every other lexeme in a rule body is a terminal.
    pub fn extract(normalized: &str) -> Result<Symbols> {
        let mut nonterminals = BTreeSet::new();
        let mut candidates = BTreeSet::new();

        for rule in productions(normalized) {
            let Some((head, body)) = rule.split_once(PRODUCTION_SYMBOL) else {
                return Err(Error::InvalidRule(rule));
            };

            let head = head.trim();
            if head.is_empty() {
                return Err(Error::InvalidRule(rule));
            }
            nonterminals.insert(head.to_string());

            candidates.extend(
                lexer::tokenize(body)
                    .into_iter()
                    .map(|l| l.text)
                    .filter(|t| t != ALTERNATIVE),
            );
        }

        if nonterminals.is_empty() {
            return Err(Error::EmptyGrammar);
        }

        Ok(Symbols {
            terminals: candidates
                .into_iter()
                .filter(|t| !nonterminals.contains(t))
                .collect(),
            nonterminals: nonterminals.into_iter().collect(),
        })
    }

    /// Returns true if name is a terminal, or the end marker
    pub fn is_terminal(&self, name: &str) -> bool {
        name == END_MARKER || self.terminals.iter().any(|t| t == name)
    }

    /// Returns true if name is a non-terminal
    pub fn is_non_terminal(&self, name: &str) -> bool {
        self.nonterminals.iter().any(|nt| nt == name)
    }
}

/// Normalizes grammar text into the form accepted by table generators.
/// Single-character symbols are surrounded with spaces, split arrows are
/// rejoined, runs of whitespace collapse to one space, and every rule ends
/// with a '.' with no space before it.
pub fn normalize(grammar: &str) -> String {
    let spaced = SPACED_SYMBOL.replace_all(grammar, " $1 ");
    let arrows = SPLIT_ARROW.replace_all(&spaced, PRODUCTION_SYMBOL);
    let mut normalized = WHITESPACE.replace_all(&arrows, " ").trim().to_string();

    if !normalized.ends_with('.') {
        normalized.push('.');
    }

    normalized.replace(" .", ".")
}

/// Returns the rules of a normalized grammar
pub fn productions(normalized: &str) -> Vec<String> {
    normalized
        .split('.')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("S->A|d.A->b.A->c"), "S->A | d.A->b.A->c.");
        assert_eq!(
            normalize("E - > E+T .\n  T ->  ( E )"),
            "E-> E + T. T-> ( E )."
        );
    }

    #[test]
    fn test_productions() {
        assert_eq!(
            productions("S->A | d.A->b."),
            vec!["S->A | d".to_string(), "A->b".to_string()]
        );
        assert!(productions(".").is_empty());
    }

    #[test]
    fn test_extract_symbols() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let symbols = Symbols::extract(&normalize("E->E+T|T.T->(E)|id."))?;

        assert_eq!(symbols.nonterminals, vec!["E", "T"]);
        assert_eq!(symbols.terminals, vec!["(", ")", "+", "id"]);
        assert!(symbols.is_terminal("$"));
        assert!(symbols.is_non_terminal("T"));
        assert!(!symbols.is_terminal("T"));

        Ok(())
    }

    #[test]
    fn test_extract_symbols_invalid() {
        assert!(matches!(
            Symbols::extract("E E + T."),
            Err(Error::InvalidRule(_))
        ));
        assert!(matches!(Symbols::extract("."), Err(Error::EmptyGrammar)));
    }

    #[test]
    fn test_production_from_str() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let p: Production = "E -> E + T".parse()?;
        assert_eq!(p.head, "E");
        assert_eq!(p.len(), 3);
        assert_eq!(p.to_string(), "E -> E + T");

        let e: Production = "A -> ϵ".parse()?;
        assert!(e.is_empty());
        assert_eq!(e.to_string(), "A -> ϵ");

        let e: Production = "A ->".parse()?;
        assert!(e.is_empty());

        assert!("E T".parse::<Production>().is_err());
        Ok(())
    }

    #[test]
    fn test_analysis_kind() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!("SLR1".parse::<AnalysisKind>()?, AnalysisKind::Slr1);
        assert_eq!(AnalysisKind::Lalr1.to_string(), "lalr1");
        assert!("lr2".parse::<AnalysisKind>().is_err());
        Ok(())
    }
}
