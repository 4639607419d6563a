use super::table::ActionTable;
use crate::lexer::END_MARKER;

/// Returns the terminals with a valid action in the given state, sorted, but
/// with the end marker last. Terminals with no entry for the state are left
/// out.
pub fn expected_terminals(actions: &ActionTable, state: usize) -> Vec<&str> {
    let mut expected: Vec<&str> = actions
        .terminals()
        .filter(|t| actions.action(t, state).is_some_and(|a| a.is_valid()))
        .collect();

    expected.sort_by_key(|t| (*t == END_MARKER, *t));
    expected
}

/// Builds a message for a token rejected in the given state, listing the
/// terminals which would have been accepted
pub fn build_error_message(actions: &ActionTable, state: usize, token: &str) -> String {
    let expected = expected_terminals(actions, state);
    let expected = if expected.is_empty() {
        END_MARKER.to_string()
    } else {
        expected.join(", ")
    };

    if token == END_MARKER {
        format!("premature end of input, expected: {}", expected)
    } else {
        format!("unexpected symbol '{}', expected: {}", token, expected)
    }
}
