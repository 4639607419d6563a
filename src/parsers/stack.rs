/// A stack for an LR parser automaton
#[derive(Debug, Clone)]
pub struct Stack {
    elements: Vec<StackEntry>,
}

#[derive(Debug, Eq, PartialEq, Clone)]
/// An entry on the stack. Only the entry for the start state has no symbol.
struct StackEntry {
    state: usize,
    symbol: Option<String>,
}

impl Stack {
    /// Creates a new stack, prepopulated with an entry for the start state
    pub fn new() -> Stack {
        Stack {
            elements: Vec::from([StackEntry {
                state: 0,
                symbol: None,
            }]),
        }
    }

    /// Returns true if every entry, including the start state, has been
    /// popped
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the state associated with the entry at the top of the stack
    pub fn peek_state(&self) -> Option<usize> {
        self.elements.last().map(|e| e.state)
    }

    /// Pops the entry at the top of the stack, returning its symbol
    pub fn pop(&mut self) -> Option<String> {
        self.elements.pop().and_then(|e| e.symbol)
    }

    /// Pops n entries while leaving the start state in place. Returns false,
    /// leaving the stack untouched, if there are not enough entries.
    pub fn pop_n(&mut self, n: usize) -> bool {
        if n >= self.elements.len() {
            return false;
        }
        self.elements.truncate(self.elements.len() - n);
        true
    }

    /// Pushes a symbol and the state reached on it
    pub fn push(&mut self, symbol: &str, state: usize) {
        self.elements.push(StackEntry {
            state,
            symbol: Some(symbol.to_string()),
        });
    }

    /// Returns the stack as alternating states and symbols, top first
    pub fn snapshot(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.elements.len() * 2);
        for entry in self.elements.iter().rev() {
            out.push(entry.state.to_string());
            if let Some(symbol) = &entry.symbol {
                out.push(symbol.clone());
            }
        }
        out
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
