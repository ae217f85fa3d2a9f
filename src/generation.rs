//! Request Generations
//!
//! Each UI element (favorite button, detail modal, contact modal, ...) has a
//! generation number. Starting a request bumps it; a response is applied only
//! if nothing newer started on the same element meanwhile.

use std::cell::RefCell;
use std::collections::HashMap;

/// Proof of which request a response belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: String,
    generation: u64,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, Default)]
pub struct Generations {
    current: RefCell<HashMap<String, u64>>,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request on `key`, superseding any in flight.
    pub fn begin(&self, key: &str) -> Ticket {
        let mut current = self.current.borrow_mut();
        let generation = current.entry(key.to_string()).or_insert(0);
        *generation += 1;
        Ticket {
            key: key.to_string(),
            generation: *generation,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.current.borrow().get(&ticket.key) == Some(&ticket.generation)
    }
}
