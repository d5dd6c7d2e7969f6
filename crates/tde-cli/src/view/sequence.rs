//! Request tickets for discarding superseded responses
//!
//! A view issues a ticket for each fetch. When the response arrives it is
//! only applied if its ticket is still the newest one; a slow response for
//! an old project or dataset can no longer overwrite fresher state.

/// Identifies one fetch and the parameter it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket<K> {
    seq: u64,
    key: K,
}

impl<K: Copy> Ticket<K> {
    /// The parameter the fetch was issued for
    pub fn key(&self) -> K {
        self.key
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues increasing tickets and remembers the newest
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one
    pub fn issue<K>(&mut self, key: K) -> Ticket<K> {
        self.latest += 1;
        Ticket {
            seq: self.latest,
            key,
        }
    }

    pub fn is_current<K>(&self, ticket: &Ticket<K>) -> bool {
        ticket.seq == self.latest
    }
}
