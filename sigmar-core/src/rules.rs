//! Match rules and the metal unlock pointer
//!
//! Matching rules:
//! - Salt matches Salt or any element; an element matches Salt or itself.
//! - A metal matches Quicksilver only while it is the next metal to unlock.
//! - Mors matches Vitae and nothing else.
//! - Gold may also be removed alone once every lower metal is cleared.
//! - Everything else is illegal.

use serde::{Deserialize, Serialize};

use crate::marble::{Marble, Metal};

/// Tracks which metal is currently the only one matchable with Quicksilver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// `None` once Gold is cleared
    next_metal: Option<Metal>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            next_metal: Some(Metal::Lead),
        }
    }

    /// Pointer positioned at an arbitrary rank, `None` meaning all cleared
    pub fn at(next_metal: Option<Metal>) -> Self {
        Self { next_metal }
    }

    pub fn next_metal(&self) -> Option<Metal> {
        self.next_metal
    }

    pub fn all_metals_cleared(&self) -> bool {
        self.next_metal.is_none()
    }

    /// Pure legality check for a pair of marbles
    pub fn may_match(&self, a: Marble, b: Marble) -> bool {
        match (a, b) {
            (Marble::Salt, Marble::Salt) => true,
            (Marble::Salt, Marble::Element(_)) | (Marble::Element(_), Marble::Salt) => true,
            (Marble::Element(x), Marble::Element(y)) => x == y,
            (Marble::Metal(m), Marble::Quicksilver) | (Marble::Quicksilver, Marble::Metal(m)) => {
                self.next_metal == Some(m)
            }
            (Marble::Life(x), Marble::Life(y)) => x != y,
            _ => false,
        }
    }

    /// Whether `marble` may be removed without a partner
    pub fn may_remove_alone(&self, marble: Marble) -> bool {
        marble == Marble::GOLD && self.next_metal == Some(Metal::Gold)
    }

    /// Move the pointer to the next metal, or to "none remaining" after Gold
    pub fn advance(&mut self) {
        self.next_metal = self.next_metal.and_then(Metal::next);
    }

    /// Undo one `advance`. Floors at Lead.
    pub fn step_back(&mut self) {
        self.next_metal = Some(match self.next_metal {
            None => Metal::Gold,
            Some(m) => m.prev().unwrap_or(Metal::Lead),
        });
    }
}
