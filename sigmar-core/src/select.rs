//! Random selection helpers

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SigmarError};

/// Uniformly pick one of `items`. `what` names the collection in the error.
pub fn choose<'a, T, R: Rng + ?Sized>(items: &'a [T], what: &'static str, rng: &mut R) -> Result<&'a T> {
    items.choose(rng).ok_or(SigmarError::EmptyCollection(what))
}
