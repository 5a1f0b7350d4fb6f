//! Module for handing out sequential ids.
//!
//! Ids start at [`FIRST_ID`] and grow by one per call to
//! [`IdSequence::generate`]. A sequence never hands out the same id twice.

use crate::model::Id;
use derive_where::derive_where;
use std::marker::PhantomData;

pub const FIRST_ID: u64 = 1;

#[derive_where(Clone, Eq, PartialEq, Debug, Hash)]
pub struct IdSequence<Marker> {
    next: u64,
    phantom_data: PhantomData<Marker>,
}

impl<Marker> IdSequence<Marker> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: FIRST_ID,
            phantom_data: PhantomData,
        }
    }

    /// The id the next call to [`IdSequence::generate`] returns.
    #[must_use]
    pub fn peek(&self) -> Id<Marker> {
        Id::new(self.next)
    }

    pub fn generate(&mut self) -> Id<Marker> {
        let id = self.peek();
        self.next = self
            .next
            .checked_add(1)
            .expect("Id sequence was exhausted.");

        id
    }
}

impl<Marker> Default for IdSequence<Marker> {
    fn default() -> Self {
        Self::new()
    }
}
