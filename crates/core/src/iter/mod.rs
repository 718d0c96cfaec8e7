//! Traversal of a built pedigree.
//!
//! Every traversal is a view over the arenas: a cursor pairs an arena with
//! the ids to visit and hands out references in that order. Views are tied
//! to a borrow of the pedigree, so the borrow checker rules out using one
//! across a rebuild or an index swap.
//!
//! | kind        | shared                | mutable                  |
//! |-------------|-----------------------|--------------------------|
//! | family      | [`FamilyIter`]        | [`FamilyIterMut`]        |
//! | mate        | [`MateIter`]          | [`MateIterMut`]          |
//! | member      | [`MemberIter`]        | [`MemberIterMut`]        |
//! | offspring   | [`OffspringIter`]     | [`OffspringIterMut`]     |
//! | parent      | [`ParentIter`]        | [`ParentIterMut`]        |
//! | pedigree    | [`PedigreeIter`]      | [`PedigreeIterMut`]      |
//! | progeny     | [`ProgenyIter`]       | [`ProgenyIterMut`]       |
//! | sibling     | [`SiblingIter`]       | [`SiblingIterMut`]       |
//! | subpedigree | [`SubpedigreeIter`]   | [`SubpedigreeIterMut`]   |

mod containers;
mod keys;
mod relatives;

use std::iter::{Copied, Flatten, FusedIterator};
use std::{option, slice, vec};

use crate::multipedigree::Multipedigree;
use crate::pedigree::Pedigree;
use crate::structure::{Family, Member, Subpedigree};
use crate::types::{ArenaId, FamilyId, InfoTypes, MemberId, PedigreeId, SubpedigreeId};

pub use keys::{FamilyKey, MemberKey, SubpedigreeKey};
pub use relatives::{Mate, MateIter, MateIterMut, MateMut};

/// Shared view of arena entries, visited in the order given by `ids`.
#[derive(Debug, Clone)]
pub struct Cursor<'a, T, Ids> {
    arena: &'a [T],
    ids: Ids,
}

impl<'a, T, Ids> Cursor<'a, T, Ids> {
    pub(crate) fn new(arena: &'a [T], ids: Ids) -> Self {
        Self { arena, ids }
    }
}

impl<'a, T, Ids> Iterator for Cursor<'a, T, Ids>
where
    Ids: Iterator,
    Ids::Item: ArenaId,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let arena = self.arena;
        self.ids.next().map(|id| &arena[id.as_index()])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<'a, T, Ids> DoubleEndedIterator for Cursor<'a, T, Ids>
where
    Ids: DoubleEndedIterator,
    Ids::Item: ArenaId,
{
    fn next_back(&mut self) -> Option<&'a T> {
        let arena = self.arena;
        self.ids.next_back().map(|id| &arena[id.as_index()])
    }
}

impl<'a, T, Ids> ExactSizeIterator for Cursor<'a, T, Ids>
where
    Ids: ExactSizeIterator,
    Ids::Item: ArenaId,
{
}

impl<'a, T, Ids> FusedIterator for Cursor<'a, T, Ids>
where
    Ids: FusedIterator,
    Ids::Item: ArenaId,
{
}

/// Mutable view of arena entries. The entries are distinct, so each one is
/// handed out at most once.
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    entries: vec::IntoIter<&'a mut T>,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new<Id: ArenaId>(arena: &'a mut [T], ids: impl IntoIterator<Item = Id>) -> Self {
        Self {
            entries: pick_mut(arena, ids).into_iter(),
        }
    }
}

impl<'a, T> Iterator for CursorMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T> DoubleEndedIterator for CursorMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<T> ExactSizeIterator for CursorMut<'_, T> {}

impl<T> FusedIterator for CursorMut<'_, T> {}

/// Borrow the arena slots named by `ids` mutably, in `ids` order. Repeated
/// ids are visited once, at their first position.
pub(crate) fn pick_mut<'a, T, Id: ArenaId>(
    arena: &'a mut [T],
    ids: impl IntoIterator<Item = Id>,
) -> Vec<&'a mut T> {
    let mut wanted: Vec<(usize, usize)> = ids
        .into_iter()
        .enumerate()
        .map(|(pos, id)| (id.as_index(), pos))
        .collect();
    wanted.sort_unstable();
    wanted.dedup_by_key(|(slot, _)| *slot);

    let mut picked: Vec<(usize, &'a mut T)> = Vec::with_capacity(wanted.len());
    let mut next = wanted.iter().peekable();
    for (slot, entry) in arena.iter_mut().enumerate() {
        match next.peek() {
            Some(&&(want, pos)) if want == slot => {
                picked.push((pos, entry));
                next.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    picked.sort_unstable_by_key(|(pos, _)| *pos);
    picked.into_iter().map(|(_, entry)| entry).collect()
}

/// Id sequence that leaves out one id.
#[derive(Debug, Clone)]
pub struct SkipSelf<Ids> {
    ids: Ids,
    skip: MemberId,
}

impl<Ids: Iterator<Item = MemberId>> Iterator for SkipSelf<Ids> {
    type Item = MemberId;

    fn next(&mut self) -> Option<MemberId> {
        let skip = self.skip;
        self.ids.find(|&id| id != skip)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}

impl<Ids: DoubleEndedIterator<Item = MemberId>> DoubleEndedIterator for SkipSelf<Ids> {
    fn next_back(&mut self) -> Option<MemberId> {
        let skip = self.skip;
        self.ids.rfind(|&id| id != skip)
    }
}

type IdSlice<'a, Id> = Copied<slice::Iter<'a, Id>>;

/// Members of a pedigree, a subpedigree, or the unconnected list.
pub type MemberIter<'a, M> = Cursor<'a, Member<M>, IdSlice<'a, MemberId>>;
pub type MemberIterMut<'a, M> = CursorMut<'a, Member<M>>;

pub type FamilyIter<'a, F> = Cursor<'a, Family<F>, IdSlice<'a, FamilyId>>;
pub type FamilyIterMut<'a, F> = CursorMut<'a, Family<F>>;

pub type SubpedigreeIter<'a, S> = Cursor<'a, Subpedigree<S>, IdSlice<'a, SubpedigreeId>>;
pub type SubpedigreeIterMut<'a, S> = CursorMut<'a, Subpedigree<S>>;

/// Children of one family, in sibship order.
pub type OffspringIter<'a, M> = Cursor<'a, Member<M>, IdSlice<'a, MemberId>>;
pub type OffspringIterMut<'a, M> = CursorMut<'a, Member<M>>;

/// The two parents of a member or family (none for a founder).
pub type ParentIter<'a, M> = Cursor<'a, Member<M>, Flatten<option::IntoIter<[MemberId; 2]>>>;
pub type ParentIterMut<'a, M> = CursorMut<'a, Member<M>>;

/// The other offspring of a member's family.
pub type SiblingIter<'a, M> = Cursor<'a, Member<M>, SkipSelf<IdSlice<'a, MemberId>>>;
pub type SiblingIterMut<'a, M> = CursorMut<'a, Member<M>>;

/// All descendants of a member, generation by generation.
pub type ProgenyIter<'a, M> = Cursor<'a, Member<M>, vec::IntoIter<MemberId>>;
pub type ProgenyIterMut<'a, M> = CursorMut<'a, Member<M>>;

pub type PedigreeIter<'a, I> = Cursor<'a, Pedigree<I>, IdSlice<'a, PedigreeId>>;
pub type PedigreeIterMut<'a, I> = CursorMut<'a, Pedigree<I>>;

impl<I: InfoTypes> Multipedigree<I> {
    /// Pedigrees in pedigree index order.
    pub fn pedigrees(&self) -> PedigreeIter<'_, I> {
        Cursor::new(&self.pedigrees, self.pedigree_index.iter().copied())
    }

    /// Mutable pedigrees in index order. See [`Multipedigree::pedigree_find_mut`].
    pub fn pedigrees_mut(&mut self) -> PedigreeIterMut<'_, I> {
        CursorMut::new(&mut self.pedigrees, self.pedigree_index.iter().copied())
    }
}
