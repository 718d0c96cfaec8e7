//! Arena ids and payload attachment points shared by every container level.

use std::fmt;

/// Stable handle of a member inside its pedigree's arena.
///
/// Ids never change after `build()`; index swaps only move the member's
/// position in the index arrays.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct MemberId(pub(crate) usize);

/// Stable handle of a nuclear family inside its pedigree's arena.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct FamilyId(pub(crate) usize);

/// Stable handle of a subpedigree inside its pedigree's arena.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct SubpedigreeId(pub(crate) usize);

/// Stable handle of a pedigree inside a multipedigree.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct PedigreeId(pub(crate) usize);

/// Ids that address a slot of an arena `Vec`.
pub trait ArenaId: Copy {
    fn as_index(self) -> usize;
}

macro_rules! arena_id {
    ($($ty:ident),*) => {$(
        impl ArenaId for $ty {
            #[inline]
            fn as_index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    )*};
}

arena_id!(MemberId, FamilyId, SubpedigreeId, PedigreeId);

/// The client payload types carried at each level of the model.
///
/// The graph engine never inspects these; they only ride along with their
/// node. Payloads created by the engine itself (families, subpedigrees,
/// synthesized parents) start from `Default`.
pub trait InfoTypes {
    type Member: Default;
    type Family: Default;
    type Subpedigree: Default;
    type Pedigree: Default;
    type Multipedigree: Default;
}

/// Payload set with nothing attached at any level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoInfo;

impl InfoTypes for NoInfo {
    type Member = ();
    type Family = ();
    type Subpedigree = ();
    type Pedigree = ();
    type Multipedigree = ();
}
