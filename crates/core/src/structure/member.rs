use crate::types::{FamilyId, MemberId, SubpedigreeId};

use super::sex::{Sex, SexCode};

/// Link from a member to one of its mates and the family they form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MateLink {
    pub(crate) mate: MemberId,
    pub(crate) family: FamilyId,
}

/// A single individual of a pedigree.
///
/// All relationship fields are arena ids into the owning pedigree; use the
/// pedigree's traversal methods to follow them. Only the payload is mutable
/// from outside the crate.
#[derive(Debug, Clone)]
pub struct Member<M> {
    pub(crate) id: MemberId,
    pub(crate) name: String,
    /// Sex as stated by `add_member`/`set_sex`.
    pub(crate) declared: SexCode,
    /// Sex after the most recent build's inference.
    pub(crate) sex: SexCode,
    pub(crate) synthesized: bool,
    pub(crate) mpindex: Option<usize>,
    pub(crate) index: usize,
    pub(crate) subindex: usize,
    pub(crate) subpedigree: Option<SubpedigreeId>,
    pub(crate) origin: Option<FamilyId>,
    pub(crate) parents: Option<(MemberId, MemberId)>,
    pub(crate) mates: Vec<MateLink>,
    pub(crate) offspring_count: usize,
    pub(crate) sibling_count: usize,
    pub(crate) info: M,
}

impl<M> Member<M> {
    pub(crate) fn new(id: MemberId, name: String, sex: SexCode, info: M) -> Self {
        Self {
            id,
            name,
            declared: sex,
            sex,
            synthesized: false,
            mpindex: None,
            index: id.0,
            subindex: 0,
            subpedigree: None,
            origin: None,
            parents: None,
            mates: Vec::new(),
            offspring_count: 0,
            sibling_count: 0,
            info,
        }
    }

    /// Drop everything derived by a build, keeping identity, declared sex and payload.
    pub(crate) fn reset_links(&mut self) {
        self.sex = self.declared;
        self.mpindex = None;
        self.index = self.id.0;
        self.subindex = 0;
        self.subpedigree = None;
        self.origin = None;
        self.parents = None;
        self.mates.clear();
        self.offspring_count = 0;
        self.sibling_count = 0;
    }

    /// Arena id. Declared members keep theirs across rebuilds.
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// Name, unique within the pedigree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Male, female or missing, with any inference qualifier collapsed.
    pub fn effective_sex(&self) -> Sex {
        self.sex.effective()
    }

    /// The full sex code, preserving whether the sex was inferred.
    pub fn detailed_sex(&self) -> SexCode {
        self.sex
    }

    /// The sex as it was declared, before inference.
    pub fn declared_sex(&self) -> SexCode {
        self.declared
    }

    /// Male, declared or inferred.
    pub fn is_male(&self) -> bool {
        self.sex.is_male()
    }

    /// Female, declared or inferred.
    pub fn is_female(&self) -> bool {
        self.sex.is_female()
    }

    pub fn is_sex_unknown(&self) -> bool {
        self.sex.is_unknown()
    }

    /// Position in the multipedigree-wide index, once a multipedigree assigned one.
    pub fn mpindex(&self) -> Option<usize> {
        self.mpindex
    }

    /// Position in the pedigree's member index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position within the subpedigree (or within the unconnected list).
    pub fn subindex(&self) -> usize {
        self.subindex
    }

    /// Owning subpedigree; `None` for an unconnected member.
    pub fn subpedigree_id(&self) -> Option<SubpedigreeId> {
        self.subpedigree
    }

    /// The family in which this member is an offspring.
    pub fn family_id(&self) -> Option<FamilyId> {
        self.origin
    }

    /// Both parents, normalized as the origin family's parent1/parent2.
    pub fn parent_ids(&self) -> Option<(MemberId, MemberId)> {
        self.parents
    }

    /// Mates in family link order.
    pub fn mate_ids(&self) -> impl DoubleEndedIterator<Item = MemberId> + '_ {
        self.mates.iter().map(|link| link.mate)
    }

    /// Number of mates, one per family the member parents.
    pub fn mate_count(&self) -> usize {
        self.mates.len()
    }

    /// Number of offspring over all mates.
    pub fn offspring_count(&self) -> usize {
        self.offspring_count
    }

    /// Number of co-offspring in the member's origin family, excluding itself.
    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    /// No parents in this pedigree.
    pub fn is_founder(&self) -> bool {
        self.origin.is_none()
    }

    pub fn is_nonfounder(&self) -> bool {
        self.origin.is_some()
    }

    /// Belongs to a subpedigree.
    pub fn is_connected(&self) -> bool {
        self.subpedigree.is_some()
    }

    pub fn is_unconnected(&self) -> bool {
        self.subpedigree.is_none()
    }

    /// Has at least one mate.
    pub fn is_parent(&self) -> bool {
        self.offspring_count > 0
    }

    pub fn is_non_parent(&self) -> bool {
        self.offspring_count == 0
    }

    /// Whether this member is a placeholder parent created by `build()`.
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    /// Client payload.
    pub fn info(&self) -> &M {
        &self.info
    }

    /// Mutable client payload.
    pub fn info_mut(&mut self) -> &mut M {
        &mut self.info
    }
}
