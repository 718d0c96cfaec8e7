use crate::pedigree::Pedigree;
use crate::structure::{Family, Member, Subpedigree};
use crate::types::{FamilyId, InfoTypes, MemberId, SubpedigreeId};

/// Anything that identifies a member of a pedigree: its name, its id, or a
/// reference to the member itself.
pub trait MemberKey {
    fn member_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<MemberId>;
}

impl MemberKey for &str {
    fn member_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<MemberId> {
        pedigree.names_lookup(self)
    }
}

impl MemberKey for &String {
    fn member_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<MemberId> {
        pedigree.names_lookup(self)
    }
}

impl MemberKey for MemberId {
    fn member_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<MemberId> {
        (self.0 < pedigree.members.len()).then_some(*self)
    }
}

/// A member reference resolves only in the pedigree that owns it.
impl<M> MemberKey for &Member<M> {
    fn member_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<MemberId> {
        pedigree
            .members
            .get(self.id.0)
            .filter(|m| m.name == self.name)
            .map(|m| m.id)
    }
}

/// Identifies a family: its id or a reference to it.
pub trait FamilyKey {
    fn family_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<FamilyId>;
}

impl FamilyKey for FamilyId {
    fn family_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<FamilyId> {
        (self.0 < pedigree.families.len()).then_some(*self)
    }
}

impl<F> FamilyKey for &Family<F> {
    fn family_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<FamilyId> {
        pedigree
            .families
            .get(self.id.0)
            .filter(|f| f.parent1 == self.parent1 && f.parent2 == self.parent2)
            .map(|f| f.id)
    }
}

/// Identifies a subpedigree: its name, its id, or a reference to it.
pub trait SubpedigreeKey {
    fn subpedigree_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<SubpedigreeId>;
}

impl SubpedigreeKey for &str {
    fn subpedigree_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<SubpedigreeId> {
        pedigree
            .subpedigrees
            .iter()
            .find(|s| s.name == *self)
            .map(|s| s.id)
    }
}

impl SubpedigreeKey for SubpedigreeId {
    fn subpedigree_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<SubpedigreeId> {
        (self.0 < pedigree.subpedigrees.len()).then_some(*self)
    }
}

impl<S> SubpedigreeKey for &Subpedigree<S> {
    fn subpedigree_id<I: InfoTypes>(&self, pedigree: &Pedigree<I>) -> Option<SubpedigreeId> {
        pedigree
            .subpedigrees
            .get(self.id.0)
            .filter(|s| s.name == self.name)
            .map(|s| s.id)
    }
}
