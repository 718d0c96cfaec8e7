use crate::types::{FamilyId, MemberId, SubpedigreeId};

/// A nuclear family: two parents and their ordered sibship.
///
/// `parent1` is always the earlier-declared parent. `mother`/`father` are
/// only known once the build resolved opposite sexes for the two parents.
#[derive(Debug, Clone)]
pub struct Family<F> {
    pub(crate) id: FamilyId,
    pub(crate) index: usize,
    pub(crate) subindex: usize,
    pub(crate) subpedigree: SubpedigreeId,
    pub(crate) parent1: MemberId,
    pub(crate) parent2: MemberId,
    pub(crate) mother: Option<MemberId>,
    pub(crate) father: Option<MemberId>,
    pub(crate) offspring: Vec<MemberId>,
    pub(crate) info: F,
}

impl<F> Family<F> {
    /// Stable id for the lifetime of one build.
    pub fn id(&self) -> FamilyId {
        self.id
    }

    /// Position in the pedigree's family index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position within the owning subpedigree.
    pub fn subindex(&self) -> usize {
        self.subindex
    }

    /// Subpedigree the family belongs to.
    pub fn subpedigree_id(&self) -> SubpedigreeId {
        self.subpedigree
    }

    /// The earlier-declared parent.
    pub fn parent1(&self) -> MemberId {
        self.parent1
    }

    /// The later-declared parent.
    pub fn parent2(&self) -> MemberId {
        self.parent2
    }

    /// The female parent, if the parents have opposite sexes.
    pub fn mother(&self) -> Option<MemberId> {
        self.mother
    }

    /// The male parent, if the parents have opposite sexes.
    pub fn father(&self) -> Option<MemberId> {
        self.father
    }

    /// Whether `member` is one of the two parents.
    pub fn has_parent(&self, member: MemberId) -> bool {
        self.parent1 == member || self.parent2 == member
    }

    /// The parent that is not `member`, if `member` is a parent of this family.
    pub fn other_parent(&self, member: MemberId) -> Option<MemberId> {
        if self.parent1 == member {
            Some(self.parent2)
        } else if self.parent2 == member {
            Some(self.parent1)
        } else {
            None
        }
    }

    /// Children in link order.
    pub fn offspring_ids(&self) -> &[MemberId] {
        &self.offspring
    }

    pub fn offspring_count(&self) -> usize {
        self.offspring.len()
    }

    /// Client payload.
    pub fn info(&self) -> &F {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut F {
        &mut self.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family() -> Family<()> {
        Family {
            id: FamilyId(0),
            index: 0,
            subindex: 0,
            subpedigree: SubpedigreeId(0),
            parent1: MemberId(0),
            parent2: MemberId(1),
            mother: None,
            father: None,
            offspring: vec![MemberId(2), MemberId(3)],
            info: (),
        }
    }

    #[test]
    fn test_other_parent() {
        let f = family();
        assert_eq!(f.other_parent(MemberId(0)), Some(MemberId(1)));
        assert_eq!(f.other_parent(MemberId(1)), Some(MemberId(0)));
        assert_eq!(f.other_parent(MemberId(2)), None);
        assert!(f.has_parent(MemberId(1)));
        assert_eq!(f.offspring_count(), 2);
    }
}
