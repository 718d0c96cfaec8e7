use crate::pedigree::Pedigree;
use crate::types::InfoTypes;

use super::{
    Cursor, CursorMut, FamilyIter, FamilyIterMut, MemberIter, MemberIterMut, SubpedigreeIter,
    SubpedigreeIterMut, SubpedigreeKey,
};

impl<I: InfoTypes> Pedigree<I> {
    /// All members in member index order.
    pub fn members(&self) -> MemberIter<'_, I::Member> {
        Cursor::new(&self.members, self.member_index.iter().copied())
    }

    /// Mutable members in member index order.
    pub fn members_mut(&mut self) -> MemberIterMut<'_, I::Member> {
        CursorMut::new(&mut self.members, self.member_index.iter().copied())
    }

    /// All families in family index order.
    pub fn families(&self) -> FamilyIter<'_, I::Family> {
        Cursor::new(&self.families, self.family_index.iter().copied())
    }

    /// Mutable families in family index order.
    pub fn families_mut(&mut self) -> FamilyIterMut<'_, I::Family> {
        CursorMut::new(&mut self.families, self.family_index.iter().copied())
    }

    /// Subpedigrees in subpedigree index order.
    pub fn subpedigrees(&self) -> SubpedigreeIter<'_, I::Subpedigree> {
        Cursor::new(&self.subpedigrees, self.subpedigree_index.iter().copied())
    }

    /// Mutable subpedigrees in subpedigree index order.
    pub fn subpedigrees_mut(&mut self) -> SubpedigreeIterMut<'_, I::Subpedigree> {
        CursorMut::new(&mut self.subpedigrees, self.subpedigree_index.iter().copied())
    }

    /// Members that belong to no family.
    pub fn unconnected(&self) -> MemberIter<'_, I::Member> {
        Cursor::new(&self.members, self.unconnected.iter().copied())
    }

    pub fn unconnected_mut(&mut self) -> MemberIterMut<'_, I::Member> {
        CursorMut::new(&mut self.members, self.unconnected.iter().copied())
    }

    /// Members of one subpedigree, in subindex order.
    pub fn subpedigree_members(&self, key: impl SubpedigreeKey) -> Option<MemberIter<'_, I::Member>> {
        let id = key.subpedigree_id(self)?;
        let ids = &self.subpedigrees[id.0].members;
        Some(Cursor::new(&self.members, ids.iter().copied()))
    }

    pub fn subpedigree_members_mut(
        &mut self,
        key: impl SubpedigreeKey,
    ) -> Option<MemberIterMut<'_, I::Member>> {
        let id = key.subpedigree_id(self)?;
        let ids = &self.subpedigrees[id.0].members;
        Some(CursorMut::new(&mut self.members, ids.iter().copied()))
    }

    /// Families of one subpedigree, in subindex order.
    pub fn subpedigree_families(&self, key: impl SubpedigreeKey) -> Option<FamilyIter<'_, I::Family>> {
        let id = key.subpedigree_id(self)?;
        let ids = &self.subpedigrees[id.0].families;
        Some(Cursor::new(&self.families, ids.iter().copied()))
    }

    pub fn subpedigree_families_mut(
        &mut self,
        key: impl SubpedigreeKey,
    ) -> Option<FamilyIterMut<'_, I::Family>> {
        let id = key.subpedigree_id(self)?;
        let ids = &self.subpedigrees[id.0].families;
        Some(CursorMut::new(&mut self.families, ids.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use crate::pedigree::Pedigree;
    use crate::structure::SexCode;

    fn two_families() -> Pedigree {
        let mut ped: Pedigree = Pedigree::new("p");
        for (name, sex) in [
            ("A", SexCode::Male),
            ("B", SexCode::Female),
            ("C", SexCode::Missing),
            ("X", SexCode::Male),
            ("Y", SexCode::Female),
            ("Z", SexCode::Missing),
        ] {
            ped.add_member(name, sex).unwrap();
        }
        ped.add_lineage_pair("C", "A", "B").unwrap();
        ped.add_marriage("X", "Y").unwrap();
        ped.build().unwrap();
        ped
    }

    #[test]
    fn test_members_follow_index_order() {
        let mut ped = two_families();
        let names: Vec<&str> = ped.members().map(|m| m.name()).collect();
        assert_eq!(names, vec!["A", "B", "C", "X", "Y", "Z"]);
        assert_eq!(ped.members().len(), 6);

        ped.member_index_swap(0, 5).unwrap();
        let last = ped.members().next_back().unwrap();
        assert_eq!(last.name(), "A");
    }

    #[test]
    fn test_subpedigree_views() {
        let ped = two_families();
        assert_eq!(ped.subpedigrees().len(), 2);
        let first: Vec<&str> = ped.subpedigree_members("p:1").unwrap().map(|m| m.name()).collect();
        assert_eq!(first, vec!["A", "B", "C"]);
        assert_eq!(ped.subpedigree_families("p:2").unwrap().count(), 1);
        assert!(ped.subpedigree_members("p:3").is_none());

        let unconnected: Vec<&str> = ped.unconnected().map(|m| m.name()).collect();
        assert_eq!(unconnected, vec!["Z"]);
    }

    #[test]
    fn test_mutable_views_reach_payloads() {
        let mut ped: Pedigree = two_families();
        assert_eq!(ped.members_mut().count(), 6);
        assert_eq!(ped.families_mut().rev().count(), 2);
        assert_eq!(ped.subpedigrees_mut().count(), 2);
        assert_eq!(ped.unconnected_mut().count(), 1);
        assert_eq!(ped.subpedigree_members_mut("p:2").unwrap().count(), 2);
        assert_eq!(ped.subpedigree_families_mut("p:1").unwrap().count(), 1);
    }
}
