use std::collections::VecDeque;
use std::iter::{FusedIterator, Zip};
use std::{slice, vec};

use crate::pedigree::Pedigree;
use crate::structure::{Family, MateLink, Member};
use crate::types::{InfoTypes, MemberId};

use super::{
    pick_mut, Cursor, CursorMut, FamilyKey, MemberKey, OffspringIter, OffspringIterMut, ParentIter,
    ParentIterMut, ProgenyIter, ProgenyIterMut, SiblingIter, SiblingIterMut, SkipSelf,
};

/// One mate of a member together with the family they form.
#[derive(Debug)]
pub struct Mate<'a, M, F> {
    pub member: &'a Member<M>,
    pub family: &'a Family<F>,
}

impl<M, F> Clone for Mate<'_, M, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, F> Copy for Mate<'_, M, F> {}

#[derive(Debug)]
pub struct MateMut<'a, M, F> {
    pub member: &'a mut Member<M>,
    pub family: &'a mut Family<F>,
}

/// The mates of a member, in the order their families were linked.
#[derive(Debug)]
pub struct MateIter<'a, M, F> {
    members: &'a [Member<M>],
    families: &'a [Family<F>],
    links: slice::Iter<'a, MateLink>,
}

impl<'a, M, F> MateIter<'a, M, F> {
    fn resolve(&self, link: &MateLink) -> Mate<'a, M, F> {
        Mate {
            member: &self.members[link.mate.0],
            family: &self.families[link.family.0],
        }
    }
}

impl<'a, M, F> Iterator for MateIter<'a, M, F> {
    type Item = Mate<'a, M, F>;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.links.next()?;
        Some(self.resolve(link))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.links.size_hint()
    }
}

impl<M, F> DoubleEndedIterator for MateIter<'_, M, F> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let link = self.links.next_back()?;
        Some(self.resolve(link))
    }
}

impl<M, F> ExactSizeIterator for MateIter<'_, M, F> {}

impl<M, F> FusedIterator for MateIter<'_, M, F> {}

#[derive(Debug)]
pub struct MateIterMut<'a, M, F> {
    inner: Zip<vec::IntoIter<&'a mut Member<M>>, vec::IntoIter<&'a mut Family<F>>>,
}

impl<'a, M, F> Iterator for MateIterMut<'a, M, F> {
    type Item = MateMut<'a, M, F>;

    fn next(&mut self) -> Option<Self::Item> {
        let (member, family) = self.inner.next()?;
        Some(MateMut { member, family })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<M, F> DoubleEndedIterator for MateIterMut<'_, M, F> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (member, family) = self.inner.next_back()?;
        Some(MateMut { member, family })
    }
}

impl<M, F> ExactSizeIterator for MateIterMut<'_, M, F> {}

const NO_MEMBERS: &[MemberId] = &[];

impl<I: InfoTypes> Pedigree<I> {
    /// The parents of a member; empty for a founder.
    pub fn parents(&self, key: impl MemberKey) -> Option<ParentIter<'_, I::Member>> {
        let id = key.member_id(self)?;
        let pair = self.members[id.0].parents.map(|(a, b)| [a, b]);
        Some(Cursor::new(&self.members, pair.into_iter().flatten()))
    }

    pub fn parents_mut(&mut self, key: impl MemberKey) -> Option<ParentIterMut<'_, I::Member>> {
        let id = key.member_id(self)?;
        let pair = self.members[id.0].parents.map(|(a, b)| [a, b]);
        Some(CursorMut::new(&mut self.members, pair.into_iter().flatten()))
    }

    /// The two parents of a family, `parent1` first.
    pub fn family_parents(&self, key: impl FamilyKey) -> Option<ParentIter<'_, I::Member>> {
        let id = key.family_id(self)?;
        let fam = &self.families[id.0];
        let pair = Some([fam.parent1, fam.parent2]);
        Some(Cursor::new(&self.members, pair.into_iter().flatten()))
    }

    /// Mates of a member, each paired with the family they share.
    pub fn mates(&self, key: impl MemberKey) -> Option<MateIter<'_, I::Member, I::Family>> {
        let id = key.member_id(self)?;
        Some(MateIter {
            members: &self.members,
            families: &self.families,
            links: self.members[id.0].mates.iter(),
        })
    }

    pub fn mates_mut(&mut self, key: impl MemberKey) -> Option<MateIterMut<'_, I::Member, I::Family>> {
        let id = key.member_id(self)?;
        let links = self.members[id.0].mates.clone();
        let families = pick_mut(&mut self.families, links.iter().map(|l| l.family));
        let members = pick_mut(&mut self.members, links.iter().map(|l| l.mate));
        Some(MateIterMut {
            inner: members.into_iter().zip(families),
        })
    }

    /// Children of a family, in sibship order.
    pub fn offspring(&self, key: impl FamilyKey) -> Option<OffspringIter<'_, I::Member>> {
        let id = key.family_id(self)?;
        let ids = &self.families[id.0].offspring;
        Some(Cursor::new(&self.members, ids.iter().copied()))
    }

    pub fn offspring_mut(&mut self, key: impl FamilyKey) -> Option<OffspringIterMut<'_, I::Member>> {
        let id = key.family_id(self)?;
        let ids = &self.families[id.0].offspring;
        Some(CursorMut::new(&mut self.members, ids.iter().copied()))
    }

    /// Children of two members, in either order.
    pub fn offspring_of(
        &self,
        parent1: impl MemberKey,
        parent2: impl MemberKey,
    ) -> Option<OffspringIter<'_, I::Member>> {
        let id = self.family_of_pair(parent1, parent2)?;
        self.offspring(id)
    }

    /// The other children of the member's family; empty for a founder.
    pub fn siblings(&self, key: impl MemberKey) -> Option<SiblingIter<'_, I::Member>> {
        let id = key.member_id(self)?;
        let sibs = match self.members[id.0].origin {
            Some(fam) => self.families[fam.0].offspring.as_slice(),
            None => NO_MEMBERS,
        };
        let ids = SkipSelf {
            ids: sibs.iter().copied(),
            skip: id,
        };
        Some(Cursor::new(&self.members, ids))
    }

    pub fn siblings_mut(&mut self, key: impl MemberKey) -> Option<SiblingIterMut<'_, I::Member>> {
        let id = key.member_id(self)?;
        let sibs = match self.members[id.0].origin {
            Some(fam) => self.families[fam.0].offspring.as_slice(),
            None => NO_MEMBERS,
        };
        let ids = sibs.iter().copied().filter(|&s| s != id);
        Some(CursorMut::new(&mut self.members, ids))
    }

    /// Every descendant of a member, breadth first, each visited once.
    pub fn progeny(&self, key: impl MemberKey) -> Option<ProgenyIter<'_, I::Member>> {
        let id = key.member_id(self)?;
        Some(Cursor::new(&self.members, self.progeny_ids(id).into_iter()))
    }

    pub fn progeny_mut(&mut self, key: impl MemberKey) -> Option<ProgenyIterMut<'_, I::Member>> {
        let id = key.member_id(self)?;
        let ids = self.progeny_ids(id);
        Some(CursorMut::new(&mut self.members, ids))
    }

    fn progeny_ids(&self, start: MemberId) -> Vec<MemberId> {
        let mut seen = vec![false; self.members.len()];
        seen[start.0] = true;
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(member) = queue.pop_front() {
            for link in &self.members[member.0].mates {
                for &child in &self.families[link.family.0].offspring {
                    if !seen[child.0] {
                        seen[child.0] = true;
                        out.push(child);
                        queue.push_back(child);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::pedigree::Pedigree;
    use crate::structure::SexCode;

    // A x B -> C, D ; C x E -> F ; A x G -> H
    fn three_generations() -> Pedigree {
        let mut ped: Pedigree = Pedigree::new("p");
        for (name, sex) in [
            ("A", SexCode::Male),
            ("B", SexCode::Female),
            ("C", SexCode::Male),
            ("D", SexCode::Missing),
            ("E", SexCode::Female),
            ("F", SexCode::Missing),
            ("G", SexCode::Female),
            ("H", SexCode::Missing),
        ] {
            ped.add_member(name, sex).unwrap();
        }
        ped.add_lineage_pair("C", "A", "B").unwrap();
        ped.add_lineage_pair("D", "A", "B").unwrap();
        ped.add_lineage_pair("F", "C", "E").unwrap();
        ped.add_lineage_pair("H", "A", "G").unwrap();
        ped.build().unwrap();
        ped
    }

    fn names<'a>(it: impl Iterator<Item = &'a crate::structure::Member<()>>) -> Vec<&'a str> {
        it.map(|m| m.name()).collect()
    }

    #[test]
    fn test_parents_and_founders() {
        let ped = three_generations();
        assert_eq!(names(ped.parents("F").unwrap()), vec!["C", "E"]);
        assert_eq!(names(ped.parents("A").unwrap()), Vec::<&str>::new());
        assert!(ped.parents("nobody").is_none());
        let fam = ped.family_find("A", "B").unwrap();
        assert_eq!(names(ped.family_parents(fam).unwrap().rev()), vec!["B", "A"]);
    }

    #[test]
    fn test_mates_pair_member_with_family() {
        let ped = three_generations();
        let mates: Vec<(&str, usize)> = ped
            .mates("A")
            .unwrap()
            .map(|m| (m.member.name(), m.family.offspring_count()))
            .collect();
        assert_eq!(mates, vec![("B", 2), ("G", 1)]);
        assert_eq!(ped.mates("D").unwrap().len(), 0);
    }

    #[test]
    fn test_offspring_and_siblings() {
        let ped = three_generations();
        assert_eq!(names(ped.offspring_of("B", "A").unwrap()), vec!["C", "D"]);
        assert!(ped.offspring_of("B", "G").is_none());
        assert_eq!(names(ped.siblings("C").unwrap()), vec!["D"]);
        assert_eq!(names(ped.siblings("D").unwrap().rev()), vec!["C"]);
        // Half sibs are in a different family.
        assert_eq!(names(ped.siblings("H").unwrap()), Vec::<&str>::new());
        assert_eq!(names(ped.siblings("A").unwrap()), Vec::<&str>::new());
    }

    #[test]
    fn test_progeny_is_breadth_first() {
        let ped = three_generations();
        assert_eq!(names(ped.progeny("A").unwrap()), vec!["C", "D", "H", "F"]);
        assert_eq!(names(ped.progeny("E").unwrap()), vec!["F"]);
        assert_eq!(ped.progeny("F").unwrap().count(), 0);
    }

    #[test]
    fn test_progeny_terminates_on_cycle() {
        let mut ped: Pedigree = Pedigree::new("p");
        ped.add_member("A", SexCode::Male).unwrap();
        ped.add_member("B", SexCode::Female).unwrap();
        ped.add_lineage("A", "B").unwrap();
        ped.add_lineage("B", "A").unwrap();
        ped.build().unwrap();
        assert_eq!(names(ped.progeny("A").unwrap()), vec!["B"]);
    }

    #[test]
    fn test_mutable_relatives() {
        let mut ped = three_generations();
        assert_eq!(ped.parents_mut("F").unwrap().count(), 2);
        assert_eq!(ped.siblings_mut("C").unwrap().count(), 1);
        assert_eq!(ped.progeny_mut("A").unwrap().count(), 4);
        let fam = ped.family_find("C", "E").unwrap().id();
        assert_eq!(ped.offspring_mut(fam).unwrap().count(), 1);

        let mates: Vec<String> = ped
            .mates_mut("A")
            .unwrap()
            .map(|m| format!("{}:{}", m.member.name(), m.family.offspring_count()))
            .collect();
        assert_eq!(mates, vec!["B:2", "G:1"]);
    }
}
