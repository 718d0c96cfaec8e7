//! Structural predicates over a built pedigree.
//!
//! Keys that do not resolve in the pedigree give `false` or `0`.

use std::collections::VecDeque;

use crate::iter::{FamilyKey, MemberKey, SubpedigreeKey};
use crate::pedigree::Pedigree;
use crate::types::InfoTypes;

/// A nonfounder who is also a parent: links two generations of families.
pub fn is_connector<I: InfoTypes>(ped: &Pedigree<I>, member: impl MemberKey) -> bool {
    ped.member(member)
        .map(|m| m.is_nonfounder() && m.is_parent())
        .unwrap_or(false)
}

/// Families the member belongs to, as a child or as a parent.
pub fn nuclear_family_count<I: InfoTypes>(ped: &Pedigree<I>, member: impl MemberKey) -> usize {
    ped.member(member)
        .map(|m| m.mate_count() + usize::from(m.is_nonfounder()))
        .unwrap_or(0)
}

/// Connectors among the parents and offspring of a family.
pub fn connector_count<I: InfoTypes>(ped: &Pedigree<I>, family: impl FamilyKey) -> usize {
    let Some(fam) = ped.family(family) else {
        return 0;
    };
    [fam.parent1, fam.parent2]
        .iter()
        .chain(fam.offspring.iter())
        .filter(|&&id| is_connector(ped, id))
        .count()
}

/// A family none of whose offspring has offspring of its own.
pub fn is_terminal_family<I: InfoTypes>(ped: &Pedigree<I>, family: impl FamilyKey) -> bool {
    ped.offspring(family)
        .map(|mut kids| kids.all(|kid| !kid.is_parent()))
        .unwrap_or(false)
}

/// Whether `member` is a parent or a child of `family`.
pub fn in_family<I: InfoTypes>(ped: &Pedigree<I>, member: impl MemberKey, family: impl FamilyKey) -> bool {
    let (Some(m), Some(f)) = (ped.member(member), ped.family(family)) else {
        return false;
    };
    f.has_parent(m.id) || m.origin == Some(f.id)
}

/// Whether the member-family graph of the subpedigree contains a cycle,
/// i.e. is not a tree. Marriage loops and consanguinity both count.
pub fn has_loops<I: InfoTypes>(ped: &Pedigree<I>, subpedigree: impl SubpedigreeKey) -> bool {
    let Some(sub) = ped.subpedigree(subpedigree) else {
        return false;
    };
    let vertices = sub.member_count() + sub.family_count();
    let edges: usize = sub
        .families
        .iter()
        .map(|f| 2 + ped.families[f.0].offspring.len())
        .sum();
    edges + 1 > vertices
}

pub fn no_loops<I: InfoTypes>(ped: &Pedigree<I>, subpedigree: impl SubpedigreeKey) -> bool {
    match subpedigree.subpedigree_id(ped) {
        Some(id) => !has_loops(ped, id),
        None => false,
    }
}

/// Whether some member of the subpedigree has more than one mate.
pub fn has_chains<I: InfoTypes>(ped: &Pedigree<I>, subpedigree: impl SubpedigreeKey) -> bool {
    ped.subpedigree_members(subpedigree)
        .map(|mut members| members.any(|m| m.mate_count() > 1))
        .unwrap_or(false)
}

pub fn no_chains<I: InfoTypes>(ped: &Pedigree<I>, subpedigree: impl SubpedigreeKey) -> bool {
    ped.subpedigree_members(subpedigree)
        .map(|mut members| members.all(|m| m.mate_count() <= 1))
        .unwrap_or(false)
}

/// Size of the largest group of members joined by mate links.
pub fn max_cluster_size<I: InfoTypes>(ped: &Pedigree<I>, subpedigree: impl SubpedigreeKey) -> usize {
    let Some(sub) = ped.subpedigree(subpedigree) else {
        return 0;
    };
    let mut seen = vec![false; ped.members.len()];
    let mut largest = 0;
    for &start in &sub.members {
        if seen[start.0] {
            continue;
        }
        seen[start.0] = true;
        let mut size = 0;
        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            size += 1;
            for link in &ped.members[id.0].mates {
                if !seen[link.mate.0] {
                    seen[link.mate.0] = true;
                    queue.push_back(link.mate);
                }
            }
        }
        largest = largest.max(size);
    }
    largest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::SexCode;

    // A x B -> C ; C x D -> E ; C x F -> G
    fn chain() -> Pedigree {
        let mut ped: Pedigree = Pedigree::new("p");
        for (name, sex) in [
            ("A", SexCode::Male),
            ("B", SexCode::Female),
            ("C", SexCode::Male),
            ("D", SexCode::Female),
            ("E", SexCode::Missing),
            ("F", SexCode::Female),
            ("G", SexCode::Missing),
        ] {
            ped.add_member(name, sex).unwrap();
        }
        ped.add_lineage_pair("C", "A", "B").unwrap();
        ped.add_lineage_pair("E", "C", "D").unwrap();
        ped.add_lineage_pair("G", "C", "F").unwrap();
        ped.build().unwrap();
        ped
    }

    #[test]
    fn test_connectors_and_family_counts() {
        let ped = chain();
        assert!(is_connector(&ped, "C"));
        assert!(!is_connector(&ped, "A"));
        assert!(!is_connector(&ped, "E"));
        assert_eq!(nuclear_family_count(&ped, "C"), 3);
        assert_eq!(nuclear_family_count(&ped, "E"), 1);
        assert_eq!(nuclear_family_count(&ped, "nobody"), 0);

        let top = ped.family_find("A", "B").unwrap();
        assert_eq!(connector_count(&ped, top), 1);
        assert!(!is_terminal_family(&ped, top));
        let bottom = ped.family_find("C", "D").unwrap();
        assert!(is_terminal_family(&ped, bottom));
        assert!(in_family(&ped, "C", top));
        assert!(in_family(&ped, "C", bottom));
        assert!(!in_family(&ped, "G", bottom));
    }

    #[test]
    fn test_chains_without_loops() {
        let ped = chain();
        assert!(has_chains(&ped, "p:1"));
        assert!(!no_chains(&ped, "p:1"));
        assert!(!has_loops(&ped, "p:1"));
        assert!(no_loops(&ped, "p:1"));
        // C with both wives.
        assert_eq!(max_cluster_size(&ped, "p:1"), 3);
    }

    #[test]
    fn test_consanguineous_mating_is_a_loop() {
        let mut ped: Pedigree = Pedigree::new("p");
        for (name, sex) in [
            ("A", SexCode::Male),
            ("B", SexCode::Female),
            ("C", SexCode::Male),
            ("D", SexCode::Female),
        ] {
            ped.add_member(name, sex).unwrap();
        }
        ped.add_lineage_pair("C", "A", "B").unwrap();
        ped.add_lineage_pair("D", "A", "B").unwrap();
        ped.add_marriage("C", "D").unwrap();
        ped.build().unwrap();
        assert!(has_loops(&ped, "p:1"));
        assert!(!no_loops(&ped, "p:1"));
        assert!(no_chains(&ped, "p:1"));
        assert_eq!(max_cluster_size(&ped, "p:1"), 2);
    }
}
