use crate::types::MemberId;

use super::link::DraftFamily;

/// Disjoint-set forest over member slots (path halving, union by rank).
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Connected components of a pedigree.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Partition {
    /// Members of each component, in member order. Components are ordered
    /// by their first member.
    pub(crate) groups: Vec<Vec<MemberId>>,
    /// Component of each family.
    pub(crate) family_group: Vec<usize>,
    /// Members that belong to no family at all.
    pub(crate) unconnected: Vec<MemberId>,
}

/// Split members into components joined by mate and parent/child edges.
pub(crate) fn partition(member_count: usize, families: &[DraftFamily]) -> Partition {
    let mut sets = DisjointSet::new(member_count);
    let mut in_family = vec![false; member_count];

    for fam in families {
        let p1 = fam.parent1.0;
        in_family[p1] = true;
        in_family[fam.parent2.0] = true;
        sets.union(p1, fam.parent2.0);
        for child in &fam.offspring {
            in_family[child.0] = true;
            sets.union(p1, child.0);
        }
    }

    let mut out = Partition::default();
    let mut group_of_root = vec![usize::MAX; member_count];
    for (i, &connected) in in_family.iter().enumerate() {
        if !connected {
            out.unconnected.push(MemberId(i));
            continue;
        }
        let root = sets.find(i);
        if group_of_root[root] == usize::MAX {
            group_of_root[root] = out.groups.len();
            out.groups.push(Vec::new());
        }
        out.groups[group_of_root[root]].push(MemberId(i));
    }

    out.family_group = families
        .iter()
        .map(|fam| group_of_root[sets.find(fam.parent1.0)])
        .collect();

    log::debug!(
        "partitioned {} members into {} subpedigrees ({} unconnected)",
        member_count,
        out.groups.len(),
        out.unconnected.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fam(p1: usize, p2: usize, kids: &[usize]) -> DraftFamily {
        DraftFamily {
            parent1: MemberId(p1),
            parent2: MemberId(p2),
            offspring: kids.iter().map(|&k| MemberId(k)).collect(),
        }
    }

    #[test]
    fn test_two_components_and_singleton() {
        // 0x1 -> 2 ; 3x4 -> 5 ; 6 alone ; 2x5 joins both
        let fams = vec![fam(0, 1, &[2]), fam(3, 4, &[5])];
        let p = partition(7, &fams);
        assert_eq!(p.groups.len(), 2);
        assert_eq!(p.unconnected, vec![MemberId(6)]);
        assert_eq!(p.family_group, vec![0, 1]);

        let mut joined = fams.clone();
        joined.push(fam(2, 5, &[]));
        let p = partition(7, &joined);
        assert_eq!(p.groups.len(), 1);
        assert_eq!(p.groups[0].len(), 6);
        assert_eq!(p.family_group, vec![0, 0, 0]);
    }

    #[test]
    fn test_groups_ordered_by_first_member() {
        let fams = vec![fam(2, 3, &[]), fam(0, 4, &[1])];
        let p = partition(5, &fams);
        assert_eq!(p.groups[0], vec![MemberId(0), MemberId(1), MemberId(4)]);
        assert_eq!(p.groups[1], vec![MemberId(2), MemberId(3)]);
        assert_eq!(p.family_group, vec![1, 0]);
    }

    #[test]
    fn test_union_find_is_transitive() {
        let mut sets = DisjointSet::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        sets.union(1, 4);
        assert_eq!(sets.find(0), sets.find(3));
        assert_ne!(sets.find(0), sets.find(2));
    }
}
