use crate::structure::Member;

use super::issues::BuildIssue;
use super::link::DraftFamily;

/// Report every member that is, through parent links, its own ancestor.
pub(crate) fn ancestor_cycles<M>(members: &[Member<M>], families: &[DraftFamily]) -> Vec<BuildIssue> {
    let n = members.len();
    let mut parents_of: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_degree = vec![0u32; n];

    for fam in families {
        for child in &fam.offspring {
            for parent in [fam.parent1.0, fam.parent2.0] {
                parents_of[child.0].push(parent);
                children_of[parent].push(child.0);
                in_degree[child.0] += 1;
            }
        }
    }

    // Kahn's algorithm over parent -> child edges. Members never popped lie
    // on a cycle or descend from one.
    let mut queue: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut done = vec![false; n];
    while let Some(node) = queue.pop() {
        done[node] = true;
        for &child in &children_of[node] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push(child);
            }
        }
    }

    let issues: Vec<BuildIssue> = (0..n)
        .filter(|&i| !done[i] && reaches_itself(i, &parents_of))
        .map(|i| BuildIssue::AncestorCycle {
            member: members[i].name.clone(),
        })
        .collect();

    if !issues.is_empty() {
        log::debug!("{} members are their own ancestors", issues.len());
    }
    issues
}

fn reaches_itself(start: usize, parents_of: &[Vec<usize>]) -> bool {
    let mut seen = vec![false; parents_of.len()];
    let mut stack: Vec<usize> = parents_of[start].clone();
    while let Some(node) = stack.pop() {
        if node == start {
            return true;
        }
        if !seen[node] {
            seen[node] = true;
            stack.extend(&parents_of[node]);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::SexCode;
    use crate::types::MemberId;

    fn members(n: usize) -> Vec<Member<()>> {
        (0..n)
            .map(|i| Member::new(MemberId(i), format!("M{i}"), SexCode::Missing, ()))
            .collect()
    }

    fn fam(p1: usize, p2: usize, kids: &[usize]) -> DraftFamily {
        DraftFamily {
            parent1: MemberId(p1),
            parent2: MemberId(p2),
            offspring: kids.iter().map(|&k| MemberId(k)).collect(),
        }
    }

    #[test]
    fn test_acyclic_pedigree() {
        let ms = members(5);
        let fams = vec![fam(0, 1, &[2, 3]), fam(2, 4, &[])];
        assert!(ancestor_cycles(&ms, &fams).is_empty());
    }

    #[test]
    fn test_two_member_cycle() {
        // 0 is a child of 1, 1 is a child of 0; 4 descends from the cycle.
        let ms = members(5);
        let fams = vec![fam(1, 2, &[0]), fam(0, 3, &[1]), fam(0, 1, &[4])];
        let issues = ancestor_cycles(&ms, &fams);
        let names: Vec<String> = issues
            .iter()
            .map(|i| match i {
                BuildIssue::AncestorCycle { member } => member.clone(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["M0", "M1"]);
    }
}
