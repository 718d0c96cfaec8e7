use std::collections::VecDeque;

use crate::config::BuildOptions;
use crate::structure::{Member, Sex, SexCode};

use super::issues::BuildIssue;
use super::link::DraftFamily;

/// Resolve member sexes over the mate graph and check every couple.
///
/// Mates must have opposite sexes, so sexes propagate along mate chains
/// from members whose sex is known. Chains with no known sex stay unsexed
/// unless every member in them is `Arbitrary`.
pub(crate) fn resolve_sexes<M>(
    members: &mut [Member<M>],
    families: &[DraftFamily],
    options: &BuildOptions,
    issues: &mut Vec<BuildIssue>,
) {
    if options.infer_sexes {
        infer(members, families, issues);
    }

    for fam in families {
        let p1 = &members[fam.parent1.0];
        let p2 = &members[fam.parent2.0];
        // Arbitrary parents do not count as unsexed.
        if p1.sex == SexCode::Missing && p2.sex == SexCode::Missing {
            issues.push(BuildIssue::UnsexedParents {
                parent1: p1.name.clone(),
                parent2: p2.name.clone(),
            });
            continue;
        }
        match (p1.effective_sex(), p2.effective_sex()) {
            (Sex::Missing, _) | (_, Sex::Missing) => {}
            (a, b) if a == b => issues.push(BuildIssue::SameSexParents {
                parent1: p1.name.clone(),
                parent2: p2.name.clone(),
                sex: a,
            }),
            _ => {}
        }
    }
}

fn mate_graph(member_count: usize, families: &[DraftFamily]) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); member_count];
    for fam in families {
        let (a, b) = (fam.parent1.0, fam.parent2.0);
        adj[a].push(b);
        adj[b].push(a);
    }
    adj
}

fn infer<M>(members: &mut [Member<M>], families: &[DraftFamily], issues: &mut Vec<BuildIssue>) {
    let adj = mate_graph(members.len(), families);
    let known: Vec<bool> = members.iter().map(|m| !m.sex.is_unknown()).collect();
    let mut colour: Vec<Option<Sex>> = members
        .iter()
        .map(|m| match m.sex.effective() {
            Sex::Missing => None,
            sex => Some(sex),
        })
        .collect();
    let mut conflicted = vec![false; members.len()];

    // Propagate from every member of known sex.
    let mut queue: VecDeque<usize> = (0..members.len()).filter(|&i| known[i]).collect();
    while let Some(u) = queue.pop_front() {
        let Some(sex) = colour[u] else { continue };
        let required = sex.opposite();
        for &v in &adj[u] {
            match colour[v] {
                None => {
                    colour[v] = Some(required);
                    queue.push_back(v);
                }
                Some(have) if have != required => {
                    // Two members of known sex are left to the couple check.
                    let blamed = if !known[v] {
                        v
                    } else if !known[u] {
                        u
                    } else {
                        continue;
                    };
                    if !conflicted[blamed] {
                        conflicted[blamed] = true;
                        let have = colour[blamed].unwrap_or(Sex::Missing);
                        issues.push(BuildIssue::SexConflict {
                            member: members[blamed].name.clone(),
                            declared: have,
                            required: have.opposite(),
                        });
                    }
                }
                Some(_) => {}
            }
        }
    }

    // Chains with no member of known sex.
    for start in 0..members.len() {
        if colour[start].is_some() || adj[start].is_empty() {
            continue;
        }
        let (component, bipartite) = colour_component(start, &adj, &mut colour);
        let all_arbitrary = component
            .iter()
            .all(|&i| members[i].sex == SexCode::Arbitrary);
        if !bipartite {
            issues.push(BuildIssue::MarriageLoop {
                member: members[start].name.clone(),
            });
        }
        if !bipartite || !all_arbitrary {
            for &i in &component {
                conflicted[i] = true;
            }
        }
    }

    for (i, member) in members.iter_mut().enumerate() {
        if known[i] || conflicted[i] {
            continue;
        }
        let Some(sex) = colour[i] else { continue };
        member.sex = SexCode::inferred(sex);
        if member.declared == SexCode::Missing {
            issues.push(BuildIssue::SexInferred {
                member: member.name.clone(),
                sex,
            });
        }
    }
}

/// Tentatively 2-colour the component of `start`, `start` female.
/// Returns the component and whether the colouring is consistent.
fn colour_component(
    start: usize,
    adj: &[Vec<usize>],
    colour: &mut [Option<Sex>],
) -> (Vec<usize>, bool) {
    let mut component = vec![start];
    let mut bipartite = true;
    let mut queue = VecDeque::from([start]);
    colour[start] = Some(Sex::Female);
    while let Some(u) = queue.pop_front() {
        let required = colour[u].map(Sex::opposite);
        for &v in &adj[u] {
            match colour[v] {
                None => {
                    colour[v] = required;
                    component.push(v);
                    queue.push_back(v);
                }
                have => bipartite &= have == required,
            }
        }
    }
    (component, bipartite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MemberId;

    fn members(sexes: &[SexCode]) -> Vec<Member<()>> {
        sexes
            .iter()
            .enumerate()
            .map(|(i, &sex)| Member::new(MemberId(i), format!("M{i}"), sex, ()))
            .collect()
    }

    fn couple(a: usize, b: usize) -> DraftFamily {
        DraftFamily {
            parent1: MemberId(a),
            parent2: MemberId(b),
            offspring: Vec::new(),
        }
    }

    fn run(ms: &mut [Member<()>], fams: &[DraftFamily]) -> Vec<BuildIssue> {
        let mut issues = Vec::new();
        resolve_sexes(ms, fams, &BuildOptions::default(), &mut issues);
        issues
    }

    #[test]
    fn test_mate_chain_propagates_sex() {
        let mut ms = members(&[SexCode::Male, SexCode::Missing, SexCode::Missing]);
        let issues = run(&mut ms, &[couple(0, 1), couple(1, 2)]);
        assert_eq!(ms[1].detailed_sex(), SexCode::InferredFemale);
        assert_eq!(ms[2].detailed_sex(), SexCode::InferredMale);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| matches!(i, BuildIssue::SexInferred { .. })));
    }

    #[test]
    fn test_member_forced_both_ways() {
        let mut ms = members(&[SexCode::Male, SexCode::Female, SexCode::Missing]);
        let issues = run(&mut ms, &[couple(0, 2), couple(1, 2)]);
        assert_eq!(ms[2].effective_sex(), Sex::Missing);
        assert!(matches!(
            &issues[0],
            BuildIssue::SexConflict { member, .. } if member == "M2"
        ));
    }

    #[test]
    fn test_same_sex_parents() {
        let mut ms = members(&[SexCode::Female, SexCode::Female]);
        let issues = run(&mut ms, &[couple(0, 1)]);
        assert_eq!(
            issues,
            vec![BuildIssue::SameSexParents {
                parent1: "M0".to_string(),
                parent2: "M1".to_string(),
                sex: Sex::Female,
            }]
        );
    }

    #[test]
    fn test_odd_marriage_loop_without_sexes() {
        let mut ms = members(&[SexCode::Missing, SexCode::Missing, SexCode::Missing]);
        let issues = run(&mut ms, &[couple(0, 1), couple(1, 2), couple(0, 2)]);
        assert!(matches!(issues[0], BuildIssue::MarriageLoop { .. }));
        assert!(ms.iter().all(|m| m.is_sex_unknown()));
        // One UnsexedParents error per couple.
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn test_arbitrary_chain_gets_sexes() {
        let mut ms = members(&[SexCode::Arbitrary, SexCode::Arbitrary, SexCode::Arbitrary]);
        let issues = run(&mut ms, &[couple(0, 1), couple(1, 2)]);
        assert!(issues.is_empty());
        assert_eq!(ms[0].detailed_sex(), SexCode::InferredFemale);
        assert_eq!(ms[1].detailed_sex(), SexCode::InferredMale);
        assert_eq!(ms[2].detailed_sex(), SexCode::InferredFemale);
    }

    #[test]
    fn test_unsexed_couple_is_an_error() {
        let mut ms = members(&[SexCode::Missing, SexCode::Missing]);
        let issues = run(&mut ms, &[couple(0, 1)]);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], BuildIssue::UnsexedParents { .. }));
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_arbitrary_mate_is_not_unsexed() {
        let mut ms = members(&[SexCode::Missing, SexCode::Arbitrary]);
        let issues = run(&mut ms, &[couple(0, 1)]);
        assert!(issues.is_empty());
        assert!(ms[1].is_sex_unknown());
    }

    #[test]
    fn test_inference_disabled() {
        let mut ms = members(&[SexCode::Male, SexCode::Missing]);
        let mut issues = Vec::new();
        let opts = BuildOptions::new().infer_sexes(false);
        resolve_sexes(&mut ms, &[couple(0, 1)], &opts, &mut issues);
        assert!(ms[1].is_sex_unknown());
        assert!(issues.is_empty());
    }
}
