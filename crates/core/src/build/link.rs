use std::collections::HashMap;

use indexmap::IndexMap;

use crate::config::BuildOptions;
use crate::structure::{Member, SexCode};
use crate::types::MemberId;

use super::issues::BuildIssue;
use super::statements::Statements;

/// A family as discovered by linking, before it is placed in a subpedigree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DraftFamily {
    pub(crate) parent1: MemberId,
    pub(crate) parent2: MemberId,
    pub(crate) offspring: Vec<MemberId>,
}

/// Turns name-based statements into families over member ids.
///
/// Placeholder parents are appended to `members` (and `names`) as they are
/// synthesized.
pub(crate) struct Linker<'a, M> {
    names: &'a mut IndexMap<String, MemberId>,
    members: &'a mut Vec<Member<M>>,
    issues: &'a mut Vec<BuildIssue>,
    options: &'a BuildOptions,
    families: Vec<DraftFamily>,
    lookup: HashMap<(MemberId, MemberId), usize>,
    /// Family in which each member slot is an offspring.
    origin: Vec<Option<usize>>,
    next_placeholder: usize,
}

/// Statements with every name resolved to a member id.
struct Resolved {
    full: Vec<(MemberId, MemberId, MemberId)>,
    single: Vec<(MemberId, MemberId)>,
    lineage_of: HashMap<MemberId, Vec<MemberId>>,
    sibships: Vec<(MemberId, MemberId)>,
    marriages: Vec<(MemberId, MemberId)>,
}

impl<'a, M: Default> Linker<'a, M> {
    pub(crate) fn new(
        names: &'a mut IndexMap<String, MemberId>,
        members: &'a mut Vec<Member<M>>,
        issues: &'a mut Vec<BuildIssue>,
        options: &'a BuildOptions,
    ) -> Self {
        let origin = vec![None; members.len()];
        Self {
            names,
            members,
            issues,
            options,
            families: Vec::new(),
            lookup: HashMap::new(),
            origin,
            next_placeholder: 0,
        }
    }

    /// Link every statement and return the families found, in link order.
    pub(crate) fn link(mut self, statements: &Statements) -> Vec<DraftFamily> {
        let resolved = self.resolve(statements);

        for &(child, p1, p2) in &resolved.full {
            let fam = self.family(p1, p2);
            self.place(fam, child);
        }

        let sib_adjacency = adjacency(&resolved.sibships);
        for &(child, parent) in &resolved.single {
            if self.origin[child.0].is_none() {
                self.link_single_parent(child, parent, &resolved, &sib_adjacency);
            }
        }

        self.link_sibships(&resolved.sibships);

        for &(a, b) in &resolved.marriages {
            self.family(a, b);
        }

        log::debug!(
            "linked {} families ({} synthesized parents)",
            self.families.len(),
            self.next_placeholder
        );
        self.families
    }

    fn lookup_name(&mut self, statement: &'static str, name: &str) -> Option<MemberId> {
        let id = self.names.get(name).copied();
        if id.is_none() {
            self.issues.push(BuildIssue::UnresolvedMember {
                statement,
                name: name.to_string(),
            });
        }
        id
    }

    fn resolve(&mut self, statements: &Statements) -> Resolved {
        let mut resolved = Resolved {
            full: Vec::new(),
            single: Vec::new(),
            lineage_of: HashMap::new(),
            sibships: Vec::new(),
            marriages: Vec::new(),
        };

        for (child, parents) in &statements.lineages {
            let child_id = self.lookup_name("lineage", child);
            let first = self.lookup_name("lineage", &parents.first);
            let second = match &parents.second {
                Some(name) => self.lookup_name("lineage", name).map(Some),
                None => Some(None),
            };
            let (Some(c), Some(p1), Some(p2)) = (child_id, first, second) else {
                continue;
            };
            match p2 {
                Some(p2) => {
                    resolved.full.push((c, p1, p2));
                    resolved.lineage_of.insert(c, vec![p1, p2]);
                }
                None => {
                    resolved.single.push((c, p1));
                    resolved.lineage_of.insert(c, vec![p1]);
                }
            }
        }

        for (a, b) in &statements.sibships {
            let ia = self.lookup_name("sibship", a);
            let ib = self.lookup_name("sibship", b);
            if let (Some(a), Some(b)) = (ia, ib) {
                resolved.sibships.push((a, b));
            }
        }

        for (a, b) in &statements.marriages {
            let ia = self.lookup_name("marriage", a);
            let ib = self.lookup_name("marriage", b);
            if let (Some(a), Some(b)) = (ia, ib) {
                resolved.marriages.push((a, b));
            }
        }

        resolved
    }

    /// Get or create the family of the two parents.
    fn family(&mut self, a: MemberId, b: MemberId) -> usize {
        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(&fam) = self.lookup.get(&key) {
            return fam;
        }
        let fam = self.families.len();
        self.families.push(DraftFamily {
            parent1: key.0,
            parent2: key.1,
            offspring: Vec::new(),
        });
        self.lookup.insert(key, fam);
        fam
    }

    /// Make `child` an offspring of `fam`. Returns false if it already
    /// belongs to another family.
    fn place(&mut self, fam: usize, child: MemberId) -> bool {
        match self.origin[child.0] {
            None => {
                self.origin[child.0] = Some(fam);
                self.families[fam].offspring.push(child);
                true
            }
            Some(existing) => existing == fam,
        }
    }

    fn placeholder(&mut self, sex: SexCode) -> MemberId {
        let name = loop {
            self.next_placeholder += 1;
            let candidate = format!(
                "{}{}",
                self.options.unknown_parent_prefix, self.next_placeholder
            );
            if !self.names.contains_key(&candidate) {
                break candidate;
            }
        };
        let id = MemberId(self.members.len());
        let mut member = Member::new(id, name.clone(), sex, M::default());
        member.synthesized = true;
        self.members.push(member);
        self.names.insert(name, id);
        self.origin.push(None);
        id
    }

    /// The placeholder partner of a known parent gets the opposite sex when
    /// the known parent's sex is declared.
    fn partner_placeholder(&mut self, parent: MemberId) -> MemberId {
        let sex = self.members[parent.0].declared.effective().opposite();
        self.placeholder(SexCode::inferred(sex))
    }

    fn link_single_parent(
        &mut self,
        child: MemberId,
        parent: MemberId,
        resolved: &Resolved,
        sib_adjacency: &HashMap<MemberId, Vec<MemberId>>,
    ) {
        let chain = sib_chain(child, sib_adjacency);

        let mut parents = vec![parent];
        for &sib in chain.iter().skip(1) {
            let mut named: Vec<MemberId> = resolved.lineage_of.get(&sib).cloned().unwrap_or_default();
            if let Some(fam) = self.origin[sib.0] {
                named.push(self.families[fam].parent1);
                named.push(self.families[fam].parent2);
            }
            for p in named {
                if !parents.contains(&p) {
                    parents.push(p);
                }
            }
        }

        match parents.len() {
            1 if self.options.synthesize_unknown_parents => {
                let unknown = self.partner_placeholder(parent);
                let fam = self.family(parent, unknown);
                for sib in chain {
                    self.place(fam, sib);
                }
            }
            1 => {
                let issue = BuildIssue::SingleParent {
                    child: self.members[child.0].name.clone(),
                    parent: self.members[parent.0].name.clone(),
                };
                self.issues.push(issue);
            }
            2 => {
                let fam = self.family(parents[0], parents[1]);
                for sib in chain {
                    self.place(fam, sib);
                }
            }
            _ => {
                let mut named: Vec<String> = parents
                    .iter()
                    .map(|id| self.members[id.0].name.clone())
                    .collect();
                let given = named.split_off(1);
                let issue = BuildIssue::ParentConflict {
                    child: self.members[child.0].name.clone(),
                    recorded: named,
                    given,
                };
                self.issues.push(issue);
                if self.options.synthesize_unknown_parents {
                    let unknown = self.partner_placeholder(parent);
                    let fam = self.family(parent, unknown);
                    self.place(fam, child);
                }
            }
        }
    }

    fn link_sibships(&mut self, sibships: &[(MemberId, MemberId)]) {
        let mut done = vec![false; sibships.len()];

        loop {
            let mut changed = false;
            for (i, &(a, b)) in sibships.iter().enumerate() {
                if done[i] {
                    continue;
                }
                match (self.origin[a.0], self.origin[b.0]) {
                    (Some(fam), None) => {
                        self.place(fam, b);
                        changed = true;
                    }
                    (None, Some(fam)) => {
                        self.place(fam, a);
                        changed = true;
                    }
                    (Some(fa), Some(fb)) => {
                        if fa != fb {
                            self.issues.push(BuildIssue::BadSibship {
                                sib1: self.members[a.0].name.clone(),
                                sib2: self.members[b.0].name.clone(),
                            });
                        }
                    }
                    (None, None) => continue,
                }
                done[i] = true;
            }
            if !changed {
                break;
            }
        }

        // Sib groups without any known parent.
        let pending: Vec<(MemberId, MemberId)> = sibships
            .iter()
            .zip(&done)
            .filter(|(_, &d)| !d)
            .map(|(&pair, _)| pair)
            .collect();
        if pending.is_empty() {
            return;
        }

        if !self.options.synthesize_unknown_parents {
            for (a, b) in pending {
                self.issues.push(BuildIssue::UnresolvedSibship {
                    sib1: self.members[a.0].name.clone(),
                    sib2: self.members[b.0].name.clone(),
                });
            }
            return;
        }

        let pending_adjacency = adjacency(&pending);
        for (a, _) in pending {
            if self.origin[a.0].is_some() {
                continue;
            }
            let father = self.placeholder(SexCode::InferredMale);
            let mother = self.placeholder(SexCode::InferredFemale);
            let fam = self.family(father, mother);
            for sib in sib_chain(a, &pending_adjacency) {
                self.place(fam, sib);
            }
        }
    }
}

fn adjacency(pairs: &[(MemberId, MemberId)]) -> HashMap<MemberId, Vec<MemberId>> {
    let mut adj: HashMap<MemberId, Vec<MemberId>> = HashMap::new();
    for &(a, b) in pairs {
        adj.entry(a).or_default().push(b);
        adj.entry(b).or_default().push(a);
    }
    adj
}

/// The connected component of `start` in the sibship graph, `start` first.
fn sib_chain(start: MemberId, adjacency: &HashMap<MemberId, Vec<MemberId>>) -> Vec<MemberId> {
    let mut chain = Vec::new();
    let mut stack = vec![start];
    while let Some(sib) = stack.pop() {
        if chain.contains(&sib) {
            continue;
        }
        chain.push(sib);
        if let Some(next) = adjacency.get(&sib) {
            stack.extend(next.iter().rev().filter(|s| !chain.contains(*s)));
        }
    }
    chain
}
