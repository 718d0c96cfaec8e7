use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::build::issues::BuildIssue;
use crate::build::link::{DraftFamily, Linker};
use crate::build::partition::{partition, Partition};
use crate::build::sexes::resolve_sexes;
use crate::build::statements::Statements;
use crate::build::validate::ancestor_cycles;
use crate::config::BuildOptions;
use crate::error::{PedigreeError, Result};
use crate::iter::{FamilyKey, MemberKey, SubpedigreeKey};
use crate::structure::{Family, MateLink, Member, Sex, SexCode, Subpedigree};
use crate::types::{FamilyId, InfoTypes, MemberId, NoInfo, PedigreeId, SubpedigreeId};

/// Lifecycle of a pedigree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildState {
    /// Accepting statements; the derived structure is empty.
    Building,
    /// Structure derived from the current statements; index swaps allowed.
    Built,
    /// Immutable. Safe to share between reader threads.
    Frozen,
}

/// Observer invoked with the pedigree after a build or a freeze.
pub type Callback<I> = Box<dyn FnMut(&Pedigree<I>) + Send + Sync>;

/// A named pedigree: members, the nuclear families linking them, and their
/// partition into subpedigrees.
///
/// Statements (`add_member`, `add_lineage`, `add_marriage`, `add_sibship`)
/// may come in any order. [`Pedigree::build`] derives the whole structure
/// from them and records every inconsistency it finds as a [`BuildIssue`]
/// instead of failing. After [`Pedigree::freeze`] every mutation is refused
/// with [`PedigreeError::Frozen`].
pub struct Pedigree<I: InfoTypes = NoInfo> {
    name: String,
    pub(crate) id: PedigreeId,
    pub(crate) index: usize,
    /// Bumped whenever the derived structure is discarded.
    pub(crate) generation: u64,
    state: BuildState,
    options: BuildOptions,
    statements: Statements,
    /// Number of members registered through `add_member`; synthesized
    /// parents follow them in the arena.
    declared: usize,
    names: IndexMap<String, MemberId>,
    pub(crate) members: Vec<Member<I::Member>>,
    pub(crate) families: Vec<Family<I::Family>>,
    pub(crate) subpedigrees: Vec<Subpedigree<I::Subpedigree>>,
    pub(crate) member_index: Vec<MemberId>,
    pub(crate) family_index: Vec<FamilyId>,
    pub(crate) subpedigree_index: Vec<SubpedigreeId>,
    pub(crate) unconnected: Vec<MemberId>,
    family_lookup: HashMap<(MemberId, MemberId), FamilyId>,
    /// Family payloads of the previous build, keyed by parent names.
    retained: HashMap<(String, String), I::Family>,
    issues: Vec<BuildIssue>,
    info: I::Pedigree,
    on_build: Option<Callback<I>>,
    on_freeze: Option<Callback<I>>,
}

impl<I: InfoTypes> Pedigree<I> {
    /// Create an empty pedigree with default build options.
    pub fn new(name: &str) -> Self {
        Self::with_options(name, BuildOptions::default())
    }

    /// Create an empty pedigree that builds with `options`.
    pub fn with_options(name: &str, options: BuildOptions) -> Self {
        Self {
            name: name.to_string(),
            id: PedigreeId(0),
            index: 0,
            generation: 0,
            state: BuildState::Building,
            options,
            statements: Statements::default(),
            declared: 0,
            names: IndexMap::new(),
            members: Vec::new(),
            families: Vec::new(),
            subpedigrees: Vec::new(),
            member_index: Vec::new(),
            family_index: Vec::new(),
            subpedigree_index: Vec::new(),
            unconnected: Vec::new(),
            family_lookup: HashMap::new(),
            retained: HashMap::new(),
            issues: Vec::new(),
            info: I::Pedigree::default(),
            on_build: None,
            on_freeze: None,
        }
    }

    /// Name of the pedigree, unique within its multipedigree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id within the owning multipedigree.
    pub fn id(&self) -> PedigreeId {
        self.id
    }

    /// Position in the owning multipedigree's pedigree index (0 when standalone).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// True when the structure is derived from the current statements (built or frozen).
    pub fn is_built(&self) -> bool {
        self.state != BuildState::Building
    }

    /// True after `freeze()`.
    pub fn is_frozen(&self) -> bool {
        self.state == BuildState::Frozen
    }

    /// Options the next `build()` will use.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Client payload of the pedigree.
    pub fn info(&self) -> &I::Pedigree {
        &self.info
    }

    /// Mutable client payload. Changing it does not invalidate a build.
    pub fn info_mut(&mut self) -> &mut I::Pedigree {
        &mut self.info
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Register a member.
    ///
    /// Re-registering a name is accepted when the sex agrees or refines a
    /// missing sex. A conflicting sex keeps the first registration and is
    /// recorded as [`BuildIssue::DuplicateMember`].
    pub fn add_member(&mut self, name: &str, sex: SexCode) -> Result<()> {
        self.add_member_with_info(name, sex, I::Member::default())
    }

    /// Register a member carrying a payload. The payload is dropped if the
    /// name is already registered.
    pub fn add_member_with_info(&mut self, name: &str, sex: SexCode, info: I::Member) -> Result<()> {
        self.begin_mutation("add_member")?;

        if name.is_empty() {
            self.statements.issues.push(BuildIssue::UnresolvedMember {
                statement: "member",
                name: String::new(),
            });
            return Ok(());
        }

        if let Some(&id) = self.names.get(name) {
            let member = &mut self.members[id.0];
            if member.declared == sex || sex.is_unknown() {
                return Ok(());
            }
            if member.declared.is_unknown() {
                member.declared = sex;
                member.sex = sex;
                return Ok(());
            }
            let issue = BuildIssue::DuplicateMember {
                name: name.to_string(),
                first: member.declared,
                second: sex,
            };
            if !self.statements.issues.contains(&issue) {
                self.statements.issues.push(issue);
            }
            return Ok(());
        }

        let id = MemberId(self.members.len());
        self.members.push(Member::new(id, name.to_string(), sex, info));
        self.names.insert(name.to_string(), id);
        self.member_index.push(id);
        self.declared += 1;
        Ok(())
    }

    /// Record that `parent` is a parent of `child`. The other parent may be
    /// named by a later call; otherwise a placeholder is synthesized at build.
    pub fn add_lineage(&mut self, child: &str, parent: &str) -> Result<()> {
        self.begin_mutation("add_lineage")?;
        self.statements.add_lineage(child, parent);
        Ok(())
    }

    /// Record both parents of `child`.
    pub fn add_lineage_pair(&mut self, child: &str, parent1: &str, parent2: &str) -> Result<()> {
        self.begin_mutation("add_lineage")?;
        self.statements.add_lineage_pair(child, parent1, parent2);
        Ok(())
    }

    /// Record a mate relationship, with or without common offspring.
    pub fn add_marriage(&mut self, spouse1: &str, spouse2: &str) -> Result<()> {
        self.begin_mutation("add_marriage")?;
        self.statements.add_marriage(spouse1, spouse2);
        Ok(())
    }

    /// Record that two members share their parents.
    pub fn add_sibship(&mut self, sib1: &str, sib2: &str) -> Result<()> {
        self.begin_mutation("add_sibship")?;
        self.statements.add_sibship(sib1, sib2);
        Ok(())
    }

    /// Replace the declared sex of a registered member.
    pub fn set_sex(&mut self, name: &str, sex: SexCode) -> Result<()> {
        self.check_not_frozen("set_sex")?;
        let id = match self.names.get(name) {
            Some(&id) if id.0 < self.declared => id,
            _ => {
                return Err(PedigreeError::UnknownMember {
                    pedigree: self.name.clone(),
                    name: name.to_string(),
                })
            }
        };
        self.begin_mutation("set_sex")?;
        let member = &mut self.members[id.0];
        member.declared = sex;
        member.sex = sex;
        Ok(())
    }

    /// Call `callback` with the pedigree at the end of every successful `build()`.
    pub fn set_build_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Pedigree<I>) + Send + Sync + 'static,
    {
        self.on_build = Some(Box::new(callback));
    }

    /// Call `callback` with the pedigree once it is frozen.
    pub fn set_freeze_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Pedigree<I>) + Send + Sync + 'static,
    {
        self.on_freeze = Some(Box::new(callback));
    }

    fn check_not_frozen(&self, operation: &'static str) -> Result<()> {
        if self.state == BuildState::Frozen {
            log::warn!("pedigree '{}' is frozen; {} rejected", self.name, operation);
            return Err(PedigreeError::Frozen {
                pedigree: self.name.clone(),
                operation,
            });
        }
        Ok(())
    }

    /// Refuse mutation of a frozen pedigree; discard a previous build.
    fn begin_mutation(&mut self, operation: &'static str) -> Result<()> {
        self.check_not_frozen(operation)?;
        if self.state == BuildState::Built {
            self.reset_derived();
            self.state = BuildState::Building;
        }
        Ok(())
    }

    fn check_built(&self, operation: &'static str) -> Result<()> {
        match self.state {
            BuildState::Built => Ok(()),
            BuildState::Frozen => self.check_not_frozen(operation),
            BuildState::Building => Err(PedigreeError::NotBuilt {
                pedigree: self.name.clone(),
                operation,
            }),
        }
    }

    /// Drop everything a build derived, keeping declared members and their
    /// payloads. Family payloads are kept aside for the next build.
    fn reset_derived(&mut self) {
        self.generation += 1;
        for family in self.families.drain(..) {
            let key = (
                self.members[family.parent1.0].name.clone(),
                self.members[family.parent2.0].name.clone(),
            );
            self.retained.insert(key, family.info);
        }
        self.members.truncate(self.declared);
        self.names.truncate(self.declared);
        for member in &mut self.members {
            member.reset_links();
        }
        self.subpedigrees.clear();
        self.member_index = (0..self.declared).map(MemberId).collect();
        self.family_index.clear();
        self.subpedigree_index.clear();
        self.unconnected.clear();
        self.family_lookup.clear();
        self.issues.clear();
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Derive families, subpedigrees and indices from the statements.
    ///
    /// Always succeeds unless the pedigree is frozen; structural problems are
    /// available afterwards through [`Pedigree::errors`] and
    /// [`Pedigree::warnings`].
    pub fn build(&mut self) -> Result<()> {
        self.check_not_frozen("build")?;
        self.reset_derived();

        let mut issues = self.statements.issues.clone();
        let drafts = Linker::new(&mut self.names, &mut self.members, &mut issues, &self.options)
            .link(&self.statements);
        resolve_sexes(&mut self.members, &drafts, &self.options, &mut issues);
        let parts = partition(self.members.len(), &drafts);
        issues.extend(ancestor_cycles(&self.members, &drafts));
        self.materialize(drafts, parts);
        self.retained.clear();

        self.issues = issues;
        self.state = BuildState::Built;

        log::info!(
            "built pedigree '{}': {} members, {} families, {} subpedigrees, {} unconnected",
            self.name,
            self.members.len(),
            self.families.len(),
            self.subpedigrees.len(),
            self.unconnected.len()
        );
        let errors = self.error_count();
        if errors > 0 {
            log::warn!("pedigree '{}' built with {} errors", self.name, errors);
        }

        if let Some(mut callback) = self.on_build.take() {
            callback(self);
            self.on_build = Some(callback);
        }
        Ok(())
    }

    /// Lock the structure. Requires a current build; freezing twice is a no-op.
    pub fn freeze(&mut self) -> Result<()> {
        match self.state {
            BuildState::Frozen => return Ok(()),
            BuildState::Building => {
                return Err(PedigreeError::NotBuilt {
                    pedigree: self.name.clone(),
                    operation: "freeze",
                })
            }
            BuildState::Built => {}
        }
        self.state = BuildState::Frozen;
        log::info!("froze pedigree '{}'", self.name);

        if let Some(mut callback) = self.on_freeze.take() {
            callback(self);
            self.on_freeze = Some(callback);
        }
        Ok(())
    }

    fn materialize(&mut self, drafts: Vec<DraftFamily>, parts: Partition) {
        for (k, group) in parts.groups.into_iter().enumerate() {
            let id = SubpedigreeId(k);
            for (pos, member) in group.iter().enumerate() {
                let m = &mut self.members[member.0];
                m.subpedigree = Some(id);
                m.subindex = pos;
            }
            let name = format!("{}:{}", self.name, k + 1);
            let mut sub = Subpedigree::new(id, name, I::Subpedigree::default());
            sub.members = group;
            self.subpedigrees.push(sub);
            self.subpedigree_index.push(id);
        }

        for (pos, member) in parts.unconnected.iter().enumerate() {
            self.members[member.0].subindex = pos;
        }
        self.unconnected = parts.unconnected;

        for (f, (draft, group)) in drafts.into_iter().zip(parts.family_group).enumerate() {
            let id = FamilyId(f);
            let (p1, p2) = (draft.parent1, draft.parent2);
            let (father, mother) = match (
                self.members[p1.0].effective_sex(),
                self.members[p2.0].effective_sex(),
            ) {
                (Sex::Male, Sex::Female) => (Some(p1), Some(p2)),
                (Sex::Female, Sex::Male) => (Some(p2), Some(p1)),
                _ => (None, None),
            };

            let sibs = draft.offspring.len();
            for child in &draft.offspring {
                let c = &mut self.members[child.0];
                c.origin = Some(id);
                c.parents = Some((p1, p2));
                c.sibling_count = sibs - 1;
            }
            for (parent, mate) in [(p1, p2), (p2, p1)] {
                let m = &mut self.members[parent.0];
                m.mates.push(MateLink { mate, family: id });
                m.offspring_count += sibs;
            }

            let key = (
                self.members[p1.0].name.clone(),
                self.members[p2.0].name.clone(),
            );
            let info = self.retained.remove(&key).unwrap_or_default();

            let sub = &mut self.subpedigrees[group];
            let subindex = sub.families.len();
            sub.families.push(id);

            self.families.push(Family {
                id,
                index: f,
                subindex,
                subpedigree: SubpedigreeId(group),
                parent1: p1,
                parent2: p2,
                mother,
                father,
                offspring: draft.offspring,
                info,
            });
            self.family_lookup.insert((p1, p2), id);
            self.family_index.push(id);
        }

        self.member_index = (0..self.members.len()).map(MemberId).collect();
    }

    // ------------------------------------------------------------------
    // Counts and indexed access
    // ------------------------------------------------------------------

    /// Number of members, synthesized parents included.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of nuclear families.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Number of subpedigrees (connected components with at least one family).
    pub fn subpedigree_count(&self) -> usize {
        self.subpedigrees.len()
    }

    /// Members with no family at all.
    pub fn unconnected_count(&self) -> usize {
        self.unconnected.len()
    }

    /// Member at position `i` of the member index.
    pub fn member_index(&self, i: usize) -> Option<&Member<I::Member>> {
        let id = self.member_index.get(i)?;
        Some(&self.members[id.0])
    }

    /// Mutable member at position `i` of the member index.
    pub fn member_index_mut(&mut self, i: usize) -> Option<&mut Member<I::Member>> {
        let id = *self.member_index.get(i)?;
        Some(&mut self.members[id.0])
    }

    /// Family at position `i` of the family index.
    pub fn family_index(&self, i: usize) -> Option<&Family<I::Family>> {
        let id = self.family_index.get(i)?;
        Some(&self.families[id.0])
    }

    /// Mutable family at position `i` of the family index.
    pub fn family_index_mut(&mut self, i: usize) -> Option<&mut Family<I::Family>> {
        let id = *self.family_index.get(i)?;
        Some(&mut self.families[id.0])
    }

    /// Subpedigree at position `i` of the subpedigree index.
    pub fn subpedigree_index(&self, i: usize) -> Option<&Subpedigree<I::Subpedigree>> {
        let id = self.subpedigree_index.get(i)?;
        Some(&self.subpedigrees[id.0])
    }

    /// Mutable subpedigree at position `i` of the subpedigree index.
    pub fn subpedigree_index_mut(&mut self, i: usize) -> Option<&mut Subpedigree<I::Subpedigree>> {
        let id = *self.subpedigree_index.get(i)?;
        Some(&mut self.subpedigrees[id.0])
    }

    /// Member at position `i` of a subpedigree's member index.
    pub fn subpedigree_member_index(
        &self,
        subpedigree: impl SubpedigreeKey,
        i: usize,
    ) -> Option<&Member<I::Member>> {
        let sub = &self.subpedigrees[subpedigree.subpedigree_id(self)?.0];
        let id = sub.members.get(i)?;
        Some(&self.members[id.0])
    }

    /// Mutable member at position `i` of a subpedigree's member index.
    pub fn subpedigree_member_index_mut(
        &mut self,
        subpedigree: impl SubpedigreeKey,
        i: usize,
    ) -> Option<&mut Member<I::Member>> {
        let sub = &self.subpedigrees[subpedigree.subpedigree_id(self)?.0];
        let id = *sub.members.get(i)?;
        Some(&mut self.members[id.0])
    }

    /// Family at position `i` of a subpedigree's family index.
    pub fn subpedigree_family_index(
        &self,
        subpedigree: impl SubpedigreeKey,
        i: usize,
    ) -> Option<&Family<I::Family>> {
        let sub = &self.subpedigrees[subpedigree.subpedigree_id(self)?.0];
        let id = sub.families.get(i)?;
        Some(&self.families[id.0])
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub(crate) fn names_lookup(&self, name: &str) -> Option<MemberId> {
        self.names.get(name).copied()
    }

    /// Member by name, synthesized parents included.
    pub fn member_find(&self, name: &str) -> Option<&Member<I::Member>> {
        self.member(name)
    }

    /// Mutable member by name.
    pub fn member_find_mut(&mut self, name: &str) -> Option<&mut Member<I::Member>> {
        self.member_mut(name)
    }

    /// Resolve a member by name, id, or reference.
    pub fn member(&self, key: impl MemberKey) -> Option<&Member<I::Member>> {
        let id = key.member_id(self)?;
        Some(&self.members[id.0])
    }

    /// Mutable member for any [`MemberKey`].
    pub fn member_mut(&mut self, key: impl MemberKey) -> Option<&mut Member<I::Member>> {
        let id = key.member_id(self)?;
        Some(&mut self.members[id.0])
    }

    /// The family formed by two members, in either order.
    pub fn family_find(&self, parent1: impl MemberKey, parent2: impl MemberKey) -> Option<&Family<I::Family>> {
        let id = self.family_of_pair(parent1, parent2)?;
        Some(&self.families[id.0])
    }

    /// Mutable family of two parents, in either order.
    pub fn family_find_mut(
        &mut self,
        parent1: impl MemberKey,
        parent2: impl MemberKey,
    ) -> Option<&mut Family<I::Family>> {
        let id = self.family_of_pair(parent1, parent2)?;
        Some(&mut self.families[id.0])
    }

    pub(crate) fn family_of_pair(&self, a: impl MemberKey, b: impl MemberKey) -> Option<FamilyId> {
        let (a, b) = (a.member_id(self)?, b.member_id(self)?);
        let key = if a <= b { (a, b) } else { (b, a) };
        self.family_lookup.get(&key).copied()
    }

    /// Family for any [`FamilyKey`].
    pub fn family(&self, key: impl FamilyKey) -> Option<&Family<I::Family>> {
        let id = key.family_id(self)?;
        Some(&self.families[id.0])
    }

    /// Mutable family for any [`FamilyKey`].
    pub fn family_mut(&mut self, key: impl FamilyKey) -> Option<&mut Family<I::Family>> {
        let id = key.family_id(self)?;
        Some(&mut self.families[id.0])
    }

    /// Subpedigrees are named `<pedigree>:<k>`.
    pub fn subpedigree_find(&self, name: &str) -> Option<&Subpedigree<I::Subpedigree>> {
        self.subpedigree(name)
    }

    /// Subpedigree for any [`SubpedigreeKey`].
    pub fn subpedigree(&self, key: impl SubpedigreeKey) -> Option<&Subpedigree<I::Subpedigree>> {
        let id = key.subpedigree_id(self)?;
        Some(&self.subpedigrees[id.0])
    }

    /// Mutable subpedigree for any [`SubpedigreeKey`].
    pub fn subpedigree_mut(&mut self, key: impl SubpedigreeKey) -> Option<&mut Subpedigree<I::Subpedigree>> {
        let id = key.subpedigree_id(self)?;
        Some(&mut self.subpedigrees[id.0])
    }

    /// The family a member was born into.
    pub fn parent_family(&self, key: impl MemberKey) -> Option<&Family<I::Family>> {
        let id = self.member(key)?.origin?;
        Some(&self.families[id.0])
    }

    /// Mother of a member, when its parents have opposite sexes.
    pub fn get_mother(&self, key: impl MemberKey) -> Option<&Member<I::Member>> {
        let mother = self.parent_family(key)?.mother?;
        Some(&self.members[mother.0])
    }

    /// Father of a member, when its parents have opposite sexes.
    pub fn get_father(&self, key: impl MemberKey) -> Option<&Member<I::Member>> {
        let father = self.parent_family(key)?.father?;
        Some(&self.members[father.0])
    }

    // ------------------------------------------------------------------
    // Build findings
    // ------------------------------------------------------------------

    /// Every finding of the current build, errors and warnings, in order.
    ///
    /// Before the first build this holds the findings recorded by the
    /// statement calls so far.
    pub fn issues(&self) -> impl DoubleEndedIterator<Item = &BuildIssue> + '_ {
        let current = if self.state == BuildState::Building {
            &self.statements.issues
        } else {
            &self.issues
        };
        current.iter()
    }

    /// Findings of error severity.
    pub fn errors(&self) -> impl DoubleEndedIterator<Item = &BuildIssue> + '_ {
        self.issues().filter(|issue| issue.is_error())
    }

    /// Findings of warning severity.
    pub fn warnings(&self) -> impl DoubleEndedIterator<Item = &BuildIssue> + '_ {
        self.issues().filter(|issue| issue.is_warning())
    }

    /// Number of error-severity findings.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warning-severity findings.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    // ------------------------------------------------------------------
    // Index swaps
    // ------------------------------------------------------------------

    /// Exchange the member index positions `i` and `j`. Relationships are
    /// unaffected.
    pub fn member_index_swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_built("member_index_swap")?;
        check_range("member", i, j, self.member_index.len())?;
        self.member_index.swap(i, j);
        self.members[self.member_index[i].0].index = i;
        self.members[self.member_index[j].0].index = j;
        Ok(())
    }

    /// Exchange two positions of the family index. Requires a current, unfrozen build.
    pub fn family_index_swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_built("family_index_swap")?;
        check_range("family", i, j, self.family_index.len())?;
        self.family_index.swap(i, j);
        self.families[self.family_index[i].0].index = i;
        self.families[self.family_index[j].0].index = j;
        Ok(())
    }

    /// Exchange two positions of the subpedigree index.
    pub fn subpedigree_index_swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_built("subpedigree_index_swap")?;
        check_range("subpedigree", i, j, self.subpedigree_index.len())?;
        self.subpedigree_index.swap(i, j);
        self.subpedigrees[self.subpedigree_index[i].0].index = i;
        self.subpedigrees[self.subpedigree_index[j].0].index = j;
        Ok(())
    }

    fn subpedigree_for_swap(&self, key: impl SubpedigreeKey, operation: &'static str) -> Result<SubpedigreeId> {
        self.check_built(operation)?;
        key.subpedigree_id(self)
            .ok_or_else(|| PedigreeError::UnknownSubpedigree {
                pedigree: self.name.clone(),
            })
    }

    /// Exchange two positions of a subpedigree's member index, keeping
    /// `Member::subindex` in step.
    pub fn subpedigree_member_index_swap(
        &mut self,
        subpedigree: impl SubpedigreeKey,
        i: usize,
        j: usize,
    ) -> Result<()> {
        let id = self.subpedigree_for_swap(subpedigree, "subpedigree_member_index_swap")?;
        let sub = &mut self.subpedigrees[id.0];
        check_range("subpedigree member", i, j, sub.members.len())?;
        sub.members.swap(i, j);
        self.members[sub.members[i].0].subindex = i;
        self.members[sub.members[j].0].subindex = j;
        Ok(())
    }

    /// Exchange two positions of a subpedigree's family index, keeping
    /// `Family::subindex` in step.
    pub fn subpedigree_family_index_swap(
        &mut self,
        subpedigree: impl SubpedigreeKey,
        i: usize,
        j: usize,
    ) -> Result<()> {
        let id = self.subpedigree_for_swap(subpedigree, "subpedigree_family_index_swap")?;
        let sub = &mut self.subpedigrees[id.0];
        check_range("subpedigree family", i, j, sub.families.len())?;
        sub.families.swap(i, j);
        self.families[sub.families[i].0].subindex = i;
        self.families[sub.families[j].0].subindex = j;
        Ok(())
    }
}

pub(crate) fn check_range(kind: &'static str, i: usize, j: usize, count: usize) -> Result<()> {
    for index in [i, j] {
        if index >= count {
            return Err(PedigreeError::IndexOutOfRange { kind, index, count });
        }
    }
    Ok(())
}

impl<I: InfoTypes> fmt::Debug for Pedigree<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pedigree")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("members", &self.members.len())
            .field("families", &self.families.len())
            .field("subpedigrees", &self.subpedigrees.len())
            .field("issues", &self.issues.len())
            .finish()
    }
}
