use indexmap::IndexMap;
use rayon::prelude::*;

use crate::config::BuildOptions;
use crate::error::{PedigreeError, Result};
use crate::pedigree::{check_range, BuildState, Pedigree};
use crate::structure::{Member, SexCode};
use crate::types::{InfoTypes, MemberId, NoInfo, PedigreeId};

const CONTAINER: &str = "<multipedigree>";

/// All pedigrees of a data set, with a member numbering that spans them.
///
/// Pedigrees are created on first mention by an `add_*` call and indexed in
/// creation order. `build()` builds every pedigree and then numbers all
/// members globally (`Member::mpindex`), pedigree by pedigree.
pub struct Multipedigree<I: InfoTypes = NoInfo> {
    state: BuildState,
    options: BuildOptions,
    pub(crate) pedigrees: Vec<Pedigree<I>>,
    names: IndexMap<String, PedigreeId>,
    pub(crate) pedigree_index: Vec<PedigreeId>,
    /// Global member index.
    mp_members: Vec<(PedigreeId, MemberId)>,
    /// Generation of each pedigree when the global index was built.
    generations: Vec<u64>,
    info: I::Multipedigree,
}

impl<I: InfoTypes> Default for Multipedigree<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: InfoTypes> Multipedigree<I> {
    /// Create an empty multipedigree with default build options.
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    /// Create an empty multipedigree whose pedigrees all use `options`.
    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            state: BuildState::Building,
            options,
            pedigrees: Vec::new(),
            names: IndexMap::new(),
            pedigree_index: Vec::new(),
            mp_members: Vec::new(),
            generations: Vec::new(),
            info: I::Multipedigree::default(),
        }
    }

    /// Lifecycle of the container. A built multipedigree reports
    /// `Building` again as soon as one of its pedigrees is changed through
    /// a mutable accessor, because the global index no longer matches.
    pub fn state(&self) -> BuildState {
        match self.state {
            BuildState::Built if !self.is_current() => BuildState::Building,
            state => state,
        }
    }

    /// Whether every pedigree still has the structure the global index
    /// was built from.
    fn is_current(&self) -> bool {
        self.generations.len() == self.pedigrees.len()
            && self
                .pedigrees
                .iter()
                .zip(&self.generations)
                .all(|(ped, &generation)| ped.generation == generation)
    }

    fn invalidate(&mut self) {
        self.state = BuildState::Building;
        self.mp_members.clear();
        self.generations.clear();
    }

    /// Client payload of the container.
    pub fn info(&self) -> &I::Multipedigree {
        &self.info
    }

    /// Mutable client payload of the container.
    pub fn info_mut(&mut self) -> &mut I::Multipedigree {
        &mut self.info
    }

    fn check_not_frozen(&self, pedigree: &str, operation: &'static str) -> Result<()> {
        if self.state == BuildState::Frozen {
            log::warn!("multipedigree is frozen; {} on '{}' rejected", operation, pedigree);
            return Err(PedigreeError::Frozen {
                pedigree: pedigree.to_string(),
                operation,
            });
        }
        Ok(())
    }

    /// The named pedigree, created if this is its first mention.
    fn pedigree_entry(&mut self, name: &str, operation: &'static str) -> Result<&mut Pedigree<I>> {
        self.check_not_frozen(name, operation)?;
        self.invalidate();
        let id = match self.names.get(name) {
            Some(&id) => id,
            None => {
                let id = PedigreeId(self.pedigrees.len());
                let mut ped = Pedigree::with_options(name, self.options.clone());
                ped.id = id;
                ped.index = self.pedigree_index.len();
                self.pedigrees.push(ped);
                self.names.insert(name.to_string(), id);
                self.pedigree_index.push(id);
                id
            }
        };
        Ok(&mut self.pedigrees[id.0])
    }

    /// Register a member of `pedigree`. See [`Pedigree::add_member`].
    pub fn add_member(&mut self, pedigree: &str, name: &str, sex: SexCode) -> Result<()> {
        self.pedigree_entry(pedigree, "add_member")?.add_member(name, sex)
    }

    /// Register a member of `pedigree` carrying a payload.
    pub fn add_member_with_info(
        &mut self,
        pedigree: &str,
        name: &str,
        sex: SexCode,
        info: I::Member,
    ) -> Result<()> {
        self.pedigree_entry(pedigree, "add_member")?
            .add_member_with_info(name, sex, info)
    }

    /// Record one parent of `child` in `pedigree`.
    pub fn add_lineage(&mut self, pedigree: &str, child: &str, parent: &str) -> Result<()> {
        self.pedigree_entry(pedigree, "add_lineage")?.add_lineage(child, parent)
    }

    /// Record both parents of `child` in `pedigree`.
    pub fn add_lineage_pair(
        &mut self,
        pedigree: &str,
        child: &str,
        parent1: &str,
        parent2: &str,
    ) -> Result<()> {
        self.pedigree_entry(pedigree, "add_lineage")?
            .add_lineage_pair(child, parent1, parent2)
    }

    /// Record a mate relationship in `pedigree`.
    pub fn add_marriage(&mut self, pedigree: &str, spouse1: &str, spouse2: &str) -> Result<()> {
        self.pedigree_entry(pedigree, "add_marriage")?.add_marriage(spouse1, spouse2)
    }

    /// Record that two members of `pedigree` share their parents.
    pub fn add_sibship(&mut self, pedigree: &str, sib1: &str, sib2: &str) -> Result<()> {
        self.pedigree_entry(pedigree, "add_sibship")?.add_sibship(sib1, sib2)
    }

    /// Replace the declared sex of a member of an existing pedigree.
    pub fn set_sex(&mut self, pedigree: &str, name: &str, sex: SexCode) -> Result<()> {
        self.check_not_frozen(pedigree, "set_sex")?;
        let id = self
            .names
            .get(pedigree)
            .copied()
            .ok_or_else(|| PedigreeError::UnknownPedigree(pedigree.to_string()))?;
        self.invalidate();
        self.pedigrees[id.0].set_sex(name, sex)
    }

    /// Build every pedigree, then number all members globally.
    pub fn build(&mut self) -> Result<()> {
        self.check_not_frozen(CONTAINER, "build")?;
        self.invalidate();
        for ped in &mut self.pedigrees {
            ped.build()?;
        }

        self.mp_members.clear();
        for &pid in &self.pedigree_index {
            let ped = &mut self.pedigrees[pid.0];
            for pos in 0..ped.member_index.len() {
                let mid = ped.member_index[pos];
                ped.members[mid.0].mpindex = Some(self.mp_members.len());
                self.mp_members.push((pid, mid));
            }
        }
        self.generations = self.pedigrees.iter().map(|p| p.generation).collect();
        self.state = BuildState::Built;

        log::info!(
            "built multipedigree: {} pedigrees, {} members, {} errors",
            self.pedigree_count(),
            self.member_count(),
            self.error_count()
        );
        Ok(())
    }

    /// Freeze every pedigree and the container.
    pub fn freeze(&mut self) -> Result<()> {
        match self.state() {
            BuildState::Frozen => return Ok(()),
            BuildState::Building => {
                return Err(PedigreeError::NotBuilt {
                    pedigree: CONTAINER.to_string(),
                    operation: "freeze",
                })
            }
            BuildState::Built => {}
        }
        for ped in &mut self.pedigrees {
            ped.freeze()?;
        }
        self.state = BuildState::Frozen;
        log::info!("froze multipedigree ({} pedigrees)", self.pedigrees.len());
        Ok(())
    }

    fn check_built(&self, operation: &'static str) -> Result<()> {
        match self.state() {
            BuildState::Built => Ok(()),
            BuildState::Frozen => self.check_not_frozen(CONTAINER, operation),
            BuildState::Building => Err(PedigreeError::NotBuilt {
                pedigree: CONTAINER.to_string(),
                operation,
            }),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of pedigrees.
    pub fn pedigree_count(&self) -> usize {
        self.pedigrees.len()
    }

    /// Members of all pedigrees, synthesized parents included.
    pub fn member_count(&self) -> usize {
        self.pedigrees.iter().map(|p| p.member_count()).sum()
    }

    /// Error-severity findings over all pedigrees.
    pub fn error_count(&self) -> usize {
        self.pedigrees.iter().map(|p| p.error_count()).sum()
    }

    /// Largest sibship of any family in any pedigree.
    pub fn max_sibship_size(&self) -> usize {
        self.pedigrees
            .iter()
            .flat_map(|p| p.families.iter())
            .map(|f| f.offspring_count())
            .max()
            .unwrap_or(0)
    }

    /// Pedigree by name.
    pub fn pedigree_find(&self, name: &str) -> Option<&Pedigree<I>> {
        let id = self.names.get(name)?;
        Some(&self.pedigrees[id.0])
    }

    /// Mutable pedigree by name. Changing its statements makes the global
    /// member index stale until the next `build()`.
    pub fn pedigree_find_mut(&mut self, name: &str) -> Option<&mut Pedigree<I>> {
        let id = self.names.get(name)?;
        Some(&mut self.pedigrees[id.0])
    }

    /// Pedigree at position `i` of the pedigree index.
    pub fn pedigree_index(&self, i: usize) -> Option<&Pedigree<I>> {
        let id = self.pedigree_index.get(i)?;
        Some(&self.pedigrees[id.0])
    }

    /// Mutable pedigree at position `i` of the pedigree index.
    pub fn pedigree_index_mut(&mut self, i: usize) -> Option<&mut Pedigree<I>> {
        let id = *self.pedigree_index.get(i)?;
        Some(&mut self.pedigrees[id.0])
    }

    /// Member `name` of `pedigree`.
    pub fn member_find(&self, pedigree: &str, name: &str) -> Option<&Member<I::Member>> {
        self.pedigree_find(pedigree)?.member_find(name)
    }

    /// Member at position `i` of the global member index. `None` while the
    /// index is out of date.
    pub fn member_mpindex(&self, i: usize) -> Option<&Member<I::Member>> {
        if self.state() == BuildState::Building {
            return None;
        }
        let &(pid, mid) = self.mp_members.get(i)?;
        self.pedigrees.get(pid.0)?.members.get(mid.0)
    }

    /// Mutable member at position `i` of the global member index.
    pub fn member_mpindex_mut(&mut self, i: usize) -> Option<&mut Member<I::Member>> {
        if self.state() == BuildState::Building {
            return None;
        }
        let &(pid, mid) = self.mp_members.get(i)?;
        self.pedigrees.get_mut(pid.0)?.members.get_mut(mid.0)
    }

    // ------------------------------------------------------------------
    // Index swaps
    // ------------------------------------------------------------------

    /// Exchange two positions of the pedigree index.
    pub fn pedigree_index_swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_built("pedigree_index_swap")?;
        check_range("pedigree", i, j, self.pedigree_index.len())?;
        self.pedigree_index.swap(i, j);
        self.pedigrees[self.pedigree_index[i].0].index = i;
        self.pedigrees[self.pedigree_index[j].0].index = j;
        Ok(())
    }

    /// Exchange two positions of the global member index.
    pub fn member_index_swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_built("member_index_swap")?;
        check_range("member", i, j, self.mp_members.len())?;
        self.mp_members.swap(i, j);
        for pos in [i, j] {
            let (pid, mid) = self.mp_members[pos];
            self.pedigrees[pid.0].members[mid.0].mpindex = Some(pos);
        }
        Ok(())
    }

    /// Pedigrees in index order as a parallel iterator. Only a frozen
    /// multipedigree may be read concurrently.
    pub fn par_pedigrees(&self) -> Result<impl IndexedParallelIterator<Item = &Pedigree<I>> + '_>
    where
        Pedigree<I>: Sync,
    {
        if self.state() != BuildState::Frozen {
            return Err(PedigreeError::NotBuilt {
                pedigree: CONTAINER.to_string(),
                operation: "par_pedigrees (requires freeze)",
            });
        }
        let pedigrees = &self.pedigrees;
        Ok(self
            .pedigree_index
            .par_iter()
            .map(move |id| &pedigrees[id.0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Multipedigree {
        let mut mp: Multipedigree = Multipedigree::new();
        mp.add_member("f1", "A", SexCode::Male).unwrap();
        mp.add_member("f1", "B", SexCode::Female).unwrap();
        mp.add_member("f1", "C", SexCode::Missing).unwrap();
        mp.add_lineage_pair("f1", "C", "A", "B").unwrap();
        mp.add_member("f2", "A", SexCode::Female).unwrap();
        mp.add_member("f2", "Q", SexCode::Missing).unwrap();
        mp
    }

    #[test]
    fn test_pedigrees_created_lazily() {
        let mp = sample();
        assert_eq!(mp.pedigree_count(), 2);
        assert_eq!(mp.pedigree_index(1).unwrap().name(), "f2");
        assert!(mp.pedigree_find("f3").is_none());
        // Same name in two pedigrees are two members.
        assert!(mp.member_find("f1", "A").unwrap().is_male());
        assert!(mp.member_find("f2", "A").unwrap().is_female());
    }

    #[test]
    fn test_global_member_index() {
        let mut mp = sample();
        mp.build().unwrap();
        assert_eq!(mp.member_count(), 5);
        let names: Vec<&str> = (0..5).map(|i| mp.member_mpindex(i).unwrap().name()).collect();
        assert_eq!(names, vec!["A", "B", "C", "A", "Q"]);
        assert_eq!(mp.member_find("f2", "Q").unwrap().mpindex(), Some(4));

        mp.member_index_swap(0, 4).unwrap();
        assert_eq!(mp.member_mpindex(0).unwrap().name(), "Q");
        assert_eq!(mp.member_find("f2", "Q").unwrap().mpindex(), Some(0));
        assert_eq!(mp.member_find("f1", "A").unwrap().mpindex(), Some(4));

        mp.pedigree_index_swap(0, 1).unwrap();
        assert_eq!(mp.pedigree_index(0).unwrap().name(), "f2");
        assert_eq!(mp.pedigree_find("f2").unwrap().index(), 0);
        assert_eq!(mp.max_sibship_size(), 1);
    }

    #[test]
    fn test_freeze_and_parallel_reads() {
        let mut mp = sample();
        assert!(mp.freeze().is_err());
        mp.build().unwrap();
        assert!(mp.par_pedigrees().is_err());
        mp.freeze().unwrap();
        assert!(mp.pedigree_find("f1").unwrap().is_frozen());

        let counts: Vec<usize> = mp.par_pedigrees().unwrap().map(|p| p.member_count()).collect();
        assert_eq!(counts, vec![3, 2]);

        assert!(matches!(
            mp.add_member("f3", "Z", SexCode::Male),
            Err(PedigreeError::Frozen { .. })
        ));
        assert_eq!(mp.pedigree_count(), 2);
        assert!(mp.pedigree_index_swap(0, 1).is_err());
    }

    #[test]
    fn test_set_sex_unknown_pedigree() {
        let mut mp = sample();
        assert!(matches!(
            mp.set_sex("nope", "A", SexCode::Male),
            Err(PedigreeError::UnknownPedigree(_))
        ));
        mp.set_sex("f2", "Q", SexCode::Male).unwrap();
        mp.build().unwrap();
        assert!(mp.member_find("f2", "Q").unwrap().is_male());
    }
}
