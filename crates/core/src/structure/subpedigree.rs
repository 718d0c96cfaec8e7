use crate::types::{FamilyId, MemberId, SubpedigreeId};

/// A maximal connected component of a pedigree under mate and parent/child
/// relationships. Its member and family lists are filled once per build.
#[derive(Debug, Clone)]
pub struct Subpedigree<S> {
    pub(crate) id: SubpedigreeId,
    pub(crate) name: String,
    pub(crate) index: usize,
    pub(crate) members: Vec<MemberId>,
    pub(crate) families: Vec<FamilyId>,
    pub(crate) info: S,
}

impl<S> Subpedigree<S> {
    pub(crate) fn new(id: SubpedigreeId, name: String, info: S) -> Self {
        Self {
            id,
            name,
            index: id.0,
            members: Vec::new(),
            families: Vec::new(),
            info,
        }
    }

    /// Stable id for the lifetime of one build.
    pub fn id(&self) -> SubpedigreeId {
        self.id
    }

    /// `<pedigree name>:<k>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in the pedigree's subpedigree index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Members in subpedigree index order.
    pub fn member_ids(&self) -> &[MemberId] {
        &self.members
    }

    /// Families in subpedigree index order.
    pub fn family_ids(&self) -> &[FamilyId] {
        &self.families
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Number of families.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Client payload. Reset on every build.
    pub fn info(&self) -> &S {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut S {
        &mut self.info
    }
}
