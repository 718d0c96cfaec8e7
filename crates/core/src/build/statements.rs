use indexmap::{IndexMap, IndexSet};

use super::issues::BuildIssue;

/// Parent names recorded for one child. Pairs are stored name-sorted so that
/// the order of the two names in a statement does not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParentNames {
    pub(crate) first: String,
    pub(crate) second: Option<String>,
}

impl ParentNames {
    fn one(parent: &str) -> Self {
        Self {
            first: parent.to_string(),
            second: None,
        }
    }

    fn pair(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first: first.to_string(),
            second: Some(second.to_string()),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.first == name || self.second.as_deref() == Some(name)
    }

    pub(crate) fn names(&self) -> Vec<String> {
        let mut out = vec![self.first.clone()];
        out.extend(self.second.clone());
        out
    }
}

/// Relationship statements accumulated by the `add_*` calls.
///
/// Statements persist across builds; each `build()` re-derives the whole
/// structure from them, so any call order yields the same result.
#[derive(Debug, Clone, Default)]
pub(crate) struct Statements {
    pub(crate) lineages: IndexMap<String, ParentNames>,
    pub(crate) marriages: IndexSet<(String, String)>,
    pub(crate) sibships: IndexSet<(String, String)>,
    /// Findings made when statements were recorded.
    pub(crate) issues: Vec<BuildIssue>,
}

fn sorted_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl Statements {
    pub(crate) fn add_lineage(&mut self, child: &str, parent: &str) {
        if child.is_empty() || parent.is_empty() || child == parent {
            self.issues.push(BuildIssue::BadLineage {
                child: child.to_string(),
                parents: vec![parent.to_string()],
            });
            return;
        }
        self.merge_lineage(child, ParentNames::one(parent));
    }

    pub(crate) fn add_lineage_pair(&mut self, child: &str, parent1: &str, parent2: &str) {
        if child.is_empty()
            || parent1.is_empty()
            || parent2.is_empty()
            || child == parent1
            || child == parent2
            || parent1 == parent2
        {
            self.issues.push(BuildIssue::BadLineage {
                child: child.to_string(),
                parents: vec![parent1.to_string(), parent2.to_string()],
            });
            return;
        }
        self.merge_lineage(child, ParentNames::pair(parent1, parent2));
    }

    /// Merge a new parent statement into the one already recorded for `child`.
    ///
    /// | recorded \ new | `<p>`                         | `<p,q>`                      |
    /// |----------------|-------------------------------|------------------------------|
    /// | none           | `<p>`                         | `<p,q>`                      |
    /// | `<j>`          | `<j,p>` if `j != p`           | `<p,q>` if `j` in it, else conflict |
    /// | `<j,k>`        | conflict unless `p` in `<j,k>` | conflict unless equal        |
    fn merge_lineage(&mut self, child: &str, src: ParentNames) {
        let Some(dst) = self.lineages.get_mut(child) else {
            self.lineages.insert(child.to_string(), src);
            return;
        };

        let agrees = match (dst.second.is_some(), src.second.is_some()) {
            (false, false) => {
                if dst.first != src.first {
                    let merged = ParentNames::pair(&dst.first, &src.first);
                    *dst = merged;
                }
                true
            }
            (false, true) => {
                if src.contains(&dst.first) {
                    *dst = src.clone();
                    true
                } else {
                    false
                }
            }
            (true, false) => dst.contains(&src.first),
            (true, true) => *dst == src,
        };

        if !agrees {
            let recorded = dst.names();
            self.issues.push(BuildIssue::ParentConflict {
                child: child.to_string(),
                recorded,
                given: src.names(),
            });
        }
    }

    pub(crate) fn add_marriage(&mut self, spouse1: &str, spouse2: &str) {
        if spouse1.is_empty() || spouse2.is_empty() || spouse1 == spouse2 {
            self.issues.push(BuildIssue::BadMarriage {
                spouse1: spouse1.to_string(),
                spouse2: spouse2.to_string(),
            });
            return;
        }
        self.marriages.insert(sorted_pair(spouse1, spouse2));
    }

    pub(crate) fn add_sibship(&mut self, sib1: &str, sib2: &str) {
        if sib1.is_empty() || sib2.is_empty() || sib1 == sib2 {
            self.issues.push(BuildIssue::BadSibship {
                sib1: sib1.to_string(),
                sib2: sib2.to_string(),
            });
            return;
        }
        self.sibships.insert(sorted_pair(sib1, sib2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parents_of(s: &Statements, child: &str) -> Vec<String> {
        s.lineages[child].names()
    }

    #[test]
    fn test_two_single_parents_merge_into_pair() {
        let mut s = Statements::default();
        s.add_lineage("C", "B");
        s.add_lineage("C", "A");
        assert_eq!(parents_of(&s, "C"), vec!["A", "B"]);
        assert!(s.issues.is_empty());
    }

    #[test]
    fn test_single_then_pair_containing_it() {
        let mut s = Statements::default();
        s.add_lineage("C", "A");
        s.add_lineage_pair("C", "B", "A");
        assert_eq!(parents_of(&s, "C"), vec!["A", "B"]);

        let mut s = Statements::default();
        s.add_lineage_pair("C", "A", "B");
        s.add_lineage("C", "B");
        assert_eq!(parents_of(&s, "C"), vec!["A", "B"]);
        assert!(s.issues.is_empty());
    }

    #[test]
    fn test_repeated_statement_is_idempotent() {
        let mut s = Statements::default();
        s.add_lineage_pair("C", "A", "B");
        s.add_lineage_pair("C", "B", "A");
        s.add_lineage("C", "A");
        s.add_lineage("C", "A");
        assert!(s.issues.is_empty());
        assert_eq!(s.lineages.len(), 1);
    }

    #[test]
    fn test_conflicting_parents_recorded() {
        let mut s = Statements::default();
        s.add_lineage_pair("C", "A", "B");
        s.add_lineage("C", "D");
        s.add_lineage_pair("C", "A", "E");
        assert_eq!(s.issues.len(), 2);
        assert!(matches!(s.issues[0], BuildIssue::ParentConflict { .. }));
        // First statement kept.
        assert_eq!(parents_of(&s, "C"), vec!["A", "B"]);

        let mut s = Statements::default();
        s.add_lineage("C", "A");
        s.add_lineage_pair("C", "D", "E");
        assert_eq!(s.issues.len(), 1);
        assert_eq!(parents_of(&s, "C"), vec!["A"]);
    }

    #[test]
    fn test_bad_statements() {
        let mut s = Statements::default();
        s.add_lineage("A", "A");
        s.add_lineage("", "B");
        s.add_lineage_pair("C", "D", "D");
        s.add_marriage("X", "X");
        s.add_sibship("", "Y");
        assert_eq!(s.issues.len(), 5);
        assert!(s.lineages.is_empty());
        assert!(s.marriages.is_empty());
        assert!(s.sibships.is_empty());
    }

    #[test]
    fn test_marriages_and_sibships_normalized() {
        let mut s = Statements::default();
        s.add_marriage("B", "A");
        s.add_marriage("A", "B");
        s.add_sibship("Z", "Y");
        s.add_sibship("Y", "Z");
        assert_eq!(s.marriages.len(), 1);
        assert_eq!(s.sibships.len(), 1);
        assert!(s.marriages.contains(&("A".to_string(), "B".to_string())));
    }
}
