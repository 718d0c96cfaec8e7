use thiserror::Error;

use crate::structure::{Sex, SexCode};

/// How serious a build finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A structural finding recorded while statements are added or during `build()`.
///
/// Findings never abort a build: the pedigree stays queryable and the caller
/// decides whether to skip the implicated members.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildIssue {
    #[error("Member '{name}' declared twice with conflicting sex ({first} then {second})")]
    DuplicateMember {
        name: String,
        first: SexCode,
        second: SexCode,
    },

    #[error("Conflicting parents for '{child}': recorded {recorded:?}, given {given:?}")]
    ParentConflict {
        child: String,
        recorded: Vec<String>,
        given: Vec<String>,
    },

    #[error("Member '{member}' is its own ancestor")]
    AncestorCycle { member: String },

    #[error("Member '{member}' is declared {declared} but its mates require {required}")]
    SexConflict {
        member: String,
        declared: Sex,
        required: Sex,
    },

    #[error("Mates '{parent1}' and '{parent2}' are both {sex}")]
    SameSexParents {
        parent1: String,
        parent2: String,
        sex: Sex,
    },

    #[error("{statement} refers to unknown member '{name}'")]
    UnresolvedMember {
        statement: &'static str,
        name: String,
    },

    #[error("Invalid lineage for child '{child}' with parents {parents:?}")]
    BadLineage { child: String, parents: Vec<String> },

    #[error("Invalid marriage between '{spouse1}' and '{spouse2}'")]
    BadMarriage { spouse1: String, spouse2: String },

    #[error("Siblings '{sib1}' and '{sib2}' belong to different families")]
    BadSibship { sib1: String, sib2: String },

    #[error("Marriage loop through '{member}' cannot be sexed consistently")]
    MarriageLoop { member: String },

    #[error("Sex of '{member}' inferred as {sex}")]
    SexInferred { member: String, sex: Sex },

    #[error("Neither parent of the family '{parent1}' x '{parent2}' has a known sex")]
    UnsexedParents { parent1: String, parent2: String },

    #[error("Sibship between '{sib1}' and '{sib2}' has no parents to attach to")]
    UnresolvedSibship { sib1: String, sib2: String },

    #[error("Lineage of '{child}' names only one parent '{parent}'")]
    SingleParent { child: String, parent: String },
}

impl BuildIssue {
    /// Whether the finding is an error or a warning.
    pub fn severity(&self) -> Severity {
        match self {
            BuildIssue::SexInferred { .. }
            | BuildIssue::UnresolvedSibship { .. }
            | BuildIssue::SingleParent { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_split() {
        let dup = BuildIssue::DuplicateMember {
            name: "X".to_string(),
            first: SexCode::Male,
            second: SexCode::Female,
        };
        assert!(dup.is_error());
        let inferred = BuildIssue::SexInferred {
            member: "Y".to_string(),
            sex: Sex::Female,
        };
        assert!(inferred.is_warning());
    }

    #[test]
    fn test_display_names_members() {
        let issue = BuildIssue::AncestorCycle {
            member: "A".to_string(),
        };
        assert_eq!(issue.to_string(), "Member 'A' is its own ancestor");

        let issue = BuildIssue::UnresolvedMember {
            statement: "lineage",
            name: "Q".to_string(),
        };
        assert!(issue.to_string().contains("unknown member 'Q'"));
    }
}
