use thiserror::Error;

/// Hard failures of the pedigree API.
///
/// Structural problems in the input data are never reported through this type;
/// they are collected as [`BuildIssue`](crate::build::BuildIssue)s during
/// `build()`. A `PedigreeError` means the requested operation itself was
/// refused and nothing was changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PedigreeError {
    #[error("Pedigree '{pedigree}' is frozen: {operation} is not permitted")]
    Frozen {
        pedigree: String,
        operation: &'static str,
    },

    #[error("Pedigree '{pedigree}' has not been built: {operation} requires a current build")]
    NotBuilt {
        pedigree: String,
        operation: &'static str,
    },

    #[error("{kind} index {index} out of range (count = {count})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        count: usize,
    },

    #[error("Pedigree '{0}' not found")]
    UnknownPedigree(String),

    #[error("Member '{name}' not found in pedigree '{pedigree}'")]
    UnknownMember { pedigree: String, name: String },

    #[error("Subpedigree not found in pedigree '{pedigree}'")]
    UnknownSubpedigree { pedigree: String },
}

pub type Result<T> = std::result::Result<T, PedigreeError>;
