//! The phases of `Pedigree::build()` and the findings they record.
//!
//! Statements are linked into families, sexes are resolved over mate
//! chains, members are partitioned into subpedigrees, and the result is
//! checked for ancestor cycles. Each phase appends to one ordered issue list.

pub mod issues;
pub(crate) mod link;
pub(crate) mod partition;
pub(crate) mod sexes;
pub(crate) mod statements;
pub(crate) mod validate;

pub use issues::{BuildIssue, Severity};
