pub mod build;
pub mod config;
pub mod error;
pub mod iter;
pub mod multipedigree;
pub mod pedigree;
pub mod structure;
pub mod types;
pub mod utilities;

pub use build::{BuildIssue, Severity};
pub use config::BuildOptions;
pub use error::{PedigreeError, Result};
pub use iter::{FamilyKey, Mate, MateMut, MemberKey, SubpedigreeKey};
pub use multipedigree::Multipedigree;
pub use pedigree::{BuildState, Callback, Pedigree};
pub use structure::{Family, Member, Sex, SexCode, Subpedigree};
pub use types::{FamilyId, InfoTypes, MemberId, NoInfo, PedigreeId, SubpedigreeId};
