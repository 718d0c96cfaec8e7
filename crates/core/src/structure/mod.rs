// Entities of the pedigree graph: members, families, subpedigrees and sex codes.

pub mod family;
pub mod member;
pub mod sex;
pub mod subpedigree;

pub use family::Family;
pub use member::Member;
pub(crate) use member::MateLink;
pub use sex::{Sex, SexCode};
pub use subpedigree::Subpedigree;
