use std::fmt;

/// Effective sex of a member: the three-valued code analysis code works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    Missing,
}

impl Sex {
    /// The other sex, or `Missing` for `Missing`.
    pub fn opposite(self) -> Sex {
        match self {
            Sex::Male => Sex::Female,
            Sex::Female => Sex::Male,
            Sex::Missing => Sex::Missing,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Missing => "missing",
        };
        f.write_str(s)
    }
}

/// Detailed sex code.
///
/// Distinguishes a sex stated by the source data from one deduced from
/// relationships (the `Inferred*` variants). `Arbitrary` marks a member whose
/// sex may be chosen freely as long as it stays consistent with its mates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SexCode {
    Male,
    InferredMale,
    Female,
    InferredFemale,
    #[default]
    Missing,
    Arbitrary,
}

impl SexCode {
    /// Collapse the inference qualifier.
    pub fn effective(self) -> Sex {
        match self {
            SexCode::Male | SexCode::InferredMale => Sex::Male,
            SexCode::Female | SexCode::InferredFemale => Sex::Female,
            SexCode::Missing | SexCode::Arbitrary => Sex::Missing,
        }
    }

    /// The inferred code for an effective sex.
    pub fn inferred(sex: Sex) -> SexCode {
        match sex {
            Sex::Male => SexCode::InferredMale,
            Sex::Female => SexCode::InferredFemale,
            Sex::Missing => SexCode::Missing,
        }
    }

    /// Deduced from relationships rather than stated.
    pub fn is_inferred(self) -> bool {
        matches!(self, SexCode::InferredMale | SexCode::InferredFemale)
    }

    pub fn is_male(self) -> bool {
        self.effective() == Sex::Male
    }

    pub fn is_female(self) -> bool {
        self.effective() == Sex::Female
    }

    /// `Missing` or `Arbitrary`.
    pub fn is_unknown(self) -> bool {
        self.effective() == Sex::Missing
    }
}

impl From<Sex> for SexCode {
    fn from(sex: Sex) -> Self {
        match sex {
            Sex::Male => SexCode::Male,
            Sex::Female => SexCode::Female,
            Sex::Missing => SexCode::Missing,
        }
    }
}

impl fmt::Display for SexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SexCode::Arbitrary => f.write_str("arbitrary"),
            code if code.is_inferred() => write!(f, "{} (inferred)", code.effective()),
            code => write!(f, "{}", code.effective()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_collapses_inference() {
        assert_eq!(SexCode::Male.effective(), Sex::Male);
        assert_eq!(SexCode::InferredMale.effective(), Sex::Male);
        assert_eq!(SexCode::Female.effective(), Sex::Female);
        assert_eq!(SexCode::InferredFemale.effective(), Sex::Female);
        assert_eq!(SexCode::Missing.effective(), Sex::Missing);
        assert_eq!(SexCode::Arbitrary.effective(), Sex::Missing);
    }

    #[test]
    fn test_inferred_bit() {
        assert!(SexCode::InferredFemale.is_inferred());
        assert!(!SexCode::Female.is_inferred());
        assert!(!SexCode::Arbitrary.is_inferred());
        assert_eq!(SexCode::inferred(Sex::Male), SexCode::InferredMale);
        assert_eq!(SexCode::inferred(Sex::Missing), SexCode::Missing);
    }

    #[test]
    fn test_predicates_and_display() {
        assert!(SexCode::InferredMale.is_male());
        assert!(SexCode::Female.is_female());
        assert!(SexCode::Arbitrary.is_unknown());
        assert_eq!(Sex::Male.opposite(), Sex::Female);
        assert_eq!(Sex::Missing.opposite(), Sex::Missing);
        assert_eq!(SexCode::InferredFemale.to_string(), "female (inferred)");
        assert_eq!(SexCode::from(Sex::Male).to_string(), "male");
    }
}
