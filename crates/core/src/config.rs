/// Options controlling how `build()` resolves incomplete relationship data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Create placeholder parents for single-parent lineages and for
    /// sibships whose parents are entirely unknown.
    pub synthesize_unknown_parents: bool,
    /// Name prefix of synthesized parents (`<prefix><n>`).
    pub unknown_parent_prefix: String,
    /// Deduce missing sexes from mates of known sex.
    pub infer_sexes: bool,
}

impl BuildOptions {
    /// Create options with sensible defaults.
    pub fn new() -> Self {
        Self {
            synthesize_unknown_parents: true,
            unknown_parent_prefix: "~".to_string(),
            infer_sexes: true,
        }
    }

    /// Enable or disable placeholder parents (default: enabled).
    pub fn synthesize_unknown_parents(mut self, enabled: bool) -> Self {
        self.synthesize_unknown_parents = enabled;
        self
    }

    /// Set the name prefix of placeholder parents (default: `"~"`).
    pub fn unknown_parent_prefix(mut self, prefix: &str) -> Self {
        self.unknown_parent_prefix = prefix.to_string();
        self
    }

    /// Enable or disable sex inference (default: enabled).
    pub fn infer_sexes(mut self, enabled: bool) -> Self {
        self.infer_sexes = enabled;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_setters() {
        let opts = BuildOptions::default();
        assert!(opts.synthesize_unknown_parents);
        assert!(opts.infer_sexes);
        assert_eq!(opts.unknown_parent_prefix, "~");

        let opts = BuildOptions::new()
            .synthesize_unknown_parents(false)
            .unknown_parent_prefix("unk_")
            .infer_sexes(false);
        assert!(!opts.synthesize_unknown_parents);
        assert!(!opts.infer_sexes);
        assert_eq!(opts.unknown_parent_prefix, "unk_");
    }
}
