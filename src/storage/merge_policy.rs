use std::fmt;

/// Conflict rule applied when base and override datasets define the same entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergePolicy {
    /// Override wins; the entity keeps the base position.
    #[default]
    CustomFirst,
    /// Base wins; override items lead the order.
    BaseFirst,
    /// Base wins; override items are only appended when new.
    DedupeBase,
}

impl MergePolicy {
    pub const ALL: [MergePolicy; 3] = [
        MergePolicy::CustomFirst,
        MergePolicy::BaseFirst,
        MergePolicy::DedupeBase,
    ];

    /// Parse a persisted tag. Unknown or missing tags yield `CustomFirst`.
    pub fn parse(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == tag.trim())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MergePolicy::CustomFirst => "CUSTOM_FIRST",
            MergePolicy::BaseFirst => "BASE_FIRST",
            MergePolicy::DedupeBase => "DEDUPE_BASE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MergePolicy::CustomFirst => "Custom First",
            MergePolicy::BaseFirst => "Default First",
            MergePolicy::DedupeBase => "Remove duplicates (keep default)",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_persisted_tags() {
        for policy in MergePolicy::ALL {
            assert_eq!(MergePolicy::parse(policy.as_str()), policy);
        }
    }

    #[test]
    fn unknown_tag_defaults_to_custom_first() {
        assert_eq!(MergePolicy::parse(""), MergePolicy::CustomFirst);
        assert_eq!(MergePolicy::parse("custom_first"), MergePolicy::CustomFirst);
        assert_eq!(MergePolicy::parse("LAST_WINS"), MergePolicy::CustomFirst);
    }
}
