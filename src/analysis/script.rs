use crate::analysis::normalizer::{normalize_latin, normalize_local};

const HANGUL_SYLLABLES: std::ops::RangeInclusive<char> = '\u{AC00}'..='\u{D7A3}';

/// Which half of an index entry a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Local,
    Latin,
}

impl Script {
    /// A single Hangul syllable makes the whole query local-script.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(|ch| HANGUL_SYLLABLES.contains(&ch)) {
            Script::Local
        } else {
            Script::Latin
        }
    }

    pub fn normalize(self, text: &str) -> String {
        match self {
            Script::Local => normalize_local(text),
            Script::Latin => normalize_latin(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_hangul_syllable_selects_local() {
        assert_eq!(Script::detect("REG 일"), Script::Local);
        assert_eq!(Script::detect("가"), Script::Local);
        assert_eq!(Script::detect("힣"), Script::Local);
    }

    #[test]
    fn jamo_and_other_scripts_stay_latin() {
        // Compatibility jamo sit outside the syllable block
        assert_eq!(Script::detect("ㄱㄴ"), Script::Latin);
        assert_eq!(Script::detect("日付"), Script::Latin);
        assert_eq!(Script::detect("reg_dt"), Script::Latin);
    }
}
