use std::sync::LazyLock;
use regex::Regex;

static LOCAL_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s[:punct:]]+").expect("valid local noise pattern")
});

static LATIN_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[_\-\s]+").expect("valid latin separator pattern")
});

/// Text normalization applied to both indexed text and queries.
///
/// Implementations must be idempotent: `normalize(normalize(x)) == normalize(x)`.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> String;

    fn name(&self) -> &str;
}

/// Compact comparison key for local-script text: whitespace and ASCII
/// punctuation removed.
pub struct LocalNormalizer;

impl Normalizer for LocalNormalizer {
    fn normalize(&self, text: &str) -> String {
        LOCAL_NOISE.replace_all(text.trim(), "").into_owned()
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Lower-cased, space-tokenized Latin text. Runs of `_`, `-` and whitespace
/// collapse to one space.
pub struct LatinNormalizer;

impl Normalizer for LatinNormalizer {
    fn normalize(&self, text: &str) -> String {
        let lowered = text.trim().to_lowercase();
        // Trim after collapsing so a trailing separator cannot leave a space behind
        LATIN_SEPARATORS.replace_all(&lowered, " ").trim().to_string()
    }

    fn name(&self) -> &str {
        "latin"
    }
}

pub fn normalize_local(text: &str) -> String {
    LocalNormalizer.normalize(text)
}

pub fn normalize_latin(text: &str) -> String {
    LatinNormalizer.normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_strips_whitespace_and_punctuation() {
        assert_eq!(normalize_local("  고객 번호 (필수). "), "고객번호필수");
        assert_eq!(normalize_local("등록_일자-코드"), "등록일자코드");
        assert_eq!(normalize_local(" \t "), "");
    }

    #[test]
    fn latin_lowercases_and_collapses_separators() {
        assert_eq!(normalize_latin("  REG_DT "), "reg dt");
        assert_eq!(normalize_latin("Customer--Id__No"), "customer id no");
        assert_eq!(normalize_latin("reg_"), "reg");
        assert_eq!(normalize_latin("_-_"), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "", " ", "REG_DT", "a_", "_a_ b-", "고객 번호!", "Mixed 한글_ABC-def", "x\u{3000}y", "...",
            "Ünïcode_TEXT", "  tab\tsep  ",
        ];
        for sample in samples {
            let local = normalize_local(sample);
            assert_eq!(normalize_local(&local), local, "local: {sample:?}");
            let latin = normalize_latin(sample);
            assert_eq!(normalize_latin(&latin), latin, "latin: {sample:?}");
        }
    }
}
