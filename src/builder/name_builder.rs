use std::sync::LazyLock;
use regex::Regex;
use crate::builder::case_style::CaseStyle;
use crate::core::types::Word;

static LABEL_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s_\-]+").expect("valid label separator pattern")
});

/// Ordered selection of words rendered into one identifier.
///
/// The token list and the case style are independent; building a name reads
/// both and changes neither.
#[derive(Debug, Clone, Default)]
pub struct NameBuilder {
    tokens: Vec<Word>,
    case_style: CaseStyle,
}

impl NameBuilder {
    pub fn new(case_style: CaseStyle) -> Self {
        NameBuilder { tokens: Vec::new(), case_style }
    }

    pub fn case_style(&self) -> CaseStyle {
        self.case_style
    }

    pub fn set_case_style(&mut self, style: CaseStyle) {
        self.case_style = style;
    }

    pub fn tokens(&self) -> &[Word] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn add(&mut self, word: Word) {
        self.tokens.push(word);
    }

    /// Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.tokens.len() {
            self.tokens.remove(index);
        }
    }

    /// Relocate a token. Out-of-range indexes and `from == to` are ignored.
    pub fn move_token(&mut self, from: usize, to: usize) {
        let len = self.tokens.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let word = self.tokens.remove(from);
        self.tokens.insert(to, word);
    }

    /// Drop every token; the case style is kept.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Snake-case base shared by every style: each token's label split on
    /// separator runs, all parts joined with `_`.
    pub fn snake_base(&self) -> String {
        self.tokens.iter()
            .map(render_label)
            .flat_map(|label| {
                LABEL_SEPARATORS.split(&label)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn build_name(&self) -> String {
        if self.tokens.is_empty() {
            return String::new();
        }
        self.case_style.render(&self.snake_base())
    }

    /// Local names of the tokens, space separated; used as the column comment.
    pub fn comment(&self) -> String {
        self.tokens.iter()
            .map(|word| word.ko_name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Abbreviation, else Latin name, else local name.
fn render_label(word: &Word) -> String {
    [word.abbr.as_deref(), word.en_name.as_deref()]
        .into_iter()
        .flatten()
        .find(|label| !label.trim().is_empty())
        .unwrap_or(&word.ko_name)
        .trim()
        .to_string()
}
