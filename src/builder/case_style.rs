use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Identifier rendering convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseStyle {
    #[default]
    SnakeUpper,
    SnakeLower,
    Camel,
    Pascal,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 4] = [
        CaseStyle::SnakeUpper,
        CaseStyle::SnakeLower,
        CaseStyle::Camel,
        CaseStyle::Pascal,
    ];

    /// Parse a persisted tag; unknown tags yield `SnakeUpper`.
    pub fn parse(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == tag.trim())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStyle::SnakeUpper => "SNAKE_UPPER",
            CaseStyle::SnakeLower => "SNAKE_LOWER",
            CaseStyle::Camel => "CAMEL",
            CaseStyle::Pascal => "PASCAL",
        }
    }

    /// Render a canonical `a_b_c` base in this style.
    pub fn render(&self, snake: &str) -> String {
        match self {
            CaseStyle::SnakeUpper => snake.to_uppercase(),
            CaseStyle::SnakeLower => snake.to_lowercase(),
            CaseStyle::Camel => join_capitalized(snake, false),
            CaseStyle::Pascal => join_capitalized(snake, true),
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join_capitalized(snake: &str, capitalize_first: bool) -> String {
    snake.split('_')
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(i, part)| {
            let lower = part.to_lowercase();
            if i == 0 && !capitalize_first {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut graphemes = text.graphemes(true);
    match graphemes.next() {
        Some(first) => first.to_uppercase() + graphemes.as_str(),
        None => String::new(),
    }
}
