use crate::error::{SelectorSyntaxError, SyntaxErrorKind};

/// Scanner states. Every state but `Normal` is pushed on a stack together
/// with the offset of the character that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Top level: whitespace, combinators, and commas are delimiters.
    Normal,
    /// Inside `[...]`.
    InBrackets,
    /// Inside `(...)`, possibly nested.
    InParens,
    /// Inside `'...'`.
    InSingleQuote,
    /// Inside `"..."`.
    InDoubleQuote,
}

impl ScanState {
    /// The quote state a quote character opens.
    #[must_use]
    pub const fn for_quote(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::InSingleQuote),
            '"' => Some(Self::InDoubleQuote),
            _ => None,
        }
    }

    /// The character that returns to the enclosing state.
    #[must_use]
    pub const fn closer(self) -> Option<char> {
        match self {
            Self::Normal => None,
            Self::InBrackets => Some(']'),
            Self::InParens => Some(')'),
            Self::InSingleQuote => Some('\''),
            Self::InDoubleQuote => Some('"'),
        }
    }

    /// Error for input that ends while this state, opened at `opened_at`, is
    /// still active.
    #[must_use]
    pub fn unterminated(self, opened_at: usize) -> SelectorSyntaxError {
        let what = match self {
            Self::Normal => "selector",
            Self::InBrackets => "attribute selector, missing ']'",
            Self::InParens => "pseudo-function argument, missing ')'",
            Self::InSingleQuote => "string, missing closing '",
            Self::InDoubleQuote => "string, missing closing \"",
        };
        SelectorSyntaxError::new(
            SyntaxErrorKind::Unterminated,
            format!("unterminated {what}"),
            opened_at,
        )
    }
}
