//! Known pseudo-classes and pseudo-functions.
//!
//! Names are matched ASCII case-insensitively and rendered in lowercase
//! kebab-case. Anything outside these tables is rejected at parse time, so a
//! downstream matcher can rely on every name being one it implements.

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr, VariantArray};

/// [§ 6.6 Pseudo-classes](https://www.w3.org/TR/selectors-3/#pseudo-classes)
///
/// Argument-free pseudo-classes: the structural ones from Selectors Level 3
/// plus the form-control and matched-set position extensions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    VariantArray,
    Serialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum PseudoClass {
    /// [§ 6.6.5.6 :first-child](https://www.w3.org/TR/selectors-3/#first-child-pseudo)
    /// "Same as :nth-child(1). The :first-child pseudo-class represents an
    /// element that is the first child of some other element."
    FirstChild,
    /// [§ 6.6.5.7 :last-child](https://www.w3.org/TR/selectors-3/#last-child-pseudo)
    LastChild,
    /// [§ 6.6.5.10 :only-child](https://www.w3.org/TR/selectors-3/#only-child-pseudo)
    OnlyChild,
    /// [§ 6.6.5.8 :first-of-type](https://www.w3.org/TR/selectors-3/#first-of-type-pseudo)
    FirstOfType,
    /// [§ 6.6.5.9 :last-of-type](https://www.w3.org/TR/selectors-3/#last-of-type-pseudo)
    LastOfType,
    /// [§ 6.6.5.11 :only-of-type](https://www.w3.org/TR/selectors-3/#only-of-type-pseudo)
    OnlyOfType,
    /// [§ 6.6.5.1 :root](https://www.w3.org/TR/selectors-3/#root-pseudo)
    Root,
    /// [§ 6.6.5.12 :empty](https://www.w3.org/TR/selectors-3/#empty-pseudo)
    Empty,
    /// First element of the matched set.
    First,
    /// Last element of the matched set.
    Last,
    /// `<button>` or `<input type="button">`.
    Button,
    /// `<input type="checkbox">`.
    Checkbox,
    /// `<input type="file">`.
    File,
    /// Heading elements `h1` through `h6`.
    Header,
    /// `<input type="image">`.
    Image,
    /// Any form control: `input`, `textarea`, `select`, `button`.
    Input,
    /// Elements with at least one child node.
    Parent,
    /// `<input type="password">`.
    Password,
    /// `<input type="radio">`.
    Radio,
    /// `<input type="reset">`.
    Reset,
    /// Elements carrying the `selected` attribute.
    Selected,
    /// [§ 6.6.4.3 :checked](https://www.w3.org/TR/selectors-3/#checked)
    Checked,
    /// `<input type="submit">`.
    Submit,
    /// `<input type="text">`.
    Text,
    /// Even positions (zero-based) in the matched set.
    Even,
    /// Odd positions (zero-based) in the matched set.
    Odd,
}

impl PseudoClass {
    /// Canonical lowercase name, without the leading colon.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Which argument grammar a pseudo-function uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionGrammar {
    /// The `An+B` microsyntax, including the `odd` / `even` keywords.
    AnB,
    /// A single signed integer.
    Index,
    /// A full selector group, parsed recursively.
    Selectors,
    /// Free text, optionally quoted.
    Text,
}

/// Pseudo-classes that take a parenthesised argument.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    VariantArray,
    Serialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum PseudoFunction {
    /// [§ 6.6.5.2 :nth-child()](https://www.w3.org/TR/selectors-3/#nth-child-pseudo)
    /// "The :nth-child(an+b) pseudo-class notation represents an element that
    /// has an+b-1 siblings before it in the document tree."
    NthChild,
    /// [§ 6.6.5.3 :nth-last-child()](https://www.w3.org/TR/selectors-3/#nth-last-child-pseudo)
    NthLastChild,
    /// [§ 6.6.5.4 :nth-of-type()](https://www.w3.org/TR/selectors-3/#nth-of-type-pseudo)
    NthOfType,
    /// [§ 6.6.5.5 :nth-last-of-type()](https://www.w3.org/TR/selectors-3/#nth-last-of-type-pseudo)
    NthLastOfType,
    /// Element at the given index of the matched set; negative counts from the end.
    Eq,
    /// Elements after the given index of the matched set.
    Gt,
    /// Elements before the given index of the matched set.
    Lt,
    /// Elements whose text content contains the argument.
    ///
    /// A quote anywhere in the argument opens a string, so text containing
    /// `'` or `"` must be quoted as a whole: `:contains("it's")` parses,
    /// `:contains(it's)` is an unterminated string.
    Contains,
    /// Elements with at least one descendant matching the argument selector.
    Has,
    /// [§ 6.6.7 The negation pseudo-class](https://www.w3.org/TR/selectors-3/#negation)
    Not,
}

impl PseudoFunction {
    /// Canonical lowercase name, without the leading colon.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The grammar this function's argument is parsed with.
    #[must_use]
    pub const fn grammar(self) -> ExpressionGrammar {
        match self {
            Self::NthChild | Self::NthLastChild | Self::NthOfType | Self::NthLastOfType => {
                ExpressionGrammar::AnB
            }
            Self::Eq | Self::Gt | Self::Lt => ExpressionGrammar::Index,
            Self::Has | Self::Not => ExpressionGrammar::Selectors,
            Self::Contains => ExpressionGrammar::Text,
        }
    }
}
