//! Pseudo-function argument grammars.
//!
//! Each [`PseudoFunction`] names one [`ExpressionGrammar`]; the argument text
//! between its parentheses is parsed with that grammar into a
//! [`PseudoExpression`].

use serde::Serialize;

use crate::error::{Result, SelectorSyntaxError, SyntaxErrorKind};
use crate::parser::cursor::{Cursor, is_whitespace};
use crate::parser::{ParseContext, parse_group_at};
use crate::render::needs_quotes;
use crate::selector::{ExpressionGrammar, PseudoFunction, SelectorGroup};

/// [§ 6.6.5.2 :nth-child()](https://www.w3.org/TR/selectors-3/#nth-child-pseudo)
///
/// "The a and b values must be integers (positive, negative, or zero)."
/// The formula selects every `a`-th position starting at `b`; with `a == 0`
/// it selects position `b` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnBFormula {
    /// Step between selected positions.
    pub a: i64,
    /// Offset of the first selected position.
    pub b: i64,
}

impl AnBFormula {
    /// The `odd` keyword, `2n+1`.
    pub const ODD: Self = Self::new(2, 1);
    /// The `even` keyword, `2n`.
    pub const EVEN: Self = Self::new(2, 0);

    /// Formula `an+b`.
    #[must_use]
    pub const fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// Parse `An+B` text, e.g. `"2n+1"`, `"-n + 6"`, `"odd"`.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxErrorKind::MalformedExpression`] error for anything
    /// that is not a well-formed formula.
    pub fn parse(text: &str) -> Result<Self> {
        parse_an_plus_b(text, 0)
    }

    /// Whether the 1-based `position` equals `a*n + b` for some `n >= 0`.
    #[must_use]
    pub fn matches(self, position: i64) -> bool {
        let Some(offset) = position.checked_sub(self.b) else {
            return false;
        };
        if self.a == 0 {
            return offset == 0;
        }
        offset.checked_rem(self.a) == Some(0)
            && offset.checked_div(self.a).is_some_and(|n| n >= 0)
    }
}

/// Free-text argument of `:contains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextArgument {
    /// The text, outer quotes removed. Escapes other than an escaped quote
    /// are kept as written.
    pub text: String,
    /// The quote character the text was written with, if any. Unquoted text
    /// is rendered back verbatim.
    pub quote: Option<char>,
}

impl TextArgument {
    /// Text with whatever quoting it needs to be read back unchanged.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let quote = needs_quotes(&text).then(|| if text.contains('"') { '\'' } else { '"' });
        Self { text, quote }
    }
}

/// A parsed pseudo-function argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum PseudoExpression {
    /// `An+B` formula for the `nth-*` family.
    AnB(AnBFormula),
    /// Integer index for `eq`, `gt`, and `lt`.
    Index(i64),
    /// Nested selectors for `not` and `has`.
    Selectors(SelectorGroup),
    /// Free text for `contains`.
    Text(TextArgument),
}

impl PseudoExpression {
    /// The formula, if this is an `An+B` argument.
    #[must_use]
    pub const fn as_an_b(&self) -> Option<AnBFormula> {
        match self {
            Self::AnB(formula) => Some(*formula),
            _ => None,
        }
    }

    /// The nested selectors, if this is a selector argument.
    #[must_use]
    pub const fn as_selectors(&self) -> Option<&SelectorGroup> {
        match self {
            Self::Selectors(group) => Some(group),
            _ => None,
        }
    }

    /// The text, if this is a free-text argument.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(argument) => Some(&argument.text),
            _ => None,
        }
    }
}

/// Parse the argument of `function` with default limits.
///
/// # Errors
///
/// Returns a [`SelectorSyntaxError`] when `raw` does not fit the function's
/// grammar, or when a nested selector argument fails to parse.
pub fn parse_expression(function: PseudoFunction, raw: &str) -> Result<PseudoExpression> {
    parse_expression_at(function, raw, 0, &mut ParseContext::default())
}

/// Parse an argument that starts at character `base` of the outermost input.
pub(crate) fn parse_expression_at(
    function: PseudoFunction,
    raw: &str,
    base: usize,
    context: &mut ParseContext,
) -> Result<PseudoExpression> {
    match function.grammar() {
        ExpressionGrammar::AnB => parse_an_plus_b(raw, base).map(PseudoExpression::AnB),
        ExpressionGrammar::Index => parse_index(raw, base).map(PseudoExpression::Index),
        ExpressionGrammar::Selectors => {
            context.descend(base)?;
            let group = parse_selector_argument(raw, base, context);
            context.ascend();
            group.map(PseudoExpression::Selectors)
        }
        ExpressionGrammar::Text => {
            let argument = strip_quotes(raw, base)?.map_or_else(
                || TextArgument {
                    text: raw.to_owned(),
                    quote: None,
                },
                |(text, quote, _)| TextArgument {
                    text,
                    quote: Some(quote),
                },
            );
            Ok(PseudoExpression::Text(argument))
        }
    }
}

fn malformed(message: impl Into<String>, position: usize) -> SelectorSyntaxError {
    SelectorSyntaxError::new(SyntaxErrorKind::MalformedExpression, message, position)
}

/// `[sign] [digits] ['n' [sign digits]]`, whitespace allowed between tokens.
fn parse_an_plus_b(raw: &str, base: usize) -> Result<AnBFormula> {
    let keyword = raw.trim_matches(is_whitespace);
    if keyword.eq_ignore_ascii_case("odd") {
        return Ok(AnBFormula::ODD);
    }
    if keyword.eq_ignore_ascii_case("even") {
        return Ok(AnBFormula::EVEN);
    }
    if keyword.is_empty() {
        return Err(malformed("empty An+B expression", base));
    }

    let mut cursor = Cursor::new(raw, base);
    cursor.skip_whitespace();
    let start = cursor.offset();
    let sign = read_sign(&mut cursor);
    cursor.skip_whitespace();
    let coefficient = read_integer(&mut cursor)?;
    cursor.skip_whitespace();

    let formula = if matches!(cursor.peek(), Some('n' | 'N')) {
        cursor.bump();
        let a = sign.unwrap_or(1) * coefficient.unwrap_or(1);
        cursor.skip_whitespace();
        let b = if cursor.is_eof() {
            0
        } else {
            let at = cursor.offset();
            let sign = read_sign(&mut cursor)
                .ok_or_else(|| malformed("expected '+' or '-' after 'n'", at))?;
            cursor.skip_whitespace();
            let at = cursor.offset();
            let offset = read_integer(&mut cursor)?
                .ok_or_else(|| malformed("expected an integer after the sign", at))?;
            sign * offset
        };
        AnBFormula::new(a, b)
    } else {
        let offset = coefficient.ok_or_else(|| {
            malformed(format!("invalid An+B expression '{keyword}'"), start)
        })?;
        AnBFormula::new(0, sign.unwrap_or(1) * offset)
    };

    cursor.skip_whitespace();
    if let Some(c) = cursor.peek() {
        return Err(malformed(
            format!("unexpected '{c}' in An+B expression"),
            cursor.offset(),
        ));
    }
    Ok(formula)
}

fn read_sign(cursor: &mut Cursor) -> Option<i64> {
    if cursor.eat('+') {
        Some(1)
    } else if cursor.eat('-') {
        Some(-1)
    } else {
        None
    }
}

/// A run of ASCII digits, or `None` when the cursor is not on a digit.
fn read_integer(cursor: &mut Cursor) -> Result<Option<i64>> {
    let start = cursor.offset();
    let mut digits = String::new();
    while let Some(c) = cursor.peek().filter(char::is_ascii_digit) {
        digits.push(c);
        cursor.bump();
    }
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| malformed(format!("integer '{digits}' is out of range"), start))
}

fn parse_index(raw: &str, base: usize) -> Result<i64> {
    let text = raw.trim_matches(is_whitespace);
    text.parse()
        .map_err(|_| malformed(format!("expected an integer index, found '{text}'"), base))
}

/// A selector group, optionally written as a quoted string.
fn parse_selector_argument(
    raw: &str,
    base: usize,
    context: &mut ParseContext,
) -> Result<SelectorGroup> {
    let (text, offset) = strip_quotes(raw, base)?
        .map_or_else(|| (raw.to_owned(), base), |(text, _, offset)| (text, offset));
    if text.trim_matches(is_whitespace).is_empty() {
        return Err(malformed("empty selector argument", base));
    }
    parse_group_at(&text, offset, context)
}

/// If `raw` (ignoring surrounding whitespace) is a single quoted string,
/// return its unquoted content with the quote character, and the offset of
/// the first content character.
fn strip_quotes(raw: &str, base: usize) -> Result<Option<(String, char, usize)>> {
    let leading = raw.chars().take_while(|&c| is_whitespace(c)).count();
    let mut cursor = Cursor::new(raw.trim_matches(is_whitespace), base + leading);
    let Some(quote @ ('\'' | '"')) = cursor.peek() else {
        return Ok(None);
    };
    let open = cursor.offset();
    cursor.bump();
    let text = cursor.read_quoted(quote, open)?;
    if let Some(c) = cursor.peek() {
        return Err(malformed(
            format!("unexpected '{c}' after closing quote"),
            cursor.offset(),
        ));
    }
    Ok(Some((text, quote, open + 1)))
}
