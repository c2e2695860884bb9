//! Canonical selector text.
//!
//! Rendering is the inverse of parsing up to trivia: whitespace is
//! normalized, the element name is always written, identifiers are
//! re-escaped, and `An+B` formulas take their shortest form. Re-parsing the
//! output yields a structurally equal model.

use std::fmt::{self, Display, Formatter, Write};

use crate::expression::{AnBFormula, PseudoExpression};
use crate::parser::cursor::is_ident_char;
use crate::selector::{
    AttributeSelector, Combinator, CompoundSelector, SelectorGroup, SelectorList, SimpleSelector,
};

/// Canonical text of a selector.
#[must_use]
pub fn render(list: &SelectorList) -> String {
    list.to_string()
}

/// Canonical text of a selector group, members joined by `", "`.
#[must_use]
pub fn render_group(group: &SelectorGroup) -> String {
    group.to_string()
}

/// Write `ident` with every non-identifier character backslash-escaped.
fn write_identifier(f: &mut Formatter<'_>, ident: &str) -> fmt::Result {
    for c in ident.chars() {
        if !is_ident_char(c) {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    Ok(())
}

/// Write `text` between `quote` characters, escaping embedded quotes.
fn write_quoted(f: &mut Formatter<'_>, text: &str, quote: char) -> fmt::Result {
    f.write_char(quote)?;
    for c in text.chars() {
        if c == quote {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char(quote)
}

impl Display for AttributeSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        write_identifier(f, &self.name)?;
        if let Some(condition) = &self.condition {
            f.write_str(condition.operator.sign())?;
            match condition.quote {
                Some(quote) => write_quoted(f, &condition.value, quote)?,
                None => write_identifier(f, &condition.value)?,
            }
        }
        f.write_char(']')
    }
}

impl Display for SimpleSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => {
                f.write_char('.')?;
                write_identifier(f, name)
            }
            Self::Id(name) => {
                f.write_char('#')?;
                write_identifier(f, name)
            }
            Self::Attribute(attribute) => attribute.fmt(f),
            Self::PseudoClass(class) => write!(f, ":{}", class.name()),
            Self::PseudoFunction(function) => {
                write!(f, ":{}({})", function.function.name(), function.expression)
            }
        }
    }
}

impl Display for CompoundSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_universal() {
            f.write_str(&self.element)?;
        } else {
            write_identifier(f, &self.element)?;
        }
        for simple in &self.simple_selectors {
            simple.fmt(f)?;
        }
        Ok(())
    }
}

impl Display for SelectorList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for compound in self {
            compound.fmt(f)?;
            if compound.next().is_none() {
                continue;
            }
            match compound.combinator.unwrap_or(Combinator::Descendant) {
                Combinator::Descendant => f.write_char(' ')?,
                combinator => write!(f, " {} ", combinator.sign())?,
            }
        }
        Ok(())
    }
}

impl Display for SelectorGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, list) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            list.fmt(f)?;
        }
        Ok(())
    }
}

impl Display for AnBFormula {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.a {
            0 => return write!(f, "{}", self.b),
            1 => f.write_char('n')?,
            -1 => f.write_str("-n")?,
            a => write!(f, "{a}n")?,
        }
        match self.b {
            0 => Ok(()),
            b if b > 0 => write!(f, "+{b}"),
            b => write!(f, "{b}"),
        }
    }
}

/// Whether unquoted `text` would not read back unchanged as a `:contains`
/// argument.
pub(crate) fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.contains(['(', ')', '[', ']', '\'', '"', '\\'])
}

impl Display for PseudoExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnB(formula) => formula.fmt(f),
            Self::Index(index) => write!(f, "{index}"),
            Self::Selectors(group) => group.fmt(f),
            Self::Text(argument) => match argument.quote {
                Some(quote) => write_quoted(f, &argument.text, quote),
                None => f.write_str(&argument.text),
            },
        }
    }
}
