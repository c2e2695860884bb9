//! Compound selector parsing: one scanner chunk to one [`CompoundSelector`].

use super::ParseContext;
use super::cursor::Cursor;
use crate::error::{Result, SelectorSyntaxError, SyntaxErrorKind};
use crate::expression::parse_expression_at;
use crate::scanner::Chunk;
use crate::selector::{
    AttributeOperator, AttributeSelector, CompoundSelector, PseudoClass, PseudoFunction,
    PseudoFunctionSelector, SimpleSelector, UNIVERSAL,
};

/// Parse one chunk into an element name and its simple selectors.
///
/// # Example
/// ```
/// use sift_selector::scanner::scan;
/// use sift_selector::{SimpleSelector, parse_compound};
///
/// let chunks = scan(".kl").unwrap();
/// let compound = parse_compound(&chunks[0]).unwrap();
/// assert_eq!(compound.element, "*");
/// assert_eq!(compound.simple_selectors, [SimpleSelector::Class("kl".into())]);
/// ```
///
/// # Errors
///
/// Returns a [`SelectorSyntaxError`] for characters that start no simple
/// selector, malformed attribute selectors, unknown pseudo names, and
/// malformed pseudo-function arguments.
pub fn parse_compound(chunk: &Chunk) -> Result<CompoundSelector> {
    parse_compound_at(&chunk.text, chunk.offset, &mut ParseContext::default())
}

pub(crate) fn parse_compound_at(
    text: &str,
    base: usize,
    context: &mut ParseContext,
) -> Result<CompoundSelector> {
    let mut cursor = Cursor::new(text, base);

    let element = if cursor.eat('*') {
        UNIVERSAL.to_owned()
    } else {
        let name = cursor.read_identifier()?;
        if name.is_empty() {
            UNIVERSAL.to_owned()
        } else {
            name
        }
    };

    let mut simple_selectors = Vec::new();
    while let Some(c) = cursor.peek() {
        let at = cursor.offset();
        cursor.bump();
        let selector = match c {
            '.' => SimpleSelector::Class(read_name(&mut cursor, "class")?),
            '#' => SimpleSelector::Id(read_name(&mut cursor, "id")?),
            '[' => SimpleSelector::Attribute(parse_attribute(&mut cursor, at)?),
            ':' => parse_pseudo(&mut cursor, at, context)?,
            _ => {
                return Err(SelectorSyntaxError::new(
                    SyntaxErrorKind::UnexpectedCharacter,
                    format!("unexpected '{c}'"),
                    at,
                ));
            }
        };
        simple_selectors.push(selector);
    }

    Ok(CompoundSelector::new(element, simple_selectors))
}

fn read_name(cursor: &mut Cursor, what: &str) -> Result<String> {
    let at = cursor.offset();
    let name = cursor.read_identifier()?;
    if name.is_empty() {
        return Err(SelectorSyntaxError::new(
            SyntaxErrorKind::UnexpectedCharacter,
            format!("expected {what} name"),
            at,
        ));
    }
    Ok(name)
}

fn malformed_attribute(message: impl Into<String>, at: usize) -> SelectorSyntaxError {
    SelectorSyntaxError::new(SyntaxErrorKind::MalformedAttribute, message, at)
}

/// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-3/#attribute-selectors)
///
/// Called with the cursor just past the `[` at offset `open`.
fn parse_attribute(cursor: &mut Cursor, open: usize) -> Result<AttributeSelector> {
    cursor.skip_whitespace();
    let name_at = cursor.offset();
    let name = cursor.read_identifier()?;
    if name.is_empty() {
        return Err(malformed_attribute("expected attribute name", name_at));
    }
    cursor.skip_whitespace();
    if cursor.eat(']') {
        return Ok(AttributeSelector::exists(name));
    }

    let operator_at = cursor.offset();
    let operator = match cursor.peek() {
        Some('=') => {
            cursor.bump();
            AttributeOperator::Equals
        }
        Some(c) if cursor.peek_at(1) == Some('=') => {
            let operator = format!("{c}=")
                .parse::<AttributeOperator>()
                .map_err(|_| {
                    malformed_attribute(format!("unknown attribute operator '{c}='"), operator_at)
                })?;
            cursor.bump();
            cursor.bump();
            operator
        }
        Some(c) => {
            return Err(malformed_attribute(
                format!("unexpected '{c}' in attribute selector"),
                operator_at,
            ));
        }
        None => return Err(malformed_attribute("missing ']'", open)),
    };

    cursor.skip_whitespace();
    let value_at = cursor.offset();
    let (value, quote) = match cursor.peek() {
        Some(quote @ ('\'' | '"')) => {
            cursor.bump();
            (cursor.read_quoted(quote, value_at)?, Some(quote))
        }
        _ => (cursor.read_identifier()?, None),
    };
    if value.is_empty() && quote.is_none() {
        return Err(malformed_attribute("missing attribute value", value_at));
    }

    cursor.skip_whitespace();
    if !cursor.eat(']') {
        return Err(malformed_attribute("expected ']'", cursor.offset()));
    }
    Ok(AttributeSelector::with_condition(name, operator, value, quote))
}

/// Called with the cursor just past the `:` at `colon`. A second `:` is the
/// pseudo-element spelling and is folded into the pseudo-class.
fn parse_pseudo(
    cursor: &mut Cursor,
    colon: usize,
    context: &mut ParseContext,
) -> Result<SimpleSelector> {
    let legacy = cursor.eat(':');
    let name_at = cursor.offset();
    let name = cursor.read_identifier()?;
    if name.is_empty() {
        return Err(SelectorSyntaxError::new(
            SyntaxErrorKind::UnexpectedCharacter,
            "expected pseudo-class name",
            name_at,
        ));
    }
    if legacy {
        context.notice(
            format!("'::{name}' is treated as the pseudo-class ':{name}'"),
            colon,
        );
    }

    if cursor.peek() != Some('(') {
        return match name.parse::<PseudoClass>() {
            Ok(class) => Ok(SimpleSelector::PseudoClass(class)),
            Err(_) if name.parse::<PseudoFunction>().is_ok() => Err(SelectorSyntaxError::new(
                SyntaxErrorKind::MalformedExpression,
                format!("':{name}' requires an argument"),
                name_at,
            )),
            Err(_) => Err(SelectorSyntaxError::new(
                SyntaxErrorKind::UnknownPseudoClass,
                format!("unknown pseudo-class ':{name}'"),
                name_at,
            )),
        };
    }

    let function = name.parse::<PseudoFunction>().map_err(|_| {
        if name.parse::<PseudoClass>().is_ok() {
            SelectorSyntaxError::new(
                SyntaxErrorKind::MalformedExpression,
                format!("':{name}' does not take an argument"),
                name_at,
            )
        } else {
            SelectorSyntaxError::new(
                SyntaxErrorKind::UnknownPseudoFunction,
                format!("unknown pseudo-function ':{name}()'"),
                name_at,
            )
        }
    })?;

    let open = cursor.offset();
    cursor.bump();
    let raw = read_argument(cursor, open)?;
    let expression = parse_expression_at(function, &raw, open + 1, context)?;
    Ok(SimpleSelector::PseudoFunction(PseudoFunctionSelector {
        function,
        raw,
        expression,
    }))
}

/// Text up to the `)` balancing the `(` at `open`, with the cursor left past
/// that `)`. Quoted parentheses and escaped characters do not count.
fn read_argument(cursor: &mut Cursor, open: usize) -> Result<String> {
    let start = cursor.offset();
    let mut depth = 1_usize;
    let mut quote = None;
    loop {
        let at = cursor.offset();
        let Some(c) = cursor.consume() else {
            return Err(SelectorSyntaxError::new(
                SyntaxErrorKind::Unterminated,
                "unterminated pseudo-function argument, missing ')'",
                open,
            ));
        };
        match c {
            '\\' => {
                if cursor.consume().is_none() {
                    return Err(SelectorSyntaxError::new(
                        SyntaxErrorKind::Unterminated,
                        "escape at end of input",
                        at,
                    ));
                }
            }
            _ if quote == Some(c) => quote = None,
            _ if quote.is_some() => {}
            '\'' | '"' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(cursor.slice(start, at));
                }
            }
            _ => {}
        }
    }
}
