//! CSS selector compiler for the sift toolkit.
//!
//! Turns selector text such as `div.k1.k2 > b#xo:not(:checked)` into a linked
//! list of compound selectors that a DOM matcher can walk, and renders that
//! model back to canonical text.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner** ([§ 4 Selector syntax](https://www.w3.org/TR/selectors-3/#selector-syntax))
//!   - Splits selectors into compound chunks and combinators
//!   - Escape, quote, bracket, and parenthesis aware
//!   - Comma-separated selector groups
//!
//! - **Compound Parser**
//!   - Type and universal selectors, class and ID selectors
//!   - Attribute selectors with `=`, `~=`, `|=`, `^=`, `$=`, `*=`, `!=`
//!   - Pseudo-classes and pseudo-functions from a closed table
//!
//! - **Pseudo-Function Arguments**
//!   - `An+B` ([§ 6.6.5.2](https://www.w3.org/TR/selectors-3/#nth-child-pseudo))
//!   - Integer indices, free text, and nested selector groups
//!
//! - **Selector Model** with canonical rendering and a parse cache
//!
//! # Not Implemented
//!
//! - Matching against a document tree
//! - Specificity
//! - Namespace prefixes (`ns|div`)
//!
//! # Example
//! ```
//! use sift_selector::{Combinator, SimpleSelector, parse_selector, render};
//!
//! let list = parse_selector("div b.x").unwrap();
//! assert_eq!(list[0].combinator, Some(Combinator::Descendant));
//! assert_eq!(list[1].simple_selectors, [SimpleSelector::Class("x".into())]);
//! assert_eq!(render(&list), "div b.x");
//! ```

/// Parsed-selector cache shared between threads.
pub mod cache;
/// Parser limits.
pub mod config;
/// The single error type of the compiler.
pub mod error;
/// Pseudo-function argument grammars, including `An+B`.
pub mod expression;
/// Chunk parsing and selector assembly.
pub mod parser;
/// Canonical text output.
pub mod render;
/// Escape- and quote-aware splitting of selector text.
pub mod scanner;
/// The linked selector model.
pub mod selector;

// Re-exports for convenience
pub use cache::SelectorCache;
pub use config::{DEFAULT_MAX_NESTING_DEPTH, ParserConfig};
pub use error::{Result, SelectorSyntaxError, SyntaxErrorKind};
pub use expression::{AnBFormula, PseudoExpression, TextArgument, parse_expression};
pub use parser::{
    ParseNotice, SelectorParser, parse_compound, parse_selector, parse_selector_group,
};
pub use render::{render, render_group};
pub use scanner::{Chunk, scan, scan_group};
pub use selector::{
    AttributeCondition, AttributeOperator, AttributeSelector, Combinator, CompoundSelector,
    ExpressionGrammar, PseudoClass, PseudoFunction, PseudoFunctionSelector, SelectorGroup,
    SelectorId, SelectorList, SimpleSelector, UNIVERSAL,
};
