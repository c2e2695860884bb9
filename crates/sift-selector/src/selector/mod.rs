//! The parsed selector model.
//!
//! A selector such as `div.nav > a[href^='http']:not(.local)` becomes a
//! [`SelectorList`]: an arena of [`CompoundSelector`]s, one per
//! combinator-delimited chunk, linked to each other through [`SelectorId`]
//! indices. Comma-separated selectors form a [`SelectorGroup`].
//!
//! The model is produced once by the parser and never mutated afterwards.

use std::ops::Index;
use std::slice;

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr, VariantArray};

use crate::expression::PseudoExpression;

/// Pseudo-class and pseudo-function name tables.
pub mod pseudo;

pub use pseudo::{ExpressionGrammar, PseudoClass, PseudoFunction};

/// The element name of a compound selector that names no element.
pub const UNIVERSAL: &str = "*";

/// [§ 8 Combinators](https://www.w3.org/TR/selectors-3/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Combinator {
    /// [§ 8.1 Descendant combinator](https://www.w3.org/TR/selectors-3/#descendant-combinators)
    /// "A descendant combinator is whitespace that separates two sequences
    /// of simple selectors."
    Descendant,

    /// [§ 8.2 Child combinators](https://www.w3.org/TR/selectors-3/#child-combinators)
    /// "A child combinator describes a childhood relationship between two
    /// elements. A child combinator is made of the 'greater-than sign' (>)."
    Child,

    /// [§ 8.3.1 Adjacent sibling combinator](https://www.w3.org/TR/selectors-3/#adjacent-sibling-combinators)
    /// "The elements represented by the two sequences share the same parent
    /// in the document tree and the element represented by the first
    /// sequence immediately precedes the element represented by the second
    /// one." Written as `+`.
    AdjacentSibling,

    /// [§ 8.3.2 General sibling combinator](https://www.w3.org/TR/selectors-3/#general-sibling-combinators)
    /// Written as `~`: the first element precedes the second, not
    /// necessarily immediately.
    GeneralSibling,
}

impl Combinator {
    /// The character this combinator is written with.
    #[must_use]
    pub const fn sign(self) -> char {
        match self {
            Self::Descendant => ' ',
            Self::Child => '>',
            Self::AdjacentSibling => '+',
            Self::GeneralSibling => '~',
        }
    }

    /// The explicit combinator written with `c`, if any.
    ///
    /// Whitespace is not mapped to [`Combinator::Descendant`] here: whether
    /// it acts as a combinator depends on what surrounds it.
    #[must_use]
    pub const fn from_sign(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Child),
            '+' => Some(Self::AdjacentSibling),
            '~' => Some(Self::GeneralSibling),
            _ => None,
        }
    }
}

/// Index of a [`CompoundSelector`] inside its [`SelectorList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SelectorId(pub usize);

/// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-3/#attribute-selectors)
///
/// The comparison an attribute selector applies to the attribute value.
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
pub enum AttributeOperator {
    /// `[att=val]`: the value is exactly `val`.
    #[strum(serialize = "=")]
    #[serde(rename = "=")]
    Equals,
    /// `[att~=val]`: one of the whitespace-separated words is `val`.
    #[strum(serialize = "~=")]
    #[serde(rename = "~=")]
    Includes,
    /// `[att|=val]`: the value is `val` or starts with `val-`.
    #[strum(serialize = "|=")]
    #[serde(rename = "|=")]
    DashMatch,
    /// `[att^=val]`: the value starts with `val`.
    #[strum(serialize = "^=")]
    #[serde(rename = "^=")]
    Prefix,
    /// `[att$=val]`: the value ends with `val`.
    #[strum(serialize = "$=")]
    #[serde(rename = "$=")]
    Suffix,
    /// `[att*=val]`: the value contains `val`.
    #[strum(serialize = "*=")]
    #[serde(rename = "*=")]
    Substring,
    /// `[att!=val]`: the attribute is missing or its value is not `val`.
    #[strum(serialize = "!=")]
    #[serde(rename = "!=")]
    NotEquals,
}

impl AttributeOperator {
    /// The operator as written, e.g. `"~="`.
    #[must_use]
    pub fn sign(self) -> &'static str {
        self.into()
    }
}

/// The `op value` half of an attribute selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeCondition {
    /// How the value is compared.
    pub operator: AttributeOperator,
    /// The value, unquoted.
    pub value: String,
    /// The quote character the value was written with, if any. Kept so the
    /// selector renders back the way it was written.
    pub quote: Option<char>,
}

/// `[name]` or `[name op value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSelector {
    /// Attribute name, unescaped.
    pub name: String,
    /// `None` for a bare presence test.
    pub condition: Option<AttributeCondition>,
}

impl AttributeSelector {
    /// `[name]`: the attribute is present.
    #[must_use]
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
        }
    }

    /// `[name op value]`.
    #[must_use]
    pub fn with_condition(
        name: impl Into<String>,
        operator: AttributeOperator,
        value: impl Into<String>,
        quote: Option<char>,
    ) -> Self {
        Self {
            name: name.into(),
            condition: Some(AttributeCondition {
                operator,
                value: value.into(),
                quote,
            }),
        }
    }

    /// The comparison operator, if this is not a presence test.
    #[must_use]
    pub fn operator(&self) -> Option<AttributeOperator> {
        self.condition.as_ref().map(|c| c.operator)
    }

    /// The compared value, if this is not a presence test.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.condition.as_ref().map(|c| c.value.as_str())
    }
}

/// `:name(argument)`.
#[derive(Debug, Clone, Serialize)]
pub struct PseudoFunctionSelector {
    /// Which function.
    pub function: PseudoFunction,
    /// Argument text exactly as written between the parentheses.
    pub raw: String,
    /// The argument parsed with the function's grammar.
    pub expression: PseudoExpression,
}

// `raw` is source trivia: `:nth-child( 2n + 1 )` and `:nth-child(2n+1)` are
// the same selector.
impl PartialEq for PseudoFunctionSelector {
    fn eq(&self, other: &Self) -> bool {
        self.function == other.function && self.expression == other.expression
    }
}

impl Eq for PseudoFunctionSelector {}

/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-3/#selector-syntax)
///
/// One condition within a compound selector. The element name is not a
/// simple selector here; it lives on [`CompoundSelector::element`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum SimpleSelector {
    /// [§ 6.4 Class selectors](https://www.w3.org/TR/selectors-3/#class-html)
    ///
    /// Examples: `.highlight`, `.nav-item`
    Class(String),

    /// [§ 6.5 ID selectors](https://www.w3.org/TR/selectors-3/#id-selectors)
    ///
    /// Examples: `#main`, `#foo\:bar` (stored as `foo:bar`)
    Id(String),

    /// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-3/#attribute-selectors)
    ///
    /// Examples: `[href]`, `[type=text]`, `[lang|="en"]`
    Attribute(AttributeSelector),

    /// Argument-free pseudo-class. Examples: `:first-child`, `:checked`
    PseudoClass(PseudoClass),

    /// Pseudo-class with an argument. Examples: `:nth-child(2n+1)`, `:not(.x)`
    PseudoFunction(PseudoFunctionSelector),
}

/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-3/#selector-syntax)
///
/// "A sequence of simple selectors is a chain of simple selectors that are
/// not separated by a combinator. It always begins with a type selector or
/// a universal selector."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundSelector {
    /// Element name, unescaped; [`UNIVERSAL`] when none was written.
    pub element: String,
    /// Relation between this compound and the next one in the list. `None`
    /// only on the last compound.
    pub combinator: Option<Combinator>,
    /// Conditions in source order.
    pub simple_selectors: Vec<SimpleSelector>,
    prev: Option<SelectorId>,
    next: Option<SelectorId>,
}

impl CompoundSelector {
    pub(crate) const fn new(element: String, simple_selectors: Vec<SimpleSelector>) -> Self {
        Self {
            element,
            combinator: None,
            simple_selectors,
            prev: None,
            next: None,
        }
    }

    /// Whether the element name is `*`.
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.element == UNIVERSAL
    }

    /// The compound before this one, if any.
    #[must_use]
    pub const fn prev(&self) -> Option<SelectorId> {
        self.prev
    }

    /// The compound after this one, if any.
    #[must_use]
    pub const fn next(&self) -> Option<SelectorId> {
        self.next
    }
}

/// [§ 5 Groups of selectors](https://www.w3.org/TR/selectors-3/#grouping)
/// describes comma lists; this is a single member of one.
///
/// An arena of compound selectors in source order. `prev` / `next` on each
/// compound are indices into this list, giving O(1) traversal both ways
/// without reference cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectorList {
    compounds: Vec<CompoundSelector>,
}

impl SelectorList {
    /// Take ownership of parsed compounds and link them together.
    pub(crate) fn from_compounds(mut compounds: Vec<CompoundSelector>) -> Self {
        let len = compounds.len();
        for (index, compound) in compounds.iter_mut().enumerate() {
            compound.prev = index.checked_sub(1).map(SelectorId);
            compound.next = (index + 1 < len).then_some(SelectorId(index + 1));
        }
        Self { compounds }
    }

    /// Number of compound selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    /// Whether the list has no compound selectors. Lists produced by the
    /// parser never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    /// Compound selector by id.
    #[must_use]
    pub fn get(&self, id: SelectorId) -> Option<&CompoundSelector> {
        self.compounds.get(id.0)
    }

    /// The leftmost compound selector.
    #[must_use]
    pub fn first(&self) -> Option<&CompoundSelector> {
        self.compounds.first()
    }

    /// The rightmost compound selector, the one matched elements must satisfy.
    #[must_use]
    pub fn last(&self) -> Option<&CompoundSelector> {
        self.compounds.last()
    }

    /// The compound before `id`.
    #[must_use]
    pub fn prev(&self, id: SelectorId) -> Option<&CompoundSelector> {
        self.get(id)?.prev.and_then(|prev| self.get(prev))
    }

    /// The compound after `id`.
    #[must_use]
    pub fn next(&self, id: SelectorId) -> Option<&CompoundSelector> {
        self.get(id)?.next.and_then(|next| self.get(next))
    }

    /// Ids of all compounds, left to right.
    pub fn ids(&self) -> impl Iterator<Item = SelectorId> + use<> {
        (0..self.compounds.len()).map(SelectorId)
    }

    /// Iterate compounds left to right.
    pub fn iter(&self) -> slice::Iter<'_, CompoundSelector> {
        self.compounds.iter()
    }

    /// All compounds as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CompoundSelector] {
        &self.compounds
    }
}

impl Index<usize> for SelectorList {
    type Output = CompoundSelector;

    fn index(&self, index: usize) -> &Self::Output {
        &self.compounds[index]
    }
}

impl Index<SelectorId> for SelectorList {
    type Output = CompoundSelector;

    fn index(&self, id: SelectorId) -> &Self::Output {
        &self.compounds[id.0]
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a CompoundSelector;
    type IntoIter = slice::Iter<'a, CompoundSelector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// [§ 5 Groups of selectors](https://www.w3.org/TR/selectors-3/#grouping)
///
/// "A comma-separated list of selectors represents the union of all
/// elements selected by each of the individual selectors in the list."
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectorGroup {
    lists: Vec<SelectorList>,
}

impl SelectorGroup {
    pub(crate) const fn new(lists: Vec<SelectorList>) -> Self {
        Self { lists }
    }

    /// Number of comma-separated selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether the group is empty. Groups produced by the parser never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// The first selector of the group.
    #[must_use]
    pub fn first(&self) -> Option<&SelectorList> {
        self.lists.first()
    }

    /// Iterate the selectors of the group.
    pub fn iter(&self) -> slice::Iter<'_, SelectorList> {
        self.lists.iter()
    }

    /// All selectors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[SelectorList] {
        &self.lists
    }

    /// Unwrap into the individual selectors.
    #[must_use]
    pub fn into_lists(self) -> Vec<SelectorList> {
        self.lists
    }
}

impl Index<usize> for SelectorGroup {
    type Output = SelectorList;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lists[index]
    }
}

impl<'a> IntoIterator for &'a SelectorGroup {
    type Item = &'a SelectorList;
    type IntoIter = slice::Iter<'a, SelectorList>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
