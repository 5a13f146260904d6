//! # Parser Combinators
//!
//! This module implements the core parser combinators that form the building
//! blocks of the library. These combinators allow for the composition of
//! simple parsers into more complex ones.
//!
//! ## Combinator Types
//!
//! * **Basic Combinators**: Leaf parsers like `Equal`, `Satisfy`, `Identity`, `Zero`, `Eof`
//! * **Sequential Combinators**: Parsers that operate in sequence like `Tuple2`..`Tuple7`, `Preceded`, `Terminated`, `Delimited`
//! * **Alternative Combinators**: Parsers that provide choices like `Choice`, `Optional`
//! * **Repetition Combinators**: Parsers that handle repetition like `Many`, `Many1`, `SeparatedList`
//! * **Transformation Combinators**: Parsers that transform outputs like `Map`, `AsUnit`, `AsValue`
//! * **Recursion Combinators**: Parsers that defer to a later definition like `Forward`, `Lazy`

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use crate::core::{BoxedParser, InputLen, ParseError, ParseResult, Parser};

/// Equal: Matches a specific element in the input
///
/// This parser succeeds if the current input element equals the specified
/// value. It consumes one element from the input on success; otherwise it
/// fails at the current position, naming the expected value.
#[derive(Clone)]
pub struct Equal<T> {
    /// The value to match against
    value: T,
}

impl<T> Equal<T> {
    /// Creates a new Equal parser
    ///
    /// # Arguments
    ///
    /// * `value` - The value to match
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + PartialEq + fmt::Display> Parser<[T], T> for Equal<T> {
    fn parse(&self, input: &[T], pos: usize) -> ParseResult<T> {
        match input.get(pos) {
            Some(found) if *found == self.value => Ok((pos + 1, found.clone())),
            _ => Err(ParseError::new(pos, self.value.to_string())),
        }
    }
}

/// Satisfy: Matches a single element through a predicate projection
///
/// The closure receives the current element and returns `Some(output)` to
/// accept it (consuming one element) or `None` to reject it. The `expected`
/// label is what failures report.
#[derive(Clone)]
pub struct Satisfy<F> {
    expected: String,
    f: F,
}

impl<F> Satisfy<F> {
    pub fn new(expected: impl Into<String>, f: F) -> Self {
        Self {
            expected: expected.into(),
            f,
        }
    }
}

impl<T, O, F> Parser<[T], O> for Satisfy<F>
where
    F: Fn(&T) -> Option<O>,
{
    fn parse(&self, input: &[T], pos: usize) -> ParseResult<O> {
        input
            .get(pos)
            .and_then(|x| (self.f)(x).map(|result| (pos + 1, result)))
            .ok_or_else(|| ParseError::new(pos, self.expected.clone()))
    }
}

/// Identity: Consumes and returns the current input element
///
/// This parser simply consumes one element from the input and returns it.
/// It's a basic building block for more complex parsers.
#[derive(Clone, Default)]
pub struct Identity;

impl Identity {
    pub fn new() -> Self {
        Self
    }
}

impl<T: Clone> Parser<[T], T> for Identity {
    fn parse(&self, input: &[T], pos: usize) -> ParseResult<T> {
        input
            .get(pos)
            .map(|x| (pos + 1, x.clone()))
            .ok_or_else(|| ParseError::new(pos, "any element"))
    }
}

// Zero: 常に固定値を返すパーサー（入力を消費しない）
#[derive(Clone)]
pub struct Zero<O> {
    value: O,
}

impl<O> Zero<O> {
    pub fn new(value: O) -> Self {
        Self { value }
    }
}

impl<I: ?Sized, O: Clone> Parser<I, O> for Zero<O> {
    fn parse(&self, _input: &I, pos: usize) -> ParseResult<O> {
        Ok((pos, self.value.clone()))
    }
}

/// Eof: Succeeds only at the end of the input
///
/// Succeeds without consuming anything when the position is at or past the
/// end of the input; otherwise fails at the current position expecting
/// `"eof"`. Works over both text and element slices.
#[derive(Clone, Default)]
pub struct Eof;

impl Eof {
    pub fn new() -> Self {
        Self
    }
}

impl<I: ?Sized + InputLen> Parser<I, ()> for Eof {
    fn parse(&self, input: &I, pos: usize) -> ParseResult<()> {
        if pos >= input.input_len() {
            Ok((pos, ()))
        } else {
            Err(ParseError::new(pos, "eof"))
        }
    }
}

/// Map: Transforms the output of a parser using a function
///
/// This parser applies a transformation function to the result of another
/// parser. Failures pass through completely unchanged; only the success
/// value is transformed, never the position. The function must be total
/// over every value the inner parser can produce; a panicking function is
/// a broken grammar, not a parse failure.
#[derive(Clone)]
pub struct Map<P, F, A> {
    /// The parser whose output will be transformed
    parser: P,
    /// The transformation function
    f: F,
    _phantom: PhantomData<fn(A)>,
}

impl<P, F, A> Map<P, F, A> {
    /// Creates a new Map parser
    ///
    /// # Arguments
    ///
    /// * `parser` - The parser whose output will be transformed
    /// * `f` - The transformation function to apply to the parser's output
    pub fn new(parser: P, f: F) -> Self {
        Self {
            parser,
            f,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, A, B, P, F> Parser<I, B> for Map<P, F, A>
where
    P: Parser<I, A>,
    F: Fn(A) -> B,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<B> {
        self.parser
            .parse(input, pos)
            .map(|(pos, value)| (pos, (self.f)(value)))
    }
}

#[derive(Clone)]
pub struct AsUnit<P, O> {
    parser: P,
    _phantom: PhantomData<fn(O)>,
}

impl<P, O> AsUnit<P, O> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, O, P> Parser<I, ()> for AsUnit<P, O>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<()> {
        self.parser.parse(input, pos).map(|(pos, _)| (pos, ()))
    }
}

/// AsValue: Replaces the output of a parser with a fixed value
///
/// Commonly used to turn matched literal text into an operator or keyword
/// constant.
#[derive(Clone)]
pub struct AsValue<P, O, V> {
    parser: P,
    value: V,
    _phantom: PhantomData<fn(O)>,
}

impl<P, O, V> AsValue<P, O, V> {
    pub fn new(parser: P, value: V) -> Self {
        Self {
            parser,
            value,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, O, V, P> Parser<I, V> for AsValue<P, O, V>
where
    P: Parser<I, O>,
    V: Clone,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<V> {
        self.parser
            .parse(input, pos)
            .map(|(pos, _)| (pos, self.value.clone()))
    }
}

/// Choice: Tries multiple parsers and succeeds with the first successful one
///
/// This parser tries each of its child parsers in order, every attempt at
/// the same start position, and commits to the first one that succeeds --
/// later alternatives are never consulted, no matter how little the winner
/// consumed. If all parsers fail, the failure of the last alternative is
/// returned. Grammar authors are responsible for ordering alternatives so
/// that a prefix of a later alternative cannot be claimed by an earlier one.
pub struct Choice<I: ?Sized, O> {
    /// The list of parsers to try
    parsers: Vec<BoxedParser<I, O>>,
}

impl<I: ?Sized, O> Choice<I, O> {
    /// Creates a new Choice parser
    ///
    /// # Arguments
    ///
    /// * `parsers` - A vector of boxed parsers to try in order
    ///
    /// # Panics
    ///
    /// Panics if `parsers` is empty; an alternative-free choice is a broken
    /// grammar.
    pub fn new(parsers: Vec<BoxedParser<I, O>>) -> Self {
        assert!(!parsers.is_empty(), "choice requires at least one alternative");
        Self { parsers }
    }
}

impl<I: ?Sized, O> Parser<I, O> for Choice<I, O> {
    fn parse(&self, input: &I, pos: usize) -> ParseResult<O> {
        let mut last_error = None;
        for parser in &self.parsers {
            match parser.parse(input, pos) {
                Ok(success) => return Ok(success),
                Err(error) => last_error = Some(error),
            }
        }
        Err(last_error.expect("choice requires at least one alternative"))
    }
}

#[derive(Clone)]
pub struct Preceded<P1, P2, O1> {
    first: P1,
    second: P2,
    _phantom: PhantomData<fn(O1)>,
}

impl<P1, P2, O1> Preceded<P1, P2, O1> {
    pub fn new(first: P1, second: P2) -> Self {
        Self {
            first,
            second,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, O1, O2, P1, P2> Parser<I, O2> for Preceded<P1, P2, O1>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<O2> {
        let (pos, _) = self.first.parse(input, pos)?;
        let (pos, result) = self.second.parse(input, pos)?;
        Ok((pos, result))
    }
}

#[derive(Clone)]
pub struct Terminated<P1, P2, O2> {
    first: P1,
    second: P2,
    _phantom: PhantomData<fn(O2)>,
}

impl<P1, P2, O2> Terminated<P1, P2, O2> {
    pub fn new(first: P1, second: P2) -> Self {
        Self {
            first,
            second,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, O1, O2, P1, P2> Parser<I, O1> for Terminated<P1, P2, O2>
where
    P1: Parser<I, O1>,
    P2: Parser<I, O2>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<O1> {
        let (pos, result) = self.first.parse(input, pos)?;
        let (pos, _) = self.second.parse(input, pos)?;
        Ok((pos, result))
    }
}

/// Delimited: Parses content between left and right delimiters
///
/// This parser handles common patterns like parenthesized expressions or
/// bracketed lists. It applies the left delimiter parser, then the content
/// parser, then the right delimiter parser, returning only the content
/// parser's result. Both delimiters must match; their values are dropped.
#[derive(Clone)]
pub struct Delimited<L, P, R, O1, O2> {
    /// Parser for the left delimiter
    left: L,
    /// Parser for the content between delimiters
    parser: P,
    /// Parser for the right delimiter
    right: R,
    _phantom: PhantomData<fn(O1, O2)>,
}

impl<L, P, R, O1, O2> Delimited<L, P, R, O1, O2> {
    pub fn new(left: L, parser: P, right: R) -> Self {
        Self {
            left,
            parser,
            right,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, O, O1, O2, L, P, R> Parser<I, O> for Delimited<L, P, R, O1, O2>
where
    L: Parser<I, O1>,
    P: Parser<I, O>,
    R: Parser<I, O2>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<O> {
        let (pos, _) = self.left.parse(input, pos)?;
        let (pos, value) = self.parser.parse(input, pos)?;
        let (pos, _) = self.right.parse(input, pos)?;
        Ok((pos, value))
    }
}

/// Many: Applies a parser zero or more times
///
/// This parser repeatedly applies the inner parser until it fails,
/// collecting all successful results into a vector. It always succeeds,
/// even if the inner parser never succeeds (returning an empty vector);
/// the inner parser's first failure is reinterpreted as the end of the
/// repetition, not reported.
///
/// # Panics
///
/// Panics if the inner parser succeeds without advancing the position;
/// such a repetition would never terminate.
#[derive(Clone)]
pub struct Many<P> {
    /// The parser to apply repeatedly
    parser: P,
}

impl<P> Many<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I: ?Sized, O, P> Parser<I, Vec<O>> for Many<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<Vec<O>> {
        let mut results = Vec::new();
        let mut current_pos = pos;

        loop {
            match self.parser.parse(input, current_pos) {
                Ok((new_pos, value)) => {
                    if new_pos == current_pos {
                        panic!(
                            "parser inside many() succeeded at position {new_pos} without consuming input"
                        );
                    }
                    results.push(value);
                    current_pos = new_pos;
                }
                Err(error) => {
                    tracing::trace!(
                        target: "parser::many",
                        error = %error,
                        position = current_pos,
                        items_collected = results.len(),
                        "repetition stopped"
                    );
                    break;
                }
            }
        }

        Ok((current_pos, results))
    }
}

/// Many1: Applies a parser one or more times
///
/// Similar to Many, but requires the inner parser to succeed at least once.
/// It fails with the inner parser's failure if that first attempt fails.
#[derive(Clone)]
pub struct Many1<P> {
    /// The parser to apply repeatedly
    parser: P,
}

impl<P> Many1<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I: ?Sized, O, P> Parser<I, Vec<O>> for Many1<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<Vec<O>> {
        let (pos, first) = self.parser.parse(input, pos)?;
        let mut results = vec![first];
        let mut current_pos = pos;

        // 残りの要素を可能な限り収集
        loop {
            match self.parser.parse(input, current_pos) {
                Ok((new_pos, value)) => {
                    if new_pos == current_pos {
                        panic!(
                            "parser inside many1() succeeded at position {new_pos} without consuming input"
                        );
                    }
                    results.push(value);
                    current_pos = new_pos;
                }
                Err(error) => {
                    tracing::trace!(
                        target: "parser::many1",
                        error = %error,
                        position = current_pos,
                        items_collected = results.len(),
                        "repetition stopped"
                    );
                    break;
                }
            }
        }

        Ok((current_pos, results))
    }
}

/// SeparatedList: Parses one or more items separated by a delimiter
///
/// The first item is required; its failure is the failure of the whole
/// combinator. After that, a failing separator ends the list successfully,
/// but a separator that matches commits to one more item: a dangling
/// separator with nothing after it fails at the position of the missing
/// item rather than silently truncating the list.
pub struct SeparatedList<P, S, OSep> {
    /// Parser for list items
    item_parser: P,
    /// Parser for the separator between items
    separator_parser: S,
    _phantom: PhantomData<fn(OSep)>,
}

impl<P, S, OSep> SeparatedList<P, S, OSep> {
    /// Creates a new SeparatedList parser
    ///
    /// # Arguments
    ///
    /// * `item_parser` - Parser for list items
    /// * `separator_parser` - Parser for the separator between items
    pub fn new(item_parser: P, separator_parser: S) -> Self {
        Self {
            item_parser,
            separator_parser,
            _phantom: PhantomData,
        }
    }
}

impl<I: ?Sized, O, OSep, P, S> Parser<I, Vec<O>> for SeparatedList<P, S, OSep>
where
    P: Parser<I, O>,
    S: Parser<I, OSep>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<Vec<O>> {
        let (first_pos, first) = self.item_parser.parse(input, pos)?;
        let mut results = vec![first];
        let mut current_pos = first_pos;

        loop {
            let sep_pos = match self.separator_parser.parse(input, current_pos) {
                Ok((sep_pos, _)) => sep_pos,
                Err(error) => {
                    tracing::trace!(
                        target: "parser::separated_list",
                        error = %error,
                        position = current_pos,
                        items_collected = results.len(),
                        "list stopped"
                    );
                    break;
                }
            };
            // セパレータの後には必ず要素が続く
            let (new_pos, value) = self.item_parser.parse(input, sep_pos)?;
            if new_pos == current_pos {
                panic!(
                    "separator and item inside separated_list() succeeded at position {new_pos} without consuming input"
                );
            }
            results.push(value);
            current_pos = new_pos;
        }

        Ok((current_pos, results))
    }
}

#[derive(Clone)]
pub struct Optional<P> {
    parser: P,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<I: ?Sized, O, P> Parser<I, Option<O>> for Optional<P>
where
    P: Parser<I, O>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<Option<O>> {
        match self.parser.parse(input, pos) {
            Ok((new_pos, value)) => Ok((new_pos, Some(value))),
            Err(error) => {
                tracing::trace!(
                    target: "parser::optional",
                    error = %error,
                    position = pos,
                    "optional parser absent"
                );
                Ok((pos, None))
            }
        }
    }
}

macro_rules! tuple_parser {
    ($name:ident, $doc:literal, $(($ptype:ident, $pfield:ident, $output:ident, $result:ident)),+) => {
        #[doc = $doc]
        ///
        /// Applies each component parser in order, threading the position
        /// through, and produces a flat tuple of all values. The first
        /// failing component's failure is returned verbatim; the position
        /// bookkeeping of earlier components is not rolled back.
        #[derive(Clone)]
        pub struct $name<$($ptype),+> {
            $($pfield: $ptype),+
        }

        impl<$($ptype),+> $name<$($ptype),+> {
            #[allow(clippy::too_many_arguments)]
            pub fn new($($pfield: $ptype),+) -> Self {
                Self { $($pfield),+ }
            }
        }

        impl<I: ?Sized, $($output),+, $($ptype),+> Parser<I, ($($output),+)> for $name<$($ptype),+>
        where
            $($ptype: Parser<I, $output>),+
        {
            fn parse(&self, input: &I, pos: usize) -> ParseResult<($($output),+)> {
                $(let (pos, $result) = self.$pfield.parse(input, pos)?;)+
                Ok((pos, ($($result),+)))
            }
        }
    };
}

tuple_parser!(
    Tuple2,
    "Tuple2: Applies two parsers in sequence",
    (P1, p1, O1, r1),
    (P2, p2, O2, r2)
);
tuple_parser!(
    Tuple3,
    "Tuple3: Applies three parsers in sequence",
    (P1, p1, O1, r1),
    (P2, p2, O2, r2),
    (P3, p3, O3, r3)
);
tuple_parser!(
    Tuple4,
    "Tuple4: Applies four parsers in sequence",
    (P1, p1, O1, r1),
    (P2, p2, O2, r2),
    (P3, p3, O3, r3),
    (P4, p4, O4, r4)
);
tuple_parser!(
    Tuple5,
    "Tuple5: Applies five parsers in sequence",
    (P1, p1, O1, r1),
    (P2, p2, O2, r2),
    (P3, p3, O3, r3),
    (P4, p4, O4, r4),
    (P5, p5, O5, r5)
);
tuple_parser!(
    Tuple6,
    "Tuple6: Applies six parsers in sequence",
    (P1, p1, O1, r1),
    (P2, p2, O2, r2),
    (P3, p3, O3, r3),
    (P4, p4, O4, r4),
    (P5, p5, O5, r5),
    (P6, p6, O6, r6)
);
tuple_parser!(
    Tuple7,
    "Tuple7: Applies seven parsers in sequence",
    (P1, p1, O1, r1),
    (P2, p2, O2, r2),
    (P3, p3, O3, r3),
    (P4, p4, O4, r4),
    (P5, p5, O5, r5),
    (P6, p6, O6, r6),
    (P7, p7, O7, r7)
);

/// Forward: A placeholder parser for recursive grammar rules
///
/// A grammar rule that refers to itself cannot be written as an ordinary
/// expression, because the reference would need to exist before its own
/// definition. `Forward` is the indirection that breaks the cycle: it
/// delegates every invocation to a single-assignment cell that is filled in
/// once the real definition has been built. Clones share the same cell, so
/// a rule can embed any number of references to itself.
///
/// Usually constructed through [`fix`](crate::prelude::fix), which handles
/// the create/define/return dance in one step.
///
/// # Panics
///
/// Invoking a `Forward` whose cell was never filled, or filling the cell
/// twice, is a broken grammar and panics. Once filled, the cell is
/// read-only and the parser is freely shareable across threads.
pub struct Forward<I: ?Sized, O> {
    cell: Arc<OnceLock<BoxedParser<I, O>>>,
}

impl<I: ?Sized, O> Forward<I, O> {
    /// Creates an empty placeholder.
    pub fn new() -> Self {
        Self {
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// Installs the definition this placeholder delegates to.
    ///
    /// Must be called exactly once, before the first parse. The definition
    /// may contain clones of the placeholder itself at any depth; they are
    /// only invoked at parse time, never during construction.
    pub fn define<P>(&self, parser: P)
    where
        P: Parser<I, O> + Send + Sync + 'static,
    {
        if self.cell.set(Box::new(parser)).is_err() {
            panic!("forward parser defined twice");
        }
    }
}

impl<I: ?Sized, O> Default for Forward<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized, O> Clone for Forward<I, O> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<I: ?Sized, O> Parser<I, O> for Forward<I, O> {
    fn parse(&self, input: &I, pos: usize) -> ParseResult<O> {
        self.cell
            .get()
            .expect("forward parser invoked before its definition was installed")
            .parse(input, pos)
    }
}

/// Lazy: Defers parser construction to parse time
///
/// The function is invoked on every parse to build the parser to delegate
/// to. Useful for grammars written as mutually recursive Rust functions,
/// where naming the constructed parser type would be impossible.
#[derive(Clone)]
pub struct Lazy<F> {
    f: F,
}

impl<F> Lazy<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<I: ?Sized, O, F, P> Parser<I, O> for Lazy<F>
where
    F: Fn() -> P,
    P: Parser<I, O>,
{
    fn parse(&self, input: &I, pos: usize) -> ParseResult<O> {
        (self.f)().parse(input, pos)
    }
}
