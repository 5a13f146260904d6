//! # Kumiko: Parser Combinator Library
//!
//! Kumiko provides a small set of composable primitives for building
//! recursive-descent parsers over strings and arbitrary element sequences,
//! without a separate grammar compiler or generated code. Parsers are
//! values; grammars are expressions built by combining smaller parsers.
//!
//! ## Core Components
//!
//! * **Parser Trait**: The core parsing contract ([`core`]) — a pure
//!   function from an input and a start position to a success with a new
//!   position and value, or a failure with a position and expectation.
//! * **Combinators**: Building blocks for composing parsers ([`combinators`]):
//!   sequencing, ordered choice, repetition, separated lists, mapping.
//! * **Constructors**: The functional surface grammar code is written
//!   against ([`prelude`]), including the `fix` fixed-point builder for
//!   recursive rules and the `lift2`..`lift7` tuple adapters.
//! * **Leaf Libraries**: Concrete atomic parsers over text ([`text`]) and
//!   over `strum`-derived enums ([`enums`]), built entirely on the public
//!   combinator surface.
//!
//! ## Architecture Design
//!
//! A grammar is assembled once, at construction time, into a tree of
//! composed parser values; nothing executes until `parse` is invoked on
//! some input. Execution walks the composed structure, evaluating child
//! parsers at call time and combining their results according to each
//! combinator's rule:
//!
//! 1. **Sequencing** threads the position through each component and fails
//!    with the first component failure.
//! 2. **Ordered choice** retries alternatives at the same start position
//!    and commits to the first success (PEG-style).
//! 3. **Repetition** reinterprets the inner parser's first failure as the
//!    end of the loop, never as an error.
//! 4. **Self-reference** goes through a placeholder parser whose
//!    single-assignment cell is filled once the definition is built.
//!
//! Constructed grammars hold no mutable state, so the same parser value
//! may be shared and invoked concurrently from any number of threads.
//!
//! ## Error Handling
//!
//! Malformed input is reported as a [`ParseError`] value carrying the
//! failure position and a description of what was expected; `parse` never
//! panics for bad input. Broken grammars — an undefined forward parser, a
//! repetition over a parser that consumes nothing — are programming faults
//! and panic.
//!
//! ## Usage Example
//!
//! ```rust
//! use kumiko::prelude::*;
//!
//! let number = map(token(regex(r"[0-9]+")), |s: String| {
//!     s.parse::<i64>().unwrap()
//! });
//! let numbers = full(separated_list(number, token(string(","))));
//!
//! assert_eq!(numbers.parse("1, 2, 3", 0), Ok((7, vec![1, 2, 3])));
//! assert_eq!(
//!     numbers.parse("1,", 0),
//!     Err(ParseError::new(2, "[0-9]+"))
//! );
//! ```

pub mod combinators;
pub mod core;
pub mod enums;
pub mod prelude;
pub mod text;

pub use self::core::{BoxedParser, InputLen, ParseError, ParseResult, Parser};
