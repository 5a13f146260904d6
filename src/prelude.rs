//! # Parser Constructors
//!
//! Lowercase constructor functions over the combinator structs, plus the
//! `fix` fixed-point builder and the `lift2`..`lift7` tuple adapters.
//! Grammar code imports this module with a glob and composes parsers by
//! nesting these calls; the structs themselves rarely need to be named.

pub use crate::combinators::{
    AsUnit, AsValue, Choice, Delimited, Eof, Equal, Forward, Identity, Lazy, Many, Many1, Map,
    Optional, Preceded, Satisfy, SeparatedList, Terminated, Tuple2, Tuple3, Tuple4, Tuple5,
    Tuple6, Tuple7, Zero,
};
pub use crate::core::{BoxedParser, InputLen, ParseError, ParseResult, Parser};
pub use crate::enums::{member, members, value, values};
pub use crate::text::{chars, eol, regex, string, strings, token, whitespace};

/// Matches a single input element equal to `value`, consuming it.
pub fn equal<T>(value: T) -> Equal<T> {
    Equal::new(value)
}

/// Matches a single input element accepted by `f`, reporting `expected` on
/// failure.
pub fn satisfy<F>(expected: impl Into<String>, f: F) -> Satisfy<F> {
    Satisfy::new(expected, f)
}

/// Consumes and returns any single input element.
pub fn identity() -> Identity {
    Identity::new()
}

/// Succeeds with `value` without consuming any input.
pub fn zero<O>(value: O) -> Zero<O> {
    Zero::new(value)
}

/// Succeeds only at the end of the input.
pub fn eof() -> Eof {
    Eof::new()
}

/// Requires `parser` to consume the whole input.
pub fn full<P>(parser: P) -> Terminated<P, Eof, ()> {
    terminated(parser, eof())
}

/// Transforms the output of `parser` with `f`, leaving failures untouched.
pub fn map<P, F, A>(parser: P, f: F) -> Map<P, F, A> {
    Map::new(parser, f)
}

/// Discards the output of `parser`, producing `()`.
pub fn as_unit<P, O>(parser: P) -> AsUnit<P, O> {
    AsUnit::new(parser)
}

/// Replaces the output of `parser` with a fixed `value`.
pub fn as_value<P, O, V>(parser: P, value: V) -> AsValue<P, O, V> {
    AsValue::new(parser, value)
}

/// Runs `parser` optionally, substituting `default` when it is absent.
pub fn with_default<I, O, P>(parser: P, default: O) -> impl Parser<I, O>
where
    I: ?Sized,
    O: Clone,
    P: Parser<I, O>,
{
    map(optional(parser), move |value: Option<O>| {
        value.unwrap_or_else(|| default.clone())
    })
}

/// Applies two parsers in sequence, producing a pair.
pub fn tuple2<P1, P2>(p1: P1, p2: P2) -> Tuple2<P1, P2> {
    Tuple2::new(p1, p2)
}

/// Applies three parsers in sequence, producing a triple.
pub fn tuple3<P1, P2, P3>(p1: P1, p2: P2, p3: P3) -> Tuple3<P1, P2, P3> {
    Tuple3::new(p1, p2, p3)
}

pub fn tuple4<P1, P2, P3, P4>(p1: P1, p2: P2, p3: P3, p4: P4) -> Tuple4<P1, P2, P3, P4> {
    Tuple4::new(p1, p2, p3, p4)
}

pub fn tuple5<P1, P2, P3, P4, P5>(
    p1: P1,
    p2: P2,
    p3: P3,
    p4: P4,
    p5: P5,
) -> Tuple5<P1, P2, P3, P4, P5> {
    Tuple5::new(p1, p2, p3, p4, p5)
}

pub fn tuple6<P1, P2, P3, P4, P5, P6>(
    p1: P1,
    p2: P2,
    p3: P3,
    p4: P4,
    p5: P5,
    p6: P6,
) -> Tuple6<P1, P2, P3, P4, P5, P6> {
    Tuple6::new(p1, p2, p3, p4, p5, p6)
}

pub fn tuple7<P1, P2, P3, P4, P5, P6, P7>(
    p1: P1,
    p2: P2,
    p3: P3,
    p4: P4,
    p5: P5,
    p6: P6,
    p7: P7,
) -> Tuple7<P1, P2, P3, P4, P5, P6, P7> {
    Tuple7::new(p1, p2, p3, p4, p5, p6, p7)
}

/// Sequences two parsers, keeping only the second value.
pub fn preceded<P1, P2, O1>(first: P1, second: P2) -> Preceded<P1, P2, O1> {
    Preceded::new(first, second)
}

/// Sequences two parsers, keeping only the first value.
pub fn terminated<P1, P2, O2>(first: P1, second: P2) -> Terminated<P1, P2, O2> {
    Terminated::new(first, second)
}

/// Parses content between two delimiters, keeping only the content value.
pub fn delimited<L, P, R, O1, O2>(left: L, parser: P, right: R) -> Delimited<L, P, R, O1, O2> {
    Delimited::new(left, parser, right)
}

/// Ordered choice: tries each alternative at the same position and commits
/// to the first success; when all fail, surfaces the last failure.
///
/// # Panics
///
/// Panics if `parsers` is empty.
pub fn choice<I: ?Sized, O>(parsers: Vec<BoxedParser<I, O>>) -> Choice<I, O> {
    Choice::new(parsers)
}

/// Applies `parser` zero or more times; never fails.
pub fn many<P>(parser: P) -> Many<P> {
    Many::new(parser)
}

/// Applies `parser` one or more times.
pub fn many1<P>(parser: P) -> Many1<P> {
    Many1::new(parser)
}

/// Parses one or more `item`s separated by `separator`.
pub fn separated_list<P, S, OSep>(item: P, separator: S) -> SeparatedList<P, S, OSep> {
    SeparatedList::new(item, separator)
}

/// Applies `parser` optionally, succeeding with `None` when it fails.
pub fn optional<P>(parser: P) -> Optional<P> {
    Optional::new(parser)
}

/// Defers parser construction to parse time through a function.
pub fn lazy<F>(f: F) -> Lazy<F> {
    Lazy::new(f)
}

/// Creates an empty placeholder parser to be defined later.
///
/// Most recursive rules are easier to write with [`fix`]; use `forward`
/// directly for mutual recursion between several rules.
pub fn forward<I: ?Sized, O>() -> Forward<I, O> {
    Forward::new()
}

/// Ties the knot for a self-referential grammar rule.
///
/// Creates a placeholder, hands a clone of it to `define`, installs the
/// returned parser as the placeholder's definition, and returns the
/// placeholder as the usable rule. The definition may embed the placeholder
/// at any depth; it must not invoke it during construction, and every
/// recursive cycle must consume input at parse time or the parse will not
/// terminate.
pub fn fix<I, O, P, F>(define: F) -> Forward<I, O>
where
    I: ?Sized,
    F: FnOnce(Forward<I, O>) -> P,
    P: Parser<I, O> + Send + Sync + 'static,
{
    let rule = Forward::new();
    let body = define(rule.clone());
    rule.define(body);
    rule
}

/// Adapts a two-argument function into a function over a pair, for use
/// with [`map`] over [`tuple2`].
pub fn lift2<A, B, R>(f: impl Fn(A, B) -> R) -> impl Fn((A, B)) -> R {
    move |(a, b)| f(a, b)
}

/// Adapts a three-argument function into a function over a triple.
pub fn lift3<A, B, C, R>(f: impl Fn(A, B, C) -> R) -> impl Fn((A, B, C)) -> R {
    move |(a, b, c)| f(a, b, c)
}

pub fn lift4<A, B, C, D, R>(f: impl Fn(A, B, C, D) -> R) -> impl Fn((A, B, C, D)) -> R {
    move |(a, b, c, d)| f(a, b, c, d)
}

pub fn lift5<A, B, C, D, E, R>(f: impl Fn(A, B, C, D, E) -> R) -> impl Fn((A, B, C, D, E)) -> R {
    move |(a, b, c, d, e)| f(a, b, c, d, e)
}

pub fn lift6<A, B, C, D, E, G, R>(
    f: impl Fn(A, B, C, D, E, G) -> R,
) -> impl Fn((A, B, C, D, E, G)) -> R {
    move |(a, b, c, d, e, g)| f(a, b, c, d, e, g)
}

pub fn lift7<A, B, C, D, E, G, H, R>(
    f: impl Fn(A, B, C, D, E, G, H) -> R,
) -> impl Fn((A, B, C, D, E, G, H)) -> R {
    move |(a, b, c, d, e, g, h)| f(a, b, c, d, e, g, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_choice_repetition() {
        // 「1 または 2 を 0 回以上、その後 eof」
        let one_or_two: Choice<[i32], i32> =
            choice(vec![Box::new(equal(1)), Box::new(equal(2))]);
        let parser = full(many(one_or_two));

        assert_eq!(parser.parse(&[1, 2, 1, 1][..], 0), Ok((4, vec![1, 2, 1, 1])));
        assert_eq!(parser.parse_or_fail(&[1, 2, 1, 1][..]), Ok(vec![1, 2, 1, 1]));

        // 3 はどちらの選択肢でもないので繰り返しは位置 2 で止まり、eof が失敗する
        assert_eq!(parser.parse(&[1, 2, 3][..], 0), Err(ParseError::new(2, "eof")));
        assert_eq!(
            parser.parse_or_fail(&[1, 2, 3][..]),
            Err(ParseError::new(2, "eof"))
        );
    }

    #[test]
    fn test_fix_recursive_grammar() {
        // ネストしたブラケットの深さを数える再帰文法
        let depth = fix(|depth: Forward<[char], usize>| {
            map(
                delimited(equal('['), optional(depth), equal(']')),
                |inner: Option<usize>| inner.map_or(1, |d| d + 1),
            )
        });

        let input: Vec<char> = "[[[]]]".chars().collect();
        assert_eq!(depth.parse(&input, 0), Ok((6, 3)));

        let input: Vec<char> = "[]".chars().collect();
        assert_eq!(depth.parse(&input, 0), Ok((2, 1)));

        let input: Vec<char> = "[[}]".chars().collect();
        assert_eq!(depth.parse(&input, 0), Err(ParseError::new(2, "]")));
    }

    #[test]
    fn test_forward_mutual_recursion() {
        // 交互に 'a' と 'b' が続く列: a = 'a' b?, b = 'b' a?
        let a_rule: Forward<[char], usize> = forward();
        let b_rule: Forward<[char], usize> = forward();

        a_rule.define(map(
            tuple2(equal('a'), optional(b_rule.clone())),
            |(_, rest): (char, Option<usize>)| 1 + rest.unwrap_or(0),
        ));
        b_rule.define(map(
            tuple2(equal('b'), optional(a_rule.clone())),
            |(_, rest): (char, Option<usize>)| 1 + rest.unwrap_or(0),
        ));

        let input: Vec<char> = "abab".chars().collect();
        assert_eq!(a_rule.parse(&input, 0), Ok((4, 4)));

        let input: Vec<char> = "ba".chars().collect();
        assert_eq!(b_rule.parse(&input, 0), Ok((2, 2)));
    }

    #[test]
    fn test_lift_adapters() {
        let pair = ("x".to_string(), 3usize);
        assert_eq!(lift2(|name: String, n: usize| name.len() + n)(pair), 4);

        let triple = (1, 2, 3);
        assert_eq!(lift3(|a: i32, b: i32, c: i32| a + b + c)(triple), 6);

        let seven = (1, 2, 3, 4, 5, 6, 7);
        assert_eq!(
            lift7(|a: i32, b: i32, c: i32, d: i32, e: i32, f: i32, g: i32| {
                a + b + c + d + e + f + g
            })(seven),
            28
        );
    }

    #[test]
    fn test_with_default() {
        let input = [2, 3];
        let parser: BoxedParser<[i32], i32> = Box::new(with_default(equal(1), 0));

        assert_eq!(parser.parse(&input, 0), Ok((0, 0)));

        let input = [1, 3];
        assert_eq!(parser.parse(&input, 0), Ok((1, 1)));
    }

    #[test]
    fn test_many1_requires_one() {
        let parser = many1(equal('x'));
        let input: Vec<char> = "xxy".chars().collect();
        assert_eq!(parser.parse(&input, 0), Ok((2, vec!['x', 'x'])));

        let input: Vec<char> = "y".chars().collect();
        assert_eq!(parser.parse(&input, 0), Err(ParseError::new(0, "x")));
    }
}
