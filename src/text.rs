//! # Text Leaf Parsers
//!
//! Concrete atomic parsers over `str` input: exact strings, regular
//! expressions, whitespace and token wrapping. Positions are byte offsets.
//! Everything here is ordinary client code over the combinator layer; the
//! values these parsers produce are indistinguishable from hand-built ones.

use lazy_static::lazy_static;
use regex::Regex;

use crate::combinators::Delimited;
use crate::core::{ParseError, ParseResult, Parser};
use crate::prelude::delimited;

/// ExactString: Matches a fixed string at the current position
///
/// Consumes exactly the expected text on success; fails at the current
/// position naming the expected text otherwise.
#[derive(Debug, Clone)]
pub struct ExactString {
    expected: String,
}

impl ExactString {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Parser<str, String> for ExactString {
    fn parse(&self, input: &str, pos: usize) -> ParseResult<String> {
        let end = pos + self.expected.len();
        match input.get(pos..end) {
            Some(actual) if actual == self.expected => Ok((end, self.expected.clone())),
            _ => Err(ParseError::new(pos, self.expected.clone())),
        }
    }
}

/// Pattern: Matches a regular expression anchored at the current position
///
/// The match must begin exactly at the position; the success value is the
/// entire matched text. Failures name the original pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles an anchored matcher for `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression; a malformed
    /// pattern is a broken grammar, not a parse failure.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let anchored = format!(r"\A(?:{pattern})");
        let regex = Regex::new(&anchored).expect("invalid regular expression");
        Self { pattern, regex }
    }
}

impl Parser<str, String> for Pattern {
    fn parse(&self, input: &str, pos: usize) -> ParseResult<String> {
        let rest = input
            .get(pos..)
            .ok_or_else(|| ParseError::new(pos, self.pattern.clone()))?;
        match self.regex.find(rest) {
            Some(found) => Ok((pos + found.end(), found.as_str().to_string())),
            None => Err(ParseError::new(pos, self.pattern.clone())),
        }
    }
}

lazy_static! {
    static ref WHITESPACE: Pattern = Pattern::new(r"\s*");
}

/// Matches the exact string `expected`.
pub fn string(expected: impl Into<String>) -> ExactString {
    ExactString::new(expected)
}

/// Builds one [`string`] parser per entry, in order, for destructuring.
pub fn strings<S: Into<String>>(expected: impl IntoIterator<Item = S>) -> Vec<ExactString> {
    expected.into_iter().map(|s| string(s)).collect()
}

/// Builds one single-character [`string`] parser per character.
pub fn chars(expected: &str) -> Vec<ExactString> {
    expected.chars().map(|c| string(c.to_string())).collect()
}

/// Matches the regular expression `pattern` anchored at the current position.
pub fn regex(pattern: impl Into<String>) -> Pattern {
    Pattern::new(pattern)
}

/// Matches any run of whitespace, including none at all.
pub fn whitespace() -> Pattern {
    WHITESPACE.clone()
}

/// Matches a single newline.
pub fn eol() -> ExactString {
    string("\n")
}

/// Wraps `parser` so surrounding whitespace is consumed and discarded.
pub fn token<P>(parser: P) -> Delimited<Pattern, P, Pattern, String, String> {
    delimited(whitespace(), parser, whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string() {
        let plus = string("+");

        assert_eq!(plus.parse("+", 0), Ok((1, "+".to_string())));
        assert_eq!(plus.parse("+-", 0), Ok((1, "+".to_string())));
        assert_eq!(plus.parse("-", 0), Err(ParseError::new(0, "+")));

        let longer = string("longer");

        assert_eq!(longer.parse("longer", 0), Ok((6, "longer".to_string())));
        assert_eq!(
            longer.parse_or_fail("short"),
            Err(ParseError::new(0, "longer"))
        );
    }

    #[test]
    fn test_strings() {
        let [me, you]: [ExactString; 2] = strings(["me", "you"]).try_into().unwrap();

        assert_eq!(me.parse("me", 0), Ok((2, "me".to_string())));
        assert_eq!(me.parse("you", 0), Err(ParseError::new(0, "me")));
        assert_eq!(you.parse("me", 0), Err(ParseError::new(0, "you")));
        assert_eq!(you.parse("you", 0), Ok((3, "you".to_string())));
    }

    #[test]
    fn test_chars() {
        let [lpar, rpar]: [ExactString; 2] = chars("()").try_into().unwrap();

        assert_eq!(lpar.parse("(", 0), Ok((1, "(".to_string())));
        assert_eq!(lpar.parse(")", 0), Err(ParseError::new(0, "(")));
        assert_eq!(rpar.parse("(", 0), Err(ParseError::new(0, ")")));
        assert_eq!(rpar.parse(")", 0), Ok((1, ")".to_string())));
    }

    #[test]
    fn test_regex() {
        let number = regex(r"[1-9][0-9]*");

        assert_eq!(number.parse("123", 0), Ok((3, "123".to_string())));
        assert_eq!(number.parse("103", 0), Ok((3, "103".to_string())));
        assert_eq!(number.parse("03", 0), Err(ParseError::new(0, "[1-9][0-9]*")));
    }

    #[test]
    fn test_regex_is_anchored() {
        let number = regex(r"[0-9]+");

        // 位置より後ろにしかマッチしない場合は失敗する
        assert_eq!(number.parse("ab12", 0), Err(ParseError::new(0, "[0-9]+")));
        assert_eq!(number.parse("ab12", 2), Ok((4, "12".to_string())));
    }

    #[test]
    fn test_whitespace_and_eol() {
        assert_eq!(whitespace().parse("  \tx", 0), Ok((3, "  \t".to_string())));
        // 空白がなくても成功する (幅ゼロのマッチ)
        assert_eq!(whitespace().parse("x", 0), Ok((0, String::new())));
        assert_eq!(eol().parse("\nrest", 0), Ok((1, "\n".to_string())));
    }

    #[test]
    fn test_compose() {
        fn add(x: i64, y: i64) -> i64 {
            x + y
        }

        let number = || map(regex(r"[1-9][0-9]*"), |s: String| s.parse::<i64>().unwrap());
        let plus = token(string("+"));
        let addition = map(tuple2(terminated(number(), plus), number()), lift2(add));

        assert_eq!(addition.parse("123+456", 0), Ok((7, 579)));
        assert_eq!(addition.parse("123 + 456", 0), Ok((9, 579)));
    }

    #[test]
    fn test_many_tokens() {
        let number = map(token(regex(r"[1-9][0-9]*")), |s: String| {
            s.parse::<i64>().unwrap()
        });
        let numbers = many(number);

        assert_eq!(numbers.parse("123 456 789", 0), Ok((11, vec![123, 456, 789])));
    }

    #[test]
    fn test_parse_all() {
        let number = || {
            map(token(regex(r"[1-9][0-9]*")), |s: String| {
                s.parse::<i64>().unwrap()
            })
        };

        // 末尾の空白ひとつは消費され、"foo" は残る
        assert_eq!(number().parse("123 foo", 0), Ok((4, 123)));

        let number_all = full(number());

        assert_eq!(number_all.parse("123", 0), Ok((3, 123)));
        assert_eq!(number_all.parse("123 foo", 0), Err(ParseError::new(4, "eof")));
    }

    #[test]
    fn test_sep_by() {
        let number = || {
            map(token(regex(r"[1-9][0-9]+")), |s: String| {
                s.parse::<i64>().unwrap()
            })
        };
        let comma = token(string(","));
        let numbers = full(separated_list(number(), comma));

        assert_eq!(
            numbers.parse("", 0),
            Err(ParseError::new(0, "[1-9][0-9]+"))
        );
        assert_eq!(numbers.parse("123", 0), Ok((3, vec![123])));
        assert_eq!(numbers.parse("123 , 456", 0), Ok((9, vec![123, 456])));

        // 末尾のカンマの後に要素がなければ、欠けている要素の位置で失敗する
        assert_eq!(
            numbers.parse("123,", 0),
            Err(ParseError::new(4, "[1-9][0-9]+"))
        );
    }
}
