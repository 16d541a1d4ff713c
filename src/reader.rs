use crate::tokens::{tokenize, Token};
use crate::types::{Expression, Int, Symbol};
use regex::Regex;
use std::fmt;
use std::iter::Peekable;
use std::slice;

type Reader<'a> = Peekable<slice::Iter<'a, Token<'a>>>;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnclosedForm,
    UnexpectedCloseParen,
    TrailingInput,
    BadInteger(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnclosedForm => write!(f, "unbalanced parentheses: missing ')'"),
            Error::UnexpectedCloseParen => write!(f, "unbalanced parentheses: unexpected ')'"),
            Error::TrailingInput => write!(f, "expected one expression per line"),
            Error::BadInteger(s) => write!(f, "cannot read {:?} as an integer", s),
        }
    }
}

/// `Ok(None)` means there was nothing to evaluate on the line.
pub type Result = std::result::Result<Option<Expression>, Error>;

pub fn read_str(input: &str) -> Result {
    let tokens: Vec<Token> = tokenize(input)
        .into_iter()
        .filter(|token| !matches!(token, Token::Comment(_)))
        .collect();
    let mut reader = tokens.iter().peekable();
    if reader.peek().is_none() {
        return Ok(None);
    }
    let form = read_form(&mut reader)?;
    match reader.next() {
        None => Ok(Some(form)),
        Some(_) => Err(Error::TrailingInput),
    }
}

fn read_form(reader: &mut Reader) -> std::result::Result<Expression, Error> {
    match reader.next() {
        Some(Token::OpenRoundBracket) => read_list(reader),
        Some(Token::CloseRoundBracket) => Err(Error::UnexpectedCloseParen),
        Some(Token::PlainChars(chars)) => read_atom(chars),
        Some(Token::Comment(_)) | None => Err(Error::UnclosedForm),
    }
}

fn read_list(reader: &mut Reader) -> std::result::Result<Expression, Error> {
    let mut elements = Vec::new();
    loop {
        match reader.peek() {
            Some(Token::CloseRoundBracket) => {
                reader.next();
                break;
            }
            Some(_) => elements.push(read_form(reader)?),
            None => return Err(Error::UnclosedForm),
        }
    }
    Ok(Expression::form(elements))
}

fn read_atom(chars: &str) -> std::result::Result<Expression, Error> {
    lazy_static! {
        static ref INTEGER_RE: Regex = Regex::new(r"^[+-]?[0-9]").unwrap();
    }
    if INTEGER_RE.is_match(chars) {
        chars
            .parse::<Int>()
            .map(Expression::Integer)
            .map_err(|_| Error::BadInteger(String::from(chars)))
    } else {
        Ok(Expression::Symbol(Symbol::from(chars)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Expression {
        read_str(input).unwrap().unwrap()
    }

    #[test]
    fn can_read_expr() {
        assert_eq!(
            read("(+ 2 3)"),
            Expression::form(vec![
                Expression::symbol("+"),
                Expression::Integer(2),
                Expression::Integer(3),
            ])
        )
    }

    #[test]
    fn can_read_nested_forms() {
        assert_eq!(
            read("(lambda (x) (f x))"),
            Expression::form(vec![
                Expression::symbol("lambda"),
                Expression::form(vec![Expression::symbol("x")]),
                Expression::form(vec![Expression::symbol("f"), Expression::symbol("x")]),
            ])
        )
    }

    #[test]
    fn atoms() {
        assert_eq!(read("42"), Expression::Integer(42));
        assert_eq!(read("-7"), Expression::Integer(-7));
        assert_eq!(read("+7"), Expression::Integer(7));
        assert_eq!(read("-"), Expression::symbol("-"));
        assert_eq!(read("make-adder"), Expression::symbol("make-adder"));
        assert_eq!(read("x1"), Expression::symbol("x1"));
    }

    #[test]
    fn empty_form() {
        assert_eq!(read("()"), Expression::form(vec![]));
    }

    #[test]
    fn nothing_to_evaluate() {
        assert_eq!(read_str(""), Ok(None));
        assert_eq!(read_str("   "), Ok(None));
        assert_eq!(read_str("; just a comment"), Ok(None));
    }

    #[test]
    fn comments_are_ignored() {
        assert_eq!(read("(f 1) ; call f"), read("(f 1)"));
    }

    #[test]
    fn unbalanced_input() {
        assert_eq!(read_str("(f 1"), Err(Error::UnclosedForm));
        assert_eq!(read_str("(f (g 1)"), Err(Error::UnclosedForm));
        assert_eq!(read_str(")"), Err(Error::UnexpectedCloseParen));
        assert_eq!(read_str("(f 1))"), Err(Error::TrailingInput));
    }

    #[test]
    fn one_expression_per_line() {
        assert_eq!(read_str("1 2"), Err(Error::TrailingInput));
    }

    #[test]
    fn bad_integers() {
        assert_eq!(
            read_str("12abc"),
            Err(Error::BadInteger(String::from("12abc")))
        );
        assert_eq!(
            read_str("99999999999999999999"),
            Err(Error::BadInteger(String::from("99999999999999999999")))
        );
    }
}
