use regex::Regex;

#[derive(Debug, Eq, PartialEq)]
pub enum Token<'a> {
    OpenRoundBracket,
    CloseRoundBracket,
    Comment(&'a str),
    PlainChars(&'a str),
}

fn create_token(captured: &str) -> Token<'_> {
    match captured.as_bytes()[0] {
        b'(' => Token::OpenRoundBracket,
        b')' => Token::CloseRoundBracket,
        // ; is ASCII so it is safe to slice after it.
        b';' => Token::Comment(&captured[1..]),
        _ => Token::PlainChars(captured),
    }
}

/// Every character other than whitespace and commas belongs to some token,
/// so tokenizing cannot fail.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    lazy_static! {
        static ref TOKEN_RE: Regex = Regex::new(
            r#"(?x)                  # ignore whitespace in this pattern & allow comments
                [()]                 # single special characters
                |;.*                 # comments run to the end of the line
                |[^\s,();]+          # one or more plain characters
            "#
        )
        .unwrap();
    }
    TOKEN_RE
        .find_iter(input)
        .map(|m| create_token(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::Token::*;
    use super::*;

    #[test]
    fn splits_on_brackets_and_whitespace() {
        assert_eq!(
            tokenize("(def x  (+ 1,2))"),
            vec![
                OpenRoundBracket,
                PlainChars("def"),
                PlainChars("x"),
                OpenRoundBracket,
                PlainChars("+"),
                PlainChars("1"),
                PlainChars("2"),
                CloseRoundBracket,
                CloseRoundBracket,
            ]
        );
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            tokenize("x ; the (rest"),
            vec![PlainChars("x"), Comment(" the (rest")]
        );
    }

    #[test]
    fn blank_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t ,, ").is_empty());
    }
}
