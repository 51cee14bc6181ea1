//! Lexical analysis for APBL source text.
//!
//! Statements end with `.`, blocks use square brackets and comments come in
//! two forms: `$$` runs to the end of the line, `$< ... >$` may span lines.

use thiserror::Error;

use super::token::{Token, TokenKind, TokenValue};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {line}{}", value_suffix(.value))]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub value: Option<String>,
}

fn value_suffix(value: &Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!(": '{}'", v),
        _ => String::new(),
    }
}

impl LexError {
    fn new(message: &str, line: usize, value: impl Into<String>) -> Self {
        Self {
            message: message.to_string(),
            line,
            value: Some(value.into()),
        }
    }
}

/// Tokenizes a whole source text, stopping at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    failed: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            failed: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => self.pos += 1,
                '\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                '$' if self.peek_at(1) == Some('$') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                '$' if self.peek_at(1) == Some('<') => self.skip_block_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_line = self.line;
        self.pos += 2;
        loop {
            match self.peek() {
                None => return Err(LexError::new("Unterminated comment", start_line, "$<")),
                Some('>') if self.peek_at(1) == Some('$') => {
                    self.pos += 2;
                    return Ok(());
                }
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    self.pos += 1;
                }
            }
        }
    }

    fn digits_from(&self, mut at: usize) -> usize {
        while self.chars.get(at).is_some_and(|c| c.is_ascii_digit()) {
            at += 1;
        }
        at
    }

    fn number(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let int_end = self.digits_from(start);
        let has_fraction = self.chars.get(int_end) == Some(&'.')
            && self.chars.get(int_end + 1).is_some_and(|c| c.is_ascii_digit());

        if has_fraction {
            let end = self.digits_from(int_end + 1);
            let text = self.slice(start, end);
            self.pos = end;
            let value = text
                .parse::<f64>()
                .map_err(|_| LexError::new("Invalid float literal", self.line, text.as_str()))?;
            return Ok(Token::new(TokenKind::FloatNum, TokenValue::Float(value), self.line));
        }

        let text = self.slice(start, int_end);
        self.pos = int_end;
        let value = text
            .parse::<i64>()
            .map_err(|_| LexError::new("Integer literal out of range", self.line, text.as_str()))?;
        Ok(Token::new(TokenKind::Number, TokenValue::Int(value), self.line))
    }

    /// Matches `"` + shape + `"` where `#` stands for a digit.
    fn quoted_shape(&self, shape: &str) -> bool {
        let len = shape.chars().count();
        if self.peek_at(len + 1) != Some('"') {
            return false;
        }
        shape.chars().enumerate().all(|(i, want)| match self.peek_at(i + 1) {
            Some(c) if want == '#' => c.is_ascii_digit(),
            Some(c) => c == want,
            None => false,
        })
    }

    fn quoted(&mut self) -> Result<Token, LexError> {
        for (shape, kind) in [("####-##-##", TokenKind::DateVal), ("##:##:##", TokenKind::TimeVal)] {
            if self.quoted_shape(shape) {
                let len = shape.len();
                let text = self.slice(self.pos + 1, self.pos + 1 + len);
                self.pos += len + 2;
                return Ok(Token::new(kind, TokenValue::Text(text), self.line));
            }
        }

        let start = self.pos;
        self.pos += 1;
        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    let text = self.slice(start + 1, self.pos);
                    self.pos += 1;
                    return Ok(Token::new(
                        TokenKind::StringLiteral,
                        TokenValue::Text(text),
                        self.line,
                    ));
                }
                '\n' => break,
                _ => self.pos += 1,
            }
        }
        let lexeme = self.slice(start, self.pos);
        Err(LexError::new("String is missing closing quote", self.line, lexeme))
    }

    fn word(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let word = self.slice(start, self.pos);
        match word.as_str() {
            "True" => Token::new(TokenKind::BooleanVal, TokenValue::Bool(true), self.line),
            "False" => Token::new(TokenKind::BooleanVal, TokenValue::Bool(false), self.line),
            _ => {
                let kind = TokenKind::keyword(&word).unwrap_or(TokenKind::Identifier);
                Token::new(kind, TokenValue::Text(word), self.line)
            }
        }
    }

    fn operator(&mut self, c: char) -> Result<Token, LexError> {
        let next_is_eq = self.peek_at(1) == Some('=');
        let (kind, len) = match c {
            '=' if next_is_eq => (TokenKind::Eq, 2),
            '!' if next_is_eq => (TokenKind::Neq, 2),
            '<' if next_is_eq => (TokenKind::Le, 2),
            '>' if next_is_eq => (TokenKind::Ge, 2),
            '=' => (TokenKind::Equals, 1),
            '<' => (TokenKind::Lt, 1),
            '>' => (TokenKind::Gt, 1),
            '+' => (TokenKind::Plus, 1),
            '-' => (TokenKind::Minus, 1),
            '*' => (TokenKind::Times, 1),
            '/' => (TokenKind::Divide, 1),
            '(' => (TokenKind::LParen, 1),
            ')' => (TokenKind::RParen, 1),
            '[' => (TokenKind::LBracket, 1),
            ']' => (TokenKind::RBracket, 1),
            ',' => (TokenKind::Comma, 1),
            '.' => (TokenKind::Eol, 1),
            other => return Err(LexError::new("Invalid character", self.line, other.to_string())),
        };
        let text = self.slice(self.pos, self.pos + len);
        self.pos += len;
        Ok(Token::new(kind, TokenValue::Text(text), self.line))
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_trivia()?;
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        let starts_fraction = c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
        let token = if c.is_ascii_digit() || starts_fraction {
            self.number()?
        } else if c == '"' {
            self.quoted()?
        } else if c.is_ascii_alphabetic() || c == '_' {
            self.word()
        } else {
            self.operator(c)?
        };
        Ok(Some(token))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn declaration_statement() {
        assert_eq!(
            kinds("int seats = 5."),
            vec![IntType, Identifier, Equals, Number, Eol]
        );
    }

    #[test]
    fn float_forms() {
        let tokens = tokenize("x = 2.95 + .5.").unwrap();
        assert_eq!(tokens[2].value, TokenValue::Float(2.95));
        assert_eq!(tokens[4].value, TokenValue::Float(0.5));
        assert_eq!(tokens[5].kind, Eol);
    }

    #[test]
    fn comparison_operators_prefer_two_chars() {
        assert_eq!(kinds("a <= b >= c == d != e < f > g"), vec![
            Identifier, Le, Identifier, Ge, Identifier, Eq, Identifier, Neq, Identifier, Lt,
            Identifier, Gt, Identifier
        ]);
    }

    #[test]
    fn quoted_literals() {
        let tokens = tokenize(r#""2024-05-01" "09:30:00" "hello world""#).unwrap();
        assert_eq!(tokens[0].kind, DateVal);
        assert_eq!(tokens[0].value, TokenValue::Text("2024-05-01".into()));
        assert_eq!(tokens[1].kind, TimeVal);
        assert_eq!(tokens[2].kind, StringLiteral);
        assert_eq!(tokens[2].text(), "hello world");
    }

    #[test]
    fn booleans_and_keywords() {
        assert_eq!(kinds("True False Trueish book display"), vec![
            BooleanVal, BooleanVal, Identifier, Book, Display
        ]);
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let source = "$$ header\nint a = 1.\n$< spans\ntwo lines >$\nint b = 2.";
        let tokens = tokenize(source).unwrap();
        assert_eq!(tokens.len(), 10);
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[5].line, 5);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let err = tokenize("string s = \"open\nint x = 1.").unwrap_err();
        assert_eq!(err.message, "String is missing closing quote");
        assert_eq!(err.line, 1);
        assert_eq!(err.to_string(), "String is missing closing quote at line 1: '\"open'");
    }

    #[test]
    fn invalid_character_is_reported() {
        let err = tokenize("int a = 1.\nint b = 2 # 3.").unwrap_err();
        assert_eq!(err.to_string(), "Invalid character at line 2: '#'");
    }

    #[test]
    fn unterminated_block_comment() {
        let err = tokenize("$< never closed").unwrap_err();
        assert_eq!(err.message, "Unterminated comment");
    }

    #[test]
    fn lexer_stops_after_first_error() {
        let results: Vec<_> = Lexer::new("a @ b @").collect();
        assert_eq!(results.len(), 2);
        assert!(results[1].is_err());
    }
}
