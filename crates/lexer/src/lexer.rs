use brewin_core::{Token, TokenType};
use brewin_diagnostics::{DiagResult, Diagnostic, DiagnosticKind, Span};

pub struct Lexer {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    line_start: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            line_start: 0,
        }
    }

    pub fn scan_tokens(mut self) -> DiagResult<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        self.start = self.current;
        self.push_token(TokenType::Eof);
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> DiagResult<()> {
        let c = self.advance();
        match c {
            '(' => self.push_token(TokenType::LeftParen),
            ')' => self.push_token(TokenType::RightParen),
            '{' => self.push_token(TokenType::LeftBrace),
            '}' => self.push_token(TokenType::RightBrace),
            ',' => self.push_token(TokenType::Comma),
            ';' => self.push_token(TokenType::Semicolon),
            '.' => self.push_token(TokenType::Dot),
            '@' => self.push_token(TokenType::At),
            '-' => self.push_token(TokenType::Minus),
            '+' => self.push_token(TokenType::Plus),
            '*' => self.push_token(TokenType::Star),
            '/' => {
                if self.match_char('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.push_token(TokenType::Slash);
                }
            }
            '!' => {
                let token = if self.match_char('=') {
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                };
                self.push_token(token);
            }
            '=' => {
                let token = if self.match_char('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                };
                self.push_token(token);
            }
            '<' => {
                let token = if self.match_char('=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                };
                self.push_token(token);
            }
            '>' => {
                let token = if self.match_char('=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                };
                self.push_token(token);
            }
            '&' => {
                if self.match_char('&') {
                    self.push_token(TokenType::AndAnd);
                } else {
                    return Err(self.error_here("expected '&&'"));
                }
            }
            '|' => {
                if self.match_char('|') {
                    self.push_token(TokenType::OrOr);
                } else {
                    return Err(self.error_here("expected '||'"));
                }
            }
            ' ' | '\r' | '\t' => (),
            '\n' => {
                self.line += 1;
                self.line_start = self.current;
            }
            '"' => self.string()?,
            c if c.is_ascii_digit() => self.number()?,
            c if c.is_alphabetic() || c == '_' => self.identifier(),
            _ => return Err(self.error_here(&format!("unexpected character '{}'", c))),
        }
        Ok(())
    }

    fn string(&mut self) -> DiagResult<()> {
        let mut value = String::new();
        while self.peek() != '"' && !self.is_at_end() {
            let c = self.advance();
            if c == '\n' {
                self.line += 1;
                self.line_start = self.current;
                value.push(c);
            } else if c == '\\' {
                if self.is_at_end() {
                    break;
                }
                let escaped = self.advance();
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    other => {
                        return Err(self.error_here(&format!("unknown escape '\\{}'", other)))
                    }
                }
            } else {
                value.push(c);
            }
        }

        if self.is_at_end() {
            return Err(self.error_here("unterminated string"));
        }

        self.advance(); // closing quote
        self.push_token(TokenType::Str(value));
        Ok(())
    }

    fn number(&mut self) -> DiagResult<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        let text: String = self.source[self.start..self.current].iter().collect();
        match text.parse::<i64>() {
            Ok(n) => {
                self.push_token(TokenType::Int(n));
                Ok(())
            }
            // digits only, so the remaining failure is overflow
            Err(_) => Err(self.error_span("integer literal out of range")),
        }
    }

    fn identifier(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }
        let text: String = self.source[self.start..self.current].iter().collect();
        let token_type = match text.as_str() {
            "func" => TokenType::Func,
            "lambda" => TokenType::Lambda,
            "ref" => TokenType::Ref,
            "if" => TokenType::If,
            "else" => TokenType::Else,
            "while" => TokenType::While,
            "return" => TokenType::Return,
            "true" => TokenType::True,
            "false" => TokenType::False,
            "nil" => TokenType::Nil,
            _ => TokenType::Identifier,
        };
        self.push_token(token_type);
    }

    fn push_token(&mut self, token_type: TokenType) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        let col = if self.start >= self.line_start {
            self.start - self.line_start + 1
        } else {
            1
        };
        self.tokens.push(Token::new(
            token_type,
            lexeme,
            self.line,
            col,
            self.start,
            self.current,
        ));
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn error_here(&self, msg: &str) -> Diagnostic {
        let col = if self.current > self.line_start {
            self.current - self.line_start
        } else {
            1
        };
        Diagnostic::new(
            DiagnosticKind::Lex,
            msg,
            Span::new(self.current.saturating_sub(1), self.current, self.line, col),
        )
    }

    fn error_span(&self, msg: &str) -> Diagnostic {
        let col = if self.start >= self.line_start {
            self.start - self.line_start + 1
        } else {
            1
        };
        Diagnostic::new(
            DiagnosticKind::Lex,
            msg,
            Span::new(self.start, self.current, self.line, col),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> Vec<TokenType> {
        Lexer::new(src)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn scans_operators_and_keywords() {
        let kinds = scan("func main() { x = 1 + 2; }");
        assert_eq!(
            kinds,
            vec![
                TokenType::Func,
                TokenType::Identifier,
                TokenType::LeftParen,
                TokenType::RightParen,
                TokenType::LeftBrace,
                TokenType::Identifier,
                TokenType::Equal,
                TokenType::Int(1),
                TokenType::Plus,
                TokenType::Int(2),
                TokenType::Semicolon,
                TokenType::RightBrace,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn scans_two_char_operators() {
        let kinds = scan("a == b != c <= d >= e && f || g");
        assert!(kinds.contains(&TokenType::EqualEqual));
        assert!(kinds.contains(&TokenType::BangEqual));
        assert!(kinds.contains(&TokenType::LessEqual));
        assert!(kinds.contains(&TokenType::GreaterEqual));
        assert!(kinds.contains(&TokenType::AndAnd));
        assert!(kinds.contains(&TokenType::OrOr));
    }

    #[test]
    fn string_escapes() {
        let kinds = scan(r#""a\nb\"c""#);
        assert_eq!(kinds[0], TokenType::Str("a\nb\"c".to_string()));
    }

    #[test]
    fn object_literal_and_dot() {
        let kinds = scan("o = @; o.x = 3;");
        assert!(kinds.contains(&TokenType::At));
        assert!(kinds.contains(&TokenType::Dot));
    }

    #[test]
    fn line_comment_skipped() {
        let kinds = scan("x = 1; // trailing\ny = 2;");
        assert_eq!(kinds.iter().filter(|t| **t == TokenType::Equal).count(), 2);
    }

    #[test]
    fn single_ampersand_is_an_error() {
        let err = Lexer::new("a & b").scan_tokens().unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Lex);
        assert!(err.message.contains("&&"));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::new("\"abc").scan_tokens().unwrap_err();
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn tokens_carry_line_and_column() {
        let tokens = Lexer::new("x = 1;\ny = 2;").scan_tokens().unwrap();
        let y = tokens
            .iter()
            .find(|t| t.lexeme == "y")
            .expect("y token present");
        assert_eq!(y.line, 2);
        assert_eq!(y.col, 1);
    }
}
