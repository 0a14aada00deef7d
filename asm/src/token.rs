use crate::error::Error;
use arch::op::OpKind;
use arch::syntax::Kind;

/// A classified lexical unit. Transient; lives only for one line's
/// analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Op(OpKind),
    Plus,
    Label(String),
    Number(i32),
}

impl Token {
    /// Reserved words are checked first, then the label pattern
    /// `[A-Za-z_][A-Za-z0-9_]*`, then all-digit numbers. Anything else is a
    /// lexical error naming the token and line.
    pub fn classify(raw: &str, line: usize) -> Result<Token, Error> {
        if raw == "+" {
            return Ok(Token::Plus);
        }
        if let Ok(op) = OpKind::parse(raw) {
            return Ok(Token::Op(op));
        }
        if is_label(raw) {
            return Ok(Token::Label(raw.to_string()));
        }
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            // overflowing literals are lexical errors too
            return raw.parse::<i32>().map(Token::Number).map_err(|_| Error::Lexical {
                token: raw.to_string(),
                line,
            });
        }
        Err(Error::Lexical {
            token: raw.to_string(),
            line,
        })
    }

    pub fn kind(&self) -> Kind {
        match self {
            Token::Op(op) => Kind::Op(*op),
            Token::Plus => Kind::Plus,
            Token::Label(_) => Kind::Label,
            Token::Number(_) => Kind::Number,
        }
    }
}

fn is_label(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
