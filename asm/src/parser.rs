use crate::error::Error;
use crate::normalize::{normalize, tokenize};
use crate::token::Token;
use arch::op::OpKind;
use arch::syntax;

/// One analyzed source line: classified, grammar-checked, and folded into
/// typed items ready to be applied to the session.
#[derive(Debug, Clone)]
pub struct Line {
    pub num: usize,
    pub raw: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Label definition at token position 0. Consumes no memory cell.
    Def(String),
    Op(OpKind),
    Operand(Operand),
}

/// Typed addressing forms. `LABEL + NUMBER` folds into one operand, so no
/// offset state can leak across tokens or lines.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Direct(String),
    Offset(String, i32),
    Immediate(i32),
    Reserve(i32),
}

impl Line {
    /// Classify and validate one line. Returns `None` for lines that are
    /// empty after normalization; those are skipped, not assembled.
    pub fn parse(num: usize, raw: &str) -> Result<Option<Line>, Error> {
        let code = normalize(raw);
        if code.is_empty() {
            return Ok(None);
        }

        let tokens = tokenize(&code)
            .into_iter()
            .map(|t| Token::classify(t, num))
            .collect::<Result<Vec<_>, _>>()?;

        let kinds: Vec<syntax::Kind> = tokens.iter().map(Token::kind).collect();
        if !syntax::validate(&kinds) {
            return Err(Error::Syntax {
                text: code,
                line: num,
            });
        }

        Ok(Some(Line {
            num,
            raw: raw.to_string(),
            items: fold(&tokens),
        }))
    }
}

/// Rewrite a validated token list into typed items: `LABEL + NUMBER` folds
/// into a single offset operand, a NUMBER after SPACE is a reservation.
fn fold(tokens: &[Token]) -> Vec<Item> {
    let mut items = Vec::new();
    let mut last_op = None;
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Label(l) if i == 0 => items.push(Item::Def(l.clone())),
            Token::Label(l) => match (tokens.get(i + 1), tokens.get(i + 2)) {
                (Some(Token::Plus), Some(Token::Number(n))) => {
                    items.push(Item::Operand(Operand::Offset(l.clone(), *n)));
                    i += 2;
                }
                _ => items.push(Item::Operand(Operand::Direct(l.clone()))),
            },
            Token::Op(op) => {
                last_op = Some(*op);
                items.push(Item::Op(*op));
            }
            Token::Number(n) => {
                let operand = match last_op {
                    Some(OpKind::SPACE) => Operand::Reserve(*n),
                    _ => Operand::Immediate(*n),
                };
                items.push(Item::Operand(operand));
            }
            // consumed by the offset fold; a validated line has no
            // free-standing `+`
            Token::Plus => {}
        }
        i += 1;
    }
    items
}
