use crate::op::OpKind;
use once_cell::sync::Lazy;

/// Erased token kinds used for grammar matching. The classifier keeps the
/// payloads (label names, number values) on its own token type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Op(OpKind),
    Plus,
    Label,
    Number,
}

/// Opcodes taking one address operand, in offset form or not.
pub const UNARY_OPS: [OpKind; 12] = [
    OpKind::ADD,
    OpKind::SUB,
    OpKind::MULT,
    OpKind::DIV,
    OpKind::JMP,
    OpKind::JMPN,
    OpKind::JMPP,
    OpKind::JMPZ,
    OpKind::LOAD,
    OpKind::STORE,
    OpKind::INPUT,
    OpKind::OUTPUT,
];

// Closed table of accepted per-line kind sequences. Every operand-taking
// instruction appears plain, label-prefixed, and with the `LABEL + NUMBER`
// offset suffix.
static RULES: Lazy<Vec<Vec<Kind>>> = Lazy::new(|| {
    use Kind::*;
    use OpKind::*;
    let mut rules = vec![
        vec![Label],
        vec![Op(STOP)],
        vec![Label, Op(STOP)],
        vec![Op(CONST), Number],
        vec![Label, Op(CONST), Number],
        vec![Label, Op(SPACE)],
        vec![Label, Op(SPACE), Number],
        vec![Op(COPY), Label, Label],
        vec![Label, Op(COPY), Label, Label],
    ];
    for op in UNARY_OPS {
        rules.push(vec![Op(op), Label]);
        rules.push(vec![Label, Op(op), Label]);
        rules.push(vec![Op(op), Label, Plus, Number]);
        rules.push(vec![Label, Op(op), Label, Plus, Number]);
    }
    rules
});

/// Exact sequence equality against one table row. The empty sequence is
/// vacuously valid; blank lines never reach this point.
pub fn validate(kinds: &[Kind]) -> bool {
    kinds.is_empty() || RULES.iter().any(|rule| rule.as_slice() == kinds)
}
