use num_enum::IntoPrimitive;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The SAM opcode set. Discriminants are the numeric codes written into
/// the address image; SPACE and CONST never emit their own code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum OpKind {
    ADD = 1,
    SUB = 2,
    MULT = 3,
    DIV = 4,
    JMP = 5,
    JMPN = 6,
    JMPP = 7,
    JMPZ = 8,
    COPY = 9,
    LOAD = 10,
    STORE = 11,
    INPUT = 12,
    OUTPUT = 13,
    STOP = 14,
    SPACE = 15,
    CONST = 16,
}

impl OpKind {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    /// Numeric code emitted into the address image.
    pub fn code(self) -> u8 {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test() {
        assert_eq!(OpKind::parse("add").unwrap(), OpKind::ADD);
        assert_eq!(OpKind::parse("STOP").unwrap(), OpKind::STOP);
        assert!(OpKind::parse("hoge").is_err());

        assert_eq!(OpKind::ADD.code(), 1);
        assert_eq!(OpKind::STOP.code(), 14);
        assert_eq!(OpKind::CONST.code(), 16);
        assert_eq!(OpKind::JMPZ.to_string(), "JMPZ");
    }
}
