use crate::error::Error;
use crate::normalize::{normalize, tokenize};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

pub const MAX_MACROS: usize = 2;
pub const MAX_FORMALS: usize = 2;
pub const MAX_DEPTH: usize = 20;

/// A parsed macro definition. Immutable once the body has been read.
#[derive(Debug, Clone)]
pub struct Macro {
    pub name: String,
    pub formals: Vec<String>,
    pub body: Vec<String>,
}

/// Stage one of the toolchain: captures `NAME: MACRO` definitions and
/// expands calls into the flat instruction stream fed to the assembler.
/// Expansion is a pure text rewrite; it knows nothing of assembly
/// semantics.
#[derive(Debug, Default)]
pub struct Preprocessor {
    macros: IndexMap<String, Macro>,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            macros: IndexMap::new(),
        }
    }

    pub fn macros(&self) -> impl Iterator<Item = &Macro> {
        self.macros.values()
    }

    /// Run the whole source through definition capture and call expansion.
    /// Returns the expanded, normalized, comment-stripped program, one
    /// instruction per line, blank lines dropped.
    pub fn process(&mut self, lines: &[String]) -> Result<Vec<String>, Error> {
        let mut out = Vec::new();
        let mut idx = 0;
        while idx < lines.len() {
            let header_no = idx + 1;
            let line = normalize(&lines[idx]);
            idx += 1;
            if line.is_empty() {
                continue;
            }
            if tokenize(&line).contains(&"MACRO") {
                idx = self.define(&line, header_no, lines, idx)?;
                continue;
            }
            match self.find_call(&line) {
                Some((mac, actuals)) => self.expand(mac, &actuals, 0, &mut out)?,
                None => out.push(line),
            }
        }
        Ok(out)
    }

    /// Capture one definition. `start` indexes the first body line; returns
    /// the index of the line after `ENDMACRO`. Both limits are enforced
    /// before any body line is consumed.
    fn define(
        &mut self,
        header: &str,
        header_no: usize,
        lines: &[String],
        start: usize,
    ) -> Result<usize, Error> {
        if self.macros.len() >= MAX_MACROS {
            return Err(Error::TooManyMacros { line: header_no });
        }

        let (name, rest) = header
            .split_once(':')
            .ok_or(Error::MalformedMacroHeader { line: header_no })?;
        let name = name.trim().to_string();
        // `MACRO` must follow the colon as a whole word
        let args_part = match rest.trim_start().strip_prefix("MACRO") {
            Some(t) if t.is_empty() || t.starts_with(' ') => t.trim(),
            _ => return Err(Error::MalformedMacroHeader { line: header_no }),
        };
        if name.is_empty() {
            return Err(Error::MalformedMacroHeader { line: header_no });
        }

        let formals = split_args(args_part);
        if formals.len() > MAX_FORMALS {
            return Err(Error::TooManyMacroArgs {
                name,
                line: header_no,
            });
        }
        if self.macros.contains_key(&name) {
            return Err(Error::DuplicateMacro {
                name,
                line: header_no,
            });
        }

        let mut body = Vec::new();
        let mut idx = start;
        while idx < lines.len() {
            let line = normalize(&lines[idx]);
            idx += 1;
            if line.is_empty() {
                continue;
            }
            if line == "ENDMACRO" {
                break;
            }
            body.push(line);
        }

        self.macros.insert(
            name.clone(),
            Macro {
                name,
                formals,
                body,
            },
        );
        Ok(idx)
    }

    /// A line calls a macro if it starts with the macro's name followed by
    /// end-of-line or whitespace. First definition wins.
    fn find_call(&self, line: &str) -> Option<(&Macro, Vec<String>)> {
        for mac in self.macros.values() {
            let rest = match line.strip_prefix(mac.name.as_str()) {
                Some(rest) => rest,
                None => continue,
            };
            if rest.is_empty() {
                return Some((mac, Vec::new()));
            }
            if rest.starts_with(' ') || rest.starts_with('\t') {
                return Some((mac, split_args(rest)));
            }
        }
        None
    }

    /// Expand one call: substitute formals, re-normalize, recurse into
    /// nested calls. Depth bounds both direct and indirect self-recursion.
    fn expand(
        &self,
        mac: &Macro,
        actuals: &[String],
        depth: usize,
        out: &mut Vec<String>,
    ) -> Result<(), Error> {
        if depth > MAX_DEPTH {
            return Err(Error::MacroRecursionLimit {
                name: mac.name.clone(),
            });
        }
        for body_line in &mac.body {
            let line = normalize(&substitute(body_line, &mac.formals, actuals));
            if line.is_empty() {
                continue;
            }
            match self.find_call(&line) {
                Some((inner, inner_args)) => self.expand(inner, &inner_args, depth + 1, out)?,
                None => out.push(line),
            }
        }
        Ok(())
    }
}

/// Replace formals by actuals, matching only whole identifier tokens
/// (maximal alnum/underscore runs). Never rewrites partial matches inside
/// longer identifiers. Missing actuals leave the formal in place.
fn substitute(line: &str, formals: &[String], actuals: &[String]) -> String {
    if formals.is_empty() {
        return line.to_string();
    }
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len() + 16);
    let mut i = 0;
    while i < chars.len() {
        if is_ident_char(chars[i]) {
            let start = i;
            while i < chars.len() && is_ident_char(chars[i]) {
                i += 1;
            }
            let token: String = chars[start..i].iter().collect();
            match formals
                .iter()
                .position(|f| *f == token)
                .and_then(|k| actuals.get(k))
            {
                Some(actual) => out.push_str(actual),
                None => out.push_str(&token),
            }
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn split_args(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sibling output path for the expanded program.
pub fn pre_path(input: &Path) -> PathBuf {
    input.with_extension("pre")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(str::to_string).collect()
    }

    fn process(src: &str) -> Result<Vec<String>, Error> {
        Preprocessor::new().process(&lines(src))
    }

    #[test]
    fn passes_plain_lines_through_normalized() {
        let out = process("  load   x ; c\n\nstop").unwrap();
        assert_eq!(out, vec!["LOAD X", "STOP"]);
    }

    #[test]
    fn expands_with_substitution() {
        let src = "\
swap: macro a, b
copy a, b ; body comment
endmacro
SWAP X, Y
STOP";
        let out = process(src).unwrap();
        assert_eq!(out, vec!["COPY X, Y", "STOP"]);
    }

    #[test]
    fn substitutes_whole_tokens_only() {
        let out = substitute("ADD A AB B_A A", &["A".into()], &["X".into()]);
        assert_eq!(out, "ADD X AB B_A X");
    }

    #[test]
    fn missing_actual_keeps_formal() {
        let out = substitute("COPY A, B", &["A".into(), "B".into()], &["X".into()]);
        assert_eq!(out, "COPY X, B");
    }

    #[test]
    fn nested_call_expands() {
        let src = "\
ONE: MACRO P
ADD P
ENDMACRO
TWO: MACRO Q
ONE Q
STOP
ENDMACRO
TWO N";
        let out = process(src).unwrap();
        assert_eq!(out, vec!["ADD N", "STOP"]);
    }

    #[test]
    fn third_macro_rejected_before_body() {
        let src = "\
M1: MACRO
STOP
ENDMACRO
M2: MACRO
STOP
ENDMACRO
M3: MACRO
STOP
ENDMACRO";
        let err = process(src).unwrap_err();
        assert!(matches!(err, Error::TooManyMacros { line: 7 }));
    }

    #[test]
    fn three_formals_rejected() {
        let err = process("M: MACRO A, B, C\nENDMACRO").unwrap_err();
        assert!(matches!(err, Error::TooManyMacroArgs { line: 1, .. }));
    }

    #[test]
    fn redefinition_rejected() {
        let src = "\
M: MACRO
STOP
ENDMACRO
M: MACRO
STOP
ENDMACRO";
        let err = process(src).unwrap_err();
        assert!(matches!(err, Error::DuplicateMacro { line: 4, .. }));
    }

    #[test]
    fn malformed_headers_rejected() {
        assert!(matches!(
            process("MACRO").unwrap_err(),
            Error::MalformedMacroHeader { line: 1 }
        ));
        assert!(matches!(
            process("FOO MACRO").unwrap_err(),
            Error::MalformedMacroHeader { line: 1 }
        ));
        assert!(matches!(
            process(": MACRO").unwrap_err(),
            Error::MalformedMacroHeader { line: 1 }
        ));
    }

    #[test]
    fn recursion_limit() {
        let src = "\
LOOP: MACRO
LOOP
ENDMACRO
LOOP";
        let err = process(src).unwrap_err();
        assert!(matches!(err, Error::MacroRecursionLimit { .. }));
    }

    #[test]
    fn indirect_recursion_limit() {
        let src = "\
PING: MACRO
PONG
ENDMACRO
PONG: MACRO
PING
ENDMACRO
PING";
        let err = process(src).unwrap_err();
        assert!(matches!(err, Error::MacroRecursionLimit { .. }));
    }

    #[test]
    fn expansion_is_idempotent_without_calls() {
        let src = "\
M: MACRO A
ADD A
SUB A
ENDMACRO
M X";
        let once = process(src).unwrap();
        let twice = Preprocessor::new().process(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn label_prefixed_line_is_not_a_call() {
        let src = "\
M: MACRO
STOP
ENDMACRO
M2: JMP M2";
        let out = process(src).unwrap();
        assert_eq!(out, vec!["M2: JMP M2"]);
    }

    #[test]
    fn pre_path_swaps_extension() {
        assert_eq!(pre_path(Path::new("prog.sam")), PathBuf::from("prog.pre"));
        assert_eq!(pre_path(Path::new("dir/prog.asm")), PathBuf::from("dir/prog.pre"));
    }
}
