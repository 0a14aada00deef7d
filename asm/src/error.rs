use color_print::cprintln;
use thiserror::Error;

/// Unified error type for both toolchain stages. The first error aborts
/// the whole run; callers must discard any output already written.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Macro definition must use `NAME: MACRO [arg[, arg]]`")]
    MalformedMacroHeader { line: usize },

    #[error("More than {} macros defined", crate::macros::MAX_MACROS)]
    TooManyMacros { line: usize },

    #[error("Macro `{name}` defined with more than {} arguments", crate::macros::MAX_FORMALS)]
    TooManyMacroArgs { name: String, line: usize },

    #[error("Macro `{name}` is already defined")]
    DuplicateMacro { name: String, line: usize },

    #[error("Expansion of macro `{name}` exceeded depth {}", crate::macros::MAX_DEPTH)]
    MacroRecursionLimit { name: String },

    #[error("Invalid token `{token}`")]
    Lexical { token: String, line: usize },

    #[error("Invalid statement: `{text}`")]
    Syntax { text: String, line: usize },

    #[error("Re-defined label: `{label}`")]
    DuplicateLabel { label: String, line: usize },

    #[error("Undefined label: `{label}`")]
    UndefinedLabel { label: String },

    #[error("Address space exhausted ({} cells)", arch::MEM_SIZE)]
    AddressSpaceExhausted { line: usize },

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// 1-based source line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MalformedMacroHeader { line }
            | Error::TooManyMacros { line }
            | Error::TooManyMacroArgs { line, .. }
            | Error::DuplicateMacro { line, .. }
            | Error::Lexical { line, .. }
            | Error::Syntax { line, .. }
            | Error::DuplicateLabel { line, .. }
            | Error::AddressSpaceExhausted { line } => Some(*line),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and
    /// line content.
    pub fn diag(&self, path: &str, lines: &[String]) {
        cprintln!("<red,bold>error</>: {}", self);

        if let Some(line_num) = self.line() {
            let content = lines
                .get(line_num - 1)
                .map(|s| s.as_str())
                .unwrap_or("");

            cprintln!("     <blue>--></> <underline>{}:{}</>", path, line_num);
            cprintln!("      <blue>|</>");
            cprintln!(" <blue>{:>4} |</> {}", line_num, content);
            cprintln!("      <blue>|</>");
        }
    }
}
