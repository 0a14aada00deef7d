mod assembler;
mod dump;
mod error;
mod image;
mod label;
mod macros;
mod normalize;
mod parser;
mod token;

pub use assembler::Assembler;
pub use dump::{print_final, print_pending, print_raw, print_symbols};
pub use error::Error;
pub use image::Image;
pub use label::{Pendings, Slot, Symbols};
pub use macros::{pre_path, Macro, Preprocessor};
pub use normalize::{normalize, tokenize};
pub use parser::{Item, Line, Operand};
pub use token::Token;
