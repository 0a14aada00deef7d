pub mod op;
pub mod syntax;

/// Number of cells in the machine's address space.
pub const MEM_SIZE: usize = 216;
