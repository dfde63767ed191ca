//! Instruction source adapters.

mod file_instruction_source;
mod in_memory_instruction_source;

pub use file_instruction_source::FileInstructionSource;
pub use in_memory_instruction_source::InMemoryInstructionSource;
