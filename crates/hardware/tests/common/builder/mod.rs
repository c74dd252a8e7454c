/// Instruction builder.
pub mod instruction;
