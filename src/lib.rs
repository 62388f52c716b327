pub mod alu;
pub mod disasm;
pub mod fields;
pub mod listing;
pub mod rom;
