//! The DXIL instruction table and the signature tables that accompany it.
//!
//! Everything here is checked by [verify] before it is handed out, so generated code
//! can rely on dense opcodes and consistent class signatures.

pub mod enums;
pub mod error;
pub mod grid;
pub mod semantics;
pub mod table;
pub mod verify;

pub use enums::{DxilEnum, DxilEnumValue};
pub use error::TableError;
pub use grid::{GridAxis, LabelCheck, LabelGrid};
pub use semantics::{build_semantics, SemanticTables};
pub use table::{DxilInst, DxilParam, FnAttr, InstKind, InstructionTable};
