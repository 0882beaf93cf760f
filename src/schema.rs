//! The combined, verified schema.
//!
//! Building is all-or-nothing: the first error from parsing or from any table check
//! is returned and no partial [Schema] is produced.

use thiserror::Error;
use tracing::info;

use crate::dxil::{
    verify::{verify_instruction_table, verify_label_check},
    InstructionTable, LabelCheck, TableError,
};
use crate::hlsl::{
    IntrinsicDb, IntrinsicErrorContext, IntrinsicRecord, NamespaceView, ParameterDescriptor,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("intrinsic definitions: {0}")]
    Intrinsics(#[from] IntrinsicErrorContext),
    #[error("table consistency: {0}")]
    Table(#[from] TableError),
}

#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    intrinsics: String,
    instructions: InstructionTable,
    label_checks: Vec<LabelCheck>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append intrinsic definition text. Calling this more than once concatenates the texts.
    pub fn intrinsics(mut self, text: &str) -> Self {
        if !self.intrinsics.is_empty() && !self.intrinsics.ends_with('\n') {
            self.intrinsics.push('\n');
        }
        self.intrinsics.push_str(text);
        self
    }

    pub fn instructions(mut self, table: InstructionTable) -> Self {
        self.instructions = table;
        self
    }

    pub fn label_check(mut self, check: LabelCheck) -> Self {
        self.label_checks.push(check);
        self
    }

    pub fn label_checks(mut self, checks: impl IntoIterator<Item = LabelCheck>) -> Self {
        self.label_checks.extend(checks);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let intrinsics = IntrinsicDb::parse(&self.intrinsics)?;
        verify_instruction_table(&self.instructions)?;
        for check in self.label_checks.iter() {
            verify_label_check(check)?;
        }
        info!(
            intrinsics = intrinsics.len(),
            instructions = self.instructions.len(),
            label_checks = self.label_checks.len(),
            "schema built"
        );
        Ok(Schema {
            intrinsics,
            instructions: self.instructions,
        })
    }
}

/// Read-only view over verified intrinsics and instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    intrinsics: IntrinsicDb,
    instructions: InstructionTable,
}
impl Schema {
    /// Namespaces in ordinal order
    pub fn namespaces(&self) -> impl Iterator<Item = NamespaceView<'_>> {
        self.intrinsics.namespaces()
    }

    pub fn namespace(&self, name: &str) -> Option<NamespaceView<'_>> {
        self.intrinsics.namespace(name)
    }

    pub fn lookup<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a IntrinsicRecord> + 'a {
        self.intrinsics.lookup(name)
    }

    pub fn parameters(&self, name: &str) -> Option<&[ParameterDescriptor]> {
        self.intrinsics.parameters(name)
    }

    pub fn intrinsics(&self) -> &IntrinsicDb {
        &self.intrinsics
    }

    pub fn instructions(&self) -> &InstructionTable {
        &self.instructions
    }

    pub fn intrinsic_count(&self) -> usize {
        self.intrinsics.len()
    }

    pub fn namespace_count(&self) -> usize {
        self.intrinsics.namespaces().count()
    }

    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }
}
