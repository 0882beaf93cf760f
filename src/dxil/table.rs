//! The instruction table: LLVM instructions plus DXIL operations, which are calls
//! to built-in functions identified by an opcode.
//!
//! Operand types are short tokens: `$o` is the overload type, `$r` a resource,
//! `i32`/`u8`/`f` etc. are fixed types and `v` is void.
//! Overload types are strings over (v)oid, (h)alf, (f)loat, (d)ouble, (1)-bit, (8)-bit, (w)ord, (i)nt, (l)ong.

use std::collections::{BTreeMap, HashMap};

use super::enums::DxilEnum;
use super::error::TableError;

/// LLVM id of the call instruction all DXIL operations lower to
pub const CALL_LLVM_ID: u32 = 49;
pub const CALL_LLVM_NAME: &str = "CallInst";
pub const RESERVED_CLASS: &str = "Reserved";
pub const FULLY_QUALIFIED_NAME_PREFIX: &str = "hlsl::OP::OpCode";
/// Shader model letters: compute, domain, geometry, hull, pixel, vertex
pub const SHADER_MODEL_LETTERS: &str = "cdghpv";
/// Applies to every shader model
pub const ALL_SHADER_MODELS: &str = "*";

/// One operand (or the return value, at position 0)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxilParam {
    pub pos: u32,
    pub llvm_type: String,
    pub name: String,
    pub doc: String,
    /// Must be a constant in the IR
    pub is_const: bool,
}
impl DxilParam {
    pub fn new(pos: u32, llvm_type: &str, name: &str, doc: &str) -> Self {
        Self {
            pos,
            llvm_type: llvm_type.to_owned(),
            name: name.to_owned(),
            doc: doc.to_owned(),
            is_const: false,
        }
    }

    pub fn constant(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// The opcode operand every DXIL operation takes at position 1
    pub fn opcode() -> Self {
        Self::new(1, "i32", "opcode", "DXIL opcode")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstKind {
    Terminator,
    Binary,
    Memory,
    Cast,
    Other,
}

/// Memory behaviour of a DXIL operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FnAttr {
    None,
    /// Doesn't access memory
    ReadNone,
    /// Only reads memory
    ReadOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxilOpInfo {
    pub opid: u32,
    /// Operations in the same class share a function signature
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxilInst {
    pub name: String,
    pub doc: String,
    pub kind: InstKind,
    pub llvm_id: u32,
    pub llvm_name: String,
    pub op: Option<DxilOpInfo>,
    pub oload_types: String,
    pub fn_attr: FnAttr,
    pub category: String,
    /// Long-form remarks, beyond the one-line doc
    pub remarks: String,
    pub ops: Vec<DxilParam>,
    pub is_allowed: bool,
    /// Some kind of derivative
    pub is_deriv: bool,
    /// Requires a gradient calculation
    pub is_gradient: bool,
    /// Requires in-wave, cross-lane functionality
    pub is_wave: bool,
    /// [ALL_SHADER_MODELS] or letters from [SHADER_MODEL_LETTERS]
    pub shader_models: String,
}
impl DxilInst {
    pub fn is_dxil_op(&self) -> bool {
        self.op.is_some()
    }

    pub fn is_reserved(&self) -> bool {
        matches!(&self.op, Some(op) if op.class == RESERVED_CLASS)
    }

    pub fn fully_qualified_name(&self) -> String {
        format!("{}::{}", FULLY_QUALIFIED_NAME_PREFIX, self.name)
    }

    /// Concatenated operand type tokens, used to check that a class agrees on its signature
    pub fn overload_signature(&self) -> String {
        self.ops.iter().map(|o| o.llvm_type.as_str()).collect()
    }
}

/// All instructions, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionTable {
    instrs: Vec<DxilInst>,
    name_idx: HashMap<String, usize>,
}
impl InstructionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookups by name find the first instruction pushed with it; duplicates are left for [super::verify] to report
    fn push(&mut self, inst: DxilInst) {
        self.name_idx
            .entry(inst.name.clone())
            .or_insert(self.instrs.len());
        self.instrs.push(inst);
    }

    pub fn add_llvm_instr(
        &mut self,
        kind: InstKind,
        llvm_id: u32,
        name: &str,
        llvm_name: &str,
        doc: &str,
        oload_types: &str,
        ops: Vec<DxilParam>,
    ) {
        self.push(DxilInst {
            name: name.to_owned(),
            doc: doc.to_owned(),
            kind,
            llvm_id,
            llvm_name: llvm_name.to_owned(),
            op: None,
            oload_types: oload_types.to_owned(),
            fn_attr: FnAttr::None,
            category: String::new(),
            remarks: String::new(),
            ops,
            is_allowed: true,
            is_deriv: false,
            is_gradient: false,
            is_wave: false,
            shader_models: ALL_SHADER_MODELS.to_owned(),
        });
    }

    /// Add a DXIL operation. `ops` holds the return value and the operands after the opcode,
    /// the opcode operand is inserted at position 1.
    pub fn add_dxil_op(
        &mut self,
        name: &str,
        opid: u32,
        class: &str,
        doc: &str,
        oload_types: &str,
        fn_attr: FnAttr,
        mut ops: Vec<DxilParam>,
    ) {
        ops.insert(1.min(ops.len()), DxilParam::opcode());
        self.push(DxilInst {
            name: name.to_owned(),
            doc: doc.to_owned(),
            kind: InstKind::Other,
            llvm_id: CALL_LLVM_ID,
            llvm_name: CALL_LLVM_NAME.to_owned(),
            op: Some(DxilOpInfo {
                opid,
                class: class.to_owned(),
            }),
            oload_types: oload_types.to_owned(),
            fn_attr,
            category: String::new(),
            remarks: String::new(),
            ops,
            is_allowed: true,
            is_deriv: false,
            is_gradient: false,
            is_wave: false,
            shader_models: ALL_SHADER_MODELS.to_owned(),
        });
    }

    /// Hold an opcode without defining an operation for it
    pub fn add_dxil_op_reserved(&mut self, name: &str, opid: u32) {
        self.add_dxil_op(
            name,
            opid,
            RESERVED_CLASS,
            "reserved",
            "v",
            FnAttr::None,
            vec![DxilParam::new(0, "v", "", "reserved")],
        );
    }

    pub fn get(&self, name: &str) -> Option<&DxilInst> {
        self.name_idx.get(name).map(|&i| &self.instrs[i])
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut DxilInst, TableError> {
        match self.name_idx.get(name) {
            Some(&i) => Ok(&mut self.instrs[i]),
            None => Err(TableError::UnknownInstruction(name.to_owned())),
        }
    }

    pub fn get_by_llvm_name(&self, llvm_name: &str) -> Option<&DxilInst> {
        self.instrs.iter().find(|i| i.llvm_name == llvm_name)
    }

    pub fn instructions(&self) -> &[DxilInst] {
        &self.instrs
    }

    pub fn dxil_ops(&self) -> impl Iterator<Item = &DxilInst> {
        self.instrs.iter().filter(|i| i.is_dxil_op())
    }

    pub fn set_category(&mut self, names: &[&str], category: &str) -> Result<(), TableError> {
        for name in names {
            self.get_mut(name)?.category = category.to_owned();
        }
        Ok(())
    }

    pub fn mark_disallowed(&mut self, names: &[&str]) -> Result<(), TableError> {
        for name in names {
            self.get_mut(name)?.is_allowed = false;
        }
        Ok(())
    }

    pub fn mark_gradient(&mut self, names: &[&str]) -> Result<(), TableError> {
        for name in names {
            self.get_mut(name)?.is_gradient = true;
        }
        Ok(())
    }

    pub fn mark_derivative(&mut self, names: &[&str]) -> Result<(), TableError> {
        for name in names {
            self.get_mut(name)?.is_deriv = true;
        }
        Ok(())
    }

    pub fn mark_wave(&mut self, names: &[&str]) -> Result<(), TableError> {
        for name in names {
            self.get_mut(name)?.is_wave = true;
        }
        Ok(())
    }

    /// Restrict instructions to the shader models given as letters, e.g. `"dh"` for domain and hull
    pub fn set_shader_models(&mut self, names: &[&str], models: &str) -> Result<(), TableError> {
        let valid = models == ALL_SHADER_MODELS
            || (!models.is_empty() && models.chars().all(|c| SHADER_MODEL_LETTERS.contains(c)));
        if !valid {
            return Err(TableError::InvalidShaderModels(models.to_owned()));
        }
        for name in names {
            self.get_mut(name)?.shader_models = models.to_owned();
        }
        Ok(())
    }

    pub fn set_remarks(&mut self, name: &str, remarks: &str) -> Result<(), TableError> {
        self.get_mut(name)?.remarks = remarks.trim().to_owned();
        Ok(())
    }

    /// Build the `OpCode` enumeration from the DXIL operations,
    /// and the internal `OpCodeClass` enumeration of their classes.
    pub fn opcode_enums(&self) -> (DxilEnum, DxilEnum) {
        let mut opcodes = DxilEnum::new("OpCode", "Enumeration for operations specified by DXIL");
        let mut classes = BTreeMap::new();
        classes.insert("LlvmInst".to_owned(), "LLVM Instructions".to_owned());
        for i in self.instrs.iter() {
            if let Some(op) = &i.op {
                opcodes.push(&i.name, op.opid, &i.doc);
                if let Some(v) = opcodes.values.last_mut() {
                    v.category = Some(i.category.clone());
                }
                classes.insert(op.class.clone(), i.category.clone());
            }
        }

        let mut opcode_classes = DxilEnum::new(
            "OpCodeClass",
            "Groups for DXIL operations with equivalent function templates",
        );
        opcode_classes.is_internal = true;
        for (i, (class, category)) in classes.into_iter().enumerate() {
            opcode_classes.push(&class, i as u32, "");
            if let Some(v) = opcode_classes.values.last_mut() {
                v.category = Some(category);
            }
        }
        (opcodes, opcode_classes)
    }

    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }
}
