//! Consistency checks over the instruction table and label grids.
//!
//! All of these fail on the first violation; a table that doesn't pass is an authoring error.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::error::TableError;
use super::grid::{GridAxis, LabelCheck};
use super::table::{DxilInst, InstructionTable};

/// Check that `value` over `items` counts up by exactly one each step
pub fn verify_dense<T>(
    items: impl IntoIterator<Item = T>,
    value: impl Fn(&T) -> u32,
    name: impl Fn(&T) -> String,
) -> Result<(), TableError> {
    let mut previous: Option<u32> = None;
    for item in items {
        let v = value(&item);
        if let Some(prev) = previous {
            if prev.checked_add(1) != Some(v) {
                return Err(TableError::Density {
                    name: name(&item),
                    value: v,
                    previous: prev,
                });
            }
        }
        previous = Some(v);
    }
    Ok(())
}

/// Every operation in an opcode class must have the same operand types
pub fn verify_class_signatures<'a>(
    ops: impl IntoIterator<Item = &'a DxilInst>,
) -> Result<(), TableError> {
    let mut firsts: HashMap<&str, (&DxilInst, String)> = HashMap::new();
    for inst in ops {
        let class = match &inst.op {
            Some(op) => op.class.as_str(),
            None => continue,
        };
        let sig = inst.overload_signature();
        match firsts.get(class) {
            Some((first, first_sig)) if *first_sig != sig => {
                return Err(TableError::SignatureMismatch {
                    class: class.to_owned(),
                    first: first.name.clone(),
                    first_sig: first_sig.clone(),
                    other: inst.name.clone(),
                    other_sig: sig,
                })
            }
            Some(_) => {}
            None => {
                firsts.insert(class, (inst, sig));
            }
        }
    }
    Ok(())
}

/// DXIL operations need an overload string, and void can't be mixed with other types
pub fn verify_overload_types(inst: &DxilInst) -> Result<(), TableError> {
    if !inst.is_dxil_op() {
        return Ok(());
    }
    let reason = if inst.oload_types.is_empty() {
        "should not be empty - use void if n/a"
    } else if inst.oload_types != "v" && inst.oload_types.contains('v') {
        "void overload should be exclusive to other types"
    } else {
        return Ok(());
    };
    Err(TableError::OverloadTypes {
        name: inst.name.clone(),
        reason,
    })
}

/// Instruction names must be unique across the table
pub fn verify_unique_names(table: &InstructionTable) -> Result<(), TableError> {
    let mut seen = HashSet::new();
    for inst in table.instructions() {
        if !seen.insert(inst.name.as_str()) {
            return Err(TableError::DuplicateInstruction(inst.name.clone()));
        }
    }
    Ok(())
}

/// All derivatives are marked as requiring gradients
pub fn verify_derivatives(table: &InstructionTable) -> Result<(), TableError> {
    match table
        .instructions()
        .iter()
        .find(|i| i.is_deriv && !i.is_gradient)
    {
        Some(inst) => Err(TableError::DerivativeWithoutGradient(inst.name.clone())),
        None => Ok(()),
    }
}

/// Run every instruction table check
pub fn verify_instruction_table(table: &InstructionTable) -> Result<(), TableError> {
    verify_unique_names(table)?;
    verify_dense(
        table.dxil_ops(),
        |i| i.op.as_ref().map_or(0, |op| op.opid),
        |i| i.name.clone(),
    )?;
    for inst in table.instructions() {
        verify_dense(inst.ops.iter(), |o| o.pos, |_| inst.name.clone())?;
        verify_overload_types(inst)?;
    }
    verify_class_signatures(table.dxil_ops())?;
    verify_derivatives(table)?;
    debug!(instructions = table.len(), "instruction table verified");
    Ok(())
}

/// Check two label sequences are equal element for element
pub fn verify_labels(
    table: &str,
    found: &[&str],
    labels_name: &str,
    expected: &[&str],
) -> Result<(), TableError> {
    let len = found.len().max(expected.len());
    for index in 0..len {
        let (f, e) = (found.get(index), expected.get(index));
        if f != e {
            return Err(TableError::TableAlignment {
                table: table.to_owned(),
                labels: labels_name.to_owned(),
                index,
                expected: e.map(|s| s.to_string()),
                found: f.map(|s| s.to_string()),
            });
        }
    }
    Ok(())
}

pub fn verify_label_check(check: &LabelCheck) -> Result<(), TableError> {
    let found = match check.axis {
        GridAxis::Rows => check.grid.row_labels(),
        GridAxis::Columns => check.grid.column_labels(),
    };
    let expected: Vec<&str> = check.labels.iter().map(String::as_str).collect();
    verify_labels(&check.grid.name, &found, &check.labels_name, &expected)
}
