use intrinsic_schema::dxil::{
    build_semantics,
    verify::{verify_dense, verify_instruction_table, verify_label_check},
    DxilParam, FnAttr, GridAxis, InstKind, InstructionTable, LabelCheck, LabelGrid, TableError,
};
use pretty_assertions::assert_eq;

fn unary(table: &mut InstructionTable, name: &str, opid: u32) {
    table.add_dxil_op(
        name,
        opid,
        "Unary",
        "returns a unary function of the input",
        "hf",
        FnAttr::ReadNone,
        vec![
            DxilParam::new(0, "$o", "", "operation result"),
            DxilParam::new(2, "$o", "value", "input value"),
        ],
    );
}

#[test]
fn test_dense_opcodes_pass() {
    let mut table = InstructionTable::new();
    table.add_llvm_instr(
        InstKind::Terminator,
        1,
        "Ret",
        "ReturnInst",
        "returns a value (possibly void), from a function.",
        "",
        vec![],
    );
    unary(&mut table, "FAbs", 0);
    unary(&mut table, "Saturate", 1);
    table.add_dxil_op_reserved("Reserved0", 2);
    assert_eq!(verify_instruction_table(&table), Ok(()));

    let fabs = table.get("FAbs").expect("FAbs should be present");
    assert_eq!(fabs.overload_signature(), "$oi32$o");
    assert_eq!(fabs.ops[1].name, "opcode");
    assert!(table.get("Reserved0").map_or(false, |i| i.is_reserved()));
    assert_eq!(
        table.get_by_llvm_name("ReturnInst").map(|i| i.name.as_str()),
        Some("Ret")
    );
    assert_eq!(table.dxil_ops().count(), 3);
}

#[test]
fn test_opcode_gap_is_a_density_error() {
    let mut table = InstructionTable::new();
    unary(&mut table, "Op0", 0);
    unary(&mut table, "Op1", 1);
    unary(&mut table, "Op2", 2);
    unary(&mut table, "Op4", 4);
    assert_eq!(
        verify_instruction_table(&table),
        Err(TableError::Density {
            name: "Op4".to_owned(),
            value: 4,
            previous: 2,
        })
    );
}

#[test]
fn test_dense_sequences() {
    assert_eq!(verify_dense([3u32, 4, 5], |v| *v, |v| v.to_string()), Ok(()));
    assert_eq!(
        verify_dense([0u32, 1, 1], |v| *v, |v| v.to_string()),
        Err(TableError::Density {
            name: "1".to_owned(),
            value: 1,
            previous: 1,
        })
    );
}

#[test]
fn test_operand_positions_must_be_dense() {
    let mut table = InstructionTable::new();
    table.add_dxil_op(
        "Gappy",
        0,
        "Gappy",
        "",
        "f",
        FnAttr::None,
        vec![
            DxilParam::new(0, "$o", "", ""),
            DxilParam::new(2, "$o", "a", ""),
            DxilParam::new(4, "$o", "b", ""),
        ],
    );
    assert_eq!(
        verify_instruction_table(&table),
        Err(TableError::Density {
            name: "Gappy".to_owned(),
            value: 4,
            previous: 2,
        })
    );
}

#[test]
fn test_class_signature_mismatch_names_both() {
    let mut table = InstructionTable::new();
    unary(&mut table, "Cos", 0);
    table.add_dxil_op(
        "Bfrev",
        1,
        "Unary",
        "",
        "hf",
        FnAttr::ReadNone,
        vec![
            DxilParam::new(0, "$o", "", ""),
            DxilParam::new(2, "$o", "value", ""),
            DxilParam::new(3, "i32", "extra", "").constant(),
        ],
    );
    assert_eq!(
        verify_instruction_table(&table),
        Err(TableError::SignatureMismatch {
            class: "Unary".to_owned(),
            first: "Cos".to_owned(),
            first_sig: "$oi32$o".to_owned(),
            other: "Bfrev".to_owned(),
            other_sig: "$oi32$oi32".to_owned(),
        })
    );
}

#[test]
fn test_overload_types() {
    let mut table = InstructionTable::new();
    table.add_dxil_op(
        "NoOverloads",
        0,
        "NoOverloads",
        "",
        "",
        FnAttr::None,
        vec![DxilParam::new(0, "v", "", "")],
    );
    assert!(matches!(
        verify_instruction_table(&table),
        Err(TableError::OverloadTypes { name, .. }) if name == "NoOverloads"
    ));

    let mut table = InstructionTable::new();
    table.add_dxil_op(
        "MixedVoid",
        0,
        "MixedVoid",
        "",
        "hv",
        FnAttr::None,
        vec![DxilParam::new(0, "v", "", "")],
    );
    assert_eq!(
        verify_instruction_table(&table),
        Err(TableError::OverloadTypes {
            name: "MixedVoid".to_owned(),
            reason: "void overload should be exclusive to other types",
        })
    );
}

#[test]
fn test_categories_and_enums() {
    let mut table = InstructionTable::new();
    unary(&mut table, "FAbs", 0);
    unary(&mut table, "Saturate", 1);
    table
        .set_category(&["FAbs", "Saturate"], "Unary float")
        .expect("instructions exist");
    table.mark_disallowed(&["Saturate"]).expect("instruction exists");
    assert_eq!(
        table.set_category(&["Missing"], "Nothing"),
        Err(TableError::UnknownInstruction("Missing".to_owned()))
    );
    assert!(table.get("FAbs").map_or(false, |i| i.is_allowed));
    assert!(!table.get("Saturate").map_or(true, |i| i.is_allowed));

    let (opcodes, classes) = table.opcode_enums();
    assert_eq!(opcodes.value_names(), vec!["FAbs", "Saturate"]);
    assert_eq!(
        opcodes.get("Saturate").and_then(|v| v.category.as_deref()),
        Some("Unary float")
    );
    assert!(classes.is_internal);
    assert_eq!(classes.value_names(), vec!["LlvmInst", "Unary"]);
}

#[test]
fn test_grids_must_be_rectangular() {
    assert_eq!(
        LabelGrid::parse("Grid", "Label, A, B\nx, 1, 2\ny, 3"),
        Err(TableError::NotRectangular {
            table: "Grid".to_owned(),
            row: 2,
            expected: 3,
            found: 2,
        })
    );
    assert_eq!(
        LabelGrid::parse("Empty", "\n  \n"),
        Err(TableError::EmptyTable("Empty".to_owned()))
    );

    let grid = LabelGrid::parse("Grid", "Label, A, B\nx, 1, 2\ny, 3, 4").expect("grid is valid");
    assert_eq!(grid.row_labels(), vec!["x", "y"]);
    assert_eq!(grid.column_labels(), vec!["A", "B"]);
    assert_eq!(grid.cell("y", "A"), Some("3"));
    assert_eq!(grid.cell("z", "A"), None);
}

#[test]
fn test_label_alignment() {
    let grid = LabelGrid::parse("Grid", "Label, A, B\nx, 1, 2\nz, 3, 4").expect("grid is valid");

    let check = LabelCheck::new(&grid, GridAxis::Columns, "Columns", &["A", "B"]);
    assert_eq!(verify_label_check(&check), Ok(()));

    let check = LabelCheck::new(&grid, GridAxis::Rows, "Kinds", &["x", "y"]);
    assert_eq!(
        verify_label_check(&check),
        Err(TableError::TableAlignment {
            table: "Grid".to_owned(),
            labels: "Kinds".to_owned(),
            index: 1,
            expected: Some("y".to_owned()),
            found: Some("z".to_owned()),
        })
    );

    let check = LabelCheck::new(&grid, GridAxis::Rows, "Kinds", &["x", "z", "w"]);
    assert_eq!(
        verify_label_check(&check),
        Err(TableError::TableAlignment {
            table: "Grid".to_owned(),
            labels: "Kinds".to_owned(),
            index: 2,
            expected: Some("w".to_owned()),
            found: None,
        })
    );
}

#[test]
fn test_semantic_tables_align() {
    let tables = build_semantics().expect("semantic tables should verify");

    let sig_points = tables
        .enumeration("SigPointKind")
        .expect("SigPointKind should exist");
    assert_eq!(sig_points.values.len(), 17);
    assert_eq!(sig_points.get("CSIn").map(|v| v.value), Some(15));

    let semantics = tables
        .enumeration("SemanticKind")
        .expect("SemanticKind should exist");
    assert_eq!(semantics.get("Invalid").map(|v| v.value), Some(27));

    assert_eq!(
        tables.interpretation_table.cell("Depth", "PSOut"),
        Some("NotPacked")
    );
    assert_eq!(
        tables.sig_point_table.cell("PSOut", "PackingKind"),
        Some("Target")
    );
    assert_eq!(tables.label_checks().len(), 3);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut table = InstructionTable::new();
    unary(&mut table, "Dup", 0);
    unary(&mut table, "Dup", 1);
    assert_eq!(
        verify_instruction_table(&table),
        Err(TableError::DuplicateInstruction("Dup".to_owned()))
    );
    // Lookups keep resolving to the first definition
    assert_eq!(
        table.get("Dup").and_then(|i| i.op.as_ref()).map(|op| op.opid),
        Some(0)
    );
}

fn derivative_table() -> InstructionTable {
    let mut table = InstructionTable::new();
    for (opid, name) in ["DerivCoarseX", "DerivCoarseY", "Sample"].iter().enumerate() {
        unary(&mut table, name, opid as u32);
    }
    table
}

#[test]
fn test_derivatives_require_gradients() {
    let mut table = derivative_table();
    table
        .mark_gradient(&["DerivCoarseX", "DerivCoarseY", "Sample"])
        .expect("instructions exist");
    table
        .mark_derivative(&["DerivCoarseX", "DerivCoarseY"])
        .expect("instructions exist");
    assert_eq!(verify_instruction_table(&table), Ok(()));
    assert!(table.get("Sample").map_or(false, |i| i.is_gradient && !i.is_deriv));

    let mut table = derivative_table();
    table.mark_gradient(&["DerivCoarseX"]).expect("instruction exists");
    table
        .mark_derivative(&["DerivCoarseX", "DerivCoarseY"])
        .expect("instructions exist");
    assert_eq!(
        verify_instruction_table(&table),
        Err(TableError::DerivativeWithoutGradient("DerivCoarseY".to_owned()))
    );
}

#[test]
fn test_instruction_attributes() {
    let mut table = derivative_table();
    let sample = table.get("Sample").expect("Sample should be present");
    assert_eq!(sample.shader_models, "*");
    assert_eq!(sample.fully_qualified_name(), "hlsl::OP::OpCode::Sample");
    assert!(!sample.is_wave);

    table.set_shader_models(&["Sample"], "p").expect("valid models");
    table.mark_wave(&["DerivCoarseX"]).expect("instruction exists");
    table
        .set_remarks("Sample", "  samples a texture with gradients ")
        .expect("instruction exists");
    assert_eq!(
        table.set_shader_models(&["Sample"], "px"),
        Err(TableError::InvalidShaderModels("px".to_owned()))
    );
    assert_eq!(
        table.mark_wave(&["Missing"]),
        Err(TableError::UnknownInstruction("Missing".to_owned()))
    );

    let sample = table.get("Sample").expect("Sample should be present");
    assert_eq!(sample.shader_models, "p");
    assert_eq!(sample.remarks, "samples a texture with gradients");
    assert!(table.get("DerivCoarseX").map_or(false, |i| i.is_wave));
}
