use intrinsic_schema::dxil::{build_semantics, DxilParam, FnAttr, InstructionTable, TableError};
use intrinsic_schema::hlsl::{IntrinsicError, TemplateShape};
use intrinsic_schema::{SchemaBuilder, SchemaError};
use pretty_assertions::assert_eq;

const SAMPLE_DEFS: &str = include_str!("../assets/intrinsics.def");

fn sample_table() -> InstructionTable {
    let mut table = InstructionTable::new();
    for (opid, name) in ["FAbs", "Saturate"].iter().enumerate() {
        table.add_dxil_op(
            name,
            opid as u32,
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
    table
}

#[test]
fn test_sample_definitions_build() {
    let semantics = build_semantics().expect("semantic tables should verify");
    let schema = SchemaBuilder::new()
        .intrinsics(SAMPLE_DEFS)
        .instructions(sample_table())
        .label_checks(semantics.label_checks())
        .build()
        .expect("sample schema should build");

    let namespaces: Vec<&str> = schema.namespaces().map(|ns| ns.name()).collect();
    assert_eq!(namespaces, vec!["Intrinsics", "StreamMethods"]);
    assert_eq!(schema.namespace_count(), 2);
    assert_eq!(schema.intrinsic_count(), 15);
    assert_eq!(schema.instruction_count(), 2);

    let names: Vec<&str> = schema
        .namespace("Intrinsics")
        .expect("Intrinsics should exist")
        .intrinsics()
        .map(|r| r.name.as_str())
        .take(4)
        .collect();
    assert_eq!(names, vec!["abs", "all", "any", "clamp"]);

    let dot = schema.parameters("dot").expect("dot should be present");
    assert_eq!(dot.len(), 3);
    assert_eq!(dot[1].template_shape, TemplateShape::Vector);

    let mul = schema.lookup("mul").next().expect("mul should be present");
    assert_eq!(mul.return_param().template_shape, TemplateShape::Matrix);

    let countbits = schema.lookup("countbits").next().expect("countbits should be present");
    assert_eq!(countbits.overload_param, Some(1));

    assert!(schema.instructions().get("Saturate").is_some());
    assert_eq!(schema.intrinsics().records().len(), 15);
}

#[test]
fn test_intrinsic_texts_concatenate() {
    let schema = SchemaBuilder::new()
        .intrinsics("namespace A {\nvoid [[]] One();\n} namespace")
        .intrinsics("namespace B {\nvoid [[]] Two();\n} namespace\n")
        .build()
        .expect("schema should build");
    let namespaces: Vec<&str> = schema.namespaces().map(|ns| ns.name()).collect();
    assert_eq!(namespaces, vec!["A", "B"]);
    assert_eq!(schema.instruction_count(), 0);
}

#[test]
fn test_definition_errors_abort_the_build() {
    let err = SchemaBuilder::new()
        .intrinsics("namespace Intrinsics {\nvoid [[]] Foo(in $type2 a, in float b);\n} namespace")
        .build()
        .expect_err("forward reference should be rejected");
    match err {
        SchemaError::Intrinsics(ctx) => {
            assert_eq!(ctx.line_no, 2);
            assert_eq!(ctx.err, IntrinsicError::ForwardReference("a".to_owned()));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_table_errors_abort_the_build() {
    let mut table = sample_table();
    table.add_dxil_op_reserved("Reserved3", 3);
    let err = SchemaBuilder::new()
        .intrinsics(SAMPLE_DEFS)
        .instructions(table)
        .build()
        .expect_err("opcode gap should be rejected");
    assert_eq!(
        err,
        SchemaError::Table(TableError::Density {
            name: "Reserved3".to_owned(),
            value: 3,
            previous: 1,
        })
    );
}
