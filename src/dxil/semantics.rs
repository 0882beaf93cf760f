//! Signature points and semantic interpretation tables.
//!
//! The grids here are authored by hand and must stay aligned with the enumerations they describe.

use super::enums::DxilEnum;
use super::error::TableError;
use super::grid::{GridAxis, LabelCheck, LabelGrid};
use super::verify::verify_label_check;

const SIG_POINT_CSV: &str = "
    SigPoint, Related, ShaderKind, PackingKind,    SignatureKind
    VSIn,     Invalid, Vertex,     InputAssembler, Input
    VSOut,    Invalid, Vertex,     Vertex,         Output
    PCIn,     HSCPIn,  Hull,       None,           Invalid
    HSIn,     HSCPIn,  Hull,       None,           Invalid
    HSCPIn,   Invalid, Hull,       Vertex,         Input
    HSCPOut,  Invalid, Hull,       Vertex,         Output
    PCOut,    Invalid, Hull,       PatchConstant,  PatchConstant
    DSIn,     Invalid, Domain,     PatchConstant,  PatchConstant
    DSCPIn,   Invalid, Domain,     Vertex,         Input
    DSOut,    Invalid, Domain,     Vertex,         Output
    GSVIn,    Invalid, Geometry,   Vertex,         Input
    GSIn,     GSVIn,   Geometry,   None,           Invalid
    GSOut,    Invalid, Geometry,   Vertex,         Output
    PSIn,     Invalid, Pixel,      Vertex,         Input
    PSOut,    Invalid, Pixel,      Target,         Output
    CSIn,     Invalid, Compute,    None,           Invalid
    Invalid,  Invalid, Invalid,    Invalid,        Invalid
";

// SampleIndex, Coverage and InnerCoverage are loaded with instructions rather than from the signature
const SEMANTIC_INTERPRETATION_CSV: &str = "
    Semantic,VSIn,VSOut,PCIn,HSIn,HSCPIn,HSCPOut,PCOut,DSIn,DSCPIn,DSOut,GSVIn,GSIn,GSOut,PSIn,PSOut,CSIn
    Arbitrary,Arb,Arb,NA,NA,Arb,Arb,Arb,Arb,Arb,Arb,Arb,NA,Arb,Arb,NA,NA
    VertexID,SV,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA
    InstanceID,SV,Arb,NA,NA,Arb,Arb,NA,NA,Arb,Arb,Arb,NA,Arb,Arb,NA,NA
    Position,Arb,SV,NA,NA,SV,SV,Arb,Arb,SV,SV,SV,NA,SV,SV,NA,NA
    RenderTargetArrayIndex,Arb,SV,NA,NA,SV,SV,Arb,Arb,SV,SV,SV,NA,SV,SV,NA,NA
    ViewPortArrayIndex,Arb,SV,NA,NA,SV,SV,Arb,Arb,SV,SV,SV,NA,SV,SV,NA,NA
    ClipDistance,Arb,SV,NA,NA,SV,SV,Arb,Arb,SV,SV,SV,NA,SV,SV,NA,NA
    CullDistance,Arb,SV,NA,NA,SV,SV,Arb,Arb,SV,SV,SV,NA,SV,SV,NA,NA
    OutputControlPointID,NA,NA,NA,NotInSig,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA
    DomainLocation,NA,NA,NA,NA,NA,NA,NA,NotInSig,NA,NA,NA,NA,NA,NA,NA,NA
    PrimitiveID,NA,NA,NotInSig,NotInSig,NA,NA,NA,NotInSig,NA,NA,NA,Shadow,SGV,SGV,NA,NA
    GSInstanceID,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotInSig,NA,NA,NA,NA
    SampleIndex,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,Shadow _41,NA,NA
    IsFrontFace,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,SGV,SGV,NA,NA
    Coverage,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotInSig _50,NotPacked _41,NA
    InnerCoverage,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotInSig _50,NA,NA
    Target,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,Target,NA
    Depth,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotPacked,NA
    DepthLessEqual,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotPacked _50,NA
    DepthGreaterEqual,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotPacked _50,NA
    StencilRef,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotPacked _50,NA
    DispatchThreadID,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotInSig
    GroupID,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotInSig
    GroupIndex,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotInSig
    GroupThreadID,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NA,NotInSig
    TessFactor,NA,NA,NA,NA,NA,NA,TessFactor,TessFactor,NA,NA,NA,NA,NA,NA,NA,NA
    InsideTessFactor,NA,NA,NA,NA,NA,NA,TessFactor,TessFactor,NA,NA,NA,NA,NA,NA,NA,NA
";

pub fn semantic_kind() -> DxilEnum {
    let names = [
        "Arbitrary",
        "VertexID",
        "InstanceID",
        "Position",
        "RenderTargetArrayIndex",
        "ViewPortArrayIndex",
        "ClipDistance",
        "CullDistance",
        "OutputControlPointID",
        "DomainLocation",
        "PrimitiveID",
        "GSInstanceID",
        "SampleIndex",
        "IsFrontFace",
        "Coverage",
        "InnerCoverage",
        "Target",
        "Depth",
        "DepthLessEqual",
        "DepthGreaterEqual",
        "StencilRef",
        "DispatchThreadID",
        "GroupID",
        "GroupIndex",
        "GroupThreadID",
        "TessFactor",
        "InsideTessFactor",
        "Invalid",
    ];
    let mut e = DxilEnum::new(
        "SemanticKind",
        "Semantic kind; Arbitrary or specific system value.",
    );
    for (i, name) in names.iter().enumerate() {
        e.push(name, i as u32, "");
    }
    e
}

pub fn sig_point_kind() -> DxilEnum {
    DxilEnum::with_values(
        "SigPointKind",
        "Signature Point is more specific than shader stage or signature as it is unique in both stage and item dimensionality or frequency.",
        &[
            (0, "VSIn", "Ordinary Vertex Shader input from Input Assembler"),
            (1, "VSOut", "Ordinary Vertex Shader output that may feed Rasterizer"),
            (2, "PCIn", "Patch Constant function non-patch inputs"),
            (3, "HSIn", "Hull Shader function non-patch inputs"),
            (4, "HSCPIn", "Hull Shader patch inputs - Control Points"),
            (5, "HSCPOut", "Hull Shader function output - Control Point"),
            (6, "PCOut", "Patch Constant function output - Patch Constant data passed to Domain Shader"),
            (7, "DSIn", "Domain Shader regular input - Patch Constant data plus system values"),
            (8, "DSCPIn", "Domain Shader patch input - Control Points"),
            (9, "DSOut", "Domain Shader output - vertex data that may feed Rasterizer"),
            (10, "GSVIn", "Geometry Shader vertex input - qualified with primitive type"),
            (11, "GSIn", "Geometry Shader non-vertex inputs (system values)"),
            (12, "GSOut", "Geometry Shader output - vertex data that may feed Rasterizer"),
            (13, "PSIn", "Pixel Shader input"),
            (14, "PSOut", "Pixel Shader output"),
            (15, "CSIn", "Compute Shader input"),
            (16, "Invalid", ""),
        ],
    )
}

pub fn packing_kind() -> DxilEnum {
    DxilEnum::with_values(
        "PackingKind",
        "Kind of signature point",
        &[
            (0, "None", "No packing should be performed"),
            (1, "InputAssembler", "Vertex Shader input from Input Assembler"),
            (2, "Vertex", "Vertex that may feed the Rasterizer"),
            (3, "PatchConstant", "Patch constant signature"),
            (4, "Target", "Render Target (Pixel Shader Output)"),
            (5, "Invalid", ""),
        ],
    )
}

pub fn semantic_interpretation_kind() -> DxilEnum {
    DxilEnum::with_values(
        "SemanticInterpretationKind",
        "Defines how a semantic is interpreted at a particular SignaturePoint",
        &[
            (0, "NA", "Not Available"),
            (1, "SV", "Normal System Value"),
            (2, "SGV", "System Generated Value (sorted last)"),
            (3, "Arb", "Treated as Arbitrary"),
            (4, "NotInSig", "Not included in signature (intrinsic access)"),
            (5, "NotPacked", "Included in signature, but does not contribute to packing"),
            (6, "Target", "Special handling for SV_Target"),
            (7, "TessFactor", "Special handling for tessellation factors"),
            (8, "Shadow", "Shadow element must be added to a signature for compatibility"),
            (9, "Invalid", ""),
        ],
    )
}

/// The signature enumerations plus the grids relating them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticTables {
    pub enums: Vec<DxilEnum>,
    pub sig_point_table: LabelGrid,
    pub interpretation_table: LabelGrid,
}
impl SemanticTables {
    pub fn enumeration(&self, name: &str) -> Option<&DxilEnum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// The alignments these tables must satisfy:
    /// - SigPoint rows are every SigPointKind
    /// - SemanticInterpretation columns are every SigPointKind except Invalid
    /// - SemanticInterpretation rows are every SemanticKind except Invalid
    pub fn label_checks(&self) -> Vec<LabelCheck> {
        let sig_points = sig_point_kind();
        let semantics = semantic_kind();
        let sig_point_names = sig_points.value_names();
        let semantic_names = semantics.value_names();
        vec![
            LabelCheck::new(
                &self.sig_point_table,
                GridAxis::Rows,
                "SigPointKind",
                &sig_point_names,
            ),
            LabelCheck::new(
                &self.interpretation_table,
                GridAxis::Columns,
                "SigPointKind",
                &sig_point_names[..sig_point_names.len() - 1],
            ),
            LabelCheck::new(
                &self.interpretation_table,
                GridAxis::Rows,
                "SemanticKind",
                &semantic_names[..semantic_names.len() - 1],
            ),
        ]
    }
}

/// Build and verify the signature point tables
pub fn build_semantics() -> Result<SemanticTables, TableError> {
    let tables = SemanticTables {
        enums: vec![
            semantic_kind(),
            sig_point_kind(),
            packing_kind(),
            semantic_interpretation_kind(),
        ],
        sig_point_table: LabelGrid::parse("SigPointCSV", SIG_POINT_CSV)?,
        interpretation_table: LabelGrid::parse(
            "SemanticInterpretationCSV",
            SEMANTIC_INTERPRETATION_CSV,
        )?,
    };
    for check in tables.label_checks() {
        verify_label_check(&check)?;
    }
    Ok(tables)
}
