//! Catalogue of the attributes HLSL accepts on statements and functions, e.g. `[numthreads(8, 8, 1)]`.

use lazy_static::lazy_static;

/// What an attribute may be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeScope {
    Loop,
    Condition,
    Switch,
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeArgType {
    Int,
    String,
    /// A tessellation partitioning scheme name
    Scheme,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeArg {
    pub name: &'static str,
    pub arg_type: AttributeArgType,
    /// Maximum number of repeats for list-like arguments
    pub count: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HlslAttribute {
    pub title_name: &'static str,
    /// Lower-case spelling, as matched in source
    pub name: String,
    pub scope: AttributeScope,
    pub args: Vec<AttributeArg>,
    pub doc: &'static str,
}

fn attr(title_name: &'static str, scope: AttributeScope, doc: &'static str) -> HlslAttribute {
    attr_args(title_name, scope, doc, &[])
}

fn attr_args(
    title_name: &'static str,
    scope: AttributeScope,
    doc: &'static str,
    args: &[(&'static str, AttributeArgType)],
) -> HlslAttribute {
    HlslAttribute {
        title_name,
        name: title_name.to_lowercase(),
        scope,
        args: args
            .iter()
            .map(|&(name, arg_type)| AttributeArg {
                name,
                arg_type,
                count: None,
            })
            .collect(),
        doc,
    }
}

lazy_static! {
    pub static ref HLSL_ATTRIBUTES: Vec<HlslAttribute> = {
        use AttributeArgType::*;
        use AttributeScope::*;

        let mut clip_planes = attr_args("ClipPlanes", Function, "Optional list of clip planes", &[("ClipPlane", Int)]);
        clip_planes.args[0].count = Some(6);

        vec![
            attr("Allow_UAV_Condition", Loop, "Allows a compute shader loop termination condition to be based off of a UAV read. The loop must not contain synchronization intrinsics"),
            attr("Branch", Condition, "Evaluate only one side of the if statement depending on the given condition"),
            attr("Call", Switch, "The bodies of the individual cases in the switch will be moved into hardware subroutines and the switch will be a series of subroutine calls"),
            attr("EarlyDepthStencil", Function, "Forces depth-stencil testing before a shader executes"),
            attr("FastOpt", Loop, "Reduces the compile time but produces less aggressive optimizations"),
            attr("Flatten", Condition, "Evaluate both sides of the if statement and choose between the two resulting values"),
            attr("ForceCase", Switch, "Force a switch statement in the hardware"),
            attr("Loop", Loop, "Generate code that uses flow control to execute each iteration of the loop"),
            clip_planes,
            attr_args("Domain", Function, "Defines the patch type used in the HS", &[("DomainType", String)]),
            attr_args("Instance", Function, "Use this attribute to instance a geometry shader", &[("Count", Int)]),
            attr_args("MaxTessFactor", Function, "Indicates the maximum value that the hull shader would return for any tessellation factor.", &[("Count", Int)]),
            attr_args("MaxVertexCount", Function, "maxvertexcount doc", &[("Count", Int)]),
            attr_args("NumThreads", Function, "Defines the number of threads to be executed in a single thread group.", &[("x", Int), ("y", Int), ("z", Int)]),
            attr_args("OutputControlPoints", Function, "Defines the number of output control points per thread that will be created in the hull shader", &[("Count", Int)]),
            attr_args("OutputTopology", Function, "Defines the output primitive type for the tessellator", &[("Topology", String)]),
            attr_args("Partitioning", Function, "Defines the tesselation scheme to be used in the hull shader", &[("Scheme", Scheme)]),
            attr_args("PatchConstantFunc", Function, "Defines the function for computing patch constant data", &[("FunctionName", String)]),
            attr_args("RootSignature", Function, "RootSignature doc", &[("SignatureName", String)]),
            attr_args("Unroll", Loop, "Unroll the loop until it stops executing or a max count", &[("Count", Int)]),
        ]
    };
}

/// Look an attribute up by name, ignoring case
pub fn find_attribute(name: &str) -> Option<&'static HlslAttribute> {
    let name = name.to_lowercase();
    HLSL_ATTRIBUTES.iter().find(|a| a.name == name)
}
