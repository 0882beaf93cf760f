//! Resolution of one textual parameter description into a [ParameterDescriptor].
//!
//! A description is a whitespace-separated list `[options...] <type> <name>`.
//! Options are qualifier keywords (`in`, `out`, `inout`, `row_major`, `col_major`)
//! or an explicit `$match<template@component>` back-reference.
//! The type is a base type from [super::vocab], optionally decorated with a shape
//! (`float<4>`, `numeric<r@c>`, `any<>`, or shorthand `float4`, `float3x4`), or one of the special forms
//! `$unspec`, `...` and `$typeN`.
//!
//! Arguments are resolved left to right, and the return value (position 0) is resolved last
//! so that it can refer back to any argument.

use std::fmt;

use tracing::trace;

use super::error::IntrinsicError;
use super::grammar::{
    parse_match_option, parse_type_ref, split_shorthand_type, split_type_token, ShapeSyntax,
};
use super::vocab::{base_type, param_qualifier, ComponentClass, Dim, ParamQualifiers, RowCol};

/// Name used for a variadic parameter tail
pub const VARARGS_NAME: &str = "...";

/// Where a parameter takes its template or component type from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamRef {
    /// The parameter at this position. A parameter referring to its own position is unconstrained.
    Index(usize),
    /// The type is supplied by the caller, not derived from any argument
    FromReturnType,
    /// Variadic tail
    Varargs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateShape {
    Scalar,
    Vector,
    Matrix,
    /// Any of scalar, vector or matrix
    Any,
    Object,
    Void,
}

/// Template shape plus row/column extents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub template: TemplateShape,
    pub rows: Dim,
    pub cols: Dim,
}
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.template {
            TemplateShape::Scalar => f.write_str("scalar"),
            TemplateShape::Vector => write!(f, "vector<{}>", self.cols),
            TemplateShape::Matrix => write!(f, "matrix<{}, {}>", self.rows, self.cols),
            TemplateShape::Any => write!(f, "any<{}, {}>", self.rows, self.cols),
            TemplateShape::Object => f.write_str("object"),
            TemplateShape::Void => f.write_str("void"),
        }
    }
}

/// A fully resolved parameter, or the return value at position 0
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterDescriptor {
    /// Empty for the return value, [VARARGS_NAME] for a variadic tail
    pub name: String,
    pub qualifiers: ParamQualifiers,
    pub template_id: ParamRef,
    pub template_shape: TemplateShape,
    pub component_id: ParamRef,
    pub component_class: ComponentClass,
    pub rows: Dim,
    pub cols: Dim,
    /// The type token as written (after `$typeN` substitution)
    pub type_name: String,
    pub position: usize,
}
impl ParameterDescriptor {
    pub fn shape(&self) -> Shape {
        Shape {
            template: self.template_shape,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn is_return(&self) -> bool {
        self.position == 0
    }

    pub fn is_varargs(&self) -> bool {
        self.template_id == ParamRef::Varargs
    }
}

/// Resolve the parameter description `desc` for `position`.
///
/// `resolved_args` holds the arguments already resolved for this intrinsic, starting at position 1:
/// the earlier arguments when resolving an argument, all of them when resolving the return value.
pub fn resolve_parameter(
    desc: &str,
    position: usize,
    resolved_args: &[ParameterDescriptor],
) -> Result<ParameterDescriptor, IntrinsicError> {
    let desc = desc.trim();
    let (options, type_token, param_name) = if desc == VARARGS_NAME {
        (vec![], VARARGS_NAME, VARARGS_NAME)
    } else {
        let mut tokens: Vec<&str> = desc.split_whitespace().collect();
        match (tokens.pop(), tokens.pop()) {
            (Some(name), Some(type_token)) => (tokens, type_token, name),
            _ => return Err(IntrinsicError::MalformedParameter(desc.to_owned())),
        }
    };

    let mut qualifiers = ParamQualifiers::empty();
    let mut template_id = ParamRef::Index(position);
    let mut component_id = ParamRef::Index(position);

    let type_name = match type_token {
        "$unspec" => {
            if position != 0 {
                return Err(IntrinsicError::MisplacedSpecialType {
                    token: "$unspec",
                    allowed: "as the return type",
                });
            }
            template_id = ParamRef::FromReturnType;
            component_id = ParamRef::FromReturnType;
            "void".to_owned()
        }
        VARARGS_NAME => {
            if position == 0 {
                return Err(IntrinsicError::MisplacedSpecialType {
                    token: VARARGS_NAME,
                    allowed: "in the parameter list",
                });
            }
            template_id = ParamRef::Varargs;
            component_id = ParamRef::Varargs;
            "void".to_owned()
        }
        token => match parse_type_ref(token) {
            Some(0) => return Err(IntrinsicError::ReturnTypeReference(param_name.to_owned())),
            Some(n) => {
                let done_arg = resolved_args
                    .get(n - 1)
                    .ok_or_else(|| IntrinsicError::ForwardReference(param_name.to_owned()))?;
                template_id = ParamRef::Index(n);
                component_id = ParamRef::Index(n);
                done_arg.type_name.clone()
            }
            None => token.to_owned(),
        },
    };

    let (base, shape_syntax) = match split_type_token(&type_name) {
        (base, ShapeSyntax::Plain) if base_type(base).is_none() => {
            split_shorthand_type(base).unwrap_or((base, ShapeSyntax::Plain))
        }
        split => split,
    };
    let component_class = base_type(base).ok_or_else(|| IntrinsicError::UnknownType {
        base: base.to_owned(),
        desc: desc.to_owned(),
    })?;

    let dim = |token: &str| {
        Dim::from_token(token).ok_or_else(|| IntrinsicError::UnknownDimension(token.to_owned()))
    };
    let (mut template_shape, mut rows, mut cols) = match shape_syntax {
        ShapeSyntax::Matrix(r, c) => (TemplateShape::Matrix, dim(r)?, dim(c)?),
        ShapeSyntax::Vector(c) => (TemplateShape::Vector, Dim::Fixed(1), dim(c)?),
        ShapeSyntax::Any => (
            TemplateShape::Any,
            Dim::Symbol(RowCol::R),
            Dim::Symbol(RowCol::C),
        ),
        ShapeSyntax::Plain if component_class.is_object() => {
            (TemplateShape::Object, Dim::Fixed(1), Dim::Fixed(1))
        }
        ShapeSyntax::Plain => (TemplateShape::Scalar, Dim::Fixed(1), Dim::Fixed(1)),
    };

    for opt in options {
        if let Some(qual) = param_qualifier(opt) {
            qualifiers |= qual;
        } else {
            let (template, component) = parse_match_option(opt)?;
            template_id = template;
            component_id = component;
        }
    }

    if component_class == ComponentClass::Void && type_name == "void" {
        template_shape = TemplateShape::Void;
        rows = Dim::Fixed(0);
        cols = Dim::Fixed(0);
        if position == 0 {
            qualifiers = ParamQualifiers::empty();
        }
    }

    // Arguments may only look left, and never at the return value
    if position != 0 {
        for id in [template_id, component_id] {
            match id {
                ParamRef::Index(0) => {
                    return Err(IntrinsicError::ReturnTypeReference(param_name.to_owned()))
                }
                ParamRef::Index(idx) if idx > position => {
                    return Err(IntrinsicError::ForwardReference(param_name.to_owned()))
                }
                _ => {}
            }
        }
    }

    trace!(position, param_name, %type_name, "resolved parameter");

    Ok(ParameterDescriptor {
        name: if position == 0 {
            String::new()
        } else {
            param_name.to_owned()
        },
        qualifiers,
        template_id,
        template_shape,
        component_id,
        component_class,
        rows,
        cols,
        type_name,
        position,
    })
}

/// Resolve every parameter of one declaration.
///
/// `return_desc` is the return text followed by a name token.
/// Arguments are resolved first, in order, then the return value is resolved and put at position 0.
pub fn resolve_signature(
    return_desc: &str,
    arg_descs: &[&str],
) -> Result<Vec<ParameterDescriptor>, IntrinsicError> {
    let mut args = Vec::with_capacity(arg_descs.len() + 1);
    for (i, desc) in arg_descs.iter().enumerate() {
        let arg = resolve_parameter(desc, i + 1, &args)?;
        args.push(arg);
    }
    let ret = resolve_parameter(return_desc, 0, &args)?;
    args.insert(0, ret);
    Ok(args)
}
