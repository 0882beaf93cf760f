//! Line-level grammar for intrinsic definition files.
//!
//! A definition file is a sequence of lines, each one of
//! - blank, or a `//` comment
//! - `namespace Name {`
//! - `} namespace`
//! - an intrinsic declaration, `<return> [[<attrs>]] <Name>(<params>) [: <OPERAND>];`
//!
//! This module only segments lines and tokens. Resolving what the tokens mean
//! happens in [super::params] and [super::intrinsic].

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_till1, take_until, take_while1},
    character::complete::{char, digit1, multispace0, multispace1, one_of},
    combinator::{eof, map, opt, recognize, rest},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
};

use super::error::{finish, IntrinsicError, NomGrammarResult};
use super::params::ParamRef;

/// A classified definition line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefLine<'a> {
    Blank,
    Comment,
    NamespaceOpen(&'a str),
    NamespaceClose,
    Intrinsic(RawDeclaration<'a>),
}

/// The five fragments of an intrinsic declaration, before any resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDeclaration<'a> {
    /// Return type, possibly with qualifiers and `$match` options in front of it
    pub return_text: &'a str,
    pub attrs: &'a str,
    pub name: &'a str,
    /// Unsplit parameter list, without the parentheses
    pub params: &'a str,
    pub operand: Option<&'a str>,
}

pub fn classify_line(line: &str) -> Result<DefLine<'_>, IntrinsicError> {
    match alt((
        parse_blank,
        parse_comment,
        parse_namespace_open,
        parse_namespace_close,
        map(parse_intrinsic, DefLine::Intrinsic),
    ))(line)
    {
        Ok((_, def_line)) => Ok(def_line),
        Err(_) => Err(IntrinsicError::MalformedDeclaration(line.to_owned())),
    }
}

fn ident(data: &str) -> NomGrammarResult<&str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(data)
}

fn parse_blank(data: &str) -> NomGrammarResult<DefLine> {
    let (data, _) = terminated(multispace0, eof)(data)?;
    Ok((data, DefLine::Blank))
}

fn parse_comment(data: &str) -> NomGrammarResult<DefLine> {
    let (data, _) = tuple((multispace0, tag("//"), rest))(data)?;
    Ok((data, DefLine::Comment))
}

fn parse_namespace_open(data: &str) -> NomGrammarResult<DefLine> {
    let (data, (_, _, name, _, _, _, _)) = tuple((
        tag("namespace"),
        multispace1,
        ident,
        multispace0,
        char('{'),
        multispace0,
        eof,
    ))(data)?;
    Ok((data, DefLine::NamespaceOpen(name)))
}

fn parse_namespace_close(data: &str) -> NomGrammarResult<DefLine> {
    let (data, _) = tuple((char('}'), multispace0, tag("namespace"), multispace0, eof))(data)?;
    Ok((data, DefLine::NamespaceClose))
}

fn parse_intrinsic(data: &str) -> NomGrammarResult<RawDeclaration> {
    let (data, _) = multispace0(data)?;
    let (data, head) = take_until("[[")(data)?;

    // The return text needs whitespace before the attributes, and can't hold a parameter list
    let return_text = head.trim_end();
    if return_text.is_empty() || return_text.len() == head.len() || return_text.contains('(') {
        return Err(nom::Err::Error(nom::error::ParseError::from_error_kind(
            data,
            nom::error::ErrorKind::Verify,
        )));
    }

    let (data, attrs) = delimited(
        tag("[["),
        take_till(|c: char| c == ']' || c.is_whitespace()),
        tag("]]"),
    )(data)?;
    let (data, _) = multispace1(data)?;
    let (data, name) = ident(data)?;
    let (data, _) = multispace0(data)?;
    let (data, params) = delimited(char('('), take_till(|c: char| c == ')'), char(')'))(data)?;
    let (data, _) = multispace0(data)?;
    let (data, operand) = opt(terminated(
        preceded(pair(char(':'), multispace0), ident),
        multispace0,
    ))(data)?;
    let (data, _) = tuple((char(';'), multispace0, eof))(data)?;

    Ok((
        data,
        RawDeclaration {
            return_text,
            attrs,
            name,
            params: params.trim(),
            operand,
        },
    ))
}

/// Rewrite two-argument bracket notation `<a, b>` into `<a@b>`,
/// so the inner comma doesn't get mistaken for a parameter separator.
pub fn fold_template_commas(text: &str) -> String {
    let result: NomGrammarResult<Vec<String>> = many0(alt((
        template_pair,
        map(take_till1(|c: char| c == '<'), str::to_owned),
        map(recognize(char('<')), str::to_owned),
    )))(text);
    match result {
        Ok((rest, pieces)) => pieces.concat() + rest,
        Err(_) => text.to_owned(),
    }
}

fn template_word(data: &str) -> NomGrammarResult<&str> {
    take_till1(|c: char| c == ',' || c == '<' || c == '>' || c.is_whitespace())(data)
}

fn template_pair(data: &str) -> NomGrammarResult<String> {
    let (data, (a, b)) = delimited(
        char('<'),
        separated_pair(
            delimited(multispace0, template_word, multispace0),
            char(','),
            delimited(multispace0, template_word, multispace0),
        ),
        char('>'),
    )(data)?;
    Ok((data, format!("<{}@{}>", a, b)))
}

/// Split a (folded) parameter list into one fragment per parameter
pub fn split_params(params: &str) -> Vec<&str> {
    let params = params.trim();
    if params.is_empty() {
        vec![]
    } else {
        params.split(',').map(str::trim).collect()
    }
}

/// The shape decoration on a type token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeSyntax<'a> {
    /// `base`
    Plain,
    /// `base<cols>`
    Vector(&'a str),
    /// `base<rows@cols>`
    Matrix(&'a str, &'a str),
    /// `base<>`
    Any,
}

/// Split a type token into its base name and shape decoration.
///
/// Tokens that don't fit any decorated form are returned whole as [ShapeSyntax::Plain],
/// which then fail the base type lookup.
pub fn split_type_token(token: &str) -> (&str, ShapeSyntax<'_>) {
    match parse_decorated_type(token) {
        Ok((_, split)) => split,
        Err(_) => (token, ShapeSyntax::Plain),
    }
}

fn parse_decorated_type(data: &str) -> NomGrammarResult<(&str, ShapeSyntax)> {
    let (data, base) = take_till1(|c: char| c == '<')(data)?;
    let (data, inner) = delimited(char('<'), take_till(|c: char| c == '>'), char('>'))(data)?;
    let (data, _) = eof(data)?;
    let shape = match inner.split_once('@') {
        _ if inner.is_empty() => ShapeSyntax::Any,
        Some((rows, cols)) => ShapeSyntax::Matrix(rows, cols),
        None => ShapeSyntax::Vector(inner),
    };
    Ok((data, (base, shape)))
}

/// Split an HLSL shorthand type such as `float3` or `float3x4` into its base name and shape.
///
/// Only meaningful for tokens which aren't themselves base type names, since some of those end in digits.
pub fn split_shorthand_type(token: &str) -> Option<(&str, ShapeSyntax<'_>)> {
    let result: NomGrammarResult<_> = tuple((
        take_till1(|c: char| c.is_ascii_digit()),
        recognize(one_of("1234")),
        opt(preceded(char('x'), recognize(one_of("1234")))),
        eof,
    ))(token);
    match result {
        Ok((_, (base, rows, Some(cols), _))) => Some((base, ShapeSyntax::Matrix(rows, cols))),
        Ok((_, (base, cols, None, _))) => Some((base, ShapeSyntax::Vector(cols))),
        Err(_) => None,
    }
}

/// Parse a direct type back-reference, `$typeN` or `$type<N>`
pub fn parse_type_ref(token: &str) -> Option<usize> {
    let result: NomGrammarResult<&str> = preceded(
        tag("$type"),
        alt((delimited(char('<'), digit1, char('>')), digit1)),
    )(token);
    match result {
        Ok(("", digits)) => digits.parse().ok(),
        _ => None,
    }
}

fn parse_param_ref(data: &str) -> NomGrammarResult<ParamRef> {
    let (data, (neg, digits)) = pair(opt(char('-')), digit1)(data)?;
    let value: usize = digits
        .parse()
        .map_err(|_| IntrinsicError::UnknownQualifier(digits.to_owned()))?;
    let param_ref = match (neg, value) {
        (None, idx) => ParamRef::Index(idx),
        (Some(_), 1) => ParamRef::FromReturnType,
        (Some(_), 2) => ParamRef::Varargs,
        (Some(_), _) => return Err(IntrinsicError::UnknownQualifier(format!("-{}", digits)).into()),
    };
    Ok((data, param_ref))
}

/// Parse an explicit `$match<template@component>` option
pub fn parse_match_option(token: &str) -> Result<(ParamRef, ParamRef), IntrinsicError> {
    finish(
        delimited(
            tag("$match<"),
            separated_pair(parse_param_ref, char('@'), parse_param_ref),
            char('>'),
        )(token),
        || IntrinsicError::UnknownQualifier(token.to_owned()),
    )
}

/// Typed contents of a declaration's `[[...]]` list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclAttributes {
    /// Only reads memory
    pub readonly: bool,
    /// Doesn't touch memory
    pub readnone: bool,
    pub unsigned_op: Option<String>,
    /// Position of the parameter that picks the overload, if not the return value
    pub overload_param: Option<usize>,
}

pub fn parse_attributes(attrs: &str) -> Result<DeclAttributes, IntrinsicError> {
    let mut parsed = DeclAttributes::default();
    for attr in attrs.split(',') {
        match attr.split_once('=') {
            None if attr.is_empty() => {}
            None if attr == "ro" => parsed.readonly = true,
            None if attr == "rn" => parsed.readnone = true,
            Some(("unsigned_op", op)) if !op.is_empty() && !op.contains('=') => {
                parsed.unsigned_op = Some(op.to_owned())
            }
            Some(("overload", idx)) => {
                let idx = idx
                    .parse()
                    .map_err(|_| IntrinsicError::InvalidAttribute(attr.to_owned()))?;
                parsed.overload_param = Some(idx);
            }
            _ => return Err(IntrinsicError::InvalidAttribute(attr.to_owned())),
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classify_structure_lines() {
        assert_eq!(classify_line("").unwrap(), DefLine::Blank);
        assert_eq!(classify_line("   \t").unwrap(), DefLine::Blank);
        assert_eq!(classify_line("  // hi").unwrap(), DefLine::Comment);
        assert_eq!(
            classify_line("namespace Intrinsics {").unwrap(),
            DefLine::NamespaceOpen("Intrinsics")
        );
        assert_eq!(classify_line("} namespace").unwrap(), DefLine::NamespaceClose);
    }

    #[test]
    fn classify_declaration() {
        let line = classify_line("float3 [[ro]] Foo(float3 a, int b) : FOO;").unwrap();
        assert_eq!(
            line,
            DefLine::Intrinsic(RawDeclaration {
                return_text: "float3",
                attrs: "ro",
                name: "Foo",
                params: "float3 a, int b",
                operand: Some("FOO"),
            })
        );

        let line = classify_line("  void [[]] Bar();").unwrap();
        assert_eq!(
            line,
            DefLine::Intrinsic(RawDeclaration {
                return_text: "void",
                attrs: "",
                name: "Bar",
                params: "",
                operand: None,
            })
        );
    }

    #[test]
    fn malformed_lines() {
        for line in [
            "float3 Foo(float3 a);",
            "float3 [[ro]] Foo(float3 a)",
            "[[ro]] Foo(float3 a);",
            "namespace {",
            "float3 [[ro]] Foo(float3 a) : ;",
        ] {
            assert_eq!(
                classify_line(line),
                Err(IntrinsicError::MalformedDeclaration(line.to_owned())),
                "{}",
                line
            );
        }
    }

    #[test]
    fn template_commas_are_folded() {
        assert_eq!(
            fold_template_commas("in float<r, c> a, in float<4> b"),
            "in float<r@c> a, in float<4> b"
        );
        assert_eq!(fold_template_commas("numeric<> x"), "numeric<> x");
        assert_eq!(fold_template_commas("float<a, b, c> x"), "float<a, b, c> x");
        assert_eq!(fold_template_commas("$match<1@2> float<4> v"), "$match<1@2> float<4> v");
        assert_eq!(
            split_params(&fold_template_commas("float<2,3> m, int i")),
            vec!["float<2@3> m", "int i"]
        );
        assert!(split_params("  ").is_empty());
    }

    #[test]
    fn type_tokens() {
        assert_eq!(split_type_token("float"), ("float", ShapeSyntax::Plain));
        assert_eq!(split_type_token("float<4>"), ("float", ShapeSyntax::Vector("4")));
        assert_eq!(
            split_type_token("numeric<r@c>"),
            ("numeric", ShapeSyntax::Matrix("r", "c"))
        );
        assert_eq!(split_type_token("any<>"), ("any", ShapeSyntax::Any));
        assert_eq!(split_type_token("float<4"), ("float<4", ShapeSyntax::Plain));
        assert_eq!(
            split_shorthand_type("float3"),
            Some(("float", ShapeSyntax::Vector("3")))
        );
        assert_eq!(
            split_shorthand_type("int3x4"),
            Some(("int", ShapeSyntax::Matrix("3", "4")))
        );
        assert_eq!(split_shorthand_type("float5"), None);
        assert_eq!(split_shorthand_type("float"), None);
    }

    #[test]
    fn back_references() {
        assert_eq!(parse_type_ref("$type1"), Some(1));
        assert_eq!(parse_type_ref("$type<12>"), Some(12));
        assert_eq!(parse_type_ref("$type"), None);
        assert_eq!(
            parse_match_option("$match<1@2>"),
            Ok((ParamRef::Index(1), ParamRef::Index(2)))
        );
        assert_eq!(
            parse_match_option("$match<-1@0>"),
            Ok((ParamRef::FromReturnType, ParamRef::Index(0)))
        );
        assert_eq!(
            parse_match_option("$match<-3@0>"),
            Err(IntrinsicError::UnknownQualifier("-3".to_owned()))
        );
        assert_eq!(
            parse_match_option("$match<1>"),
            Err(IntrinsicError::UnknownQualifier("$match<1>".to_owned()))
        );
    }

    #[test]
    fn attributes() {
        assert_eq!(parse_attributes("").unwrap(), DeclAttributes::default());
        let attrs = parse_attributes("ro,unsigned_op=UMax,overload=1").unwrap();
        assert!(attrs.readonly);
        assert!(!attrs.readnone);
        assert_eq!(attrs.unsigned_op.as_deref(), Some("UMax"));
        assert_eq!(attrs.overload_param, Some(1));
        assert_eq!(
            parse_attributes("rn,pure"),
            Err(IntrinsicError::InvalidAttribute("pure".to_owned()))
        );
        assert_eq!(
            parse_attributes("overload=x"),
            Err(IntrinsicError::InvalidAttribute("overload=x".to_owned()))
        );
    }
}
