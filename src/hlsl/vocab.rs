//! Fixed vocabularies used when resolving intrinsic parameter descriptions.
//!
//! All of these are compile-time constant maps, shared by reference and never mutated.

use std::fmt;

use bitflags::bitflags;
use phf::phf_map;

/// The element type category a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentClass {
    Bool,
    Int,
    UInt,
    UInt64,
    UInt32Or64,
    AnyInt,
    AnyInt32,
    UIntOnly,
    Float,
    FloatDouble,
    AnyFloat,
    FloatLike,
    Double,
    DoubleOnly,
    Numeric,
    Numeric32,
    Numeric32Only,
    Any,
    Sampler1D,
    Sampler2D,
    Sampler3D,
    SamplerCube,
    SamplerCmp,
    Sampler,
    Void,
    String,
    Wave,
}
impl ComponentClass {
    /// Samplers, strings and waves are objects rather than numeric scalars.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            Self::Sampler1D
                | Self::Sampler2D
                | Self::Sampler3D
                | Self::SamplerCube
                | Self::SamplerCmp
                | Self::Sampler
                | Self::String
                | Self::Wave
        )
    }

    /// The token used for this class in intrinsic definitions
    pub fn token(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::UInt64 => "u64",
            Self::UInt32Or64 => "u32_64",
            Self::AnyInt => "any_int",
            Self::AnyInt32 => "any_int32",
            Self::UIntOnly => "uint_only",
            Self::Float => "float",
            Self::FloatDouble => "fldbl",
            Self::AnyFloat => "any_float",
            Self::FloatLike => "float_like",
            Self::Double => "double",
            Self::DoubleOnly => "double_only",
            Self::Numeric => "numeric",
            Self::Numeric32 => "numeric32",
            Self::Numeric32Only => "numeric32_only",
            Self::Any => "any",
            Self::Sampler1D => "sampler1d",
            Self::Sampler2D => "sampler2d",
            Self::Sampler3D => "sampler3d",
            Self::SamplerCube => "sampler_cube",
            Self::SamplerCmp => "sampler_cmp",
            Self::Sampler => "sampler",
            Self::Void => "void",
            Self::String => "string",
            Self::Wave => "wave",
        }
    }
}
impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

const BASE_TYPES: phf::Map<&'static str, ComponentClass> = phf_map! {
    "bool" => ComponentClass::Bool,
    "int" => ComponentClass::Int,
    "uint" => ComponentClass::UInt,
    "u64" => ComponentClass::UInt64,
    "u32_64" => ComponentClass::UInt32Or64,
    "any_int" => ComponentClass::AnyInt,
    "any_int32" => ComponentClass::AnyInt32,
    "uint_only" => ComponentClass::UIntOnly,
    "float" => ComponentClass::Float,
    "fldbl" => ComponentClass::FloatDouble,
    "any_float" => ComponentClass::AnyFloat,
    "float_like" => ComponentClass::FloatLike,
    "double" => ComponentClass::Double,
    "double_only" => ComponentClass::DoubleOnly,
    "numeric" => ComponentClass::Numeric,
    "numeric32" => ComponentClass::Numeric32,
    "numeric32_only" => ComponentClass::Numeric32Only,
    "any" => ComponentClass::Any,
    "sampler1d" => ComponentClass::Sampler1D,
    "sampler2d" => ComponentClass::Sampler2D,
    "sampler3d" => ComponentClass::Sampler3D,
    "sampler_cube" => ComponentClass::SamplerCube,
    "sampler_cmp" => ComponentClass::SamplerCmp,
    "sampler" => ComponentClass::Sampler,
    "void" => ComponentClass::Void,
    "string" => ComponentClass::String,
    "wave" => ComponentClass::Wave,
};

pub fn base_type(name: &str) -> Option<ComponentClass> {
    BASE_TYPES.get(name).copied()
}

bitflags! {
    /// Parameter qualifiers, combined with OR as they are encountered.
    pub struct ParamQualifiers: u32 {
        const IN = 0b0000_0001;
        const OUT = 0b0000_0010;
        const COL_MAJOR = 0b0000_0100;
        const ROW_MAJOR = 0b0000_1000;

        const INOUT = Self::IN.bits | Self::OUT.bits;
    }
}

const PARAM_QUALIFIERS: phf::Map<&'static str, ParamQualifiers> = phf_map! {
    "in" => ParamQualifiers::IN,
    "inout" => ParamQualifiers::INOUT,
    "out" => ParamQualifiers::OUT,
    "col_major" => ParamQualifiers::COL_MAJOR,
    "row_major" => ParamQualifiers::ROW_MAJOR,
};

pub fn param_qualifier(keyword: &str) -> Option<ParamQualifiers> {
    PARAM_QUALIFIERS.get(keyword).copied()
}

/// Symbolic row/column sizes, meaning "whatever the matched parameter has"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RowCol {
    R,
    C,
    R2,
    C2,
}

const ROWCOL_SYMBOLS: phf::Map<&'static str, RowCol> = phf_map! {
    "r" => RowCol::R,
    "c" => RowCol::C,
    "r2" => RowCol::R2,
    "c2" => RowCol::C2,
};

/// A row or column extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dim {
    Fixed(u8),
    Symbol(RowCol),
}
impl Dim {
    /// Translate a row/col token: a positive decimal literal passes through, anything else must be a known symbol.
    pub fn from_token(token: &str) -> Option<Dim> {
        if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
            return token.parse::<u8>().ok().filter(|&n| n > 0).map(Dim::Fixed);
        }
        ROWCOL_SYMBOLS.get(token).copied().map(Dim::Symbol)
    }
}
impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Fixed(n) => write!(f, "{}", n),
            Dim::Symbol(RowCol::R) => f.write_str("r"),
            Dim::Symbol(RowCol::C) => f.write_str("c"),
            Dim::Symbol(RowCol::R2) => f.write_str("r2"),
            Dim::Symbol(RowCol::C2) => f.write_str("c2"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_base_type_round_trips_through_its_token() {
        for (name, class) in BASE_TYPES.entries() {
            assert_eq!(class.token(), *name);
        }
    }

    #[test]
    fn object_classes() {
        assert!(base_type("sampler_cmp").unwrap().is_object());
        assert!(base_type("string").unwrap().is_object());
        assert!(base_type("wave").unwrap().is_object());
        assert!(!base_type("any_float").unwrap().is_object());
        assert_eq!(base_type("float3"), None);
    }

    #[test]
    fn inout_is_in_and_out() {
        assert_eq!(
            param_qualifier("inout"),
            Some(ParamQualifiers::IN | ParamQualifiers::OUT)
        );
        assert_eq!(param_qualifier("const"), None);
    }

    #[test]
    fn dims() {
        assert_eq!(Dim::from_token("4"), Some(Dim::Fixed(4)));
        assert_eq!(Dim::from_token("r2"), Some(Dim::Symbol(RowCol::R2)));
        assert_eq!(Dim::from_token("q"), None);
        assert_eq!(Dim::from_token("300"), None);
        assert_eq!(Dim::from_token("0"), None);
    }
}
