//! Loading and validation of the HLSL intrinsic schema.
//!
//! The schema has two halves:
//! - [hlsl] - the intrinsic definition language. Each line of a definition file declares a
//!   namespace boundary or one intrinsic, whose parameters are resolved into typed [hlsl::ParameterDescriptor]s
//! - [dxil] - the table of instructions intrinsics lower to, plus the signature point tables,
//!   all checked for internal consistency
//!
//! [Schema] ties the two together and is what callers should usually reach for.

pub mod dxil;
pub mod hlsl;
pub mod schema;

pub use schema::{Schema, SchemaBuilder, SchemaError};
