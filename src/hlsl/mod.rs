//! HLSL intrinsic definitions.
//!
//! [grammar] splits definition lines into fragments, [params] resolves parameter
//! descriptions against the vocabulary in [vocab], and [intrinsic] assembles
//! whole records grouped by namespace.

pub mod attributes;
pub mod error;
pub mod grammar;
pub mod intrinsic;
pub mod params;
pub mod vocab;

pub use error::{IntrinsicError, IntrinsicErrorContext};
pub use intrinsic::{IntrinsicDb, IntrinsicDbBuilder, IntrinsicRecord, Namespace, NamespaceView};
pub use params::{ParamRef, ParameterDescriptor, Shape, TemplateShape};
pub use vocab::{ComponentClass, Dim, ParamQualifiers, RowCol};
