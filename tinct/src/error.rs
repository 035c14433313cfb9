//! Compilation errors.

use crate::{dialect::Template, types::Type, uniform::Frequency};
use std::fmt;

/// Errors that can abort a compilation.
///
/// Handle operations cannot fail at the call site, so the first error raised while the vertex and fragment
/// procedures run is recorded by the compilation and returned by [`Source::compile`](crate::Source::compile).
/// Nothing is emitted when a compilation fails.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
  /// The dialect cannot express a type.
  #[error("type {ty} has no representation in {dialect}")]
  UnknownType { ty: Type, dialect: &'static str },

  /// A template does not reference exactly the positions its operation provides.
  #[error("template `{template}` for {key} expects {expected} positional argument(s), found {found}")]
  TemplateArity {
    key: Template,
    template: &'static str,
    expected: usize,
    found: usize,
  },

  /// A template has unbalanced braces or a non-numeric position.
  #[error("malformed template `{template}` for {key}: {reason}")]
  MalformedTemplate {
    key: Template,
    template: &'static str,
    reason: &'static str,
  },

  /// The dialect has no template for an operation the program uses.
  #[error("{dialect} has no template for {key}")]
  MissingTemplate { key: Template, dialect: &'static str },

  /// A fragment input was requested without a vertex output of the same name.
  #[error("fragment input `{name}` has no matching vertex output")]
  UnmatchedVarying { name: String },

  /// A fragment input reads a varying with a different type than the vertex stage writes.
  #[error("varying `{name}` is written as {output} but read as {input}")]
  VaryingMismatch {
    name: String,
    output: Type,
    input: Type,
  },

  /// The same identifier was declared twice in a stage with different types.
  #[error("`{name}` is declared as both {first} and {second}")]
  Redeclared {
    name: String,
    first: Type,
    second: Type,
  },

  /// A user identifier starts with a prefix reserved for generated names.
  #[error("`{name}` uses a reserved prefix")]
  ReservedName { name: String },

  /// A stage input or output has a type the dialect cannot pass between stages.
  #[error("`{name}` cannot be a stage input or output of type {ty} in {dialect}")]
  UnsupportedInterface {
    name: String,
    ty: Type,
    dialect: &'static str,
  },

  /// The same binding was read both once per frame and once per draw.
  #[error("uniform `{name}` is read both per {first:?} and per {second:?}")]
  FrequencyMismatch {
    name: String,
    first: Frequency,
    second: Frequency,
  },

  /// A version string did not name a supported dialect.
  #[error("unknown GLSL version `{0}`")]
  UnknownVersion(String),

  /// Writing the final source text failed.
  #[error("cannot write shader source: {0}")]
  Fmt(#[from] fmt::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
