//! Target dialects.
//!
//! A [`Dialect`] is pure data: a mapping from [`Type`] to a type name and a table of [`Template`]s keyed by what is
//! being emitted. The compiler never hard-codes target syntax; every expression, statement and declaration goes through
//! a template.

use crate::{builtin::BuiltIn, error::Error, template, types::Type};
use std::fmt;

/// Operations available on value handles.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Op {
  LessThan,
  MoreThan,
  Plus,
  Minus,
  Times,
  DividedBy,
  Negate,
  And,
  Or,
  Not,
  ToBool,
  ToInt,
  ToUint,
  ToFloat,
  Radians,
  Degrees,
  Sin,
  Cos,
  Tan,
  Asin,
  Acos,
  Atan,
  Pow,
  Exp,
  Exp2,
  Log,
  Log2,
  Sqrt,
  InverseSqrt,
  Mod,
  Min,
  Max,
  Clamp,
  Lerp,
  Step,
  SmoothStep,
  X,
  Y,
  Z,
  W,
  R,
  G,
  B,
  A,
  Xyz,
  Rgb,
  Length,
  Distance,
  Dot,
  Normalize,
  Cross,
  Scale,
  Extend,
  ToRgb,
  ToRgba,
  ToVec3,
  ToVec4,
  /// Matrix times a vector of the matrix dimension.
  Transform,
  /// 4×4 matrix applied to a 3D point, as a homogeneous point.
  TransformPoint,
  /// 4×4 matrix applied to a normal.
  TransformNormal,
  Sample,
}

impl Op {
  pub const ALL: [Op; 61] = [
    Op::LessThan,
    Op::MoreThan,
    Op::Plus,
    Op::Minus,
    Op::Times,
    Op::DividedBy,
    Op::Negate,
    Op::And,
    Op::Or,
    Op::Not,
    Op::ToBool,
    Op::ToInt,
    Op::ToUint,
    Op::ToFloat,
    Op::Radians,
    Op::Degrees,
    Op::Sin,
    Op::Cos,
    Op::Tan,
    Op::Asin,
    Op::Acos,
    Op::Atan,
    Op::Pow,
    Op::Exp,
    Op::Exp2,
    Op::Log,
    Op::Log2,
    Op::Sqrt,
    Op::InverseSqrt,
    Op::Mod,
    Op::Min,
    Op::Max,
    Op::Clamp,
    Op::Lerp,
    Op::Step,
    Op::SmoothStep,
    Op::X,
    Op::Y,
    Op::Z,
    Op::W,
    Op::R,
    Op::G,
    Op::B,
    Op::A,
    Op::Xyz,
    Op::Rgb,
    Op::Length,
    Op::Distance,
    Op::Dot,
    Op::Normalize,
    Op::Cross,
    Op::Scale,
    Op::Extend,
    Op::ToRgb,
    Op::ToRgba,
    Op::ToVec3,
    Op::ToVec4,
    Op::Transform,
    Op::TransformPoint,
    Op::TransformNormal,
    Op::Sample,
  ];

  /// Number of positional arguments, receiver included.
  pub fn arity(self) -> usize {
    match self {
      Op::Clamp | Op::Lerp | Op::SmoothStep => 3,

      Op::LessThan
      | Op::MoreThan
      | Op::Plus
      | Op::Minus
      | Op::Times
      | Op::DividedBy
      | Op::And
      | Op::Or
      | Op::Pow
      | Op::Mod
      | Op::Min
      | Op::Max
      | Op::Step
      | Op::Distance
      | Op::Dot
      | Op::Cross
      | Op::Scale
      | Op::Extend
      | Op::Transform
      | Op::TransformPoint
      | Op::TransformNormal
      | Op::Sample => 2,

      _ => 1,
    }
  }
}

/// Statements written to a stage body.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Stmt {
  /// `type, name, initial value`.
  Define,
  /// `lhs, rhs`.
  Assign,
  If,
  ElseIf,
  Else,
  While,
  /// `index, min, max`.
  Range,
  /// Closes a block.
  End,
  Break,
  Continue,
  Discard,
}

impl Stmt {
  pub const ALL: [Stmt; 11] = [
    Stmt::Define,
    Stmt::Assign,
    Stmt::If,
    Stmt::ElseIf,
    Stmt::Else,
    Stmt::While,
    Stmt::Range,
    Stmt::End,
    Stmt::Break,
    Stmt::Continue,
    Stmt::Discard,
  ];

  pub fn arity(self) -> usize {
    match self {
      Stmt::Define | Stmt::Range => 3,
      Stmt::Assign => 2,
      Stmt::If | Stmt::ElseIf | Stmt::While => 1,
      Stmt::Else | Stmt::End | Stmt::Break | Stmt::Continue | Stmt::Discard => 0,
    }
  }
}

/// Declarations written to a stage header.
///
/// Named declarations take `name, type` (plus extra positions where noted).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Decl {
  /// Vertex input.
  Attribute,
  /// Vertex input of an integer type.
  IntegerAttribute,
  /// Vertex output read by the fragment stage.
  VaryingOut,
  /// Fragment input written by the vertex stage.
  VaryingIn,
  /// Vertex output of an integer type, which cannot be interpolated.
  FlatVaryingOut,
  /// Fragment input of an integer type.
  FlatVaryingIn,
  /// Per-frame (or plain per-draw) uniform.
  Uniform,
  /// Per-draw uniform stored in an indexed buffer: `name, type, binding point`.
  PerDraw,
  /// Draw index passed from the vertex stage: `name`.
  DrawIndexOut,
  /// Draw index read by the fragment stage: `name`.
  DrawIndexIn,
  /// Explicit fragment color output: `name`.
  FragmentOutput,
}

impl Decl {
  pub const ALL: [Decl; 11] = [
    Decl::Attribute,
    Decl::IntegerAttribute,
    Decl::VaryingOut,
    Decl::VaryingIn,
    Decl::FlatVaryingOut,
    Decl::FlatVaryingIn,
    Decl::Uniform,
    Decl::PerDraw,
    Decl::DrawIndexOut,
    Decl::DrawIndexIn,
    Decl::FragmentOutput,
  ];

  pub fn arity(self) -> usize {
    match self {
      Decl::PerDraw => 3,
      Decl::Attribute
      | Decl::IntegerAttribute
      | Decl::VaryingOut
      | Decl::VaryingIn
      | Decl::FlatVaryingOut
      | Decl::FlatVaryingIn
      | Decl::Uniform => 2,
      Decl::DrawIndexOut | Decl::DrawIndexIn | Decl::FragmentOutput => 1,
    }
  }
}

/// Key of a dialect template.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Template {
  /// Operation on a handle of the given type.
  Op(Type, Op),
  /// Literal of a scalar type; the only position is the rendered value.
  Literal(Type),
  /// Composite constructor from components (or columns, for matrices).
  Construct(Type),
  Stmt(Stmt),
  Decl(Decl),
}

impl Template {
  /// Number of positional arguments the compiler substitutes, if the key can be used at all.
  pub fn arity(self) -> Option<usize> {
    match self {
      Template::Op(_, op) => Some(op.arity()),
      Template::Literal(ty) => match ty {
        Type::Bool | Type::Int | Type::Uint | Type::Float => Some(1),
        _ => None,
      },
      Template::Construct(ty) => ty.components(),
      Template::Stmt(stmt) => Some(stmt.arity()),
      Template::Decl(decl) => Some(decl.arity()),
    }
  }

  /// Every key a dialect may provide a template for.
  pub fn all() -> impl Iterator<Item = Template> {
    let ops = Type::ALL
      .into_iter()
      .flat_map(|ty| Op::ALL.into_iter().map(move |op| Template::Op(ty, op)));
    let literals = Type::ALL.into_iter().map(Template::Literal);
    let constructs = Type::ALL.into_iter().map(Template::Construct);
    let stmts = Stmt::ALL.into_iter().map(Template::Stmt);
    let decls = Decl::ALL.into_iter().map(Template::Decl);

    ops
      .chain(literals)
      .chain(constructs)
      .chain(stmts)
      .chain(decls)
      .filter(|key| key.arity().is_some())
  }
}

impl fmt::Display for Template {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Template::Op(ty, op) => write!(f, "{}::{:?}", ty, op),
      Template::Literal(ty) => write!(f, "{} literal", ty),
      Template::Construct(ty) => write!(f, "{} constructor", ty),
      Template::Stmt(stmt) => write!(f, "{:?} statement", stmt),
      Template::Decl(decl) => write!(f, "{:?} declaration", decl),
    }
  }
}

/// A target shading language.
///
/// Implementors only provide data; the compiler decides when each template is used. Returning [`None`] from
/// [`Dialect::type_name`] or [`Dialect::template`] means the dialect cannot express the type or operation, which fails
/// the compilation when a program needs it.
pub trait Dialect: fmt::Debug {
  /// Human-readable name, used in diagnostics.
  fn name(&self) -> &'static str;

  /// Target type name of a semantic type.
  fn type_name(&self, ty: Type) -> Option<&'static str>;

  /// Target type name of a semantic type, failing with [`Error::UnknownType`].
  fn type_of(&self, ty: Type) -> Result<&'static str, Error> {
    self.type_name(ty).ok_or(Error::UnknownType {
      ty,
      dialect: self.name(),
    })
  }

  /// Extension a stage must enable to use a type.
  fn extension(&self, _ty: Type) -> Option<&'static str> {
    None
  }

  /// Template for a key.
  fn template(&self, key: Template) -> Option<&'static str>;

  /// Text starting both stages (`#version` and pragmas). The first line must be the `#version` directive.
  fn preamble(&self) -> &'static str;

  /// Functions written after the vertex header, and after the fragment header if the fragment stage needs them.
  fn helpers(&self) -> &'static str {
    ""
  }

  /// Target identifier of a built-in variable.
  fn builtin(&self, builtin: BuiltIn) -> &'static str;

  /// Whether per-draw uniforms are stored in buffers indexed by the draw ID.
  fn indexed_draws(&self) -> bool {
    false
  }

  /// Number of decimals of float literals.
  fn float_precision(&self) -> usize {
    4
  }
}

/// Check every template of a dialect against the arity the compiler uses it with.
///
/// Compilations detect a faulty template the first time it is used; this reports the first faulty template without
/// writing any program.
pub fn check(dialect: &dyn Dialect) -> Result<(), Error> {
  const PLACEHOLDERS: [&str; 4] = ["a", "b", "c", "d"];

  for key in Template::all() {
    let (Some(template), Some(arity)) = (dialect.template(key), key.arity()) else {
      continue;
    };

    render(key, template, &PLACEHOLDERS[..arity])?;
  }

  Ok(())
}

/// Render a template, attaching the key to any failure.
pub(crate) fn render(key: Template, template: &'static str, args: &[&str]) -> Result<String, Error> {
  template::render(template, args).map_err(|err| match err {
    template::TemplateError::Arity { expected, found } => Error::TemplateArity {
      key,
      template,
      expected,
      found,
    },

    template::TemplateError::Malformed(reason) => Error::MalformedTemplate {
      key,
      template,
      reason,
    },
  })
}
