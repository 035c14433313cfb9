//! GLSL 1.10.

use crate::{
  builtin::BuiltIn,
  dialect::{Decl, Dialect, Op, Template},
  error::Error,
  glsl,
  source::{Program, Source},
  stage::{FragmentCore, VertexCore},
  types::Type,
};

/// GLSL 1.10 dialect.
///
/// GLSL 1.10 has no unsigned integers. [`Type::Uint`] is emitted as `int` and the operations that could produce a
/// negative value clamp at zero, so a negative intermediate reads as `0` rather than wrapping around as it would with
/// a real `uint`. Division and multiplication are not clamped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glsl110 {
  precision: usize,
}

impl Default for Glsl110 {
  fn default() -> Self {
    Self { precision: 4 }
  }
}

impl Glsl110 {
  pub fn new() -> Self {
    Self::default()
  }

  /// Render float literals with `precision` decimals (at least one).
  pub fn with_float_precision(self, precision: usize) -> Self {
    Self {
      precision: precision.max(1),
    }
  }
}

/// Templates shared by the legacy (pre-1.30) versions.
pub(crate) fn legacy_template(key: Template) -> Option<&'static str> {
  match key {
    Template::Literal(Type::Uint) => Some("{0}"),

    // `max` only takes floats before 1.30
    Template::Op(Type::Uint, Op::Plus) => Some("int(max(0.0, float({0} + {1})))"),
    Template::Op(Type::Uint, Op::Minus) => Some("int(max(0.0, float({0} - {1})))"),
    Template::Op(Type::Uint, Op::ToInt) => Some("{0}"),
    Template::Op(Type::Int, Op::ToUint) => Some("int(max(0.0, float({0})))"),
    Template::Op(Type::Float, Op::ToUint) => Some("int(max(0.0, {0}))"),

    Template::Op(Type::Texture1D, Op::Sample) => Some("texture1D({0}, {1})"),
    Template::Op(Type::Texture2D, Op::Sample) => Some("texture2D({0}, {1})"),
    Template::Op(Type::Texture3D, Op::Sample) => Some("texture3D({0}, {1})"),
    Template::Op(Type::TextureCube, Op::Sample) => Some("textureCube({0}, {1})"),

    Template::Decl(Decl::Attribute) => Some("attribute {1} {0};"),
    Template::Decl(Decl::VaryingOut | Decl::VaryingIn) => Some("varying {1} {0};"),
    Template::Decl(
      Decl::IntegerAttribute
      | Decl::FlatVaryingOut
      | Decl::FlatVaryingIn
      | Decl::DrawIndexOut
      | Decl::DrawIndexIn
      | Decl::FragmentOutput,
    ) => None,

    _ => glsl::template(key),
  }
}

pub(crate) fn legacy_type_name(ty: Type) -> &'static str {
  match ty {
    Type::Uint => "int",
    _ => glsl::type_name(ty),
  }
}

pub(crate) fn legacy_builtin(builtin: BuiltIn) -> &'static str {
  match builtin {
    BuiltIn::FragColor => "gl_FragColor",
    _ => glsl::builtin(builtin),
  }
}

impl Dialect for Glsl110 {
  fn name(&self) -> &'static str {
    "GLSL 110"
  }

  fn type_name(&self, ty: Type) -> Option<&'static str> {
    Some(legacy_type_name(ty))
  }

  fn template(&self, key: Template) -> Option<&'static str> {
    legacy_template(key)
  }

  fn preamble(&self) -> &'static str {
    "#version 110\n"
  }

  fn helpers(&self) -> &'static str {
    glsl::MATRIX_HELPERS
  }

  fn builtin(&self, builtin: BuiltIn) -> &'static str {
    legacy_builtin(builtin)
  }

  fn float_precision(&self) -> usize {
    self.precision
  }
}

/// Compile a program to GLSL 1.10.
///
/// # Examples
///
/// ```
/// let program = tinct::glsl110::compile(
///   |v| {
///     let position = v.input.vec4("position");
///     v.set.vec4(&v.position, &position);
///   },
///   |f| f.set.rgba(&f.fragment, &f.new.rgba(1., 0., 0., 1.)),
/// )
/// .unwrap();
///
/// assert!(program.vertex.starts_with("#version 110\n"));
/// assert!(program.vertex.contains("attribute vec4 position;"));
/// ```
pub fn compile<V, F>(vertex: V, fragment: F) -> Result<Program, Error>
where
  V: FnOnce(&VertexCore<'_>),
  F: FnOnce(&FragmentCore<'_>),
{
  Source::new(Glsl110::default()).compile(vertex, fragment)
}
