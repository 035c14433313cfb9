//! GLSL ES 1.00.

use crate::{
  builtin::BuiltIn,
  dialect::{Dialect, Op, Template},
  error::Error,
  glsl::{self, glsl110},
  source::{Program, Source},
  stage::{FragmentCore, VertexCore},
  types::Type,
};

/// GLSL ES 1.00 dialect.
///
/// Same tables as [`Glsl110`](glsl110::Glsl110), with a default float precision. GLSL ES has no `sampler1D`:
/// [`Type::Texture1D`] is a `sampler2D` sampled along its first row, so the driver must upload 1D textures as one-row
/// 2D textures. `sampler3D` needs `GL_OES_texture_3D`, which stages using [`Type::Texture3D`] enable.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Glsl100 {
  legacy: glsl110::Glsl110,
}

impl Glsl100 {
  pub fn new() -> Self {
    Self::default()
  }

  /// Render float literals with `precision` decimals (at least one).
  pub fn with_float_precision(self, precision: usize) -> Self {
    Self {
      legacy: self.legacy.with_float_precision(precision),
    }
  }
}

impl Dialect for Glsl100 {
  fn name(&self) -> &'static str {
    "GLSL ES 100"
  }

  fn type_name(&self, ty: Type) -> Option<&'static str> {
    match ty {
      Type::Texture1D => Some("sampler2D"),
      _ => self.legacy.type_name(ty),
    }
  }

  fn extension(&self, ty: Type) -> Option<&'static str> {
    (ty == Type::Texture3D).then_some("GL_OES_texture_3D")
  }

  fn template(&self, key: Template) -> Option<&'static str> {
    match key {
      Template::Op(Type::Texture1D, Op::Sample) => Some("texture2D({0}, vec2({1}, 0.5))"),
      _ => self.legacy.template(key),
    }
  }

  fn preamble(&self) -> &'static str {
    "#version 100\nprecision mediump float;\n"
  }

  fn helpers(&self) -> &'static str {
    glsl::MATRIX_HELPERS
  }

  fn builtin(&self, builtin: BuiltIn) -> &'static str {
    self.legacy.builtin(builtin)
  }

  fn float_precision(&self) -> usize {
    self.legacy.float_precision()
  }
}

/// Compile a program to GLSL ES 1.00.
pub fn compile<V, F>(vertex: V, fragment: F) -> Result<Program, Error>
where
  V: FnOnce(&VertexCore<'_>),
  F: FnOnce(&FragmentCore<'_>),
{
  Source::new(Glsl100::default()).compile(vertex, fragment)
}
