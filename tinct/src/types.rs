//! Semantic types.

use std::fmt;

/// The closed set of types a shader value can have.
///
/// A [`Type`] is the tag a [`Dialect`](crate::Dialect) maps to a target type name and uses to select operation
/// templates. Every value handle carries one of these as its [`Handle::TYPE`](crate::Handle::TYPE).
///
/// > Note: colors are distinct types from vectors so that a dialect can choose their representation; every GLSL dialect
/// > maps [`Type::Rgb`] to `vec3` and [`Type::Rgba`] to `vec4`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Type {
  /// Boolean.
  Bool,
  /// Signed 32-bit integer.
  Int,
  /// Unsigned 32-bit integer.
  Uint,
  /// Single-precision floating point.
  Float,
  /// 2D float vector.
  Vec2,
  /// 3D float vector.
  Vec3,
  /// 4D float vector.
  Vec4,
  /// Squared 2 float matrix.
  Mat2,
  /// Squared 3 float matrix.
  Mat3,
  /// Squared 4 float matrix.
  Mat4,
  /// Opaque color.
  Rgb,
  /// Color with alpha.
  Rgba,
  /// 1D texture sampler.
  Texture1D,
  /// 2D texture sampler.
  Texture2D,
  /// 3D texture sampler.
  Texture3D,
  /// Cube map sampler.
  TextureCube,
}

impl Type {
  /// Every type, in declaration order.
  pub const ALL: [Type; 16] = [
    Type::Bool,
    Type::Int,
    Type::Uint,
    Type::Float,
    Type::Vec2,
    Type::Vec3,
    Type::Vec4,
    Type::Mat2,
    Type::Mat3,
    Type::Mat4,
    Type::Rgb,
    Type::Rgba,
    Type::Texture1D,
    Type::Texture2D,
    Type::Texture3D,
    Type::TextureCube,
  ];

  /// Name of the type, as used in diagnostics.
  pub fn name(self) -> &'static str {
    match self {
      Type::Bool => "Bool",
      Type::Int => "Int",
      Type::Uint => "Uint",
      Type::Float => "Float",
      Type::Vec2 => "Vec2",
      Type::Vec3 => "Vec3",
      Type::Vec4 => "Vec4",
      Type::Mat2 => "Mat2",
      Type::Mat3 => "Mat3",
      Type::Mat4 => "Mat4",
      Type::Rgb => "Rgb",
      Type::Rgba => "Rgba",
      Type::Texture1D => "Texture1D",
      Type::Texture2D => "Texture2D",
      Type::Texture3D => "Texture3D",
      Type::TextureCube => "TextureCube",
    }
  }

  /// Whether the type is an opaque sampler.
  ///
  /// Samplers can only be bound as uniforms; they cannot be stored in variables nor passed between stages.
  pub fn is_sampler(self) -> bool {
    matches!(
      self,
      Type::Texture1D | Type::Texture2D | Type::Texture3D | Type::TextureCube
    )
  }

  /// Number of components of a composite constructor for this type, if it has one.
  ///
  /// Matrices are built from their columns.
  pub fn components(self) -> Option<usize> {
    match self {
      Type::Vec2 | Type::Mat2 => Some(2),
      Type::Vec3 | Type::Mat3 | Type::Rgb => Some(3),
      Type::Vec4 | Type::Mat4 | Type::Rgba => Some(4),
      _ => None,
    }
  }
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn names_are_unique() {
    for (i, a) in Type::ALL.iter().enumerate() {
      for b in &Type::ALL[i + 1..] {
        assert_ne!(a.name(), b.name());
      }
    }
  }

  #[test]
  fn samplers_have_no_constructor() {
    for ty in Type::ALL {
      if ty.is_sampler() {
        assert_eq!(ty.components(), None);
      }
    }

    assert_eq!(Type::Mat3.components(), Some(3));
    assert_eq!(Type::Float.components(), None);
  }
}
