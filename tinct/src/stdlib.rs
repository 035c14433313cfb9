//! Built-in functions: float math, geometry, linear algebra and sampling.

use crate::{
  dialect::Op,
  expr::{
    handle_ops, Float, Handle, Mat2, Mat3, Mat4, Rgba, Texture1D, Texture2D, Texture3D, TextureCube,
    Vec2, Vec3, Vec4,
  },
  types::Type,
};
use std::ops;

impl<'s> Float<'s> {
  handle_ops! {
    // trigonometry
    radians() -> Float = Radians;
    degrees() -> Float = Degrees;
    sin() -> Float = Sin;
    cos() -> Float = Cos;
    tan() -> Float = Tan;
    asin() -> Float = Asin;
    acos() -> Float = Acos;
    atan() -> Float = Atan;

    // exponential
    pow(y: Float) -> Float = Pow;
    exp() -> Float = Exp;
    exp2() -> Float = Exp2;
    log() -> Float = Log;
    log2() -> Float = Log2;
    sqrt() -> Float = Sqrt;
    /// `1 / sqrt(self)`.
    isqrt() -> Float = InverseSqrt;
    /// Floored remainder of the division by `y`.
    modulo(y: Float) -> Float = Mod;

    // relative
    min(rhs: Float) -> Float = Min;
    max(rhs: Float) -> Float = Max;
    clamp(min_value: Float, max_value: Float) -> Float = Clamp;

    /// Linear interpolation from `self` to `to` by `t`.
    lerp(to: Float, t: Float) -> Float = Lerp;
    /// `0` if `self` is below `edge`, `1` otherwise.
    step(edge: Float) -> Float = Step;
    /// Hermite interpolation of `self` between `edge0` and `edge1`.
    smooth_step(edge0: Float, edge1: Float) -> Float = SmoothStep;
  }
}

macro_rules! impl_geometry {
  ($($t:ident),*) => {
    $(
      impl<'s> $t<'s> {
        handle_ops! {
          length() -> Float = Length;
          distance_to(other: $t) -> Float = Distance;
          dot(rhs: $t) -> Float = Dot;
          normalize() -> $t = Normalize;
        }
      }
    )*
  };
}

impl_geometry!(Vec2, Vec3, Vec4);

impl<'s> Vec3<'s> {
  handle_ops! {
    cross(rhs: Vec3) -> Vec3 = Cross;
  }
}

impl<'s> Mat2<'s> {
  handle_ops! {
    times(rhs: Mat2) -> Mat2 = Times;
    transform(v: Vec2) -> Vec2 = Transform;
  }
}

impl<'s> Mat3<'s> {
  handle_ops! {
    times(rhs: Mat3) -> Mat3 = Times;
    transform(v: Vec3) -> Vec3 = Transform;
  }
}

/// Vectors a 4×4 matrix can transform.
///
/// A [`Vec4`] is multiplied as is; a [`Vec3`] is treated as a point (`w = 1`) and projected back to three components.
pub trait Homogeneous<'s>: Handle<'s> {
  #[doc(hidden)]
  const TRANSFORM: Op;
}

impl<'s> Homogeneous<'s> for Vec3<'s> {
  const TRANSFORM: Op = Op::TransformPoint;
}

impl<'s> Homogeneous<'s> for Vec4<'s> {
  const TRANSFORM: Op = Op::Transform;
}

impl<'s> Mat4<'s> {
  handle_ops! {
    times(rhs: Mat4) -> Mat4 = Times;
    /// Transform a normal by the inverse transpose of `self`.
    ///
    /// Dialects without `inverse` and `transpose` get them from the stage helpers.
    transform_normal(normal: Vec3) -> Vec3 = TransformNormal;
  }

  /// Transform a point or a vector.
  pub fn transform<V>(&self, v: &V) -> V
  where
    V: Homogeneous<'s>,
  {
    self.raw().op(Type::Mat4, V::TRANSFORM, &[v.value()])
  }
}

macro_rules! impl_matrix_Mul {
  ($($t:ident),*) => {
    $(
      impl<'s> ops::Mul for $t<'s> {
        type Output = Self;

        fn mul(self, rhs: Self) -> Self::Output {
          self.times(&rhs)
        }
      }

      impl<'a, 's> ops::Mul for &'a $t<'s> {
        type Output = $t<'s>;

        fn mul(self, rhs: Self) -> Self::Output {
          self.times(rhs)
        }
      }
    )*
  };
}

impl_matrix_Mul!(Mat2, Mat3, Mat4);

impl<'s> Texture1D<'s> {
  handle_ops! {
    sample(coord: Float) -> Rgba = Sample;
  }
}

impl<'s> Texture2D<'s> {
  handle_ops! {
    sample(coord: Vec2) -> Rgba = Sample;
  }
}

impl<'s> Texture3D<'s> {
  handle_ops! {
    sample(coord: Vec3) -> Rgba = Sample;
  }
}

impl<'s> TextureCube<'s> {
  handle_ops! {
    /// Sample along a direction.
    sample(direction: Vec3) -> Rgba = Sample;
  }
}
