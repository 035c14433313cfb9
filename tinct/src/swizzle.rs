//! Component access.
//!
//! Vectors expose their channels as `x`, `y`, `z` and `w`; colors as `r`, `g`, `b` and `a`. Conversions between
//! vectors and colors of the same width live here too, as they are swizzles in every GLSL dialect.

use crate::expr::{handle_ops, Float, Handle as _, Rgb, Rgba, Vec2, Vec3, Vec4};

impl<'s> Vec2<'s> {
  handle_ops! {
    x() -> Float = X;
    y() -> Float = Y;
  }
}

impl<'s> Vec3<'s> {
  handle_ops! {
    x() -> Float = X;
    y() -> Float = Y;
    z() -> Float = Z;
    /// Reinterpret as a color.
    rgb() -> Rgb = ToRgb;
    /// Widen to a 4D vector with `w` as the last component.
    extend(w: Float) -> Vec4 = Extend;
  }
}

impl<'s> Vec4<'s> {
  handle_ops! {
    x() -> Float = X;
    y() -> Float = Y;
    z() -> Float = Z;
    w() -> Float = W;
    /// The first three components.
    xyz() -> Vec3 = Xyz;
    /// Reinterpret as a color with alpha.
    rgba() -> Rgba = ToRgba;
  }
}

impl<'s> Rgb<'s> {
  handle_ops! {
    r() -> Float = R;
    g() -> Float = G;
    b() -> Float = B;
    /// Reinterpret as a 3D vector.
    vec3() -> Vec3 = ToVec3;
    /// Widen to a 4D vector with an alpha of `1`.
    vec4() -> Vec4 = ToVec4;
  }
}

impl<'s> Rgba<'s> {
  handle_ops! {
    r() -> Float = R;
    g() -> Float = G;
    b() -> Float = B;
    a() -> Float = A;
    /// Drop the alpha channel.
    rgb() -> Rgb = Rgb;
    /// Reinterpret as a 4D vector.
    vec4() -> Vec4 = ToVec4;
  }
}

#[cfg(test)]
mod test {
  use crate::{
    expr::{test::named, Handle as _, Rgb, Rgba, Vec3, Vec4},
    glsl::glsl110::Glsl110,
    stage::Stage,
    state::{Ctx, State},
  };

  #[test]
  fn channels() {
    let (dialect, state) = (Glsl110::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Fragment);
    let v: Vec4 = named(ctx, "v");
    let c: Rgba = named(ctx, "c");

    assert_eq!(v.w().value(), "v.w");
    assert_eq!(v.xyz().x().value(), "v.xyz.x");
    assert_eq!(c.a().value(), "c.a");
    assert_eq!(c.rgb().vec3().value(), "c.rgb");
  }

  #[test]
  fn colors_widen_with_opaque_alpha() {
    let (dialect, state) = (Glsl110::default(), State::default());
    let ctx = Ctx::new(&dialect, &state, Stage::Fragment);
    let c: Rgb = named(ctx, "c");
    let n: Vec3 = named(ctx, "n");

    assert_eq!(c.vec4().value(), "vec4(c, 1.0)");
    assert_eq!(n.extend(&c.r()).value(), "vec4(n, c.r)");
    assert_eq!(n.rgb().value(), "n");
  }
}
