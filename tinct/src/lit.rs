//! Literals and composite constructors.

use crate::{
  dialect::Template,
  expr::{Bool, Float, Handle, Int, Mat2, Mat3, Mat4, Raw, Rgb, Rgba, Uint, Vec2, Vec3, Vec4},
  state::Ctx,
};
use std::fmt;

/// Literal and composite constructors of a stage.
///
/// Float literals are rendered with a fixed number of decimals (4 unless the dialect says otherwise) and always carry
/// a decimal point: `new.float(1.)` is `1.0000`. Integers render in decimal.
pub struct Constructor<'s> {
  ctx: Ctx<'s>,
}

impl fmt::Debug for Constructor<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Constructor")
      .field("stage", &self.ctx.stage)
      .finish()
  }
}

impl<'s> Constructor<'s> {
  pub(crate) fn new(ctx: Ctx<'s>) -> Self {
    Self { ctx }
  }

  fn wrap<T>(&self, value: String) -> T
  where
    T: Handle<'s>,
  {
    T::from_raw(Raw::new(value, self.ctx))
  }

  fn literal<T>(&self, value: &str) -> T
  where
    T: Handle<'s>,
  {
    self.wrap(self.ctx.render(Template::Literal(T::TYPE), &[value]))
  }

  fn construct<T>(&self, components: &[&str]) -> T
  where
    T: Handle<'s>,
  {
    self.wrap(self.ctx.render(Template::Construct(T::TYPE), components))
  }

  fn floats<T>(&self, components: &[f32]) -> T
  where
    T: Handle<'s>,
  {
    let rendered = components
      .iter()
      .map(|&x| self.ctx.float(x))
      .collect::<Vec<_>>();
    let components = rendered.iter().map(String::as_str).collect::<Vec<_>>();

    self.construct(&components)
  }

  pub fn bool(&self, b: bool) -> Bool<'s> {
    self.literal(if b { "true" } else { "false" })
  }

  pub fn int(&self, i: i32) -> Int<'s> {
    self.literal(&i.to_string())
  }

  pub fn uint(&self, u: u32) -> Uint<'s> {
    self.literal(&u.to_string())
  }

  pub fn float(&self, x: f32) -> Float<'s> {
    self.wrap(self.ctx.float(x))
  }

  pub fn vec2(&self, x: f32, y: f32) -> Vec2<'s> {
    self.floats(&[x, y])
  }

  pub fn vec3(&self, x: f32, y: f32, z: f32) -> Vec3<'s> {
    self.floats(&[x, y, z])
  }

  pub fn vec4(&self, x: f32, y: f32, z: f32, w: f32) -> Vec4<'s> {
    self.floats(&[x, y, z, w])
  }

  pub fn rgb(&self, r: f32, g: f32, b: f32) -> Rgb<'s> {
    self.floats(&[r, g, b])
  }

  pub fn rgba(&self, r: f32, g: f32, b: f32, a: f32) -> Rgba<'s> {
    self.floats(&[r, g, b, a])
  }

  /// Build a 2D vector from float expressions.
  pub fn vec2_of(&self, x: &Float<'s>, y: &Float<'s>) -> Vec2<'s> {
    self.construct(&[x.value(), y.value()])
  }

  /// Build a 3D vector from float expressions.
  pub fn vec3_of(&self, x: &Float<'s>, y: &Float<'s>, z: &Float<'s>) -> Vec3<'s> {
    self.construct(&[x.value(), y.value(), z.value()])
  }

  /// Build a 4D vector from float expressions.
  pub fn vec4_of(&self, x: &Float<'s>, y: &Float<'s>, z: &Float<'s>, w: &Float<'s>) -> Vec4<'s> {
    self.construct(&[x.value(), y.value(), z.value(), w.value()])
  }

  /// Build a color with alpha from an opaque color and an alpha expression.
  pub fn rgba_of(&self, rgb: &Rgb<'s>, a: &Float<'s>) -> Rgba<'s> {
    rgb.vec3().extend(a).rgba()
  }

  /// Build a 2×2 matrix from its columns.
  pub fn mat2(&self, columns: [[f32; 2]; 2]) -> Mat2<'s> {
    let columns = columns.map(|[x, y]| self.vec2(x, y));
    self.construct(&[columns[0].value(), columns[1].value()])
  }

  /// Build a 3×3 matrix from its columns.
  pub fn mat3(&self, columns: [[f32; 3]; 3]) -> Mat3<'s> {
    let columns = columns.map(|[x, y, z]| self.vec3(x, y, z));
    self.construct(&[columns[0].value(), columns[1].value(), columns[2].value()])
  }

  /// Build a 4×4 matrix from its columns.
  pub fn mat4(&self, columns: [[f32; 4]; 4]) -> Mat4<'s> {
    let columns = columns.map(|[x, y, z, w]| self.vec4(x, y, z, w));
    self.construct(&[
      columns[0].value(),
      columns[1].value(),
      columns[2].value(),
      columns[3].value(),
    ])
  }
}
