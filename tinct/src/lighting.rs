//! Fragment lighting.
//!
//! The fragment procedure writes a surface color and normal to two sinks declared at the top of `main`; once it
//! returns, a fixed epilogue lights the surface with an ambient term and a single directional sun, and writes the
//! final color. Both parts are written with the core itself.

use crate::{
  expr::{Rgba, Vec3},
  stage::{Core, FragmentCore},
};

/// Surface color sink.
pub const ALBEDO: &str = "lighting_albedo";

/// Surface normal sink.
pub const NORMAL: &str = "lighting_normal";

const AMBIENT: [f32; 3] = [0.2, 0.2, 0.2];
const SUN: [f32; 3] = [0., 1., 1.];
const SUN_COLOR: [f32; 3] = [1., 1., 1.];

/// Declare the sinks; returns the surface color and normal handles.
pub(crate) fn prologue<'s>(core: &Core<'s>) -> (Rgba<'s>, Vec3<'s>) {
  let albedo = core.var.define_named(ALBEDO, &core.new.rgba(0., 0., 0., 0.));
  let normal = core.var.define_named(NORMAL, &core.new.vec4(0., 0., -1., 0.));

  (albedo, normal.xyz())
}

/// Light the surface and write the final color.
pub(crate) fn epilogue(core: &FragmentCore<'_>) {
  let [r, g, b] = AMBIENT;
  let ambient = core.var.vec3(&core.new.vec3(r, g, b));
  let norm = core.var.vec3(&core.normal.normalize());

  let [x, y, z] = SUN;
  let sun = core.new.vec3(x, y, z).normalize();
  let light_dir = core.var.vec3(&(-sun).normalize());

  let diff = core.var.float(&norm.dot(&light_dir).max(&core.new.float(0.)));
  let [r, g, b] = SUN_COLOR;
  let diffuse = core.var.vec3(&core.new.vec3(r, g, b).scale(&diff));

  let lit = (ambient + diffuse) * core.fragment.rgb().vec3();
  core.set.vec4(&core.color, &lit.extend(&core.new.float(1.)));
}
