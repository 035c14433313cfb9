//! Tinct, a staged shading language in vanilla Rust.
//!
//! This crate provides an [EDSL] to write [shaders] as ordinary Rust closures and compile them to several versions of
//! [GLSL] at runtime. A vertex and a fragment procedure are run once against a _dialect_; every operation they perform
//! on typed handles emits target code, and the result is a pair of source strings ready to be handed to the graphics
//! driver, along with the list of uniforms the program reads.
//!
//! # Motivation
//!
//! Shaders are usually _opaque strings_: hard-coded, loaded from files, or assembled from fragments concatenated with
//! each others. Supporting several targets (WebGL 1, old desktop GL and modern GL) then means maintaining several
//! copies of the same shader, and the type errors in any of them only show up when the driver refuses the code.
//!
//! With this crate, the shading code is Rust code:
//!
//! - Assigning a `Vec3` to a `Float`, or sampling a texture with a float, is a `rustc` error.
//! - Stage-specific features are only reachable from the right stage: there is no `discard` on the vertex core, and no
//!   way to write the vertex position from the fragment stage.
//! - The same procedures compile to GLSL ES 1.00, GLSL 1.10 and GLSL 4.60. Differences between versions (unsigned
//!   integers, sampling functions, storage qualifiers, missing matrix functions) are handled by the dialects.
//! - Since procedures are closures, programs can be generated: loop over materials, branch on runtime settings, share
//!   helpers between shaders, etc.
//!
//! # Staging
//!
//! Handles such as [`Float`] or [`Vec3`] do not hold values: they hold _expressions_ of the target language. Adding
//! two handles does not add anything; it returns a new handle whose expression is the sum of both. Statements
//! (variable definitions, assignments, control flow) are written to the stage as the procedure calls them, through
//! the [`Core`] it receives.
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//!
//! let projection = Rc::new(Cell::new([[0.; 4]; 4]));
//! let view = Rc::new(Cell::new([[0.; 4]; 4]));
//!
//! let program = tinct::glsl110::compile(
//!   |v| {
//!     let position = v.input.vec4("position");
//!     let pv = v.uniform.mat4(&projection) * v.uniform.mat4(&view);
//!     v.set.vec4(&v.position, &pv.transform(&position));
//!   },
//!   |f| f.set.rgba(&f.fragment, &f.new.rgba(1., 0., 0., 1.)),
//! )
//! .unwrap();
//!
//! assert!(program
//!   .vertex
//!   .contains("gl_Position = ((uniform_1 * uniform_2) * position);\n"));
//! assert_eq!(program.uniforms.len(), 2);
//! ```
//!
//! # Uniforms
//!
//! A uniform is bound to a shared [`Cell`](std::cell::Cell): the application keeps its end of the [`Rc`](std::rc::Rc)
//! and updates it between draws, and reads the current values back from [`Program::uniforms`] before uploading them.
//! Using the same cell twice reuses the same uniform.
//!
//! # Lighting
//!
//! The fragment procedure does not write the final color. It writes a surface color to `fragment` and optionally a
//! normal to `normal`, and a fixed lighting pass (ambient plus one directional sun) produces the final color.
//!
//! # Errors
//!
//! Operators cannot fail, so problems found while emitting (a type the dialect cannot express, a fragment input no
//! vertex output matches, …) are recorded and the procedure carries on. [`Source::compile`] then returns the first of
//! them instead of a program.
//!
//! [EDSL]: https://en.wikipedia.org/wiki/Domain-specific_language#External_and_Embedded_Domain_Specific_Languages
//! [shaders]: https://en.wikipedia.org/wiki/Shader
//! [GLSL]: https://www.khronos.org/registry/OpenGL/specs/gl/GLSLangSpec.4.60.pdf

mod attribute;
mod builtin;
pub mod dialect;
mod error;
mod expr;
mod glsl;
mod lighting;
mod lit;
mod scope;
mod source;
mod stage;
mod state;
mod stdlib;
mod swizzle;
mod template;
mod types;
mod uniform;
mod var;

pub use crate::{
  attribute::{Attributes, VARYING_PREFIX},
  builtin::BuiltIn,
  dialect::{Decl, Dialect, Op, Stmt, Template},
  error::{Error, Result},
  expr::{
    Bool, Float, Handle, Int, Mat2, Mat3, Mat4, Rgb, Rgba, Texture1D, Texture2D, Texture3D, TextureCube, Uint,
    Value, Vec2, Vec3, Vec4,
  },
  glsl::{compile, glsl100, glsl110, glsl460, Version},
  lit::Constructor,
  scope::When,
  source::{Program, Source},
  stage::{Core, FragmentCore, Stage, VertexCore},
  stdlib::Homogeneous,
  types::Type,
  uniform::{Binding, Frequency, TextureHandle, UniformRecord, UniformValue, Uniforms},
  var::{Definer, Setter},
};
