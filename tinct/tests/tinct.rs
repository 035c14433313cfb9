use std::{cell::Cell, rc::Rc};
use tinct::{
  dialect, glsl100::Glsl100, glsl110::Glsl110, glsl460::Glsl460, Binding, Dialect, Error, Frequency,
  Source, TextureHandle, Type, UniformValue, Version,
};

fn dialects() -> Vec<Box<dyn Dialect>> {
  vec![
    Box::new(Glsl100::default()),
    Box::new(Glsl110::default()),
    Box::new(Glsl460::default()),
  ]
}

#[test]
fn flat_color() {
  let program = tinct::glsl110::compile(
    |v| {
      let position = v.input.vec4("position");
      v.set.vec4(&v.position, &position);
    },
    |f| f.set.rgba(&f.fragment, &f.new.rgba(1., 0., 0., 1.)),
  )
  .unwrap();

  assert!(program.vertex.starts_with("#version 110\n"));
  assert!(program.vertex.contains("attribute vec4 position;\n"));
  assert!(program
    .vertex
    .ends_with("\nvoid main() {\ngl_Position = position;\n}\n"));
  assert!(program
    .fragment
    .contains("lighting_albedo = vec4(1.0000, 0.0000, 0.0000, 1.0000);\n"));
  assert!(program.uniforms.is_empty());
}

#[test]
fn transformed_position() {
  let projection = Rc::new(Cell::new([[1., 0., 0., 0.]; 4]));
  let view = Rc::new(Cell::new([[0., 1., 0., 0.]; 4]));

  let program = tinct::glsl110::compile(
    |v| {
      let position = v.input.vec4("position");
      let pv = v.uniform.mat4(&projection) * v.uniform.mat4(&view);
      v.set.vec4(&v.position, &pv.transform(&position));
    },
    |_| {},
  )
  .unwrap();

  assert!(program
    .vertex
    .contains("uniform mat4 uniform_1;\nuniform mat4 uniform_2;\n"));
  assert!(program
    .vertex
    .contains("gl_Position = ((uniform_1 * uniform_2) * position);\n"));

  let [first, second] = &program.uniforms[..] else {
    panic!("expected two uniforms, got {:?}", program.uniforms);
  };

  assert_eq!(first.name, "uniform_1");
  assert_eq!(second.name, "uniform_2");
  assert_eq!(first.frequency, Frequency::Frame);
  assert!(first.binding.ptr_eq(&Binding::Mat4(Rc::clone(&projection))));
  assert!(second.binding.ptr_eq(&Binding::Mat4(Rc::clone(&view))));
  assert!(!first.binding.ptr_eq(&second.binding));

  // the driver reads the cells when it uploads
  view.set([[2.; 4]; 4]);
  assert_eq!(second.binding.value(), UniformValue::Mat4([[2.; 4]; 4]));
}

#[test]
fn alpha_tested_texture() {
  let texture = Rc::new(Cell::new(TextureHandle(42)));

  let program = tinct::glsl110::compile(
    |v| {
      let uv = v.input.vec2("uv");
      v.set.vec2(&v.out.vec2("uv"), &uv);
      v.set.vec4(&v.position, &v.input.vec4("position"));
    },
    |f| {
      let uv = f.input.vec2("uv");
      let color = f.var.rgba(&f.uniform.texture2d(&texture).sample(&uv));

      f.when(&color.a().less_than(&f.new.float(0.85)), || f.discard());
      f.set.rgba(&f.fragment, &color);
    },
  )
  .unwrap();

  assert!(program.vertex.contains("varying vec2 frag_uv;\n"));
  assert!(program.vertex.contains("frag_uv = uv;\n"));
  assert!(program.fragment.contains("uniform sampler2D uniform_1;\n"));
  assert!(program.fragment.contains("varying vec2 frag_uv;\n"));
  assert!(program.fragment.contains(
    "vec4 var_1 = texture2D(uniform_1, frag_uv);\n\
     if ((var_1.a < 0.8500)) {\n\
     \tdiscard;\n\
     }\n\
     lighting_albedo = var_1;\n"
  ));
  assert_eq!(
    program.uniforms[0].binding.value(),
    UniformValue::Texture2D(TextureHandle(42))
  );
}

#[test]
fn counting_loop() {
  let program = tinct::glsl110::compile(
    |v| {
      let position = v.input.vec4("position");

      v.range(&v.new.int(0), &v.new.int(4), |_| {
        v.set.vec4(&v.position, &position);
      });
    },
    |_| {},
  )
  .unwrap();

  assert!(program
    .vertex
    .contains("for (int var_1 = 0; var_1 < 4; var_1++) {\n\tgl_Position = position;\n}\n"));
}

#[test]
fn nested_blocks_indent() {
  let program = tinct::glsl460::compile(
    |v| {
      let i = v.var.int(&v.new.int(0));

      v.loop_while(&i.less_than(&v.new.int(10)), || {
        v.when(&i.more_than(&v.new.int(5)), || v.loop_break())
          .or_else(&i.less_than(&v.new.int(2)), || v.loop_continue());
        v.set.int(&i, &(&i + &v.new.int(1)));
      });
    },
    |_| {},
  )
  .unwrap();

  assert!(program.vertex.contains(
    "int var_1 = 0;\n\
     while ((var_1 < 10)) {\n\
     \tif ((var_1 > 5)) {\n\
     \t\tbreak;\n\
     \t}\n\
     \telse if ((var_1 < 2)) {\n\
     \t\tcontinue;\n\
     \t}\n\
     \tvar_1 = (var_1 + 1);\n\
     }\n"
  ));
}

#[test]
fn normal_transform_on_core_profile() {
  let view_projection = Rc::new(Cell::new([[0.; 4]; 4]));
  let model = Rc::new(Cell::new([[0.; 4]; 4]));

  let program = tinct::glsl460::compile(
    |v| {
      let position = v.input.vec3("position");
      let normal = v.input.vec3("normal");
      let vp = v.uniform.mat4(&view_projection);
      let model = v.uniform.mat4(&model);

      v.set.vec4(&v.position, &(vp * model.clone()).transform(&position.extend(&v.new.float(1.))));
      v.set.vec3(&v.out.vec3("normal"), &model.transform_normal(&normal));
    },
    |f| {
      let normal = f.input.vec3("normal");
      f.set.vec3(&f.normal, &normal);
    },
  )
  .unwrap();

  assert!(program.vertex.starts_with("#version 460\n#extension GL_ARB_bindless_texture : require\n"));
  assert!(program.vertex.contains("in vec3 normal;\n"));
  assert!(program.vertex.contains("out vec3 frag_normal;\n"));
  assert!(program
    .vertex
    .contains("frag_normal = (transpose(inverse(uniform_2)) * normal);\n"));
  assert!(program.fragment.contains("in vec3 frag_normal;\n"));
  assert!(program.fragment.contains("lighting_normal.xyz = frag_normal;\n"));
  assert!(!program.vertex.contains("mat4 inverse(mat4 m)"));
}

#[test]
fn empty_program() {
  for version in Version::ALL {
    let program = tinct::compile(version, |_| {}, |_| {}).unwrap();

    assert!(program.vertex.ends_with("\nvoid main() {\n}\n"), "{}", version);
    assert!(program.fragment.contains("lighting_albedo"), "{}", version);
    assert!(program.uniforms.is_empty());
  }
}

#[test]
fn every_dialect_is_well_formed() {
  for d in dialects() {
    assert_eq!(dialect::check(d.as_ref()), Ok(()), "{}", d.name());
  }
}

#[test]
fn type_names() {
  for d in dialects() {
    for ty in Type::ALL {
      assert!(!d.type_of(ty).unwrap().is_empty());
    }
  }
}

#[test]
fn shared_uniform_is_declared_once_per_stage() {
  let time = Rc::new(Cell::new(0.));

  for version in Version::ALL {
    let program = tinct::compile(
      version,
      |v| {
        let t = v.uniform.float(&time);
        let s = v.var.float(&(&t * &v.uniform.float(&time)));
        v.set.float(&s, &t.sin());
      },
      |f| {
        f.var.float(&f.uniform.float(&time).cos());
      },
    )
    .unwrap();

    assert_eq!(program.uniforms.len(), 1);
    assert_eq!(program.vertex.matches("uniform float uniform_1;").count(), 1);
    assert_eq!(program.fragment.matches("uniform float uniform_1;").count(), 1);
    assert!(program.vertex.contains("float var_1 = (uniform_1 * uniform_1);\n"));
  }
}

#[test]
fn variables_are_defined_once() {
  let program = tinct::glsl110::compile(
    |v| {
      let mut x = v.var.float(&v.new.float(0.));

      for _ in 0..8 {
        x = v.var.float(&(&x + &v.new.float(1.)));
      }
    },
    |f| {
      f.var.int(&f.new.int(3));
    },
  )
  .unwrap();

  let definitions = |source: &str, n: u32| {
    source
      .lines()
      .filter(|line| line.contains(&format!(" var_{} = ", n)))
      .count()
  };

  for n in 1..=9 {
    assert_eq!(definitions(&program.vertex, n), 1, "var_{}", n);
    assert_eq!(definitions(&program.fragment, n), 0, "var_{}", n);
  }

  // counters are shared by both stages
  assert!(program.fragment.contains("int var_10 = 3;\n"));
}

#[test]
fn varyings_are_declared_in_both_stages() {
  let program = tinct::glsl460::compile(
    |v| {
      v.set.vec2(&v.out.vec2("uv"), &v.new.vec2(0., 1.));
      v.set.rgb(&v.out.rgb("tint"), &v.new.rgb(1., 1., 1.));
    },
    |f| {
      let tint = f.input.rgb("tint");
      let uv = f.input.vec2("uv");
      f.set.rgba(&f.fragment, &f.new.rgba_of(&tint, &uv.x()));
    },
  )
  .unwrap();

  assert!(program.vertex.contains("out vec2 frag_uv;\nout vec3 frag_tint;\n"));
  assert!(program.fragment.contains("in vec3 frag_tint;\nin vec2 frag_uv;\n"));
  assert!(program
    .fragment
    .contains("lighting_albedo = vec4(frag_tint, frag_uv.x);\n"));
}

#[test]
fn textures_on_es() {
  let volume = Rc::new(Cell::new(TextureHandle(1)));
  let strip = Rc::new(Cell::new(TextureHandle(2)));

  let program = tinct::glsl100::compile(
    |v| {
      let texel = v.uniform.texture3d(&volume).sample(&v.new.vec3(0., 0., 0.));
      let row = v.uniform.texture1d(&strip).sample(&v.new.float(0.5));
      v.set.vec4(&v.position, &(&texel.vec4() + &row.vec4()));
    },
    |_| {},
  )
  .unwrap();

  assert!(program
    .vertex
    .starts_with("#version 100\n#extension GL_OES_texture_3D : enable\nprecision mediump float;\n"));
  assert!(program
    .vertex
    .contains("uniform sampler3D uniform_1;\nuniform sampler2D uniform_2;\n"));
  assert!(program.vertex.contains(
    "gl_Position = (texture3D(uniform_1, vec3(0.0000, 0.0000, 0.0000)) + texture2D(uniform_2, vec2(0.5000, 0.5)));"
  ));
  assert!(program
    .fragment
    .starts_with("#version 100\nprecision mediump float;\n"));
}

#[test]
fn unmatched_varying() {
  let err = tinct::glsl110::compile(
    |_| {},
    |f| {
      let uv = f.input.vec2("uv");
      f.set.rgba(&f.fragment, &f.new.vec4_of(&uv.x(), &uv.y(), &f.new.float(0.), &f.new.float(1.)).rgba());
    },
  )
  .unwrap_err();

  assert_eq!(
    err,
    Error::UnmatchedVarying {
      name: "frag_uv".to_owned()
    }
  );
}

#[test]
fn mismatched_varying() {
  let err = tinct::glsl460::compile(
    |v| {
      v.set.vec2(&v.out.vec2("uv"), &v.new.vec2(0., 0.));
    },
    |f| {
      f.input.vec3("uv");
    },
  )
  .unwrap_err();

  assert_eq!(
    err,
    Error::VaryingMismatch {
      name: "frag_uv".to_owned(),
      output: Type::Vec2,
      input: Type::Vec3,
    }
  );
}

#[test]
fn first_error_wins() {
  let err = tinct::glsl100::compile(
    |v| {
      v.input.vec2("frag_uv");
      v.input.float("var_1");
    },
    |f| {
      f.input.float("missing");
    },
  )
  .unwrap_err();

  assert_eq!(
    err,
    Error::ReservedName {
      name: "frag_uv".to_owned()
    }
  );
}

#[test]
fn attribute_named_like_a_varying() {
  let err = tinct::glsl110::compile(
    |v| {
      let uv = v.input.vec2("frag_uv");
      v.set.vec2(&v.out.vec2("uv"), &uv);
    },
    |f| {
      f.input.vec2("uv");
    },
  )
  .unwrap_err();

  assert_eq!(
    err,
    Error::ReservedName {
      name: "frag_uv".to_owned()
    }
  );
}

#[test]
fn integer_varyings() {
  let program = tinct::glsl460::compile(
    |v| {
      let id = v.input.int("id");
      v.set.int(&v.out.int("id"), &id);
    },
    |f| {
      let id = f.input.int("id").to_float();
      let color = f.new.vec4_of(&id, &id, &id, &f.new.float(1.)).rgba();
      f.set.rgba(&f.fragment, &color);
    },
  )
  .unwrap();

  assert!(program.vertex.contains("in int id;\nflat out int frag_id;\n"));
  assert!(program.fragment.contains("flat in int frag_id;\n"));

  let err = tinct::glsl110::compile(
    |v| {
      v.set.int(&v.out.int("id"), &v.new.int(3));
    },
    |_| {},
  )
  .unwrap_err();

  assert_eq!(
    err,
    Error::UnsupportedInterface {
      name: "frag_id".to_owned(),
      ty: Type::Int,
      dialect: "GLSL 110",
    }
  );
}

#[test]
fn boolean_attribute() {
  let err = tinct::glsl110::compile(
    |v| {
      v.input.bool("flag");
    },
    |_| {},
  )
  .unwrap_err();

  assert_eq!(
    err,
    Error::UnsupportedInterface {
      name: "flag".to_owned(),
      ty: Type::Bool,
      dialect: "GLSL 110",
    }
  );
}

#[test]
fn uniform_read_per_frame_and_per_draw() {
  let model = Rc::new(Cell::new([[0.; 4]; 4]));

  let err = Source::new(Glsl460::default().with_indexed_draws(true))
    .compile(
      |v| {
        let position = v.input.vec4("position");
        let world = v.uniform.mat4(&model).transform(&position);
        v.set.vec4(&v.position, &v.get.mat4(&model).transform(&world));
      },
      |_| {},
    )
    .unwrap_err();

  assert_eq!(
    err,
    Error::FrequencyMismatch {
      name: "uniform_1".to_owned(),
      first: Frequency::Frame,
      second: Frequency::Draw,
    }
  );
}

#[test]
fn redeclared_attribute() {
  let err = tinct::glsl110::compile(
    |v| {
      v.input.vec3("position");
      v.input.vec4("position");
    },
    |_| {},
  )
  .unwrap_err();

  assert_eq!(
    err,
    Error::Redeclared {
      name: "position".to_owned(),
      first: Type::Vec3,
      second: Type::Vec4,
    }
  );
}

#[test]
fn uint_emulation_on_legacy() {
  let program = tinct::glsl110::compile(
    |v| {
      let count = v.var.uint(&v.new.uint(3));
      v.set.uint(&count, &(&count - &v.new.uint(5)));
    },
    |_| {},
  )
  .unwrap();

  assert!(program
    .vertex
    .contains("int var_1 = 3;\nvar_1 = int(max(0.0, float(var_1 - 5)));\n"));

  let program = tinct::glsl460::compile(
    |v| {
      let count = v.var.uint(&v.new.uint(3));
      v.set.uint(&count, &(&count - &v.new.uint(5)));
    },
    |_| {},
  )
  .unwrap();

  assert!(program
    .vertex
    .contains("uint var_1 = 3u;\nvar_1 = (var_1 - 5u);\n"));
}

#[test]
fn indexed_draws() {
  let offset = Rc::new(Cell::new([0.; 4]));
  let tint = Rc::new(Cell::new([1.; 4]));
  let exposure = Rc::new(Cell::new(1.));

  let program = Source::new(Glsl460::default().with_indexed_draws(true))
    .compile(
      |v| {
        let position = v.input.vec4("position");
        v.set.vec4(&v.position, &(position + v.get.vec4(&offset)));
      },
      |f| {
        let tint = f.get.rgba(&tint).vec4().scale(&f.uniform.float(&exposure));
        f.set.rgba(&f.fragment, &tint.rgba());
      },
    )
    .unwrap();

  assert!(program.vertex.contains(
    "layout(std430, binding = 0) readonly buffer uniform_1_block { vec4 uniform_1[]; };\n"
  ));
  assert!(program.vertex.contains("flat out int uniform_draw;\n"));
  assert!(program.vertex.contains(
    "void main() {\nuniform_draw = gl_DrawID;\ngl_Position = (position + uniform_1[gl_DrawID]);\n"
  ));

  assert!(program.fragment.contains(
    "layout(std430, binding = 1) readonly buffer uniform_2_block { vec4 uniform_2[]; };\n"
  ));
  assert!(program.fragment.contains("uniform float uniform_3;\n"));
  assert!(program.fragment.contains("flat in int uniform_draw;\n"));
  assert!(program
    .fragment
    .contains("lighting_albedo = (uniform_2[uniform_draw] * uniform_3);\n"));

  let blocks: Vec<_> = program.uniforms.iter().map(|u| (u.frequency, u.block)).collect();
  assert_eq!(
    blocks,
    [
      (Frequency::Draw, Some(0)),
      (Frequency::Draw, Some(1)),
      (Frequency::Frame, None),
    ]
  );
}

#[test]
fn per_draw_uniforms_without_indexed_draws() {
  let offset = Rc::new(Cell::new([0.; 4]));

  let program = tinct::glsl460::compile(
    |v| v.set.vec4(&v.position, &v.get.vec4(&offset)),
    |_| {},
  )
  .unwrap();

  assert!(program.vertex.contains("uniform vec4 uniform_1;\n"));
  assert!(!program.vertex.contains("uniform_draw"));
  assert_eq!(program.uniforms[0].frequency, Frequency::Draw);
  assert_eq!(program.uniforms[0].block, None);
}

#[test]
fn float_precision() {
  let program = Source::new(Glsl110::default().with_float_precision(1))
    .compile(|v| v.set.vec4(&v.position, &v.new.vec4(0.3, 0.5, 1., 1.)), |_| {})
    .unwrap();

  assert!(program
    .vertex
    .contains("gl_Position = vec4(0.3, 0.5, 1.0, 1.0);\n"));
}
