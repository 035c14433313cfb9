use std::{cell::Cell, env, rc::Rc};
use tinct::{TextureHandle, Version};

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
    )
    .with_writer(std::io::stderr)
    .init();

  let version = match env::args().nth(1).map(|arg| arg.parse::<Version>()) {
    Some(Ok(version)) => version,
    Some(Err(err)) => {
      eprintln!("{}", err);
      std::process::exit(1);
    }
    None => Version::Glsl460,
  };

  let view_projection = Rc::new(Cell::new([
    [1., 0., 0., 0.],
    [0., 1., 0., 0.],
    [0., 0., 1., 0.],
    [0., 0., 0., 1.],
  ]));
  let model = Rc::new(Cell::new(view_projection.get()));
  let time = Rc::new(Cell::new(0.));
  let albedo = Rc::new(Cell::new(TextureHandle(0)));

  let program = tinct::compile(
    version,
    |v| {
      let position = v.input.vec3("position");
      let normal = v.input.vec3("normal");
      let uv = v.input.vec2("uv");

      let model = v.get.mat4(&model);
      let world = v.var.vec4(&model.transform(&position.extend(&v.new.float(1.))));

      v.set.vec4(&v.position, &v.uniform.mat4(&view_projection).transform(&world));
      v.set.vec3(&v.out.vec3("normal"), &model.transform_normal(&normal));
      v.set.vec2(&v.out.vec2("uv"), &uv);
    },
    |f| {
      let uv = f.input.vec2("uv");
      let texel = f.var.rgba(&f.uniform.texture2d(&albedo).sample(&uv));

      f.when(&texel.a().less_than(&f.new.float(0.5)), || f.discard());

      // slowly pulse the surface
      let pulse = f.var.float(&f.uniform.float(&time).sin().max(&f.new.float(0.)));
      let tint = f.new.rgb(1., 0.8, 0.6).vec3().scale(&pulse);

      f.set.rgba(&f.fragment, &f.new.rgba_of(&(texel.rgb().vec3() + tint).rgb(), &texel.a()));
      f.set.vec3(&f.normal, &f.input.vec3("normal"));
    },
  );

  match program {
    Ok(program) => {
      println!("// vertex\n{}", program.vertex);
      println!("// fragment\n{}", program.fragment);

      for uniform in &program.uniforms {
        println!("// {} ({:?}): {:?}", uniform.name, uniform.frequency, uniform.binding.value());
      }
    }

    Err(err) => {
      eprintln!("cannot compile for GLSL {}: {}", version, err);
      std::process::exit(1);
    }
  }
}
