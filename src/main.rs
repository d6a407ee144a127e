use std::path::{Path, PathBuf};
use std::process::ExitCode;

use texraster::prelude::*;
use texraster::render::draw_triangle_outline;
use texraster::viewport::ScreenMapper;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 800;
const USAGE: &str = "usage: texraster [--wireframe] <model.obj> [texture] [output]";

struct Args {
    model: PathBuf,
    texture: Option<PathBuf>,
    output: PathBuf,
    wireframe: bool,
}

fn parse_args() -> Result<Args, &'static str> {
    let mut wireframe = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--wireframe" => wireframe = true,
            "-h" | "--help" => return Err(USAGE),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    let model = positional.next().ok_or(USAGE)?;
    Ok(Args {
        model,
        texture: positional.next(),
        output: positional.next().unwrap_or_else(|| PathBuf::from("output.tga")),
        wireframe,
    })
}

/// `out.tga` → `out_depth.tga`
fn depth_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let ext = output.extension().and_then(|s| s.to_str()).unwrap_or("tga");
    output.with_file_name(format!("{stem}_depth.{ext}"))
}

fn run(args: &Args) -> Result<(), RenderError> {
    let model = Model::from_obj(&args.model)?;
    let texture = args.texture.as_ref().map(Texture::from_file).transpose()?;

    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    let mut pass = RenderPass::new(&mut canvas, RenderConfig::default())?;
    if let Some(texture) = &texture {
        pass = pass.with_texture(texture);
    }
    pass.draw_faces(&model);
    let output = pass.finish();

    if args.wireframe {
        let mapper = ScreenMapper::new(WIDTH, HEIGHT);
        for face in model.faces() {
            let screen = face.positions.map(|p| mapper.map(p).xy());
            draw_triangle_outline(&mut canvas, &screen, Color::GREY);
        }
    }

    canvas.flip_vertically();
    canvas.save(&args.output)?;

    let mut depth_image = Canvas::new(WIDTH, HEIGHT);
    output.depth.write_debug(&mut depth_image);
    depth_image.flip_vertically();
    depth_image.save(depth_path(&args.output))?;

    println!("{}: {}", args.output.display(), output.stats);
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("texraster: {e}");
            ExitCode::FAILURE
        }
    }
}
