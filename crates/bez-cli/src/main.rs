//! bezmesh: tessellate Bézier patch files and export triangle meshes.
//!
//! ```text
//! bezmesh models/teapot.bez 0.1            # uniform, step 0.1
//! bezmesh models/teapot.bez 0.01 -a        # adaptive, tolerance 0.01
//! bezmesh models/teapot.bez 0.1 -o out.obj # write OBJ and exit
//! ```
//!
//! Without `-o` the model is prepared for rendering and a summary of the
//! mesh, GPU buffers and view state is printed.

#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process;

use bez_core::{Result, Validate};
use bez_io::{read_model, write_obj_file, InputFormat};
use bez_math::Color;
use bez_mesh::config::DEFAULT_MAX_DEPTH;
use bez_mesh::{Model, ShadingMode, SubdivisionMode, TessellationConfig};
use bez_render::{prepare_model, FrameUniforms, ViewCommand, ViewState};
use clap::Parser;

const VIEWPORT: (u32, u32) = (800, 800);

/// Command-line arguments for the tessellator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Args {
    /// Input model: `.bez` patches or an `.obj` mesh
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Step size (uniform) or flatness tolerance (adaptive)
    #[arg(value_name = "PARAMETER")]
    parameter: f64,

    /// Use adaptive subdivision
    #[arg(short, long)]
    adaptive: bool,

    /// Write the tessellated mesh as OBJ and exit
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Diffuse light color
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
    color: Option<Vec<f64>>,

    /// Recursion bound for adaptive subdivision
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Start with smooth shading
    #[arg(long)]
    smooth: bool,

    /// View keys to apply before preparing the frame (`s`, `w`, `h`, `=`, `-`)
    #[arg(long, value_name = "KEYS", default_value = "")]
    keys: String,

    /// Move the eye so the whole model is in view
    #[arg(long)]
    fit: bool,
}

impl Args {
    fn tessellation_config(&self) -> TessellationConfig {
        let mode = if self.adaptive {
            SubdivisionMode::Adaptive
        } else {
            SubdivisionMode::Uniform
        };
        TessellationConfig::new(mode, self.parameter).with_max_depth(self.max_depth)
    }

    fn light_color(&self) -> Result<Color> {
        let color = match self.color.as_deref() {
            Some(&[r, g, b]) => Color::new(r, g, b),
            _ => ViewState::default().light_color,
        };
        color.validate()?;
        Ok(color)
    }

    fn view_state(&self) -> Result<ViewState> {
        let shading = if self.smooth {
            ShadingMode::Smooth
        } else {
            ShadingMode::Flat
        };
        let commands = self.keys.chars().filter_map(|key| {
            let command = ViewCommand::from_key(key);
            if command.is_none() {
                log::warn!("ignoring unbound view key {key:?}");
            }
            command
        });
        Ok(ViewState::default()
            .with_shading(shading)
            .with_light_color(self.light_color()?)
            .apply_all(commands))
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.tessellation_config();
    config.validate()?;
    let view = args.view_state()?;

    log::info!("loading {}", args.input.display());
    let mut model = read_model(&args.input)?;
    if InputFormat::from_path(&args.input) == InputFormat::Obj {
        log::info!("mesh input, subdivision parameter ignored");
    }
    model.subdivide(&config)?;

    if let Some(output) = &args.output {
        write_obj_file(&model, output)?;
        println!("wrote {} triangles to {}", model.triangle_count(), output.display());
        return Ok(());
    }

    let view = match model.bounds() {
        Some(bounds) if args.fit => view.framed(&bounds),
        _ => view,
    };
    print_summary(&model, &view);
    Ok(())
}

fn print_summary(model: &Model, view: &ViewState) {
    let mesh = prepare_model(model, view);
    let uniforms = FrameUniforms::from_view(view, VIEWPORT.0, VIEWPORT.1);

    println!("patches:       {}", model.patches.len());
    println!("triangles:     {}", model.triangle_count());
    match model.bounds() {
        Some(b) => println!(
            "bounds:        ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
            b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
        ),
        None => println!("bounds:        empty"),
    }
    println!(
        "vertex buffer: {} vertices, {} bytes",
        mesh.vertices.len(),
        mesh.vertex_bytes().len()
    );
    println!("index buffer:  {} bytes", mesh.index_bytes().len());
    println!("uniforms:      {} bytes", uniforms.as_bytes().len());
    println!(
        "light color:   ({}, {}, {})",
        view.light_color.r, view.light_color.g, view.light_color.b
    );
    println!(
        "view:          {:?} shading, {:?} polygons, zoom {:.2}",
        view.shading, mesh.polygon_mode, view.zoom
    );
}
