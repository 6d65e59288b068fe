mod cli;

use std::path::Path;
use std::process::ExitCode;

use bordered_core::{
    BorderedError, Bounds, FrameDocument, LineWidth, LineWidthUnit, RectStyle, Rgba,
};
use bordered_export::PngOptions;
use bordered_render::SHADER_SOURCE;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, BackendArg, Command};

const DEFAULT_FILTER: &str = "bordered=info";

fn init_logging(log_level: Option<&str>) {
    let filter = match log_level {
        Some(directive) => EnvFilter::try_new(directive).map_err(|_| ()),
        None => EnvFilter::try_from_default_env().map_err(|_| ()),
    }
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Sample document printed by `bordered template`.
fn template_document() -> FrameDocument {
    FrameDocument::new(320, 200)
        .with_background(Rgba::from_hex_u32(0x1E293BFF))
        .with_rect(
            Bounds::from_scalars(20.0, 20.0, 180.0, 100.0),
            RectStyle::new(
                Rgba::from_hex_u32(0x3B82F6FF),
                Rgba::WHITE,
                LineWidth::Uniform(4.0),
            ),
        )
        .with_rect(
            Bounds::from_scalars(140.0, 80.0, 160.0, 100.0),
            RectStyle::new(
                Rgba::new(0.94, 0.27, 0.27, 0.75),
                Rgba::BLACK,
                LineWidth::PerAxis { x: 0.05, y: 0.1 },
            )
            .with_unit(LineWidthUnit::Normalized),
        )
}

fn render(
    input: &Path,
    output: &Path,
    backend: BackendArg,
    clamp_line_width: bool,
) -> Result<(), BorderedError> {
    let mut doc = FrameDocument::load(input)?;
    doc.clamp_line_width |= clamp_line_width;

    tracing::info!(
        "rendering {} ({}x{}, {} rects)",
        input.display(),
        doc.width,
        doc.height,
        doc.rects.len()
    );

    let options = PngOptions::with_backend(backend.into());
    bordered_export::write_png(&doc, &options, output)?;
    Ok(())
}

fn run(args: Args) -> Result<(), BorderedError> {
    match args.command {
        Command::Render {
            input,
            output,
            backend,
            clamp_line_width,
        } => render(&input, &output, backend, clamp_line_width),
        Command::Shader => {
            print!("{SHADER_SOURCE}");
            Ok(())
        }
        Command::Template => {
            println!("{}", template_document().to_json_string()?);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
