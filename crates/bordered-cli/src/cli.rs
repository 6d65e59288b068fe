use std::path::PathBuf;

use bordered_export::Backend;
use clap::{Parser, Subcommand, ValueEnum};

/// Bordered: render rectangles with solid borders to PNG.
#[derive(Parser, Debug)]
#[command(name = "bordered", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a JSON frame document to a PNG file.
    Render {
        /// Frame document to read.
        input: PathBuf,

        /// PNG file to write.
        #[arg(short, long)]
        output: PathBuf,

        /// Renderer producing the pixels.
        #[arg(long, value_enum, default_value_t = BackendArg::Software)]
        backend: BackendArg,

        /// Clamp line widths into [0, 0.5] regardless of the document.
        #[arg(long)]
        clamp_line_width: bool,
    },
    /// Print the WGSL shader source.
    Shader,
    /// Print a sample frame document.
    Template,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    Software,
    Gpu,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Software => Backend::Software,
            BackendArg::Gpu => Backend::Gpu,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let args =
            Args::try_parse_from(["bordered", "render", "frame.json", "-o", "frame.png"]).unwrap();
        match args.command {
            Command::Render {
                input,
                output,
                backend,
                clamp_line_width,
            } => {
                assert_eq!(input, PathBuf::from("frame.json"));
                assert_eq!(output, PathBuf::from("frame.png"));
                assert_eq!(backend, BackendArg::Software);
                assert!(!clamp_line_width);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_parse_backend_and_log_level() {
        let args = Args::try_parse_from([
            "bordered",
            "render",
            "in.json",
            "--output",
            "out.png",
            "--backend",
            "gpu",
            "--clamp-line-width",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        let Command::Render {
            backend,
            clamp_line_width,
            ..
        } = args.command
        else {
            panic!("expected render");
        };
        assert_eq!(Backend::from(backend), Backend::Gpu);
        assert!(clamp_line_width);
    }

    #[test]
    fn test_render_requires_output() {
        assert!(Args::try_parse_from(["bordered", "render", "in.json"]).is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = Args::try_parse_from([
            "bordered", "render", "in.json", "-o", "out.png", "--backend", "metal",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_shader_and_template() {
        let args = Args::try_parse_from(["bordered", "shader"]).unwrap();
        assert!(matches!(args.command, Command::Shader));
        let args = Args::try_parse_from(["bordered", "--log-level", "warn", "template"]).unwrap();
        assert!(matches!(args.command, Command::Template));
        assert_eq!(args.log_level.as_deref(), Some("warn"));
    }
}
