//! ledwall - LED wall export tool
//!
//! Exports the curved geometry of a modular LED wall as an OBJ mesh and a
//! matching PNG layout image for texture alignment checks.

mod wall_args;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ledwall::{export_layout, export_obj, WallSummary};
use wall_args::{MeshArgs, WallArgs};

#[derive(Parser)]
#[command(name = "ledwall")]
#[command(about = "LED wall mesh and layout image exporter")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    wall: WallArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the wall as an OBJ mesh
    Mesh {
        /// Output .obj file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        mesh: MeshArgs,
    },

    /// Export the cabinet layout test image
    Image {
        /// Output .png file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export both the mesh and the layout image
    Build {
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Base name of the output files
        #[arg(long, default_value = "led_wall")]
        name: String,

        #[command(flatten)]
        mesh: MeshArgs,
    },

    /// Print wall dimensions and resolution
    Info,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.wall.resolve()?;

    match cli.command {
        Commands::Mesh { output, mesh } => {
            tracing::info!("Exporting mesh -> {:?}", output);
            export_obj(&config, &mesh.options(), &output)
                .with_context(|| format!("Failed to export mesh {:?}", output))?;
            tracing::info!("Done!");
        }

        Commands::Image { output } => {
            tracing::info!("Exporting layout image -> {:?}", output);
            export_layout(&config, &output)
                .with_context(|| format!("Failed to export layout image {:?}", output))?;
            tracing::info!("Done!");
        }

        Commands::Build {
            out_dir,
            name,
            mesh,
        } => {
            let mesh_path = out_dir.join(format!("{name}.obj"));
            let image_path = out_dir.join(format!("{name}_layout.png"));

            // Fail before touching either file
            config.validate()?;

            export_obj(&config, &mesh.options(), &mesh_path)
                .with_context(|| format!("Failed to export mesh {:?}", mesh_path))?;
            export_layout(&config, &image_path)
                .with_context(|| format!("Failed to export layout image {:?}", image_path))?;
            tracing::info!("Build complete!");
        }

        Commands::Info => {
            let summary = WallSummary::from_config(&config)?;
            println!("{summary}");
        }
    }

    Ok(())
}
