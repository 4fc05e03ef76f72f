// ============================================================================
// sharey CLI: headless editing and library management
// ============================================================================
//
// Usage examples:
//   sharey edit shot.png --script steps.json --output annotated.png
//   sharey edit shot.png --color "#00ff00" --width 5 --script boxes.json --save
//   sharey library list
//   sharey library export 1700000000000 out/
//   sharey import-recording clip.webm
//   sharey config --color "#0080ff" --width 4
//
// An edit script is a JSON array of editor messages, e.g.
//   [{"action": "select_tool", "tool": "step"},
//    {"action": "pointer_down", "x": 50, "y": 50},
//    {"action": "pointer_up", "x": 50, "y": 50}]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::capture::{FileRecorder, ImageFileSource};
use crate::config::{ShapeColor, ShareyConfig};
use crate::core::App;
use crate::export;
use crate::session::EditorMsg;

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// Annotate screenshots and manage the local capture library.
#[derive(Parser, Debug)]
#[command(name = "sharey", version)]
pub struct CliArgs {
    /// Library file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load an image as a capture, replay an edit script and export the result
    Edit(EditArgs),
    /// Inspect and manage saved items
    #[command(subcommand)]
    Library(LibraryCommand),
    /// Store a finished recording in the library
    ImportRecording {
        /// Encoded recording, e.g. a .webm file
        file: PathBuf,
    },
    /// Show the saved defaults, updating any that are given
    Config(ConfigArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Default stroke color, `#rrggbb` or `#rgb`
    #[arg(short, long, value_name = "HEX")]
    pub color: Option<ShapeColor>,

    /// Default stroke width in pixels
    #[arg(short, long, value_name = "N")]
    pub width: Option<f32>,

    /// Maximum library size in bytes
    #[arg(long, value_name = "BYTES")]
    pub library_quota: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Image to annotate
    pub image: PathBuf,

    /// JSON array of editor messages to replay
    #[arg(short, long, value_name = "SCRIPT.json")]
    pub script: Option<PathBuf>,

    /// Stroke color, `#rrggbb` or `#rgb`
    #[arg(short, long, value_name = "HEX")]
    pub color: Option<ShapeColor>,

    /// Stroke width in pixels
    #[arg(short, long, value_name = "N")]
    pub width: Option<f32>,

    /// Write the final PNG here
    #[arg(short, long, value_name = "FILE.png")]
    pub output: Option<PathBuf>,

    /// Save the final image to the library
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommand {
    /// List saved items, newest first
    List,
    /// Write an item's payload into a directory
    Export {
        id: i64,
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// Remove an item
    Delete { id: i64 },
}

// ============================================================================
// Public entry point
// ============================================================================

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let mut config = ShareyConfig::load();
    let changed_library = args.library.is_some();
    if let Some(path) = args.library {
        config.library_path = Some(path);
    }

    match args.command {
        Command::Config(update) => run_config(config, changed_library, update),
        Command::Edit(edit) => run_edit(config, edit),
        Command::Library(cmd) => run_library(App::new(config), cmd),
        Command::ImportRecording { file } => {
            let mut app = App::new(config);
            let mut recorder = FileRecorder::new(&file);
            app.toggle_recording(&mut recorder)
                .with_context(|| format!("could not read {}", file.display()))?;
            app.toggle_recording(&mut recorder)?;
            report_toast(&mut app);
            Ok(())
        }
    }
}

fn apply_stroke(
    config: &mut ShareyConfig,
    color: Option<ShapeColor>,
    width: Option<f32>,
) -> anyhow::Result<()> {
    if let Some(color) = color {
        config.shape_color = color;
    }
    if let Some(width) = width {
        anyhow::ensure!(
            width.is_finite() && width > 0.0,
            "stroke width must be positive"
        );
        config.stroke_width = width;
    }
    Ok(())
}

/// Print the configuration, saving it first when anything was changed
fn run_config(
    mut config: ShareyConfig,
    changed_library: bool,
    args: ConfigArgs,
) -> anyhow::Result<()> {
    if update_config(&mut config, &args)? || changed_library {
        config.save();
    }
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Apply the given overrides, returns whether any were set
fn update_config(config: &mut ShareyConfig, args: &ConfigArgs) -> anyhow::Result<bool> {
    apply_stroke(config, args.color, args.width)?;
    if let Some(quota) = args.library_quota {
        config.library_quota_bytes = quota;
    }
    Ok(args.color.is_some() || args.width.is_some() || args.library_quota.is_some())
}

fn run_edit(mut config: ShareyConfig, args: EditArgs) -> anyhow::Result<()> {
    apply_stroke(&mut config, args.color, args.width)?;

    let mut app = App::new(config);
    let mut source = ImageFileSource::new(&args.image);
    app.capture_screenshot(&mut source)
        .with_context(|| format!("could not load {}", args.image.display()))?;

    if let Some(script) = &args.script {
        let msgs = read_script(script)?;
        log::info!("Replaying {} editor message(s)", msgs.len());
        for msg in msgs {
            if let Some(event) = app.handle_editor_msg(msg) {
                log::debug!("{event:?}");
            }
        }
    }

    if let Some(output) = &args.output {
        let session = app
            .editor()
            .context("editor closed unexpectedly")?;
        let image = export::render_final_image(session).context("canvas is empty")?;
        export::save_png(&image, output)?;
        println!("{}", output.display());
    }
    if args.save {
        let id = app.save_to_library()?;
        println!("Saved to library as {id}");
    }
    if args.output.is_none() && !args.save {
        let path = app.download(Path::new("."))?;
        println!("{}", path.display());
    }
    Ok(())
}

fn read_script(path: &Path) -> anyhow::Result<Vec<EditorMsg>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid script {}", path.display()))
}

fn run_library(mut app: App, cmd: LibraryCommand) -> anyhow::Result<()> {
    match cmd {
        LibraryCommand::List => {
            if app.library().is_empty() {
                println!("No saved items yet.");
            }
            for item in app.library().items() {
                println!(
                    "{}\t{:?}\t{}\t{} bytes",
                    item.id,
                    item.kind,
                    item.display_time(),
                    item.data.len()
                );
            }
        }
        LibraryCommand::Export { id, dir } => {
            let path = app.library().export_item(id, &dir)?;
            println!("{}", path.display());
        }
        LibraryCommand::Delete { id } => {
            app.delete_library_item(id)?;
            report_toast(&mut app);
        }
    }
    Ok(())
}

fn report_toast(app: &mut App) {
    if let Some(toast) = app.take_toast() {
        println!("{}", toast.message);
    }
}
