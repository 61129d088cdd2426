use anyhow::Result;
use clap::{Parser, Subcommand};
use ext_icons::{
    canvas::Color,
    lab_icon::{generate_drawn, Palette},
    manifest::{write_manifest, IconManifest},
    resize::generate_resized,
    sizes::SizeSet,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "ext-icons",
    about = "Generate browser extension icons from a logo or draw the lab icon"
)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resize a source logo into icon16.png, icon48.png and icon128.png.
    Resize(ResizeArgs),
    /// Draw the test tube and medical cross icon at each size.
    Draw(DrawArgs),
}

#[derive(Debug, clap::Args)]
struct ResizeArgs {
    /// Path to the source logo (any format the image decoder detects).
    #[clap(value_name = "INPUT")]
    input: PathBuf,

    #[clap(flatten)]
    common: CommonArgs,
}

#[derive(Debug, clap::Args)]
struct DrawArgs {
    /// Panel color of the icon (CSS color format).
    #[clap(long, value_name = "COLOR", default_value = "#3b82f6", value_parser = parse_color)]
    background: Color,

    #[clap(flatten)]
    common: CommonArgs,
}

#[derive(Debug, clap::Args)]
struct CommonArgs {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// Icon sizes to generate, comma separated. Defaults depend on the command.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    sizes: Option<Vec<u32>>,

    /// Also write icons.json with the "icons" block for manifest.json.
    #[clap(long)]
    manifest: bool,

    /// Directory prefix used for icon paths in icons.json.
    #[clap(long, value_name = "PREFIX", default_value = "icons")]
    manifest_prefix: String,
}

impl CommonArgs {
    fn size_set(&self, default: SizeSet) -> Result<SizeSet> {
        match &self.sizes {
            Some(sizes) => SizeSet::new(sizes.clone()),
            None => Ok(default),
        }
    }
}

fn parse_color(value: &str) -> Result<Color> {
    Color::from_css(value)
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Resize(args) => resize(args),
        Command::Draw(args) => draw(args),
    }
}

fn resize(args: ResizeArgs) -> Result<()> {
    let sizes = args.common.size_set(SizeSet::resize_default())?;
    generate_resized(&args.input, &args.common.output, &sizes)?;

    if args.common.manifest {
        let manifest = IconManifest::from_sizes(&args.common.manifest_prefix, sizes.iter());
        write_manifest(&args.common.output, &manifest)?;
    }

    Ok(())
}

// Per-size failures are printed by the generator and do not change the exit code.
fn draw(args: DrawArgs) -> Result<()> {
    let sizes = args.common.size_set(SizeSet::draw_default())?;
    let palette = Palette::with_background(args.background);
    let report = generate_drawn(&args.common.output, &sizes, &palette)?;

    if args.common.manifest && !report.written.is_empty() {
        let manifest =
            IconManifest::from_sizes(&args.common.manifest_prefix, report.written_sizes());
        write_manifest(&args.common.output, &manifest)?;
    }

    Ok(())
}
