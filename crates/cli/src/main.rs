use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use hexlay::{timed, Layout, LayoutConfig, LayoutRenderer, RenderConfig};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for generating hex level layouts
#[derive(Debug, StructOpt)]
#[structopt(name = "hexlay")]
struct Opt {
    /// Path to a config file that defines the layout to be generated.
    /// Supported formats: JSON, TOML
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to an existing .json layout file to load
    #[structopt(short, long)]
    layout: Option<PathBuf>,

    /// If given, the layout will be saved to this directory. The exact files
    /// that appear in the directory are defined by the output formats. See
    /// `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the layout in. Supported formats:
    ///
    /// cfg - The full config object used for the layout, in TOML format
    ///
    /// json - JSON representation, which can be loaded back with `--layout`
    ///
    /// svg - 2D top-down preview of the layout
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// Distance between adjacent cell centers in rendered output, in SVG
    /// user units
    #[structopt(long, default_value = "10.0")]
    scale: f64,

    /// Label every cell with its coordinate in rendered output
    #[structopt(long)]
    show_coordinates: bool,

    /// The logging level to use during generation. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, PartialEq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the layout's full config in a human-readable file
    Cfg,
    /// Export the layout in a serialized JSON format, which can be
    /// deserialized later to recover the layout
    Json,
    /// Render the layout as a 2D SVG
    Svg,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<LayoutConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate an output form of the layout in the given format
fn generate_bytes(
    output_format: OutputFormat,
    layout: &Layout,
    renderer: &LayoutRenderer,
) -> anyhow::Result<Vec<u8>> {
    let bytes = match output_format {
        OutputFormat::Cfg => {
            // Go through a Value so nested tables get written after plain
            // values, which TOML requires
            let value = toml::Value::try_from(layout.config())
                .context("error serializing config")?;
            toml::to_string_pretty(&value)
                .context("error serializing config")?
                .into_bytes()
        }
        OutputFormat::Json => layout.to_json()?.into_bytes(),
        OutputFormat::Svg => renderer.render_as_svg(layout).into_bytes(),
    };
    Ok(bytes)
}

/// Write the layout to a file in the output dir, in the given format
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    layout: &Layout,
    renderer: &LayoutRenderer,
) -> anyhow::Result<()> {
    let output_file_path = output_dir
        .join(&layout.config().name)
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, layout, renderer)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let layout = match opt {
        Opt {
            config: Some(config_path),
            layout: None,
            ..
        } => {
            let config = load_config(&config_path)?;
            Layout::generate(config)?
        }
        Opt {
            config: None,
            layout: Some(input_path),
            ..
        } => {
            let json = fs::read_to_string(&input_path).with_context(|| {
                format!("error reading layout file {:?}", input_path)
            })?;
            let layout = Layout::from_json(&json)?;
            info!("Loaded layout from {:?}", &input_path);
            layout
        }
        _ => bail!(
            "must pass exactly one of --config (to generate a new layout) \
            or --layout (to load an existing layout)"
        ),
    };
    info!("Layout has {} cells", layout.len());

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(&output_dir)?;

        let renderer = LayoutRenderer::new(RenderConfig {
            scale: opt.scale,
            show_coordinates: opt.show_coordinates,
            ..Default::default()
        })
        .context("invalid render config")?;
        for output_format in opt.output_formats {
            gen_output(&output_dir, output_format, &layout, &renderer)?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexlay::{HexCoordinate, ShapeConfig};

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!("cfg".parse::<OutputFormat>().unwrap(), OutputFormat::Cfg);
        assert_eq!(OutputFormat::Svg.to_string(), "svg");
        assert!("stl".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_temp(
            ".toml",
            r#"
            name = "arena"

            [[shapes]]
            type = "ring"
            center = {q = 1, r = -1}
            radius = 2
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.name, "arena");
        match &config.shapes[..] {
            [ShapeConfig::Ring(ring)] => {
                assert_eq!(ring.center, HexCoordinate::new(1, -1));
                assert_eq!(ring.radius, 2);
            }
            shapes => panic!("unexpected shapes {:?}", shapes),
        }
    }

    #[test]
    fn test_load_missing_config() {
        let err =
            load_config(Path::new("/nonexistent/layout.toml")).unwrap_err();
        assert_eq!(err.to_string(), "error reading config file");
    }

    #[test]
    fn test_generate_outputs() {
        let layout = Layout::generate(LayoutConfig::default()).unwrap();
        let renderer = LayoutRenderer::new(RenderConfig::default()).unwrap();

        let json =
            generate_bytes(OutputFormat::Json, &layout, &renderer).unwrap();
        let loaded =
            Layout::from_json(std::str::from_utf8(&json).unwrap()).unwrap();
        assert_eq!(loaded, layout);

        let cfg =
            generate_bytes(OutputFormat::Cfg, &layout, &renderer).unwrap();
        let cfg: LayoutConfig =
            toml::from_str(std::str::from_utf8(&cfg).unwrap()).unwrap();
        assert_eq!(&cfg, layout.config());
    }
}
