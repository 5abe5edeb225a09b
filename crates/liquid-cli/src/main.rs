use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use liquid_core::{Cell, CellRef, FixedStepClock, LiquidConfig, LiquidMenu};
use liquid_skia::{save_png, ShadowStyle};
use metaball_core::{disk_path, Circle, Color, CompositeShape};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

/// Ticks allowed per cycle before the run is considered stuck.
const MAX_TICKS_PER_CYCLE: usize = 100_000;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of cells around the base circle
    #[arg(long, default_value_t = 3)]
    cells: usize,

    /// Which cycle(s) to render
    #[arg(long, value_enum, default_value_t = Cycle::Both)]
    cycle: Cycle,

    /// Frames per second of the tick clock
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output directory for frames
    #[arg(long, default_value = "frames")]
    out: PathBuf,

    /// Frame file format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    #[arg(long, default_value_t = 400)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Cycle {
    Open,
    Close,
    Both,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(cli.log_level.into()).into())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }

    match run(&cli) {
        Ok(frames) => info!(frames, out = ?cli.out, "Render complete."),
        Err(e) => {
            error!("Render failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Runs the requested cycles and writes one file per tick. Returns the number
/// of frames written.
fn run(cli: &Cli) -> Result<usize> {
    let config = match &cli.config {
        Some(path) => LiquidConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LiquidConfig::default(),
    };
    fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;

    let shadow = config.enable_shadow.then(ShadowStyle::default);
    let base = Circle::new(
        (cli.width as f64 * 0.5, cli.height as f64 * 0.5),
        28.0,
        config.color,
    );
    let cells: Vec<CellRef> = (0..cli.cells)
        .map(|_| Cell::shared(Circle::new((0.0, 0.0), 20.0, Color::WHITE)))
        .collect();
    let clock = FixedStepClock::new(cli.fps);

    info!(cells = cli.cells, fps = clock.fps(), cycle = ?cli.cycle, "Starting render...");

    let mut menu = LiquidMenu::new(base, config, cells);
    let mut writer = FrameWriter {
        dir: &cli.out,
        format: cli.format,
        width: cli.width,
        height: cli.height,
        shadow,
        written: 0,
    };

    if matches!(cli.cycle, Cycle::Open | Cycle::Both) {
        menu.open();
        run_cycle(&mut menu, &clock, &mut writer)?;
    }
    if matches!(cli.cycle, Cycle::Close | Cycle::Both) {
        if cli.cycle == Cycle::Close {
            // Closing needs cells out in the open position to retract.
            menu.open();
            while menu.choreographer().is_running() {
                menu.tick(clock.delta());
            }
        }
        menu.close();
        run_cycle(&mut menu, &clock, &mut writer)?;
    }

    Ok(writer.written)
}

fn run_cycle(
    menu: &mut LiquidMenu<Vec<CellRef>>,
    clock: &FixedStepClock,
    writer: &mut FrameWriter<'_>,
) -> Result<()> {
    let mut ticks = 0;
    while menu.choreographer().is_running() {
        if ticks >= MAX_TICKS_PER_CYCLE {
            bail!("cycle did not finish after {} ticks", ticks);
        }
        let frame = menu.tick(clock.delta());
        let snapshot: Vec<Cell> = menu.source().iter().map(|c| c.borrow().clone()).collect();
        writer.write(&frame.shape, &snapshot)?;
        ticks += 1;
    }
    info!(state = ?menu.state(), ticks, "cycle rendered");
    Ok(())
}

struct FrameWriter<'a> {
    dir: &'a Path,
    format: OutputFormat,
    width: u32,
    height: u32,
    shadow: Option<ShadowStyle>,
    written: usize,
}

impl FrameWriter<'_> {
    fn write(&mut self, shape: &CompositeShape, cells: &[Cell]) -> Result<()> {
        let path = self
            .dir
            .join(format!("frame_{:04}.{}", self.written, self.format.extension()));
        match self.format {
            OutputFormat::Svg => fs::write(&path, svg_frame(shape, cells, self.width, self.height))
                .with_context(|| format!("writing {}", path.display()))?,
            OutputFormat::Png => save_png(
                &path,
                shape,
                cells,
                self.width as i32,
                self.height as i32,
                self.shadow,
            )
            .with_context(|| format!("rendering {}", path.display()))?,
        }
        self.written += 1;
        Ok(())
    }
}

/// SVG counterpart of the Skia renderer: composite, then attached cells with
/// their content markers.
fn svg_frame(shape: &CompositeShape, cells: &[Cell], width: u32, height: u32) -> String {
    let mut body = format!(
        r#"<path d="{}" fill="{}" fill-opacity="{}"/>"#,
        shape.to_svg_path(),
        shape.fill.to_hex(),
        shape.fill.a.clamp(0.0, 1.0)
    );
    for cell in cells.iter().filter(|c| c.attached) {
        body.push_str(&format!(
            r#"<path d="{}" fill="{}"/>"#,
            disk_path(&cell.circle).to_svg(),
            cell.circle.color.to_hex()
        ));
        if cell.content_alpha > 0.0 {
            body.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
                cell.circle.center.x,
                cell.circle.center.y,
                cell.circle.radius * 0.4,
                Color::WHITE.to_hex(),
                cell.content_alpha
            ));
        }
    }
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>
"#,
        w = width,
        h = height,
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(out: &Path, cycle: Cycle) -> Cli {
        Cli::parse_from([
            "liquid-engine",
            "--cells",
            "2",
            "--fps",
            "10",
            "--cycle",
            match cycle {
                Cycle::Open => "open",
                Cycle::Close => "close",
                Cycle::Both => "both",
            },
            "--out",
            out.to_str().unwrap(),
        ])
    }

    #[test]
    fn test_open_cycle_writes_svg_frames() {
        let dir = tempfile::tempdir().unwrap();
        let written = run(&cli(dir.path(), Cycle::Open)).unwrap();

        // 0.2s open + 0.1s stagger at 10 fps.
        assert_eq!(written, 3);
        let first = fs::read_to_string(dir.path().join("frame_0000.svg")).unwrap();
        assert!(first.starts_with("<svg"));
        assert!(first.contains("<path d=\"M"));
        assert!(dir.path().join("frame_0002.svg").exists());
        assert!(!dir.path().join("frame_0003.svg").exists());
    }

    #[test]
    fn test_both_cycles_continue_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let written = run(&cli(dir.path(), Cycle::Both)).unwrap();
        assert_eq!(written, 5);
        assert!(dir.path().join("frame_0004.svg").exists());
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = cli(dir.path(), Cycle::Open);
        args.config = Some(dir.path().join("missing.json"));
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_svg_frame_skips_detached_cells() {
        let shape = CompositeShape::empty(Color::default());
        let mut cell = Cell::new(Circle::new((10.0, 10.0), 5.0, Color::WHITE));
        cell.attached = false;
        let svg = svg_frame(&shape, &[cell], 20, 20);
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(!svg.contains("<circle"));
    }
}
