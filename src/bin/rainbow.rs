//! Rainbow-colorize text in the terminal.
//!
//! Reads the given files (or stdin), colors every character, and writes
//! the result to stdout as ANSI escape sequences. On a terminal, rows wrap
//! at the terminal width unless `--width` or `--no-wrap` says otherwise.
//!
//! ```text
//! rainbow README.md
//! rainbow --demo --repeat 1500 --progress
//! RUST_LOG=rainbow_highlight=debug rainbow --width 80 notes.txt
//! rainbow --no-wrap --tab-width 4 main.rs
//! ```

use clap::{Parser, ValueEnum};
use rainbow_highlight::{
    ColorMode, ExecutionMode, HighlightOptions, Highlighter, ProgressBar, StyledText, ansi,
    terminal,
};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEMO_TEXT: &str = "\
Lorem ipsum dolor sit amet, consectetur adipiscing elit. Duis aliquet tempor urna vitae porttitor. \
Donec aliquam sollicitudin rutrum. Nullam risus lacus, dapibus quis semper sit amet, posuere quis arcu.
Vivamus a ligula augue. Fusce gravida massa eleifend ipsum scelerisque aliquam. Proin gravida aliquet \
sapien. Integer nec pulvinar enim. Donec condimentum tristique lobortis.
Sed ultrices, odio id volutpat congue, ligula neque congue nulla, et malesuada nibh eros a dolor. \
Praesent sed lacinia libero. Sed id ante nec ante varius feugiat.
";

/// Color every character of the input with a rotating hue
#[derive(Parser, Debug)]
#[command(name = "rainbow", version, about = "Rainbow text colorizer", long_about = None)]
struct Args {
    /// Files to colorize (default: stdin)
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Colorize a built-in lorem ipsum block instead of reading input
    #[arg(long, conflicts_with = "paths")]
    demo: bool,

    /// Repeat the input N times
    #[arg(long, value_name = "N", default_value = "1")]
    repeat: usize,

    /// Hue of the first character, in [0, 1) (default: random)
    #[arg(long, value_parser = parse_hue)]
    hue: Option<f64>,

    /// Hue change between characters of a row
    #[arg(long, default_value = "-0.015", allow_hyphen_values = true)]
    char_step: f64,

    /// Hue change between rows
    #[arg(long, default_value = "-0.03", allow_hyphen_values = true)]
    row_step: f64,

    /// Wrap rows to this many columns (default: terminal width when stdout is a terminal)
    #[arg(short, long, value_name = "COLUMNS")]
    width: Option<usize>,

    /// Split rows only at newlines, even on a terminal
    #[arg(long, conflicts_with = "width")]
    no_wrap: bool,

    /// Columns per tab stop when wrapping
    #[arg(long, value_name = "N", default_value = "8")]
    tab_width: usize,

    /// Execution strategy
    #[arg(long, default_value = "auto")]
    mode: Mode,

    /// Worker count (default: available CPUs)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Color output
    #[arg(long, default_value = "truecolor")]
    color: ColorChoice,

    /// Draw a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Progress poll interval for parallel runs, in milliseconds
    #[arg(long, value_name = "MS", default_value = "1000")]
    poll_ms: u64,

    /// Log strategy decisions to stderr (-vv for per-poll detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Mode {
    #[default]
    Auto,
    Series,
    Parallel,
}

impl From<Mode> for ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Auto => Self::Auto,
            Mode::Series => Self::Series,
            Mode::Parallel => Self::Parallel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum ColorChoice {
    #[default]
    Truecolor,
    #[value(name = "256")]
    Ansi256,
    #[value(name = "16")]
    Ansi16,
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Truecolor => Self::TrueColor,
            ColorChoice::Ansi256 => Self::Color256,
            ColorChoice::Ansi16 => Self::Color16,
            ColorChoice::Never => Self::NoColor,
        }
    }
}

/// Parse and validate a hue in [0, 1)
fn parse_hue(s: &str) -> Result<f64, String> {
    let hue: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if !(0.0..1.0).contains(&hue) {
        return Err(format!("hue must be in [0, 1), got {hue}"));
    }
    Ok(hue)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn read_input(args: &Args) -> io::Result<String> {
    let source = if args.demo {
        DEMO_TEXT.to_string()
    } else if args.paths.is_empty() {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        let mut buf = String::new();
        for path in &args.paths {
            buf.push_str(&fs::read_to_string(path)?);
        }
        buf
    };
    Ok(source.repeat(args.repeat))
}

fn wrap_width(args: &Args) -> Option<usize> {
    if args.no_wrap {
        None
    } else {
        args.width.or_else(terminal::stdout_wrap_width)
    }
}

fn options(args: &Args) -> HighlightOptions {
    HighlightOptions {
        initial_hue: args.hue,
        char_step: args.char_step,
        row_step: args.row_step,
        display_width: wrap_width(args),
        mode: args.mode.into(),
        cpu_count: args.workers,
        poll_interval: Duration::from_millis(args.poll_ms),
        tab_width: args.tab_width,
        ..HighlightOptions::default()
    }
}

fn run(args: &Args) -> rainbow_highlight::Result<()> {
    let input = read_input(args)?;
    let mut highlighter = Highlighter::new(options(args))?;

    let text = if args.progress {
        let mut bar = ProgressBar::new(io::stderr(), &highlighter.options().progress_label);
        let text = highlighter.highlight_with_progress(StyledText::new(input), &mut bar)?;
        if let Err(err) = bar.finish() {
            tracing::warn!(error = %err, "failed to finish progress bar");
        }
        text
    } else {
        highlighter.highlight(StyledText::new(input))?
    };

    let mode: ColorMode = args.color.into();
    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    ansi::write_styled(&mut out, &text, mode)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(rainbow_highlight::Error::Io(err)) if err.kind() == io::ErrorKind::BrokenPipe => {
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("rainbow: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("rainbow").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_width_follows_terminal() {
        assert_eq!(wrap_width(&parse(&[])), terminal::stdout_wrap_width());
    }

    #[test]
    fn test_width_flags() {
        assert_eq!(wrap_width(&parse(&["--width", "40"])), Some(40));
        assert_eq!(wrap_width(&parse(&["--no-wrap"])), None);
        assert!(Args::try_parse_from(["rainbow", "--no-wrap", "-w", "10"]).is_err());
    }

    #[test]
    fn test_options_carry_tab_width() {
        let args = parse(&["--no-wrap", "--tab-width", "4", "--char-step", "-0.1"]);
        let options = options(&args);
        assert_eq!(options.tab_width, 4);
        assert_eq!(options.char_step, -0.1);
        assert_eq!(options.display_width, None);
        assert!(options.validate().is_ok());
    }
}
