// SPDX-License-Identifier: MIT
//
// okpal — command-line front end for the palette engine.
//
// Every subcommand is a thin wrapper over one engine entry point:
//
//   generate → harmony::generate          (palette from a mode + seeds)
//   scale    → scale::generate_scale_from (11-step OKLCH ramp)
//   tokens   → utility + tokens           (light/dark design tokens, exported)
//   contrast → contrast::*                (WCAG ratio and level)
//   convert  → ColorStop                  (one color in every space)
//   share    → share::encode_share        (URL fragment)
//   open     → share::decode_share
//
// Results go to stdout; logs go to stderr so output can be piped.

use std::fmt::Write as _;
use std::io;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Level, debug};

use okpal_theme::contrast::{contrast_ratio, text_color, wcag_level};
use okpal_theme::export::{to_css, to_json, to_tailwind};
use okpal_theme::names::nearest_name;
use okpal_theme::scale::generate_scale_from;
use okpal_theme::share::{ShareError, decode_share, encode_share};
use okpal_theme::stop::palette_colors;
use okpal_theme::tokens::ThemeTokenSet;
use okpal_theme::{
    ColorStop, HarmonyMode, PaletteSlot, RandomSource, RngSource, derive_theme,
    derive_utility_colors, generate,
};

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "okpal", version, about = "Perceptual palettes, scales and design tokens")]
struct Cli {
    /// Log to stderr: -v info, -vv debug, -vvv trace.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a palette from a harmony mode
    Generate(GenerateArgs),
    /// Print the 50–950 tint/shade scale of a color
    Scale {
        #[arg(value_parser = parse_color)]
        color: ColorStop,
    },
    /// Derive light/dark theme tokens from a palette
    Tokens {
        #[arg(required = true, value_parser = parse_color)]
        colors: Vec<ColorStop>,
        #[arg(short, long, value_enum, default_value_t = Format::Css)]
        format: Format,
    },
    /// WCAG contrast between a foreground and a background
    Contrast {
        #[arg(value_parser = parse_color)]
        fg: ColorStop,
        #[arg(value_parser = parse_color)]
        bg: ColorStop,
    },
    /// Show a color in every supported space
    Convert {
        #[arg(value_parser = parse_color)]
        color: ColorStop,
    },
    /// Encode a palette as a share fragment
    Share {
        #[arg(required = true, value_parser = parse_color)]
        colors: Vec<ColorStop>,
        #[arg(short, long, value_parser = parse_mode, default_value = "analogous")]
        mode: HarmonyMode,
    },
    /// Decode a share fragment
    Open { fragment: String },
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Harmony mode, e.g. triadic, split-comp, monochromatic
    #[arg(short, long, value_parser = parse_mode, default_value = "analogous")]
    mode: HarmonyMode,

    /// Number of colors
    #[arg(short, long, default_value_t = 5)]
    count: usize,

    /// Seed color; repeat to seed several slots
    #[arg(short, long = "seed", value_parser = parse_color)]
    seeds: Vec<ColorStop>,

    /// Seed for the random source, for reproducible output
    #[arg(long)]
    rng_seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Css,
    Json,
    Tailwind,
}

fn parse_color(s: &str) -> Result<ColorStop, String> {
    ColorStop::from_hex(s).ok_or_else(|| format!("'{s}' is not a #RGB or #RRGGBB color"))
}

fn parse_mode(s: &str) -> Result<HarmonyMode, String> {
    HarmonyMode::from_name(s).ok_or_else(|| {
        let known: Vec<&str> = HarmonyMode::all().iter().map(|m| m.name()).collect();
        format!("unknown mode '{s}' (expected one of: {})", known.join(", "))
    })
}

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Share(#[from] ShareError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ─── Logging ────────────────────────────────────────────────────────────────

const fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn run(command: Command) -> Result<String, CliError> {
    match command {
        Command::Generate(args) => run_generate(args),
        Command::Scale { color } => Ok(render_scale(&color)),
        Command::Tokens { colors, format } => {
            let slots: Vec<PaletteSlot> = colors.into_iter().map(PaletteSlot::new).collect();
            Ok(render_theme(&slots, format))
        }
        Command::Contrast { fg, bg } => Ok(render_contrast(&fg, &bg)),
        Command::Convert { color } => Ok(render_convert(&color)),
        Command::Share { colors, mode } => {
            let hexes: Vec<&str> = colors.iter().map(ColorStop::hex).collect();
            Ok(encode_share(&hexes, mode) + "\n")
        }
        Command::Open { fragment } => {
            let (hexes, mode) = decode_share(&fragment)?;
            let mut out = format!("mode  {mode}\n");
            for hex in hexes {
                let _ = writeln!(out, "{hex}");
            }
            Ok(out)
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<String, CliError> {
    let mut rng: Box<dyn RandomSource> = match args.rng_seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::system()),
    };
    debug!(mode = args.mode.name(), count = args.count, "generate");

    let slots: Vec<PaletteSlot> = generate(args.mode, args.count, &args.seeds, rng.as_mut())
        .into_iter()
        .map(PaletteSlot::new)
        .collect();

    match args.format {
        Format::Text => {
            let mut out = String::new();
            for color in palette_colors(&slots) {
                let hsl = color.hsl();
                let _ = writeln!(
                    out,
                    "{}  hsl({:.0}, {:.0}%, {:.0}%)  {}",
                    color.hex(),
                    hsl.h,
                    hsl.s,
                    hsl.l,
                    nearest_name(color.rgb())
                );
            }
            Ok(out)
        }
        Format::Json => Ok(serde_json::to_string_pretty(&slots)? + "\n"),
        Format::Css | Format::Tailwind => Ok(render_theme(&slots, args.format)),
    }
}

fn render_theme(slots: &[PaletteSlot], format: Format) -> String {
    let utility = derive_utility_colors(slots);
    let theme = derive_theme(slots, &utility);
    match format {
        Format::Css => to_css(&theme),
        Format::Json => to_json(&theme) + "\n",
        Format::Tailwind => to_tailwind(&theme),
        Format::Text => render_token_table(&theme),
    }
}

fn render_token_table(theme: &ThemeTokenSet) -> String {
    let width = theme.semantic.iter().map(|t| t.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for token in &theme.semantic {
        let _ = writeln!(out, "{:<width$}  {}  {}", token.name, token.light, token.dark);
    }
    for entry in &theme.utility {
        let _ = writeln!(
            out,
            "{:<width$}  {}  light {}  dark {}  subtle {}",
            entry.role.name(),
            entry.base,
            entry.light,
            entry.dark,
            entry.subtle
        );
    }
    out
}

fn render_scale(color: &ColorStop) -> String {
    let mut out = String::new();
    for step in generate_scale_from(color) {
        let lch = step.oklch;
        let _ = writeln!(
            out,
            "{:>4}  {}  oklch({:.3} {:.3} {:.1})",
            step.step, step.color, lch.l, lch.c, lch.h
        );
    }
    out
}

fn render_contrast(fg: &ColorStop, bg: &ColorStop) -> String {
    let ratio = contrast_ratio(fg.rgb(), bg.rgb());
    format!(
        "ratio  {ratio:.2}:1\nlevel  {}\ntext   {} on {}\n",
        wcag_level(ratio),
        text_color(bg.rgb()),
        bg
    )
}

fn render_convert(color: &ColorStop) -> String {
    let rgb = color.rgb();
    let hsl = color.hsl();
    let hsv = color.hsv();
    let cmyk = color.cmyk();
    let lab = color.oklab();
    let lch = color.oklch();
    format!(
        "hex    {}\n\
         rgb    {}, {}, {}\n\
         hsl    {:.1}, {:.1}%, {:.1}%\n\
         hsv    {:.1}, {:.1}%, {:.1}%\n\
         cmyk   {:.1}%, {:.1}%, {:.1}%, {:.1}%\n\
         oklab  {:.4}, {:.4}, {:.4}\n\
         oklch  {:.4}, {:.4}, {:.1}\n\
         name   {}\n",
        color.hex(),
        rgb.r,
        rgb.g,
        rgb.b,
        hsl.h,
        hsl.s,
        hsl.l,
        hsv.h,
        hsv.s,
        hsv.v,
        cmyk.c,
        cmyk.m,
        cmyk.y,
        cmyk.k,
        lab.l,
        lab.a,
        lab.b,
        lch.l,
        lch.c,
        lch.h,
        nearest_name(rgb)
    )
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("okpal: {err}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
