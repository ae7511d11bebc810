//! idmask CLI - redaction regions for OCR output of identity documents

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use idmask::{
    detect_shape, Extraction, FieldKind, IdMask, JsonFormat, RawOcrOutput, ScaleFactor,
    SelectionSet,
};

#[derive(Parser)]
#[command(name = "idmask")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Locate sensitive fields in OCR output and print redaction regions", long_about = None)]
struct Cli {
    /// Input OCR JSON file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and print the regions as JSON
    Regions {
        /// Input OCR JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print a plain text report instead of JSON
        #[arg(long, conflicts_with = "compact")]
        report: bool,
    },

    /// Print the recovered lines with their boxes
    Text {
        /// Input OCR JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show input shape, document type and matcher decisions
    Info {
        /// Input OCR JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the selected redaction rectangles
    Masks {
        /// Input OCR JSON file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Size of the image the OCR engine processed (e.g. 1200x800)
        #[arg(long, value_name = "WxH", requires = "to")]
        from: Option<String>,

        /// Size of the raster the masks are drawn on
        #[arg(long, value_name = "WxH", requires = "from")]
        to: Option<String>,

        /// Flip the selection of a region (repeatable)
        #[arg(long, value_name = "ID")]
        toggle: Vec<String>,

        /// Select every region
        #[arg(long)]
        all: bool,

        /// Output JSON instead of one rectangle per line
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Regions {
            input,
            output,
            compact,
            report,
        }) => cmd_regions(&input, output.as_deref(), compact, report),
        Some(Commands::Text { input }) => cmd_text(&input),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Masks {
            input,
            from,
            to,
            toggle,
            all,
            json,
        }) => cmd_masks(&input, from.as_deref(), to.as_deref(), &toggle, all, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print regions if input is provided
            if let Some(input) = cli.input {
                cmd_regions(&input, None, false, false)
            } else {
                println!("{}", "Usage: idmask <FILE>".yellow());
                println!("       idmask --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read OCR output from a file, or from stdin for `-`.
fn read_input(input: &Path) -> Result<RawOcrOutput, Box<dyn std::error::Error>> {
    let json = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };
    Ok(RawOcrOutput::from_json(&json)?)
}

/// Parse `WIDTHxHEIGHT`.
fn parse_dimensions(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Invalid size '{}', expected WxH", value))?;
    let w: u32 = w
        .trim()
        .parse()
        .map_err(|_| format!("Invalid width in '{}'", value))?;
    let h: u32 = h
        .trim()
        .parse()
        .map_err(|_| format!("Invalid height in '{}'", value))?;
    if w == 0 || h == 0 {
        return Err(format!("Size '{}' must be non-zero", value));
    }
    Ok((w, h))
}

fn cmd_regions(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let extraction = IdMask::new().process(&raw);

    let rendered = if report {
        idmask::render::to_text(&extraction)
    } else if compact {
        idmask::render::to_json(&extraction, JsonFormat::Compact)?
    } else {
        idmask::render::to_json(&extraction, JsonFormat::Pretty)?
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_text(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let doc = IdMask::new().normalize(&raw);

    if doc.source().is_synthetic() {
        eprintln!(
            "{}",
            "warning: no positional structure, boxes are synthetic".yellow()
        );
    }
    for (index, line) in doc.lines().iter().enumerate() {
        println!(
            "{:>3} {} {}",
            index.to_string().dimmed(),
            line.bbox.to_string().cyan(),
            line.text
        );
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let shape = detect_shape(&raw);
    let pipeline = IdMask::new();
    let doc = pipeline.normalize(&raw);
    let extraction = pipeline.process_document(&doc);

    println!("{}", "Input".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if input.as_os_str() == "-" {
        println!("{}: <stdin>", "File".bold());
    } else {
        println!("{}: {}", "File".bold(), input.display());
    }
    println!("{}: {}", "Shape".bold(), shape);
    println!("{}: {}", "Recovered from".bold(), doc.source());
    println!("{}: {}", "Lines".bold(), doc.line_count());
    println!("{}: {}", "Words".bold(), doc.words().len());

    println!();
    println!("{}", "Extraction".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Document type".bold(), extraction.document_type);
    print_region_counts(&extraction);

    println!();
    println!("{}", "Diagnostics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for entry in &extraction.diagnostics {
        println!("  {}", entry);
    }

    Ok(())
}

fn print_region_counts(extraction: &Extraction) {
    for kind in FieldKind::ALL {
        let count = extraction.regions_of(kind).count();
        if count > 0 {
            println!("{} ({}): {}", kind.label().bold(), kind, count);
        }
    }
    println!(
        "{}: {}",
        "Selected by default".bold(),
        extraction.default_selection().count()
    );
}

fn cmd_masks(
    input: &Path,
    from: Option<&str>,
    to: Option<&str>,
    toggle: &[String],
    all: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let extraction = IdMask::new().process(&raw);
    let mut selection = SelectionSet::from(&extraction);

    if all {
        selection.select_all();
    }
    for id in toggle {
        if selection.toggle(id).is_none() {
            return Err(format!("Unknown region id: {}", id).into());
        }
    }

    let scale = match (from, to) {
        (Some(from), Some(to)) => ScaleFactor::between(parse_dimensions(from)?, parse_dimensions(to)?),
        _ => ScaleFactor::IDENTITY,
    };

    if json {
        let masks: Vec<_> = selection
            .selected()
            .map(|region| {
                let bbox = scale.apply(&region.bbox());
                serde_json::json!({
                    "id": region.id(),
                    "kind": region.kind(),
                    "bbox": bbox,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&masks)?);
    } else {
        for region in selection.selected() {
            let bbox = scale.apply(&region.bbox());
            println!(
                "{} {} {} {} {}",
                bbox.x0,
                bbox.y0,
                bbox.x1,
                bbox.y1,
                region.id().dimmed()
            );
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "idmask".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Redaction regions for OCR output of identity documents");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/idmask".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("1200x800"), Ok((1200, 800)));
        assert_eq!(parse_dimensions("640X480"), Ok((640, 480)));
        assert!(parse_dimensions("1200").is_err());
        assert!(parse_dimensions("0x10").is_err());
        assert!(parse_dimensions("ax10").is_err());
    }

    #[test]
    fn test_read_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocr.json");
        fs::write(&path, r#"{"text": "여권 M12345678"}"#).unwrap();

        let raw = read_input(&path).unwrap();
        assert_eq!(raw.text.as_deref(), Some("여권 M12345678"));
    }

    #[test]
    fn test_read_input_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocr.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(read_input(&path).is_err());
    }

    #[test]
    fn test_cli_report_conflicts_with_compact() {
        assert!(Cli::try_parse_from(["idmask", "regions", "a.json", "--report"]).is_ok());
        assert!(
            Cli::try_parse_from(["idmask", "regions", "a.json", "--report", "--compact"]).is_err()
        );
    }

    #[test]
    fn test_cli_parses_masks() {
        let cli = Cli::try_parse_from([
            "idmask", "masks", "ocr.json", "--from", "100x100", "--to", "200x200", "--toggle",
            "birth_date-1", "--toggle", "gender-2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Masks { toggle, from, .. }) => {
                assert_eq!(toggle, vec!["birth_date-1", "gender-2"]);
                assert_eq!(from.as_deref(), Some("100x100"));
            }
            _ => panic!("expected masks command"),
        }
    }
}
