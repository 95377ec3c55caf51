//! `taut`: check a propositional formula for satisfiability and validity.
//!
//! ```text
//! taut "p => (q => p)"
//! taut --input formula.txt --tree
//! taut --legend --alphabet word
//! ```

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, Result, WrapErr};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use taut_rs::alphabet::{self, Alphabet};
use taut_rs::format::FormulaFormatter;
use taut_rs::parse::parse;
use taut_rs::report;
use taut_rs::verify::Verifier;

#[derive(Debug, Parser)]
#[command(name = "taut", version, about = "Satisfiability and tautology checking for propositional logic")]
struct Args {
    /// Formula to verify (quote it if it contains spaces).
    #[arg(conflicts_with_all = ["input", "legend"])]
    formula: Option<String>,

    /// Read the formula from a file instead.
    #[arg(short, long, conflicts_with = "legend")]
    input: Option<PathBuf>,

    /// Print the legend of the selected alphabet and exit.
    #[arg(short, long)]
    legend: bool,

    /// Symbol set used to read and print formulas.
    #[arg(short, long, value_enum, default_value = "symbolic")]
    alphabet: AlphabetArg,

    /// Write the report to a file, replacing its contents.
    #[arg(short, long, conflicts_with = "append")]
    output: Option<PathBuf>,

    /// Append the report to a file.
    #[arg(short = 'O', long)]
    append: Option<PathBuf>,

    /// Include the breadth-first conversion trace in the report.
    #[arg(short, long)]
    tree: bool,

    /// Log progress information.
    #[arg(short, long)]
    verbose: bool,

    /// Log debug details (implies --verbose).
    #[arg(short, long)]
    debug: bool,

    /// Divert log messages to a file.
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum AlphabetArg {
    Symbolic,
    Word,
}

impl AlphabetArg {
    fn resolve(self) -> &'static Alphabet {
        match self {
            AlphabetArg::Symbolic => &alphabet::SYMBOLIC,
            AlphabetArg::Word => &alphabet::WORD,
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let level = if args.debug {
        LevelFilter::Debug
    } else if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    match &args.log {
        Some(path) => {
            let file = fs::File::create(path)
                .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => {
            TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args)?;

    let alphabet = args.alphabet.resolve();
    if args.legend {
        println!("{}", alphabet.legend());
        return Ok(());
    }

    let text = match (&args.formula, &args.input) {
        (Some(formula), _) => formula.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read formula file {}", path.display()))?,
        (None, None) => bail!("nothing to do: pass a formula, --input, or --legend"),
    };
    let text = text.trim();
    if text.is_empty() {
        bail!("the formula is empty");
    }

    let formula = parse(text, alphabet).wrap_err("the formula has invalid syntax")?;
    let formatter = FormulaFormatter::new(alphabet);
    info!("formula read: {}", formatter.formula(&formula));

    // Check satisfiability first; only a satisfiable formula can be a
    // tautology, so the validity check is skipped otherwise.
    let mut sat = Verifier::satisfiability(formula.clone());
    let satisfiable = sat.verify()?;
    info!(
        "the formula is {}satisfiable",
        if satisfiable { "" } else { "NOT " }
    );

    let validity = if satisfiable {
        let mut verifier = Verifier::validity(formula.clone());
        verifier.verify()?;
        Some(verifier)
    } else {
        None
    };
    let valid = validity
        .as_ref()
        .is_some_and(|v| v.verdict() == Ok(true));

    let mut out = String::new();
    out.push_str(&format!("Formula: {}\n", formatter.formula(&formula)));
    out.push_str(&format!("Satisfiable: {}\n", if satisfiable { "YES" } else { "NO" }));
    out.push_str(&format!("Tautology: {}\n", if valid { "YES" } else { "NO" }));

    out.push_str("\n** SATISFIABILITY CHECK **\n");
    out.push_str(&report::render(&sat, &formatter, args.tree)?);
    if let Some(verifier) = &validity {
        out.push_str("\n** TAUTOLOGY CHECK **\n");
        out.push_str(&report::render(verifier, &formatter, args.tree)?);
    }

    match (&args.output, &args.append) {
        (Some(path), _) => fs::write(path, &out)
            .wrap_err_with(|| format!("cannot write report to {}", path.display()))?,
        (None, Some(path)) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("cannot append report to {}", path.display()))?;
            file.write_all(out.as_bytes())?;
        }
        (None, None) => print!("{}", out),
    }
    Ok(())
}
