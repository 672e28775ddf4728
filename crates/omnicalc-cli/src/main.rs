//! Omnicalc CLI: drive the calculator engine from a terminal
//!
//! ## Usage
//!
//! ```bash
//! omnicalc eval "2^10 - 24"           # Evaluate an expression
//! omnicalc convert 5 meter foot       # Convert units
//! omnicalc convert 100 USD EUR --category currency --live
//! omnicalc plot "sin(x)" --width 72   # ASCII-render a curve
//! omnicalc state ~/.omnicalc.json     # Inspect a saved record
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use omnicalc::convert::{Category, HttpRateSource, UnitConverter};
use omnicalc::error::{CalcError, CalcResult};
use omnicalc::format::{format_display, format_result};
use omnicalc::graph::{build_scene, GraphState, ViewWindow};
use omnicalc::state::{JsonFileStore, StateStore};

#[derive(Debug, Parser)]
#[command(name = "omnicalc", version, about = "Multi-mode calculator engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all logs except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate an expression
    Eval {
        /// Expression text, e.g. "2^10 - 24" or "sin(pi/6)"
        expr: String,
    },

    /// Convert a value between units
    Convert {
        /// The value to convert
        value: f64,
        /// Source unit (e.g. meter, celsius, USD)
        from: String,
        /// Target unit
        to: String,
        /// Conversion category
        #[arg(short, long, default_value = "length")]
        category: String,
        /// Fetch live currency rates before converting
        #[arg(long)]
        live: bool,
    },

    /// Sample a function and render it as ASCII
    Plot {
        /// Expression in x, e.g. "x^2 - 4"
        expr: String,
        /// Left edge of the view window
        #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
        xmin: f64,
        /// Right edge of the view window
        #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
        xmax: f64,
        /// Bottom edge of the view window
        #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
        ymin: f64,
        /// Top edge of the view window
        #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
        ymax: f64,
        /// Output columns
        #[arg(long, default_value_t = 80)]
        width: u32,
        /// Output rows
        #[arg(long, default_value_t = 24)]
        height: u32,
    },

    /// Summarize a saved state record
    State {
        /// Path to the state file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_default();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> CalcResult<()> {
    match cli.command {
        Commands::Eval { expr } => run_eval(&expr),
        Commands::Convert {
            value,
            from,
            to,
            category,
            live,
        } => run_convert(value, &from, &to, &category, live),
        Commands::Plot {
            expr,
            xmin,
            xmax,
            ymin,
            ymax,
            width,
            height,
        } => run_plot(&expr, xmin, xmax, ymin, ymax, width, height),
        Commands::State { path } => run_state(&path),
    }
}

fn run_eval(expr: &str) -> CalcResult<()> {
    let parsed = omnicalc::expr::Parser::parse_const(expr)?;
    let value = parsed.eval_const();
    if !value.is_finite() {
        return Err(CalcError::InvalidExpression(
            "Expression result is not finite".into(),
        ));
    }
    println!("{}", format_display(value));
    Ok(())
}

fn run_convert(value: f64, from: &str, to: &str, category: &str, live: bool) -> CalcResult<()> {
    let category: Category = category.parse()?;
    let mut converter = UnitConverter::new();

    if category == Category::Currency && live {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| CalcError::RateFetch(format!("runtime: {e}")))?;
        runtime.block_on(async {
            converter
                .currency_mut()
                .refresh(&HttpRateSource::default(), SystemTime::now())
                .await;
        });
        tracing::debug!("live rate refresh complete");
    }

    let result = converter.convert(value, from, to, category)?;
    let flag = if result.approximate { " (approximate)" } else { "" };
    println!("{value} {from} = {} {to}{flag}", format_result(result.value));
    Ok(())
}

fn run_plot(
    expr: &str,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    width: u32,
    height: u32,
) -> CalcResult<()> {
    // Validate the expression up front; the scene builder skips bad
    // slots silently, which is wrong for an explicit CLI request.
    omnicalc::expr::Parser::parse(expr, Some("x"))?;

    let mut state = GraphState::new();
    state.window = ViewWindow::new(xmin, xmax, ymin, ymax)?;
    state.functions.y[0] = expr.to_string();

    let scene = build_scene(&state, width, height);
    let mut cells = vec![vec![' '; width as usize]; height as usize];

    let mut mark = |x: f64, y: f64, ch: char| {
        let col = x.round() as i64;
        let row = y.round() as i64;
        if (0..i64::from(width)).contains(&col) && (0..i64::from(height)).contains(&row) {
            let cell = &mut cells[row as usize][col as usize];
            // curves overdraw axes, axes overdraw blanks
            if ch == '*' || *cell == ' ' {
                *cell = ch;
            }
        }
    };

    for axis in &scene.axes {
        if (axis.from.x - axis.to.x).abs() < f64::EPSILON {
            for row in 0..height {
                mark(axis.from.x, f64::from(row), '|');
            }
        } else {
            for col in 0..width {
                mark(f64::from(col), axis.from.y, '-');
            }
        }
    }

    for curve in &scene.curves {
        for polyline in &curve.polylines {
            for p in polyline {
                mark(p.x, p.y, '*');
            }
        }
    }

    for row in cells {
        println!("{}", row.into_iter().collect::<String>());
    }
    println!("y = {expr}  x ∈ [{xmin}, {xmax}]  y ∈ [{ymin}, {ymax}]");
    Ok(())
}

fn run_state(path: &std::path::Path) -> CalcResult<()> {
    let store = JsonFileStore::new(path);
    let Some(state) = store.load()? else {
        println!("No saved state at {}", path.display());
        return Ok(());
    };

    println!("active mode: {}", state.active);
    println!(
        "basic: display {} ({} history entries)",
        state.basic.display(),
        state.basic.history().len()
    );
    println!(
        "scientific: display {}, memory {}, {} history entries",
        state.scientific.display(),
        state.scientific.memory(),
        state.scientific.history().len()
    );
    let w = &state.graphing.window;
    println!(
        "graphing: {:?} mode, window [{}, {}] × [{}, {}]",
        state.graphing.mode, w.xmin, w.xmax, w.ymin, w.ymax
    );
    println!(
        "conversion: {} ({} history entries)",
        state.conversion.category,
        state.conversion.history.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_eval() {
        let cli = Cli::parse_from(["omnicalc", "eval", "2 + 2"]);
        assert!(matches!(cli.command, Commands::Eval { .. }));
    }

    #[test]
    fn test_cli_parses_convert_with_category() {
        let cli = Cli::parse_from([
            "omnicalc", "convert", "100", "USD", "EUR", "--category", "currency",
        ]);
        match cli.command {
            Commands::Convert {
                value,
                category,
                live,
                ..
            } => {
                assert_eq!(value, 100.0);
                assert_eq!(category, "currency");
                assert!(!live);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_cli_parses_plot_window() {
        let cli = Cli::parse_from([
            "omnicalc", "plot", "x^2", "--xmin", "-5", "--xmax", "5", "--width", "40",
        ]);
        match cli.command {
            Commands::Plot {
                xmin, xmax, width, ..
            } => {
                assert_eq!(xmin, -5.0);
                assert_eq!(xmax, 5.0);
                assert_eq!(width, 40);
            }
            _ => panic!("expected plot"),
        }
    }

    #[test]
    fn test_run_eval_rejects_bad_expression() {
        assert!(run_eval("2 +* 3").is_err());
    }

    #[test]
    fn test_run_convert_offline_length() {
        run_convert(1.0, "mile", "kilometer", "length", false).unwrap();
    }

    #[test]
    fn test_run_convert_unknown_category() {
        assert!(run_convert(1.0, "a", "b", "parsecs", false).is_err());
    }

    #[test]
    fn test_run_plot_identity() {
        run_plot("x", -10.0, 10.0, -10.0, 10.0, 40, 20).unwrap();
    }

    #[test]
    fn test_run_plot_rejects_bad_window() {
        assert!(run_plot("x", 10.0, -10.0, -10.0, 10.0, 40, 20).is_err());
    }
}
