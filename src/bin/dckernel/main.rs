extern crate dckernel;
#[macro_use]
extern crate structopt;
extern crate ndarray;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate prettytable;
extern crate serde_json;

use dckernel::simulate::{self, Corruption};
use dckernel::{Output, RobustTest, TestResult, RNG};
use ndarray::prelude::*;
use serde_json::json;
use structopt::StructOpt as _;

#[derive(Debug, StructOpt)]
#[structopt(name = "dckernel", about = "Robust kernel testing under data corruption")]
struct CliApp {
    /// enable verbose output
    #[structopt(long)]
    verbose: bool,

    /// Output less information
    #[structopt(long)]
    quiet: bool,

    #[structopt(subcommand)]
    command: CliCommand,
}

#[derive(Debug, StructOpt)]
enum CliCommand {
    /// Test whether two samples come from the same distribution (MMD).
    #[structopt(name = "two-sample")]
    TwoSample(CliCommandTest),

    /// Test whether paired samples are independent (HSIC).
    #[structopt(name = "independence")]
    Independence(CliCommandTest),

    /// Run a test on synthetic, optionally corrupted data.
    #[structopt(name = "simulate")]
    Simulate(CliCommandSimulate),
}

#[derive(Debug, StructOpt)]
struct CliCommandTest {
    /// CSV file with one sample per row.
    #[structopt(long, parse(from_os_str))]
    x: std::path::PathBuf,

    /// CSV file with one sample per row.
    /// For the independence test, row i is paired with row i of x.
    #[structopt(long, parse(from_os_str))]
    y: std::path::PathBuf,

    /// Whether the first row of each CSV file is a header.
    #[structopt(long)]
    headers: bool,

    #[structopt(flatten)]
    run: CliRunOptions,
}

#[derive(Debug, StructOpt)]
struct CliCommandSimulate {
    /// Which test to simulate (two-sample or independence).
    #[structopt(long, default_value = "two-sample")]
    setting: Setting,

    /// Number of samples (pairs for independence).
    #[structopt(long, default_value = "200")]
    n: usize,

    /// Number of features.
    #[structopt(long, default_value = "1")]
    dim: usize,

    /// Two-sample: mean shift of y. Independence: strength of the dependence.
    #[structopt(long, default_value = "0.0")]
    effect: f64,

    /// How many samples of y (or pairs) to corrupt before testing.
    #[structopt(long, default_value = "0")]
    corrupt: usize,

    /// Corruption model (constant:<value>, noise:<std>, swap).
    #[structopt(long, default_value = "constant:10")]
    corruption: Corruption,

    #[structopt(flatten)]
    run: CliRunOptions,
}

#[derive(Debug, StructOpt)]
struct CliRunOptions {
    /// Random number generator seed for reproducible runs.
    #[structopt(long, default_value = "7861")]
    seed: usize,

    #[structopt(flatten)]
    test: RobustTest,

    /// Whether 32-bit numbers should be used for the kernel matrices.
    #[structopt(long)]
    use_32: bool,

    /// A CSV into which the permuted statistics are written.
    /// Overwrites the file contents!
    #[structopt(long, parse(from_os_str))]
    write_csv: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, Copy)]
enum Setting {
    TwoSample,
    Independence,
}

impl std::str::FromStr for Setting {
    type Err = failure::Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name.to_ascii_lowercase().as_ref() {
            "two-sample" | "mmd" => Setting::TwoSample,
            "independence" | "hsic" => Setting::Independence,
            _ => bail!("expected two-sample or independence, got: {:?}", name),
        })
    }
}

fn main() {
    let args = CliApp::from_args();
    if args.verbose {
        eprintln!("args: {:#?}", args);
    }
    let quiet = args.quiet;
    let result = match args.command {
        CliCommand::TwoSample(cmd) => command_test(cmd, Setting::TwoSample, quiet),
        CliCommand::Independence(cmd) => command_test(cmd, Setting::Independence, quiet),
        CliCommand::Simulate(cmd) => command_simulate(cmd, quiet),
    };

    if let Err(err) = result {
        eprintln!("ERROR: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn command_test(cmd: CliCommandTest, setting: Setting, quiet: bool) -> Result<(), failure::Error> {
    let CliCommandTest { x, y, headers, run } = cmd;
    let x = dckernel::read_csv_sample(&x, headers)?;
    let y = dckernel::read_csv_sample(&y, headers)?;
    run_test(setting, x, y, run, quiet)
}

fn command_simulate(cmd: CliCommandSimulate, quiet: bool) -> Result<(), failure::Error> {
    let CliCommandSimulate {
        setting,
        n,
        dim,
        effect,
        corrupt,
        corruption,
        run,
    } = cmd;

    ensure!(n >= 2, "Option --n must be at least 2");
    ensure!(dim >= 1, "Option --dim must be at least 1");

    // data generation uses its own stream so that the permutations stay comparable
    let mut rng = RNG::new_with_seed(run.seed).fork_random_state();
    let (x, mut y) = match setting {
        Setting::TwoSample => (
            simulate::gaussian_sample(n, dim, 0.0, 1.0, &mut rng),
            simulate::gaussian_sample(n, dim, effect, 1.0, &mut rng),
        ),
        Setting::Independence => simulate::dependent_pairs(n, dim, effect, &mut rng),
    };
    let corrupted_rows = simulate::corrupt(y.view_mut(), x.view(), corrupt, corruption, &mut rng)?;
    if !quiet {
        eprintln!("corrupted rows of y: {:?}", corrupted_rows);
    }

    run_test(setting, x, y, run, quiet)
}

fn run_test(
    setting: Setting,
    x: Array2<f64>,
    y: Array2<f64>,
    options: CliRunOptions,
    quiet: bool,
) -> Result<(), failure::Error> {
    let CliRunOptions {
        seed,
        test,
        use_32,
        write_csv,
    } = options;

    let mut rng = RNG::new_with_seed(seed);
    let mut output = Output::new();

    if !quiet {
        output.add_human_readable(std::io::stderr());
    }

    if let Some(file) = write_csv {
        let file = std::fs::File::create(&file)
            .map_err(|err| format_err!("cannot open CSV file {}: {}", file.display(), err))?;
        output.add_csv_writer(file);
    }

    let result = if use_32 {
        let x = x.mapv(|v| v as f32);
        let y = y.mapv(|v| v as f32);
        dispatch(setting, &test, x.view(), y.view(), &mut rng, &mut output)?
    } else {
        dispatch(setting, &test, x.view(), y.view(), &mut rng, &mut output)?
    };

    if !quiet {
        print_summary_table(&result)?;
    }

    println!(
        "{:#}",
        json!({
            "test": result.statistic_name,
            "statistic": result.statistic,
            "quantile": result.quantile,
            "correction": result.correction,
            "threshold": result.threshold,
            "p_value": result.p_value,
            "reject": result.reject,
            "alpha": result.alpha,
            "corruptions": result.corruptions,
            "max_tolerated_corruptions": result.max_tolerated_corruptions,
            "fixed_bandwidth": result.fixed_bandwidth,
            "bandwidths": result.bandwidths,
            "permutations": result.permuted_statistics.len(),
        })
    );

    Ok(())
}

fn dispatch<A: dckernel::Scalar>(
    setting: Setting,
    test: &RobustTest,
    x: ArrayView2<A>,
    y: ArrayView2<A>,
    rng: &mut RNG,
    output: &mut Output,
) -> Result<TestResult, failure::Error> {
    match setting {
        Setting::TwoSample => test.two_sample(x, y, rng, output),
        Setting::Independence => test.independence(x, y, rng, output),
    }
}

fn print_summary_table(result: &TestResult) -> Result<(), failure::Error> {
    let tolerated = match result.max_tolerated_corruptions {
        Some(r) => r.to_string(),
        None => "-".to_owned(),
    };
    let mut table = prettytable::Table::new();
    table.add_row(row!["statistic", result.statistic_name]);
    table.add_row(row!["value", format!("{:.6e}", result.statistic)]);
    table.add_row(row!["quantile", format!("{:.6e}", result.quantile)]);
    table.add_row(row!["correction", format!("{:.6e}", result.correction)]);
    table.add_row(row!["p-value", format!("{:.4}", result.p_value)]);
    table.add_row(row!["reject H0", result.reject]);
    table.add_row(row!["max tolerated corruptions", tolerated]);
    table.print(&mut std::io::stderr())?;
    Ok(())
}
