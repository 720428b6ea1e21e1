// Entry point and high-level CLI flow.
//
// By default the binary loads the file, runs the analysis once, prints every
// table and exports them next to a `summary.json`. With `--interactive` it
// falls back to the menu loop: [1] loads the file, [2] generates reports,
// after which the user can go back to the menu or exit.
mod output;
mod reports;

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use titanic_eda::loader::{self, LoadReport};
use titanic_eda::types::{
    CategoryRateRow, CorrelationRow, FeatureImpactRow, MissingValueRow, NumericShiftRow,
    OutcomeCountRow, PortRateRow, StatsRow,
};
use titanic_eda::util::{format_int, format_pct};
use titanic_eda::{analyze, AnalysisConfig, EdaError, ImputationPolicy, Passenger};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Exploratory analysis of passenger survival data", long_about = None)]
struct Cli {
    /// Passenger CSV with a header row
    #[arg(default_value = "train.csv")]
    input: PathBuf,

    /// Directory the CSV tables and summary.json are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Rows shown per table in the console preview
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,

    /// How missing ages are filled
    #[arg(long, value_enum, default_value_t = ImputationPolicy::Snapshot)]
    imputation: ImputationPolicy,

    /// Only print the tables, do not write any files
    #[arg(long)]
    no_export: bool,

    /// Run the load/report menu instead of a single pass
    #[arg(long)]
    interactive: bool,
}

/// Data loaded in the current session. Reports can be generated repeatedly
/// from the same load; each run works on a fresh copy.
struct Session {
    data: Option<Vec<Passenger>>,
}

fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn load(cli: &Cli) -> Result<Vec<Passenger>, EdaError> {
    let path = cli.input.display().to_string();
    let (data, report): (Vec<Passenger>, LoadReport) = loader::load_passengers(&path)?;
    println!(
        "Loaded {} records with {} features each.\n",
        format_int(report.total_rows),
        report.columns.len()
    );
    Ok(data)
}

fn generate_reports(cli: &Cli, mut data: Vec<Passenger>) -> Result<(), EdaError> {
    let config = AnalysisConfig {
        imputation: cli.imputation,
    };
    let analysis = analyze(&mut data, &config);
    let n = cli.preview_rows;

    let pre = &analysis.preprocess;
    println!(
        "Preprocessing: imputed {} age(s), {} embarkation port(s); {} name(s) without a title.\n",
        format_int(pre.imputed_age),
        format_int(pre.imputed_embarked),
        format_int(pre.untitled_names)
    );

    let o = &analysis.overview;
    println!("Dataset Overview\n");
    println!("Total Passengers: {}", format_int(o.total));
    println!(
        "Survived: {} ({})",
        format_int(o.survived),
        format_pct(o.survived_pct)
    );
    println!(
        "Perished: {} ({})",
        format_int(o.perished),
        format_pct(o.perished_pct)
    );
    let names: Vec<&str> = o.features.iter().map(|f| f.name()).collect();
    println!("Features: {}\n", names.join(", "));

    let tables = Tables {
        missing: reports::missing_value_rows(&analysis),
        stats: reports::stats_rows(&analysis),
        categories: reports::category_rows(&analysis),
        impact: reports::impact_rows(&analysis),
        shift: reports::numeric_shift_rows(&analysis),
        correlation: reports::correlation_rows(&analysis),
        class: reports::class_rows(&analysis),
        gender: reports::gender_rows(&analysis),
        age: reports::age_rows(&analysis),
        port: reports::port_rows(&analysis),
    };

    output::preview_table("Missing Values", None, &tables.missing, n.max(tables.missing.len()));
    output::preview_table("Statistical Summary", Some("numeric features"), &tables.stats, n);
    output::preview_table("Survival Rate by Category", None, &tables.categories, n);
    output::preview_table("Impact of Categorical Features on Survival", None, &tables.impact, n);
    output::preview_table("Impact of Numeric Features on Survival", None, &tables.shift, n);
    output::preview_table("Correlation Between Numeric Features and Survival", None, &tables.correlation, n);
    output::preview_table("Survival by Passenger Class", None, &tables.class, n);
    output::preview_table("Survival by Gender", None, &tables.gender, n);
    output::preview_table("Age Distribution by Survival", None, &tables.age, n);
    output::preview_table("Survival Rate by Embarkation Port", None, &tables.port, n);

    println!("Key Finding\n");
    println!("{}\n", reports::key_finding_text(&analysis));

    if cli.no_export {
        return Ok(());
    }
    std::fs::create_dir_all(&cli.out_dir)?;
    let dir = &cli.out_dir;
    output::write_csv(&dir.join("missing_values.csv"), &tables.missing)?;
    output::write_csv(&dir.join("numeric_stats.csv"), &tables.stats)?;
    output::write_csv(&dir.join("categorical_rates.csv"), &tables.categories)?;
    output::write_csv(&dir.join("categorical_impact.csv"), &tables.impact)?;
    output::write_csv(&dir.join("numeric_impact.csv"), &tables.shift)?;
    output::write_csv(&dir.join("correlations.csv"), &tables.correlation)?;
    output::write_csv(&dir.join("survival_by_class.csv"), &tables.class)?;
    output::write_csv(&dir.join("survival_by_gender.csv"), &tables.gender)?;
    output::write_csv(&dir.join("age_distribution.csv"), &tables.age)?;
    output::write_csv(&dir.join("survival_by_port.csv"), &tables.port)?;

    let source = cli.input.display().to_string();
    let summary = reports::generate_summary(&source, cli.imputation, &analysis);
    output::write_json(&dir.join("summary.json"), &summary)?;
    info!(dir = %dir.display(), "reports exported");
    println!("(Full tables exported to {})\n", dir.display());
    Ok(())
}

struct Tables {
    missing: Vec<MissingValueRow>,
    stats: Vec<StatsRow>,
    categories: Vec<CategoryRateRow>,
    impact: Vec<FeatureImpactRow>,
    shift: Vec<NumericShiftRow>,
    correlation: Vec<CorrelationRow>,
    class: Vec<OutcomeCountRow>,
    gender: Vec<OutcomeCountRow>,
    age: Vec<OutcomeCountRow>,
    port: Vec<PortRateRow>,
}

fn report_failure(e: &EdaError) {
    error!(code = e.error_code(), "{}", e);
    eprintln!("Error: {}\n", e);
}

fn run_interactive(cli: &Cli) {
    let mut session = Session { data: None };
    loop {
        println!("Titanic Survival Analysis:");
        println!("[1] Load the file");
        println!("[2] Generate Reports\n");
        match read_choice().as_str() {
            "1" => match load(cli) {
                Ok(data) => session.data = Some(data),
                Err(e) => report_failure(&e),
            },
            "2" => {
                println!();
                let Some(data) = session.data.clone() else {
                    println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
                    continue;
                };
                if let Err(e) = generate_reports(cli, data) {
                    report_failure(&e);
                }
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "" => break,
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.interactive {
        run_interactive(&cli);
        return ExitCode::SUCCESS;
    }

    match load(&cli).and_then(|data| generate_reports(&cli, data)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}
