use anyhow::{Context, Result};
use molar::*;
use std::borrow::Cow;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "Enter chemical formula (e.g. K4[Fe(CN)6], CuSO4·5H2O, NH4^+, ...): ";

/// Settings read from the environment.
struct Settings {
    /// `MOLAR_LOG`: log level, `warn` by default so charge notes are shown.
    log_level: String,
    /// `MOLAR_TABLE`: CSV file replacing the built-in atomic masses.
    table_path: Option<String>,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            log_level: std::env::var("MOLAR_LOG").unwrap_or_else(|_| "warn".to_string()),
            table_path: std::env::var("MOLAR_TABLE").ok(),
        }
    }

    fn load_table(&self) -> Result<Cow<'static, ElementMassTable>> {
        match &self.table_path {
            Some(path) => {
                let table = ElementMassTable::from_csv_path(path)
                    .with_context(|| format!("Failed to load atomic masses from {path}"))?;
                Ok(Cow::Owned(table))
            }
            None => Ok(Cow::Borrowed(ElementMassTable::standard())),
        }
    }
}

fn report(formula: &str, table: &ElementMassTable) -> bool {
    match compute_molar_mass(formula, table) {
        Ok(result) => {
            println!("Molar mass of {} is {}\n", formula, result);
            true
        }
        Err(e) => {
            println!("Error: {}\n", e);
            false
        }
    }
}

fn repl(table: &ElementMassTable) -> Result<()> {
    println!("=== Molar Mass Calculator ===");
    println!("Type 'exit' to quit the program.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let formula = line?;
        let formula = formula.trim();

        if formula.eq_ignore_ascii_case("exit") {
            println!("Exiting the calculator. Goodbye!");
            break;
        }
        report(formula, table);
    }
    Ok(())
}

fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings.log_level);
    let table = settings.load_table()?;

    let formulas: Vec<String> = std::env::args().skip(1).collect();
    if formulas.is_empty() {
        return repl(&table);
    }

    let mut failed = false;
    for formula in &formulas {
        failed |= !report(formula.trim(), &table);
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
