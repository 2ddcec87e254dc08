#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use shiftbook::{
    io,
    model::{date_key, ShiftCode, StaffId},
    report::render_month,
    scheduler::Scheduler,
    storage::{FileStore, RosterStore},
    YearMonth,
};
use std::io::{BufRead, Write};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Planning mensuel de la boutique (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire des données persistées
    #[arg(long, global = true, default_value = "roster-data")]
    data_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remplir automatiquement un mois
    Generate {
        #[arg(long)]
        year: i32,
        /// 1 = janvier
        #[arg(long)]
        month: i32,
        /// Graine du tirage au sort (répartition reproductible)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Afficher la grille d'un mois
    Show {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: i32,
    },

    /// Poser un code pour une personne un jour donné
    Set {
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// u, i, k, t ou m
        #[arg(long)]
        staff: StaffId,
        /// A, B, S, -, PL, Cls, ShopClosed
        #[arg(long)]
        code: ShiftCode,
    },

    /// Faire tourner une date : normal → férié → fermé → normal
    Toggle {
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
    },

    /// Vérifier les binômes d'un mois
    Check {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: i32,
    },

    /// Exporter un mois (CSV) et/ou tout le planning (JSON)
    Export {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: i32,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Effacer tout le planning (jours fériés et fermés conservés)
    Reset {
        /// Ne pas demander de confirmation
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let mut store = RosterStore::new(FileStore::open(&cli.data_dir)?);
    let mut scheduler = Scheduler::with_state(store.load()?);

    let code = match cli.cmd {
        Commands::Generate { year, month, seed } => {
            let month = YearMonth::new(year, month.saturating_sub(1));
            let mut rng: Box<dyn RngCore> = match seed {
                Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
                None => Box::new(rand::thread_rng()),
            };
            scheduler.generate(month, rng.as_mut());
            store.save(scheduler.state())?;
            let state = scheduler.state();
            print!("{}", render_month(&state.schedule, &state.marks, month));
            0
        }
        Commands::Show { year, month } => {
            let month = YearMonth::new(year, month.saturating_sub(1));
            let state = scheduler.state();
            print!("{}", render_month(&state.schedule, &state.marks, month));
            0
        }
        Commands::Set { date, staff, code } => {
            scheduler.edit_cell(date, staff, code);
            store.save(scheduler.state())?;
            // avertissement seulement, la saisie est conservée
            if let Some(message) = scheduler.validate_day(date).message {
                eprintln!("{}: {message}", date_key(date));
            }
            0
        }
        Commands::Toggle { date } => {
            let status = scheduler.toggle_day(date);
            store.save(scheduler.state())?;
            println!("{} → {status:?}", date_key(date));
            0
        }
        Commands::Check { year, month } => {
            let month = YearMonth::new(year, month.saturating_sub(1));
            let conflicts = scheduler.validate_month(month);
            if conflicts.is_empty() {
                println!("OK: no pairing conflicts");
                0
            } else {
                eprintln!("Found {} pairing conflict(s)", conflicts.len());
                for c in &conflicts {
                    eprintln!(
                        "{}: {} & {} both on {}",
                        date_key(c.date),
                        c.pair.0,
                        c.pair.1,
                        c.code
                    );
                }
                // Code 2 = WARNING
                2
            }
        }
        Commands::Export {
            year,
            month,
            out_csv,
            out_json,
        } => {
            let month = YearMonth::new(year, month.saturating_sub(1));
            let state = scheduler.state();
            if let Some(path) = out_csv {
                io::export_month_csv(path, &state.schedule, &state.marks, month)?;
            }
            if let Some(path) = out_json {
                io::export_schedule_json(path, &state.schedule)?;
            }
            0
        }
        Commands::Reset { yes } => {
            if yes || confirm("Reset the whole schedule? [y/N] ")? {
                scheduler.reset();
                store.reset_schedule()?;
                println!("Schedule cleared");
            } else {
                println!("Aborted");
            }
            0
        }
    };

    std::process::exit(code);
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "o" | "oui"))
}
