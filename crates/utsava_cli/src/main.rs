use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utsava_base::{AngamKind, GregorianDate, MeanMotionEphemeris};
use utsava_festival::names::{lunar_month_name, nakshatra_name};
use utsava_festival::{FestivalOptions, FestivalReport, RuleBook, compute_festivals};
use utsava_series::{Kaala, PanchangaConfig, TimeSeries, build_series, kaala_angams, kaala_windows};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Parser)]
#[command(name = "utsava", about = "Panchangam festival calendar CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign festivals over the configured date range
    Festivals {
        /// Panchangam config (JSON: location, start, end, ...)
        #[arg(long)]
        config: PathBuf,
        /// Festival rule file; may be repeated
        #[arg(long, required = true)]
        rules: Vec<PathBuf>,
        /// Relative festival rule file; may be repeated
        #[arg(long)]
        relative: Vec<PathBuf>,
        /// Festival options (JSON); defaults apply when omitted
        #[arg(long)]
        options: Option<PathBuf>,
        /// Print the calendar as JSON
        #[arg(long)]
        json: bool,
        /// Also print every anomaly of the run
        #[arg(long)]
        diagnostics: bool,
    },
    /// Sunrise angams and months per day
    Panchangam {
        /// Panchangam config (JSON)
        #[arg(long)]
        config: PathBuf,
    },
    /// Kaala windows and tithi/nakshatra samples for one day
    Kaala {
        /// Panchangam config (JSON)
        #[arg(long)]
        config: PathBuf,
        /// Civil date (YYYY-MM-DD) within the configured range
        #[arg(long)]
        date: String,
        /// Kaala name (sunrise, madhyaahna, aparaahna, pradosha, ...)
        #[arg(long, default_value = "aparaahna")]
        kaala: String,
    },
}

fn read_text(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn load_config(path: &Path) -> PanchangaConfig {
    serde_json::from_str(&read_text(path)).unwrap_or_else(|e| {
        eprintln!("Invalid config {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn load_series(cfg: &PanchangaConfig) -> TimeSeries {
    let eph = MeanMotionEphemeris::new(cfg.location, cfg.ayanamsha).unwrap_or_else(|e| {
        eprintln!("Failed to set up ephemeris: {e}");
        std::process::exit(1);
    });
    build_series(&eph, cfg).unwrap_or_else(|e| {
        eprintln!("Failed to build series: {e}");
        std::process::exit(1);
    })
}

fn load_book(rules: &[PathBuf], relative: &[PathBuf]) -> RuleBook {
    let mut book = RuleBook::default();
    for path in rules {
        if let Err(e) = book.extend_json(&read_text(path)) {
            eprintln!("Invalid rule file {}: {e}", path.display());
            std::process::exit(1);
        }
    }
    for path in relative {
        if let Err(e) = book.extend_relative_json(&read_text(path)) {
            eprintln!("Invalid relative rule file {}: {e}", path.display());
            std::process::exit(1);
        }
    }
    book
}

fn load_options(path: Option<&Path>) -> FestivalOptions {
    let Some(path) = path else {
        return FestivalOptions::default();
    };
    serde_json::from_str(&read_text(path)).unwrap_or_else(|e| {
        eprintln!("Invalid options {}: {e}", path.display());
        std::process::exit(1);
    })
}

/// Local clock time `HH:MM` of `jd`.
fn local_hm(jd: f64, tz_hours: f64) -> String {
    let minutes = ((jd + 0.5 + tz_hours / 24.0).rem_euclid(1.0) * 1440.0).round() as i64 % 1440;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn print_calendar(report: &FestivalReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(&report.calendar) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize calendar: {e}");
                std::process::exit(1);
            }
        }
        return;
    }
    for day in report.calendar.days() {
        println!("{}  {}", day.date, day.festivals.join("; "));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Festivals {
            config,
            rules,
            relative,
            options,
            json,
            diagnostics,
        } => {
            let cfg = load_config(&config);
            let series = load_series(&cfg);
            let book = load_book(&rules, &relative);
            let options = load_options(options.as_deref());
            info!(rules = book.rules().len(), relative = book.relative().len(), "rules loaded");

            let report = compute_festivals(&series, &book, &options).unwrap_or_else(|e| {
                eprintln!("Festival computation failed: {e}");
                std::process::exit(1);
            });
            print_calendar(&report, json);
            if diagnostics {
                for anomaly in report.diagnostics.iter() {
                    eprintln!("{anomaly}");
                }
            }
        }

        Commands::Panchangam { config } => {
            let cfg = load_config(&config);
            let series = load_series(&cfg);
            let tz = cfg.timezone_offset_hours;
            for d in series.requested() {
                let Ok(day) = series.day(d) else { continue };
                println!(
                    "{} {}  rise {} set {}  tithi {:>2}  {:<16} yoga {:>2}  solar {:>2}/{:<2}  {}",
                    day.date,
                    WEEKDAYS[usize::from(day.weekday % 7)],
                    local_hm(day.sunrise, tz),
                    local_hm(day.sunset, tz),
                    day.angam_at_sunrise(AngamKind::Tithi),
                    nakshatra_name(day.angam_at_sunrise(AngamKind::Nakshatra)),
                    day.angam_at_sunrise(AngamKind::Yoga),
                    day.solar_month,
                    day.solar_month_day,
                    lunar_month_name(day.lunar_month),
                );
            }
        }

        Commands::Kaala {
            config,
            date,
            kaala,
        } => {
            let cfg = load_config(&config);
            let date: GregorianDate = date.parse().unwrap_or_else(|e| {
                eprintln!("Invalid date {date}: {e}");
                std::process::exit(1);
            });
            let kaala: Kaala = kaala.parse().unwrap_or_else(|e| {
                eprintln!("{e}");
                eprintln!(
                    "Valid: {}",
                    Kaala::all().iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
                );
                std::process::exit(1);
            });
            let series = load_series(&cfg);
            let d = cfg.start.days_until(&date) + 1;
            if !series.requested().contains(&d) {
                eprintln!("{date} is outside {}..={}", cfg.start, cfg.end);
                std::process::exit(1);
            }

            let tz = cfg.timezone_offset_hours;
            let windows = kaala_windows(&series, d, kaala).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            for (label, w) in ["today", "tomorrow"].iter().zip(windows) {
                println!(
                    "{kaala} {label}: {} - {} ({:.1} ghatikas)",
                    local_hm(w.start, tz),
                    local_hm(w.end, tz),
                    w.duration_ghatikas()
                );
            }
            for kind in [AngamKind::Tithi, AngamKind::Nakshatra] {
                match kaala_angams(&series, d, kind, kaala) {
                    Ok(samples) => println!("{kind}: {samples:?}"),
                    Err(e) => {
                        eprintln!("{e}");
                        std::process::exit(1);
                    }
                }
            }
        }
    }
}
