use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::debug;
use std::path::PathBuf;
use tanemaki::libtane::error::Error;
use tanemaki::libtane::gloss::{generate_glosses, glosses_statement, GlossSettings};
use tanemaki::libtane::migration::write_migration;

#[derive(Parser, Debug)]
#[command(name = "種まき: Glosses")]
#[command(version, about = "Generates the alphanumeric gloss seed migration", long_about = None)]
struct Args {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "supabase/migrations/20260227000000_add_gloss_data.sql"
    )]
    output: PathBuf,
    #[arg(long, value_name = "DIR", default_value = "/Glosses")]
    image_dir: String,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

impl Args {
    fn settings(&self) -> GlossSettings {
        GlossSettings {
            image_dir: self.image_dir.clone(),
            ..GlossSettings::default()
        }
    }
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    let settings = args.settings();
    debug!("[Setup] Settings: {:?}", settings);

    let glosses = generate_glosses(&settings);
    let statement = glosses_statement(&glosses);
    write_migration(&args.output, &statement)?;

    println!(
        "{}",
        format!("✅ Migration file created at: {}", args.output.display()).green()
    );
    println!(
        "{}",
        format!("📊 Total entries generated: {}", statement.row_count()).cyan()
    );
    Ok(())
}
