use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{rng, SeedableRng};
use std::path::PathBuf;
use tanemaki::libtane::error::Error;
use tanemaki::libtane::migration::write_migration;
use tanemaki::libtane::quiz::{
    generate_quizzes, load_quiz_configs, quizzes_statement, QuizSettings, SYSTEM_ADMIN_ID,
};

#[derive(Parser, Debug)]
#[command(name = "種まき: Quizzes")]
#[command(version, about = "Generates the randomized quiz seed migration", long_about = None)]
struct Args {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "supabase/migrations/20260227000001_add_flexible_quizzes.sql"
    )]
    output: PathBuf,
    /// JSON array of `{ "title", "difficulty", "q_type" }` replacing the built-in quizzes
    #[arg(long, value_name = "FILE")]
    configs: Option<PathBuf>,
    /// Makes the sampled gloss ids reproducible
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "35")]
    pool_size: u32,
    #[arg(long, default_value = "6")]
    question_count: usize,
    #[arg(long, default_value = "4")]
    options_count: usize,
    #[arg(long, default_value = SYSTEM_ADMIN_ID)]
    created_by: String,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

impl Args {
    fn settings(&self) -> Result<QuizSettings, Error> {
        let mut settings = QuizSettings {
            gloss_pool_size: self.pool_size,
            question_count: self.question_count,
            options_count: self.options_count,
            created_by: self.created_by.clone(),
            ..QuizSettings::default()
        };
        if let Some(path) = &self.configs {
            settings.configs = load_quiz_configs(path)?;
        }
        Ok(settings)
    }
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str()))
        .init();

    let settings = args.settings()?;
    debug!("[Setup] Settings: {:?}", settings);

    let quizzes = match args.seed {
        Some(seed) => {
            info!("[Setup] Using seed {}", seed);
            generate_quizzes(&settings, &mut StdRng::seed_from_u64(seed))?
        }
        None => generate_quizzes(&settings, &mut rng())?,
    };
    let statement = quizzes_statement(&quizzes)?;
    write_migration(&args.output, &statement)?;

    println!(
        "{}",
        format!(
            "✅ Created flexible quiz migration in {}",
            args.output.display()
        )
        .green()
    );
    println!(
        "{}",
        format!("📊 Total quizzes generated: {}", statement.row_count()).cyan()
    );
    Ok(())
}
