use clap::{Parser, Subcommand};
use plistgen::config::JobSpec;
use plistgen::inspect;
use tracing_subscriber::EnvFilter;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "plistgen")]
#[command(about = "launchd job plist generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a job description (JSON) into a property list.
    Render {
        #[arg(long)]
        config: String,

        /// Output path; prints to stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
    /// List the top-level keys of a rendered property list.
    Inspect {
        #[arg(long)]
        plist: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Render { config, out } => {
            // 1) Parse + validate the job description.
            let spec = JobSpec::from_file(&config)?;
            let target = out.clone().unwrap_or_default();
            let job = spec.validate_and_build(target)?;

            // 2) Write it out (or print it).
            match out {
                Some(path) => {
                    job.commit()?;
                    tracing::info!(path = %path, options = job.options().len(), "wrote plist");
                }
                None => print!("{}", job.serialize()),
            }
        }
        Commands::Inspect { plist } => {
            let entries = inspect::parse_file(&plist)?;
            if entries.is_empty() {
                tracing::warn!(path = %plist, "plist has no top-level keys");
            }
            for entry in entries {
                println!(
                    "{}\t{}\t{}",
                    entry.key,
                    entry.kind,
                    entry.value.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
