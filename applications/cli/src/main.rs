/// AudioBoost - raise quiet segments of an audio file toward a peak ceiling
use anyhow::Context;
use audioboost::config::Overrides;
use audioboost::{analyze, boost, BoostConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "audioboost")]
#[command(about = "Segment-based peak normalization of audio files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Boost quiet segments and write the result as 16-bit WAV
    Boost {
        /// Input audio file
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Report the gain each segment would receive without writing output
    Analyze {
        /// Input audio file
        input: PathBuf,
        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Print sample rate, channels and duration of the first audio stream
    Probe {
        /// Input audio file
        input: PathBuf,
    },
}

#[derive(Args)]
struct TuningArgs {
    /// Peak ceiling in dBFS (default 0.0)
    #[arg(short, long, allow_negative_numbers = true)]
    target_dbfs: Option<f64>,
    /// Segment duration in milliseconds (default 120000)
    #[arg(short, long = "segment-ms")]
    segment_ms: Option<u64>,
    /// Configuration file path
    #[arg(short, long, env = "AUDIOBOOST_CONFIG")]
    config: Option<PathBuf>,
}

impl TuningArgs {
    fn load(&self) -> anyhow::Result<BoostConfig> {
        let config = BoostConfig::load(self.config.as_deref())
            .context("failed to load configuration")?
            .with_overrides(&Overrides {
                target_dbfs: self.target_dbfs,
                segment_duration_ms: self.segment_ms,
            });
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "audioboost=info,audioboost_codec=info,audioboost_loudness=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Boost {
            input,
            output,
            tuning,
        } => {
            let config = tuning.load()?;
            tracing::info!("Processing {}", input.display());
            let report = boost(&input, &output, &config)
                .with_context(|| format!("failed to boost {}", input.display()))?;
            println!("{}", report);
            println!("Saved {}", output.display());
        }
        Commands::Analyze { input, tuning } => {
            let config = tuning.load()?;
            let report = analyze(&input, &config)
                .with_context(|| format!("failed to analyze {}", input.display()))?;
            println!("{}", report);
        }
        Commands::Probe { input } => {
            let info = audioboost_codec::probe(&input)
                .with_context(|| format!("failed to probe {}", input.display()))?;
            println!("{}", info);
        }
    }

    Ok(())
}
