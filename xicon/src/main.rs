use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xicon::{command, Asset, IconArgs, IconEnv};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("XICON_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();
    let args = Args::parse();
    args.command.run()
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate all Android and iOS icons
    Icons {
        #[clap(flatten)]
        args: IconArgs,
        /// Keep existing icons instead of removing them first
        #[clap(long)]
        keep: bool,
    },
    /// Regenerate the Android launcher and adaptive icons
    Android {
        #[clap(flatten)]
        args: IconArgs,
        /// Keep existing mipmaps instead of removing them first
        #[clap(long)]
        keep: bool,
    },
    /// Regenerate the iOS app icon set
    Ios {
        #[clap(flatten)]
        args: IconArgs,
        /// Keep existing app icons instead of removing them first
        #[clap(long)]
        keep: bool,
    },
    /// Create favicon.png and favicon.ico for the docs
    Favicon {
        #[clap(flatten)]
        args: IconArgs,
        /// Output directory
        #[clap(long)]
        out: Option<PathBuf>,
    },
    /// Create a circular logo with a transparent background
    Logo {
        #[clap(flatten)]
        args: IconArgs,
        /// Output file
        #[clap(long)]
        out: Option<PathBuf>,
        /// Edge length in pixels
        #[clap(long)]
        size: Option<u32>,
    },
    /// Show what `icons` would generate
    Preview {
        #[clap(flatten)]
        args: IconArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Self::Icons { args, keep } => {
                let env = IconEnv::new(args, Asset::App)?;
                command::icons(&env, keep)?;
            }
            Self::Android { args, keep } => {
                let env = IconEnv::new(args, Asset::App)?;
                command::android(&env, keep)?;
            }
            Self::Ios { args, keep } => {
                let env = IconEnv::new(args, Asset::App)?;
                command::ios(&env, keep)?;
            }
            Self::Favicon { args, out } => {
                let env = IconEnv::new(args, Asset::Favicon)?;
                command::favicon(&env, out.as_deref())?;
            }
            Self::Logo { args, out, size } => {
                let env = IconEnv::new(args, Asset::Logo)?;
                command::logo(&env, out.as_deref(), size)?;
            }
            Self::Preview { args } => {
                let env = IconEnv::new(args, Asset::App)?;
                command::preview(&env);
            }
        }
        Ok(())
    }
}
