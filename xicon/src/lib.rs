use crate::config::Config;
use anyhow::{Context, Result};
use clap::Parser;
use iconscale::{Color, Scaler};
use std::path::{Path, PathBuf};

pub mod command;
pub mod config;
mod task;

pub use task::TaskRunner;

/// Which kind of artwork a command produces. Each may read its own source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Asset {
    App,
    Favicon,
    Logo,
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::App => write!(f, "app icon"),
            Self::Favicon => write!(f, "favicon"),
            Self::Logo => write!(f, "logo"),
        }
    }
}

/// Where the launcher background color came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackgroundSource {
    Flag,
    Config,
    Corners,
    Default,
}

impl std::fmt::Display for BackgroundSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "--background"),
            Self::Config => write!(f, "config"),
            Self::Corners => write!(f, "icon corners"),
            Self::Default => write!(f, "default"),
        }
    }
}

#[derive(Debug, Default, Parser)]
pub struct IconArgs {
    /// Source image. Falls back to `icon` in the config file
    pub icon: Option<PathBuf>,
    /// Project root, all other paths are relative to it [default: .]
    #[clap(long)]
    pub root: Option<PathBuf>,
    /// Config file [default: xicon.yaml]
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Launcher background as `#RRGGBB`. Detected from the icon corners
    /// when neither this nor the config sets one
    #[clap(long)]
    pub background: Option<Color>,
    /// Use verbose output
    #[clap(long, short)]
    pub verbose: bool,
}

pub struct IconEnv {
    root: PathBuf,
    icon: PathBuf,
    config: Config,
    scaler: Scaler,
    background: Color,
    background_source: BackgroundSource,
    verbose: bool,
}

impl IconEnv {
    /// Resolves paths and decodes the source image. Nothing is written
    /// before this succeeds.
    pub fn new(args: IconArgs, asset: Asset) -> Result<Self> {
        let root = args.root.unwrap_or_else(|| PathBuf::from("."));
        let root = dunce::canonicalize(&root)
            .with_context(|| format!("project root not found: {}", root.display()))?;
        let config = match args.config {
            Some(config) => {
                let path = root.join(config);
                anyhow::ensure!(path.is_file(), "config file not found: {}", path.display());
                Config::parse(path)?
            }
            None => Config::parse(root.join("xicon.yaml"))?,
        };
        let icon = match args.icon {
            Some(icon) => icon,
            None => config
                .icon(asset)
                .map(Path::to_path_buf)
                .with_context(|| format!("no {asset} source given and none set in the config"))?,
        };
        let icon = root.join(icon);
        anyhow::ensure!(icon.is_file(), "icon file not found: {}", icon.display());
        let scaler = Scaler::open(&icon)?;

        let (background, background_source) = if let Some(color) = args.background {
            (color, BackgroundSource::Flag)
        } else if let Some(color) = config.background() {
            (color, BackgroundSource::Config)
        } else if let Some(color) = scaler.dominant_corner_color() {
            (color, BackgroundSource::Corners)
        } else {
            (Color::NAVY, BackgroundSource::Default)
        };
        anyhow::ensure!(
            background.is_opaque(),
            "launcher background {background} ({background_source}) must be opaque"
        );
        tracing::debug!(icon = %icon.display(), %background, %background_source, "resolved icon env");

        Ok(Self {
            root,
            icon,
            config,
            scaler,
            background,
            background_source,
            verbose: args.verbose,
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    pub fn icon(&self) -> &Path {
        &self.icon
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn background_source(&self) -> BackgroundSource {
        self.background_source
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn android_res_dir(&self) -> PathBuf {
        self.root.join(self.config.android().res())
    }

    pub fn generated_dir(&self) -> PathBuf {
        self.root.join(self.config.android().generated())
    }

    pub fn appiconset_dir(&self) -> PathBuf {
        self.root.join(self.config.ios().appiconset())
    }

    pub fn favicon_dir(&self) -> PathBuf {
        self.root.join(self.config.favicon().out())
    }

    pub fn logo_path(&self) -> PathBuf {
        self.root.join(self.config.logo().out())
    }

    pub fn logo_size(&self) -> u32 {
        self.config.logo().size()
    }
}
