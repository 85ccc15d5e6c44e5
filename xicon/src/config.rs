use crate::Asset;
use anyhow::{Context, Result};
use iconscale::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ANDROID_RES: &str = "android/app/src/main/res";
const ANDROID_GENERATED: &str = "assets/icon/generated";
const IOS_APPICONSET: &str = "ios/Runner/Assets.xcassets/AppIcon.appiconset";
const FAVICON_OUT: &str = "docs/assets/logo";
const LOGO_OUT: &str = "assets/logo/logo_circle.png";
const LOGO_SIZE: u32 = 512;

/// Contents of `xicon.yaml`. Every key is optional.
#[derive(Clone, Debug, Default)]
pub struct Config {
    generic: GenericConfig,
    android: AndroidConfig,
    ios: IosConfig,
    favicon: FaviconConfig,
    logo: LogoConfig,
}

impl Config {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Default::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: RawConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(Self {
            generic: GenericConfig {
                icon: config.icon,
                background: config.background,
            },
            android: config.android.unwrap_or_default(),
            ios: config.ios.unwrap_or_default(),
            favicon: config.favicon.unwrap_or_default(),
            logo: config.logo.unwrap_or_default(),
        })
    }

    /// Source image for `asset`, falling back to the top level `icon`.
    pub fn icon(&self, asset: Asset) -> Option<&Path> {
        let icon = match asset {
            Asset::App => None,
            Asset::Favicon => self.favicon.source.as_deref(),
            Asset::Logo => self.logo.source.as_deref(),
        };
        icon.or(self.generic.icon.as_deref())
    }

    pub fn background(&self) -> Option<Color> {
        self.generic.background
    }

    pub fn android(&self) -> &AndroidConfig {
        &self.android
    }

    pub fn ios(&self) -> &IosConfig {
        &self.ios
    }

    pub fn favicon(&self) -> &FaviconConfig {
        &self.favicon
    }

    pub fn logo(&self) -> &LogoConfig {
        &self.logo
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    icon: Option<PathBuf>,
    background: Option<Color>,
    android: Option<AndroidConfig>,
    ios: Option<IosConfig>,
    favicon: Option<FaviconConfig>,
    logo: Option<LogoConfig>,
}

#[derive(Clone, Debug, Default)]
pub struct GenericConfig {
    icon: Option<PathBuf>,
    background: Option<Color>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AndroidConfig {
    res: Option<PathBuf>,
    generated: Option<PathBuf>,
}

impl AndroidConfig {
    /// The `res` directory of the android app module.
    pub fn res(&self) -> &Path {
        self.res.as_deref().unwrap_or(Path::new(ANDROID_RES))
    }

    /// Where the standalone adaptive icon layers go.
    pub fn generated(&self) -> &Path {
        self.generated
            .as_deref()
            .unwrap_or(Path::new(ANDROID_GENERATED))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IosConfig {
    appiconset: Option<PathBuf>,
}

impl IosConfig {
    pub fn appiconset(&self) -> &Path {
        self.appiconset
            .as_deref()
            .unwrap_or(Path::new(IOS_APPICONSET))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaviconConfig {
    source: Option<PathBuf>,
    out: Option<PathBuf>,
}

impl FaviconConfig {
    pub fn out(&self) -> &Path {
        self.out.as_deref().unwrap_or(Path::new(FAVICON_OUT))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogoConfig {
    source: Option<PathBuf>,
    out: Option<PathBuf>,
    size: Option<u32>,
}

impl LogoConfig {
    pub fn out(&self) -> &Path {
        self.out.as_deref().unwrap_or(Path::new(LOGO_OUT))
    }

    pub fn size(&self) -> u32 {
        self.size.unwrap_or(LOGO_SIZE)
    }
}
