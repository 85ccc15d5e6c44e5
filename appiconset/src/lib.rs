use anyhow::{Context, Result};
use iconscale::{Color, Scaler, ScalerOpts};
use std::path::{Path, PathBuf};

mod contents;

pub use contents::{ContentsJson, Idiom, ImageEntry, Info};

/// One slot of the app icon set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppIcon {
    pub idiom: Idiom,
    /// Edge length in points.
    pub points: f32,
    pub scale: u32,
}

impl AppIcon {
    const fn new(idiom: Idiom, points: f32, scale: u32) -> Self {
        Self {
            idiom,
            points,
            scale,
        }
    }

    /// Edge length in pixels.
    pub fn pixels(&self) -> u32 {
        (self.points * self.scale as f32).round() as u32
    }

    /// Point size as written by Xcode, `83.5x83.5`.
    pub fn size(&self) -> String {
        let points = if self.points.fract() == 0.0 {
            format!("{}", self.points as u32)
        } else {
            format!("{}", self.points)
        };
        format!("{points}x{points}")
    }

    pub fn scale(&self) -> String {
        format!("{}x", self.scale)
    }

    pub fn filename(&self) -> String {
        format!("Icon-App-{}@{}.png", self.size(), self.scale())
    }

    pub fn entry(&self) -> ImageEntry {
        ImageEntry {
            filename: self.filename(),
            idiom: self.idiom,
            scale: self.scale(),
            size: self.size(),
        }
    }
}

pub const APP_ICONS: [AppIcon; 15] = [
    AppIcon::new(Idiom::Iphone, 20.0, 1),
    AppIcon::new(Idiom::Iphone, 20.0, 2),
    AppIcon::new(Idiom::Iphone, 20.0, 3),
    AppIcon::new(Idiom::Iphone, 29.0, 1),
    AppIcon::new(Idiom::Iphone, 29.0, 2),
    AppIcon::new(Idiom::Iphone, 29.0, 3),
    AppIcon::new(Idiom::Iphone, 40.0, 1),
    AppIcon::new(Idiom::Iphone, 40.0, 2),
    AppIcon::new(Idiom::Iphone, 40.0, 3),
    AppIcon::new(Idiom::Iphone, 60.0, 2),
    AppIcon::new(Idiom::Iphone, 60.0, 3),
    AppIcon::new(Idiom::Ipad, 76.0, 1),
    AppIcon::new(Idiom::Ipad, 76.0, 2),
    AppIcon::new(Idiom::Ipad, 83.5, 2),
    AppIcon::new(Idiom::IosMarketing, 1024.0, 1),
];

pub fn contents_json() -> ContentsJson {
    ContentsJson {
        images: APP_ICONS.iter().map(AppIcon::entry).collect(),
        info: Info::default(),
    }
}

/// An `AppIcon.appiconset` directory inside an asset catalog.
pub struct AppIconSet {
    dir: PathBuf,
}

impl AppIconSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes every icon of [`APP_ICONS`]. App Store icons must not have an
    /// alpha channel, so the background should be opaque.
    pub fn write_icons(&self, scaler: &Scaler, background: Color) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let mut written = Vec::with_capacity(APP_ICONS.len());
        for icon in &APP_ICONS {
            let path = self.dir.join(icon.filename());
            scaler.write(&path, ScalerOpts::new(icon.pixels()).background(background))?;
            written.push(path);
        }
        tracing::info!(count = written.len(), "wrote app icons");
        Ok(written)
    }

    pub fn write_contents(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join("Contents.json");
        std::fs::write(&path, contents_json().to_xcode_string()?)?;
        Ok(path)
    }

    /// Removes the PNGs of the set. The directory and `Contents.json` stay.
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let mut removed = vec![];
        if !self.dir.exists() {
            return Ok(removed);
        }
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "png") {
                std::fs::remove_file(&path)?;
                removed.push(path);
            }
        }
        removed.sort();
        Ok(removed)
    }
}
