use anyhow::{Context, Result};
use iconscale::{Color, Scaler, ScalerOpts};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::path::{Path, PathBuf};

static IC_LAUNCHER: &str = include_str!("./ic_launcher.xml");

/// Name of the color resource referenced by the adaptive icon descriptor.
pub const BACKGROUND_COLOR_NAME: &str = "ic_launcher_background";

/// Size of the standalone adaptive foreground layer.
pub const FOREGROUND_LAYER_SIZE: u32 = 432;
/// Size of the standalone adaptive background layer.
pub const BACKGROUND_LAYER_SIZE: u32 = 1080;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Density {
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    pub const ALL: [Self; 5] = [
        Self::Mdpi,
        Self::Hdpi,
        Self::Xhdpi,
        Self::Xxhdpi,
        Self::Xxxhdpi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mdpi => "mdpi",
            Self::Hdpi => "hdpi",
            Self::Xhdpi => "xhdpi",
            Self::Xxhdpi => "xxhdpi",
            Self::Xxxhdpi => "xxxhdpi",
        }
    }

    /// Legacy launcher icon edge in pixels.
    pub fn launcher_size(self) -> u32 {
        match self {
            Self::Mdpi => 48,
            Self::Hdpi => 72,
            Self::Xhdpi => 96,
            Self::Xxhdpi => 144,
            Self::Xxxhdpi => 192,
        }
    }

    /// Adaptive icon layers are 108dp, 2.25x the 48dp launcher icon.
    pub fn foreground_size(self) -> u32 {
        self.launcher_size() * 9 / 4
    }

    pub fn dir_name(self) -> String {
        format!("mipmap-{}", self.as_str())
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An Android `res` directory.
pub struct AndroidRes {
    res: PathBuf,
}

impl AndroidRes {
    pub fn new(res: impl Into<PathBuf>) -> Self {
        Self { res: res.into() }
    }

    pub fn res_dir(&self) -> &Path {
        &self.res
    }

    fn mipmap_dir(&self, density: Density) -> Result<PathBuf> {
        let dir = self.res.join(density.dir_name());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        Ok(dir)
    }

    /// Writes `ic_launcher.png` and an identical `ic_launcher_round.png` for
    /// every density.
    pub fn write_launcher_icons(&self, scaler: &Scaler, background: Color) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(Density::ALL.len() * 2);
        let mut buf = vec![];
        for density in Density::ALL {
            let size = density.launcher_size();
            let icon = scaler.resize(size, background.into())?;
            buf.clear();
            iconscale::encode_png(&icon, &mut buf, background.is_opaque())?;
            let dir = self.mipmap_dir(density)?;
            for name in ["ic_launcher.png", "ic_launcher_round.png"] {
                let path = dir.join(name);
                std::fs::write(&path, &buf)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                written.push(path);
            }
            tracing::info!(%density, size, "wrote launcher icons");
        }
        Ok(written)
    }

    /// Writes a transparent `ic_launcher_foreground.png` for every density.
    pub fn write_foregrounds(&self, scaler: &Scaler) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(Density::ALL.len());
        for density in Density::ALL {
            let size = density.foreground_size();
            let path = self.mipmap_dir(density)?.join("ic_launcher_foreground.png");
            scaler.write(&path, ScalerOpts::new(size))?;
            written.push(path);
        }
        Ok(written)
    }

    /// Writes the `ic_launcher.xml` and `ic_launcher_round.xml` adaptive icon
    /// descriptors into `mipmap-anydpi-v26`.
    pub fn write_adaptive_xml(&self) -> Result<Vec<PathBuf>> {
        let anydpi = self.res.join("mipmap-anydpi-v26");
        std::fs::create_dir_all(&anydpi)?;
        let mut written = vec![];
        for name in ["ic_launcher.xml", "ic_launcher_round.xml"] {
            let path = anydpi.join(name);
            std::fs::write(&path, IC_LAUNCHER)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Writes `values/colors.xml` declaring the launcher background color.
    pub fn write_colors(&self, color: Color) -> Result<PathBuf> {
        let values = self.res.join("values");
        std::fs::create_dir_all(&values)?;
        let path = values.join("colors.xml");
        std::fs::write(&path, colors_xml(color)?)?;
        tracing::info!(%color, "wrote colors.xml");
        Ok(path)
    }

    /// Removes every `mipmap-*` directory.
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let mut removed = vec![];
        if !self.res.exists() {
            return Ok(removed);
        }
        for entry in std::fs::read_dir(&self.res)? {
            let entry = entry?;
            let is_mipmap = entry.file_name().to_string_lossy().starts_with("mipmap-");
            if is_mipmap && entry.file_type()?.is_dir() {
                std::fs::remove_dir_all(entry.path())?;
                removed.push(entry.path());
            }
        }
        removed.sort();
        Ok(removed)
    }
}

/// Writes the standalone adaptive icon layers, a transparent 432x432
/// `foreground.png` and a solid 1080x1080 `background.png`.
pub fn write_adaptive_layers(scaler: &Scaler, dir: &Path, color: Color) -> Result<[PathBuf; 2]> {
    let foreground = dir.join("foreground.png");
    scaler.write(&foreground, ScalerOpts::new(FOREGROUND_LAYER_SIZE))?;

    let background = dir.join("background.png");
    let fill = iconscale::solid(BACKGROUND_LAYER_SIZE, color)?;
    iconscale::write_png(&fill, &background, color.is_opaque())?;
    Ok([foreground, background])
}

/// Android color resources put alpha first, `#AARRGGBB`.
fn resource_hex(color: Color) -> String {
    if color.is_opaque() {
        color.to_string()
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", color.a, color.r, color.g, color.b)
    }
}

/// Renders `values/colors.xml`.
pub fn colors_xml(color: Color) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    let value = resource_hex(color);
    writer
        .create_element("resources")
        .write_inner_content(|writer| {
            writer
                .create_element("color")
                .with_attribute(("name", BACKGROUND_COLOR_NAME))
                .write_text_content(BytesText::new(&value))?;
            Ok(())
        })?;
    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}
