use image::codecs::ico::IcoEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

mod color;
mod error;

pub use color::{Background, Color};
pub use error::{Result, ScaleError};

/// Fraction of the logo canvas covered by the shorter edge of the artwork.
const CIRCLE_FILL: f64 = 0.9;

/// Size and background of a single output icon.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScalerOpts {
    pub size: u32,
    pub background: Background,
}

impl ScalerOpts {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            background: Background::Transparent,
        }
    }

    pub fn background(mut self, background: impl Into<Background>) -> Self {
        self.background = background.into();
        self
    }
}

/// A decoded source icon, scaled into any number of outputs.
pub struct Scaler {
    img: RgbaImage,
}

impl Scaler {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|err| ScaleError::InvalidImage(format!("{}: {}", path.display(), err)))?;
        Self::from_image(img)
    }

    pub fn from_image(img: DynamicImage) -> Result<Self> {
        let img = img.into_rgba8();
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ScaleError::InvalidImage("image has no pixels".into()));
        }
        tracing::debug!(width, height, "decoded source icon");
        Ok(Self { img })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    pub fn resize(&self, size: u32, background: Background) -> Result<RgbaImage> {
        resize_with_padding(&self.img, size, background)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P, opts: ScalerOpts) -> Result<()> {
        let icon = self.resize(opts.size, opts.background)?;
        write_png(&icon, path, opts.background.is_opaque())
    }

    /// The most common of the four corner colors, ignoring fully transparent
    /// corners. Ties go to the first corner clockwise from the top left.
    pub fn dominant_corner_color(&self) -> Option<Color> {
        let (width, height) = self.dimensions();
        let corners: Vec<Color> = [
            (0, 0),
            (width - 1, 0),
            (0, height - 1),
            (width - 1, height - 1),
        ]
        .into_iter()
        .map(|(x, y)| Color::from(*self.img.get_pixel(x, y)))
        .filter(|color| color.a != 0)
        .map(|color| Color::rgb(color.r, color.g, color.b))
        .collect();
        let mut dominant = None;
        let mut best = 0;
        for color in &corners {
            let count = corners.iter().filter(|other| *other == color).count();
            if count > best {
                dominant = Some(*color);
                best = count;
            }
        }
        dominant
    }
}

/// Scales `source` so its longer edge is exactly `size` and centers it on a
/// `size x size` canvas filled with `background`.
///
/// The source alpha is used as the paste mask, so transparent source pixels
/// leave the background untouched. When the difference between the canvas
/// and the scaled edge is odd the extra pixel goes to the right/bottom border.
pub fn resize_with_padding(
    source: &RgbaImage,
    size: u32,
    background: Background,
) -> Result<RgbaImage> {
    if size == 0 {
        return Err(ScaleError::InvalidDimension(size));
    }
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(ScaleError::InvalidImage("image has no pixels".into()));
    }
    let (scaled_width, scaled_height) = fit(width, height, size);
    let scaled = if (scaled_width, scaled_height) == (width, height) {
        source.clone()
    } else {
        image::imageops::resize(source, scaled_width, scaled_height, FilterType::Lanczos3)
    };
    if (scaled_width, scaled_height) == (size, size) && background == Background::Transparent {
        return Ok(scaled);
    }
    let mut canvas = RgbaImage::from_pixel(size, size, background.pixel());
    let x = (size - scaled_width) / 2;
    let y = (size - scaled_height) / 2;
    image::imageops::overlay(&mut canvas, &scaled, x.into(), y.into());
    Ok(canvas)
}

/// Dimensions of a `width x height` image scaled so that its longer edge is
/// `size`. The shorter edge is rounded to the nearest pixel.
pub fn fit(width: u32, height: u32, size: u32) -> (u32, u32) {
    let long = u64::from(width.max(height));
    let edge = |edge: u32| {
        let scaled = (u64::from(edge) * u64::from(size) + long / 2) / long;
        scaled.clamp(1, u64::from(size)) as u32
    };
    (edge(width), edge(height))
}

/// An opaque `size x size` canvas of a single color.
pub fn solid(size: u32, color: Color) -> Result<RgbaImage> {
    if size == 0 {
        return Err(ScaleError::InvalidDimension(size));
    }
    Ok(RgbaImage::from_pixel(size, size, color.into()))
}

/// Renders `source` into a circle inscribed in a `size x size` canvas.
///
/// The shorter source edge covers 90% of the canvas. Everything outside the
/// circle is fully transparent, pixels inside keep their own alpha.
pub fn circle(source: &RgbaImage, size: u32) -> Result<RgbaImage> {
    if size == 0 {
        return Err(ScaleError::InvalidDimension(size));
    }
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(ScaleError::InvalidImage("image has no pixels".into()));
    }
    let scale = f64::from(size) * CIRCLE_FILL / f64::from(width.min(height));
    let scaled_width = ((f64::from(width) * scale) as u32).max(1);
    let scaled_height = ((f64::from(height) * scale) as u32).max(1);
    let scaled = image::imageops::resize(source, scaled_width, scaled_height, FilterType::Lanczos3);

    let mut canvas = RgbaImage::new(size, size);
    let x = (i64::from(size) - i64::from(scaled_width)).div_euclid(2);
    let y = (i64::from(size) - i64::from(scaled_height)).div_euclid(2);
    image::imageops::overlay(&mut canvas, &scaled, x, y);

    let radius = f64::from(size) / 2.0;
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - radius;
        let dy = f64::from(y) + 0.5 - radius;
        if dx * dx + dy * dy > radius * radius {
            pixel.0 = [0, 0, 0, 0];
        }
    }
    Ok(canvas)
}

/// Encodes `image` as a maximally compressed PNG. Opaque images drop the
/// alpha channel.
pub fn encode_png<W: Write>(image: &RgbaImage, w: W, opaque: bool) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilter::Adaptive);
    let (width, height) = image.dimensions();
    if opaque {
        let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
        encoder.write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)?;
    } else {
        encoder.write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)?;
    }
    Ok(())
}

pub fn write_png<P: AsRef<Path>>(image: &RgbaImage, path: P, opaque: bool) -> Result<()> {
    let path = path.as_ref();
    let mut w = BufWriter::new(create(path)?);
    encode_png(image, &mut w, opaque)?;
    w.flush()?;
    tracing::info!(path = %path.display(), size = image.width(), "wrote png");
    Ok(())
}

/// Writes a single frame ICO. Frames are limited to 256x256 by the format.
pub fn write_ico<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let (width, height) = image.dimensions();
    let mut w = BufWriter::new(create(path)?);
    IcoEncoder::new(&mut w).write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)?;
    w.flush()?;
    tracing::info!(path = %path.display(), size = width, "wrote ico");
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn checkerboard(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn output_is_always_square() {
        let sources = [(1024, 1024), (640, 480), (30, 200), (1, 1), (7, 3)];
        for (width, height) in sources {
            let source = RgbaImage::from_pixel(width, height, RED);
            for size in [1, 20, 48, 167, 432] {
                let out = resize_with_padding(&source, size, Background::Transparent).unwrap();
                assert_eq!(out.dimensions(), (size, size));
            }
        }
    }

    #[test]
    fn zero_size_is_rejected() {
        let source = RgbaImage::from_pixel(8, 8, RED);
        let err = resize_with_padding(&source, 0, Background::Transparent).unwrap_err();
        assert!(matches!(err, ScaleError::InvalidDimension(0)));
        assert!(matches!(solid(0, Color::NAVY), Err(ScaleError::InvalidDimension(0))));
        assert!(matches!(circle(&source, 0), Err(ScaleError::InvalidDimension(0))));
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        assert_eq!(fit(1024, 1024, 48), (48, 48));
        assert_eq!(fit(1024, 512, 48), (48, 24));
        assert_eq!(fit(480, 640, 100), (75, 100));
        assert_eq!(fit(10, 2000, 48), (1, 48));
        assert_eq!(fit(16, 16, 432), (432, 432));
        for (width, height, size) in [(1000, 333, 167), (333, 1000, 87), (1920, 1080, 29)] {
            let (w, h) = fit(width, height, size);
            assert_eq!(w.max(h), size);
            let (short, exact) = if width >= height {
                (h, f64::from(height) * f64::from(size) / f64::from(width))
            } else {
                (w, f64::from(width) * f64::from(size) / f64::from(height))
            };
            assert!((f64::from(short) - exact).abs() <= 1.0, "{width}x{height} -> {w}x{h}");
        }
    }

    #[test]
    fn border_is_uniform_background() {
        let source = RgbaImage::from_pixel(200, 100, RED);
        let out = resize_with_padding(&source, 48, Color::NAVY.into()).unwrap();
        // 200x100 -> 48x24, 12 rows of border above and below
        for (_, y, pixel) in out.enumerate_pixels() {
            if y < 12 || y >= 36 {
                assert_eq!(*pixel, Rgba::from(Color::NAVY));
            } else {
                assert_eq!(*pixel, RED);
            }
        }
    }

    #[test]
    fn odd_border_goes_to_the_far_side() {
        let source = RgbaImage::from_pixel(10, 5, RED);
        let out = resize_with_padding(&source, 10, Background::Transparent).unwrap();
        // 10x5 keeps its size, (10 - 5) / 2 = 2 rows above, 3 below
        assert_eq!(out.get_pixel(0, 1)[3], 0);
        assert_eq!(*out.get_pixel(0, 2), RED);
        assert_eq!(*out.get_pixel(0, 6), RED);
        assert_eq!(out.get_pixel(0, 7)[3], 0);
    }

    #[test]
    fn transparent_background_keeps_corners_clear() {
        let source = RgbaImage::from_pixel(1024, 768, RED);
        let out = resize_with_padding(&source, 432, Background::Transparent).unwrap();
        for (x, y) in [(0, 0), (431, 0), (0, 431), (431, 431)] {
            assert_eq!(out.get_pixel(x, y)[3], 0);
        }
        assert_eq!(*out.get_pixel(216, 216), RED);
    }

    #[test]
    fn transparent_source_pixels_show_background() {
        let mut source = RgbaImage::from_pixel(16, 16, RED);
        source.put_pixel(0, 0, Rgba([0, 255, 0, 0]));
        let out = resize_with_padding(&source, 16, Color::NAVY.into()).unwrap();
        assert_eq!(*out.get_pixel(0, 0), Rgba::from(Color::NAVY));
        assert_eq!(*out.get_pixel(1, 1), RED);
    }

    #[test]
    fn same_size_source_is_unchanged() {
        let source = checkerboard(64, 64);
        let padded = resize_with_padding(&source, 64, Color::NAVY.into()).unwrap();
        assert_eq!(padded, source);
        let clear = resize_with_padding(&source, 64, Background::Transparent).unwrap();
        assert_eq!(clear, source);
    }

    #[test]
    fn resize_is_deterministic() {
        let source = checkerboard(300, 170);
        let a = resize_with_padding(&source, 87, Color::NAVY.into()).unwrap();
        let b = resize_with_padding(&source, 87, Color::NAVY.into()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dominant_corner() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        img.put_pixel(0, 0, Rgba([9, 9, 9, 255]));
        let scaler = Scaler::from_image(DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(scaler.dominant_corner_color(), Some(Color::rgb(1, 2, 3)));

        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        img.put_pixel(3, 0, Rgba([7, 7, 7, 255]));
        img.put_pixel(0, 3, Rgba([8, 8, 8, 128]));
        let scaler = Scaler::from_image(DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(scaler.dominant_corner_color(), Some(Color::rgb(7, 7, 7)));

        let img = RgbaImage::new(4, 4);
        let scaler = Scaler::from_image(DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(scaler.dominant_corner_color(), None);
    }

    #[test]
    fn circle_masks_corners() {
        let source = RgbaImage::from_pixel(100, 100, RED);
        let logo = circle(&source, 512).unwrap();
        assert_eq!(logo.dimensions(), (512, 512));
        for (x, y) in [(0, 0), (511, 0), (0, 511), (511, 511)] {
            assert_eq!(logo.get_pixel(x, y)[3], 0);
        }
        assert_eq!(*logo.get_pixel(256, 256), RED);
        // 10% margin around the artwork stays transparent inside the circle
        assert_eq!(logo.get_pixel(256, 5)[3], 0);
    }

    #[test]
    fn empty_image_is_invalid() {
        let err = Scaler::from_image(DynamicImage::ImageRgba8(RgbaImage::new(0, 0)));
        assert!(matches!(err, Err(ScaleError::InvalidImage(_))));
    }

    #[test]
    fn open_reports_missing_and_garbage_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        assert!(matches!(Scaler::open(&missing), Err(ScaleError::Io(_))));

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"definitely not a png").unwrap();
        assert!(matches!(Scaler::open(&garbage), Err(ScaleError::InvalidImage(_))));
    }

    #[test]
    fn write_png_and_ico() {
        let dir = tempfile::tempdir().unwrap();
        let source = RgbaImage::from_pixel(1024, 1024, RED);
        let scaler = Scaler::from_image(DynamicImage::ImageRgba8(source)).unwrap();

        let opaque = dir.path().join("mipmap-mdpi").join("ic_launcher.png");
        scaler
            .write(&opaque, ScalerOpts::new(48).background(Color::NAVY))
            .unwrap();
        let decoded = image::open(&opaque).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (48, 48));
        assert!(!decoded.color().has_alpha());

        let clear = dir.path().join("foreground.png");
        scaler.write(&clear, ScalerOpts::new(432)).unwrap();
        let decoded = image::open(&clear).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (432, 432));
        assert!(decoded.color().has_alpha());

        let ico = dir.path().join("favicon.ico");
        write_ico(&scaler.resize(48, Background::Transparent).unwrap(), &ico).unwrap();
        let decoded = image::open(&ico).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (48, 48));
    }
}
