use crate::IconEnv;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Writes the circular logo to `out` at `size`, defaulting to the configured
/// path and size.
pub fn logo(env: &IconEnv, out: Option<&Path>, size: Option<u32>) -> Result<PathBuf> {
    let path = match out {
        Some(out) => env.root_dir().join(out),
        None => env.logo_path(),
    };
    let size = size.unwrap_or_else(|| env.logo_size());
    let (width, height) = env.scaler().dimensions();
    println!("Creating circular logo from {}", env.icon().display());
    println!("  source: {width}x{height}");
    let logo = iconscale::circle(env.scaler().image(), size)?;
    iconscale::write_png(&logo, &path, false)?;
    println!("  saved: {} ({size}x{size})", path.display());
    Ok(path)
}
