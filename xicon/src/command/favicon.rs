use crate::{IconEnv, TaskRunner};
use anyhow::Result;
use iconscale::{Background, ScalerOpts};
use std::path::{Path, PathBuf};

pub const FAVICON_PNG_SIZE: u32 = 256;
pub const FAVICON_ICO_SIZE: u32 = 48;

/// Writes `favicon.png` and `favicon.ico` into `out`, or the configured
/// favicon directory.
pub fn favicon(env: &IconEnv, out: Option<&Path>) -> Result<[PathBuf; 2]> {
    let dir = match out {
        Some(out) => env.root_dir().join(out),
        None => env.favicon_dir(),
    };
    let scaler = env.scaler();
    let mut runner = TaskRunner::new(2, env.verbose());

    let png = dir.join("favicon.png");
    runner.start_task(format!("Creating favicon.png ({0}x{0})", FAVICON_PNG_SIZE));
    scaler.write(&png, ScalerOpts::new(FAVICON_PNG_SIZE))?;
    runner.end_task();

    let ico = dir.join("favicon.ico");
    runner.start_task(format!("Creating favicon.ico ({0}x{0})", FAVICON_ICO_SIZE));
    let image = scaler.resize(FAVICON_ICO_SIZE, Background::Transparent)?;
    iconscale::write_ico(&image, &ico)?;
    runner.end_task();

    Ok([png, ico])
}
