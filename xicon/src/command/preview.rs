use crate::IconEnv;
use appiconset::APP_ICONS;
use console::style;
use mipmap::{Density, BACKGROUND_LAYER_SIZE, FOREGROUND_LAYER_SIZE};

const RULE: usize = 70;

fn header(title: &str) {
    println!("\n{}", style(title).bold());
    println!("{}", "-".repeat(RULE));
}

/// Prints a table of everything `icons` generates.
pub fn preview(env: &IconEnv) {
    let (width, height) = env.scaler().dimensions();
    println!("{}", "=".repeat(RULE));
    println!("{}", style("ICON GENERATION PREVIEW").bold());
    println!("{}", "=".repeat(RULE));
    println!("\nSource icon: {}", env.icon().display());
    println!("  size: {width}x{height} pixels");
    println!(
        "  background: {} ({})",
        env.background(),
        env.background_source()
    );

    header("ANDROID ICONS");
    println!("{:<12} {:<12} {:<12} Location", "Density", "Launcher", "Foreground");
    for density in Density::ALL {
        let launcher = density.launcher_size();
        let foreground = density.foreground_size();
        println!(
            "{:<12} {:<12} {:<12} {}/",
            density.as_str(),
            format!("{launcher}x{launcher}"),
            format!("{foreground}x{foreground}"),
            density.dir_name(),
        );
    }

    header("ANDROID ADAPTIVE ICONS");
    let fg = FOREGROUND_LAYER_SIZE;
    let bg = BACKGROUND_LAYER_SIZE;
    let generated = env.config().android().generated().display();
    println!("{:<24} {:<12} Location", "Component", "Size");
    println!("{:<24} {:<12} {generated}/", "foreground.png", format!("{fg}x{fg}"));
    println!("{:<24} {:<12} {generated}/", "background.png", format!("{bg}x{bg}"));
    println!("{:<24} {:<12} mipmap-anydpi-v26/", "ic_launcher.xml", "-");
    println!("{:<24} {:<12} mipmap-anydpi-v26/", "ic_launcher_round.xml", "-");

    header("iOS ICONS");
    println!("{:<30} {:<12} Scale", "Filename", "Size");
    for icon in &APP_ICONS {
        let pixels = icon.pixels();
        println!(
            "{:<30} {:<12} {}",
            icon.filename(),
            format!("{pixels}x{pixels}"),
            icon.scale()
        );
    }
    println!("{}", "=".repeat(RULE));
}
