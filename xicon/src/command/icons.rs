use crate::{IconEnv, TaskRunner};
use anyhow::Result;
use appiconset::AppIconSet;
use mipmap::AndroidRes;

/// A single stage of icon generation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    CleanAndroid,
    CleanIos,
    LauncherIcons,
    AdaptiveLayers,
    AdaptiveForegrounds,
    AppIcons,
    AdaptiveXml,
    Colors,
    Contents,
}

impl Step {
    pub const ANDROID: [Self; 6] = [
        Self::CleanAndroid,
        Self::LauncherIcons,
        Self::AdaptiveLayers,
        Self::AdaptiveForegrounds,
        Self::AdaptiveXml,
        Self::Colors,
    ];

    pub const IOS: [Self; 3] = [Self::CleanIos, Self::AppIcons, Self::Contents];

    pub const ALL: [Self; 9] = [
        Self::CleanAndroid,
        Self::CleanIos,
        Self::LauncherIcons,
        Self::AdaptiveLayers,
        Self::AdaptiveForegrounds,
        Self::AppIcons,
        Self::AdaptiveXml,
        Self::Colors,
        Self::Contents,
    ];

    pub fn is_clean(self) -> bool {
        matches!(self, Self::CleanAndroid | Self::CleanIos)
    }

    pub fn descr(self) -> &'static str {
        match self {
            Self::CleanAndroid => "Removing existing Android mipmaps",
            Self::CleanIos => "Removing existing iOS app icons",
            Self::LauncherIcons => "Generating Android launcher icons",
            Self::AdaptiveLayers => "Generating adaptive icon layers",
            Self::AdaptiveForegrounds => "Generating adaptive icon foregrounds",
            Self::AppIcons => "Generating iOS app icons",
            Self::AdaptiveXml => "Writing adaptive icon descriptors",
            Self::Colors => "Writing colors.xml",
            Self::Contents => "Writing Contents.json",
        }
    }

    pub fn run(self, env: &IconEnv) -> Result<()> {
        let res = AndroidRes::new(env.android_res_dir());
        let set = AppIconSet::new(env.appiconset_dir());
        match self {
            Self::CleanAndroid => {
                for dir in res.clean()? {
                    tracing::info!(dir = %dir.display(), "removed");
                }
            }
            Self::CleanIos => {
                for icon in set.clean()? {
                    tracing::info!(icon = %icon.display(), "removed");
                }
            }
            Self::LauncherIcons => {
                res.write_launcher_icons(env.scaler(), env.background())?;
            }
            Self::AdaptiveLayers => {
                let dir = env.generated_dir();
                mipmap::write_adaptive_layers(env.scaler(), &dir, env.background())?;
            }
            Self::AdaptiveForegrounds => {
                res.write_foregrounds(env.scaler())?;
            }
            Self::AppIcons => {
                set.write_icons(env.scaler(), env.background())?;
            }
            Self::AdaptiveXml => {
                res.write_adaptive_xml()?;
            }
            Self::Colors => {
                res.write_colors(env.background())?;
            }
            Self::Contents => {
                set.write_contents()?;
            }
        }
        Ok(())
    }
}

fn run_steps(env: &IconEnv, steps: &[Step], keep: bool) -> Result<()> {
    let steps: Vec<Step> = steps
        .iter()
        .copied()
        .filter(|step| !(keep && step.is_clean()))
        .collect();
    let mut runner = TaskRunner::new(steps.len() as u32, env.verbose());
    for step in steps {
        runner.start_task(step.descr());
        step.run(env)?;
        runner.end_task();
    }
    Ok(())
}

/// Regenerates every Android and iOS icon asset from the source icon.
pub fn icons(env: &IconEnv, keep: bool) -> Result<()> {
    super::preview(env);
    run_steps(env, &Step::ALL, keep)?;
    println!("\nAll icons generated and installed.");
    println!("\nNext steps:");
    println!("  flutter clean");
    println!("  rm -rf ios/Pods ios/Podfile.lock ios/Runner.xcworkspace");
    println!("  flutter pub get");
    println!("  cd ios && pod install && cd ..");
    println!("  flutter build apk --release");
    Ok(())
}

pub fn android(env: &IconEnv, keep: bool) -> Result<()> {
    run_steps(env, &Step::ANDROID, keep)
}

pub fn ios(env: &IconEnv, keep: bool) -> Result<()> {
    run_steps(env, &Step::IOS, keep)
}
