//! Writing generated assets to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::models::CreativeAssets;

/// Write every generated asset present in `assets` into `dir`.
///
/// Files are named `lifestyle.<ext>`, `hero-video.<ext>`, `script.txt` and
/// `broll-ideas.txt`; slots that are empty are skipped. Each file is written
/// to a temporary name first and renamed, so an interrupted export never
/// leaves a truncated asset behind. Returns the paths written.
pub fn export_assets<P: AsRef<Path>>(assets: &CreativeAssets, dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    if let Some(image) = &assets.lifestyle_image {
        let path = dir.join(format!("lifestyle.{}", image.extension()));
        write_atomic(&path, &image.decode()?)?;
        written.push(path);
    }
    if let Some(video) = &assets.hero_video {
        let path = dir.join(format!("hero-video.{}", video.extension()));
        write_atomic(&path, &video.bytes)?;
        written.push(path);
    }
    if let Some(script) = &assets.tiktok_script {
        let path = dir.join("script.txt");
        write_atomic(&path, script.as_bytes())?;
        written.push(path);
    }
    if let Some(ideas) = &assets.broll_ideas {
        let body = ideas
            .iter()
            .enumerate()
            .map(|(i, idea)| format!("{}. {}\n", i + 1, idea))
            .collect::<String>();
        let path = dir.join("broll-ideas.txt");
        write_atomic(&path, body.as_bytes())?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "assets exported");
    Ok(written)
}

fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = dest.with_extension(format!(
        "{}.tmp",
        dest.extension().and_then(|e| e.to_str()).unwrap_or("")
    ));
    let result = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, dest));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    Ok(result?)
}
