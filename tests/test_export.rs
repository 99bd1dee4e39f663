//! Asset export tests.

mod common;

use std::fs;

use common::FakeProvider;

use campaign_studio::export::export_assets;
use campaign_studio::models::{CreativeAssets, VideoAsset};

#[test]
fn empty_assets_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let written = export_assets(&CreativeAssets::default(), dir.path()).unwrap();
    assert!(written.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn every_present_slot_becomes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let assets = CreativeAssets {
        original_image: Some(common::product_image()),
        lifestyle_image: Some(common::rendered_image()),
        tiktok_script: Some(common::SCRIPT.to_string()),
        broll_ideas: Some(vec!["Steam".into(), "Pour".into()]),
        hero_video: Some(VideoAsset::new("video/mp4", b"mp4".to_vec())),
    };

    let written = export_assets(&assets, dir.path()).unwrap();

    assert_eq!(written.len(), 4);
    assert_eq!(fs::read(dir.path().join("lifestyle.png")).unwrap(), b"rendered");
    assert_eq!(fs::read(dir.path().join("hero-video.mp4")).unwrap(), b"mp4");
    assert_eq!(
        fs::read_to_string(dir.path().join("script.txt")).unwrap(),
        common::SCRIPT
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("broll-ideas.txt")).unwrap(),
        "1. Steam\n2. Pour\n"
    );
    // No temporary files are left behind.
    let leftovers = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn export_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("campaigns").join("mug");
    let assets = CreativeAssets {
        tiktok_script: Some("hi".into()),
        ..Default::default()
    };

    let written = export_assets(&assets, &target).unwrap();
    assert_eq!(written, vec![target.join("script.txt")]);
}

#[test]
fn studio_exports_generated_assets() {
    let provider = FakeProvider::new();
    let studio = common::analyzed_studio(&provider);
    studio.write_script().unwrap();
    studio.ideate_broll().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let written = studio.export_assets(dir.path()).unwrap();

    assert_eq!(written.len(), 2);
    let ideas = fs::read_to_string(dir.path().join("broll-ideas.txt")).unwrap();
    assert_eq!(ideas.lines().count(), 3);
}

#[test]
fn video_extension_follows_mime_type() {
    let dir = tempfile::tempdir().unwrap();
    let assets = CreativeAssets {
        hero_video: Some(VideoAsset::new("video/quicktime", b"mov".to_vec())),
        ..Default::default()
    };

    let written = export_assets(&assets, dir.path()).unwrap();

    assert_eq!(written, vec![dir.path().join("hero-video.mov")]);
    assert_eq!(VideoAsset::new("video/webm", Vec::new()).extension(), "webm");
    assert_eq!(VideoAsset::new("application/octet-stream", Vec::new()).extension(), "mp4");
}
