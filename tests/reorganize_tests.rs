mod common;

use common::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wallpaper_squeeze::{AssetClassifier, ClassifierConfig, DestinationLayout};

struct Fixture {
    _temp: TempDir,
    source: std::path::PathBuf,
    wallpapers: std::path::PathBuf,
    thumbnails: std::path::PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = create_temp_directory();
        let source = temp.path().join("output");
        let wallpapers = temp.path().join("static/wallpapers");
        let thumbnails = temp.path().join("static/thumbnails");
        fs::create_dir_all(&source).unwrap();
        Self {
            _temp: temp,
            source,
            wallpapers,
            thumbnails,
        }
    }

    fn add(&self, relative: &str, contents: &[u8]) {
        write_file(&self.source, relative, contents);
    }

    fn classifier(&self) -> AssetClassifier {
        self.classifier_with(ClassifierConfig::default())
    }

    fn classifier_with(&self, config: ClassifierConfig) -> AssetClassifier {
        AssetClassifier::new(
            config,
            DestinationLayout::new(&self.wallpapers, &self.thumbnails),
        )
        .unwrap()
    }
}

fn read(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap()
}

#[test]
fn test_wallpapers_are_renamed_by_device() {
    let fixture = Fixture::new();
    fixture.add("January/Laptop_dark.jpg", b"laptop");
    fixture.add("January/Week 2/iPad_home.png", b"ipad");
    fixture.add("January/Phone.PNG", b"phone");

    let report = fixture.classifier().reorganize(&fixture.source);

    assert_eq!(report.moved, 3);
    assert_eq!(
        list_files(&fixture.wallpapers),
        vec!["January/laptop.jpg", "January/phone.png", "January/tablet.png"]
    );
    assert_eq!(read(&fixture.wallpapers.join("January/tablet.png")), b"ipad");
    assert!(list_files(&fixture.source.join("January")).is_empty());
}

#[test]
fn test_unrecognized_and_unmatched_files_stay_put() {
    let fixture = Fixture::new();
    fixture.add("March/Desktop_wide.jpg", b"desktop");
    fixture.add("March/sunset.jpg", b"sunset");
    fixture.add("March/Laptops.png", b"plural");
    fixture.add("March/Laptop.gif", b"gif");

    let report = fixture.classifier().reorganize(&fixture.source);

    assert_eq!(report.moved, 0);
    assert_eq!(report.unrecognized_device, 1);
    assert_eq!(report.no_device_match, 2);
    assert_eq!(report.disallowed_extension, 1);
    assert_eq!(
        list_files(&fixture.source.join("March")),
        vec!["Desktop_wide.jpg", "Laptop.gif", "Laptops.png", "sunset.jpg"]
    );
    assert!(!fixture.wallpapers.exists());
}

#[test]
fn test_excluded_directories_are_not_wallpapers() {
    let fixture = Fixture::new();
    fixture.add("April/Bulletins/Laptop.jpg", b"bulletin");
    fixture.add("April/TV Graphics/Phone.png", b"tv");
    fixture.add("April/Bulletin Covers/Watch.png", b"cover");

    let report = fixture.classifier().reorganize(&fixture.source);

    assert_eq!(report.moved, 0);
    assert!(fixture.source.join("April/Bulletins/Laptop.jpg").exists());
    assert!(fixture.source.join("April/TV Graphics/Phone.png").exists());
    assert!(fixture.source.join("April/Bulletin Covers/Watch.png").exists());
}

#[test]
fn test_thumbnails_go_to_thumbnail_tree() {
    let fixture = Fixture::new();
    fixture.add("May/Laptop.jpg", b"wallpaper");
    fixture.add("May/Thumbnails/Laptop_small.jpg", b"thumb");
    fixture.add("May/Bulletins/Thumbnails/Watch.png", b"watch thumb");
    fixture.add("May/Thumbnails/extra/Phone.png", b"too deep");

    let report = fixture.classifier().reorganize(&fixture.source);

    assert_eq!(report.moved, 3);
    assert_eq!(read(&fixture.wallpapers.join("May/laptop.jpg")), b"wallpaper");
    assert_eq!(read(&fixture.thumbnails.join("May/laptop.jpg")), b"thumb");
    assert_eq!(read(&fixture.thumbnails.join("May/watch.png")), b"watch thumb");
    assert!(fixture.source.join("May/Thumbnails/extra/Phone.png").exists());
}

#[test]
fn test_collision_keeps_last_file_visited() {
    let fixture = Fixture::new();
    fixture.add("June/Laptop_a.png", b"first");
    fixture.add("June/Laptop_b.png", b"second");

    let report = fixture.classifier().reorganize(&fixture.source);

    assert_eq!(report.moved, 2);
    assert_eq!(report.overwritten, 1);
    assert_eq!(list_files(&fixture.wallpapers), vec!["June/laptop.png"]);
    assert_eq!(read(&fixture.wallpapers.join("June/laptop.png")), b"second");
}

#[test]
fn test_second_run_moves_nothing() {
    let fixture = Fixture::new();
    fixture.add("July/Laptop.jpg", b"laptop");
    fixture.add("July/Thumbnails/Phone.png", b"phone");
    fixture.add("July/sunset.jpg", b"sunset");

    let classifier = fixture.classifier();
    let first = classifier.reorganize(&fixture.source);
    let second = classifier.reorganize(&fixture.source);

    assert_eq!(first.moved, 2);
    assert_eq!(second.moved, 0);
    assert_eq!(second.overwritten, 0);
    assert_eq!(list_files(&fixture.wallpapers), vec!["July/laptop.jpg"]);
    assert_eq!(list_files(&fixture.thumbnails), vec!["July/phone.png"]);
}

#[test]
fn test_only_month_directories_are_visited() {
    let fixture = Fixture::new();
    fixture.add("Misc/Laptop.jpg", b"misc");
    fixture.add("january/Phone.png", b"lowercase month");
    fixture.add("December/Watch.png", b"watch");

    let report = fixture.classifier().reorganize(&fixture.source);

    assert_eq!(report.moved, 1);
    assert_eq!(list_files(&fixture.wallpapers), vec!["December/watch.png"]);
    assert!(fixture.source.join("Misc/Laptop.jpg").exists());
}

#[test]
fn test_missing_source_reports_every_month() {
    let fixture = Fixture::new();
    let report = fixture.classifier().reorganize(&fixture.source.join("absent"));

    assert_eq!(report.missing_months.len(), 12);
    assert_eq!(report.moved, 0);
}

#[test]
fn test_custom_config_recognizes_more_devices() {
    let fixture = Fixture::new();
    fixture.add("August/Desktop_wide.jpg", b"desktop");
    fixture.add("August/Monitor.png", b"monitor");

    let config = ClassifierConfig::from_toml_str(
        r#"
        devices = ["Laptop", "Desktop", "Monitor"]
        recognized_devices = ["laptop", "desktop"]
        aliases = { Monitor = "desktop" }
        "#,
    )
    .unwrap();

    let report = fixture.classifier_with(config).reorganize(&fixture.source);

    assert_eq!(report.moved, 2);
    assert_eq!(report.unrecognized_device, 0);
    assert_eq!(
        list_files(&fixture.wallpapers),
        vec!["August/desktop.jpg", "August/desktop.png"]
    );
}

#[test]
fn test_failed_move_is_counted_and_others_continue() {
    let fixture = Fixture::new();
    fixture.add("September/Laptop.jpg", b"wallpaper");
    fixture.add("September/Thumbnails/Phone.png", b"thumb");
    write_file(&fixture.wallpapers, "September", b"not a directory");

    let report = fixture.classifier().reorganize(&fixture.source);

    assert_eq!(report.failed, 1);
    assert_eq!(report.moved, 1);
    assert_eq!(read(&fixture.source.join("September/Laptop.jpg")), b"wallpaper");
    assert_eq!(read(&fixture.thumbnails.join("September/phone.png")), b"thumb");
    assert!(!fixture.source.join("September/Thumbnails/Phone.png").exists());
}
