mod common;

use common::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use wallpaper_squeeze::{
    CompressionPipeline, FailureKind, RemoteError, TinifyClient, TinifyOptions,
};

type RemoteResult = Result<Vec<u8>, RemoteError>;

fn is_jpeg(payload: &[u8]) -> bool {
    payload.starts_with(&[0xFF, 0xD8])
}

#[test]
fn test_outputs_mirror_input_tree() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    let images = create_image_tree(input.path());

    let optimizer = |payload: &[u8]| -> RemoteResult { Ok(payload.to_vec()) };
    let report = CompressionPipeline::new(&optimizer)
        .with_jobs(2)
        .compress(input.path(), output.path())
        .unwrap();

    assert_eq!(report.processed, 3);
    assert_eq!(report.failed(), 0);

    let mut expected: Vec<String> = images.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(list_files(output.path()), expected);
}

#[test]
fn test_written_bytes_come_from_optimizer() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    write_file(input.path(), "wallpaper.png", &png_bytes(32, 32));

    let optimizer = |_: &[u8]| -> RemoteResult { Ok(b"tiny".to_vec()) };
    let report = CompressionPipeline::new(&optimizer)
        .compress(input.path(), output.path())
        .unwrap();

    assert_eq!(fs::read(output.path().join("wallpaper.png")).unwrap(), b"tiny");
    assert_eq!(report.bytes_after, 4);
    assert!(report.bytes_before > 4);
}

#[test]
fn test_optimizer_receives_reencoded_payload() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    write_file(input.path(), "photo.jpg", &jpeg_bytes(24, 16));

    let seen_jpeg = AtomicUsize::new(0);
    let optimizer = |payload: &[u8]| -> RemoteResult {
        if is_jpeg(payload) {
            seen_jpeg.fetch_add(1, Ordering::SeqCst);
        }
        Ok(payload.to_vec())
    };

    CompressionPipeline::new(&optimizer)
        .compress(input.path(), output.path())
        .unwrap();

    assert_eq!(seen_jpeg.load(Ordering::SeqCst), 1);
    let written = fs::read(output.path().join("photo.jpg")).unwrap();
    let decoded = image::load_from_memory(&written).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (24, 16));
}

#[test]
fn test_failures_are_isolated_and_counted_by_kind() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    create_image_tree(input.path());

    let optimizer = |payload: &[u8]| -> RemoteResult {
        if is_jpeg(payload) {
            Err(RemoteError::Server("temporarily unavailable".to_string()))
        } else {
            Ok(payload.to_vec())
        }
    };

    let report = CompressionPipeline::new(&optimizer)
        .with_jobs(1)
        .compress(input.path(), output.path())
        .unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.failed(), 2);
    assert_eq!(report.failures_of(FailureKind::Server), 2);
    assert_eq!(list_files(output.path()), vec!["a.png"]);
}

#[test]
fn test_each_remote_error_maps_to_its_kind() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    for name in ["1.png", "2.png", "3.png", "4.png", "5.png"] {
        write_file(input.path(), name, &png_bytes(4, 4));
    }

    let calls = AtomicUsize::new(0);
    let optimizer = |_: &[u8]| -> RemoteResult {
        let error = match calls.fetch_add(1, Ordering::SeqCst) % 5 {
            0 => RemoteError::Account("bad key".into()),
            1 => RemoteError::Client("bad input".into()),
            2 => RemoteError::Server("down".into()),
            3 => RemoteError::Connection("refused".into()),
            _ => RemoteError::UnexpectedResponse("garbled".into()),
        };
        Err(error)
    };

    let report = CompressionPipeline::new(&optimizer)
        .with_jobs(3)
        .compress(input.path(), output.path())
        .unwrap();

    assert_eq!(report.processed, 0);
    for kind in FailureKind::ALL {
        assert_eq!(report.failures_of(kind), 1, "{}", kind);
    }
    assert!(list_files(output.path()).is_empty());
}

#[test]
fn test_unreachable_service_is_connection_failure() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    write_file(input.path(), "x.png", &png_bytes(4, 4));

    let options = TinifyOptions::new(
        Some("test-key".to_string()),
        Some("http://127.0.0.1:9".to_string()),
        Some(5),
    )
    .unwrap();
    let client = TinifyClient::new(options).unwrap();

    let report = CompressionPipeline::new(&client)
        .compress(input.path(), output.path())
        .unwrap();

    assert_eq!(report.failures_of(FailureKind::Connection), 1);
    assert!(!output.path().join("x.png").exists());
}

#[test]
fn test_non_image_files_are_ignored() {
    let input = create_temp_directory();
    let output = create_temp_directory();
    write_file(input.path(), "notes.txt", b"hello");
    write_file(input.path(), "clip.gif", b"GIF89a");

    let optimizer = |payload: &[u8]| -> RemoteResult { Ok(payload.to_vec()) };
    let report = CompressionPipeline::new(&optimizer)
        .compress(input.path(), output.path())
        .unwrap();

    assert_eq!(report.processed, 0);
    assert_eq!(report.failed(), 0);
    assert!(list_files(output.path()).is_empty());
}
