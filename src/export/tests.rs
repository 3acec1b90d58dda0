use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use image::{Rgba, RgbaImage};

use super::{
    dependencies::{ExportClipboard, ExportDependencies, SaveDialog, ScreenSource},
    exporter::Exporter,
    file::ExportSettings,
    types::{ExportError, ExportKind, ExportOutcome, ScreenRegion},
};

#[derive(Clone)]
struct MockSource {
    image: RgbaImage,
    error: Arc<Mutex<Option<ExportError>>>,
    regions: Arc<Mutex<Vec<ScreenRegion>>>,
}

impl ScreenSource for MockSource {
    fn capture(&self, region: ScreenRegion) -> Result<RgbaImage, ExportError> {
        self.regions.lock().unwrap().push(region);
        if let Some(err) = self.error.lock().unwrap().take() {
            Err(err)
        } else {
            Ok(self.image.clone())
        }
    }
}

#[derive(Clone)]
struct MockDialog {
    answer: Option<PathBuf>,
    calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl SaveDialog for MockDialog {
    fn pick_path(&self, directory: &Path, default_name: &str) -> Option<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .push((directory.to_path_buf(), default_name.to_string()));
        self.answer.clone()
    }
}

#[derive(Clone)]
struct MockClipboard {
    unavailable: bool,
    copied: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl ExportClipboard for MockClipboard {
    fn copy(&self, png: &[u8]) -> Result<(), ExportError> {
        if self.unavailable {
            return Err(ExportError::ClipboardUnavailable(
                "no clipboard".to_string(),
            ));
        }
        self.copied.lock().unwrap().push(png.to_vec());
        Ok(())
    }
}

struct Harness {
    exporter: Exporter,
    source: MockSource,
    dialog: MockDialog,
    clipboard: MockClipboard,
    dir: tempfile::TempDir,
}

fn test_image() -> RgbaImage {
    let mut image = RgbaImage::from_pixel(40, 30, Rgba([255, 255, 255, 255]));
    for x in 5..35 {
        image.put_pixel(x, 15, Rgba([255, 0, 0, 255]));
    }
    // Translucent corner pixel; flattened exports must blend it onto white.
    image.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    image
}

fn region() -> ScreenRegion {
    ScreenRegion {
        x: 0,
        y: 24,
        width: 40,
        height: 30,
    }
}

fn harness(dialog_answer: Option<&str>, clipboard_unavailable: bool) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let export_dir = dir.path().join("drawings");
    let settings = ExportSettings {
        directory: export_dir.clone(),
        filename_template: "drawing_%Y%m%d_%H%M%S".to_string(),
        pdf_dpi: 100.0,
    };

    let source = MockSource {
        image: test_image(),
        error: Arc::new(Mutex::new(None)),
        regions: Arc::new(Mutex::new(Vec::new())),
    };
    let dialog = MockDialog {
        answer: dialog_answer.map(|name| export_dir.join(name)),
        calls: Arc::new(Mutex::new(Vec::new())),
    };
    let clipboard = MockClipboard {
        unavailable: clipboard_unavailable,
        copied: Arc::new(Mutex::new(Vec::new())),
    };

    let dependencies = ExportDependencies {
        source: Arc::new(source.clone()),
        dialog: Arc::new(dialog.clone()),
        clipboard: Arc::new(clipboard.clone()),
    };

    Harness {
        exporter: Exporter::with_dependencies(settings, dependencies),
        source,
        dialog,
        clipboard,
        dir,
    }
}

fn saved_path(outcome: ExportOutcome, expected_kind: ExportKind) -> PathBuf {
    match outcome {
        ExportOutcome::Saved { kind, path } => {
            assert_eq!(kind, expected_kind);
            path
        }
        other => panic!("expected Saved, got {:?}", other),
    }
}

#[test]
fn quick_export_writes_timestamped_png() {
    let h = harness(None, false);
    let path = saved_path(h.exporter.quick_export(region()).unwrap(), ExportKind::Quick);

    assert!(path.starts_with(h.dir.path().join("drawings")));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("drawing_"));
    assert!(name.ends_with(".png"));

    let written = image::open(&path).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (40, 30));
    assert_eq!(written.get_pixel(20, 15).0, [255, 0, 0, 255]);
    assert_eq!(h.source.regions.lock().unwrap().as_slice(), &[region()]);
}

#[test]
fn quick_export_twice_in_one_second_overwrites() {
    let h = harness(None, false);
    let first = saved_path(h.exporter.quick_export(region()).unwrap(), ExportKind::Quick);
    let second = saved_path(h.exporter.quick_export(region()).unwrap(), ExportKind::Quick);
    if first == second {
        let entries = std::fs::read_dir(h.dir.path().join("drawings")).unwrap().count();
        assert_eq!(entries, 1);
    }
}

#[test]
fn interactive_export_cancelled_writes_nothing() {
    let h = harness(None, false);
    let outcome = h.exporter.export_interactive(region()).unwrap();
    assert_eq!(outcome, ExportOutcome::Cancelled);

    let calls = h.dialog.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, h.dir.path().join("drawings"));
    assert!(calls[0].1.starts_with("drawing_"));
    assert!(calls[0].1.ends_with(".png"));

    let entries = std::fs::read_dir(h.dir.path().join("drawings")).unwrap().count();
    assert_eq!(entries, 0);
}

#[test]
fn interactive_export_uses_extension_for_format() {
    let h = harness(Some("sketch.jpg"), false);
    let path = saved_path(
        h.exporter.export_interactive(region()).unwrap(),
        ExportKind::Interactive,
    );
    assert_eq!(path.file_name().unwrap(), "sketch.jpg");
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn interactive_export_without_extension_appends_png() {
    let h = harness(Some("sketch"), false);
    let path = saved_path(
        h.exporter.export_interactive(region()).unwrap(),
        ExportKind::Interactive,
    );
    assert_eq!(path.file_name().unwrap(), "sketch.png");
    assert_eq!(&std::fs::read(&path).unwrap()[..4], b"\x89PNG");
}

#[test]
fn interactive_export_rejects_unknown_extension() {
    let h = harness(Some("sketch.tiff"), false);
    let err = h.exporter.export_interactive(region()).unwrap_err();
    assert!(matches!(err, ExportError::UnsupportedFormat(ext) if ext == "tiff"));
}

#[test]
fn unwritable_target_reports_file_write_error() {
    let h = harness(Some("missing_dir/sketch.png"), false);
    let err = h.exporter.export_interactive(region()).unwrap_err();
    match err {
        ExportError::FileWrite { path, .. } => {
            assert!(path.ends_with("missing_dir/sketch.png"));
        }
        other => panic!("expected FileWrite, got {:?}", other),
    }
}

#[test]
fn pdf_export_writes_pdf_document() {
    let h = harness(None, false);
    let path = saved_path(h.exporter.export_pdf(region()).unwrap(), ExportKind::Pdf);
    assert_eq!(path.extension().unwrap(), "pdf");
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn clipboard_export_offers_flattened_png() {
    let h = harness(None, false);
    assert_eq!(
        h.exporter.export_to_clipboard(region()).unwrap(),
        ExportOutcome::Copied
    );

    let copied = h.clipboard.copied.lock().unwrap();
    assert_eq!(copied.len(), 1);
    let decoded = image::load_from_memory(&copied[0]).unwrap();
    assert!(matches!(decoded, image::DynamicImage::ImageRgb8(_)));
    let rgb = decoded.to_rgb8();
    assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(rgb.get_pixel(20, 15).0, [255, 0, 0]);
}

#[test]
fn clipboard_unavailable_is_reported() {
    let h = harness(None, true);
    let err = h.exporter.export_to_clipboard(region()).unwrap_err();
    assert!(matches!(err, ExportError::ClipboardUnavailable(_)));
}

#[test]
fn capture_failure_skips_dialog() {
    let h = harness(Some("sketch.png"), false);
    *h.source.error.lock().unwrap() = Some(ExportError::Capture("grim missing".to_string()));

    let err = h
        .exporter
        .export(ExportKind::Interactive, region())
        .unwrap_err();
    assert!(matches!(err, ExportError::Capture(_)));
    assert!(h.dialog.calls.lock().unwrap().is_empty());
}

#[test]
fn export_dispatches_by_kind() {
    let h = harness(None, false);
    let outcome = h.exporter.export(ExportKind::Clipboard, region()).unwrap();
    assert_eq!(outcome, ExportOutcome::Copied);
    let outcome = h.exporter.export(ExportKind::Pdf, region()).unwrap();
    assert!(matches!(
        outcome,
        ExportOutcome::Saved {
            kind: ExportKind::Pdf,
            ..
        }
    ));
}
