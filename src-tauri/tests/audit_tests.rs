use std::io::{BufRead, BufReader, Cursor, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use chrono::NaiveDate;
use tempfile::TempDir;

use seo_audit_tauri::audit::extraction::parse_audit_data;
use seo_audit_tauri::audit::{Priority, Status};
use seo_audit_tauri::worksheet::builder::SUMMARY_BULLET;
use seo_audit_tauri::worksheet::layout::PageKind;
use seo_audit_tauri::worksheet::{build_worksheet, export_worksheet};
use seo_audit_tauri::AuditData;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample_audit() -> AuditData {
    let raw = std::fs::read_to_string(fixture_path("sample_audit.json"))
        .expect("Failed to read fixture file");
    serde_json::from_str(&raw).expect("Fixture should deserialize")
}

/// Serve one PNG response on a local port and return its URL.
fn serve_png_once(width: u32, height: u32) -> String {
    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::new_rgb8(width, height)
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();
    let png = png.into_inner();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            png.len()
        )
        .unwrap();
        stream.write_all(&png).unwrap();
        stream.flush().unwrap();
    });
    format!("http://{}/mshots/example.com", addr)
}

fn generated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

#[test]
fn test_fenced_model_output_parses_like_fixture() {
    let raw = std::fs::read_to_string(fixture_path("sample_audit.json")).unwrap();
    let model_text = format!("Hier ist der Audit:\n```json\n{}\n```\nViel Erfolg!", raw);

    let parsed = parse_audit_data(&model_text).expect("Fenced output should parse");
    assert_eq!(parsed, sample_audit());

    assert_eq!(parsed.domain, "example.com");
    assert_eq!(parsed.overall_score, 62);
    assert_eq!(parsed.sections.len(), 5);
    assert_eq!(parsed.sections[1].status, Status::Critical);
    assert_eq!(parsed.sections[0].checklist[0].priority, Priority::High);
    assert_eq!(parsed.total_tasks(), 8);
}

#[test]
fn test_worksheet_has_cover_and_one_page_per_section() {
    let data = sample_audit();
    let worksheet = build_worksheet(&data, false, generated_on());

    assert_eq!(worksheet.pages.len(), 1 + data.sections.len());
    assert_eq!(worksheet.pages[0].kind, PageKind::Cover);
    for (page, section) in worksheet.pages[1..].iter().zip(&data.sections) {
        assert_eq!(
            page.kind,
            PageKind::Section {
                section_id: section.id.clone()
            }
        );
    }

    let bullets = worksheet.pages[0]
        .texts()
        .filter(|t| t.starts_with(SUMMARY_BULLET))
        .count();
    assert_eq!(bullets, data.executive_summary.len());
    assert!(worksheet.pages[0].texts().any(|t| t == "Score: 62/100"));
    assert!(worksheet.pages[0].texts().any(|t| t == "Erstellt am: 14.03.2026"));
}

#[test]
fn test_every_task_appears_in_worksheet() {
    let data = sample_audit();
    let worksheet = build_worksheet(&data, true, generated_on());

    for section in &data.sections {
        for item in &section.checklist {
            assert!(
                worksheet.pages.iter().flat_map(|p| p.texts()).any(|t| t == item.task),
                "Task '{}' missing from worksheet",
                item.task
            );
        }
    }
}

#[tokio::test]
async fn test_export_writes_pdf_named_after_domain() {
    let dir = TempDir::new().unwrap();
    let data = sample_audit();

    let export = export_worksheet(&data, None, dir.path(), generated_on())
        .await
        .expect("Export should succeed");

    assert_eq!(export.file_name, "SEO-Worksheet_example.com.pdf");
    assert_eq!(export.path, dir.path().join("SEO-Worksheet_example.com.pdf"));
    assert_eq!(export.page_count, 6);
    assert!(!export.image_embedded);

    let bytes = std::fs::read(&export.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_export_survives_unreachable_screenshot() {
    let dir = TempDir::new().unwrap();
    let data = sample_audit();

    let export = export_worksheet(
        &data,
        Some("http://127.0.0.1:9/mshots/example.com"),
        dir.path(),
        generated_on(),
    )
    .await
    .expect("Image failures must not abort the export");

    assert!(!export.image_embedded);
    assert!(export.path.exists());
}

#[tokio::test]
async fn test_export_embeds_fetched_screenshot() {
    let dir = TempDir::new().unwrap();
    let data = sample_audit();
    let url = serve_png_once(320, 200);

    let export = export_worksheet(&data, Some(&url), dir.path(), generated_on())
        .await
        .expect("Export should succeed");

    assert!(export.image_embedded);
    assert_eq!(export.page_count, 6);

    let bytes = std::fs::read(&export.path).unwrap();
    assert!(bytes.windows(14).any(|w| w == b"/Subtype/Image"));
}
