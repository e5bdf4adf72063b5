// Drives the `generate` command against a real PDF built in the test.
#![cfg(feature = "lopdf")]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use skilltree::cli::generate::{self, GenerateOptions};
use skilltree::extractor::backends::{self, LopdfBackend};
use skilltree::extractor::{ExtractionBackend, TextExtractor};
use skilltree::tree::SkillTreeNode;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_pdf(path: &Path, lines: &[&str]) {
    write_pdf_pages(path, &[lines]);
}

/// One page per entry, one text line per string.
fn write_pdf_pages(path: &Path, pages: &[&[&str]]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 760.into()]),
        ];
        for line in lines.iter() {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("Td", vec![0.into(), (-16).into()]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations };

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        // keep the environment out of it
        fs::write(dir.path().join("skilltree.toml"), "[llm]\napi_key_env = \"none\"\n").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn options(&self, pdf: &Path) -> GenerateOptions {
        GenerateOptions {
            pdf: pdf.to_string_lossy().to_string(),
            json_output: Some(self.path("skill_tree.json").to_string_lossy().to_string()),
            html_output: Some(self.path("skill_tree.html").to_string_lossy().to_string()),
            config: Some(self.path("skilltree.toml").to_string_lossy().to_string()),
            ..GenerateOptions::default()
        }
    }
}

#[tokio::test]
async fn test_generate_from_pdf_without_credentials() {
    let ws = Workspace::new();
    let pdf = ws.path("resume.pdf");
    write_pdf(&pdf, &["Jane Doe", "Python and Docker", "PostgreSQL"]);

    let report = generate::run(ws.options(&pdf)).await.unwrap().unwrap();
    assert!(!report.classification.is_remote());

    let json = fs::read_to_string(ws.path("skill_tree.json")).unwrap();
    let tree: SkillTreeNode = serde_json::from_str(&json).unwrap();
    assert_eq!(tree.name, "Skills");

    let technical = tree.find_child("Technical Skills").unwrap();
    let languages = technical.find_child("Programming Languages").unwrap();
    assert!(languages.find_child("Python").is_some());
    let tools = technical.find_child("Tools").unwrap();
    assert!(tools.find_child("Docker").is_some());
    assert!(tools.find_child("PostgreSQL").is_some());

    let html = fs::read_to_string(ws.path("skill_tree.html")).unwrap();
    assert_eq!(html.matches(&json).count(), 1);
}

#[tokio::test]
async fn test_generate_dry_run_uses_canned_reply() {
    let ws = Workspace::new();
    let pdf = ws.path("resume.pdf");
    write_pdf(&pdf, &["Rust engineer"]);

    let opts = GenerateOptions {
        dry_run: true,
        ..ws.options(&pdf)
    };
    let report = generate::run(opts).await.unwrap().unwrap();
    assert!(report.classification.is_remote());
    assert!(report.tree.find_child("Soft Skills").is_some());
}

#[tokio::test]
async fn test_generate_saves_record() {
    let ws = Workspace::new();
    let pdf = ws.path("resume.pdf");
    write_pdf(&pdf, &["Kubernetes operator"]);
    let record_path = ws.path("record.json");

    let opts = GenerateOptions {
        offline: true,
        save_record: Some(record_path.to_string_lossy().to_string()),
        ..ws.options(&pdf)
    };
    generate::run(opts).await.unwrap().unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&record_path).unwrap()).unwrap();
    assert_eq!(saved["source"], "keyword-fallback");
    let tools = saved["skills"]["technical"]["tools"].as_array().unwrap();
    assert!(tools.iter().any(|t| t == "Kubernetes"));
}

#[tokio::test]
async fn test_generate_rejects_unreadable_pdf() {
    let ws = Workspace::new();
    let pdf = ws.path("resume.pdf");
    fs::write(&pdf, "not a pdf at all").unwrap();

    let err = generate::run(ws.options(&pdf)).await.unwrap_err();
    assert!(format!("{:#}", err).contains("could not extract text"));
    assert!(!ws.path("skill_tree.json").exists());
    assert!(!ws.path("skill_tree.html").exists());
}

// ============================================================================
// Backends
// ============================================================================

const TWO_PAGES: &[&[&str]] = &[&["Jane Doe", "Python and Docker"], &["Second page Rust"]];

fn assert_two_pages_in_order(backend: &dyn ExtractionBackend, path: &Path) {
    let pages = backend.extract_pages(path).unwrap();
    assert_eq!(pages.len(), 2, "{}: {:?}", backend.name(), pages);
    assert!(pages[0].contains("Jane Doe"), "{}: {:?}", backend.name(), pages);
    assert!(pages[0].contains("Docker"), "{}: {:?}", backend.name(), pages);
    assert!(!pages[0].contains("Second page"), "{}: {:?}", backend.name(), pages);
    assert!(pages[1].contains("Second page Rust"), "{}: {:?}", backend.name(), pages);
}

#[test]
fn test_lopdf_backend_reads_each_page() {
    let ws = Workspace::new();
    let pdf = ws.path("two_pages.pdf");
    write_pdf_pages(&pdf, TWO_PAGES);
    assert_two_pages_in_order(&LopdfBackend, &pdf);
}

#[cfg(feature = "pdf-extract")]
#[test]
fn test_pdf_extract_backend_reads_each_page() {
    let ws = Workspace::new();
    let pdf = ws.path("two_pages.pdf");
    write_pdf_pages(&pdf, TWO_PAGES);
    assert_two_pages_in_order(&backends::PdfExtractBackend, &pdf);
}

#[test]
fn test_blank_page_is_skipped_in_joined_text() {
    let ws = Workspace::new();
    let pdf = ws.path("gap.pdf");
    write_pdf_pages(&pdf, &[&["First page Go"], &[], &["Third page Redis"]]);

    let text = TextExtractor::new(backends::available()).extract(&pdf).unwrap();
    let first = text.find("First page Go").unwrap();
    let third = text.find("Third page Redis").unwrap();
    assert!(first < third);
    assert_eq!(text, text.trim());
}

#[test]
fn test_lopdf_backend_reports_password_protected_pdf() {
    let ws = Workspace::new();
    let pdf = ws.path("locked.pdf");
    write_pdf(&pdf, &["Jane Doe"]);

    // RC4 40-bit handler whose /U cannot match the empty user password
    let mut doc = Document::load(&pdf).unwrap();
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "O" => Object::string_literal(vec![0x11u8; 32]),
        "U" => Object::string_literal(vec![0x22u8; 32]),
        "P" => -4,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal(vec![0x33u8; 16]),
            Object::string_literal(vec![0x33u8; 16]),
        ],
    );
    doc.save(&pdf).unwrap();

    let err = LopdfBackend.extract_pages(&pdf).unwrap_err();
    assert!(
        format!("{:#}", err).contains("needs a password"),
        "unexpected error: {:#}",
        err
    );
}
