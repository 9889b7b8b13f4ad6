use chrono::NaiveDate;
use doc_export_core::naming::{
    archive_file_name, clean_order_label, entry_file_name, file_extension, sanitize_description,
    DESCRIPTION_PLACEHOLDER, MAX_DESCRIPTION_CHARS,
};

fn only_allowed_chars(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || c == ' '
            || c == '-'
            || (('\u{C0}'..='\u{FF}').contains(&c) && c != '×' && c != '÷')
    })
}

#[test]
fn sanitize_strips_symbols() {
    let cleaned = sanitize_description("BL #2025/A!");
    assert_eq!(cleaned, "BL 2025A");
    assert!(only_allowed_chars(&cleaned));
}

#[test]
fn sanitize_keeps_accented_letters_and_hyphens() {
    assert_eq!(
        sanitize_description("  Declaración DUCA-F Número 12  "),
        "Declaración DUCA-F Número 12"
    );
}

#[test]
fn sanitize_truncates_to_fifty_chars() {
    let long = "Factura comercial ".repeat(10);
    let cleaned = sanitize_description(&long);
    assert_eq!(cleaned.chars().count(), MAX_DESCRIPTION_CHARS);
    assert!(long.starts_with(&cleaned));
}

#[test]
fn sanitize_drops_latin1_math_signs() {
    let cleaned = sanitize_description("2×3 ÷ 4 Ñandú");
    assert_eq!(cleaned, "23  4 Ñandú");
    assert!(only_allowed_chars(&cleaned));
}

#[test]
fn sanitize_never_ends_with_space_after_truncation() {
    let description = format!("{} tail", "a".repeat(MAX_DESCRIPTION_CHARS - 1));
    let cleaned = sanitize_description(&description);
    assert_eq!(cleaned, "a".repeat(MAX_DESCRIPTION_CHARS - 1));
    assert!(!cleaned.ends_with(' '));
    assert_eq!(
        entry_file_name("OS-1", "DOC", 1, &description, "x.pdf"),
        format!("OS-1-DOC-01-{}.pdf", "a".repeat(MAX_DESCRIPTION_CHARS - 1))
    );
}

#[test]
fn sanitize_counts_characters_not_bytes() {
    let long = "é".repeat(80);
    assert_eq!(sanitize_description(&long).chars().count(), MAX_DESCRIPTION_CHARS);
}

#[test]
fn sanitize_empty_or_symbol_only_uses_placeholder() {
    assert_eq!(sanitize_description(""), DESCRIPTION_PLACEHOLDER);
    assert_eq!(sanitize_description("   "), DESCRIPTION_PLACEHOLDER);
    assert_eq!(sanitize_description("#$%&/()"), DESCRIPTION_PLACEHOLDER);
}

#[test]
fn extension_comes_from_last_dot() {
    assert_eq!(file_extension("factura.2025.xml"), "xml");
    assert_eq!(file_extension("scan.JPG"), "JPG");
}

#[test]
fn extension_defaults_to_pdf() {
    assert_eq!(file_extension("DUCA_sin_extension"), "pdf");
    assert_eq!(file_extension(""), "pdf");
    assert_eq!(file_extension("trailing."), "pdf");
}

#[test]
fn entry_name_layout() {
    assert_eq!(
        entry_file_name("OS-2025-001", "FACTURA", 1, "Factura #45", "f45.pdf"),
        "OS-2025-001-FACTURA-01-Factura 45.pdf"
    );
    assert_eq!(
        entry_file_name("OS-9", "DOC", 12, "", "foto.png"),
        "OS-9-DOC-12-documento.png"
    );
    assert_eq!(
        entry_file_name("OS-9", "DOC", 120, "x", "a"),
        "OS-9-DOC-120-x.pdf"
    );
}

#[test]
fn archive_name_layout() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    assert_eq!(
        archive_file_name("OS-2025-001", date),
        "OS-2025-001_DOCUMENTOS_2025-03-07.zip"
    );
}

#[test]
fn order_label_path_separators_are_replaced() {
    assert_eq!(clean_order_label(" OS/2025\\01 "), "OS-2025-01");
}
