//! Integration tests for dossie-out.
//!
//! These tests verify the Markdown layout, the JSON payload and the files
//! written to disk.

use dossie_core::Memory;
use dossie_out::{DossierAssembler, DossierExport, TemplateRenderer, TemplatesFile};
use serde_json::Value;

fn full_memory() -> Memory {
    [
        ("audience_raw", "  40% Tchaikovsky, sábado  "),
        ("audience_signals", "{\n  \"price_sensitive\": true\n}"),
        ("decisions", "{\n  \"show_window\": \"sábado às 20:00\",\n  \"priority_composers\": [\"Tchaikovsky\", \"Minkus\"],\n  \"tone\": \"linguagem acolhedora e foco em tradição\",\n  \"priority_channels\": [\"instagram\", \"reels\"],\n  \"pricing_strategy\": \"destacar meia-entrada/combos\"\n}"),
        ("show_window", "sábado às 20:00"),
        ("program", "\nPrograma Sugerido\n"),
        ("press_release", "Release"),
        ("technical_schedule", "Cronograma"),
        ("data_to_decisions", "Relação"),
        ("theme", "Espetáculos de Ballet Clássico"),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Markdown
// =============================================================================

#[test]
fn test_empty_memory_layout() {
    let assembler = DossierAssembler::builtin().unwrap();
    let markdown = assembler
        .markdown(&DossierExport::from_memory(&Memory::new()))
        .unwrap();

    let expected = "# Dossiê – Ballet Clássico\n\n\
## Programa\n\n\n\n\
## Release\n\n\n\n\
## Cronograma Técnico\n\n\n\n\
## Relação entre Dados do Público e Decisões\n\n\n\n\
## Dados do Público (Bruto)\n\n\n\n\
## Audiência (Estruturado)\n\n```json\n{}\n```\n\n\
## Implicações\n\n```json\n{}\n```\n";
    assert_eq!(markdown, expected);
}

#[test]
fn test_sections_in_order_and_trimmed() {
    let assembler = DossierAssembler::builtin().unwrap();
    let markdown = assembler
        .markdown(&DossierExport::from_memory(&full_memory()))
        .unwrap();

    let headings: Vec<&str> = markdown.lines().filter(|l| l.starts_with('#')).collect();
    assert_eq!(
        headings,
        vec![
            "# Dossiê – Ballet Clássico",
            "## Programa",
            "## Release",
            "## Cronograma Técnico",
            "## Relação entre Dados do Público e Decisões",
            "## Dados do Público (Bruto)",
            "## Audiência (Estruturado)",
            "## Implicações",
        ]
    );
    assert!(markdown.contains("## Programa\n\nPrograma Sugerido\n\n## Release"));
    assert!(markdown.contains("## Dados do Público (Bruto)\n\n40% Tchaikovsky, sábado\n\n"));
    assert!(markdown.contains("```json\n{\n  \"price_sensitive\": true\n}\n```"));
    assert!(markdown.ends_with("```\n"));
    assert!(!markdown.ends_with("\n\n"));
}

#[test]
fn test_summary_reads_decisions() {
    let assembler = DossierAssembler::builtin().unwrap();
    let summary = assembler
        .summary(&DossierExport::from_memory(&full_memory()))
        .unwrap();
    assert!(summary.contains("Janela: sábado às 20:00"));
    assert!(summary.contains("Compositores: Tchaikovsky, Minkus"));
    assert!(summary.contains("Canais: instagram, reels"));
    assert!(summary.contains("Preço: destacar meia-entrada/combos"));
}

#[test]
fn test_summary_without_decisions() {
    let assembler = DossierAssembler::builtin().unwrap();
    let summary = assembler
        .summary(&DossierExport::from_memory(&Memory::new()))
        .unwrap();
    assert!(summary.contains("Janela: -"));
    assert!(summary.contains("Tom: -"));
}

#[test]
fn test_custom_templates() {
    let file = TemplatesFile::from_yaml(
        r#"
version: "1.0"
templates:
  markdown:
    template: "PROGRAMA={{program}}"
  summary:
    template: "{{show_window}}"
"#,
    )
    .unwrap();
    let assembler = DossierAssembler::new(TemplateRenderer::new(file).unwrap());
    let markdown = assembler
        .markdown(&DossierExport::from_memory(&full_memory()))
        .unwrap();
    assert_eq!(markdown, "PROGRAMA=Programa Sugerido\n");
}

// =============================================================================
// JSON and files
// =============================================================================

#[test]
fn test_json_key_order_and_values() {
    let export = DossierExport::from_memory(&full_memory());
    let raw = export.to_pretty_json().unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();

    let positions: Vec<usize> = [
        "\"program\"",
        "\"press_release\"",
        "\"technical_schedule\"",
        "\"data_to_decisions\"",
        "\"audience_raw\"",
        "\"audience_signals\"",
        "\"decisions\"",
        "\"show_window\"",
    ]
    .iter()
    .map(|k| raw.find(k).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(json["program"], "\nPrograma Sugerido\n");
    assert!(raw.contains("sábado às 20:00"));
    assert!(json.get("theme").is_none());
}

#[test]
fn test_save_writes_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("dossie_ballet");
    let assembler = DossierAssembler::builtin().unwrap();

    let (md, json) = assembler.save(&full_memory(), &base).unwrap();
    assert_eq!(md, dir.path().join("dossie_ballet.md"));
    assert_eq!(json, dir.path().join("dossie_ballet.json"));

    let markdown = std::fs::read_to_string(&md).unwrap();
    assert!(markdown.starts_with("# Dossiê – Ballet Clássico"));
    let payload: DossierExport =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(payload, DossierExport::from_memory(&full_memory()));
}

#[test]
fn test_save_refused_without_program() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("dossie_ballet");
    let assembler = DossierAssembler::builtin().unwrap();

    let mut memory = full_memory();
    memory.insert("program", "   ");
    let err = assembler.save(&memory, &base).unwrap_err();
    assert!(err.to_string().starts_with("INPUT/"));
    assert!(!dir.path().join("dossie_ballet.md").exists());
}
