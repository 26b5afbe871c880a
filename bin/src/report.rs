//! Human-readable output of extraction results.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use engine::{DetectorScore, GuidedExtraction, TableCandidate, table::Row};

const COLUMN_GAP: &str = "  ";

/// Writes the number of candidates, then each candidate's shape, provenance,
/// labels and first `preview_rows` rows.
pub fn write_summary<W: Write>(
    w: &mut W,
    candidates: &[TableCandidate],
    preview_rows: usize,
) -> Result<()> {
    writeln!(w, "Found {} tables/pseudo-tables.", candidates.len())?;
    for (idx, candidate) in candidates.iter().enumerate() {
        let (rows, cols) = candidate.shape();
        writeln!(w)?;
        writeln!(w, "Table #{}: shape=({rows}, {cols})", idx + 1)?;
        writeln!(w, "(Detected by {})", candidate.provenance())?;
        write_grid(w, &candidate.column_labels(), candidate.head(preview_rows))?;
        if rows > preview_rows {
            writeln!(w, "... {} more rows", rows - preview_rows)?;
        }
    }
    Ok(())
}

/// Writes the guided extraction's rows and its suggested pattern.
pub fn write_guided<W: Write>(w: &mut W, guided: &GuidedExtraction) -> Result<()> {
    match &guided.candidate {
        Some(candidate) => write_grid(w, &candidate.column_labels(), candidate.rows())?,
        None => writeln!(w, "No examples found.")?,
    }
    writeln!(w, "Suggested regex: {}", guided.suggested_regex)?;
    Ok(())
}

/// Writes one "detector: score" line per entry to the file at `path`,
/// replacing any previous content.
pub fn write_scores_log(path: &Path, scores: &[DetectorScore]) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating scores log {path:?}"))?;
    for entry in scores {
        writeln!(file, "{}: {}", entry.detector, entry.score)
            .with_context(|| format!("writing scores log {path:?}"))?;
    }
    Ok(())
}

/// Writes `labels` and `rows` as left-aligned columns.
fn write_grid<W: Write>(w: &mut W, labels: &[String], rows: &[Row]) -> Result<()> {
    let mut widths: Vec<usize> = labels.iter().map(|label| label.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(idx) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    write_line(w, labels.iter().map(String::as_str), &widths)?;
    for row in rows {
        write_line(w, row.iter().map(String::as_str), &widths)?;
    }
    Ok(())
}

fn write_line<'a, W: Write>(
    w: &mut W,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> Result<()> {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    writeln!(w, "{}", line.trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use engine::{DetectorKind, Engine, EngineConfig, Provenance, extract_by_examples};
    use googletest::prelude::*;

    use super::*;

    fn render(candidates: &[TableCandidate], preview_rows: usize) -> String {
        let mut out = Vec::new();
        write_summary(&mut out, candidates, preview_rows).expect("writes to memory");
        String::from_utf8(out).expect("valid UTF-8")
    }

    #[gtest]
    fn summary_layout() {
        let candidate = TableCandidate::new(
            [["Oslo", "700"], ["Bergen", "285"], ["Tromsø", "78"]],
            Some(vec!["city".to_string(), "k".to_string()]),
            Provenance::new(DetectorKind::ClassBlocks).with_discriminator("city-card"),
        )
        .expect("non-empty");

        expect_that!(
            render(&[candidate], 2),
            eq("Found 1 tables/pseudo-tables.\n\
                \n\
                Table #1: shape=(3, 2)\n\
                (Detected by class_blocks (city-card))\n\
                city    k\n\
                Oslo    700\n\
                Bergen  285\n\
                ... 1 more rows\n")
        );
    }

    #[gtest]
    fn summary_of_listing_page() -> anyhow::Result<()> {
        let extraction = Engine::new(EngineConfig::default())?.extract_html(&testutils::listing_page())?;
        let got = render(&extraction.candidates, 5);
        expect_that!(
            got,
            starts_with(format!(
                "Found {} tables/pseudo-tables.\n",
                extraction.candidates.len()
            ))
        );
        expect_that!(got, contains_substring("Table #1: shape=("));
        expect_that!(got, contains_substring("(Detected by cards)"));
        Ok(())
    }

    #[gtest]
    fn scores_log_lines() -> anyhow::Result<()> {
        let tempdir = tempfile::tempdir()?;
        let path = tempdir.path().join("scores.log");
        std::fs::write(&path, "stale\n")?;

        write_scores_log(
            &path,
            &[
                DetectorScore {
                    detector: DetectorKind::RepeatedStructure,
                    candidates_so_far: 2,
                    score: 1,
                },
                DetectorScore {
                    detector: DetectorKind::VisualBlocks,
                    candidates_so_far: 5,
                    score: 3,
                },
            ],
        )?;
        expect_that!(
            std::fs::read_to_string(&path)?,
            eq("repeated_structure: 1\nvisual_blocks: 3\n")
        );
        Ok(())
    }

    #[gtest]
    fn guided_output() -> anyhow::Result<()> {
        let doc = engine::Document::parse(&testutils::page(
            "<li><b>Flat</b> 3&nbsp;700&nbsp;000&nbsp;kr</li>",
        ))?;
        let guided = extract_by_examples(&doc, &["3 700 000 kr"])?;

        let mut out = Vec::new();
        write_guided(&mut out, &guided)?;
        expect_that!(
            String::from_utf8(out)?,
            eq("3 700 000 kr\n\
                3 700 000 kr\n\
                Suggested regex: \\d+[\\s\\xa0]*\\d{3}[\\s\\xa0]*\\d{3}[\\s\\xa0]*kr\n")
        );
        Ok(())
    }
}
