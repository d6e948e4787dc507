//! Scored PDF report assembly.
//!
//! A finalized session renders to: a title page, an overall-performance
//! section (holistic feedback plus the radar chart), and a per-turn detail
//! section. Artifact paths carry the session id, so concurrent report
//! generation never races on a shared file.

pub mod chart;
mod wrap;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Rgb,
};
use thiserror::Error;
use tracing::info;

use crate::document::sanitize_file_name;
use crate::scores::ScoreSet;
use crate::session::InterviewSession;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to render radar chart: {0}")]
    Chart(String),

    #[error("failed to assemble PDF: {0}")]
    Pdf(String),

    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// US letter with 1" margins.
const PAGE_W: f32 = 215.9;
const PAGE_H: f32 = 279.4;
const MARGIN: f32 = 25.4;
const TEXT_WIDTH: f32 = PAGE_W - 2.0 * MARGIN;

const PT_TO_MM: f32 = 0.3528;
/// Rough average glyph width for the builtin Helvetica, as a fraction of
/// the point size. Used for wrapping budgets and centering; close enough
/// for report text.
const AVG_CHAR_WIDTH: f32 = 0.5;

const CHART_WIDTH_MM: f32 = 110.0;
const CHART_DPI: f32 = 300.0;

/// Builds the full report PDF for a finalized session and returns its path.
///
/// `holistic_feedback` is computed by the caller (it needs an LLM round
/// trip); report assembly itself never touches the network. A session with
/// zero turns produces a report without the chart section.
pub fn generate_report(
    session: &InterviewSession,
    holistic_feedback: &str,
    report_dir: &Path,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(report_dir)?;

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Interview Performance Report",
        Mm(PAGE_W.into()),
        Mm(PAGE_H.into()),
        "page 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut page = PageWriter {
        doc: &doc,
        regular: &regular,
        bold: &bold,
        layer: doc.get_page(first_page).get_layer(first_layer),
        y: PAGE_H - MARGIN,
        page_number: 1,
    };
    page.draw_footer();

    write_title_page(&mut page, session);

    page.new_page();
    page.heading("Overall Performance Analysis", 22.0);
    page.paragraphs(holistic_feedback, 10.0);

    if !session.turns.is_empty() {
        let averages = session.score_averages();
        let chart_path = report_dir.join(format!("skill_chart_{}.png", session.id.simple()));
        chart::render_radar_chart(&averages, &chart_path)?;
        page.spacer(6.0);
        page.embed_chart(&chart_path)?;
        for (label, average) in ScoreSet::AXIS_LABELS.iter().zip(averages) {
            page.centered(&format!("{label}: {average:.1} / 10"), 11.0, false);
        }
    }

    page.new_page();
    page.heading("Detailed Question Analysis", 22.0);
    for (i, turn) in session.turns.iter().enumerate() {
        page.spacer(4.0);
        page.wrapped_heading(&format!("Question {}: {}", i + 1, turn.question), 13.0);
        page.subheading("Your Answer:");
        page.paragraphs(&turn.answer, 10.0);
        page.subheading("AI Evaluation:");
        page.paragraphs(&turn.evaluation, 10.0);
    }

    let session_tag = session.id.simple().to_string();
    let file_name = format!(
        "Report_{}_{}_{}.pdf",
        sanitize_file_name(&session.candidate_name),
        Utc::now().format("%Y-%m-%d"),
        &session_tag[..8],
    );
    let path = report_dir.join(file_name);
    doc.save(&mut BufWriter::new(File::create(&path)?))
        .map_err(pdf_err)?;

    info!("report generated: {}", path.display());
    Ok(path)
}

fn write_title_page(page: &mut PageWriter<'_>, session: &InterviewSession) {
    page.spacer(50.0);
    page.centered("Interview Performance Report", 28.0, true);
    page.spacer(14.0);
    page.centered(
        &format!("Prepared for: {}", session.candidate_name),
        16.0,
        false,
    );
    page.spacer(6.0);
    page.centered(
        &format!("Interview Type: {}", session.interview_type),
        16.0,
        false,
    );
    page.spacer(6.0);
    page.centered(
        &format!("Date of Report: {}", Utc::now().format("%B %d, %Y")),
        16.0,
        false,
    );
    page.spacer(6.0);
    page.centered(
        &format!("Duration: {:.1} minutes", session.duration_minutes()),
        16.0,
        false,
    );
}

/// Cursor-based page writer: tracks the current layer and y position,
/// breaking to a fresh page (with footer) whenever a write would run into
/// the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    layer: PdfLayerReference,
    y: f32,
    page_number: u32,
}

impl PageWriter<'_> {
    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_W.into()), Mm(PAGE_H.into()), "page");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_number += 1;
        self.y = PAGE_H - MARGIN;
        self.draw_footer();
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.new_page();
        }
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * 1.5
    }

    fn wrap_budget(size: f32) -> usize {
        (TEXT_WIDTH / (size * AVG_CHAR_WIDTH * PT_TO_MM)).floor() as usize
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        let height = Self::line_height(size);
        self.ensure_room(height);
        self.y -= height;
        let font = if bold { self.bold } else { self.regular };
        self.layer
            .use_text(text, size.into(), Mm(MARGIN.into()), Mm(self.y.into()), font);
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool) {
        let height = Self::line_height(size);
        self.ensure_room(height);
        self.y -= height;
        let width = text.chars().count() as f32 * size * AVG_CHAR_WIDTH * PT_TO_MM;
        let x = ((PAGE_W - width) / 2.0).max(MARGIN);
        let font = if bold { self.bold } else { self.regular };
        self.layer
            .use_text(text, size.into(), Mm(x.into()), Mm(self.y.into()), font);
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.line(text, size, true);
        self.spacer(4.0);
    }

    fn wrapped_heading(&mut self, text: &str, size: f32) {
        for line in wrap::wrap_text(text, Self::wrap_budget(size)) {
            self.line(&line, size, true);
        }
        self.spacer(2.0);
    }

    fn subheading(&mut self, text: &str) {
        self.spacer(2.0);
        self.line(text, 11.0, true);
    }

    fn paragraphs(&mut self, text: &str, size: f32) {
        let budget = Self::wrap_budget(size);
        for line in wrap::wrap_text(text, budget) {
            if line.is_empty() {
                self.spacer(Self::line_height(size) / 2.0);
            } else {
                self.line(&line, size, false);
            }
        }
    }

    fn spacer(&mut self, height: f32) {
        self.y -= height;
    }

    fn embed_chart(&mut self, path: &Path) -> Result<(), ReportError> {
        let file = File::open(path)?;
        let decoder =
            printpdf::image_crate::codecs::png::PngDecoder::new(std::io::BufReader::new(file))
                .map_err(pdf_err)?;
        let image = Image::try_from(decoder).map_err(pdf_err)?;

        // The chart bitmap is CHART_SIZE px square; at the PDF's dpi that
        // maps to a native size we scale up to CHART_WIDTH_MM.
        let native_mm = chart::CHART_SIZE as f32 / CHART_DPI * 25.4;
        let scale = CHART_WIDTH_MM / native_mm;

        self.ensure_room(CHART_WIDTH_MM + 8.0);
        self.y -= CHART_WIDTH_MM;
        let x = (PAGE_W - CHART_WIDTH_MM) / 2.0;
        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x.into())),
                translate_y: Some(Mm(self.y.into())),
                scale_x: Some(scale.into()),
                scale_y: Some(scale.into()),
                ..Default::default()
            },
        );
        self.spacer(8.0);
        Ok(())
    }

    fn draw_footer(&mut self) {
        let text = format!(
            "Page {} | Parley Interview Report | Generated on {}",
            self.page_number,
            Utc::now().format("%Y-%m-%d")
        );
        let size = 9.0f32;
        let width = text.chars().count() as f32 * size * AVG_CHAR_WIDTH * PT_TO_MM;
        let x = ((PAGE_W - width) / 2.0).max(MARGIN);

        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None)));
        self.layer
            .use_text(text, size.into(), Mm(x.into()), Mm(15.0_f32.into()), self.regular);
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    }
}

fn pdf_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Pdf(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InterviewSession;

    fn one_turn_session() -> InterviewSession {
        let mut session = InterviewSession::new(
            "Technical",
            "5 years PM experience...".to_string(),
            "Ada Lovelace",
            1,
        );
        session.current_question = Some("Tell me about a launch.".to_string());
        // Drive the session through its public surface indirectly: a turn
        // with an evaluation the score parser understands.
        let evaluation = "Factual Accuracy: 7/10\nRelevance & Directness: [9]/10\n\
                          Structure & Clarity (STAR Method): 5/10\n\nStrengths: clear narrative."
            .to_string();
        session.turns.push(crate::session::Turn {
            question: "Tell me about a launch.".to_string(),
            answer: "We shipped the payments redesign.".to_string(),
            evaluation: evaluation.clone(),
            scores: crate::scores::parse_scores(&evaluation),
        });
        session
    }

    #[test]
    fn single_turn_report_includes_the_chart_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let session = one_turn_session();

        let path = generate_report(&session, "Strong overall performance.", dir.path()).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        let chart = dir
            .path()
            .join(format!("skill_chart_{}.png", session.id.simple()));
        assert!(chart.exists(), "radar chart should be rendered per session");
    }

    #[test]
    fn zero_turn_session_skips_the_chart() {
        let dir = tempfile::tempdir().unwrap();
        let session =
            InterviewSession::new("Technical", "doc text".to_string(), "Nia", 3);

        let path = generate_report(&session, "No answers were recorded.", dir.path()).unwrap();

        assert!(path.exists());
        let charts: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".png"))
            .collect();
        assert!(charts.is_empty(), "no chart for an empty session");
    }

    #[test]
    fn report_name_carries_candidate_and_session_tag() {
        let dir = tempfile::tempdir().unwrap();
        let session = one_turn_session();
        let path = generate_report(&session, "Summary.", dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("Report_Ada_Lovelace_"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn long_evaluations_paginate_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = one_turn_session();
        let long_eval = "A detailed observation about the answer. ".repeat(400);
        session.turns[0].evaluation = long_eval;

        let path = generate_report(&session, "Summary.", dir.path()).unwrap();
        assert!(path.exists());
    }
}
