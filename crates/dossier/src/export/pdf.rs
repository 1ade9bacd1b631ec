//! PDF Export
//!
//! Paginated A4 document mirroring the on-screen grouping: a bold heading
//! per permission, then one block per record with a 30mm thumbnail on the
//! left and the text fields beside it, long fields wrapped within the text
//! column. Text is set in the built-in Helvetica, whose WinAnsi encoding
//! cannot carry emoji or most non-Latin script; anything unrepresentable
//! is substituted with '~' before layout.
//!
//! Page breaks happen only between records: after a record finishes once
//! the cursor passes a fixed threshold, and before a record that would
//! not fit above the bottom margin. A record is never split across pages.

use image::imageops::FilterType;
use image::DynamicImage;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::domain::{DomainError, Roster, RosterRow};
use crate::ports::ImageSource;

const PAGE_W_MM: f32 = 210.0;
const PAGE_H_MM: f32 = 297.0;
const MARGIN_TOP_MM: f32 = 15.0;
const MARGIN_BOTTOM_MM: f32 = 10.0;
const MARGIN_LEFT_MM: f32 = 10.0;
/// Text block starts to the right of the thumbnail
const TEXT_X_MM: f32 = 45.0;
/// Character budget per text line: the column is 155mm wide and 10pt
/// Helvetica averages about 1.75mm per glyph.
const WRAP_CHARS: usize = 88;
const LINE_H_MM: f32 = 6.0;
const HEADING_H_MM: f32 = 10.0;
const THUMB_MM: f32 = 30.0;
/// Thumbnails are resized to 150px square and placed at 127 dpi,
/// which comes out at exactly 30mm on the page.
const THUMB_PX: u32 = 150;
const THUMB_DPI: f32 = 127.0;
/// Used-height threshold: once the cursor passes this after a record,
/// the next record starts on a fresh page.
const BREAK_AT_MM: f32 = 250.0;

/// Render the roster as a paginated PDF. Thumbnails are fetched
/// sequentially through the image port; a failed fetch leaves the slot
/// blank and logs a warning.
pub async fn to_pdf(roster: &Roster, images: &dyn ImageSource) -> Result<Vec<u8>, DomainError> {
    // printpdf's document handle is Rc-based and not Send, so the writer
    // must not live across an await point: fetch every thumbnail first,
    // then lay out the document synchronously.
    let mut groups = Vec::new();
    for (permission, rows) in roster.grouped() {
        let mut fetched = Vec::new();
        for row in rows {
            let thumbnail = fetch_thumbnail(images, row).await;
            fetched.push((row, thumbnail));
        }
        groups.push((permission, fetched));
    }

    let mut writer = PdfWriter::new("Persona Permissions")?;

    for (permission, rows) in groups {
        writer.heading(&permission);
        for (row, thumbnail) in rows {
            writer.record(roster, row, thumbnail.as_ref());
            writer.break_if_past_threshold();
        }
        writer.group_gap();
    }

    writer.finish()
}

/// Substitute every character WinAnsi cannot represent with '~'.
/// Consecutive unrepresentable characters (a multi-codepoint emoji, say)
/// collapse into a single '~'.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut substituted = false;
    for c in text.chars() {
        if winansi_representable(c) {
            out.push(c);
            substituted = false;
        } else if !substituted {
            out.push('~');
            substituted = true;
        }
    }
    out
}

/// Greedy word wrap at a character budget. Words longer than the budget
/// are hard-split so no line ever exceeds it. Always yields at least one
/// line, so an empty field still occupies its baseline.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = &word[head.len()..];
            lines.push(head);
        }
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn winansi_representable(c: char) -> bool {
    matches!(c, ' '..='~')
        || matches!(c as u32, 0xA0..=0xFF)
        || matches!(
            c,
            '€' | '‚'
                | 'ƒ'
                | '„'
                | '…'
                | '†'
                | '‡'
                | 'ˆ'
                | '‰'
                | 'Š'
                | '‹'
                | 'Œ'
                | 'Ž'
                | '\u{2018}'
                | '\u{2019}'
                | '\u{201C}'
                | '\u{201D}'
                | '•'
                | '–'
                | '—'
                | '˜'
                | '™'
                | 'š'
                | '›'
                | 'œ'
                | 'ž'
                | 'Ÿ'
        )
}

async fn fetch_thumbnail(images: &dyn ImageSource, row: &RosterRow) -> Option<DynamicImage> {
    if row.image.is_empty() {
        return None;
    }
    match images.fetch(&row.image).await {
        Ok(img) => Some(DynamicImage::ImageRgb8(
            img.resize_exact(THUMB_PX, THUMB_PX, FilterType::Triangle)
                .to_rgb8(),
        )),
        Err(e) => {
            tracing::warn!(handle = %row.handle, url = %row.image, error = %e, "Image fetch failed, leaving slot blank");
            None
        }
    }
}

/// Sequential layout over a growing document. `cursor` is used height in
/// mm from the top of the current page.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, DomainError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_W_MM), Mm(PAGE_H_MM), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| DomainError::Export(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| DomainError::Export(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: MARGIN_TOP_MM,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_W_MM),
            Mm(PAGE_H_MM),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = MARGIN_TOP_MM;
    }

    fn break_if_past_threshold(&mut self) {
        if self.cursor > BREAK_AT_MM {
            self.new_page();
        }
    }

    /// Bold group heading. Breaks first if the heading would start in the
    /// bottom band, so a heading is never orphaned above its records.
    fn heading(&mut self, permission: &str) {
        self.break_if_past_threshold();
        let baseline = PAGE_H_MM - (self.cursor + LINE_H_MM);
        self.layer.use_text(
            sanitize(permission),
            12.0,
            Mm(MARGIN_LEFT_MM),
            Mm(baseline),
            &self.bold,
        );
        self.cursor += HEADING_H_MM;
    }

    /// One record block: thumbnail at the left margin, labeled text fields
    /// beside it, long fields wrapped within the text column. The block is
    /// measured first; if it would cross the bottom margin it moves to a
    /// fresh page whole. Pagination is decided only between records.
    fn record(&mut self, roster: &Roster, row: &RosterRow, thumbnail: Option<&DynamicImage>) {
        let mut fields = vec![
            format!("Name: {}", row.name),
            format!("Handle: {}", row.handle),
            format!("Faction: {}", row.faction),
            format!("Beliefs: {}", row.beliefs),
            format!("Tags: {}", row.tags),
            format!("Bio: {}", row.bio),
        ];
        if roster.tear_sheet {
            fields.push(format!("Email: {}", row.email));
            fields.push(format!("Password: {}", row.password));
        }

        let lines: Vec<String> = fields
            .iter()
            .flat_map(|field| wrap(&sanitize(field), WRAP_CHARS))
            .collect();

        let text_h = lines.len() as f32 * LINE_H_MM;
        let height = text_h.max(THUMB_MM) + LINE_H_MM;

        if self.cursor > MARGIN_TOP_MM && self.cursor + height > PAGE_H_MM - MARGIN_BOTTOM_MM {
            self.new_page();
        }

        let top = self.cursor;

        if let Some(img) = thumbnail {
            let pdf_image = Image::from_dynamic_image(img);
            pdf_image.add_to_layer(
                self.layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(MARGIN_LEFT_MM)),
                    // printpdf places images by their lower-left corner
                    translate_y: Some(Mm(PAGE_H_MM - top - THUMB_MM)),
                    dpi: Some(THUMB_DPI),
                    ..Default::default()
                },
            );
        }

        for (i, line) in lines.iter().enumerate() {
            let baseline = PAGE_H_MM - (top + (i as f32 + 1.0) * LINE_H_MM);
            self.layer.use_text(
                line.as_str(),
                10.0,
                Mm(TEXT_X_MM),
                Mm(baseline),
                &self.regular,
            );
        }

        self.cursor = top + height;
    }

    fn group_gap(&mut self) {
        self.cursor += LINE_H_MM;
    }

    fn finish(self) -> Result<Vec<u8>, DomainError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| DomainError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubImages {
        fail: bool,
    }

    #[async_trait]
    impl ImageSource for StubImages {
        async fn fetch(&self, _url: &str) -> Result<DynamicImage, DomainError> {
            if self.fail {
                Err(DomainError::Image("unreachable".into()))
            } else {
                Ok(DynamicImage::new_rgb8(4, 4))
            }
        }
    }

    fn row(handle: &str, permission: &str, image: &str) -> RosterRow {
        RosterRow {
            handle: handle.into(),
            permission: permission.into(),
            image: image.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_passes_winansi_text() {
        assert_eq!(sanitize("plain text, café — ok"), "plain text, café — ok");
    }

    #[test]
    fn test_sanitize_substitutes_emoji() {
        assert_eq!(sanitize("hello 🌍"), "hello ~");
    }

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize("a🌍🚀b"), "a~b");
        assert_eq!(sanitize("日本語"), "~");
    }

    #[tokio::test]
    async fn test_pdf_smoke() {
        let roster = Roster {
            rows: vec![row("alice", "read", "")],
            tear_sheet: false,
        };
        let bytes = to_pdf(&roster, &StubImages { fail: false }).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_blank() {
        let roster = Roster {
            rows: vec![row("alice", "read", "https://example.com/a.png")],
            tear_sheet: false,
        };
        // must still produce a document, just without the thumbnail
        let bytes = to_pdf(&roster, &StubImages { fail: true }).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_keeps_short_lines() {
        assert_eq!(wrap("Bio: hi", WRAP_CHARS), vec!["Bio: hi"]);
        assert_eq!(wrap("", WRAP_CHARS), vec![""]);
    }

    #[test]
    fn test_wrap_breaks_long_text_within_budget() {
        let text = "word ".repeat(40);
        let lines = wrap(text.trim(), 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        // no word is lost or reordered
        assert_eq!(lines.join(" "), text.trim());
    }

    #[test]
    fn test_wrap_splits_oversized_words() {
        let lines = wrap(&"x".repeat(50), 20);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
    }

    #[test]
    fn test_long_bio_wraps_and_grows_the_record() {
        let mut long = row("alice", "read", "");
        long.bio = "keeps the permission audit trail current ".repeat(12);
        let roster = Roster {
            rows: vec![long],
            tear_sheet: false,
        };
        let mut writer = PdfWriter::new("test").unwrap();
        let top = writer.cursor;
        writer.record(&roster, &roster.rows[0], None);
        // six single-line fields advance 42mm; a ~490 char bio must add lines
        assert!(writer.cursor - top > 42.0);
    }

    #[test]
    fn test_tall_record_near_bottom_moves_to_a_fresh_page() {
        let roster = Roster {
            rows: vec![row("alice", "read", "")],
            tear_sheet: true,
        };
        let mut writer = PdfWriter::new("test").unwrap();
        // reachable cursor just under the break threshold; the 8-line
        // tear-sheet block would otherwise run past the page bottom
        writer.cursor = 249.0;
        writer.record(&roster, &roster.rows[0], None);
        assert_eq!(writer.pages, 2);
        assert!(writer.cursor <= PAGE_H_MM - MARGIN_BOTTOM_MM);
    }

    #[test]
    fn test_records_paginate_past_threshold() {
        let roster = Roster {
            rows: (0..20).map(|i| row(&format!("p{i}"), "read", "")).collect(),
            tear_sheet: false,
        };
        let mut writer = PdfWriter::new("test").unwrap();
        writer.heading("read");
        for r in &roster.rows {
            writer.record(&roster, r, None);
            writer.break_if_past_threshold();
        }
        // 20 records at 42mm each cannot fit one A4 page
        assert!(writer.pages > 1);
        assert!(writer.cursor <= BREAK_AT_MM);
    }

    #[test]
    fn test_record_never_starts_past_threshold() {
        let roster = Roster {
            rows: (0..50).map(|i| row(&format!("p{i}"), "read", "")).collect(),
            tear_sheet: false,
        };
        let mut writer = PdfWriter::new("test").unwrap();
        for r in &roster.rows {
            assert!(writer.cursor <= BREAK_AT_MM);
            writer.record(&roster, r, None);
            writer.break_if_past_threshold();
        }
    }
}
