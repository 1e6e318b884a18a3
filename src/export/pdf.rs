use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Flowing A4 layout: headings, text lines and striped tables, breaking
/// pages as the cursor reaches the bottom margin.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,
    content: Option<Content>,

    title: String,
    subtitle: String,
    y: f32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

/// Helvetica is WinAnsi-encoded; characters outside Latin-1 become '?'.
fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}

impl PdfManager {
    pub fn new(title: &str, subtitle: &str) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let mut manager = Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,
            content: None,

            title: title.to_string(),
            subtitle: subtitle.to_string(),
            y: 0.0,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 18.0,

            next_id,
            font_id,
            bold_id,

            font_size: 9.0,
            header_font_size: 9.5,
            title_font_size: 14.0,
        };
        manager.new_page();
        manager
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Close the current page (if any) and open the next one.
    fn new_page(&mut self) {
        self.finalize_page();

        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(b"F1"), self.font_id);
            fonts.pair(Name(b"F2"), self.bold_id);
        }
        drop(page);

        self.current_content_id = Some(content_id);

        let mut content = Content::new();
        let page_no = self.page_refs.len();
        self.draw_page_header_footer(&mut content, page_no);
        self.content = Some(content);
        self.y = self.page_h - self.margin - 30.0;
    }

    fn finalize_page(&mut self) {
        if let (Some(id), Some(content)) = (self.current_content_id, self.content.take()) {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(content: &mut Content, font: &[u8], x: f32, y: f32, size: f32, text: &str) {
        let bytes = encode(text);
        content.begin_text();
        content.set_font(Name(font), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn draw_page_header_footer(&self, content: &mut Content, page: usize) {
        let top = self.page_h - self.margin + 15.0;
        Self::draw_text(content, b"F2", self.margin, top, self.title_font_size, &self.title);

        if !self.subtitle.is_empty() {
            Self::draw_text(
                content,
                b"F1",
                self.margin,
                top - 14.0,
                self.font_size,
                &self.subtitle,
            );
        }

        let pg = format!("Page {}", page);
        Self::draw_text(
            content,
            b"F1",
            self.page_w - self.margin - 40.0,
            self.margin - 35.0,
            self.font_size,
            &pg,
        );
    }

    /// Start a new page when fewer than `needed` points remain.
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < self.margin {
            self.new_page();
        }
    }

    fn with_content<F: FnOnce(&mut Content)>(&mut self, f: F) {
        if let Some(content) = self.content.as_mut() {
            f(content);
        }
    }

    pub fn heading(&mut self, text: &str) {
        self.ensure_space(self.row_h * 2.0);
        self.y -= 6.0;
        let (x, y, size) = (self.margin, self.y, self.header_font_size + 2.0);
        self.with_content(|c| Self::draw_text(c, b"F2", x, y, size, text));
        self.y -= self.row_h;
    }

    /// Lines of plain text, wrapped by character count.
    pub fn paragraph(&mut self, text: &str) {
        let max_chars = ((self.page_w - 2.0 * self.margin) / (self.font_size * 0.5)) as usize;
        for line in wrap(text, max_chars) {
            self.ensure_space(self.row_h);
            let (x, y, size) = (self.margin, self.y, self.font_size);
            self.with_content(|c| Self::draw_text(c, b"F1", x, y, size, &line));
            self.y -= self.font_size + 4.0;
        }
        self.y -= 4.0;
    }

    /// "Key: value" lines.
    pub fn key_values(&mut self, pairs: &[(String, String)]) {
        for (k, v) in pairs {
            self.ensure_space(self.row_h);
            let (x, y, size) = (self.margin, self.y, self.font_size);
            let key = format!("{k}:");
            self.with_content(|c| {
                Self::draw_text(c, b"F2", x, y, size, &key);
                Self::draw_text(c, b"F1", x + 150.0, y, size, v);
            });
            self.y -= self.font_size + 5.0;
        }
        self.y -= 6.0;
    }

    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| h.chars().count() as f32 * 5.6 + 8.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = w.max(cell.chars().count() as f32 * 5.0 + 8.0);
                }
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_row(
        content: &mut Content,
        font: &[u8],
        x_start: f32,
        y: f32,
        row_h: f32,
        col_widths: &[f32],
        row: &[String],
        font_size: f32,
    ) {
        let mut x = x_start;
        for (text, w) in row.iter().zip(col_widths) {
            // clip to the cell by character budget
            let budget = ((w - 6.0) / (font_size * 0.5)).max(1.0) as usize;
            let shown: String = if text.chars().count() > budget {
                text.chars().take(budget.saturating_sub(1)).chain(['.']).collect()
            } else {
                text.clone()
            };
            Self::draw_text(content, font, x + 3.0, y + 5.0, font_size, &shown);

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *w, row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    fn draw_header_row(&mut self, col_widths: &[f32], header_row: &[String]) {
        let (x, y, row_h, size) = (self.margin, self.y, self.row_h, self.header_font_size);
        let total: f32 = col_widths.iter().sum();
        self.with_content(|c| {
            c.save_state();
            c.set_fill_rgb(0.85, 0.87, 0.90);
            c.rect(x, y, total, row_h);
            c.fill_nonzero();
            c.restore_state();
            Self::draw_row(c, b"F2", x, y, row_h, col_widths, header_row, size);
        });
        self.y -= self.row_h;
    }

    /// Striped table; the header row is repeated on every page it spans.
    pub fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        self.ensure_space(self.row_h * 2.0);
        self.draw_header_row(&col_widths, &header_row);

        if rows.is_empty() {
            let (x, y, size) = (self.margin + 3.0, self.y + 5.0, self.font_size);
            self.with_content(|c| Self::draw_text(c, b"F1", x, y, size, "No data"));
            self.y -= self.row_h;
        }

        for (i, row) in rows.iter().enumerate() {
            if self.y - self.row_h < self.margin {
                self.new_page();
                self.draw_header_row(&col_widths, &header_row);
            }

            let (x, y, row_h, size) = (self.margin, self.y, self.row_h, self.font_size);
            let total: f32 = col_widths.iter().sum();
            self.with_content(|c| {
                if i % 2 == 0 {
                    c.save_state();
                    c.set_fill_rgb(0.96, 0.96, 0.96);
                    c.rect(x, y, total, row_h);
                    c.fill_nonzero();
                    c.restore_state();
                }
                Self::draw_row(c, b"F1", x, y, row_h, &col_widths, row, size);
            });
            self.y -= self.row_h;
        }

        self.y -= 10.0;
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.finalize_page();
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

/// Greedy word wrap; explicit newlines are kept.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let mut line = String::new();
        for word in raw.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > max_chars {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}
