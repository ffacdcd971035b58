use anyhow::{anyhow, Context, Result};
use planact_core::report::{ActivityReport, CollaboratorReport, FullReport, Table};
use printpdf::lopdf::content::Operation;
use printpdf::lopdf::{Object, StringFormat};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 7.0;

/// Cores de cabeçalho de cada tabela.
pub const COLLABORATORS_COLOR: [u8; 3] = [59, 130, 246];
pub const ACTIVITIES_COLOR: [u8; 3] = [34, 197, 94];
pub const PRODUCTIVITY_COLOR: [u8; 3] = [99, 102, 241];
pub const OVERDUE_COLOR: [u8; 3] = [239, 68, 68];

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

/// Documento A4 com cursor vertical; quebra de página automática.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Posição vertical atual, medida a partir da base da página
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Camada 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("{e:?}"))
            .context("Falha ao carregar fonte")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("{e:?}"))
            .context("Falha ao carregar fonte")?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Camada 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.new_page();
        }
    }

    fn text_at(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.begin_text_section();
        self.layer.set_font(font, size);
        self.layer.set_text_cursor(Mm(x), Mm(self.y));
        self.layer.add_operation(show_text(text));
        self.layer.end_text_section();
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.ensure_space(size * 0.6);
        self.text_at(text, size, MARGIN, true);
        self.y -= size * 0.6;
    }

    fn line(&mut self, text: &str, size: f32) {
        self.ensure_space(size * 0.6);
        self.text_at(text, size, MARGIN, false);
        self.y -= size * 0.6;
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn fill_row(&self, color: [u8; 3]) {
        self.layer.set_fill_color(rgb(color));
        self.layer.add_rect(Rect::new(
            Mm(MARGIN),
            Mm(self.y - 2.0),
            Mm(PAGE_WIDTH - MARGIN),
            Mm(self.y + ROW_HEIGHT - 2.0),
        ));
    }

    fn table_header(&mut self, table: &Table, color: [u8; 3], col_width: f32, size: f32) {
        self.ensure_space(ROW_HEIGHT);
        self.fill_row(color);
        self.layer.set_fill_color(rgb([255, 255, 255]));
        for (i, title) in table.header.iter().enumerate() {
            let x = MARGIN + 1.0 + col_width * i as f32;
            self.text_at(&fit(title, col_width, size), size, x, true);
        }
        self.layer.set_fill_color(rgb([0, 0, 0]));
        self.y -= ROW_HEIGHT;
    }

    /// Tabela com colunas de largura igual; o cabeçalho se repete a cada
    /// página nova.
    fn table(&mut self, table: &Table, color: [u8; 3], size: f32) {
        let columns = table.header.len().max(1);
        let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;

        self.table_header(table, color, col_width, size);
        for row in &table.rows {
            if self.y - ROW_HEIGHT < MARGIN {
                self.new_page();
                self.table_header(table, color, col_width, size);
            }
            for (i, cell) in row.iter().enumerate() {
                let x = MARGIN + 1.0 + col_width * i as f32;
                self.text_at(&fit(&cell.display(), col_width, size), size, x, false);
            }
            self.y -= ROW_HEIGHT;
        }
    }

    fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Falha ao criar arquivo {}", path.display()))?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| anyhow!("{e:?}"))
            .with_context(|| format!("Falha ao gravar PDF {}", path.display()))
    }
}

/// As fontes embutidas usam WinAnsiEncoding: um byte por caractere.
fn show_text(text: &str) -> Operation {
    Operation::new(
        "Tj",
        vec![Object::String(win_ansi(text), StringFormat::Literal)],
    )
}

/// Converte para WinAnsi (Latin-1 mais os símbolos de 0x80..0x9F).
/// Caracteres fora da tabela viram `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Corta o texto para caber na coluna (estimativa por largura média de
/// caractere da Helvetica).
fn fit(text: &str, col_width: f32, size: f32) -> String {
    let char_width = size * 0.19;
    let max_chars = ((col_width - 2.0) / char_width).floor().max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    cut.push_str("..");
    cut
}

pub fn write_collaborators(report: &CollaboratorReport, path: &Path) -> Result<()> {
    let mut pdf = PdfWriter::new("Relatório de Colaboradores")?;
    pdf.heading("Relatório de Colaboradores", 20.0);
    pdf.gap(2.0);
    pdf.line(&format!("Data: {}", report.generated_on), 12.0);
    pdf.line(&format!("Total de Colaboradores: {}", report.total), 12.0);
    pdf.gap(4.0);

    pdf.table(&report.collaborators, COLLABORATORS_COLOR, 8.0);

    pdf.gap(10.0);
    pdf.heading("Estatísticas por Departamento:", 14.0);
    for row in &report.departments.rows {
        if let [dept, count] = row.as_slice() {
            pdf.line(
                &format!("{}: {} colaboradores", dept.display(), count.display()),
                10.0,
            );
        }
    }

    pdf.save(path)
}

pub fn write_activities(report: &ActivityReport, path: &Path) -> Result<()> {
    let mut pdf = PdfWriter::new("Relatório de Atividades")?;
    pdf.heading("Relatório de Atividades", 20.0);
    pdf.gap(2.0);
    pdf.line(&format!("Data: {}", report.generated_on), 12.0);
    pdf.line(&format!("Total de Atividades: {}", report.total), 12.0);
    pdf.gap(4.0);

    pdf.table(&report.summary, ACTIVITIES_COLOR, 8.0);

    pdf.gap(10.0);
    pdf.heading("Estatísticas por Status:", 14.0);
    for row in &report.by_status.rows {
        if let [status, count] = row.as_slice() {
            pdf.line(
                &format!("{}: {} atividades", status.display(), count.display()),
                10.0,
            );
        }
    }

    pdf.save(path)
}

pub fn write_full(report: &FullReport, path: &Path) -> Result<()> {
    let mut pdf = PdfWriter::new("Relatório Completo de Atividades")?;
    pdf.heading("Relatório Completo de Atividades", 24.0);
    pdf.gap(4.0);
    pdf.line(&format!("Período: {}", report.generated_on), 12.0);
    pdf.gap(6.0);

    let summary = &report.summary;
    pdf.heading("Resumo Executivo", 16.0);
    pdf.line(&format!("• Total de Colaboradores: {}", summary.total_collaborators), 12.0);
    pdf.line(&format!("• Total de Atividades: {}", summary.total_activities), 12.0);
    pdf.line(&format!("• Atividades Concluídas: {}", summary.completed), 12.0);
    pdf.line(&format!("• Taxa de Conclusão: {}%", summary.completion_rate), 12.0);
    pdf.gap(8.0);

    pdf.heading(&report.productivity.title, 16.0);
    pdf.table(&report.productivity, PRODUCTIVITY_COLOR, 10.0);

    pdf.new_page();
    pdf.heading(&report.overdue.title, 16.0);
    if report.overdue.is_empty() {
        pdf.line("Nenhuma atividade em atraso encontrada.", 12.0);
    } else {
        pdf.table(&report.overdue, OVERDUE_COLOR, 10.0);
    }

    pdf.save(path)
}
