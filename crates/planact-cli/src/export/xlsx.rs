use anyhow::{Context, Result};
use planact_core::report::{ActivityReport, Cell, CollaboratorReport, Table};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Uma aba por tabela, com o título da tabela como nome da aba.
fn write_workbook(tables: &[&Table], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for table in tables {
        let sheet = workbook.add_worksheet();
        fill_sheet(sheet, table, &bold)
            .with_context(|| format!("Falha ao montar a aba {}", table.title))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Falha ao gravar planilha {}", path.display()))?;
    Ok(())
}

fn fill_sheet(sheet: &mut Worksheet, table: &Table, bold: &Format) -> Result<()> {
    sheet.set_name(&table.title)?;

    for (col, title) in table.header.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, title, bold)?;
        sheet.set_column_width(col, 18)?;
    }

    for (row, cells) in table.rows.iter().enumerate() {
        let row = row as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => sheet.write_string(row, col, text)?,
                Cell::Number(n) => sheet.write_number(row, col, *n)?,
            };
        }
    }
    Ok(())
}

pub fn write_collaborators(report: &CollaboratorReport, path: &Path) -> Result<()> {
    write_workbook(&[&report.collaborators, &report.departments], path)
}

pub fn write_activities(report: &ActivityReport, path: &Path) -> Result<()> {
    write_workbook(
        &[&report.detailed, &report.by_status, &report.by_priority],
        path,
    )
}
