//! Exportação dos relatórios para PDF e planilha.
//!
//! As tabelas chegam prontas de `planact_core::report`; aqui só há layout.

pub mod pdf;
pub mod xlsx;

use clap::ValueEnum;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Relatórios disponíveis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Collaborators,
    Activities,
    Full,
}

impl ReportKind {
    fn stem(self) -> &'static str {
        match self {
            ReportKind::Collaborators => "relatorio-colaboradores",
            ReportKind::Activities => "relatorio-atividades",
            ReportKind::Full => "relatorio-completo",
        }
    }

    pub fn file_name(self, format: ExportFormat) -> String {
        format!("{}.{}", self.stem(), format.extension())
    }
}

/// Caminho de saída: o informado pelo usuário ou o nome padrão dentro do
/// diretório de exportação.
pub fn output_path(
    explicit: Option<&Path>,
    export_dir: &Path,
    kind: ReportKind,
    format: ExportFormat,
) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => export_dir.join(kind.file_name(format)),
    }
}
