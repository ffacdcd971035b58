//! Subcomandos do `planact` e seus handlers.

use crate::backend::controller::{ActivityController, CollaboratorController, DeleteOutcome};
use crate::backend::state::AppState;
use crate::export::{self, ExportFormat, ReportKind};
use crate::output;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use planact_core::report::{ActivityReport, CollaboratorReport, FullReport};
use planact_core::{ActivityDraft, ActivityFilter, CollaboratorDraft, Priority, Status};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

pub const COLLABORATOR_DELETE_PROMPT: &str = "Tem certeza que deseja excluir este colaborador? \
Todas as atividades associadas a ele podem ficar sem colaborador.";
pub const ACTIVITY_DELETE_PROMPT: &str = "Tem certeza que deseja excluir esta atividade?";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estatísticas do painel
    Dashboard,

    /// Cadastro de colaboradores
    #[command(subcommand)]
    Colaboradores(CollaboratorCommand),

    /// Cadastro de atividades
    #[command(subcommand)]
    Atividades(ActivityCommand),

    /// Exporta relatórios em PDF ou planilha
    #[command(subcommand)]
    Export(ExportCommand),
}

#[derive(Debug, Subcommand)]
pub enum CollaboratorCommand {
    /// Lista os colaboradores
    List,
    /// Cadastra um colaborador
    Add(CollaboratorFields),
    /// Altera campos de um colaborador
    Edit {
        id: String,
        #[command(flatten)]
        fields: CollaboratorFields,
    },
    /// Exclui um colaborador (as atividades dele não são excluídas)
    Remove {
        id: String,
        /// Não pede confirmação
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Lista as atividades, com filtros opcionais
    List(FilterArgs),
    /// Cadastra uma atividade
    Add(ActivityFields),
    /// Altera campos de uma atividade
    Edit {
        id: String,
        #[command(flatten)]
        fields: ActivityFields,
    },
    /// Exclui uma atividade
    Remove {
        id: String,
        /// Não pede confirmação
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Relatório de colaboradores
    Colaboradores {
        #[arg(long, value_enum)]
        formato: ExportFormat,
        /// Arquivo de saída (padrão: nome do relatório no diretório de exportação)
        #[arg(long)]
        saida: Option<PathBuf>,
    },
    /// Relatório de atividades (segue os filtros)
    Atividades {
        #[arg(long, value_enum)]
        formato: ExportFormat,
        #[arg(long)]
        saida: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Relatório completo em PDF
    Completo {
        #[arg(long)]
        saida: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct CollaboratorFields {
    #[arg(long)]
    pub nome: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telefone: Option<String>,
    #[arg(long)]
    pub cargo: Option<String>,
    #[arg(long)]
    pub departamento: Option<String>,
}

impl CollaboratorFields {
    /// Sobrescreve só os campos informados.
    pub fn apply(self, draft: &mut CollaboratorDraft) {
        if let Some(v) = self.nome {
            draft.name = v;
        }
        if let Some(v) = self.email {
            draft.email = v;
        }
        if let Some(v) = self.telefone {
            draft.phone = v;
        }
        if let Some(v) = self.cargo {
            draft.role = v;
        }
        if let Some(v) = self.departamento {
            draft.department = v;
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ActivityFields {
    #[arg(long)]
    pub titulo: Option<String>,
    #[arg(long)]
    pub descricao: Option<String>,
    /// Id do colaborador responsável
    #[arg(long)]
    pub colaborador: Option<String>,
    /// pendente, em-andamento, concluida ou cancelada
    #[arg(long, value_parser = str::parse::<Status>)]
    pub status: Option<Status>,
    /// baixa, media ou alta
    #[arg(long, value_parser = str::parse::<Priority>)]
    pub prioridade: Option<Priority>,
    /// Duração em horas
    #[arg(long)]
    pub duracao: Option<f64>,
    /// Prazo (AAAA-MM-DD)
    #[arg(long)]
    pub prazo: Option<String>,
}

impl ActivityFields {
    pub fn apply(self, draft: &mut ActivityDraft) {
        if let Some(v) = self.titulo {
            draft.title = v;
        }
        if let Some(v) = self.descricao {
            draft.description = v;
        }
        if let Some(v) = self.colaborador {
            draft.collaborator_id = v;
        }
        if let Some(v) = self.status {
            draft.status = v;
        }
        if let Some(v) = self.prioridade {
            draft.priority = v;
        }
        if let Some(v) = self.duracao {
            draft.duration = v;
        }
        if let Some(v) = self.prazo {
            draft.due_date = v;
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Id do colaborador
    #[arg(long)]
    pub colaborador: Option<String>,
    #[arg(long, value_parser = str::parse::<Status>)]
    pub status: Option<Status>,
    #[arg(long, value_parser = str::parse::<Priority>)]
    pub prioridade: Option<Priority>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ActivityFilter {
        let mut filter = ActivityFilter::new();
        if let Some(id) = &self.colaborador {
            filter = filter.collaborator(id.as_str());
        }
        if let Some(status) = &self.status {
            filter = filter.status(status.clone());
        }
        if let Some(priority) = &self.prioridade {
            filter = filter.priority(priority.clone());
        }
        filter
    }
}

/// Opções globais que afetam a saída.
#[derive(Debug, Clone)]
pub struct Options {
    pub json: bool,
    pub export_dir: PathBuf,
}

pub fn run(command: Command, state: &mut AppState, options: &Options) -> Result<()> {
    match command {
        Command::Dashboard => dashboard(state, options),
        Command::Colaboradores(cmd) => collaborators(cmd, state, options),
        Command::Atividades(cmd) => activities(cmd, state, options),
        Command::Export(cmd) => export_report(cmd, state, options),
    }
}

fn dashboard(state: &AppState, options: &Options) -> Result<()> {
    let stats = state.stats(Utc::now());
    if options.json {
        return output::print_json(&stats);
    }
    print!("{}", output::render_dashboard(&stats));
    Ok(())
}

fn collaborators(cmd: CollaboratorCommand, state: &mut AppState, options: &Options) -> Result<()> {
    let mut controller = CollaboratorController::new();

    match cmd {
        CollaboratorCommand::List => {
            if options.json {
                return output::print_json(&state.cache.collaborators);
            }
            print!(
                "{}",
                output::render_collaborators(&state.cache.collaborators, &state.cache.activities)
            );
        }
        CollaboratorCommand::Add(fields) => {
            fields.apply(controller.open_new());
            controller.save(state)?;
            println!("Colaborador cadastrado.");
        }
        CollaboratorCommand::Edit { id, fields } => {
            fields.apply(controller.open_edit(state, &id)?);
            controller.save(state)?;
            println!("Colaborador {id} atualizado.");
        }
        CollaboratorCommand::Remove { id, yes } => {
            let confirmed = yes || confirm(COLLABORATOR_DELETE_PROMPT, &mut io::stdin().lock())?;
            match controller.delete(state, &id, confirmed)? {
                DeleteOutcome::Declined => println!("Exclusão cancelada."),
                DeleteOutcome::Deleted { orphaned } => {
                    println!("Colaborador {id} excluído.");
                    if orphaned > 0 {
                        println!("Aviso: {orphaned} atividade(s) ficaram sem colaborador.");
                    }
                }
            }
        }
    }
    Ok(())
}

fn activities(cmd: ActivityCommand, state: &mut AppState, options: &Options) -> Result<()> {
    let mut controller = ActivityController::new();

    match cmd {
        ActivityCommand::List(filter) => {
            let visible = state.filtered(&filter.to_filter());
            if options.json {
                return output::print_json(&visible);
            }
            print!(
                "{}",
                output::render_activities(&visible, &state.cache.collaborators)
            );
        }
        ActivityCommand::Add(fields) => {
            ensure_collaborator(state, fields.colaborador.as_deref())?;
            fields.apply(controller.open_new());
            controller.save(state)?;
            println!("Atividade cadastrada.");
        }
        ActivityCommand::Edit { id, fields } => {
            ensure_collaborator(state, fields.colaborador.as_deref())?;
            fields.apply(controller.open_edit(state, &id)?);
            controller.save(state)?;
            println!("Atividade {id} atualizada.");
        }
        ActivityCommand::Remove { id, yes } => {
            let confirmed = yes || confirm(ACTIVITY_DELETE_PROMPT, &mut io::stdin().lock())?;
            match controller.delete(state, &id, confirmed)? {
                DeleteOutcome::Declined => println!("Exclusão cancelada."),
                DeleteOutcome::Deleted { .. } => println!("Atividade {id} excluída."),
            }
        }
    }
    Ok(())
}

/// O responsável precisa ser um colaborador conhecido.
fn ensure_collaborator(state: &AppState, id: Option<&str>) -> Result<()> {
    match id {
        Some(id) if !id.trim().is_empty() && state.cache.collaborator(id).is_none() => {
            bail!("Colaborador '{id}' não encontrado")
        }
        _ => Ok(()),
    }
}

fn export_report(cmd: ExportCommand, state: &AppState, options: &Options) -> Result<()> {
    let now = Utc::now();
    let cache = &state.cache;

    let path = match cmd {
        ExportCommand::Colaboradores { formato, saida } => {
            let path = export::output_path(
                saida.as_deref(),
                &options.export_dir,
                ReportKind::Collaborators,
                formato,
            );
            let report = CollaboratorReport::build(&cache.collaborators, &cache.activities, now);
            match formato {
                ExportFormat::Pdf => export::pdf::write_collaborators(&report, &path)?,
                ExportFormat::Xlsx => export::xlsx::write_collaborators(&report, &path)?,
            }
            path
        }
        ExportCommand::Atividades {
            formato,
            saida,
            filter,
        } => {
            let path = export::output_path(
                saida.as_deref(),
                &options.export_dir,
                ReportKind::Activities,
                formato,
            );
            let visible = state.filtered(&filter.to_filter());
            let report =
                ActivityReport::build(&visible, &cache.activities, &cache.collaborators, now);
            match formato {
                ExportFormat::Pdf => export::pdf::write_activities(&report, &path)?,
                ExportFormat::Xlsx => export::xlsx::write_activities(&report, &path)?,
            }
            path
        }
        ExportCommand::Completo { saida } => {
            let path = export::output_path(
                saida.as_deref(),
                &options.export_dir,
                ReportKind::Full,
                ExportFormat::Pdf,
            );
            let report = FullReport::build(&cache.collaborators, &cache.activities, now);
            export::pdf::write_full(&report, &path)?;
            path
        }
    };

    info!(path = %path.display(), "relatório exportado");
    println!("Relatório gravado em {}", path.display());
    Ok(())
}

/// Pergunta sim/não; só `s` ou `sim` confirmam.
pub fn confirm(prompt: &str, input: &mut impl BufRead) -> Result<bool> {
    print!("{prompt} [s/N] ");
    io::stdout().flush().context("Falha ao escrever no terminal")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Falha ao ler a confirmação")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "s" | "sim")
}
