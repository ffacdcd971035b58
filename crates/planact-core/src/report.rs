//! Montagem das tabelas dos relatórios exportados.
//!
//! Os exportadores (PDF, planilha) recebem só tabelas planas já calculadas;
//! nenhuma regra de negócio vive neles.

use crate::dates::{format_br, today_br};
use crate::model::{collaborator_name, Activity, Collaborator, Status};
use crate::stats::{
    activity_count_for, activity_days_overdue, collaborator_productivity, completed_count,
    completion_rate_precise, department_counts, overdue_activities, priority_distribution,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Texto exibido no PDF / terminal.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Tabela plana: título (nome da aba na planilha), cabeçalho e linhas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(title: &str, header: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Relatório de colaboradores.
#[derive(Debug, Clone, Serialize)]
pub struct CollaboratorReport {
    pub generated_on: String,
    pub total: usize,
    pub collaborators: Table,
    pub departments: Table,
}

impl CollaboratorReport {
    pub fn build(
        collaborators: &[Collaborator],
        activities: &[Activity],
        now: DateTime<Utc>,
    ) -> Self {
        let mut table = Table::new(
            "Colaboradores",
            &["Nome", "Cargo", "Departamento", "Email", "Telefone", "Atividades"],
        );
        for c in collaborators {
            table.push(vec![
                c.name.as_str().into(),
                c.role.as_str().into(),
                c.department.as_str().into(),
                c.email.as_str().into(),
                c.phone.as_str().into(),
                activity_count_for(&c.id, activities).into(),
            ]);
        }

        let mut departments = Table::new("Estatísticas", &["Departamento", "Quantidade"]);
        for (dept, count) in department_counts(collaborators) {
            departments.push(vec![dept.into(), count.into()]);
        }

        Self {
            generated_on: today_br(now),
            total: collaborators.len(),
            collaborators: table,
            departments,
        }
    }
}

/// Relatório de atividades: a listagem segue os filtros, as estatísticas
/// usam a coleção inteira.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub generated_on: String,
    /// Quantidade de atividades na visão filtrada
    pub total: usize,
    /// Colunas resumidas usadas no PDF
    pub summary: Table,
    /// Colunas completas usadas na planilha
    pub detailed: Table,
    pub by_status: Table,
    pub by_priority: Table,
}

impl ActivityReport {
    pub fn build(
        filtered: &[&Activity],
        all: &[Activity],
        collaborators: &[Collaborator],
        now: DateTime<Utc>,
    ) -> Self {
        let mut summary = Table::new(
            "Atividades",
            &["Atividade", "Colaborador", "Status", "Prioridade", "Duração", "Prazo"],
        );
        let mut detailed = Table::new(
            "Atividades",
            &[
                "Título",
                "Descrição",
                "Colaborador",
                "Status",
                "Prioridade",
                "Duração (h)",
                "Prazo",
            ],
        );

        for a in filtered {
            let owner = collaborator_name(collaborators, &a.collaborator_id);
            summary.push(vec![
                a.title.as_str().into(),
                owner.into(),
                a.status.label().into(),
                a.priority.label().into(),
                format!("{}h", Cell::Number(a.duration).display()).into(),
                format_br(&a.due_date).into(),
            ]);
            detailed.push(vec![
                a.title.as_str().into(),
                a.description.as_str().into(),
                owner.into(),
                a.status.label().into(),
                a.priority.label().into(),
                Cell::Number(a.duration),
                format_br(&a.due_date).into(),
            ]);
        }

        let mut by_status = Table::new("Status", &["Status", "Quantidade"]);
        for status in Status::ALL.iter() {
            let count = all.iter().filter(|a| &a.status == status).count();
            by_status.push(vec![status.label().into(), count.into()]);
        }

        let mut by_priority = Table::new("Prioridades", &["Prioridade", "Quantidade"]);
        for entry in priority_distribution(all) {
            by_priority.push(vec![entry.priority.label().into(), entry.count.into()]);
        }

        Self {
            generated_on: today_br(now),
            total: filtered.len(),
            summary,
            detailed,
            by_status,
            by_priority,
        }
    }
}

/// Resumo executivo do relatório completo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub total_collaborators: usize,
    pub total_activities: usize,
    pub completed: usize,
    /// Taxa com uma casa decimal
    pub completion_rate: String,
}

/// Relatório completo: resumo, produtividade e atividades em atraso.
#[derive(Debug, Clone, Serialize)]
pub struct FullReport {
    pub generated_on: String,
    pub summary: ExecutiveSummary,
    pub productivity: Table,
    pub overdue: Table,
}

impl FullReport {
    pub fn build(
        collaborators: &[Collaborator],
        activities: &[Activity],
        now: DateTime<Utc>,
    ) -> Self {
        let summary = ExecutiveSummary {
            total_collaborators: collaborators.len(),
            total_activities: activities.len(),
            completed: completed_count(activities),
            completion_rate: completion_rate_precise(activities),
        };

        let mut productivity = Table::new(
            "Produtividade por Colaborador",
            &["Colaborador", "Departamento", "Total", "Concluídas", "Taxa"],
        );
        for row in collaborator_productivity(collaborators, activities) {
            productivity.push(vec![
                row.name.into(),
                row.department.into(),
                row.total.into(),
                row.completed.into(),
                format!("{}%", row.rate).into(),
            ]);
        }

        let mut overdue = Table::new(
            "Atividades em Atraso",
            &["Atividade", "Colaborador", "Status", "Prazo", "Atraso"],
        );
        for a in overdue_activities(activities, now) {
            let days = activity_days_overdue(a, now).unwrap_or_default();
            overdue.push(vec![
                a.title.as_str().into(),
                collaborator_name(collaborators, &a.collaborator_id).into(),
                a.status.label().into(),
                format_br(&a.due_date).into(),
                format!("{days} dias").into(),
            ]);
        }

        Self {
            generated_on: today_br(now),
            summary,
            productivity,
            overdue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ActivityFilter;
    use crate::model::Priority;
    use crate::stats::fixtures::{activity, collaborator};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn dataset() -> (Vec<Collaborator>, Vec<Activity>) {
        let collaborators = vec![
            collaborator("1", "Ana Silva", "Tecnologia"),
            collaborator("2", "Carlos Santos", "Gestão"),
        ];
        let mut login = activity("a", "1", Status::InProgress, "2024-05-30");
        login.title = "Desenvolver interface de login".to_string();
        login.priority = Priority::High;
        login.duration = 8.0;
        let mut meeting = activity("b", "2", Status::Completed, "2024-05-01");
        meeting.duration = 1.5;
        let orphan = activity("c", "99", Status::Pending, "2024-07-01");
        (collaborators, vec![login, meeting, orphan])
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(8.0).display(), "8");
        assert_eq!(Cell::Number(1.5).display(), "1.5");
        assert_eq!(Cell::text("x").display(), "x");
    }

    #[test]
    fn test_collaborator_report() {
        let (collaborators, activities) = dataset();
        let report = CollaboratorReport::build(&collaborators, &activities, now());

        assert_eq!(report.generated_on, "01/06/2024");
        assert_eq!(report.total, 2);
        assert_eq!(report.collaborators.header.len(), 6);
        assert_eq!(report.collaborators.rows[0][5], Cell::Number(1.0));
        assert_eq!(report.departments.rows.len(), 2);
    }

    #[test]
    fn test_activity_report_uses_filtered_rows_and_full_stats() {
        let (collaborators, activities) = dataset();
        let filter = ActivityFilter::new().priority(Priority::High);
        let filtered = filter.apply(&activities);

        let report = ActivityReport::build(&filtered, &activities, &collaborators, now());
        assert_eq!(report.total, 1);
        assert_eq!(report.summary.rows.len(), 1);

        let row = &report.summary.rows[0];
        assert_eq!(row[1], Cell::text("Ana Silva"));
        assert_eq!(row[2], Cell::text("Em Andamento"));
        assert_eq!(row[4], Cell::text("8h"));
        assert_eq!(row[5], Cell::text("30/05/2024"));

        // estatísticas por status cobrem todas as atividades
        let status_total: f64 = report
            .by_status
            .rows
            .iter()
            .map(|r| match r[1] {
                Cell::Number(n) => n,
                _ => 0.0,
            })
            .sum();
        assert_eq!(status_total, 3.0);
    }

    #[test]
    fn test_orphaned_activity_shows_not_found_label() {
        let (collaborators, activities) = dataset();
        let all = ActivityFilter::new().apply(&activities);
        let report = ActivityReport::build(&all, &activities, &collaborators, now());
        assert_eq!(report.detailed.rows[2][2], Cell::text("N/A"));
    }

    #[test]
    fn test_full_report() {
        let (collaborators, activities) = dataset();
        let report = FullReport::build(&collaborators, &activities, now());

        assert_eq!(report.summary.total_activities, 3);
        assert_eq!(report.summary.completed, 1);
        assert_eq!(report.summary.completion_rate, "33.3");

        assert_eq!(report.productivity.rows[0][4], Cell::text("0.0%"));
        assert_eq!(report.productivity.rows[1][4], Cell::text("100.0%"));

        assert_eq!(report.overdue.rows.len(), 1);
        assert_eq!(report.overdue.rows[0][4], Cell::text("3 dias"));
    }

    #[test]
    fn test_full_report_without_overdue() {
        let (collaborators, _) = dataset();
        let report = FullReport::build(&collaborators, &[], now());
        assert!(report.overdue.is_empty());
        assert_eq!(report.summary.completion_rate, "0");
    }
}
