//! Saída em texto para o terminal (ou JSON com `--json`).

use anyhow::{Context, Result};
use planact_core::dates::format_br;
use planact_core::{collaborator_name, Activity, Collaborator, DashboardStats, Tone};
use serde::Serialize;
use std::io::{self, IsTerminal};

/// Imprime um valor como JSON indentado.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Falha ao serializar saída JSON")?;
    println!("{text}");
    Ok(())
}

fn tone_code(tone: Tone) -> &'static str {
    match tone {
        Tone::Warning => "33",
        Tone::Info => "34",
        Tone::Success => "32",
        Tone::Danger => "31",
        Tone::Neutral => "90",
    }
}

/// Selo colorido quando stdout é um terminal.
fn badge(label: &str, tone: Tone, color: bool) -> String {
    if color {
        format!("\x1b[{}m{label}\x1b[0m", tone_code(tone))
    } else {
        label.to_string()
    }
}

fn use_color() -> bool {
    io::stdout().is_terminal()
}

pub fn render_dashboard(stats: &DashboardStats) -> String {
    let mut out = String::new();
    out.push_str("Painel PlanAct\n");
    out.push_str(&format!("  Colaboradores:     {}\n", stats.total_collaborators));
    out.push_str(&format!("  Atividades:        {}\n", stats.total_activities));
    out.push_str(&format!("  Taxa de conclusão: {}%\n", stats.completion_rate));
    out.push_str(&format!("  Em atraso:         {}\n", stats.overdue));
    out.push_str("\nDistribuição por status\n");
    for share in &stats.status_distribution {
        out.push_str(&format!(
            "  {:<14} {:>4} ({}%)\n",
            share.status.label(),
            share.count,
            share.percentage
        ));
    }
    out
}

pub fn render_collaborators(collaborators: &[Collaborator], activities: &[Activity]) -> String {
    if collaborators.is_empty() {
        return "Nenhum colaborador cadastrado.\n".to_string();
    }

    let mut out = String::new();
    for c in collaborators {
        let count = planact_core::stats::activity_count_for(&c.id, activities);
        out.push_str(&format!(
            "- {:<26} {} | {} | {} | {} atividade(s)  [{}]\n",
            c.name, c.role, c.department, c.email, count, c.id
        ));
    }
    out
}

fn render_activities_with(
    activities: &[&Activity],
    collaborators: &[Collaborator],
    color: bool,
) -> String {
    if activities.is_empty() {
        return "Nenhuma atividade encontrada.\n".to_string();
    }

    let mut out = String::new();
    for a in activities {
        out.push_str(&format!(
            "- {:<32} {} | {} | {} | {}h | prazo {}  [{}]\n",
            a.title,
            collaborator_name(collaborators, &a.collaborator_id),
            badge(a.status.label(), a.status.tone(), color),
            badge(a.priority.label(), a.priority.tone(), color),
            a.duration,
            format_br(&a.due_date),
            a.id
        ));
    }
    out
}

pub fn render_activities(activities: &[&Activity], collaborators: &[Collaborator]) -> String {
    render_activities_with(activities, collaborators, use_color())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use planact_core::{Priority, Status};

    fn sample() -> (Vec<Collaborator>, Vec<Activity>) {
        let collaborators = vec![Collaborator {
            id: "c1".to_string(),
            name: "Ana Silva".to_string(),
            email: "ana@empresa.com".to_string(),
            phone: String::new(),
            role: "Dev".to_string(),
            department: "Tecnologia".to_string(),
        }];
        let activities = vec![Activity {
            id: "a1".to_string(),
            title: "Revisar contrato".to_string(),
            description: String::new(),
            collaborator_id: "sumiu".to_string(),
            status: Status::Completed,
            priority: Priority::High,
            duration: 2.5,
            due_date: "2024-03-05".to_string(),
        }];
        (collaborators, activities)
    }

    #[test]
    fn test_dashboard_lists_every_status() {
        let (collaborators, activities) = sample();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let text = render_dashboard(&DashboardStats::compute(&collaborators, &activities, now));

        assert!(text.contains("Taxa de conclusão: 100%"));
        for label in ["Pendente", "Em Andamento", "Concluída", "Cancelada"] {
            assert!(text.contains(label), "faltou {label}");
        }
    }

    #[test]
    fn test_activity_line_without_color() {
        let (collaborators, activities) = sample();
        let refs: Vec<&Activity> = activities.iter().collect();
        let text = render_activities_with(&refs, &collaborators, false);

        assert!(text.contains("N/A | Concluída | Alta | 2.5h | prazo 05/03/2024"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_badge_color() {
        assert_eq!(badge("Alta", Tone::Danger, true), "\x1b[31mAlta\x1b[0m");
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(render_collaborators(&[], &[]), "Nenhum colaborador cadastrado.\n");
        assert_eq!(
            render_activities_with(&[], &[], false),
            "Nenhuma atividade encontrada.\n"
        );
    }
}
