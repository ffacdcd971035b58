//! Estatísticas derivadas do painel.
//!
//! Funções puras sobre as coleções em memória. O "agora" é sempre recebido
//! como parâmetro: o número de atividades em atraso só vale para o instante
//! em que foi calculado.

use crate::dates::{days_overdue, parse_due_date};
use crate::model::{Activity, Collaborator, Priority, Status};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Percentual arredondado; 0 quando o total é zero.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

fn count_status(activities: &[Activity], status: &Status) -> usize {
    activities.iter().filter(|a| &a.status == status).count()
}

pub fn completed_count(activities: &[Activity]) -> usize {
    count_status(activities, &Status::Completed)
}

/// Taxa de conclusão inteira em [0, 100].
pub fn completion_rate(activities: &[Activity]) -> u32 {
    percentage(completed_count(activities), activities.len())
}

/// Taxa de conclusão com uma casa decimal (`"0"` sem atividades).
pub fn completion_rate_precise(activities: &[Activity]) -> String {
    one_decimal_rate(completed_count(activities), activities.len())
}

fn one_decimal_rate(completed: usize, total: usize) -> String {
    if total == 0 {
        return "0".to_string();
    }
    // Meio arredonda para cima (6.25 -> 6.3), não para o par.
    let rate = completed as f64 / total as f64 * 100.0;
    format!("{:.1}", (rate * 10.0).round() / 10.0)
}

/// Prazo estritamente anterior a `now` e status não terminal.
pub fn is_overdue(activity: &Activity, now: DateTime<Utc>) -> bool {
    if activity.status.is_done() {
        return false;
    }
    parse_due_date(&activity.due_date).is_some_and(|due| due < now)
}

pub fn overdue_activities(activities: &[Activity], now: DateTime<Utc>) -> Vec<&Activity> {
    activities.iter().filter(|a| is_overdue(a, now)).collect()
}

pub fn overdue_count(activities: &[Activity], now: DateTime<Utc>) -> usize {
    activities.iter().filter(|a| is_overdue(a, now)).count()
}

/// Dias de atraso de uma atividade, se o prazo for válido.
pub fn activity_days_overdue(activity: &Activity, now: DateTime<Utc>) -> Option<i64> {
    parse_due_date(&activity.due_date).map(|due| days_overdue(due, now))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: Status,
    pub count: usize,
    pub percentage: u32,
}

/// Contagem e percentual por status, na ordem de `Status::ALL`.
///
/// Cada percentual é arredondado isoladamente, então a soma pode não dar
/// exatamente 100. Status desconhecidos entram no total mas em nenhuma faixa.
pub fn status_distribution(activities: &[Activity]) -> Vec<StatusShare> {
    let total = activities.len();
    Status::ALL
        .iter()
        .map(|status| {
            let count = count_status(activities, status);
            StatusShare {
                status: status.clone(),
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

pub fn priority_distribution(activities: &[Activity]) -> Vec<PriorityCount> {
    Priority::ALL
        .iter()
        .map(|priority| PriorityCount {
            priority: priority.clone(),
            count: activities.iter().filter(|a| &a.priority == priority).count(),
        })
        .collect()
}

/// Colaboradores por departamento, na ordem em que cada departamento aparece.
pub fn department_counts(collaborators: &[Collaborator]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for collaborator in collaborators {
        match counts
            .iter_mut()
            .find(|(dept, _)| *dept == collaborator.department)
        {
            Some((_, n)) => *n += 1,
            None => counts.push((collaborator.department.clone(), 1)),
        }
    }
    counts
}

pub fn activity_count_for(collaborator_id: &str, activities: &[Activity]) -> usize {
    activities
        .iter()
        .filter(|a| a.collaborator_id == collaborator_id)
        .count()
}

/// Produtividade de um colaborador (usada no relatório completo).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollaboratorProductivity {
    pub collaborator_id: String,
    pub name: String,
    pub department: String,
    pub total: usize,
    pub completed: usize,
    /// Percentual com uma casa decimal, `"0"` sem atividades
    pub rate: String,
}

pub fn collaborator_productivity(
    collaborators: &[Collaborator],
    activities: &[Activity],
) -> Vec<CollaboratorProductivity> {
    collaborators
        .iter()
        .map(|collaborator| {
            let assigned: Vec<&Activity> = activities
                .iter()
                .filter(|a| a.collaborator_id == collaborator.id)
                .collect();
            let completed = assigned
                .iter()
                .filter(|a| a.status == Status::Completed)
                .count();

            CollaboratorProductivity {
                collaborator_id: collaborator.id.clone(),
                name: collaborator.name.clone(),
                department: collaborator.department.clone(),
                total: assigned.len(),
                completed,
                rate: one_decimal_rate(completed, assigned.len()),
            }
        })
        .collect()
}

/// Resumo do painel recalculado a cada exibição.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_collaborators: usize,
    pub total_activities: usize,
    pub completion_rate: u32,
    pub overdue: usize,
    pub status_distribution: Vec<StatusShare>,
}

impl DashboardStats {
    pub fn compute(
        collaborators: &[Collaborator],
        activities: &[Activity],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            total_collaborators: collaborators.len(),
            total_activities: activities.len(),
            completion_rate: completion_rate(activities),
            overdue: overdue_count(activities, now),
            status_distribution: status_distribution(activities),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{Activity, Collaborator, Priority, Status};

    pub fn collaborator(id: &str, name: &str, department: &str) -> Collaborator {
        Collaborator {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@empresa.com", id),
            phone: String::new(),
            role: "Analista".to_string(),
            department: department.to_string(),
        }
    }

    pub fn activity(id: &str, collaborator_id: &str, status: Status, due_date: &str) -> Activity {
        Activity {
            id: id.to_string(),
            title: format!("Atividade {}", id),
            description: String::new(),
            collaborator_id: collaborator_id.to_string(),
            status,
            priority: Priority::Medium,
            duration: 1.0,
            due_date: due_date.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{activity, collaborator};
    use super::*;

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_completion_rate_empty_is_zero() {
        assert_eq!(completion_rate(&[]), 0);
        assert_eq!(completion_rate_precise(&[]), "0");
    }

    #[test]
    fn test_completion_rate_three_of_four() {
        let activities = vec![
            activity("1", "a", Status::Completed, ""),
            activity("2", "a", Status::Completed, ""),
            activity("3", "a", Status::Completed, ""),
            activity("4", "a", Status::Pending, ""),
        ];
        assert_eq!(completion_rate(&activities), 75);
        assert_eq!(completion_rate_precise(&activities), "75.0");
    }

    #[test]
    fn test_completion_rate_stays_in_range() {
        let statuses = [
            Status::Completed,
            Status::Pending,
            Status::Canceled,
            Status::InProgress,
            Status::Other("x".to_string()),
        ];
        for n in 1..=statuses.len() {
            let activities: Vec<Activity> = statuses[..n]
                .iter()
                .enumerate()
                .map(|(i, s)| activity(&i.to_string(), "a", s.clone(), ""))
                .collect();
            let rate = completion_rate(&activities);
            assert!(rate <= 100, "taxa fora do intervalo: {rate}");
        }

        let all_done = vec![activity("1", "a", Status::Completed, "")];
        assert_eq!(completion_rate(&all_done), 100);
    }

    #[test]
    fn test_overdue_scenario() {
        let now = at("2024-06-01T00:00:00Z");
        let pending = vec![activity("1", "a", Status::Pending, "2024-01-01")];
        assert_eq!(overdue_count(&pending, now), 1);

        let completed = vec![activity("1", "a", Status::Completed, "2024-01-01")];
        assert_eq!(overdue_count(&completed, now), 0);
    }

    #[test]
    fn test_overdue_excludes_done_and_future() {
        let now = at("2024-06-01T00:00:00Z");
        let activities = vec![
            activity("1", "a", Status::Pending, "2024-01-01"),
            activity("2", "a", Status::InProgress, "2024-05-31"),
            activity("3", "a", Status::Canceled, "2024-01-01"),
            activity("4", "a", Status::Completed, "2023-01-01"),
            activity("5", "a", Status::Pending, "2024-12-31"),
            activity("6", "a", Status::Pending, ""),
            activity("7", "a", Status::Pending, "sem prazo"),
        ];

        let overdue: Vec<&str> = overdue_activities(&activities, now)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(overdue, vec!["1", "2"]);
    }

    #[test]
    fn test_overdue_is_strictly_before_now() {
        let now = at("2024-06-01T00:00:00Z");
        let activities = vec![activity("1", "a", Status::Pending, "2024-06-01")];
        assert_eq!(overdue_count(&activities, now), 0);
    }

    #[test]
    fn test_status_distribution() {
        let activities = vec![
            activity("1", "a", Status::Pending, ""),
            activity("2", "a", Status::InProgress, ""),
            activity("3", "a", Status::Completed, ""),
        ];

        let dist = status_distribution(&activities);
        assert_eq!(dist.len(), 4);
        assert_eq!(dist[0].status, Status::Pending);
        assert_eq!(dist[0].count, 1);
        assert_eq!(dist[0].percentage, 33);
        assert_eq!(dist[3].status, Status::Canceled);
        assert_eq!(dist[3].percentage, 0);

        // arredondamento independente: 33 + 33 + 33 + 0
        let sum: u32 = dist.iter().map(|s| s.percentage).sum();
        assert_eq!(sum, 99);
    }

    #[test]
    fn test_status_distribution_empty() {
        let dist = status_distribution(&[]);
        assert!(dist.iter().all(|s| s.count == 0 && s.percentage == 0));
    }

    #[test]
    fn test_priority_and_department_counts() {
        let mut high = activity("1", "a", Status::Pending, "");
        high.priority = Priority::High;
        let activities = vec![high, activity("2", "a", Status::Pending, "")];

        let priorities = priority_distribution(&activities);
        assert_eq!(priorities[0].count, 0);
        assert_eq!(priorities[1].count, 1);
        assert_eq!(priorities[2].count, 1);

        let collaborators = vec![
            collaborator("1", "Ana", "Tecnologia"),
            collaborator("2", "Carlos", "Gestão"),
            collaborator("3", "Bia", "Tecnologia"),
        ];
        assert_eq!(
            department_counts(&collaborators),
            vec![("Tecnologia".to_string(), 2), ("Gestão".to_string(), 1)]
        );
    }

    #[test]
    fn test_collaborator_productivity() {
        let collaborators = vec![
            collaborator("a", "Ana", "Tecnologia"),
            collaborator("b", "Bruno", "Gestão"),
        ];
        let activities = vec![
            activity("1", "a", Status::Completed, ""),
            activity("2", "a", Status::Completed, ""),
            activity("3", "a", Status::Pending, ""),
        ];

        let rows = collaborator_productivity(&collaborators, &activities);
        assert_eq!(rows[0].total, 3);
        assert_eq!(rows[0].completed, 2);
        assert_eq!(rows[0].rate, "66.7");
        assert_eq!(rows[1].total, 0);
        assert_eq!(rows[1].rate, "0");

        // 1 de 16 concluída: 6.25% vira 6.3
        let mut many: Vec<Activity> = (0..15)
            .map(|i| activity(&i.to_string(), "b", Status::Pending, ""))
            .collect();
        many.push(activity("15", "b", Status::Completed, ""));
        let rows = collaborator_productivity(&collaborators, &many);
        assert_eq!(rows[1].rate, "6.3");
    }

    #[test]
    fn test_one_decimal_rate_rounds_half_up() {
        assert_eq!(one_decimal_rate(1, 16), "6.3");
        assert_eq!(one_decimal_rate(1, 80), "1.3");
        assert_eq!(one_decimal_rate(1, 400), "0.3");
        assert_eq!(one_decimal_rate(2, 3), "66.7");
        assert_eq!(one_decimal_rate(4, 4), "100.0");
    }

    #[test]
    fn test_dashboard_is_idempotent() {
        let now = at("2024-06-01T00:00:00Z");
        let collaborators = vec![collaborator("a", "Ana", "Tecnologia")];
        let activities = vec![
            activity("1", "a", Status::Completed, "2024-01-01"),
            activity("2", "a", Status::Pending, "2024-01-01"),
        ];

        let first = DashboardStats::compute(&collaborators, &activities, now);
        let second = DashboardStats::compute(&collaborators, &activities.clone(), now);
        assert_eq!(first, second);
        assert_eq!(first.total_collaborators, 1);
        assert_eq!(first.total_activities, 2);
        assert_eq!(first.completion_rate, 50);
        assert_eq!(first.overdue, 1);
    }
}
