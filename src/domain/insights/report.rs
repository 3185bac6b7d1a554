//! Aggregation of completed reviews over a period.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use super::Period;
use crate::domain::calendar::week_start;
use crate::domain::review::{DeliverableStatus, Review};

/// Entries kept in each free-text list.
const TOP_N: usize = 5;
/// Highlights kept per person.
const HIGHLIGHTS_PER_PERSON: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSupport {
    pub person: String,
    /// Reviews in which this person appeared.
    pub count: u32,
    /// Most recent asks, newest first.
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverableSummary {
    pub name: String,
    pub status: DeliverableStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightReport {
    pub period: Period,
    pub reviews_completed: u32,
    /// Weeks of the period that have started by today.
    pub reviews_total: u32,
    pub avg_duration_minutes: Option<u32>,
    pub big_three_set: u32,
    pub team_support: Vec<PersonSupport>,
    pub family_support: Vec<PersonSupport>,
    pub deliverables: Vec<DeliverableSummary>,
    pub side_project_highlights: Vec<String>,
    pub top_wins: Vec<String>,
    pub top_challenges: Vec<String>,
    pub one_changes: Vec<String>,
}

impl InsightReport {
    /// A review belongs to the period containing its week start. Only
    /// completed reviews contribute.
    pub fn compute(reviews: &[Review], period: Period, today: NaiveDate) -> Self {
        let mut included: Vec<&Review> = reviews
            .iter()
            .filter(|r| r.is_completed() && period.contains(r.week().week_start))
            .collect();
        included.sort_by(|a, b| b.week().week_start.cmp(&a.week().week_start));

        let reviews_completed = included.len() as u32;
        let avg_duration_minutes = (!included.is_empty()).then(|| {
            let total: u64 = included.iter().map(|r| r.time_spent_seconds()).sum();
            ((total as f64 / included.len() as f64) / 60.0).round() as u32
        });

        let big_three_set = included
            .iter()
            .flat_map(|r| r.draft().look_ahead.big_three.iter())
            .filter(|p| !p.trim().is_empty())
            .count() as u32;

        let team_support = tally_people(included.iter().map(|r| {
            r.draft()
                .commitments
                .team_commitments
                .iter()
                .map(|c| (c.person.as_str(), c.commitment.as_str()))
                .collect::<Vec<_>>()
        }));
        let family_support = tally_people(included.iter().map(|r| {
            r.draft()
                .commitments
                .family_commitments
                .iter()
                .map(|c| (c.person.as_str(), c.need.as_str()))
                .collect::<Vec<_>>()
        }));

        let mut deliverables: Vec<DeliverableSummary> = Vec::new();
        for review in &included {
            for d in &review.draft().commitments.deliverables {
                let name = d.name.trim();
                if name.is_empty() || deliverables.iter().any(|s| s.name.eq_ignore_ascii_case(name)) {
                    continue;
                }
                deliverables.push(DeliverableSummary {
                    name: name.to_string(),
                    status: d.status,
                });
            }
        }

        let texts = |pick: fn(&Review) -> &str| -> Vec<String> {
            included
                .iter()
                .map(|r| pick(r).trim())
                .filter(|t| !t.is_empty())
                .take(TOP_N)
                .map(String::from)
                .collect()
        };

        Self {
            reviews_completed,
            reviews_total: elapsed_weeks(&period, today),
            avg_duration_minutes,
            big_three_set,
            team_support,
            family_support,
            deliverables,
            side_project_highlights: texts(|r| r.draft().commitments.side_project_notes.as_str()),
            top_wins: texts(|r| r.draft().reflection.what_worked.as_str()),
            top_challenges: texts(|r| r.draft().reflection.what_didnt.as_str()),
            one_changes: texts(|r| r.draft().reflection.one_change.as_str()),
            period,
        }
    }
}

/// Week starts inside the period up to and including the current week.
fn elapsed_weeks(period: &Period, today: NaiveDate) -> u32 {
    let current = week_start(today);
    let mut week = week_start(period.start);
    if week < period.start {
        week = week + Duration::weeks(1);
    }
    let mut count = 0;
    while week <= period.end && week <= current {
        count += 1;
        week = week + Duration::weeks(1);
    }
    count
}

/// Groups (person, ask) rows by person, newest review first. People are
/// matched case-insensitively and keep the spelling first seen.
fn tally_people<'a, I>(per_review: I) -> Vec<PersonSupport>
where
    I: Iterator<Item = Vec<(&'a str, &'a str)>>,
{
    let mut order: Vec<PersonSupport> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for rows in per_review {
        let mut seen_in_review: Vec<usize> = Vec::new();
        for (person, ask) in rows {
            let person = person.trim();
            if person.is_empty() {
                continue;
            }
            let slot = *index.entry(person.to_lowercase()).or_insert_with(|| {
                order.push(PersonSupport {
                    person: person.to_string(),
                    count: 0,
                    highlights: Vec::new(),
                });
                order.len() - 1
            });
            let entry = &mut order[slot];
            if !seen_in_review.contains(&slot) {
                entry.count += 1;
                seen_in_review.push(slot);
            }
            let ask = ask.trim();
            if !ask.is_empty() && entry.highlights.len() < HIGHLIGHTS_PER_PERSON {
                entry.highlights.push(ask.to_string());
            }
        }
    }

    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}
