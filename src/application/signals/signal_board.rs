use super::signal_aggregator::SignalAggregator;
use crate::domain::signals::{IndicatorBundle, IndicatorKey, IndicatorStatus, StatusTag, VoteResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Indicator readings for one held security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySignals {
    pub security_id: String,
    #[serde(default)]
    pub weight: f64,
    pub bundle: IndicatorBundle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityVote {
    pub security_id: String,
    pub weight: f64,
    pub vote: VoteResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMember {
    pub security_id: String,
    pub weight: f64,
    /// Indicator value, only set inside per-indicator groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Securities sharing one status, in first-seen order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalGroup<S> {
    pub status: S,
    pub description: String,
    pub members: Vec<BoardMember>,
}

/// Portfolio-wide view of the signals: one vote per security, then the same
/// securities grouped by vote status and by each indicator's own status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBoard {
    pub votes: Vec<SecurityVote>,
    pub by_status: Vec<SignalGroup<StatusTag>>,
    pub by_indicator: BTreeMap<IndicatorKey, Vec<SignalGroup<IndicatorStatus>>>,
}

impl SignalBoard {
    pub fn build(aggregator: &SignalAggregator, securities: &[SecuritySignals]) -> Self {
        // par_iter keeps input order on collect
        let votes: Vec<SecurityVote> = securities
            .par_iter()
            .map(|security| SecurityVote {
                security_id: security.security_id.clone(),
                weight: security.weight,
                vote: aggregator.summarize_bundle(&security.bundle),
            })
            .collect();

        let mut by_status = Vec::new();
        for vote in &votes {
            push_member(
                &mut by_status,
                vote.vote.status,
                &vote.vote.description,
                BoardMember {
                    security_id: vote.security_id.clone(),
                    weight: vote.weight,
                    value: None,
                },
            );
        }

        let mut by_indicator: BTreeMap<IndicatorKey, Vec<SignalGroup<IndicatorStatus>>> =
            BTreeMap::new();
        for security in securities {
            for (key, reading) in security.bundle.readings() {
                let Some(status) = reading.status else {
                    continue;
                };
                push_member(
                    by_indicator.entry(*key).or_default(),
                    status,
                    &reading.recommendation.description,
                    BoardMember {
                        security_id: security.security_id.clone(),
                        weight: security.weight,
                        value: Some(reading.value),
                    },
                );
            }
        }

        info!(
            "SignalBoard: {} securities, {} status groups",
            votes.len(),
            by_status.len()
        );

        Self {
            votes,
            by_status,
            by_indicator,
        }
    }

    pub fn status_group(&self, status: StatusTag) -> Option<&SignalGroup<StatusTag>> {
        self.by_status.iter().find(|group| group.status == status)
    }

    pub fn indicator_groups(&self, key: IndicatorKey) -> &[SignalGroup<IndicatorStatus>] {
        self.by_indicator.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn push_member<S: Copy + PartialEq>(
    groups: &mut Vec<SignalGroup<S>>,
    status: S,
    description: &str,
    member: BoardMember,
) {
    match groups.iter_mut().find(|group| group.status == status) {
        Some(group) => group.members.push(member),
        None => groups.push(SignalGroup {
            status,
            description: description.to_string(),
            members: vec![member],
        }),
    }
}
