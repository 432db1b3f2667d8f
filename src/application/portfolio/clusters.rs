use crate::domain::portfolio::SecurityWeight;
use serde::Serialize;

/// Weight above which a holding counts as large (percent)
pub const LARGE_WEIGHT_PCT: f64 = 5.0;
/// Weight from which a holding counts as medium (percent)
pub const MEDIUM_WEIGHT_PCT: f64 = 1.0;

/// Holdings grouped by size, each group in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeightClusters {
    /// Above 5%
    pub large: Vec<SecurityWeight>,
    /// 1% to 5%
    pub medium: Vec<SecurityWeight>,
    /// Below 1%
    pub small: Vec<SecurityWeight>,
}

impl WeightClusters {
    pub fn len(&self) -> usize {
        self.large.len() + self.medium.len() + self.small.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn cluster_by_weight(securities: &[SecurityWeight]) -> WeightClusters {
    securities
        .iter()
        .fold(WeightClusters::default(), |mut clusters, sec| {
            if sec.weight > LARGE_WEIGHT_PCT {
                clusters.large.push(sec.clone());
            } else if sec.weight >= MEDIUM_WEIGHT_PCT {
                clusters.medium.push(sec.clone());
            } else {
                clusters.small.push(sec.clone());
            }
            clusters
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_boundaries() {
        let securities = vec![
            SecurityWeight::new("A", "A", 5.0),
            SecurityWeight::new("B", "B", 5.01),
            SecurityWeight::new("C", "C", 1.0),
            SecurityWeight::new("D", "D", 0.99),
        ];

        let clusters = cluster_by_weight(&securities);

        assert_eq!(clusters.large.len(), 1);
        assert_eq!(clusters.large[0].security_id, "B");
        let medium: Vec<&str> = clusters.medium.iter().map(|s| s.security_id.as_str()).collect();
        assert_eq!(medium, vec!["A", "C"]);
        assert_eq!(clusters.small[0].security_id, "D");
        assert_eq!(clusters.len(), 4);
    }
}
