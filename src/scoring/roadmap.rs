//! Roadmap ordering: band buckets, severity sort, dependency-aware topo.

use super::gaps::{Band, Gap};
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Order gaps into a remediation roadmap.
///
/// Gaps are bucketed by band (quick wins, medium, long-term), sorted within
/// each bucket by severity descending then minimum time ascending, and then
/// reordered so that a gap's dependencies in the same bucket come before it.
/// Dependencies on items outside the bucket (different band, no gap at all)
/// impose no ordering. Dependency cycles are broken by skipping the closing
/// edge, so the result always contains every input gap exactly once.
#[must_use]
pub fn prioritise(gaps: &[Gap]) -> Vec<Gap> {
    let mut roadmap = Vec::with_capacity(gaps.len());
    for band in Band::ORDER {
        let mut bucket: Vec<&Gap> = gaps.iter().filter(|gap| gap.band == band).collect();
        bucket.sort_by(|a, b| {
            b.severity_score
                .total_cmp(&a.severity_score)
                .then(a.effort.time.min.total_cmp(&b.effort.time.min))
        });
        roadmap.extend(order_bucket(&bucket).into_iter().cloned());
    }
    roadmap
}

/// Dependency-first ordering within one bucket, preserving the priority sort
/// as the tie-breaker via iteration order.
fn order_bucket<'a>(bucket: &[&'a Gap]) -> Vec<&'a Gap> {
    let index_of: HashMap<&str, usize> = bucket
        .iter()
        .enumerate()
        .map(|(index, gap)| (gap.id.as_str(), index))
        .collect();
    let adjacency: Vec<Vec<usize>> = bucket
        .iter()
        .map(|gap| {
            gap.dependencies
                .iter()
                .filter_map(|dep| index_of.get(dep.as_str()).copied())
                .collect()
        })
        .collect();

    let mut state = vec![VisitState::Unvisited; bucket.len()];
    let mut ordered = Vec::with_capacity(bucket.len());
    for start in 0..bucket.len() {
        if state[start] != VisitState::Unvisited {
            continue;
        }
        // Iterative DFS, emitting each node after its dependencies
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        state[start] = VisitState::InProgress;
        while let Some(&mut (node, ref mut next)) = stack.last_mut() {
            if let Some(&dep) = adjacency[node].get(*next) {
                *next += 1;
                match state[dep] {
                    VisitState::Unvisited => {
                        state[dep] = VisitState::InProgress;
                        stack.push((dep, 0));
                    }
                    VisitState::InProgress => {
                        tracing::debug!(
                            from = %bucket[node].id,
                            to = %bucket[dep].id,
                            "dependency cycle in roadmap, edge ignored"
                        );
                    }
                    VisitState::Done => {}
                }
            } else {
                state[node] = VisitState::Done;
                ordered.push(bucket[node]);
                stack.pop();
            }
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Effort, Evidence, TimeRange};
    use crate::scoring::SeverityLabel;

    fn gap(id: &str, severity: f64, time_min: f64, deps: &[&str]) -> Gap {
        let (band, severity_label) = if severity >= 6.0 {
            (Band::QuickWin, SeverityLabel::Critical)
        } else if severity >= 3.0 {
            (Band::QuickWin, SeverityLabel::High)
        } else if severity >= 1.5 {
            (Band::Medium, SeverityLabel::Medium)
        } else {
            (Band::LongTerm, SeverityLabel::Low)
        };
        Gap {
            id: id.to_string(),
            title: format!("Control {id}"),
            description: String::new(),
            action: String::new(),
            theme: "Technology".to_string(),
            severity_score: severity,
            band,
            severity_label,
            effort: Effort {
                tech: 1.0,
                people: 1.0,
                time: TimeRange {
                    min: time_min,
                    max: time_min + 1.0,
                },
            },
            dependencies: deps.iter().map(ToString::to_string).collect(),
            fraction_gap: 1.0,
            notes: String::new(),
            evidence: Vec::<Evidence>::new(),
        }
    }

    fn ids(roadmap: &[Gap]) -> Vec<&str> {
        roadmap.iter().map(|gap| gap.id.as_str()).collect()
    }

    #[test]
    fn test_bands_keep_fixed_order() {
        let gaps = vec![gap("LOW", 1.0, 1.0, &[]), gap("MED", 2.0, 1.0, &[]), gap("HIGH", 7.0, 1.0, &[])];
        assert_eq!(ids(&prioritise(&gaps)), ["HIGH", "MED", "LOW"]);
    }

    #[test]
    fn test_severity_then_time_within_band() {
        let gaps = vec![
            gap("A", 4.0, 3.0, &[]),
            gap("B", 5.0, 1.0, &[]),
            gap("C", 4.0, 1.0, &[]),
        ];
        assert_eq!(ids(&prioritise(&gaps)), ["B", "C", "A"]);
    }

    #[test]
    fn test_dependency_pulls_ahead_within_band() {
        // C outranks A on severity but depends on it
        let gaps = vec![gap("A", 4.0, 1.0, &["X"]), gap("C", 6.5, 1.0, &["A"])];
        assert_eq!(ids(&prioritise(&gaps)), ["A", "C"]);
    }

    #[test]
    fn test_cross_band_dependency_is_ignored() {
        // B is long-term; A's dependency on it cannot reorder across bands
        let gaps = vec![gap("A", 7.0, 1.0, &["B"]), gap("B", 1.0, 1.0, &[])];
        assert_eq!(ids(&prioritise(&gaps)), ["A", "B"]);
    }

    #[test]
    fn test_cycle_is_broken_silently() {
        let gaps = vec![
            gap("A", 5.0, 1.0, &["B"]),
            gap("B", 4.0, 1.0, &["C"]),
            gap("C", 3.5, 1.0, &["A"]),
        ];
        let roadmap = prioritise(&gaps);
        assert_eq!(roadmap.len(), 3);
        let order = ids(&roadmap);
        // Every gap appears exactly once despite the cycle
        for id in ["A", "B", "C"] {
            assert_eq!(order.iter().filter(|&&g| g == id).count(), 1);
        }
    }

    #[test]
    fn test_diamond_dependencies() {
        let gaps = vec![
            gap("D", 7.0, 1.0, &["B", "C"]),
            gap("B", 5.0, 1.0, &["A"]),
            gap("C", 4.0, 1.0, &["A"]),
            gap("A", 3.0, 1.0, &[]),
        ];
        let roadmap = prioritise(&gaps);
        let order = ids(&roadmap);
        let position = |id: &str| order.iter().position(|&g| g == id).unwrap();
        assert!(position("A") < position("B"));
        assert!(position("A") < position("C"));
        assert!(position("B") < position("D"));
        assert!(position("C") < position("D"));
    }

    #[test]
    fn test_empty_input() {
        assert!(prioritise(&[]).is_empty());
    }
}
