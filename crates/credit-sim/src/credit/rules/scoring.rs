use serde::{Deserialize, Serialize};

use super::super::domain::Tier;

/// Direction of a cascading band table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cutoff {
    /// Value must be at least the band threshold; thresholds descend.
    AtLeast,
    /// Value must be at most the band threshold; thresholds ascend.
    AtMost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub threshold: f64,
    pub points: u16,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fallback {
    pub points: u16,
    pub label: String,
}

/// Ordered cutoffs evaluated top-down; the first band the value satisfies wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub cutoff: Cutoff,
    pub bands: Vec<Band>,
    pub fallback: Fallback,
}

impl BandTable {
    pub fn award(&self, value: f64) -> (&str, u16) {
        self.bands
            .iter()
            .find(|band| match self.cutoff {
                Cutoff::AtLeast => value >= band.threshold,
                Cutoff::AtMost => value <= band.threshold,
            })
            .map(|band| (band.label.as_str(), band.points))
            .unwrap_or((self.fallback.label.as_str(), self.fallback.points))
    }

    pub fn max_points(&self) -> u16 {
        self.bands
            .iter()
            .map(|band| band.points)
            .fold(self.fallback.points, u16::max)
    }

    /// Thresholds strictly move away from the best band and awards never increase.
    pub fn is_ordered(&self) -> bool {
        let thresholds_ok = self.bands.windows(2).all(|pair| match self.cutoff {
            Cutoff::AtLeast => pair[0].threshold > pair[1].threshold,
            Cutoff::AtMost => pair[0].threshold < pair[1].threshold,
        });
        let points_ok = self
            .bands
            .windows(2)
            .all(|pair| pair[0].points >= pair[1].points)
            && self
                .bands
                .last()
                .into_iter()
                .all(|band| band.points >= self.fallback.points);
        thresholds_ok && points_ok
    }

    fn at_least(bands: &[(f64, u16, &str)], fallback: (u16, &str)) -> Self {
        Self::build(Cutoff::AtLeast, bands, fallback)
    }

    fn at_most(bands: &[(f64, u16, &str)], fallback: (u16, &str)) -> Self {
        Self::build(Cutoff::AtMost, bands, fallback)
    }

    fn build(cutoff: Cutoff, bands: &[(f64, u16, &str)], fallback: (u16, &str)) -> Self {
        Self {
            cutoff,
            bands: bands
                .iter()
                .map(|(threshold, points, label)| Band {
                    threshold: *threshold,
                    points: *points,
                    label: (*label).to_string(),
                })
                .collect(),
            fallback: Fallback {
                points: fallback.0,
                label: fallback.1.to_string(),
            },
        }
    }
}

/// Inclusive age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn contains(self, age: u8) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBracket {
    pub ranges: Vec<AgeRange>,
    pub points: u16,
    pub label: String,
}

/// Bell-shaped age scoring: a central sweet spot tapering outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBrackets {
    pub brackets: Vec<AgeBracket>,
    pub fallback: Fallback,
}

impl AgeBrackets {
    pub fn award(&self, age: u8) -> (&str, u16) {
        self.brackets
            .iter()
            .find(|bracket| bracket.ranges.iter().any(|range| range.contains(age)))
            .map(|bracket| (bracket.label.as_str(), bracket.points))
            .unwrap_or((self.fallback.label.as_str(), self.fallback.points))
    }

    pub fn max_points(&self) -> u16 {
        self.brackets
            .iter()
            .map(|bracket| bracket.points)
            .fold(self.fallback.points, u16::max)
    }

    pub fn is_ordered(&self) -> bool {
        self.brackets
            .windows(2)
            .all(|pair| pair[0].points >= pair[1].points)
            && self
                .brackets
                .last()
                .into_iter()
                .all(|bracket| bracket.points >= self.fallback.points)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierFloor {
    pub tier: Tier,
    pub min_score: u16,
}

/// Weighted factor bands plus the score-to-tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringModel {
    pub credit_score: BandTable,
    pub monthly_income: BandTable,
    pub tenure_months: BandTable,
    pub age: AgeBrackets,
    pub debt_to_income: BandTable,
    /// Descending by `min_score`; scores below the last floor are `REJECTED`.
    pub tier_floors: Vec<TierFloor>,
}

impl ScoringModel {
    pub fn tier_for(&self, score: u16) -> Tier {
        self.tier_floors
            .iter()
            .find(|floor| score >= floor.min_score)
            .map(|floor| floor.tier)
            .unwrap_or(Tier::Rejected)
    }

    /// Highest total the bands can award, saturating at `u16::MAX`.
    pub fn max_score(&self) -> u16 {
        [
            self.credit_score.max_points(),
            self.monthly_income.max_points(),
            self.tenure_months.max_points(),
            self.age.max_points(),
            self.debt_to_income.max_points(),
        ]
        .into_iter()
        .fold(0u16, u16::saturating_add)
    }
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self {
            credit_score: BandTable::at_least(
                &[
                    (800.0, 40, "Excellent credit score (800+)"),
                    (750.0, 35, "Very good credit score (750-799)"),
                    (700.0, 30, "Good credit score (700-749)"),
                    (650.0, 20, "Fair credit score (650-699)"),
                    (600.0, 10, "Low credit score (600-649)"),
                ],
                (5, "Very low credit score (<600)"),
            ),
            monthly_income: BandTable::at_least(
                &[
                    (50_000.0, 25, "High income (50k+)"),
                    (30_000.0, 20, "Good income (30k-50k)"),
                    (20_000.0, 15, "Medium income (20k-30k)"),
                    (15_000.0, 10, "Basic income (15k-20k)"),
                ],
                (2, "Low income (<15k)"),
            ),
            tenure_months: BandTable::at_least(
                &[
                    (60.0, 15, "Excellent tenure (60+ months)"),
                    (36.0, 12, "Good tenure (36-59 months)"),
                    (24.0, 10, "Fair tenure (24-35 months)"),
                    (12.0, 7, "Minimum tenure (12-23 months)"),
                ],
                (2, "Insufficient tenure (<12 months)"),
            ),
            age: AgeBrackets {
                brackets: vec![
                    AgeBracket {
                        ranges: vec![AgeRange { min: 35, max: 50 }],
                        points: 10,
                        label: "Optimal age (35-50)".to_string(),
                    },
                    AgeBracket {
                        ranges: vec![AgeRange { min: 25, max: 34 }, AgeRange { min: 51, max: 60 }],
                        points: 8,
                        label: "Favorable age (25-34, 51-60)".to_string(),
                    },
                    AgeBracket {
                        ranges: vec![AgeRange { min: 18, max: 24 }, AgeRange { min: 61, max: 65 }],
                        points: 5,
                        label: "Acceptable age (18-24, 61-65)".to_string(),
                    },
                ],
                fallback: Fallback {
                    points: 1,
                    label: "Risk age".to_string(),
                },
            },
            debt_to_income: BandTable::at_most(
                &[
                    (0.10, 10, "Very low indebtedness (<=10%)"),
                    (0.20, 8, "Low indebtedness (10-20%)"),
                    (0.30, 6, "Moderate indebtedness (20-30%)"),
                    (0.35, 3, "High indebtedness (30-35%)"),
                ],
                (1, "Excessive indebtedness (>35%)"),
            ),
            tier_floors: vec![
                TierFloor { tier: Tier::Aaa, min_score: 85 },
                TierFloor { tier: Tier::Aa, min_score: 75 },
                TierFloor { tier: Tier::A, min_score: 65 },
                TierFloor { tier: Tier::Bbb, min_score: 55 },
                TierFloor { tier: Tier::Bb, min_score: 45 },
                TierFloor { tier: Tier::B, min_score: 35 },
            ],
        }
    }
}
