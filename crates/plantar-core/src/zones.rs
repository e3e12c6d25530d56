use serde::{Deserialize, Serialize};

pub const ZONES_PER_FOOT: usize = 6;

/// Per-foot zone readings in kPa, indexed by [`FootZone::index`].
pub type ZoneReadings = [f64; ZONES_PER_FOOT];

/// Anatomical sub-regions of one insole sensor array, in wire order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FootZone {
    HeelMedial,
    HeelLateral,
    Midfoot,
    ForefootLateral,
    ForefootMedial,
    Toe,
}

impl FootZone {
    pub const ALL: [FootZone; ZONES_PER_FOOT] = [
        FootZone::HeelMedial,
        FootZone::HeelLateral,
        FootZone::Midfoot,
        FootZone::ForefootLateral,
        FootZone::ForefootMedial,
        FootZone::Toe,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            FootZone::HeelMedial => "medial heel",
            FootZone::HeelLateral => "lateral heel",
            FootZone::Midfoot => "midfoot",
            FootZone::ForefootLateral => "lateral forefoot",
            FootZone::ForefootMedial => "medial forefoot",
            FootZone::Toe => "toe",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    pub fn label(self) -> &'static str {
        match self {
            Foot::Left => "left foot",
            Foot::Right => "right foot",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PressureSummary {
    pub max: f64,
    pub avg: f64,
}

impl PressureSummary {
    pub fn from_feet(left: &ZoneReadings, right: &ZoneReadings) -> Self {
        let all = left.iter().chain(right.iter()).copied();
        let max = all.clone().fold(f64::NEG_INFINITY, f64::max);
        let avg = all.sum::<f64>() / (2 * ZONES_PER_FOOT) as f64;
        Self { max, avg }
    }
}

/// Both insoles at one instant plus their derived aggregates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PressureFrame {
    pub left: ZoneReadings,
    pub right: ZoneReadings,
    pub summary: PressureSummary,
}

impl PressureFrame {
    pub fn new(left: ZoneReadings, right: ZoneReadings) -> Self {
        let summary = PressureSummary::from_feet(&left, &right);
        Self {
            left,
            right,
            summary,
        }
    }

    pub fn foot(&self, foot: Foot) -> &ZoneReadings {
        match foot {
            Foot::Left => &self.left,
            Foot::Right => &self.right,
        }
    }

    pub fn zone(&self, foot: Foot, zone: FootZone) -> f64 {
        self.foot(foot)[zone.index()]
    }
}
