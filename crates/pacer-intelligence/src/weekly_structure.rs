// ABOUTME: Assigns each weekday a slot (long, quality, easy, rest) from athlete preferences
// ABOUTME: Always yields seven entries; running assignments win over requested rest days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a weekday is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// Weekly long run
    Long,
    /// Quality session
    Quality,
    /// Easy run
    Easy,
    /// No running
    Rest,
}

impl SlotKind {
    /// Long and quality days
    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::Long | Self::Quality)
    }

    /// Any day with a run
    #[must_use]
    pub const fn is_running(self) -> bool {
        !matches!(self, Self::Rest)
    }
}

/// Weekday preferences the structure is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructurePreferences {
    /// Running days per week, clamped to 1..=7
    pub runs_per_week: u8,
    /// Day of the long run
    pub long_run_day: Weekday,
    /// Preferred quality days, in priority order
    #[serde(default)]
    pub quality_days: Vec<Weekday>,
    /// Requested rest days (best effort)
    #[serde(default)]
    pub rest_days: Vec<Weekday>,
    /// Quality sessions wanted per week
    pub quality_sessions_per_week: u8,
}

impl Default for StructurePreferences {
    fn default() -> Self {
        Self {
            runs_per_week: 5,
            long_run_day: Weekday::Sun,
            quality_days: vec![Weekday::Tue, Weekday::Thu],
            rest_days: vec![Weekday::Mon],
            quality_sessions_per_week: 2,
        }
    }
}

/// Seven slots indexed Monday through Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyStructure {
    /// Slot per weekday, Monday first
    pub slots: [SlotKind; 7],
}

impl WeeklyStructure {
    /// Slot for a weekday
    #[must_use]
    pub fn slot(&self, day: Weekday) -> SlotKind {
        self.slots[day.num_days_from_monday() as usize]
    }

    /// Weekdays holding a slot kind, Monday first
    #[must_use]
    pub fn days_of(&self, kind: SlotKind) -> Vec<Weekday> {
        self.iter()
            .filter(|(_, slot)| *slot == kind)
            .map(|(day, _)| day)
            .collect()
    }

    /// Number of running days
    #[must_use]
    pub fn running_days(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_running()).count()
    }

    /// `(weekday, slot)` pairs, Monday first
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, SlotKind)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (weekday_at(index), *slot))
    }
}

/// Offsets after the long run tried when placing quality days automatically
const AUTO_QUALITY_OFFSETS: [usize; 4] = [2, 4, 3, 5];

fn weekday_at(index: usize) -> Weekday {
    Weekday::try_from((index % 7) as u8).unwrap_or(Weekday::Mon)
}

fn index_of(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Build the weekly slot map
///
/// The long run is fixed first. Requested quality days follow, up to the
/// session count and skipping the long-run day; missing sessions are placed
/// automatically away from the long run. Easy days fill the remaining running
/// days, preferring days not adjacent to a hard day. Requested rest days are
/// never filled with easy or auto-placed runs, but lose to explicit
/// long/quality requests. Every unassigned day is rest.
#[must_use]
pub fn create_weekly_structure(preferences: &StructurePreferences) -> WeeklyStructure {
    let runs = usize::from(preferences.runs_per_week.clamp(1, 7));
    let quality_target = usize::from(preferences.quality_sessions_per_week).min(runs - 1);
    let long_index = index_of(preferences.long_run_day);
    let is_rest_request =
        |index: usize| preferences.rest_days.iter().any(|day| index_of(*day) == index);

    let mut slots: [Option<SlotKind>; 7] = [None; 7];
    slots[long_index] = Some(SlotKind::Long);

    let mut quality_placed = 0;
    for day in &preferences.quality_days {
        let index = index_of(*day);
        if quality_placed < quality_target && slots[index].is_none() {
            slots[index] = Some(SlotKind::Quality);
            quality_placed += 1;
        }
    }

    let auto_candidates = AUTO_QUALITY_OFFSETS
        .iter()
        .chain([1_usize, 6].iter())
        .map(|offset| (long_index + offset) % 7);
    for index in auto_candidates {
        if quality_placed >= quality_target {
            break;
        }
        if slots[index].is_none() && !is_rest_request(index) {
            slots[index] = Some(SlotKind::Quality);
            quality_placed += 1;
        }
    }

    let mut running = 1 + quality_placed;
    let adjacent_to_hard = |slots: &[Option<SlotKind>; 7], index: usize| {
        [(index + 6) % 7, (index + 1) % 7]
            .iter()
            .any(|neighbor| slots[*neighbor].is_some_and(SlotKind::is_hard))
    };
    let open: Vec<usize> = (0..7)
        .filter(|index| slots[*index].is_none() && !is_rest_request(*index))
        .collect();
    let (relaxed, adjacent): (Vec<usize>, Vec<usize>) = open
        .into_iter()
        .partition(|index| !adjacent_to_hard(&slots, *index));

    for index in relaxed.into_iter().chain(adjacent) {
        if running >= runs {
            break;
        }
        slots[index] = Some(SlotKind::Easy);
        running += 1;
    }

    let structure = WeeklyStructure {
        slots: slots.map(|slot| slot.unwrap_or(SlotKind::Rest)),
    };

    debug!(
        requested_runs = runs,
        running_days = structure.running_days(),
        quality_days = quality_placed,
        "Built weekly structure"
    );

    structure
}
