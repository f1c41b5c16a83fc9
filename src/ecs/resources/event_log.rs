use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use serde::Serialize;

use crate::model::EventKind;

/// One journal entry. `index` is assigned by the log and strictly increases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverworldEvent {
    pub index: u64,
    pub tick: u64,
    pub kind: EventKind,
    pub entity: Option<u64>,
    pub description: String,
    pub data: serde_json::Value,
}

/// Gameplay journal for one session. Recording never fails.
#[derive(Resource, Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<OverworldEvent>,
    pub start_tick: u64,
    next_index: u64,
    record: Option<SessionRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        kind: EventKind,
        tick: u64,
        entity: Option<Entity>,
        description: impl Into<String>,
        data: serde_json::Value,
    ) {
        self.next_index += 1;
        self.events.push(OverworldEvent {
            index: self.next_index,
            tick,
            kind,
            entity: entity.map(Entity::to_bits),
            description: description.into(),
            data,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &OverworldEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Close the session and keep the resulting record on the log.
    pub fn finalize(&mut self, outcome: &str, reason: &str, final_tick: u64) -> &SessionRecord {
        let record = SessionRecord {
            start_tick: self.start_tick,
            final_tick,
            total_ticks: final_tick.saturating_sub(self.start_tick),
            outcome: outcome.to_string(),
            outcome_reason: reason.to_string(),
            threat_summary: ThreatSummary::from_events(&self.events),
            faction_summary: FactionSummary::from_events(&self.events),
            events: self.events.clone(),
        };
        self.record.insert(record)
    }

    pub fn session_record(&self) -> Option<&SessionRecord> {
        self.record.as_ref()
    }

}

/// Finalized session, ready for whatever export the caller wants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub start_tick: u64,
    pub final_tick: u64,
    pub total_ticks: u64,
    pub outcome: String,
    pub outcome_reason: String,
    pub events: Vec<OverworldEvent>,
    pub threat_summary: ThreatSummary,
    pub faction_summary: FactionSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreatSummary {
    pub spawned: usize,
    pub evolved: usize,
    pub destroyed: usize,
    pub spawn_failures: usize,
    pub peak_intensity: i64,
    pub spawned_by_type: BTreeMap<String, usize>,
}

impl ThreatSummary {
    fn from_events(events: &[OverworldEvent]) -> Self {
        let mut summary = Self::default();
        for event in events.iter().filter(|e| e.kind.is_threat_event()) {
            match event.kind {
                EventKind::ThreatSpawned => {
                    summary.spawned += 1;
                    if let Some(t) = event.data.get("threat_type").and_then(|v| v.as_str()) {
                        *summary.spawned_by_type.entry(t.to_string()).or_default() += 1;
                    }
                }
                EventKind::ThreatEvolved => summary.evolved += 1,
                EventKind::ThreatDestroyed => summary.destroyed += 1,
                EventKind::ThreatSpawnFailed => summary.spawn_failures += 1,
                _ => {}
            }
            if let Some(i) = event.data.get("intensity").and_then(|v| v.as_i64()) {
                summary.peak_intensity = summary.peak_intensity.max(i);
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FactionSummary {
    pub expansions: usize,
    pub fortifications: usize,
    pub retreats: usize,
    pub raids: usize,
    pub garrison_attacks: usize,
    pub intent_changes: usize,
    pub captures: usize,
}

impl FactionSummary {
    fn from_events(events: &[OverworldEvent]) -> Self {
        let mut summary = Self::default();
        for event in events.iter().filter(|e| e.kind.is_faction_event()) {
            match event.kind {
                EventKind::FactionExpanded => summary.expansions += 1,
                EventKind::FactionFortified => summary.fortifications += 1,
                EventKind::FactionRetreated => summary.retreats += 1,
                EventKind::FactionRaid => summary.raids += 1,
                EventKind::GarrisonAttacked => summary.garrison_attacks += 1,
                EventKind::FactionIntentChanged => summary.intent_changes += 1,
                EventKind::NodeCaptured => summary.captures += 1,
                _ => {}
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn indices_increase_in_insertion_order() {
        let mut log = EventLog::new();
        log.record(EventKind::ThreatSpawned, 1, None, "a", json!({}));
        log.record(EventKind::ThreatEvolved, 1, None, "b", json!({}));
        log.record(EventKind::FactionExpanded, 2, None, "c", json!({}));
        let indices: Vec<u64> = log.events.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(log.events[1].description, "b");
    }

    #[test]
    fn finalize_summarizes_session() {
        let mut log = EventLog::new();
        log.record(
            EventKind::ThreatSpawned,
            1,
            None,
            "spawn",
            json!({ "threat_type": "necromancer", "intensity": 2 }),
        );
        log.record(
            EventKind::ThreatEvolved,
            4,
            None,
            "evolve",
            json!({ "old_intensity": 2, "intensity": 3 }),
        );
        log.record(EventKind::FactionExpanded, 5, None, "grow", json!({}));
        log.record(EventKind::FactionRaid, 6, None, "raid", json!({}));
        log.record(EventKind::NodeCaptured, 7, None, "captured", json!({}));

        let record = log.finalize("Victory", "all threats eliminated", 9).clone();
        assert_eq!(record.total_ticks, 9);
        assert_eq!(record.events.len(), 5);
        assert_eq!(record.threat_summary.spawned, 1);
        assert_eq!(record.threat_summary.evolved, 1);
        assert_eq!(record.threat_summary.peak_intensity, 3);
        assert_eq!(record.threat_summary.spawned_by_type["necromancer"], 1);
        assert_eq!(record.faction_summary.expansions, 1);
        assert_eq!(record.faction_summary.raids, 1);
        assert_eq!(record.faction_summary.captures, 1);
        assert_eq!(log.session_record(), Some(&record));

        let exported = serde_json::to_value(&record).unwrap();
        assert_eq!(exported["events"][0]["kind"], "threat_spawned");
    }
}
