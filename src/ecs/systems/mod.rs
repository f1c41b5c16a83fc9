pub(crate) mod helpers;

pub mod factions;
pub mod influence;
pub mod nodes;
pub mod queries;
pub mod scoring;
pub mod threats;
pub mod victory;

pub use factions::{
    FactionsPlugin, PendingRaid, SpawnOutcome, abandon_territory, create_faction,
    evaluate_faction_intent, execute_faction_intent, execute_raid, expand_territory,
    fortify_territory, is_tile_owned_by_any_faction, run_faction_ai, spawn_threat_for_faction,
    update_factions,
};
pub use influence::{
    InfluencePlugin, net_modifier, resolve_influence, update_influence_interactions,
};
pub use nodes::{create_player_node, transfer_node_ownership};
pub use queries::*;
pub use scoring::{
    choose_intent, score_expansion, score_fortification, score_raiding, score_retreat,
};
pub use threats::{
    ThreatsPlugin, apply_containment, contain_threats, create_threat_node, destroy_threat_node,
    evolve_threat_node, grow_threats, spawn_child_threat_node, spread_corruption,
    update_threat_nodes,
};
pub use victory::{
    DefeatCheck, check_player_defeat, check_victory_condition, has_player_defeated_faction_type,
    has_player_eliminated_all_threats, init_victory_state, victory_progress,
};
