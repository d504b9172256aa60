//! Default prefab handle tables used when a config does not supply its own.

pub mod keys {
    pub const ITEM_HEALING_SALVE: &str = "item_healing_salve";
    pub const ITEM_FOREST_BERRIES: &str = "item_forest_berries";
    pub const ITEM_RUSTED_LANTERN: &str = "item_rusted_lantern";
    pub const ITEM_BONE_CHARM: &str = "item_bone_charm";

    pub const ENEMY_THORN_WOLF: &str = "enemy_thorn_wolf";
    pub const ENEMY_ROT_SHAMBLER: &str = "enemy_rot_shambler";
    pub const ENEMY_HOLLOW_STAG: &str = "enemy_hollow_stag";

    pub const TREE_BIRCH: &str = "tree_birch";
    pub const TREE_GNARLED_OAK: &str = "tree_gnarled_oak";
    pub const TREE_DEAD_PINE: &str = "tree_dead_pine";

    pub const NPC_MERCHANT: &str = "npc_merchant";
    pub const NPC_WOUNDED_KNIGHT: &str = "npc_wounded_knight";
    pub const ALTAR_SACRIFICIAL: &str = "altar_sacrificial";
}

pub fn default_item_prefabs() -> Vec<String> {
    vec![
        keys::ITEM_HEALING_SALVE.to_string(),
        keys::ITEM_FOREST_BERRIES.to_string(),
        keys::ITEM_RUSTED_LANTERN.to_string(),
        keys::ITEM_BONE_CHARM.to_string(),
    ]
}

pub fn default_enemy_prefabs() -> Vec<String> {
    vec![
        keys::ENEMY_THORN_WOLF.to_string(),
        keys::ENEMY_ROT_SHAMBLER.to_string(),
        keys::ENEMY_HOLLOW_STAG.to_string(),
    ]
}

pub fn default_tree_prefabs() -> Vec<String> {
    vec![
        keys::TREE_BIRCH.to_string(),
        keys::TREE_GNARLED_OAK.to_string(),
        keys::TREE_DEAD_PINE.to_string(),
    ]
}
