//! Core game state - owns the simulation data.

use crate::config::GameConfig;
use crate::stats::Stat;
use crate::systems::character::CharacterSystem;
use crate::systems::combat::CombatConfig;
use crate::systems::difficulty::DifficultySystem;
use crate::systems::experience::LevelSystem;
use crate::systems::items::ItemSystem;
use crate::systems::modifiers::ModifierSystem;
use crate::systems::player::{self, PlayerVitals};
use crate::systems::spawn_controller::SpawnController;
use crate::systems::upgrades::UpgradeSystem;
use crate::systems::weapons::WeaponSystem;

use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Core game state - owns all simulation data.
pub struct GameState {
    /// The ECS world (enemies, projectiles, XP orbs)
    pub world: World,

    /// Every random roll in the run goes through this
    pub rng: StdRng,

    pub modifiers: ModifierSystem,
    pub character: CharacterSystem,
    pub weapons: WeaponSystem,
    pub items: ItemSystem,
    pub levels: LevelSystem,
    pub difficulty: DifficultySystem,
    pub spawner: SpawnController,
    pub upgrades: UpgradeSystem,
    pub player: PlayerVitals,
    pub combat: CombatConfig,
}

impl GameState {
    /// Create a fresh run from a config
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let modifiers = ModifierSystem::new();
        let character = CharacterSystem::new(config.character);
        let items = match &config.items {
            Some(catalog) => ItemSystem::with_catalog(catalog.clone()),
            None => ItemSystem::new(),
        };
        let max_hp = character.final_stat(Stat::MaxHp, &modifiers);

        let mut state = Self {
            world: World::new(),
            rng,
            modifiers,
            character,
            weapons: WeaponSystem::new(),
            items,
            levels: LevelSystem::new(config.xp_curve),
            difficulty: DifficultySystem::new(config.difficulty),
            spawner: SpawnController::new(config.spawn),
            upgrades: UpgradeSystem::new(),
            player: PlayerVitals::new(max_hp),
            combat: config.combat,
        };
        state.equip_starting_weapon();
        log::info!(
            "New run as {} with {}",
            state.character.def().name,
            state.character.starting_weapon().name()
        );
        state
    }

    fn equip_starting_weapon(&mut self) {
        let weapon = self.character.starting_weapon();
        self.weapons.equip(weapon);
    }

    /// Final value of a character stat with every modifier applied
    pub fn final_stat(&self, stat: Stat) -> f32 {
        self.character.final_stat(stat, &self.modifiers)
    }

    pub fn damage_reduction(&self) -> f32 {
        player::damage_reduction(&self.character, &self.modifiers)
    }

    /// Re-read max HP after growth or item changes, keeping the HP ratio
    pub fn sync_player_max_hp(&mut self) {
        let max_hp = self.final_stat(Stat::MaxHp);
        self.player.sync_max_hp(max_hp);
    }

    /// Back to level 1 with the starting weapon and an empty world.
    /// The RNG keeps its stream.
    pub fn reset(&mut self) {
        self.world.clear();
        self.items.reset(&mut self.modifiers);
        self.modifiers.reset();
        self.character.reset();
        self.weapons.reset();
        self.levels.reset();
        self.difficulty.reset();
        self.spawner.reset();
        self.player = PlayerVitals::new(self.final_stat(Stat::MaxHp));
        self.equip_starting_weapon();
    }
}
