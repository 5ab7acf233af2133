#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Projectile {
    kind: &'static str,
    position: Vec2,
    /// Pixels per tick, matching the shot table the lanes were tuned with.
    velocity: Vec2,
    damage: i32,
    faction: Faction,
}

#[derive(Default)]
struct ProjectileStore {
    projectiles: Vec<Projectile>,
}

impl ProjectileSpawner for ProjectileStore {
    fn spawn(
        &mut self,
        kind: &'static str,
        position: Vec2,
        velocity_x: f32,
        velocity_y: f32,
        damage: i32,
        faction: Faction,
    ) {
        let projectile = Projectile {
            kind,
            position,
            velocity: Vec2::new(velocity_x, velocity_y),
            damage,
            faction,
        };
        debug!(
            kind = projectile.kind,
            x = projectile.position.x,
            y = projectile.position.y,
            damage = projectile.damage,
            faction = ?projectile.faction,
            "projectile_spawned"
        );
        self.projectiles.push(projectile);
    }
}

/// Boss-arena scene: the tile floor, the boss, a scripted player body, and
/// the projectile store the behavior's events drain into.
pub(crate) struct ArenaScene {
    tiles: TileGrid,
    boss: EnemyBehavior,
    player: PhysicsBody,
    tuning: MoveTuning,
    spawner: ProjectileStore,
    tick: u64,
}

fn arena_grid() -> TileGrid {
    TileGrid::from_rows(
        ARENA_TILE_SIZE,
        &[
            "............",
            "............",
            "............",
            "............",
            "....----....",
            "............",
            "............",
            "############",
        ],
    )
    .expect("static arena shape is valid")
}

pub(crate) fn build_arena(def: &EnemyDef, tuning: MoveTuning, rng_seed: u64) -> ArenaScene {
    let tiles = arena_grid();
    // Floor top is y = 224; both actors spawn standing on it.
    let boss = EnemyBehavior::new(def, tuning, Vec2::new(ARENA_MAX_X, 160.0), rng_seed);
    let player = PhysicsBody::new(Vec2::new(32.0, 192.0));
    ArenaScene {
        tiles,
        boss,
        player,
        tuning,
        spawner: ProjectileStore::default(),
        tick: 0,
    }
}

impl ArenaScene {
    pub(crate) fn tick(&self) -> u64 {
        self.tick
    }

    pub(crate) fn boss_hp(&self) -> i32 {
        self.boss.hp
    }

    pub(crate) fn boss_health_icons(&self) -> Vec<HealthIcon> {
        self.boss.health_icons()
    }

    pub(crate) fn boss_erase_requested(&self) -> bool {
        self.boss.erase_requested
    }

    pub(crate) fn projectile_count(&self) -> usize {
        self.spawner.projectiles.len()
    }

    pub(crate) fn damage_boss(&mut self, amount: i32) {
        self.boss.apply_damage(amount);
    }

    pub(crate) fn heal_boss(&mut self, amount: i32) {
        self.boss.restore_health(amount);
    }

    pub(crate) fn request_boss_attack(&mut self, index: usize) -> bool {
        self.boss.request_attack_index(index)
    }

    /// One simulation tick: player physics, boss behavior, event drain into
    /// the spawner, projectile stepping and cull.
    pub(crate) fn update(&mut self, dt: f32, player_intent: MoveIntent) {
        self.player
            .integrate(dt, player_intent, PLAYER_COLLIDER, &self.tuning, &self.tiles);

        let ctx = SimulationContext {
            tiles: &self.tiles,
            player_position: self.player.position,
        };
        self.boss.advance_state(dt, &ctx);

        for event in self.boss.drain_events() {
            match event {
                BehaviorEvent::ProjectileRequested {
                    kind,
                    position,
                    velocity_x,
                    velocity_y,
                    damage,
                    faction,
                } => {
                    self.spawner
                        .spawn(kind, position, velocity_x, velocity_y, damage, faction);
                }
                BehaviorEvent::AttackStarted { kind } => {
                    debug!(tick = self.tick, ?kind, "boss_attack_started");
                }
                BehaviorEvent::DashEnded { at_x } => {
                    debug!(tick = self.tick, at_x, "boss_dash_ended");
                }
                BehaviorEvent::Died => {
                    info!(tick = self.tick, "boss_died");
                }
            }
        }

        for projectile in &mut self.spawner.projectiles {
            projectile.position.x += projectile.velocity.x;
            projectile.position.y += projectile.velocity.y;
        }
        self.spawner
            .projectiles
            .retain(|projectile| projectile.position.x > -PROJECTILE_CULL_MARGIN_PX);

        self.tick += 1;
    }
}
