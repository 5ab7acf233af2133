/// Boss behavior: attack selection, timers and transitions, driven by the
/// physics body, health, and animation-completion events.
pub(crate) struct EnemyBehavior {
    kind: EnemyKind,
    tuning: MoveTuning,
    body: PhysicsBody,
    sprite: SpritePlayer,
    hp: i32,
    state: AttackState,
    facing: Direction,
    dash_direction: Direction,
    dash_delay_ms: f32,
    dash_delay_max_ms: f32,
    dash_count: u32,
    pending_barrage_lanes: Vec<f32>,
    erase_requested: bool,
    rng: fastrand::Rng,
    events: BehaviorEvents,
}

impl EnemyBehavior {
    pub(crate) fn new(def: &EnemyDef, tuning: MoveTuning, spawn: Vec2, rng_seed: u64) -> Self {
        Self {
            kind: EnemyKind::Boss(BossParams::from_def(def)),
            tuning: tuning.with_max_move_speed(def.max_move_speed),
            body: PhysicsBody::new(spawn),
            sprite: build_boss_sprite(),
            hp: def.max_hp,
            state: AttackState::Idle,
            facing: Direction::Left,
            dash_direction: Direction::Left,
            dash_delay_ms: def.dash_delay_ms,
            dash_delay_max_ms: def.dash_delay_ms,
            dash_count: 0,
            pending_barrage_lanes: Vec::new(),
            erase_requested: false,
            rng: fastrand::Rng::with_seed(rng_seed),
            events: BehaviorEvents::default(),
        }
    }

    pub(crate) fn is_free_to_attack(&self) -> bool {
        self.state == AttackState::Idle && !self.erase_requested
    }

    pub(crate) fn request_attack(&mut self, kind: AttackKind) -> bool {
        if !self.is_free_to_attack() {
            return false;
        }
        match kind {
            AttackKind::Melee => {
                self.state = AttackState::Melee;
                self.sprite.set_list(LIST_MELEE_ATTACK);
            }
            AttackKind::Dash => {
                self.state = AttackState::DashPreparing;
                self.sprite.set_list(LIST_DASH_PREPARATION);
            }
            AttackKind::Cannonballs => {
                self.select_barrage();
                self.state = AttackState::Cannonballs;
                self.sprite.set_list(LIST_CANNONBALLS);
            }
        }
        self.events.emit(BehaviorEvent::AttackStarted { kind });
        true
    }

    /// Attack request by scene-facing slot index; unknown slots are dropped.
    pub(crate) fn request_attack_index(&mut self, index: usize) -> bool {
        match AttackKind::from_index(index) {
            Some(kind) => self.request_attack(kind),
            None => false,
        }
    }

    pub(crate) fn apply_damage(&mut self, amount: i32) {
        if self.state == AttackState::Dying {
            return;
        }
        let EnemyKind::Boss(params) = &self.kind;
        self.hp = (self.hp - amount).clamp(0, params.max_hp);
        self.sprite.trigger_immunity(DAMAGE_IMMUNITY_MS);
        if self.hp == 0 {
            self.state = AttackState::Dying;
            self.pending_barrage_lanes.clear();
            self.sprite.set_list(LIST_DYING);
            self.events.emit(BehaviorEvent::Died);
        }
    }

    pub(crate) fn restore_health(&mut self, amount: i32) {
        if self.state == AttackState::Dying {
            return;
        }
        let EnemyKind::Boss(params) = &self.kind;
        self.hp = (self.hp + amount).clamp(0, params.max_hp);
    }

    pub(crate) fn drain_events(&mut self) -> Vec<BehaviorEvent> {
        self.events.drain_current_tick()
    }

    pub(crate) fn health_icons(&self) -> Vec<HealthIcon> {
        let EnemyKind::Boss(params) = &self.kind;
        let total = (params.max_hp as f32 / 2.0).ceil() as usize;
        let filled = (self.hp as f32 / 2.0).ceil() as usize;
        let half_slot = (self.hp / 2) as usize;
        (0..total)
            .map(|slot| {
                if slot >= filled {
                    HealthIcon::Empty
                } else if self.hp % 2 == 1 && slot == half_slot {
                    HealthIcon::Half
                } else {
                    HealthIcon::Full
                }
            })
            .collect()
    }

    /// One simulation tick: timers, physics, attack scheduling, animation
    /// events, the damage overlay, and sprite bookkeeping, in that order.
    pub(crate) fn advance_state(&mut self, dt: f32, ctx: &SimulationContext<'_>) {
        let dt_ms = dt * 1000.0;
        let (max_hp, dash_speed, view_range) = {
            let EnemyKind::Boss(params) = &self.kind;
            (params.max_hp, params.dash_speed, params.view_range)
        };

        if self.dash_delay_ms > 0.0 {
            self.dash_delay_ms -= dt_ms;
        }

        if self.state == AttackState::Dashing {
            self.body.velocity.x = match self.dash_direction {
                Direction::Right => dash_speed,
                Direction::Left => -dash_speed,
            };
        }

        let collider = self.sprite.collider();
        self.body
            .integrate(dt, MoveIntent::default(), collider, &self.tuning, ctx.tiles);

        if self.state == AttackState::Dashing {
            let arrived = match self.dash_direction {
                Direction::Left if self.body.position.x < ARENA_MIN_X => {
                    Some((ARENA_MIN_X, Direction::Right))
                }
                Direction::Right if self.body.position.x > ARENA_MAX_X => {
                    Some((ARENA_MAX_X, Direction::Left))
                }
                _ => None,
            };
            if let Some((bound_x, new_facing)) = arrived {
                self.body.position.x = bound_x;
                self.body.velocity.x = 0.0;
                self.state = AttackState::Idle;
                self.facing = new_facing;
                self.dash_delay_ms = self.dash_delay_max_ms;
                self.events.emit(BehaviorEvent::DashEnded { at_x: bound_x });
            }
        }

        // Difficulty ramp: one-way, survives later healing.
        if (self.hp as f32) < max_hp as f32 * HP_RATCHET_FRACTION
            && self.dash_delay_max_ms > DASH_DELAY_REDUCED_MS
        {
            self.dash_delay_max_ms = DASH_DELAY_REDUCED_MS;
        }

        if self.is_free_to_attack() && self.sees_player(ctx.player_position, view_range) {
            self.request_attack(AttackKind::Melee);
        }

        if self.is_free_to_attack() && self.dash_delay_ms <= 0.0 {
            if self.dash_count < MAX_CONSECUTIVE_DASHES {
                self.request_attack(AttackKind::Dash);
                self.dash_count += 1;
            } else {
                self.request_attack(AttackKind::Cannonballs);
                self.dash_delay_ms = self.dash_delay_max_ms;
                self.dash_count = 0;
            }
        }

        if let Some(AnimationEvent::Completed { list }) = self.sprite.update(dt_ms) {
            match (self.state, list) {
                (AttackState::DashPreparing, LIST_DASH_PREPARATION) => {
                    self.state = AttackState::Dashing;
                    // Always charge toward the nearer edge.
                    self.dash_direction = if self.body.position.x >= ARENA_VIRTUAL_WIDTH / 2.0 {
                        Direction::Left
                    } else {
                        Direction::Right
                    };
                }
                (AttackState::Cannonballs, LIST_CANNONBALLS) => {
                    self.emit_barrage();
                    self.dash_delay_ms = self.dash_delay_max_ms * BARRAGE_COOLDOWN_FACTOR;
                    self.state = AttackState::Idle;
                }
                (AttackState::Melee, LIST_MELEE_ATTACK) => {
                    self.state = AttackState::Idle;
                }
                (AttackState::Dying, LIST_DYING) => {
                    self.erase_requested = true;
                }
                _ => {}
            }
        }

        match self.state {
            AttackState::Dying | AttackState::DashPreparing | AttackState::Dashing => {}
            AttackState::Damaged => {
                if !self.sprite.immunity_active() {
                    self.state = AttackState::Idle;
                }
            }
            _ => {
                if self.sprite.immunity_active() {
                    if self.state == AttackState::Cannonballs {
                        self.pending_barrage_lanes.clear();
                    }
                    self.state = AttackState::Damaged;
                }
            }
        }

        self.refresh_frame_list();
        self.update_mirror();
    }

    fn select_barrage(&mut self) {
        let EnemyKind::Boss(params) = &self.kind;
        let below_half = (self.hp as f32) < params.max_hp as f32 * HP_RATCHET_FRACTION;
        let pool = if below_half {
            params.barrage.patterns.len()
        } else {
            params.barrage.pair_pattern_count()
        };
        let index = self.rng.usize(0..pool);
        self.pending_barrage_lanes = params.barrage.patterns[index]
            .iter()
            .map(|&lane| params.barrage.lane_heights[lane])
            .collect();
    }

    fn emit_barrage(&mut self) {
        let EnemyKind::Boss(params) = &self.kind;
        let spawn_x = params.barrage.spawn_x;
        let velocity_x = params.barrage.velocity_x;
        let damage = params.barrage.damage;
        for &lane_y in &self.pending_barrage_lanes {
            self.events.emit(BehaviorEvent::ProjectileRequested {
                kind: PROJECTILE_KIND_CANNONBALL,
                position: Vec2::new(spawn_x, lane_y),
                velocity_x,
                velocity_y: 0.0,
                damage,
                faction: Faction::FromEnemy,
            });
        }
        self.pending_barrage_lanes.clear();
    }

    fn sees_player(&self, player_position: Vec2, view: ViewRange) -> bool {
        let anchor = self.body.position;
        let (min_x, max_x) = match self.facing {
            Direction::Left => (
                anchor.x - view.offset_x - view.width,
                anchor.x - view.offset_x,
            ),
            Direction::Right => (
                anchor.x + view.offset_x,
                anchor.x + view.offset_x + view.width,
            ),
        };
        let min_y = anchor.y + view.offset_y;
        player_position.x >= min_x
            && player_position.x <= max_x
            && player_position.y >= min_y
            && player_position.y <= min_y + view.height
    }

    fn refresh_frame_list(&mut self) {
        let list = match self.state {
            AttackState::Dying => LIST_DYING,
            AttackState::DashPreparing => LIST_DASH_PREPARATION,
            AttackState::Dashing => LIST_DASH_ATTACK,
            AttackState::Melee => LIST_MELEE_ATTACK,
            AttackState::Cannonballs => LIST_CANNONBALLS,
            AttackState::Damaged => LIST_DAMAGE,
            AttackState::Idle => {
                if self.body.is_on_ground() {
                    LIST_STAND
                } else {
                    LIST_JUMPING
                }
            }
        };
        // The boss sheet carries no jumping frames; an unknown list leaves
        // the current one playing.
        self.sprite.set_list(list);
    }

    /// While dashing the mirror flips only when the velocity sign and the
    /// current mirror state disagree; otherwise facing fully determines it.
    fn update_mirror(&mut self) {
        if self.state == AttackState::Dashing {
            if self.body.velocity.x < 0.0 && self.sprite.mirrored {
                self.sprite.mirrored = false;
            } else if self.body.velocity.x > 0.0 && !self.sprite.mirrored {
                self.sprite.mirrored = true;
            }
        } else {
            self.sprite.mirrored = self.facing == Direction::Right;
        }
    }
}

fn build_boss_sprite() -> SpritePlayer {
    let framed = |frame_count, frame_duration_ms, looping| FrameList {
        frame_count,
        frame_duration_ms,
        looping,
        collider: BOSS_COLLIDER,
    };
    let mut sprite = SpritePlayer::new();
    sprite.add_list(LIST_STAND, framed(4, 150.0, true));
    sprite.add_list(LIST_MELEE_ATTACK, framed(5, 120.0, false));
    sprite.add_list(LIST_DASH_PREPARATION, framed(2, 100.0, false));
    sprite.add_list(LIST_DASH_ATTACK, framed(4, 40.0, true));
    sprite.add_list(LIST_CANNONBALLS, framed(4, 100.0, false));
    sprite.add_list(LIST_DAMAGE, framed(2, 130.0, true));
    sprite.add_list(LIST_DYING, framed(2, 150.0, false));
    sprite
}
