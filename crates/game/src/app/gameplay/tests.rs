use super::*;

const DT: f32 = 1.0 / 60.0;

fn far_player() -> Vec2 {
    Vec2::new(-1000.0, -1000.0)
}

fn test_boss(x: f32, seed: u64) -> (EnemyBehavior, TileGrid) {
    let tiles = arena_grid();
    let boss = EnemyBehavior::new(
        &EnemyDef::boss_default(),
        MoveTuning::default(),
        Vec2::new(x, 160.0),
        seed,
    );
    (boss, tiles)
}

fn advance(boss: &mut EnemyBehavior, tiles: &TileGrid, ticks: u32) {
    for _ in 0..ticks {
        let ctx = SimulationContext {
            tiles,
            player_position: far_player(),
        };
        boss.advance_state(DT, &ctx);
    }
}

fn started_kinds(events: &[BehaviorEvent]) -> Vec<AttackKind> {
    events
        .iter()
        .filter_map(|event| match event {
            BehaviorEvent::AttackStarted { kind } => Some(*kind),
            _ => None,
        })
        .collect()
}

fn projectile_requests(events: &[BehaviorEvent]) -> Vec<BehaviorEvent> {
    events
        .iter()
        .filter(|event| matches!(event, BehaviorEvent::ProjectileRequested { .. }))
        .copied()
        .collect()
}

#[test]
fn boss_rests_on_the_arena_floor() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 1);
    boss.dash_delay_ms = 1.0e9;

    advance(&mut boss, &tiles, 120);

    assert!(boss.body.is_on_ground());
    assert_eq!(boss.body.velocity, Vec2::ZERO);
    assert_eq!(boss.body.bounds(BOSS_COLLIDER).bottom(), 224);
}

#[test]
fn first_elapsed_opportunity_is_a_dash_not_a_barrage() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 2);
    boss.dash_delay_ms = 0.0;

    advance(&mut boss, &tiles, 1);

    let kinds = started_kinds(&boss.drain_events());
    assert_eq!(kinds, vec![AttackKind::Dash]);
    assert_eq!(boss.state, AttackState::DashPreparing);
    assert_eq!(boss.dash_count, 1);
}

#[test]
fn attack_kind_sequence_is_dash_dash_barrage_repeating() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 3);
    let mut kinds = Vec::new();

    for _ in 0..5000 {
        boss.dash_delay_ms = 0.0;
        let ctx = SimulationContext {
            tiles: &tiles,
            player_position: far_player(),
        };
        boss.advance_state(DT, &ctx);
        kinds.extend(started_kinds(&boss.drain_events()));
        if kinds.len() >= 9 {
            break;
        }
    }

    assert_eq!(
        &kinds[..9],
        &[
            AttackKind::Dash,
            AttackKind::Dash,
            AttackKind::Cannonballs,
            AttackKind::Dash,
            AttackKind::Dash,
            AttackKind::Cannonballs,
            AttackKind::Dash,
            AttackKind::Dash,
            AttackKind::Cannonballs,
        ]
    );
}

#[test]
fn dash_from_the_right_half_terminates_at_the_left_bound() {
    let (mut boss, tiles) = test_boss(200.0, 4);
    boss.dash_delay_ms = 0.0;

    let mut ended_at = None;
    for _ in 0..600 {
        let ctx = SimulationContext {
            tiles: &tiles,
            player_position: far_player(),
        };
        boss.advance_state(DT, &ctx);
        assert!(boss.body.position.x >= ARENA_MIN_X);
        assert!(boss.body.position.x <= ARENA_MAX_X);
        if let Some(BehaviorEvent::DashEnded { at_x }) = boss
            .drain_events()
            .iter()
            .find(|event| matches!(event, BehaviorEvent::DashEnded { .. }))
        {
            ended_at = Some(*at_x);
            break;
        }
    }

    assert_eq!(ended_at, Some(ARENA_MIN_X));
    assert_eq!(boss.body.position.x, ARENA_MIN_X);
    assert_eq!(boss.body.velocity.x, 0.0);
    assert_eq!(boss.state, AttackState::Idle);
    assert_eq!(boss.facing, Direction::Right);
    assert!(boss.sprite.mirrored);
    assert_eq!(boss.dash_delay_ms, boss.dash_delay_max_ms);
}

#[test]
fn dash_from_the_left_half_terminates_at_the_right_bound() {
    let (mut boss, tiles) = test_boss(32.0, 5);
    boss.dash_delay_ms = 0.0;

    let mut ended_at = None;
    for _ in 0..600 {
        let ctx = SimulationContext {
            tiles: &tiles,
            player_position: far_player(),
        };
        boss.advance_state(DT, &ctx);
        assert!(boss.body.position.x >= ARENA_MIN_X);
        assert!(boss.body.position.x <= ARENA_MAX_X);
        if let Some(BehaviorEvent::DashEnded { at_x }) = boss
            .drain_events()
            .iter()
            .find(|event| matches!(event, BehaviorEvent::DashEnded { .. }))
        {
            ended_at = Some(*at_x);
            break;
        }
    }

    assert_eq!(ended_at, Some(ARENA_MAX_X));
    assert_eq!(boss.facing, Direction::Left);
    assert!(!boss.sprite.mirrored);
}

#[test]
fn mirror_flips_mid_dash_when_velocity_disagrees() {
    let (mut boss, tiles) = test_boss(100.0, 6);
    boss.dash_delay_ms = 0.0;
    assert!(!boss.sprite.mirrored);

    // Wind-up is 200ms; by tick 20 the boss is dashing rightward.
    advance(&mut boss, &tiles, 20);

    assert_eq!(boss.state, AttackState::Dashing);
    assert_eq!(boss.dash_direction, Direction::Right);
    assert!(boss.sprite.mirrored);
}

#[test]
fn dash_delay_ratchet_survives_healing() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 7);
    assert_eq!(boss.dash_delay_max_ms, 1000.0);

    boss.apply_damage(30);
    advance(&mut boss, &tiles, 1);
    assert_eq!(boss.dash_delay_max_ms, DASH_DELAY_REDUCED_MS);

    boss.restore_health(20);
    advance(&mut boss, &tiles, 1);
    assert_eq!(boss.hp, 40);
    assert_eq!(boss.dash_delay_max_ms, DASH_DELAY_REDUCED_MS);
}

#[test]
fn hp_never_exceeds_max_hp() {
    let (mut boss, _tiles) = test_boss(ARENA_MAX_X, 8);
    boss.apply_damage(10);
    boss.restore_health(1000);
    assert_eq!(boss.hp, 50);
}

#[test]
fn barrage_at_full_health_draws_only_lane_pairs() {
    let (mut boss, _tiles) = test_boss(ARENA_MAX_X, 9);
    for _ in 0..100 {
        boss.select_barrage();
        assert_eq!(boss.pending_barrage_lanes.len(), 2);
    }
}

#[test]
fn barrage_below_half_health_draws_from_the_full_table() {
    let (mut boss, _tiles) = test_boss(ARENA_MAX_X, 10);
    boss.apply_damage(26);
    assert_eq!(boss.hp, 24);

    let mut pairs = 0;
    let mut triples = 0;
    for _ in 0..200 {
        boss.select_barrage();
        match boss.pending_barrage_lanes.len() {
            2 => pairs += 1,
            3 => triples += 1,
            other => panic!("unexpected pattern size {other}"),
        }
    }
    assert!(pairs > 0, "expected some pair draws");
    assert!(triples > 0, "expected some triple draws below half health");
}

#[test]
fn barrage_emits_once_on_windup_completion_with_extended_cooldown() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 11);
    boss.dash_count = MAX_CONSECUTIVE_DASHES;
    boss.dash_delay_ms = 0.0;

    advance(&mut boss, &tiles, 1);
    let kinds = started_kinds(&boss.drain_events());
    assert_eq!(kinds, vec![AttackKind::Cannonballs]);
    assert_eq!(boss.state, AttackState::Cannonballs);
    assert_eq!(boss.dash_count, 0);

    let mut shots = Vec::new();
    for _ in 0..60 {
        advance(&mut boss, &tiles, 1);
        shots.extend(projectile_requests(&boss.drain_events()));
        if !shots.is_empty() {
            break;
        }
    }

    assert_eq!(shots.len(), 2);
    for shot in &shots {
        let BehaviorEvent::ProjectileRequested {
            kind,
            position,
            velocity_x,
            velocity_y,
            damage,
            faction,
        } = shot
        else {
            panic!("expected projectile request");
        };
        assert_eq!(*kind, PROJECTILE_KIND_CANNONBALL);
        assert_eq!(position.x, 360.0);
        assert!([72.0, 108.0, 144.0, 180.0].contains(&position.y));
        assert_eq!(*velocity_x, -7.0);
        assert_eq!(*velocity_y, 0.0);
        assert_eq!(*damage, 1);
        assert_eq!(*faction, Faction::FromEnemy);
    }
    assert_eq!(boss.state, AttackState::Idle);
    assert_eq!(
        boss.dash_delay_ms,
        boss.dash_delay_max_ms * BARRAGE_COOLDOWN_FACTOR
    );

    // No further volleys without a fresh wind-up.
    let mut extra = Vec::new();
    for _ in 0..30 {
        advance(&mut boss, &tiles, 1);
        extra.extend(projectile_requests(&boss.drain_events()));
    }
    assert!(extra.is_empty());
}

#[test]
fn player_in_view_range_triggers_a_melee_when_free() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 12);
    let in_view = Vec2::new(280.0, 200.0);

    let ctx = SimulationContext {
        tiles: &tiles,
        player_position: in_view,
    };
    boss.advance_state(DT, &ctx);

    let kinds = started_kinds(&boss.drain_events());
    assert_eq!(kinds, vec![AttackKind::Melee]);
    assert_eq!(boss.state, AttackState::Melee);
}

#[test]
fn sighting_is_ignored_while_preparing_a_dash() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 13);
    assert!(boss.request_attack(AttackKind::Dash));
    boss.drain_events();

    let ctx = SimulationContext {
        tiles: &tiles,
        player_position: Vec2::new(280.0, 200.0),
    };
    boss.advance_state(DT, &ctx);

    assert!(started_kinds(&boss.drain_events()).is_empty());
    assert_eq!(boss.state, AttackState::DashPreparing);
}

#[test]
fn unknown_attack_index_is_rejected_without_state_change() {
    let (mut boss, _tiles) = test_boss(ARENA_MAX_X, 14);

    assert!(!boss.request_attack_index(9));
    assert_eq!(boss.state, AttackState::Idle);
    assert!(boss.drain_events().is_empty());

    assert!(boss.request_attack_index(1));
    assert_eq!(boss.state, AttackState::DashPreparing);
}

#[test]
fn damage_window_enters_damaged_state_and_clears_back_to_idle() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 15);
    boss.apply_damage(3);

    advance(&mut boss, &tiles, 1);
    assert_eq!(boss.state, AttackState::Damaged);
    assert!(!boss.is_free_to_attack());

    advance(&mut boss, &tiles, 24);
    assert_eq!(boss.state, AttackState::Damaged);

    advance(&mut boss, &tiles, 10);
    assert_eq!(boss.state, AttackState::Idle);
    assert!(boss.is_free_to_attack());
}

#[test]
fn dying_is_terminal_and_requests_erase_after_the_death_animation() {
    let (mut boss, tiles) = test_boss(ARENA_MAX_X, 16);
    boss.apply_damage(50);

    assert_eq!(boss.hp, 0);
    assert_eq!(boss.state, AttackState::Dying);
    assert!(boss
        .drain_events()
        .iter()
        .any(|event| matches!(event, BehaviorEvent::Died)));

    assert!(!boss.request_attack(AttackKind::Melee));
    boss.apply_damage(10);
    boss.restore_health(10);
    assert_eq!(boss.hp, 0);

    advance(&mut boss, &tiles, 25);
    assert_eq!(boss.state, AttackState::Dying);
    assert!(boss.erase_requested);
}

#[test]
fn health_icons_cover_full_half_and_empty_slots() {
    let (mut boss, _tiles) = test_boss(ARENA_MAX_X, 17);

    assert_eq!(boss.health_icons(), vec![HealthIcon::Full; 25]);

    boss.hp = 49;
    let icons = boss.health_icons();
    assert_eq!(icons.len(), 25);
    assert_eq!(icons[..24], vec![HealthIcon::Full; 24][..]);
    assert_eq!(icons[24], HealthIcon::Half);

    boss.hp = 24;
    let icons = boss.health_icons();
    assert_eq!(icons[..12], vec![HealthIcon::Full; 12][..]);
    assert_eq!(icons[12..], vec![HealthIcon::Empty; 13][..]);

    boss.hp = 5;
    let icons = boss.health_icons();
    assert_eq!(icons[..2], vec![HealthIcon::Full; 2][..]);
    assert_eq!(icons[2], HealthIcon::Half);
    assert_eq!(icons[3..], vec![HealthIcon::Empty; 22][..]);

    boss.hp = 0;
    assert_eq!(boss.health_icons(), vec![HealthIcon::Empty; 25]);
}

#[test]
fn arena_scene_spawns_steps_and_culls_barrage_projectiles() {
    let mut scene = build_arena(&EnemyDef::boss_default(), MoveTuning::default(), 18);
    scene.boss.dash_count = MAX_CONSECUTIVE_DASHES;
    scene.boss.dash_delay_ms = 0.0;

    let mut spawned = false;
    for _ in 0..60 {
        scene.update(DT, MoveIntent::default());
        if scene.projectile_count() > 0 {
            spawned = true;
            break;
        }
    }
    assert!(spawned, "barrage never spawned projectiles");
    assert_eq!(scene.projectile_count(), 2);
    for projectile in &scene.spawner.projectiles {
        assert_eq!(projectile.kind, PROJECTILE_KIND_CANNONBALL);
        assert_eq!(projectile.velocity, Vec2::new(-7.0, 0.0));
        // Already stepped once on the spawn tick.
        assert_eq!(projectile.position.x, 353.0);
    }

    for _ in 0..120 {
        scene.update(DT, MoveIntent::default());
    }
    assert_eq!(scene.projectile_count(), 0);
}

#[test]
fn scene_attack_requests_follow_the_free_to_attack_gate() {
    let mut scene = build_arena(&EnemyDef::boss_default(), MoveTuning::default(), 19);

    assert!(scene.request_boss_attack(0));
    assert_eq!(scene.boss.state, AttackState::Melee);
    assert!(!scene.request_boss_attack(2));
    assert!(!scene.request_boss_attack(42));
}
