use std::process::ExitCode;

use engine::MoveIntent;
use tracing::info;

use super::bootstrap::SimWiring;
use super::gameplay::HealthIcon;

// Demo script: the player paces the arena and hops, the boss takes a hit
// every few seconds, gets one heal late, and is prodded into a melee once in
// a while the way the scene AI would.
const DEMO_DAMAGE_INTERVAL_TICKS: u64 = 240;
const DEMO_DAMAGE_AMOUNT: i32 = 3;
const DEMO_HEAL_TICK: u64 = 1500;
const DEMO_HEAL_AMOUNT: i32 = 6;
const DEMO_MELEE_INTERVAL_TICKS: u64 = 420;
const MELEE_ATTACK_INDEX: usize = 0;

pub(crate) fn run(wiring: SimWiring) -> ExitCode {
    let SimWiring { config, mut scene } = wiring;

    for _ in 0..config.ticks {
        let tick = scene.tick();
        if tick > 0 && tick % DEMO_DAMAGE_INTERVAL_TICKS == 0 {
            scene.damage_boss(DEMO_DAMAGE_AMOUNT);
        }
        if tick == DEMO_HEAL_TICK {
            scene.heal_boss(DEMO_HEAL_AMOUNT);
        }
        if tick > 0 && tick % DEMO_MELEE_INTERVAL_TICKS == 0 {
            scene.request_boss_attack(MELEE_ATTACK_INDEX);
        }

        scene.update(config.fixed_dt_seconds, scripted_intent(tick));

        if scene.boss_erase_requested() {
            info!(tick, "boss_erased");
            break;
        }
    }

    info!(
        ticks = config.ticks,
        boss_hp = scene.boss_hp(),
        hp_bar = %health_bar_text(&scene.boss_health_icons()),
        projectiles_in_flight = scene.projectile_count(),
        "sim_complete"
    );
    ExitCode::SUCCESS
}

fn scripted_intent(tick: u64) -> MoveIntent {
    MoveIntent {
        horizontal: if (tick / 120) % 2 == 0 { 1.0 } else { -1.0 },
        jump_held: tick % 180 < 12,
    }
}

fn health_bar_text(icons: &[HealthIcon]) -> String {
    icons
        .iter()
        .map(|icon| match icon {
            HealthIcon::Full => '#',
            HealthIcon::Half => '+',
            HealthIcon::Empty => '.',
        })
        .collect()
}
