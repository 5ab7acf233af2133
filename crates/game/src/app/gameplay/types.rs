#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttackKind {
    Melee,
    Dash,
    Cannonballs,
}

impl AttackKind {
    /// Attack slot as requested by the scene AI layer. Unknown indices map to
    /// None; callers drop the request rather than halting the frame loop.
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Melee),
            1 => Some(Self::Dash),
            2 => Some(Self::Cannonballs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttackState {
    Idle,
    Melee,
    DashPreparing,
    Dashing,
    Cannonballs,
    Damaged,
    Dying,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Faction {
    FromPlayer,
    FromEnemy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BehaviorEvent {
    AttackStarted {
        kind: AttackKind,
    },
    DashEnded {
        at_x: f32,
    },
    ProjectileRequested {
        kind: &'static str,
        position: Vec2,
        velocity_x: f32,
        velocity_y: f32,
        damage: i32,
        faction: Faction,
    },
    Died,
}

/// Outgoing per-tick event queue. The owning scene drains it once per tick;
/// no flag is shared across components.
#[derive(Default)]
pub(crate) struct BehaviorEvents {
    current_tick_events: Vec<BehaviorEvent>,
}

impl BehaviorEvents {
    fn emit(&mut self, event: BehaviorEvent) {
        self.current_tick_events.push(event);
    }

    fn drain_current_tick(&mut self) -> Vec<BehaviorEvent> {
        std::mem::take(&mut self.current_tick_events)
    }
}

/// Contract the behavior emits projectiles through; the scene implements it.
pub(crate) trait ProjectileSpawner {
    fn spawn(
        &mut self,
        kind: &'static str,
        position: Vec2,
        velocity_x: f32,
        velocity_y: f32,
        damage: i32,
        faction: Faction,
    );
}

/// Per-tick collaborator handles, passed explicitly instead of reached
/// through ambient scene/manager state.
pub(crate) struct SimulationContext<'a> {
    pub(crate) tiles: &'a TileGrid,
    pub(crate) player_position: Vec2,
}

/// Kind-specific behavior data, def-driven. New enemy kinds add a variant
/// holding their own table rather than a subclass.
pub(crate) enum EnemyKind {
    Boss(BossParams),
}

pub(crate) struct BossParams {
    pub(crate) max_hp: i32,
    pub(crate) dash_speed: f32,
    pub(crate) view_range: ViewRange,
    pub(crate) barrage: BarrageDef,
}

impl BossParams {
    fn from_def(def: &EnemyDef) -> Self {
        Self {
            max_hp: def.max_hp,
            dash_speed: def.dash_speed,
            view_range: def.view_range,
            barrage: def.barrage.clone(),
        }
    }
}

/// HUD draw data for the boss health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HealthIcon {
    Full,
    Half,
    Empty,
}
