use std::path::{Path, PathBuf};

use engine::{load_enemy_defs, DefParseError, EnemyDef, MoveTuning, TuningError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, ArenaScene};

const TUNING_ENV_VAR: &str = "BRIG_TUNING";
const DEFS_ENV_VAR: &str = "BRIG_DEFS";
const SIM_CONFIG_ENV_VAR: &str = "BRIG_SIM_CONFIG";
const BOSS_DEF_NAME: &str = "brig.boss";

pub(crate) struct SimWiring {
    pub(crate) config: SimConfig,
    pub(crate) scene: ArenaScene,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimConfig {
    pub(crate) ticks: u64,
    pub(crate) fixed_dt_seconds: f32,
    pub(crate) rng_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 1800,
            fixed_dt_seconds: 1.0 / 60.0,
            rng_seed: 7,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum StartupError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    ParseJson { path: PathBuf, message: String },
    #[error(transparent)]
    InvalidTuning(#[from] TuningError),
    #[error("failed to parse enemy defs: {0}")]
    ParseDefs(#[source] DefParseError),
    #[error("no enemy def named '{def_name}' in the loaded defs")]
    MissingBossDef { def_name: String },
}

pub(crate) fn build_app() -> Result<SimWiring, StartupError> {
    init_tracing();
    info!("=== Brigantine Sim Startup ===");

    let config = load_sim_config()?;
    let tuning = load_tuning()?;
    tuning.validate()?;
    let defs = load_defs()?;
    let boss_def = defs
        .iter()
        .find(|def| def.def_name == BOSS_DEF_NAME)
        .cloned()
        .ok_or_else(|| StartupError::MissingBossDef {
            def_name: BOSS_DEF_NAME.to_string(),
        })?;

    info!(
        ticks = config.ticks,
        seed = config.rng_seed,
        boss = %boss_def.label,
        "sim_wired"
    );
    let scene = gameplay::build_arena(&boss_def, tuning, config.rng_seed);
    Ok(SimWiring { config, scene })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn load_sim_config() -> Result<SimConfig, StartupError> {
    let Some(path) = env_path(SIM_CONFIG_ENV_VAR) else {
        return Ok(SimConfig::default());
    };
    let raw = read_file(&path)?;
    parse_json(&raw, &path)
}

fn load_tuning() -> Result<MoveTuning, StartupError> {
    let Some(path) = env_path(TUNING_ENV_VAR) else {
        return Ok(MoveTuning::default());
    };
    let raw = read_file(&path)?;
    parse_json(&raw, &path)
}

fn load_defs() -> Result<Vec<EnemyDef>, StartupError> {
    let Some(path) = env_path(DEFS_ENV_VAR) else {
        return Ok(vec![EnemyDef::boss_default()]);
    };
    load_enemy_defs(&path).map_err(StartupError::ParseDefs)
}

fn env_path(var: &str) -> Option<PathBuf> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        Err(error) => {
            warn!(var, error = %error, "env_var_unreadable");
            None
        }
    }
}

fn read_file(path: &Path) -> Result<String, StartupError> {
    std::fs::read_to_string(path).map_err(|source| StartupError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<'a, T: Deserialize<'a>>(raw: &'a str, path: &Path) -> Result<T, StartupError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|error| StartupError::ParseJson {
        path: path.to_path_buf(),
        message: error.to_string(),
    })
}
