use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefErrorCode {
    ReadFile,
    XmlMalformed,
    InvalidRoot,
    UnknownDefType,
    UnknownField,
    MissingField,
    InvalidValue,
    DuplicateDef,
}

#[derive(Debug, Clone)]
pub struct DefParseError {
    pub code: DefErrorCode,
    pub message: String,
    pub file_path: Option<PathBuf>,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for DefParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)?;
        if let Some(path) = &self.file_path {
            write!(f, " (file={})", path.display())?;
        }
        if let Some(loc) = self.location {
            write!(f, " (line={}, column={})", loc.line, loc.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for DefParseError {}

impl DefParseError {
    fn with_path(mut self, path: &Path) -> Self {
        self.file_path = Some(path.to_path_buf());
        self
    }
}

/// Sight box an enemy watches for the player with, anchored at the body
/// position and mirrored by facing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRange {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Projectile-barrage table: vertical lanes plus the lane combinations one
/// volley may use. Two-lane patterns must precede three-lane patterns; the
/// draw narrows to the two-lane prefix while the enemy is above half health.
#[derive(Debug, Clone, PartialEq)]
pub struct BarrageDef {
    pub spawn_x: f32,
    pub velocity_x: f32,
    pub damage: i32,
    pub lane_heights: Vec<f32>,
    pub patterns: Vec<Vec<usize>>,
}

impl BarrageDef {
    /// Count of leading two-lane patterns, the above-half-health draw pool.
    pub fn pair_pattern_count(&self) -> usize {
        self.patterns
            .iter()
            .take_while(|pattern| pattern.len() == 2)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyDef {
    pub def_name: String,
    pub label: String,
    pub max_hp: i32,
    pub contact_damage: i32,
    pub max_move_speed: f32,
    pub dash_speed: f32,
    pub dash_delay_ms: f32,
    pub view_range: ViewRange,
    pub barrage: BarrageDef,
}

impl EnemyDef {
    /// The def the game ships with, used when no def file is configured.
    pub fn boss_default() -> Self {
        Self {
            def_name: "brig.boss".to_string(),
            label: "Captain".to_string(),
            max_hp: 50,
            contact_damage: 2,
            max_move_speed: 400.0,
            dash_speed: 1000.0,
            dash_delay_ms: 1000.0,
            view_range: ViewRange {
                width: 10.0,
                height: 74.0,
                offset_x: 0.0,
                offset_y: -5.0,
            },
            barrage: BarrageDef {
                spawn_x: 360.0,
                velocity_x: -7.0,
                damage: 1,
                lane_heights: vec![72.0, 108.0, 144.0, 180.0],
                patterns: vec![
                    vec![0, 1],
                    vec![0, 2],
                    vec![0, 3],
                    vec![1, 2],
                    vec![2, 3],
                    vec![0, 1, 2],
                    vec![0, 2, 3],
                ],
            },
        }
    }
}

pub fn load_enemy_defs(path: &Path) -> Result<Vec<EnemyDef>, DefParseError> {
    let raw = fs::read_to_string(path).map_err(|source| DefParseError {
        code: DefErrorCode::ReadFile,
        message: format!("failed to read def file: {source}"),
        file_path: Some(path.to_path_buf()),
        location: None,
    })?;
    let defs = parse_enemy_defs(&raw).map_err(|error| error.with_path(path))?;
    debug!(path = %path.display(), count = defs.len(), "enemy_defs_loaded");
    Ok(defs)
}

pub fn parse_enemy_defs(raw: &str) -> Result<Vec<EnemyDef>, DefParseError> {
    let doc = Document::parse(raw).map_err(|error| DefParseError {
        code: DefErrorCode::XmlMalformed,
        message: format!("malformed XML: {error}"),
        file_path: None,
        location: Some(SourceLocation {
            line: error.pos().row as usize,
            column: error.pos().col as usize,
        }),
    })?;

    let root = doc.root_element();
    if root.tag_name().name() != "Defs" {
        return Err(error_at_node(
            DefErrorCode::InvalidRoot,
            "root element must be <Defs>".to_string(),
            &doc,
            root,
        ));
    }

    let mut defs = Vec::<EnemyDef>::new();
    for child in root.children().filter(|node| node.is_element()) {
        if child.tag_name().name() != "EnemyDef" {
            return Err(error_at_node(
                DefErrorCode::UnknownDefType,
                format!("unknown def type <{}>", child.tag_name().name()),
                &doc,
                child,
            ));
        }
        let def = parse_enemy_def(&doc, child)?;
        if defs.iter().any(|existing| existing.def_name == def.def_name) {
            return Err(error_at_node(
                DefErrorCode::DuplicateDef,
                format!("duplicate EnemyDef '{}'", def.def_name),
                &doc,
                child,
            ));
        }
        defs.push(def);
    }
    Ok(defs)
}

fn parse_enemy_def(doc: &Document<'_>, node: Node<'_, '_>) -> Result<EnemyDef, DefParseError> {
    let defaults = EnemyDef::boss_default();

    let mut def_name = None::<String>;
    let mut label = None::<String>;
    let mut max_hp = None::<i32>;
    let mut contact_damage = defaults.contact_damage;
    let mut max_move_speed = defaults.max_move_speed;
    let mut dash_speed = defaults.dash_speed;
    let mut dash_delay_ms = defaults.dash_delay_ms;
    let mut view_range = defaults.view_range;
    let mut barrage = defaults.barrage;

    for field in node.children().filter(|child| child.is_element()) {
        match field.tag_name().name() {
            "defName" => def_name = Some(text_content(doc, field)?),
            "label" => label = Some(text_content(doc, field)?),
            "maxHp" => max_hp = Some(parse_text(doc, field)?),
            "contactDamage" => contact_damage = parse_text(doc, field)?,
            "maxMoveSpeed" => max_move_speed = parse_text(doc, field)?,
            "dashSpeed" => dash_speed = parse_text(doc, field)?,
            "dashDelayMs" => dash_delay_ms = parse_text(doc, field)?,
            "viewRange" => view_range = parse_view_range(doc, field)?,
            "barrage" => barrage = parse_barrage(doc, field)?,
            other => {
                return Err(error_at_node(
                    DefErrorCode::UnknownField,
                    format!("unknown EnemyDef field <{other}>"),
                    doc,
                    field,
                ))
            }
        }
    }

    let Some(def_name) = def_name else {
        return Err(error_at_node(
            DefErrorCode::MissingField,
            "EnemyDef is missing <defName>".to_string(),
            doc,
            node,
        ));
    };
    let Some(max_hp) = max_hp else {
        return Err(error_at_node(
            DefErrorCode::MissingField,
            format!("EnemyDef '{def_name}' is missing <maxHp>"),
            doc,
            node,
        ));
    };
    if max_hp <= 0 {
        return Err(error_at_node(
            DefErrorCode::InvalidValue,
            format!("EnemyDef '{def_name}' maxHp must be > 0, got {max_hp}"),
            doc,
            node,
        ));
    }
    validate_barrage(&barrage, &def_name, doc, node)?;

    Ok(EnemyDef {
        label: label.unwrap_or_else(|| def_name.clone()),
        def_name,
        max_hp,
        contact_damage,
        max_move_speed,
        dash_speed,
        dash_delay_ms,
        view_range,
        barrage,
    })
}

fn parse_view_range(doc: &Document<'_>, node: Node<'_, '_>) -> Result<ViewRange, DefParseError> {
    Ok(ViewRange {
        width: attr(doc, node, "width")?,
        height: attr(doc, node, "height")?,
        offset_x: attr(doc, node, "offsetX")?,
        offset_y: attr(doc, node, "offsetY")?,
    })
}

fn parse_barrage(doc: &Document<'_>, node: Node<'_, '_>) -> Result<BarrageDef, DefParseError> {
    let spawn_x = attr(doc, node, "spawnX")?;
    let velocity_x = attr(doc, node, "velocityX")?;
    let damage = attr(doc, node, "damage")?;

    let mut lane_heights = Vec::<f32>::new();
    let mut patterns = Vec::<Vec<usize>>::new();
    for child in node.children().filter(|child| child.is_element()) {
        match child.tag_name().name() {
            "lanes" => lane_heights = parse_number_list(doc, child)?,
            "pattern" => patterns.push(parse_number_list(doc, child)?),
            other => {
                return Err(error_at_node(
                    DefErrorCode::UnknownField,
                    format!("unknown barrage field <{other}>"),
                    doc,
                    child,
                ))
            }
        }
    }

    Ok(BarrageDef {
        spawn_x,
        velocity_x,
        damage,
        lane_heights,
        patterns,
    })
}

fn validate_barrage(
    barrage: &BarrageDef,
    def_name: &str,
    doc: &Document<'_>,
    node: Node<'_, '_>,
) -> Result<(), DefParseError> {
    let invalid = |message: String| error_at_node(DefErrorCode::InvalidValue, message, doc, node);

    if barrage.lane_heights.is_empty() || barrage.patterns.is_empty() {
        return Err(invalid(format!(
            "EnemyDef '{def_name}' barrage needs lanes and at least one pattern"
        )));
    }
    let mut seen_triple = false;
    for pattern in &barrage.patterns {
        if pattern.len() != 2 && pattern.len() != 3 {
            return Err(invalid(format!(
                "EnemyDef '{def_name}' barrage patterns must list 2 or 3 lanes, got {}",
                pattern.len()
            )));
        }
        if pattern.len() == 3 {
            seen_triple = true;
        } else if seen_triple {
            return Err(invalid(format!(
                "EnemyDef '{def_name}' barrage must list 2-lane patterns before 3-lane patterns"
            )));
        }
        for &lane in pattern {
            if lane >= barrage.lane_heights.len() {
                return Err(invalid(format!(
                    "EnemyDef '{def_name}' barrage pattern references lane {lane} but only {} lanes exist",
                    barrage.lane_heights.len()
                )));
            }
        }
    }
    Ok(())
}

fn text_content(doc: &Document<'_>, node: Node<'_, '_>) -> Result<String, DefParseError> {
    match node.text().map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => Ok(text.to_string()),
        None => Err(error_at_node(
            DefErrorCode::InvalidValue,
            format!("<{}> must have text content", node.tag_name().name()),
            doc,
            node,
        )),
    }
}

fn parse_text<T: std::str::FromStr>(
    doc: &Document<'_>,
    node: Node<'_, '_>,
) -> Result<T, DefParseError> {
    let text = text_content(doc, node)?;
    text.parse().map_err(|_| {
        error_at_node(
            DefErrorCode::InvalidValue,
            format!("<{}> has invalid value '{text}'", node.tag_name().name()),
            doc,
            node,
        )
    })
}

fn parse_number_list<T: std::str::FromStr>(
    doc: &Document<'_>,
    node: Node<'_, '_>,
) -> Result<Vec<T>, DefParseError> {
    let text = text_content(doc, node)?;
    text.split_whitespace()
        .map(|entry| {
            entry.parse().map_err(|_| {
                error_at_node(
                    DefErrorCode::InvalidValue,
                    format!(
                        "<{}> has invalid entry '{entry}'",
                        node.tag_name().name()
                    ),
                    doc,
                    node,
                )
            })
        })
        .collect()
}

fn attr<T: std::str::FromStr>(
    doc: &Document<'_>,
    node: Node<'_, '_>,
    name: &str,
) -> Result<T, DefParseError> {
    let Some(raw) = node.attribute(name) else {
        return Err(error_at_node(
            DefErrorCode::MissingField,
            format!("<{}> is missing attribute '{name}'", node.tag_name().name()),
            doc,
            node,
        ));
    };
    raw.parse().map_err(|_| {
        error_at_node(
            DefErrorCode::InvalidValue,
            format!(
                "<{}> attribute '{name}' has invalid value '{raw}'",
                node.tag_name().name()
            ),
            doc,
            node,
        )
    })
}

fn error_at_node(
    code: DefErrorCode,
    message: String,
    doc: &Document<'_>,
    node: Node<'_, '_>,
) -> DefParseError {
    let pos = doc.text_pos_at(node.range().start);
    DefParseError {
        code,
        message,
        file_path: None,
        location: Some(SourceLocation {
            line: pos.row as usize,
            column: pos.col as usize,
        }),
    }
}
