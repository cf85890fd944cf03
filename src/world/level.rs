//! Level loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: `save_level` compresses, `serialize_level` stays plain text

use std::fs;
use std::io::Cursor;
use std::path::Path;
use super::{Level, Platform, MonolithDef, HAT_COLOR};
use crate::math::Vec3;

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of platforms in a level
    pub const MAX_PLATFORMS: usize = 4096;
    /// Maximum palette entries
    pub const MAX_COLORS: usize = 256;
    /// Maximum level name length
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 100_000.0;
    /// Maximum ticks for any animation setting
    pub const MAX_TICKS: u32 = 10_000;
}

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl From<ron::Error> for LevelError {
    fn from(e: ron::Error) -> Self {
        LevelError::SerializeError(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for LevelError {}

/// Check if a float is valid (not NaN or Inf)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn validate_position(v: Vec3, context: &str) -> Result<(), String> {
    if !is_valid_float(v.x) || !is_valid_float(v.y) || !is_valid_float(v.z) {
        return Err(format!("{}: invalid position ({}, {}, {})", context, v.x, v.y, v.z));
    }
    Ok(())
}

fn validate_size(value: f32, what: &str, context: &str) -> Result<(), String> {
    if !is_valid_float(value) || value <= 0.0 {
        return Err(format!("{}: {} must be positive, got {}", context, what, value));
    }
    Ok(())
}

fn validate_color(color: usize, palette_len: usize, context: &str) -> Result<(), String> {
    if color >= palette_len {
        return Err(format!("{}: color {} out of range (palette has {})", context, color, palette_len));
    }
    Ok(())
}

/// Validate a platform
fn validate_platform(platform: &Platform, idx: usize, palette_len: usize) -> Result<(), String> {
    let context = format!("platform[{}]", idx);
    validate_position(platform.position, &context)?;
    validate_size(platform.width, "width", &context)?;
    validate_size(platform.height, "height", &context)?;
    if let Some(length) = platform.length {
        validate_size(length, "length", &context)?;
    }
    if let Some(angle) = platform.angle {
        if !angle.is_finite() {
            return Err(format!("{}: invalid angle {}", context, angle));
        }
    }
    validate_color(platform.color, palette_len, &context)
}

fn validate_monolith(monolith: &MonolithDef, palette_len: usize) -> Result<(), String> {
    let context = "monolith";
    validate_position(monolith.position, context)?;
    validate_size(monolith.width, "width", context)?;
    validate_size(monolith.height, "height", context)?;
    if !is_valid_float(monolith.rise) || monolith.rise < 0.0 {
        return Err(format!("{}: rise must be non-negative, got {}", context, monolith.rise));
    }
    validate_color(monolith.color, palette_len, context)
}

/// Validate an entire level
pub fn validate_level(level: &Level) -> Result<(), LevelError> {
    let fail = |msg: String| Err(LevelError::ValidationError(msg));

    if level.name.len() > limits::MAX_STRING_LEN {
        return fail(format!("name too long ({} > {})", level.name.len(), limits::MAX_STRING_LEN));
    }
    if level.colors.len() <= HAT_COLOR {
        return fail(format!("palette needs at least {} colors for the player", HAT_COLOR + 1));
    }
    if level.colors.len() > limits::MAX_COLORS {
        return fail(format!("too many colors ({} > {})", level.colors.len(), limits::MAX_COLORS));
    }
    if level.platforms.len() > limits::MAX_PLATFORMS {
        return fail(format!(
            "too many platforms ({} > {})", level.platforms.len(), limits::MAX_PLATFORMS
        ));
    }

    validate_position(level.spawn, "spawn").map_err(LevelError::ValidationError)?;

    for (i, platform) in level.platforms.iter().enumerate() {
        validate_platform(platform, i, level.colors.len())
            .map_err(LevelError::ValidationError)?;
    }

    if let Some(goal) = level.goal {
        if goal >= level.platforms.len() {
            return fail(format!(
                "goal {} out of range (only {} platforms)", goal, level.platforms.len()
            ));
        }
    }

    if let Some(monolith) = &level.monolith {
        validate_monolith(monolith, level.colors.len()).map_err(LevelError::ValidationError)?;
    }

    let physics = &level.physics;
    let tuning = [
        ("acceleration", physics.acceleration),
        ("friction", physics.friction),
        ("gravity", physics.gravity),
        ("jump_hold_gravity", physics.jump_hold_gravity),
        ("jump_velocity", physics.jump_velocity),
        ("respawn_fall_speed", physics.respawn_fall_speed),
        ("camera_follow", physics.camera_follow),
        ("camera_lead", physics.camera_lead),
        ("teleport_ease_rate", physics.teleport_ease_rate),
    ];
    for (name, value) in tuning {
        if !value.is_finite() || value < 0.0 {
            return fail(format!("physics.{} must be finite and non-negative, got {}", name, value));
        }
    }
    if !(0.0..=1.0).contains(&physics.friction) {
        return fail(format!("physics.friction must be within 0..=1, got {}", physics.friction));
    }
    if !is_valid_float(physics.camera_size) || physics.camera_size <= 0.0 {
        return fail(format!("physics.camera_size must be positive, got {}", physics.camera_size));
    }
    for (name, ticks) in [("shift_ticks", physics.shift_ticks), ("monolith_rise_ticks", physics.monolith_rise_ticks)] {
        if ticks == 0 || ticks > limits::MAX_TICKS {
            return fail(format!("physics.{} must be within 1..={}, got {}", name, limits::MAX_TICKS, ticks));
        }
    }

    Ok(())
}

/// Parse and validate a level from RON text
pub fn load_level_from_str(contents: &str) -> Result<Level, LevelError> {
    let level: Level = ron::from_str(contents)?;
    validate_level(&level)?;
    Ok(level)
}

/// Load a level from a RON file (supports both compressed and uncompressed)
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level, LevelError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;

    // Detect format: RON files start with '(' or whitespace, brotli is binary
    let is_plain_ron = bytes
        .first()
        .map(|&b| b == b'(' || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t' || b == b'/')
        .unwrap_or(false);

    let contents = if is_plain_ron {
        String::from_utf8(bytes)
            .map_err(|e| LevelError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8: {}", e)
            )))?
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(&bytes), &mut decompressed)
            .map_err(|e| LevelError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("brotli decompression failed: {}", e)
            )))?;
        String::from_utf8(decompressed)
            .map_err(|e| LevelError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8 after decompression: {}", e)
            )))?
    };

    match load_level_from_str(&contents) {
        Ok(level) => {
            log::info!(
                "loaded level '{}' from {} ({} platforms)",
                level.name,
                path.display(),
                level.platforms.len()
            );
            Ok(level)
        }
        Err(LevelError::ParseError(e)) => {
            log::error!("RON parse error in {}: {}", path.display(), e);
            let lines: Vec<&str> = contents.lines().collect();
            let line_idx = e.position.line.saturating_sub(1);
            if let Some(line) = lines.get(line_idx) {
                log::error!("  Line {}: {}", e.position.line, line.trim_end());
            }
            Err(LevelError::ParseError(e))
        }
        Err(e) => Err(e),
    }
}

/// Serialize a level to pretty-printed RON
pub fn serialize_level(level: &Level) -> Result<String, LevelError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(level, config)?)
}

/// Save a level to a compressed RON file (brotli)
pub fn save_level<P: AsRef<Path>>(level: &Level, path: P) -> Result<(), LevelError> {
    let ron_string = serialize_level(level)?;

    // Compress with brotli (quality 6, window 22 - good balance of speed/ratio)
    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut Cursor::new(ron_string.as_bytes()), &mut compressed, &brotli::enc::BrotliEncoderParams {
        quality: 6,
        lgwin: 22,
        ..Default::default()
    }).map_err(|e| LevelError::IoError(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("brotli compression failed: {}", e)
    )))?;

    fs::write(path, compressed)?;
    Ok(())
}
