/// All game entity types — pure data, no logic.

/// Abstract input identifiers delivered by the host terminal layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Restart,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Axis-aligned bounding box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub lives: u32,
}

/// One reusable slot in the projectile pool.  A `free` slot is inactive
/// and available for the next shot; its position is meaningless until
/// the next activation.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub free: bool,
}

// ── Enemies & waves ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    /// Fixed offset within the owning wave's grid.
    pub position_x: f32,
    pub position_y: f32,
    /// Absolute position, recomputed from the wave position every tick.
    pub x: f32,
    pub y: f32,
    pub marked_for_deletion: bool,
}

/// A rigid grid of enemies that moves and bounces as one body.
#[derive(Clone, Debug)]
pub struct Wave {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub enemies: Vec<Enemy>,
    /// Set once this wave has spawned its successor, so an emptied wave
    /// left in the list never triggers twice.
    pub trigger_next_wave: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Fixed-size pool; `free` flags partition it into active/inactive.
    pub projectile_pool: Vec<Projectile>,
    /// Append-only; emptied waves stay behind, inert.
    pub waves: Vec<Wave>,
    /// Currently-held input keys, deduplicated.
    pub keys: Vec<Key>,
    /// Press latch: suppresses repeat fire while the fire key stays held.
    pub fired: bool,
    /// Grid dimensions for the next wave to spawn.
    pub columns: u32,
    pub rows: u32,
    pub wave_count: u32,
    pub score: u32,
    pub status: GameStatus,
    pub width: f32,
    pub height: f32,
}
