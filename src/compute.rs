/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{Enemy, GameState, GameStatus, Key, Player, Projectile, Rect, Wave};

// ── World tuning ─────────────────────────────────────────────────────────────

/// Playfield dimensions in world units.  The host projects these onto
/// whatever surface it actually renders to.
pub const WORLD_WIDTH: f32 = 500.0;
pub const WORLD_HEIGHT: f32 = 700.0;

pub const PLAYER_SIZE: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const STARTING_LIVES: u32 = 3;

pub const PROJECTILE_WIDTH: f32 = 8.0;
pub const PROJECTILE_HEIGHT: f32 = 40.0;
pub const PROJECTILE_SPEED: f32 = 20.0;
/// Pool slots are allocated once at construction and recycled in place.
pub const POOL_SIZE: usize = 10;

pub const ENEMY_SIZE: f32 = 60.0;
pub const WAVE_SPEED_X: f32 = 2.0;
/// Downward easing per tick while a fresh wave is still above the screen.
pub const WAVE_ENTRY_STEP: f32 = 5.0;
pub const STARTING_COLUMNS: u32 = 2;
pub const STARTING_ROWS: u32 = 2;

/// Waves stop growing wider once their columns cover this share of the
/// playfield width, and stop growing taller at this share of the height.
const MAX_COLUMN_SHARE: f32 = 0.8;
const MAX_ROW_SHARE: f32 = 0.6;

// ── Hitboxes & collision ─────────────────────────────────────────────────────

pub fn player_hitbox(player: &Player) -> Rect {
    Rect {
        x: player.x,
        y: player.y,
        width: PLAYER_SIZE,
        height: PLAYER_SIZE,
    }
}

pub fn projectile_hitbox(projectile: &Projectile) -> Rect {
    Rect {
        x: projectile.x,
        y: projectile.y,
        width: PROJECTILE_WIDTH,
        height: PROJECTILE_HEIGHT,
    }
}

pub fn enemy_hitbox(enemy: &Enemy) -> Rect {
    Rect {
        x: enemy.x,
        y: enemy.y,
        width: ENEMY_SIZE,
        height: ENEMY_SIZE,
    }
}

/// Strict AABB overlap — boxes that merely touch do not collide.
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

/// Index of the first free slot in the projectile pool, if any.
pub fn free_projectile(pool: &[Projectile]) -> Option<usize> {
    pool.iter().position(|p| p.free)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a given playfield size.
pub fn init_state(width: f32, height: f32) -> GameState {
    let mut state = GameState {
        player: Player {
            x: width * 0.5 - PLAYER_SIZE * 0.5,
            y: height - PLAYER_SIZE,
            lives: STARTING_LIVES,
        },
        projectile_pool: vec![
            Projectile {
                x: 0.0,
                y: 0.0,
                free: true,
            };
            POOL_SIZE
        ],
        waves: Vec::new(),
        keys: Vec::new(),
        fired: false,
        columns: STARTING_COLUMNS,
        rows: STARTING_ROWS,
        wave_count: 1,
        score: 0,
        status: GameStatus::Playing,
        width,
        height,
    };
    let first = make_wave(&state);
    state.waves.push(first);
    state
}

/// Build a rows × columns grid of enemies, parked fully above the screen
/// so it can ease down into view.
fn make_wave(state: &GameState) -> Wave {
    let width = state.columns as f32 * ENEMY_SIZE;
    let height = state.rows as f32 * ENEMY_SIZE;
    let mut enemies = Vec::with_capacity((state.rows * state.columns) as usize);
    for row in 0..state.rows {
        for col in 0..state.columns {
            let position_x = col as f32 * ENEMY_SIZE;
            let position_y = row as f32 * ENEMY_SIZE;
            enemies.push(Enemy {
                position_x,
                position_y,
                // Seed the absolute position so a wave is drawn sensibly
                // even before its first update.
                x: position_x,
                y: -height + position_y,
                marked_for_deletion: false,
            });
        }
    }
    Wave {
        x: 0.0,
        y: -height,
        width,
        height,
        speed_x: WAVE_SPEED_X,
        speed_y: 0.0,
        enemies,
        trigger_next_wave: false,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Handle a discrete key-down event.  Fire is edge-triggered: the `fired`
/// latch blocks repeat shots until the key is released again.  Restart is
/// only honoured on the game-over screen.
pub fn press_key(state: &GameState, key: Key) -> GameState {
    let mut next = if key == Key::Fire && !state.fired {
        player_shoot(state)
    } else {
        state.clone()
    };
    if key == Key::Fire {
        next.fired = true;
    }
    if !next.keys.contains(&key) {
        next.keys.push(key);
    }
    if key == Key::Restart && next.status == GameStatus::GameOver {
        next = restart(&next);
    }
    next
}

/// Handle a discrete key-up event.
pub fn release_key(state: &GameState, key: Key) -> GameState {
    let mut next = state.clone();
    if key == Key::Fire {
        next.fired = false;
    }
    next.keys.retain(|k| *k != key);
    next
}

/// Fire one projectile from the pool, activated at the player's
/// horizontal centre and top edge.  Pool exhaustion is a silent no-op.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut next = state.clone();
    let start_x = next.player.x + PLAYER_SIZE * 0.5 - PROJECTILE_WIDTH * 0.5;
    let start_y = next.player.y;
    if let Some(i) = free_projectile(&next.projectile_pool) {
        let slot = &mut next.projectile_pool[i];
        slot.x = start_x;
        slot.y = start_y;
        slot.free = false;
    }
    next
}

/// Reset the session for a fresh run.  Projectiles already in flight and
/// the held-key set survive, matching the original ruleset.
pub fn restart(state: &GameState) -> GameState {
    let mut next = state.clone();
    next.player.x = next.width * 0.5 - PLAYER_SIZE * 0.5;
    next.player.y = next.height - PLAYER_SIZE;
    next.player.lives = STARTING_LIVES;
    next.columns = STARTING_COLUMNS;
    next.rows = STARTING_ROWS;
    next.waves.clear();
    let first = make_wave(&next);
    next.waves.push(first);
    next.wave_count = 1;
    next.score = 0;
    next.status = GameStatus::Playing;
    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness (wave growth)
/// comes through `rng` so callers control determinism.
///
/// The world keeps moving after game over — waves still march and
/// projectiles still fly — but scoring and wave spawning stop.  Only
/// `restart` returns to `Playing`.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();

    // ── 1. Player movement ───────────────────────────────────────────────────
    // Opposite keys both apply; holding both is a net zero.
    if next.keys.contains(&Key::Left) {
        next.player.x -= PLAYER_SPEED;
    }
    if next.keys.contains(&Key::Right) {
        next.player.x += PLAYER_SPEED;
    }
    // The ship may hang half off either edge, no further.
    let min_x = -PLAYER_SIZE * 0.5;
    let max_x = next.width - PLAYER_SIZE * 0.5;
    if next.player.x < min_x {
        next.player.x = min_x;
    } else if next.player.x > max_x {
        next.player.x = max_x;
    }

    // ── 2. Projectiles in flight ─────────────────────────────────────────────
    for projectile in &mut next.projectile_pool {
        if !projectile.free {
            projectile.y -= PROJECTILE_SPEED;
            if projectile.y < -PROJECTILE_HEIGHT {
                projectile.free = true;
            }
        }
    }

    // ── 3. Waves ─────────────────────────────────────────────────────────────
    // Snapshot the list length: a wave appended mid-frame by a completed
    // wave is not stepped until the next frame.
    let wave_count = next.waves.len();
    for i in 0..wave_count {
        let mut wave = next.waves[i].clone();
        step_wave(&mut wave, &mut next);

        // ── 4. Wave completion → spawn the successor ────────────────────────
        if wave.enemies.is_empty()
            && !wave.trigger_next_wave
            && next.status == GameStatus::Playing
        {
            grow_grid(&mut next, rng);
            let fresh = make_wave(&next);
            next.waves.push(fresh);
            next.wave_count += 1;
            wave.trigger_next_wave = true;
            next.player.lives += 1;
        }

        next.waves[i] = wave;
    }

    next
}

/// Move one wave and update every enemy in it.  Enemies marked for
/// deletion are dropped only after the whole grid has updated, so a
/// just-marked enemy still applies its side effects this frame.
fn step_wave(wave: &mut Wave, game: &mut GameState) {
    wave.speed_y = 0.0;
    // Ease a freshly spawned wave down into view.
    if wave.y < 0.0 {
        wave.y += WAVE_ENTRY_STEP;
    }
    // Bounce off either side and drop by one enemy row, this tick only.
    if wave.x < 0.0 || wave.x + wave.width > game.width {
        wave.speed_x = -wave.speed_x;
        wave.speed_y = ENEMY_SIZE;
    }
    wave.x += wave.speed_x;
    wave.y += wave.speed_y;

    for enemy in &mut wave.enemies {
        update_enemy(enemy, wave.x, wave.y, game);
    }
    wave.enemies.retain(|enemy| !enemy.marked_for_deletion);
}

/// Reposition one enemy from its wave's position plus its grid offset,
/// then run its collision checks in fixed order: projectiles, player,
/// bottom of the playfield.  An enemy already marked for deletion still
/// applies the later side effects within the same tick.
fn update_enemy(enemy: &mut Enemy, wave_x: f32, wave_y: f32, game: &mut GameState) {
    enemy.x = wave_x + enemy.position_x;
    enemy.y = wave_y + enemy.position_y;
    let hitbox = enemy_hitbox(enemy);

    for projectile in &mut game.projectile_pool {
        if !projectile.free && check_collision(&hitbox, &projectile_hitbox(projectile)) {
            enemy.marked_for_deletion = true;
            projectile.free = true;
            if game.status == GameStatus::Playing {
                game.score += 1;
            }
        }
    }

    if check_collision(&hitbox, &player_hitbox(&game.player)) {
        enemy.marked_for_deletion = true;
        if game.status == GameStatus::Playing && game.score > 0 {
            game.score -= 1;
        }
        game.player.lives = game.player.lives.saturating_sub(1);
        if game.player.lives < 1 {
            game.status = GameStatus::GameOver;
        }
    }

    if enemy.y + ENEMY_SIZE > game.height {
        game.status = GameStatus::GameOver;
        enemy.marked_for_deletion = true;
    }
}

/// Half the time a finished wave grows one column wider (until the grid
/// covers 80% of the field width); otherwise it grows one row taller
/// (until 60% of the field height).
fn grow_grid(state: &mut GameState, rng: &mut impl Rng) {
    if rng.gen_bool(0.5) && (state.columns as f32 * ENEMY_SIZE) < state.width * MAX_COLUMN_SHARE {
        state.columns += 1;
    } else if (state.rows as f32 * ENEMY_SIZE) < state.height * MAX_ROW_SHARE {
        state.rows += 1;
    }
}
