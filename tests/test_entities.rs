use invaders::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Key::Left, Key::Left);
    assert_ne!(Key::Left, Key::Right);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);

    // Clone must produce an equal value
    let status = GameStatus::GameOver;
    assert_eq!(status.clone(), GameStatus::GameOver);
}

#[test]
fn rect_is_plain_copyable_data() {
    let a = Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 };
    let b = a; // Copy, not move
    assert_eq!(a, b);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player { x: 200.0, y: 600.0, lives: 3 },
        projectile_pool: vec![Projectile { x: 0.0, y: 0.0, free: true }; 10],
        waves: vec![Wave {
            x: 0.0,
            y: -120.0,
            width: 120.0,
            height: 120.0,
            speed_x: 2.0,
            speed_y: 0.0,
            enemies: Vec::new(),
            trigger_next_wave: false,
        }],
        keys: Vec::new(),
        fired: false,
        columns: 2,
        rows: 2,
        wave_count: 1,
        score: 0,
        status: GameStatus::Playing,
        width: 500.0,
        height: 700.0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.keys.push(Key::Fire);
    cloned.waves[0].enemies.push(Enemy {
        position_x: 0.0,
        position_y: 0.0,
        x: 0.0,
        y: 0.0,
        marked_for_deletion: false,
    });
    cloned.projectile_pool[0].free = false;

    assert_eq!(original.player.x, 200.0);
    assert_eq!(original.score, 0);
    assert!(original.keys.is_empty());
    assert!(original.waves[0].enemies.is_empty());
    assert!(original.projectile_pool[0].free);
}
