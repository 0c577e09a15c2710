//! BeeHive entry point
//!
//! The native build plays one unattended round on a headless platform and
//! reports the result. Usage: `beehive [tuning.json] [max_frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use beehive::consts::FRAMES_PER_SECOND;
    use beehive::persistence::FileStore;
    use beehive::platform::HeadlessPlatform;
    use beehive::{Session, Tuning};

    env_logger::init();
    log::info!("BeeHive (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    // Ten minutes of play unless told otherwise
    let max_frames: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(FRAMES_PER_SECOND as u64 * 600);

    let platform = HeadlessPlatform::new(tuning.seed);
    let mut session = Session::new(tuning, platform, FileStore::default());
    session.new_game();

    let mut frames = 0;
    while !session.is_game_over() && frames < max_frames {
        session.tick();
        frames += 1;
    }

    let platform = session.platform();
    log::info!(
        "Stopped after {} frames ({}s): score {}, lives {}, high score {}, {} sounds, {} sprites",
        frames,
        frames / FRAMES_PER_SECOND as u64,
        session.current_score(),
        session.current_lives(),
        session.high_score(),
        platform.sounds_played(),
        platform.sprites_drawn()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives `beehive::Session` directly
}
