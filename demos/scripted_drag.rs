//! Drags the cup across the surface from a background thread, lets it fall,
//! and writes the final frame to `target/scripted_drag.png`.
//!
//! Run with `RUST_LOG=cuppa=debug cargo run --example scripted_drag` to see
//! the pour and fall transitions.

use std::path::Path;
use std::thread;
use std::time::Duration;

use cuppa::prelude::*;
use cuppa::renderer::raster::save_png;

const WIDTH: f32 = 800.0;
const HEIGHT: f32 = 600.0;

fn main() -> cuppa::Result<()> {
    let mut host = CupHost::new(CupConfig::default(), WIDTH, HEIGHT)?;
    let (start_x, start_y) = host
        .cup()
        .cup_rect()
        .map(|rect| rect.center())
        .unwrap_or((WIDTH - 88.0, 80.0));

    let input = host.sender();
    thread::spawn(move || {
        let _ = input.send(Event::MouseDown {
            x: start_x,
            y: start_y,
            button: MouseButton::Left,
        });

        // Fling to the left and down, fast enough to pour
        let (mut x, mut y) = (start_x, start_y);
        for _ in 0..30 {
            thread::sleep(Duration::from_millis(10));
            x -= 18.0;
            y += 8.0;
            let _ = input.send(Event::MouseMove { x, y });
        }

        let _ = input.send(Event::MouseUp {
            x,
            y,
            button: MouseButton::Left,
        });
    });

    let poured = host.run_until(Duration::from_secs(2), |cup| cup.coffee_level() < 100.0)?;
    log::info!("Poured during drag: {}", poured);

    let fallen = host.run_until(Duration::from_secs(5), |cup| cup.state().has_fallen)?;
    let state = host.cup().state();
    println!(
        "fallen: {}, level: {:.1}, drops in flight: {}, frames painted: {}",
        fallen,
        state.coffee_level,
        state.spill_drops.len(),
        host.frames_painted()
    );

    let output = Path::new(env!("CARGO_MANIFEST_DIR")).join("target/scripted_drag.png");
    save_png(
        host.frame(),
        WIDTH as u32,
        HEIGHT as u32,
        Color::from_hex(0x2B2D31),
        &output,
    )?;
    println!("Wrote {}", output.display());

    Ok(())
}
