use cuppa::prelude::*;
use cuppa::renderer::raster::rasterize;
use image::RgbaImage;

/// Surface size every scenario renders at
pub const WIDTH: u32 = 480;
pub const HEIGHT: u32 = 360;

pub const BACKGROUND: Color = Color::from_hex(0x2B2D31);

/// Frame step used while settling a scenario
const FRAME_MS: Millis = 16;

/// A scripted interaction rendered as a still frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Untouched cup at home
    Docked,
    /// Mid-drag, tilted far enough to pour
    Pouring,
    /// Dragged left and right, then docked with less coffee
    Sipped,
    /// Released away from home and fallen off screen
    Fallen,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Docked,
        Scenario::Pouring,
        Scenario::Sipped,
        Scenario::Fallen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Docked => "docked",
            Scenario::Pouring => "pouring",
            Scenario::Sipped => "sipped",
            Scenario::Fallen => "fallen",
        }
    }

    /// Play the script on a fresh cup; returns the cup and the time to paint at
    pub fn play(&self) -> (CupWidget, Millis) {
        let mut cup = CupWidget::new(CupConfig::default());
        cup.set_viewport(WIDTH as f32, HEIGHT as f32);
        cup.mount(0);

        let now = match self {
            Scenario::Docked => settle(&mut cup, 0, 500),
            Scenario::Pouring => {
                let t = grab(&mut cup, 0);
                drag(&mut cup, t, -25.0, 0.0, 12)
            }
            Scenario::Sipped => {
                let t = grab(&mut cup, 0);
                let t = drag(&mut cup, t, -25.0, 0.0, 12);
                let t = drag(&mut cup, t, 25.0, 0.0, 12);
                let t = release(&mut cup, t);
                settle(&mut cup, t, 2600)
            }
            Scenario::Fallen => {
                let t = grab(&mut cup, 0);
                let t = drag(&mut cup, t, -20.0, 15.0, 10);
                let t = release(&mut cup, t);
                let mut t = t;
                while !cup.state().has_fallen && t < 10_000 {
                    t = settle(&mut cup, t, FRAME_MS);
                }
                settle(&mut cup, t, 2600)
            }
        };
        (cup, now)
    }

    /// Rasterize the scenario's final frame
    pub fn render(&self) -> RgbaImage {
        let (cup, now) = self.play();
        let mut ctx = PaintContext::new();
        cup.paint(&mut ctx, now);
        rasterize(&ctx, WIDTH, HEIGHT, BACKGROUND)
    }
}

fn pointer(cup: &CupWidget) -> (f32, f32) {
    cup.cup_rect()
        .map(|rect| rect.center())
        .unwrap_or((0.0, 0.0))
}

fn grab(cup: &mut CupWidget, t: Millis) -> Millis {
    let (x, y) = pointer(cup);
    cup.event(
        &Event::MouseDown {
            x,
            y,
            button: MouseButton::Left,
        },
        t,
    );
    t
}

fn drag(cup: &mut CupWidget, mut t: Millis, dx: f32, dy: f32, steps: usize) -> Millis {
    let (mut x, mut y) = pointer(cup);
    for _ in 0..steps {
        t += 10;
        x += dx;
        y += dy;
        cup.advance(t);
        cup.event(&Event::MouseMove { x, y }, t);
    }
    t
}

fn release(cup: &mut CupWidget, t: Millis) -> Millis {
    let (x, y) = pointer(cup);
    cup.event(
        &Event::MouseUp {
            x,
            y,
            button: MouseButton::Left,
        },
        t,
    );
    t
}

fn settle(cup: &mut CupWidget, start: Millis, duration: Millis) -> Millis {
    let end = start + duration;
    let mut t = start;
    while t < end {
        t = (t + FRAME_MS).min(end);
        cup.advance(t);
    }
    end
}
