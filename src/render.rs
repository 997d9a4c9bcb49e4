//! Canvas drawing for one frame. Images that have not finished loading are
//! replaced by flat rectangles so the game stays playable without assets.

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::config::AssetPaths;
use crate::model::{GamePhase, GameState};
use crate::state::TouchJoystick;
use crate::state::joystick::RADIUS;

// Screen-fixed placement `(x, y, w, h)` of each growing-tree picture.
const TREE_STAGE_RECTS: [(f64, f64, f64, f64); 4] = [
    (400.0, 400.0, 100.0, 100.0),
    (400.0, 400.0, 100.0, 110.0),
    (400.0, 400.0, 100.0, 110.0),
    (400.0, 390.0, 100.0, 110.0),
];

pub struct Sprites {
    background: Option<HtmlImageElement>,
    player: Option<HtmlImageElement>,
    energy: Option<HtmlImageElement>,
    enemy: Option<HtmlImageElement>,
    tree_energy: Option<HtmlImageElement>,
    tree_stages: Vec<Option<HtmlImageElement>>,
    victory: Option<HtmlImageElement>,
}

fn image(src: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(src);
    Some(img)
}

fn ready(img: &Option<HtmlImageElement>) -> Option<&HtmlImageElement> {
    img.as_ref().filter(|i| i.complete() && i.natural_width() > 0)
}

impl Sprites {
    pub fn load(paths: &AssetPaths) -> Self {
        Self {
            background: image(paths.background),
            player: image(paths.player),
            energy: image(paths.energy),
            enemy: image(paths.enemy),
            tree_energy: image(paths.tree_energy),
            tree_stages: paths.tree_stages.iter().map(|p| image(p)).collect(),
            victory: image(paths.victory),
        }
    }
}

/// Which growing-tree picture to show for a collected count, if any.
pub fn tree_stage(collected: u32, stages: usize) -> Option<usize> {
    let n = collected as usize;
    (1..=stages).contains(&n).then(|| n - 1)
}

pub fn energy_bar_width(energy: i32, max: i32, full: f64) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    (energy.clamp(0, max) as f64 / max as f64) * full
}

pub fn hud_labels(game: &GameState) -> (String, String) {
    (
        format!(
            "Collected Trees: {}/{}",
            game.collected_trees, game.config.total_trees
        ),
        format!("Timer: {}s", game.countdown.remaining),
    )
}

fn image_or_rect(
    ctx: &CanvasRenderingContext2d,
    img: &Option<HtmlImageElement>,
    fallback: &str,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) {
    match ready(img) {
        Some(img) => {
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h);
        }
        None => {
            ctx.set_fill_style_str(fallback);
            ctx.fill_rect(x, y, w, h);
        }
    }
}

pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    sprites: &Sprites,
    game: &GameState,
    joystick: &TouchJoystick,
) {
    let view = game.config.viewport;
    let world = game.level.world;
    let cam = game.camera;

    ctx.set_fill_style_str("#1b2a1b");
    ctx.fill_rect(0.0, 0.0, view.width, view.height);
    image_or_rect(
        ctx,
        &sprites.background,
        "#3d5a36",
        -cam.offset_x,
        -cam.offset_y,
        world.width,
        world.height,
    );

    draw_objects(ctx, sprites, game);
    draw_toolbar(ctx, game);
    draw_energy_bar(ctx, game);

    if game.phase == GamePhase::Won {
        draw_victory(ctx, sprites, game);
        return;
    }

    draw_player(ctx, sprites, game);
    if joystick.active() {
        draw_joystick(ctx, joystick);
    }
}

fn draw_objects(ctx: &CanvasRenderingContext2d, sprites: &Sprites, game: &GameState) {
    let cam = game.camera;
    for orb in game.entities.live_orbs() {
        let (x, y) = cam.to_screen(orb.pos.x, orb.pos.y);
        image_or_rect(ctx, &sprites.energy, "#f2d13a", x, y, 30.0, 30.0);
    }
    for hazard in game.entities.live_hazards() {
        let (x, y) = cam.to_screen(hazard.pos.x, hazard.pos.y);
        image_or_rect(ctx, &sprites.enemy, "#5a1f1f", x, y, 50.0, 50.0);
    }
    for tree in game.entities.live_trees() {
        let (x, y) = cam.to_screen(tree.pos.x, tree.pos.y);
        image_or_rect(ctx, &sprites.tree_energy, "#39b54a", x, y, 32.0, 35.0);
    }
    let stages = sprites.tree_stages.len().min(TREE_STAGE_RECTS.len());
    if let Some(stage) = tree_stage(game.collected_trees, stages) {
        let (x, y, w, h) = TREE_STAGE_RECTS[stage];
        image_or_rect(ctx, &sprites.tree_stages[stage], "#2f7a34", x, y, w, h);
    }
}

fn draw_toolbar(ctx: &CanvasRenderingContext2d, game: &GameState) {
    let w = game.config.viewport.width;
    ctx.set_fill_style_str("white");
    ctx.fill_rect(0.0, 20.0, w, 40.0);
    let (trees, timer) = hud_labels(game);
    ctx.set_fill_style_str("brown");
    ctx.set_font("16px Arial");
    let _ = ctx.fill_text(&trees, 10.0, 45.0);
    let _ = ctx.fill_text(&timer, w - 100.0, 45.0);
}

fn draw_energy_bar(ctx: &CanvasRenderingContext2d, game: &GameState) {
    let w = game.config.viewport.width;
    ctx.set_fill_style_str("brown");
    ctx.fill_rect(0.0, 0.0, w, 20.0);
    ctx.set_fill_style_str("pink");
    ctx.fill_rect(
        0.0,
        0.0,
        energy_bar_width(game.player.energy, game.config.max_energy, w),
        20.0,
    );
}

fn draw_player(ctx: &CanvasRenderingContext2d, sprites: &Sprites, game: &GameState) {
    let p = &game.player;
    let (x, y) = game.camera.to_screen(p.x, p.y);
    let size = game.config.player_draw_size;
    match ready(&sprites.player) {
        Some(img) => {
            let (sx, sy, sw, sh) = game.animation.source_rect(p.facing, game.config.sprite_cell);
            let _ = ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img, sx, sy, sw, sh, x, y, size, size,
                );
        }
        None => {
            ctx.set_fill_style_str("#8b5a2b");
            ctx.fill_rect(x, y, size, size);
        }
    }
}

fn draw_victory(ctx: &CanvasRenderingContext2d, sprites: &Sprites, game: &GameState) {
    let view = game.config.viewport;
    match ready(&sprites.victory) {
        Some(img) => {
            let _ = ctx
                .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    img, 0.0, 0.0, 474.0, 596.0, 0.0, 0.0, view.width, view.height,
                );
        }
        None => {
            ctx.set_fill_style_str("#bfd8b8");
            ctx.fill_rect(0.0, 0.0, view.width, view.height);
        }
    }
    ctx.set_fill_style_str("brown");
    ctx.set_font("16px Arial");
    let _ = ctx.fill_text("YOU WON!!", 200.0, 350.0);
}

fn draw_joystick(ctx: &CanvasRenderingContext2d, js: &TouchJoystick) {
    let Some((ox, oy)) = js.origin else {
        return;
    };
    ctx.set_stroke_style_str("saddlebrown");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    let _ = ctx.arc(ox, oy, RADIUS, 0.0, std::f64::consts::PI * 2.0);
    ctx.stroke();
    ctx.set_fill_style_str("rgba(139,69,19,0.6)");
    ctx.begin_path();
    let _ = ctx.arc(js.knob_x, js.knob_y, RADIUS * 0.4, 0.0, std::f64::consts::PI * 2.0);
    ctx.fill();
}
