//! The frame loop.
//!
//! One call to [`Director::frame`] is one iteration: wait for the clock,
//! render, check for loss, then update the world.  Rendering and updates never
//! overlap.

use std::rc::Rc;

use rand::Rng;

use crate::assets::Assets;
use crate::compute::{
    advance_enemies, advance_player_projectiles, apply_input, check_play_area, init_state,
    is_lost, spawn_wave,
};
use crate::config::GameplaySettings;
use crate::display::{Font, InputEvent, Presentation, Surface};
use crate::entities::{GameState, GameStatus};
use crate::error::GameError;
use crate::sprite::{Image, Rgb};

/// Gap between the HUD labels and the screen edge.
const HUD_MARGIN: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// Window-level quit request.
    Quit,
    Escape,
    /// The loss banner has been shown for the full grace period.
    LossTimeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(ExitReason),
}

pub struct Director<R: Rng> {
    state: GameState,
    assets: Assets,
    background: Rc<Image>,
    tuning: GameplaySettings,
    rng: R,
}

impl<R: Rng> Director<R> {
    /// Build a session for a `width`×`height` play area.  Fails if the area
    /// cannot hold a wave.
    pub fn new(
        assets: Assets,
        tuning: GameplaySettings,
        width: i32,
        height: i32,
        rng: R,
    ) -> Result<Self, GameError> {
        check_play_area(&assets, width, height)?;
        let state = init_state(&assets, width, height, tuning.player_lives);
        let background = Rc::new(assets.background.scale(width, height));
        Ok(Self {
            state,
            assets,
            background,
            tuning,
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Run frames until one asks to exit.
    pub fn run<P: Presentation>(&mut self, presentation: &mut P) -> Result<ExitReason, GameError> {
        presentation.set_icon(&self.assets.icon);
        loop {
            if let Flow::Exit(reason) = self.frame(presentation)? {
                log::info!(
                    "exiting ({reason:?}) at level {}, {} lives",
                    self.state.level,
                    self.state.lives
                );
                return Ok(reason);
            }
        }
    }

    pub fn frame<P: Presentation>(&mut self, presentation: &mut P) -> Result<Flow, GameError> {
        presentation.tick(self.tuning.fps);
        self.render(presentation)?;

        if is_lost(&self.state) {
            if self.state.status == GameStatus::Playing {
                log::info!(
                    "game lost at level {} (lives {}, health {})",
                    self.state.level,
                    self.state.lives,
                    self.state.player.ship.health
                );
            }
            self.state.status = GameStatus::Lost;
            self.state.lost_frames += 1;
        }
        if self.state.status == GameStatus::Lost {
            if self.state.lost_frames > self.tuning.loss_grace_frames() {
                return Ok(Flow::Exit(ExitReason::LossTimeout));
            }
            return Ok(Flow::Continue);
        }

        if self.state.enemies.is_empty() {
            spawn_wave(&mut self.state, &self.assets, &mut self.rng);
        }

        let quit = presentation
            .poll_events()
            .into_iter()
            .any(|event| event == InputEvent::Quit);
        if quit {
            return Ok(Flow::Exit(ExitReason::Quit));
        }

        let keys = presentation.key_state();
        if keys.escape {
            return Ok(Flow::Exit(ExitReason::Escape));
        }
        apply_input(&mut self.state, &keys, self.tuning.player_speed);

        advance_enemies(&mut self.state, &self.tuning, &mut self.rng);
        advance_player_projectiles(&mut self.state, &self.tuning);

        Ok(Flow::Continue)
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<(), GameError> {
        let state = &self.state;
        surface.blit(&self.background, (0, 0));

        let lives = surface.render_text(Font::Hud, &format!("Lives: {}", state.lives), Rgb::WHITE);
        let level = surface.render_text(Font::Hud, &format!("Level: {}", state.level), Rgb::WHITE);
        surface.blit_label(&lives, (HUD_MARGIN, HUD_MARGIN));
        surface.blit_label(
            &level,
            (state.width - level.width - HUD_MARGIN, HUD_MARGIN),
        );

        for enemy in &state.enemies {
            enemy.draw(surface);
        }
        state.player.draw(surface);

        if state.status == GameStatus::Lost {
            let banner = surface.render_text(Font::Banner, "You lost!!", Rgb::WHITE);
            surface.blit_label(
                &banner,
                (state.width / 2 - banner.width / 2, state.height / 2),
            );
        }

        surface.present()
    }
}
