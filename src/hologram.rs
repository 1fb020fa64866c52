//! Character-grid hologram: a wall of dim glyphs with sweeping scan lines,
//! a feed of synthetic alerts and a click-triggered flash freeze.

pub mod alert;
pub mod grid;
pub mod scan;

use rand::RngCore;

use crate::color::{Color, Rgb};
use crate::config::HologramConfig;
use crate::geometry::{Axis, DVec2, Rect};
use crate::scene::{FrameInput, Scene};
use crate::schedule::{Interval, Schedule};
use crate::surface::{Paint, Surface};

use alert::{Alert, AlertFeed, AlertKind};
use grid::Grid;
use scan::ScanLine;

const PRIMARY_400: Rgb = Rgb::new(248, 123, 112);
const PRIMARY_600: Rgb = Rgb::new(220, 54, 38);
const SECONDARY_400: Rgb = Rgb::new(251, 191, 36);
const SECONDARY_500: Rgb = Rgb::new(245, 158, 11);

const ALERT_FONT: &str = "12px monospace";
const ALERT_MARGIN: f64 = 16.0;
const ALERT_LINE: f64 = 22.0;

/// Delayed transitions, checked at the top of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HologramEvent {
    Greeting,
    FlashOn,
    FlashOff,
    Unfreeze,
}

#[derive(Debug, Clone)]
pub struct Hologram {
    config: HologramConfig,
    width: f64,
    height: f64,
    grid: Grid,
    scan_lines: Vec<ScanLine>,
    alerts: AlertFeed,
    frozen: bool,
    refresh: Interval,
    alert_timer: Interval,
    events: Schedule<HologramEvent>,
    started: bool,
}

impl Hologram {
    pub fn new(config: HologramConfig, width: f64, height: f64, rng: &mut dyn RngCore) -> Self {
        let (rows, cols) = config.grid_dimensions(width, height);
        let grid = grid::generate_grid(rows, cols, &config, rng);

        let mut alerts = AlertFeed::new(config.alert_capacity);
        for i in (1..=config.alert_capacity).rev() {
            alerts.push(alert::emit_alert(rng, 0.0, format!("initial-{i}")));
        }

        log::debug!("hologram grid {rows}x{cols}");
        Self {
            refresh: Interval::new(config.refresh_ms),
            alert_timer: Interval::new(config.alert_interval_ms),
            config,
            width,
            height,
            grid,
            scan_lines: scan::default_scan_lines(),
            alerts,
            frozen: false,
            events: Schedule::new(),
            started: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn scan_lines(&self) -> &[ScanLine] {
        &self.scan_lines
    }

    pub fn alerts(&self) -> &AlertFeed {
        &self.alerts
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// One refresh tick: grid update plus scan-line advance.
    pub fn refresh_tick(&mut self, rng: &mut dyn RngCore) {
        self.grid = grid::update_grid(&self.grid, &self.config, rng);
        self.scan_lines = scan::tick(&self.scan_lines, self.grid.rows(), self.grid.cols());
    }

    fn apply(&mut self, event: HologramEvent, now_ms: f64) {
        match event {
            HologramEvent::Greeting => self.alerts.push(Alert {
                kind: AlertKind::Security,
                message: alert::GREETING.to_owned(),
                timestamp_ms: now_ms,
                id: format!("user-detected-{}", now_ms as u64),
            }),
            HologramEvent::FlashOn => self.grid = self.grid.with_flash(true),
            HologramEvent::FlashOff => self.grid = self.grid.with_flash(false),
            HologramEvent::Unfreeze => {
                self.frozen = false;
                self.refresh.reset();
                self.alert_timer.reset();
                log::debug!("hologram unfrozen");
            }
        }
    }

    fn scan_at(&self, row: usize, col: usize) -> Option<Axis> {
        self.scan_lines
            .iter()
            .find(|line| match line.axis {
                Axis::Vertical => line.position == col,
                Axis::Horizontal => line.position == row,
            })
            .map(|line| line.axis)
    }

    fn render_grid(&self, surface: &mut dyn Surface) {
        let pitch = self.config.cell_pitch;
        let font = format!("{}px monospace", (pitch * 0.6).round());

        for line in &self.scan_lines {
            let offset = line.position as f64 * pitch + pitch / 2.0;
            let (from, to) = match line.axis {
                Axis::Vertical => (DVec2::new(offset, 0.0), DVec2::new(offset, self.height)),
                Axis::Horizontal => (DVec2::new(0.0, offset), DVec2::new(self.width, offset)),
            };
            let paint = Paint::Gradient {
                start: from,
                end: to,
                from: PRIMARY_600.with_alpha(0.25),
                to: SECONDARY_500.with_alpha(0.25),
            };
            surface.stroke_line(from, to, &paint, pitch * 0.2);
        }

        for (row, col, cell) in self.grid.iter() {
            let origin = DVec2::new(col as f64 * pitch, row as f64 * pitch);
            let baseline = origin + DVec2::new(pitch * 0.3, pitch * 0.75);

            if let Some(axis) = self.scan_at(row, col) {
                let glyph = match axis {
                    Axis::Vertical => "|",
                    Axis::Horizontal => "-",
                };
                surface.fill_text(glyph, baseline, SECONDARY_500.with_alpha(cell.opacity.max(0.6)), &font);
                continue;
            }

            if cell.flash {
                surface.fill_rect(Rect::new(origin.x, origin.y, pitch, pitch), Rgb::WHITE.with_alpha(0.08));
                if !cell.is_blank() {
                    surface.fill_text(&cell.glyph.to_string(), baseline, Rgb::WHITE.with_alpha(1.0), &font);
                }
            } else if !cell.is_blank() {
                surface.fill_text(&cell.glyph.to_string(), baseline, SECONDARY_400.with_alpha(cell.opacity), &font);
            }
        }
    }

    fn render_alerts(&self, surface: &mut dyn Surface) {
        for (i, alert) in self.alerts.iter().enumerate() {
            let box_width = alert.message.chars().count() as f64 * 7.2 + 16.0;
            let top = ALERT_MARGIN + i as f64 * (ALERT_LINE + 8.0);
            let left = self.width - ALERT_MARGIN - box_width;
            surface.fill_rect(Rect::new(left, top, box_width, ALERT_LINE), Rgb::BLACK.with_alpha(0.9));

            let accent: Color = match alert.kind {
                AlertKind::Security => PRIMARY_400.with_alpha(1.0),
                _ => SECONDARY_400.with_alpha(1.0),
            };
            surface.fill_text(&alert.message, DVec2::new(left + 8.0, top + 15.0), accent, ALERT_FONT);
        }
    }
}

impl Scene for Hologram {
    fn name(&self) -> &'static str {
        "hologram"
    }

    fn resize(&mut self, width: f64, height: f64, rng: &mut dyn RngCore) {
        let (rows, cols) = self.config.grid_dimensions(width, height);
        self.width = width;
        self.height = height;
        self.grid = grid::generate_grid(rows, cols, &self.config, rng);
        self.scan_lines = scan::default_scan_lines();
        log::debug!("hologram grid resized to {rows}x{cols}");
    }

    fn frame(&mut self, input: &FrameInput, rng: &mut dyn RngCore) {
        let now = input.now_ms;
        if !self.started {
            self.started = true;
            self.events.after(now, self.config.greeting_delay_ms, HologramEvent::Greeting);
        }

        for event in self.events.drain_due(now) {
            self.apply(event, now);
        }

        if self.frozen {
            return;
        }
        // Ticks missed while the page was hidden collapse into one.
        if self.refresh.poll(now) > 0 {
            self.refresh_tick(rng);
        }
        if self.alert_timer.poll(now) > 0 {
            self.alerts.emit(rng, now);
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::viewport(self.width, self.height), Rgb::BLACK.with_alpha(1.0));
        self.render_grid(surface);
        self.render_alerts(surface);
    }

    /// Freezes the wall and plays a two-pulse flash.
    fn click(&mut self, now_ms: f64) {
        let flash = self.config.flash_ms;
        self.frozen = true;
        self.grid = self.grid.with_flash(true);
        self.events.after(now_ms, flash, HologramEvent::FlashOff);
        self.events.after(now_ms, flash * 2.0, HologramEvent::FlashOn);
        self.events.after(now_ms, flash * 3.0, HologramEvent::FlashOff);
        if let Some(release) = self.config.freeze_release_ms {
            self.events.after(now_ms, release, HologramEvent::Unfreeze);
        }
        log::info!("hologram frozen");
    }
}
