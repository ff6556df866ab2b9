// src/gui/app.rs
use std::error::Error;

use eframe::egui::{
    self, Align2, CursorIcon, FontId, Sense, ViewportBuilder, ViewportCommand, pos2,
};

use crate::{
    config::{
        WidgetOptions,
        consts::{APP_TITLE, LINE_HEIGHT, TOP_MARGIN},
    },
    present::Presenter,
    prices::PriceTable,
    runner::Startup,
    shell,
};

const TEXT_LEFT: f32 = 5.0;
const FONT_SIZE: f32 = 14.0;

/// Borderless, always-on-top, no taskbar entry.
pub fn viewport(opts: &WidgetOptions) -> ViewportBuilder {
    let w = &opts.window;
    let vp = ViewportBuilder::default()
        .with_title(APP_TITLE)
        .with_inner_size([w.width, w.height])
        .with_decorations(false)
        .with_resizable(false)
        .with_taskbar(false);
    if w.always_on_top { vp.with_always_on_top() } else { vp }
}

pub fn run(options: eframe::NativeOptions, opts: WidgetOptions, startup: Startup) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(App::new(opts, startup)))),
    )?;
    Ok(())
}

pub struct App {
    pub opts: WidgetOptions,
    pub table: PriceTable,

    // load warning, shown until dismissed
    pub warning: Option<String>,

    // moved to the top-right corner yet?
    placed: bool,
}

impl App {
    pub fn new(opts: WidgetOptions, startup: Startup) -> Self {
        logf!("Init: {} categor(ies) loaded, fetched={}", startup.table.found(), startup.fetched);
        Self {
            opts,
            table: startup.table,
            warning: startup.warning,
            placed: false,
        }
    }

    /// The monitor size is only known once the window exists.
    fn place_once(&mut self, ctx: &egui::Context) {
        if self.placed { return; }
        let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) else { return };
        let w = &self.opts.window;
        let x = (monitor.x - w.width - w.margin).max(0.0);
        ctx.send_viewport_cmd(ViewportCommand::OuterPosition(pos2(x, w.margin)));
        self.placed = true;
        logd!("UI: placed at ({x}, {}) on {}x{}", w.margin, monitor.x, monitor.y);
    }

    fn draw_warning(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.warning.as_deref() else { return };
        let mut dismissed = false;

        egui::Window::new("Warning")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(msg);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            logd!("UI: load warning dismissed");
            self.warning = None;
        }
    }

    /// Lines 0..=3 open the map for a present entry; anything else closes.
    fn on_click(&self, ctx: &egui::Context, row: Option<usize>) {
        let presenter = Presenter::new(&self.table, &self.opts.trip);
        match row.filter(|&i| Presenter::line_index_to_category(i).is_some()) {
            Some(i) => match presenter.coordinates_for_line(i) {
                Some((lat, lon)) => {
                    logf!("UI: open map for line {i}");
                    shell::open_map(lat, lon);
                }
                None => logd!("UI: line {i} has no entry, ignoring click"),
            },
            None => {
                logf!("UI: click outside price lines, closing");
                ctx.send_viewport_cmd(ViewportCommand::Close);
            }
        }
    }
}

/// Central panel without inner margin, so the click area is the whole window.
fn panel_frame(style: &egui::Style) -> egui::Frame {
    egui::Frame::central_panel(style).inner_margin(egui::Margin::ZERO)
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.place_once(ctx);

        let modal = self.warning.is_some();
        let lines = Presenter::new(&self.table, &self.opts.trip).render();

        egui::CentralPanel::default().frame(panel_frame(&ctx.style())).show(ctx, |ui| {
            let rect = ui.max_rect();
            let painter = ui.painter();
            let color = ui.visuals().text_color();

            for (i, line) in lines.iter().enumerate() {
                let y = rect.top() + TOP_MARGIN + LINE_HEIGHT * (i as f32 + 0.5);
                painter.text(
                    pos2(rect.left() + TEXT_LEFT, y),
                    Align2::LEFT_CENTER,
                    line,
                    FontId::proportional(FONT_SIZE),
                    color,
                );
            }

            if modal { return; }

            let resp = ui.interact(rect, ui.id().with("lines"), Sense::click());
            let row_of = |y: f32| Presenter::row_at(y - rect.top(), TOP_MARGIN, LINE_HEIGHT);

            if let Some(pos) = resp.hover_pos() {
                let clickable = row_of(pos.y)
                    .and_then(Presenter::line_index_to_category)
                    .is_some_and(|cat| self.table.is_present(cat));
                if clickable {
                    ctx.set_cursor_icon(CursorIcon::PointingHand);
                }
            }

            if resp.clicked() {
                let row = resp.interact_pointer_pos().and_then(|p| row_of(p.y));
                self.on_click(ctx, row);
            }
        });

        self.draw_warning(ctx);
    }
}
