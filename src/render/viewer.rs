//! Blocking plot window
//!
//! Shows a rendered figure in a native window until the user closes it or
//! presses `q`.

use eframe::egui;
use tracing::debug;

use super::figure::RenderedPlot;
use crate::error::{PlotError, Result};

/// Hint printed before the window takes over
pub const QUIT_HINT: &str = "press 'q' to quit...";

struct PlotViewer {
    plot: RenderedPlot,
    texture: Option<egui::TextureHandle>,
}

impl PlotViewer {
    fn new(plot: RenderedPlot) -> Self {
        PlotViewer {
            plot,
            texture: None,
        }
    }
}

impl eframe::App for PlotViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            debug!("Quit key pressed, closing viewer");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let plot = &self.plot;
        let texture = self.texture.get_or_insert_with(|| {
            let image = egui::ColorImage::from_rgb(
                [plot.width as usize, plot.height as usize],
                &plot.pixels,
            );
            ctx.load_texture("gridplot", image, egui::TextureOptions::LINEAR)
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(&*texture).shrink_to_fit());
                });
            });
    }
}

/// Show the plot and block until the window is closed
pub fn show(plot: RenderedPlot, title: &str) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([plot.width as f32, plot.height as f32]),
        ..Default::default()
    };

    println!("{}", QUIT_HINT);

    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(PlotViewer::new(plot)))),
    )
    .map_err(|e| PlotError::Viewer(e.to_string()))
}
