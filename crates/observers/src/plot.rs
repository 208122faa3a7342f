//! Live window that plays an animation as it is driven.
//!
//! See [`LiveAnimation`] for usage.

use std::time::Duration;

use clockwork_animate::{AnimationDriver, Frame, TrajectoryPlayer};
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

/// Configuration for a [`LiveAnimation`] window.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// live.show(ShowConfig::new().title("Clock").legend().frame_interval(Duration::from_millis(20)))?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    frame_interval: Duration,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, 50 frames
    /// per second.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            frame_interval: Duration::from_millis(20),
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each pendulum.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Sets the wall-clock time between frames.
    #[must_use]
    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Plays an animation in a native window, one driver tick per repaint.
///
/// The left panel shows each trajectory in phase space with a marker at the
/// current state. The right panel shows each pendulum's arm.
///
/// # Example
///
/// ```ignore
/// let driver = AnimationDriver::new(players)?;
/// LiveAnimation::new(driver, ["drag 0.1", "escapement"]).show(ShowConfig::new().legend())?;
/// ```
pub struct LiveAnimation {
    driver: AnimationDriver<TrajectoryPlayer>,
    names: Vec<String>,
    trajectories: Vec<Vec<[f64; 2]>>,
}

impl LiveAnimation {
    /// Creates a live animation over a driver.
    ///
    /// Players without a name in `names` are labeled by their index.
    pub fn new<S: Into<String>>(
        driver: AnimationDriver<TrajectoryPlayer>,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        for index in names.len()..driver.len() {
            names.push(format!("pendulum {index}"));
        }

        let trajectories = driver
            .players()
            .map(|player| player.solution().states().to_vec())
            .collect();

        Self {
            driver,
            names,
            trajectories,
        }
    }

    /// Opens a blocking egui window that plays the animation.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.unwrap_or_default();

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| {
                Ok(Box::new(LiveApp {
                    animation: self,
                    legend: config.legend,
                    frame_interval: config.frame_interval,
                }))
            }),
        )
    }
}

/// The egui [`eframe::App`] that drives and renders the animation.
struct LiveApp {
    animation: LiveAnimation,
    legend: bool,
    frame_interval: Duration,
}

impl LiveApp {
    fn phase_plot(&self, ui: &mut egui::Ui, frame: &Frame) {
        let mut plot = Plot::new("phase_space").data_aspect(1.0);
        if self.legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for (name, points) in self.animation.names.iter().zip(&self.animation.trajectories) {
                let line: PlotPoints = points.iter().copied().collect();
                plot_ui.line(Line::new(line).name(name));
            }
            for update in &frame.updates {
                let marker = update.command.marker.to_array();
                plot_ui.points(Points::new(vec![marker]).radius(5.0));
            }
        });
    }

    fn arm_plot(ui: &mut egui::Ui, frame: &Frame) {
        Plot::new("pendulum_arms")
            .data_aspect(1.0)
            .include_x(-2.0)
            .include_x(2.0)
            .include_y(-1.2)
            .include_y(0.7)
            .show(ui, |plot_ui| {
                for update in &frame.updates {
                    let arm = update.command.arm;
                    plot_ui.line(Line::new(PlotPoints::from(arm.segment().to_vec())));
                    plot_ui.points(Points::new(vec![arm.bob]).radius(8.0));
                }
            });
    }
}

impl eframe::App for LiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.animation.driver.tick(&mut ());
        let frame = self.animation.driver.last_frame().clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.phase_plot(&mut columns[0], &frame);
                Self::arm_plot(&mut columns[1], &frame);
            });
        });

        ctx.request_repaint_after(self.frame_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clockwork_solvers::transient::SampledSolution;

    fn driver(players: usize) -> AnimationDriver<TrajectoryPlayer> {
        let players = (0..players).map(|_| {
            let solution =
                SampledSolution::from_samples(vec![0.0, 0.5], vec![[0.0, 1.0], [0.5, 0.0]]);
            TrajectoryPlayer::new(solution.unwrap()).unwrap()
        });
        AnimationDriver::new(players).unwrap()
    }

    #[test]
    fn missing_names_fall_back_to_index() {
        let live = LiveAnimation::new(driver(3), ["first"]);
        assert_eq!(live.names, vec!["first", "pendulum 1", "pendulum 2"]);
    }

    #[test]
    fn copies_each_trajectory() {
        let live = LiveAnimation::new(driver(2), Vec::<String>::new());
        assert_eq!(live.trajectories.len(), 2);
        assert_eq!(live.trajectories[1], vec![[0.0, 1.0], [0.5, 0.0]]);
    }
}
