// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

use std::rc::Rc;

use sensor_monitor_common::{
    DisplayFrame, Generator, GeneratorHandle, MonitorConfig, Notice, SensorContext,
    SimulatedSensor,
};

/// Our App struct that holds the UI, the shared sensor context and the
/// handle of the generator thread.
///
/// The generator publishes a snapshot every couple of seconds. The timer
/// polls the latest snapshot and pushes it into the view model, so the UI
/// thread never waits for the generator.
struct App {
    ui: AppWindow,
    context: SensorContext,
    config: MonitorConfig,
    generator: Option<GeneratorHandle>,
    timer: slint::Timer,
    history: Rc<slint::VecModel<HistoryEntry>>,
}

impl App {
    /// Create a new App struct and start the reading generator.
    fn new() -> anyhow::Result<Self> {
        let config = MonitorConfig::new()?;

        // Make a new AppWindow
        let ui = AppWindow::new()?;

        // One context shared by the generator thread and the UI callbacks.
        let context = SensorContext::new(config.default_threshold);

        let generator =
            Generator::new(Box::new(SimulatedSensor::new()), context.clone(), &config)?.spawn()?;

        // Create a shared model for the history lines
        let history: Rc<slint::VecModel<HistoryEntry>> = Rc::default();
        ui.global::<ViewModel>()
            .set_history(slint::ModelRc::from(history.clone()));
        ui.set_threshold_input(slint::format!("{}", config.default_threshold));

        let app = Self {
            ui,
            context,
            config,
            generator: Some(generator),
            timer: slint::Timer::default(),
            history,
        };
        app.install_callbacks();

        Ok(app)
    }

    fn install_callbacks(&self) {
        let ui_handle = self.ui.as_weak();
        let threshold = self.context.threshold.clone();

        self.ui
            .global::<ViewModel>()
            .on_submit_threshold(move |input| {
                let result = threshold.set_from_str(&input);
                if let Err(e) = &result {
                    log::warn!("Rejected threshold input: {e}");
                }

                let notice = Notice::for_threshold_update(&input, &result);
                if let Some(ui) = ui_handle.upgrade() {
                    ui.invoke_show_notice(
                        notice.title.into(),
                        notice.message.into(),
                        notice.is_error,
                    );
                }
            });

        // Closing the window stops the generator before the event loop quits.
        let active = self.context.active.clone();
        self.ui.window().on_close_requested(move || {
            if active.stop() {
                log::info!("Window closed, stopping reading generator");
            }
            slint::CloseRequestResponse::HideWindow
        });
    }

    /// Run the App, refresh the display periodically until the window is closed.
    fn run(&mut self) -> anyhow::Result<()> {
        let visible_history = self.config.visible_history;

        refresh(&self.ui, &self.context, &self.history, visible_history);

        // Get the handle to the UI as a weak reference.
        let ui_handle = self.ui.as_weak();
        let context = self.context.clone();
        let history = self.history.clone();

        self.timer.start(
            slint::TimerMode::Repeated,
            self.config.refresh_interval(),
            move || {
                if let Some(ui) = ui_handle.upgrade() {
                    refresh(&ui, &context, &history, visible_history);
                }
            },
        );

        let result = self.ui.run();

        self.timer.stop();
        if let Some(generator) = self.generator.take() {
            generator.join();
        }

        // Map a Slint error to an anyhow::Error.
        result.map_err(|e| e.into())
    }
}

/// Renders the latest snapshot into the view model.
fn refresh(
    ui: &AppWindow,
    context: &SensorContext,
    history: &slint::VecModel<HistoryEntry>,
    visible_history: usize,
) {
    let frame = DisplayFrame::render(
        &context.snapshots.latest(),
        context.threshold.get(),
        visible_history,
    );

    let model = ViewModel::get(ui);
    model.set_temperature(frame.temperature_text.into());
    model.set_humidity(frame.humidity_text.into());
    model.set_alert(frame.status.is_alert());
    model.set_status(frame.status_text.into());

    history.set_vec(
        frame
            .history_lines
            .iter()
            .map(HistoryEntry::from)
            .collect::<Vec<_>>(),
    );
}

impl From<&sensor_monitor_common::HistoryLine> for HistoryEntry {
    fn from(line: &sensor_monitor_common::HistoryLine) -> Self {
        Self {
            text: slint::SharedString::from(line.text.as_str()),
            alert: line.alert,
        }
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = App::new()?;

    app.run()
}
