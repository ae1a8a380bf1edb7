//! GUI controller
//!
//! Owns the popup panel and the tray icon on the GUI thread. User input from
//! either surface becomes a `ControlCommand` for the controller thread; the
//! `AppState` snapshots it sends back are applied to both surfaces by a
//! repeating Slint timer, which also drains tray menu and icon events.
//!
//! While a slider is being dragged, snapshots still in flight describe values
//! the user has already moved past. Slider positions and labels from
//! snapshots are held back until the sliders have been idle for
//! `SLIDER_SETTLE`, so the knob never jumps back under the pointer; the
//! latest held snapshot is applied once they settle.

use super::tray::{TrayAction, TrayIcon};
use crate::PanelWindow;
use monitor_tray::config::{AppSettings, PanelGeometry};
use monitor_tray::controller::{
    AppState, ControlCommand, PanelTransition, PanelVisibility, format_percent,
};
use monitor_tray::error::{MonitorTrayError, Result};
use monitor_tray::utils::{panel_position, placement::query_desktop, scale_panel};
use slint::{
    CloseRequestResponse, ComponentHandle, ModelRc, SharedString, StandardListViewItem, VecModel,
};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tray_icon::{TrayIconEvent, menu::MenuEvent};

/// Quiet time after the last slider movement before snapshots move the sliders again
const SLIDER_SETTLE: Duration = Duration::from_millis(400);

fn gui_error(e: impl std::error::Error + Send + Sync + 'static) -> MonitorTrayError {
    MonitorTrayError::GuiError(Box::new(e))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Slider values are bounded to 0-100"
)]
fn slider_level(value: f32) -> i32 {
    value.round() as i32
}

/// Time of the last slider movement made by the user
#[derive(Clone, Default)]
struct SliderActivity(Rc<Cell<Option<Instant>>>);

impl SliderActivity {
    fn touch(&self) {
        self.0.set(Some(Instant::now()));
    }

    fn is_settled(&self) -> bool {
        self.0
            .get()
            .is_none_or(|last| last.elapsed() >= SLIDER_SETTLE)
    }
}

/// Popup panel + tray icon
pub struct GuiController {
    window: PanelWindow,
    tray: TrayIcon,
    settings: AppSettings,
    command_sender: mpsc::Sender<ControlCommand>,
    state_receiver: mpsc::Receiver<AppState>,
    sliders: SliderActivity,
}

impl GuiController {
    /// Create the (hidden) panel and the tray icon, and wire panel callbacks
    ///
    /// # Arguments
    ///
    /// * `settings` - Titles, reset level, panel geometry and polling interval
    /// * `command_sender` - Channel to the controller thread
    /// * `state_receiver` - `AppState` snapshots from the controller thread
    ///
    /// # Returns
    ///
    /// Returns a Result containing the GuiController or an error if the panel
    /// or the tray icon could not be created.
    pub fn new(
        settings: AppSettings,
        command_sender: mpsc::Sender<ControlCommand>,
        state_receiver: mpsc::Receiver<AppState>,
    ) -> Result<Self> {
        info!("Creating control panel");
        let window = PanelWindow::new().map_err(gui_error)?;
        window.set_app_title(SharedString::from(settings.app_name.as_str()));
        window.set_reset_text(SharedString::from(format!(
            "Reset to {}%",
            settings.reset_level
        )));

        let sliders = SliderActivity::default();

        let sender = command_sender.clone();
        window.on_monitor_selected(move |index| {
            if let Ok(index) = usize::try_from(index) {
                send(&sender, ControlCommand::Select(index));
            }
        });

        let sender = command_sender.clone();
        let weak = window.as_weak();
        let activity = sliders.clone();
        window.on_brightness_changed(move |value| {
            let level = slider_level(value);
            activity.touch();
            if let Some(window) = weak.upgrade() {
                window.set_brightness_label(label_for(level));
            }
            send(&sender, ControlCommand::SetBrightness(level));
        });

        let sender = command_sender.clone();
        let weak = window.as_weak();
        let activity = sliders.clone();
        window.on_contrast_changed(move |value| {
            let level = slider_level(value);
            activity.touch();
            if let Some(window) = weak.upgrade() {
                window.set_contrast_label(label_for(level));
            }
            send(&sender, ControlCommand::SetContrast(level));
        });

        let sender = command_sender.clone();
        window.on_reset_clicked(move || send(&sender, ControlCommand::Reset));

        let tray = TrayIcon::new(&settings)?;

        Ok(Self {
            window,
            tray,
            settings,
            command_sender,
            state_receiver,
            sliders,
        })
    }

    /// Run the GUI event loop until "Exit" is chosen from the tray menu
    pub fn run(self) -> Result<()> {
        let Self {
            window,
            mut tray,
            settings,
            command_sender,
            state_receiver,
            sliders,
        } = self;

        let visibility = Rc::new(Cell::new(PanelVisibility::default()));

        // Alt+F4 on the borderless panel hides it like the toggle does
        let closed = Rc::clone(&visibility);
        window.window().on_close_requested(move || {
            let mut state = closed.get();
            if state.hide().is_some() {
                debug!("Panel closed by the window manager");
            }
            closed.set(state);
            CloseRequestResponse::HideWindow
        });

        let weak = window.as_weak();
        let mut loaded_names: Option<Vec<String>> = None;
        let mut held: Option<AppState> = None;

        let timer = slint::Timer::default();
        timer.start(
            slint::TimerMode::Repeated,
            settings.poll_interval,
            move || {
                let Some(window) = weak.upgrade() else {
                    return;
                };

                while let Ok(state) = state_receiver.try_recv() {
                    apply_state(&window, &state, &mut loaded_names);
                    if let Err(e) = tray.apply_state(&state, &settings.app_name) {
                        warn!("Failed to update tray icon: {}", e);
                    }
                    held = Some(state);
                }
                if sliders.is_settled()
                    && let Some(state) = held.take()
                {
                    apply_levels(&window, &state);
                }

                let mut actions = Vec::new();
                while let Ok(event) = MenuEvent::receiver().try_recv() {
                    actions.extend(tray.menu_action(&event));
                }
                while let Ok(event) = TrayIconEvent::receiver().try_recv() {
                    actions.extend(TrayIcon::icon_action(&event));
                }

                for action in actions {
                    debug!("Tray action: {:?}", action);
                    let mut panel = visibility.get();
                    match action {
                        TrayAction::OpenSite => {
                            if let Err(e) = open::that(&settings.help_url) {
                                warn!("Failed to open {}: {}", settings.help_url, e);
                            }
                        }
                        TrayAction::TogglePanel => match panel.toggle() {
                            PanelTransition::Show => show_panel(&window, &settings.panel),
                            PanelTransition::Hide => hide_panel(&window),
                        },
                        TrayAction::Reset => send(&command_sender, ControlCommand::Reset),
                        TrayAction::Exit => {
                            info!("Exit requested from tray menu");
                            if panel.hide().is_some() {
                                hide_panel(&window);
                            }
                            send(&command_sender, ControlCommand::Shutdown);
                            if let Err(e) = slint::quit_event_loop() {
                                error!("Failed to stop GUI event loop: {}", e);
                            }
                        }
                    }
                    visibility.set(panel);
                }
            },
        );

        info!("Starting GUI event loop");
        slint::run_event_loop_until_quit().map_err(gui_error)?;
        timer.stop();
        info!("GUI event loop exited");

        Ok(())
    }
}

fn send(sender: &mpsc::Sender<ControlCommand>, command: ControlCommand) {
    if let Err(e) = sender.send(command) {
        warn!("Controller is gone, dropping {:?}", e.0);
    }
}

fn label_for(level: i32) -> SharedString {
    let level = u8::try_from(level.clamp(0, 100)).unwrap_or(100);
    SharedString::from(format_percent(level))
}

fn apply_state(window: &PanelWindow, state: &AppState, loaded_names: &mut Option<Vec<String>>) {
    if loaded_names.as_ref() != Some(&state.monitor_names) {
        let items: Vec<StandardListViewItem> = state
            .monitor_names
            .iter()
            .map(|name| StandardListViewItem::from(name.as_str()))
            .collect();
        window.set_monitor_names(ModelRc::new(VecModel::from(items)));
        *loaded_names = Some(state.monitor_names.clone());
    }

    window.set_selected_monitor(i32::try_from(state.selected).unwrap_or(0));
}

fn apply_levels(window: &PanelWindow, state: &AppState) {
    window.set_brightness(f32::from(state.brightness));
    window.set_contrast(f32::from(state.contrast));
    window.set_brightness_label(SharedString::from(state.brightness_label()));
    window.set_contrast_label(SharedString::from(state.contrast_label()));
}

fn show_panel(window: &PanelWindow, geometry: &PanelGeometry) {
    // The window has no size until it has been shown once; the configured
    // size is in logical pixels and placement works in physical ones
    let size = window.window().size();
    let geometry = if size.width == 0 || size.height == 0 {
        scale_panel(geometry, window.window().scale_factor())
    } else {
        PanelGeometry {
            width: size.width,
            height: size.height,
            ..*geometry
        }
    };
    let (work_area, screen) = query_desktop();
    let (x, y) = panel_position(work_area, screen, &geometry);
    debug!("Showing panel at ({}, {})", x, y);

    window
        .window()
        .set_position(slint::PhysicalPosition::new(x, y));
    if let Err(e) = window.show() {
        error!("Failed to show panel: {}", e);
    }
}

fn hide_panel(window: &PanelWindow) {
    if let Err(e) = window.hide() {
        error!("Failed to hide panel: {}", e);
    }
}
