use iced::{
    widget::{column, container, horizontal_space, row, text, Column},
    Alignment, Application, Command, Element, Length, Theme,
};
use iced_native::subscription;
use once_cell::sync::Lazy;

use std::{cell::RefCell, rc::Rc, sync::Arc};

pub static APP_NAME: Lazy<Arc<str>> = Lazy::new(|| "MIDI Pedal Mapper".into());

use crate::{
    config::{self, Config},
    keyboard::{GlobalHook, KeyEvent},
    mapper::Mapper,
    midi,
    pedal::Status,
    ui::{self, tray},
};

type KeyCode = iced_native::keyboard::KeyCode;

#[derive(Debug, Clone)]
pub enum Message {
    Port(Arc<str>),
    RefreshPorts,
    ToggleListener,
    AddKey,
    ShowRemoveKeys,
    RemoveKey(Arc<str>),
    CancelEdit,
    Key(KeyEvent),
    WindowKey(KeyCode),
    Tray(tray::Command),
    Quit,
}

#[derive(Debug, Copy, Clone, Hash)]
pub enum Subscription {
    Keys,
    Tray,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Mode {
    #[default]
    Main,
    AddKey,
    RemoveKey,
}

pub struct App {
    mapper: Mapper<midir::MidiOutputConnection, GlobalHook>,
    ports: midi::PortsOut,
    port_panel: Rc<RefCell<ui::midi::Ports>>,
    tray: Option<tray::Tray>,
    tray_rx: flume::Receiver<tray::Command>,
    mode: Mode,
    output_text: String,
    must_exit: bool,
}

impl App {
    fn handle_error(&mut self, err: &dyn std::error::Error) {
        log::error!("{err}");
        self.output_text = err.to_string();
    }

    fn show_status(&mut self, status: Status) {
        if let Some(tray) = self.tray.as_ref() {
            tray.set_on(status.is_on());
        }
    }

    fn refresh_ports(&mut self) {
        if let Err(err) = self.ports.refresh() {
            self.handle_error(&err);
            return;
        }

        let mut port_panel = self.port_panel.borrow_mut();
        port_panel.update_from(&self.ports);
        let port_name = port_panel.select(self.mapper.midi_port());
        self.mapper.set_midi_port(port_name);
    }

    fn toggle_listener(&mut self) {
        if self.mapper.is_running() {
            let status = self.mapper.stop();
            self.ports.disconnect();
            self.output_text = "Listener stopped".to_string();
            self.show_status(status);

            return;
        }

        let port_name = self.mapper.midi_port();
        let midi_out = match self.ports.connect(port_name.clone()) {
            Ok(midi_out) => midi_out,
            Err(err) => {
                self.handle_error(&err);
                return;
            }
        };

        match self.mapper.start(midi_out) {
            Ok(status) => {
                log::info!("Listening, sending to {port_name}");
                self.output_text = format!("Connected to {port_name}");
                self.show_status(status);
            }
            Err(err) => {
                self.ports.disconnect();
                self.handle_error(&err);
            }
        }
    }

    fn handle_window_key(&mut self, key_code: KeyCode) {
        match self.mode {
            Mode::Main => (),
            _ if key_code == KeyCode::Escape => self.mode = Mode::Main,
            Mode::AddKey => {
                let name = ui::keys::key_name(key_code);
                if let Err(err) = self.mapper.add_trigger_key(&name) {
                    self.handle_error(&err);
                }

                self.mode = Mode::Main;
            }
            Mode::RemoveKey => (),
        }
    }

    fn remove_trigger_key(&mut self, name: &str) {
        if let Err(err) = self.mapper.remove_trigger_key(name) {
            log::debug!("{err}");
        }

        self.mode = Mode::Main;
    }

    fn quit(&mut self) {
        self.mapper.stop();
        self.ports.disconnect();
        if let Some(tray) = self.tray.take() {
            tray.shutdown();
        }

        self.must_exit = true;
    }

    fn trigger_keys_text(&self) -> String {
        let keys: Vec<String> = self
            .mapper
            .trigger_keys()
            .iter()
            .map(str::to_uppercase)
            .collect();

        if keys.is_empty() {
            "(none)".to_string()
        } else {
            keys.join(", ")
        }
    }

    fn main_view(&self) -> Element<Message> {
        let is_running = self.mapper.is_running();
        let status = self.mapper.status();

        let (start_label, start_style) = if is_running {
            ("Stop Pedal Listener", ui::style::Button::Stop)
        } else {
            ("Start Pedal Listener", ui::style::Button::Start)
        };

        let mut add_btn = ui::button("Add Key");
        let mut remove_btn = ui::button("Remove Key");
        if !is_running {
            add_btn = add_btn.on_press(Message::AddKey);
            remove_btn = remove_btn.on_press(Message::ShowRemoveKeys);
        }

        column![
            text("MIDI Port:").size(ui::LABEL_TEXT_SIZE),
            ui::midi::Panel::new(
                self.port_panel.clone(),
                Message::Port,
                Message::RefreshPorts
            )
            .locked(is_running),
            text("Trigger Keys:").size(ui::LABEL_TEXT_SIZE),
            text(self.trigger_keys_text()).size(ui::LABEL_TEXT_SIZE),
            row![add_btn, horizontal_space(Length::Fill), remove_btn],
            row![
                ui::button(start_label)
                    .on_press(Message::ToggleListener)
                    .style(start_style.into()),
                horizontal_space(Length::Fill),
                text(status.to_string())
                    .size(ui::STATUS_TEXT_SIZE)
                    .style(ui::style::status_color(status.is_on())),
            ]
            .align_items(Alignment::Center),
            text(self.output_text.clone()).size(ui::OUTPUT_TEXT_SIZE),
        ]
        .spacing(10)
        .into()
    }

    fn remove_view(&self) -> Element<Message> {
        let keys = self.mapper.trigger_keys().iter().fold(
            Column::new().spacing(5).align_items(Alignment::Center),
            |keys, key| {
                keys.push(
                    ui::button(key.to_uppercase())
                        .width(Length::Units(120))
                        .style(ui::style::Button::ListItem.into())
                        .on_press(Message::RemoveKey(key.into())),
                )
            },
        );

        ui::modal("Remove Trigger Key", keys, Message::CancelEdit).into()
    }
}

impl Application for App {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = ();

    fn new(_flags: ()) -> (App, Command<Message>) {
        let mut output_text = " ".to_string();

        let store = match config::Store::user() {
            Ok(store) => Some(store),
            Err(err) => {
                log::error!("{err}");
                None
            }
        };

        let config = match store.as_ref().map(config::Store::load) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                let msg = format!("Using default settings. {err}");
                log::error!("{msg}");
                output_text = msg;
                Config::default()
            }
            None => Config::default(),
        };

        let (tray_tx, tray_rx) = flume::unbounded();
        let tray = match tray::Tray::spawn(tray_tx) {
            Ok(tray) => Some(tray),
            Err(err) => {
                log::error!("Couldn't create tray icon: {err}");
                None
            }
        };

        let mut app = App {
            mapper: Mapper::new(GlobalHook::default(), store, config),
            ports: midi::PortsOut::new(APP_NAME.clone()),
            port_panel: Default::default(),
            tray,
            tray_rx,
            mode: Mode::default(),
            output_text,
            must_exit: false,
        };

        app.refresh_ports();
        if app.port_panel.borrow().list.is_empty() {
            app.output_text = "No MIDI output port found".to_string();
        }

        (app, Command::none())
    }

    fn title(&self) -> String {
        APP_NAME.to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        use Message::*;
        match message {
            Port(port_name) => self.mapper.set_midi_port(port_name),
            RefreshPorts => self.refresh_ports(),
            ToggleListener | Tray(tray::Command::ToggleListener) => self.toggle_listener(),
            Key(event) => {
                if let Some(status) = self.mapper.handle(&event) {
                    self.show_status(status);
                }
            }
            WindowKey(key_code) => self.handle_window_key(key_code),
            AddKey => self.mode = Mode::AddKey,
            ShowRemoveKeys => self.mode = Mode::RemoveKey,
            RemoveKey(name) => self.remove_trigger_key(&name),
            CancelEdit => self.mode = Mode::Main,
            Quit | Tray(tray::Command::Quit) => self.quit(),
        }

        Command::none()
    }

    fn subscription(&self) -> iced::Subscription<Message> {
        iced::Subscription::batch([
            subscription::unfold(Subscription::Keys, self.mapper.events(), |rx| {
                next_message(rx, Message::Key)
            }),
            subscription::unfold(Subscription::Tray, self.tray_rx.clone(), |rx| {
                next_message(rx, Message::Tray)
            }),
            subscription::events_with(window_event),
        ])
    }

    fn should_exit(&self) -> bool {
        self.must_exit
    }

    fn view(&self) -> Element<Message> {
        let content = match self.mode {
            Mode::Main => self.main_view(),
            Mode::AddKey => ui::modal(
                "Add Trigger Key",
                text("Press a key (Esc to cancel)"),
                Message::CancelEdit,
            )
            .into(),
            Mode::RemoveKey => self.remove_view(),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(15)
            .style(ui::style::Background)
            .into()
    }
}

async fn next_message<T>(
    rx: flume::Receiver<T>,
    to_message: fn(T) -> Message,
) -> (Option<Message>, flume::Receiver<T>) {
    match rx.recv_async().await {
        Ok(item) => (Some(to_message(item)), rx),
        Err(_) => {
            // Senders are gone, nothing more will come
            futures::future::pending::<()>().await;
            (None, rx)
        }
    }
}

fn window_event(
    event: iced_native::Event,
    _status: iced_native::event::Status,
) -> Option<Message> {
    use iced_native::{keyboard, window, Event};

    match event {
        Event::Window(window::Event::CloseRequested) => Some(Message::Quit),
        Event::Keyboard(keyboard::Event::KeyPressed { key_code, .. }) => {
            Some(Message::WindowKey(key_code))
        }
        _ => None,
    }
}
