mod config;
mod keyboard;
mod mapper;
mod midi;
mod pedal;

mod ui;

pub fn main() -> iced::Result {
    use iced::Application;

    env_logger::Builder::new()
        .filter_module("pedal_mapper", log::LevelFilter::Debug)
        .init();

    ui::App::run(iced::Settings {
        window: iced::window::Settings {
            size: (360, 330),
            resizable: false,
            ..Default::default()
        },
        // Quit through `App` so the listener is stopped
        exit_on_close_request: false,
        ..Default::default()
    })
}
