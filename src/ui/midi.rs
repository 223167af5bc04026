use std::{borrow::Cow, cell::RefCell, rc::Rc, sync::Arc};

use iced::{widget::row, Alignment, Element, Length};
use iced_lazy::{self, Component};

use once_cell::sync::Lazy;

use crate::midi;
use crate::ui;

static NO_PORT: Lazy<Arc<str>> = Lazy::new(|| "No MIDI port".into());

#[derive(Debug)]
pub struct Ports {
    pub list: Cow<'static, [Arc<str>]>,
    pub cur: Arc<str>,
}

impl Ports {
    pub fn update_from(&mut self, ports: &midi::PortsOut) {
        self.list = Cow::from_iter(ports.list());
    }

    /// Selects `port_name` if available, or falls back to the first port.
    ///
    /// Returns the selected port, which is empty if none is available.
    pub fn select(&mut self, port_name: Arc<str>) -> Arc<str> {
        self.cur = if self.list.contains(&port_name) {
            port_name
        } else {
            self.list.first().cloned().unwrap_or_else(|| NO_PORT.clone())
        };

        self.selected()
    }

    pub fn selected(&self) -> Arc<str> {
        if self.cur == *NO_PORT {
            "".into()
        } else {
            self.cur.clone()
        }
    }
}

impl Default for Ports {
    fn default() -> Self {
        Self {
            list: vec![].into(),
            cur: NO_PORT.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Select(Arc<str>),
    Refresh,
}

pub struct Panel<'a, Message> {
    ports: Rc<RefCell<Ports>>,
    is_locked: bool,
    on_change: Box<dyn 'a + Fn(Arc<str>) -> Message>,
    on_refresh: Message,
}

impl<'a, Message> Panel<'a, Message> {
    pub fn new<F>(ports: Rc<RefCell<Ports>>, on_change: F, on_refresh: Message) -> Self
    where
        F: 'a + Fn(Arc<str>) -> Message,
    {
        Self {
            ports,
            is_locked: false,
            on_change: Box::new(on_change),
            on_refresh,
        }
    }

    /// Prevents changing port, e.g. while the port is in use.
    pub fn locked(mut self, is_locked: bool) -> Self {
        self.is_locked = is_locked;
        self
    }
}

impl<'a, Message: Clone> Component<Message, iced::Renderer> for Panel<'a, Message> {
    type State = ();
    type Event = Event;

    fn update(&mut self, _state: &mut Self::State, event: Event) -> Option<Message> {
        if self.is_locked {
            return None;
        }

        use Event::*;
        match event {
            Select(port_name) => {
                self.ports.borrow_mut().cur = port_name.clone();
                Some((self.on_change)(port_name))
            }
            Refresh => Some(self.on_refresh.clone()),
        }
    }

    fn view(&self, _state: &Self::State) -> Element<Event, iced::Renderer> {
        let ports = self.ports.borrow();
        let pick_list = ui::pick_list(ports.list.clone(), Some(ports.cur.clone()), Event::Select)
            .width(Length::Fill);

        let mut refresh_btn = ui::button("Refresh");
        if !self.is_locked {
            refresh_btn = refresh_btn.on_press(Event::Refresh);
        }

        let content: Element<_> = row![pick_list, refresh_btn]
            .spacing(10)
            .align_items(Alignment::Center)
            .into();

        // Set to true to debug layout
        if false {
            content.explain(iced::Color::WHITE)
        } else {
            content
        }
    }
}

impl<'a, Message: 'a + Clone> From<Panel<'a, Message>> for Element<'a, Message, iced::Renderer> {
    fn from(panel: Panel<'a, Message>) -> Self {
        iced_lazy::component(panel)
    }
}
