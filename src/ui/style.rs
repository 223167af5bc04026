use iced::{
    widget::{button, container},
    Color,
};

pub const STATUS_ON: Color = Color {
    r: 0.0,
    g: 0.6,
    b: 0.0,
    a: 1.0,
};
pub const STATUS_OFF: Color = Color {
    r: 0.8,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

pub fn status_color(is_on: bool) -> Color {
    if is_on {
        STATUS_ON
    } else {
        STATUS_OFF
    }
}

pub struct Background;

impl container::StyleSheet for Background {
    type Style = iced::Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let appearance = style.appearance(&iced::theme::Container::default());
        match style {
            iced::Theme::Light => container::Appearance {
                background: Some(iced::Background::Color(Color::from_rgb(0.98, 0.99, 0.99))),
                ..appearance
            },
            _ => appearance,
        }
    }
}

impl From<Background> for iced::theme::Container {
    fn from(style: Background) -> Self {
        iced::theme::Container::Custom(Box::new(style))
    }
}

#[derive(Clone, Copy)]
pub enum Button {
    Default,
    Start,
    Stop,
    ListItem,
}

impl button::StyleSheet for Button {
    type Style = iced::Theme;

    fn active(&self, style: &Self::Style) -> button::Appearance {
        let appearance = style.active(&iced::theme::Button::Primary);

        use Button::*;
        match self {
            Default => button::Appearance {
                background: match style {
                    iced::Theme::Dark => {
                        Some(iced::Background::Color(Color::from_rgb(0.2, 0.2, 0.2)))
                    }
                    iced::Theme::Light => {
                        Some(iced::Background::Color(Color::from_rgb(0.7, 0.7, 0.7)))
                    }
                    _ => appearance.background,
                },
                text_color: Color::WHITE,
                ..appearance
            },
            Start => button::Appearance {
                background: Some(iced::Background::Color(Color::from_rgb(0.2, 0.8, 0.6))),
                text_color: Color::BLACK,
                ..appearance
            },
            Stop => button::Appearance {
                background: Some(iced::Background::Color(Color::from_rgb(0.55, 0.0, 0.0))),
                text_color: Color::from_rgb(0.9, 0.9, 0.95),
                ..appearance
            },
            ListItem => button::Appearance {
                background: match style {
                    iced::Theme::Dark => {
                        Some(iced::Background::Color(Color::from_rgb(0.1, 0.1, 0.1)))
                    }
                    iced::Theme::Light => {
                        Some(iced::Background::Color(Color::from_rgb(0.97, 0.98, 0.98)))
                    }
                    _ => appearance.background,
                },
                text_color: match style {
                    iced::Theme::Dark => Color::from_rgb(0.7, 0.7, 0.75),
                    iced::Theme::Light => Color::from_rgb(0.45, 0.4, 0.4),
                    _ => appearance.text_color,
                },
                ..appearance
            },
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let appearance = style.hovered(&iced::theme::Button::Primary);

        use Button::*;
        match self {
            Default => button::Appearance {
                background: match style {
                    iced::Theme::Dark => {
                        Some(iced::Background::Color(Color::from_rgb(0.3, 0.3, 0.3)))
                    }
                    iced::Theme::Light => {
                        Some(iced::Background::Color(Color::from_rgb(0.5, 0.5, 0.5)))
                    }
                    _ => appearance.background,
                },
                text_color: Color::WHITE,
                ..appearance
            },
            Start => button::Appearance {
                background: Some(iced::Background::Color(Color::from_rgb(0.3, 0.9, 0.7))),
                text_color: Color::BLACK,
                ..appearance
            },
            Stop => button::Appearance {
                background: Some(iced::Background::Color(Color::from_rgb(0.75, 0.0, 0.0))),
                text_color: Color::WHITE,
                ..appearance
            },
            ListItem => button::Appearance {
                background: Some(iced::Background::Color(Color::from_rgb(0.75, 0.0, 0.0))),
                text_color: Color::WHITE,
                ..appearance
            },
        }
    }
}

impl From<Button> for iced::theme::Button {
    fn from(style: Button) -> Self {
        iced::theme::Button::Custom(Box::new(style))
    }
}
