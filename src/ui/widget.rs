use std::borrow::Cow;

use iced::{
    alignment::Horizontal,
    widget::{column, container, text, vertical_space, Button, Container, PickList},
    Alignment, Element, Length,
};

use crate::ui::{self, style};

pub fn button<'a, Message>(
    title: impl Into<Cow<'a, str>>,
) -> Button<'a, Message, iced::Renderer> {
    let title: Cow<'a, str> = title.into();
    Button::new(text(title).size(15)).style(style::Button::Default.into())
}

pub fn pick_list<'a, T, Message>(
    options: impl Into<Cow<'a, [T]>>,
    selected: Option<T>,
    on_selected: impl 'a + Fn(T) -> Message,
) -> PickList<'a, T, Message, iced::Renderer>
where
    T: ToString + Eq,
    [T]: ToOwned<Owned = Vec<T>>,
    Message: 'a,
{
    PickList::new(options, selected, on_selected).text_size(15)
}

/// A full window panel with a title and a cancel button.
pub fn modal<'a, Message>(
    title: &str,
    element: impl Into<Element<'a, Message, iced::Renderer>>,
    on_cancel: Message,
) -> Container<'a, Message>
where
    Message: 'a + Clone,
{
    container(
        column![
            container(text(title.to_string()).size(ui::LABEL_TEXT_SIZE))
                .width(Length::Fill)
                .center_x(),
            vertical_space(Length::Units(15)),
            container(element.into()).width(Length::Fill).center_x(),
            vertical_space(Length::Units(15)),
            Button::new(text("Cancel").size(15).horizontal_alignment(Horizontal::Center))
                .on_press(on_cancel)
                .width(Length::Units(80))
                .style(style::Button::Default.into()),
        ]
        .align_items(Alignment::Center),
    )
    .width(Length::Fill)
    .center_x()
    .height(Length::Fill)
    .center_y()
}
