use iced::widget::{
    button, column, container, horizontal_rule, horizontal_space, image, mouse_area, row,
    scrollable, stack, text, text_editor, Space,
};
use iced::{Alignment, Background, Border, Color, Element, Length, Theme};

use crate::app::{App, Message};
use crate::layout::{Menu, MenuId};

pub fn view(app: &App) -> Element<'_, Message> {
    let settings = &app.settings;
    let layout = &app.layout;
    let fg = settings.text_color.to_color();
    let bg = settings.background_color.to_color();
    let panel = settings.panel_color.to_color();
    let font = settings.font.regular();
    let size = settings.font.size;

    let icon = layout.icon_size;
    let header = row![
        image(app.icons.star.clone()).width(icon).height(icon),
        horizontal_space(),
        text(layout.run_label).font(font).size(size).color(fg).width(40),
        mouse_area(image(app.icons.run.clone()).width(icon).height(icon))
            .on_press(Message::RunClicked),
    ]
    .spacing(6)
    .align_y(Alignment::Center)
    .padding([layout.header_padding, 36]);

    let input = text_editor(app.content())
        .on_action(Message::InputAction)
        .font(font)
        .size(size)
        .height(Length::Fill)
        .style(move |theme: &Theme, status| {
            let mut style = text_editor::default(theme, status);
            style.background = Background::Color(panel);
            style.border = Border::default();
            style.value = fg;
            style
        });

    let output = container(scrollable(
        text(app.output_text())
            .font(font)
            .size(size)
            .color(fg)
            .width(Length::Fill),
    ))
    .padding(5)
    .width(Length::Fill)
    .height(layout.output_height)
    .style(move |_theme| container::Style {
        background: Some(Background::Color(panel)),
        text_color: Some(fg),
        ..container::Style::default()
    });

    let footer = container(
        text(layout.slogan)
            .font(settings.font.bold())
            .size(size)
            .color(fg),
    )
    .center_x(Length::Fill)
    .padding([layout.footer_vertical_padding, layout.footer_padding]);

    let body = column![
        menu_bar(app, fg),
        header,
        horizontal_rule(1),
        input,
        horizontal_rule(1),
        output,
        horizontal_rule(1),
        footer,
    ];

    // Presses that no widget above captures count as leaving the input.
    let base = mouse_area(
        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_theme| container::Style {
                background: Some(Background::Color(bg)),
                text_color: Some(fg),
                ..container::Style::default()
            }),
    )
    .on_press(Message::InputFocusLost);

    match app.open_menu().and_then(|id| dropdown(app, id, fg, panel)) {
        Some(overlay) => stack![base, overlay].into(),
        None => base.into(),
    }
}

fn flat_button(label: &str, fg: Color) -> button::Button<'_, Message> {
    button(text(label).size(13).color(fg))
        .padding([4, 10])
        .style(move |_theme, status| button::Style {
            background: match status {
                button::Status::Hovered | button::Status::Pressed => {
                    Some(Background::Color(Color { a: 0.15, ..fg }))
                }
                _ => None,
            },
            text_color: fg,
            ..button::Style::default()
        })
}

fn menu_bar(app: &App, fg: Color) -> Element<'_, Message> {
    let layout = &app.layout;
    let buttons = layout.menus.iter().map(|menu: &Menu| {
        flat_button(menu.title, fg)
            .width(layout.menu_button_width)
            .on_press(Message::MenuToggled(menu.id))
            .into()
    });
    row(buttons).height(layout.menu_bar_height).padding([0, 1]).into()
}

/// Item list drawn under the open menu; `None` for menus with no items.
fn dropdown(app: &App, id: MenuId, fg: Color, panel: Color) -> Option<Element<'_, Message>> {
    let index = app.layout.menus.iter().position(|m| m.id == id)?;
    let menu = &app.layout.menus[index];
    if menu.items.is_empty() {
        return None;
    }

    let items = menu.items.iter().map(|item| {
        flat_button(item.label, fg)
            .width(Length::Fill)
            .on_press(Message::MenuSelected(item.action))
            .into()
    });
    let list = container(column(items).width(140))
        .padding(2)
        .style(move |_theme| container::Style {
            background: Some(Background::Color(panel)),
            border: Border {
                color: Color { a: 0.3, ..fg },
                width: 1.0,
                radius: 2.0.into(),
            },
            ..container::Style::default()
        });

    Some(
        column![
            Space::with_height(app.layout.menu_bar_height),
            row![Space::with_width(1.0 + app.layout.menu_button_width * index as f32), list],
        ]
        .into(),
    )
}
