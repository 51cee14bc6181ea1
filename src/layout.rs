//! Static description of what the main window shows.

/// iced's default line height, relative to the font size.
const LINE_HEIGHT: f32 = 1.3;
const RULE_HEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuId {
    File,
    Help,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewFile,
    OpenFile,
    SaveFile,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub id: MenuId,
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub menus: Vec<Menu>,
    pub run_label: &'static str,
    pub slogan: &'static str,
    pub menu_button_width: f32,
    pub menu_bar_height: f32,
    pub icon_size: f32,
    /// Minimum height of the input panel; it takes the remaining space.
    pub input_min_height: f32,
    pub output_height: f32,
    pub header_padding: u16,
    pub footer_padding: u16,
    pub footer_vertical_padding: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            menus: vec![
                Menu {
                    id: MenuId::File,
                    title: "File",
                    items: vec![
                        MenuItem {
                            label: "New File...",
                            action: MenuAction::NewFile,
                        },
                        MenuItem {
                            label: "Open File...",
                            action: MenuAction::OpenFile,
                        },
                        MenuItem {
                            label: "Save",
                            action: MenuAction::SaveFile,
                        },
                    ],
                },
                Menu {
                    id: MenuId::Help,
                    title: "Help",
                    items: Vec::new(),
                },
                Menu {
                    id: MenuId::Settings,
                    title: "Settings",
                    items: Vec::new(),
                },
            ],
            run_label: "RUN",
            slogan: "APBL - Booking Made Easy",
            menu_button_width: 72.0,
            menu_bar_height: 28.0,
            icon_size: 32.0,
            input_min_height: 207.0,
            output_height: 216.0,
            header_padding: 10,
            footer_padding: 15,
            footer_vertical_padding: 6,
        }
    }
}

impl Layout {
    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.iter().find(|m| m.id == id)
    }

    /// Smallest window that still leaves the input panel `input_min_height`
    /// tall. Every other row has a fixed height.
    pub fn min_window_size(&self, font_size: f32) -> iced::Size {
        let menu_bar = self.menu_bar_height;
        let header = self.icon_size + 2.0 * f32::from(self.header_padding);
        let rules = 3.0 * RULE_HEIGHT;
        let footer = font_size * LINE_HEIGHT + 2.0 * f32::from(self.footer_vertical_padding);
        let height =
            menu_bar + header + rules + self.input_min_height + self.output_height + footer;
        let width = self.menu_button_width * self.menus.len() as f32 + 2.0;
        iced::Size::new(width, height)
    }
}
