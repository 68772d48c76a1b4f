use iced::theme::Palette;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Font, Theme};

pub const BACKGROUND: Color = rgb(0.039, 0.039, 0.039);
pub const PAPER: Color = rgb(0.078, 0.078, 0.078);
pub const PRIMARY: Color = rgb(0.145, 0.388, 0.922);
pub const PRIMARY_LIGHT: Color = rgb(0.231, 0.510, 0.965);
pub const PRIMARY_DARK: Color = rgb(0.114, 0.306, 0.847);
pub const SUCCESS: Color = rgb(0.063, 0.725, 0.506);
pub const DANGER: Color = rgb(0.937, 0.267, 0.267);
pub const TEXT: Color = Color::WHITE;
pub const TEXT_MUTED: Color = rgba(1.0, 1.0, 1.0, 0.7);
pub const DIVIDER: Color = rgba(1.0, 1.0, 1.0, 0.1);
pub const ACCENT_TINT: Color = rgba(0.145, 0.388, 0.922, 0.05);
pub const ACCENT_EDGE: Color = rgba(0.145, 0.388, 0.922, 0.1);

pub const SEMIBOLD: Font = Font {
    weight: iced::font::Weight::Semibold,
    ..Font::DEFAULT
};

pub const MEDIUM: Font = Font {
    weight: iced::font::Weight::Medium,
    ..Font::DEFAULT
};

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    Color { r, g, b, a }
}

pub fn theme() -> Theme {
    Theme::custom(
        "ArtAnalyze Dark".to_string(),
        Palette {
            background: BACKGROUND,
            text: TEXT,
            primary: PRIMARY,
            success: SUCCESS,
            danger: DANGER,
        },
    )
}

fn outlined(background: Color, edge: Color) -> container::Style {
    container::Style {
        text_color: Some(TEXT),
        background: Some(Background::Color(background)),
        border: Border {
            color: edge,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn app_bar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BACKGROUND)),
        border: Border {
            color: DIVIDER,
            width: 1.0,
            radius: 0.0.into(),
        },
        ..Default::default()
    }
}

pub fn paper(_theme: &Theme) -> container::Style {
    outlined(PAPER, DIVIDER)
}

pub fn divider(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(DIVIDER)),
        ..Default::default()
    }
}

pub fn artist_card(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(TEXT),
        background: Some(Background::Color(PAPER)),
        border: Border {
            color: PRIMARY,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn drop_zone(is_dragging: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme| {
        if is_dragging {
            outlined(ACCENT_TINT, PRIMARY)
        } else {
            outlined(Color::TRANSPARENT, DIVIDER)
        }
    }
}

pub fn info_box(_theme: &Theme) -> container::Style {
    outlined(ACCENT_TINT, ACCENT_EDGE)
}

pub fn error_banner(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(TEXT),
        background: Some(Background::Color(rgb(0.35, 0.08, 0.08))),
        border: Border {
            color: DANGER,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn user_bubble(_theme: &Theme) -> container::Style {
    outlined(ACCENT_TINT, ACCENT_EDGE)
}

pub fn assistant_bubble(_theme: &Theme) -> container::Style {
    outlined(PAPER, DIVIDER)
}

pub fn badge(filled: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        text_color: Some(if filled { TEXT } else { PRIMARY }),
        background: Some(Background::Color(if filled { PRIMARY } else { ACCENT_EDGE })),
        border: Border {
            radius: 14.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => PRIMARY_DARK,
        button::Status::Disabled => rgba(0.145, 0.388, 0.922, 0.3),
        button::Status::Active => PRIMARY,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: if matches!(status, button::Status::Disabled) {
            TEXT_MUTED
        } else {
            TEXT
        },
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn outlined_button(_theme: &Theme, status: button::Status) -> button::Style {
    let hovered = matches!(status, button::Status::Hovered);
    button::Style {
        background: Some(Background::Color(if hovered {
            rgba(1.0, 1.0, 1.0, 0.05)
        } else {
            Color::TRANSPARENT
        })),
        text_color: TEXT,
        border: Border {
            color: rgba(1.0, 1.0, 1.0, 0.2),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn text_button(_theme: &Theme, status: button::Status) -> button::Style {
    button::Style {
        background: None,
        text_color: if matches!(status, button::Status::Hovered) {
            PRIMARY_LIGHT
        } else {
            PRIMARY
        },
        ..Default::default()
    }
}
