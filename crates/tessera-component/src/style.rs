//! Style sheets.
//!
//! Styles are opaque value objects as far as the component model is
//! concerned: they are carried by components and handed to the renderer,
//! never interpreted here. Every style sheet is split into a universal
//! [`BaseStyleSheet`] and a kind-specific part.
//!
//! ## Learning: Generic Wrappers
//!
//! `StyleSheet<S>` pairs the shared base with any kind-specific `S`.
//! The compiler then guarantees a button can only ever carry a
//! `StyleSheet<ButtonStyleSheet>`, while the renderer can still apply the
//! base part of any style uniformly.

use serde::{Deserialize, Serialize};

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const CLEAR: Color = Color {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 0,
    };

    /// Creates an opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self {
                red: channel(0)?,
                green: channel(2)?,
                blue: channel(4)?,
                alpha: channel(6)?,
            }),
            _ => None,
        }
    }
}

/// A font reference, resolved by the platform renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "System".to_string(),
        }
    }
}

/// Default point size for text-bearing components.
pub const DEFAULT_TEXT_SIZE: u32 = 15;

/// An image reference, resolved by the platform renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

impl Image {
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justified,
    #[default]
    Natural,
}

/// Style shared by every component kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStyleSheet {
    pub background_color: Option<Color>,
    pub corner_radius: Option<f32>,
    pub border_color: Option<Color>,
    pub border_width: Option<f32>,
    pub alpha: Option<f32>,
}

/// A base style plus a kind-specific style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet<S> {
    pub base: BaseStyleSheet,
    pub component: S,
}

impl<S> StyleSheet<S> {
    pub fn new(base: BaseStyleSheet, component: S) -> Self {
        Self { base, component }
    }
}

/// Builds a style sheet by configuring both parts in place.
///
/// ```ignore
/// let style = style_sheet(|base, label: &mut LabelStyleSheet| {
///     base.background_color = Some(Color::BLUE);
///     label.text_color = Color::WHITE;
/// });
/// ```
pub fn style_sheet<S: Default>(
    configure: impl FnOnce(&mut BaseStyleSheet, &mut S),
) -> StyleSheet<S> {
    let mut base = BaseStyleSheet::default();
    let mut component = S::default();
    configure(&mut base, &mut component);
    StyleSheet { base, component }
}

/// Builds a style sheet that only sets base attributes.
pub fn base_style_sheet(configure: impl FnOnce(&mut BaseStyleSheet)) -> StyleSheet<EmptyStyleSheet> {
    style_sheet(|base, _: &mut EmptyStyleSheet| configure(base))
}

/// Kind-specific style for kinds that have none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyStyleSheet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyleSheet {
    pub text_color: Color,
    pub text_font: Font,
    pub text_size: u32,
}

impl Default for ButtonStyleSheet {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            text_font: Font::default(),
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyleSheet {
    pub text_color: Color,
    pub text_font: Font,
    pub text_size: u32,
    pub text_alignment: TextAlignment,
    pub adjust_to_fit_width: bool,
    /// 0 means unlimited
    pub number_of_lines: u32,
    pub minimum_scale_factor: f32,
}

impl Default for LabelStyleSheet {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            text_font: Font::default(),
            text_size: DEFAULT_TEXT_SIZE,
            text_alignment: TextAlignment::Natural,
            adjust_to_fit_width: false,
            number_of_lines: 0,
            minimum_scale_factor: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFieldStyleSheet {
    pub text_color: Color,
    pub text_font: Font,
    pub text_size: u32,
    pub text_alignment: TextAlignment,
}

impl Default for TextFieldStyleSheet {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            text_font: Font::default(),
            text_size: DEFAULT_TEXT_SIZE,
            text_alignment: TextAlignment::Natural,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyleSheet {
    pub separator_color: Color,
}

impl Default for TableStyleSheet {
    fn default() -> Self {
        Self {
            separator_color: Color::CLEAR,
        }
    }
}

/// Control states a segmented style can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlState {
    #[default]
    Normal,
    Highlighted,
    Selected,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentedStateStyleSheet {
    pub state: ControlState,
    pub text_font: Font,
    pub text_size: u32,
    pub text_color: Color,
}

impl Default for SegmentedStateStyleSheet {
    fn default() -> Self {
        Self {
            state: ControlState::Normal,
            text_font: Font::default(),
            text_size: DEFAULT_TEXT_SIZE,
            text_color: Color::CLEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentedStyleSheet {
    pub border_color: Color,
    pub states: Vec<SegmentedStateStyleSheet>,
}

impl Default for SegmentedStyleSheet {
    fn default() -> Self {
        Self {
            border_color: Color::BLUE,
            states: Vec::new(),
        }
    }
}

/// How a progress bar's bar or track is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressContent {
    Color(Color),
    Image(Image),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressStyleSheet {
    pub progress_style: ProgressContent,
    pub track_style: ProgressContent,
}

impl Default for ProgressStyleSheet {
    fn default() -> Self {
        Self {
            progress_style: ProgressContent::Color(Color::BLUE),
            track_style: ProgressContent::Color(Color::GRAY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerStyleSheet {
    pub color: Color,
}

impl Default for SpinnerStyleSheet {
    fn default() -> Self {
        Self { color: Color::GRAY }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBarStyle {
    #[default]
    Default,
    LightContent,
}

/// Default point size for navigation bar titles.
pub const DEFAULT_NAVIGATION_TITLE_SIZE: u32 = 17;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationBarStyleSheet {
    pub tint_color: Color,
    pub title_text_color: Color,
    pub title_text_font: Font,
    pub title_text_size: u32,
    pub is_translucent: bool,
    pub status_bar_style: StatusBarStyle,
}

impl Default for NavigationBarStyleSheet {
    fn default() -> Self {
        Self {
            tint_color: Color::BLACK,
            title_text_color: Color::BLACK,
            title_text_font: Font::default(),
            title_text_size: DEFAULT_NAVIGATION_TITLE_SIZE,
            is_translucent: true,
            status_bar_style: StatusBarStyle::Default,
        }
    }
}
