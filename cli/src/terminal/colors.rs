use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const MONEY: Color = Color::TrueColor { r: 140, g: 230, b: 140 };
pub const DATE: Color = Color::TrueColor { r: 200, g: 170, b: 255 };
