use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 138, g: 180, b: 248 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 203, b: 107 };
pub const SEPARATOR: Color = Color::TrueColor { r: 98, g: 104, b: 128 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 205, g: 214, b: 244 };

pub const IPV4_ADDR: Color = Color::TrueColor { r: 137, g: 220, b: 235 };
pub const IPV6_ADDR: Color = Color::TrueColor { r: 203, g: 166, b: 247 };

pub const OPEN: Color = Color::TrueColor { r: 166, g: 227, b: 161 };
pub const CLOSED: Color = Color::TrueColor { r: 243, g: 139, b: 168 };
