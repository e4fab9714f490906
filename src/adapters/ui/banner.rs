//! ASCII banner with a gradient over the schedule palette (WEEK-TINT).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// First-half orange (#ff9966), the `weeks 1-8` default color.
const TINT_ORANGE: (u8, u8, u8) = (0xff, 0x99, 0x66);
/// Irregular blue (#195bd5).
const TINT_BLUE: (u8, u8, u8) = (0x19, 0x5b, 0xd5);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "WEEK-TINT" in figlet ASCII with a gradient from
/// the first-half orange to the irregular blue, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let Ok(font) = FIGfont::standard() else {
        let _ = out.execute(Print("WEEK-TINT\r\n"));
        return;
    };
    let Some(figure) = font.convert("WEEK-TINT") else {
        let _ = out.execute(Print("WEEK-TINT\r\n"));
        return;
    };
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(TINT_ORANGE, TINT_BLUE, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: TINT_BLUE.0,
        g: TINT_BLUE.1,
        b: TINT_BLUE.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
