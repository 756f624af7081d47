//! Terminal styling utilities for consistent CLI output.
//!
//! Respects `NO_COLOR` environment variable and terminal capabilities.

use std::{
   io::{self, Write},
   sync::OnceLock,
   thread,
   time::Duration,
};

use owo_colors::OwoColorize;

/// Whether color output is enabled (cached on first call).
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used.
pub fn colors_enabled() -> bool {
   *COLOR_ENABLED.get_or_init(|| {
      // NO_COLOR takes precedence (https://no-color.org/)
      if std::env::var("NO_COLOR").is_ok() {
         return false;
      }
      supports_color::on(supports_color::Stream::Stdout).is_some_and(|level| level.has_basic)
   })
}

/// Force plain output for the rest of the process (`--no-color`).
///
/// Only takes effect before the first `colors_enabled` call.
pub fn disable_colors() {
   let _ = COLOR_ENABLED.set(false);
}

// === Color Palette ===

/// Success: generated message, completed actions (green + bold).
pub fn success(s: &str) -> String {
   if colors_enabled() {
      s.green().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Warning: non-fatal issues, diff banners (yellow).
pub fn warning(s: &str) -> String {
   if colors_enabled() {
      s.yellow().to_string()
   } else {
      s.to_string()
   }
}

/// Error: failures (red + bold).
pub fn error(s: &str) -> String {
   if colors_enabled() {
      s.red().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Print warning message, clearing any active spinner line first.
pub fn warn(msg: &str) {
   print!("\r\x1b[K");
   io::stdout().flush().ok();
   eprintln!("{} {}", warning(icons::WARNING), warning(msg));
}

/// Dim: less important details (dimmed).
pub fn dim(s: &str) -> String {
   if colors_enabled() {
      s.dimmed().to_string()
   } else {
      s.to_string()
   }
}

/// Bold: headers, key values.
pub fn bold(s: &str) -> String {
   if colors_enabled() {
      s.bold().to_string()
   } else {
      s.to_string()
   }
}

/// Model name styling (magenta).
pub fn model(s: &str) -> String {
   if colors_enabled() {
      s.magenta().to_string()
   } else {
      s.to_string()
   }
}

/// Color diff lines: additions green, removals red, everything else as is.
///
/// Takes `color` explicitly so callers writing to something other than stdout
/// can opt out.
pub fn colorize_diff(diff: &str, color: bool) -> String {
   if !color {
      return diff.to_string();
   }
   diff
      .split('\n')
      .map(|line| {
         if line.starts_with('+') {
            line.green().to_string()
         } else if line.starts_with('-') {
            line.red().to_string()
         } else {
            line.to_string()
         }
      })
      .collect::<Vec<_>>()
      .join("\n")
}

/// Get terminal width, capped at 120 columns.
pub fn term_width() -> usize {
   terminal_size::terminal_size()
      .map_or(80, |(w, _)| w.0 as usize)
      .min(120)
}

/// Section header with decorative lines.
pub fn section_header(title: &str, width: usize, color: bool) -> String {
   let title_len = title.chars().count();
   let line_len = (width.saturating_sub(title_len + 2)) / 2;
   let line = box_chars::HORIZONTAL.to_string().repeat(line_len);

   if color && colors_enabled() {
      format!("{} {} {}", dim(&line), bold(title), dim(&line))
   } else {
      format!("{line} {title} {line}")
   }
}

pub mod box_chars {
   pub const HORIZONTAL: char = '\u{2500}';
}

// === Status Icons ===

pub mod icons {
   pub const SUCCESS: &str = "\u{2713}";
   pub const WARNING: &str = "\u{26A0}";
   pub const ERROR: &str = "\u{2717}";
}

// === Spinner ===

const SPINNER_FRAMES: &[char] = &[
   '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
   '\u{2807}', '\u{280F}',
];

/// Run a function with a spinner animation. Falls back to static text if not a
/// TTY.
pub fn with_spinner<F, T>(message: &str, f: F) -> T
where
   F: FnOnce() -> T,
{
   if !colors_enabled() {
      println!("{message}");
      return f();
   }

   let (tx, rx) = std::sync::mpsc::channel::<()>();
   let msg = message.to_string();

   let spinner = thread::spawn(move || {
      let mut idx = 0;
      loop {
         if rx.try_recv().is_ok() {
            print!("\r\x1b[K{} {}\n", icons::SUCCESS.green(), msg);
            io::stdout().flush().ok();
            break;
         }
         print!("\r{} {}", SPINNER_FRAMES[idx].cyan(), msg);
         io::stdout().flush().ok();
         idx = (idx + 1) % SPINNER_FRAMES.len();
         thread::sleep(Duration::from_millis(80));
      }
   });

   let result = f();
   tx.send(()).ok();
   spinner.join().ok();
   result
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_colorize_diff_disabled_is_identity() {
      let diff = "+added\n-removed\n context";
      assert_eq!(colorize_diff(diff, false), diff);
   }

   #[test]
   fn test_colorize_diff_styles_by_prefix() {
      let out = colorize_diff("+a\n-b\n c", true);
      let lines: Vec<&str> = out.split('\n').collect();
      assert_eq!(lines[0], "+a".green().to_string());
      assert_eq!(lines[1], "-b".red().to_string());
      assert_eq!(lines[2], " c");
   }

   #[test]
   fn test_section_header_centers_title() {
      let header = section_header("Diff", 12, true);
      assert!(header.contains("Diff"));
   }

   #[test]
   fn test_section_header_plain_when_color_off() {
      let line = "\u{2500}".repeat(3);
      assert_eq!(section_header("Diff", 12, false), format!("{line} Diff {line}"));
   }
}
