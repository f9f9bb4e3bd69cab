//! Block-letter banners in a 5-row font.

use serde::{Deserialize, Serialize};

use crate::error::{require_input, Result, ToolError};

pub const ROWS: usize = 5;
pub const MAX_INPUT: usize = 40;

/// Width of the blank glyph used for characters the font lacks.
const BLANK_WIDTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsciiArtOptions {
    /// Character used for the lit cells.
    pub fill: char,
    /// Blank columns between glyphs.
    pub spacing: usize,
}

impl Default for AsciiArtOptions {
    fn default() -> Self {
        Self {
            fill: '#',
            spacing: 1,
        }
    }
}

fn glyph(c: char) -> Option<[&'static str; ROWS]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#### ", "#   #", "#### "],
        'C' => [" ####", "#    ", "#    ", "#    ", " ####"],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "#### ", "#    ", "#####"],
        'F' => ["#####", "#    ", "#### ", "#    ", "#    "],
        'G' => [" ####", "#    ", "#  ##", "#   #", " ####"],
        'H' => ["#   #", "#   #", "#####", "#   #", "#   #"],
        'I' => ["#####", "  #  ", "  #  ", "  #  ", "#####"],
        'J' => ["#####", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "###  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", " ### ", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", " # # ", "  #  ", " # # ", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "   # ", "  #  ", " #   ", "#####"],
        '0' => [" ### ", "#  ##", "# # #", "##  #", " ### "],
        '1' => ["  #  ", " ##  ", "  #  ", "  #  ", " ### "],
        '2' => [" ### ", "#   #", "  ## ", " #   ", "#####"],
        '3' => ["#### ", "    #", " ### ", "    #", "#### "],
        '4' => ["#   #", "#   #", "#####", "    #", "    #"],
        '5' => ["#####", "#    ", "#### ", "    #", "#### "],
        '6' => [" ### ", "#    ", "#### ", "#   #", " ### "],
        '7' => ["#####", "    #", "   # ", "  #  ", "  #  "],
        '8' => [" ### ", "#   #", " ### ", "#   #", " ### "],
        '9' => [" ### ", "#   #", " ####", "    #", " ### "],
        ' ' => ["   ", "   ", "   ", "   ", "   "],
        '!' => ["#", "#", "#", " ", "#"],
        '?' => [" ### ", "#   #", "  ## ", "     ", "  #  "],
        '.' => [" ", " ", " ", " ", "#"],
        ',' => ["  ", "  ", "  ", " #", "# "],
        ':' => [" ", "#", " ", "#", " "],
        '-' => ["     ", "     ", "#####", "     ", "     "],
        '\'' => ["#", "#", " ", " ", " "],
        '/' => ["    #", "   # ", "  #  ", " #   ", "#    "],
        _ => return None,
    };
    Some(rows)
}

/// Render `text` line by line; each input line becomes five output rows.
/// Trailing spaces are trimmed from every row.
pub fn render_ascii_art(text: &str, options: &AsciiArtOptions) -> Result<String> {
    let text = require_input(text)?;
    if text.chars().count() > MAX_INPUT {
        return Err(ToolError::invalid(format!(
            "Text is limited to {MAX_INPUT} characters"
        )));
    }

    let gap = " ".repeat(options.spacing);
    let blank = " ".repeat(BLANK_WIDTH);
    let mut blocks = Vec::new();

    for line in text.lines() {
        let mut rows = vec![String::new(); ROWS];
        for (i, c) in line.chars().enumerate() {
            for (r, row) in rows.iter_mut().enumerate() {
                if i > 0 {
                    row.push_str(&gap);
                }
                match glyph(c) {
                    Some(g) => row.extend(g[r].chars().map(|p| if p == '#' { options.fill } else { ' ' })),
                    None => row.push_str(&blank),
                }
            }
        }
        let rows: Vec<&str> = rows.iter().map(|r| r.trim_end()).collect();
        blocks.push(rows.join("\n"));
    }
    Ok(blocks.join("\n\n"))
}

/// True when every character has a glyph of its own.
pub fn fully_supported(text: &str) -> bool {
    text.chars().all(|c| c == '\n' || glyph(c).is_some())
}
