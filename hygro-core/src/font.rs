//! Built-in 5x7 bitmap font
//!
//! Each glyph is five column bytes, left to right. Bit `n` of a column is
//! row `n`, with row 0 at the top; bit 7 is unused. Characters without a
//! glyph render as blank cells.

/// Glyph width in pixels
pub const GLYPH_WIDTH: u8 = 5;

/// Glyph height in pixels
pub const GLYPH_HEIGHT: u8 = 7;

/// Horizontal cursor advance per character at scale 1
pub const GLYPH_ADVANCE: u8 = GLYPH_WIDTH + 1;

/// Column-major glyph bitmap
pub type Glyph = [u8; GLYPH_WIDTH as usize];

/// Glyph for characters missing from the table
pub const BLANK: Glyph = [0x00; 5];

const GLYPHS: &[(char, Glyph)] = &[
    (' ', BLANK),
    (':', [0x00, 0x36, 0x36, 0x00, 0x00]),
    ('.', [0x00, 0x60, 0x60, 0x00, 0x00]),
    ('%', [0x62, 0x64, 0x08, 0x13, 0x23]),
    ('-', [0x08, 0x08, 0x08, 0x08, 0x08]),
    ('0', [0x3E, 0x51, 0x49, 0x45, 0x3E]),
    ('1', [0x00, 0x42, 0x7F, 0x40, 0x00]),
    ('2', [0x62, 0x51, 0x49, 0x49, 0x46]),
    ('3', [0x22, 0x49, 0x49, 0x49, 0x36]),
    ('4', [0x18, 0x14, 0x12, 0x7F, 0x10]),
    ('5', [0x2F, 0x49, 0x49, 0x49, 0x31]),
    ('6', [0x3E, 0x49, 0x49, 0x49, 0x32]),
    ('7', [0x01, 0x01, 0x79, 0x05, 0x03]),
    ('8', [0x36, 0x49, 0x49, 0x49, 0x36]),
    ('9', [0x26, 0x49, 0x49, 0x49, 0x3E]),
    ('A', [0x7E, 0x11, 0x11, 0x11, 0x7E]),
    ('B', [0x7F, 0x49, 0x49, 0x49, 0x36]),
    ('C', [0x3E, 0x41, 0x41, 0x41, 0x22]),
    ('D', [0x7F, 0x41, 0x41, 0x22, 0x1C]),
    ('E', [0x7F, 0x49, 0x49, 0x49, 0x41]),
    ('F', [0x7F, 0x09, 0x09, 0x09, 0x01]),
    ('G', [0x3E, 0x41, 0x49, 0x49, 0x7A]),
    ('H', [0x7F, 0x08, 0x08, 0x08, 0x7F]),
    ('I', [0x00, 0x41, 0x7F, 0x41, 0x00]),
    ('J', [0x20, 0x40, 0x41, 0x3F, 0x01]),
    ('K', [0x7F, 0x08, 0x14, 0x22, 0x41]),
    ('L', [0x7F, 0x40, 0x40, 0x40, 0x40]),
    ('M', [0x7F, 0x02, 0x0C, 0x02, 0x7F]),
    ('N', [0x7F, 0x04, 0x08, 0x10, 0x7F]),
    ('O', [0x3E, 0x41, 0x41, 0x41, 0x3E]),
    ('P', [0x7F, 0x09, 0x09, 0x09, 0x06]),
    ('Q', [0x3E, 0x41, 0x51, 0x21, 0x5E]),
    ('R', [0x7F, 0x09, 0x19, 0x29, 0x46]),
    ('S', [0x46, 0x49, 0x49, 0x49, 0x31]),
    ('T', [0x01, 0x01, 0x7F, 0x01, 0x01]),
    ('U', [0x3F, 0x40, 0x40, 0x40, 0x3F]),
    ('V', [0x1F, 0x20, 0x40, 0x20, 0x1F]),
    ('W', [0x3F, 0x40, 0x38, 0x40, 0x3F]),
    ('X', [0x63, 0x14, 0x08, 0x14, 0x63]),
    ('Y', [0x07, 0x08, 0x70, 0x08, 0x07]),
    ('Z', [0x61, 0x51, 0x49, 0x45, 0x43]),
];

/// Look up the glyph for `ch`, falling back to [`BLANK`]
pub fn glyph(ch: char) -> &'static Glyph {
    GLYPHS
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, g)| g)
        .unwrap_or(&BLANK)
}

/// Set pixels of a glyph as `(column, row)`, column-major
pub fn dots(glyph: &Glyph) -> impl Iterator<Item = (u8, u8)> + '_ {
    glyph.iter().enumerate().flat_map(|(col, &bits)| {
        (0..GLYPH_HEIGHT)
            .filter(move |&row| bits & (1u8 << row) != 0)
            .map(move |row| (col as u8, row))
    })
}

/// Cursor advance for one character at `scale`
pub const fn advance(scale: u8) -> i32 {
    GLYPH_ADVANCE as i32 * effective_scale(scale) as i32
}

/// Scale actually applied; 0 is treated as 1
pub const fn effective_scale(scale: u8) -> u8 {
    if scale == 0 {
        1
    } else {
        scale
    }
}
